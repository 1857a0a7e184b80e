use jiff::Zoned;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Padding, Paragraph, Tabs, Wrap},
};
use strum::IntoEnumIterator;

use super::app::{App, ViewMode};
use crate::api::Section;
use crate::internal::i18n;
use crate::internal::models::FetchState;
use crate::internal::preferences::Theme;
use crate::internal::time_window::record_timestamp;
use crate::utils::datetime::format_relative;
use crate::utils::html::article_body_text;
use crate::utils::url::source_domain;

/// Colors for one theme.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub background: Color,
    pub foreground: Color,
    pub muted: Color,
    pub accent: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,
    pub error: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                background: Color::Rgb(0xff, 0xfc, 0xf0),
                foreground: Color::Rgb(0x10, 0x0f, 0x0f),
                muted: Color::Rgb(0x6f, 0x6e, 0x69),
                accent: Color::Rgb(0xaf, 0x30, 0x29),
                selection_bg: Color::Rgb(0xe6, 0xe4, 0xd9),
                selection_fg: Color::Rgb(0x10, 0x0f, 0x0f),
                error: Color::Rgb(0xd1, 0x4d, 0x41),
            },
            Theme::Dark => Self {
                background: Color::Rgb(0x10, 0x0f, 0x0f),
                foreground: Color::Rgb(0xce, 0xcd, 0xc3),
                muted: Color::Rgb(0x87, 0x85, 0x80),
                accent: Color::Rgb(0xd1, 0x4d, 0x41),
                selection_bg: Color::Rgb(0x34, 0x33, 0x31),
                selection_fg: Color::Rgb(0xff, 0xfc, 0xf0),
                error: Color::Rgb(0xd1, 0x4d, 0x41),
            },
        }
    }
}

/// Wrap `title` to fit `width` columns after a `prefix`-wide gutter.
pub fn wrap_title(title: &str, width: u16, prefix: u16) -> Vec<String> {
    let available = width.saturating_sub(prefix).max(10) as usize;
    textwrap::wrap(title, available)
        .into_iter()
        .map(|line| line.into_owned())
        .collect()
}

pub fn draw(app: &mut App, f: &mut Frame) {
    let start = std::time::Instant::now();
    let palette = Palette::for_theme(app.theme);

    f.render_widget(
        Block::default().style(Style::default().bg(palette.background).fg(palette.foreground)),
        f.area(),
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(f.area());

    render_tabs(app, f, chunks[0], &palette);
    render_filter_bar(app, f, chunks[1], &palette);

    match app.view_mode {
        ViewMode::List => render_list(app, f, chunks[2], &palette),
        ViewMode::Article => render_article(app, f, chunks[2], &palette),
    }

    render_status_bar(app, f, chunks[3], &palette);

    if app.show_help {
        render_help(app, f, &palette);
    }

    if app.config.logging.enable_performance_metrics && cfg!(debug_assertions) {
        tracing::debug!(elapsed = ?start.elapsed(), view = ?app.view_mode, "render.draw");
    }
}

fn render_tabs(app: &App, f: &mut Frame, area: Rect, palette: &Palette) {
    let titles: Vec<Line> = Section::iter()
        .enumerate()
        .map(|(i, s)| Line::from(format!("{} {}", i + 1, app.t(s.label_key()))))
        .collect();
    let selected = Section::iter()
        .position(|s| s == app.current_section)
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(palette.muted))
        .highlight_style(
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )
        .divider("|");
    f.render_widget(tabs, area);
}

fn render_filter_bar(app: &App, f: &mut Frame, area: Rect, palette: &Palette) {
    let filter = app.current_filter();
    let total = app.current_articles().len();
    let text = Line::from(vec![
        Span::styled(
            format!(" {}: ", app.t("filter.label")),
            Style::default().fg(palette.muted),
        ),
        Span::styled(
            i18n::window_label(app.language, filter.selected()),
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  ({}/{})", app.visible.len(), total),
            Style::default().fg(palette.muted),
        ),
    ]);
    f.render_widget(Paragraph::new(text), area);
}

fn render_list(app: &mut App, f: &mut Frame, area: Rect, palette: &Palette) {
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(palette.muted))
        .padding(Padding::horizontal(1));

    if app.visible.is_empty() {
        let message = match app.current_fetch_state() {
            FetchState::Idle | FetchState::Loading => app.t("status.loading"),
            FetchState::Failed => app.t("status.failed"),
            FetchState::Loaded => app.t("status.empty"),
        };
        let p = Paragraph::new(message)
            .alignment(Alignment::Center)
            .style(Style::default().fg(palette.muted))
            .block(block);
        f.render_widget(p, area);
        return;
    }

    let now = Zoned::now();
    let articles = app.current_articles();
    let items: Vec<ListItem> = app
        .visible
        .iter()
        .enumerate()
        .filter_map(|(row, &index)| articles.get(index).map(|a| (row, a)))
        .map(|(row, article)| {
            let mut lines: Vec<Line> = wrap_title(article.display_title(), area.width, 6)
                .into_iter()
                .enumerate()
                .map(|(i, text)| {
                    let gutter = match i {
                        0 => format!("{:<4}", row + 1),
                        _ => "    ".to_string(),
                    };
                    Line::from(vec![
                        Span::styled(gutter, Style::default().fg(palette.muted)),
                        Span::styled(text, Style::default().fg(palette.foreground)),
                    ])
                })
                .collect();

            let age = record_timestamp(article, &now)
                .map(|published| format_relative(&published, &now))
                .unwrap_or_else(|| "-".to_string());
            let mut meta = vec![Span::raw("    "), Span::raw(age)];
            if let Some(author) = &article.author {
                meta.push(Span::raw(format!(" | {}", author)));
            }
            if let Some(domain) = article.url.as_deref().and_then(source_domain) {
                meta.push(Span::raw(format!(" | {}", domain)));
            }
            lines.push(Line::from(meta).style(Style::default().fg(palette.muted)));

            ListItem::new(lines)
        })
        .collect();

    let list = List::new(items).block(block).highlight_style(
        Style::default()
            .bg(palette.selection_bg)
            .fg(palette.selection_fg)
            .add_modifier(Modifier::BOLD),
    );
    f.render_stateful_widget(list, area, &mut app.list_state);
}

fn render_article(app: &App, f: &mut Frame, area: Rect, palette: &Palette) {
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(palette.muted))
        .padding(Padding::horizontal(2));

    let Some(article) = &app.article else {
        let message = match app.article_loading {
            true => app.t("status.loading_article"),
            false => "",
        };
        let p = Paragraph::new(message)
            .alignment(Alignment::Center)
            .style(Style::default().fg(palette.muted))
            .block(block);
        f.render_widget(p, area);
        return;
    };

    let now = Zoned::now();
    let mut lines = vec![
        Line::from(Span::styled(
            article.display_title().to_string(),
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )),
    ];

    let mut meta = Vec::new();
    if let Some(author) = &article.author {
        meta.push(format!("{} {}", app.t("article.by"), author));
    }
    if let Some(published) = record_timestamp(article, &now) {
        meta.push(published.strftime("%Y-%m-%d %H:%M").to_string());
    }
    if let Some(domain) = article.url.as_deref().and_then(source_domain) {
        meta.push(domain);
    }
    lines.push(Line::from(meta.join(" | ")).style(Style::default().fg(palette.muted)));
    lines.push(Line::default());

    if let Some(summary) = &article.summary {
        lines.push(Line::from(Span::styled(
            summary.clone(),
            Style::default().add_modifier(Modifier::ITALIC),
        )));
        lines.push(Line::default());
    }

    let width = area.width.saturating_sub(4) as usize;
    let body = article
        .content
        .as_deref()
        .map(|html| article_body_text(html, width))
        .unwrap_or_default();
    lines.extend(body.lines().map(|l| Line::from(l.to_string())));

    let p = Paragraph::new(lines)
        .block(block)
        .style(Style::default().fg(palette.foreground))
        .wrap(Wrap { trim: false })
        .scroll((app.article_scroll, 0));
    f.render_widget(p, area);
}

fn render_status_bar(app: &App, f: &mut Frame, area: Rect, palette: &Palette) {
    let (text, style) = match &app.status {
        Some(status) if status.is_error => (
            status.text.clone(),
            Style::default().fg(palette.error).add_modifier(Modifier::BOLD),
        ),
        Some(status) => (status.text.clone(), Style::default().fg(palette.accent)),
        None => {
            let nav = match (
                app.dispatcher().can_go_back(),
                app.dispatcher().can_go_forward(),
            ) {
                (true, true) => "<- ->",
                (true, false) => "<-",
                (false, true) => "->",
                (false, false) => "",
            };
            (
                format!(
                    "{}  {}  {}  [{} | {}] v{}",
                    app.t("app.title"),
                    app.dispatcher().current_path(),
                    nav,
                    app.language.code(),
                    app.theme.as_str(),
                    app.app_version
                ),
                Style::default().fg(palette.muted),
            )
        }
    };
    f.render_widget(Paragraph::new(text).style(style), area);
}

fn render_help(app: &App, f: &mut Frame, palette: &Palette) {
    let area = centered_rect(f.area(), 60, 9);
    let lines: Vec<Line> = app
        .t("help.hint")
        .split("  ")
        .map(|entry| Line::from(entry.to_string()))
        .collect();

    let p = Paragraph::new(lines)
        .block(
            Block::default()
                .title(app.t("help.title"))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.accent))
                .padding(Padding::horizontal(1)),
        )
        .style(Style::default().bg(palette.background).fg(palette.foreground))
        .wrap(Wrap { trim: true });

    f.render_widget(Clear, area);
    f.render_widget(p, area);
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let [vertical] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(vertical);
    rect
}

use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};
use tui_news_portal::api::Section;
use tui_news_portal::config::AppConfig;
use tui_news_portal::internal::models::Article;
use tui_news_portal::internal::preferences::{LocalStore, Preferences};
use tui_news_portal::internal::ui::app::{Action, App, ViewMode};

fn test_app() -> App {
    App::with_parts(
        AppConfig::default(),
        Preferences::new(LocalStore::in_memory()),
    )
}

fn articles() -> Vec<Article> {
    vec![
        Article {
            id: 1,
            title: Some("Dam inaugurated upstream".to_string()),
            author: Some("M. Ortiz".to_string()),
            url: Some("https://www.portal.example/national/1".to_string()),
            content: Some("<p>Flood barriers hold after the storm.</p>".to_string()),
            published_at: Some(jiff::Timestamp::now().to_string()),
            ..Default::default()
        },
        Article {
            id: 2,
            title: Some("Market closes higher".to_string()),
            ..Default::default()
        },
    ]
}

fn screen_text(buffer: &Buffer) -> String {
    let area = buffer.area;
    (area.top()..area.bottom())
        .map(|y| {
            (area.left()..area.right())
                .map(|x| buffer[(x, y)].symbol())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render(app: &mut App) -> String {
    let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
    terminal.draw(|f| app.ui(f)).unwrap();
    screen_text(terminal.backend().buffer())
}

#[tokio::test]
async fn test_list_view_render() {
    let mut app = test_app();
    app.handle_action(Action::ArticlesLoaded(Section::Latest, articles()))
        .await;

    let screen = render(&mut app);

    assert!(screen.contains("1 Latest"));
    assert!(screen.contains("7 Opinion"));
    assert!(screen.contains("Showing: All"));
    assert!(screen.contains("Dam inaugurated upstream"));
    assert!(screen.contains("M. Ortiz | portal.example"));
    assert!(screen.contains("Market closes higher"));
}

#[tokio::test]
async fn test_empty_and_loading_states() {
    let mut app = test_app();
    assert!(render(&mut app).contains("Loading articles..."));

    app.handle_action(Action::ArticlesLoaded(Section::Latest, Vec::new()))
        .await;
    assert!(render(&mut app).contains("No articles in this window"));
}

#[tokio::test]
async fn test_article_view_render() {
    let mut app = test_app();
    app.handle_action(Action::ArticlesLoaded(Section::Latest, articles()))
        .await;
    app.handle_action(Action::Enter).await;
    assert_eq!(app.view_mode, ViewMode::Article);

    let screen = render(&mut app);
    assert!(screen.contains("Dam inaugurated upstream"));
    assert!(screen.contains("By M. Ortiz"));
    assert!(screen.contains("Flood barriers hold after the storm."));
}

#[tokio::test]
async fn test_help_overlay_and_language() {
    let mut app = test_app();
    app.handle_action(Action::ToggleLanguage).await;
    app.handle_action(Action::ToggleHelp).await;

    let screen = render(&mut app);
    assert!(screen.contains("Teclas"));
    assert!(screen.contains("Últimas"));
    assert!(screen.contains("Mostrando: Todo"));
}

//! Flat key lookup for UI strings.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::time_window::WindowId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    English,
    Spanish,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Spanish => "es",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" => Some(Self::English),
            "es" => Some(Self::Spanish),
            _ => None,
        }
    }

    pub fn toggle(&self) -> Self {
        match self {
            Self::English => Self::Spanish,
            Self::Spanish => Self::English,
        }
    }
}

type Table = HashMap<&'static str, &'static str>;

static ENGLISH: Lazy<Table> = Lazy::new(|| {
    HashMap::from([
        ("app.title", "Portal News"),
        ("section.latest", "Latest"),
        ("section.national", "National"),
        ("section.province", "Province"),
        ("section.business", "Business"),
        ("section.sports", "Sports"),
        ("section.entertainment", "Entertainment"),
        ("section.opinion", "Opinion"),
        ("window.all", "All"),
        ("window.today", "Today"),
        ("window.yesterday", "Yesterday"),
        ("window.thisWeek", "This Week"),
        ("window.last7Days", "Last 7 Days"),
        ("window.last30Days", "Last 30 Days"),
        ("window.last90Days", "Last 90 Days"),
        ("window.last180Days", "Last 180 Days"),
        ("window.lastYear", "Last Year"),
        ("filter.label", "Showing"),
        ("status.loading", "Loading articles..."),
        ("status.loading_article", "Loading article..."),
        ("status.empty", "No articles in this window"),
        ("status.failed", "Could not load articles"),
        ("status.no_url", "This article has no link"),
        ("article.by", "By"),
        ("help.title", "Keys"),
        (
            "help.hint",
            "j/k move  Enter open  Tab section  f window  F all  h/l back/forward  t theme  i language  o browser  r refresh  ? help  q quit",
        ),
    ])
});

static SPANISH: Lazy<Table> = Lazy::new(|| {
    HashMap::from([
        ("app.title", "Noticias del Portal"),
        ("section.latest", "Últimas"),
        ("section.national", "Nacional"),
        ("section.province", "Provincia"),
        ("section.business", "Economía"),
        ("section.sports", "Deportes"),
        ("section.entertainment", "Espectáculos"),
        ("section.opinion", "Opinión"),
        ("window.all", "Todo"),
        ("window.today", "Hoy"),
        ("window.yesterday", "Ayer"),
        ("window.thisWeek", "Esta semana"),
        ("window.last7Days", "Últimos 7 días"),
        ("window.last30Days", "Últimos 30 días"),
        ("window.last90Days", "Últimos 90 días"),
        ("window.last180Days", "Últimos 180 días"),
        ("window.lastYear", "Último año"),
        ("filter.label", "Mostrando"),
        ("status.loading", "Cargando artículos..."),
        ("status.loading_article", "Cargando artículo..."),
        ("status.empty", "No hay artículos en este periodo"),
        ("status.failed", "No se pudieron cargar los artículos"),
        ("article.by", "Por"),
        ("help.title", "Teclas"),
        (
            "help.hint",
            "j/k mover  Enter abrir  Tab sección  f periodo  F todo  h/l atrás/adelante  t tema  i idioma  o navegador  r recargar  ? ayuda  q salir",
        ),
    ])
});

fn table(language: Language) -> &'static Table {
    match language {
        Language::English => &ENGLISH,
        Language::Spanish => &SPANISH,
    }
}

/// Look `key` up for `language`, falling back to English and then to the key
/// itself.
pub fn t(language: Language, key: &'static str) -> &'static str {
    table(language)
        .get(key)
        .or_else(|| ENGLISH.get(key))
        .copied()
        .unwrap_or(key)
}

/// Label for a filter selector entry; `None` is the unfiltered view.
pub fn window_label(language: Language, window: Option<WindowId>) -> &'static str {
    let key = match window {
        None => "window.all",
        Some(WindowId::Today) => "window.today",
        Some(WindowId::Yesterday) => "window.yesterday",
        Some(WindowId::ThisWeek) => "window.thisWeek",
        Some(WindowId::Last7Days) => "window.last7Days",
        Some(WindowId::Last30Days) => "window.last30Days",
        Some(WindowId::Last90Days) => "window.last90Days",
        Some(WindowId::Last180Days) => "window.last180Days",
        Some(WindowId::LastYear) => "window.lastYear",
    };
    t(language, key)
}

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::api::DEFAULT_API_BASE_URL;
use crate::internal::time_window::WindowId;

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the portal REST API, e.g. "https://portal.example/api/".
    pub api_base_url: String,
    /// Window preselected on every list view. `None` shows all articles.
    pub default_window: Option<WindowId>,
    /// Pause between a back/forward traversal and restoring its scroll
    /// offset, so the destination list has time to load.
    pub settle_delay_ms: u64,
    /// How long fetched article lists stay fresh.
    pub cache_ttl_secs: u64,
    /// Rows moved by PageUp/PageDown.
    pub page_size: u32,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    /// Base level for the `EnvFilter` ("info", "debug", ...). `RUST_LOG` wins when set.
    pub level: String,
    /// Directory for the rolling log file. Defaults to "logs".
    pub log_directory: Option<String>,
    /// Per-module overrides, e.g. { "tui_news_portal::internal::navigation": "debug" }.
    pub module_levels: HashMap<String, String>,
    /// Emit render timings and cache hit/miss events.
    pub enable_performance_metrics: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_directory: None,
            module_levels: HashMap::new(),
            enable_performance_metrics: false,
        }
    }
}

impl LoggingConfig {
    /// Filter directive string built from the base level and module overrides.
    pub fn filter_directives(&self) -> String {
        let mut modules: Vec<_> = self.module_levels.iter().collect();
        modules.sort();

        let mut filter = self.level.clone();
        for (module, level) in modules {
            filter.push_str(&format!(",{}={}", module, level));
        }
        filter
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            default_window: None,
            settle_delay_ms: 100,
            cache_ttl_secs: 300,
            page_size: 10,
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Self {
        // Look for config.ron in current directory or next to executable
        let mut candidates = vec![PathBuf::from("config.ron")];

        if let Ok(exe) = std::env::current_exe()
            && let Some(dir) = exe.parent()
        {
            candidates.push(dir.join("config.ron"));
        }

        for path in candidates {
            if path.exists()
                && let Ok(content) = fs::read_to_string(&path)
            {
                match Self::parse(&content) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {}", path.display());
                        return config;
                    }
                    Err(e) => {
                        tracing::error!("Failed to parse config at {}: {}", path.display(), e);
                    }
                }
            }
        }

        tracing::info!("No config file found, using defaults");
        Self::default()
    }

    pub fn parse(content: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(content)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = AppConfig::parse("()").unwrap();
        assert_eq!(config.settle_delay(), Duration::from_millis(100));
        assert_eq!(config.cache_ttl(), Duration::from_secs(300));
        assert_eq!(config.default_window, None);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn parses_partial_config() {
        let content = r#"(
    // Backend
    api_base_url: "https://portal.example/api/",
    default_window: Some(thisWeek),
    settle_delay_ms: 150,
    logging: (
        level: "debug",
        module_levels: { "reqwest": "warn" },
    ),
)"#;
        let config = AppConfig::parse(content).unwrap();

        assert_eq!(config.api_base_url, "https://portal.example/api/");
        assert_eq!(config.default_window, Some(WindowId::ThisWeek));
        assert_eq!(config.settle_delay_ms, 150);
        assert_eq!(config.page_size, 10);
        assert_eq!(config.logging.filter_directives(), "debug,reqwest=warn");
    }

    #[test]
    fn rejects_unknown_window() {
        assert!(AppConfig::parse("(default_window: Some(fortnight))").is_err());
    }
}

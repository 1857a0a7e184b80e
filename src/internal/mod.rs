pub mod cache;
pub mod i18n;
pub mod models;
pub mod navigation;
pub mod preferences;
pub mod time_window;
pub mod ui;

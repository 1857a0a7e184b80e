use tui_news_portal::internal::i18n::{Language, window_label};
use tui_news_portal::internal::time_window::WindowFilter;

#[test]
fn test_selector_labels_in_cycle_order() {
    let mut filter = WindowFilter::default();
    let mut labels = vec![window_label(Language::English, filter.selected())];
    loop {
        filter.cycle();
        if filter.selected().is_none() {
            break;
        }
        labels.push(window_label(Language::English, filter.selected()));
    }

    insta::assert_snapshot!(labels.join("\n"), @r"
    All
    Today
    Yesterday
    This Week
    Last 7 Days
    Last 30 Days
    Last 90 Days
    Last 180 Days
    Last Year
    ");
}

use std::time::Duration;

use tokio::sync::mpsc;
use tui_news_portal::internal::navigation::{
    NavigateOptions, NavigationDispatcher, RestoreState, RoutePath, ScrollOffset,
    ScrollPositionCache, ScrollRestore, ScrollRestorer, Traversal,
};

const SETTLE: Duration = Duration::from_millis(100);

#[tokio::test(start_paused = true)]
async fn back_restores_the_offset_saved_when_leaving() {
    let cache = ScrollPositionCache::new();
    let mut dispatcher = NavigationDispatcher::new(cache.clone(), "/");
    let (tx, mut rx) = mpsc::unbounded_channel::<ScrollRestore>();
    let mut restorer = ScrollRestorer::new(cache.clone(), SETTLE, tx);

    // A -> B -> A
    dispatcher.navigate(&(40 as ScrollOffset), "/sports", NavigateOptions::default());
    dispatcher.navigate(&(7 as ScrollOffset), "/", NavigateOptions::default());
    assert_eq!(dispatcher.current_path().as_str(), "/");

    // Back to B.
    let event = dispatcher.go_back().unwrap();
    assert_eq!(event.traversal, Traversal::Back);
    assert_eq!(event.path.as_str(), "/sports");
    restorer.on_history_event(&event);
    assert_eq!(restorer.state(), RestoreState::Settling);

    let restore = rx.recv().await.unwrap();
    assert_eq!(restore.path, RoutePath::new("/sports"));
    assert_eq!(restore.offset, 7);

    // Back to A: the offset recorded at the A -> B transition.
    let event = dispatcher.go_back().unwrap();
    restorer.on_history_event(&event);
    let restore = rx.recv().await.unwrap();
    assert_eq!(restore.path, RoutePath::new("/"));
    assert_eq!(restore.offset, 40);
}

#[tokio::test(start_paused = true)]
async fn rapid_traversals_only_restore_the_last_destination() {
    let cache = ScrollPositionCache::new();
    let mut dispatcher = NavigationDispatcher::new(cache.clone(), "/");
    let (tx, mut rx) = mpsc::unbounded_channel::<ScrollRestore>();
    let mut restorer = ScrollRestorer::new(cache.clone(), SETTLE, tx);

    dispatcher.navigate(&(3 as ScrollOffset), "/business", NavigateOptions::default());
    dispatcher.navigate(&(9 as ScrollOffset), "/opinion", NavigateOptions::default());

    let first = dispatcher.go_back().unwrap();
    restorer.on_history_event(&first);
    tokio::time::sleep(SETTLE / 2).await;
    let second = dispatcher.go_back().unwrap();
    restorer.on_history_event(&second);

    let restore = rx.recv().await.unwrap();
    assert_eq!(restore.path, RoutePath::new("/"));
    assert_eq!(restore.offset, 3);

    drop(restorer);
    assert!(rx.recv().await.is_none());
}

#[tokio::test(start_paused = true)]
async fn query_and_fragment_share_one_entry() {
    let cache = ScrollPositionCache::new();
    let mut dispatcher = NavigationDispatcher::new(cache.clone(), "/national?page=2#top");

    dispatcher.navigate(&(25 as ScrollOffset), "/article/12", NavigateOptions::default());

    assert_eq!(cache.get(&RoutePath::new("/national")), 25);
    assert_eq!(cache.get(&RoutePath::new("/national/")), 25);
    assert_eq!(cache.get(&RoutePath::new("/province")), 0);
}

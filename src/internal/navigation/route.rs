use crate::api::Section;

use super::RoutePath;

/// The views the app can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Section(Section),
    Article(u64),
}

impl Route {
    pub fn path(&self) -> RoutePath {
        match self {
            Route::Section(Section::Latest) => RoutePath::new("/"),
            Route::Section(section) => RoutePath::new(format!("/{}", section.as_api_str())),
            Route::Article(id) => RoutePath::new(format!("/article/{}", id)),
        }
    }

    pub fn from_path(path: &RoutePath) -> Option<Self> {
        let trimmed = path.as_str().trim_start_matches('/');
        if trimmed.is_empty() {
            return Some(Route::Section(Section::Latest));
        }

        match trimmed.split_once('/') {
            Some(("article", id)) => id.parse().ok().map(Route::Article),
            Some(_) => None,
            None => Section::from_slug(trimmed).map(Route::Section),
        }
    }
}

impl From<Route> for RoutePath {
    fn from(route: Route) -> Self {
        route.path()
    }
}

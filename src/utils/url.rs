/// Reduce a location to its logical path: query string and fragment are
/// dropped, a leading `/` is ensured and trailing slashes are trimmed
/// (except for the root).
///
/// Example: "/sports/?page=2#top" -> "/sports"
pub fn logical_path(location: &str) -> String {
    let path = location
        .trim()
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim_end_matches('/');

    match path.starts_with('/') {
        true => path.to_string(),
        false => format!("/{}", path),
    }
}

/// Host portion of an article's source URL, without scheme, port or path.
///
/// Example: "https://news.example.org:8443/a/b?c" -> Some("news.example.org")
pub fn source_domain(url: &str) -> Option<String> {
    let url = url.trim();
    let without_scheme = match url.find("://") {
        Some(idx) => &url[idx + 3..],
        None => url,
    };

    let host = without_scheme.split(['/', '?', '#']).next()?;
    let domain = host.split(':').next()?;

    match domain.is_empty() {
        true => None,
        false => Some(domain.trim_start_matches("www.").to_string()),
    }
}

//! Search URL construction.

#[cfg(test)]
#[path = "search_test.rs"]
mod tests;

pub const DEFAULT_SEARCH_URL: &str = "https://www.google.com/search?q=";

/// Encode a typed query: words joined with `+`, everything else
/// percent-encoded.
#[must_use]
pub fn encode_query(query: &str) -> String {
    query.split(' ').map(|word| urlencoding::encode(word).into_owned()).collect::<Vec<_>>().join("+")
}

/// Search URL for a query typed by the user.
#[must_use]
pub fn search_url(base: &str, query: &str) -> String {
    format!("{base}{}", encode_query(query))
}

/// Search URL for a page that failed to load: the request URL without its
/// scheme, `www.` prefix or trailing slash.
#[must_use]
pub fn failed_page_search_url(base: &str, request_url: &str) -> String {
    let trimmed = request_url.strip_suffix('/').unwrap_or(request_url);
    let bare = trimmed.replace("http://", "").replace("https://", "").replace("www.", "");
    search_url(base, &bare)
}

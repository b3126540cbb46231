use super::*;

#[test]
fn spaces_become_plus() {
    assert_eq!(encode_query("rust remote cursor"), "rust+remote+cursor");
}

#[test]
fn reserved_characters_are_encoded() {
    assert_eq!(encode_query("a&b=c"), "a%26b%3Dc");
    assert_eq!(encode_query("1+1"), "1%2B1");
}

#[test]
fn search_url_appends_to_base() {
    assert_eq!(search_url(DEFAULT_SEARCH_URL, "tv browser"), "https://www.google.com/search?q=tv+browser");
}

#[test]
fn failed_page_strips_scheme_www_and_slash() {
    assert_eq!(
        failed_page_search_url(DEFAULT_SEARCH_URL, "https://www.example.com/"),
        "https://www.google.com/search?q=example.com"
    );
    assert_eq!(
        failed_page_search_url("https://search.example/?q=", "http://example.org/path/"),
        "https://search.example/?q=example.org%2Fpath"
    );
}

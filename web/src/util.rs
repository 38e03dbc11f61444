use crate::{API_PREFIX, APP_PREFIX};

pub(crate) fn app_url(value: &str) -> String {
    [APP_PREFIX, value.trim_start_matches('/')].join("")
}

pub(crate) fn api_url(value: &str) -> String {
    [API_PREFIX, value.trim_start_matches('/')].join("")
}

/// minijinja template filters for linking to pages and api endpoints. The
/// result is marked safe so that the slashes aren't escaped.
pub(crate) fn app_url_filter(value: &str) -> minijinja::Value {
    minijinja::Value::from_safe_string(app_url(value))
}

pub(crate) fn api_url_filter(value: &str) -> minijinja::Value {
    minijinja::Value::from_safe_string(api_url(value))
}

/// A minijinja template filter for shortening long text such as marker labels
pub(crate) fn truncate_text(mut s: String, chars: Option<usize>) -> String {
    let chars = chars.unwrap_or(100);
    match s.char_indices().nth(chars) {
        Some((idx, _)) => {
            s.truncate(idx);
            s + "..."
        }
        None => s,
    }
}

#[test]
fn test_urls() {
    assert_eq!(app_url("/overlay"), "/app/overlay");
    assert_eq!(app_url("overlay/3"), "/app/overlay/3");
    assert_eq!(api_url("/markers"), "/api/v1/markers");
}

#[test]
fn test_truncate_text() {
    assert_eq!(truncate_text("Pier".into(), None), "Pier");
    assert_eq!(truncate_text("Old fishing pier".into(), Some(3)), "Old...");
    // multi-byte characters are not split
    assert_eq!(truncate_text("Café del Mar".into(), Some(4)), "Café...");
    assert_eq!(truncate_text("abc".into(), Some(3)), "abc");
}

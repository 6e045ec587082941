//! URL canonicalization ("truncation") for display and storage.
//!
//! Video links collapse to a `watch?v=` or `playlist?list=` form on the
//! primary domain; every other URL loses its query string.

use regex::Regex;
use std::sync::OnceLock;
use url::Url;

/// Primary domain used when rebuilding video links.
pub const VIDEO_PRIMARY_HOST: &str = "www.youtube.com";

const VIDEO_DOMAIN: &str = "youtube.com";
const VIDEO_SHORT_DOMAIN: &str = "youtu.be";

fn query_suffix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\?.*|/\?.*)").expect("static regex"))
}

/// True for the video domain, any of its subdomains, or its short-link domain.
pub fn is_video_host(host: &str) -> bool {
    let host = host.trim_end_matches('.').to_ascii_lowercase();
    host == VIDEO_DOMAIN
        || host.ends_with(".youtube.com")
        || host == VIDEO_SHORT_DOMAIN
        || host.ends_with(".youtu.be")
}

/// Returns the normalized form of `url`. Pure; never fails.
///
/// - `https://www.youtube.com/watch?v=abc&t=10` → `https://www.youtube.com/watch?v=abc`
/// - `https://youtube.com/playlist?list=PL1&index=2` → `https://www.youtube.com/playlist?list=PL1`
/// - `https://example.com/page?foo=bar` → `https://example.com/page`
pub fn canonicalize(url: &str) -> String {
    if let Ok(parsed) = Url::parse(url) {
        if parsed.host_str().map(is_video_host).unwrap_or(false) {
            return canonicalize_video(&parsed).unwrap_or_else(|| url.to_string());
        }
    }
    strip_query(url)
}

fn canonicalize_video(parsed: &Url) -> Option<String> {
    if let Some(id) = first_param(parsed, "v") {
        return Some(format!(
            "https://{}/watch?v={}",
            VIDEO_PRIMARY_HOST,
            encode_value(&id)
        ));
    }
    first_param(parsed, "list").map(|list| {
        format!(
            "https://{}/playlist?list={}",
            VIDEO_PRIMARY_HOST,
            encode_value(&list)
        )
    })
}

/// First non-blank value of `key`; blank values count as absent.
fn first_param(parsed: &Url, key: &str) -> Option<String> {
    parsed
        .query_pairs()
        .find(|(k, v)| k == key && !v.is_empty())
        .map(|(_, v)| v.into_owned())
}

fn encode_value(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// Removes everything from the first `?` (or `/?`) onward.
fn strip_query(url: &str) -> String {
    query_suffix().replace(url, "").into_owned()
}

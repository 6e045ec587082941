//! Input surface: pasted free-form text terminated by an `END` line, and
//! URL extraction from that text.

use regex::Regex;
use std::io::{self, BufRead};
use std::sync::OnceLock;

/// Line that terminates interactive input.
pub const END_MARKER: &str = "END";

fn url_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"http[s]?://(?:[a-zA-Z]|[0-9]|[$-_@.&+]|[!*\(\),]|(?:%[0-9a-fA-F][0-9a-fA-F]))+")
            .expect("static regex")
    })
}

/// Reads lines until one whose trimmed content is `END` (or EOF) and joins
/// them with single spaces.
pub fn read_until_end<R: BufRead>(reader: R) -> io::Result<String> {
    let mut lines = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim() == END_MARKER {
            break;
        }
        lines.push(line);
    }
    Ok(lines.join(" "))
}

/// All `http://` / `https://` URLs in `text`, in order of appearance,
/// duplicates kept.
pub fn extract_urls(text: &str) -> Vec<String> {
    url_pattern()
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn stops_at_end_line() {
        let input = "https://bit.ly/a\nsome text https://t.co/b\n  END  \nhttps://ignored.example\n";
        let text = read_until_end(Cursor::new(input)).unwrap();
        assert_eq!(text, "https://bit.ly/a some text https://t.co/b");
    }

    #[test]
    fn eof_without_end_keeps_everything() {
        let text = read_until_end(Cursor::new("a\nb")).unwrap();
        assert_eq!(text, "a b");
    }

    #[test]
    fn end_must_be_whole_line() {
        let text = read_until_end(Cursor::new("THE END\nENDING\nEND\n")).unwrap();
        assert_eq!(text, "THE END ENDING");
    }

    #[test]
    fn extracts_urls_in_order_with_duplicates() {
        let urls = extract_urls(
            "see https://bit.ly/3xYz and http://tinyurl.com/abc?x=1 then https://bit.ly/3xYz again",
        );
        assert_eq!(
            urls,
            vec![
                "https://bit.ly/3xYz",
                "http://tinyurl.com/abc?x=1",
                "https://bit.ly/3xYz",
            ]
        );
    }

    #[test]
    fn keeps_percent_escapes_and_stops_at_whitespace() {
        let urls = extract_urls("x https://example.com/a%20b\tnext");
        assert_eq!(urls, vec!["https://example.com/a%20b"]);
    }

    #[test]
    fn ignores_other_schemes_and_bare_hosts() {
        assert!(extract_urls("ftp://example.com bit.ly/abc mailto:a@b.c").is_empty());
    }

    #[test]
    fn adjacent_urls_on_joined_lines() {
        let text = read_until_end(Cursor::new("https://a.example/1\nhttps://b.example/2\nEND\n")).unwrap();
        assert_eq!(
            extract_urls(&text),
            vec!["https://a.example/1", "https://b.example/2"]
        );
    }
}

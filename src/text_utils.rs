use chrono::{DateTime, FixedOffset, NaiveDateTime};
use lazy_static::lazy_static;
use regex::Regex;

/// Timestamps of the export are RFC 3339 (`2020-01-05T10:00:00.000-08:00`).
/// A timestamp without offset is taken as UTC.
pub fn parse_timestamp(buf: &str) -> Result<DateTime<FixedOffset>, String> {
    let buf = buf.trim();
    if let Ok(date_time) = DateTime::parse_from_rfc3339(buf) {
        return Ok(date_time);
    }

    match NaiveDateTime::parse_from_str(buf, "%Y-%m-%dT%H:%M:%S%.f") {
        Ok(naive) => Ok(naive.and_utc().fixed_offset()),
        Err(_) => Err(format!("Unable to parse date time {}", buf)),
    }
}

/// `Jan 5, 2020`
pub fn format_readable_date(date_time: &DateTime<FixedOffset>) -> String {
    date_time.format("%b %-d, %Y").to_string()
}

/// `http://example.com/2020/01/hello.html` -> `/2020/01/hello.html`
pub fn url_path(url: &str) -> String {
    lazy_static! {
        static ref SCHEME_HOST_REGEX: Regex = Regex::new(r"^.*//[^/]+").unwrap();
    }
    SCHEME_HOST_REGEX.replace(url, "").to_string()
}

/// Removes what can't be part of a file name: path separators, reserved punctuation and control characters
pub fn sanitize_file_name(name: &str) -> String {
    lazy_static! {
        static ref ILLEGAL_REGEX: Regex = Regex::new(r#"[/?<>\\:*|"]"#).unwrap();
        static ref CONTROL_REGEX: Regex = Regex::new(r"[\x00-\x1f\x7f-\x9f]").unwrap();
    }

    let name = ILLEGAL_REGEX.replace_all(name, "");
    let name = CONTROL_REGEX.replace_all(&name, "");
    truncate_at_char_boundary(&name, 255).to_string()
}

fn truncate_at_char_boundary(text: &str, max_bytes: usize) -> &str {
    if text.len() <= max_bytes {
        return text;
    }
    let mut end = max_bytes;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

/// Longest slug that still fits a 255 byte file name once `-comments.md` is appended
pub const MAX_SLUG_LEN: usize = 255 - "-comments.md".len();

/// Lowercase ascii letters and digits separated by single hyphens, at most `MAX_SLUG_LEN` bytes.
/// `Hello "World"` -> `hello-world`. It can be empty when the title has nothing usable.
pub fn file_name_from_title(title: &str) -> String {
    lazy_static! {
        static ref KNOWN_CHARS_REGEX: Regex = Regex::new(r"[.']").unwrap();
        static ref NON_ALNUM_REGEX: Regex = Regex::new(r"[^a-zA-Z0-9]+").unwrap();
    }

    let name = sanitize_file_name(title);
    let name = unidecode::unidecode(&name);
    let name = KNOWN_CHARS_REGEX.replace_all(&name, "");
    let name = NON_ALNUM_REGEX.replace_all(&name, "-").to_lowercase();

    let name = truncate_at_char_boundary(name.trim_matches('-'), MAX_SLUG_LEN);
    name.trim_end_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike};

    use super::*;

    #[test]
    fn test_parse_timestamp() {
        let date_time = parse_timestamp("2020-01-05T10:00:00Z").unwrap();
        assert_eq!((date_time.year(), date_time.month(), date_time.day()), (2020, 1, 5));
        assert_eq!(date_time.hour(), 10);

        let date_time = parse_timestamp("2021-11-30T23:10:00.000-08:00").unwrap();
        assert_eq!((date_time.year(), date_time.month(), date_time.day()), (2021, 11, 30));

        let date_time = parse_timestamp("2017-09-10T10:42:32.123").unwrap();
        assert_eq!((date_time.year(), date_time.month(), date_time.day()), (2017, 9, 10));

        assert!(parse_timestamp("yesterday").is_err());
        assert!(parse_timestamp("").is_err());
    }

    #[test]
    fn test_format_readable_date() {
        let date_time = parse_timestamp("2020-01-05T10:00:00Z").unwrap();
        assert_eq!(format_readable_date(&date_time), "Jan 5, 2020");
        let date_time = parse_timestamp("2021-12-01T09:00:00Z").unwrap();
        assert_eq!(format_readable_date(&date_time), "Dec 1, 2021");
    }

    #[test]
    fn test_url_path() {
        assert_eq!(url_path("http://example.com/2020/01/hello.html"), "/2020/01/hello.html");
        assert_eq!(url_path("https://blog.example.com:8080/p/about.html?m=1"), "/p/about.html?m=1");
        assert_eq!(url_path(""), "");
        assert_eq!(url_path("/already/relative.html"), "/already/relative.html");
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("a/b\\c:d*e?f\"g<h>i|j"), "abcdefghij");
        assert_eq!(sanitize_file_name("tab\there"), "tabhere");
        assert_eq!(sanitize_file_name(&"x".repeat(300)).len(), 255);
        assert_eq!(sanitize_file_name(&"é".repeat(200)).len(), 254);
    }

    #[test]
    fn test_file_name_from_title() {
        assert_eq!(file_name_from_title("Hello \"World\""), "hello-world");
        assert_eq!(file_name_from_title("Draft: notes on 'pre' blocks"), "draft-notes-on-pre-blocks");
        assert_eq!(file_name_from_title("Version 2.0 is out!"), "version-20-is-out");
        assert_eq!(file_name_from_title("It's -- a   test --"), "its-a-test");
        assert_eq!(file_name_from_title("Ação e reação"), "acao-e-reacao");
        assert_eq!(file_name_from_title("?!?"), "");
        assert_eq!(file_name_from_title(""), "");
    }

    #[test]
    fn test_long_title_leaves_room_for_the_comments_suffix() {
        // Transliteration makes this one longer than the title
        let title = "日本".repeat(120);
        let slug = file_name_from_title(&title);
        assert!(slug.len() <= MAX_SLUG_LEN, "{}", slug.len());
        assert!(format!("{}-comments.md", slug).len() <= 255);
        assert!(!slug.ends_with('-'));
        assert_eq!(file_name_from_title(&slug), slug);

        let slug = file_name_from_title(&"word ".repeat(100));
        assert!(slug.len() <= MAX_SLUG_LEN);
        assert!(slug.starts_with("word-word"));
        assert!(!slug.ends_with('-'));
    }

    #[test]
    fn test_file_name_from_title_is_idempotent() {
        let slug_regex = Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").unwrap();
        let titles = [
            "Hello \"World\"",
            "  leading and trailing  ",
            "--dashes--everywhere--",
            "C++ / Rust: a comparison (part 1)",
            "Über café naïve",
            "日本語のタイトル",
            "con",
            "a.b.c",
            "100% done...",
        ];

        for title in titles {
            let once = file_name_from_title(title);
            let twice = file_name_from_title(&once);
            assert_eq!(once, twice, "title={}", title);
            assert!(slug_regex.is_match(&once), "title={} slug={}", title, once);
        }
    }
}

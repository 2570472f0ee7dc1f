//! Regex scraping of the JSON blob a GIF page embeds in its HTML.
//!
//! Best effort over the current markup: each field is the first match of a fixed pattern, and
//! a field whose pattern does not match is simply absent.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::ExtractError;
use crate::record::{Record, Value};

/// Media extensions collected under `images`, in output order.
pub const MEDIA_EXTENSIONS: [&str; 3] = ["gif", "webp", "mp4"];

const SCALAR_FIELDS: [(&str, &str); 7] = [
    ("id", r#""id":"([a-zA-Z0-9]{10,})""#),
    ("username", r#""username":"([^"]+)""#),
    ("title", r#""title":"([^"]+)""#),
    ("url", r#""url":"(https://giphy\.com/gifs/[^"]+)""#),
    ("slug", r#""slug":"([^"]+)""#),
    ("rating", r#""rating":"([^"]+)""#),
    ("source", r#""source":"([^"]+)""#),
];

struct Patterns {
    scalars: Vec<(&'static str, Regex)>,
    tags: Regex,
    quoted: Regex,
    media: Vec<(&'static str, Regex)>,
}

impl Patterns {
    fn compile() -> Result<Self, regex::Error> {
        let scalars = SCALAR_FIELDS
            .iter()
            .map(|(key, pattern)| Ok((*key, Regex::new(pattern)?)))
            .collect::<Result<Vec<_>, regex::Error>>()?;
        let media = MEDIA_EXTENSIONS
            .iter()
            .map(|ext| {
                let pattern = format!(r#"https://(?:media\d*|i)\.giphy\.com/[^"]+\.{ext}"#);
                Ok((*ext, Regex::new(&pattern)?))
            })
            .collect::<Result<Vec<_>, regex::Error>>()?;
        Ok(Self {
            scalars,
            tags: Regex::new(r#""tags":\[([^\]]+)\]"#)?,
            quoted: Regex::new(r#""([^"]+)""#)?,
            media,
        })
    }
}

fn patterns() -> Result<&'static Patterns, ExtractError> {
    static PATTERNS: OnceLock<Result<Patterns, regex::Error>> = OnceLock::new();
    PATTERNS
        .get_or_init(Patterns::compile)
        .as_ref()
        .map_err(|e| ExtractError::Pattern(e.clone()))
}

/// Undo one level of JSON-in-HTML escaping: `\"` first, then `\\`.
pub fn unescape(content: &str) -> String {
    content.replace(r#"\""#, "\"").replace(r"\\", r"\")
}

/// Scrape the page record out of raw HTML.
///
/// Field order: `id`, `username`, `title`, `url`, `slug`, `rating`, `source`, `tags`, `images`.
/// `images` is always present, possibly empty.
pub fn extract_record(html: &str) -> Result<Record, ExtractError> {
    let patterns = patterns()?;
    let content = unescape(html);
    let mut record = Record::new();

    for (key, re) in &patterns.scalars {
        let Some(value) = re.captures(&content).and_then(|c| c.get(1)) else {
            continue;
        };
        let value = value.as_str();
        // Tag-manager container ids share the shape of GIF ids.
        if *key == "id" && (value.contains("GTM") || value.len() < 10) {
            continue;
        }
        record.insert(*key, Value::text(value));
    }

    if let Some(inner) = patterns.tags.captures(&content).and_then(|c| c.get(1)) {
        let tags = patterns
            .quoted
            .captures_iter(inner.as_str())
            .filter_map(|c| c.get(1))
            .map(|m| m.as_str());
        record.insert("tags", Value::texts(tags));
    }

    let mut images = Record::new();
    for (ext, re) in &patterns.media {
        let urls: BTreeSet<&str> = re.find_iter(&content).map(|m| m.as_str()).collect();
        if let Some(shortest) = urls.into_iter().min_by_key(|u| u.len()) {
            images.insert(*ext, Value::text(shortest));
        }
    }
    tracing::debug!(fields = record.len(), media = images.len(), "extracted record");
    record.insert("images", Value::Map(images));

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAGMENT: &str = r#"<html><head><script>
window.__DATA__ = {"gif":{"id":"abcdef1234","username":"alice","tags":["halloween","spooky","pumpkin"],
"images":{"original":{"url":"https://media2.giphy.com/media/abcdef1234/giphy.gif"},
"webp":"https://media.giphy.com/media/abcdef1234/giphy.webp",
"mp4":"https://i.giphy.com/abcdef1234.mp4"}}};
</script></head><body></body></html>"#;

    #[test]
    fn extracts_synthetic_fragment_exactly() {
        let record = extract_record(FRAGMENT).unwrap();

        assert_eq!(
            record.keys().collect::<Vec<_>>(),
            vec!["id", "username", "tags", "images"]
        );
        assert_eq!(record.get("id"), Some(&Value::text("abcdef1234")));
        assert_eq!(record.get("username"), Some(&Value::text("alice")));
        assert_eq!(
            record.get("tags"),
            Some(&Value::texts(["halloween", "spooky", "pumpkin"]))
        );
        assert_eq!(
            record.lookup("images.gif"),
            Some(&Value::text("https://media2.giphy.com/media/abcdef1234/giphy.gif"))
        );
        assert_eq!(
            record.lookup("images.webp"),
            Some(&Value::text("https://media.giphy.com/media/abcdef1234/giphy.webp"))
        );
        assert_eq!(
            record.lookup("images.mp4"),
            Some(&Value::text("https://i.giphy.com/abcdef1234.mp4"))
        );
    }

    #[test]
    fn unescapes_quotes_then_backslashes() {
        assert_eq!(unescape(r#"{\"a\":\"b\"}"#), r#"{"a":"b"}"#);
        assert_eq!(unescape(r"c:\\dir"), r"c:\dir");
    }

    #[test]
    fn reads_escaped_json_embedded_in_a_string() {
        let html = r#"<script>self.__next_f.push([1,"{\"id\":\"XyZ0987654\",\"title\":\"Happy Halloween GIF\",\"url\":\"https://giphy.com/gifs/halloween-XyZ0987654\",\"slug\":\"halloween-XyZ0987654\",\"rating\":\"g\",\"source\":\"https://example.org/post\"}"])</script>"#;
        let record = extract_record(html).unwrap();

        assert_eq!(record.get("id"), Some(&Value::text("XyZ0987654")));
        assert_eq!(record.get("title"), Some(&Value::text("Happy Halloween GIF")));
        assert_eq!(
            record.get("url"),
            Some(&Value::text("https://giphy.com/gifs/halloween-XyZ0987654"))
        );
        assert_eq!(record.get("slug"), Some(&Value::text("halloween-XyZ0987654")));
        assert_eq!(record.get("rating"), Some(&Value::text("g")));
        assert_eq!(record.get("source"), Some(&Value::text("https://example.org/post")));
        assert_eq!(record.get("images"), Some(&Value::Map(Record::new())));
    }

    #[test]
    fn skips_tag_manager_ids() {
        let record = extract_record(r#"{"id":"GTM1234567AB"} {"id":"realgifid99"}"#).unwrap();
        assert_eq!(record.get("id"), None);
    }

    #[test]
    fn short_ids_do_not_match() {
        let record = extract_record(r#"{"id":"abc123"}"#).unwrap();
        assert_eq!(record.get("id"), None);
    }

    #[test]
    fn url_must_point_at_a_gif_page() {
        let record = extract_record(r#"{"url":"https://example.com/other"}"#).unwrap();
        assert_eq!(record.get("url"), None);
    }

    #[test]
    fn picks_shortest_media_url_per_extension() {
        let html = r#"
            "a":"https://media3.giphy.com/media/id/200w.gif"
            "b":"https://i.giphy.com/id.gif"
            "c":"https://media.giphy.com/media/id/giphy-downsized.gif"
            "d":"https://i.giphy.com/id.gif"
        "#;
        let record = extract_record(html).unwrap();
        assert_eq!(
            record.lookup("images.gif"),
            Some(&Value::text("https://i.giphy.com/id.gif"))
        );
        assert_eq!(record.lookup("images.webp"), None);
    }

    #[test]
    fn media_ties_break_lexicographically() {
        let html = r#""x":"https://i.giphy.com/bb.mp4" "y":"https://i.giphy.com/aa.mp4""#;
        let record = extract_record(html).unwrap();
        assert_eq!(
            record.lookup("images.mp4"),
            Some(&Value::text("https://i.giphy.com/aa.mp4"))
        );
    }

    #[test]
    fn empty_page_still_has_images() {
        let record = extract_record("<html></html>").unwrap();
        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["images"]);
    }
}

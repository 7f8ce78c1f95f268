//! Embed messages

use chrono::{DateTime, SecondsFormat, Utc};
use relay_core::{Error, Result};
use serde_json::{Value, json};

/// Colour used when the caller gives none
pub const DEFAULT_COLOR: &str = "0099ff";

/// Largest colour value a webhook accepts
const MAX_COLOR: u32 = 0xFF_FF_FF;

/// A titled, coloured embed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Embed {
    pub title: String,
    pub description: String,
    pub color: u32,
}

impl Embed {
    /// Build an embed, parsing `color` as hex (default `0099ff`).
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        color: Option<&str>,
    ) -> Result<Self> {
        Ok(Self {
            title: title.into(),
            description: description.into(),
            color: parse_color(color.unwrap_or(DEFAULT_COLOR))?,
        })
    }

    /// JSON form of the embed, stamped with `sent_at`
    pub fn to_json(&self, sent_at: DateTime<Utc>) -> Value {
        json!({
            "title": self.title,
            "description": self.description,
            "color": self.color,
            "timestamp": sent_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        })
    }
}

/// Parse a hex colour such as `ff0000` or `#ff0000`.
pub fn parse_color(hex: &str) -> Result<u32> {
    let digits = hex.trim();
    let digits = digits.strip_prefix('#').unwrap_or(digits);
    Some(digits)
        .filter(|d| (1..=6).contains(&d.len()) && d.bytes().all(|b| b.is_ascii_hexdigit()))
        .and_then(|d| u32::from_str_radix(d, 16).ok())
        .filter(|c| *c <= MAX_COLOR)
        .ok_or_else(|| {
            Error::invalid_argument("color", format!("'{hex}' is not a hex colour"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    #[rstest]
    #[case("ff0000", 16_711_680)]
    #[case("0099ff", 0x0099ff)]
    #[case("#00ff00", 0x00ff00)]
    #[case("FFFFFF", 0xffffff)]
    #[case("0", 0)]
    fn test_parse_color(#[case] hex: &str, #[case] expected: u32) {
        assert_eq!(parse_color(hex).unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("red")]
    #[case("1000000")]
    #[case("-ff")]
    #[case("+ff")]
    #[case("##ff")]
    fn test_parse_color_rejects(#[case] hex: &str) {
        let err = parse_color(hex).unwrap_err();
        assert!(matches!(err, Error::InvalidArguments { field, .. } if field == "color"));
    }

    #[test]
    fn test_default_color() {
        let embed = Embed::new("t", "d", None).unwrap();
        assert_eq!(embed.color, 0x0099ff);
    }

    #[test]
    fn test_to_json() {
        let embed = Embed::new("Title", "Body", Some("ff0000")).unwrap();
        let sent_at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        let value = embed.to_json(sent_at);

        assert_eq!(value["title"], "Title");
        assert_eq!(value["description"], "Body");
        assert_eq!(value["color"], 16_711_680);
        assert_eq!(value["timestamp"], "2024-05-01T12:30:00.000Z");
    }
}

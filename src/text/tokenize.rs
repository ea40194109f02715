//! Position-aware tokenization of transcript text.
//!
//! Tokens are maximal runs of Arabic-script or digit characters; each token
//! keeps its byte offsets into the scanned text so segment boundaries can be
//! expressed as spans of that text.

use once_cell::sync::Lazy;
use regex::Regex;

/// Inline timestamp markers: `(MM:SS)` or `(HH:MM:SS)`.
static TIMESTAMP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\((?:(\d{1,2}):)?(\d{1,2}):(\d{2})\)").unwrap());

/// Maximal runs of Arabic block characters or digits.
static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\u{0600}-\u{06FF}0-9]+").unwrap());

/// A token with byte offsets into the text it was extracted from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceToken {
    pub text: String,
    /// Byte offset of the first character
    pub start: usize,
    /// Byte offset past the last character
    pub end: usize,
}

/// An inline timestamp marker converted to a duration offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeMarker {
    /// Byte offset in the cleaned text where the marker used to sit
    pub offset: usize,
    /// Marker value as seconds from session start
    pub seconds: u64,
}

/// Remove inline timestamp markers, recording each one's value in seconds
/// and its byte offset in the returned (marker-free) text.
pub fn strip_timestamps(text: &str) -> (String, Vec<TimeMarker>) {
    let mut cleaned = String::with_capacity(text.len());
    let mut markers = Vec::new();
    let mut last_end = 0;

    for caps in TIMESTAMP_RE.captures_iter(text) {
        let m = caps.get(0).unwrap();
        cleaned.push_str(&text[last_end..m.start()]);

        let hours: u64 = caps
            .get(1)
            .map(|h| h.as_str().parse().unwrap_or(0))
            .unwrap_or(0);
        let minutes: u64 = caps[2].parse().unwrap_or(0);
        let seconds: u64 = caps[3].parse().unwrap_or(0);

        markers.push(TimeMarker {
            offset: cleaned.len(),
            seconds: hours * 3600 + minutes * 60 + seconds,
        });
        last_end = m.end();
    }
    cleaned.push_str(&text[last_end..]);

    (cleaned, markers)
}

/// Extract the position-aware token stream from the cleaned text.
pub fn tokenize(text: &str) -> Vec<SourceToken> {
    TOKEN_RE
        .find_iter(text)
        .map(|m| SourceToken {
            text: m.as_str().to_string(),
            start: m.start(),
            end: m.end(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_offsets() {
        let text = "شكرا جزيلا 123.";
        let tokens = tokenize(text);

        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].text, "شكرا");
        assert_eq!(tokens[2].text, "123");
        // Offsets slice back to the token text
        for t in &tokens {
            assert_eq!(&text[t.start..t.end], t.text);
        }
    }

    #[test]
    fn test_tokenize_skips_latin() {
        let tokens = tokenize("abc شكرا def");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text, "شكرا");
    }

    #[test]
    fn test_strip_timestamps_mm_ss() {
        let (cleaned, markers) = strip_timestamps("قال (02:30) الرئيس");
        assert_eq!(cleaned, "قال  الرئيس");
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].seconds, 150);
    }

    #[test]
    fn test_strip_timestamps_hh_mm_ss() {
        let (_, markers) = strip_timestamps("(1:02:03) بداية");
        assert_eq!(markers[0].seconds, 3723);
        assert_eq!(markers[0].offset, 0);
    }

    #[test]
    fn test_marker_offset_in_cleaned_text() {
        let (cleaned, markers) = strip_timestamps("اهلا (00:10)وسهلا");
        // Marker offset points at where the marker was removed
        assert_eq!(&cleaned[markers[0].offset..], "وسهلا");
    }

    #[test]
    fn test_no_timestamps() {
        let (cleaned, markers) = strip_timestamps("نص بدون توقيت");
        assert_eq!(cleaned, "نص بدون توقيت");
        assert!(markers.is_empty());
    }
}

use serde::{Deserialize, Serialize};

/// Sentinel speaker id for the session chair.
pub const PRESIDING_OFFICER: &str = "presiding_officer";

/// Sentinel speaker id for names that did not resolve against the roster.
pub const UNKNOWN_SPEAKER: &str = "unknown";

/// Stance of a segment toward the government, derived from keyword tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stance {
    Opposing,
    Supportive,
    Neutral,
}

/// Role of the speaker, derived from marker tokens in the extracted name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeakerRole {
    Chair,
    Member,
    Secretary,
    Government,
}

/// One attributed span of a segmented transcript.
///
/// Segments are ordered by source position and non-overlapping; their
/// `start_char..end_char` spans cover the cleaned transcript apart from
/// spans dropped by the short-segment noise filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    /// Sequence id, `seg_001` style
    pub id: String,
    /// Canonical entity id, or a sentinel
    pub speaker_id: String,
    pub speaker_name: String,
    pub speaker_role: SpeakerRole,
    /// Byte offset of the span start in the cleaned transcript
    pub start_char: usize,
    /// Byte offset past the span end
    pub end_char: usize,
    /// The exact text span
    pub full_text: String,
    /// Short display excerpt of the cleaned body
    pub text_excerpt: String,
    pub summary_bullets: Vec<String>,
    pub topics: Vec<String>,
    pub stance_toward_government: Stance,
    /// Estimated (or resynchronized) start time in seconds
    pub video_timestamp: u64,
    /// Estimated speaking duration in seconds
    pub duration_secs: u64,
}

impl Segment {
    /// Number of whitespace-delimited words in the span.
    pub fn word_count(&self) -> usize {
        self.full_text.split_whitespace().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_camel_case() {
        let segment = Segment {
            id: "seg_001".to_string(),
            speaker_id: PRESIDING_OFFICER.to_string(),
            speaker_name: "رئيس المجلس".to_string(),
            speaker_role: SpeakerRole::Chair,
            start_char: 0,
            end_char: 20,
            full_text: "افتتحت الجلسه".to_string(),
            text_excerpt: "افتتحت الجلسه".to_string(),
            summary_bullets: vec![],
            topics: vec![],
            stance_toward_government: Stance::Neutral,
            video_timestamp: 0,
            duration_secs: 20,
        };

        let json = serde_json::to_value(&segment).unwrap();
        assert_eq!(json["speakerId"], PRESIDING_OFFICER);
        assert_eq!(json["speakerRole"], "chair");
        assert_eq!(json["stanceTowardGovernment"], "neutral");
        assert_eq!(json["videoTimestamp"], 0);
    }

    #[test]
    fn test_word_count() {
        let segment = Segment {
            id: "seg_001".to_string(),
            speaker_id: UNKNOWN_SPEAKER.to_string(),
            speaker_name: "زيد عمرو".to_string(),
            speaker_role: SpeakerRole::Member,
            start_char: 0,
            end_char: 0,
            full_text: "كلمه اولي كلمه ثانيه".to_string(),
            text_excerpt: String::new(),
            summary_bullets: vec![],
            topics: vec![],
            stance_toward_government: Stance::Neutral,
            video_timestamp: 0,
            duration_secs: 0,
        };

        assert_eq!(segment.word_count(), 4);
    }
}

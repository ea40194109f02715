//! Splitting a continuous transcript into per-speaker segments.
//!
//! The pass is sequential and deterministic: fold the text, strip
//! timestamp markers, scan the token stream for handover cues, partition
//! at the deduplicated transitions, then enrich and timestamp the
//! resulting spans. All offsets refer to the cleaned (folded,
//! marker-free) text.

pub mod assemble;
pub mod enrich;
pub mod scan;
pub mod timeline;

pub use assemble::{AssembleConfig, RawSegment, RawSpeaker, assemble_segments};
pub use enrich::{ChairConfig, EnrichConfig, TopicRule, enrich_segments};
pub use scan::{ScanConfig, dedup_transitions, scan_transitions};
pub use timeline::{TimelineConfig, assign_timestamps};

use tracing::info;

use crate::error::CoreError;
use crate::models::{Roster, Segment, UNKNOWN_SPEAKER};
use crate::text::{fold, strip_timestamps, tokenize};

/// Minimum non-whitespace characters for a submitted transcript.
pub const MIN_TRANSCRIPT_CHARS: usize = 50;

/// Configuration for a full segmentation pass.
#[derive(Debug, Clone, Default)]
pub struct SegmenterConfig {
    pub scan: ScanConfig,
    pub assemble: AssembleConfig,
    pub enrich: EnrichConfig,
    pub timeline: TimelineConfig,
}

/// Reject transcripts that cannot be a session before any processing.
pub fn validate_transcript(text: &str) -> Result<(), CoreError> {
    if text.is_empty() {
        return Err(CoreError::EmptyTranscript);
    }
    let chars = text.trim().chars().count();
    if chars < MIN_TRANSCRIPT_CHARS {
        return Err(CoreError::TranscriptTooShort {
            chars,
            min: MIN_TRANSCRIPT_CHARS,
        });
    }
    Ok(())
}

/// Run one segmentation pass over one transcript.
///
/// The segment list replaces any previous output for the transcript
/// wholesale. An empty roster is not an error; every extracted name simply
/// resolves to the unknown sentinel.
pub fn segment_transcript(
    raw_text: &str,
    roster: &Roster,
    config: &SegmenterConfig,
) -> Result<Vec<Segment>, CoreError> {
    validate_transcript(raw_text)?;

    let folded = fold(raw_text);
    let (text, markers) = strip_timestamps(&folded);
    let tokens = tokenize(&text);

    let raw_transitions = scan_transitions(&tokens, &config.scan);
    let transitions = dedup_transitions(raw_transitions, config.scan.min_transition_gap);
    info!(
        tokens = tokens.len(),
        transitions = transitions.len(),
        markers = markers.len(),
        "scanned transcript"
    );

    let raw_segments = assemble_segments(&text, &transitions, &markers, &config.assemble);
    let mut segments = enrich_segments(&text, &raw_segments, roster, &config.enrich);
    assign_timestamps(&mut segments, &config.timeline);

    let unknown = segments
        .iter()
        .filter(|s| s.speaker_id == UNKNOWN_SPEAKER)
        .count();
    info!(
        segments = segments.len(),
        unknown_speakers = unknown,
        "segmentation pass complete"
    );

    Ok(segments)
}

//! Partitioning the cleaned transcript into attributed spans.
//!
//! Text between transitions belongs to the speaker who held the floor when
//! it was spoken; the short window around each cue phrase is the chair
//! granting the floor. The chair sentinel owns everything before the first
//! transition, so a transcript with no cues at all degrades to a single
//! chair segment.

use crate::models::Transition;
use crate::text::TimeMarker;

/// Speaker attribution before roster resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawSpeaker {
    Chair,
    /// Raw extracted name tokens, not yet resolved
    Candidate(String),
}

/// An attributed span of the cleaned text, before enrichment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSegment {
    pub speaker: RawSpeaker,
    /// Byte offset of the span start
    pub start: usize,
    /// Byte offset past the span end
    pub end: usize,
    /// Explicit timestamp marker found inside the span, if any
    pub explicit_secs: Option<u64>,
}

/// Configuration for segment assembly.
#[derive(Debug, Clone)]
pub struct AssembleConfig {
    /// Bytes after a cue attributed to the chair. Must not exceed the
    /// scanner's `min_transition_gap` or handover windows could overlap
    /// the next transition; the assembler clamps to it regardless.
    pub handover_window: usize,
    /// Minimum trimmed character count for a span to be kept
    pub min_segment_chars: usize,
}

impl Default for AssembleConfig {
    fn default() -> Self {
        Self {
            handover_window: 50,
            min_segment_chars: 10,
        }
    }
}

/// Partition `text` at the given (deduplicated, ordered) transitions.
pub fn assemble_segments(
    text: &str,
    transitions: &[Transition],
    markers: &[TimeMarker],
    config: &AssembleConfig,
) -> Vec<RawSegment> {
    let mut segments: Vec<RawSegment> = Vec::new();
    let mut start_idx = 0usize;
    let mut speaker = RawSpeaker::Chair;

    for (i, transition) in transitions.iter().enumerate() {
        // Body since the previous boundary belongs to the current speaker
        push_if_substantial(&mut segments, text, &speaker, start_idx, transition.offset, config);

        // The handover phrase itself is chair speech
        let window_end = transition.offset + config.handover_window;
        let next_offset = transitions
            .get(i + 1)
            .map(|t| t.offset)
            .unwrap_or(text.len());
        let new_start = floor_char_boundary(text, window_end.min(next_offset).min(text.len()));

        let previous_is_chair = segments
            .last()
            .is_some_and(|s| s.speaker == RawSpeaker::Chair);
        if previous_is_chair {
            segments.last_mut().unwrap().end = new_start;
        } else {
            segments.push(RawSegment {
                speaker: RawSpeaker::Chair,
                start: transition.offset,
                end: new_start,
                explicit_secs: None,
            });
        }

        speaker = RawSpeaker::Candidate(transition.candidate_name());
        start_idx = new_start;
    }

    // Trailing span after the last transition
    push_if_substantial(&mut segments, text, &speaker, start_idx, text.len(), config);

    attach_markers(&mut segments, markers);
    segments
}

fn push_if_substantial(
    segments: &mut Vec<RawSegment>,
    text: &str,
    speaker: &RawSpeaker,
    start: usize,
    end: usize,
    config: &AssembleConfig,
) {
    if end <= start {
        return;
    }
    let body = &text[start..end];
    if body.trim().chars().count() > config.min_segment_chars {
        segments.push(RawSegment {
            speaker: speaker.clone(),
            start,
            end,
            explicit_secs: None,
        });
    }
}

/// Attach the first explicit timestamp marker falling inside each span.
fn attach_markers(segments: &mut [RawSegment], markers: &[TimeMarker]) {
    for segment in segments.iter_mut() {
        segment.explicit_secs = markers
            .iter()
            .find(|m| m.offset >= segment.start && m.offset < segment.end)
            .map(|m| m.seconds);
    }
}

/// Largest char boundary at or below `idx`.
fn floor_char_boundary(text: &str, mut idx: usize) -> usize {
    if idx >= text.len() {
        return text.len();
    }
    while !text.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

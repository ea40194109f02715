//! Sequential timestamp estimation over the segment list.
//!
//! A running clock accumulates estimated speaking time from a
//! words-per-minute constant. Explicit markers found in the source only
//! ever move the clock forward.

use crate::models::Segment;

/// Configuration for timestamp estimation.
#[derive(Debug, Clone)]
pub struct TimelineConfig {
    pub words_per_minute: f64,
    /// Duration floor for a normal segment
    pub min_duration_secs: u64,
    /// Duration assigned to very short procedural segments
    pub short_duration_secs: u64,
    /// Word count below which a segment counts as procedural
    pub short_segment_words: usize,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            words_per_minute: 130.0,
            min_duration_secs: 20,
            short_duration_secs: 10,
            short_segment_words: 10,
        }
    }
}

/// Assign estimated timestamps and durations in place.
///
/// A segment carrying an explicit timestamp ahead of the running clock
/// resynchronizes it; explicit timestamps never move the clock backward.
pub fn assign_timestamps(segments: &mut [Segment], config: &TimelineConfig) {
    let mut clock: u64 = 0;

    for segment in segments.iter_mut() {
        if segment.video_timestamp > clock {
            clock = segment.video_timestamp;
        }
        segment.video_timestamp = clock;

        let words = segment.word_count();
        let estimated = (words as f64 / config.words_per_minute * 60.0).ceil() as u64;
        let duration = if words < config.short_segment_words {
            config.short_duration_secs
        } else {
            estimated.max(config.min_duration_secs)
        };

        segment.duration_secs = duration;
        clock += duration;
    }
}

pub mod error;
pub mod io;
pub mod matcher;
pub mod models;
pub mod segmenter;
pub mod text;

pub use error::CoreError;
pub use io::{HumanReport, SessionReport, load_roster, parse_roster_json, read_transcript_file};
pub use matcher::{
    MatchResult, MatchTier, MatcherConfig, NormalizedLevenshtein, SimilarityScorer,
    build_variations, match_name,
};
pub use models::{
    CanonicalEntity, PRESIDING_OFFICER, Roster, Segment, SpeakerRole, Stance, Transition,
    UNKNOWN_SPEAKER,
};
pub use segmenter::{SegmenterConfig, segment_transcript, validate_transcript};
pub use text::{fold, normalize};

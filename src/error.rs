use thiserror::Error;

/// Contract violations surfaced to the caller.
///
/// Recoverable conditions (unmatched names, transcripts with no handover
/// cues, spans below the noise floor) never appear here; they degrade to
/// sentinels and fallbacks inside the pipeline.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("transcript text is empty")]
    EmptyTranscript,

    #[error("transcript too short to be a session ({chars} chars, minimum {min})")]
    TranscriptTooShort { chars: usize, min: usize },

    #[error("roster entity {id} has an empty display name")]
    EmptyEntityName { id: String },
}

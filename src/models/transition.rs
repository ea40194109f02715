use crate::text::SourceToken;

/// A detected speaker-handover point in a transcript.
///
/// Ephemeral: produced by the cue scan and consumed by segment assembly
/// within a single segmentation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// Byte offset of the cue keyword in the cleaned text
    pub offset: usize,
    /// The cue keyword that triggered detection
    pub cue: String,
    /// Name-candidate tokens collected around the cue
    pub name_tokens: Vec<String>,
}

impl Transition {
    pub fn new(cue_token: &SourceToken, name_tokens: Vec<String>) -> Self {
        Self {
            offset: cue_token.start,
            cue: cue_token.text.clone(),
            name_tokens,
        }
    }

    /// The extracted name candidate as a single string.
    pub fn candidate_name(&self) -> String {
        self.name_tokens.join(" ")
    }
}

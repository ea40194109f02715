//! Handover-cue detection over the token stream.
//!
//! The scanner walks the tokens looking for a cue (SCANNING), and on a hit
//! switches to name resolution: a bounded lookahead collects content tokens
//! while skipping honorifics, digits and short stop-words; if the lookahead
//! comes back empty the same filtering runs backwards over the tokens before
//! the cue. Either way the scanner returns to SCANNING with a recorded
//! transition at the cue's offset.

use crate::models::Transition;
use crate::text::SourceToken;

/// Minimum character count for a name part collected ahead of the cue.
const AHEAD_MIN_CHARS: usize = 3;
/// The backward search tolerates slightly shorter parts.
const BEHIND_MIN_CHARS: usize = 2;

/// Configuration for cue detection and name extraction.
///
/// All keyword tables are data in comparison-normalized (folded) form; the
/// scanner itself is independent of the specific phrase set.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Imperative handover cues ("go ahead" forms)
    pub cue_words: Vec<String>,
    /// "The floor", recognized only when followed by the preposition
    pub floor_word: String,
    /// Preposition that completes the floor cue ("the floor goes *to*")
    pub floor_preposition: String,
    /// Words that terminate a name search in either direction
    pub boundary_words: Vec<String>,
    /// Courtesy titles and address terms skipped during name collection
    pub title_words: Vec<String>,
    /// Short tokens that are nonetheless valid name parts
    pub short_name_words: Vec<String>,
    /// Tokens examined ahead of a cue
    pub lookahead_tokens: usize,
    /// Tokens examined behind a cue when the lookahead finds nothing
    pub lookback_tokens: usize,
    /// Content tokens collected per candidate name
    pub max_name_tokens: usize,
    /// Minimum byte gap between kept transitions; nearer ones collapse
    /// into the earliest
    pub min_transition_gap: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            cue_words: vec![
                "تفضل".to_string(),
                "تفضلي".to_string(),
                "فليتفضل".to_string(),
            ],
            floor_word: "الكلمه".to_string(),
            floor_preposition: "ل".to_string(),
            boundary_words: vec![
                "تفضل".to_string(),
                "شكرا".to_string(),
                "بسم".to_string(),
                "السلام".to_string(),
            ],
            title_words: vec![
                "سعاده".to_string(),
                "معالي".to_string(),
                "الزميل".to_string(),
                "الزميله".to_string(),
                "الاخ".to_string(),
                "الاخت".to_string(),
                "اخ".to_string(),
                "اخت".to_string(),
                "النائب".to_string(),
                "النائبه".to_string(),
                "الدكتور".to_string(),
                "الدكتوره".to_string(),
                "المهندس".to_string(),
                "المهندسه".to_string(),
                "السيد".to_string(),
                "السيده".to_string(),
                "الشيخ".to_string(),
                "يا".to_string(),
                "ال".to_string(),
            ],
            short_name_words: vec!["بن".to_string(), "بو".to_string()],
            lookahead_tokens: 15,
            lookback_tokens: 10,
            max_name_tokens: 3,
            min_transition_gap: 50,
        }
    }
}

impl ScanConfig {
    fn is_cue(&self, word: &str) -> bool {
        self.cue_words.iter().any(|c| c == word)
    }

    fn is_boundary(&self, word: &str) -> bool {
        self.boundary_words.iter().any(|b| b == word)
    }

    fn is_title(&self, word: &str) -> bool {
        self.title_words.iter().any(|t| t == word)
    }

    fn is_short_name(&self, word: &str) -> bool {
        self.short_name_words.iter().any(|s| s == word)
    }
}

/// Scan the token stream for speaker handovers.
///
/// Returns raw transitions in source order; a single handover phrase can
/// produce several nearby hits, so callers pass the result through
/// [`dedup_transitions`].
pub fn scan_transitions(tokens: &[SourceToken], config: &ScanConfig) -> Vec<Transition> {
    let mut transitions = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        let word = tokens[i].text.as_str();

        // Cue detection: an imperative form, or "the floor" + "to"
        let mut cue_end = i;
        let mut found_cue = config.is_cue(word);
        if !found_cue
            && word == config.floor_word
            && tokens
                .get(i + 1)
                .is_some_and(|t| t.text == config.floor_preposition)
        {
            found_cue = true;
            cue_end = i + 1;
        }

        if found_cue {
            if let Some((name_tokens, last_index)) = collect_ahead(tokens, cue_end, config) {
                transitions.push(Transition::new(&tokens[i], name_tokens));
                i = last_index + 1;
                continue;
            }
            if let Some(name_tokens) = collect_behind(tokens, i, config) {
                transitions.push(Transition::new(&tokens[i], name_tokens));
            }
        }

        i += 1;
    }

    transitions
}

/// Collect up to `max_name_tokens` content tokens after the cue.
///
/// Returns the tokens and the index of the last one taken, or `None` when
/// the window holds no usable name part.
fn collect_ahead(
    tokens: &[SourceToken],
    cue_end: usize,
    config: &ScanConfig,
) -> Option<(Vec<String>, usize)> {
    let mut parts = Vec::new();
    let mut last_index = cue_end;

    let window = tokens
        .iter()
        .enumerate()
        .skip(cue_end + 1)
        .take(config.lookahead_tokens);

    for (j, token) in window {
        let word = token.text.as_str();
        if config.is_boundary(word) {
            break;
        }
        if word.chars().all(|c| c.is_numeric()) {
            continue;
        }
        if config.is_title(word) {
            continue;
        }
        if word.chars().count() < AHEAD_MIN_CHARS && !config.is_short_name(word) {
            continue;
        }

        parts.push(word.to_string());
        last_index = j;
        if parts.len() >= config.max_name_tokens {
            break;
        }
    }

    if parts.is_empty() {
        None
    } else {
        Some((parts, last_index))
    }
}

/// Collect content tokens walking backwards from the cue, for suffix
/// patterns like "His Excellency Representative X, go ahead".
fn collect_behind(
    tokens: &[SourceToken],
    cue_index: usize,
    config: &ScanConfig,
) -> Option<Vec<String>> {
    let mut parts: Vec<String> = Vec::new();
    let lower = cue_index.saturating_sub(config.lookback_tokens);

    for k in (lower..cue_index).rev() {
        let word = tokens[k].text.as_str();
        if config.is_boundary(word) {
            break;
        }
        if word.chars().all(|c| c.is_numeric())
            || config.is_title(word)
            || word.chars().count() < BEHIND_MIN_CHARS
        {
            continue;
        }

        parts.insert(0, word.to_string());
        if parts.len() >= config.max_name_tokens {
            break;
        }
    }

    if parts.is_empty() { None } else { Some(parts) }
}

/// Collapse transitions closer together than `min_gap` bytes, keeping the
/// earliest of each cluster.
pub fn dedup_transitions(mut transitions: Vec<Transition>, min_gap: usize) -> Vec<Transition> {
    transitions.sort_by_key(|t| t.offset);

    let mut unique: Vec<Transition> = Vec::with_capacity(transitions.len());
    for transition in transitions {
        match unique.last() {
            Some(kept) if transition.offset - kept.offset < min_gap => continue,
            _ => unique.push(transition),
        }
    }
    unique
}

//! Per-segment enrichment: speaker resolution, filler cleanup, summary
//! selection, stance and topic tagging.
//!
//! Everything here is derived metadata over the assembled spans; failures
//! degrade to sentinels and fallbacks, never errors.

use tracing::debug;

use crate::matcher::{MatchResult, MatcherConfig, match_name};
use crate::models::{
    PRESIDING_OFFICER, Roster, Segment, SpeakerRole, Stance, UNKNOWN_SPEAKER,
};
use crate::text::fold;

use super::assemble::{RawSegment, RawSpeaker};

/// Identity force-assigned when the chair marker appears in a name.
#[derive(Debug, Clone)]
pub struct ChairConfig {
    /// Token marking a chair reference ("president/chair")
    pub marker: String,
    /// Speaker id recorded for chair segments; the sentinel unless the
    /// actual chairperson's roster id is known
    pub id: String,
    pub display_name: String,
    /// Roster id of the chairperson, when known. A roster match resolving
    /// to this id is relabeled as the chair.
    pub entity_id: Option<String>,
}

impl Default for ChairConfig {
    fn default() -> Self {
        Self {
            marker: "رئيس".to_string(),
            id: PRESIDING_OFFICER.to_string(),
            display_name: "رئيس المجلس".to_string(),
            entity_id: None,
        }
    }
}

/// A topic label attached when any of its keywords appears in the body.
#[derive(Debug, Clone)]
pub struct TopicRule {
    pub label: String,
    pub keywords: Vec<String>,
}

impl TopicRule {
    fn new(label: &str, keywords: &[&str]) -> Self {
        Self {
            label: label.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// Configuration for segment enrichment. Keyword tables are data; they are
/// folded before comparison so callers may supply them in display form.
#[derive(Debug, Clone)]
pub struct EnrichConfig {
    pub chair: ChairConfig,
    pub matcher: MatcherConfig,
    /// Leading titles stripped off an extracted name before matching
    pub name_prefixes: Vec<String>,
    /// Secretary-general marker in a speaker name
    pub secretary_marker: String,
    /// Government-bench markers in a speaker name
    pub government_markers: Vec<String>,
    /// Ceremonial openers stripped from the front of a body
    pub fillers: Vec<String>,
    /// Passes over the filler list, since openers stack
    pub filler_passes: usize,
    /// Keywords marking a sentence as summary-worthy
    pub summary_keywords: Vec<String>,
    pub opposing_keywords: Vec<String>,
    pub supportive_keywords: Vec<String>,
    pub topics: Vec<TopicRule>,
    /// Minimum characters for a sentence to be considered
    pub min_sentence_chars: usize,
    pub max_summary_bullets: usize,
    /// Sentences taken when no keyword sentence exists
    pub fallback_sentences: usize,
    /// Characters of cleaned body shown as the excerpt
    pub excerpt_chars: usize,
}

impl Default for EnrichConfig {
    fn default() -> Self {
        Self {
            chair: ChairConfig::default(),
            matcher: MatcherConfig::default(),
            name_prefixes: vec![
                "يا".to_string(),
                "اخ".to_string(),
                "زميل".to_string(),
                "الاخ".to_string(),
                "الزميل".to_string(),
                "سعاده".to_string(),
                "معالي".to_string(),
                "النائب".to_string(),
            ],
            secretary_marker: "الامين العام".to_string(),
            government_markers: vec!["رئيس الوزراء".to_string(), "وزير".to_string()],
            fillers: vec![
                "بسم الله الرحمن الرحيم".to_string(),
                "والصلاه والسلام علي".to_string(),
                "شكرا سعاده الرئيس".to_string(),
                "شكرا سيدي الرئيس".to_string(),
                "شكرا معالي الرئيس".to_string(),
                "سيدي الرئيس".to_string(),
                "سعاده الرئيس".to_string(),
                "الزملاء المحترمين".to_string(),
                "زملائي الاعزاء".to_string(),
                "صباح الخير".to_string(),
                "يعطيك العافيه".to_string(),
                "تفضل".to_string(),
                "شكرا".to_string(),
                "بدايه".to_string(),
            ],
            filler_passes: 3,
            summary_keywords: vec![
                "اطالب".to_string(),
                "نطالب".to_string(),
                "اقترح".to_string(),
                "يجب".to_string(),
                "مشكله".to_string(),
                "فساد".to_string(),
                "تجاوز".to_string(),
                "سؤال".to_string(),
                "استجواب".to_string(),
                "الموازنه".to_string(),
                "تقرير".to_string(),
                "ديوان".to_string(),
            ],
            opposing_keywords: vec![
                "فساد".to_string(),
                "خلل".to_string(),
                "تجاوز".to_string(),
                "سرقه".to_string(),
                "محاسبه".to_string(),
                "ضعف".to_string(),
                "تراجع".to_string(),
            ],
            supportive_keywords: vec![
                "شكر".to_string(),
                "تقدير".to_string(),
                "انجاز".to_string(),
                "جهود".to_string(),
                "ثمن".to_string(),
            ],
            topics: vec![
                TopicRule::new("ديوان المحاسبة", &["ديوان المحاسبه"]),
                TopicRule::new("مكافحة الفساد", &["فساد"]),
                TopicRule::new("المياه", &["مياه"]),
                TopicRule::new("الكهرباء", &["كهرباء"]),
                TopicRule::new("فلسطين", &["غزه", "فلسطين"]),
                TopicRule::new("العمل والعمال", &["عمال", "المياومه"]),
                TopicRule::new("الزراعة", &["زراعه"]),
                TopicRule::new("البلديات", &["بلديات", "البلديه"]),
            ],
            min_sentence_chars: 10,
            max_summary_bullets: 3,
            fallback_sentences: 2,
            excerpt_chars: 150,
        }
    }
}

/// Resolved speaker identity for one segment.
struct ResolvedSpeaker {
    id: String,
    name: String,
    role: SpeakerRole,
}

/// Enrich the assembled spans into full segment records.
pub fn enrich_segments(
    text: &str,
    raw_segments: &[RawSegment],
    roster: &Roster,
    config: &EnrichConfig,
) -> Vec<Segment> {
    raw_segments
        .iter()
        .enumerate()
        .map(|(i, raw)| enrich_segment(text, raw, roster, config, i + 1))
        .collect()
}

fn enrich_segment(
    text: &str,
    raw: &RawSegment,
    roster: &Roster,
    config: &EnrichConfig,
    sequence: usize,
) -> Segment {
    let body = &text[raw.start..raw.end];
    let speaker = resolve_speaker(&raw.speaker, roster, config);

    let clean_body = strip_fillers(body, config);
    let excerpt = char_prefix(&clean_body, config.excerpt_chars);
    let summary_bullets = select_summary(&clean_body, config);
    let stance = classify_stance(body, config);
    let topics = tag_topics(body, config);

    Segment {
        id: format!("seg_{sequence:03}"),
        speaker_id: speaker.id,
        speaker_name: speaker.name,
        speaker_role: speaker.role,
        start_char: raw.start,
        end_char: raw.end,
        full_text: body.to_string(),
        text_excerpt: excerpt,
        summary_bullets,
        topics,
        stance_toward_government: stance,
        video_timestamp: raw.explicit_secs.unwrap_or(0),
        duration_secs: 0,
    }
}

fn resolve_speaker(
    raw_speaker: &RawSpeaker,
    roster: &Roster,
    config: &EnrichConfig,
) -> ResolvedSpeaker {
    let candidate = match raw_speaker {
        RawSpeaker::Chair => {
            return ResolvedSpeaker {
                id: config.chair.id.clone(),
                name: config.chair.display_name.clone(),
                role: SpeakerRole::Chair,
            };
        }
        RawSpeaker::Candidate(name) => name,
    };

    let name = clean_candidate_name(candidate, config);

    // The chair is called by role, not name; short-circuit the matcher.
    // Government and secretary references are also role markers, and are
    // checked first so "prime minister" is not mistaken for the chair.
    if name.contains(&config.secretary_marker) {
        return resolve_by_roster(&name, roster, config, SpeakerRole::Secretary);
    }
    if config.government_markers.iter().any(|m| name.contains(m)) {
        return resolve_by_roster(&name, roster, config, SpeakerRole::Government);
    }
    if name.contains(&config.chair.marker) {
        return ResolvedSpeaker {
            id: config.chair.id.clone(),
            name: config.chair.display_name.clone(),
            role: SpeakerRole::Chair,
        };
    }

    resolve_by_roster(&name, roster, config, SpeakerRole::Member)
}

fn resolve_by_roster(
    name: &str,
    roster: &Roster,
    config: &EnrichConfig,
    role: SpeakerRole,
) -> ResolvedSpeaker {
    match match_name(name, roster, &config.matcher) {
        MatchResult::Matched { id, full_name, .. } => {
            // A known chairperson id outranks the derived role
            if config.chair.entity_id.as_deref() == Some(id.as_str()) {
                return ResolvedSpeaker {
                    id,
                    name: full_name,
                    role: SpeakerRole::Chair,
                };
            }
            ResolvedSpeaker {
                id,
                name: full_name,
                role,
            }
        }
        MatchResult::Unmatched => {
            debug!(name, "speaker did not resolve against the roster");
            ResolvedSpeaker {
                id: UNKNOWN_SPEAKER.to_string(),
                name: name.to_string(),
                role,
            }
        }
    }
}

/// Drop a leading title prefix and any digits from an extracted name.
fn clean_candidate_name(candidate: &str, config: &EnrichConfig) -> String {
    let without_digits: String = candidate.chars().filter(|c| !c.is_numeric()).collect();
    let mut name = without_digits.trim();

    for prefix in &config.name_prefixes {
        if let Some(rest) = name.strip_prefix(prefix.as_str()) {
            if rest.starts_with(char::is_whitespace) {
                name = rest.trim_start();
                break;
            }
        }
    }

    collapse_whitespace(name)
}

/// Strip stacked ceremonial openers from the front of a body.
fn strip_fillers(body: &str, config: &EnrichConfig) -> String {
    let mut text = collapse_whitespace(body);

    for _ in 0..config.filler_passes {
        for filler in &config.fillers {
            if let Some(rest) = text.strip_prefix(filler.as_str()) {
                text = rest.trim_start().to_string();
                // A dangling "and" connector often follows an opener
                if let Some(rest) = text.strip_prefix("و ") {
                    text = rest.trim_start().to_string();
                }
            }
        }
    }

    text
}

/// Pick up to `max_summary_bullets` sentences: keyword hits first, then the
/// opening sentences, then a plain text prefix.
fn select_summary(clean_body: &str, config: &EnrichConfig) -> Vec<String> {
    let sentences: Vec<&str> = clean_body
        .split(['.', '،'])
        .map(str::trim)
        .filter(|s| s.chars().count() > config.min_sentence_chars)
        .collect();

    let mut bullets: Vec<String> = sentences
        .iter()
        .filter(|s| {
            config
                .summary_keywords
                .iter()
                .any(|k| s.contains(fold(k).as_str()))
        })
        .map(|s| s.to_string())
        .collect();

    if bullets.is_empty() {
        bullets = sentences
            .iter()
            .take(config.fallback_sentences)
            .map(|s| s.to_string())
            .collect();
    }
    bullets.truncate(config.max_summary_bullets);

    if bullets.is_empty() && !clean_body.is_empty() {
        bullets.push(clean_body.chars().take(100).collect());
    }
    bullets
}

fn classify_stance(body: &str, config: &EnrichConfig) -> Stance {
    if config
        .opposing_keywords
        .iter()
        .any(|k| body.contains(fold(k).as_str()))
    {
        Stance::Opposing
    } else if config
        .supportive_keywords
        .iter()
        .any(|k| body.contains(fold(k).as_str()))
    {
        Stance::Supportive
    } else {
        Stance::Neutral
    }
}

fn tag_topics(body: &str, config: &EnrichConfig) -> Vec<String> {
    config
        .topics
        .iter()
        .filter(|rule| rule.keywords.iter().any(|k| body.contains(fold(k).as_str())))
        .map(|rule| rule.label.clone())
        .collect()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// First `n` characters, with an ellipsis when truncated.
fn char_prefix(text: &str, n: usize) -> String {
    if text.chars().count() > n {
        let prefix: String = text.chars().take(n).collect();
        format!("{prefix}...")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CanonicalEntity;

    fn roster() -> Roster {
        Roster::new(vec![
            CanonicalEntity::new("p1", "أحمد علي"),
            CanonicalEntity::new("p2", "سالم الخصاونة"),
        ])
    }

    fn raw(speaker: RawSpeaker, start: usize, end: usize) -> RawSegment {
        RawSegment {
            speaker,
            start,
            end,
            explicit_secs: None,
        }
    }

    #[test]
    fn test_chair_sentinel() {
        let text = "افتتحت الجلسه باذن الله";
        let segments = enrich_segments(
            text,
            &[raw(RawSpeaker::Chair, 0, text.len())],
            &roster(),
            &EnrichConfig::default(),
        );

        assert_eq!(segments[0].speaker_id, PRESIDING_OFFICER);
        assert_eq!(segments[0].speaker_name, "رئيس المجلس");
        assert_eq!(segments[0].speaker_role, SpeakerRole::Chair);
    }

    #[test]
    fn test_candidate_resolves_to_canonical_entity() {
        let text = "اتحدث اليوم عن واقع الخدمات";
        let segments = enrich_segments(
            text,
            &[raw(
                RawSpeaker::Candidate("احمد علي".to_string()),
                0,
                text.len(),
            )],
            &roster(),
            &EnrichConfig::default(),
        );

        assert_eq!(segments[0].speaker_id, "p1");
        // Display name is the canonical one, not the raw extraction
        assert_eq!(segments[0].speaker_name, "أحمد علي");
        assert_eq!(segments[0].speaker_role, SpeakerRole::Member);
    }

    #[test]
    fn test_unresolved_candidate_keeps_raw_name() {
        let text = "اتحدث اليوم عن واقع الخدمات";
        let segments = enrich_segments(
            text,
            &[raw(
                RawSpeaker::Candidate("زيد عمرو".to_string()),
                0,
                text.len(),
            )],
            &roster(),
            &EnrichConfig::default(),
        );

        assert_eq!(segments[0].speaker_id, UNKNOWN_SPEAKER);
        assert_eq!(segments[0].speaker_name, "زيد عمرو");
    }

    #[test]
    fn test_chair_marker_forces_chair_identity() {
        let text = "ناخذ استراحه قصيره ثم نعود";
        let segments = enrich_segments(
            text,
            &[raw(
                RawSpeaker::Candidate("الرئيس".to_string()),
                0,
                text.len(),
            )],
            &roster(),
            &EnrichConfig::default(),
        );

        assert_eq!(segments[0].speaker_id, PRESIDING_OFFICER);
        assert_eq!(segments[0].speaker_role, SpeakerRole::Chair);
    }

    #[test]
    fn test_government_marker_not_mistaken_for_chair() {
        let text = "اود توضيح موقف الحكومه من القانون";
        let segments = enrich_segments(
            text,
            &[raw(
                RawSpeaker::Candidate("رئيس الوزراء".to_string()),
                0,
                text.len(),
            )],
            &roster(),
            &EnrichConfig::default(),
        );

        assert_eq!(segments[0].speaker_role, SpeakerRole::Government);
        assert_eq!(segments[0].speaker_id, UNKNOWN_SPEAKER);
    }

    #[test]
    fn test_name_prefix_stripped_before_matching() {
        let text = "اتحدث اليوم عن واقع الخدمات";
        let segments = enrich_segments(
            text,
            &[raw(
                RawSpeaker::Candidate("النائب احمد علي".to_string()),
                0,
                text.len(),
            )],
            &roster(),
            &EnrichConfig::default(),
        );

        assert_eq!(segments[0].speaker_id, "p1");
    }

    #[test]
    fn test_fillers_stripped_stacked() {
        let config = EnrichConfig::default();
        let cleaned = strip_fillers(
            "شكرا سعاده الرئيس بسم الله الرحمن الرحيم اتحدث عن المياه",
            &config,
        );
        assert_eq!(cleaned, "اتحدث عن المياه");
    }

    #[test]
    fn test_summary_prefers_keyword_sentences() {
        let config = EnrichConfig::default();
        let body = "حضرت اليوم للحديث معكم في هذا الموضوع. اطالب بتحويل الملف الي القضاء فورا. وكان النقاش طويلا في اللجان المختصه";
        let bullets = select_summary(body, &config);

        assert_eq!(bullets.len(), 1);
        assert!(bullets[0].contains("اطالب"));
    }

    #[test]
    fn test_summary_falls_back_to_opening_sentences() {
        let config = EnrichConfig::default();
        let body = "حضرت اليوم للحديث معكم في هذا الموضوع. وكان النقاش طويلا في اللجان المختصه. ونشكر الجميع علي الحضور والمتابعه";
        let bullets = select_summary(body, &config);

        assert_eq!(bullets.len(), 2);
        assert!(bullets[0].starts_with("حضرت"));
    }

    #[test]
    fn test_summary_prefix_fallback_for_unbroken_text() {
        let config = EnrichConfig::default();
        let bullets = select_summary("كلام", &config);
        assert_eq!(bullets, vec!["كلام".to_string()]);
    }

    #[test]
    fn test_stance_keywords() {
        let config = EnrichConfig::default();
        assert_eq!(
            classify_stance("هذا فساد واضح في الاداره", &config),
            Stance::Opposing
        );
        assert_eq!(
            classify_stance("نثمن الجهود المبذوله في هذا الملف", &config),
            Stance::Supportive
        );
        assert_eq!(
            classify_stance("ناقشنا جدول الاعمال", &config),
            Stance::Neutral
        );
    }

    #[test]
    fn test_topic_tagging() {
        let config = EnrichConfig::default();
        let topics = tag_topics("انقطاع المياه والكهرباء في المحافظات", &config);
        assert_eq!(topics, vec!["المياه".to_string(), "الكهرباء".to_string()]);
    }

    #[test]
    fn test_excerpt_truncation() {
        let long_body: String = "كلمه ".repeat(60);
        let excerpt = char_prefix(collapse_whitespace(&long_body).as_str(), 150);
        assert!(excerpt.ends_with("..."));
        assert_eq!(excerpt.chars().count(), 153);
    }
}

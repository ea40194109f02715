//! Arabic text normalization.
//!
//! Two strengths are provided. [`normalize`] is the comparison strength used
//! for name matching: letter folding plus punctuation removal and whitespace
//! collapsing. [`fold`] applies the letter folding only, so the result stays
//! sliceable for offset-based scanning where punctuation removal would
//! desynchronize positions.

/// Arabic combining diacritics (harakat) range.
fn is_diacritic(c: char) -> bool {
    ('\u{064B}'..='\u{065F}').contains(&c)
}

/// Fold orthographic letter variants to a single canonical form.
fn fold_char(c: char) -> char {
    match c {
        // Alef with hamza above/below, Alef with madda
        '\u{0623}' | '\u{0625}' | '\u{0622}' => '\u{0627}',
        // Teh Marbuta -> Heh
        '\u{0629}' => '\u{0647}',
        // Alef Maqsura -> Yeh
        '\u{0649}' => '\u{064A}',
        _ => c,
    }
}

/// Display-safe normalization: strip harakat and fold letter variants.
///
/// Keeps punctuation and spacing intact. Idempotent.
pub fn fold(text: &str) -> String {
    text.chars()
        .filter(|c| !is_diacritic(*c))
        .map(fold_char)
        .collect()
}

/// Comparison normalization: [`fold`], then drop punctuation and collapse
/// whitespace runs to single spaces.
///
/// Idempotent; empty input yields an empty string.
pub fn normalize(text: &str) -> String {
    let folded = fold(text);
    let stripped: String = folded
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_alef_variants() {
        assert_eq!(normalize("أحمد"), normalize("إحمد"));
        assert_eq!(normalize("أحمد"), normalize("آحمد"));
        assert_eq!(normalize("أحمد"), "احمد");
    }

    #[test]
    fn test_fold_teh_marbuta_and_alef_maqsura() {
        assert_eq!(normalize("الكلمة"), "الكلمه");
        assert_eq!(normalize("مصطفى"), "مصطفي");
    }

    #[test]
    fn test_strips_diacritics() {
        assert_eq!(normalize("مُحَمَّد"), normalize("محمد"));
    }

    #[test]
    fn test_punctuation_and_whitespace() {
        assert_eq!(normalize("أحمد،  علي."), "احمد علي");
        assert_eq!(normalize("  أحمد \n علي  "), "احمد علي");
    }

    #[test]
    fn test_idempotent() {
        let inputs = ["أحمد عَلي الجرّاح.", "الكلمة للنائبة منى", "", "a-b c"];
        for s in inputs {
            assert_eq!(normalize(&normalize(s)), normalize(s));
            assert_eq!(fold(&fold(s)), fold(s));
        }
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(fold(""), "");
    }

    #[test]
    fn test_fold_keeps_punctuation() {
        assert_eq!(fold("أحمد، علي."), "احمد، علي.");
    }
}

use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::warn;

use crate::models::{CanonicalEntity, Roster};
use crate::segmenter::validate_transcript;

/// Parse a roster from a JSON array of entities.
///
/// Extra fields on each record (bloc, committee, photo, contact data) are
/// ignored; the core only needs the identity pair. Entities with an empty
/// display name are rejected, and duplicate normalized names are logged
/// since matching against them is first-found-wins.
pub fn parse_roster_json(json: &str) -> Result<Roster> {
    let entities: Vec<CanonicalEntity> =
        serde_json::from_str(json).context("Failed to parse roster JSON")?;

    for entity in &entities {
        if entity.full_name.trim().is_empty() {
            bail!(crate::CoreError::EmptyEntityName {
                id: entity.id.clone(),
            });
        }
    }

    let roster = Roster::new(entities);
    for name in roster.duplicate_names() {
        warn!(name, "duplicate normalized name in roster; first entity wins");
    }

    Ok(roster)
}

/// Load a roster file.
pub fn load_roster(path: &Path) -> Result<Roster> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read roster file: {:?}", path))?;
    parse_roster_json(&content)
}

/// Read a transcript file and validate it before any processing.
pub fn read_transcript_file(path: &Path) -> Result<String> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read transcript file: {:?}", path))?;
    validate_transcript(&text).with_context(|| format!("Invalid transcript: {:?}", path))?;
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_roster_json() {
        let json = r#"[
            {"id": "mp_001", "fullName": "أحمد علي", "bloc": "كتلة العمل"},
            {"id": "mp_002", "fullName": "سالم الخصاونة"}
        ]"#;

        let roster = parse_roster_json(json).unwrap();

        assert_eq!(roster.len(), 2);
        assert_eq!(roster.get("mp_001").unwrap().full_name, "أحمد علي");
    }

    #[test]
    fn test_empty_name_rejected() {
        let json = r#"[{"id": "mp_001", "fullName": "  "}]"#;
        assert!(parse_roster_json(json).is_err());
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(parse_roster_json("not json").is_err());
    }

    #[test]
    fn test_read_transcript_file_validates() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "قصير").unwrap();

        let result = read_transcript_file(file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_read_transcript_file_roundtrip() {
        let text = "افتتح الرئيس الجلسه بالترحيب بالحضور الكرام وتلاوه جدول الاعمال كاملا علي مسامع النواب";
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{text}").unwrap();

        assert_eq!(read_transcript_file(file.path()).unwrap(), text);
    }
}

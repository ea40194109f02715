use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::models::Segment;

/// JSON report for one processed session, destined for the external store.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionReport {
    pub generated_at: String,
    pub segment_count: usize,
    /// Distinct speaker ids, sentinels included
    pub speaker_count: usize,
    pub segments: Vec<Segment>,
}

impl SessionReport {
    pub fn from_segments(segments: Vec<Segment>) -> Self {
        let mut speaker_ids: Vec<&str> = segments.iter().map(|s| s.speaker_id.as_str()).collect();
        speaker_ids.sort();
        speaker_ids.dedup();

        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            segment_count: segments.len(),
            speaker_count: speaker_ids.len(),
            segments,
        }
    }

    /// Write to a JSON file.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        serde_json::to_writer_pretty(file, self).context("Failed to write JSON")?;
        Ok(())
    }
}

/// Human-readable rendering of a segment list.
pub struct HumanReport<'a> {
    segments: &'a [Segment],
}

impl<'a> HumanReport<'a> {
    pub fn new(segments: &'a [Segment]) -> Self {
        Self { segments }
    }

    /// Format the segments as readable text with timestamps and speakers.
    pub fn format(&self) -> String {
        let mut output = String::new();

        for segment in self.segments {
            output.push_str(&format!(
                "[{}] {}:\n",
                format_timestamp(segment.video_timestamp),
                segment.speaker_name
            ));
            output.push_str(&segment.text_excerpt);
            output.push_str("\n\n");
        }

        output
    }

    /// Write the formatted text to a file.
    pub fn write_file(&self, path: &Path) -> Result<()> {
        let mut file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        file.write_all(self.format().as_bytes())
            .context("Failed to write human-readable report")?;
        Ok(())
    }
}

/// Format seconds as MM:SS, or H:MM:SS past the first hour.
fn format_timestamp(secs: u64) -> String {
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PRESIDING_OFFICER, SpeakerRole, Stance};

    fn segment(id: &str, speaker_id: &str, secs: u64) -> Segment {
        Segment {
            id: id.to_string(),
            speaker_id: speaker_id.to_string(),
            speaker_name: "رئيس المجلس".to_string(),
            speaker_role: SpeakerRole::Chair,
            start_char: 0,
            end_char: 10,
            full_text: "افتتحت الجلسه".to_string(),
            text_excerpt: "افتتحت الجلسه".to_string(),
            summary_bullets: vec![],
            topics: vec![],
            stance_toward_government: Stance::Neutral,
            video_timestamp: secs,
            duration_secs: 20,
        }
    }

    #[test]
    fn test_session_report_counts() {
        let report = SessionReport::from_segments(vec![
            segment("seg_001", PRESIDING_OFFICER, 0),
            segment("seg_002", "mp_001", 20),
            segment("seg_003", PRESIDING_OFFICER, 40),
        ]);

        assert_eq!(report.segment_count, 3);
        assert_eq!(report.speaker_count, 2);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["segmentCount"], 3);
        assert!(json["generatedAt"].is_string());
    }

    #[test]
    fn test_human_report_format() {
        let segments = vec![segment("seg_001", PRESIDING_OFFICER, 65)];
        let text = HumanReport::new(&segments).format();

        assert!(text.contains("[01:05] رئيس المجلس:"));
        assert!(text.contains("افتتحت الجلسه"));
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0), "00:00");
        assert_eq!(format_timestamp(150), "02:30");
        assert_eq!(format_timestamp(3723), "1:02:03");
    }

    #[test]
    fn test_write_json() {
        let report = SessionReport::from_segments(vec![segment("seg_001", "mp_001", 0)]);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        report.write_json(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("seg_001"));
    }
}

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::crisis::CrisisAssessment;
use crate::models::AnalysisResult;

/// Machine-readable check-in report
///
/// The crisis assessment sits beside the analysis; neither influences the
/// other.
#[derive(Debug, Clone, Serialize)]
pub struct CheckInReport {
    pub analysis: AnalysisResult,
    pub crisis: CrisisAssessment,
    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    /// RFC 3339 timestamp
    pub generated_at: String,
    pub transcription_confidence: f64,
    pub duration_seconds: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_tag: Option<String>,
}

impl ReportMetadata {
    pub fn new(
        generated_at: DateTime<Utc>,
        transcription_confidence: f64,
        duration_seconds: f64,
        language_tag: Option<String>,
    ) -> Self {
        Self {
            generated_at: generated_at.to_rfc3339(),
            transcription_confidence,
            duration_seconds,
            language_tag,
        }
    }
}

impl CheckInReport {
    pub fn new(analysis: AnalysisResult, crisis: CrisisAssessment, metadata: ReportMetadata) -> Self {
        Self {
            analysis,
            crisis,
            metadata,
        }
    }

    /// Write to a JSON file
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        serde_json::to_writer_pretty(file, self).context("Failed to write JSON")?;
        Ok(())
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize report")
    }
}

/// Human-readable check-in summary
pub struct HumanSummary<'a> {
    report: &'a CheckInReport,
}

impl<'a> HumanSummary<'a> {
    pub fn new(report: &'a CheckInReport) -> Self {
        Self { report }
    }

    /// Format the report as plain text
    pub fn format(&self) -> String {
        let analysis = &self.report.analysis;
        let details = &analysis.details;
        let mut output = String::new();

        if self.report.crisis.flagged {
            output.push_str(&format!(
                "!! Crisis language detected: {}\n\n",
                self.report.crisis.hits.join(", ")
            ));
        }

        output.push_str(&format!("Mood     {}\n", score_bar(analysis.mood_score)));
        output.push_str(&format!("Energy   {}\n", score_bar(analysis.energy_level)));
        output.push_str(&format!("Anxiety  {}\n", score_bar(analysis.anxiety_level)));
        output.push('\n');

        output.push_str(&format!("Emotion:     {}\n", analysis.dominant_emotion));
        output.push_str(&format!("Triggers:    {}\n", list_or_none(&analysis.triggers)));
        output.push_str(&format!("Activities:  {}\n", list_or_none(&analysis.activities)));
        output.push_str(&format!("Keywords:    {}\n", list_or_none(&details.keywords)));
        output.push_str(&format!("Confidence:  {:.2}\n", analysis.confidence));

        if !details.explicit_axes.is_empty() {
            let axes: Vec<String> = details.explicit_axes.iter().map(|a| a.to_string()).collect();
            output.push_str(&format!("Self-reported: {}\n", axes.join(", ")));
        }
        if details.contradiction {
            output.push_str(&format!("Mixed statement: {}\n", details.segments.join(" | ")));
        }

        output.push('\n');
        output.push_str(&wrap_text(&analysis.notes, 80));
        output.push('\n');

        output
    }

    /// Write to a text file
    pub fn write_file(&self, path: &Path) -> Result<()> {
        let mut file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        write!(file, "{}", self.format())?;
        Ok(())
    }
}

/// Ten-cell bar followed by the score, e.g. `#######... 7/10`
fn score_bar(score: u8) -> String {
    let filled = usize::from(score.min(10));
    format!("{}{} {:>2}/10", "#".repeat(filled), ".".repeat(10 - filled), score)
}

fn list_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}

/// Wrap text at approximately the given width
fn wrap_text(text: &str, width: usize) -> String {
    let mut result = String::new();
    let mut line_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if line_len + word_len + 1 > width && line_len > 0 {
            result.push('\n');
            line_len = 0;
        }
        if line_len > 0 {
            result.push(' ');
            line_len += 1;
        }
        result.push_str(word);
        line_len += word_len;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(crisis: CrisisAssessment) -> CheckInReport {
        let mut analysis = AnalysisResult::neutral(8, 7, 3, 0.81, "Bugün çok mutluyum".to_string());
        analysis.dominant_emotion = "happy".to_string();
        analysis.triggers = vec!["work".to_string()];
        let metadata = ReportMetadata::new(Utc::now(), 0.9, 2.0, Some("tr-TR".to_string()));
        CheckInReport::new(analysis, crisis, metadata)
    }

    #[test]
    fn test_score_bar() {
        assert_eq!(score_bar(7), "#######...  7/10");
        assert_eq!(score_bar(10), "########## 10/10");
        assert_eq!(score_bar(1), "#.........  1/10");
    }

    #[test]
    fn test_wrap_text() {
        let text = "Bugün sabah erkenden kalktım, yürüyüşe çıktım ve kendimi oldukça iyi hissettim";
        let wrapped = wrap_text(text, 20);
        for line in wrapped.lines() {
            assert!(line.chars().count() <= 25);
        }
    }

    #[test]
    fn test_summary_format() {
        let report = report(CrisisAssessment::default());
        let text = HumanSummary::new(&report).format();

        assert!(text.starts_with("Mood     ########.."));
        assert!(text.contains("Emotion:     happy"));
        assert!(text.contains("Triggers:    work"));
        assert!(text.contains("Activities:  none"));
        assert!(!text.contains("Crisis"));
    }

    #[test]
    fn test_summary_leads_with_crisis() {
        let crisis = CrisisAssessment {
            flagged: true,
            hits: vec!["ölmek istiyorum".to_string()],
        };
        let text = HumanSummary::new(&report(crisis)).format();
        assert!(text.starts_with("!! Crisis language detected: ölmek istiyorum"));
    }

    #[test]
    fn test_write_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        report(CrisisAssessment::default()).write_json(&path).unwrap();

        let value: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["analysis"]["mood_score"], 8);
        assert_eq!(value["crisis"]["flagged"], false);
        assert_eq!(value["metadata"]["language_tag"], "tr-TR");
        assert_eq!(value["analysis"]["details"]["sentiment_bucket"], "neutral");
    }
}

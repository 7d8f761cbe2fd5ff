//! Analysis engine report types
//!
//! Mirrors the JSON shapes produced by the external analysis engine's
//! `/analyze` and `/add-document` endpoints. The gateway relays these
//! verbatim; no field is reinterpreted on the way through.

use serde::{Deserialize, Serialize};

/// Structured result of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Share of the submitted document matched against the corpus (0-100)
    pub plagiarism_percentage: f64,
    /// Share of the submitted document with no corpus match (0-100)
    pub unique_percentage: f64,
    /// The submitted text as the engine saw it
    pub original_text: String,
    /// Per-match details, in engine order. Multiple entries may share the
    /// same `user_sentence` when one sentence matched several sources.
    #[serde(default)]
    pub details: Vec<MatchDetail>,
    /// Advisory note from the engine (e.g. "corpus empty")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// One sentence-level match against a corpus document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchDetail {
    /// Sentence from the submitted document
    pub user_sentence: String,
    /// Sentence it matched in the corpus
    pub matched_sentence: String,
    /// Corpus document identifier
    pub source: String,
    /// Similarity score, 0-100
    pub similarity: f64,
}

/// Engine acknowledgement for a corpus addition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusAddResult {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_parsing() {
        let json_str = r#"{
            "plagiarism_percentage": 30.0,
            "unique_percentage": 70.0,
            "original_text": "Cats are mammals. Dogs bark.",
            "details": [
                {
                    "user_sentence": "Cats are mammals.",
                    "matched_sentence": "Cats are mammals.",
                    "source": "doc1.txt",
                    "similarity": 95.0
                }
            ]
        }"#;

        let report: AnalysisReport = serde_json::from_str(json_str).unwrap();
        assert_eq!(report.plagiarism_percentage, 30.0);
        assert_eq!(report.unique_percentage, 70.0);
        assert_eq!(report.details.len(), 1);
        assert_eq!(report.details[0].source, "doc1.txt");
        assert_eq!(report.message, None);
    }

    #[test]
    fn test_report_missing_details_defaults_empty() {
        let json_str = r#"{
            "plagiarism_percentage": 0.0,
            "unique_percentage": 100.0,
            "original_text": "Fresh text."
        }"#;

        let report: AnalysisReport = serde_json::from_str(json_str).unwrap();
        assert!(report.details.is_empty());
    }

    #[test]
    fn test_report_advisory_message() {
        let json_str = r#"{
            "plagiarism_percentage": 0.0,
            "unique_percentage": 100.0,
            "original_text": "Anything.",
            "details": [],
            "message": "Reference corpus is empty."
        }"#;

        let report: AnalysisReport = serde_json::from_str(json_str).unwrap();
        assert_eq!(report.message.as_deref(), Some("Reference corpus is empty."));
    }

    #[test]
    fn test_report_roundtrip_omits_absent_message() {
        let report = AnalysisReport {
            plagiarism_percentage: 12.5,
            unique_percentage: 87.5,
            original_text: "Some text.".to_string(),
            details: vec![],
            message: None,
        };

        let json = serde_json::to_string(&report).unwrap();
        assert!(!json.contains("message"));

        let parsed: AnalysisReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report);
    }

    #[test]
    fn test_corpus_add_result_parsing() {
        let result: CorpusAddResult =
            serde_json::from_str(r#"{"message": "Document added to corpus."}"#).unwrap();
        assert_eq!(result.message, "Document added to corpus.");
    }
}

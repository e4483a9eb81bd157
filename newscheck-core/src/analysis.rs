//! AI analysis results: summaries, misinformation flags and claim verdicts

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::NewsCheckError;

/// Summary produced for an article
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleSummary {
    pub summary: String,
}

/// Misinformation classification for an article
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FakeNewsAssessment {
    pub is_fake_news: bool,
    /// Confidence in the classification, 0.0 - 1.0
    pub confidence_score: f64,
    pub reason: String,
}

impl FakeNewsAssessment {
    /// Reject scores outside [0, 1]; models occasionally answer in percent.
    pub fn validated(self) -> Result<Self, NewsCheckError> {
        if !(0.0..=1.0).contains(&self.confidence_score) || self.confidence_score.is_nan() {
            return Err(NewsCheckError::parse(format!(
                "confidence_score out of range: {}",
                self.confidence_score
            )));
        }
        Ok(self)
    }
}

/// Verdict on a free-text claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    LikelyTrue,
    LikelyFalse,
    Uncertain,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::LikelyTrue => "LikelyTrue",
            Verdict::LikelyFalse => "LikelyFalse",
            Verdict::Uncertain => "Uncertain",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Verdict {
    type Err = NewsCheckError;

    /// Accepts `LikelyTrue`, `likely true`, `LIKELY_TRUE` and friends.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "likelytrue" => Ok(Verdict::LikelyTrue),
            "likelyfalse" => Ok(Verdict::LikelyFalse),
            "uncertain" => Ok(Verdict::Uncertain),
            _ => Err(NewsCheckError::parse(format!("Unknown verdict: {}", s))),
        }
    }
}

/// Structured result of verifying a claim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimVerification {
    pub verdict: Verdict,
    pub explanation: String,
    /// URLs or short evidence summaries, in the order the model gave them
    pub supporting_evidence: Vec<String>,
}

/// Terminal state of one analysis round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisOutcome {
    Success,
    PartialSuccess,
    Failed,
}

/// Lifecycle of an analysis request: `Idle -> Loading -> {Success | PartialSuccess | Failed}`.
///
/// A round ends in one of the terminal states; there is no retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisState {
    #[default]
    Idle,
    Loading,
    Success,
    PartialSuccess,
    Failed,
}

impl From<AnalysisOutcome> for AnalysisState {
    fn from(outcome: AnalysisOutcome) -> Self {
        match outcome {
            AnalysisOutcome::Success => AnalysisState::Success,
            AnalysisOutcome::PartialSuccess => AnalysisState::PartialSuccess,
            AnalysisOutcome::Failed => AnalysisState::Failed,
        }
    }
}

/// Combined summary + misinformation analysis of one article.
///
/// Either half may be missing independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleAnalysis {
    pub url: String,
    pub summary: Option<ArticleSummary>,
    pub fake_news: Option<FakeNewsAssessment>,
    /// Set only when both halves failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ArticleAnalysis {
    pub fn outcome(&self) -> AnalysisOutcome {
        match (&self.summary, &self.fake_news) {
            (Some(_), Some(_)) => AnalysisOutcome::Success,
            (None, None) => AnalysisOutcome::Failed,
            _ => AnalysisOutcome::PartialSuccess,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_parsing_is_lenient() {
        assert_eq!("LikelyTrue".parse::<Verdict>().unwrap(), Verdict::LikelyTrue);
        assert_eq!("likely false".parse::<Verdict>().unwrap(), Verdict::LikelyFalse);
        assert_eq!("UNCERTAIN".parse::<Verdict>().unwrap(), Verdict::Uncertain);
        assert!("maybe".parse::<Verdict>().is_err());
    }

    #[test]
    fn test_confidence_range_validation() {
        let ok = FakeNewsAssessment {
            is_fake_news: true,
            confidence_score: 0.8,
            reason: "r".into(),
        };
        assert!(ok.validated().is_ok());

        let bad = FakeNewsAssessment {
            is_fake_news: true,
            confidence_score: 80.0,
            reason: "r".into(),
        };
        assert!(bad.validated().is_err());
    }

    #[test]
    fn test_outcome_from_halves() {
        let mut analysis = ArticleAnalysis {
            url: "https://example.com".into(),
            summary: Some(ArticleSummary { summary: "s".into() }),
            fake_news: None,
            error: None,
        };
        assert_eq!(analysis.outcome(), AnalysisOutcome::PartialSuccess);

        analysis.summary = None;
        assert_eq!(analysis.outcome(), AnalysisOutcome::Failed);
    }

    #[test]
    fn test_state_serializes_terminal_outcome() {
        let state = AnalysisState::from(AnalysisOutcome::PartialSuccess);
        assert_eq!(serde_json::to_value(state).unwrap(), "partial_success");
        assert_eq!(AnalysisState::default(), AnalysisState::Idle);
    }
}

//! Hugging Face inference client: BART summaries and a fake/real text classifier

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use newscheck_core::{ArticleSummary, FakeNewsAssessment};
use newscheck_sources::{bounded, SourceError, AI_MODEL_TIMEOUT};

use crate::traits::{ArticleSummarizer, FakeNewsDetector};

pub const HF_INFERENCE_BASE_URL: &str = "https://api-inference.huggingface.co/models";
pub const SUMMARIZATION_MODEL: &str = "facebook/bart-large-cnn";
pub const FAKE_NEWS_MODEL: &str = "mrm8488/bert-tiny-finetuned-fake-news-detection";

const SUMMARY_MAX_LENGTH: u32 = 150;
const SUMMARY_MIN_LENGTH: u32 = 30;

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parameters: Option<SummaryParameters>,
}

#[derive(Debug, Serialize)]
struct SummaryParameters {
    max_length: u32,
    min_length: u32,
    do_sample: bool,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SummaryResponse {
    Many(Vec<SummaryText>),
    One(SummaryText),
}

#[derive(Debug, Deserialize)]
struct SummaryText {
    summary_text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f64,
}

/// Text classification answers `[[{label, score}, ...]]`, sometimes unnested
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ClassificationResponse {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
}

pub struct HuggingFaceClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    timeout: Duration,
}

impl HuggingFaceClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            base_url: HF_INFERENCE_BASE_URL.to_string(),
            timeout: AI_MODEL_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    #[instrument(skip(self, text))]
    pub async fn request_summary(&self, text: &str) -> Result<ArticleSummary, SourceError> {
        let body = InferenceRequest {
            inputs: text,
            parameters: Some(SummaryParameters {
                max_length: SUMMARY_MAX_LENGTH,
                min_length: SUMMARY_MIN_LENGTH,
                do_sample: false,
            }),
        };
        let raw = self.infer(SUMMARIZATION_MODEL, &body).await?;

        let parsed: SummaryResponse =
            serde_json::from_str(&raw).map_err(|e| SourceError::ParseError(e.to_string()))?;
        let summary = match parsed {
            SummaryResponse::Many(list) => list.into_iter().next().map(|s| s.summary_text),
            SummaryResponse::One(one) => Some(one.summary_text),
        }
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| SourceError::ParseError("no summary_text".to_string()))?;

        Ok(ArticleSummary { summary })
    }

    #[instrument(skip(self, text))]
    pub async fn request_assessment(&self, text: &str) -> Result<FakeNewsAssessment, SourceError> {
        let body = InferenceRequest {
            inputs: text,
            parameters: None,
        };
        let raw = self.infer(FAKE_NEWS_MODEL, &body).await?;

        let parsed: ClassificationResponse =
            serde_json::from_str(&raw).map_err(|e| SourceError::ParseError(e.to_string()))?;
        let labels = match parsed {
            ClassificationResponse::Nested(outer) => outer.into_iter().next().unwrap_or_default(),
            ClassificationResponse::Flat(labels) => labels,
        };

        assess_labels(&labels)
            .ok_or_else(|| SourceError::ParseError("no fake/real label in response".to_string()))
    }

    async fn infer<B: Serialize>(&self, model: &str, body: &B) -> Result<String, SourceError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(SourceError::MissingCredential("HUGGINGFACE_API_KEY"))?;

        let response = self
            .client
            .post(format!("{}/{}", self.base_url, model))
            .bearer_auth(api_key)
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let message = response.text().await.unwrap_or_default();
            return Err(SourceError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let raw = response.text().await?;
        debug!(model, bytes = raw.len(), "Inference response");
        Ok(raw)
    }
}

/// Turn classifier labels into an assessment.
///
/// With both a fake-like and a real-like label the higher score wins; with
/// only one of them its score is compared against 0.5.
pub fn assess_labels(labels: &[LabelScore]) -> Option<FakeNewsAssessment> {
    let is_fake_label = |l: &&LabelScore| {
        let name = l.label.to_lowercase();
        name.contains("fake") || name.contains("false")
    };
    let is_real_label = |l: &&LabelScore| {
        let name = l.label.to_lowercase();
        name.contains("real") || name.contains("true")
    };

    let fake = labels.iter().find(is_fake_label);
    let real = labels.iter().find(is_real_label);

    let (label, score, is_fake) = match (fake, real) {
        (Some(f), Some(r)) if f.score > r.score => (f, f.score, true),
        (Some(_), Some(r)) => (r, r.score, false),
        (Some(f), None) => (f, f.score, f.score > 0.5),
        (None, Some(r)) => (r, r.score, r.score < 0.5),
        (None, None) => return None,
    };

    Some(FakeNewsAssessment {
        is_fake_news: is_fake,
        confidence_score: score.clamp(0.0, 1.0),
        reason: format!(
            "Classifier {} labelled the text '{}' with score {:.2}",
            FAKE_NEWS_MODEL, label.label, score
        ),
    })
}

#[async_trait]
impl ArticleSummarizer for HuggingFaceClient {
    async fn summarize(&self, _url: &str, content: &str) -> Option<ArticleSummary> {
        if content.trim().is_empty() {
            return None;
        }
        bounded("huggingface:summary", self.timeout, self.request_summary(content)).await
    }
}

#[async_trait]
impl FakeNewsDetector for HuggingFaceClient {
    async fn detect(&self, _url: &str, content: &str) -> Option<FakeNewsAssessment> {
        if content.trim().is_empty() {
            return None;
        }
        bounded(
            "huggingface:detection",
            self.timeout,
            self.request_assessment(content),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{routing::post, Router};
    use newscheck_sources::test_support::serve;

    fn label(name: &str, score: f64) -> LabelScore {
        LabelScore {
            label: name.to_string(),
            score,
        }
    }

    #[test]
    fn test_higher_score_wins() {
        let assessment = assess_labels(&[label("FAKE", 0.8), label("REAL", 0.2)]).unwrap();
        assert!(assessment.is_fake_news);
        assert_eq!(assessment.confidence_score, 0.8);

        let assessment = assess_labels(&[label("LABEL_FALSE", 0.3), label("LABEL_TRUE", 0.7)]).unwrap();
        assert!(!assessment.is_fake_news);
        assert_eq!(assessment.confidence_score, 0.7);
    }

    #[test]
    fn test_single_label_threshold() {
        assert!(assess_labels(&[label("fake", 0.6)]).unwrap().is_fake_news);
        assert!(assess_labels(&[label("real", 0.4)]).unwrap().is_fake_news);
        assert!(assess_labels(&[label("LABEL_0", 0.9)]).is_none());
    }

    #[tokio::test]
    async fn test_summary_and_detection_against_local_server() {
        let app = Router::new()
            .route(
                "/facebook/bart-large-cnn",
                post(|| async { r#"[{"summary_text": "Short version."}]"# }),
            )
            .route(
                "/mrm8488/bert-tiny-finetuned-fake-news-detection",
                post(|| async { r#"[[{"label": "FAKE", "score": 0.1}, {"label": "REAL", "score": 0.9}]]"# }),
            );
        let client = HuggingFaceClient::new(Some("hf".into())).with_base_url(serve(app).await);

        let summary = client.summarize("https://x", "Long article body").await.unwrap();
        assert_eq!(summary.summary, "Short version.");

        let assessment = client.detect("https://x", "Long article body").await.unwrap();
        assert!(!assessment.is_fake_news);
    }

    #[tokio::test]
    async fn test_model_loading_is_sentinel() {
        let app = Router::new().route(
            "/facebook/bart-large-cnn",
            post(|| async {
                (
                    axum::http::StatusCode::SERVICE_UNAVAILABLE,
                    r#"{"error": "Model is currently loading"}"#,
                )
            }),
        );
        let client = HuggingFaceClient::new(Some("hf".into())).with_base_url(serve(app).await);
        assert!(client.summarize("https://x", "text").await.is_none());
        assert!(HuggingFaceClient::new(None).summarize("https://x", "text").await.is_none());
    }
}

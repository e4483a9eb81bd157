use std::time::Duration;

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};

use newscheck_core::{
    ArticleSummary, ClaimVerification, FakeNewsAssessment, NewsCheckError, NewsCheckResult,
    Verdict,
};
use newscheck_sources::{bounded, AI_MODEL_TIMEOUT};

use crate::traits::{ArticleSummarizer, ClaimVerifier, FakeNewsDetector};

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Chat-model client for summaries, misinformation detection and claim verification
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: Client<OpenAIConfig>,
    model: String,
    language: String,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct SummaryReply {
    summary: String,
}

#[derive(Debug, Deserialize)]
struct DetectionReply {
    is_fake_news: bool,
    confidence_score: f64,
    reason: String,
}

#[derive(Debug, Deserialize)]
struct VerificationReply {
    verdict: String,
    explanation: String,
    #[serde(default)]
    supporting_evidence: Vec<String>,
}

impl Default for OpenAiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl OpenAiClient {
    pub fn new() -> Self {
        // async-openai reads OPENAI_API_KEY from env automatically
        Self::with_config(OpenAIConfig::default())
    }

    pub fn with_config(config: OpenAIConfig) -> Self {
        Self {
            client: Client::with_config(config),
            model: DEFAULT_MODEL.to_string(),
            language: "Arabic".to_string(),
            timeout: AI_MODEL_TIMEOUT,
        }
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    /// Language the model writes summaries, reasons and explanations in
    pub fn with_language(mut self, language: &str) -> Self {
        self.language = language.to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[instrument(skip(self, content))]
    pub async fn request_summary(&self, url: &str, content: &str) -> NewsCheckResult<ArticleSummary> {
        let system_prompt = format!(
            r#"You are a professional news summarizer. Summarize the news article concisely in {}.

Respond with valid JSON in this exact format:
{{"summary": "..."}}"#,
            self.language
        );
        let user_prompt = format!("Article URL: {}\n\nArticle content:\n{}", url, content);

        let reply: SummaryReply = self.complete_json(&system_prompt, &user_prompt).await?;
        if reply.summary.trim().is_empty() {
            return Err(NewsCheckError::parse("Empty summary"));
        }
        Ok(ArticleSummary {
            summary: reply.summary.trim().to_string(),
        })
    }

    #[instrument(skip(self, content))]
    pub async fn request_assessment(
        &self,
        url: &str,
        content: &str,
    ) -> NewsCheckResult<FakeNewsAssessment> {
        let system_prompt = format!(
            r#"You are an expert in detecting fake news and misinformation. Analyze the news article and decide whether it is likely to contain misinformation or fake news.

Give a confidence score between 0 and 1 and explain your reasoning in {}.

Respond with valid JSON in this exact format:
{{"is_fake_news": true|false, "confidence_score": 0.0-1.0, "reason": "..."}}"#,
            self.language
        );
        let user_prompt = format!("Article URL: {}\nArticle content: {}", url, content);

        let reply: DetectionReply = self.complete_json(&system_prompt, &user_prompt).await?;
        FakeNewsAssessment {
            is_fake_news: reply.is_fake_news,
            confidence_score: reply.confidence_score,
            reason: reply.reason,
        }
        .validated()
    }

    #[instrument(skip(self))]
    pub async fn request_verification(&self, claim: &str) -> NewsCheckResult<ClaimVerification> {
        let system_prompt = format!(
            r#"You are a research assistant who verifies claims.

1. Recall what is reliably known about the claim.
2. Weigh the credibility of the sources you know of.
3. Decide whether the claim is "LikelyTrue", "LikelyFalse" or "Uncertain".
4. Give a brief, logical explanation of the verdict in {}.
5. List the key supporting evidence or sources (links where possible, otherwise short summaries).

Respond with valid JSON in this exact format:
{{"verdict": "LikelyTrue|LikelyFalse|Uncertain", "explanation": "...", "supporting_evidence": ["..."]}}"#,
            self.language
        );
        let user_prompt = format!("Claim: \"{}\"", claim);

        let reply: VerificationReply = self.complete_json(&system_prompt, &user_prompt).await?;
        Ok(ClaimVerification {
            verdict: reply.verdict.parse::<Verdict>()?,
            explanation: reply.explanation,
            supporting_evidence: reply.supporting_evidence,
        })
    }

    /// One chat round whose reply must carry a JSON object of type `T`
    async fn complete_json<T>(&self, system_prompt: &str, user_prompt: &str) -> NewsCheckResult<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages([
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(system_prompt)
                    .build()
                    .map_err(|e| NewsCheckError::internal(e.to_string()))?
                    .into(),
                ChatCompletionRequestUserMessageArgs::default()
                    .content(user_prompt)
                    .build()
                    .map_err(|e| NewsCheckError::internal(e.to_string()))?
                    .into(),
            ])
            .temperature(0.2)
            .build()
            .map_err(|e| NewsCheckError::internal(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| NewsCheckError::api(format!("OpenAI API error: {}", e)))?;

        let content = response
            .choices
            .first()
            .and_then(|c| c.message.content.as_ref())
            .ok_or_else(|| NewsCheckError::parse("No response from OpenAI"))?;

        debug!(chars = content.len(), "Model replied");

        let json_str = extract_json(content)?;
        serde_json::from_str(&json_str)
            .map_err(|e| NewsCheckError::parse(format!("Failed to parse model reply: {}", e)))
    }
}

/// Pull the JSON object out of a reply, tolerating markdown fences and chatter
fn extract_json(content: &str) -> NewsCheckResult<String> {
    if let Some(start) = content.find("```json") {
        let start = start + 7;
        if let Some(end) = content[start..].find("```") {
            return Ok(content[start..start + end].trim().to_string());
        }
    }

    if let Some(start) = content.find('{') {
        if let Some(end) = content.rfind('}') {
            if end > start {
                return Ok(content[start..=end].to_string());
            }
        }
    }

    Err(NewsCheckError::parse("No JSON found in response"))
}

#[async_trait]
impl ArticleSummarizer for OpenAiClient {
    async fn summarize(&self, url: &str, content: &str) -> Option<ArticleSummary> {
        bounded("openai:summary", self.timeout, self.request_summary(url, content)).await
    }
}

#[async_trait]
impl FakeNewsDetector for OpenAiClient {
    async fn detect(&self, url: &str, content: &str) -> Option<FakeNewsAssessment> {
        bounded(
            "openai:detection",
            self.timeout,
            self.request_assessment(url, content),
        )
        .await
    }
}

#[async_trait]
impl ClaimVerifier for OpenAiClient {
    async fn verify(&self, claim: &str) -> Option<ClaimVerification> {
        bounded("openai:verification", self.timeout, self.request_verification(claim)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{routing::post, Json, Router};
    use newscheck_sources::test_support::serve;
    use serde_json::json;

    /// Local stand-in for the chat completions endpoint answering with `reply`
    async fn client_replying(reply: &'static str) -> OpenAiClient {
        let app = Router::new().route(
            "/chat/completions",
            post(move || async move {
                Json(json!({
                    "id": "chatcmpl-test",
                    "object": "chat.completion",
                    "created": 1_700_000_000u32,
                    "model": "gpt-4o-mini",
                    "choices": [{
                        "index": 0,
                        "message": {"role": "assistant", "content": reply},
                        "finish_reason": "stop"
                    }]
                }))
            }),
        );
        let config = OpenAIConfig::new()
            .with_api_base(serve(app).await)
            .with_api_key("test-key");
        OpenAiClient::with_config(config).with_timeout(Duration::from_secs(5))
    }

    #[test]
    fn test_extract_json() {
        assert_eq!(
            extract_json("```json\n{\"summary\": \"x\"}\n```").unwrap(),
            "{\"summary\": \"x\"}"
        );
        assert_eq!(
            extract_json("Sure! {\"a\": {\"b\": 1}} hope this helps").unwrap(),
            "{\"a\": {\"b\": 1}}"
        );
        assert!(extract_json("no json here").is_err());
        assert!(extract_json("} backwards {").is_err());
    }

    #[test]
    fn test_verification_reply_tolerates_missing_evidence() {
        let reply: VerificationReply =
            serde_json::from_str(r#"{"verdict": "Uncertain", "explanation": "unclear"}"#).unwrap();
        assert!(reply.supporting_evidence.is_empty());
    }

    #[tokio::test]
    async fn test_verify_parses_spaced_verdict() {
        let client = client_replying(
            r#"{"verdict": "likely false", "explanation": "No evidence", "supporting_evidence": ["https://example.com/evidence"]}"#,
        )
        .await;
        let verification = client.verify("The earth is flat").await.unwrap();
        assert_eq!(verification.verdict, Verdict::LikelyFalse);
        assert_eq!(verification.supporting_evidence, vec!["https://example.com/evidence"]);
    }

    #[tokio::test]
    async fn test_unknown_verdict_is_none() {
        let client = client_replying(r#"{"verdict": "Maybe", "explanation": "?"}"#).await;
        assert!(client.verify("The moon is made of cheese").await.is_none());
    }

    #[tokio::test]
    async fn test_detection_rejects_out_of_range_confidence() {
        let client = client_replying(
            r#"```json
{"is_fake_news": true, "confidence_score": 87, "reason": "percent instead of fraction"}
```"#,
        )
        .await;
        assert!(client.detect("https://example.com/a", "text").await.is_none());
    }

    #[tokio::test]
    async fn test_summary_round() {
        let client = client_replying(r#"{"summary": "  A short summary.  "}"#).await;
        let summary = client.summarize("https://example.com/a", "body").await.unwrap();
        assert_eq!(summary.summary, "A short summary.");
    }
}

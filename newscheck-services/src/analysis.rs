//! AI analysis orchestration for articles and claims

use std::sync::Arc;

use tracing::{info, instrument, warn};

use newscheck_ai::{ArticleSummarizer, ClaimVerifier, FakeNewsDetector};
use newscheck_core::{
    ArticleAnalysis, ClaimContext, ClaimVerification, NewsCheckError, NewsCheckResult,
};
use newscheck_sources::fact_check::CLAIM_LOOKUP_RESULTS;
use newscheck_sources::{ArticleContentSource, ClaimScorer, FactCheckSource};

/// Error attached to an analysis when neither half produced a result
pub const BOTH_ANALYSES_FAILED: &str = "Both article analyses failed";

/// Stand-in article text used when the page itself cannot be fetched
pub fn placeholder_content(url: &str) -> String {
    format!("Content for {}", url)
}

/// Runs the AI calls behind article analysis and claim verification
pub struct AnalysisService {
    content: Arc<dyn ArticleContentSource>,
    summarizer: Arc<dyn ArticleSummarizer>,
    detector: Arc<dyn FakeNewsDetector>,
    verifier: Arc<dyn ClaimVerifier>,
    scorer: Arc<dyn ClaimScorer>,
    fact_checks: Arc<dyn FactCheckSource>,
}

impl AnalysisService {
    pub fn new(
        content: Arc<dyn ArticleContentSource>,
        summarizer: Arc<dyn ArticleSummarizer>,
        detector: Arc<dyn FakeNewsDetector>,
        verifier: Arc<dyn ClaimVerifier>,
        scorer: Arc<dyn ClaimScorer>,
        fact_checks: Arc<dyn FactCheckSource>,
    ) -> Self {
        Self {
            content,
            summarizer,
            detector,
            verifier,
            scorer,
            fact_checks,
        }
    }

    /// Summarize and classify one article concurrently.
    ///
    /// Never fails: each half is independent and `error` is set only when both are missing.
    #[instrument(skip(self))]
    pub async fn analyze_article(&self, url: &str) -> ArticleAnalysis {
        let content = match self.content.fetch_text(url).await {
            Some(text) => text,
            None => {
                warn!(url, "Article text unavailable, analysing placeholder");
                placeholder_content(url)
            }
        };

        let (summary, fake_news) = tokio::join!(
            self.summarizer.summarize(url, &content),
            self.detector.detect(url, &content)
        );

        if summary.is_none() {
            warn!(url, "Summary unavailable");
        }
        if fake_news.is_none() {
            warn!(url, "Misinformation check unavailable");
        }

        let error = (summary.is_none() && fake_news.is_none())
            .then(|| BOTH_ANALYSES_FAILED.to_string());

        let analysis = ArticleAnalysis {
            url: url.to_string(),
            summary,
            fake_news,
            error,
        };
        info!(url, outcome = ?analysis.outcome(), "Article analysed");
        analysis
    }

    /// Verify a claim with the chat model. There is no fallback verdict.
    #[instrument(skip(self))]
    pub async fn verify_claim(&self, claim: &str) -> NewsCheckResult<ClaimVerification> {
        let verification = self.verifier.verify(claim).await.ok_or_else(|| {
            NewsCheckError::verification_failed("The model did not return a usable verification")
        })?;
        info!(verdict = %verification.verdict, "Claim verified");
        Ok(verification)
    }

    /// Claim-worthiness score and published fact checks for a claim
    #[instrument(skip(self))]
    pub async fn claim_context(&self, claim: &str, language: &str) -> ClaimContext {
        let (worthiness, fact_checks) = tokio::join!(
            self.scorer.score(claim),
            self.fact_checks
                .search_fact_checks(claim, language, CLAIM_LOOKUP_RESULTS)
        );
        ClaimContext {
            worthiness,
            fact_checks,
        }
    }
}

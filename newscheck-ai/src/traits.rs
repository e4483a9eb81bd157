//! Model seams used by the analysis service
//!
//! Each call carries its own time budget and reports failure as `None`.

use async_trait::async_trait;

use newscheck_core::{ArticleSummary, ClaimVerification, FakeNewsAssessment};

#[async_trait]
pub trait ArticleSummarizer: Send + Sync {
    async fn summarize(&self, url: &str, content: &str) -> Option<ArticleSummary>;
}

#[async_trait]
pub trait FakeNewsDetector: Send + Sync {
    async fn detect(&self, url: &str, content: &str) -> Option<FakeNewsAssessment>;
}

#[async_trait]
pub trait ClaimVerifier: Send + Sync {
    async fn verify(&self, claim: &str) -> Option<ClaimVerification>;
}

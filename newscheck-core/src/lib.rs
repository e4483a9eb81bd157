//! Core types for the newscheck service
//!
//! This crate defines the shared data structures used across the workspace:
//! normalized articles and categories, aggregation results, AI analysis
//! results, fact-check records and boundary validation.

pub mod aggregation;
pub mod analysis;
pub mod error;
pub mod fact_check;
pub mod news;
pub mod validation;

pub use aggregation::{sort_and_truncate, AggregationResult, CategorizedNews, Timestamped};
pub use analysis::{
    AnalysisOutcome, AnalysisState, ArticleAnalysis, ArticleSummary, ClaimVerification,
    FakeNewsAssessment, Verdict,
};
pub use error::{NewsCheckError, NewsCheckResult};
pub use fact_check::{
    ClaimContext, ClaimWorthiness, FactCheckClaim, FactCheckPublisher, FactCheckReview,
    CLAIM_WORTHY_THRESHOLD,
};
pub use news::{Article, Category, NO_DESCRIPTION, NO_TITLE};
pub use validation::{is_public_host, validate_article_url, validate_claim_text, MIN_CLAIM_LENGTH};

//! AI model clients for article analysis and claim verification
//!
//! This crate provides:
//! - [`OpenAiClient`]: chat-model summaries, misinformation detection and claim verdicts
//! - [`HuggingFaceClient`]: hosted BART summaries and a fake/real text classifier
//!
//! Both implement the seams in [`traits`] and return `None` when the model is
//! unavailable, slow or answers with something that does not parse.

pub mod huggingface;
pub mod openai;
pub mod provider;
pub mod traits;

pub use huggingface::{assess_labels, HuggingFaceClient, LabelScore};
pub use openai::{OpenAiClient, DEFAULT_MODEL};
pub use provider::AiProvider;
pub use traits::{ArticleSummarizer, ClaimVerifier, FakeNewsDetector};

use std::fmt;
use std::str::FromStr;

use newscheck_core::NewsCheckError;

/// Backend used for summaries and misinformation detection.
///
/// Claim verification always goes to the chat model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AiProvider {
    #[default]
    OpenAi,
    HuggingFace,
}

impl FromStr for AiProvider {
    type Err = NewsCheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(AiProvider::OpenAi),
            "huggingface" | "hf" => Ok(AiProvider::HuggingFace),
            other => Err(NewsCheckError::config(format!(
                "AI_PROVIDER must be 'openai' or 'huggingface', got '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for AiProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AiProvider::OpenAi => write!(f, "openai"),
            AiProvider::HuggingFace => write!(f, "huggingface"),
        }
    }
}

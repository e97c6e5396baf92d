use serde::{Deserialize, Serialize};
use std::fmt;

/// Quality/cost tier of the generative model behind a request.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ModelTier {
    Fast,
    Deep,
}

impl ModelTier {
    pub fn for_request(deep_analysis: bool) -> Self {
        if deep_analysis {
            ModelTier::Deep
        } else {
            ModelTier::Fast
        }
    }
}

impl fmt::Display for ModelTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fast => write!(f, "fast"),
            Self::Deep => write!(f, "deep"),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TierSettings {
    pub model: String,
    pub temperature: f32,
}

/// Everything the Gemini client needs for one call.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LLMConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: String,
    pub temperature: f32,
    pub response_mime_type: Option<String>,
}

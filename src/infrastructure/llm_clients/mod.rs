pub mod gemini;

use crate::domain::error::Result;
use crate::domain::llm_config::LLMConfig;
use async_trait::async_trait;

pub use gemini::GeminiClient;

#[async_trait]
pub trait LLMClient {
    /// Sends a single user prompt and returns the model's raw text.
    async fn generate(&self, config: &LLMConfig, prompt: &str) -> Result<String>;
}

#[cfg(test)]
pub(crate) mod fake {
    use super::LLMClient;
    use crate::domain::error::{AppError, Result};
    use crate::domain::llm_config::LLMConfig;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Debug, Clone)]
    pub(crate) struct RecordedCall {
        pub(crate) config: LLMConfig,
        pub(crate) prompt: String,
    }

    enum Reply {
        Text(String),
        Upstream(u16, String),
    }

    /// Test double that records every call and answers with a canned reply.
    pub(crate) struct FakeLLMClient {
        reply: Reply,
        calls: Mutex<Vec<RecordedCall>>,
    }

    impl FakeLLMClient {
        pub(crate) fn replying(text: impl Into<String>) -> Self {
            Self {
                reply: Reply::Text(text.into()),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn failing(status: u16, body: impl Into<String>) -> Self {
            Self {
                reply: Reply::Upstream(status, body.into()),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn calls(&self) -> Vec<RecordedCall> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl LLMClient for FakeLLMClient {
        async fn generate(&self, config: &LLMConfig, prompt: &str) -> Result<String> {
            self.calls.lock().unwrap().push(RecordedCall {
                config: config.clone(),
                prompt: prompt.to_string(),
            });
            match &self.reply {
                Reply::Text(text) => Ok(text.clone()),
                Reply::Upstream(status, body) => Err(AppError::UpstreamError {
                    status: Some(*status),
                    body: body.clone(),
                }),
            }
        }
    }
}

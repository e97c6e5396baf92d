//! Process-wide configuration.
//! Built once at start-up by the config service and shared by reference.

use crate::domain::llm_config::{ModelTier, TierSettings};
use serde::{Deserialize, Serialize};

pub const DEFAULT_COMPANY_NAME: &str = "Valify Solutions";
pub const DEFAULT_QA_STANDARDS: [&str; 3] = ["ISO/IEC/IEEE 29119", "IEEE 829", "OWASP ASVS"];
pub const DEFAULT_SERVICES: [&str; 5] = [
    "Validator Portal",
    "KYC Verification",
    "AML Screening",
    "Risk Scoring",
    "Identity Validation API",
];
pub const DEFAULT_GUIDANCE: &str = "Use Valify terminology, prioritize fintech compliance and fraud-prevention risks, and keep outputs concise and engineering-actionable.";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub model: ModelSettings,
    pub company: CompanyContext,
    pub uploads: UploadLimits,
    pub generation: GenerationSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,

    /// Upper bound for JSON request bodies (generation requests carry file text)
    pub max_json_bytes: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3001,
            max_json_bytes: 16 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSettings {
    /// Absent key is reported per request, not at start-up
    pub api_key: Option<String>,
    pub base_url: String,
    pub fast: TierSettings,
    pub deep: TierSettings,
}

impl ModelSettings {
    pub fn tier(&self, tier: ModelTier) -> &TierSettings {
        match tier {
            ModelTier::Fast => &self.fast,
            ModelTier::Deep => &self.deep,
        }
    }
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://generativelanguage.googleapis.com/v1beta/models".to_string(),
            fast: TierSettings {
                model: "gemini-2.5-flash".to_string(),
                temperature: 0.3,
            },
            deep: TierSettings {
                model: "gemini-2.5-pro".to_string(),
                temperature: 0.4,
            },
        }
    }
}

/// Organisation details injected into every prompt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompanyContext {
    pub name: String,
    pub qa_standards: Vec<String>,
    pub services: Vec<String>,
    pub guidance: String,
}

impl Default for CompanyContext {
    fn default() -> Self {
        Self {
            name: DEFAULT_COMPANY_NAME.to_string(),
            qa_standards: DEFAULT_QA_STANDARDS.iter().map(|s| s.to_string()).collect(),
            services: DEFAULT_SERVICES.iter().map(|s| s.to_string()).collect(),
            guidance: DEFAULT_GUIDANCE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct UploadLimits {
    pub max_files: usize,
    pub max_file_size_mb: u64,
}

impl UploadLimits {
    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_mb * 1024 * 1024
    }
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self {
            max_files: 50,
            max_file_size_mb: 25,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GenerationSettings {
    /// Reject test-case generations that leave declared AC ids unmapped
    pub strict_coverage: bool,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            strict_coverage: true,
        }
    }
}

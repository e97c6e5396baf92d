use crate::domain::app_config::{
    AppConfig, CompanyContext, GenerationSettings, ModelSettings, ServerSettings, UploadLimits,
};
use crate::domain::error::{AppError, Result};
use figment::providers::{Env, Format, Toml};
use figment::Figment;
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "qa-scribe.toml";

const ENV_KEYS: [&str; 14] = [
    "gemini_api_key",
    "gemini_base_url",
    "gemini_fast_model",
    "gemini_deep_model",
    "company_name",
    "company_qa_standards",
    "company_services",
    "company_prompt_guidance",
    "max_upload_files",
    "max_upload_file_size_mb",
    "qa_scribe_host",
    "qa_scribe_port",
    "qa_scribe_max_json_bytes",
    "qa_scribe_strict_coverage",
];

/// Flat view of the recognised keys, as they appear in the environment or
/// the optional TOML file.
#[derive(Debug, Default, Deserialize)]
struct RawSettings {
    gemini_api_key: Option<String>,
    gemini_base_url: Option<String>,
    gemini_fast_model: Option<String>,
    gemini_deep_model: Option<String>,
    company_name: Option<String>,
    company_qa_standards: Option<String>,
    company_services: Option<String>,
    company_prompt_guidance: Option<String>,
    max_upload_files: Option<usize>,
    max_upload_file_size_mb: Option<u64>,
    qa_scribe_host: Option<String>,
    qa_scribe_port: Option<u16>,
    qa_scribe_max_json_bytes: Option<usize>,
    qa_scribe_strict_coverage: Option<bool>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn split_list(value: Option<String>) -> Vec<String> {
    value
        .as_deref()
        .unwrap_or("")
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

impl RawSettings {
    fn into_config(self) -> AppConfig {
        let server_defaults = ServerSettings::default();
        let model_defaults = ModelSettings::default();
        let company_defaults = CompanyContext::default();
        let upload_defaults = UploadLimits::default();
        let generation_defaults = GenerationSettings::default();

        let qa_standards = split_list(self.company_qa_standards);
        let services = split_list(self.company_services);

        let mut fast = model_defaults.fast;
        if let Some(model) = non_blank(self.gemini_fast_model) {
            fast.model = model;
        }
        let mut deep = model_defaults.deep;
        if let Some(model) = non_blank(self.gemini_deep_model) {
            deep.model = model;
        }

        AppConfig {
            server: ServerSettings {
                host: non_blank(self.qa_scribe_host).unwrap_or(server_defaults.host),
                port: self.qa_scribe_port.unwrap_or(server_defaults.port),
                max_json_bytes: self
                    .qa_scribe_max_json_bytes
                    .unwrap_or(server_defaults.max_json_bytes),
            },
            model: ModelSettings {
                api_key: non_blank(self.gemini_api_key),
                base_url: non_blank(self.gemini_base_url).unwrap_or(model_defaults.base_url),
                fast,
                deep,
            },
            company: CompanyContext {
                name: non_blank(self.company_name).unwrap_or(company_defaults.name),
                qa_standards: if qa_standards.is_empty() {
                    company_defaults.qa_standards
                } else {
                    qa_standards
                },
                services: if services.is_empty() {
                    company_defaults.services
                } else {
                    services
                },
                guidance: non_blank(self.company_prompt_guidance)
                    .unwrap_or(company_defaults.guidance),
            },
            uploads: UploadLimits {
                max_files: self.max_upload_files.unwrap_or(upload_defaults.max_files),
                max_file_size_mb: self
                    .max_upload_file_size_mb
                    .unwrap_or(upload_defaults.max_file_size_mb),
            },
            generation: GenerationSettings {
                strict_coverage: self
                    .qa_scribe_strict_coverage
                    .unwrap_or(generation_defaults.strict_coverage),
            },
        }
    }
}

/// Loads [`AppConfig`] from `.env`, an optional TOML file and the process
/// environment, in increasing order of precedence.
pub struct ConfigService;

impl ConfigService {
    pub fn load() -> Result<AppConfig> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                tracing::warn!("Ignoring unreadable .env file: {}", e);
            }
        }
        let path =
            std::env::var("QA_SCRIBE_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::from_figment(Self::figment(&path))
    }

    pub fn figment(config_file: &str) -> Figment {
        Figment::new()
            .merge(Toml::file(config_file))
            .merge(Env::raw().only(&ENV_KEYS))
    }

    pub fn from_figment(figment: Figment) -> Result<AppConfig> {
        let raw: RawSettings = figment
            .extract()
            .map_err(|e| AppError::ConfigurationError(format!("Invalid configuration: {}", e)))?;
        Ok(raw.into_config())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_defaults_when_nothing_is_set() {
        Jail::expect_with(|_jail| {
            let config = ConfigService::from_figment(ConfigService::figment("absent.toml"))
                .expect("config");
            let defaults = AppConfig::default();
            assert_eq!(config.company, defaults.company);
            assert_eq!(config.uploads, defaults.uploads);
            assert_eq!(config.model.fast, defaults.model.fast);
            Ok(())
        });
    }

    #[test]
    fn test_environment_overrides() {
        Jail::expect_with(|jail| {
            jail.set_env("GEMINI_API_KEY", "abc123");
            jail.set_env("COMPANY_NAME", "Acme Bank");
            jail.set_env("COMPANY_QA_STANDARDS", "ISTQB, , OWASP ASVS ");
            jail.set_env("COMPANY_SERVICES", " ");
            jail.set_env("MAX_UPLOAD_FILES", "5");
            jail.set_env("MAX_UPLOAD_FILE_SIZE_MB", "2");
            jail.set_env("QA_SCRIBE_STRICT_COVERAGE", "false");

            let config = ConfigService::from_figment(ConfigService::figment("absent.toml"))
                .expect("config");
            assert_eq!(config.model.api_key.as_deref(), Some("abc123"));
            assert_eq!(config.company.name, "Acme Bank");
            assert_eq!(config.company.qa_standards, vec!["ISTQB", "OWASP ASVS"]);
            assert_eq!(
                config.company.services,
                CompanyContext::default().services
            );
            assert_eq!(config.uploads.max_files, 5);
            assert_eq!(config.uploads.max_file_size_mb, 2);
            assert!(!config.generation.strict_coverage);
            Ok(())
        });
    }

    #[test]
    fn test_environment_wins_over_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "qa-scribe.toml",
                r#"
                company_name = "From File"
                company_prompt_guidance = "Prefer short steps."
                qa_scribe_port = 8080
                "#,
            )?;
            jail.set_env("COMPANY_NAME", "From Env");

            let config = ConfigService::from_figment(ConfigService::figment("qa-scribe.toml"))
                .expect("config");
            assert_eq!(config.company.name, "From Env");
            assert_eq!(config.company.guidance, "Prefer short steps.");
            assert_eq!(config.server.port, 8080);
            Ok(())
        });
    }

    #[test]
    fn test_malformed_number_is_configuration_error() {
        Jail::expect_with(|jail| {
            jail.set_env("MAX_UPLOAD_FILES", "lots");
            let err = ConfigService::from_figment(ConfigService::figment("absent.toml"))
                .unwrap_err();
            assert!(matches!(err, AppError::ConfigurationError(_)));
            Ok(())
        });
    }
}

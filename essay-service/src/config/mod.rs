use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

/// Default Gemini REST endpoint.
pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model used to generate essay feedback.
pub const DEFAULT_TEXT_MODEL: &str = "gemini-1.5-flash-latest";

#[derive(Debug, Clone, Deserialize)]
pub struct EssayConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub models: ModelConfig,
    pub google: GoogleConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// Model for essay feedback (e.g., gemini-1.5-flash-latest)
    pub text_model: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleConfig {
    pub api_key: String,
    pub api_base_url: String,
}

impl EssayConfig {
    /// Load configuration from `.env`, the optional `configuration` file and
    /// the process environment. Fails if `API_KEY` is absent or blank.
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        let config = EssayConfig {
            common: common_config,
            models: ModelConfig {
                text_model: get_env("GENAI_TEXT_MODEL", Some(DEFAULT_TEXT_MODEL), is_prod)?,
            },
            google: GoogleConfig {
                api_key: get_env("API_KEY", None, is_prod)?,
                api_base_url: get_env("GENAI_API_BASE_URL", Some(DEFAULT_API_BASE_URL), is_prod)?,
            },
        };
        config.validate()?;

        Ok(config)
    }

    /// Reject values that would leave the service unable to call the API.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.google.api_key.trim().is_empty() {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "API_KEY not found. Set it in the environment or a .env file."
            )));
        }
        if self.models.text_model.trim().is_empty() {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "GENAI_TEXT_MODEL must not be empty"
            )));
        }
        Ok(())
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_key(api_key: &str) -> EssayConfig {
        EssayConfig {
            common: core_config::Config { port: 0 },
            models: ModelConfig {
                text_model: DEFAULT_TEXT_MODEL.to_string(),
            },
            google: GoogleConfig {
                api_key: api_key.to_string(),
                api_base_url: DEFAULT_API_BASE_URL.to_string(),
            },
        }
    }

    #[test]
    fn blank_api_key_is_rejected() {
        assert!(matches!(
            config_with_key("   ").validate(),
            Err(AppError::ConfigError(_))
        ));
        assert!(config_with_key("").validate().is_err());
    }

    #[test]
    fn present_api_key_is_accepted() {
        assert!(config_with_key("key-123").validate().is_ok());
    }

    #[test]
    fn missing_variable_without_default_fails() {
        let err = get_env("ESSAY_SERVICE_TEST_UNSET_VARIABLE", None, false).unwrap_err();
        assert!(err.to_string().contains("ESSAY_SERVICE_TEST_UNSET_VARIABLE"));
    }

    #[test]
    fn missing_variable_falls_back_outside_prod() {
        let value = get_env("ESSAY_SERVICE_TEST_UNSET_VARIABLE", Some("fallback"), false).unwrap();
        assert_eq!(value, "fallback");
    }

    #[test]
    fn missing_variable_has_no_default_in_prod() {
        assert!(get_env("ESSAY_SERVICE_TEST_UNSET_VARIABLE", Some("fallback"), true).is_err());
    }
}

//! Application configuration. API credentials, model, advice provider selection.

use serde::Deserialize;

pub const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_ADVICE_LANGUAGE: &str = "English";
pub const DEFAULT_MOCK_DELAY_MS: u64 = 300;

/// Environment variables checked, in order, when no key is configured.
const API_KEY_ENV_VARS: &[&str] = &["BMI_ADVISOR_API_KEY", "GEMINI_API_KEY", "API_KEY"];

/// Which `AdviceProvider` main wires in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AiProvider {
    #[default]
    Gemini,
    Mock,
}

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Gemini API key. Read from BMI_ADVISOR_API_KEY (or GEMINI_API_KEY / API_KEY at call time).
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL of the generative language API. Read from BMI_ADVISOR_API_URL.
    #[serde(default)]
    pub api_url: Option<String>,

    /// Model name. Read from BMI_ADVISOR_MODEL.
    #[serde(default)]
    pub model: Option<String>,

    /// Language the advice is written in. Read from BMI_ADVISOR_ADVICE_LANGUAGE.
    #[serde(default)]
    pub advice_language: Option<String>,

    /// `gemini` or `mock`. Read from BMI_ADVISOR_AI_PROVIDER.
    #[serde(default)]
    pub ai_provider: Option<AiProvider>,

    /// Simulated latency of the mock provider. Read from BMI_ADVISOR_MOCK_DELAY_MS.
    #[serde(default)]
    pub mock_delay_ms: Option<u64>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("BMI_ADVISOR").try_parsing(true));
        if let Ok(path) = std::env::var("BMI_ADVISOR_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c.build()?.try_deserialize()
    }

    /// Configured API key, falling back to the process environment.
    pub fn api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(api_key_from_env)
    }

    /// Returns the API base URL without a trailing slash.
    pub fn api_url_or_default(&self) -> String {
        self.api_url
            .as_deref()
            .unwrap_or(DEFAULT_API_URL)
            .trim_end_matches('/')
            .to_string()
    }

    pub fn model_or_default(&self) -> String {
        self.model
            .clone()
            .unwrap_or_else(|| DEFAULT_MODEL.to_string())
    }

    pub fn advice_language_or_default(&self) -> String {
        self.advice_language
            .clone()
            .unwrap_or_else(|| DEFAULT_ADVICE_LANGUAGE.to_string())
    }

    pub fn ai_provider_or_default(&self) -> AiProvider {
        self.ai_provider.unwrap_or_default()
    }

    pub fn mock_delay_ms_or_default(&self) -> u64 {
        self.mock_delay_ms.unwrap_or(DEFAULT_MOCK_DELAY_MS)
    }
}

/// First non-empty key among the known environment variables.
pub fn api_key_from_env() -> Option<String> {
    API_KEY_ENV_VARS
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.api_url_or_default(), DEFAULT_API_URL);
        assert_eq!(cfg.model_or_default(), DEFAULT_MODEL);
        assert_eq!(cfg.advice_language_or_default(), "English");
        assert_eq!(cfg.ai_provider_or_default(), AiProvider::Gemini);
        assert_eq!(cfg.mock_delay_ms_or_default(), 300);
    }

    #[test]
    fn test_overrides() {
        let cfg = AppConfig {
            api_key: Some("k".into()),
            api_url: Some("http://localhost:8080/v1beta/".into()),
            model: Some("gemini-2.5-flash".into()),
            advice_language: Some("Thai".into()),
            ai_provider: Some(AiProvider::Mock),
            mock_delay_ms: Some(0),
        };
        assert_eq!(cfg.api_key().as_deref(), Some("k"));
        assert_eq!(cfg.api_url_or_default(), "http://localhost:8080/v1beta");
        assert_eq!(cfg.model_or_default(), "gemini-2.5-flash");
        assert_eq!(cfg.advice_language_or_default(), "Thai");
        assert_eq!(cfg.ai_provider_or_default(), AiProvider::Mock);
        assert_eq!(cfg.mock_delay_ms_or_default(), 0);
    }

    #[test]
    fn test_provider_deserializes_lowercase() {
        let p: AiProvider = serde_json::from_str("\"mock\"").unwrap();
        assert_eq!(p, AiProvider::Mock);
    }
}

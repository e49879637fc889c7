//! Gemini adapter for health advice.
//!
//! Calls the Generative Language `generateContent` endpoint with a JSON response schema.
//! Implements `AdviceProvider` with markdown-fence stripping before parsing.

use crate::domain::{BmiCategory, DomainError, Gender, HealthAdvice};
use crate::ports::AdviceProvider;
use crate::shared::config::api_key_from_env;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info, warn};

/// Google Gemini advice adapter.
///
/// The API key is resolved per request: the configured value first, then the process
/// environment. A missing key fails the request like any other advice error.
pub struct GeminiAdapter {
    client: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
    model: String,
    language: String,
}

impl GeminiAdapter {
    /// Create a new Gemini adapter.
    ///
    /// # Arguments
    /// * `api_url` - API base (e.g., "https://generativelanguage.googleapis.com/v1beta")
    /// * `api_key` - Configured key; `None` defers to the environment at call time
    /// * `model` - Model name (e.g., "gemini-3-flash-preview")
    /// * `language` - Language the advice should be written in
    pub fn new(api_url: String, api_key: Option<String>, model: String, language: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
            api_key,
            model,
            language,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_url, self.model)
    }

    fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(api_key_from_env)
    }

    /// Build the coaching prompt. BMI is embedded with one decimal.
    fn prompt(&self, bmi: f64, category: BmiCategory, age: u32, gender: Gender) -> String {
        format!(
            "As a friendly health coach, provide advice for a {}-year-old {} with a BMI of {:.1} ({}). \
             Provide the response in {} language.",
            age,
            gender,
            bmi,
            category.label(),
            self.language
        )
    }

    /// Schema the model's JSON reply must follow.
    fn response_schema() -> serde_json::Value {
        json!({
            "type": "OBJECT",
            "properties": {
                "summary": {
                    "type": "STRING",
                    "description": "A brief summary of the health status."
                },
                "recommendations": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" },
                    "description": "List of general lifestyle recommendations."
                },
                "dietTips": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" },
                    "description": "List of dietary tips."
                }
            },
            "required": ["summary", "recommendations", "dietTips"]
        })
    }

    /// Sanitize JSON response from LLM.
    ///
    /// LLMs sometimes wrap JSON in markdown code blocks. This strips them.
    fn sanitize_json(raw_text: &str) -> String {
        let trimmed = raw_text.trim();

        if let Some(rest) = trimmed.strip_prefix("```") {
            let body = rest.strip_prefix("json").unwrap_or(rest);
            let body = match body.rfind("```") {
                Some(end_idx) => &body[..end_idx],
                None => body,
            };
            return body.trim().to_string();
        }

        trimmed.to_string()
    }

    fn parse_advice(raw_text: &str) -> Result<HealthAdvice, DomainError> {
        let clean_json = Self::sanitize_json(raw_text);
        serde_json::from_str(&clean_json).map_err(|e| {
            warn!(error = %e, json = %clean_json.chars().take(200).collect::<String>(), "advice JSON parse failed");
            DomainError::Advice(format!("Failed to parse advice JSON: {}", e))
        })
    }

    /// Pull a readable message out of an error body, falling back to the raw text.
    fn error_message(body: &str) -> String {
        serde_json::from_str::<GenerateResponse>(body)
            .ok()
            .and_then(|r| r.error)
            .map(|e| e.message)
            .unwrap_or_else(|| body.chars().take(200).collect())
    }
}

/// generateContent request body.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: serde_json::Value,
}

/// generateContent response body.
#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Deserialize)]
struct ApiError {
    message: String,
}

#[async_trait::async_trait]
impl AdviceProvider for GeminiAdapter {
    async fn request_advice(
        &self,
        bmi: f64,
        category: BmiCategory,
        age: u32,
        gender: Gender,
    ) -> Result<HealthAdvice, DomainError> {
        let api_key = self.resolve_api_key().ok_or_else(|| {
            DomainError::Advice("no API key set (BMI_ADVISOR_API_KEY, GEMINI_API_KEY or API_KEY)".into())
        })?;

        info!(
            bmi,
            category = %category,
            age,
            gender = %gender,
            model = %self.model,
            "requesting health advice"
        );

        let request = GenerateRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(self.prompt(bmi, category, age, gender)),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: Self::response_schema(),
            },
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::Advice(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DomainError::Advice(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            let message = Self::error_message(&body);
            warn!(status = %status, error = %message, "Gemini API returned error");
            return Err(DomainError::Advice(format!("API error {}: {}", status, message)));
        }

        let parsed: GenerateResponse = serde_json::from_str(&body)
            .map_err(|e| DomainError::Advice(format!("Failed to parse API response: {}", e)))?;

        let raw_text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().find_map(|p| p.text))
            .ok_or_else(|| DomainError::Advice("No text in Gemini response".to_string()))?;

        debug!(raw_len = raw_text.len(), "received advice text");

        let advice = Self::parse_advice(&raw_text)?;

        info!(
            recommendations = advice.recommendations.len(),
            diet_tips = advice.diet_tips.len(),
            "advice received"
        );

        Ok(advice)
    }
}

//! Gemini AI provider implementation.
//!
//! Implements single-shot text generation using Google's Gemini REST API.
//! One request per call: no retries, no backoff, and reqwest's default
//! transport timeouts.

use super::{Generation, ProviderError, TextProvider};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Gemini provider configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

/// Gemini text provider.
pub struct GeminiTextProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiTextProvider {
    pub fn new(config: GeminiConfig) -> Result<Self, ProviderError> {
        let client = Client::builder().build().map_err(|e| {
            ProviderError::NotConfigured(format!("Failed to create HTTP client: {}", e))
        })?;

        Ok(Self { config, client })
    }

    /// Build the API URL for the given model and method.
    fn api_url(&self, method: &str) -> String {
        format!(
            "{}/models/{}:{}?key={}",
            self.config.base_url.trim_end_matches('/'),
            self.config.model,
            method,
            self.config.api_key
        )
    }
}

#[async_trait]
impl TextProvider for GeminiTextProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    async fn generate(&self, prompt: &str) -> Result<Generation, ProviderError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![ContentPart::Text {
                    text: prompt.to_string(),
                }],
            }],
        };

        let url = self.api_url("generateContent");

        tracing::debug!(
            model = %self.config.model,
            prompt_len = prompt.len(),
            "Sending request to Gemini API"
        );

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.without_url().to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();

            if status.as_u16() == 429 {
                return Err(ProviderError::RateLimited);
            }

            return Err(ProviderError::ApiError(format!(
                "Gemini API error {}: {}",
                status, error_text
            )));
        }

        let api_response: GenerateContentResponse = response.json().await.map_err(|e| {
            ProviderError::ApiError(format!("Failed to parse response: {}", e.without_url()))
        })?;

        extract_generation(api_response)
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        if self.config.api_key.is_empty() {
            return Err(ProviderError::NotConfigured(
                "Gemini API key not configured".to_string(),
            ));
        }

        // Listing models verifies both reachability and the key
        let url = format!(
            "{}/models?key={}",
            self.config.base_url.trim_end_matches('/'),
            self.config.api_key
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.without_url().to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(ProviderError::ApiError(format!(
                "Health check failed: {}",
                response.status()
            )))
        }
    }
}

/// Turn a decoded API response into generated text.
///
/// Text is the concatenation of every text part of the first candidate.
fn extract_generation(response: GenerateContentResponse) -> Result<Generation, ProviderError> {
    if let Some(reason) = response
        .prompt_feedback
        .as_ref()
        .and_then(|f| f.block_reason.as_deref())
    {
        return Err(ProviderError::ContentFiltered(format!(
            "prompt blocked: {}",
            reason
        )));
    }

    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or(ProviderError::EmptyResponse)?;

    if candidate.finish_reason.as_deref() == Some("SAFETY") {
        return Err(ProviderError::ContentFiltered(
            "candidate stopped for safety".to_string(),
        ));
    }

    let texts: Vec<String> = candidate
        .content
        .map(|c| c.parts)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|p| match p {
            ContentPart::Text { text } => Some(text),
            ContentPart::Other(_) => None,
        })
        .collect();

    if texts.is_empty() {
        return Err(ProviderError::EmptyResponse);
    }

    let usage = response.usage_metadata.unwrap_or_default();

    Ok(Generation {
        text: texts.concat(),
        input_tokens: usage.prompt_token_count.unwrap_or(0),
        output_tokens: usage.candidates_token_count.unwrap_or(0),
    })
}

// ============================================================================
// Gemini API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<ContentPart>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum ContentPart {
    Text { text: String },
    Other(serde_json::Value),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    prompt_token_count: Option<i32>,
    candidates_token_count: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> Result<Generation, ProviderError> {
        extract_generation(serde_json::from_value(value).unwrap())
    }

    #[test]
    fn request_body_matches_api_shape() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![ContentPart::Text {
                    text: "hello".to_string(),
                }],
            }],
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "contents": [{ "role": "user", "parts": [{ "text": "hello" }] }] })
        );
    }

    #[test]
    fn extracts_text_and_usage() {
        let generation = parse(json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": "## Overall Band: 6.5" }] },
                "finishReason": "STOP"
            }],
            "usageMetadata": { "promptTokenCount": 120, "candidatesTokenCount": 45, "totalTokenCount": 165 }
        }))
        .unwrap();

        assert_eq!(generation.text, "## Overall Band: 6.5");
        assert_eq!(generation.input_tokens, 120);
        assert_eq!(generation.output_tokens, 45);
    }

    #[test]
    fn concatenates_text_parts_and_skips_others() {
        let generation = parse(json!({
            "candidates": [{
                "content": { "parts": [
                    { "text": "first " },
                    { "inlineData": { "mimeType": "image/png", "data": "AAAA" } },
                    { "text": "second" }
                ] }
            }]
        }))
        .unwrap();

        assert_eq!(generation.text, "first second");
        assert_eq!(generation.input_tokens, 0);
    }

    #[test]
    fn no_candidates_is_empty_response() {
        assert!(matches!(
            parse(json!({ "candidates": [] })),
            Err(ProviderError::EmptyResponse)
        ));
    }

    #[test]
    fn candidate_without_text_is_empty_response() {
        assert!(matches!(
            parse(json!({ "candidates": [{ "finishReason": "MAX_TOKENS" }] })),
            Err(ProviderError::EmptyResponse)
        ));
    }

    #[test]
    fn blocked_prompt_is_filtered() {
        let err = parse(json!({ "promptFeedback": { "blockReason": "SAFETY" } })).unwrap_err();
        assert!(matches!(err, ProviderError::ContentFiltered(_)));
    }

    #[test]
    fn safety_stop_is_filtered() {
        let err = parse(json!({
            "candidates": [{ "content": { "parts": [{ "text": "partial" }] }, "finishReason": "SAFETY" }]
        }))
        .unwrap_err();
        assert!(matches!(err, ProviderError::ContentFiltered(_)));
    }

    #[test]
    fn api_url_includes_model_and_key() {
        let provider = GeminiTextProvider::new(GeminiConfig {
            api_key: "k".to_string(),
            model: "gemini-1.5-flash-latest".to_string(),
            base_url: "http://localhost:9999/v1beta/".to_string(),
        })
        .unwrap();

        assert_eq!(
            provider.api_url("generateContent"),
            "http://localhost:9999/v1beta/models/gemini-1.5-flash-latest:generateContent?key=k"
        );
    }
}

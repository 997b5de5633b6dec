use crate::config::GeminiConfig;
use crate::error::{Result, UniformError};
use crate::generator::provider::{Capability, ImageProvider};
use crate::models::{Candidate, ContentPart, GenerationRequest};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-2.5-flash-image-preview";
const CAPABILITIES: &[Capability] = &[Capability::ImageGeneration, Capability::Multimodal];

/// Gemini REST provider: text prompt + logo file reference in, inline
/// image candidates out.
pub struct GeminiProvider {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiProvider {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| UniformError::ConfigError("Gemini API key not configured".into()))?;

        // No timeout exists provider-side; impose one here so a hung
        // call cannot block an admin action indefinitely.
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| UniformError::ConfigError(e.to_string()))?;

        Ok(Self {
            http,
            api_key,
            base_url: config
                .base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: config.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    fn build_payload(request: &GenerationRequest) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![WireContent {
                parts: Some(vec![
                    WirePart {
                        text: Some(request.prompt()),
                        ..Default::default()
                    },
                    WirePart {
                        file_data: Some(WireFileData {
                            file_uri: request.logo_url.clone(),
                            mime_type: "image/png".to_string(),
                        }),
                        ..Default::default()
                    },
                ]),
            }],
            generation_config: WireGenerationConfig {
                candidate_count: request.candidate_count,
                response_modalities: vec!["TEXT".to_string(), "IMAGE".to_string()],
            },
        }
    }
}

#[async_trait]
impl ImageProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn capabilities(&self) -> &[Capability] {
        CAPABILITIES
    }

    async fn generate_candidates(&self, request: &GenerationRequest) -> Result<Vec<Candidate>> {
        let payload = Self::build_payload(request);

        log::info!(
            "Requesting {} candidate(s) from model: {}",
            request.candidate_count,
            self.model
        );

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| UniformError::ProviderError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UniformError::ProviderError(format!(
                "Gemini {}: {}",
                status, body
            )));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| UniformError::ProviderError(format!("Malformed response: {}", e)))?;

        Ok(body
            .candidates
            .unwrap_or_default()
            .into_iter()
            .map(WireCandidate::into_candidate)
            .collect())
    }
}

// ── Wire types ──────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<WireContent>,
    generation_config: WireGenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireGenerationConfig {
    candidate_count: u32,
    response_modalities: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireContent {
    parts: Option<Vec<WirePart>>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WirePart {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<WireInlineData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    file_data: Option<WireFileData>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireInlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireFileData {
    file_uri: String,
    mime_type: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<WireCandidate>>,
}

#[derive(Debug, Deserialize)]
struct WireCandidate {
    content: Option<WireContent>,
}

impl WireCandidate {
    fn into_candidate(self) -> Candidate {
        let parts = self
            .content
            .and_then(|content| content.parts)
            .unwrap_or_default()
            .into_iter()
            .filter_map(WirePart::into_content_part)
            .collect();
        Candidate { parts }
    }
}

impl WirePart {
    fn into_content_part(self) -> Option<ContentPart> {
        if let Some(inline) = self.inline_data {
            Some(ContentPart::InlineImage {
                mime_type: inline.mime_type,
                data: inline.data,
            })
        } else if let Some(file) = self.file_data {
            Some(ContentPart::FileReference {
                uri: file.file_uri,
                mime_type: file.mime_type,
            })
        } else if let Some(text) = self.text {
            Some(ContentPart::Text { text })
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Gender;

    fn request() -> GenerationRequest {
        GenerationRequest {
            logo_url: "https://example.com/logo.png".to_string(),
            gender: Gender::Male,
            outfit: "a white corporate shirt".to_string(),
            candidate_count: 3,
        }
    }

    #[test]
    fn test_new_requires_api_key() {
        assert!(GeminiProvider::new(GeminiConfig::new()).is_err());
        assert!(GeminiProvider::new(GeminiConfig::new().with_api_key("  ")).is_err());
        assert!(GeminiProvider::new(GeminiConfig::new().with_api_key("key")).is_ok());
    }

    #[test]
    fn test_payload_shape() {
        let payload = GeminiProvider::build_payload(&request());
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["generationConfig"]["candidateCount"], 3);
        let parts = json["contents"][0]["parts"].as_array().unwrap();
        assert_eq!(parts.len(), 2);
        assert!(parts[0]["text"]
            .as_str()
            .unwrap()
            .contains("male model wearing a white corporate shirt"));
        assert_eq!(
            parts[1]["fileData"]["fileUri"],
            "https://example.com/logo.png"
        );
    }

    #[test]
    fn test_response_parsing() {
        let raw = serde_json::json!({
            "candidates": [
                {
                    "content": {
                        "parts": [
                            { "text": "Here is your image" },
                            { "inlineData": { "mimeType": "image/png", "data": "QUJD" } }
                        ]
                    }
                },
                { "content": { "parts": [] } },
                {}
            ]
        });

        let parsed: GenerateContentResponse = serde_json::from_value(raw).unwrap();
        let candidates: Vec<Candidate> = parsed
            .candidates
            .unwrap()
            .into_iter()
            .map(WireCandidate::into_candidate)
            .collect();

        assert_eq!(candidates.len(), 3);
        assert_eq!(
            candidates[0].parts,
            vec![
                ContentPart::Text {
                    text: "Here is your image".to_string()
                },
                ContentPart::InlineImage {
                    mime_type: "image/png".to_string(),
                    data: "QUJD".to_string()
                },
            ]
        );
        assert!(candidates[1].parts.is_empty());
        assert!(candidates[2].parts.is_empty());
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let provider = GeminiProvider::new(
            GeminiConfig::new()
                .with_api_key("key")
                .with_base_url("https://example.com/v1beta/")
                .with_model("test-model"),
        )
        .unwrap();
        assert_eq!(
            provider.endpoint(),
            "https://example.com/v1beta/models/test-model:generateContent"
        );
    }
}

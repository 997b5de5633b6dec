use crate::error::{Result, UniformError};
use crate::generator::provider::{Capability, ProviderRegistry};
use crate::models::{Candidate, ContentPart, GenerationRequest, GenerationResponse};

/// Submits a validated request to an available provider and extracts the
/// inline image payloads from the returned candidates.
#[derive(Clone)]
pub struct GenerationClient {
    registry: ProviderRegistry,
}

impl GenerationClient {
    pub fn new(registry: ProviderRegistry) -> Self {
        Self { registry }
    }

    pub async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse> {
        let provider = self
            .registry
            .available(Capability::ImageGeneration)
            .ok_or_else(|| {
                UniformError::ProviderUnavailable(
                    "No provider with image generation capability is configured".into(),
                )
            })?;

        log::info!("Generating uniform image via provider: {}", provider.name());

        let candidates = provider.generate_candidates(request).await?;

        if candidates.is_empty() {
            return Err(UniformError::EmptyResult(
                "Provider returned no candidates".into(),
            ));
        }

        let images = extract_images(&candidates);
        if images.is_empty() {
            return Err(UniformError::EmptyResult(
                "Candidates contained no inline image data".into(),
            ));
        }

        log::info!(
            "Extracted {} image(s) from {} candidate(s)",
            images.len(),
            candidates.len()
        );

        Ok(GenerationResponse { images })
    }
}

/// Inline image payloads in candidate and part order, append-only.
fn extract_images(candidates: &[Candidate]) -> Vec<String> {
    let mut images = Vec::new();
    for candidate in candidates {
        for part in &candidate.parts {
            if let ContentPart::InlineImage { data, .. } = part {
                images.push(data.clone());
            }
        }
    }
    images
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::provider::ImageProvider;
    use crate::models::Gender;
    use async_trait::async_trait;
    use std::sync::Arc;

    struct StubProvider {
        outcome: std::result::Result<Vec<Candidate>, String>,
    }

    #[async_trait]
    impl ImageProvider for StubProvider {
        fn name(&self) -> &str {
            "stub"
        }

        fn capabilities(&self) -> &[Capability] {
            &[Capability::ImageGeneration]
        }

        async fn generate_candidates(
            &self,
            _request: &GenerationRequest,
        ) -> Result<Vec<Candidate>> {
            match &self.outcome {
                Ok(candidates) => Ok(candidates.clone()),
                Err(msg) => Err(UniformError::ProviderError(msg.clone())),
            }
        }
    }

    fn request() -> GenerationRequest {
        GenerationRequest {
            logo_url: "https://example.com/logo.png".to_string(),
            gender: Gender::Female,
            outfit: "a black hoodie".to_string(),
            candidate_count: 3,
        }
    }

    fn client_with(outcome: std::result::Result<Vec<Candidate>, String>) -> GenerationClient {
        let mut registry = ProviderRegistry::new();
        registry.register(Arc::new(StubProvider { outcome }));
        GenerationClient::new(registry)
    }

    fn image_candidate(data: &str) -> Candidate {
        Candidate {
            parts: vec![
                ContentPart::Text {
                    text: "rendered".to_string(),
                },
                ContentPart::InlineImage {
                    mime_type: "image/png".to_string(),
                    data: data.to_string(),
                },
            ],
        }
    }

    #[tokio::test]
    async fn test_no_provider_configured() {
        let client = GenerationClient::new(ProviderRegistry::new());
        let err = client.generate(&request()).await.unwrap_err();
        assert!(matches!(err, UniformError::ProviderUnavailable(_)));
    }

    #[tokio::test]
    async fn test_no_candidates() {
        let client = client_with(Ok(vec![]));
        let err = client.generate(&request()).await.unwrap_err();
        match err {
            UniformError::EmptyResult(msg) => assert!(msg.contains("no candidates")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_candidates_without_images() {
        let candidates = vec![
            Candidate {
                parts: vec![ContentPart::Text {
                    text: "sorry".to_string(),
                }],
            },
            Candidate {
                parts: vec![ContentPart::FileReference {
                    uri: "https://example.com/out.png".to_string(),
                    mime_type: "image/png".to_string(),
                }],
            },
        ];
        let client = client_with(Ok(candidates));
        let err = client.generate(&request()).await.unwrap_err();
        match err {
            UniformError::EmptyResult(msg) => assert!(msg.contains("no inline image")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_images_extracted_in_candidate_order() {
        let client = client_with(Ok(vec![
            image_candidate("first"),
            image_candidate("second"),
            image_candidate("third"),
        ]));

        let response = client.generate(&request()).await.unwrap();
        assert_eq!(response.images, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_provider_error_preserves_message() {
        let client = client_with(Err("upstream timed out".to_string()));
        let err = client.generate(&request()).await.unwrap_err();
        match err {
            UniformError::ProviderError(msg) => assert!(msg.contains("upstream timed out")),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}

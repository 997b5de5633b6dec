pub mod client;
pub mod gemini;
pub mod provider;
pub mod request_builder;

use crate::config::Config;
use crate::error::Result;
use crate::models::GenerationResponse;
use std::sync::Arc;

pub use client::GenerationClient;
pub use gemini::GeminiProvider;
pub use provider::{Capability, ImageProvider, ProviderRegistry};
pub use request_builder::{HttpProbe, ReachabilityProbe, RequestBuilder};

/// Facade wiring the request builder and the generation client together.
pub struct GeneratorClient {
    builder: RequestBuilder,
    client: GenerationClient,
}

impl GeneratorClient {
    pub fn new(config: &Config) -> Result<Self> {
        let mut registry = ProviderRegistry::new();

        if let Some(gemini) = config.gemini.clone() {
            if gemini.api_key.is_some() {
                registry.register(Arc::new(GeminiProvider::new(gemini)?));
            }
        }

        if registry.is_empty() {
            log::warn!("No generation provider configured; generate requests will fail");
        }

        Ok(Self {
            builder: RequestBuilder::new(config.candidate_count)?,
            client: GenerationClient::new(registry),
        })
    }

    /// Assemble from pre-built parts. Used by tests to inject stub
    /// providers and probes.
    pub fn from_parts(builder: RequestBuilder, client: GenerationClient) -> Self {
        Self { builder, client }
    }

    pub fn builder(&self) -> &RequestBuilder {
        &self.builder
    }

    pub fn client(&self) -> &GenerationClient {
        &self.client
    }

    /// Validate inputs, build the request and run it end to end.
    pub async fn generate_uniform_image(
        &self,
        logo_url: &str,
        gender: &str,
        outfit: &str,
    ) -> Result<GenerationResponse> {
        let request = self.builder.build(logo_url, gender, outfit).await?;
        self.client.generate(&request).await
    }
}

use crate::error::Result;
use crate::models::{Candidate, GenerationRequest};
use async_trait::async_trait;
use std::sync::Arc;

/// Capabilities a provider can advertise. Lookup asks for a capability,
/// not a provider name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    TextGeneration,
    ImageGeneration,
    Multimodal,
}

#[async_trait]
pub trait ImageProvider: Send + Sync {
    fn name(&self) -> &str;

    fn capabilities(&self) -> &[Capability];

    /// Submit the request and return the raw candidate set. Provider
    /// faults come back as errors carrying the provider's own message.
    async fn generate_candidates(&self, request: &GenerationRequest) -> Result<Vec<Candidate>>;
}

/// Registry of configured providers, queried by capability.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: Vec<Arc<dyn ImageProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, provider: Arc<dyn ImageProvider>) {
        log::info!("Registered generation provider: {}", provider.name());
        self.providers.push(provider);
    }

    /// First registered provider advertising the capability, if any.
    pub fn available(&self, capability: Capability) -> Option<Arc<dyn ImageProvider>> {
        self.providers
            .iter()
            .find(|provider| provider.capabilities().contains(&capability))
            .cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }
}

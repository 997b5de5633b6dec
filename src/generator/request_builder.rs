use crate::error::{Result, UniformError};
use crate::models::{Gender, GenerationRequest};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Pre-flight existence check for the logo reference. A trait so the
/// network round trip can be stubbed in tests.
#[async_trait]
pub trait ReachabilityProbe: Send + Sync {
    async fn is_reachable(&self, url: &str) -> bool;
}

pub struct HttpProbe {
    http: reqwest::Client,
}

impl HttpProbe {
    pub fn new() -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| UniformError::ConfigError(e.to_string()))?;
        Ok(Self { http })
    }
}

#[async_trait]
impl ReachabilityProbe for HttpProbe {
    async fn is_reachable(&self, url: &str) -> bool {
        match self.http.head(url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                log::debug!("Logo pre-flight failed for {}: {}", url, e);
                false
            }
        }
    }
}

/// Validates raw inputs and assembles a [`GenerationRequest`].
pub struct RequestBuilder {
    probe: Arc<dyn ReachabilityProbe>,
    candidate_count: u32,
}

impl RequestBuilder {
    pub fn new(candidate_count: u32) -> Result<Self> {
        Ok(Self {
            probe: Arc::new(HttpProbe::new()?),
            candidate_count: candidate_count.max(1),
        })
    }

    pub fn with_probe(probe: Arc<dyn ReachabilityProbe>, candidate_count: u32) -> Self {
        Self {
            probe,
            candidate_count: candidate_count.max(1),
        }
    }

    pub async fn build(
        &self,
        logo_url: &str,
        gender: &str,
        outfit: &str,
    ) -> Result<GenerationRequest> {
        let logo_url = logo_url.trim();
        let gender = gender.trim();
        let outfit = outfit.trim();

        if logo_url.is_empty() || gender.is_empty() || outfit.is_empty() {
            return Err(UniformError::ValidationError(
                "Missing required fields".into(),
            ));
        }

        let gender: Gender = gender.parse()?;

        if !self.probe.is_reachable(logo_url).await {
            return Err(UniformError::ValidationError(format!(
                "Logo URL is not reachable: {}",
                logo_url
            )));
        }

        Ok(GenerationRequest {
            logo_url: logo_url.to_string(),
            gender,
            outfit: outfit.to_string(),
            candidate_count: self.candidate_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubProbe {
        reachable: bool,
    }

    #[async_trait]
    impl ReachabilityProbe for StubProbe {
        async fn is_reachable(&self, _url: &str) -> bool {
            self.reachable
        }
    }

    fn builder(reachable: bool) -> RequestBuilder {
        RequestBuilder::with_probe(Arc::new(StubProbe { reachable }), 3)
    }

    #[tokio::test]
    async fn test_build_valid_request() {
        let request = builder(true)
            .build("https://example.com/logo.png", "female", "a black hoodie")
            .await
            .unwrap();

        assert_eq!(request.logo_url, "https://example.com/logo.png");
        assert_eq!(request.gender, Gender::Female);
        assert_eq!(request.outfit, "a black hoodie");
        assert_eq!(request.candidate_count, 3);
    }

    #[tokio::test]
    async fn test_build_rejects_empty_fields() {
        let builder = builder(true);

        for (logo, gender, outfit) in [
            ("", "female", "a hoodie"),
            ("https://example.com/logo.png", "", "a hoodie"),
            ("https://example.com/logo.png", "female", "   "),
        ] {
            let err = builder.build(logo, gender, outfit).await.unwrap_err();
            assert!(matches!(err, UniformError::ValidationError(_)), "{:?}", err);
        }
    }

    #[tokio::test]
    async fn test_build_rejects_unknown_gender() {
        let err = builder(true)
            .build("https://example.com/logo.png", "other", "a hoodie")
            .await
            .unwrap_err();
        assert!(matches!(err, UniformError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_build_rejects_unreachable_logo() {
        let err = builder(false)
            .build("https://example.com/missing.png", "male", "a hoodie")
            .await
            .unwrap_err();
        match err {
            UniformError::ValidationError(msg) => assert!(msg.contains("not reachable")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_candidate_count_is_at_least_one() {
        let builder = RequestBuilder::with_probe(Arc::new(StubProbe { reachable: true }), 0);
        let request = builder
            .build("https://example.com/logo.png", "male", "a polo shirt")
            .await
            .unwrap();
        assert_eq!(request.candidate_count, 1);
    }
}

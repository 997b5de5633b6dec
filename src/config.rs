use std::env;

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
}

#[derive(Debug, Clone)]
pub struct MediaConfig {
    pub upload_dir: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: Option<u16>,
    pub candidate_count: u32,
    pub gemini: Option<GeminiConfig>,
    pub media: Option<MediaConfig>,
    pub secret_key: Option<String>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        GeminiConfig {
            api_key: None,
            base_url: None,
            model: None,
        }
    }
}

impl GeminiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let api_key = env::var("GEMINI_API_KEY").ok();
        let base_url = env::var("GEMINI_BASE_URL").ok();
        let model = env::var("GEMINI_IMAGE_MODEL").ok();

        GeminiConfig {
            api_key,
            base_url,
            model,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

impl Default for MediaConfig {
    fn default() -> Self {
        MediaConfig {
            upload_dir: None,
            base_url: None,
        }
    }
}

impl MediaConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let upload_dir = env::var("MEDIA_UPLOAD_DIR").ok();
        let base_url = env::var("MEDIA_BASE_URL").ok();

        MediaConfig {
            upload_dir,
            base_url,
        }
    }

    pub fn with_upload_dir(mut self, upload_dir: impl Into<String>) -> Self {
        self.upload_dir = Some(upload_dir.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: None,
            candidate_count: 3,
            gemini: None,
            media: None,
            secret_key: None,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let port = env::var("PORT").ok().and_then(|port| port.parse().ok());
        let candidate_count = env::var("CANDIDATE_COUNT")
            .ok()
            .and_then(|val| val.parse().ok())
            .unwrap_or(3);
        let secret_key = env::var("ADMIN_TOKEN").ok();

        Config {
            port,
            candidate_count,
            gemini: Some(GeminiConfig::from_env()),
            media: Some(MediaConfig::from_env()),
            secret_key,
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_candidate_count(mut self, count: u32) -> Self {
        self.candidate_count = count.max(1);
        self
    }

    pub fn with_gemini(mut self, config: GeminiConfig) -> Self {
        self.gemini = Some(config);
        self
    }

    pub fn with_media(mut self, config: MediaConfig) -> Self {
        self.media = Some(config);
        self
    }

    pub fn with_secret_key(mut self, secret_key: impl Into<String>) -> Self {
        self.secret_key = Some(secret_key.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_chain() {
        let config = Config::new()
            .with_port(8090)
            .with_candidate_count(5)
            .with_gemini(GeminiConfig::new().with_api_key("key").with_model("m"))
            .with_secret_key("secret");

        assert_eq!(config.port, Some(8090));
        assert_eq!(config.candidate_count, 5);
        assert_eq!(config.gemini.as_ref().unwrap().api_key.as_deref(), Some("key"));
        assert_eq!(config.secret_key.as_deref(), Some("secret"));
    }

    #[test]
    fn test_candidate_count_floor() {
        let config = Config::new().with_candidate_count(0);
        assert_eq!(config.candidate_count, 1);
    }
}

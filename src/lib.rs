pub mod config;
pub mod error;
pub mod generator;
pub mod logger;
pub mod media;
pub mod models;
pub mod server;

pub use config::{Config, GeminiConfig, MediaConfig};
pub use error::{Result, UniformError};
pub use generator::{GenerationClient, GeneratorClient, RequestBuilder};
pub use media::MediaLibrary;
pub use models::{
    Candidate, ContentPart, Gender, GenerationRequest, GenerationResponse, MediaRecord, SavedImage,
};
pub use server::{AppState, NonceStore};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Result of a successful save: the only durable entity in the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedImage {
    pub filename: String,
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Row appended to the media index when a file is registered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaRecord {
    pub id: String,
    pub filename: String,
    pub mime_type: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub size_bytes: u64,
    pub created_at: DateTime<Utc>,
}

use crate::config::MediaConfig;
use crate::error::{Result, UniformError};
use crate::models::{MediaRecord, SavedImage};
use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::Utc;
use image::GenericImageView;
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

const DEFAULT_UPLOAD_DIR: &str = "media";
const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080/media";
const INDEX_FILENAME: &str = "media-index.jsonl";

/// Local media library: decodes a base64 payload, writes it under a
/// time-derived name and registers the file in a JSON-lines index.
#[derive(Clone)]
pub struct MediaLibrary {
    upload_dir: PathBuf,
    base_url: String,
}

impl MediaLibrary {
    pub fn new(config: &MediaConfig) -> Self {
        Self {
            upload_dir: PathBuf::from(
                config
                    .upload_dir
                    .clone()
                    .unwrap_or_else(|| DEFAULT_UPLOAD_DIR.to_string()),
            ),
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }

    /// Single best-effort save: any decode or I/O fault surfaces
    /// immediately, nothing is retried.
    pub async fn save(&self, image_data: &str) -> Result<SavedImage> {
        let normalized = normalize_payload(image_data);

        let bytes = STANDARD
            .decode(normalized.as_bytes())
            .map_err(|e| UniformError::StorageError(format!("Invalid base64 image data: {}", e)))?;

        if bytes.is_empty() {
            return Err(UniformError::StorageError(
                "Decoded image payload is empty".into(),
            ));
        }

        let dimensions = image::load_from_memory(&bytes)
            .ok()
            .map(|img| img.dimensions());

        // Seconds-resolution name matches the collision window accepted
        // for concurrent saves.
        let filename = format!("uniform-{}.png", Utc::now().timestamp());

        tokio::fs::create_dir_all(&self.upload_dir)
            .await
            .map_err(|e| UniformError::StorageError(e.to_string()))?;

        let path = self.upload_dir.join(&filename);
        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|e| UniformError::StorageError(e.to_string()))?;

        let record = MediaRecord {
            id: Uuid::new_v4().to_string(),
            filename: filename.clone(),
            mime_type: "image/png".to_string(),
            width: dimensions.map(|(w, _)| w),
            height: dimensions.map(|(_, h)| h),
            size_bytes: bytes.len() as u64,
            created_at: Utc::now(),
        };
        self.register(&record).await?;

        log::info!(
            "Saved {} ({} bytes) to media library",
            filename,
            record.size_bytes
        );

        Ok(SavedImage {
            url: format!("{}/{}", self.base_url.trim_end_matches('/'), filename),
            filename,
            width: record.width,
            height: record.height,
        })
    }

    async fn register(&self, record: &MediaRecord) -> Result<()> {
        let line = serde_json::to_string(record)
            .map_err(|e| UniformError::SerializationError(e.to_string()))?;

        let mut index = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.upload_dir.join(INDEX_FILENAME))
            .await
            .map_err(|e| UniformError::StorageError(e.to_string()))?;

        index
            .write_all(format!("{}\n", line).as_bytes())
            .await
            .map_err(|e| UniformError::StorageError(e.to_string()))?;
        index
            .flush()
            .await
            .map_err(|e| UniformError::StorageError(e.to_string()))?;
        Ok(())
    }
}

/// Strip a data: URI prefix if present and undo the space-for-plus
/// substitution that form transports apply to base64 payloads.
fn normalize_payload(raw: &str) -> String {
    let trimmed = raw.trim();
    let body = if trimmed.starts_with("data:") {
        match trimmed.split_once("base64,") {
            Some((_, rest)) => rest,
            None => trimmed,
        }
    } else {
        trimmed
    };
    body.replace(' ', "+")
}

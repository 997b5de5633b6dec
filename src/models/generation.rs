use serde::{Deserialize, Serialize};

/// One typed content part of a candidate. Image extraction matches
/// `InlineImage` only; other variants are carried through untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ContentPart {
    Text {
        text: String,
    },
    InlineImage {
        mime_type: String,
        /// Base64 encoded image bytes, no data: URI prefix
        data: String,
    },
    FileReference {
        uri: String,
        mime_type: String,
    },
}

/// One generated output returned by the provider, possibly holding
/// several content parts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Candidate {
    pub parts: Vec<ContentPart>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// Base64 image payloads in candidate/part order. Non-empty: the
    /// client fails with an empty-result error instead of returning
    /// an empty list.
    pub images: Vec<String>,
}

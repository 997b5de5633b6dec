use crate::error::{Result, UniformError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl FromStr for Gender {
    type Err = UniformError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            other => Err(UniformError::ValidationError(format!(
                "Unknown gender '{}', expected 'male' or 'female'",
                other
            ))),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "male"),
            Gender::Female => write!(f, "female"),
        }
    }
}

/// A validated generation request. Built once per submit and discarded
/// after the provider call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub logo_url: String,
    pub gender: Gender,
    pub outfit: String,
    pub candidate_count: u32,
}

impl GenerationRequest {
    /// The instruction sent to the provider alongside the logo reference.
    pub fn prompt(&self) -> String {
        format!(
            "Create a photorealistic image of a {} model wearing {} with the \
             provided logo placed on the left chest area. The image should be \
             professional and suitable for business use.",
            self.gender, self.outfit
        )
    }
}

// ABOUTME: Defines DiseaseInfo, the descriptive metadata kept per disease category.
// ABOUTME: Entries have a fixed shape and no ordering; they are replaced whole on update.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ValidationError;

/// Descriptive metadata for one disease category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiseaseInfo {
    pub disease_name: String,
    #[serde(default)]
    pub caused_by: Option<String>,
    pub description: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub symptoms: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub factors: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub prevention: Vec<String>,
    /// Care guidance, used for the healthy-plant category.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub care: Vec<String>,
    #[serde(default)]
    pub treatment: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

// Stored entries and clients may send `null` for a list they leave unset.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl DiseaseInfo {
    pub fn new(disease_name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            disease_name: disease_name.into(),
            caused_by: None,
            description: description.into(),
            symptoms: Vec::new(),
            factors: Vec::new(),
            prevention: Vec::new(),
            care: Vec::new(),
            treatment: None,
            note: None,
        }
    }

    /// Reject entries without a display name.
    pub fn validate(mut self) -> Result<Self, ValidationError> {
        self.disease_name = self.disease_name.trim().to_string();
        if self.disease_name.is_empty() {
            return Err(ValidationError::EmptyDiseaseName);
        }
        Ok(self)
    }
}

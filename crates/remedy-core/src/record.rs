// ABOUTME: Defines the Record struct representing a single treatment entry within a ledger.
// ABOUTME: RecordDraft is the unvalidated inbound shape; validate() turns it into a Record.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Priority assigned to records that arrive without one.
pub const DEFAULT_PRIORITY: u32 = 999;

fn default_priority() -> u32 {
    DEFAULT_PRIORITY
}

/// A treatment entry. Lower priority sorts first; the owning ledger rewrites
/// priorities to a dense 1-based sequence on every mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub name: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub active_ingredient: Option<String>,
    #[serde(default)]
    pub pack_size: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub application_rate: Option<String>,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub frequency: Option<String>,
    #[serde(default)]
    pub availability: Option<String>,
    #[serde(default = "default_priority")]
    pub priority: u32,
    #[serde(default)]
    pub note: Option<String>,
}

impl Record {
    /// Create a record with only a name and the given priority.
    pub fn new(name: impl Into<String>, priority: u32) -> Self {
        Self {
            name: name.into(),
            brand: None,
            kind: None,
            active_ingredient: None,
            pack_size: None,
            price: None,
            image_url: None,
            application_rate: None,
            method: None,
            frequency: None,
            availability: None,
            priority,
            note: None,
        }
    }

    /// Case-insensitive name comparison used for duplicate detection.
    pub fn has_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.trim().to_lowercase()
    }
}

/// An inbound record as submitted by a caller. `priority` is signed so that a
/// negative value surfaces as a validation error instead of a decode failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordDraft {
    pub name: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub active_ingredient: Option<String>,
    #[serde(default)]
    pub pack_size: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub application_rate: Option<String>,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub frequency: Option<String>,
    #[serde(default)]
    pub availability: Option<String>,
    #[serde(default)]
    pub priority: Option<i64>,
    #[serde(default)]
    pub note: Option<String>,
}

impl RecordDraft {
    /// Check required fields and priority bounds, producing a storable Record.
    /// The name is trimmed; an absent priority becomes DEFAULT_PRIORITY.
    pub fn validate(self) -> Result<Record, ValidationError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }

        let priority = match self.priority {
            None => DEFAULT_PRIORITY,
            Some(p) if p < 0 => return Err(ValidationError::NegativePriority(p)),
            Some(p) => u32::try_from(p).map_err(|_| ValidationError::PriorityOutOfRange(p))?,
        };

        Ok(Record {
            name,
            brand: self.brand,
            kind: self.kind,
            active_ingredient: self.active_ingredient,
            pack_size: self.pack_size,
            price: self.price,
            image_url: self.image_url,
            application_rate: self.application_rate,
            method: self.method,
            frequency: self.frequency,
            availability: self.availability,
            priority,
            note: self.note,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str, priority: Option<i64>) -> RecordDraft {
        RecordDraft {
            name: name.to_string(),
            priority,
            ..Default::default()
        }
    }

    #[test]
    fn missing_priority_defaults_to_999() {
        let record = draft("Tricyclazole", None).validate().unwrap();
        assert_eq!(record.priority, DEFAULT_PRIORITY);
    }

    #[test]
    fn negative_priority_is_rejected() {
        let err = draft("Tricyclazole", Some(-1)).validate().unwrap_err();
        assert_eq!(err, ValidationError::NegativePriority(-1));
    }

    #[test]
    fn oversized_priority_is_rejected() {
        let err = draft("Tricyclazole", Some(i64::MAX)).validate().unwrap_err();
        assert_eq!(err, ValidationError::PriorityOutOfRange(i64::MAX));
    }

    #[test]
    fn blank_name_is_rejected() {
        assert_eq!(
            draft("   ", Some(1)).validate().unwrap_err(),
            ValidationError::EmptyName
        );
    }

    #[test]
    fn name_is_trimmed() {
        let record = draft("  Azoxystrobin ", Some(0)).validate().unwrap();
        assert_eq!(record.name, "Azoxystrobin");
        assert_eq!(record.priority, 0);
    }

    #[test]
    fn record_uses_type_as_json_key() {
        let json = serde_json::json!({
            "name": "Validamycin",
            "type": "Fungicide",
            "priority": 2
        });
        let record: Record = serde_json::from_value(json).unwrap();
        assert_eq!(record.kind.as_deref(), Some("Fungicide"));

        let back = serde_json::to_value(&record).unwrap();
        assert_eq!(back["type"], "Fungicide");
        assert!(back.get("kind").is_none());
    }

    #[test]
    fn stored_record_without_priority_loads_as_default() {
        let record: Record = serde_json::from_str(r#"{"name": "Carbendazim"}"#).unwrap();
        assert_eq!(record.priority, DEFAULT_PRIORITY);
        assert!(record.brand.is_none());
    }

    #[test]
    fn has_name_ignores_case() {
        let record = Record::new("Tricyclazole", 1);
        assert!(record.has_name("TRICYCLAZOLE"));
        assert!(record.has_name(" tricyclazole "));
        assert!(!record.has_name("Azoxystrobin"));
    }
}

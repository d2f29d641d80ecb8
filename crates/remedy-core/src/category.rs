// ABOUTME: Category key normalization shared by every keyed lookup.
// ABOUTME: Keys are trimmed and lower-cased so "Blast " and "blast" address the same ledger.

use crate::error::ValidationError;

/// Normalize a caller-supplied category key. Rejects keys that are empty
/// after trimming.
pub fn normalize_category(raw: &str) -> Result<String, ValidationError> {
    let key = raw.trim().to_lowercase();
    if key.is_empty() {
        return Err(ValidationError::EmptyCategory);
    }
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_lowercases() {
        assert_eq!(normalize_category("  Blast ").unwrap(), "blast");
        assert_eq!(
            normalize_category("Bacterial_Leaf_Blight").unwrap(),
            "bacterial_leaf_blight"
        );
    }

    #[test]
    fn rejects_blank_key() {
        assert_eq!(normalize_category("   "), Err(ValidationError::EmptyCategory));
        assert_eq!(normalize_category(""), Err(ValidationError::EmptyCategory));
    }
}

//! Search configuration module.
//!
//! Controls which product fields are indexed and how the two search tiers
//! behave.

use super::{ConfigResult, Validate};
use crate::catalog::IndexedField;
use crate::error::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Search configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Fields every product is indexed under, in insertion order
    pub indexed_fields: Vec<IndexedField>,

    /// Whether to fall back to a substring scan when no prefix matches
    pub substring_fallback: bool,

    /// Upper bound on returned products (None for unlimited)
    pub max_results: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            indexed_fields: IndexedField::defaults(),
            substring_fallback: true,
            max_results: None,
        }
    }
}

impl Validate for SearchConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.indexed_fields.is_empty() {
            return Err(ConfigError::ValidationError(
                "indexed_fields must name at least one field".to_string(),
            ));
        }

        for (i, field) in self.indexed_fields.iter().enumerate() {
            if self.indexed_fields[..i].contains(field) {
                return Err(ConfigError::ValidationError(format!(
                    "indexed field {field:?} listed more than once"
                )));
            }
        }

        if self.max_results == Some(0) {
            return Err(ConfigError::ValueOutOfRange {
                key: "search.max_results".to_string(),
                message: "must be greater than 0 when set".to_string(),
            });
        }

        Ok(())
    }
}

//! Display configuration for property fields.

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Labels and formats used when rendering property values.
///
/// Missing fields fall back to their defaults when deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Shown in place of blank text values.
    pub placeholder: String,
    /// `chrono` format string for set dates.
    pub date_format: String,
    /// Label of an unset date field.
    pub add_due_date_label: String,
    /// Label of an unset date field in compact layouts.
    pub due_date_label: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            placeholder: "Untitled".to_string(),
            date_format: "%b %d, %Y".to_string(),
            add_due_date_label: "Add due date".to_string(),
            due_date_label: "Due date".to_string(),
        }
    }
}

impl DisplayConfig {
    /// Loads a configuration from JSON, filling in defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that `date_format` only uses specifiers `chrono` knows.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(ConfigError::DateFormat {
                format: self.date_format.clone(),
            });
        }
        Ok(())
    }
}

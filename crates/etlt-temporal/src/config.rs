//! Field configuration for the type-2 helper.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Result, TemporalError};

/// Names of the interval and pseudo-key fields in the rows.
///
/// # Example
///
/// ```toml
/// start_field = "start_date"
/// end_field = "end_date"
/// pseudo_key = ["customer", "region"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Type2Config {
    /// Field holding the interval start.
    pub start_field: String,

    /// Field holding the interval end.
    pub end_field: String,

    /// Fields whose values group rows together.
    #[serde(default)]
    pub pseudo_key: Vec<String>,
}

impl Type2Config {
    pub fn new(start_field: impl Into<String>, end_field: impl Into<String>) -> Self {
        Self {
            start_field: start_field.into(),
            end_field: end_field.into(),
            pseudo_key: Vec::new(),
        }
    }

    /// Set the pseudo-key fields.
    #[must_use]
    pub fn with_pseudo_key<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pseudo_key = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Parse and validate a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| TemporalError::InvalidConfig {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a TOML file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| TemporalError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Check that the interval fields are named, distinct and not part of the pseudo key.
    pub fn validate(&self) -> Result<()> {
        if self.start_field.is_empty() || self.end_field.is_empty() {
            return Err(TemporalError::InvalidConfig {
                message: "start_field and end_field must not be empty".to_string(),
            });
        }
        if self.start_field == self.end_field {
            return Err(TemporalError::InvalidConfig {
                message: format!("start_field and end_field are both '{}'", self.start_field),
            });
        }
        if let Some(field) = self
            .pseudo_key
            .iter()
            .find(|field| **field == self.start_field || **field == self.end_field)
        {
            return Err(TemporalError::InvalidConfig {
                message: format!("interval field '{field}' cannot be part of the pseudo key"),
            });
        }
        Ok(())
    }

    /// Returns true for the primary start or end field.
    pub(crate) fn is_interval_field(&self, field: &str) -> bool {
        field == self.start_field || field == self.end_field
    }
}

//! Configuration for the normalization pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{InvogenError, Result};

/// Tunable policies for spreadsheet normalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseConfig {
    /// Read GST values strictly between 0 and 1 as fractional rates and
    /// scale them to percentages (0.18 becomes 18). Disable when the
    /// input genuinely carries sub-1% rates.
    pub normalize_fractional_gst: bool,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            normalize_fractional_gst: true,
        }
    }
}

impl ParseConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| InvogenError::Config(e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| InvogenError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ParseConfig::default();
        assert!(config.normalize_fractional_gst);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let config: ParseConfig = serde_json::from_str("{}").unwrap();
        assert!(config.normalize_fractional_gst);
    }
}

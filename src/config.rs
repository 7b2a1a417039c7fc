//! Engine configuration, loadable from JSON.
//!
//! Every field has a default, so `{}` is a valid configuration:
//!
//! ```json
//! {
//!   "default_currency": "đồng",
//!   "filler": "short",
//!   "four_form": "tu",
//!   "pool_slots": 64,
//!   "buffer_capacity": 128,
//!   "max_retained_capacity": 4096,
//!   "metrics": true
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::render::FillerStyle;
use crate::tables::lexicon::FourForm;

pub const DEFAULT_CURRENCY: &str = "đồng";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConverterConfig {
    /// Suffix used by [`convert_default`](crate::NumberConverter::convert_default).
    pub default_currency: String,
    pub filler: FillerStyle,
    pub four_form: FourForm,
    /// Slots in the scratch-buffer pool.
    pub pool_slots: usize,
    /// Initial capacity of a freshly allocated scratch buffer.
    pub buffer_capacity: usize,
    /// Buffers that grew past this are dropped instead of pooled.
    pub max_retained_capacity: usize,
    /// Record call/latency/error counters in `convert`.
    pub metrics: bool,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            default_currency: DEFAULT_CURRENCY.to_string(),
            filler: FillerStyle::default(),
            four_form: FourForm::default(),
            pool_slots: 64,
            buffer_capacity: 128,
            max_retained_capacity: 4096,
            metrics: true,
        }
    }
}

impl ConverterConfig {
    /// Parses and validates a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pool_slots == 0 {
            return Err(ConfigError::Invalid {
                field: "pool_slots",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.buffer_capacity > self.max_retained_capacity {
            return Err(ConfigError::Invalid {
                field: "buffer_capacity",
                reason: format!(
                    "{} exceeds max_retained_capacity {}",
                    self.buffer_capacity, self.max_retained_capacity
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_default() {
        let config = ConverterConfig::from_json_str("{}").unwrap();
        assert_eq!(config, ConverterConfig::default());
        assert_eq!(config.default_currency, "đồng");
    }

    #[test]
    fn partial_overrides() {
        let config = ConverterConfig::from_json_str(
            r#"{ "default_currency": "USD", "filler": "full", "four_form": "bon_above_units" }"#,
        )
        .unwrap();
        assert_eq!(config.default_currency, "USD");
        assert_eq!(config.filler, FillerStyle::Full);
        assert_eq!(config.four_form, FourForm::BonAboveUnits);
        assert_eq!(config.pool_slots, 64);
    }

    #[test]
    fn rejects_zero_slots() {
        let err = ConverterConfig::from_json_str(r#"{ "pool_slots": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "pool_slots", .. }));
    }

    #[test]
    fn rejects_capacity_above_retention() {
        let err = ConverterConfig::from_json_str(
            r#"{ "buffer_capacity": 512, "max_retained_capacity": 256 }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "buffer_capacity", .. }));
    }

    #[test]
    fn rejects_unknown_fields_and_bad_json() {
        assert!(matches!(
            ConverterConfig::from_json_str(r#"{ "port": 8080 }"#),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            ConverterConfig::from_json_str("not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}

//! Process-wide model configuration
//!
//! Builders consult a small set of switches while validating. The switches live in
//! atomics so that `build()` never takes a lock; [`ModelConfig::install`] publishes
//! a configuration document and [`ModelConfig::current`] reads it back.
//!
//! ```yaml
//! check_control_chars: true
//! check_reference_types: false
//! check_xhtml: true
//! ```

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};

static CHECK_CONTROL_CHARS: AtomicBool = AtomicBool::new(true);
static CHECK_REFERENCE_TYPES: AtomicBool = AtomicBool::new(true);
static CHECK_XHTML: AtomicBool = AtomicBool::new(true);

/// Validation switches applied by every builder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelConfig {
    /// Reject string values containing control characters below U+0020
    /// (other than tab, carriage return and line feed)
    pub check_control_chars: bool,

    /// Check that literal references point at one of the element's target types
    pub check_reference_types: bool,

    /// Check that narrative content is rooted in a `<div>` element
    pub check_xhtml: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            check_control_chars: true,
            check_reference_types: true,
            check_xhtml: true,
        }
    }
}

impl ModelConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Snapshot of the switches currently in effect
    pub fn current() -> Self {
        Self {
            check_control_chars: CHECK_CONTROL_CHARS.load(Ordering::Relaxed),
            check_reference_types: CHECK_REFERENCE_TYPES.load(Ordering::Relaxed),
            check_xhtml: CHECK_XHTML.load(Ordering::Relaxed),
        }
    }

    /// Publish this configuration for all subsequent builds
    pub fn install(self) {
        CHECK_CONTROL_CHARS.store(self.check_control_chars, Ordering::Relaxed);
        CHECK_REFERENCE_TYPES.store(self.check_reference_types, Ordering::Relaxed);
        CHECK_XHTML.store(self.check_xhtml, Ordering::Relaxed);
        tracing::info!(
            check_control_chars = self.check_control_chars,
            check_reference_types = self.check_reference_types,
            check_xhtml = self.check_xhtml,
            "installed model configuration"
        );
    }
}

pub(crate) fn check_control_chars() -> bool {
    CHECK_CONTROL_CHARS.load(Ordering::Relaxed)
}

pub(crate) fn check_reference_types() -> bool {
    CHECK_REFERENCE_TYPES.load(Ordering::Relaxed)
}

pub(crate) fn check_xhtml() -> bool {
    CHECK_XHTML.load(Ordering::Relaxed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_enable_every_check() {
        let config = ModelConfig::default();
        assert!(config.check_control_chars);
        assert!(config.check_reference_types);
        assert!(config.check_xhtml);
    }

    #[test]
    fn yaml_fills_missing_switches_with_defaults() {
        let config = ModelConfig::from_yaml_str("check_reference_types: false\n").unwrap();
        assert!(config.check_control_chars);
        assert!(!config.check_reference_types);
        assert!(config.check_xhtml);
    }

    #[test]
    fn json_round_trips() {
        let config = ModelConfig {
            check_control_chars: false,
            check_reference_types: true,
            check_xhtml: false,
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(ModelConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = ModelConfig::from_yaml_str("validate_everything: true\n").unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }
}

//! Installed configuration switches change what `build()` accepts.
//!
//! The switches are process-wide, so every test here holds `LOCK` and restores the
//! defaults before returning.

use ferrum_model::{Code, ModelConfig, Narrative, Observation, Xhtml};
use std::sync::{Mutex, MutexGuard};

mod test_support;
use test_support::*;

static LOCK: Mutex<()> = Mutex::new(());

fn guard() -> MutexGuard<'static, ()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("ferrum_model=debug")
        .with_test_writer()
        .try_init();
    LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

struct Restore;

impl Drop for Restore {
    fn drop(&mut self) {
        ModelConfig::default().install();
    }
}

#[test]
fn reference_type_checks_can_be_disabled() {
    let _lock = guard();
    let _restore = Restore;

    let practitioner_subject = || {
        Observation::builder()
            .status(Code::new("final").unwrap())
            .code(loinc("8867-4"))
            .subject(reference("Practitioner/p1"))
            .build()
    };
    assert!(practitioner_subject().is_err());

    ModelConfig::from_yaml_str("check_reference_types: false\n")
        .unwrap()
        .install();
    assert!(!ModelConfig::current().check_reference_types);
    assert!(practitioner_subject().is_ok());
}

#[test]
fn xhtml_checks_can_be_disabled() {
    let _lock = guard();
    let _restore = Restore;

    let narrative = || {
        Xhtml::new("<p>not a div</p>").and_then(|div| {
            Narrative::builder()
                .status(Code::new("generated").unwrap())
                .div(div)
                .build()
        })
    };
    assert!(narrative().is_err());

    ModelConfig::from_json_str(r#"{"check_xhtml": false}"#)
        .unwrap()
        .install();
    assert!(narrative().is_ok());
}

#[test]
fn control_characters_can_be_allowed() {
    let _lock = guard();
    let _restore = Restore;

    assert!(ferrum_model::FhirString::new("bell\u{7}").is_err());

    ModelConfig {
        check_control_chars: false,
        ..ModelConfig::default()
    }
    .install();
    assert!(ferrum_model::FhirString::new("bell\u{7}").is_ok());
}

#[test]
fn defaults_are_restored_after_each_test() {
    let _lock = guard();
    assert_eq!(ModelConfig::current(), ModelConfig::default());
}

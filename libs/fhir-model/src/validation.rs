//! Validation helpers shared by every builder
//!
//! Each `build()` runs its checks through these functions. Checks that take an
//! optional value return it again, so a builder can validate and move a field in
//! one expression:
//!
//! ```ignore
//! let code = validation::require(self.code, "code")?;
//! let value = validation::check_choice(self.value, "value", &OBSERVATION_VALUE_TYPES)?;
//! ```

use crate::choice::{is_resource_type, ChoiceType, ChoiceTypes};
use crate::config;
use crate::error::{Error, Result};
use crate::types::{Code, DataValue, Reference};
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

/// Maximum length of string and uri values, in characters
pub const MAX_STRING_LENGTH: usize = 1024 * 1024;

/// Maximum length of an id value
pub const MAX_ID_LENGTH: usize = 64;

const DATE: &str = r"^([0-9]([0-9]([0-9][1-9]|[1-9]0)|[1-9]00)|[1-9]000)(-(0[1-9]|1[0-2])(-(0[1-9]|[1-2][0-9]|3[0-1]))?)?$";
const DATE_TIME: &str = r"^([0-9]([0-9]([0-9][1-9]|[1-9]0)|[1-9]00)|[1-9]000)(-(0[1-9]|1[0-2])(-(0[1-9]|[1-2][0-9]|3[0-1])(T([01][0-9]|2[0-3]):[0-5][0-9]:([0-5][0-9]|60)(\.[0-9]+)?(Z|(\+|-)((0[0-9]|1[0-3]):[0-5][0-9]|14:00)))?)?)?$";
const INSTANT: &str = r"^([0-9]([0-9]([0-9][1-9]|[1-9]0)|[1-9]00)|[1-9]000)-(0[1-9]|1[0-2])-(0[1-9]|[1-2][0-9]|3[0-1])T([01][0-9]|2[0-3]):[0-5][0-9]:([0-5][0-9]|60)(\.[0-9]+)?(Z|(\+|-)((0[0-9]|1[0-3]):[0-5][0-9]|14:00))$";
const LITERAL_REFERENCE: &str =
    r"^([A-Z][A-Za-z]+)/[A-Za-z0-9\-.]{1,64}(/_history/[A-Za-z0-9\-.]{1,64})?$";

fn compiled(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("built-in pattern must compile"))
}

pub(crate) fn date_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    compiled(&RE, DATE)
}

pub(crate) fn date_time_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    compiled(&RE, DATE_TIME)
}

pub(crate) fn instant_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    compiled(&RE, INSTANT)
}

fn literal_reference_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    compiled(&RE, LITERAL_REFERENCE)
}

fn fail(field: &'static str, reason: String) -> Error {
    debug!(field, %reason, "validation failed");
    Error::invalid(field, reason)
}

/// Fails with [`Error::MissingRequiredField`] when the value is absent
pub fn require<T>(value: Option<T>, field: &'static str) -> Result<T> {
    match value {
        Some(value) => Ok(value),
        None => {
            debug!(field, "missing required element");
            Err(Error::MissingRequiredField { field })
        }
    }
}

/// Fails with [`Error::MissingRequiredField`] when a `1..*` list is empty
pub fn require_non_empty<T>(items: Vec<T>, field: &'static str) -> Result<Vec<T>> {
    if items.is_empty() {
        debug!(field, "missing required element");
        return Err(Error::MissingRequiredField { field });
    }
    Ok(items)
}

/// Checks an optional choice value against the element's allow-list
pub fn check_choice<T: ChoiceType>(
    value: Option<T>,
    field: &'static str,
    allowed: &ChoiceTypes,
) -> Result<Option<T>> {
    if let Some(v) = &value {
        let actual = v.type_name();
        if !allowed.contains(actual) {
            debug!(field, actual, "choice type not permitted");
            return Err(Error::InvalidChoiceType {
                field,
                actual,
                allowed: allowed.describe(),
            });
        }
    }
    Ok(value)
}

/// Like [`check_choice`] for `1..1` choice elements.
///
/// None of the shipped types has a required choice; generated types and profiles use it.
pub fn require_choice<T: ChoiceType>(
    value: Option<T>,
    field: &'static str,
    allowed: &ChoiceTypes,
) -> Result<T> {
    let value = require(value, field)?;
    check_choice(Some(value), field, allowed)?.ok_or(Error::MissingRequiredField { field })
}

/// Fails when an element that a profile forbids is present.
///
/// For constrained types built on top of this crate; the base types prohibit nothing.
pub fn prohibited<T>(value: Option<&T>, field: &'static str) -> Result<()> {
    match value {
        Some(_) => Err(fail(field, format!("Element: '{field}' is prohibited."))),
        None => Ok(()),
    }
}

/// Fails when a forbidden repeating element has any items. See [`prohibited`].
pub fn prohibited_list<T>(items: &[T], field: &'static str) -> Result<()> {
    if items.is_empty() {
        Ok(())
    } else {
        Err(fail(field, format!("Element: '{field}' is prohibited.")))
    }
}

/// Required binding: the code must be one of `allowed`
pub fn check_code_binding(code: &Code, field: &'static str, allowed: &[&str]) -> Result<()> {
    match code.as_str() {
        Some(value) if !allowed.contains(&value) => Err(fail(
            field,
            format!("Code value: '{value}' must be one of: {allowed:?}"),
        )),
        _ => Ok(()),
    }
}

/// ele-1: every element carries a value or at least one child
pub fn require_value_or_children(
    has_value: bool,
    has_children: bool,
    type_name: &'static str,
) -> Result<()> {
    if has_value || has_children {
        return Ok(());
    }
    Err(fail(
        type_name,
        "ele-1: All FHIR elements must have a @value or children".to_string(),
    ))
}

/// Unicode whitespace the way FHIR string rules count it (NEL and non-breaking spaces excluded)
fn is_whitespace(ch: char) -> bool {
    (ch.is_whitespace() && !matches!(ch, '\u{0085}' | '\u{00A0}' | '\u{2007}' | '\u{202F}'))
        || ('\u{001C}'..='\u{001F}').contains(&ch)
}

fn is_unsupported_control(ch: char) -> bool {
    ch < '\u{0020}' && !matches!(ch, '\t' | '\n' | '\r')
}

fn check_control(value: &str, ch: char, field: &'static str) -> Result<()> {
    if config::check_control_chars() && is_unsupported_control(ch) {
        return Err(fail(
            field,
            format!(
                "String value contains unsupported control characters: decimal range=[0000-0008,0011,0012,0014-0031] value=[{value}]"
            ),
        ));
    }
    Ok(())
}

/// `string`: at least one non-whitespace character, only space/tab/CR/LF as whitespace
pub fn check_string(value: &str, field: &'static str) -> Result<()> {
    check_max_length(value, field)?;
    let mut count = 0;
    for ch in value.chars() {
        if !is_whitespace(ch) {
            check_control(value, ch, field)?;
            count += 1;
        } else if !matches!(ch, ' ' | '\t' | '\r' | '\n') {
            return Err(fail(
                field,
                format!("String value: '{value}' is not valid with respect to pattern: [\\r\\n\\t\\S]+"),
            ));
        }
    }
    if count == 0 {
        return Err(fail(
            field,
            "Trimmed String value length: 0 is less than minimum required length: 1".to_string(),
        ));
    }
    Ok(())
}

/// `code`: no leading or trailing whitespace, inner whitespace only as single spaces
pub fn check_code(value: &str, field: &'static str) -> Result<()> {
    match value.chars().next() {
        Some(first) if !is_whitespace(first) => {}
        _ => {
            return Err(fail(
                field,
                format!("Code value: '{value}' must begin with a non-whitespace character"),
            ))
        }
    }
    if value.chars().next_back().is_some_and(is_whitespace) {
        return Err(fail(
            field,
            format!("Code value: '{value}' must end with a non-whitespace character"),
        ));
    }
    let mut previous_is_space = false;
    for ch in value.chars() {
        if is_whitespace(ch) {
            if ch != ' ' {
                return Err(fail(
                    field,
                    format!("Code value: '{value}' must not contain whitespace other than a single space"),
                ));
            }
            if previous_is_space {
                return Err(fail(
                    field,
                    format!("Code value: '{value}' must not contain consecutive spaces"),
                ));
            }
            previous_is_space = true;
        } else {
            check_control(value, ch, field)?;
            previous_is_space = false;
        }
    }
    Ok(())
}

/// `id`: 1 to 64 characters from `[A-Za-z0-9\-.]`
pub fn check_id(value: &str, field: &'static str) -> Result<()> {
    if value.is_empty() {
        return Err(fail(field, "Id value must not be empty".to_string()));
    }
    let length = value.chars().count();
    if length > MAX_ID_LENGTH {
        return Err(fail(
            field,
            format!("Id value length: {length} is greater than maximum allowed length: {MAX_ID_LENGTH}"),
        ));
    }
    if let Some(ch) = value
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '.'))
    {
        return Err(fail(
            field,
            format!("Id value: '{value}' contain invalid character '{ch}'"),
        ));
    }
    Ok(())
}

/// `uri`: no whitespace, no unsupported control characters
pub fn check_uri(value: &str, field: &'static str) -> Result<()> {
    check_max_length(value, field)?;
    for ch in value.chars() {
        check_control(value, ch, field)?;
        if is_whitespace(ch) {
            return Err(fail(
                field,
                format!("Uri value: '{value}' must not contain whitespace"),
            ));
        }
    }
    Ok(())
}

pub fn check_max_length(value: &str, field: &'static str) -> Result<()> {
    // byte length bounds the char count, so only count when it could matter
    if value.len() > MAX_STRING_LENGTH {
        let length = value.chars().count();
        if length > MAX_STRING_LENGTH {
            return Err(fail(
                field,
                format!(
                    "String value length: {length} is greater than maximum allowed length: {MAX_STRING_LENGTH}"
                ),
            ));
        }
    }
    Ok(())
}

pub fn check_min_value(value: i32, min: i32, field: &'static str) -> Result<()> {
    if value < min {
        return Err(fail(
            field,
            format!("Integer value: {value} is less than minimum required value: {min}"),
        ));
    }
    Ok(())
}

pub fn check_pattern(value: &str, pattern: &Regex, field: &'static str) -> Result<()> {
    if !pattern.is_match(value) {
        return Err(fail(
            field,
            format!(
                "String value: '{value}' is not valid with respect to pattern: {}",
                pattern.as_str()
            ),
        ));
    }
    Ok(())
}

/// Narrative content must be a single `<div>` root element.
///
/// Only the envelope is checked; full XHTML schema validation is out of scope.
pub fn check_xhtml(value: &str, field: &'static str) -> Result<()> {
    if !config::check_xhtml() {
        return Ok(());
    }
    let trimmed = value.trim();
    let opens_div = trimmed
        .strip_prefix("<div")
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c == '>' || c == '/' || c.is_whitespace());
    let closes = trimmed.ends_with("</div>") || trimmed.ends_with("/>");
    if !(opens_div && closes) {
        return Err(fail(
            field,
            "Invalid XHTML content: narrative must be rooted in a <div> element".to_string(),
        ));
    }
    Ok(())
}

/// A prefix followed by `:` and a non-empty remainder (`urn:uuid:...`, `http://...`)
fn has_scheme(value: &str) -> bool {
    value
        .find(':')
        .is_some_and(|i| i > 0 && value.len() > i + 1)
}

fn describe_targets(targets: &[&str]) -> String {
    format!("[{}]", targets.join(", "))
}

/// Checks that a Reference points at one of the element's target resource types.
///
/// Relative literal references (`Patient/123`, `Patient/123/_history/2`) and conditional
/// references (`Patient?identifier=...`) must name an allowed type. Fragments (`#p1`)
/// and values with a scheme (absolute URLs, URNs) are not checked. An explicit
/// `Reference.type` must be an allowed type and agree with the literal reference.
/// An empty `targets` slice means any resource type.
pub fn check_reference_type(
    reference: Option<&Reference>,
    field: &'static str,
    targets: &[&str],
) -> Result<()> {
    let Some(reference) = reference else {
        return Ok(());
    };
    if !config::check_reference_types() {
        return Ok(());
    }
    let allowed = |name: &str| targets.is_empty() || targets.contains(&name);

    let mut resource_type = None;
    if let Some(literal) = reference.reference().and_then(|r| r.value()) {
        if !literal.starts_with('#') && !has_scheme(literal) {
            let found = match literal.find('?') {
                Some(i) => Some(&literal[..i]),
                None => literal_reference_regex()
                    .captures(literal)
                    .and_then(|c| c.get(1))
                    .map(|m| m.as_str()),
            };
            let Some(found) = found else {
                return Err(fail(
                    field,
                    format!("Invalid reference value or resource type not found in reference value: '{literal}' for element: '{field}'"),
                ));
            };
            if !is_resource_type(found) {
                return Err(fail(
                    field,
                    format!("Resource type found in reference value: '{literal}' for element: '{field}' must be a valid resource type name"),
                ));
            }
            if !allowed(found) {
                return Err(fail(
                    field,
                    format!(
                        "Resource type found in reference value: '{literal}' for element: '{field}' must be one of: {}",
                        describe_targets(targets)
                    ),
                ));
            }
            resource_type = Some(found);
        }
    }

    if let Some(declared) = reference.type_().and_then(|t| t.value()) {
        if !is_resource_type(declared) {
            return Err(fail(
                field,
                format!("Resource type found in Reference.type: '{declared}' for element: '{field}' must be a valid resource type name"),
            ));
        }
        if !allowed(declared) {
            return Err(fail(
                field,
                format!(
                    "Resource type found in Reference.type: '{declared}' for element: '{field}' must be one of: {}",
                    describe_targets(targets)
                ),
            ));
        }
        if let Some(found) = resource_type {
            if found != declared {
                return Err(fail(
                    field,
                    format!("Resource type found in reference value: '{found}' for element: '{field}' does not match Reference.type: {declared}"),
                ));
            }
        }
    }
    Ok(())
}

/// [`check_reference_type`] over every item of a repeating element
pub fn check_reference_types(
    references: &[Reference],
    field: &'static str,
    targets: &[&str],
) -> Result<()> {
    references
        .iter()
        .try_for_each(|r| check_reference_type(Some(r), field, targets))
}

/// [`check_reference_type`] for a choice element that currently holds a Reference
pub fn check_reference_choice(
    value: Option<&DataValue>,
    field: &'static str,
    targets: &[&str],
) -> Result<()> {
    match value {
        Some(DataValue::Reference(reference)) => {
            check_reference_type(Some(reference), field, targets)
        }
        _ => Ok(()),
    }
}

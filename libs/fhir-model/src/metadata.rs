//! Field contract metadata
//!
//! Every model type publishes its element list through [`ModelType::fields`], in the
//! same order the visitor walks it (inherited elements first). Generic tooling uses
//! this instead of runtime reflection.

use crate::choice::ChoiceTypes;
use serde::Serialize;
use std::fmt;

/// Kind of model type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TypeKind {
    /// Primitive data type (e.g., string, boolean)
    PrimitiveType,
    /// Complex data type (e.g., Coding, Reference)
    ComplexType,
    /// Backbone element declared inside a resource
    BackboneElement,
    /// Resource
    Resource,
}

/// Cardinality of an element (min..max)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Cardinality {
    /// Minimum occurrences
    pub min: u32,
    /// Maximum occurrences (None means unbounded/*)
    pub max: Option<u32>,
}

impl Cardinality {
    pub const OPTIONAL: Cardinality = Cardinality::new(0, Some(1));
    pub const REQUIRED: Cardinality = Cardinality::new(1, Some(1));
    pub const LIST: Cardinality = Cardinality::new(0, None);
    pub const NON_EMPTY_LIST: Cardinality = Cardinality::new(1, None);

    pub const fn new(min: u32, max: Option<u32>) -> Self {
        Self { min, max }
    }

    /// Check if this element is a list
    pub fn is_repeating(&self) -> bool {
        self.max.map(|m| m > 1).unwrap_or(true)
    }

    pub fn is_optional(&self) -> bool {
        self.min == 0
    }

    pub fn is_required(&self) -> bool {
        self.min > 0
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(max) => write!(f, "{}..{}", self.min, max),
            None => write!(f, "{}..*", self.min),
        }
    }
}

/// How an element's value is represented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldKind {
    /// Plain Rust value reported through `Visitor::visit_value` (ids, urls, primitive values)
    Value,
    /// Primitive data type element
    Primitive,
    /// Complex data type element
    Complex,
    /// Backbone element
    Backbone,
    /// Contained or nested resource
    Resource,
    /// Choice element (`value[x]`)
    Choice,
}

/// Metadata describing one element of a model type
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FieldInfo {
    /// Element name as it appears in FHIR (e.g., "implicitRules", "value")
    pub name: &'static str,
    /// Type names this element may hold; more than one for choice elements
    pub types: &'static [&'static str],
    /// Type that declares the element ("Element", "Resource", "Observation", ...)
    pub declared_by: &'static str,
    pub cardinality: Cardinality,
    pub kind: FieldKind,
    /// Allow-list for choice elements
    #[serde(skip)]
    pub choice: Option<&'static ChoiceTypes>,
    /// Allowed target resource types for Reference elements; empty means any
    pub reference_targets: &'static [&'static str],
    /// **Modifier element**
    pub is_modifier: bool,
    /// Included in summary views
    pub is_summary: bool,
}

impl FieldInfo {
    pub const fn new(
        name: &'static str,
        types: &'static [&'static str],
        declared_by: &'static str,
        cardinality: Cardinality,
        kind: FieldKind,
    ) -> Self {
        Self {
            name,
            types,
            declared_by,
            cardinality,
            kind,
            choice: None,
            reference_targets: &[],
            is_modifier: false,
            is_summary: false,
        }
    }

    pub const fn choice(
        name: &'static str,
        declared_by: &'static str,
        cardinality: Cardinality,
        allowed: &'static ChoiceTypes,
    ) -> Self {
        Self {
            choice: Some(allowed),
            ..Self::new(name, allowed.ordered, declared_by, cardinality, FieldKind::Choice)
        }
    }

    pub const fn references(mut self, targets: &'static [&'static str]) -> Self {
        self.reference_targets = targets;
        self
    }

    pub const fn modifier(mut self) -> Self {
        self.is_modifier = true;
        self
    }

    pub const fn summary(mut self) -> Self {
        self.is_summary = true;
        self
    }

    pub fn is_required(&self) -> bool {
        self.cardinality.is_required()
    }

    pub fn is_repeating(&self) -> bool {
        self.cardinality.is_repeating()
    }

    pub fn is_choice(&self) -> bool {
        self.choice.is_some()
    }
}

/// Static description of a model type
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TypeInfo {
    pub name: &'static str,
    pub kind: TypeKind,
    /// Base type in the FHIR hierarchy ("Element", "BackboneElement", "DomainResource", ...)
    pub base: Option<&'static str>,
    pub fields: &'static [FieldInfo],
}

impl TypeInfo {
    pub fn field(&self, name: &str) -> Option<&'static FieldInfo> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &'static FieldInfo> {
        self.fields.iter().filter(|f| f.is_required())
    }

    pub fn choice_fields(&self) -> impl Iterator<Item = &'static FieldInfo> {
        self.fields.iter().filter(|f| f.is_choice())
    }

    /// Whether the element is declared by this type rather than inherited
    pub fn declares(&self, name: &str) -> bool {
        self.field(name).is_some_and(|f| f.declared_by == self.name)
    }
}

/// Implemented by every concrete model type
pub trait ModelType {
    const TYPE_NAME: &'static str;
    const KIND: TypeKind;

    fn type_info() -> &'static TypeInfo;

    fn fields() -> &'static [FieldInfo] {
        Self::type_info().fields
    }
}

/// Element lists shared by the base types, reused in every concrete type's field table
pub mod base_fields {
    use super::{Cardinality, FieldInfo, FieldKind};

    pub const ELEMENT_ID: FieldInfo =
        FieldInfo::new("id", &["string"], "Element", Cardinality::OPTIONAL, FieldKind::Value);
    pub const ELEMENT_EXTENSION: FieldInfo = FieldInfo::new(
        "extension",
        &["Extension"],
        "Element",
        Cardinality::LIST,
        FieldKind::Complex,
    );
    pub const MODIFIER_EXTENSION: FieldInfo = FieldInfo::new(
        "modifierExtension",
        &["Extension"],
        "BackboneElement",
        Cardinality::LIST,
        FieldKind::Complex,
    )
    .modifier()
    .summary();

    pub const RESOURCE_ID: FieldInfo =
        FieldInfo::new("id", &["id"], "Resource", Cardinality::OPTIONAL, FieldKind::Value)
            .summary();
    pub const RESOURCE_META: FieldInfo =
        FieldInfo::new("meta", &["Meta"], "Resource", Cardinality::OPTIONAL, FieldKind::Complex)
            .summary();
    pub const RESOURCE_IMPLICIT_RULES: FieldInfo = FieldInfo::new(
        "implicitRules",
        &["uri"],
        "Resource",
        Cardinality::OPTIONAL,
        FieldKind::Primitive,
    )
    .modifier()
    .summary();
    pub const RESOURCE_LANGUAGE: FieldInfo = FieldInfo::new(
        "language",
        &["code"],
        "Resource",
        Cardinality::OPTIONAL,
        FieldKind::Primitive,
    );

    pub const DOMAIN_TEXT: FieldInfo = FieldInfo::new(
        "text",
        &["Narrative"],
        "DomainResource",
        Cardinality::OPTIONAL,
        FieldKind::Complex,
    );
    pub const DOMAIN_CONTAINED: FieldInfo = FieldInfo::new(
        "contained",
        &["Resource"],
        "DomainResource",
        Cardinality::LIST,
        FieldKind::Resource,
    );
    pub const DOMAIN_EXTENSION: FieldInfo = FieldInfo::new(
        "extension",
        &["Extension"],
        "DomainResource",
        Cardinality::LIST,
        FieldKind::Complex,
    );
    pub const DOMAIN_MODIFIER_EXTENSION: FieldInfo = FieldInfo::new(
        "modifierExtension",
        &["Extension"],
        "DomainResource",
        Cardinality::LIST,
        FieldKind::Complex,
    )
    .modifier();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cardinality_display() {
        assert_eq!(Cardinality::OPTIONAL.to_string(), "0..1");
        assert_eq!(Cardinality::REQUIRED.to_string(), "1..1");
        assert_eq!(Cardinality::LIST.to_string(), "0..*");
        assert_eq!(Cardinality::NON_EMPTY_LIST.to_string(), "1..*");
    }

    #[test]
    fn cardinality_predicates() {
        assert!(Cardinality::LIST.is_repeating());
        assert!(!Cardinality::REQUIRED.is_repeating());
        assert!(Cardinality::NON_EMPTY_LIST.is_required());
        assert!(Cardinality::OPTIONAL.is_optional());
    }

    #[test]
    fn base_fields_flags() {
        assert!(base_fields::MODIFIER_EXTENSION.is_modifier);
        assert!(base_fields::RESOURCE_IMPLICIT_RULES.is_modifier);
        assert!(!base_fields::ELEMENT_EXTENSION.is_modifier);
        assert_eq!(base_fields::DOMAIN_CONTAINED.kind, FieldKind::Resource);
    }
}

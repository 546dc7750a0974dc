//! Immutable FHIR object model
//!
//! Strongly-typed, immutable representations of FHIR R4 data types and resources,
//! constructed through consuming builders that enforce cardinality, choice-type and
//! reference-target constraints at `build()` time.
//!
//! # Module Organization
//!
//! - `base`: Element / BackboneElement / Resource / DomainResource composition and traits
//! - `types`: Primitive and complex data types
//! - `resources`: Concrete resources and [`AnyResource`]
//! - `choice`: Allow-lists for choice elements (`value[x]`)
//! - `validation`: Checks shared by every `build()`
//! - `visitor`: Depth-first traversal
//! - `metadata`: Static field contracts for generic tooling
//! - `config`: Process-wide validation switches
//!
//! # Example
//!
//! ```rust
//! use ferrum_model::prelude::*;
//! use ferrum_model::{Code, CodeableConcept, Coding, Observation, Uri};
//!
//! let code = CodeableConcept::builder()
//!     .coding([Coding::builder()
//!         .system(Uri::new("http://loinc.org")?)
//!         .code(Code::new("8867-4")?)
//!         .build()?])
//!     .build()?;
//!
//! let observation = Observation::builder()
//!     .id("heart-rate")
//!     .status(Code::new("final")?)
//!     .code(code)
//!     .build()?;
//!
//! assert_eq!(observation.id(), Some("heart-rate"));
//! let updated = observation.to_builder().status(Code::new("amended")?).build()?;
//! assert_ne!(observation, updated);
//! # Ok::<(), ferrum_model::Error>(())
//! ```

pub mod base;
pub mod choice;
pub mod config;
pub mod error;
mod hash;
pub mod metadata;
pub mod resources;
pub mod types;
pub mod validation;
pub mod visitor;

pub use base::{
    BackboneElement, BackboneElementBase, BackboneElementBuilder, DomainResource,
    DomainResourceBase, DomainResourceBuilder, Element, ElementBase, ElementBuilder,
    HasExtensions, HasModifierExtensions, Resource, ResourceBase, ResourceBuilder,
};
pub use choice::{ChoiceType, ChoiceTypes};
pub use config::ModelConfig;
pub use error::{Error, Result};
pub use metadata::{Cardinality, FieldInfo, FieldKind, ModelType, TypeInfo, TypeKind};
pub use resources::*;
pub use types::*;
pub use visitor::{collect, CollectingVisitor, Node, PathVisitor, Visitable, Visitor};

/// Traits needed to call inherited accessors and setters
pub mod prelude {
    pub use crate::base::{
        BackboneElement, BackboneElementBuilder, DomainResource, DomainResourceBuilder, Element,
        ElementBuilder, HasExtensions, HasModifierExtensions, Resource, ResourceBuilder,
    };
    pub use crate::metadata::ModelType;
    pub use crate::visitor::{Visitable, Visitor};
}

type InfoFn = fn() -> &'static TypeInfo;

static TYPE_INFOS: phf::Map<&'static str, InfoFn> = phf::phf_map! {
    "boolean" => <Boolean as ModelType>::type_info as InfoFn,
    "integer" => <Integer as ModelType>::type_info as InfoFn,
    "positiveInt" => <PositiveInt as ModelType>::type_info as InfoFn,
    "decimal" => <FhirDecimal as ModelType>::type_info as InfoFn,
    "string" => <FhirString as ModelType>::type_info as InfoFn,
    "uri" => <Uri as ModelType>::type_info as InfoFn,
    "code" => <Code as ModelType>::type_info as InfoFn,
    "id" => <Id as ModelType>::type_info as InfoFn,
    "date" => <Date as ModelType>::type_info as InfoFn,
    "dateTime" => <DateTime as ModelType>::type_info as InfoFn,
    "instant" => <Instant as ModelType>::type_info as InfoFn,
    "xhtml" => <Xhtml as ModelType>::type_info as InfoFn,
    "Extension" => <Extension as ModelType>::type_info as InfoFn,
    "Coding" => <Coding as ModelType>::type_info as InfoFn,
    "CodeableConcept" => <CodeableConcept as ModelType>::type_info as InfoFn,
    "Identifier" => <Identifier as ModelType>::type_info as InfoFn,
    "Reference" => <Reference as ModelType>::type_info as InfoFn,
    "Period" => <Period as ModelType>::type_info as InfoFn,
    "Quantity" => <Quantity as ModelType>::type_info as InfoFn,
    "Meta" => <Meta as ModelType>::type_info as InfoFn,
    "Narrative" => <Narrative as ModelType>::type_info as InfoFn,
    "Annotation" => <Annotation as ModelType>::type_info as InfoFn,
    "Basic" => <Basic as ModelType>::type_info as InfoFn,
    "Observation" => <Observation as ModelType>::type_info as InfoFn,
    "Observation.component" => <ObservationComponent as ModelType>::type_info as InfoFn,
    "Parameters" => <Parameters as ModelType>::type_info as InfoFn,
    "Parameters.parameter" => <ParametersParameter as ModelType>::type_info as InfoFn,
};

/// Field contract of a modelled type by FHIR name ("Observation", "dateTime", ...)
pub fn type_info(name: &str) -> Option<&'static TypeInfo> {
    TYPE_INFOS.get(name).map(|info| info())
}

/// Names of every modelled type
pub fn type_names() -> impl Iterator<Item = &'static str> {
    TYPE_INFOS.keys().copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_resolves_every_name_to_its_own_info() {
        for name in type_names() {
            let info = type_info(name).unwrap();
            assert_eq!(info.name, name);
        }
        assert!(type_info("Patient").is_none());
    }

    #[test]
    fn resources_list_inherited_fields_first() {
        let info = type_info("Observation").unwrap();
        assert_eq!(info.kind, TypeKind::Resource);
        let names: Vec<_> = info.fields.iter().map(|f| f.name).collect();
        assert_eq!(&names[..4], &["id", "meta", "implicitRules", "language"]);
        assert!(info.declares("status"));
        assert!(!info.declares("text"));
        assert!(info.field("status").unwrap().is_modifier);
    }

    #[test]
    fn choice_fields_expose_their_allow_list() {
        let info = Observation::type_info();
        let value = info.field("value").unwrap();
        assert!(value.is_choice());
        assert!(value.choice.unwrap().contains("Quantity"));
        assert_eq!(value.types.len(), 11);

        let choices: Vec<_> = info.choice_fields().map(|f| f.name).collect();
        assert_eq!(choices, ["effective", "value"]);
    }

    #[test]
    fn required_fields_match_builder_checks() {
        let required: Vec<_> = Basic::type_info().required_fields().map(|f| f.name).collect();
        assert_eq!(required, ["code"]);
        let required: Vec<_> = Narrative::type_info().required_fields().map(|f| f.name).collect();
        assert_eq!(required, ["status", "div"]);
    }
}

//! FHIR data types
//!
//! Primitive types share the generic [`Primitive`] representation; complex types are
//! one struct each with a matching builder. All of them derive from `Element`.

mod annotation;
mod codeable_concept;
mod coding;
mod data_value;
mod extension;
mod identifier;
mod meta;
mod narrative;
mod period;
mod primitive;
mod quantity;
mod reference;

pub use annotation::{Annotation, AnnotationBuilder};
pub use codeable_concept::{CodeableConcept, CodeableConceptBuilder};
pub use coding::{Coding, CodingBuilder};
pub use data_value::DataValue;
pub use extension::{Extension, ExtensionBuilder};
pub use identifier::{Identifier, IdentifierBuilder};
pub use meta::{Meta, MetaBuilder};
pub use narrative::{Narrative, NarrativeBuilder};
pub use period::{Period, PeriodBuilder};
pub use primitive::{
    Boolean, BooleanKind, Code, CodeKind, Date, DateKind, DateTime, DateTimeKind, DecimalKind,
    FhirDecimal, FhirString, Id, IdKind, Instant, InstantKind, Integer, IntegerKind, PositiveInt,
    PositiveIntKind, Primitive, PrimitiveBuilder, PrimitiveKind, StringKind, Uri, UriKind, Xhtml,
    XhtmlKind,
};
pub use quantity::{Quantity, QuantityBuilder};
pub use reference::{Reference, ReferenceBuilder};

#![allow(dead_code)]

use ferrum_model::prelude::*;
use ferrum_model::{
    Basic, Code, CodeableConcept, Coding, FhirDecimal, FhirString, Identifier, Observation,
    ObservationBuilder, Quantity, Reference, Uri,
};
use rust_decimal::Decimal;

pub fn coding(system: &str, code: &str) -> Coding {
    Coding::builder()
        .system(Uri::new(system).unwrap())
        .code(Code::new(code).unwrap())
        .build()
        .unwrap()
}

pub fn concept(system: &str, code: &str) -> CodeableConcept {
    CodeableConcept::builder()
        .coding([coding(system, code)])
        .build()
        .unwrap()
}

pub fn loinc(code: &str) -> CodeableConcept {
    concept("http://loinc.org", code)
}

pub fn identifier(system: &str, value: &str) -> Identifier {
    Identifier::builder()
        .system(Uri::new(system).unwrap())
        .value(FhirString::new(value).unwrap())
        .build()
        .unwrap()
}

pub fn reference(value: &str) -> Reference {
    Reference::builder()
        .reference(FhirString::new(value).unwrap())
        .build()
        .unwrap()
}

pub fn quantity(value: i64, unit: &str) -> Quantity {
    Quantity::builder()
        .value(FhirDecimal::new(Decimal::new(value, 0)).unwrap())
        .unit(FhirString::new(unit).unwrap())
        .build()
        .unwrap()
}

pub fn heart_rate() -> ObservationBuilder {
    Observation::builder()
        .id("heart-rate")
        .status(Code::new("final").unwrap())
        .code(loinc("8867-4"))
        .subject(reference("Patient/example"))
        .value(quantity(72, "beats/minute"))
}

pub fn basic_with_two_identifiers() -> Basic {
    Basic::builder()
        .identifier([identifier("urn:sys", "first")])
        .identifier([identifier("urn:sys", "second")])
        .code(concept("http://example.org/basic", "note"))
        .build()
        .unwrap()
}

//! Builder round trips, required elements and choice elements across the model

use ferrum_model::prelude::*;
use ferrum_model::{
    AnyResource, Basic, Boolean, Code, DataValue, DateTime, Error, Extension, FhirString, Meta,
    Narrative, Observation, ObservationBuilder, ObservationComponent, Parameters,
    ParametersParameter, Period, Uri, Xhtml,
};

mod test_support;
use test_support::*;

#[test]
fn to_builder_round_trip_is_equal() {
    let observation = heart_rate()
        .meta(
            Meta::builder()
                .profile([Uri::new("http://example.org/StructureDefinition/hr").unwrap()])
                .build()
                .unwrap(),
        )
        .text(
            Narrative::builder()
                .status(Code::new("generated").unwrap())
                .div(Xhtml::new("<div xmlns=\"http://www.w3.org/1999/xhtml\">72 bpm</div>").unwrap())
                .build()
                .unwrap(),
        )
        .category([concept(
            "http://terminology.hl7.org/CodeSystem/observation-category",
            "vital-signs",
        )])
        .build()
        .unwrap();

    let rebuilt = observation.to_builder().build().unwrap();
    assert_eq!(rebuilt, observation);
    assert_eq!(rebuilt.hash_code(), observation.hash_code());

    let moved = ObservationBuilder::from(observation.clone()).build().unwrap();
    assert_eq!(moved, observation);
}

#[test]
fn to_builder_leaves_the_original_untouched() {
    let original = heart_rate().build().unwrap();
    let amended = original
        .to_builder()
        .status(Code::new("amended").unwrap())
        .build()
        .unwrap();

    assert_eq!(original.status().as_str(), Some("final"));
    assert_eq!(amended.status().as_str(), Some("amended"));
    assert_ne!(original, amended);
}

#[test]
fn setting_an_optional_scalar_to_none_clears_it() {
    let observation = heart_rate().build().unwrap();
    assert!(observation.subject().is_some());
    let cleared = observation.to_builder().subject(None).build().unwrap();
    assert!(cleared.subject().is_none());
}

#[test]
fn builder_call_order_does_not_matter() {
    let a = Observation::builder()
        .status(Code::new("final").unwrap())
        .code(loinc("8867-4"))
        .value(quantity(60, "beats/minute"))
        .build()
        .unwrap();
    let b = Observation::builder()
        .value(quantity(60, "beats/minute"))
        .code(loinc("8867-4"))
        .status(Code::new("final").unwrap())
        .build()
        .unwrap();
    assert_eq!(a, b);
    assert_eq!(a.hash_code(), b.hash_code());
}

#[test]
fn missing_required_elements_name_the_element() {
    let err = Observation::builder()
        .status(Code::new("final").unwrap())
        .build()
        .unwrap_err();
    assert_eq!(err, Error::MissingRequiredField { field: "code" });
    assert_eq!(err.to_string(), "Missing required element: 'code'");

    let err = Basic::builder().build().unwrap_err();
    assert_eq!(err.field(), Some("code"));

    let err = ObservationComponent::builder().build().unwrap_err();
    assert_eq!(err.field(), Some("code"));

    let err = ParametersParameter::builder().build().unwrap_err();
    assert_eq!(err.field(), Some("name"));

    let err = Extension::builder("").build().unwrap_err();
    assert_eq!(err, Error::MissingRequiredField { field: "url" });
}

#[test]
fn choice_elements_accept_and_reject_by_type() {
    let observation = heart_rate()
        .effective(DateTime::new("2024-03-01T10:15:00Z").unwrap())
        .build()
        .unwrap();
    assert_eq!(observation.effective().unwrap().type_name(), "dateTime");
    assert!(matches!(observation.value(), Some(DataValue::Quantity(_))));

    let err = heart_rate()
        .effective(Boolean::new(true).unwrap())
        .build()
        .unwrap_err();
    match err {
        Error::InvalidChoiceType { field, actual, allowed } => {
            assert_eq!(field, "effective");
            assert_eq!(actual, "boolean");
            assert_eq!(allowed, "[dateTime, Period, Timing, instant]");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn extension_value_uses_the_open_type_list() {
    let ext = Extension::builder("http://example.org/period")
        .value(
            Period::builder()
                .start(DateTime::new("2024").unwrap())
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();
    assert_eq!(ext.value().unwrap().type_name(), "Period");

    let with_meta = Extension::builder("http://example.org/meta")
        .value(
            Meta::builder()
                .version_id(ferrum_model::Id::new("1").unwrap())
                .build()
                .unwrap(),
        )
        .build();
    assert!(with_meta.is_ok());
}

#[test]
fn list_getters_expose_slices_in_append_order() {
    let basic = basic_with_two_identifiers();
    let values: Vec<_> = basic
        .identifier()
        .iter()
        .map(|i| i.value().and_then(|v| v.as_str()).unwrap())
        .collect();
    assert_eq!(values, ["first", "second"]);

    let replaced = basic
        .to_builder()
        .set_identifier([identifier("urn:sys", "only")])
        .build()
        .unwrap();
    assert_eq!(replaced.identifier().len(), 1);
    assert_eq!(basic.identifier().len(), 2);
}

#[test]
fn inherited_setters_work_on_every_builder() {
    let flag = Extension::builder("http://example.org/flag")
        .value(Boolean::new(true).unwrap())
        .build()
        .unwrap();

    let component = ObservationComponent::builder()
        .id("c1")
        .extension([flag.clone()])
        .modifier_extension([flag.clone()])
        .code(loinc("8480-6"))
        .build()
        .unwrap();
    assert_eq!(component.id(), Some("c1"));
    assert!(component.has_extension("http://example.org/flag"));
    assert!(component.has_modifier_extension("http://example.org/flag"));

    let observation = heart_rate()
        .language(Code::new("en").unwrap())
        .implicit_rules(Uri::new("http://example.org/rules").unwrap())
        .extension([flag.clone()])
        .modifier_extension([flag])
        .component([component])
        .build()
        .unwrap();
    assert_eq!(observation.language().and_then(|c| c.as_str()), Some("en"));
    assert_eq!(observation.extension().len(), 1);
    assert_eq!(observation.modifier_extension().len(), 1);
    assert_eq!(observation.component().len(), 1);
}

#[test]
fn contained_resources_are_addressable_by_fragment() {
    let patient_note = Basic::builder()
        .id("note")
        .code(concept("http://example.org/basic", "note"))
        .build()
        .unwrap();
    let observation = heart_rate()
        .contained([AnyResource::from(patient_note)])
        .note([ferrum_model::Annotation::builder()
            .text(FhirString::new("see contained").unwrap())
            .build()
            .unwrap()])
        .build()
        .unwrap();

    let found = observation.find_contained("note").unwrap();
    assert_eq!(found.type_name(), "Basic");
    assert_eq!(found.id(), Some("note"));
}

#[test]
fn parameters_is_a_resource_without_narrative() {
    let parameters = Parameters::builder()
        .id("op-result")
        .parameter([ParametersParameter::builder()
            .name(FhirString::new("result").unwrap())
            .resource(heart_rate().build().unwrap())
            .build()
            .unwrap()])
        .build()
        .unwrap();

    assert_eq!(parameters.id(), Some("op-result"));
    let result = parameters.find_parameter("result").unwrap();
    let observation = result.resource().and_then(AnyResource::as_observation).unwrap();
    assert_eq!(observation.id(), Some("heart-rate"));
}

#[test]
fn reference_targets_are_enforced() {
    let err = heart_rate()
        .subject(reference("Practitioner/p1"))
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::InvalidFieldValue { field: "subject", .. }));

    // fragments and absolute references are not checked
    assert!(heart_rate().subject(reference("#p1")).build().is_ok());
    assert!(heart_rate()
        .subject(reference("http://example.org/fhir/Practitioner/p1"))
        .build()
        .is_ok());
    assert!(heart_rate()
        .subject(reference("urn:uuid:53fefa32-fcbb-4ff8-8a92-55ee120877b7"))
        .build()
        .is_ok());
}

//! Choice elements (`value[x]` and friends)
//!
//! A choice element holds exactly one value out of a closed set of permissible types.
//! The value itself is a sum type ([`DataValue`](crate::DataValue) for data types,
//! [`AnyResource`](crate::AnyResource) for resources); the set of types a given element
//! accepts is a [`ChoiceTypes`] allow-list, checked at `build()` time through
//! [`check_choice`](crate::validation::check_choice).
//!
//! Allow-lists are compile-time perfect hash sets, so membership is O(1) no matter how
//! many alternatives an element declares.

use heck::ToUpperCamelCase;

/// Runtime type identity of a choice value
pub trait ChoiceType {
    /// FHIR type name of the concrete value ("string", "Quantity", "Patient", ...)
    fn type_name(&self) -> &'static str;
}

/// Closed set of types permitted for a choice element
#[derive(Debug)]
pub struct ChoiceTypes {
    /// Type names in declared order
    pub ordered: &'static [&'static str],
    pub(crate) set: phf::Set<&'static str>,
}

impl ChoiceTypes {
    pub fn contains(&self, type_name: &str) -> bool {
        self.set.contains(type_name)
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.ordered.iter().copied()
    }

    /// Human-readable list for error messages, e.g. `[Quantity, string]`
    pub fn describe(&self) -> String {
        format!("[{}]", self.ordered.join(", "))
    }
}

macro_rules! choice_types {
    ($($name:tt),+ $(,)?) => {
        ChoiceTypes {
            ordered: &[$($name),+],
            set: phf::phf_set! { $($name),+ },
        }
    };
}

#[cfg(test)]
pub(crate) use choice_types;

/// Every data type permitted by open choice elements such as `Extension.value[x]`
/// and `Parameters.parameter.value[x]`
pub const OPEN_TYPES: ChoiceTypes = choice_types![
    "base64Binary",
    "boolean",
    "canonical",
    "code",
    "date",
    "dateTime",
    "decimal",
    "id",
    "instant",
    "integer",
    "markdown",
    "oid",
    "positiveInt",
    "string",
    "time",
    "unsignedInt",
    "uri",
    "url",
    "uuid",
    "Address",
    "Age",
    "Annotation",
    "Attachment",
    "CodeableConcept",
    "Coding",
    "ContactPoint",
    "Count",
    "Distance",
    "Duration",
    "HumanName",
    "Identifier",
    "Money",
    "Period",
    "Quantity",
    "Range",
    "Ratio",
    "Reference",
    "SampledData",
    "Signature",
    "Timing",
    "ContactDetail",
    "Contributor",
    "DataRequirement",
    "Expression",
    "ParameterDefinition",
    "RelatedArtifact",
    "TriggerDefinition",
    "UsageContext",
    "Dosage",
    "Meta",
];

/// `Observation.value[x]` and `Observation.component.value[x]`
pub const OBSERVATION_VALUE_TYPES: ChoiceTypes = choice_types![
    "Quantity",
    "CodeableConcept",
    "string",
    "boolean",
    "integer",
    "Range",
    "Ratio",
    "SampledData",
    "time",
    "dateTime",
    "Period",
];

/// `Observation.effective[x]`
pub const OBSERVATION_EFFECTIVE_TYPES: ChoiceTypes =
    choice_types!["dateTime", "Period", "Timing", "instant"];

/// `Annotation.author[x]`
pub const ANNOTATION_AUTHOR_TYPES: ChoiceTypes = choice_types!["Reference", "string"];

/// Every concrete R4 resource type
pub const ANY_RESOURCE_TYPES: ChoiceTypes = choice_types![
    "Account",
    "ActivityDefinition",
    "AdverseEvent",
    "AllergyIntolerance",
    "Appointment",
    "AppointmentResponse",
    "AuditEvent",
    "Basic",
    "Binary",
    "BiologicallyDerivedProduct",
    "BodyStructure",
    "Bundle",
    "CapabilityStatement",
    "CarePlan",
    "CareTeam",
    "CatalogEntry",
    "ChargeItem",
    "ChargeItemDefinition",
    "Claim",
    "ClaimResponse",
    "ClinicalImpression",
    "CodeSystem",
    "Communication",
    "CommunicationRequest",
    "CompartmentDefinition",
    "Composition",
    "ConceptMap",
    "Condition",
    "Consent",
    "Contract",
    "Coverage",
    "CoverageEligibilityRequest",
    "CoverageEligibilityResponse",
    "DetectedIssue",
    "Device",
    "DeviceDefinition",
    "DeviceMetric",
    "DeviceRequest",
    "DeviceUseStatement",
    "DiagnosticReport",
    "DocumentManifest",
    "DocumentReference",
    "EffectEvidenceSynthesis",
    "Encounter",
    "Endpoint",
    "EnrollmentRequest",
    "EnrollmentResponse",
    "EpisodeOfCare",
    "EventDefinition",
    "Evidence",
    "EvidenceVariable",
    "ExampleScenario",
    "ExplanationOfBenefit",
    "FamilyMemberHistory",
    "Flag",
    "Goal",
    "GraphDefinition",
    "Group",
    "GuidanceResponse",
    "HealthcareService",
    "ImagingStudy",
    "Immunization",
    "ImmunizationEvaluation",
    "ImmunizationRecommendation",
    "ImplementationGuide",
    "InsurancePlan",
    "Invoice",
    "Library",
    "Linkage",
    "List",
    "Location",
    "Measure",
    "MeasureReport",
    "Media",
    "Medication",
    "MedicationAdministration",
    "MedicationDispense",
    "MedicationKnowledge",
    "MedicationRequest",
    "MedicationStatement",
    "MedicinalProduct",
    "MedicinalProductAuthorization",
    "MedicinalProductContraindication",
    "MedicinalProductIndication",
    "MedicinalProductIngredient",
    "MedicinalProductInteraction",
    "MedicinalProductManufactured",
    "MedicinalProductPackaged",
    "MedicinalProductPharmaceutical",
    "MedicinalProductUndesirableEffect",
    "MessageDefinition",
    "MessageHeader",
    "MolecularSequence",
    "NamingSystem",
    "NutritionOrder",
    "Observation",
    "ObservationDefinition",
    "OperationDefinition",
    "OperationOutcome",
    "Organization",
    "OrganizationAffiliation",
    "Parameters",
    "Patient",
    "PaymentNotice",
    "PaymentReconciliation",
    "Person",
    "PlanDefinition",
    "Practitioner",
    "PractitionerRole",
    "Procedure",
    "Provenance",
    "Questionnaire",
    "QuestionnaireResponse",
    "RelatedPerson",
    "RequestGroup",
    "ResearchDefinition",
    "ResearchElementDefinition",
    "ResearchStudy",
    "ResearchSubject",
    "RiskAssessment",
    "RiskEvidenceSynthesis",
    "Schedule",
    "SearchParameter",
    "ServiceRequest",
    "Slot",
    "Specimen",
    "SpecimenDefinition",
    "StructureDefinition",
    "StructureMap",
    "Subscription",
    "Substance",
    "SubstanceNucleicAcid",
    "SubstancePolymer",
    "SubstanceProtein",
    "SubstanceReferenceInformation",
    "SubstanceSourceMaterial",
    "SubstanceSpecification",
    "SupplyDelivery",
    "SupplyRequest",
    "Task",
    "TerminologyCapabilities",
    "TestReport",
    "TestScript",
    "ValueSet",
    "VerificationResult",
    "VisionPrescription",
];

/// Whether `name` is a concrete R4 resource type
pub fn is_resource_type(name: &str) -> bool {
    ANY_RESOURCE_TYPES.contains(name)
}

/// Element name a choice value takes when serialized: `value` + `Quantity` gives
/// `valueQuantity`, `effective` + `dateTime` gives `effectiveDateTime`.
pub fn choice_element_name(base: &str, type_name: &str) -> String {
    format!("{}{}", base, type_name.to_upper_camel_case())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_consistent(types: &ChoiceTypes) {
        for name in types.iter() {
            assert!(types.contains(name), "{name} missing from set");
        }
        assert_eq!(types.set.len(), types.len());
    }

    #[test]
    fn ordered_lists_match_sets() {
        assert_consistent(&OPEN_TYPES);
        assert_consistent(&OBSERVATION_VALUE_TYPES);
        assert_consistent(&OBSERVATION_EFFECTIVE_TYPES);
        assert_consistent(&ANNOTATION_AUTHOR_TYPES);
        assert_consistent(&ANY_RESOURCE_TYPES);
    }

    #[test]
    fn open_types_has_fifty_entries() {
        assert_eq!(OPEN_TYPES.len(), 50);
        assert!(OPEN_TYPES.contains("Meta"));
        assert!(!OPEN_TYPES.contains("Extension"));
        assert!(!OPEN_TYPES.contains("Narrative"));
    }

    #[test]
    fn resource_registry() {
        assert_eq!(ANY_RESOURCE_TYPES.len(), 146);
        assert!(is_resource_type("Patient"));
        assert!(is_resource_type("Parameters"));
        assert!(!is_resource_type("DomainResource"));
        assert!(!is_resource_type("patient"));
    }

    #[test]
    fn element_names() {
        assert_eq!(choice_element_name("value", "Quantity"), "valueQuantity");
        assert_eq!(choice_element_name("value", "string"), "valueString");
        assert_eq!(choice_element_name("effective", "dateTime"), "effectiveDateTime");
        assert_eq!(choice_element_name("value", "base64Binary"), "valueBase64Binary");
    }

    #[test]
    fn describe_lists_in_declared_order() {
        assert_eq!(ANNOTATION_AUTHOR_TYPES.describe(), "[Reference, string]");
    }
}

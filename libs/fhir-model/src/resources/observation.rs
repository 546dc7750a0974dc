use crate::base::{impl_backbone_element, impl_domain_resource, BackboneElementBase, DomainResourceBase};
use crate::choice::{OBSERVATION_EFFECTIVE_TYPES, OBSERVATION_VALUE_TYPES};
use crate::error::Result;
use crate::hash::{cached_hash, HashCache};
use crate::metadata::{base_fields, Cardinality, FieldInfo, FieldKind, ModelType, TypeInfo, TypeKind};
use crate::types::{Annotation, Code, CodeableConcept, DataValue, Identifier, Instant, Reference};
use crate::validation;
use crate::visitor::{
    accept_list, accept_opt, visit_node, ElementRef, Node, ResourceRef, Visitable, Visitor,
};

/// Required binding for `Observation.status`
const STATUSES: &[&str] = &[
    "registered",
    "preliminary",
    "final",
    "amended",
    "corrected",
    "cancelled",
    "entered-in-error",
    "unknown",
];

const SUBJECT_TARGETS: &[&str] = &["Patient", "Group", "Device", "Location"];

const PERFORMER_TARGETS: &[&str] = &[
    "Practitioner",
    "PractitionerRole",
    "Organization",
    "CareTeam",
    "Patient",
    "RelatedPerson",
];

/// Measurements and simple assertions made about a patient, device or other subject
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    domain: DomainResourceBase,
    identifier: Vec<Identifier>,
    status: Code,
    category: Vec<CodeableConcept>,
    code: CodeableConcept,
    subject: Option<Reference>,
    effective: Option<DataValue>,
    issued: Option<Instant>,
    performer: Vec<Reference>,
    value: Option<DataValue>,
    data_absent_reason: Option<CodeableConcept>,
    interpretation: Vec<CodeableConcept>,
    note: Vec<Annotation>,
    component: Vec<ObservationComponent>,
    hash: HashCache,
}

cached_hash!(Observation {
    domain,
    identifier,
    status,
    category,
    code,
    subject,
    effective,
    issued,
    performer,
    value,
    data_absent_reason,
    interpretation,
    note,
    component,
});

static INFO: TypeInfo = TypeInfo {
    name: "Observation",
    kind: TypeKind::Resource,
    base: Some("DomainResource"),
    fields: &[
        base_fields::RESOURCE_ID,
        base_fields::RESOURCE_META,
        base_fields::RESOURCE_IMPLICIT_RULES,
        base_fields::RESOURCE_LANGUAGE,
        base_fields::DOMAIN_TEXT,
        base_fields::DOMAIN_CONTAINED,
        base_fields::DOMAIN_EXTENSION,
        base_fields::DOMAIN_MODIFIER_EXTENSION,
        FieldInfo::new(
            "identifier",
            &["Identifier"],
            "Observation",
            Cardinality::LIST,
            FieldKind::Complex,
        )
        .summary(),
        FieldInfo::new("status", &["code"], "Observation", Cardinality::REQUIRED, FieldKind::Primitive)
            .modifier()
            .summary(),
        FieldInfo::new(
            "category",
            &["CodeableConcept"],
            "Observation",
            Cardinality::LIST,
            FieldKind::Complex,
        ),
        FieldInfo::new(
            "code",
            &["CodeableConcept"],
            "Observation",
            Cardinality::REQUIRED,
            FieldKind::Complex,
        )
        .summary(),
        FieldInfo::new(
            "subject",
            &["Reference"],
            "Observation",
            Cardinality::OPTIONAL,
            FieldKind::Complex,
        )
        .references(SUBJECT_TARGETS)
        .summary(),
        FieldInfo::choice(
            "effective",
            "Observation",
            Cardinality::OPTIONAL,
            &OBSERVATION_EFFECTIVE_TYPES,
        )
        .summary(),
        FieldInfo::new("issued", &["instant"], "Observation", Cardinality::OPTIONAL, FieldKind::Primitive)
            .summary(),
        FieldInfo::new(
            "performer",
            &["Reference"],
            "Observation",
            Cardinality::LIST,
            FieldKind::Complex,
        )
        .references(PERFORMER_TARGETS)
        .summary(),
        FieldInfo::choice("value", "Observation", Cardinality::OPTIONAL, &OBSERVATION_VALUE_TYPES)
            .summary(),
        FieldInfo::new(
            "dataAbsentReason",
            &["CodeableConcept"],
            "Observation",
            Cardinality::OPTIONAL,
            FieldKind::Complex,
        ),
        FieldInfo::new(
            "interpretation",
            &["CodeableConcept"],
            "Observation",
            Cardinality::LIST,
            FieldKind::Complex,
        ),
        FieldInfo::new("note", &["Annotation"], "Observation", Cardinality::LIST, FieldKind::Complex),
        FieldInfo::new(
            "component",
            &["Observation.component"],
            "Observation",
            Cardinality::LIST,
            FieldKind::Backbone,
        )
        .summary(),
    ],
};

impl Observation {
    pub fn builder() -> ObservationBuilder {
        ObservationBuilder::default()
    }

    pub fn to_builder(&self) -> ObservationBuilder {
        ObservationBuilder::from(self.clone())
    }

    pub fn identifier(&self) -> &[Identifier] {
        &self.identifier
    }

    /// registered | preliminary | final | amended | corrected | cancelled | entered-in-error | unknown
    pub fn status(&self) -> &Code {
        &self.status
    }

    pub fn category(&self) -> &[CodeableConcept] {
        &self.category
    }

    /// Type of observation
    pub fn code(&self) -> &CodeableConcept {
        &self.code
    }

    pub fn subject(&self) -> Option<&Reference> {
        self.subject.as_ref()
    }

    /// Clinically relevant time or period; dateTime, Period, Timing or instant
    pub fn effective(&self) -> Option<&DataValue> {
        self.effective.as_ref()
    }

    pub fn issued(&self) -> Option<&Instant> {
        self.issued.as_ref()
    }

    pub fn performer(&self) -> &[Reference] {
        &self.performer
    }

    /// Actual result
    pub fn value(&self) -> Option<&DataValue> {
        self.value.as_ref()
    }

    pub fn data_absent_reason(&self) -> Option<&CodeableConcept> {
        self.data_absent_reason.as_ref()
    }

    pub fn interpretation(&self) -> &[CodeableConcept] {
        &self.interpretation
    }

    pub fn note(&self) -> &[Annotation] {
        &self.note
    }

    pub fn component(&self) -> &[ObservationComponent] {
        &self.component
    }
}

impl ModelType for Observation {
    const TYPE_NAME: &'static str = "Observation";
    const KIND: TypeKind = TypeKind::Resource;

    fn type_info() -> &'static TypeInfo {
        &INFO
    }
}

impl Visitable for Observation {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn accept<'a>(&'a self, name: &'static str, index: Option<usize>, visitor: &mut dyn Visitor<'a>) {
        visit_node(Node::Resource(ResourceRef::Observation(self)), name, index, visitor, |visitor| {
            self.domain.accept_children(visitor);
            accept_list(&self.identifier, "identifier", "Identifier", visitor);
            self.status.accept("status", None, visitor);
            accept_list(&self.category, "category", "CodeableConcept", visitor);
            self.code.accept("code", None, visitor);
            accept_opt(self.subject.as_ref(), "subject", visitor);
            accept_opt(self.effective.as_ref(), "effective", visitor);
            accept_opt(self.issued.as_ref(), "issued", visitor);
            accept_list(&self.performer, "performer", "Reference", visitor);
            accept_opt(self.value.as_ref(), "value", visitor);
            accept_opt(self.data_absent_reason.as_ref(), "dataAbsentReason", visitor);
            accept_list(&self.interpretation, "interpretation", "CodeableConcept", visitor);
            accept_list(&self.note, "note", "Annotation", visitor);
            accept_list(&self.component, "component", "Observation.component", visitor);
        });
    }
}

#[derive(Debug, Clone, Default)]
pub struct ObservationBuilder {
    domain: DomainResourceBase,
    identifier: Vec<Identifier>,
    status: Option<Code>,
    category: Vec<CodeableConcept>,
    code: Option<CodeableConcept>,
    subject: Option<Reference>,
    effective: Option<DataValue>,
    issued: Option<Instant>,
    performer: Vec<Reference>,
    value: Option<DataValue>,
    data_absent_reason: Option<CodeableConcept>,
    interpretation: Vec<CodeableConcept>,
    note: Vec<Annotation>,
    component: Vec<ObservationComponent>,
}

impl ObservationBuilder {
    /// Appends to `identifier`
    pub fn identifier(mut self, identifier: impl IntoIterator<Item = Identifier>) -> Self {
        self.identifier.extend(identifier);
        self
    }

    /// Replaces `identifier`
    pub fn set_identifier(mut self, identifier: impl IntoIterator<Item = Identifier>) -> Self {
        self.identifier = identifier.into_iter().collect();
        self
    }

    pub fn status(mut self, status: impl Into<Option<Code>>) -> Self {
        self.status = status.into();
        self
    }

    /// Appends to `category`
    pub fn category(mut self, category: impl IntoIterator<Item = CodeableConcept>) -> Self {
        self.category.extend(category);
        self
    }

    /// Replaces `category`
    pub fn set_category(mut self, category: impl IntoIterator<Item = CodeableConcept>) -> Self {
        self.category = category.into_iter().collect();
        self
    }

    pub fn code(mut self, code: impl Into<Option<CodeableConcept>>) -> Self {
        self.code = code.into();
        self
    }

    pub fn subject(mut self, subject: impl Into<Option<Reference>>) -> Self {
        self.subject = subject.into();
        self
    }

    /// Sets `effective[x]`; the type is checked by `build()`
    pub fn effective(mut self, effective: impl Into<DataValue>) -> Self {
        self.effective = Some(effective.into());
        self
    }

    pub fn clear_effective(mut self) -> Self {
        self.effective = None;
        self
    }

    pub fn issued(mut self, issued: impl Into<Option<Instant>>) -> Self {
        self.issued = issued.into();
        self
    }

    /// Appends to `performer`
    pub fn performer(mut self, performer: impl IntoIterator<Item = Reference>) -> Self {
        self.performer.extend(performer);
        self
    }

    /// Replaces `performer`
    pub fn set_performer(mut self, performer: impl IntoIterator<Item = Reference>) -> Self {
        self.performer = performer.into_iter().collect();
        self
    }

    /// Sets `value[x]`; the type is checked by `build()`
    pub fn value(mut self, value: impl Into<DataValue>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn clear_value(mut self) -> Self {
        self.value = None;
        self
    }

    pub fn data_absent_reason(mut self, reason: impl Into<Option<CodeableConcept>>) -> Self {
        self.data_absent_reason = reason.into();
        self
    }

    /// Appends to `interpretation`
    pub fn interpretation(mut self, interpretation: impl IntoIterator<Item = CodeableConcept>) -> Self {
        self.interpretation.extend(interpretation);
        self
    }

    /// Replaces `interpretation`
    pub fn set_interpretation(
        mut self,
        interpretation: impl IntoIterator<Item = CodeableConcept>,
    ) -> Self {
        self.interpretation = interpretation.into_iter().collect();
        self
    }

    /// Appends to `note`
    pub fn note(mut self, note: impl IntoIterator<Item = Annotation>) -> Self {
        self.note.extend(note);
        self
    }

    /// Replaces `note`
    pub fn set_note(mut self, note: impl IntoIterator<Item = Annotation>) -> Self {
        self.note = note.into_iter().collect();
        self
    }

    /// Appends to `component`
    pub fn component(mut self, component: impl IntoIterator<Item = ObservationComponent>) -> Self {
        self.component.extend(component);
        self
    }

    /// Replaces `component`
    pub fn set_component(
        mut self,
        component: impl IntoIterator<Item = ObservationComponent>,
    ) -> Self {
        self.component = component.into_iter().collect();
        self
    }

    pub fn build(self) -> Result<Observation> {
        self.domain.validate()?;
        let status = validation::require(self.status, "status")?;
        validation::check_code_binding(&status, "status", STATUSES)?;
        let code = validation::require(self.code, "code")?;
        let effective =
            validation::check_choice(self.effective, "effective", &OBSERVATION_EFFECTIVE_TYPES)?;
        let value = validation::check_choice(self.value, "value", &OBSERVATION_VALUE_TYPES)?;
        validation::check_reference_type(self.subject.as_ref(), "subject", SUBJECT_TARGETS)?;
        validation::check_reference_types(&self.performer, "performer", PERFORMER_TARGETS)?;
        Ok(Observation {
            domain: self.domain,
            identifier: self.identifier,
            status,
            category: self.category,
            code,
            subject: self.subject,
            effective,
            issued: self.issued,
            performer: self.performer,
            value,
            data_absent_reason: self.data_absent_reason,
            interpretation: self.interpretation,
            note: self.note,
            component: self.component,
            hash: HashCache::new(),
        })
    }
}

impl From<Observation> for ObservationBuilder {
    fn from(observation: Observation) -> Self {
        Self {
            domain: observation.domain,
            identifier: observation.identifier,
            status: Some(observation.status),
            category: observation.category,
            code: Some(observation.code),
            subject: observation.subject,
            effective: observation.effective,
            issued: observation.issued,
            performer: observation.performer,
            value: observation.value,
            data_absent_reason: observation.data_absent_reason,
            interpretation: observation.interpretation,
            note: observation.note,
            component: observation.component,
        }
    }
}

impl_domain_resource!(Observation, ObservationBuilder);

/// Component results, e.g. systolic and diastolic of a blood pressure reading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservationComponent {
    backbone: BackboneElementBase,
    code: CodeableConcept,
    value: Option<DataValue>,
    data_absent_reason: Option<CodeableConcept>,
    interpretation: Vec<CodeableConcept>,
    hash: HashCache,
}

cached_hash!(ObservationComponent {
    backbone,
    code,
    value,
    data_absent_reason,
    interpretation,
});

static COMPONENT_INFO: TypeInfo = TypeInfo {
    name: "Observation.component",
    kind: TypeKind::BackboneElement,
    base: Some("BackboneElement"),
    fields: &[
        base_fields::ELEMENT_ID,
        base_fields::ELEMENT_EXTENSION,
        base_fields::MODIFIER_EXTENSION,
        FieldInfo::new(
            "code",
            &["CodeableConcept"],
            "Observation.component",
            Cardinality::REQUIRED,
            FieldKind::Complex,
        )
        .summary(),
        FieldInfo::choice(
            "value",
            "Observation.component",
            Cardinality::OPTIONAL,
            &OBSERVATION_VALUE_TYPES,
        )
        .summary(),
        FieldInfo::new(
            "dataAbsentReason",
            &["CodeableConcept"],
            "Observation.component",
            Cardinality::OPTIONAL,
            FieldKind::Complex,
        ),
        FieldInfo::new(
            "interpretation",
            &["CodeableConcept"],
            "Observation.component",
            Cardinality::LIST,
            FieldKind::Complex,
        ),
    ],
};

impl ObservationComponent {
    pub fn builder() -> ObservationComponentBuilder {
        ObservationComponentBuilder::default()
    }

    pub fn to_builder(&self) -> ObservationComponentBuilder {
        ObservationComponentBuilder::from(self.clone())
    }

    pub fn code(&self) -> &CodeableConcept {
        &self.code
    }

    pub fn value(&self) -> Option<&DataValue> {
        self.value.as_ref()
    }

    pub fn data_absent_reason(&self) -> Option<&CodeableConcept> {
        self.data_absent_reason.as_ref()
    }

    pub fn interpretation(&self) -> &[CodeableConcept] {
        &self.interpretation
    }
}

impl ModelType for ObservationComponent {
    const TYPE_NAME: &'static str = "Observation.component";
    const KIND: TypeKind = TypeKind::BackboneElement;

    fn type_info() -> &'static TypeInfo {
        &COMPONENT_INFO
    }
}

impl Visitable for ObservationComponent {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn accept<'a>(&'a self, name: &'static str, index: Option<usize>, visitor: &mut dyn Visitor<'a>) {
        visit_node(
            Node::Element(ElementRef::ObservationComponent(self)),
            name,
            index,
            visitor,
            |visitor| {
                self.backbone.accept_children(visitor);
                self.code.accept("code", None, visitor);
                accept_opt(self.value.as_ref(), "value", visitor);
                accept_opt(self.data_absent_reason.as_ref(), "dataAbsentReason", visitor);
                accept_list(&self.interpretation, "interpretation", "CodeableConcept", visitor);
            },
        );
    }
}

#[derive(Debug, Clone, Default)]
pub struct ObservationComponentBuilder {
    backbone: BackboneElementBase,
    code: Option<CodeableConcept>,
    value: Option<DataValue>,
    data_absent_reason: Option<CodeableConcept>,
    interpretation: Vec<CodeableConcept>,
}

impl ObservationComponentBuilder {
    pub fn code(mut self, code: impl Into<Option<CodeableConcept>>) -> Self {
        self.code = code.into();
        self
    }

    pub fn value(mut self, value: impl Into<DataValue>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn clear_value(mut self) -> Self {
        self.value = None;
        self
    }

    pub fn data_absent_reason(mut self, reason: impl Into<Option<CodeableConcept>>) -> Self {
        self.data_absent_reason = reason.into();
        self
    }

    /// Appends to `interpretation`
    pub fn interpretation(mut self, interpretation: impl IntoIterator<Item = CodeableConcept>) -> Self {
        self.interpretation.extend(interpretation);
        self
    }

    /// Replaces `interpretation`
    pub fn set_interpretation(
        mut self,
        interpretation: impl IntoIterator<Item = CodeableConcept>,
    ) -> Self {
        self.interpretation = interpretation.into_iter().collect();
        self
    }

    pub fn build(self) -> Result<ObservationComponent> {
        self.backbone.validate()?;
        let code = validation::require(self.code, "code")?;
        let value = validation::check_choice(self.value, "value", &OBSERVATION_VALUE_TYPES)?;
        Ok(ObservationComponent {
            backbone: self.backbone,
            code,
            value,
            data_absent_reason: self.data_absent_reason,
            interpretation: self.interpretation,
            hash: HashCache::new(),
        })
    }
}

impl From<ObservationComponent> for ObservationComponentBuilder {
    fn from(component: ObservationComponent) -> Self {
        Self {
            backbone: component.backbone,
            code: Some(component.code),
            value: component.value,
            data_absent_reason: component.data_absent_reason,
            interpretation: component.interpretation,
        }
    }
}

impl_backbone_element!(ObservationComponent, ObservationComponentBuilder);

use crate::base::{impl_element, ElementBase};
use crate::error::Result;
use crate::hash::{cached_hash, HashCache};
use crate::metadata::{base_fields, Cardinality, FieldInfo, FieldKind, ModelType, TypeInfo, TypeKind};
use crate::types::{CodeableConcept, Code, FhirString, Period, Reference, Uri};
use crate::validation;
use crate::visitor::{accept_opt, visit_node, ElementRef, Node, Visitable, Visitor};

const ASSIGNER_TARGETS: &[&str] = &["Organization"];

/// A business identifier: a value that is unique within a system
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    element: ElementBase,
    use_: Option<Code>,
    type_: Option<CodeableConcept>,
    system: Option<Uri>,
    value: Option<FhirString>,
    period: Option<Period>,
    assigner: Option<Box<Reference>>,
    hash: HashCache,
}

cached_hash!(Identifier {
    element,
    use_,
    type_,
    system,
    value,
    period,
    assigner,
});

static INFO: TypeInfo = TypeInfo {
    name: "Identifier",
    kind: TypeKind::ComplexType,
    base: Some("Element"),
    fields: &[
        base_fields::ELEMENT_ID,
        base_fields::ELEMENT_EXTENSION,
        FieldInfo::new("use", &["code"], "Identifier", Cardinality::OPTIONAL, FieldKind::Primitive)
            .modifier()
            .summary(),
        FieldInfo::new(
            "type",
            &["CodeableConcept"],
            "Identifier",
            Cardinality::OPTIONAL,
            FieldKind::Complex,
        )
        .summary(),
        FieldInfo::new("system", &["uri"], "Identifier", Cardinality::OPTIONAL, FieldKind::Primitive)
            .summary(),
        FieldInfo::new("value", &["string"], "Identifier", Cardinality::OPTIONAL, FieldKind::Primitive)
            .summary(),
        FieldInfo::new("period", &["Period"], "Identifier", Cardinality::OPTIONAL, FieldKind::Complex)
            .summary(),
        FieldInfo::new(
            "assigner",
            &["Reference"],
            "Identifier",
            Cardinality::OPTIONAL,
            FieldKind::Complex,
        )
        .references(ASSIGNER_TARGETS)
        .summary(),
    ],
};

impl Identifier {
    pub fn builder() -> IdentifierBuilder {
        IdentifierBuilder::default()
    }

    pub fn to_builder(&self) -> IdentifierBuilder {
        IdentifierBuilder::from(self.clone())
    }

    /// usual | official | temp | secondary | old
    pub fn use_(&self) -> Option<&Code> {
        self.use_.as_ref()
    }

    pub fn type_(&self) -> Option<&CodeableConcept> {
        self.type_.as_ref()
    }

    pub fn system(&self) -> Option<&Uri> {
        self.system.as_ref()
    }

    pub fn value(&self) -> Option<&FhirString> {
        self.value.as_ref()
    }

    pub fn period(&self) -> Option<&Period> {
        self.period.as_ref()
    }

    /// Organization that issued the identifier
    pub fn assigner(&self) -> Option<&Reference> {
        self.assigner.as_deref()
    }

    fn has_fields(&self) -> bool {
        self.use_.is_some()
            || self.type_.is_some()
            || self.system.is_some()
            || self.value.is_some()
            || self.period.is_some()
            || self.assigner.is_some()
    }
}

impl ModelType for Identifier {
    const TYPE_NAME: &'static str = "Identifier";
    const KIND: TypeKind = TypeKind::ComplexType;

    fn type_info() -> &'static TypeInfo {
        &INFO
    }
}

impl Visitable for Identifier {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn accept<'a>(&'a self, name: &'static str, index: Option<usize>, visitor: &mut dyn Visitor<'a>) {
        visit_node(Node::Element(ElementRef::Identifier(self)), name, index, visitor, |visitor| {
            self.element.accept_children(visitor);
            accept_opt(self.use_.as_ref(), "use", visitor);
            accept_opt(self.type_.as_ref(), "type", visitor);
            accept_opt(self.system.as_ref(), "system", visitor);
            accept_opt(self.value.as_ref(), "value", visitor);
            accept_opt(self.period.as_ref(), "period", visitor);
            accept_opt(self.assigner.as_deref(), "assigner", visitor);
        });
    }
}

#[derive(Debug, Clone, Default)]
pub struct IdentifierBuilder {
    element: ElementBase,
    use_: Option<Code>,
    type_: Option<CodeableConcept>,
    system: Option<Uri>,
    value: Option<FhirString>,
    period: Option<Period>,
    assigner: Option<Box<Reference>>,
}

impl IdentifierBuilder {
    pub fn use_(mut self, use_: impl Into<Option<Code>>) -> Self {
        self.use_ = use_.into();
        self
    }

    pub fn type_(mut self, type_: impl Into<Option<CodeableConcept>>) -> Self {
        self.type_ = type_.into();
        self
    }

    pub fn system(mut self, system: impl Into<Option<Uri>>) -> Self {
        self.system = system.into();
        self
    }

    pub fn value(mut self, value: impl Into<Option<FhirString>>) -> Self {
        self.value = value.into();
        self
    }

    pub fn period(mut self, period: impl Into<Option<Period>>) -> Self {
        self.period = period.into();
        self
    }

    pub fn assigner(mut self, assigner: impl Into<Option<Reference>>) -> Self {
        self.assigner = assigner.into().map(Box::new);
        self
    }

    pub fn build(self) -> Result<Identifier> {
        self.element.validate()?;
        validation::check_reference_type(self.assigner.as_deref(), "assigner", ASSIGNER_TARGETS)?;
        let identifier = Identifier {
            element: self.element,
            use_: self.use_,
            type_: self.type_,
            system: self.system,
            value: self.value,
            period: self.period,
            assigner: self.assigner,
            hash: HashCache::new(),
        };
        validation::require_value_or_children(
            false,
            identifier.has_fields() || identifier.element.has_children(),
            Identifier::TYPE_NAME,
        )?;
        Ok(identifier)
    }
}

impl From<Identifier> for IdentifierBuilder {
    fn from(identifier: Identifier) -> Self {
        Self {
            element: identifier.element,
            use_: identifier.use_,
            type_: identifier.type_,
            system: identifier.system,
            value: identifier.value,
            period: identifier.period,
            assigner: identifier.assigner,
        }
    }
}

impl_element!(Identifier, IdentifierBuilder);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assigner_must_be_an_organization() {
        let org = Reference::builder()
            .reference(FhirString::new("Organization/acme").unwrap())
            .build()
            .unwrap();
        let ok = Identifier::builder()
            .value(FhirString::new("12345").unwrap())
            .assigner(org)
            .build()
            .unwrap();
        assert_eq!(
            ok.assigner().and_then(|r| r.reference()).and_then(|r| r.as_str()),
            Some("Organization/acme")
        );

        let patient = Reference::builder()
            .reference(FhirString::new("Patient/p1").unwrap())
            .build()
            .unwrap();
        let err = Identifier::builder()
            .value(FhirString::new("12345").unwrap())
            .assigner(patient)
            .build()
            .unwrap_err();
        assert_eq!(err.field(), Some("assigner"));
    }
}

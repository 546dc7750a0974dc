use crate::base::{impl_element, ElementBase};
use crate::error::Result;
use crate::hash::{cached_hash, HashCache};
use crate::metadata::{base_fields, Cardinality, FieldInfo, FieldKind, ModelType, TypeInfo, TypeKind};
use crate::types::{FhirString, Identifier, Uri};
use crate::validation;
use crate::visitor::{accept_opt, visit_node, ElementRef, Node, Visitable, Visitor};

/// A link from one resource to another.
///
/// Whether the target's resource type is acceptable depends on the element that holds
/// the reference, so target checks run in the owning type's `build()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    element: ElementBase,
    reference: Option<FhirString>,
    type_: Option<Uri>,
    identifier: Option<Identifier>,
    display: Option<FhirString>,
    hash: HashCache,
}

cached_hash!(Reference {
    element,
    reference,
    type_,
    identifier,
    display,
});

static INFO: TypeInfo = TypeInfo {
    name: "Reference",
    kind: TypeKind::ComplexType,
    base: Some("Element"),
    fields: &[
        base_fields::ELEMENT_ID,
        base_fields::ELEMENT_EXTENSION,
        FieldInfo::new("reference", &["string"], "Reference", Cardinality::OPTIONAL, FieldKind::Primitive)
            .summary(),
        FieldInfo::new("type", &["uri"], "Reference", Cardinality::OPTIONAL, FieldKind::Primitive)
            .summary(),
        FieldInfo::new(
            "identifier",
            &["Identifier"],
            "Reference",
            Cardinality::OPTIONAL,
            FieldKind::Complex,
        )
        .summary(),
        FieldInfo::new("display", &["string"], "Reference", Cardinality::OPTIONAL, FieldKind::Primitive)
            .summary(),
    ],
};

impl Reference {
    pub fn builder() -> ReferenceBuilder {
        ReferenceBuilder::default()
    }

    pub fn to_builder(&self) -> ReferenceBuilder {
        ReferenceBuilder::from(self.clone())
    }

    /// Literal reference: relative, absolute, conditional or a `#` fragment
    pub fn reference(&self) -> Option<&FhirString> {
        self.reference.as_ref()
    }

    /// Expected target type, e.g. "Patient"
    pub fn type_(&self) -> Option<&Uri> {
        self.type_.as_ref()
    }

    /// Logical reference, when the literal one is unknown
    pub fn identifier(&self) -> Option<&Identifier> {
        self.identifier.as_ref()
    }

    pub fn display(&self) -> Option<&FhirString> {
        self.display.as_ref()
    }

    /// Local id of a contained resource, for `#id` references
    pub fn fragment(&self) -> Option<&str> {
        self.reference
            .as_ref()
            .and_then(|r| r.as_str())
            .and_then(|r| r.strip_prefix('#'))
    }
}

impl ModelType for Reference {
    const TYPE_NAME: &'static str = "Reference";
    const KIND: TypeKind = TypeKind::ComplexType;

    fn type_info() -> &'static TypeInfo {
        &INFO
    }
}

impl Visitable for Reference {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn accept<'a>(&'a self, name: &'static str, index: Option<usize>, visitor: &mut dyn Visitor<'a>) {
        visit_node(Node::Element(ElementRef::Reference(self)), name, index, visitor, |visitor| {
            self.element.accept_children(visitor);
            accept_opt(self.reference.as_ref(), "reference", visitor);
            accept_opt(self.type_.as_ref(), "type", visitor);
            accept_opt(self.identifier.as_ref(), "identifier", visitor);
            accept_opt(self.display.as_ref(), "display", visitor);
        });
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReferenceBuilder {
    element: ElementBase,
    reference: Option<FhirString>,
    type_: Option<Uri>,
    identifier: Option<Identifier>,
    display: Option<FhirString>,
}

impl ReferenceBuilder {
    pub fn reference(mut self, reference: impl Into<Option<FhirString>>) -> Self {
        self.reference = reference.into();
        self
    }

    pub fn type_(mut self, type_: impl Into<Option<Uri>>) -> Self {
        self.type_ = type_.into();
        self
    }

    pub fn identifier(mut self, identifier: impl Into<Option<Identifier>>) -> Self {
        self.identifier = identifier.into();
        self
    }

    pub fn display(mut self, display: impl Into<Option<FhirString>>) -> Self {
        self.display = display.into();
        self
    }

    pub fn build(self) -> Result<Reference> {
        self.element.validate()?;
        validation::require_value_or_children(
            false,
            self.reference.is_some()
                || self.type_.is_some()
                || self.identifier.is_some()
                || self.display.is_some()
                || self.element.has_children(),
            Reference::TYPE_NAME,
        )?;
        Ok(Reference {
            element: self.element,
            reference: self.reference,
            type_: self.type_,
            identifier: self.identifier,
            display: self.display,
            hash: HashCache::new(),
        })
    }
}

impl From<Reference> for ReferenceBuilder {
    fn from(reference: Reference) -> Self {
        Self {
            element: reference.element,
            reference: reference.reference,
            type_: reference.type_,
            identifier: reference.identifier,
            display: reference.display,
        }
    }
}

impl_element!(Reference, ReferenceBuilder);

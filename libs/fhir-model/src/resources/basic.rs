use crate::base::{impl_domain_resource, DomainResourceBase};
use crate::error::Result;
use crate::hash::{cached_hash, HashCache};
use crate::metadata::{base_fields, Cardinality, FieldInfo, FieldKind, ModelType, TypeInfo, TypeKind};
use crate::types::{CodeableConcept, Date, Identifier, Reference};
use crate::validation;
use crate::visitor::{accept_list, accept_opt, visit_node, Node, ResourceRef, Visitable, Visitor};

const AUTHOR_TARGETS: &[&str] = &[
    "Practitioner",
    "PractitionerRole",
    "Patient",
    "RelatedPerson",
    "Organization",
];

/// Resource for concepts that have no dedicated resource type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Basic {
    domain: DomainResourceBase,
    identifier: Vec<Identifier>,
    code: CodeableConcept,
    subject: Option<Reference>,
    created: Option<Date>,
    author: Option<Reference>,
    hash: HashCache,
}

cached_hash!(Basic {
    domain,
    identifier,
    code,
    subject,
    created,
    author,
});

static INFO: TypeInfo = TypeInfo {
    name: "Basic",
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
        FieldInfo::new("identifier", &["Identifier"], "Basic", Cardinality::LIST, FieldKind::Complex)
            .summary(),
        FieldInfo::new(
            "code",
            &["CodeableConcept"],
            "Basic",
            Cardinality::REQUIRED,
            FieldKind::Complex,
        )
        .summary(),
        FieldInfo::new("subject", &["Reference"], "Basic", Cardinality::OPTIONAL, FieldKind::Complex)
            .summary(),
        FieldInfo::new("created", &["date"], "Basic", Cardinality::OPTIONAL, FieldKind::Primitive)
            .summary(),
        FieldInfo::new("author", &["Reference"], "Basic", Cardinality::OPTIONAL, FieldKind::Complex)
            .references(AUTHOR_TARGETS)
            .summary(),
    ],
};

impl Basic {
    pub fn builder() -> BasicBuilder {
        BasicBuilder::default()
    }

    pub fn to_builder(&self) -> BasicBuilder {
        BasicBuilder::from(self.clone())
    }

    pub fn identifier(&self) -> &[Identifier] {
        &self.identifier
    }

    /// Kind of resource
    pub fn code(&self) -> &CodeableConcept {
        &self.code
    }

    /// Identifies the focus of this resource; any resource type
    pub fn subject(&self) -> Option<&Reference> {
        self.subject.as_ref()
    }

    pub fn created(&self) -> Option<&Date> {
        self.created.as_ref()
    }

    pub fn author(&self) -> Option<&Reference> {
        self.author.as_ref()
    }
}

impl ModelType for Basic {
    const TYPE_NAME: &'static str = "Basic";
    const KIND: TypeKind = TypeKind::Resource;

    fn type_info() -> &'static TypeInfo {
        &INFO
    }
}

impl Visitable for Basic {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn accept<'a>(&'a self, name: &'static str, index: Option<usize>, visitor: &mut dyn Visitor<'a>) {
        visit_node(Node::Resource(ResourceRef::Basic(self)), name, index, visitor, |visitor| {
            self.domain.accept_children(visitor);
            accept_list(&self.identifier, "identifier", "Identifier", visitor);
            self.code.accept("code", None, visitor);
            accept_opt(self.subject.as_ref(), "subject", visitor);
            accept_opt(self.created.as_ref(), "created", visitor);
            accept_opt(self.author.as_ref(), "author", visitor);
        });
    }
}

#[derive(Debug, Clone, Default)]
pub struct BasicBuilder {
    domain: DomainResourceBase,
    identifier: Vec<Identifier>,
    code: Option<CodeableConcept>,
    subject: Option<Reference>,
    created: Option<Date>,
    author: Option<Reference>,
}

impl BasicBuilder {
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

    pub fn code(mut self, code: impl Into<Option<CodeableConcept>>) -> Self {
        self.code = code.into();
        self
    }

    pub fn subject(mut self, subject: impl Into<Option<Reference>>) -> Self {
        self.subject = subject.into();
        self
    }

    pub fn created(mut self, created: impl Into<Option<Date>>) -> Self {
        self.created = created.into();
        self
    }

    pub fn author(mut self, author: impl Into<Option<Reference>>) -> Self {
        self.author = author.into();
        self
    }

    pub fn build(self) -> Result<Basic> {
        self.domain.validate()?;
        let code = validation::require(self.code, "code")?;
        validation::check_reference_type(self.author.as_ref(), "author", AUTHOR_TARGETS)?;
        Ok(Basic {
            domain: self.domain,
            identifier: self.identifier,
            code,
            subject: self.subject,
            created: self.created,
            author: self.author,
            hash: HashCache::new(),
        })
    }
}

impl From<Basic> for BasicBuilder {
    fn from(basic: Basic) -> Self {
        Self {
            domain: basic.domain,
            identifier: basic.identifier,
            code: Some(basic.code),
            subject: basic.subject,
            created: basic.created,
            author: basic.author,
        }
    }
}

impl_domain_resource!(Basic, BasicBuilder);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::{DomainResource, DomainResourceBuilder, HasExtensions, Resource, ResourceBuilder};
    use crate::resources::AnyResource;
    use crate::types::{Coding, Extension, FhirString, Uri};
    use crate::Error;

    fn code() -> CodeableConcept {
        CodeableConcept::builder()
            .coding([Coding::builder()
                .system(Uri::new("http://terminology.hl7.org/CodeSystem/basic-resource-type").unwrap())
                .code(crate::types::Code::new("referral").unwrap())
                .build()
                .unwrap()])
            .build()
            .unwrap()
    }

    fn reference(value: &str) -> Reference {
        Reference::builder()
            .reference(FhirString::new(value).unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn code_is_required() {
        let err = Basic::builder().id("b1").build().unwrap_err();
        assert_eq!(err, Error::MissingRequiredField { field: "code" });
    }

    #[test]
    fn inherited_and_declared_elements_are_set() {
        let basic = Basic::builder()
            .id("b1")
            .extension([Extension::builder("http://example.org/flag")
                .value(crate::types::Boolean::new(true).unwrap())
                .build()
                .unwrap()])
            .code(code())
            .subject(reference("Anything/1"))
            .build()
            .unwrap();
        assert_eq!(basic.id(), Some("b1"));
        assert!(basic.has_extension("http://example.org/flag"));
        assert!(basic.text().is_none());
        assert_eq!(basic.code(), &code());
    }

    #[test]
    fn author_targets_are_checked() {
        let err = Basic::builder()
            .code(code())
            .author(reference("Device/d1"))
            .build()
            .unwrap_err();
        assert_eq!(err.field(), Some("author"));

        let ok = Basic::builder()
            .code(code())
            .author(reference("PractitionerRole/pr1"))
            .build();
        assert!(ok.is_ok());
    }

    #[test]
    fn contained_resources_are_found_by_id() {
        let inner = Basic::builder().id("inner").code(code()).build().unwrap();
        let outer = Basic::builder()
            .code(code())
            .contained([AnyResource::from(inner.clone())])
            .build()
            .unwrap();
        let found = outer.find_contained("inner").unwrap();
        assert_eq!(found.as_basic(), Some(&inner));
        assert!(outer.find_contained("missing").is_none());
    }

    #[test]
    fn invalid_resource_id_is_rejected() {
        let err = Basic::builder().id("has space").code(code()).build().unwrap_err();
        assert_eq!(err.field(), Some("id"));
    }
}

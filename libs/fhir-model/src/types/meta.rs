use crate::base::{impl_element, ElementBase};
use crate::error::Result;
use crate::hash::{cached_hash, HashCache};
use crate::metadata::{base_fields, Cardinality, FieldInfo, FieldKind, ModelType, TypeInfo, TypeKind};
use crate::types::{Coding, Id, Instant, Uri};
use crate::validation;
use crate::visitor::{accept_list, accept_opt, visit_node, ElementRef, Node, Visitable, Visitor};

/// Metadata about a resource maintained by the infrastructure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Meta {
    element: ElementBase,
    version_id: Option<Id>,
    last_updated: Option<Instant>,
    source: Option<Uri>,
    profile: Vec<Uri>,
    security: Vec<Coding>,
    tag: Vec<Coding>,
    hash: HashCache,
}

cached_hash!(Meta {
    element,
    version_id,
    last_updated,
    source,
    profile,
    security,
    tag,
});

static INFO: TypeInfo = TypeInfo {
    name: "Meta",
    kind: TypeKind::ComplexType,
    base: Some("Element"),
    fields: &[
        base_fields::ELEMENT_ID,
        base_fields::ELEMENT_EXTENSION,
        FieldInfo::new("versionId", &["id"], "Meta", Cardinality::OPTIONAL, FieldKind::Primitive)
            .summary(),
        FieldInfo::new(
            "lastUpdated",
            &["instant"],
            "Meta",
            Cardinality::OPTIONAL,
            FieldKind::Primitive,
        )
        .summary(),
        FieldInfo::new("source", &["uri"], "Meta", Cardinality::OPTIONAL, FieldKind::Primitive)
            .summary(),
        FieldInfo::new("profile", &["uri"], "Meta", Cardinality::LIST, FieldKind::Primitive)
            .summary(),
        FieldInfo::new("security", &["Coding"], "Meta", Cardinality::LIST, FieldKind::Complex)
            .summary(),
        FieldInfo::new("tag", &["Coding"], "Meta", Cardinality::LIST, FieldKind::Complex).summary(),
    ],
};

impl Meta {
    pub fn builder() -> MetaBuilder {
        MetaBuilder::default()
    }

    pub fn to_builder(&self) -> MetaBuilder {
        MetaBuilder::from(self.clone())
    }

    pub fn version_id(&self) -> Option<&Id> {
        self.version_id.as_ref()
    }

    pub fn last_updated(&self) -> Option<&Instant> {
        self.last_updated.as_ref()
    }

    pub fn source(&self) -> Option<&Uri> {
        self.source.as_ref()
    }

    /// Profiles the resource claims to conform to
    pub fn profile(&self) -> &[Uri] {
        &self.profile
    }

    pub fn security(&self) -> &[Coding] {
        &self.security
    }

    pub fn tag(&self) -> &[Coding] {
        &self.tag
    }
}

impl ModelType for Meta {
    const TYPE_NAME: &'static str = "Meta";
    const KIND: TypeKind = TypeKind::ComplexType;

    fn type_info() -> &'static TypeInfo {
        &INFO
    }
}

impl Visitable for Meta {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn accept<'a>(&'a self, name: &'static str, index: Option<usize>, visitor: &mut dyn Visitor<'a>) {
        visit_node(Node::Element(ElementRef::Meta(self)), name, index, visitor, |visitor| {
            self.element.accept_children(visitor);
            accept_opt(self.version_id.as_ref(), "versionId", visitor);
            accept_opt(self.last_updated.as_ref(), "lastUpdated", visitor);
            accept_opt(self.source.as_ref(), "source", visitor);
            accept_list(&self.profile, "profile", "uri", visitor);
            accept_list(&self.security, "security", "Coding", visitor);
            accept_list(&self.tag, "tag", "Coding", visitor);
        });
    }
}

#[derive(Debug, Clone, Default)]
pub struct MetaBuilder {
    element: ElementBase,
    version_id: Option<Id>,
    last_updated: Option<Instant>,
    source: Option<Uri>,
    profile: Vec<Uri>,
    security: Vec<Coding>,
    tag: Vec<Coding>,
}

impl MetaBuilder {
    pub fn version_id(mut self, version_id: impl Into<Option<Id>>) -> Self {
        self.version_id = version_id.into();
        self
    }

    pub fn last_updated(mut self, last_updated: impl Into<Option<Instant>>) -> Self {
        self.last_updated = last_updated.into();
        self
    }

    pub fn source(mut self, source: impl Into<Option<Uri>>) -> Self {
        self.source = source.into();
        self
    }

    /// Appends to `profile`
    pub fn profile(mut self, profile: impl IntoIterator<Item = Uri>) -> Self {
        self.profile.extend(profile);
        self
    }

    /// Replaces `profile`
    pub fn set_profile(mut self, profile: impl IntoIterator<Item = Uri>) -> Self {
        self.profile = profile.into_iter().collect();
        self
    }

    /// Appends to `security`
    pub fn security(mut self, security: impl IntoIterator<Item = Coding>) -> Self {
        self.security.extend(security);
        self
    }

    /// Replaces `security`
    pub fn set_security(mut self, security: impl IntoIterator<Item = Coding>) -> Self {
        self.security = security.into_iter().collect();
        self
    }

    /// Appends to `tag`
    pub fn tag(mut self, tag: impl IntoIterator<Item = Coding>) -> Self {
        self.tag.extend(tag);
        self
    }

    /// Replaces `tag`
    pub fn set_tag(mut self, tag: impl IntoIterator<Item = Coding>) -> Self {
        self.tag = tag.into_iter().collect();
        self
    }

    pub fn build(self) -> Result<Meta> {
        self.element.validate()?;
        validation::require_value_or_children(
            false,
            self.version_id.is_some()
                || self.last_updated.is_some()
                || self.source.is_some()
                || !self.profile.is_empty()
                || !self.security.is_empty()
                || !self.tag.is_empty()
                || self.element.has_children(),
            Meta::TYPE_NAME,
        )?;
        Ok(Meta {
            element: self.element,
            version_id: self.version_id,
            last_updated: self.last_updated,
            source: self.source,
            profile: self.profile,
            security: self.security,
            tag: self.tag,
            hash: HashCache::new(),
        })
    }
}

impl From<Meta> for MetaBuilder {
    fn from(meta: Meta) -> Self {
        Self {
            element: meta.element,
            version_id: meta.version_id,
            last_updated: meta.last_updated,
            source: meta.source,
            profile: meta.profile,
            security: meta.security,
            tag: meta.tag,
        }
    }
}

impl_element!(Meta, MetaBuilder);

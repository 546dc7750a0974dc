use crate::base::{impl_element, ElementBase};
use crate::choice::OPEN_TYPES;
use crate::error::Result;
use crate::hash::{cached_hash, HashCache};
use crate::metadata::{base_fields, Cardinality, FieldInfo, FieldKind, ModelType, TypeInfo, TypeKind};
use crate::types::DataValue;
use crate::validation;
use crate::visitor::{accept_opt, visit_node, ElementRef, Node, PrimitiveValue, Visitable, Visitor};

/// Additional content defined by implementations, identified by `url`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extension {
    element: ElementBase,
    url: String,
    value: Option<DataValue>,
    hash: HashCache,
}

cached_hash!(Extension { element, url, value });

static INFO: TypeInfo = TypeInfo {
    name: "Extension",
    kind: TypeKind::ComplexType,
    base: Some("Element"),
    fields: &[
        base_fields::ELEMENT_ID,
        base_fields::ELEMENT_EXTENSION,
        FieldInfo::new("url", &["uri"], "Extension", Cardinality::REQUIRED, FieldKind::Value),
        FieldInfo::choice("value", "Extension", Cardinality::OPTIONAL, &OPEN_TYPES),
    ],
};

impl Extension {
    /// `url` is the one element every extension must carry, so the builder starts from it
    pub fn builder(url: impl Into<String>) -> ExtensionBuilder {
        ExtensionBuilder {
            element: ElementBase::default(),
            url: url.into(),
            value: None,
        }
    }

    pub fn to_builder(&self) -> ExtensionBuilder {
        ExtensionBuilder::from(self.clone())
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn value(&self) -> Option<&DataValue> {
        self.value.as_ref()
    }
}

impl ModelType for Extension {
    const TYPE_NAME: &'static str = "Extension";
    const KIND: TypeKind = TypeKind::ComplexType;

    fn type_info() -> &'static TypeInfo {
        &INFO
    }
}

impl Visitable for Extension {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn accept<'a>(&'a self, name: &'static str, index: Option<usize>, visitor: &mut dyn Visitor<'a>) {
        visit_node(Node::Element(ElementRef::Extension(self)), name, index, visitor, |visitor| {
            self.element.accept_children(visitor);
            visitor.visit_value("url", PrimitiveValue::String(&self.url));
            accept_opt(self.value.as_ref(), "value", visitor);
        });
    }
}

#[derive(Debug, Clone)]
pub struct ExtensionBuilder {
    element: ElementBase,
    url: String,
    value: Option<DataValue>,
}

impl ExtensionBuilder {
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
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

    pub fn build(self) -> Result<Extension> {
        self.element.validate()?;
        if self.url.is_empty() {
            return Err(crate::Error::MissingRequiredField { field: "url" });
        }
        validation::check_uri(&self.url, "url")?;
        let value = validation::check_choice(self.value, "value", &OPEN_TYPES)?;
        validation::require_value_or_children(
            value.is_some(),
            self.element.has_children(),
            "Extension",
        )?;
        Ok(Extension {
            element: self.element,
            url: self.url,
            value,
            hash: HashCache::new(),
        })
    }
}

impl From<Extension> for ExtensionBuilder {
    fn from(extension: Extension) -> Self {
        Self {
            element: extension.element,
            url: extension.url,
            value: extension.value,
        }
    }
}

impl_element!(Extension, ExtensionBuilder);

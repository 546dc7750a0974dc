use crate::base::{impl_element, ElementBase};
use crate::error::Result;
use crate::hash::{cached_hash, HashCache};
use crate::metadata::{base_fields, Cardinality, FieldInfo, FieldKind, ModelType, TypeInfo, TypeKind};
use crate::types::{Code, Xhtml};
use crate::validation;
use crate::visitor::{visit_node, ElementRef, Node, Visitable, Visitor};

const STATUSES: &[&str] = &["generated", "extensions", "additional", "empty"];

/// Human-readable summary of a resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Narrative {
    element: ElementBase,
    status: Code,
    div: Xhtml,
    hash: HashCache,
}

cached_hash!(Narrative { element, status, div });

static INFO: TypeInfo = TypeInfo {
    name: "Narrative",
    kind: TypeKind::ComplexType,
    base: Some("Element"),
    fields: &[
        base_fields::ELEMENT_ID,
        base_fields::ELEMENT_EXTENSION,
        FieldInfo::new("status", &["code"], "Narrative", Cardinality::REQUIRED, FieldKind::Primitive),
        FieldInfo::new("div", &["xhtml"], "Narrative", Cardinality::REQUIRED, FieldKind::Primitive),
    ],
};

impl Narrative {
    pub fn builder() -> NarrativeBuilder {
        NarrativeBuilder::default()
    }

    pub fn to_builder(&self) -> NarrativeBuilder {
        NarrativeBuilder::from(self.clone())
    }

    /// generated | extensions | additional | empty
    pub fn status(&self) -> &Code {
        &self.status
    }

    pub fn div(&self) -> &Xhtml {
        &self.div
    }
}

impl ModelType for Narrative {
    const TYPE_NAME: &'static str = "Narrative";
    const KIND: TypeKind = TypeKind::ComplexType;

    fn type_info() -> &'static TypeInfo {
        &INFO
    }
}

impl Visitable for Narrative {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn accept<'a>(&'a self, name: &'static str, index: Option<usize>, visitor: &mut dyn Visitor<'a>) {
        visit_node(Node::Element(ElementRef::Narrative(self)), name, index, visitor, |visitor| {
            self.element.accept_children(visitor);
            self.status.accept("status", None, visitor);
            self.div.accept("div", None, visitor);
        });
    }
}

#[derive(Debug, Clone, Default)]
pub struct NarrativeBuilder {
    element: ElementBase,
    status: Option<Code>,
    div: Option<Xhtml>,
}

impl NarrativeBuilder {
    pub fn status(mut self, status: impl Into<Option<Code>>) -> Self {
        self.status = status.into();
        self
    }

    pub fn div(mut self, div: impl Into<Option<Xhtml>>) -> Self {
        self.div = div.into();
        self
    }

    pub fn build(self) -> Result<Narrative> {
        self.element.validate()?;
        let status = validation::require(self.status, "status")?;
        let div = validation::require(self.div, "div")?;
        validation::check_code_binding(&status, "status", STATUSES)?;
        Ok(Narrative {
            element: self.element,
            status,
            div,
            hash: HashCache::new(),
        })
    }
}

impl From<Narrative> for NarrativeBuilder {
    fn from(narrative: Narrative) -> Self {
        Self {
            element: narrative.element,
            status: Some(narrative.status),
            div: Some(narrative.div),
        }
    }
}

impl_element!(Narrative, NarrativeBuilder);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn status_and_div_are_required() {
        let err = Narrative::builder()
            .div(Xhtml::new("<div>x</div>").unwrap())
            .build()
            .unwrap_err();
        assert_eq!(err, Error::MissingRequiredField { field: "status" });

        let err = Narrative::builder()
            .status(Code::new("generated").unwrap())
            .build()
            .unwrap_err();
        assert_eq!(err, Error::MissingRequiredField { field: "div" });
    }

    #[test]
    fn unknown_status_is_rejected() {
        let err = Narrative::builder()
            .status(Code::new("pending").unwrap())
            .div(Xhtml::new("<div>x</div>").unwrap())
            .build()
            .unwrap_err();
        assert_eq!(err.field(), Some("status"));
    }
}

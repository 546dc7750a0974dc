use crate::base::{impl_element, ElementBase};
use crate::error::Result;
use crate::hash::{cached_hash, HashCache};
use crate::metadata::{base_fields, Cardinality, FieldInfo, FieldKind, ModelType, TypeInfo, TypeKind};
use crate::types::DateTime;
use crate::validation;
use crate::visitor::{accept_opt, visit_node, ElementRef, Node, Visitable, Visitor};

/// Time range defined by start and end date/time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Period {
    element: ElementBase,
    start: Option<DateTime>,
    end: Option<DateTime>,
    hash: HashCache,
}

cached_hash!(Period { element, start, end });

static INFO: TypeInfo = TypeInfo {
    name: "Period",
    kind: TypeKind::ComplexType,
    base: Some("Element"),
    fields: &[
        base_fields::ELEMENT_ID,
        base_fields::ELEMENT_EXTENSION,
        FieldInfo::new("start", &["dateTime"], "Period", Cardinality::OPTIONAL, FieldKind::Primitive)
            .summary(),
        FieldInfo::new("end", &["dateTime"], "Period", Cardinality::OPTIONAL, FieldKind::Primitive)
            .summary(),
    ],
};

impl Period {
    pub fn builder() -> PeriodBuilder {
        PeriodBuilder::default()
    }

    pub fn to_builder(&self) -> PeriodBuilder {
        PeriodBuilder::from(self.clone())
    }

    pub fn start(&self) -> Option<&DateTime> {
        self.start.as_ref()
    }

    /// Missing end means ongoing
    pub fn end(&self) -> Option<&DateTime> {
        self.end.as_ref()
    }
}

impl ModelType for Period {
    const TYPE_NAME: &'static str = "Period";
    const KIND: TypeKind = TypeKind::ComplexType;

    fn type_info() -> &'static TypeInfo {
        &INFO
    }
}

impl Visitable for Period {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn accept<'a>(&'a self, name: &'static str, index: Option<usize>, visitor: &mut dyn Visitor<'a>) {
        visit_node(Node::Element(ElementRef::Period(self)), name, index, visitor, |visitor| {
            self.element.accept_children(visitor);
            accept_opt(self.start.as_ref(), "start", visitor);
            accept_opt(self.end.as_ref(), "end", visitor);
        });
    }
}

#[derive(Debug, Clone, Default)]
pub struct PeriodBuilder {
    element: ElementBase,
    start: Option<DateTime>,
    end: Option<DateTime>,
}

impl PeriodBuilder {
    pub fn start(mut self, start: impl Into<Option<DateTime>>) -> Self {
        self.start = start.into();
        self
    }

    pub fn end(mut self, end: impl Into<Option<DateTime>>) -> Self {
        self.end = end.into();
        self
    }

    pub fn build(self) -> Result<Period> {
        self.element.validate()?;
        validation::require_value_or_children(
            false,
            self.start.is_some() || self.end.is_some() || self.element.has_children(),
            Period::TYPE_NAME,
        )?;
        Ok(Period {
            element: self.element,
            start: self.start,
            end: self.end,
            hash: HashCache::new(),
        })
    }
}

impl From<Period> for PeriodBuilder {
    fn from(period: Period) -> Self {
        Self {
            element: period.element,
            start: period.start,
            end: period.end,
        }
    }
}

impl_element!(Period, PeriodBuilder);

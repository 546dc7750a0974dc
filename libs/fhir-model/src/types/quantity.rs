use crate::base::{impl_element, ElementBase};
use crate::error::Result;
use crate::hash::{cached_hash, HashCache};
use crate::metadata::{base_fields, Cardinality, FieldInfo, FieldKind, ModelType, TypeInfo, TypeKind};
use crate::types::{Code, FhirDecimal, FhirString, Uri};
use crate::validation;
use crate::visitor::{accept_opt, visit_node, ElementRef, Node, Visitable, Visitor};

/// A measured amount, optionally coded with a unit system such as UCUM
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quantity {
    element: ElementBase,
    value: Option<FhirDecimal>,
    comparator: Option<Code>,
    unit: Option<FhirString>,
    system: Option<Uri>,
    code: Option<Code>,
    hash: HashCache,
}

cached_hash!(Quantity {
    element,
    value,
    comparator,
    unit,
    system,
    code,
});

static INFO: TypeInfo = TypeInfo {
    name: "Quantity",
    kind: TypeKind::ComplexType,
    base: Some("Element"),
    fields: &[
        base_fields::ELEMENT_ID,
        base_fields::ELEMENT_EXTENSION,
        FieldInfo::new("value", &["decimal"], "Quantity", Cardinality::OPTIONAL, FieldKind::Primitive)
            .summary(),
        FieldInfo::new("comparator", &["code"], "Quantity", Cardinality::OPTIONAL, FieldKind::Primitive)
            .modifier()
            .summary(),
        FieldInfo::new("unit", &["string"], "Quantity", Cardinality::OPTIONAL, FieldKind::Primitive)
            .summary(),
        FieldInfo::new("system", &["uri"], "Quantity", Cardinality::OPTIONAL, FieldKind::Primitive)
            .summary(),
        FieldInfo::new("code", &["code"], "Quantity", Cardinality::OPTIONAL, FieldKind::Primitive)
            .summary(),
    ],
};

const COMPARATORS: &[&str] = &["<", "<=", ">=", ">"];

impl Quantity {
    pub fn builder() -> QuantityBuilder {
        QuantityBuilder::default()
    }

    pub fn to_builder(&self) -> QuantityBuilder {
        QuantityBuilder::from(self.clone())
    }

    pub fn value(&self) -> Option<&FhirDecimal> {
        self.value.as_ref()
    }

    /// `<` | `<=` | `>=` | `>`; changes how the value is understood
    pub fn comparator(&self) -> Option<&Code> {
        self.comparator.as_ref()
    }

    pub fn unit(&self) -> Option<&FhirString> {
        self.unit.as_ref()
    }

    pub fn system(&self) -> Option<&Uri> {
        self.system.as_ref()
    }

    pub fn code(&self) -> Option<&Code> {
        self.code.as_ref()
    }
}

impl ModelType for Quantity {
    const TYPE_NAME: &'static str = "Quantity";
    const KIND: TypeKind = TypeKind::ComplexType;

    fn type_info() -> &'static TypeInfo {
        &INFO
    }
}

impl Visitable for Quantity {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn accept<'a>(&'a self, name: &'static str, index: Option<usize>, visitor: &mut dyn Visitor<'a>) {
        visit_node(Node::Element(ElementRef::Quantity(self)), name, index, visitor, |visitor| {
            self.element.accept_children(visitor);
            accept_opt(self.value.as_ref(), "value", visitor);
            accept_opt(self.comparator.as_ref(), "comparator", visitor);
            accept_opt(self.unit.as_ref(), "unit", visitor);
            accept_opt(self.system.as_ref(), "system", visitor);
            accept_opt(self.code.as_ref(), "code", visitor);
        });
    }
}

#[derive(Debug, Clone, Default)]
pub struct QuantityBuilder {
    element: ElementBase,
    value: Option<FhirDecimal>,
    comparator: Option<Code>,
    unit: Option<FhirString>,
    system: Option<Uri>,
    code: Option<Code>,
}

impl QuantityBuilder {
    pub fn value(mut self, value: impl Into<Option<FhirDecimal>>) -> Self {
        self.value = value.into();
        self
    }

    pub fn comparator(mut self, comparator: impl Into<Option<Code>>) -> Self {
        self.comparator = comparator.into();
        self
    }

    pub fn unit(mut self, unit: impl Into<Option<FhirString>>) -> Self {
        self.unit = unit.into();
        self
    }

    pub fn system(mut self, system: impl Into<Option<Uri>>) -> Self {
        self.system = system.into();
        self
    }

    pub fn code(mut self, code: impl Into<Option<Code>>) -> Self {
        self.code = code.into();
        self
    }

    pub fn build(self) -> Result<Quantity> {
        self.element.validate()?;
        if let Some(comparator) = &self.comparator {
            validation::check_code_binding(comparator, "comparator", COMPARATORS)?;
        }
        validation::require_value_or_children(
            false,
            self.value.is_some()
                || self.comparator.is_some()
                || self.unit.is_some()
                || self.system.is_some()
                || self.code.is_some()
                || self.element.has_children(),
            Quantity::TYPE_NAME,
        )?;
        Ok(Quantity {
            element: self.element,
            value: self.value,
            comparator: self.comparator,
            unit: self.unit,
            system: self.system,
            code: self.code,
            hash: HashCache::new(),
        })
    }
}

impl From<Quantity> for QuantityBuilder {
    fn from(quantity: Quantity) -> Self {
        Self {
            element: quantity.element,
            value: quantity.value,
            comparator: quantity.comparator,
            unit: quantity.unit,
            system: quantity.system,
            code: quantity.code,
        }
    }
}

impl_element!(Quantity, QuantityBuilder);

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn comparator_is_a_closed_code_set() {
        let base = Quantity::builder().value(FhirDecimal::new(Decimal::new(5, 0)).unwrap());
        assert!(base.clone().comparator(Code::new("<=").unwrap()).build().is_ok());
        let err = base.comparator(Code::new("~").unwrap()).build().unwrap_err();
        assert_eq!(err.field(), Some("comparator"));
    }
}

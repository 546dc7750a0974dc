//! Primitive data types
//!
//! All primitives share one representation, [`Primitive<K>`]: element data plus an
//! optional value whose Rust type and lexical checks come from the marker kind `K`.
//! `Primitive<StringKind>` is exposed as [`FhirString`], `Primitive<CodeKind>` as
//! [`Code`], and so on.

use crate::base::{Element, ElementBase, ElementBuilder, HasExtensions};
use crate::error::Result;
use crate::hash::{structural_hasher, HashCache};
use crate::metadata::{base_fields, Cardinality, FieldInfo, FieldKind, ModelType, TypeInfo, TypeKind};
use crate::types::Extension;
use crate::validation;
use crate::visitor::{visit_node, ElementRef, Node, PrimitiveValue, Visitable, Visitor};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Marker describing one primitive data type
pub trait PrimitiveKind: fmt::Debug + Clone + Copy + PartialEq + Eq + Default + 'static {
    /// Rust representation of the value
    type Value: fmt::Debug + Clone + PartialEq + Eq + Hash;

    const TYPE_NAME: &'static str;
    const INFO: &'static TypeInfo;
    /// Primitives like `xhtml` cannot exist without a value
    const VALUE_REQUIRED: bool;

    fn check(value: &Self::Value) -> Result<()>;

    fn as_value(value: &Self::Value) -> PrimitiveValue<'_>;

    fn node(element: &Primitive<Self>) -> ElementRef<'_>;
}

/// A FHIR primitive: `id`, `extension` and an optional `value`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Primitive<K: PrimitiveKind> {
    element: ElementBase,
    value: Option<K::Value>,
    hash: HashCache,
    kind: PhantomData<K>,
}

impl<K: PrimitiveKind> Primitive<K> {
    /// Builds a primitive holding just `value`
    pub fn new(value: impl Into<K::Value>) -> Result<Self> {
        Self::builder().value(value).build()
    }

    pub fn builder() -> PrimitiveBuilder<K> {
        PrimitiveBuilder::default()
    }

    pub fn to_builder(&self) -> PrimitiveBuilder<K> {
        PrimitiveBuilder::from(self.clone())
    }

    pub fn value(&self) -> Option<&K::Value> {
        self.value.as_ref()
    }

    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }

    pub fn has_children(&self) -> bool {
        self.element.has_children()
    }

    pub fn hash_code(&self) -> u64 {
        self.hash.get_or_compute(|| {
            let mut hasher = structural_hasher();
            self.element.hash(&mut hasher);
            self.value.hash(&mut hasher);
            hasher.finish()
        })
    }
}

impl<K: PrimitiveKind> Hash for Primitive<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash_code());
    }
}

impl<K: PrimitiveKind> ModelType for Primitive<K> {
    const TYPE_NAME: &'static str = K::TYPE_NAME;
    const KIND: TypeKind = TypeKind::PrimitiveType;

    fn type_info() -> &'static TypeInfo {
        K::INFO
    }
}

impl<K: PrimitiveKind> HasExtensions for Primitive<K> {
    fn extension(&self) -> &[Extension] {
        &self.element.extension
    }
}

impl<K: PrimitiveKind> Element for Primitive<K> {
    fn element_base(&self) -> &ElementBase {
        &self.element
    }
}

impl<K: PrimitiveKind> Visitable for Primitive<K> {
    fn type_name(&self) -> &'static str {
        K::TYPE_NAME
    }

    fn accept<'a>(&'a self, name: &'static str, index: Option<usize>, visitor: &mut dyn Visitor<'a>) {
        visit_node(Node::Element(K::node(self)), name, index, visitor, |visitor| {
            self.element.accept_children(visitor);
            if let Some(value) = &self.value {
                visitor.visit_value("value", K::as_value(value));
            }
        });
    }
}

#[derive(Debug, Clone)]
pub struct PrimitiveBuilder<K: PrimitiveKind> {
    element: ElementBase,
    value: Option<K::Value>,
}

impl<K: PrimitiveKind> Default for PrimitiveBuilder<K> {
    fn default() -> Self {
        Self {
            element: ElementBase::default(),
            value: None,
        }
    }
}

impl<K: PrimitiveKind> PrimitiveBuilder<K> {
    pub fn value(mut self, value: impl Into<K::Value>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn clear_value(mut self) -> Self {
        self.value = None;
        self
    }

    pub fn build(self) -> Result<Primitive<K>> {
        self.element.validate()?;
        if let Some(value) = &self.value {
            K::check(value)?;
        }
        if K::VALUE_REQUIRED {
            validation::require(self.value.as_ref(), "value")?;
        }
        validation::require_value_or_children(
            self.value.is_some(),
            self.element.has_children(),
            K::TYPE_NAME,
        )?;
        Ok(Primitive {
            element: self.element,
            value: self.value,
            hash: HashCache::new(),
            kind: PhantomData,
        })
    }
}

impl<K: PrimitiveKind> ElementBuilder for PrimitiveBuilder<K> {
    fn element_base_mut(&mut self) -> &mut ElementBase {
        &mut self.element
    }
}

impl<K: PrimitiveKind> From<Primitive<K>> for PrimitiveBuilder<K> {
    fn from(primitive: Primitive<K>) -> Self {
        Self {
            element: primitive.element,
            value: primitive.value,
        }
    }
}

fn unchecked<T>(_value: &T) -> Result<()> {
    Ok(())
}

fn check_string(value: &str) -> Result<()> {
    validation::check_string(value, "value")
}

fn check_uri(value: &str) -> Result<()> {
    validation::check_uri(value, "value")
}

fn check_code(value: &str) -> Result<()> {
    validation::check_code(value, "value")
}

fn check_id(value: &str) -> Result<()> {
    validation::check_id(value, "value")
}

fn check_positive(value: &i32) -> Result<()> {
    validation::check_min_value(*value, 1, "value")
}

fn check_date(value: &str) -> Result<()> {
    validation::check_pattern(value, validation::date_regex(), "value")
}

fn check_date_time(value: &str) -> Result<()> {
    validation::check_pattern(value, validation::date_time_regex(), "value")
}

fn check_instant(value: &str) -> Result<()> {
    validation::check_pattern(value, validation::instant_regex(), "value")
}

fn check_xhtml(value: &str) -> Result<()> {
    validation::check_max_length(value, "value")?;
    validation::check_xhtml(value, "value")
}

fn bool_value(value: &bool) -> PrimitiveValue<'_> {
    PrimitiveValue::Boolean(*value)
}

fn integer_value(value: &i32) -> PrimitiveValue<'_> {
    PrimitiveValue::Integer(*value)
}

fn decimal_value(value: &rust_decimal::Decimal) -> PrimitiveValue<'_> {
    PrimitiveValue::Decimal(*value)
}

fn string_value(value: &str) -> PrimitiveValue<'_> {
    PrimitiveValue::String(value)
}

macro_rules! primitive_kind {
    (
        $(#[$doc:meta])*
        $alias:ident = $kind:ident {
            name: $name:literal,
            value: $value:ty,
            variant: $variant:ident,
            check: $check:path,
            as_value: $as_value:path,
            required: $required:literal $(,)?
        }
    ) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub struct $kind;

        $(#[$doc])*
        pub type $alias = Primitive<$kind>;

        impl PrimitiveKind for $kind {
            type Value = $value;

            const TYPE_NAME: &'static str = $name;
            const INFO: &'static TypeInfo = &TypeInfo {
                name: $name,
                kind: TypeKind::PrimitiveType,
                base: Some("Element"),
                fields: &[
                    base_fields::ELEMENT_ID,
                    base_fields::ELEMENT_EXTENSION,
                    FieldInfo::new(
                        "value",
                        &[$name],
                        $name,
                        if $required { Cardinality::REQUIRED } else { Cardinality::OPTIONAL },
                        FieldKind::Value,
                    ),
                ],
            };
            const VALUE_REQUIRED: bool = $required;

            fn check(value: &$value) -> Result<()> {
                $check(value)
            }

            fn as_value(value: &$value) -> PrimitiveValue<'_> {
                $as_value(value)
            }

            fn node(element: &Primitive<Self>) -> ElementRef<'_> {
                ElementRef::$variant(element)
            }
        }
    };
}

primitive_kind! {
    /// `true` | `false`
    Boolean = BooleanKind {
        name: "boolean",
        value: bool,
        variant: Boolean,
        check: unchecked,
        as_value: bool_value,
        required: false,
    }
}

primitive_kind! {
    /// 32-bit signed integer
    Integer = IntegerKind {
        name: "integer",
        value: i32,
        variant: Integer,
        check: unchecked,
        as_value: integer_value,
        required: false,
    }
}

primitive_kind! {
    /// Integer >= 1
    PositiveInt = PositiveIntKind {
        name: "positiveInt",
        value: i32,
        variant: PositiveInt,
        check: check_positive,
        as_value: integer_value,
        required: false,
    }
}

primitive_kind! {
    /// Arbitrary-precision decimal; scale is preserved, equality is numeric
    FhirDecimal = DecimalKind {
        name: "decimal",
        value: rust_decimal::Decimal,
        variant: Decimal,
        check: unchecked,
        as_value: decimal_value,
        required: false,
    }
}

primitive_kind! {
    FhirString = StringKind {
        name: "string",
        value: String,
        variant: String,
        check: check_string,
        as_value: string_value,
        required: false,
    }
}

primitive_kind! {
    Uri = UriKind {
        name: "uri",
        value: String,
        variant: Uri,
        check: check_uri,
        as_value: string_value,
        required: false,
    }
}

primitive_kind! {
    /// Token from a code system; single inner spaces only
    Code = CodeKind {
        name: "code",
        value: String,
        variant: Code,
        check: check_code,
        as_value: string_value,
        required: false,
    }
}

primitive_kind! {
    Id = IdKind {
        name: "id",
        value: String,
        variant: Id,
        check: check_id,
        as_value: string_value,
        required: false,
    }
}

primitive_kind! {
    /// `YYYY`, `YYYY-MM` or `YYYY-MM-DD`
    Date = DateKind {
        name: "date",
        value: String,
        variant: Date,
        check: check_date,
        as_value: string_value,
        required: false,
    }
}

primitive_kind! {
    /// Partial date, or full date with time and zone offset
    DateTime = DateTimeKind {
        name: "dateTime",
        value: String,
        variant: DateTime,
        check: check_date_time,
        as_value: string_value,
        required: false,
    }
}

primitive_kind! {
    /// Full timestamp with zone offset
    Instant = InstantKind {
        name: "instant",
        value: String,
        variant: Instant,
        check: check_instant,
        as_value: string_value,
        required: false,
    }
}

primitive_kind! {
    /// Narrative XHTML fragment
    Xhtml = XhtmlKind {
        name: "xhtml",
        value: String,
        variant: Xhtml,
        check: check_xhtml,
        as_value: string_value,
        required: true,
    }
}

impl<K: PrimitiveKind<Value = String>> Primitive<K> {
    pub fn as_str(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl<K: PrimitiveKind<Value = String>> fmt::Display for Primitive<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[test]
    fn builds_valid_values() {
        assert_eq!(FhirString::new("hello").unwrap().as_str(), Some("hello"));
        assert_eq!(Boolean::new(true).unwrap().value(), Some(&true));
        assert_eq!(PositiveInt::new(3).unwrap().value(), Some(&3));
        assert!(Code::new("final").is_ok());
        assert!(Date::new("2024-02").is_ok());
        assert!(Instant::new("2024-02-01T08:30:00Z").is_ok());
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(FhirString::new("").is_err());
        assert!(Code::new("two  spaces").is_err());
        assert!(Id::new("not/an/id").is_err());
        assert!(Uri::new("has space").is_err());
        assert!(PositiveInt::new(0).is_err());
        assert!(Date::new("2024-02-01T08:30:00Z").is_err());
        assert!(Instant::new("2024-02-01").is_err());
    }

    #[test]
    fn value_or_extension_required() {
        let err = FhirString::builder().build().unwrap_err();
        assert_eq!(err.field(), Some("string"));

        let ext = Extension::builder("http://example.org/absent")
            .value(Code::new("unknown").unwrap())
            .build()
            .unwrap();
        let s = FhirString::builder().extension([ext]).build().unwrap();
        assert!(!s.has_value());
        assert!(s.has_children());
    }

    #[test]
    fn xhtml_requires_value() {
        let ext = Extension::builder("http://example.org/x")
            .value(Boolean::new(true).unwrap())
            .build()
            .unwrap();
        let err = Xhtml::builder().extension([ext]).build().unwrap_err();
        assert_eq!(
            err,
            crate::Error::MissingRequiredField { field: "value" }
        );
    }

    #[test]
    fn decimal_keeps_scale_and_compares_numerically() {
        let a = FhirDecimal::new(Decimal::from_str("1.50").unwrap()).unwrap();
        let b = FhirDecimal::new(Decimal::from_str("1.5").unwrap()).unwrap();
        assert_eq!(a.value().unwrap().to_string(), "1.50");
        assert_eq!(a, b);
        assert_eq!(a.hash_code(), b.hash_code());
    }

    #[test]
    fn to_builder_round_trip() {
        let original = FhirString::builder().id("s1").value("text").build().unwrap();
        let copy = original.to_builder().build().unwrap();
        assert_eq!(original, copy);
        let changed = original.to_builder().value("other").build().unwrap();
        assert_ne!(original, changed);
        assert_eq!(original.as_str(), Some("text"));
    }

    #[test]
    fn type_info_describes_value() {
        let info = Code::type_info();
        assert_eq!(info.name, "code");
        assert_eq!(info.fields.len(), 3);
        assert!(info.field("value").unwrap().cardinality.is_optional());
        assert!(Xhtml::type_info().field("value").unwrap().is_required());
    }
}

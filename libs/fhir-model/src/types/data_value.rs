use crate::choice::ChoiceType;
use crate::types::{
    Annotation, Boolean, Code, CodeableConcept, Coding, Date, DateTime, FhirDecimal, FhirString,
    Id, Identifier, Instant, Integer, Meta, Period, PositiveInt, Quantity, Reference, Uri,
};
use crate::visitor::{Visitable, Visitor};

/// Value of a data-type choice element such as `Observation.value[x]`.
///
/// The enum covers every data type this crate models that may appear in a choice. Which
/// variants a particular element accepts is decided by its allow-list at build time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataValue {
    Boolean(Boolean),
    Integer(Integer),
    PositiveInt(PositiveInt),
    Decimal(FhirDecimal),
    String(FhirString),
    Uri(Uri),
    Code(Code),
    Id(Id),
    Date(Date),
    DateTime(DateTime),
    Instant(Instant),
    Annotation(Box<Annotation>),
    CodeableConcept(Box<CodeableConcept>),
    Coding(Box<Coding>),
    Identifier(Box<Identifier>),
    Meta(Box<Meta>),
    Period(Box<Period>),
    Quantity(Box<Quantity>),
    Reference(Box<Reference>),
}

macro_rules! dispatch {
    ($self:ident, $v:ident => $body:expr) => {
        match $self {
            DataValue::Boolean($v) => $body,
            DataValue::Integer($v) => $body,
            DataValue::PositiveInt($v) => $body,
            DataValue::Decimal($v) => $body,
            DataValue::String($v) => $body,
            DataValue::Uri($v) => $body,
            DataValue::Code($v) => $body,
            DataValue::Id($v) => $body,
            DataValue::Date($v) => $body,
            DataValue::DateTime($v) => $body,
            DataValue::Instant($v) => $body,
            DataValue::Annotation($v) => $body,
            DataValue::CodeableConcept($v) => $body,
            DataValue::Coding($v) => $body,
            DataValue::Identifier($v) => $body,
            DataValue::Meta($v) => $body,
            DataValue::Period($v) => $body,
            DataValue::Quantity($v) => $body,
            DataValue::Reference($v) => $body,
        }
    };
}

impl DataValue {
    /// FHIR type name of the held value ("Quantity", "string", ...)
    pub fn type_name(&self) -> &'static str {
        dispatch!(self, v => v.type_name())
    }
}

impl ChoiceType for DataValue {
    fn type_name(&self) -> &'static str {
        DataValue::type_name(self)
    }
}

impl Visitable for DataValue {
    fn type_name(&self) -> &'static str {
        DataValue::type_name(self)
    }

    /// The value is visited as itself; there is no wrapper node
    fn accept<'a>(&'a self, name: &'static str, index: Option<usize>, visitor: &mut dyn Visitor<'a>) {
        dispatch!(self, v => v.accept(name, index, visitor))
    }
}

macro_rules! data_value_conversions {
    (inline: $($variant:ident($ty:ty) => $as_fn:ident),+ ; boxed: $($bvariant:ident($bty:ty) => $bas_fn:ident),+ $(;)?) => {
        $(
            impl From<$ty> for DataValue {
                fn from(value: $ty) -> Self {
                    DataValue::$variant(value)
                }
            }
        )+
        $(
            impl From<$bty> for DataValue {
                fn from(value: $bty) -> Self {
                    DataValue::$bvariant(Box::new(value))
                }
            }
        )+

        impl DataValue {
            $(
                pub fn $as_fn(&self) -> Option<&$ty> {
                    match self {
                        DataValue::$variant(v) => Some(v),
                        _ => None,
                    }
                }
            )+
            $(
                pub fn $bas_fn(&self) -> Option<&$bty> {
                    match self {
                        DataValue::$bvariant(v) => Some(v),
                        _ => None,
                    }
                }
            )+
        }
    };
}

data_value_conversions! {
    inline:
        Boolean(Boolean) => as_boolean,
        Integer(Integer) => as_integer,
        PositiveInt(PositiveInt) => as_positive_int,
        Decimal(FhirDecimal) => as_decimal,
        String(FhirString) => as_string,
        Uri(Uri) => as_uri,
        Code(Code) => as_code,
        Id(Id) => as_id,
        Date(Date) => as_date,
        DateTime(DateTime) => as_date_time,
        Instant(Instant) => as_instant;
    boxed:
        Annotation(Annotation) => as_annotation,
        CodeableConcept(CodeableConcept) => as_codeable_concept,
        Coding(Coding) => as_coding,
        Identifier(Identifier) => as_identifier,
        Meta(Meta) => as_meta,
        Period(Period) => as_period,
        Quantity(Quantity) => as_quantity,
        Reference(Reference) => as_reference;
}

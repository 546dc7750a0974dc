use crate::base::{impl_element, ElementBase};
use crate::error::Result;
use crate::hash::{cached_hash, HashCache};
use crate::metadata::{base_fields, Cardinality, FieldInfo, FieldKind, ModelType, TypeInfo, TypeKind};
use crate::types::{Boolean, Code, FhirString, Uri};
use crate::validation;
use crate::visitor::{accept_opt, visit_node, ElementRef, Node, Visitable, Visitor};

/// A reference to a code defined by a terminology system
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coding {
    element: ElementBase,
    system: Option<Uri>,
    version: Option<FhirString>,
    code: Option<Code>,
    display: Option<FhirString>,
    user_selected: Option<Boolean>,
    hash: HashCache,
}

cached_hash!(Coding {
    element,
    system,
    version,
    code,
    display,
    user_selected,
});

static INFO: TypeInfo = TypeInfo {
    name: "Coding",
    kind: TypeKind::ComplexType,
    base: Some("Element"),
    fields: &[
        base_fields::ELEMENT_ID,
        base_fields::ELEMENT_EXTENSION,
        FieldInfo::new("system", &["uri"], "Coding", Cardinality::OPTIONAL, FieldKind::Primitive)
            .summary(),
        FieldInfo::new("version", &["string"], "Coding", Cardinality::OPTIONAL, FieldKind::Primitive)
            .summary(),
        FieldInfo::new("code", &["code"], "Coding", Cardinality::OPTIONAL, FieldKind::Primitive)
            .summary(),
        FieldInfo::new("display", &["string"], "Coding", Cardinality::OPTIONAL, FieldKind::Primitive)
            .summary(),
        FieldInfo::new(
            "userSelected",
            &["boolean"],
            "Coding",
            Cardinality::OPTIONAL,
            FieldKind::Primitive,
        )
        .summary(),
    ],
};

impl Coding {
    pub fn builder() -> CodingBuilder {
        CodingBuilder::default()
    }

    pub fn to_builder(&self) -> CodingBuilder {
        CodingBuilder::from(self.clone())
    }

    /// Identity of the terminology system
    pub fn system(&self) -> Option<&Uri> {
        self.system.as_ref()
    }

    pub fn version(&self) -> Option<&FhirString> {
        self.version.as_ref()
    }

    pub fn code(&self) -> Option<&Code> {
        self.code.as_ref()
    }

    pub fn display(&self) -> Option<&FhirString> {
        self.display.as_ref()
    }

    pub fn user_selected(&self) -> Option<&Boolean> {
        self.user_selected.as_ref()
    }

    /// True when both system and code match
    pub fn matches(&self, system: &str, code: &str) -> bool {
        self.system.as_ref().and_then(|s| s.as_str()) == Some(system)
            && self.code.as_ref().and_then(|c| c.as_str()) == Some(code)
    }

    fn has_fields(&self) -> bool {
        self.system.is_some()
            || self.version.is_some()
            || self.code.is_some()
            || self.display.is_some()
            || self.user_selected.is_some()
    }
}

impl ModelType for Coding {
    const TYPE_NAME: &'static str = "Coding";
    const KIND: TypeKind = TypeKind::ComplexType;

    fn type_info() -> &'static TypeInfo {
        &INFO
    }
}

impl Visitable for Coding {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn accept<'a>(&'a self, name: &'static str, index: Option<usize>, visitor: &mut dyn Visitor<'a>) {
        visit_node(Node::Element(ElementRef::Coding(self)), name, index, visitor, |visitor| {
            self.element.accept_children(visitor);
            accept_opt(self.system.as_ref(), "system", visitor);
            accept_opt(self.version.as_ref(), "version", visitor);
            accept_opt(self.code.as_ref(), "code", visitor);
            accept_opt(self.display.as_ref(), "display", visitor);
            accept_opt(self.user_selected.as_ref(), "userSelected", visitor);
        });
    }
}

#[derive(Debug, Clone, Default)]
pub struct CodingBuilder {
    element: ElementBase,
    system: Option<Uri>,
    version: Option<FhirString>,
    code: Option<Code>,
    display: Option<FhirString>,
    user_selected: Option<Boolean>,
}

impl CodingBuilder {
    pub fn system(mut self, system: impl Into<Option<Uri>>) -> Self {
        self.system = system.into();
        self
    }

    pub fn version(mut self, version: impl Into<Option<FhirString>>) -> Self {
        self.version = version.into();
        self
    }

    pub fn code(mut self, code: impl Into<Option<Code>>) -> Self {
        self.code = code.into();
        self
    }

    pub fn display(mut self, display: impl Into<Option<FhirString>>) -> Self {
        self.display = display.into();
        self
    }

    pub fn user_selected(mut self, user_selected: impl Into<Option<Boolean>>) -> Self {
        self.user_selected = user_selected.into();
        self
    }

    pub fn build(self) -> Result<Coding> {
        self.element.validate()?;
        let coding = Coding {
            element: self.element,
            system: self.system,
            version: self.version,
            code: self.code,
            display: self.display,
            user_selected: self.user_selected,
            hash: HashCache::new(),
        };
        validation::require_value_or_children(
            false,
            coding.has_fields() || coding.element.has_children(),
            Coding::TYPE_NAME,
        )?;
        Ok(coding)
    }
}

impl From<Coding> for CodingBuilder {
    fn from(coding: Coding) -> Self {
        Self {
            element: coding.element,
            system: coding.system,
            version: coding.version,
            code: coding.code,
            display: coding.display,
            user_selected: coding.user_selected,
        }
    }
}

impl_element!(Coding, CodingBuilder);

#[cfg(test)]
mod tests {
    use super::*;

    fn loinc(code: &str) -> Coding {
        Coding::builder()
            .system(Uri::new("http://loinc.org").unwrap())
            .code(Code::new(code).unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn matches_system_and_code() {
        let coding = loinc("8867-4");
        assert!(coding.matches("http://loinc.org", "8867-4"));
        assert!(!coding.matches("http://snomed.info/sct", "8867-4"));
    }

    #[test]
    fn empty_coding_is_rejected() {
        let err = Coding::builder().build().unwrap_err();
        assert_eq!(err.field(), Some("Coding"));
    }

    #[test]
    fn setter_accepts_none_to_clear() {
        let coding = loinc("8867-4");
        let cleared = coding
            .to_builder()
            .system(None)
            .build()
            .unwrap();
        assert!(cleared.system().is_none());
        assert!(coding.system().is_some());
    }

    #[test]
    fn equal_values_hash_equal() {
        assert_eq!(loinc("1"), loinc("1"));
        assert_eq!(loinc("1").hash_code(), loinc("1").hash_code());
        assert_ne!(loinc("1"), loinc("2"));
    }
}

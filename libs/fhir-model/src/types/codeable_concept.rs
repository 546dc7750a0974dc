use crate::base::{impl_element, ElementBase};
use crate::error::Result;
use crate::hash::{cached_hash, HashCache};
use crate::metadata::{base_fields, Cardinality, FieldInfo, FieldKind, ModelType, TypeInfo, TypeKind};
use crate::types::{Coding, FhirString};
use crate::validation;
use crate::visitor::{accept_list, accept_opt, visit_node, ElementRef, Node, Visitable, Visitor};

/// A concept given by one or more codings and/or plain text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeableConcept {
    element: ElementBase,
    coding: Vec<Coding>,
    text: Option<FhirString>,
    hash: HashCache,
}

cached_hash!(CodeableConcept { element, coding, text });

static INFO: TypeInfo = TypeInfo {
    name: "CodeableConcept",
    kind: TypeKind::ComplexType,
    base: Some("Element"),
    fields: &[
        base_fields::ELEMENT_ID,
        base_fields::ELEMENT_EXTENSION,
        FieldInfo::new("coding", &["Coding"], "CodeableConcept", Cardinality::LIST, FieldKind::Complex)
            .summary(),
        FieldInfo::new("text", &["string"], "CodeableConcept", Cardinality::OPTIONAL, FieldKind::Primitive)
            .summary(),
    ],
};

impl CodeableConcept {
    pub fn builder() -> CodeableConceptBuilder {
        CodeableConceptBuilder::default()
    }

    pub fn to_builder(&self) -> CodeableConceptBuilder {
        CodeableConceptBuilder::from(self.clone())
    }

    pub fn coding(&self) -> &[Coding] {
        &self.coding
    }

    pub fn text(&self) -> Option<&FhirString> {
        self.text.as_ref()
    }

    /// Whether any coding carries the given system and code
    pub fn has_coding(&self, system: &str, code: &str) -> bool {
        self.coding.iter().any(|c| c.matches(system, code))
    }
}

impl ModelType for CodeableConcept {
    const TYPE_NAME: &'static str = "CodeableConcept";
    const KIND: TypeKind = TypeKind::ComplexType;

    fn type_info() -> &'static TypeInfo {
        &INFO
    }
}

impl Visitable for CodeableConcept {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn accept<'a>(&'a self, name: &'static str, index: Option<usize>, visitor: &mut dyn Visitor<'a>) {
        visit_node(Node::Element(ElementRef::CodeableConcept(self)), name, index, visitor, |visitor| {
            self.element.accept_children(visitor);
            accept_list(&self.coding, "coding", "Coding", visitor);
            accept_opt(self.text.as_ref(), "text", visitor);
        });
    }
}

#[derive(Debug, Clone, Default)]
pub struct CodeableConceptBuilder {
    element: ElementBase,
    coding: Vec<Coding>,
    text: Option<FhirString>,
}

impl CodeableConceptBuilder {
    /// Appends to `coding`
    pub fn coding(mut self, coding: impl IntoIterator<Item = Coding>) -> Self {
        self.coding.extend(coding);
        self
    }

    /// Replaces `coding`
    pub fn set_coding(mut self, coding: impl IntoIterator<Item = Coding>) -> Self {
        self.coding = coding.into_iter().collect();
        self
    }

    pub fn text(mut self, text: impl Into<Option<FhirString>>) -> Self {
        self.text = text.into();
        self
    }

    pub fn build(self) -> Result<CodeableConcept> {
        self.element.validate()?;
        validation::require_value_or_children(
            false,
            !self.coding.is_empty() || self.text.is_some() || self.element.has_children(),
            CodeableConcept::TYPE_NAME,
        )?;
        Ok(CodeableConcept {
            element: self.element,
            coding: self.coding,
            text: self.text,
            hash: HashCache::new(),
        })
    }
}

impl From<CodeableConcept> for CodeableConceptBuilder {
    fn from(concept: CodeableConcept) -> Self {
        Self {
            element: concept.element,
            coding: concept.coding,
            text: concept.text,
        }
    }
}

impl_element!(CodeableConcept, CodeableConceptBuilder);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Code, Uri};

    fn coding(code: &str) -> Coding {
        Coding::builder()
            .system(Uri::new("http://loinc.org").unwrap())
            .code(Code::new(code).unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn list_setters_append_and_replace() {
        let concept = CodeableConcept::builder()
            .coding([coding("a")])
            .coding([coding("b")])
            .build()
            .unwrap();
        assert_eq!(concept.coding().len(), 2);

        let replaced = concept.to_builder().set_coding([coding("c")]).build().unwrap();
        assert_eq!(replaced.coding().len(), 1);
        assert!(replaced.has_coding("http://loinc.org", "c"));
        assert_eq!(concept.coding().len(), 2);
    }

    #[test]
    fn text_alone_is_enough() {
        let concept = CodeableConcept::builder()
            .text(FhirString::new("Heart rate").unwrap())
            .build()
            .unwrap();
        assert!(concept.coding().is_empty());
    }
}

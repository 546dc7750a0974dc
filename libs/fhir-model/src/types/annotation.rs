use crate::base::{impl_element, ElementBase};
use crate::choice::ANNOTATION_AUTHOR_TYPES;
use crate::error::Result;
use crate::hash::{cached_hash, HashCache};
use crate::metadata::{base_fields, Cardinality, FieldInfo, FieldKind, ModelType, TypeInfo, TypeKind};
use crate::types::{DataValue, DateTime, FhirString};
use crate::validation;
use crate::visitor::{accept_opt, visit_node, ElementRef, Node, Visitable, Visitor};

const AUTHOR_TARGETS: &[&str] = &["Practitioner", "Patient", "RelatedPerson", "Organization"];

/// A text note with attribution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    element: ElementBase,
    author: Option<DataValue>,
    time: Option<DateTime>,
    text: FhirString,
    hash: HashCache,
}

cached_hash!(Annotation { element, author, time, text });

static INFO: TypeInfo = TypeInfo {
    name: "Annotation",
    kind: TypeKind::ComplexType,
    base: Some("Element"),
    fields: &[
        base_fields::ELEMENT_ID,
        base_fields::ELEMENT_EXTENSION,
        FieldInfo::choice("author", "Annotation", Cardinality::OPTIONAL, &ANNOTATION_AUTHOR_TYPES)
            .references(AUTHOR_TARGETS)
            .summary(),
        FieldInfo::new("time", &["dateTime"], "Annotation", Cardinality::OPTIONAL, FieldKind::Primitive)
            .summary(),
        FieldInfo::new("text", &["markdown"], "Annotation", Cardinality::REQUIRED, FieldKind::Primitive)
            .summary(),
    ],
};

impl Annotation {
    pub fn builder() -> AnnotationBuilder {
        AnnotationBuilder::default()
    }

    pub fn to_builder(&self) -> AnnotationBuilder {
        AnnotationBuilder::from(self.clone())
    }

    /// Reference or string
    pub fn author(&self) -> Option<&DataValue> {
        self.author.as_ref()
    }

    pub fn time(&self) -> Option<&DateTime> {
        self.time.as_ref()
    }

    pub fn text(&self) -> &FhirString {
        &self.text
    }
}

impl ModelType for Annotation {
    const TYPE_NAME: &'static str = "Annotation";
    const KIND: TypeKind = TypeKind::ComplexType;

    fn type_info() -> &'static TypeInfo {
        &INFO
    }
}

impl Visitable for Annotation {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn accept<'a>(&'a self, name: &'static str, index: Option<usize>, visitor: &mut dyn Visitor<'a>) {
        visit_node(Node::Element(ElementRef::Annotation(self)), name, index, visitor, |visitor| {
            self.element.accept_children(visitor);
            accept_opt(self.author.as_ref(), "author", visitor);
            accept_opt(self.time.as_ref(), "time", visitor);
            self.text.accept("text", None, visitor);
        });
    }
}

#[derive(Debug, Clone, Default)]
pub struct AnnotationBuilder {
    element: ElementBase,
    author: Option<DataValue>,
    time: Option<DateTime>,
    text: Option<FhirString>,
}

impl AnnotationBuilder {
    pub fn author(mut self, author: impl Into<DataValue>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn clear_author(mut self) -> Self {
        self.author = None;
        self
    }

    pub fn time(mut self, time: impl Into<Option<DateTime>>) -> Self {
        self.time = time.into();
        self
    }

    pub fn text(mut self, text: impl Into<Option<FhirString>>) -> Self {
        self.text = text.into();
        self
    }

    pub fn build(self) -> Result<Annotation> {
        self.element.validate()?;
        let author = validation::check_choice(self.author, "author", &ANNOTATION_AUTHOR_TYPES)?;
        validation::check_reference_choice(author.as_ref(), "author", AUTHOR_TARGETS)?;
        let text = validation::require(self.text, "text")?;
        Ok(Annotation {
            element: self.element,
            author,
            time: self.time,
            text,
            hash: HashCache::new(),
        })
    }
}

impl From<Annotation> for AnnotationBuilder {
    fn from(annotation: Annotation) -> Self {
        Self {
            element: annotation.element,
            author: annotation.author,
            time: annotation.time,
            text: Some(annotation.text),
        }
    }
}

impl_element!(Annotation, AnnotationBuilder);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Boolean, Reference};
    use crate::Error;

    fn note() -> AnnotationBuilder {
        Annotation::builder().text(FhirString::new("Patient was fasting").unwrap())
    }

    #[test]
    fn author_accepts_string_or_reference() {
        let by_name = note()
            .author(FhirString::new("Dr. Who").unwrap())
            .build()
            .unwrap();
        assert_eq!(by_name.author().unwrap().type_name(), "string");

        let by_ref = note()
            .author(
                Reference::builder()
                    .reference(FhirString::new("Practitioner/pr1").unwrap())
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap();
        assert_eq!(by_ref.author().unwrap().type_name(), "Reference");
    }

    #[test]
    fn author_rejects_other_types() {
        let err = note().author(Boolean::new(true).unwrap()).build().unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidChoiceType { field: "author", actual: "boolean", .. }
        ));
    }

    #[test]
    fn author_reference_target_is_checked() {
        let err = note()
            .author(
                Reference::builder()
                    .reference(FhirString::new("Device/d1").unwrap())
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap_err();
        assert_eq!(err.field(), Some("author"));
    }

    #[test]
    fn text_is_required() {
        let err = Annotation::builder().build().unwrap_err();
        assert_eq!(err, Error::MissingRequiredField { field: "text" });
    }
}

//! Base types of the FHIR hierarchy
//!
//! FHIR models `Element`, `BackboneElement`, `Resource` and `DomainResource` as an
//! inheritance chain. Here each level is a plain struct embedded by composition
//! (`BackboneElementBase` contains an `ElementBase`, `DomainResourceBase` contains a
//! `ResourceBase`) and concrete types embed the level they derive from.
//!
//! Shared behavior is exposed through capability traits:
//!
//! | Trait | Implemented by |
//! |-------|----------------|
//! | [`HasExtensions`] | elements, domain resources |
//! | [`HasModifierExtensions`] | backbone elements, domain resources |
//! | [`Element`] / [`BackboneElement`] | data types / backbone elements |
//! | [`Resource`] / [`DomainResource`] | resources |
//!
//! The matching builder traits ([`ElementBuilder`], [`ResourceBuilder`], ...) provide the
//! inherited setters once, on top of a single accessor each concrete builder implements.

use crate::error::Result;
use crate::resources::AnyResource;
use crate::types::{Code, Extension, Meta, Narrative, Uri};
use crate::validation;
use crate::visitor::{accept_list, accept_opt, accept_value, PrimitiveValue, Visitor};

/// Data carried by every element: `id` and `extension`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ElementBase {
    pub(crate) id: Option<String>,
    pub(crate) extension: Vec<Extension>,
}

impl ElementBase {
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn extension(&self) -> &[Extension] {
        &self.extension
    }

    /// `id` does not count as a child for ele-1
    pub fn has_children(&self) -> bool {
        !self.extension.is_empty()
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if let Some(id) = &self.id {
            validation::check_string(id, "id")?;
        }
        Ok(())
    }

    pub(crate) fn accept_children<'a>(&'a self, visitor: &mut dyn Visitor<'a>) {
        accept_value(self.id.as_deref().map(PrimitiveValue::String), "id", visitor);
        accept_list(&self.extension, "extension", "Extension", visitor);
    }
}

/// Element data plus `modifierExtension`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BackboneElementBase {
    pub(crate) element: ElementBase,
    pub(crate) modifier_extension: Vec<Extension>,
}

impl BackboneElementBase {
    pub fn element(&self) -> &ElementBase {
        &self.element
    }

    pub fn modifier_extension(&self) -> &[Extension] {
        &self.modifier_extension
    }

    pub fn has_children(&self) -> bool {
        self.element.has_children() || !self.modifier_extension.is_empty()
    }

    pub(crate) fn validate(&self) -> Result<()> {
        self.element.validate()
    }

    pub(crate) fn accept_children<'a>(&'a self, visitor: &mut dyn Visitor<'a>) {
        self.element.accept_children(visitor);
        accept_list(
            &self.modifier_extension,
            "modifierExtension",
            "Extension",
            visitor,
        );
    }
}

/// Data carried by every resource: `id`, `meta`, `implicitRules`, `language`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ResourceBase {
    pub(crate) id: Option<String>,
    pub(crate) meta: Option<Meta>,
    pub(crate) implicit_rules: Option<Uri>,
    pub(crate) language: Option<Code>,
}

impl ResourceBase {
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn meta(&self) -> Option<&Meta> {
        self.meta.as_ref()
    }

    pub fn implicit_rules(&self) -> Option<&Uri> {
        self.implicit_rules.as_ref()
    }

    pub fn language(&self) -> Option<&Code> {
        self.language.as_ref()
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if let Some(id) = &self.id {
            validation::check_id(id, "id")?;
        }
        Ok(())
    }

    pub(crate) fn accept_children<'a>(&'a self, visitor: &mut dyn Visitor<'a>) {
        accept_value(self.id.as_deref().map(PrimitiveValue::String), "id", visitor);
        accept_opt(self.meta.as_ref(), "meta", visitor);
        accept_opt(self.implicit_rules.as_ref(), "implicitRules", visitor);
        accept_opt(self.language.as_ref(), "language", visitor);
    }
}

/// Resource data plus `text`, `contained`, `extension`, `modifierExtension`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DomainResourceBase {
    pub(crate) resource: ResourceBase,
    pub(crate) text: Option<Narrative>,
    pub(crate) contained: Vec<AnyResource>,
    pub(crate) extension: Vec<Extension>,
    pub(crate) modifier_extension: Vec<Extension>,
}

impl DomainResourceBase {
    pub fn resource(&self) -> &ResourceBase {
        &self.resource
    }

    pub fn text(&self) -> Option<&Narrative> {
        self.text.as_ref()
    }

    pub fn contained(&self) -> &[AnyResource] {
        &self.contained
    }

    pub fn extension(&self) -> &[Extension] {
        &self.extension
    }

    pub fn modifier_extension(&self) -> &[Extension] {
        &self.modifier_extension
    }

    pub(crate) fn validate(&self) -> Result<()> {
        self.resource.validate()
    }

    pub(crate) fn accept_children<'a>(&'a self, visitor: &mut dyn Visitor<'a>) {
        self.resource.accept_children(visitor);
        accept_opt(self.text.as_ref(), "text", visitor);
        accept_list(&self.contained, "contained", "Resource", visitor);
        accept_list(&self.extension, "extension", "Extension", visitor);
        accept_list(
            &self.modifier_extension,
            "modifierExtension",
            "Extension",
            visitor,
        );
    }
}

/// Types that carry `extension`
pub trait HasExtensions {
    fn extension(&self) -> &[Extension];

    /// First extension with the given url
    fn find_extension(&self, url: &str) -> Option<&Extension> {
        self.extension().iter().find(|e| e.url() == url)
    }

    fn has_extension(&self, url: &str) -> bool {
        self.find_extension(url).is_some()
    }
}

/// Types that carry `modifierExtension`
pub trait HasModifierExtensions {
    fn modifier_extension(&self) -> &[Extension];

    fn has_modifier_extension(&self, url: &str) -> bool {
        self.modifier_extension().iter().any(|e| e.url() == url)
    }
}

/// Every data type and backbone element
pub trait Element: HasExtensions {
    fn element_base(&self) -> &ElementBase;

    fn id(&self) -> Option<&str> {
        self.element_base().id()
    }
}

pub trait BackboneElement: Element + HasModifierExtensions {
    fn backbone_base(&self) -> &BackboneElementBase;
}

/// Every resource; the addressable root of a graph
pub trait Resource {
    fn resource_base(&self) -> &ResourceBase;

    /// Logical id, the last path segment of the resource's URL
    fn id(&self) -> Option<&str> {
        self.resource_base().id()
    }

    fn meta(&self) -> Option<&Meta> {
        self.resource_base().meta()
    }

    fn implicit_rules(&self) -> Option<&Uri> {
        self.resource_base().implicit_rules()
    }

    fn language(&self) -> Option<&Code> {
        self.resource_base().language()
    }
}

/// Resources with narrative, contained resources and extensions
pub trait DomainResource: Resource + HasExtensions + HasModifierExtensions {
    fn domain_base(&self) -> &DomainResourceBase;

    fn text(&self) -> Option<&Narrative> {
        self.domain_base().text()
    }

    fn contained(&self) -> &[AnyResource] {
        self.domain_base().contained()
    }

    /// Contained resource by local id, as targeted by a `#id` fragment reference
    fn find_contained(&self, id: &str) -> Option<&AnyResource> {
        self.contained()
            .iter()
            .find(|r| r.resource_base().id() == Some(id))
    }
}

/// Setters for `id` and `extension`, shared by every element builder
pub trait ElementBuilder: Sized {
    fn element_base_mut(&mut self) -> &mut ElementBase;

    fn id(mut self, id: impl Into<String>) -> Self {
        self.element_base_mut().id = Some(id.into());
        self
    }

    /// Appends to `extension`
    fn extension(mut self, extension: impl IntoIterator<Item = Extension>) -> Self {
        self.element_base_mut().extension.extend(extension);
        self
    }

    /// Replaces `extension`
    fn set_extension(mut self, extension: impl IntoIterator<Item = Extension>) -> Self {
        self.element_base_mut().extension = extension.into_iter().collect();
        self
    }
}

pub trait BackboneElementBuilder: ElementBuilder {
    fn backbone_base_mut(&mut self) -> &mut BackboneElementBase;

    /// Appends to `modifierExtension`
    fn modifier_extension(mut self, extension: impl IntoIterator<Item = Extension>) -> Self {
        self.backbone_base_mut().modifier_extension.extend(extension);
        self
    }

    /// Replaces `modifierExtension`
    fn set_modifier_extension(mut self, extension: impl IntoIterator<Item = Extension>) -> Self {
        self.backbone_base_mut().modifier_extension = extension.into_iter().collect();
        self
    }
}

pub trait ResourceBuilder: Sized {
    fn resource_base_mut(&mut self) -> &mut ResourceBase;

    fn id(mut self, id: impl Into<String>) -> Self {
        self.resource_base_mut().id = Some(id.into());
        self
    }

    fn meta(mut self, meta: impl Into<Option<Meta>>) -> Self {
        self.resource_base_mut().meta = meta.into();
        self
    }

    fn implicit_rules(mut self, implicit_rules: impl Into<Option<Uri>>) -> Self {
        self.resource_base_mut().implicit_rules = implicit_rules.into();
        self
    }

    fn language(mut self, language: impl Into<Option<Code>>) -> Self {
        self.resource_base_mut().language = language.into();
        self
    }
}

pub trait DomainResourceBuilder: ResourceBuilder {
    fn domain_base_mut(&mut self) -> &mut DomainResourceBase;

    fn text(mut self, text: impl Into<Option<Narrative>>) -> Self {
        self.domain_base_mut().text = text.into();
        self
    }

    /// Appends to `contained`
    fn contained(mut self, contained: impl IntoIterator<Item = AnyResource>) -> Self {
        self.domain_base_mut().contained.extend(contained);
        self
    }

    /// Replaces `contained`
    fn set_contained(mut self, contained: impl IntoIterator<Item = AnyResource>) -> Self {
        self.domain_base_mut().contained = contained.into_iter().collect();
        self
    }

    /// Appends to `extension`
    fn extension(mut self, extension: impl IntoIterator<Item = Extension>) -> Self {
        self.domain_base_mut().extension.extend(extension);
        self
    }

    /// Replaces `extension`
    fn set_extension(mut self, extension: impl IntoIterator<Item = Extension>) -> Self {
        self.domain_base_mut().extension = extension.into_iter().collect();
        self
    }

    /// Appends to `modifierExtension`
    fn modifier_extension(mut self, extension: impl IntoIterator<Item = Extension>) -> Self {
        self.domain_base_mut().modifier_extension.extend(extension);
        self
    }

    /// Replaces `modifierExtension`
    fn set_modifier_extension(mut self, extension: impl IntoIterator<Item = Extension>) -> Self {
        self.domain_base_mut().modifier_extension = extension.into_iter().collect();
        self
    }
}

/// Capability and builder trait impls for a data type with an `element: ElementBase`
/// field, and its builder with the same field.
macro_rules! impl_element {
    ($ty:ty, $builder:ty) => {
        impl $crate::base::HasExtensions for $ty {
            fn extension(&self) -> &[$crate::types::Extension] {
                &self.element.extension
            }
        }

        impl $crate::base::Element for $ty {
            fn element_base(&self) -> &$crate::base::ElementBase {
                &self.element
            }
        }

        impl $crate::base::ElementBuilder for $builder {
            fn element_base_mut(&mut self) -> &mut $crate::base::ElementBase {
                &mut self.element
            }
        }
    };
}

/// Same as [`impl_element`] for backbone elements (`backbone: BackboneElementBase`)
macro_rules! impl_backbone_element {
    ($ty:ty, $builder:ty) => {
        impl $crate::base::HasExtensions for $ty {
            fn extension(&self) -> &[$crate::types::Extension] {
                &self.backbone.element.extension
            }
        }

        impl $crate::base::HasModifierExtensions for $ty {
            fn modifier_extension(&self) -> &[$crate::types::Extension] {
                &self.backbone.modifier_extension
            }
        }

        impl $crate::base::Element for $ty {
            fn element_base(&self) -> &$crate::base::ElementBase {
                &self.backbone.element
            }
        }

        impl $crate::base::BackboneElement for $ty {
            fn backbone_base(&self) -> &$crate::base::BackboneElementBase {
                &self.backbone
            }
        }

        impl $crate::base::ElementBuilder for $builder {
            fn element_base_mut(&mut self) -> &mut $crate::base::ElementBase {
                &mut self.backbone.element
            }
        }

        impl $crate::base::BackboneElementBuilder for $builder {
            fn backbone_base_mut(&mut self) -> &mut $crate::base::BackboneElementBase {
                &mut self.backbone
            }
        }
    };
}

/// Resources deriving directly from Resource (`resource: ResourceBase`)
macro_rules! impl_resource {
    ($ty:ty, $builder:ty) => {
        impl $crate::base::Resource for $ty {
            fn resource_base(&self) -> &$crate::base::ResourceBase {
                &self.resource
            }
        }

        impl $crate::base::ResourceBuilder for $builder {
            fn resource_base_mut(&mut self) -> &mut $crate::base::ResourceBase {
                &mut self.resource
            }
        }
    };
}

/// Resources deriving from DomainResource (`domain: DomainResourceBase`)
macro_rules! impl_domain_resource {
    ($ty:ty, $builder:ty) => {
        impl $crate::base::Resource for $ty {
            fn resource_base(&self) -> &$crate::base::ResourceBase {
                &self.domain.resource
            }
        }

        impl $crate::base::HasExtensions for $ty {
            fn extension(&self) -> &[$crate::types::Extension] {
                &self.domain.extension
            }
        }

        impl $crate::base::HasModifierExtensions for $ty {
            fn modifier_extension(&self) -> &[$crate::types::Extension] {
                &self.domain.modifier_extension
            }
        }

        impl $crate::base::DomainResource for $ty {
            fn domain_base(&self) -> &$crate::base::DomainResourceBase {
                &self.domain
            }
        }

        impl $crate::base::ResourceBuilder for $builder {
            fn resource_base_mut(&mut self) -> &mut $crate::base::ResourceBase {
                &mut self.domain.resource
            }
        }

        impl $crate::base::DomainResourceBuilder for $builder {
            fn domain_base_mut(&mut self) -> &mut $crate::base::DomainResourceBase {
                &mut self.domain
            }
        }
    };
}

pub(crate) use impl_backbone_element;
pub(crate) use impl_domain_resource;
pub(crate) use impl_element;
pub(crate) use impl_resource;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_id_is_not_a_child() {
        let base = ElementBase {
            id: Some("a1".into()),
            extension: Vec::new(),
        };
        assert!(!base.has_children());
    }

    #[test]
    fn element_id_must_be_a_valid_string() {
        let base = ElementBase {
            id: Some("  ".into()),
            extension: Vec::new(),
        };
        assert!(base.validate().is_err());
    }

    #[test]
    fn resource_id_must_be_a_valid_id() {
        let ok = ResourceBase {
            id: Some("obs-1".into()),
            ..Default::default()
        };
        assert!(ok.validate().is_ok());

        let bad = ResourceBase {
            id: Some("obs/1".into()),
            ..Default::default()
        };
        assert!(bad.validate().is_err());
    }
}

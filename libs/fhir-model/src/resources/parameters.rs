use crate::base::{impl_backbone_element, impl_resource, BackboneElementBase, ResourceBase};
use crate::choice::{ANY_RESOURCE_TYPES, OPEN_TYPES};
use crate::error::Result;
use crate::hash::{cached_hash, HashCache};
use crate::metadata::{base_fields, Cardinality, FieldInfo, FieldKind, ModelType, TypeInfo, TypeKind};
use crate::resources::AnyResource;
use crate::types::{DataValue, FhirString};
use crate::validation;
use crate::visitor::{
    accept_list, accept_opt, visit_node, ElementRef, Node, ResourceRef, Visitable, Visitor,
};

/// Operation request or response.
///
/// Derives from Resource directly, so it has no narrative, contained resources or
/// extensions of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameters {
    resource: ResourceBase,
    parameter: Vec<ParametersParameter>,
    hash: HashCache,
}

cached_hash!(Parameters { resource, parameter });

static INFO: TypeInfo = TypeInfo {
    name: "Parameters",
    kind: TypeKind::Resource,
    base: Some("Resource"),
    fields: &[
        base_fields::RESOURCE_ID,
        base_fields::RESOURCE_META,
        base_fields::RESOURCE_IMPLICIT_RULES,
        base_fields::RESOURCE_LANGUAGE,
        FieldInfo::new(
            "parameter",
            &["Parameters.parameter"],
            "Parameters",
            Cardinality::LIST,
            FieldKind::Backbone,
        ),
    ],
};

impl Parameters {
    pub fn builder() -> ParametersBuilder {
        ParametersBuilder::default()
    }

    pub fn to_builder(&self) -> ParametersBuilder {
        ParametersBuilder::from(self.clone())
    }

    pub fn parameter(&self) -> &[ParametersParameter] {
        &self.parameter
    }

    /// First top-level parameter with the given name
    pub fn find_parameter(&self, name: &str) -> Option<&ParametersParameter> {
        self.parameter.iter().find(|p| p.name.as_str() == Some(name))
    }
}

impl ModelType for Parameters {
    const TYPE_NAME: &'static str = "Parameters";
    const KIND: TypeKind = TypeKind::Resource;

    fn type_info() -> &'static TypeInfo {
        &INFO
    }
}

impl Visitable for Parameters {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn accept<'a>(&'a self, name: &'static str, index: Option<usize>, visitor: &mut dyn Visitor<'a>) {
        visit_node(Node::Resource(ResourceRef::Parameters(self)), name, index, visitor, |visitor| {
            self.resource.accept_children(visitor);
            accept_list(&self.parameter, "parameter", "Parameters.parameter", visitor);
        });
    }
}

#[derive(Debug, Clone, Default)]
pub struct ParametersBuilder {
    resource: ResourceBase,
    parameter: Vec<ParametersParameter>,
}

impl ParametersBuilder {
    /// Appends to `parameter`
    pub fn parameter(mut self, parameter: impl IntoIterator<Item = ParametersParameter>) -> Self {
        self.parameter.extend(parameter);
        self
    }

    /// Replaces `parameter`
    pub fn set_parameter(
        mut self,
        parameter: impl IntoIterator<Item = ParametersParameter>,
    ) -> Self {
        self.parameter = parameter.into_iter().collect();
        self
    }

    pub fn build(self) -> Result<Parameters> {
        self.resource.validate()?;
        Ok(Parameters {
            resource: self.resource,
            parameter: self.parameter,
            hash: HashCache::new(),
        })
    }
}

impl From<Parameters> for ParametersBuilder {
    fn from(parameters: Parameters) -> Self {
        Self {
            resource: parameters.resource,
            parameter: parameters.parameter,
        }
    }
}

impl_resource!(Parameters, ParametersBuilder);

/// One named parameter: a value, a resource, or nested parts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParametersParameter {
    backbone: BackboneElementBase,
    name: FhirString,
    value: Option<DataValue>,
    resource: Option<AnyResource>,
    part: Vec<ParametersParameter>,
    hash: HashCache,
}

cached_hash!(ParametersParameter {
    backbone,
    name,
    value,
    resource,
    part,
});

static PARAMETER_INFO: TypeInfo = TypeInfo {
    name: "Parameters.parameter",
    kind: TypeKind::BackboneElement,
    base: Some("BackboneElement"),
    fields: &[
        base_fields::ELEMENT_ID,
        base_fields::ELEMENT_EXTENSION,
        base_fields::MODIFIER_EXTENSION,
        FieldInfo::new(
            "name",
            &["string"],
            "Parameters.parameter",
            Cardinality::REQUIRED,
            FieldKind::Primitive,
        )
        .summary(),
        FieldInfo::choice("value", "Parameters.parameter", Cardinality::OPTIONAL, &OPEN_TYPES)
            .summary(),
        FieldInfo::choice(
            "resource",
            "Parameters.parameter",
            Cardinality::OPTIONAL,
            &ANY_RESOURCE_TYPES,
        )
        .summary(),
        FieldInfo::new(
            "part",
            &["Parameters.parameter"],
            "Parameters.parameter",
            Cardinality::LIST,
            FieldKind::Backbone,
        )
        .summary(),
    ],
};

impl ParametersParameter {
    pub fn builder() -> ParametersParameterBuilder {
        ParametersParameterBuilder::default()
    }

    pub fn to_builder(&self) -> ParametersParameterBuilder {
        ParametersParameterBuilder::from(self.clone())
    }

    pub fn name(&self) -> &FhirString {
        &self.name
    }

    pub fn value(&self) -> Option<&DataValue> {
        self.value.as_ref()
    }

    pub fn resource(&self) -> Option<&AnyResource> {
        self.resource.as_ref()
    }

    /// Named parts of a multi-part parameter
    pub fn part(&self) -> &[ParametersParameter] {
        &self.part
    }
}

impl ModelType for ParametersParameter {
    const TYPE_NAME: &'static str = "Parameters.parameter";
    const KIND: TypeKind = TypeKind::BackboneElement;

    fn type_info() -> &'static TypeInfo {
        &PARAMETER_INFO
    }
}

impl Visitable for ParametersParameter {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn accept<'a>(&'a self, name: &'static str, index: Option<usize>, visitor: &mut dyn Visitor<'a>) {
        visit_node(
            Node::Element(ElementRef::ParametersParameter(self)),
            name,
            index,
            visitor,
            |visitor| {
                self.backbone.accept_children(visitor);
                self.name.accept("name", None, visitor);
                accept_opt(self.value.as_ref(), "value", visitor);
                accept_opt(self.resource.as_ref(), "resource", visitor);
                accept_list(&self.part, "part", "Parameters.parameter", visitor);
            },
        );
    }
}

#[derive(Debug, Clone, Default)]
pub struct ParametersParameterBuilder {
    backbone: BackboneElementBase,
    name: Option<FhirString>,
    value: Option<DataValue>,
    resource: Option<AnyResource>,
    part: Vec<ParametersParameter>,
}

impl ParametersParameterBuilder {
    pub fn name(mut self, name: impl Into<Option<FhirString>>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets `value[x]`; any open data type is accepted
    pub fn value(mut self, value: impl Into<DataValue>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn clear_value(mut self) -> Self {
        self.value = None;
        self
    }

    pub fn resource(mut self, resource: impl Into<AnyResource>) -> Self {
        self.resource = Some(resource.into());
        self
    }

    pub fn clear_resource(mut self) -> Self {
        self.resource = None;
        self
    }

    /// Appends to `part`
    pub fn part(mut self, part: impl IntoIterator<Item = ParametersParameter>) -> Self {
        self.part.extend(part);
        self
    }

    /// Replaces `part`
    pub fn set_part(mut self, part: impl IntoIterator<Item = ParametersParameter>) -> Self {
        self.part = part.into_iter().collect();
        self
    }

    pub fn build(self) -> Result<ParametersParameter> {
        self.backbone.validate()?;
        let name = validation::require(self.name, "name")?;
        let value = validation::check_choice(self.value, "value", &OPEN_TYPES)?;
        let resource = validation::check_choice(self.resource, "resource", &ANY_RESOURCE_TYPES)?;
        Ok(ParametersParameter {
            backbone: self.backbone,
            name,
            value,
            resource,
            part: self.part,
            hash: HashCache::new(),
        })
    }
}

impl From<ParametersParameter> for ParametersParameterBuilder {
    fn from(parameter: ParametersParameter) -> Self {
        Self {
            backbone: parameter.backbone,
            name: Some(parameter.name),
            value: parameter.value,
            resource: parameter.resource,
            part: parameter.part,
        }
    }
}

impl_backbone_element!(ParametersParameter, ParametersParameterBuilder);

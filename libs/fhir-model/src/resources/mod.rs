//! FHIR resources

mod basic;
mod observation;
mod parameters;

pub use basic::{Basic, BasicBuilder};
pub use observation::{Observation, ObservationBuilder, ObservationComponent, ObservationComponentBuilder};
pub use parameters::{Parameters, ParametersBuilder, ParametersParameter, ParametersParameterBuilder};

use crate::base::{Resource, ResourceBase};
use crate::choice::ChoiceType;
use crate::visitor::{ResourceRef, Visitable, Visitor};

/// Any resource this crate models.
///
/// Used for `DomainResource.contained` and for resource-typed choice elements such
/// as `Parameters.parameter.resource`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AnyResource {
    Basic(Box<Basic>),
    Observation(Box<Observation>),
    Parameters(Box<Parameters>),
}

impl AnyResource {
    pub fn type_name(&self) -> &'static str {
        match self {
            AnyResource::Basic(r) => r.type_name(),
            AnyResource::Observation(r) => r.type_name(),
            AnyResource::Parameters(r) => r.type_name(),
        }
    }

    pub fn resource_base(&self) -> &ResourceBase {
        match self {
            AnyResource::Basic(r) => r.resource_base(),
            AnyResource::Observation(r) => r.resource_base(),
            AnyResource::Parameters(r) => r.resource_base(),
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.resource_base().id()
    }

    pub fn as_ref(&self) -> ResourceRef<'_> {
        match self {
            AnyResource::Basic(r) => ResourceRef::Basic(r),
            AnyResource::Observation(r) => ResourceRef::Observation(r),
            AnyResource::Parameters(r) => ResourceRef::Parameters(r),
        }
    }

    pub fn as_basic(&self) -> Option<&Basic> {
        match self {
            AnyResource::Basic(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_observation(&self) -> Option<&Observation> {
        match self {
            AnyResource::Observation(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_parameters(&self) -> Option<&Parameters> {
        match self {
            AnyResource::Parameters(r) => Some(r),
            _ => None,
        }
    }
}

impl ChoiceType for AnyResource {
    fn type_name(&self) -> &'static str {
        AnyResource::type_name(self)
    }
}

impl Visitable for AnyResource {
    fn type_name(&self) -> &'static str {
        AnyResource::type_name(self)
    }

    fn accept<'a>(&'a self, name: &'static str, index: Option<usize>, visitor: &mut dyn Visitor<'a>) {
        match self {
            AnyResource::Basic(r) => r.accept(name, index, visitor),
            AnyResource::Observation(r) => r.accept(name, index, visitor),
            AnyResource::Parameters(r) => r.accept(name, index, visitor),
        }
    }
}

impl From<Basic> for AnyResource {
    fn from(resource: Basic) -> Self {
        AnyResource::Basic(Box::new(resource))
    }
}

impl From<Observation> for AnyResource {
    fn from(resource: Observation) -> Self {
        AnyResource::Observation(Box::new(resource))
    }
}

impl From<Parameters> for AnyResource {
    fn from(resource: Parameters) -> Self {
        AnyResource::Parameters(Box::new(resource))
    }
}

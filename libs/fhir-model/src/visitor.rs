//! Depth-first traversal of model instances
//!
//! Every node accepts a [`Visitor`] with the same bracketed sequence:
//!
//! ```text
//! pre_visit(node)                      -> false skips the node entirely
//!   visit_start(name, index, node)
//!   visit(name, index, node)           -> false skips the children
//!     <children in declared order, inherited elements first>
//!   visit_end(name, index, node)
//! post_visit(node)
//! ```
//!
//! Repeating elements are bracketed by `visit_list_start`/`visit_list_end` and each
//! item receives its position as `index`. Plain values (ids, urls and the `value` of
//! primitive data types) are not nodes; they are reported through `visit_value`.

use crate::base::{Element, ElementBase, Resource, ResourceBase};
use crate::resources::{Basic, Observation, ObservationComponent, Parameters, ParametersParameter};
use crate::types::{
    Annotation, Boolean, Code, CodeableConcept, Coding, Date, DateTime, Extension, FhirDecimal,
    FhirString, Id, Identifier, Instant, Integer, Meta, Narrative, Period, PositiveInt, Quantity,
    Reference, Uri, Xhtml,
};

/// Borrowed view of any element-level node
#[derive(Debug, Clone, Copy)]
pub enum ElementRef<'a> {
    Boolean(&'a Boolean),
    Integer(&'a Integer),
    PositiveInt(&'a PositiveInt),
    Decimal(&'a FhirDecimal),
    String(&'a FhirString),
    Uri(&'a Uri),
    Code(&'a Code),
    Id(&'a Id),
    Date(&'a Date),
    DateTime(&'a DateTime),
    Instant(&'a Instant),
    Xhtml(&'a Xhtml),
    Extension(&'a Extension),
    Coding(&'a Coding),
    CodeableConcept(&'a CodeableConcept),
    Identifier(&'a Identifier),
    Reference(&'a Reference),
    Period(&'a Period),
    Quantity(&'a Quantity),
    Meta(&'a Meta),
    Narrative(&'a Narrative),
    Annotation(&'a Annotation),
    ObservationComponent(&'a ObservationComponent),
    ParametersParameter(&'a ParametersParameter),
}

macro_rules! element_ref_dispatch {
    ($self:ident, $e:ident => $body:expr) => {
        match *$self {
            ElementRef::Boolean($e) => $body,
            ElementRef::Integer($e) => $body,
            ElementRef::PositiveInt($e) => $body,
            ElementRef::Decimal($e) => $body,
            ElementRef::String($e) => $body,
            ElementRef::Uri($e) => $body,
            ElementRef::Code($e) => $body,
            ElementRef::Id($e) => $body,
            ElementRef::Date($e) => $body,
            ElementRef::DateTime($e) => $body,
            ElementRef::Instant($e) => $body,
            ElementRef::Xhtml($e) => $body,
            ElementRef::Extension($e) => $body,
            ElementRef::Coding($e) => $body,
            ElementRef::CodeableConcept($e) => $body,
            ElementRef::Identifier($e) => $body,
            ElementRef::Reference($e) => $body,
            ElementRef::Period($e) => $body,
            ElementRef::Quantity($e) => $body,
            ElementRef::Meta($e) => $body,
            ElementRef::Narrative($e) => $body,
            ElementRef::Annotation($e) => $body,
            ElementRef::ObservationComponent($e) => $body,
            ElementRef::ParametersParameter($e) => $body,
        }
    };
}

impl<'a> ElementRef<'a> {
    pub fn type_name(&self) -> &'static str {
        element_ref_dispatch!(self, e => Visitable::type_name(e))
    }

    /// Common element data (id, extension)
    pub fn element_base(&self) -> &'a ElementBase {
        element_ref_dispatch!(self, e => e.element_base())
    }
}

/// Borrowed view of any resource node
#[derive(Debug, Clone, Copy)]
pub enum ResourceRef<'a> {
    Basic(&'a Basic),
    Observation(&'a Observation),
    Parameters(&'a Parameters),
}

impl<'a> ResourceRef<'a> {
    pub fn type_name(&self) -> &'static str {
        match *self {
            ResourceRef::Basic(r) => r.type_name(),
            ResourceRef::Observation(r) => r.type_name(),
            ResourceRef::Parameters(r) => r.type_name(),
        }
    }

    pub fn resource_base(&self) -> &'a ResourceBase {
        match *self {
            ResourceRef::Basic(r) => r.resource_base(),
            ResourceRef::Observation(r) => r.resource_base(),
            ResourceRef::Parameters(r) => r.resource_base(),
        }
    }

    pub fn id(&self) -> Option<&'a str> {
        self.resource_base().id()
    }
}

/// A node handed to a [`Visitor`]
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    Element(ElementRef<'a>),
    Resource(ResourceRef<'a>),
}

impl<'a> Node<'a> {
    pub fn type_name(&self) -> &'static str {
        match self {
            Node::Element(e) => e.type_name(),
            Node::Resource(r) => r.type_name(),
        }
    }

    pub fn as_element(&self) -> Option<ElementRef<'a>> {
        match self {
            Node::Element(e) => Some(*e),
            Node::Resource(_) => None,
        }
    }

    pub fn as_resource(&self) -> Option<ResourceRef<'a>> {
        match self {
            Node::Resource(r) => Some(*r),
            Node::Element(_) => None,
        }
    }

    pub fn is_resource(&self) -> bool {
        matches!(self, Node::Resource(_))
    }
}

/// Plain value reported through [`Visitor::visit_value`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveValue<'a> {
    Boolean(bool),
    Integer(i32),
    Decimal(rust_decimal::Decimal),
    String(&'a str),
}

/// Callbacks for a depth-first walk.
///
/// Every hook has a no-op default; override only what you need. The lifetime lets a
/// visitor keep references to the nodes it sees.
pub trait Visitor<'a> {
    /// Return false to skip the node and its subtree without any further callbacks.
    fn pre_visit(&mut self, _node: Node<'a>) -> bool {
        true
    }

    fn visit_start(&mut self, _name: &'static str, _index: Option<usize>, _node: Node<'a>) {}

    /// Return false to skip the children; `visit_end` and `post_visit` still run.
    fn visit(&mut self, _name: &'static str, _index: Option<usize>, _node: Node<'a>) -> bool {
        true
    }

    fn visit_end(&mut self, _name: &'static str, _index: Option<usize>, _node: Node<'a>) {}

    fn post_visit(&mut self, _node: Node<'a>) {}

    /// Entering a non-empty repeating element
    fn visit_list_start(&mut self, _name: &'static str, _len: usize, _item_type: &'static str) {}

    fn visit_list_end(&mut self, _name: &'static str, _len: usize, _item_type: &'static str) {}

    fn visit_value(&mut self, _name: &'static str, _value: PrimitiveValue<'a>) {}
}

/// Implemented by every node type
pub trait Visitable {
    /// FHIR type name of this node
    fn type_name(&self) -> &'static str;

    /// Visit this node as child `name` (at `index` within a repeating element)
    fn accept<'a>(&'a self, name: &'static str, index: Option<usize>, visitor: &mut dyn Visitor<'a>);

    /// Visit this node as the root of a walk, named after its type
    fn walk<'a>(&'a self, visitor: &mut dyn Visitor<'a>) {
        self.accept(self.type_name(), None, visitor);
    }
}

/// Runs the bracketed callback sequence around `children`
pub(crate) fn visit_node<'a>(
    node: Node<'a>,
    name: &'static str,
    index: Option<usize>,
    visitor: &mut dyn Visitor<'a>,
    children: impl FnOnce(&mut dyn Visitor<'a>),
) {
    if !visitor.pre_visit(node) {
        return;
    }
    visitor.visit_start(name, index, node);
    if visitor.visit(name, index, node) {
        children(&mut *visitor);
    }
    visitor.visit_end(name, index, node);
    visitor.post_visit(node);
}

pub(crate) fn accept_opt<'a, T: Visitable + ?Sized>(
    value: Option<&'a T>,
    name: &'static str,
    visitor: &mut dyn Visitor<'a>,
) {
    if let Some(value) = value {
        value.accept(name, None, visitor);
    }
}

pub(crate) fn accept_list<'a, T: Visitable>(
    items: &'a [T],
    name: &'static str,
    item_type: &'static str,
    visitor: &mut dyn Visitor<'a>,
) {
    if items.is_empty() {
        return;
    }
    visitor.visit_list_start(name, items.len(), item_type);
    for (i, item) in items.iter().enumerate() {
        item.accept(name, Some(i), visitor);
    }
    visitor.visit_list_end(name, items.len(), item_type);
}

pub(crate) fn accept_value<'a>(
    value: Option<PrimitiveValue<'a>>,
    name: &'static str,
    visitor: &mut dyn Visitor<'a>,
) {
    if let Some(value) = value {
        visitor.visit_value(name, value);
    }
}

/// Collects every node of one FHIR type, in traversal order
pub struct CollectingVisitor<'a> {
    type_name: &'static str,
    collected: Vec<Node<'a>>,
}

impl<'a> CollectingVisitor<'a> {
    pub fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            collected: Vec::new(),
        }
    }

    pub fn result(&self) -> &[Node<'a>] {
        &self.collected
    }

    pub fn into_result(self) -> Vec<Node<'a>> {
        self.collected
    }
}

impl<'a> Visitor<'a> for CollectingVisitor<'a> {
    fn visit(&mut self, _name: &'static str, _index: Option<usize>, node: Node<'a>) -> bool {
        if node.type_name() == self.type_name {
            self.collected.push(node);
        }
        true
    }
}

/// Collects every node of one FHIR type below `root`
pub fn collect<'a, T: Visitable + ?Sized>(root: &'a T, type_name: &'static str) -> Vec<Node<'a>> {
    let mut collector = CollectingVisitor::new(type_name);
    root.walk(&mut collector);
    collector.into_result()
}

/// Dotted paths of every node in traversal order, e.g. `Observation.code.coding[0]`
#[derive(Debug, Default)]
pub struct PathVisitor {
    stack: Vec<String>,
    paths: Vec<String>,
}

impl PathVisitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    pub fn into_paths(self) -> Vec<String> {
        self.paths
    }
}

impl<'a> Visitor<'a> for PathVisitor {
    fn visit_start(&mut self, name: &'static str, index: Option<usize>, _node: Node<'a>) {
        let segment = match index {
            Some(i) => format!("{name}[{i}]"),
            None => name.to_string(),
        };
        let path = match self.stack.last() {
            Some(parent) => format!("{parent}.{segment}"),
            None => segment,
        };
        self.paths.push(path.clone());
        self.stack.push(path);
    }

    fn visit_end(&mut self, _name: &'static str, _index: Option<usize>, _node: Node<'a>) {
        self.stack.pop();
    }
}

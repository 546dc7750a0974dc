//! Traversal order, completeness and short-circuit behavior

use ferrum_model::prelude::*;
use ferrum_model::visitor::{ElementRef, PrimitiveValue, ResourceRef};
use ferrum_model::{
    collect, AnyResource, Basic, Code, Node, ObservationComponent, PathVisitor,
};

mod test_support;
use test_support::*;

/// Records every callback as a line of text
#[derive(Default)]
struct Recorder {
    events: Vec<String>,
    skip_children_of: Option<&'static str>,
    prune: Option<&'static str>,
}

impl<'a> Visitor<'a> for Recorder {
    fn pre_visit(&mut self, node: Node<'a>) -> bool {
        self.events.push(format!("pre {}", node.type_name()));
        self.prune != Some(node.type_name())
    }

    fn visit_start(&mut self, name: &'static str, index: Option<usize>, _node: Node<'a>) {
        self.events.push(format!("start {}", label(name, index)));
    }

    fn visit(&mut self, name: &'static str, _index: Option<usize>, _node: Node<'a>) -> bool {
        self.skip_children_of != Some(name)
    }

    fn visit_end(&mut self, name: &'static str, index: Option<usize>, _node: Node<'a>) {
        self.events.push(format!("end {}", label(name, index)));
    }

    fn post_visit(&mut self, node: Node<'a>) {
        self.events.push(format!("post {}", node.type_name()));
    }

    fn visit_list_start(&mut self, name: &'static str, len: usize, item_type: &'static str) {
        self.events.push(format!("list {name} {len} {item_type}"));
    }

    fn visit_list_end(&mut self, name: &'static str, _len: usize, _item_type: &'static str) {
        self.events.push(format!("/list {name}"));
    }

    fn visit_value(&mut self, name: &'static str, value: PrimitiveValue<'a>) {
        self.events.push(format!("value {name}={value:?}"));
    }
}

fn label(name: &str, index: Option<usize>) -> String {
    match index {
        Some(i) => format!("{name}[{i}]"),
        None => name.to_string(),
    }
}

fn position(events: &[String], needle: &str) -> usize {
    events
        .iter()
        .position(|e| e == needle)
        .unwrap_or_else(|| panic!("missing event {needle:?} in {events:#?}"))
}

#[test]
fn basic_visits_identifiers_in_append_order_before_code() {
    let basic = basic_with_two_identifiers();
    let mut recorder = Recorder::default();
    basic.walk(&mut recorder);
    let events = &recorder.events;

    assert_eq!(events.first().map(String::as_str), Some("pre Basic"));
    assert_eq!(events.last().map(String::as_str), Some("post Basic"));

    let list = position(events, "list identifier 2 Identifier");
    let first = position(events, "start identifier[0]");
    let second = position(events, "start identifier[1]");
    let list_end = position(events, "/list identifier");
    let code = position(events, "start code");
    assert!(list < first && first < second && second < list_end && list_end < code);

    assert!(events.contains(&"value value=String(\"first\")".to_string()));
    assert!(events.contains(&"value value=String(\"second\")".to_string()));
}

#[test]
fn every_node_is_bracketed_exactly_once() {
    let observation = heart_rate()
        .component([ObservationComponent::builder()
            .code(loinc("8480-6"))
            .value(quantity(120, "mmHg"))
            .build()
            .unwrap()])
        .build()
        .unwrap();

    let mut recorder = Recorder::default();
    observation.walk(&mut recorder);
    let count = |prefix: &str| recorder.events.iter().filter(|e| e.starts_with(prefix)).count();

    assert_eq!(count("pre "), count("post "));
    assert_eq!(count("start "), count("end "));
    assert_eq!(count("pre "), count("start "));
    assert_eq!(count("list "), count("/list "));
}

#[test]
fn declared_order_follows_inherited_elements() {
    let observation = heart_rate().build().unwrap();
    let mut paths = PathVisitor::new();
    observation.walk(&mut paths);

    let top_level: Vec<_> = paths
        .paths()
        .iter()
        .filter(|p| p.matches('.').count() == 1)
        .map(String::as_str)
        .collect();
    assert_eq!(
        top_level,
        [
            "Observation.status",
            "Observation.code",
            "Observation.subject",
            "Observation.value",
        ]
    );
    assert!(paths
        .paths()
        .contains(&"Observation.code.coding[0]".to_string()));
}

#[test]
fn visit_false_skips_children_but_closes_the_node() {
    let observation = heart_rate().build().unwrap();
    let mut recorder = Recorder {
        skip_children_of: Some("code"),
        ..Default::default()
    };
    observation.walk(&mut recorder);
    let events = &recorder.events;

    let start = position(events, "start code");
    let end = position(events, "end code");
    assert_eq!(end, start + 1, "children of code must be skipped");
    assert_eq!(events[end + 1], "post CodeableConcept");
    assert!(!events.iter().any(|e| e.starts_with("start coding")));
    assert_eq!(events.iter().filter(|e| *e == "end code").count(), 1);
}

#[test]
fn pre_visit_false_skips_the_whole_subtree() {
    let observation = heart_rate().build().unwrap();
    let mut recorder = Recorder {
        prune: Some("Reference"),
        ..Default::default()
    };
    observation.walk(&mut recorder);
    let events = &recorder.events;

    assert!(events.contains(&"pre Reference".to_string()));
    assert!(!events.contains(&"start subject".to_string()));
    assert!(!events.contains(&"end subject".to_string()));
    assert!(!events.contains(&"post Reference".to_string()));
    assert!(events.contains(&"start value".to_string()));
}

#[test]
fn resource_ids_and_urls_are_reported_as_values() {
    let observation = heart_rate().build().unwrap();
    let mut recorder = Recorder::default();
    observation.walk(&mut recorder);
    assert_eq!(recorder.events[2], "value id=String(\"heart-rate\")");
}

#[test]
fn collecting_visitor_finds_nested_nodes() {
    let observation = heart_rate()
        .category([concept("http://example.org/cat", "vital-signs")])
        .build()
        .unwrap();

    let codings = collect(&observation, "Coding");
    assert_eq!(codings.len(), 2);
    let codes: Vec<_> = codings
        .iter()
        .filter_map(|n| match n.as_element() {
            Some(ElementRef::Coding(c)) => c.code().and_then(Code::as_str),
            _ => None,
        })
        .collect();
    assert_eq!(codes, ["vital-signs", "8867-4"]);
}

#[test]
fn contained_resources_are_walked_as_resources() {
    let inner = Basic::builder()
        .id("inner")
        .code(concept("http://example.org/basic", "note"))
        .build()
        .unwrap();
    let observation = heart_rate().contained([AnyResource::from(inner)]).build().unwrap();

    let found = collect(&observation, "Basic");
    assert_eq!(found.len(), 1);
    match found[0].as_resource() {
        Some(ResourceRef::Basic(basic)) => assert_eq!(basic.id(), Some("inner")),
        other => panic!("unexpected node: {other:?}"),
    }
}

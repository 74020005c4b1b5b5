//! Knowledge-graph data model: graphs, nodes, relations and named views.
//!
//! Pure value records with builder-style construction and JSON snapshot
//! support. Endpoint integrity is not checked here; dangling relations are
//! dropped when a scene is resolved for rendering.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Free-form metadata bag attached to graphs, nodes and relations.
pub type Metadata = BTreeMap<String, PropertyValue>;

/// Error produced by JSON snapshot encode/decode.
#[derive(Debug, Error)]
pub enum ModelError {
	#[error("failed to serialize knowledge graph: {0}")]
	Serialize(#[source] serde_json::Error),
	#[error("failed to parse knowledge graph: {0}")]
	Parse(#[source] serde_json::Error),
}

/// A value carried by a [`Property`] or a [`Metadata`] entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
	Bool(bool),
	Number(f64),
	Text(String),
}

impl fmt::Display for PropertyValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			PropertyValue::Bool(b) => write!(f, "{b}"),
			PropertyValue::Number(n) => write!(f, "{n}"),
			PropertyValue::Text(s) => f.write_str(s),
		}
	}
}

impl From<&str> for PropertyValue {
	fn from(s: &str) -> Self {
		PropertyValue::Text(s.to_owned())
	}
}

impl From<String> for PropertyValue {
	fn from(s: String) -> Self {
		PropertyValue::Text(s)
	}
}

impl From<f64> for PropertyValue {
	fn from(n: f64) -> Self {
		PropertyValue::Number(n)
	}
}

impl From<i64> for PropertyValue {
	fn from(n: i64) -> Self {
		PropertyValue::Number(n as f64)
	}
}

impl From<bool> for PropertyValue {
	fn from(b: bool) -> Self {
		PropertyValue::Bool(b)
	}
}

/// Tag describing how a property value should be interpreted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PropertyKind {
	#[default]
	String,
	Number,
	Boolean,
	Date,
}

/// A typed key/value record. Repeated keys are kept as-is, in call order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Property {
	pub key: String,
	pub value: PropertyValue,
	#[serde(rename = "type", default)]
	pub kind: PropertyKind,
}

/// Location in source material a node was extracted from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SourceRef {
	pub file: String,
	#[serde(default)]
	pub line: Option<u32>,
}

/// A typed, labeled entity in the knowledge graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
	pub id: String,
	#[serde(rename = "type")]
	pub kind: String,
	pub label: String,
	#[serde(default)]
	pub description: String,
	#[serde(default)]
	pub properties: Vec<Property>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub source: Option<SourceRef>,
	#[serde(default)]
	pub metadata: Metadata,
}

impl Node {
	pub fn new(id: impl Into<String>, kind: impl Into<String>, label: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			kind: kind.into(),
			label: label.into(),
			description: String::new(),
			properties: Vec::new(),
			source: None,
			metadata: Metadata::new(),
		}
	}

	pub fn describe(mut self, description: impl Into<String>) -> Self {
		self.description = description.into();
		self
	}

	/// Append a typed property. Keys are not de-duplicated.
	pub fn add_property(
		mut self,
		key: impl Into<String>,
		value: impl Into<PropertyValue>,
		kind: PropertyKind,
	) -> Self {
		self.properties.push(Property {
			key: key.into(),
			value: value.into(),
			kind,
		});
		self
	}

	/// Shorthand for [`Node::add_property`] with the default STRING tag.
	pub fn property(self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
		self.add_property(key, value, PropertyKind::String)
	}

	pub fn with_source(mut self, file: impl Into<String>, line: Option<u32>) -> Self {
		self.source = Some(SourceRef {
			file: file.into(),
			line,
		});
		self
	}

	pub fn set_metadata(mut self, metadata: Metadata) -> Self {
		self.metadata = metadata;
		self
	}
}

fn default_weight() -> f64 {
	1.0
}

/// A typed, directed, weighted edge between two nodes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Relation {
	pub id: String,
	#[serde(rename = "type")]
	pub kind: String,
	pub label: String,
	pub source: String,
	pub target: String,
	#[serde(default)]
	pub properties: Vec<Property>,
	#[serde(default = "default_weight")]
	pub weight: f64,
	#[serde(default)]
	pub metadata: Metadata,
}

impl Relation {
	pub fn new(
		id: impl Into<String>,
		kind: impl Into<String>,
		label: impl Into<String>,
		source: impl Into<String>,
		target: impl Into<String>,
	) -> Self {
		Self {
			id: id.into(),
			kind: kind.into(),
			label: label.into(),
			source: source.into(),
			target: target.into(),
			properties: Vec::new(),
			weight: default_weight(),
			metadata: Metadata::new(),
		}
	}

	pub fn add_property(
		mut self,
		key: impl Into<String>,
		value: impl Into<PropertyValue>,
		kind: PropertyKind,
	) -> Self {
		self.properties.push(Property {
			key: key.into(),
			value: value.into(),
			kind,
		});
		self
	}

	pub fn property(self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
		self.add_property(key, value, PropertyKind::String)
	}

	/// Overwrite the weight. Rendered stroke width is `sqrt(weight)`.
	pub fn set_weight(mut self, weight: f64) -> Self {
		self.weight = weight;
		self
	}

	pub fn set_metadata(mut self, metadata: Metadata) -> Self {
		self.metadata = metadata;
		self
	}
}

/// Filter half of a view: allowed node/relation types, `None` = no restriction.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterSpec {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub node_types: Option<Vec<String>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub relation_types: Option<Vec<String>>,
}

/// Layout algorithm requested by a view. Advisory; the force simulation is
/// the only layout the canvas currently runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutKind {
	Force,
	Hierarchical,
	Radial,
}

/// Reading direction for hierarchical layouts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayoutDirection {
	TB,
	BT,
	LR,
	RL,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSpec {
	#[serde(rename = "type", skip_serializing_if = "Option::is_none")]
	pub kind: Option<LayoutKind>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub direction: Option<LayoutDirection>,
}

/// Glyph drawn for a node type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeShape {
	Circle,
	Square,
	Diamond,
}

/// Per-node-type style override.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeStyle {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub shape: Option<NodeShape>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub color: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub size: Option<f64>,
}

/// Line pattern drawn for a relation type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
	Solid,
	Dashed,
	Dotted,
}

/// Per-relation-type style override.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelationStyle {
	#[serde(rename = "style", skip_serializing_if = "Option::is_none")]
	pub line: Option<LineStyle>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub color: Option<String>,
}

/// Style half of a view, keyed by node/relation type.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleSpec {
	#[serde(skip_serializing_if = "BTreeMap::is_empty")]
	pub node: BTreeMap<String, NodeStyle>,
	#[serde(skip_serializing_if = "BTreeMap::is_empty")]
	pub relation: BTreeMap<String, RelationStyle>,
}

/// A named (filter, layout, style) configuration selecting and presenting a
/// subset of the graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct View {
	pub id: String,
	pub name: String,
	#[serde(default)]
	pub description: String,
	#[serde(default)]
	pub filter: FilterSpec,
	#[serde(default)]
	pub layout: LayoutSpec,
	#[serde(default)]
	pub style: StyleSpec,
}

impl View {
	pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			name: name.into(),
			description: String::new(),
			filter: FilterSpec::default(),
			layout: LayoutSpec::default(),
			style: StyleSpec::default(),
		}
	}

	pub fn describe(mut self, description: impl Into<String>) -> Self {
		self.description = description.into();
		self
	}

	pub fn set_filter(mut self, filter: FilterSpec) -> Self {
		self.filter = filter;
		self
	}

	pub fn set_layout(mut self, layout: LayoutSpec) -> Self {
		self.layout = layout;
		self
	}

	pub fn set_style(mut self, style: StyleSpec) -> Self {
		self.style = style;
		self
	}
}

/// The whole graph: ordered nodes, relations and views plus metadata.
///
/// Order of the contained sequences is call order and becomes default
/// iteration/z-order when rendered.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeGraph {
	pub id: String,
	pub name: String,
	#[serde(default)]
	pub description: String,
	#[serde(default)]
	pub nodes: Vec<Node>,
	#[serde(default)]
	pub relations: Vec<Relation>,
	#[serde(default)]
	pub metadata: Metadata,
	#[serde(default)]
	pub views: Vec<View>,
}

impl KnowledgeGraph {
	pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			name: name.into(),
			description: String::new(),
			nodes: Vec::new(),
			relations: Vec::new(),
			metadata: Metadata::new(),
			views: Vec::new(),
		}
	}

	pub fn describe(mut self, description: impl Into<String>) -> Self {
		self.description = description.into();
		self
	}

	pub fn add_node(mut self, node: Node) -> Self {
		self.nodes.push(node);
		self
	}

	pub fn add_relation(mut self, relation: Relation) -> Self {
		self.relations.push(relation);
		self
	}

	pub fn add_view(mut self, view: View) -> Self {
		self.views.push(view);
		self
	}

	pub fn set_metadata(mut self, metadata: Metadata) -> Self {
		self.metadata = metadata;
		self
	}

	/// Look up a node by id in the full, unfiltered node list.
	pub fn node(&self, id: &str) -> Option<&Node> {
		self.nodes.iter().find(|n| n.id == id)
	}

	/// Look up a view by id.
	pub fn view(&self, id: &str) -> Option<&View> {
		self.views.iter().find(|v| v.id == id)
	}

	/// Snapshot the in-memory graph to JSON.
	pub fn to_json(&self) -> Result<String, ModelError> {
		serde_json::to_string_pretty(self).map_err(ModelError::Serialize)
	}

	/// Restore a graph from a JSON snapshot.
	pub fn from_json(json: &str) -> Result<Self, ModelError> {
		serde_json::from_str(json).map_err(ModelError::Parse)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	#[test]
	fn builders_preserve_call_order() {
		let graph = KnowledgeGraph::new("g", "Graph")
			.add_node(Node::new("b", "CONCEPT", "B"))
			.add_node(Node::new("a", "CONCEPT", "A"))
			.add_relation(Relation::new("r2", "RELATES_TO", "rel", "b", "a"))
			.add_relation(Relation::new("r1", "RELATES_TO", "rel", "a", "b"))
			.add_view(View::new("second", "Second"))
			.add_view(View::new("first", "First"));

		let node_ids: Vec<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
		assert_eq!(node_ids, vec!["b", "a"]);
		let relation_ids: Vec<&str> = graph.relations.iter().map(|r| r.id.as_str()).collect();
		assert_eq!(relation_ids, vec!["r2", "r1"]);
		let view_ids: Vec<&str> = graph.views.iter().map(|v| v.id.as_str()).collect();
		assert_eq!(view_ids, vec!["second", "first"]);
	}

	#[test]
	fn repeated_property_keys_both_appear() {
		let node = Node::new("n", "CONCEPT", "N")
			.property("field", "software engineering")
			.property("field", "formal methods");
		assert_eq!(node.properties.len(), 2);
		assert_eq!(node.properties[0].key, "field");
		assert_eq!(node.properties[1].key, "field");
	}

	#[test]
	fn relation_weight_defaults_to_one_and_overwrites() {
		let relation = Relation::new("r", "PART_OF", "part of", "a", "b");
		assert_eq!(relation.weight, 1.0);
		let relation = relation.set_weight(4.0).set_weight(2.5);
		assert_eq!(relation.weight, 2.5);
	}

	#[test]
	fn property_kind_serializes_uppercase() {
		let property = Property {
			key: "created".into(),
			value: PropertyValue::from("2023-06-01"),
			kind: PropertyKind::Date,
		};
		let json = serde_json::to_value(&property).unwrap();
		assert_eq!(json["type"], "DATE");
		assert_eq!(json["key"], "created");
	}

	#[test]
	fn node_kind_serializes_as_type() {
		let node = Node::new("n1", "THEORY", "Theory").with_source("theory.md", Some(12));
		let json = serde_json::to_value(&node).unwrap();
		assert_eq!(json["type"], "THEORY");
		assert!(json.get("kind").is_none());
		assert_eq!(json["source"]["file"], "theory.md");
		assert_eq!(json["source"]["line"], 12);
	}

	#[test]
	fn filter_spec_uses_camel_case_keys() {
		let filter = FilterSpec {
			node_types: Some(vec!["THEORY".into()]),
			relation_types: None,
		};
		let json = serde_json::to_value(&filter).unwrap();
		assert_eq!(json["nodeTypes"][0], "THEORY");
		assert!(json.get("relationTypes").is_none());
	}

	#[test]
	fn property_values_round_trip_untagged() {
		let values = vec![
			PropertyValue::from("text"),
			PropertyValue::from(3.5),
			PropertyValue::from(true),
		];
		let json = serde_json::to_string(&values).unwrap();
		let back: Vec<PropertyValue> = serde_json::from_str(&json).unwrap();
		assert_eq!(back, values);
	}

	#[test]
	fn from_json_accepts_sparse_records() {
		// Fields the builder always writes may be absent in hand-written
		// snapshots; everything beyond ids and endpoints is optional.
		let json = r#"{
			"id": "g", "name": "Graph",
			"nodes": [{"id": "a", "type": "CONCEPT", "label": "A"}],
			"relations": [{"id": "r", "type": "RELATES_TO", "label": "rel", "source": "a", "target": "a"}]
		}"#;
		let graph = KnowledgeGraph::from_json(json).unwrap();
		assert_eq!(graph.nodes[0].description, "");
		assert_eq!(graph.relations[0].weight, 1.0);
		assert!(graph.views.is_empty());
	}

	#[test]
	fn from_json_rejects_malformed_input() {
		let err = KnowledgeGraph::from_json("{\"id\": 42}").unwrap_err();
		assert!(matches!(err, ModelError::Parse(_)));
	}
}

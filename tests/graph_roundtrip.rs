//! JSON snapshot round-trip: a graph serialized and restored must come back
//! with the same ids, the same ordered contents and every field intact.

use knowledge_graph_canvas::components::graph_view::model::{
	FilterSpec, KnowledgeGraph, LayoutDirection, LayoutKind, LayoutSpec, LineStyle, Metadata,
	Node, NodeStyle, PropertyKind, PropertyValue, Relation, RelationStyle, StyleSpec, View,
};
use pretty_assertions::assert_eq;

fn rich_graph() -> KnowledgeGraph {
	let mut graph_metadata = Metadata::new();
	graph_metadata.insert("version".into(), PropertyValue::from(62.0));
	graph_metadata.insert("reviewed".into(), PropertyValue::from(true));

	let mut node_metadata = Metadata::new();
	node_metadata.insert("created".into(), PropertyValue::from("2023-06-01"));

	let view = View::new("theories", "Theory hierarchy")
		.describe("Theories only")
		.set_filter(FilterSpec {
			node_types: Some(vec!["THEORY".into()]),
			relation_types: Some(vec!["PART_OF".into(), "MERGED_TO".into()]),
		})
		.set_layout(LayoutSpec {
			kind: Some(LayoutKind::Hierarchical),
			direction: Some(LayoutDirection::TB),
		})
		.set_style(StyleSpec {
			node: [(
				"THEORY".to_owned(),
				NodeStyle {
					shape: None,
					color: Some("#4CAF50".into()),
					size: Some(10.0),
				},
			)]
			.into(),
			relation: [(
				"MERGED_TO".to_owned(),
				RelationStyle {
					line: Some(LineStyle::Dashed),
					color: Some("#666666".into()),
				},
			)]
			.into(),
		});

	KnowledgeGraph::new("theory-graph", "Theory graph")
		.describe("Snapshot fixture")
		.set_metadata(graph_metadata)
		.add_node(
			Node::new("n1", "THEORY", "Component theory")
				.describe("Studies software components")
				.property("field", "software engineering")
				.property("field", "formal methods")
				.add_property("established", 1968.0, PropertyKind::Number)
				.add_property("created", "2023-06-01", PropertyKind::Date)
				.with_source("theories/components.md", Some(42))
				.set_metadata(node_metadata),
		)
		.add_node(Node::new("n2", "CONCEPT", "Refinement"))
		.add_relation(
			Relation::new("r1", "PART_OF", "is part of", "n2", "n1")
				.property("confidence", "high")
				.set_weight(2.25),
		)
		.add_relation(Relation::new("r2", "MERGED_TO", "merged into", "n1", "n2"))
		.add_view(view)
		.add_view(View::new("everything", "Everything"))
}

#[test]
fn round_trip_reproduces_the_graph_exactly() {
	let graph = rich_graph();
	let json = graph.to_json().unwrap();
	let restored = KnowledgeGraph::from_json(&json).unwrap();
	assert_eq!(restored, graph);
}

#[test]
fn round_trip_preserves_order_and_duplicate_keys() {
	let graph = rich_graph();
	let restored = KnowledgeGraph::from_json(&graph.to_json().unwrap()).unwrap();

	let node_ids: Vec<&str> = restored.nodes.iter().map(|n| n.id.as_str()).collect();
	assert_eq!(node_ids, vec!["n1", "n2"]);
	let view_ids: Vec<&str> = restored.views.iter().map(|v| v.id.as_str()).collect();
	assert_eq!(view_ids, vec!["theories", "everything"]);

	let keys: Vec<&str> = restored.nodes[0]
		.properties
		.iter()
		.map(|p| p.key.as_str())
		.collect();
	assert_eq!(keys, vec!["field", "field", "established", "created"]);
}

#[test]
fn snapshot_exposes_every_top_level_field() {
	let graph = rich_graph();
	let json: serde_json::Value = serde_json::from_str(&graph.to_json().unwrap()).unwrap();

	for field in ["id", "name", "description", "nodes", "relations", "metadata", "views"] {
		assert!(json.get(field).is_some(), "missing top-level field {field}");
	}
}

#[test]
fn snapshot_mirrors_attribute_names_on_the_wire() {
	let graph = rich_graph();
	let json: serde_json::Value = serde_json::from_str(&graph.to_json().unwrap()).unwrap();

	// Type tags serialize as "type", never as the Rust field name.
	assert_eq!(json["nodes"][0]["type"], "THEORY");
	assert!(json["nodes"][0].get("kind").is_none());
	assert_eq!(json["relations"][0]["type"], "PART_OF");
	assert_eq!(json["relations"][0]["weight"], 2.25);

	// Property kind tags are uppercase.
	assert_eq!(json["nodes"][0]["properties"][2]["type"], "NUMBER");
	assert_eq!(json["nodes"][0]["properties"][3]["type"], "DATE");

	// Filter keys are camelCase; relation line style serializes as "style".
	let view = &json["views"][0];
	assert_eq!(view["filter"]["nodeTypes"][0], "THEORY");
	assert_eq!(view["layout"]["type"], "hierarchical");
	assert_eq!(view["layout"]["direction"], "TB");
	assert_eq!(view["style"]["relation"]["MERGED_TO"]["style"], "dashed");

	assert_eq!(json["nodes"][0]["source"]["file"], "theories/components.md");
	assert_eq!(json["nodes"][0]["source"]["line"], 42);
}

#[test]
fn default_weight_survives_the_wire() {
	let graph = rich_graph();
	let json: serde_json::Value = serde_json::from_str(&graph.to_json().unwrap()).unwrap();
	assert_eq!(json["relations"][1]["weight"], 1.0);

	let restored = KnowledgeGraph::from_json(&graph.to_json().unwrap()).unwrap();
	assert_eq!(restored.relations[1].weight, 1.0);
}

use leptos::prelude::*;

use crate::components::graph_view::GraphViewCanvas;
use crate::components::graph_view::model::{
	FilterSpec, KnowledgeGraph, LayoutDirection, LayoutKind, LayoutSpec, LineStyle, Metadata,
	Node, NodeShape, NodeStyle, PropertyValue, Relation, RelationStyle, StyleSpec, View,
};

fn created(date: &str) -> Metadata {
	let mut metadata = Metadata::new();
	metadata.insert("created".into(), PropertyValue::from(date));
	metadata
}

fn theory(id: &str, label: &str, description: &str, field: &str, date: &str) -> Node {
	Node::new(id, "THEORY", label)
		.describe(description)
		.property("field", field)
		.set_metadata(created(date))
}

/// The bundled demo graph: a hierarchy of formal-architecture theories plus
/// a few concept/file nodes the theories view filters out.
fn sample_graph() -> KnowledgeGraph {
	let theories_view = View::new("theories", "Theory hierarchy")
		.describe("Hierarchical structure of the theory systems")
		.set_filter(FilterSpec {
			node_types: Some(vec!["THEORY".into()]),
			relation_types: Some(vec![
				"PART_OF".into(),
				"MERGED_TO".into(),
				"RELATES_TO".into(),
			]),
		})
		.set_layout(LayoutSpec {
			kind: Some(LayoutKind::Hierarchical),
			direction: Some(LayoutDirection::TB),
		})
		.set_style(StyleSpec {
			node: [(
				"THEORY".to_owned(),
				NodeStyle {
					shape: Some(NodeShape::Circle),
					color: Some("#4CAF50".into()),
					size: Some(10.0),
				},
			)]
			.into(),
			relation: [
				(
					"PART_OF".to_owned(),
					RelationStyle {
						line: Some(LineStyle::Solid),
						color: Some("#000000".into()),
					},
				),
				(
					"MERGED_TO".to_owned(),
					RelationStyle {
						line: Some(LineStyle::Dashed),
						color: Some("#666666".into()),
					},
				),
				(
					"RELATES_TO".to_owned(),
					RelationStyle {
						line: Some(LineStyle::Dotted),
						color: Some("#999999".into()),
					},
				),
			]
			.into(),
		});

	let everything_view =
		View::new("everything", "Everything").describe("All nodes and relations, default styling");

	KnowledgeGraph::new("theory-graph", "Formal architecture theory graph")
		.describe("Theory systems of the formal architecture project and how they relate")
		.add_node(theory(
			"n1",
			"Formal architecture theory",
			"Overall framework of the formal architecture theories",
			"computer science",
			"2023-06-01",
		))
		.add_node(theory(
			"n2",
			"Software architecture theory",
			"Theories concerned with software architecture",
			"software engineering",
			"2023-06-02",
		))
		.add_node(theory(
			"n3",
			"Formal model theory",
			"Theories concerned with formal models",
			"formal methods",
			"2023-06-03",
		))
		.add_node(theory(
			"n4",
			"Programming language theory",
			"Theories concerned with programming languages",
			"programming languages",
			"2023-06-04",
		))
		.add_node(theory(
			"n5",
			"Formal language theory",
			"Theories concerned with formal languages",
			"theoretical computer science",
			"2023-06-05",
		))
		.add_node(theory(
			"n6",
			"Component-interface unification",
			"Unification of component theory and interface theory",
			"software engineering",
			"2023-07-01",
		))
		.add_node(theory(
			"n7",
			"Unified state-transition systems",
			"Unification of state machine theory and Petri net theory",
			"formal methods",
			"2023-07-02",
		))
		.add_node(theory(
			"n8",
			"Component theory",
			"Studies software components",
			"software engineering",
			"2023-06-10",
		))
		.add_node(theory(
			"n9",
			"Interface theory",
			"Studies software interfaces",
			"software engineering",
			"2023-06-11",
		))
		.add_node(theory(
			"n10",
			"State machine theory",
			"Studies state machines",
			"formal methods",
			"2023-06-12",
		))
		.add_node(theory(
			"n11",
			"Petri net theory",
			"Studies Petri nets",
			"formal methods",
			"2023-06-13",
		))
		.add_node(
			Node::new("c1", "CONCEPT", "Refinement")
				.describe("Stepwise refinement between abstraction levels"),
		)
		.add_node(
			Node::new("f1", "FILE", "theory-index.md").with_source("docs/theory-index.md", Some(1)),
		)
		.add_relation(Relation::new("r1", "PART_OF", "is part of", "n2", "n1"))
		.add_relation(Relation::new("r2", "PART_OF", "is part of", "n3", "n1"))
		.add_relation(Relation::new("r3", "PART_OF", "is part of", "n4", "n1"))
		.add_relation(Relation::new("r4", "PART_OF", "is part of", "n5", "n1"))
		.add_relation(Relation::new("r5", "PART_OF", "is part of", "n6", "n2"))
		.add_relation(Relation::new("r6", "PART_OF", "is part of", "n7", "n3"))
		.add_relation(Relation::new("r7", "MERGED_TO", "merged into", "n8", "n6"))
		.add_relation(Relation::new("r8", "MERGED_TO", "merged into", "n9", "n6"))
		.add_relation(Relation::new("r9", "MERGED_TO", "merged into", "n10", "n7"))
		.add_relation(Relation::new("r10", "MERGED_TO", "merged into", "n11", "n7"))
		.add_relation(Relation::new("r11", "RELATES_TO", "relates to", "n6", "n7").set_weight(4.0))
		.add_relation(Relation::new("r12", "RELATES_TO", "relates to", "c1", "n7"))
		.add_relation(Relation::new("r13", "DESCRIBED_IN", "described in", "n1", "f1"))
		.add_view(theories_view)
		.add_view(everything_view)
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let sample = sample_graph();
	let view_choices: Vec<(String, String)> = sample
		.views
		.iter()
		.map(|v| (v.id.clone(), v.name.clone()))
		.collect();

	let graph = RwSignal::new(sample);
	let view_id = RwSignal::new(Some("theories".to_owned()));

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="graph-page">
				<h1>"Knowledge Graph Canvas"</h1>
				<p class="subtitle">
					"Drag nodes to reposition. Scroll to zoom. Drag the background to pan. "
					"Click a node or a relation for details."
				</p>
				<div class="view-controls">
					{view_choices
						.into_iter()
						.map(|(id, name)| {
							let choice = id.clone();
							view! {
								<button on:click=move |_| {
									view_id.set(Some(choice.clone()))
								}>{name}</button>
							}
						})
						.collect_view()}
				</div>
				<GraphViewCanvas
					graph=graph
					view_id=view_id
					width=Some(800.0)
					height=Some(600.0)
				/>
			</div>
		</ErrorBoundary>
	}
}

//! Singleton detail panels for clicked nodes and relations.
//!
//! Panel contents are explicit UI state owned by the canvas component: one
//! `RwSignal<Option<_>>` per panel kind. A second click overwrites the
//! signal, so at most one panel of each kind ever exists.

use leptos::prelude::*;

use super::model::Property;
use super::state::{EdgeVisual, NodeVisual};

/// Content of the node detail panel.
#[derive(Clone, Debug, PartialEq)]
pub struct NodePanel {
	pub label: String,
	pub kind: String,
	pub description: String,
	pub properties: Vec<(String, String)>,
	pub source: Option<String>,
}

impl NodePanel {
	pub fn from_visual(visual: &NodeVisual) -> Self {
		let node = &visual.node;
		Self {
			label: node.label.clone(),
			kind: node.kind.clone(),
			description: describe(&node.description),
			properties: property_rows(&node.properties),
			source: node.source.as_ref().map(|source| match source.line {
				Some(line) => format!("{}:{}", source.file, line),
				None => format!("{}:N/A", source.file),
			}),
		}
	}
}

/// Content of the relation detail panel.
#[derive(Clone, Debug, PartialEq)]
pub struct RelationPanel {
	pub label: String,
	pub kind: String,
	pub from_label: String,
	pub to_label: String,
	pub weight: f64,
	pub properties: Vec<(String, String)>,
}

impl RelationPanel {
	pub fn from_visual(visual: &EdgeVisual) -> Self {
		Self {
			label: visual.relation.label.clone(),
			kind: visual.relation.kind.clone(),
			from_label: visual.source_label.clone(),
			to_label: visual.target_label.clone(),
			weight: visual.relation.weight,
			properties: property_rows(&visual.relation.properties),
		}
	}
}

fn describe(description: &str) -> String {
	if description.is_empty() {
		"No description available".to_owned()
	} else {
		description.to_owned()
	}
}

fn property_rows(properties: &[Property]) -> Vec<(String, String)> {
	properties
		.iter()
		.map(|p| (p.key.clone(), p.value.to_string()))
		.collect()
}

fn property_list(properties: Vec<(String, String)>) -> impl IntoView {
	properties
		.into_iter()
		.map(|(key, value)| {
			view! {
				<li>
					<strong>{key}": "</strong>
					{value}
				</li>
			}
		})
		.collect_view()
}

/// The node detail panel. Renders nothing while the signal is `None`.
#[component]
pub fn NodeDetailsPanel(panel: RwSignal<Option<NodePanel>>) -> impl IntoView {
	move || {
		panel.get().map(|details| {
			view! {
				<div class="details-panel">
					<div class="details-header">
						<h3>{details.label}</h3>
						<span class="details-type">{details.kind}</span>
						<button class="details-close" on:click=move |_| panel.set(None)>
							"×"
						</button>
					</div>
					<div class="details-content">
						<p>{details.description}</p>
						<h4>"Properties"</h4>
						<ul>{property_list(details.properties)}</ul>
						{details
							.source
							.map(|source| view! { <p><strong>"Source: "</strong>{source}</p> })}
					</div>
				</div>
			}
		})
	}
}

/// The relation detail panel. Renders nothing while the signal is `None`.
#[component]
pub fn RelationDetailsPanel(panel: RwSignal<Option<RelationPanel>>) -> impl IntoView {
	move || {
		panel.get().map(|details| {
			view! {
				<div class="details-panel">
					<div class="details-header">
						<h3>{details.label}</h3>
						<span class="details-type">{details.kind}</span>
						<button class="details-close" on:click=move |_| panel.set(None)>
							"×"
						</button>
					</div>
					<div class="details-content">
						<p><strong>"From: "</strong>{details.from_label}</p>
						<p><strong>"To: "</strong>{details.to_label}</p>
						<p><strong>"Weight: "</strong>{details.weight}</p>
						<h4>"Properties"</h4>
						<ul>{property_list(details.properties)}</ul>
					</div>
				</div>
			}
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::graph_view::model::{Node, PropertyKind, Relation};
	use pretty_assertions::assert_eq;

	#[test]
	fn node_panel_lists_properties_and_source() {
		let node = Node::new("n", "THEORY", "Component theory")
			.describe("Studies software components")
			.property("field", "software engineering")
			.add_property("established", 1968.0, PropertyKind::Number)
			.with_source("theories/components.md", Some(42));
		let visual = NodeVisual {
			node,
			color: "#2ca02c".into(),
			radius: 10.0,
		};

		let panel = NodePanel::from_visual(&visual);
		assert_eq!(panel.label, "Component theory");
		assert_eq!(panel.kind, "THEORY");
		assert_eq!(panel.description, "Studies software components");
		assert_eq!(
			panel.properties,
			vec![
				("field".to_owned(), "software engineering".to_owned()),
				("established".to_owned(), "1968".to_owned()),
			]
		);
		assert_eq!(panel.source.as_deref(), Some("theories/components.md:42"));
	}

	#[test]
	fn empty_description_gets_placeholder() {
		let visual = NodeVisual {
			node: Node::new("n", "CONCEPT", "Bare"),
			color: "#1f77b4".into(),
			radius: 10.0,
		};
		let panel = NodePanel::from_visual(&visual);
		assert_eq!(panel.description, "No description available");
		assert_eq!(panel.source, None);
	}

	#[test]
	fn relation_panel_shows_resolved_endpoints_and_weight() {
		let visual = EdgeVisual {
			relation: Relation::new("r", "MERGED_TO", "merged into", "a", "ghost").set_weight(2.25),
			width: 1.5,
			color: "#666666".into(),
			dash: &[],
			source_label: "State machine theory".into(),
			target_label: "ghost".into(),
		};
		let panel = RelationPanel::from_visual(&visual);
		assert_eq!(panel.from_label, "State machine theory");
		assert_eq!(panel.to_label, "ghost");
		assert_eq!(panel.weight, 2.25);
	}
}

use serde::{Deserialize, Serialize};

use super::position::Position;

/// Id of the permanent starting node of a neural session.
pub const ROOT_ID: &str = "first-node";
pub const ROOT_LABEL: &str = "現在の自分";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
	#[default]
	User,
	Suggestion,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
	pub id: String,
	#[serde(default)]
	pub kind: NodeKind,
	#[serde(default)]
	pub label: String,
	/// Seed position; the live position belongs to the layout simulation.
	#[serde(default)]
	pub position: Position,
}

impl Node {
	pub fn new(id: impl Into<String>, kind: NodeKind, label: impl Into<String>, position: Position) -> Self {
		Self {
			id: id.into(),
			kind,
			label: label.into(),
			position,
		}
	}

	pub fn root() -> Self {
		Self::new(ROOT_ID, NodeKind::User, ROOT_LABEL, Position::ORIGIN)
	}

	pub fn is_root(&self) -> bool {
		self.id == ROOT_ID
	}
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
	pub id: String,
	pub source: String,
	pub target: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
	#[default]
	Neural,
	Mandala,
}

impl ViewMode {
	/// Parses the `mode` query value; anything unrecognised yields `None`.
	pub fn parse(value: &str) -> Option<Self> {
		match value {
			"neural" => Some(Self::Neural),
			"mandala" => Some(Self::Mandala),
			_ => None,
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Neural => "neural",
			Self::Mandala => "mandala",
		}
	}
}

/// Node and edge collections handed to the neural canvas.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FlowGraph {
	pub nodes: Vec<Node>,
	pub edges: Vec<Edge>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn view_mode_parse_ignores_unknown_values() {
		assert_eq!(ViewMode::parse("neural"), Some(ViewMode::Neural));
		assert_eq!(ViewMode::parse("mandala"), Some(ViewMode::Mandala));
		assert_eq!(ViewMode::parse("Mandala"), None);
		assert_eq!(ViewMode::parse(""), None);
	}

	#[test]
	fn node_kind_serializes_lowercase() {
		let json = serde_json::to_string(&Node::root()).unwrap();
		assert!(json.contains(r#""kind":"user""#));
	}
}

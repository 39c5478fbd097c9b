use log::{debug, info};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Reducer;
use super::persist::{SNAPSHOT_VERSION, Snapshot};
use super::seed::seed_position;
use crate::generate::SUGGESTION_CAP;
use crate::model::{Edge, FlowGraph, Node, NodeKind, Position, ROOT_ID, ViewMode};

/// Persisted shape of the neural session.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowSnapshot {
	#[serde(default)]
	pub version: u32,
	#[serde(default)]
	pub nodes: Vec<Node>,
	#[serde(default)]
	pub edges: Vec<Edge>,
	#[serde(default)]
	pub view_mode: ViewMode,
}

impl Snapshot for FlowSnapshot {
	fn version(&self) -> u32 {
		self.version
	}
}

#[derive(Clone, Debug, PartialEq)]
pub enum FlowCommand {
	/// Adds a user action under the selected node (or the root) with its
	/// suggestions fanned out around it.
	AddAction {
		label: String,
		suggestions: Vec<String>,
		center: Position,
	},
	AddSuggestions {
		source_id: String,
		suggestions: Vec<String>,
		center: Position,
	},
	Select(Option<String>),
	SetViewMode(ViewMode),
	SetLoading(bool),
}

#[derive(Clone, Debug, PartialEq)]
pub struct FlowState {
	pub nodes: Vec<Node>,
	pub edges: Vec<Edge>,
	pub selected: Option<String>,
	pub view_mode: ViewMode,
	pub is_loading: bool,
}

impl Default for FlowState {
	fn default() -> Self {
		Self {
			nodes: vec![Node::root()],
			edges: Vec::new(),
			selected: None,
			view_mode: ViewMode::default(),
			is_loading: false,
		}
	}
}

impl FlowState {
	pub fn from_snapshot(snapshot: FlowSnapshot) -> Self {
		let mut nodes = snapshot.nodes;
		if !nodes.iter().any(Node::is_root) {
			nodes.insert(0, Node::root());
		}
		Self {
			nodes,
			edges: snapshot.edges,
			view_mode: snapshot.view_mode,
			..Self::default()
		}
	}

	pub fn snapshot(&self) -> FlowSnapshot {
		FlowSnapshot {
			version: SNAPSHOT_VERSION,
			nodes: self.nodes.clone(),
			edges: self.edges.clone(),
			view_mode: self.view_mode,
		}
	}

	pub fn graph(&self) -> FlowGraph {
		FlowGraph {
			nodes: self.nodes.clone(),
			edges: self.edges.clone(),
		}
	}

	pub fn node(&self, id: &str) -> Option<&Node> {
		self.nodes.iter().find(|n| n.id == id)
	}

	pub fn selected_node(&self) -> Option<&Node> {
		self.selected.as_deref().and_then(|id| self.node(id))
	}

	/// Adds one suggestion node plus an edge from `source` per non-blank
	/// label, capped at five. Returns how many were added.
	fn grow(&mut self, source: &Node, suggestions: &[String], center: Position) -> usize {
		let labels: Vec<&str> = suggestions
			.iter()
			.map(|s| s.trim())
			.filter(|s| !s.is_empty())
			.take(SUGGESTION_CAP)
			.collect();
		let total = labels.len();
		for (index, label) in labels.into_iter().enumerate() {
			let position = seed_position(source, index, total, &self.nodes, center);
			let id = format!("suggestion-{}", Uuid::new_v4());
			self.edges.push(Edge {
				id: format!("edge-{}", Uuid::new_v4()),
				source: source.id.clone(),
				target: id.clone(),
			});
			self.nodes.push(Node::new(id, NodeKind::Suggestion, label, position));
		}
		total
	}

	fn add_action(&mut self, label: &str, suggestions: &[String], center: Position) -> bool {
		let label = label.trim();
		if label.is_empty() {
			debug!("Ignoring blank action");
			return false;
		}
		let source = self
			.selected_node()
			.or_else(|| self.node(ROOT_ID))
			.cloned()
			.unwrap_or_else(Node::root);

		let position = seed_position(&source, 0, 1, &self.nodes, center);
		let user = Node::new(format!("node-{}", Uuid::new_v4()), NodeKind::User, label, position);
		self.edges.push(Edge {
			id: format!("edge-{}", Uuid::new_v4()),
			source: source.id.clone(),
			target: user.id.clone(),
		});
		self.nodes.push(user.clone());
		let added = self.grow(&user, suggestions, center);
		info!("Added action {label:?} under {} with {added} suggestions", source.id);
		true
	}

	fn add_suggestions(&mut self, source_id: &str, suggestions: &[String], center: Position) -> bool {
		let Some(source) = self.node(source_id).cloned() else {
			debug!("Ignoring suggestions for unknown node {source_id}");
			return false;
		};
		self.grow(&source, suggestions, center) > 0
	}
}

impl Reducer for FlowState {
	type Command = FlowCommand;

	fn apply(&mut self, command: FlowCommand) -> bool {
		match command {
			FlowCommand::AddAction {
				label,
				suggestions,
				center,
			} => self.add_action(&label, &suggestions, center),
			FlowCommand::AddSuggestions {
				source_id,
				suggestions,
				center,
			} => self.add_suggestions(&source_id, &suggestions, center),
			FlowCommand::Select(id) => {
				let id = id.filter(|id| self.node(id).is_some());
				if self.selected == id {
					return false;
				}
				self.selected = id;
				true
			}
			FlowCommand::SetViewMode(mode) => {
				if self.view_mode == mode {
					return false;
				}
				self.view_mode = mode;
				true
			}
			FlowCommand::SetLoading(loading) => {
				if self.is_loading == loading {
					return false;
				}
				self.is_loading = loading;
				true
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;
	use crate::generate::templates::suggestion_templates;
	use crate::generate::{fallback_suggestions, shuffled_suggestions};
	use crate::store::persist::{self, KeyValueStore, MemoryStorage};

	const CENTER: Position = Position::new(400.0, 300.0);

	fn add(state: &mut FlowState, label: &str) -> bool {
		state.apply(FlowCommand::AddAction {
			label: label.into(),
			suggestions: fallback_suggestions(label),
			center: CENTER,
		})
	}

	fn edges_into<'a>(state: &'a FlowState, id: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
		state.edges.iter().filter(move |e| e.target == id)
	}

	#[test]
	fn first_action_grows_from_root() {
		let mut state = FlowState::default();
		assert!(add(&mut state, "犬の散歩"));

		assert_eq!(state.nodes.len(), 7);
		let user = &state.nodes[1];
		assert_eq!(user.kind, NodeKind::User);
		assert_eq!(user.label, "犬の散歩");
		assert!(user.id.starts_with("node-"));
		assert_eq!(edges_into(&state, &user.id).next().unwrap().source, ROOT_ID);

		let suggestions: Vec<&Node> = state.nodes.iter().filter(|n| n.kind == NodeKind::Suggestion).collect();
		assert_eq!(suggestions.len(), 5);
		for s in suggestions {
			assert!(s.id.starts_with("suggestion-"));
			let incoming: Vec<&Edge> = edges_into(&state, &s.id).collect();
			assert_eq!(incoming.len(), 1);
			assert_eq!(incoming[0].source, user.id);
		}
	}

	#[test]
	fn templated_suggestions_fan_out_from_action() {
		let mut state = FlowState::default();
		let suggestions = shuffled_suggestions("犬の散歩", &mut StdRng::seed_from_u64(7));
		assert!(state.apply(FlowCommand::AddAction {
			label: "犬の散歩".into(),
			suggestions,
			center: CENTER,
		}));

		let templates = suggestion_templates("犬の散歩");
		let user_id = state.nodes[1].id.clone();
		let grown: Vec<&Node> = state.nodes.iter().filter(|n| n.kind == NodeKind::Suggestion).collect();
		assert_eq!(grown.len(), SUGGESTION_CAP);
		for node in grown {
			assert!(templates.contains(&node.label), "{} is not a template", node.label);
			assert_eq!(edges_into(&state, &node.id).next().unwrap().source, user_id);
		}
	}

	#[test]
	fn edge_ids_share_one_scheme() {
		let mut state = FlowState::default();
		add(&mut state, "犬の散歩");
		let user_id = state.nodes[1].id.clone();
		assert!(state.apply(FlowCommand::Select(Some(user_id))));
		add(&mut state, "公園へ行く");

		let mut ids: Vec<&str> = state.edges.iter().map(|e| e.id.as_str()).collect();
		for id in &ids {
			let suffix = id.strip_prefix("edge-").unwrap();
			assert!(Uuid::parse_str(suffix).is_ok(), "{id}");
		}
		let total = ids.len();
		ids.sort_unstable();
		ids.dedup();
		assert_eq!(ids.len(), total);
	}

	#[test]
	fn actions_attach_to_selection() {
		let mut state = FlowState::default();
		add(&mut state, "犬の散歩");
		let picked = state.nodes[3].id.clone();
		assert!(state.apply(FlowCommand::Select(Some(picked.clone()))));
		add(&mut state, "公園へ行く");

		let user = state.nodes.iter().find(|n| n.label == "公園へ行く").unwrap();
		assert_eq!(edges_into(&state, &user.id).next().unwrap().source, picked);
	}

	#[test]
	fn blank_action_is_rejected() {
		let mut state = FlowState::default();
		assert!(!add(&mut state, "   "));
		assert_eq!(state, FlowState::default());
	}

	#[test]
	fn suggestions_need_a_known_source() {
		let mut state = FlowState::default();
		let command = |source: &str| FlowCommand::AddSuggestions {
			source_id: source.into(),
			suggestions: vec!["a".into(), " ".into(), "b".into()],
			center: CENTER,
		};
		assert!(!state.apply(command("missing")));
		assert!(state.apply(command(ROOT_ID)));
		assert_eq!(state.nodes.len(), 3);
		assert_eq!(state.edges.len(), 2);
	}

	#[test]
	fn selecting_unknown_node_clears_selection() {
		let mut state = FlowState::default();
		assert!(state.apply(FlowCommand::Select(Some(ROOT_ID.into()))));
		assert!(!state.apply(FlowCommand::Select(Some(ROOT_ID.into()))));
		assert!(state.apply(FlowCommand::Select(Some("ghost".into()))));
		assert_eq!(state.selected, None);
	}

	#[test]
	fn snapshot_round_trips_through_storage() {
		let mut state = FlowState::default();
		add(&mut state, "犬の散歩");
		state.apply(FlowCommand::SetViewMode(ViewMode::Mandala));
		state.apply(FlowCommand::Select(Some(ROOT_ID.into())));
		state.apply(FlowCommand::SetLoading(true));

		let storage = MemoryStorage::default();
		persist::save(&storage, "flow", &state.snapshot());
		let restored = FlowState::from_snapshot(persist::load(&storage, "flow").unwrap());

		assert_eq!(restored.nodes, state.nodes);
		assert_eq!(restored.edges, state.edges);
		assert_eq!(restored.view_mode, ViewMode::Mandala);
		assert_eq!(restored.selected, None);
		assert!(!restored.is_loading);
	}

	#[test]
	fn seed_positions_survive_storage_bit_for_bit() {
		let awkward = Position::new(1225.853457180761, 322.96168582877044);
		let state = FlowState::from_snapshot(FlowSnapshot {
			version: SNAPSHOT_VERSION,
			nodes: vec![Node::root(), Node::new("node-1", NodeKind::User, "a", awkward)],
			..FlowSnapshot::default()
		});

		let storage = MemoryStorage::default();
		persist::save(&storage, "flow", &state.snapshot());
		let restored: FlowSnapshot = persist::load(&storage, "flow").unwrap();
		assert_eq!(restored.nodes[1].position.x.to_bits(), awkward.x.to_bits());
		assert_eq!(restored.nodes[1].position.y.to_bits(), awkward.y.to_bits());
	}

	#[test]
	fn stale_or_broken_snapshots_are_ignored() {
		let storage = MemoryStorage::default();
		storage.write("old", r#"{"nodes":[{"id":"x"}],"edges":[]}"#).unwrap();
		storage.write("broken", "{not json").unwrap();
		assert!(persist::load::<FlowSnapshot>(&storage, "old").is_none());
		assert!(persist::load::<FlowSnapshot>(&storage, "broken").is_none());
		assert!(persist::load::<FlowSnapshot>(&storage, "missing").is_none());
	}

	#[test]
	fn restore_reinserts_missing_root() {
		let snapshot = FlowSnapshot {
			version: SNAPSHOT_VERSION,
			nodes: vec![Node::new("node-1", NodeKind::User, "a", Position::ORIGIN)],
			..FlowSnapshot::default()
		};
		let state = FlowState::from_snapshot(snapshot);
		assert!(state.nodes[0].is_root());
		assert_eq!(state.nodes.len(), 2);
	}

	fn command() -> impl Strategy<Value = FlowCommand> {
		prop_oneof![
			("[a-z ]{0,6}", proptest::collection::vec("[a-z]{0,4}", 0..7)).prop_map(|(label, suggestions)| {
				FlowCommand::AddAction {
					label,
					suggestions,
					center: CENTER,
				}
			}),
			proptest::option::of(Just(ROOT_ID.to_string())).prop_map(FlowCommand::Select),
			any::<bool>().prop_map(FlowCommand::SetLoading),
			prop_oneof![Just(ViewMode::Neural), Just(ViewMode::Mandala)].prop_map(FlowCommand::SetViewMode),
		]
	}

	proptest! {
		#[test]
		fn root_survives_any_command_sequence(commands in proptest::collection::vec(command(), 0..20)) {
			let mut state = FlowState::default();
			for command in commands {
				state.apply(command);
			}
			prop_assert_eq!(state.nodes.iter().filter(|n| n.is_root()).count(), 1);
			prop_assert!(state.edges.iter().all(|e| state.node(&e.source).is_some() && state.node(&e.target).is_some()));
		}
	}
}

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::Reducer;
use super::persist::{SNAPSHOT_VERSION, Snapshot};
use crate::generate::ELEMENT_COUNT;
use crate::mandala::{MandalaConfig, MandalaTree};
use crate::model::{MandalaNode, Position};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MandalaSnapshot {
	#[serde(default)]
	pub version: u32,
	#[serde(default)]
	pub mandala_nodes: Vec<MandalaNode>,
	#[serde(default)]
	pub current_mandala_id: Option<String>,
}

impl Snapshot for MandalaSnapshot {
	fn version(&self) -> u32 {
		self.version
	}
}

#[derive(Clone, Debug, PartialEq)]
pub enum MandalaCommand {
	/// Starts a new top-level chart and makes it current.
	CreateChart {
		label: String,
		anchor: Option<Position>,
		elements: Vec<String>,
	},
	/// Promotes the leaf in `cell` of the unit centred on `center_id`.
	Expand {
		center_id: String,
		cell: usize,
		elements: Vec<String>,
	},
	SelectChart(String),
	SetLoading(bool),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MandalaState {
	pub tree: MandalaTree,
	pub current_chart: Option<String>,
	pub is_loading: bool,
	pub config: MandalaConfig,
}

fn clean(elements: Vec<String>) -> Vec<String> {
	elements
		.into_iter()
		.map(|e| e.trim().to_string())
		.filter(|e| !e.is_empty())
		.take(ELEMENT_COUNT)
		.collect()
}

impl MandalaState {
	pub fn from_snapshot(snapshot: MandalaSnapshot) -> Self {
		let tree = MandalaTree::from_nodes(snapshot.mandala_nodes);
		// a dangling current id falls back to the newest chart
		let current_chart = snapshot
			.current_mandala_id
			.filter(|id| tree.get(id).is_some_and(MandalaNode::is_chart_root))
			.or_else(|| tree.charts().last().map(|c| c.id.clone()));
		Self {
			tree,
			current_chart,
			..Self::default()
		}
	}

	pub fn snapshot(&self) -> MandalaSnapshot {
		MandalaSnapshot {
			version: SNAPSHOT_VERSION,
			mandala_nodes: self.tree.nodes().to_vec(),
			current_mandala_id: self.current_chart.clone(),
		}
	}
}

impl Reducer for MandalaState {
	type Command = MandalaCommand;

	fn apply(&mut self, command: MandalaCommand) -> bool {
		match command {
			MandalaCommand::CreateChart {
				label,
				anchor,
				elements,
			} => {
				let label = label.trim();
				if label.is_empty() {
					debug!("Ignoring blank chart topic");
					return false;
				}
				let id = self.tree.create_chart(label, anchor, &clean(elements), &self.config);
				info!("Created mandala chart {label:?} ({id})");
				self.current_chart = Some(id);
				true
			}
			MandalaCommand::Expand {
				center_id,
				cell,
				elements,
			} => match self
				.tree
				.plan_expansion(&center_id, cell, self.current_chart.as_deref(), &self.config)
			{
				Ok(plan) => {
					self.tree.expand(&plan, &clean(elements), &self.config);
					info!("Expanded {:?} in cell {cell}", plan.label);
					true
				}
				Err(rejection) => {
					debug!("Expansion of cell {cell} under {center_id} rejected: {rejection:?}");
					false
				}
			},
			MandalaCommand::SelectChart(id) => {
				let is_chart = self.tree.get(&id).is_some_and(MandalaNode::is_chart_root);
				if !is_chart || self.current_chart.as_deref() == Some(id.as_str()) {
					return false;
				}
				self.current_chart = Some(id);
				true
			}
			MandalaCommand::SetLoading(loading) => {
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
	use super::*;
	use crate::generate::lookup_elements;
	use crate::mandala::ExpandRejection;
	use crate::store::persist::{self, MemoryStorage};

	fn create(state: &mut MandalaState, label: &str) -> String {
		assert!(state.apply(MandalaCommand::CreateChart {
			label: label.into(),
			anchor: None,
			elements: lookup_elements(label),
		}));
		state.current_chart.clone().unwrap()
	}

	fn expand(state: &mut MandalaState, center_id: &str, cell: usize) -> bool {
		let label = state
			.tree
			.child_in_slot(center_id, cell)
			.map(|c| c.label.clone())
			.unwrap_or_default();
		state.apply(MandalaCommand::Expand {
			center_id: center_id.into(),
			cell,
			elements: lookup_elements(&label),
		})
	}

	#[test]
	fn new_chart_becomes_current() {
		let mut state = MandalaState::default();
		let first = create(&mut state, "英会話を上達させたい");
		let second = create(&mut state, "健康管理");
		assert_ne!(first, second);
		assert_eq!(state.current_chart.as_deref(), Some(second.as_str()));
		assert_eq!(state.tree.charts().count(), 2);

		assert!(state.apply(MandalaCommand::SelectChart(first.clone())));
		let units: Vec<&str> = state.tree.units_of(&first).map(|u| u.id.as_str()).collect();
		assert_eq!(units, [first.as_str()]);
	}

	#[test]
	fn blank_topic_is_rejected() {
		let mut state = MandalaState::default();
		assert!(!state.apply(MandalaCommand::CreateChart {
			label: " ".into(),
			anchor: None,
			elements: Vec::new(),
		}));
		assert!(state.tree.nodes().is_empty());
	}

	#[test]
	fn expanding_twice_is_a_no_op() {
		let mut state = MandalaState::default();
		let chart = create(&mut state, "英会話を上達させたい");
		assert!(expand(&mut state, &chart, 0));
		let before = state.clone();
		assert!(!expand(&mut state, &chart, 0));
		assert_eq!(state, before);
	}

	#[test]
	fn only_current_chart_expands() {
		let mut state = MandalaState::default();
		let first = create(&mut state, "英会話を上達させたい");
		create(&mut state, "健康管理");
		let before = state.clone();
		assert!(!expand(&mut state, &first, 1));
		assert_eq!(state, before);
		assert_eq!(
			state.tree.plan_expansion(&first, 1, state.current_chart.as_deref(), &state.config),
			Err(ExpandRejection::NotCurrentChart)
		);
	}

	#[test]
	fn selecting_a_leaf_as_chart_is_rejected() {
		let mut state = MandalaState::default();
		let chart = create(&mut state, "健康管理");
		let leaf = state.tree.children_of(&chart)[0].id.clone();
		assert!(!state.apply(MandalaCommand::SelectChart(leaf)));
		assert!(!state.apply(MandalaCommand::SelectChart(chart)));
	}

	#[test]
	fn snapshot_round_trips_through_storage() {
		let mut state = MandalaState::default();
		let chart = create(&mut state, "英会話を上達させたい");
		expand(&mut state, &chart, 5);
		state.apply(MandalaCommand::SetLoading(true));

		let storage = MemoryStorage::default();
		persist::save(&storage, "mandala", &state.snapshot());
		let restored = MandalaState::from_snapshot(persist::load(&storage, "mandala").unwrap());

		assert_eq!(restored.tree, state.tree);
		assert_eq!(restored.current_chart, Some(chart));
		assert!(!restored.is_loading);
	}

	#[test]
	fn dangling_current_chart_falls_back_to_newest() {
		let mut state = MandalaState::default();
		create(&mut state, "a");
		let newest = create(&mut state, "b");
		let mut snapshot = state.snapshot();
		snapshot.current_mandala_id = Some("gone".into());
		assert_eq!(MandalaState::from_snapshot(snapshot).current_chart, Some(newest));
	}
}

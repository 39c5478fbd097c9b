use uuid::Uuid;

use super::grid::{CENTER_CELL, CHILD_SLOTS, is_child_slot, neighbour_anchor};
use crate::model::{MandalaNode, Position};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MandalaConfig {
	pub cell_size: f64,
	/// Deepest unit allowed, counted in parent links from the chart centre.
	pub max_depth: usize,
	pub min_zoom: f64,
	pub max_zoom: f64,
}

impl MandalaConfig {
	pub fn unit_size(&self) -> f64 {
		self.cell_size * 3.0
	}
}

impl Default for MandalaConfig {
	fn default() -> Self {
		Self {
			cell_size: 80.0,
			max_depth: 3,
			min_zoom: 0.3,
			max_zoom: 2.0,
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExpandRejection {
	CenterCell,
	OutOfRange,
	UnknownUnit,
	NotCenter,
	NotCurrentChart,
	EmptyCell,
	AlreadyExpanded,
	TooDeep,
	Occupied,
}

/// A validated expansion: promote `node_id` to a centre anchored at `anchor`.
#[derive(Clone, Debug, PartialEq)]
pub struct ExpansionPlan {
	pub node_id: String,
	pub label: String,
	pub anchor: Position,
}

/// Flat collection of mandala nodes; children are derived from parent links.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MandalaTree {
	nodes: Vec<MandalaNode>,
}

fn next_id() -> String {
	format!("mandala-{}", Uuid::new_v4().simple())
}

impl MandalaTree {
	pub fn from_nodes(nodes: Vec<MandalaNode>) -> Self {
		Self { nodes }
	}

	pub fn nodes(&self) -> &[MandalaNode] {
		&self.nodes
	}

	pub fn get(&self, id: &str) -> Option<&MandalaNode> {
		self.nodes.iter().find(|n| n.id == id)
	}

	/// Top-level chart centres in creation order.
	pub fn charts(&self) -> impl Iterator<Item = &MandalaNode> {
		self.nodes.iter().filter(|n| n.is_chart_root())
	}

	/// Children of `id` ordered by slot.
	pub fn children_of(&self, id: &str) -> Vec<&MandalaNode> {
		let mut children: Vec<&MandalaNode> = self
			.nodes
			.iter()
			.filter(|n| n.parent_id.as_deref() == Some(id))
			.collect();
		children.sort_by_key(|n| n.slot);
		children
	}

	pub fn child_in_slot(&self, id: &str, slot: usize) -> Option<&MandalaNode> {
		self.nodes
			.iter()
			.find(|n| n.parent_id.as_deref() == Some(id) && n.slot.map(usize::from) == Some(slot))
	}

	/// Every unit (centre node) of a chart.
	pub fn units_of<'a>(&'a self, chart_id: &'a str) -> impl Iterator<Item = &'a MandalaNode> + 'a {
		self.nodes.iter().filter(move |n| n.is_center && n.chart_id == chart_id)
	}

	pub fn is_occupied(&self, chart_id: &str, anchor: Position) -> bool {
		self.units_of(chart_id).any(|n| n.position == anchor)
	}

	/// Parent links between `id` and its chart centre.
	pub fn depth_of(&self, id: &str) -> usize {
		let mut depth = 0;
		let mut current = self.get(id);
		while let Some(parent) = current.and_then(|n| n.parent_id.as_deref()) {
			depth += 1;
			// a corrupted snapshot could hold a cycle
			if depth > self.nodes.len() {
				break;
			}
			current = self.get(parent);
		}
		depth
	}

	/// Adds a top-level chart and returns its centre id.
	pub fn create_chart(
		&mut self,
		label: &str,
		anchor: Option<Position>,
		elements: &[String],
		config: &MandalaConfig,
	) -> String {
		let id = next_id();
		let anchor = anchor.unwrap_or(Position::ORIGIN);
		self.nodes.push(MandalaNode {
			id: id.clone(),
			label: label.to_string(),
			parent_id: None,
			chart_id: id.clone(),
			slot: None,
			position: anchor,
			is_center: true,
		});
		self.attach_children(&id, &id, anchor, elements, config);
		id
	}

	pub fn plan_expansion(
		&self,
		center_id: &str,
		cell: usize,
		current_chart: Option<&str>,
		config: &MandalaConfig,
	) -> Result<ExpansionPlan, ExpandRejection> {
		if cell == CENTER_CELL {
			return Err(ExpandRejection::CenterCell);
		}
		if !is_child_slot(cell) {
			return Err(ExpandRejection::OutOfRange);
		}
		let center = self.get(center_id).ok_or(ExpandRejection::UnknownUnit)?;
		if !center.is_center {
			return Err(ExpandRejection::NotCenter);
		}
		if current_chart.is_some_and(|chart| chart != center.chart_id) {
			return Err(ExpandRejection::NotCurrentChart);
		}
		let child = self.child_in_slot(center_id, cell).ok_or(ExpandRejection::EmptyCell)?;
		if child.is_center {
			return Err(ExpandRejection::AlreadyExpanded);
		}
		if self.depth_of(&child.id) > config.max_depth {
			return Err(ExpandRejection::TooDeep);
		}
		let anchor = neighbour_anchor(center.position, cell, config.unit_size());
		if self.is_occupied(&center.chart_id, anchor) {
			return Err(ExpandRejection::Occupied);
		}
		Ok(ExpansionPlan {
			node_id: child.id.clone(),
			label: child.label.clone(),
			anchor,
		})
	}

	/// Applies a plan produced by [`Self::plan_expansion`] against this tree.
	pub fn expand(&mut self, plan: &ExpansionPlan, elements: &[String], config: &MandalaConfig) {
		let Some(node) = self.nodes.iter_mut().find(|n| n.id == plan.node_id) else {
			return;
		};
		node.is_center = true;
		node.position = plan.anchor;
		let chart_id = node.chart_id.clone();
		self.attach_children(&plan.node_id, &chart_id, plan.anchor, elements, config);
	}

	fn attach_children(
		&mut self,
		parent_id: &str,
		chart_id: &str,
		anchor: Position,
		elements: &[String],
		config: &MandalaConfig,
	) {
		for (&slot, label) in CHILD_SLOTS.iter().zip(elements) {
			self.nodes.push(MandalaNode {
				id: next_id(),
				label: label.clone(),
				parent_id: Some(parent_id.to_string()),
				chart_id: chart_id.to_string(),
				slot: Some(slot as u8),
				position: neighbour_anchor(anchor, slot, config.unit_size()),
				is_center: false,
			});
		}
	}
}

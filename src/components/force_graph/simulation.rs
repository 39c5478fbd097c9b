use std::collections::HashMap;

use super::forces::{self, Body, ForceParams, Link};
use super::hierarchy::hierarchy_depths;
use crate::model::{FlowGraph, NodeKind, Position, ROOT_ID};

pub const ROOT_RADIUS: f64 = 45.0;
pub const NODE_RADIUS: f64 = 25.0;

#[derive(Clone, Debug)]
pub struct SimNode {
	pub id: String,
	pub kind: NodeKind,
	pub label: String,
	pub index: usize,
	pub body: Body,
	/// Pinned coordinates; `None` leaves the node to the forces.
	pub pin: Option<Position>,
}

impl SimNode {
	pub fn radius(&self) -> f64 {
		if self.body.is_root {
			ROOT_RADIUS
		} else {
			NODE_RADIUS
		}
	}
}

/// Live, animated layout of one neural graph. Rebuilt from scratch whenever
/// the node or edge collections change.
pub struct Simulation {
	nodes: Vec<SimNode>,
	links: Vec<Link>,
	params: ForceParams,
	center: Position,
	alpha: f64,
	alpha_target: f64,
}

impl Simulation {
	/// Builds a simulation for `graph`. Nodes that also exist in `previous`
	/// keep their live position, velocity and pin; new ones start at their
	/// stored seed position.
	pub fn new(
		graph: &FlowGraph,
		previous: Option<&Simulation>,
		width: f64,
		height: f64,
		params: ForceParams,
	) -> Self {
		let depths = hierarchy_depths(ROOT_ID, &graph.edges);
		let carried: HashMap<&str, &SimNode> = previous
			.map(|p| p.nodes.iter().map(|n| (n.id.as_str(), n)).collect())
			.unwrap_or_default();

		let nodes: Vec<SimNode> = graph
			.nodes
			.iter()
			.enumerate()
			.map(|(index, node)| {
				let old = carried.get(node.id.as_str());
				SimNode {
					id: node.id.clone(),
					kind: node.kind,
					label: node.label.clone(),
					index,
					body: Body {
						pos: old.map(|o| o.body.pos).unwrap_or(node.position),
						vel: old.map(|o| o.body.vel).unwrap_or_default(),
						depth: depths.get(&node.id).copied().unwrap_or(0),
						is_root: node.is_root(),
					},
					pin: old.and_then(|o| o.pin),
				}
			})
			.collect();

		let index_of: HashMap<&str, usize> =
			nodes.iter().map(|n| (n.id.as_str(), n.index)).collect();
		let links = graph
			.edges
			.iter()
			.filter_map(|e| {
				Some(Link {
					source: *index_of.get(e.source.as_str())?,
					target: *index_of.get(e.target.as_str())?,
				})
			})
			.collect();

		let mut sim = Self {
			nodes,
			links,
			params,
			center: Position::ORIGIN,
			alpha: 1.0,
			alpha_target: 0.0,
		};
		sim.resize(width, height);
		sim
	}

	pub fn nodes(&self) -> &[SimNode] {
		&self.nodes
	}

	pub fn links(&self) -> &[Link] {
		&self.links
	}

	pub fn params(&self) -> &ForceParams {
		&self.params
	}

	pub fn center(&self) -> Position {
		self.center
	}

	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	pub fn alpha_target(&self) -> f64 {
		self.alpha_target
	}

	pub fn set_alpha_target(&mut self, target: f64) {
		self.alpha_target = target;
	}

	pub fn is_running(&self) -> bool {
		self.alpha >= self.params.alpha_min || self.alpha_target > self.alpha
	}

	/// Retargets the centring forces and re-pins the root at the new centre.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.center = Position::new(width / 2.0, height / 2.0);
		let center = self.center;
		for node in self.nodes.iter_mut().filter(|n| n.body.is_root) {
			node.pin = Some(center);
			node.body.pos = center;
		}
	}

	pub fn pin(&mut self, index: usize, at: Position) {
		if let Some(node) = self.nodes.get_mut(index) {
			node.pin = Some(at);
		}
	}

	pub fn unpin(&mut self, index: usize) {
		if let Some(node) = self.nodes.get_mut(index) {
			node.pin = None;
		}
	}

	/// Topmost node whose disc contains `at` (graph space).
	pub fn node_at(&self, at: Position) -> Option<usize> {
		self.nodes
			.iter()
			.rev()
			.find(|n| n.body.pos.distance(at) < n.radius())
			.map(|n| n.index)
	}

	pub fn tick(&mut self) {
		self.alpha += (self.alpha_target - self.alpha) * self.params.alpha_decay;
		let alpha = self.alpha;

		let bodies: Vec<Body> = self.nodes.iter().map(|n| n.body).collect();
		let contributions = [
			forces::link(&bodies, &self.links, &self.params, alpha),
			forces::charge(&bodies, &self.params, alpha),
			forces::collide(&bodies, &self.params),
			forces::axis(&bodies, &self.params, self.center, alpha),
			forces::radial(&bodies, &self.params, self.center, alpha),
		];

		let decay = 1.0 - self.params.velocity_decay;
		for (i, node) in self.nodes.iter_mut().enumerate() {
			for force in &contributions {
				node.body.vel += force[i];
			}
			match node.pin {
				Some(pin) => {
					node.body.pos = pin;
					node.body.vel = Position::ORIGIN;
				}
				None => {
					node.body.vel = node.body.vel * decay;
					node.body.pos += node.body.vel;
				}
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::{Edge, Node};

	fn graph(n: usize) -> FlowGraph {
		let mut nodes = vec![Node::root()];
		let mut edges = Vec::new();
		for i in 1..n {
			let id = format!("s{i}");
			nodes.push(Node::new(&id, NodeKind::Suggestion, "x", Position::new(i as f64 * 7.0, 3.0)));
			edges.push(Edge {
				id: format!("e{i}"),
				source: ROOT_ID.into(),
				target: id,
			});
		}
		FlowGraph { nodes, edges }
	}

	#[test]
	fn root_is_pinned_to_viewport_center() {
		let mut sim = Simulation::new(&graph(4), None, 800.0, 600.0, ForceParams::default());
		assert_eq!(sim.nodes()[0].pin, Some(Position::new(400.0, 300.0)));
		for _ in 0..50 {
			sim.tick();
		}
		assert_eq!(sim.nodes()[0].body.pos, Position::new(400.0, 300.0));
		sim.resize(1000.0, 500.0);
		assert_eq!(sim.nodes()[0].pin, Some(Position::new(500.0, 250.0)));
	}

	#[test]
	fn simulation_cools_down() {
		let mut sim = Simulation::new(&graph(6), None, 800.0, 600.0, ForceParams::default());
		let mut ticks = 0;
		while sim.is_running() {
			sim.tick();
			ticks += 1;
			assert!(ticks < 1000, "never settled");
		}
		assert!(sim.nodes().iter().all(|n| n.body.pos.x.is_finite() && n.body.pos.y.is_finite()));
	}

	#[test]
	fn children_spread_away_from_root() {
		let mut sim = Simulation::new(&graph(6), None, 800.0, 600.0, ForceParams::default());
		for _ in 0..300 {
			sim.tick();
		}
		let center = sim.center();
		for node in &sim.nodes()[1..] {
			assert!(node.body.pos.distance(center) > ROOT_RADIUS + NODE_RADIUS);
		}
	}

	#[test]
	fn rebuild_carries_live_positions() {
		let mut sim = Simulation::new(&graph(3), None, 800.0, 600.0, ForceParams::default());
		for _ in 0..20 {
			sim.tick();
		}
		let live = sim.nodes()[1].body.pos;
		let rebuilt = Simulation::new(&graph(5), Some(&sim), 800.0, 600.0, ForceParams::default());
		assert_eq!(rebuilt.nodes()[1].body.pos, live);
		assert_eq!(rebuilt.nodes()[4].body.pos, Position::new(28.0, 3.0));
		assert_eq!(rebuilt.links().len(), 4);
	}

	#[test]
	fn reheating_keeps_it_running() {
		let mut sim = Simulation::new(&graph(2), None, 800.0, 600.0, ForceParams::default());
		while sim.is_running() {
			sim.tick();
		}
		sim.set_alpha_target(0.3);
		assert!(sim.is_running());
		for _ in 0..100 {
			sim.tick();
		}
		assert!(sim.alpha() > 0.1);
	}

	#[test]
	fn hit_test_uses_role_radius() {
		let sim = Simulation::new(&graph(1), None, 800.0, 600.0, ForceParams::default());
		assert_eq!(sim.node_at(Position::new(440.0, 300.0)), Some(0));
		assert_eq!(sim.node_at(Position::new(450.0, 300.0)), None);
	}
}

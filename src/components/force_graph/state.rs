use super::forces::ForceParams;
use super::simulation::Simulation;
use crate::components::viewport::{PanState, ViewTransform, wheel_factor};
use crate::model::{FlowGraph, Position};

pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 3.0;
const INITIAL_ZOOM: f64 = 0.8;
/// Pointer travel (screen px) below which a press counts as a click.
const CLICK_SLOP: f64 = 3.0;

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<usize>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start: Position,
	pub moved: bool,
}

pub struct ForceGraphState {
	pub simulation: Simulation,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub width: f64,
	pub height: f64,
}

impl ForceGraphState {
	pub fn new(graph: &FlowGraph, width: f64, height: f64) -> Self {
		let simulation = Simulation::new(graph, None, width, height, ForceParams::default());
		let transform = if graph.nodes.len() == 1 {
			ViewTransform::scaled_about(Position::new(width / 2.0, height / 2.0), INITIAL_ZOOM)
		} else {
			ViewTransform::default()
		};
		Self {
			simulation,
			transform,
			drag: DragState::default(),
			pan: PanState::default(),
			width,
			height,
		}
	}

	/// Replaces the simulation for a changed graph. The view transform and
	/// any drag in progress carry over.
	pub fn rebuild(&mut self, graph: &FlowGraph) {
		let params = *self.simulation.params();
		let dragged = self
			.drag
			.node_idx
			.filter(|_| self.drag.active)
			.map(|idx| self.simulation.nodes()[idx].id.clone());
		self.simulation = Simulation::new(graph, Some(&self.simulation), self.width, self.height, params);

		let Some(id) = dragged else {
			return;
		};
		match self.simulation.nodes().iter().position(|n| n.id == id) {
			Some(idx) => {
				self.drag.node_idx = Some(idx);
				self.simulation.set_alpha_target(params.drag_alpha_target);
			}
			None => self.drag = DragState::default(),
		}
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> Position {
		self.transform.screen_to_graph(sx, sy)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<usize> {
		self.simulation.node_at(self.screen_to_graph(sx, sy))
	}

	pub fn pointer_down(&mut self, sx: f64, sy: f64) {
		let Some(idx) = self.node_at_position(sx, sy) else {
			self.pan.begin(sx, sy, &self.transform);
			return;
		};
		if self.simulation.alpha_target() == 0.0 {
			let target = self.simulation.params().drag_alpha_target;
			self.simulation.set_alpha_target(target);
		}
		let node_start = self.simulation.nodes()[idx].body.pos;
		self.simulation.pin(idx, node_start);
		self.drag = DragState {
			active: true,
			node_idx: Some(idx),
			start_x: sx,
			start_y: sy,
			node_start,
			moved: false,
		};
	}

	pub fn pointer_move(&mut self, sx: f64, sy: f64) {
		if let (true, Some(idx)) = (self.drag.active, self.drag.node_idx) {
			let (dx, dy) = (sx - self.drag.start_x, sy - self.drag.start_y);
			if (dx * dx + dy * dy).sqrt() > CLICK_SLOP {
				self.drag.moved = true;
			}
			let k = self.transform.k;
			let at = self.drag.node_start + Position::new(dx / k, dy / k);
			self.simulation.pin(idx, at);
		} else {
			self.pan.update(sx, sy, &mut self.transform);
		}
	}

	/// Ends a drag or pan. Returns the id of the node when the press never
	/// moved far enough to count as a drag.
	pub fn pointer_up(&mut self) -> Option<String> {
		let clicked = self
			.drag
			.node_idx
			.filter(|_| self.drag.active && !self.drag.moved)
			.map(|idx| self.simulation.nodes()[idx].id.clone());
		self.release();
		clicked
	}

	/// Leaving the canvas ends the gesture without reporting a click.
	pub fn pointer_leave(&mut self) {
		self.release();
	}

	/// Drops the drag and pan; the root goes back to its centre pin.
	fn release(&mut self) {
		self.pan.end();
		let drag = std::mem::take(&mut self.drag);
		let Some(idx) = drag.node_idx.filter(|_| drag.active) else {
			return;
		};
		self.simulation.set_alpha_target(0.0);
		if self.simulation.nodes()[idx].body.is_root {
			let center = self.simulation.center();
			self.simulation.pin(idx, center);
		} else {
			self.simulation.unpin(idx);
		}
	}

	pub fn wheel(&mut self, sx: f64, sy: f64, delta_y: f64) {
		self.transform
			.zoom_at(sx, sy, wheel_factor(delta_y), MIN_ZOOM, MAX_ZOOM);
	}

	pub fn tick(&mut self) {
		if self.simulation.is_running() {
			self.simulation.tick();
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.simulation.resize(width, height);
	}
}

//! Force pipeline for the neural layout.
//!
//! Every force is a pure function over a snapshot of the bodies returning one
//! velocity contribution per body. The simulation sums them once per tick.

use crate::model::Position;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ForceParams {
	pub link_distance: f64,
	pub link_depth_step: f64,
	pub link_strength: f64,
	pub charge_root: f64,
	pub charge_node: f64,
	pub charge_distance_max: f64,
	pub collide_root: f64,
	pub collide_node: f64,
	pub collide_strength: f64,
	pub axis_strength: f64,
	pub axis_depth_step: f64,
	pub radial_radius: f64,
	pub radial_depth_step: f64,
	pub radial_strength: f64,
	pub velocity_decay: f64,
	pub alpha_decay: f64,
	pub alpha_min: f64,
	pub drag_alpha_target: f64,
}

impl Default for ForceParams {
	fn default() -> Self {
		Self {
			link_distance: 150.0,
			link_depth_step: 50.0,
			link_strength: 0.5,
			charge_root: -1000.0,
			charge_node: -400.0,
			charge_distance_max: 500.0,
			collide_root: 80.0,
			collide_node: 50.0,
			collide_strength: 0.8,
			axis_strength: 0.1,
			axis_depth_step: 0.05,
			radial_radius: 200.0,
			radial_depth_step: 150.0,
			radial_strength: 0.8,
			velocity_decay: 0.6,
			alpha_decay: 0.02,
			alpha_min: 0.001,
			drag_alpha_target: 0.3,
		}
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Body {
	pub pos: Position,
	pub vel: Position,
	pub depth: u32,
	pub is_root: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Link {
	pub source: usize,
	pub target: usize,
}

/// Tiny deterministic displacement for coincident points.
fn jiggle(seed: usize) -> Position {
	let e = 1e-6 * (seed as f64 + 1.0);
	Position::new(e, -e)
}

fn zeroed(n: usize) -> Vec<Position> {
	vec![Position::ORIGIN; n]
}

pub fn link(bodies: &[Body], links: &[Link], params: &ForceParams, alpha: f64) -> Vec<Position> {
	let mut out = zeroed(bodies.len());
	let mut degree = vec![0usize; bodies.len()];
	for l in links {
		degree[l.source] += 1;
		degree[l.target] += 1;
	}

	for l in links.iter().filter(|l| l.source != l.target) {
		let (s, t) = (&bodies[l.source], &bodies[l.target]);
		let mut d = (t.pos + t.vel) - (s.pos + s.vel);
		if d.length() == 0.0 {
			d = jiggle(l.target);
		}
		let len = d.length();
		let span = (t.depth as f64 - s.depth as f64).abs();
		let target_len = params.link_distance + span * params.link_depth_step;
		let d = d * ((len - target_len) / len * alpha * params.link_strength);
		let bias = degree[l.source] as f64 / (degree[l.source] + degree[l.target]) as f64;
		out[l.target] += d * -bias;
		out[l.source] += d * (1.0 - bias);
	}
	out
}

pub fn charge(bodies: &[Body], params: &ForceParams, alpha: f64) -> Vec<Position> {
	let mut out = zeroed(bodies.len());
	let max2 = params.charge_distance_max * params.charge_distance_max;
	for (i, body) in bodies.iter().enumerate() {
		for (j, other) in bodies.iter().enumerate() {
			if i == j {
				continue;
			}
			let mut d = other.pos - body.pos;
			let mut l2 = d.x * d.x + d.y * d.y;
			if l2 >= max2 {
				continue;
			}
			if l2 == 0.0 {
				d = jiggle(i + j);
				l2 = d.x * d.x + d.y * d.y;
			}
			if l2 < 1.0 {
				l2 = l2.sqrt();
			}
			let strength = if other.is_root {
				params.charge_root
			} else {
				params.charge_node
			};
			out[i] += d * (strength * alpha / l2);
		}
	}
	out
}

pub fn collide(bodies: &[Body], params: &ForceParams) -> Vec<Position> {
	let mut out = zeroed(bodies.len());
	let radius = |b: &Body| {
		if b.is_root {
			params.collide_root
		} else {
			params.collide_node
		}
	};
	for i in 0..bodies.len() {
		let ri = radius(&bodies[i]);
		let pi = bodies[i].pos + bodies[i].vel;
		for j in (i + 1)..bodies.len() {
			let rj = radius(&bodies[j]);
			let r = ri + rj;
			let mut d = pi - (bodies[j].pos + bodies[j].vel);
			let mut l2 = d.x * d.x + d.y * d.y;
			if l2 >= r * r {
				continue;
			}
			if l2 == 0.0 {
				d = jiggle(i + j);
				l2 = d.x * d.x + d.y * d.y;
			}
			let l = l2.sqrt();
			let d = d * ((r - l) / l * params.collide_strength);
			let w = rj * rj / (ri * ri + rj * rj);
			out[i] += d * w;
			out[j] += d * -(1.0 - w);
		}
	}
	out
}

/// Pulls each body toward the centre on both axes, harder the deeper it is.
pub fn axis(bodies: &[Body], params: &ForceParams, center: Position, alpha: f64) -> Vec<Position> {
	bodies
		.iter()
		.map(|b| {
			let strength = params.axis_strength + b.depth as f64 * params.axis_depth_step;
			(center - b.pos) * (strength * alpha)
		})
		.collect()
}

/// Pulls each body toward a shell around `center` whose radius grows with depth.
pub fn radial(bodies: &[Body], params: &ForceParams, center: Position, alpha: f64) -> Vec<Position> {
	bodies
		.iter()
		.enumerate()
		.map(|(i, b)| {
			let mut d = b.pos - center;
			if d.length() == 0.0 {
				d = jiggle(i);
			}
			let r = d.length();
			let shell = params.radial_radius + b.depth as f64 * params.radial_depth_step;
			d * ((shell - r) * params.radial_strength * alpha / r)
		})
		.collect()
}

use std::f64::consts::PI;

use crate::model::{Node, Position};

const ROOT_RING: f64 = 300.0;
const RING_STEP: f64 = 200.0;
const RADIUS_SPREAD: f64 = 50.0;
const SAME_RING_BAND: f64 = 100.0;
const FAN_STEP: f64 = 0.2;

fn origin(node: &Node, center: Position) -> Position {
	if node.is_root() { center } else { node.position }
}

/// Direction (radians) to grow from `source`: the middle of the widest gap
/// between neighbours on the same side of the centre and roughly the same
/// ring, kept within a quarter turn facing away from the centre.
fn free_angle(source: &Node, nodes: &[Node], center: Position) -> f64 {
	let from = origin(source, center);
	let is_left = from.x < center.x;
	let ring = from.distance(center);

	let base = if is_left { PI } else { 0.0 };
	let (min, max) = (base - PI / 4.0, base + PI / 4.0);
	let mid = (min + max) / 2.0;

	let mut angles: Vec<f64> = nodes
		.iter()
		.filter(|n| n.id != source.id)
		.map(|n| origin(n, center))
		.filter(|p| (p.x > center.x) == !is_left && (p.distance(center) - ring).abs() < SAME_RING_BAND)
		.map(|p| (p.y - from.y).atan2(p.x - from.x))
		.collect();
	angles.sort_by(f64::total_cmp);

	let best = angles
		.windows(2)
		.map(|w| (w[1] - w[0], w[0]))
		.filter(|&(gap, _)| gap > 0.0)
		.max_by(|a, b| a.0.total_cmp(&b.0))
		.map_or(mid, |(gap, start)| start + gap / 2.0);
	best.clamp(min, max)
}

/// Seed position for the `index`-th of `total` nodes grown from `source`.
pub fn seed_position(source: &Node, index: usize, total: usize, nodes: &[Node], center: Position) -> Position {
	let from = origin(source, center);
	let base = if source.is_root() {
		ROOT_RING
	} else {
		from.distance(center) + RING_STEP
	};
	let total = total.max(1) as f64;
	let radius = base + index as f64 * RADIUS_SPREAD / total;
	let angle = free_angle(source, nodes, center) + (index as f64 - total / 2.0) * FAN_STEP;
	Position::new(from.x + radius * angle.cos(), from.y + radius * angle.sin())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::NodeKind;

	#[test]
	fn root_children_start_one_ring_out() {
		let center = Position::new(400.0, 300.0);
		let root = Node::root();
		let p = seed_position(&root, 0, 1, &[root.clone()], center);
		// root sits at the centre, so it grows to the right
		assert!(p.x > center.x);
		assert!((p.distance(center) - ROOT_RING).abs() < 1e-6);
	}

	#[test]
	fn left_side_nodes_grow_further_left() {
		let center = Position::new(400.0, 300.0);
		let node = Node::new("a", NodeKind::User, "a", Position::new(100.0, 300.0));
		let p = seed_position(&node, 0, 1, &[Node::root(), node.clone()], center);
		assert!(p.x < node.position.x);
		assert!(p.distance(node.position) >= 300.0 + RING_STEP - 1e-6);
	}

	#[test]
	fn siblings_fan_out() {
		let center = Position::new(400.0, 300.0);
		let root = Node::root();
		let points: Vec<Position> = (0..5)
			.map(|i| seed_position(&root, i, 5, &[root.clone()], center))
			.collect();
		for pair in points.windows(2) {
			assert!(pair[0].distance(pair[1]) > 1.0);
		}
	}
}

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::simulation::SimNode;
use super::state::ForceGraphState;
use crate::model::NodeKind;

const LABEL_WIDTH: f64 = 120.0;
const LINE_HEIGHT: f64 = 1.1;

/// Sagitta of an arc with radius 1.5 × chord, as a fraction of the chord.
const ARC_BOW: f64 = 1.5 - 1.414_213_562_373_095;

/// Greedy line breaking by character, so unspaced CJK labels wrap too.
/// Whitespace only separates lines when it would start one.
pub fn wrap_label(label: &str, max_width: f64, measure: impl Fn(&str) -> f64) -> Vec<String> {
	let mut lines = Vec::new();
	let mut line = String::new();
	for ch in label.chars() {
		if line.is_empty() && ch.is_whitespace() {
			continue;
		}
		line.push(ch);
		if measure(&line) > max_width && line.chars().count() > 1 {
			line.pop();
			lines.push(line.trim_end().to_string());
			line = if ch.is_whitespace() { String::new() } else { ch.to_string() };
		}
	}
	if !line.trim().is_empty() {
		lines.push(line.trim_end().to_string());
	}
	lines
}

pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str("#000000");
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn draw_edges(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let nodes = state.simulation.nodes();
	ctx.set_line_width(2.0);
	for link in state.simulation.links() {
		let (s, t) = (nodes[link.source].body.pos, nodes[link.target].body.pos);
		let (dx, dy) = (t.x - s.x, t.y - s.y);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			continue;
		}

		// quadratic stand-in for the arc: bow to the right of travel
		let bow = 2.0 * ARC_BOW * dist;
		let (mx, my) = ((s.x + t.x) / 2.0, (s.y + t.y) / 2.0);
		let (cx, cy) = (mx - dy / dist * bow, my + dx / dist * bow);

		let gradient = ctx.create_linear_gradient(s.x, s.y, t.x, t.y);
		let _ = gradient.add_color_stop(0.0, "rgba(167, 139, 250, 0.8)");
		let _ = gradient.add_color_stop(1.0, "rgba(96, 165, 250, 0.4)");
		#[allow(deprecated)]
		ctx.set_stroke_style(&gradient);

		ctx.begin_path();
		ctx.move_to(s.x, s.y);
		ctx.quadratic_curve_to(cx, cy, t.x, t.y);
		ctx.stroke();
	}
}

fn draw_nodes(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	for node in state.simulation.nodes() {
		draw_node(node, ctx);
	}
	for node in state.simulation.nodes() {
		draw_label(node, ctx);
	}
}

fn draw_node(node: &SimNode, ctx: &CanvasRenderingContext2d) {
	let (x, y, r) = (node.body.pos.x, node.body.pos.y, node.radius());
	let (inner, outer) = match node.kind {
		NodeKind::User => ("#c4b5fd", "#6d28d9"),
		NodeKind::Suggestion => ("#93c5fd", "#1d4ed8"),
	};

	if let Ok(glow) = ctx.create_radial_gradient(x, y, r * 0.5, x, y, r * 1.8) {
		let _ = glow.add_color_stop(0.0, "rgba(167, 139, 250, 0.35)");
		let _ = glow.add_color_stop(1.0, "rgba(167, 139, 250, 0)");
		ctx.begin_path();
		let _ = ctx.arc(x, y, r * 1.8, 0.0, 2.0 * PI);
		#[allow(deprecated)]
		ctx.set_fill_style(&glow);
		ctx.fill();
	}

	if let Ok(fill) = ctx.create_radial_gradient(x - r * 0.3, y - r * 0.3, r * 0.1, x, y, r) {
		let _ = fill.add_color_stop(0.0, inner);
		let _ = fill.add_color_stop(1.0, outer);
		#[allow(deprecated)]
		ctx.set_fill_style(&fill);
	}
	ctx.begin_path();
	let _ = ctx.arc(x, y, r, 0.0, 2.0 * PI);
	ctx.fill();
	ctx.set_stroke_style_str("#1A202C");
	ctx.set_line_width(2.0);
	ctx.stroke();
}

fn draw_label(node: &SimNode, ctx: &CanvasRenderingContext2d) {
	let font_px = if node.body.is_root { 18.0 } else { 14.0 };
	let offset = if node.body.is_root { 55.0 } else { 35.0 };
	ctx.set_font(&format!("500 {font_px}px sans-serif"));
	ctx.set_text_align("center");
	ctx.set_fill_style_str("#E2E8F0");
	ctx.set_shadow_color("rgba(0, 0, 0, 0.8)");
	ctx.set_shadow_blur(10.0);

	let lines = wrap_label(&node.label, LABEL_WIDTH, |s| {
		ctx.measure_text(s).map(|m| m.width()).unwrap_or(0.0)
	});
	let (x, y) = (node.body.pos.x, node.body.pos.y - offset);
	for (i, line) in lines.iter().enumerate() {
		let _ = ctx.fill_text(line, x, y + i as f64 * font_px * LINE_HEIGHT);
	}
	ctx.set_shadow_blur(0.0);
}

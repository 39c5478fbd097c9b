use crate::model::Position;

/// Presentational pan/zoom: `screen = graph * k + (x, y)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

impl ViewTransform {
	/// `translate(c) · scale(k) · translate(-c)`: zoom by `k` keeping `center` fixed.
	pub fn scaled_about(center: Position, k: f64) -> Self {
		Self {
			x: center.x - center.x * k,
			y: center.y - center.y * k,
			k,
		}
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> Position {
		Position::new((sx - self.x) / self.k, (sy - self.y) / self.k)
	}

	/// Zooms by `factor` about the screen point `(sx, sy)`, clamped to `[min, max]`.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64, min: f64, max: f64) {
		let new_k = (self.k * factor).clamp(min, max);
		let ratio = new_k / self.k;
		self.x = sx - (sx - self.x) * ratio;
		self.y = sy - (sy - self.y) * ratio;
		self.k = new_k;
	}

	pub fn css(&self) -> String {
		format!("translate({}px, {}px) scale({})", self.x, self.y, self.k)
	}
}

pub fn wheel_factor(delta_y: f64) -> f64 {
	if delta_y > 0.0 { 0.9 } else { 1.1 }
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

impl PanState {
	pub fn begin(&mut self, sx: f64, sy: f64, transform: &ViewTransform) {
		self.active = true;
		self.start_x = sx;
		self.start_y = sy;
		self.transform_start_x = transform.x;
		self.transform_start_y = transform.y;
	}

	pub fn update(&self, sx: f64, sy: f64, transform: &mut ViewTransform) {
		if self.active {
			transform.x = self.transform_start_x + (sx - self.start_x);
			transform.y = self.transform_start_y + (sy - self.start_y);
		}
	}

	pub fn end(&mut self) {
		self.active = false;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn scaled_about_keeps_center_fixed() {
		let center = Position::new(400.0, 300.0);
		let t = ViewTransform::scaled_about(center, 0.8);
		assert!((t.screen_to_graph(400.0, 300.0).distance(center)) < 1e-9);
		assert_eq!(t.k, 0.8);
	}

	#[test]
	fn zoom_is_clamped_and_anchored_at_pointer() {
		let mut t = ViewTransform::default();
		let before = t.screen_to_graph(120.0, 80.0);
		for _ in 0..50 {
			t.zoom_at(120.0, 80.0, wheel_factor(-1.0), 0.1, 3.0);
		}
		assert_eq!(t.k, 3.0);
		assert!(t.screen_to_graph(120.0, 80.0).distance(before) < 1e-9);
		for _ in 0..100 {
			t.zoom_at(0.0, 0.0, wheel_factor(1.0), 0.1, 3.0);
		}
		assert_eq!(t.k, 0.1);
	}

	#[test]
	fn pan_moves_translation_only() {
		let mut t = ViewTransform::default();
		let mut pan = PanState::default();
		pan.begin(10.0, 10.0, &t);
		pan.update(25.0, 5.0, &mut t);
		assert_eq!((t.x, t.y, t.k), (15.0, -5.0, 1.0));
		pan.end();
		pan.update(100.0, 100.0, &mut t);
		assert_eq!((t.x, t.y), (15.0, -5.0));
	}
}

use std::ops::{Add, AddAssign, Mul, Sub};

use serde::{Deserialize, Serialize};

/// A point (or displacement) in graph space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
	#[serde(default)]
	pub x: f64,
	#[serde(default)]
	pub y: f64,
}

impl Position {
	pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	pub fn length(self) -> f64 {
		(self.x * self.x + self.y * self.y).sqrt()
	}

	pub fn distance(self, other: Self) -> f64 {
		(self - other).length()
	}
}

impl Add for Position {
	type Output = Self;

	fn add(self, rhs: Self) -> Self {
		Self::new(self.x + rhs.x, self.y + rhs.y)
	}
}

impl AddAssign for Position {
	fn add_assign(&mut self, rhs: Self) {
		self.x += rhs.x;
		self.y += rhs.y;
	}
}

impl Sub for Position {
	type Output = Self;

	fn sub(self, rhs: Self) -> Self {
		Self::new(self.x - rhs.x, self.y - rhs.y)
	}
}

impl Mul<f64> for Position {
	type Output = Self;

	fn mul(self, k: f64) -> Self {
		Self::new(self.x * k, self.y * k)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn distance_is_euclidean() {
		let (a, b) = (Position::new(1.0, 1.0), Position::new(4.0, 5.0));
		assert_eq!(a.distance(b), 5.0);
		assert_eq!((b - a) * 2.0, Position::new(6.0, 8.0));
	}

	#[test]
	fn missing_fields_default_to_zero() {
		let p: Position = serde_json::from_str(r#"{"x": 3}"#).unwrap();
		assert_eq!(p, Position::new(3.0, 0.0));
	}
}

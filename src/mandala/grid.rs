use crate::model::Position;

pub const CENTER_CELL: usize = 4;
pub const CELL_COUNT: usize = 9;

/// Non-centre cells in row-major order; children fill these in sequence.
pub const CHILD_SLOTS: [usize; 8] = [0, 1, 2, 3, 5, 6, 7, 8];

pub fn row_col(cell: usize) -> (usize, usize) {
	(cell / 3, cell % 3)
}

/// Offset of `cell` from the unit centre, in whole units: each axis is -1, 0 or 1.
pub fn cell_offset(cell: usize) -> (i32, i32) {
	let (row, col) = row_col(cell);
	(col as i32 - 1, row as i32 - 1)
}

/// Anchor of the unit spawned from `cell` of the unit anchored at `base`.
pub fn neighbour_anchor(base: Position, cell: usize, unit_size: f64) -> Position {
	let (dx, dy) = cell_offset(cell);
	Position::new(base.x + dx as f64 * unit_size, base.y + dy as f64 * unit_size)
}

pub fn is_child_slot(cell: usize) -> bool {
	cell < CELL_COUNT && cell != CENTER_CELL
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn offsets_cover_compass_points() {
		assert_eq!(cell_offset(0), (-1, -1));
		assert_eq!(cell_offset(1), (0, -1));
		assert_eq!(cell_offset(4), (0, 0));
		assert_eq!(cell_offset(5), (1, 0));
		assert_eq!(cell_offset(8), (1, 1));
	}

	#[test]
	fn neighbour_anchor_sits_one_unit_away() {
		let base = Position::new(240.0, 0.0);
		assert_eq!(neighbour_anchor(base, 3, 240.0), Position::new(0.0, 0.0));
		assert_eq!(neighbour_anchor(base, 7, 240.0), Position::new(240.0, 240.0));
	}

	#[test]
	fn centre_is_never_a_child_slot() {
		assert!(!is_child_slot(CENTER_CELL));
		assert!(!is_child_slot(9));
		assert_eq!(CHILD_SLOTS.iter().filter(|&&c| is_child_slot(c)).count(), 8);
	}
}

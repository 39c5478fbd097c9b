use crate::mandala::MandalaTree;
use crate::mandala::grid::{CELL_COUNT, CENTER_CELL};
use crate::model::Position;

#[derive(Clone, Debug, PartialEq)]
pub struct CellView {
	pub index: usize,
	/// `None` renders as a placeholder.
	pub label: Option<String>,
	/// The cell is the unit's own centre.
	pub is_center: bool,
	/// The cell's node anchors a unit of its own.
	pub expanded: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UnitView {
	pub id: String,
	pub anchor: Position,
	pub cells: Vec<CellView>,
}

/// The 3x3 grids of every unit in `chart_id`, in creation order.
pub fn unit_views(tree: &MandalaTree, chart_id: &str) -> Vec<UnitView> {
	tree.units_of(chart_id)
		.map(|unit| {
			let cells = (0..CELL_COUNT)
				.map(|index| {
					if index == CENTER_CELL {
						return CellView {
							index,
							label: Some(unit.label.clone()),
							is_center: true,
							expanded: false,
						};
					}
					let child = tree.child_in_slot(&unit.id, index);
					CellView {
						index,
						label: child.map(|c| c.label.clone()),
						is_center: false,
						expanded: child.is_some_and(|c| c.is_center),
					}
				})
				.collect();
			UnitView {
				id: unit.id.clone(),
				anchor: unit.position,
				cells,
			}
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::mandala::MandalaConfig;

	#[test]
	fn centre_cell_shows_unit_label_and_gaps_stay_empty() {
		let config = MandalaConfig::default();
		let mut tree = MandalaTree::default();
		let elements: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
		let chart = tree.create_chart("goal", None, &elements, &config);

		let units = unit_views(&tree, &chart);
		assert_eq!(units.len(), 1);
		let labels: Vec<Option<&str>> = units[0].cells.iter().map(|c| c.label.as_deref()).collect();
		assert_eq!(
			labels,
			[Some("a"), Some("b"), Some("c"), None, Some("goal"), None, None, None, None]
		);
		assert!(units[0].cells[CENTER_CELL].is_center);
	}

	#[test]
	fn expanded_leaf_is_flagged_and_gets_its_own_unit() {
		let config = MandalaConfig::default();
		let mut tree = MandalaTree::default();
		let elements: Vec<String> = (1..=8).map(|i| format!("e{i}")).collect();
		let chart = tree.create_chart("goal", None, &elements, &config);
		let plan = tree.plan_expansion(&chart, 1, Some(&chart), &config).unwrap();
		tree.expand(&plan, &elements, &config);

		let units = unit_views(&tree, &chart);
		assert_eq!(units.len(), 2);
		assert!(units[0].cells[1].expanded);
		assert_eq!(units[1].anchor, Position::new(0.0, -config.unit_size()));
		assert_eq!(units[1].cells[CENTER_CELL].label.as_deref(), Some("e2"));
	}
}

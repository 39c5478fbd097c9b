use serde::{Deserialize, Serialize};

use super::position::Position;

/// One cell of a mandala chart. Centre nodes anchor a 3x3 unit; leaves are
/// the surrounding cells of their parent's unit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MandalaNode {
	pub id: String,
	#[serde(default)]
	pub label: String,
	#[serde(default)]
	pub parent_id: Option<String>,
	/// Id of the top-level centre this node descends from.
	#[serde(default)]
	pub chart_id: String,
	/// Row-major cell index within the parent unit; never 4.
	#[serde(default)]
	pub slot: Option<u8>,
	#[serde(default)]
	pub position: Position,
	#[serde(default)]
	pub is_center: bool,
}

impl MandalaNode {
	pub fn is_chart_root(&self) -> bool {
		self.parent_id.is_none()
	}
}

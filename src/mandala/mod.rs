//! Recursive 3x3 mandala units and their placement.

pub mod grid;
mod tree;

pub use tree::{ExpandRejection, ExpansionPlan, MandalaConfig, MandalaTree};

//! Plain data shared by the stores, layout and renderers.

pub mod flow;
pub mod mandala;
pub mod position;

pub use flow::{Edge, FlowGraph, Node, NodeKind, ROOT_ID, ViewMode};
pub use mandala::MandalaNode;
pub use position::Position;

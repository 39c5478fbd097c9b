//! Leptos components and the canvas engines behind them.

pub mod force_graph;
pub mod input_form;
pub mod mandala_chart;
pub mod node_detail;
pub mod sidebar;
pub mod viewport;

mod component;
mod forces;
mod hierarchy;
mod render;
mod simulation;
mod state;

pub use component::ForceGraphCanvas;

//! Structural analysis of a graph snapshot.
pub mod topology;

pub use topology::GraphView;

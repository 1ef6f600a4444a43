//! Core types for aberration multigraphs.

pub mod edge;
pub mod amg;

pub use edge::{canonical_edges, Edge, EdgeColor, Vertex};
pub use amg::{AberrationMultigraph, AmgError, CycleStructure};

//! # aberration-multigraph
//!
//! Aberration multigraphs (AMGs) for modelling chromosomal rearrangements.
//!
//! An AMG is a vertex set of breakpoint ends carrying three disjoint edge
//! classes:
//!
//! - **chromatin** edges: the intact stretches of each chromosome
//! - **DSB** edges: double-strand breaks joining two ends of one chromosome
//! - **rejoin** edges: how broken ends were (mis)rejoined
//!
//! ## Architecture
//!
//! ```text
//! AmgGenerator ──┐
//!                ├─> search (most-constrained-first) ─> AberrationMultigraph
//! IncompleteAmg ─┘                                       │
//!                                     transform / graph queries / census
//! ```
//!
//! ## Determinism Guarantees
//!
//! - Edge collections are canonical: each pair sorted, each collection sorted
//! - Equality and hashing depend only on DSB and rejoin edges
//! - Enumeration order depends only on the labels and layout
//! - Fingerprints are xxh64 over canonical JSON

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod types;
pub mod graph;
pub mod transform;
pub mod generator;
pub mod incomplete;
pub mod canonical;
pub mod census;

mod search;

// Re-exports
pub use types::{canonical_edges, AberrationMultigraph, AmgError, CycleStructure, Edge, EdgeColor, Vertex};
pub use graph::{ColoredMultigraph, Diameter, DisjointSet, EdgeFilter};
pub use generator::AmgGenerator;
pub use incomplete::IncompleteAmg;
pub use canonical::{to_canonical_bytes, canonical_hash, canonical_hash_hex};
pub use census::{
    CensusConfig, CensusMode, CensusSummary, ConfigError, Operation, ReportRow, TransformationAtlas,
    AtlasEdge, write_report,
};

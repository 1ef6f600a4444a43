//! Census: classifying a generated family of AMGs.
//!
//! A census enumerates every connected AMG of one layout and reports on the
//! family as a whole:
//!
//! 1. **Summary**: totals by cycle structure and diameter
//! 2. **Report**: one JSON line per AMG with its invariants and configurations
//! 3. **Atlas**: which AMGs a single twist or swap connects
//!
//! ```text
//! CensusConfig → AmgGenerator → generate_amgs() → CensusSummary
//!                                             ├─→ write_report (JSON lines)
//!                                             └─→ TransformationAtlas
//! ```

pub mod summary;
pub mod report;
pub mod atlas;
pub mod config;

// Re-exports
pub use summary::{cycle_structure_label, CensusSummary};
pub use report::{write_report, ReportRow};
pub use atlas::{AtlasEdge, Operation, TransformationAtlas};
pub use config::{CensusConfig, CensusMode, ConfigError};

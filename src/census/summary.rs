//! Distribution of a family of AMGs by cycle structure and diameter.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::graph::Diameter;
use crate::types::{AberrationMultigraph, CycleStructure, Vertex};

/// Totals for one enumerated family of AMGs.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CensusSummary {
    /// Number of AMGs seen.
    pub total: u64,
    /// Count per cycle-structure label (see [`cycle_structure_label`]).
    pub by_cycle_structure: BTreeMap<String, u64>,
    /// Count per diameter, ascending with infinite last.
    pub by_diameter: Vec<(Diameter, u64)>,
}

impl CensusSummary {
    /// Tally every AMG of `amgs`.
    pub fn from_amgs<V: Vertex>(amgs: impl IntoIterator<Item = AberrationMultigraph<V>>) -> Self {
        let mut total = 0;
        let mut by_cycle_structure = BTreeMap::new();
        let mut by_diameter: BTreeMap<Diameter, u64> = BTreeMap::new();

        for amg in amgs {
            total += 1;
            *by_cycle_structure.entry(cycle_structure_label(&amg.cycle_structure())).or_default() += 1;
            *by_diameter.entry(amg.diameter()).or_default() += 1;
        }

        tracing::debug!(total, structures = by_cycle_structure.len(), "census summarized");
        Self {
            total,
            by_cycle_structure,
            by_diameter: by_diameter.into_iter().collect(),
        }
    }
}

/// Compact label for a cycle structure: `"6"`, `"4*2+6"`.
///
/// Lengths ascend; a length appearing more than once is written `len*count`.
/// An acyclic structure has the empty label.
pub fn cycle_structure_label(structure: &CycleStructure) -> String {
    structure
        .iter()
        .map(|(len, &count)| {
            if count == 1 {
                len.to_string()
            } else {
                format!("{}*{}", len, count)
            }
        })
        .collect::<Vec<_>>()
        .join("+")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AmgGenerator;

    #[test]
    fn test_labels() {
        assert_eq!(cycle_structure_label(&CycleStructure::from([(6, 1)])), "6");
        assert_eq!(cycle_structure_label(&CycleStructure::from([(6, 1), (4, 2)])), "4*2+6");
        assert_eq!(cycle_structure_label(&CycleStructure::new()), "");
    }

    #[test]
    fn test_summary_totals_match_count() {
        let generator = AmgGenerator::new(1, vec![3]).unwrap();
        let summary = CensusSummary::from_amgs(generator.generate_amgs());

        assert_eq!(summary.total, generator.count_amgs());
        assert_eq!(summary.by_cycle_structure.values().sum::<u64>(), summary.total);
        assert_eq!(summary.by_diameter.iter().map(|(_, n)| n).sum::<u64>(), summary.total);
        assert!(summary.by_diameter.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn test_empty_summary() {
        let summary = CensusSummary::from_amgs(Vec::<AberrationMultigraph<u32>>::new());
        assert_eq!(summary, CensusSummary::default());
    }
}

//! Property tests over randomly chosen layouts and generated AMGs.

use std::collections::HashSet;

use proptest::prelude::*;

use aberration_multigraph::{AberrationMultigraph, AmgGenerator, Edge, IncompleteAmg};

/// Small layouts: 1..=3 chromosomes, 0..=2 DSBs each, two to five DSBs in total.
fn layout() -> impl Strategy<Value = (usize, Vec<usize>)> {
    (1usize..=3)
        .prop_flat_map(|nc| (Just(nc), prop::collection::vec(0usize..=2, nc)))
        .prop_filter("two to five DSBs", |(_, dsbs)| (2..=5).contains(&dsbs.iter().sum::<usize>()))
}

/// A layout together with the index of one of its generated AMGs.
fn generated_amg() -> impl Strategy<Value = (usize, AberrationMultigraph<usize>)> {
    layout()
        .prop_filter_map("layout has connected AMGs", |(nc, dsbs)| {
            let generator = AmgGenerator::new(nc, dsbs).ok()?;
            let amgs: Vec<_> = generator.generate_amgs().collect();
            (!amgs.is_empty()).then_some((nc, amgs))
        })
        .prop_flat_map(|(nc, amgs)| {
            let n = amgs.len();
            (Just(nc), Just(amgs), 0..n)
        })
        .prop_map(|(nc, amgs, i)| (nc, amgs[i].clone()))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn twist_is_an_involution((nc, amg) in generated_amg(), k in 0usize..4) {
        prop_assert_eq!(amg.total_twist(k).total_twist(k), amg.clone());
        if k >= nc {
            prop_assert_eq!(amg.total_twist(k), amg);
        }
    }

    #[test]
    fn swap_is_symmetric_and_involutive((nc, amg) in generated_amg(), i in 0usize..3, j in 0usize..3) {
        let swapped = amg.total_swap(i, j);
        prop_assert_eq!(&swapped, &amg.total_swap(j, i));
        if i < nc && j < nc {
            prop_assert_eq!(swapped.total_swap(i, j), amg);
        }
    }

    #[test]
    fn transformations_preserve_invariants((_nc, amg) in generated_amg(), k in 0usize..3) {
        let twisted = amg.total_twist(k);
        prop_assert_eq!(twisted.cycle_structure(), amg.cycle_structure());
        prop_assert_eq!(twisted.diameter(), amg.diameter());
        prop_assert_eq!(twisted.num_chromosome(), amg.num_chromosome());
    }

    #[test]
    fn generated_rejoins_form_a_matching((nc, dsbs) in layout()) {
        let generator = AmgGenerator::new(nc, dsbs).unwrap();
        let ends: HashSet<usize> = generator.dsbs().iter().flat_map(|e| [*e.low(), *e.high()]).collect();

        for amg in generator.generate_amgs() {
            let covered: Vec<usize> = amg.rejoins().iter().flat_map(|e| [*e.low(), *e.high()]).collect();
            prop_assert_eq!(covered.len(), ends.len());
            prop_assert_eq!(covered.iter().copied().collect::<HashSet<_>>(), ends.clone());
            for e in amg.rejoins() {
                prop_assert!(generator.dsbs().binary_search(e).is_err());
            }
        }
    }

    #[test]
    fn count_matches_generation((nc, dsbs) in layout()) {
        let generator = AmgGenerator::new(nc, dsbs).unwrap();
        prop_assert_eq!(generator.count_amgs(), generator.generate_amgs().count() as u64);
    }

    #[test]
    fn generator_is_the_connected_part_of_completion((nc, dsbs) in layout()) {
        let generator = AmgGenerator::new(nc, dsbs).unwrap();
        let inc = IncompleteAmg::new(
            generator.chromatins().iter().cloned().map(Edge::into_pair),
            generator.dsbs().iter().cloned().map(Edge::into_pair),
            Vec::new(),
        )
        .unwrap();

        let generated: HashSet<_> = generator.generate_amgs().collect();
        let connected: HashSet<_> = inc.complete_amgs().filter(|amg| amg.is_connected()).collect();
        prop_assert_eq!(generated, connected);
        prop_assert_eq!(inc.count_amgs(), inc.complete_amgs().count() as u64);
    }
}

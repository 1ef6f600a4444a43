//! Enumeration of every connected AMG with a fixed DSB distribution.
//!
//! A generator lays out `num_chromosomes` linear chromosomes, the `k`-th one
//! carrying `num_dsbs[k]` breaks. Labels are consumed in order: each
//! chromosome takes a telomere, two ends per DSB, then a closing telomere.
//! Chromatin edges join consecutive label pairs and DSB edges join the inner
//! pairs of each chromosome.
//!
//! The rejoin matchings are walked by [`crate::search`]; only completions
//! whose multigraph is connected are kept.

use std::collections::HashMap;

use crate::graph::DisjointSet;
use crate::search::{frontier, Matchings, PairingRule};
use crate::types::{canonical_edges, AberrationMultigraph, AmgError, Edge, Vertex};

/// Generator for all connected AMGs of one chromosome/DSB layout.
#[derive(Debug, Clone)]
pub struct AmgGenerator<V> {
    num_chromosomes: usize,
    num_dsbs: Vec<usize>,
    vertices: Vec<V>,
    chromatins: Vec<Edge<V>>,
    dsbs: Vec<Edge<V>>,
    dsb_partner: HashMap<V, V>,
}

impl AmgGenerator<usize> {
    /// Generator over the default labels `0..2 * (sum(num_dsbs) + num_chromosomes)`.
    pub fn new(num_chromosomes: usize, num_dsbs: Vec<usize>) -> Result<Self, AmgError> {
        let total = 2 * (num_dsbs.iter().sum::<usize>() + num_chromosomes);
        Self::with_labels(num_chromosomes, num_dsbs, (0..total).collect())
    }
}

impl<V: Vertex> AmgGenerator<V> {
    /// Generator over caller-supplied vertex labels, consumed in order.
    ///
    /// Fails when `num_dsbs` does not have one entry per chromosome, when the
    /// label count is not `2 * (sum(num_dsbs) + num_chromosomes)`, or when the
    /// labels are not strictly increasing. Chromosomes are recovered from
    /// label order, so the layout order must agree with it.
    pub fn with_labels(num_chromosomes: usize, num_dsbs: Vec<usize>, labels: Vec<V>) -> Result<Self, AmgError> {
        if num_dsbs.len() != num_chromosomes {
            return Err(AmgError::invalid_input(format!(
                "{} chromosomes but {} DSB counts",
                num_chromosomes,
                num_dsbs.len()
            )));
        }
        let expected = 2 * (num_dsbs.iter().sum::<usize>() + num_chromosomes);
        if labels.len() != expected {
            return Err(AmgError::invalid_input(format!(
                "expected {} vertex labels, got {}",
                expected,
                labels.len()
            )));
        }
        if let Some(w) = labels.windows(2).find(|w| w[0] >= w[1]) {
            let reason = if w[0] == w[1] {
                format!("duplicate vertex label {:?}", w[0])
            } else {
                format!("vertex labels out of order: {:?} before {:?}", w[0], w[1])
            };
            return Err(AmgError::invalid_input(reason));
        }

        let mut chromatins = Vec::with_capacity(labels.len() / 2);
        let mut dsbs = Vec::with_capacity(expected / 2 - num_chromosomes);
        let mut at = 0;
        for &breaks in &num_dsbs {
            // telomere, 2 ends per DSB, telomere
            let span = &labels[at..at + 2 * breaks + 2];
            chromatins.extend(span.chunks_exact(2).map(|p| Edge::new(p[0].clone(), p[1].clone())));
            dsbs.extend(span[1..span.len() - 1].chunks_exact(2).map(|p| Edge::new(p[0].clone(), p[1].clone())));
            at += span.len();
        }

        let dsb_partner = dsbs
            .iter()
            .flat_map(|e| [(e.low().clone(), e.high().clone()), (e.high().clone(), e.low().clone())])
            .collect();

        tracing::debug!(
            num_chromosomes,
            ?num_dsbs,
            vertices = labels.len(),
            "AMG generator ready"
        );

        Ok(Self {
            num_chromosomes,
            num_dsbs,
            vertices: labels,
            chromatins: canonical_edges(chromatins),
            dsbs: canonical_edges(dsbs),
            dsb_partner,
        })
    }

    /// Number of chromosomes.
    pub fn num_chromosomes(&self) -> usize {
        self.num_chromosomes
    }

    /// DSB count per chromosome.
    pub fn num_dsbs(&self) -> &[usize] {
        &self.num_dsbs
    }

    /// Vertex labels in layout order.
    pub fn vertices(&self) -> &[V] {
        &self.vertices
    }

    /// Canonical chromatin edges shared by every generated AMG.
    pub fn chromatins(&self) -> &[Edge<V>] {
        &self.chromatins
    }

    /// Canonical DSB edges shared by every generated AMG.
    pub fn dsbs(&self) -> &[Edge<V>] {
        &self.dsbs
    }

    /// The other end of the DSB at `v`.
    pub fn dsb_partner(&self, v: &V) -> Option<&V> {
        self.dsb_partner.get(v)
    }

    /// Lazily yield every connected AMG of this layout.
    ///
    /// AMGs are named by their position in the sequence ("0", "1", ...).
    /// The sequence is one-shot; call again to restart.
    pub fn generate_amgs(&self) -> impl Iterator<Item = AberrationMultigraph<V>> + '_ {
        self.matchings()
            .map(move |rejoins| {
                AberrationMultigraph::from_canonical(self.chromatins.clone(), self.dsbs.clone(), canonical_edges(rejoins))
            })
            .filter(AberrationMultigraph::is_connected)
            .enumerate()
            .map(|(i, amg)| amg.with_name(i.to_string()))
    }

    /// Number of AMGs [`generate_amgs`](Self::generate_amgs) yields.
    ///
    /// Walks the same search but checks connectivity on a union-find seeded
    /// with the backbone, without building any AMG.
    pub fn count_amgs(&self) -> u64 {
        let index: HashMap<&V, usize> = self.vertices.iter().enumerate().map(|(i, v)| (v, i)).collect();
        let mut backbone = DisjointSet::new(self.vertices.len());
        for e in self.chromatins.iter().chain(&self.dsbs) {
            backbone.union(index[e.low()], index[e.high()]);
        }

        let count = self
            .matchings()
            .filter(|rejoins| {
                let mut components = backbone.clone();
                for e in rejoins {
                    components.union(index[e.low()], index[e.high()]);
                }
                components.components() == 1
            })
            .count() as u64;

        tracing::debug!(num_chromosomes = self.num_chromosomes, num_dsbs = ?self.num_dsbs, count, "counted AMGs");
        count
    }

    fn matchings(&self) -> Matchings<'_, V, Self> {
        let ends: Vec<&V> = self.dsbs.iter().flat_map(|e| [e.low(), e.high()]).collect();
        let priority = ends.len() as i64 - 2;
        Matchings::new(self, frontier(ends.into_iter().map(|v| (priority, v.clone()))))
    }
}

impl<V: Vertex> PairingRule<V> for AmgGenerator<V> {
    fn are_partners(&self, a: &V, b: &V) -> bool {
        self.dsb_partner.get(a) == Some(b)
    }
}

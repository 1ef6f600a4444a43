//! The aberration multigraph value type.
//!
//! An AMG is built once from chromatin, DSB and rejoin edges and never
//! mutated afterwards. Construction canonicalizes every edge collection,
//! derives the coloured multigraph and assigns each vertex a chromosome.
//!
//! ## Chromosome layout
//!
//! Vertices touched by no DSB edge are telomeres. Scanning vertices in label
//! order, every second telomere closes a chromosome, so chromosome `k` is the
//! contiguous run of vertices between its two telomeres.
//!
//! ## Identity
//!
//! Two AMGs are equal when all three canonical edge collections agree. The
//! hash covers only DSB and rejoin edges, so AMGs sharing a backbone spread
//! by rejoin pattern. Names never take part.

use std::collections::{BTreeMap, HashSet};
use std::hash::{Hash, Hasher};

use serde::Serialize;

use crate::canonical::canonical_hash_hex;
use crate::graph::{ColoredMultigraph, Diameter, EdgeFilter};
use super::edge::{canonical_edges, Edge, Vertex};

/// Cycle length -> number of cycles of that length.
pub type CycleStructure = BTreeMap<usize, usize>;

/// Error type for AMG construction and operations.
#[derive(Debug, thiserror::Error)]
pub enum AmgError {
    /// Input edges or generator parameters violate a construction invariant.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Which invariant was violated, with the offending values.
        reason: String,
    },
    /// Edge reversal requested on a pair that is not a chromatin edge.
    #[error("Not a chromatin edge of this AMG: {edge}")]
    InvalidEdge {
        /// The offending pair.
        edge: String,
    },
    /// Girth requested on a multigraph without cycles.
    #[error("Girth is undefined: the multigraph has no cycle")]
    Acyclic,
    /// Canonical serialization failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// Writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AmgError {
    /// Create an invalid-input error.
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput { reason: reason.into() }
    }

    /// Create an invalid-edge error for `edge`.
    pub fn invalid_edge<V: std::fmt::Debug>(edge: &Edge<V>) -> Self {
        Self::InvalidEdge { edge: format!("{:?}", edge) }
    }
}

/// Aberration multigraph: chromatin, DSB and rejoin edges over breakpoint ends.
#[derive(Debug, Clone)]
pub struct AberrationMultigraph<V> {
    chromatins: Vec<Edge<V>>,
    dsbs: Vec<Edge<V>>,
    rejoins: Vec<Edge<V>>,
    name: String,
    graph: ColoredMultigraph<V>,
    /// Chromosome index per vertex rank.
    chromosome: Vec<usize>,
    num_chromosome: usize,
}

impl<V: Vertex> AberrationMultigraph<V> {
    /// Build an AMG from its three edge collections, given as vertex pairs.
    ///
    /// Pairs may come in any orientation and order; they are stored
    /// canonically.
    pub fn new<C, D, R>(chromatins: C, dsbs: D, rejoins: R) -> Self
    where
        C: IntoIterator<Item = (V, V)>,
        D: IntoIterator<Item = (V, V)>,
        R: IntoIterator<Item = (V, V)>,
    {
        Self::from_canonical(canonical_edges(chromatins), canonical_edges(dsbs), canonical_edges(rejoins))
    }

    /// Build an AMG from its three edge collections, given as edges.
    pub fn from_edges<C, D, R>(chromatins: C, dsbs: D, rejoins: R) -> Self
    where
        C: IntoIterator<Item = Edge<V>>,
        D: IntoIterator<Item = Edge<V>>,
        R: IntoIterator<Item = Edge<V>>,
    {
        Self::from_canonical(canonical_edges(chromatins), canonical_edges(dsbs), canonical_edges(rejoins))
    }

    /// Build from collections that are already sorted pairs of sorted edges.
    pub(crate) fn from_canonical(chromatins: Vec<Edge<V>>, dsbs: Vec<Edge<V>>, rejoins: Vec<Edge<V>>) -> Self {
        let graph = ColoredMultigraph::from_edge_sets(&chromatins, &dsbs, &rejoins);

        let dsb_ends: HashSet<&V> = dsbs.iter().flat_map(|e| [e.low(), e.high()]).collect();
        let mut chromosome = Vec::with_capacity(graph.num_vertices());
        let mut current = 0;
        let mut telomeres = 0;
        for v in graph.vertices() {
            if !dsb_ends.contains(v) {
                telomeres += 1;
            }
            chromosome.push(current);
            if telomeres == 2 {
                current += 1;
                telomeres = 0;
            }
        }

        Self {
            chromatins,
            dsbs,
            rejoins,
            name: String::new(),
            graph,
            chromosome,
            num_chromosome: current,
        }
    }

    /// Attach a name to this AMG.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Name of this AMG (empty unless set).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Canonical chromatin edges.
    pub fn chromatins(&self) -> &[Edge<V>] {
        &self.chromatins
    }

    /// Canonical DSB edges.
    pub fn dsbs(&self) -> &[Edge<V>] {
        &self.dsbs
    }

    /// Canonical rejoin edges.
    pub fn rejoins(&self) -> &[Edge<V>] {
        &self.rejoins
    }

    /// The derived coloured multigraph.
    pub fn graph(&self) -> &ColoredMultigraph<V> {
        &self.graph
    }

    /// All vertices in label order.
    pub fn vertices(&self) -> &[V] {
        self.graph.vertices()
    }

    /// Number of complete chromosomes (telomere pairs) found by the scan.
    pub fn num_chromosome(&self) -> usize {
        self.num_chromosome
    }

    /// Chromosome index of `v`.
    ///
    /// Vertices after the last telomere pair get index `num_chromosome()`.
    pub fn chromosome_of(&self, v: &V) -> Option<usize> {
        self.graph.rank(v).map(|r| self.chromosome[r])
    }

    /// Inclusive rank range `[start, stop]` of chromosome `k`.
    pub(crate) fn chromosome_span(&self, k: usize) -> Option<(usize, usize)> {
        if k >= self.num_chromosome {
            return None;
        }
        let start = self.chromosome.iter().position(|&c| c == k)?;
        let stop = self.chromosome.iter().rposition(|&c| c == k)?;
        Some((start, stop))
    }

    /// Vertices of chromosome `k` in label order, or `None` if out of range.
    pub fn chromosome_vertices(&self, k: usize) -> Option<&[V]> {
        self.chromosome_span(k)
            .map(|(start, stop)| &self.graph.vertices()[start..=stop])
    }

    /// Whether the full multigraph is connected.
    pub fn is_connected(&self) -> bool {
        self.graph.is_connected(EdgeFilter::All)
    }

    /// Diameter of the full multigraph, infinite when disconnected.
    pub fn diameter(&self) -> Diameter {
        self.graph.diameter(EdgeFilter::All)
    }

    /// Shortest cycle length over the full multigraph, chromatin included.
    ///
    /// Unlike [`cycles`](Self::cycles), chromatin edges take part here.
    pub fn girth(&self) -> Result<usize, AmgError> {
        self.graph.girth(EdgeFilter::All).ok_or(AmgError::Acyclic)
    }

    /// Cycle basis of the DSB + rejoin subgraph.
    pub fn cycles(&self) -> Vec<Vec<V>> {
        self.graph.cycle_basis(EdgeFilter::Exchange)
    }

    /// Multiset of cycle lengths in the DSB + rejoin subgraph.
    pub fn cycle_structure(&self) -> CycleStructure {
        let mut structure = CycleStructure::new();
        for cycle in self.cycles() {
            *structure.entry(cycle.len()).or_default() += 1;
        }
        structure
    }

    /// Chromatin and DSB edges: the genome before misrejoining.
    pub fn init_config(&self) -> Vec<Edge<V>> {
        self.configuration(EdgeFilter::Initial)
    }

    /// Chromatin and rejoin edges: the genome after misrejoining.
    pub fn final_config(&self) -> Vec<Edge<V>> {
        self.configuration(EdgeFilter::Final)
    }

    fn configuration(&self, filter: EdgeFilter) -> Vec<Edge<V>> {
        canonical_edges(self.graph.edges(filter).map(|(a, b, _)| Edge::new(a.clone(), b.clone())))
    }
}

impl<V: Vertex + Serialize> AberrationMultigraph<V> {
    /// Stable hex fingerprint of the AMG's identity (DSB and rejoin edges).
    pub fn fingerprint(&self) -> Result<String, AmgError> {
        Ok(canonical_hash_hex(&(&self.dsbs, &self.rejoins))?)
    }
}

impl<V: PartialEq> PartialEq for AberrationMultigraph<V> {
    fn eq(&self, other: &Self) -> bool {
        self.chromatins == other.chromatins && self.dsbs == other.dsbs && self.rejoins == other.rejoins
    }
}

impl<V: Eq> Eq for AberrationMultigraph<V> {}

impl<V: Hash> Hash for AberrationMultigraph<V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.dsbs.hash(state);
        self.rejoins.hash(state);
    }
}

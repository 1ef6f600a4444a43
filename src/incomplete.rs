//! Completion of a partially rejoined AMG.
//!
//! An [`IncompleteAmg`] fixes the chromatin and DSB backbone plus some rejoin
//! edges. Its free vertices are the DSB ends not yet rejoined: vertices with
//! more than one neighbour that no fixed rejoin touches. Completions pair the
//! free vertices up, never joining the two ends of one DSB, and unlike
//! [`AmgGenerator`](crate::AmgGenerator) keep disconnected results.

use std::cell::OnceCell;
use std::collections::HashSet;

use crate::search::{frontier, Frontier, Matchings, PairingRule};
use crate::types::{canonical_edges, AberrationMultigraph, AmgError, Edge, Vertex};

/// An AMG whose rejoin edges cover only part of the DSB ends.
#[derive(Debug, Clone)]
pub struct IncompleteAmg<V> {
    amg: AberrationMultigraph<V>,
    free: Vec<V>,
    count: OnceCell<u64>,
}

impl<V: Vertex> IncompleteAmg<V> {
    /// Build from chromatin, DSB and fixed rejoin pairs.
    ///
    /// Fails when the number of free vertices is odd, since no perfect
    /// matching could complete it.
    pub fn new<C, D, R>(chromatins: C, dsbs: D, rejoins: R) -> Result<Self, AmgError>
    where
        C: IntoIterator<Item = (V, V)>,
        D: IntoIterator<Item = (V, V)>,
        R: IntoIterator<Item = (V, V)>,
    {
        Self::from_amg(AberrationMultigraph::new(chromatins, dsbs, rejoins))
    }

    /// Treat an existing AMG's rejoins as the fixed part of a matching.
    pub fn from_amg(amg: AberrationMultigraph<V>) -> Result<Self, AmgError> {
        let free: Vec<V> = {
            let rejoined: HashSet<&V> = amg.rejoins().iter().flat_map(|e| [e.low(), e.high()]).collect();
            let degrees = amg.graph().degrees();
            amg.vertices()
                .iter()
                .zip(degrees)
                .filter(|&(v, degree)| degree > 1 && !rejoined.contains(v))
                .map(|(v, _)| v.clone())
                .collect()
        };

        if free.len() % 2 != 0 {
            return Err(AmgError::invalid_input(format!(
                "odd number of free vertices ({}): {:?}",
                free.len(),
                free
            )));
        }

        tracing::debug!(name = amg.name(), free = free.len(), "incomplete AMG ready");
        Ok(Self {
            amg,
            free,
            count: OnceCell::new(),
        })
    }

    /// Name this AMG; completions are named `<name>_<i>`.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.amg = self.amg.with_name(name);
        self
    }

    /// The partial AMG itself.
    pub fn amg(&self) -> &AberrationMultigraph<V> {
        &self.amg
    }

    /// Free vertices in label order.
    pub fn free(&self) -> &[V] {
        &self.free
    }

    /// Lazily yield every completion of the fixed rejoins.
    ///
    /// Completions are named `<name>_1`, `<name>_2`, ... in yield order.
    /// With no free vertex the AMG itself is the single completion.
    pub fn complete_amgs(&self) -> impl Iterator<Item = AberrationMultigraph<V>> + '_ {
        let fixed = self.amg.rejoins();
        let walk = (!self.free.is_empty()).then(|| Matchings::new(self, self.initial_frontier()));
        let already_complete = self.free.is_empty().then(Vec::new);

        walk.into_iter()
            .flatten()
            .chain(already_complete)
            .enumerate()
            .map(move |(i, pairs)| {
                let rejoins = canonical_edges(fixed.iter().cloned().chain(pairs));
                AberrationMultigraph::from_canonical(self.amg.chromatins().to_vec(), self.amg.dsbs().to_vec(), rejoins)
                    .with_name(format!("{}_{}", self.amg.name(), i + 1))
            })
    }

    /// Number of completions [`complete_amgs`](Self::complete_amgs) yields.
    ///
    /// Computed once without building any AMG, then cached.
    pub fn count_amgs(&self) -> u64 {
        *self.count.get_or_init(|| {
            let count = if self.free.is_empty() {
                1
            } else {
                Matchings::new(self, self.initial_frontier()).count() as u64
            };
            tracing::debug!(name = self.amg.name(), free = self.free.len(), count, "counted completions");
            count
        })
    }

    /// `#free - 1` per vertex, one less for each free DSB partner.
    fn initial_frontier(&self) -> Frontier<V> {
        let base = self.free.len() as i64 - 1;
        frontier(self.free.iter().map(|v| {
            let partners = self.free.iter().filter(|w| self.are_partners(v, w)).count() as i64;
            (base - partners, v.clone())
        }))
    }
}

impl<V: Vertex> PairingRule<V> for IncompleteAmg<V> {
    fn are_partners(&self, a: &V, b: &V) -> bool {
        self.amg.dsbs().binary_search(&Edge::new(a.clone(), b.clone())).is_ok()
    }
}

impl<V> AsRef<AberrationMultigraph<V>> for IncompleteAmg<V> {
    fn as_ref(&self) -> &AberrationMultigraph<V> {
        &self.amg
    }
}

impl<V: Vertex> TryFrom<AberrationMultigraph<V>> for IncompleteAmg<V> {
    type Error = AmgError;

    fn try_from(amg: AberrationMultigraph<V>) -> Result<Self, Self::Error> {
        Self::from_amg(amg)
    }
}

//! Structure-preserving transformations of an AMG.
//!
//! Every operation returns a new canonical AMG and leaves the receiver
//! untouched. Out-of-range or degenerate requests return an identical copy
//! rather than an error, so transformations can be chained freely.
//!
//! Positions are vertex ranks in label order. On contiguous integer labels
//! the rank arithmetic below is exactly the label arithmetic
//! (`stop - x + start` for a twist), and it extends to any ordered label type.

use crate::types::{canonical_edges, AberrationMultigraph, AmgError, Edge, Vertex};

impl<V: Vertex> AberrationMultigraph<V> {
    /// Reverse the internal layout of chromosome `chromosome` (an inversion).
    ///
    /// Chromatin and DSB edges lying inside the chromosome are mirrored.
    /// Rejoin edges mirror only their endpoints inside the chromosome, since
    /// they may cross chromosome boundaries.
    pub fn total_twist(&self, chromosome: usize) -> Self {
        let Some((start, stop)) = self.chromosome_span(chromosome) else {
            tracing::trace!(chromosome, num_chromosome = self.num_chromosome(), "twist out of range");
            return self.clone();
        };

        let inside = |r: usize| start <= r && r <= stop;
        let mirror = |v: &V| self.remap_rank(v, |r| if inside(r) { start + stop - r } else { r });
        let backbone = |e: &Edge<V>| {
            let both_inside = [e.low(), e.high()]
                .into_iter()
                .all(|v| self.graph().rank(v).is_some_and(inside));
            if both_inside {
                e.map(&mirror)
            } else {
                e.clone()
            }
        };

        self.remapped(backbone, |e| e.map(&mirror))
    }

    /// Exchange the positions of two chromosomes with equal vertex counts.
    ///
    /// Chromosomes lying between the two absorb any length difference. Equal
    /// indices, out-of-range indices and unequal lengths leave the AMG as is.
    pub fn total_swap(&self, chrom_1: usize, chrom_2: usize) -> Self {
        if chrom_1 == chrom_2 {
            return self.clone();
        }
        let (chrom_1, chrom_2) = if chrom_2 < chrom_1 { (chrom_2, chrom_1) } else { (chrom_1, chrom_2) };
        let (Some((start_1, stop_1)), Some((start_2, stop_2))) =
            (self.chromosome_span(chrom_1), self.chromosome_span(chrom_2))
        else {
            tracing::trace!(chrom_1, chrom_2, num_chromosome = self.num_chromosome(), "swap out of range");
            return self.clone();
        };
        if stop_1 - start_1 != stop_2 - start_2 {
            tracing::trace!(chrom_1, chrom_2, "swap of chromosomes with different lengths");
            return self.clone();
        }

        let zone_shift = |r: usize| -> usize {
            let r = r as isize;
            let (start_1, stop_1, start_2, stop_2) = (start_1 as isize, stop_1 as isize, start_2 as isize, stop_2 as isize);
            let shifted = if r < start_1 || r > stop_2 {
                r
            } else if r <= stop_1 {
                r + (stop_2 - stop_1)
            } else if r < start_2 {
                r + (stop_2 - start_2) - (stop_1 - start_1)
            } else {
                r - (start_2 - start_1)
            };
            shifted as usize
        };
        let relabel = |v: &V| self.remap_rank(v, zone_shift);

        self.remapped(|e| e.map(&relabel), |e| e.map(&relabel))
    }

    /// Flip the two rejoin edges meeting the chromatin edge `edge`.
    ///
    /// With `edge = (u, v)`, the rejoin partner `x` of `u` and the partner `y`
    /// of `v` are exchanged: the new rejoins are `(u, y)` and `(v, x)`. Fewer
    /// than two incident rejoin edges leave the AMG unchanged.
    pub fn edge_reversal(&self, edge: &Edge<V>) -> Result<Self, AmgError> {
        if self.chromatins().binary_search(edge).is_err() {
            return Err(AmgError::invalid_edge(edge));
        }
        let (u, v) = (edge.low(), edge.high());

        let (to_flip, mut untouched): (Vec<&Edge<V>>, Vec<&Edge<V>>) =
            self.rejoins().iter().partition(|e| e.contains(u) || e.contains(v));
        if to_flip.len() < 2 {
            tracing::trace!(?edge, incident = to_flip.len(), "nothing to reverse");
            return Ok(self.clone());
        }
        if to_flip.len() > 2 {
            tracing::warn!(?edge, incident = to_flip.len(), "rejoins are not a matching at this edge, leaving unchanged");
            return Ok(self.clone());
        }

        let (first, second) = (to_flip[0], to_flip[1]);
        let (x, y) = if first.contains(u) {
            (first.other(u), second.other(v))
        } else {
            (second.other(u), first.other(v))
        };
        let (Some(x), Some(y)) = (x, y) else {
            return Ok(self.clone());
        };

        let flipped = [Edge::new(u.clone(), y.clone()), Edge::new(v.clone(), x.clone())];
        untouched.extend(flipped.iter());
        let rejoins = canonical_edges(untouched.into_iter().cloned());

        Ok(Self::from_canonical(self.chromatins().to_vec(), self.dsbs().to_vec(), rejoins))
    }

    /// Map `v` to the vertex at rank `f(rank(v))`; unknown vertices stay put.
    fn remap_rank(&self, v: &V, f: impl Fn(usize) -> usize) -> V {
        self.graph()
            .rank(v)
            .and_then(|r| self.graph().vertex(f(r)))
            .unwrap_or(v)
            .clone()
    }

    /// Rebuild with backbone (chromatin, DSB) and rejoin edges passed through maps.
    fn remapped(&self, backbone: impl Fn(&Edge<V>) -> Edge<V>, rejoin: impl Fn(&Edge<V>) -> Edge<V>) -> Self {
        Self::from_canonical(
            canonical_edges(self.chromatins().iter().map(&backbone)),
            canonical_edges(self.dsbs().iter().map(&backbone)),
            canonical_edges(self.rejoins().iter().map(rejoin)),
        )
    }
}

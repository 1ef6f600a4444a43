//! Most-constrained-first backtracking over free DSB ends.
//!
//! Both enumeration engines complete a rejoin matching the same way:
//!
//! 1. Keep a min-priority frontier of free vertices, keyed by how many
//!    partners each vertex can still take.
//! 2. Pop the most constrained vertex `v`.
//! 3. If exactly one vertex `w` remains, pair `(v, w)` and emit the matching.
//! 4. Otherwise pair `v` with every remaining `w` that is not its DSB partner,
//!    relax the priorities of the rest and descend.
//!
//! After pairing `(v, w)`, a vertex whose DSB partner is `v` or `w` loses one
//! unit of flexibility, every other vertex loses two and `w` leaves the
//! frontier. The ordering prunes dead branches early; it never changes which
//! matchings are produced. Ties are broken by vertex label.
//!
//! The walk keeps its own stack instead of recursing, so depth is bounded only
//! by memory and the iterator can be dropped at any point.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::types::{Edge, Vertex};

/// Frontier entry: (remaining flexibility, vertex), smallest first.
pub(crate) type Frontier<V> = BinaryHeap<Reverse<(i64, V)>>;

/// Which pairs of free vertices may never be rejoined.
pub(crate) trait PairingRule<V> {
    /// Whether `a` and `b` are the two ends of one DSB.
    fn are_partners(&self, a: &V, b: &V) -> bool;
}

/// Build a frontier from `(priority, vertex)` entries.
pub(crate) fn frontier<V: Vertex>(entries: impl IntoIterator<Item = (i64, V)>) -> Frontier<V> {
    entries.into_iter().map(Reverse).collect()
}

/// One open branching point: `v` is being paired with candidates from `rest`.
struct Frame<V> {
    v: V,
    rest: Vec<(i64, V)>,
    next: usize,
}

/// Lazy, one-shot walk over every completed matching.
///
/// Each item is the list of pairs chosen along one branch, in search order.
pub(crate) struct Matchings<'r, V, R> {
    rule: &'r R,
    stack: Vec<Frame<V>>,
    pairs: Vec<Edge<V>>,
    pending: Option<Frontier<V>>,
}

impl<'r, V: Vertex, R: PairingRule<V>> Matchings<'r, V, R> {
    /// Start a walk from an initial frontier.
    pub(crate) fn new(rule: &'r R, initial: Frontier<V>) -> Self {
        Self {
            rule,
            stack: Vec::new(),
            pairs: Vec::new(),
            pending: Some(initial),
        }
    }

    /// Enter a new frontier: emit a leaf or open a frame.
    fn descend(&mut self, mut frontier: Frontier<V>) -> Option<Vec<Edge<V>>> {
        let Reverse((_, v)) = frontier.pop()?;
        if frontier.len() == 1 {
            let Reverse((_, w)) = frontier.pop()?;
            let mut leaf = self.pairs.clone();
            leaf.push(Edge::new(v, w));
            return Some(leaf);
        }
        if !frontier.is_empty() {
            self.stack.push(Frame {
                v,
                rest: frontier.into_vec().into_iter().map(|Reverse(entry)| entry).collect(),
                next: 0,
            });
        }
        None
    }
}

impl<'r, V: Vertex, R: PairingRule<V>> Iterator for Matchings<'r, V, R> {
    type Item = Vec<Edge<V>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(frontier) = self.pending.take() {
                if let Some(leaf) = self.descend(frontier) {
                    return Some(leaf);
                }
            }

            let depth = self.stack.len();
            let frame = self.stack.last_mut()?;
            // Drop the pair chosen by this frame's previous candidate
            self.pairs.truncate(depth - 1);

            let rule = self.rule;
            let candidate = frame.rest[frame.next..]
                .iter()
                .position(|(_, w)| !rule.are_partners(&frame.v, w));
            match candidate {
                Some(offset) => {
                    let idx = frame.next + offset;
                    frame.next = idx + 1;
                    let w = frame.rest[idx].1.clone();
                    self.pending = Some(relax(&frame.rest, &frame.v, &w, rule));
                    self.pairs.push(Edge::new(frame.v.clone(), w));
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

/// Frontier left after pairing `v` (already popped) with `w`.
fn relax<V: Vertex, R: PairingRule<V>>(rest: &[(i64, V)], v: &V, w: &V, rule: &R) -> Frontier<V> {
    rest.iter()
        .filter(|(_, u)| u != w)
        .map(|(priority, u)| {
            if rule.are_partners(u, v) || rule.are_partners(u, w) {
                Reverse((priority - 1, u.clone()))
            } else {
                Reverse((priority - 2, u.clone()))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, HashSet};

    struct Partners(HashMap<u32, u32>);

    impl Partners {
        fn of(dsbs: &[(u32, u32)]) -> Self {
            Self(dsbs.iter().flat_map(|&(a, b)| [(a, b), (b, a)]).collect())
        }
    }

    impl PairingRule<u32> for Partners {
        fn are_partners(&self, a: &u32, b: &u32) -> bool {
            self.0.get(a) == Some(b)
        }
    }

    fn walk(dsbs: &[(u32, u32)]) -> Vec<Vec<Edge<u32>>> {
        let rule = Partners::of(dsbs);
        let ends: Vec<u32> = dsbs.iter().flat_map(|&(a, b)| [a, b]).collect();
        let n = ends.len() as i64;
        let initial = frontier(ends.into_iter().map(|v| (n - 2, v)));
        Matchings::new(&rule, initial).collect()
    }

    #[test]
    fn test_empty_frontier_yields_nothing() {
        assert!(walk(&[]).is_empty());
    }

    #[test]
    fn test_single_dsb_pairs_its_own_ends() {
        // The last pair is taken without the partner check
        assert_eq!(walk(&[(1, 2)]), vec![vec![Edge::new(1, 2)]]);
    }

    #[test]
    fn test_two_dsbs() {
        let leaves: HashSet<Vec<Edge<u32>>> = walk(&[(1, 2), (3, 4)])
            .into_iter()
            .map(|mut m| {
                m.sort();
                m
            })
            .collect();

        let expected: HashSet<Vec<Edge<u32>>> = [
            vec![Edge::new(1, 3), Edge::new(2, 4)],
            vec![Edge::new(1, 4), Edge::new(2, 3)],
        ]
        .into_iter()
        .collect();
        assert_eq!(leaves, expected);
    }

    #[test]
    fn test_three_dsbs_avoid_self_rejoins() {
        let dsbs = [(1, 2), (3, 4), (5, 6)];
        let leaves = walk(&dsbs);

        // Perfect matchings of 6 ends with no DSB pair: 15 - 3*3 + 3 - 1 = 8
        assert_eq!(leaves.len(), 8);
        let forbidden: HashSet<Edge<u32>> = dsbs.iter().map(|&(a, b)| Edge::new(a, b)).collect();
        for leaf in &leaves {
            assert_eq!(leaf.len(), 3);
            assert!(leaf.iter().all(|e| !forbidden.contains(e)));
        }
    }

    #[test]
    fn test_walk_can_stop_early() {
        let rule = Partners::of(&[(1, 2), (3, 4), (5, 6), (7, 8)]);
        let initial = frontier((1..=8).map(|v| (6, v)));
        let mut walk = Matchings::new(&rule, initial);
        assert!(walk.next().is_some());
        assert!(walk.next().is_some());
        drop(walk);
    }
}

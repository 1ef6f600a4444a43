//! Transformation atlas: how generated AMGs map onto one another.
//!
//! Every generated AMG is a node. Applying a chromosome twist, or a swap of
//! two equal-length chromosomes, to an AMG gives another AMG of the same
//! layout; each such pair becomes an edge labelled with the operation.
//! Neighbours are looked up by AMG identity (DSB + rejoin edges).

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::canonical::canonical_hash_hex;
use crate::generator::AmgGenerator;
use crate::types::{AberrationMultigraph, AmgError, Vertex};

/// A transformation linking two AMGs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// `total_twist(k)`.
    Twist(usize),
    /// `total_swap(i, j)` with `i < j`.
    Swap(usize, usize),
}

/// An undirected atlas edge between two AMG indices.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AtlasEdge {
    /// Smaller AMG index.
    pub a: usize,
    /// Larger AMG index.
    pub b: usize,
    /// Operation taking one AMG to the other.
    pub operation: Operation,
}

impl AtlasEdge {
    /// Create an edge, ordering the endpoints.
    pub fn new(a: usize, b: usize, operation: Operation) -> Self {
        let (a, b) = if a <= b { (a, b) } else { (b, a) };
        Self { a, b, operation }
    }
}

/// Nodes and labelled edges of the transformation graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformationAtlas {
    /// AMG names, indexed by generation order.
    pub nodes: Vec<String>,
    /// Distinct edges, sorted.
    pub edges: Vec<AtlasEdge>,
    /// Content hash of `edges`.
    pub atlas_hash: String,
}

impl TransformationAtlas {
    /// Build the atlas over every AMG `generator` yields.
    pub fn build<V: Vertex>(generator: &AmgGenerator<V>) -> Result<Self, AmgError> {
        let amgs: Vec<AberrationMultigraph<V>> = generator.generate_amgs().collect();
        Self::from_amgs(&amgs, generator.num_chromosomes())
    }

    /// Build the atlas over `amgs`, applying operations on `num_chromosomes` chromosomes.
    pub fn from_amgs<V: Vertex>(amgs: &[AberrationMultigraph<V>], num_chromosomes: usize) -> Result<Self, AmgError> {
        let index: HashMap<&AberrationMultigraph<V>, usize> = amgs.iter().enumerate().map(|(i, amg)| (amg, i)).collect();

        let mut edges = BTreeSet::new();
        for (i, amg) in amgs.iter().enumerate() {
            for (operation, image) in neighbours(amg, num_chromosomes) {
                match index.get(&image) {
                    Some(&j) if j != i => {
                        edges.insert(AtlasEdge::new(i, j, operation));
                    }
                    Some(_) => {}
                    None => {
                        tracing::trace!(from = i, ?operation, "image is outside the family");
                    }
                }
            }
        }

        let edges: Vec<AtlasEdge> = edges.into_iter().collect();
        let atlas_hash = canonical_hash_hex(&edges)?;
        tracing::debug!(nodes = amgs.len(), edges = edges.len(), %atlas_hash, "atlas built");

        Ok(Self {
            nodes: amgs.iter().map(|amg| amg.name().to_string()).collect(),
            edges,
            atlas_hash,
        })
    }

    /// Indices adjacent to AMG `i`.
    pub fn neighbors(&self, i: usize) -> Vec<usize> {
        let mut out: Vec<usize> = self
            .edges
            .iter()
            .filter_map(|e| match (e.a == i, e.b == i) {
                (true, _) => Some(e.b),
                (_, true) => Some(e.a),
                _ => None,
            })
            .collect();
        out.sort_unstable();
        out.dedup();
        out
    }

    /// Number of connected classes of AMGs under the operations.
    pub fn num_classes(&self) -> usize {
        let mut classes = crate::graph::DisjointSet::new(self.nodes.len());
        for e in &self.edges {
            classes.union(e.a, e.b);
        }
        classes.components()
    }
}

/// Every single-operation image of `amg`: each twist, then each equal-length swap.
fn neighbours<V: Vertex>(amg: &AberrationMultigraph<V>, num_chromosomes: usize) -> Vec<(Operation, AberrationMultigraph<V>)> {
    let mut out = Vec::new();
    for k in 0..num_chromosomes {
        out.push((Operation::Twist(k), amg.total_twist(k)));
    }
    for i in 0..num_chromosomes {
        for j in i + 1..num_chromosomes {
            let same_length = match (amg.chromosome_vertices(i), amg.chromosome_vertices(j)) {
                (Some(a), Some(b)) => a.len() == b.len(),
                _ => false,
            };
            if same_length {
                out.push((Operation::Swap(i, j), amg.total_swap(i, j)));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_are_canonical() {
        let e = AtlasEdge::new(5, 2, Operation::Twist(0));
        assert_eq!((e.a, e.b), (2, 5));
    }

    #[test]
    fn test_atlas_links_twins() {
        // Two single-break chromosomes: the two AMGs differ by one twist
        let generator = AmgGenerator::new(2, vec![1, 1]).unwrap();
        let atlas = TransformationAtlas::build(&generator).unwrap();

        assert_eq!(atlas.nodes, vec!["0", "1"]);
        assert!(!atlas.edges.is_empty());
        assert!(atlas.edges.iter().all(|e| e.a < e.b));
        assert_eq!(atlas.neighbors(0), vec![1]);
        assert_eq!(atlas.num_classes(), 1);
    }

    #[test]
    fn test_atlas_is_deterministic() {
        let generator = AmgGenerator::new(2, vec![2, 1]).unwrap();
        let a = TransformationAtlas::build(&generator).unwrap();
        let b = TransformationAtlas::build(&generator).unwrap();
        assert_eq!(a.edges, b.edges);
        assert_eq!(a.atlas_hash, b.atlas_hash);
    }

    #[test]
    fn test_operation_serialization() {
        let json = serde_json::to_string(&Operation::Swap(0, 1)).unwrap();
        assert_eq!(json, r#"{"swap":[0,1]}"#);
    }
}

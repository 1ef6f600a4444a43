//! Edge types for aberration multigraphs.

use std::fmt::Debug;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

/// Label of a breakpoint endpoint.
///
/// Any totally ordered, hashable, cloneable type works: integers, strings,
/// tuples. The label order defines the chromosome layout.
pub trait Vertex: Ord + Hash + Clone + Debug {}

impl<T: Ord + Hash + Clone + Debug> Vertex for T {}

/// Colour of an edge in the multigraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EdgeColor {
    /// Intact stretch of chromosome between two break or telomere points.
    Chromatin,
    /// Double-strand break joining the two free ends it creates.
    Dsb,
    /// Reconnection of two free ends after breakage.
    Rejoin,
}

impl EdgeColor {
    /// Parse edge colour from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "chromatin" => Some(Self::Chromatin),
            "dsb" => Some(Self::Dsb),
            "rejoin" | "misrejoining" => Some(Self::Rejoin),
            _ => None,
        }
    }
}

impl std::fmt::Display for EdgeColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Chromatin => write!(f, "chromatin"),
            Self::Dsb => write!(f, "dsb"),
            Self::Rejoin => write!(f, "rejoin"),
        }
    }
}

/// Unordered pair of vertices in canonical form (smaller label first).
///
/// The derived `Ord` compares the low endpoint, then the high endpoint, so a
/// sorted `Vec<Edge<V>>` is the canonical form of an edge collection.
/// Serializes as a two-element array.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Edge<V>(V, V);

impl<V: Ord> Edge<V> {
    /// Create an edge, ordering the endpoints.
    pub fn new(a: V, b: V) -> Self {
        if b < a {
            Self(b, a)
        } else {
            Self(a, b)
        }
    }

    /// Smaller endpoint.
    pub fn low(&self) -> &V {
        &self.0
    }

    /// Larger endpoint.
    pub fn high(&self) -> &V {
        &self.1
    }

    /// Whether `v` is one of the endpoints.
    pub fn contains(&self, v: &V) -> bool {
        self.0 == *v || self.1 == *v
    }

    /// The endpoint opposite `v`, if `v` is an endpoint.
    pub fn other(&self, v: &V) -> Option<&V> {
        if self.0 == *v {
            Some(&self.1)
        } else if self.1 == *v {
            Some(&self.0)
        } else {
            None
        }
    }

    /// Rebuild the edge with each endpoint passed through `f`.
    pub fn map(&self, mut f: impl FnMut(&V) -> V) -> Self {
        Self::new(f(&self.0), f(&self.1))
    }

    /// Consume the edge into its `(low, high)` endpoints.
    pub fn into_pair(self) -> (V, V) {
        (self.0, self.1)
    }
}

impl<V: Ord> From<(V, V)> for Edge<V> {
    fn from((a, b): (V, V)) -> Self {
        Self::new(a, b)
    }
}

/// Canonicalize an edge collection: sort each pair, then sort the collection.
pub fn canonical_edges<V, I>(edges: I) -> Vec<Edge<V>>
where
    V: Ord,
    I: IntoIterator,
    I::Item: Into<Edge<V>>,
{
    let mut out: Vec<Edge<V>> = edges.into_iter().map(Into::into).collect();
    out.sort();
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_is_canonical() {
        assert_eq!(Edge::new(4, 3), Edge::new(3, 4));
        assert_eq!(Edge::new(4, 3).low(), &3);
        assert_eq!(Edge::from(("D", "C")).into_pair(), ("C", "D"));
    }

    #[test]
    fn test_edge_ordering() {
        let e1 = Edge::new(1, 5);
        let e2 = Edge::new(2, 3);
        let e3 = Edge::new(2, 4);

        // Low endpoint decides first
        assert!(e1 < e2);
        // Then the high endpoint
        assert!(e2 < e3);
    }

    #[test]
    fn test_other_endpoint() {
        let e = Edge::new(7, 2);
        assert_eq!(e.other(&2), Some(&7));
        assert_eq!(e.other(&7), Some(&2));
        assert_eq!(e.other(&5), None);
        assert!(e.contains(&7));
    }

    #[test]
    fn test_canonical_edges() {
        let edges = canonical_edges(vec![(3, 4), (2, 1), (5, 6)]);
        assert_eq!(edges, vec![Edge::new(1, 2), Edge::new(3, 4), Edge::new(5, 6)]);
    }

    #[test]
    fn test_color_round_trip() {
        for color in [EdgeColor::Chromatin, EdgeColor::Dsb, EdgeColor::Rejoin] {
            assert_eq!(EdgeColor::from_str(&color.to_string()), Some(color));
        }
        assert_eq!(EdgeColor::from_str("misrejoining"), Some(EdgeColor::Rejoin));
        assert_eq!(EdgeColor::from_str("telomere"), None);
    }
}

//! Coloured multigraph derived from an AMG's three edge sets.
//!
//! Vertices are stored once, in label order, and addressed by rank. Edges keep
//! their colour so that queries can run on a filtered view: the full graph,
//! the exchange graph (DSB + rejoin), or the initial / final configurations.
//!
//! Queries use the simple-graph view of a filter: parallel edges between the
//! same two vertices collapse into a single adjacency.

use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt;

use serde::{Serialize, Serializer};

use crate::types::{Edge, EdgeColor, Vertex};

/// Which edge colours a query looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeFilter {
    /// Every edge.
    All,
    /// DSB and rejoin edges only.
    Exchange,
    /// Chromatin and DSB edges: the genome before misrejoining.
    Initial,
    /// Chromatin and rejoin edges: the genome after misrejoining.
    Final,
}

impl EdgeFilter {
    /// Whether an edge of `color` is visible through this filter.
    pub fn admits(self, color: EdgeColor) -> bool {
        match self {
            Self::All => true,
            Self::Exchange => color != EdgeColor::Chromatin,
            Self::Initial => color != EdgeColor::Rejoin,
            Self::Final => color != EdgeColor::Dsb,
        }
    }
}

/// Graph diameter, infinite when the graph is disconnected.
///
/// Orders finite values first, so `Infinite` sorts last in histograms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Diameter {
    /// Longest shortest path of a connected graph.
    Finite(usize),
    /// The graph has unreachable vertex pairs.
    Infinite,
}

impl Diameter {
    /// Whether the diameter is finite.
    pub fn is_finite(&self) -> bool {
        matches!(self, Self::Finite(_))
    }

    /// The finite value, if any.
    pub fn finite(&self) -> Option<usize> {
        match self {
            Self::Finite(d) => Some(*d),
            Self::Infinite => None,
        }
    }
}

impl fmt::Display for Diameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finite(d) => write!(f, "{}", d),
            Self::Infinite => write!(f, "inf"),
        }
    }
}

impl Serialize for Diameter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Finite(d) => serializer.serialize_u64(*d as u64),
            Self::Infinite => serializer.serialize_str("inf"),
        }
    }
}

/// Owned coloured multigraph over ranked vertices.
#[derive(Debug, Clone)]
pub struct ColoredMultigraph<V> {
    /// Distinct vertices in label order.
    vertices: Vec<V>,
    /// Vertex -> rank.
    index: HashMap<V, usize>,
    /// Edges as (rank, rank, colour), in insertion order.
    edges: Vec<(usize, usize, EdgeColor)>,
}

impl<V: Vertex> ColoredMultigraph<V> {
    /// Build the multigraph from the three canonical edge collections.
    pub fn from_edge_sets(chromatins: &[Edge<V>], dsbs: &[Edge<V>], rejoins: &[Edge<V>]) -> Self {
        let layers = [
            (chromatins, EdgeColor::Chromatin),
            (dsbs, EdgeColor::Dsb),
            (rejoins, EdgeColor::Rejoin),
        ];

        let vertex_set: BTreeSet<&V> = layers
            .iter()
            .flat_map(|(edges, _)| edges.iter())
            .flat_map(|e| [e.low(), e.high()])
            .collect();
        let vertices: Vec<V> = vertex_set.into_iter().cloned().collect();
        let index: HashMap<V, usize> = vertices
            .iter()
            .enumerate()
            .map(|(i, v)| (v.clone(), i))
            .collect();

        let mut edges = Vec::with_capacity(chromatins.len() + dsbs.len() + rejoins.len());
        for (layer, color) in layers {
            for e in layer {
                // Every endpoint was inserted above
                if let (Some(&a), Some(&b)) = (index.get(e.low()), index.get(e.high())) {
                    edges.push((a, b, color));
                }
            }
        }

        Self { vertices, index, edges }
    }

    /// Distinct vertices in label order.
    pub fn vertices(&self) -> &[V] {
        &self.vertices
    }

    /// Number of distinct vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Number of edges, counting parallel edges separately.
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Position of `v` in label order.
    pub fn rank(&self, v: &V) -> Option<usize> {
        self.index.get(v).copied()
    }

    /// Vertex at a given rank.
    pub fn vertex(&self, rank: usize) -> Option<&V> {
        self.vertices.get(rank)
    }

    /// Edges visible through `filter`, with their colour.
    pub fn edges(&self, filter: EdgeFilter) -> impl Iterator<Item = (&V, &V, EdgeColor)> + '_ {
        self.edges
            .iter()
            .filter(move |(_, _, c)| filter.admits(*c))
            .map(move |&(a, b, c)| (&self.vertices[a], &self.vertices[b], c))
    }

    /// Number of distinct neighbours of `v` in the full graph.
    pub fn degree(&self, v: &V) -> usize {
        self.rank(v).map_or(0, |r| self.degrees()[r])
    }

    /// Distinct-neighbour count of every vertex in the full graph, by rank.
    pub fn degrees(&self) -> Vec<usize> {
        self.adjacency(EdgeFilter::All).iter().map(BTreeSet::len).collect()
    }

    /// Simple-graph adjacency of a filtered view, indexed by rank.
    fn adjacency(&self, filter: EdgeFilter) -> Vec<BTreeSet<usize>> {
        let mut adj = vec![BTreeSet::new(); self.vertices.len()];
        for &(a, b, color) in &self.edges {
            if filter.admits(color) {
                adj[a].insert(b);
                adj[b].insert(a);
            }
        }
        adj
    }

    /// Whether every vertex is reachable from every other through `filter`.
    ///
    /// A graph with no vertices is not connected.
    pub fn is_connected(&self, filter: EdgeFilter) -> bool {
        if self.vertices.is_empty() {
            return false;
        }
        let adj = self.adjacency(filter);
        bfs_distances(&adj, 0).iter().all(Option::is_some)
    }

    /// Longest shortest path over all vertex pairs.
    pub fn diameter(&self, filter: EdgeFilter) -> Diameter {
        if self.vertices.is_empty() {
            return Diameter::Infinite;
        }
        let adj = self.adjacency(filter);
        let mut longest = 0;
        for source in 0..adj.len() {
            for dist in bfs_distances(&adj, source) {
                match dist {
                    Some(d) => longest = longest.max(d),
                    None => return Diameter::Infinite,
                }
            }
        }
        Diameter::Finite(longest)
    }

    /// Length of the shortest cycle, or `None` for a forest.
    pub fn girth(&self, filter: EdgeFilter) -> Option<usize> {
        let adj = self.adjacency(filter);
        let mut best: Option<usize> = None;

        for root in 0..adj.len() {
            let mut dist: Vec<Option<usize>> = vec![None; adj.len()];
            let mut parent: Vec<Option<usize>> = vec![None; adj.len()];
            let mut queue = VecDeque::new();
            dist[root] = Some(0);
            queue.push_back(root);

            while let Some(x) = queue.pop_front() {
                let dx = dist[x].unwrap_or(0);
                // Cycles closed from this depth on are at least 2 * dx long
                if best.is_some_and(|b| 2 * dx >= b) {
                    break;
                }
                for &y in &adj[x] {
                    if y == x {
                        best = Some(1);
                        continue;
                    }
                    match dist[y] {
                        None => {
                            dist[y] = Some(dx + 1);
                            parent[y] = Some(x);
                            queue.push_back(y);
                        }
                        Some(dy) if parent[x] != Some(y) => {
                            let len = dx + dy + 1;
                            best = Some(best.map_or(len, |b| b.min(len)));
                        }
                        Some(_) => {}
                    }
                }
            }
        }

        best
    }

    /// Fundamental cycle basis of a filtered view.
    ///
    /// Follows Paton's spanning-tree construction: roots are taken in label
    /// order and only vertices touched by a visible edge take part. Each cycle
    /// is listed as a vertex sequence.
    pub fn cycle_basis(&self, filter: EdgeFilter) -> Vec<Vec<V>> {
        let adj = self.adjacency(filter);
        let mut remaining: BTreeSet<usize> = (0..adj.len()).filter(|&v| !adj[v].is_empty()).collect();
        let mut cycles: Vec<Vec<usize>> = Vec::new();

        while let Some(root) = remaining.pop_first() {
            let mut stack = vec![root];
            let mut pred: HashMap<usize, usize> = HashMap::from([(root, root)]);
            let mut used: HashMap<usize, HashSet<usize>> = HashMap::from([(root, HashSet::new())]);

            while let Some(z) = stack.pop() {
                for &nbr in &adj[z] {
                    if !used.contains_key(&nbr) {
                        pred.insert(nbr, z);
                        stack.push(nbr);
                        used.insert(nbr, HashSet::from([z]));
                    } else if nbr == z {
                        cycles.push(vec![z]);
                    } else if !used.get(&z).is_some_and(|zu| zu.contains(&nbr)) {
                        let cycle = close_cycle(nbr, z, &pred, &used);
                        cycles.push(cycle);
                        if let Some(nu) = used.get_mut(&nbr) {
                            nu.insert(z);
                        }
                    }
                }
            }

            for visited in pred.keys() {
                remaining.remove(visited);
            }
        }

        cycles
            .into_iter()
            .map(|c| c.into_iter().map(|r| self.vertices[r].clone()).collect())
            .collect()
    }
}

/// Walk the tree from `z` up to the first vertex already joined to `nbr`.
fn close_cycle(
    nbr: usize,
    z: usize,
    pred: &HashMap<usize, usize>,
    used: &HashMap<usize, HashSet<usize>>,
) -> Vec<usize> {
    let joined = used.get(&nbr);
    let mut cycle = vec![nbr, z];
    let mut p = pred.get(&z).copied().unwrap_or(z);
    while !joined.is_some_and(|pn| pn.contains(&p)) {
        cycle.push(p);
        match pred.get(&p) {
            Some(&next) if next != p => p = next,
            _ => break,
        }
    }
    cycle.push(p);
    cycle
}

/// Unweighted shortest-path distances from `source`.
fn bfs_distances(adj: &[BTreeSet<usize>], source: usize) -> Vec<Option<usize>> {
    let mut dist = vec![None; adj.len()];
    let mut queue = VecDeque::new();
    dist[source] = Some(0);
    queue.push_back(source);
    while let Some(x) = queue.pop_front() {
        let next = dist[x].map_or(0, |d| d + 1);
        for &y in &adj[x] {
            if dist[y].is_none() {
                dist[y] = Some(next);
                queue.push_back(y);
            }
        }
    }
    dist
}

/// Union-find over vertex ranks, used for cheap connectivity checks.
#[derive(Debug, Clone)]
pub struct DisjointSet {
    parent: Vec<usize>,
    size: Vec<usize>,
    components: usize,
}

impl DisjointSet {
    /// `n` singleton sets.
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
            components: n,
        }
    }

    /// Representative of the set holding `x`.
    pub fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    /// Merge the sets holding `a` and `b`.
    pub fn union(&mut self, a: usize, b: usize) {
        let (mut ra, mut rb) = (self.find(a), self.find(b));
        if ra == rb {
            return;
        }
        if self.size[ra] < self.size[rb] {
            std::mem::swap(&mut ra, &mut rb);
        }
        self.parent[rb] = ra;
        self.size[ra] += self.size[rb];
        self.components -= 1;
    }

    /// Number of disjoint sets.
    pub fn components(&self) -> usize {
        self.components
    }
}

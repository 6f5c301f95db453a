//! Summary statistics for a built graph.
//!
//! # Statistics Provided
//!
//! - **vertex_count** / **edge_count**: N and logical M.
//! - **adjacency_entries**: stored out-entries (M directed, 2M undirected).
//! - **density**: `M / (N(N-1))` directed, `2M / (N(N-1))` undirected; 0.0
//!   for graphs with fewer than two vertices. Parallel edges and self-loops
//!   can push this above 1.0.
//! - **self_loop_count**: self-loop edges in the input.
//! - **dangling_count**: vertices with out-degree 0 (walk dead ends and
//!   PageRank mass redistributors).
//! - **max_in_degree** / **max_out_degree**.
//! - **weakly_connected_component_count**: components when edge direction is
//!   ignored.

use std::collections::HashMap;

use petgraph::unionfind::UnionFind;

use crate::graph::build::Graph;
use crate::id::VertexId;

/// Summary statistics for a [`Graph`].
#[derive(Debug, Clone, PartialEq)]
pub struct GraphStats {
    pub vertex_count: usize,
    pub edge_count: usize,
    pub adjacency_entries: usize,
    pub density: f64,
    pub self_loop_count: usize,
    pub dangling_count: usize,
    pub max_in_degree: usize,
    pub max_out_degree: usize,
    pub weakly_connected_component_count: usize,
}

impl GraphStats {
    /// Compute statistics for `graph`.
    #[must_use]
    pub fn from_graph(graph: &Graph) -> Self {
        let n = graph.num_vertices();
        let vertices = 0..n;

        let dangling_count = vertices.clone().filter(|&v| graph.out_degree(v) == 0).count();
        let max_out_degree = vertices.clone().map(|v| graph.out_degree(v)).max().unwrap_or(0);
        let max_in_degree = vertices.map(|v| graph.in_degree(v)).max().unwrap_or(0);

        let labels = component_labels(graph);
        let weakly_connected_component_count = labels.iter().max().map_or(0, |&m| m + 1);

        Self {
            vertex_count: n,
            edge_count: graph.num_edges(),
            adjacency_entries: graph.num_adjacency_entries(),
            density: compute_density(n, graph.num_edges(), graph.is_directed()),
            self_loop_count: graph.self_loop_count(),
            dangling_count,
            max_in_degree,
            max_out_degree,
            weakly_connected_component_count,
        }
    }
}

/// Label every vertex with its weakly connected component.
///
/// Components are numbered `0..` in order of their lowest internal index, so
/// the vertex that appeared first in the edge list is always in component 0.
#[must_use]
pub fn weakly_connected_components(graph: &Graph) -> HashMap<VertexId, usize> {
    let labels = component_labels(graph);
    graph
        .vertex_ids()
        .iter()
        .cloned()
        .zip(labels)
        .collect()
}

/// Dense component label per internal index.
fn component_labels(graph: &Graph) -> Vec<usize> {
    let n = graph.num_vertices();
    let mut uf = UnionFind::<usize>::new(n);
    for v in 0..n {
        for (w, _) in graph.neighbors(v) {
            uf.union(v, w);
        }
    }

    // Representatives are arbitrary; relabel by first appearance.
    let roots = uf.into_labeling();
    let mut dense: HashMap<usize, usize> = HashMap::new();
    roots
        .into_iter()
        .map(|root| {
            let next = dense.len();
            *dense.entry(root).or_insert(next)
        })
        .collect()
}

#[allow(clippy::cast_precision_loss)]
fn compute_density(n: usize, m: usize, directed: bool) -> f64 {
    if n < 2 {
        return 0.0;
    }
    let pairs = (n * (n - 1)) as f64;
    let edges = if directed { m as f64 } else { 2.0 * m as f64 };
    edges / pairs
}

//! Degree centrality.
//!
//! The headline score is out-degree on a directed graph and adjacency degree
//! on an undirected one (a self-loop counts twice there). Optionally divided
//! by `N - 1`, the largest degree a simple graph allows.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use skein_core::{Graph, ScoreMap, VertexId};

/// Configuration for [`degree_centrality`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DegreeConfig {
    /// Divide each degree by `N - 1` (skipped when `N < 2`).
    /// Default: false.
    #[serde(default)]
    pub normalized: bool,
}

/// Per-vertex degree counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DegreeCentrality {
    /// Incoming adjacency entries per vertex.
    pub in_degree: HashMap<VertexId, usize>,
    /// Outgoing adjacency entries per vertex.
    pub out_degree: HashMap<VertexId, usize>,
    /// `in + out` on directed graphs; adjacency degree on undirected ones.
    pub total_degree: HashMap<VertexId, usize>,
}

/// Degree score for every vertex.
#[must_use]
#[allow(clippy::cast_precision_loss)]
#[instrument(skip(graph, config))]
pub fn degree_centrality(graph: &Graph, config: &DegreeConfig) -> ScoreMap {
    let n = graph.num_vertices();
    let scale = if config.normalized && n > 1 {
        1.0 / (n - 1) as f64
    } else {
        1.0
    };

    graph
        .vertex_ids()
        .iter()
        .enumerate()
        .map(|(v, id)| {
            let d = if graph.is_directed() {
                graph.out_degree(v)
            } else {
                graph.degree(v)
            };
            (id.clone(), d as f64 * scale)
        })
        .collect()
}

/// In, out, and total degree for every vertex.
#[must_use]
pub fn degree_breakdown(graph: &Graph) -> DegreeCentrality {
    let n = graph.num_vertices();
    let mut in_degree = HashMap::with_capacity(n);
    let mut out_degree = HashMap::with_capacity(n);
    let mut total_degree = HashMap::with_capacity(n);

    for (v, id) in graph.vertex_ids().iter().enumerate() {
        in_degree.insert(id.clone(), graph.in_degree(v));
        out_degree.insert(id.clone(), graph.out_degree(v));
        total_degree.insert(id.clone(), graph.degree(v));
    }

    DegreeCentrality {
        in_degree,
        out_degree,
        total_degree,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skein_core::edges;

    fn id(s: &str) -> VertexId {
        VertexId::from(s)
    }

    #[test]
    fn directed_scores_are_out_degree() {
        // a -> b, a -> c, b -> c
        let g = Graph::build(&edges([("a", "b"), ("a", "c"), ("b", "c")]), true).expect("build");
        let dc = degree_centrality(&g, &DegreeConfig::default());
        assert!((dc[&id("a")] - 2.0).abs() < f64::EPSILON);
        assert!((dc[&id("b")] - 1.0).abs() < f64::EPSILON);
        assert!(dc[&id("c")].abs() < f64::EPSILON);
    }

    #[test]
    fn normalized_divides_by_n_minus_one() {
        let g = Graph::build(&edges([("a", "b"), ("a", "c")]), false).expect("build");
        let dc = degree_centrality(&g, &DegreeConfig { normalized: true });
        assert!((dc[&id("a")] - 1.0).abs() < 1e-12);
        assert!((dc[&id("b")] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn undirected_self_loop_counts_twice() {
        let g = Graph::build(&edges([(1, 1), (1, 2)]), false).expect("build");
        let dc = degree_centrality(&g, &DegreeConfig::default());
        assert!((dc[&VertexId::Int(1)] - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn breakdown_on_diamond() {
        // a -> b, a -> c, b -> d, c -> d
        let g = Graph::build(
            &edges([("a", "b"), ("a", "c"), ("b", "d"), ("c", "d")]),
            true,
        )
        .expect("build");
        let dc = degree_breakdown(&g);

        assert_eq!(dc.out_degree[&id("a")], 2);
        assert_eq!(dc.in_degree[&id("a")], 0);
        assert_eq!(dc.in_degree[&id("d")], 2);
        assert_eq!(dc.out_degree[&id("d")], 0);
        assert_eq!(dc.total_degree[&id("b")], 2);
    }

    #[test]
    fn breakdown_on_undirected_graph() {
        let g = Graph::build(&edges([("a", "b")]), false).expect("build");
        let dc = degree_breakdown(&g);
        assert_eq!(dc.in_degree[&id("a")], 1);
        assert_eq!(dc.out_degree[&id("a")], 1);
        assert_eq!(dc.total_degree[&id("a")], 1);
    }
}

//! Graph construction from an edge list.
//!
//! # Pipeline
//!
//! ```text
//! &[EdgeRecord]
//!        ↓  RenumberIndex::build()      (external IDs → 0..N)
//! renumbered (src, dst, weight) triples
//!        ↓  validate weights / self-loops
//!        ↓  Csr::from_entries()          (out-edges, CSR)
//!        ↓  Csr::from_entries()          (in-edges, CSC)
//! Graph
//! ```
//!
//! ## Undirected graphs
//!
//! Each input edge contributes two adjacency entries, `src → dst` and
//! `dst → src`. A self-loop also contributes two entries to its vertex, so
//! it counts 2 toward that vertex's degree and the degree sum of an
//! undirected graph is always `2 · M`.
//!
//! ## Cache invalidation
//!
//! [`Graph::content_hash`] is a BLAKE3 hash of the directedness flag and the
//! renumbered edge list (including weight bits when weighted).

#![allow(clippy::module_name_repetitions)]

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::{GraphError, Result};
use crate::graph::csr::Csr;
use crate::id::{EdgeRecord, VertexId};
use crate::renumber::RenumberIndex;

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// How to interpret an edge list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphOptions {
    /// Directed (default) or undirected.
    #[serde(default = "default_true")]
    pub directed: bool,
    /// `None` infers weightedness from the records: weighted iff any record
    /// carries a weight. `Some(false)` ignores weights; `Some(true)` forces a
    /// weighted graph with missing weights defaulting to 1.0.
    #[serde(default)]
    pub weighted: Option<bool>,
    /// Reject edge lists containing self-loops instead of storing them.
    #[serde(default)]
    pub reject_self_loops: bool,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            directed: default_true(),
            weighted: None,
            reject_self_loops: false,
        }
    }
}

impl GraphOptions {
    #[must_use]
    pub fn directed() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn undirected() -> Self {
        Self {
            directed: false,
            ..Self::default()
        }
    }
}

const fn default_true() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Graph
// ---------------------------------------------------------------------------

/// An immutable graph over renumbered vertices.
///
/// `out` holds out-edges (CSR) and `inc` holds in-edges (CSC). For an
/// undirected graph both contain the same reciprocal entries. All accessors
/// take `&self`; a `Graph` can be shared across threads freely.
#[derive(Debug, Clone)]
pub struct Graph {
    index: RenumberIndex,
    out: Csr,
    inc: Csr,
    directed: bool,
    weighted: bool,
    num_edges: usize,
    self_loops: usize,
    content_hash: String,
}

impl Graph {
    /// Build a graph, inferring weightedness from the records.
    ///
    /// # Errors
    ///
    /// See [`Graph::build_with`].
    pub fn build(edges: &[EdgeRecord], directed: bool) -> Result<Self> {
        Self::build_with(
            edges,
            &GraphOptions {
                directed,
                ..GraphOptions::default()
            },
        )
    }

    /// Build a graph with explicit options.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidInput`] if the edge list is empty, mixes
    /// ID kinds, carries a negative or non-finite weight, or contains a
    /// self-loop while `reject_self_loops` is set.
    #[instrument(skip(edges, options), fields(edges = edges.len(), directed = options.directed))]
    pub fn build_with(edges: &[EdgeRecord], options: &GraphOptions) -> Result<Self> {
        let index = RenumberIndex::build(edges)?;
        let n = index.len();

        let weighted = options
            .weighted
            .unwrap_or_else(|| edges.iter().any(|e| e.weight.is_some()));

        let mut pairs: Vec<(usize, usize)> = Vec::with_capacity(edges.len());
        let mut weights: Vec<f64> = Vec::with_capacity(if weighted { edges.len() } else { 0 });
        let mut self_loops = 0usize;

        for (pos, edge) in edges.iter().enumerate() {
            let src = index.translate_in(&edge.source)?;
            let dst = index.translate_in(&edge.destination)?;

            if src == dst {
                if options.reject_self_loops {
                    return Err(GraphError::invalid(format!(
                        "edge {pos} is a self-loop on vertex {} and self-loops are rejected",
                        edge.source
                    )));
                }
                self_loops += 1;
            }

            if weighted {
                let w = edge.weight.unwrap_or(1.0);
                if !w.is_finite() || w < 0.0 {
                    return Err(GraphError::invalid(format!(
                        "edge {pos} ({} -> {}) has invalid weight {w}; \
                         weights must be finite and non-negative",
                        edge.source, edge.destination
                    )));
                }
                weights.push(w);
            }

            pairs.push((src, dst));
        }

        let content_hash = compute_edge_hash(
            &pairs,
            weighted.then_some(weights.as_slice()),
            options.directed,
        );

        let (out, inc) = if options.directed {
            let reversed: Vec<(usize, usize)> = pairs.iter().map(|&(s, d)| (d, s)).collect();
            let w = weighted.then_some(weights.as_slice());
            (
                Csr::from_entries(n, &pairs, w),
                Csr::from_entries(n, &reversed, w),
            )
        } else {
            let mut both: Vec<(usize, usize)> = Vec::with_capacity(pairs.len() * 2);
            let mut both_weights: Vec<f64> =
                Vec::with_capacity(if weighted { pairs.len() * 2 } else { 0 });
            for (i, &(s, d)) in pairs.iter().enumerate() {
                both.push((s, d));
                both.push((d, s));
                if weighted {
                    both_weights.push(weights[i]);
                    both_weights.push(weights[i]);
                }
            }
            let w = weighted.then_some(both_weights.as_slice());
            let adjacency = Csr::from_entries(n, &both, w);
            (adjacency.clone(), adjacency)
        };

        debug!(
            vertices = n,
            edges = pairs.len(),
            entries = out.num_entries(),
            weighted,
            self_loops,
            "built graph"
        );

        Ok(Self {
            index,
            out,
            inc,
            directed: options.directed,
            weighted,
            num_edges: pairs.len(),
            self_loops,
            content_hash,
        })
    }

    /// Number of vertices (N).
    #[must_use]
    pub fn num_vertices(&self) -> usize {
        self.index.len()
    }

    /// Number of logical input edges (M), not adjacency entries.
    #[must_use]
    pub const fn num_edges(&self) -> usize {
        self.num_edges
    }

    /// Number of stored out-adjacency entries: M directed, 2M undirected.
    #[must_use]
    pub fn num_adjacency_entries(&self) -> usize {
        self.out.num_entries()
    }

    #[must_use]
    pub const fn is_directed(&self) -> bool {
        self.directed
    }

    #[must_use]
    pub const fn is_weighted(&self) -> bool {
        self.weighted
    }

    /// Number of self-loop edges in the input.
    #[must_use]
    pub const fn self_loop_count(&self) -> usize {
        self.self_loops
    }

    #[must_use]
    pub fn content_hash(&self) -> &str {
        &self.content_hash
    }

    #[must_use]
    pub const fn index(&self) -> &RenumberIndex {
        &self.index
    }

    /// Out-edge adjacency (CSR).
    #[must_use]
    pub const fn out_csr(&self) -> &Csr {
        &self.out
    }

    /// In-edge adjacency (CSC).
    #[must_use]
    pub const fn in_csr(&self) -> &Csr {
        &self.inc
    }

    /// External IDs in internal-index order.
    #[must_use]
    pub fn vertex_ids(&self) -> &[VertexId] {
        self.index.ids()
    }

    /// # Errors
    ///
    /// Returns [`GraphError::IndexOutOfRange`] if `v >= num_vertices()`.
    pub fn vertex_id(&self, v: usize) -> Result<&VertexId> {
        self.index.translate_out(v)
    }

    /// # Errors
    ///
    /// Returns [`GraphError::UnknownVertex`] if `id` is not in the graph.
    pub fn vertex_index(&self, id: &VertexId) -> Result<usize> {
        self.index.translate_in(id)
    }

    /// `(neighbor, weight)` pairs for the out-edges of `v`, in input order.
    /// Weight is 1.0 on unweighted graphs.
    ///
    /// # Panics
    ///
    /// Panics if `v >= num_vertices()`; see [`Graph::try_neighbors`].
    pub fn neighbors(&self, v: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.out.row_entries(v)
    }

    /// `(neighbor, weight)` pairs for the in-edges of `v`.
    ///
    /// # Panics
    ///
    /// Panics if `v >= num_vertices()`.
    pub fn in_neighbors(&self, v: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.inc.row_entries(v)
    }

    /// Checked variant of [`Graph::neighbors`].
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::IndexOutOfRange`] if `v >= num_vertices()`.
    pub fn try_neighbors(&self, v: usize) -> Result<impl Iterator<Item = (usize, f64)> + '_> {
        self.check(v)?;
        Ok(self.out.row_entries(v))
    }

    /// Out-degree of `v`: number of out-adjacency entries.
    ///
    /// # Panics
    ///
    /// Panics if `v >= num_vertices()`.
    #[must_use]
    pub fn out_degree(&self, v: usize) -> usize {
        self.out.degree(v)
    }

    /// # Panics
    ///
    /// Panics if `v >= num_vertices()`.
    #[must_use]
    pub fn in_degree(&self, v: usize) -> usize {
        self.inc.degree(v)
    }

    /// Checked variant of [`Graph::out_degree`].
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::IndexOutOfRange`] if `v >= num_vertices()`.
    pub fn try_out_degree(&self, v: usize) -> Result<usize> {
        self.check(v)?;
        Ok(self.out.degree(v))
    }

    /// Degree of `v`: adjacency length for undirected graphs, in + out for
    /// directed graphs.
    ///
    /// # Panics
    ///
    /// Panics if `v >= num_vertices()`.
    #[must_use]
    pub fn degree(&self, v: usize) -> usize {
        if self.directed {
            self.out.degree(v) + self.inc.degree(v)
        } else {
            self.out.degree(v)
        }
    }

    fn check(&self, v: usize) -> Result<()> {
        let len = self.num_vertices();
        if v < len {
            Ok(())
        } else {
            Err(GraphError::IndexOutOfRange { index: v, len })
        }
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// BLAKE3 over the directedness flag and the renumbered edge list.
fn compute_edge_hash(pairs: &[(usize, usize)], weights: Option<&[f64]>, directed: bool) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(if directed { b"d" } else { b"u" });
    for (i, &(src, dst)) in pairs.iter().enumerate() {
        hasher.update(&(src as u64).to_le_bytes());
        hasher.update(&(dst as u64).to_le_bytes());
        if let Some(w) = weights {
            hasher.update(&w[i].to_bits().to_le_bytes());
        }
    }
    format!("blake3:{}", hasher.finalize())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::edges;

    fn ids(graph: &Graph, row: impl Iterator<Item = (usize, f64)>) -> Vec<VertexId> {
        row.map(|(t, _)| graph.vertex_id(t).expect("in range").clone())
            .collect()
    }

    #[test]
    fn empty_edge_list_fails() {
        let err = Graph::build(&[], true).expect_err("empty");
        assert!(matches!(err, GraphError::InvalidInput { .. }));
    }

    #[test]
    fn directed_chain_structure() {
        let g = Graph::build(&edges([("a", "b"), ("b", "c")]), true).expect("build");
        assert_eq!(g.num_vertices(), 3);
        assert_eq!(g.num_edges(), 2);
        assert_eq!(g.num_adjacency_entries(), 2);
        assert!(g.is_directed());
        assert!(!g.is_weighted());

        let a = g.vertex_index(&"a".into()).expect("a");
        let b = g.vertex_index(&"b".into()).expect("b");
        let c = g.vertex_index(&"c".into()).expect("c");
        assert_eq!(g.out_degree(a), 1);
        assert_eq!(g.out_degree(c), 0);
        assert_eq!(g.in_degree(b), 1);
        assert_eq!(g.degree(b), 2);
        assert_eq!(ids(&g, g.neighbors(a)), vec![VertexId::from("b")]);
        assert_eq!(ids(&g, g.in_neighbors(c)), vec![VertexId::from("b")]);
    }

    #[test]
    fn undirected_edges_are_reciprocal() {
        let g = Graph::build(&edges([(0, 1), (1, 2)]), false).expect("build");
        assert_eq!(g.num_edges(), 2);
        assert_eq!(g.num_adjacency_entries(), 4);
        let one = g.vertex_index(&1.into()).expect("1");
        assert_eq!(
            ids(&g, g.neighbors(one)),
            vec![VertexId::Int(0), VertexId::Int(2)]
        );
        assert_eq!(g.degree(one), 2);
        assert_eq!(g.out_csr(), g.in_csr());
    }

    #[test]
    fn undirected_self_loop_counts_twice() {
        let g = Graph::build(&edges([(0, 0), (0, 1)]), false).expect("build");
        let zero = g.vertex_index(&0.into()).expect("0");
        assert_eq!(g.degree(zero), 3);
        assert_eq!(g.self_loop_count(), 1);
        let total: usize = (0..g.num_vertices()).map(|v| g.degree(v)).sum();
        assert_eq!(total, 2 * g.num_edges());
    }

    #[test]
    fn self_loops_can_be_rejected() {
        let options = GraphOptions {
            reject_self_loops: true,
            ..GraphOptions::default()
        };
        let err = Graph::build_with(&edges([(0, 1), (2, 2)]), &options).expect_err("self-loop");
        let GraphError::InvalidInput { reason } = err else {
            panic!("expected InvalidInput");
        };
        assert!(reason.contains("edge 1"), "reason: {reason}");
    }

    #[test]
    fn weights_are_inferred_and_defaulted() {
        let list = vec![EdgeRecord::weighted(0, 1, 2.5), EdgeRecord::new(1, 2)];
        let g = Graph::build(&list, true).expect("build");
        assert!(g.is_weighted());
        let one = g.vertex_index(&1.into()).expect("1");
        assert_eq!(g.neighbors(one).collect::<Vec<_>>(), vec![(2, 1.0)]);
        assert_eq!(g.neighbors(0).collect::<Vec<_>>(), vec![(1, 2.5)]);
    }

    #[test]
    fn weights_can_be_ignored() {
        let list = vec![EdgeRecord::weighted(0, 1, -4.0)];
        let options = GraphOptions {
            weighted: Some(false),
            ..GraphOptions::default()
        };
        let g = Graph::build_with(&list, &options).expect("negative weight ignored");
        assert!(!g.is_weighted());
        assert!(g.out_csr().weights().is_none());
    }

    #[test]
    fn invalid_weights_are_rejected() {
        for bad in [-1.0, f64::NAN, f64::INFINITY] {
            let list = vec![EdgeRecord::new(0, 1), EdgeRecord::weighted(1, 2, bad)];
            let err = Graph::build(&list, true).expect_err("invalid weight");
            let GraphError::InvalidInput { reason } = err else {
                panic!("expected InvalidInput");
            };
            assert!(reason.contains("edge 1"), "reason: {reason}");
        }
    }

    #[test]
    fn parallel_edges_are_kept() {
        let g = Graph::build(&edges([(0, 1), (0, 1)]), true).expect("build");
        assert_eq!(g.out_degree(0), 2);
        assert_eq!(g.in_degree(1), 2);
    }

    #[test]
    fn checked_accessors_report_out_of_range() {
        let g = Graph::build(&edges([(0, 1)]), true).expect("build");
        assert_eq!(
            g.try_out_degree(2).expect_err("out of range"),
            GraphError::IndexOutOfRange { index: 2, len: 2 }
        );
        assert!(g.try_neighbors(5).is_err());
        assert_eq!(g.try_neighbors(0).expect("in range").count(), 1);
    }

    #[test]
    fn content_hash_tracks_structure() {
        let a = Graph::build(&edges([(0, 1), (1, 2)]), true).expect("build");
        let same = Graph::build(&edges([(0, 1), (1, 2)]), true).expect("build");
        let undirected = Graph::build(&edges([(0, 1), (1, 2)]), false).expect("build");
        let weighted = Graph::build(
            &[
                EdgeRecord::weighted(0, 1, 2.0),
                EdgeRecord::weighted(1, 2, 1.0),
            ],
            true,
        )
        .expect("build");

        assert!(a.content_hash().starts_with("blake3:"));
        assert_eq!(a.content_hash(), same.content_hash());
        assert_ne!(a.content_hash(), undirected.content_hash());
        assert_ne!(a.content_hash(), weighted.content_hash());
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let options: GraphOptions = toml::from_str("directed = false").expect("parse");
        assert_eq!(options, GraphOptions::undirected());
        let options: GraphOptions = toml::from_str("").expect("parse empty");
        assert_eq!(options, GraphOptions::directed());
    }
}

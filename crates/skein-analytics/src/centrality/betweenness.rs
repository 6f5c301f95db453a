//! Betweenness centrality via Brandes' algorithm.
//!
//! # Overview
//!
//! Betweenness measures how often a vertex lies on shortest paths between
//! other pairs of vertices. High-betweenness vertices are bridges: removing
//! them lengthens or breaks many shortest paths.
//!
//! # Algorithm
//!
//! Brandes (2001):
//!
//! 1. For each source `s`, run a single-source shortest-path traversal that
//!    records path counts `sigma` and predecessor lists. BFS on unweighted
//!    graphs, Dijkstra when the graph is weighted and `use_weights` is set.
//! 2. Accumulate dependencies in reverse settling order (farthest first).
//! 3. Sum dependencies across sources.
//!
//! Sources are processed in parallel; each rayon task folds into a private
//! accumulator and the accumulators are summed at the end.
//!
//! Parallel edges are distinct paths: two `a -> b` edges give `sigma[b] = 2`.
//!
//! Weighted traversal needs strictly positive weights. A zero-weight edge
//! joins two vertices at the same distance, and the settling order between
//! them is then arbitrary, so the result would depend on edge order. Such
//! graphs are rejected when weights are in use; `use_weights = false` still
//! runs on them by hop count.
//!
//! # Scaling
//!
//! - Undirected graphs: raw scores are halved, since every unordered pair is
//!   traversed from both ends.
//! - Sampling: with `sample_size = Some(k)`, `k < N`, only `k` seeded random
//!   sources are traversed and scores are scaled by `N / k`.
//! - Normalization (default on, `N > 2`): directed scores are multiplied by
//!   `1 / ((N-1)(N-2))`, undirected by `2 / ((N-1)(N-2))`.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use skein_core::{Graph, GraphError, Result, ScoreMap};

use super::score_map;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for [`betweenness_centrality`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BetweennessConfig {
    /// Number of source vertices to sample. `None` traverses from every
    /// vertex; values `>= N` are exact as well.
    /// Default: None.
    #[serde(default)]
    pub sample_size: Option<usize>,
    /// Scale scores into `[0, 1]` for simple graphs.
    /// Default: true.
    #[serde(default = "default_true")]
    pub normalized: bool,
    /// Use edge weights as distances when the graph is weighted.
    /// Default: true.
    #[serde(default = "default_true")]
    pub use_weights: bool,
    /// Seed for source sampling.
    /// Default: 42.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for BetweennessConfig {
    fn default() -> Self {
        Self {
            sample_size: None,
            normalized: true,
            use_weights: true,
            seed: default_seed(),
        }
    }
}

const fn default_true() -> bool {
    true
}

const fn default_seed() -> u64 {
    42
}

// ---------------------------------------------------------------------------
// Betweenness
// ---------------------------------------------------------------------------

/// Compute betweenness centrality for every vertex.
///
/// # Errors
///
/// Returns [`GraphError::InvalidInput`] if `sample_size` is `Some(0)`, or if
/// weights are in use and any edge has weight 0.
#[allow(clippy::cast_precision_loss)]
#[instrument(skip(graph, config), fields(vertices = graph.num_vertices()))]
pub fn betweenness_centrality(graph: &Graph, config: &BetweennessConfig) -> Result<ScoreMap> {
    let n = graph.num_vertices();
    let sources = select_sources(n, config)?;
    let weighted = config.use_weights && graph.is_weighted();
    if weighted && has_zero_weight(graph) {
        return Err(GraphError::invalid(
            "weighted betweenness requires positive edge weights; \
             remove zero-weight edges or set use_weights = false",
        ));
    }

    let mut scores = sources
        .par_iter()
        .fold(
            || vec![0.0_f64; n],
            |mut acc, &s| {
                if weighted {
                    accumulate_dijkstra(graph, s, &mut acc);
                } else {
                    accumulate_bfs(graph, s, &mut acc);
                }
                acc
            },
        )
        .reduce(
            || vec![0.0_f64; n],
            |mut a, b| {
                for (x, y) in a.iter_mut().zip(b) {
                    *x += y;
                }
                a
            },
        );

    let mut scale = 1.0;
    if sources.len() < n {
        scale *= n as f64 / sources.len() as f64;
    }
    if !graph.is_directed() {
        scale *= 0.5;
    }
    if config.normalized && n > 2 {
        let pairs = ((n - 1) * (n - 2)) as f64;
        scale *= if graph.is_directed() {
            1.0 / pairs
        } else {
            2.0 / pairs
        };
    }
    for x in &mut scores {
        *x *= scale;
    }

    debug!(
        sources = sources.len(),
        weighted,
        normalized = config.normalized,
        "betweenness complete"
    );

    Ok(score_map(graph, &scores))
}

/// Source vertices to traverse: all of them, or a seeded sample.
fn select_sources(n: usize, config: &BetweennessConfig) -> Result<Vec<usize>> {
    match config.sample_size {
        Some(0) => Err(GraphError::invalid("betweenness sample_size must be positive")),
        Some(k) if k < n => {
            let mut rng = StdRng::seed_from_u64(config.seed);
            let mut picked = rand::seq::index::sample(&mut rng, n, k).into_vec();
            picked.sort_unstable();
            Ok(picked)
        }
        _ => Ok((0..n).collect()),
    }
}

fn has_zero_weight(graph: &Graph) -> bool {
    (0..graph.num_vertices()).any(|v| graph.neighbors(v).any(|(_, w)| w <= 0.0))
}

// ---------------------------------------------------------------------------
// Single-source passes
// ---------------------------------------------------------------------------

/// Brandes pass from `s` using hop distance.
fn accumulate_bfs(graph: &Graph, s: usize, acc: &mut [f64]) {
    let n = graph.num_vertices();

    // Vertices in order of discovery; popped farthest first.
    let mut stack: Vec<usize> = Vec::with_capacity(n);
    let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut sigma = vec![0.0_f64; n];
    let mut dist: Vec<Option<usize>> = vec![None; n];

    sigma[s] = 1.0;
    dist[s] = Some(0);

    let mut queue = VecDeque::new();
    queue.push_back(s);

    while let Some(v) = queue.pop_front() {
        stack.push(v);
        let Some(dv) = dist[v] else { continue };

        for (w, _) in graph.neighbors(v) {
            if dist[w].is_none() {
                dist[w] = Some(dv + 1);
                queue.push_back(w);
            }
            if dist[w] == Some(dv + 1) {
                sigma[w] += sigma[v];
                predecessors[w].push(v);
            }
        }
    }

    back_propagate(s, stack, &predecessors, &sigma, acc);
}

/// Brandes pass from `s` using edge weights as distances.
#[allow(clippy::float_cmp)]
fn accumulate_dijkstra(graph: &Graph, s: usize, acc: &mut [f64]) {
    let n = graph.num_vertices();

    let mut stack: Vec<usize> = Vec::with_capacity(n);
    let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut sigma = vec![0.0_f64; n];
    let mut dist = vec![f64::INFINITY; n];
    let mut settled = vec![false; n];

    sigma[s] = 1.0;
    dist[s] = 0.0;

    let mut heap = BinaryHeap::new();
    heap.push(Frontier { dist: 0.0, vertex: s });

    while let Some(Frontier { dist: d, vertex: v }) = heap.pop() {
        if settled[v] || d > dist[v] {
            continue;
        }
        settled[v] = true;
        stack.push(v);

        for (w, weight) in graph.neighbors(v) {
            if settled[w] {
                continue;
            }
            let candidate = d + weight;
            if candidate < dist[w] {
                dist[w] = candidate;
                sigma[w] = sigma[v];
                predecessors[w].clear();
                predecessors[w].push(v);
                heap.push(Frontier {
                    dist: candidate,
                    vertex: w,
                });
            } else if candidate == dist[w] {
                // Exact tie: another shortest path.
                sigma[w] += sigma[v];
                predecessors[w].push(v);
            }
        }
    }

    back_propagate(s, stack, &predecessors, &sigma, acc);
}

/// Dependency accumulation in reverse settling order.
fn back_propagate(
    s: usize,
    mut stack: Vec<usize>,
    predecessors: &[Vec<usize>],
    sigma: &[f64],
    acc: &mut [f64],
) {
    let mut delta = vec![0.0_f64; sigma.len()];

    while let Some(w) = stack.pop() {
        if sigma[w] > 0.0 {
            let coeff = (1.0 + delta[w]) / sigma[w];
            for &v in &predecessors[w] {
                delta[v] += sigma[v] * coeff;
            }
        }
        if w != s {
            acc[w] += delta[w];
        }
    }
}

/// Min-heap entry for Dijkstra.
#[derive(Debug, Clone, Copy)]
struct Frontier {
    dist: f64,
    vertex: usize,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Frontier {
    // Reversed so `BinaryHeap` pops the nearest vertex first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .dist
            .total_cmp(&self.dist)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

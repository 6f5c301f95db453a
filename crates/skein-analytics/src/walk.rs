//! Random walks from seed vertices.
//!
//! # Algorithm
//!
//! For each seed independently:
//!
//! 1. Start at the renumbered seed with an empty path.
//! 2. Up to `max_depth` times: stop if the current vertex has no out-edges,
//!    otherwise pick one out-edge (uniformly, or proportional to weight on a
//!    weighted graph), append it, and move along it.
//!
//! Hitting a dangling vertex is a normal way for a walk to end.
//!
//! # Reproducibility
//!
//! Seed `k` draws from its own `StdRng` seeded with `config.seed + k`, so the
//! output depends only on the graph, the seed list, and the config, never on
//! how rayon schedules the walks.
//!
//! # Output
//!
//! Paths are concatenated in seed order. `seed_offsets[k]..seed_offsets[k+1]`
//! is the slice of `edges` belonging to seed `k`.

use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use skein_core::{Graph, GraphError, Result, VertexId};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for [`random_walks`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkConfig {
    /// Maximum number of edges per walk. Must be positive.
    /// Default: 3.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    /// Base RNG seed; seed `k` uses `seed + k`.
    /// Default: 42.
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Sample proportional to edge weight when the graph is weighted.
    /// Default: true.
    #[serde(default = "default_true")]
    pub use_weights: bool,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            seed: default_seed(),
            use_weights: default_true(),
        }
    }
}

const fn default_max_depth() -> usize {
    3
}

const fn default_seed() -> u64 {
    42
}

const fn default_true() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// One traversed edge, expressed in external IDs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalkEdge {
    pub source: VertexId,
    pub destination: VertexId,
    /// Weight of the traversed edge (1.0 on unweighted graphs).
    pub weight: f64,
}

/// Flattened walk paths plus the seed offset table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomWalks {
    /// All path edges, concatenated in seed order.
    pub edges: Vec<WalkEdge>,
    /// `len(seeds) + 1` offsets into `edges`; starts at 0, ends at
    /// `edges.len()`.
    pub seed_offsets: Vec<usize>,
}

impl RandomWalks {
    /// Number of walks (one per seed).
    #[must_use]
    pub fn num_paths(&self) -> usize {
        self.seed_offsets.len() - 1
    }

    #[must_use]
    pub fn total_edges(&self) -> usize {
        self.edges.len()
    }

    /// Edges of the walk started from seed `k`.
    ///
    /// # Panics
    ///
    /// Panics if `k >= num_paths()`.
    #[must_use]
    pub fn path(&self, k: usize) -> &[WalkEdge] {
        &self.edges[self.seed_offsets[k]..self.seed_offsets[k + 1]]
    }

    /// Iterate over all paths in seed order.
    pub fn paths(&self) -> impl Iterator<Item = &[WalkEdge]> + '_ {
        self.seed_offsets
            .windows(2)
            .map(|w| &self.edges[w[0]..w[1]])
    }
}

// ---------------------------------------------------------------------------
// Walks
// ---------------------------------------------------------------------------

/// Run one random walk per seed.
///
/// # Errors
///
/// - [`GraphError::InvalidInput`] if `config.max_depth` is 0.
/// - [`GraphError::UnknownVertex`] if any seed is not in the graph. All
///   seeds are checked before any walk starts.
#[instrument(
    skip(graph, seeds, config),
    fields(seeds = seeds.len(), max_depth = config.max_depth)
)]
pub fn random_walks(
    graph: &Graph,
    seeds: &[VertexId],
    config: &WalkConfig,
) -> Result<RandomWalks> {
    if config.max_depth == 0 {
        return Err(GraphError::invalid("walk max_depth must be positive"));
    }

    let starts = graph.index().translate_all(seeds)?;
    let weighted = config.use_weights && graph.is_weighted();

    let paths: Vec<Vec<(usize, usize, f64)>> = starts
        .par_iter()
        .enumerate()
        .map(|(k, &start)| {
            let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(k as u64));
            walk_from(graph, start, config.max_depth, weighted, &mut rng)
        })
        .collect();

    let mut seed_offsets = Vec::with_capacity(paths.len() + 1);
    seed_offsets.push(0);
    let mut edges = Vec::with_capacity(paths.iter().map(Vec::len).sum());

    for path in paths {
        for (src, dst, weight) in path {
            edges.push(WalkEdge {
                source: graph.vertex_id(src)?.clone(),
                destination: graph.vertex_id(dst)?.clone(),
                weight,
            });
        }
        seed_offsets.push(edges.len());
    }

    debug!(total_edges = edges.len(), "random walks complete");

    Ok(RandomWalks {
        edges,
        seed_offsets,
    })
}

/// One walk over internal indices.
fn walk_from<R: Rng>(
    graph: &Graph,
    start: usize,
    max_depth: usize,
    weighted: bool,
    rng: &mut R,
) -> Vec<(usize, usize, f64)> {
    let csr = graph.out_csr();
    let mut path = Vec::with_capacity(max_depth);
    let mut current = start;

    for _ in 0..max_depth {
        let targets = csr.row_targets(current);
        if targets.is_empty() {
            break;
        }

        let pick = match csr.row_weights(current) {
            Some(weights) if weighted => pick_weighted(weights, rng),
            _ => rng.gen_range(0..targets.len()),
        };

        let next = targets[pick];
        let weight = csr.row_weights(current).map_or(1.0, |w| w[pick]);
        path.push((current, next, weight));
        current = next;
    }

    path
}

/// Index into `weights` chosen proportional to weight; uniform when every
/// weight is zero.
fn pick_weighted<R: Rng>(weights: &[f64], rng: &mut R) -> usize {
    match WeightedIndex::new(weights) {
        Ok(dist) => dist.sample(rng),
        Err(_) => rng.gen_range(0..weights.len()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! PageRank and personalized PageRank.
//!
//! # Algorithm
//!
//! Power iteration, pulled over in-edges so every vertex updates
//! independently from the previous iteration's vector:
//!
//! ```text
//! PR'(v) = (1 - d) * t(v) + d * D * t(v) + d * Σ PR(u) / out_degree(u)   for each u → v
//! ```
//!
//! where `d` is the damping factor, `D` is the rank currently held by
//! dangling vertices (out-degree 0), and `t` is the teleport distribution:
//! uniform `1 / N` for plain PageRank, the normalized personalization vector
//! otherwise. Dangling mass follows `t`, so scores always sum to 1.
//!
//! Iteration starts from `1 / N` everywhere and stops once the L1 change
//! between iterations drops below `tol`.
//!
//! Edge multiplicity counts; edge weights are not used.

use std::collections::HashMap;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use skein_core::{Graph, GraphError, Result, VertexId};

use super::{IterativeScores, check_iteration_limits, score_map};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for [`pagerank`] and [`personalized_pagerank`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRankConfig {
    /// Probability of following a link rather than teleporting.
    /// Default: 0.85.
    #[serde(default = "default_damping")]
    pub damping: f64,
    /// Default: 100.
    #[serde(default = "default_max_iter")]
    pub max_iter: usize,
    /// Stop when the L1 norm of the rank change is below this.
    /// Default: 1e-6.
    #[serde(default = "default_tol")]
    pub tol: f64,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            damping: default_damping(),
            max_iter: default_max_iter(),
            tol: default_tol(),
        }
    }
}

const fn default_damping() -> f64 {
    0.85
}

const fn default_max_iter() -> usize {
    100
}

const fn default_tol() -> f64 {
    1e-6
}

impl PageRankConfig {
    fn validate(&self, algorithm: &str) -> Result<()> {
        check_iteration_limits(algorithm, self.max_iter, self.tol)?;
        if !(0.0..=1.0).contains(&self.damping) {
            return Err(GraphError::invalid(format!(
                "{algorithm} damping must be in [0, 1], got {}",
                self.damping
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Compute PageRank for every vertex.
///
/// # Errors
///
/// - [`GraphError::InvalidInput`] for a damping factor outside `[0, 1]`,
///   `max_iter == 0`, or a non-positive `tol`.
/// - [`GraphError::Convergence`] if the tolerance is not met within
///   `max_iter` iterations.
#[instrument(skip(graph, config), fields(vertices = graph.num_vertices()))]
pub fn pagerank(graph: &Graph, config: &PageRankConfig) -> Result<IterativeScores> {
    config.validate("pagerank")?;
    power_iterate(graph, None, config, "pagerank")
}

/// PageRank with teleportation restricted to a personalization vector.
///
/// Vertices absent from `personalization` get teleport weight 0. Values are
/// normalized to sum to 1.
///
/// # Errors
///
/// - [`GraphError::UnknownVertex`] if a key is not in the graph.
/// - [`GraphError::InvalidInput`] for negative or non-finite values, an
///   all-zero vector, or invalid iteration settings.
/// - [`GraphError::Convergence`] as for [`pagerank`].
#[instrument(
    skip(graph, personalization, config),
    fields(vertices = graph.num_vertices(), seeds = personalization.len())
)]
pub fn personalized_pagerank(
    graph: &Graph,
    personalization: &HashMap<VertexId, f64>,
    config: &PageRankConfig,
) -> Result<IterativeScores> {
    config.validate("personalized pagerank")?;

    let mut teleport = vec![0.0_f64; graph.num_vertices()];
    for (id, &value) in personalization {
        if !value.is_finite() || value < 0.0 {
            return Err(GraphError::invalid(format!(
                "personalization for {id} must be finite and non-negative, got {value}"
            )));
        }
        teleport[graph.vertex_index(id)?] += value;
    }

    let total: f64 = teleport.iter().sum();
    if total <= 0.0 {
        return Err(GraphError::invalid(
            "personalization vector must have a positive sum",
        ));
    }
    for t in &mut teleport {
        *t /= total;
    }

    power_iterate(graph, Some(&teleport), config, "personalized pagerank")
}

// ---------------------------------------------------------------------------
// Power iteration
// ---------------------------------------------------------------------------

#[allow(clippy::cast_precision_loss)]
fn power_iterate(
    graph: &Graph,
    teleport: Option<&[f64]>,
    config: &PageRankConfig,
    algorithm: &'static str,
) -> Result<IterativeScores> {
    let n = graph.num_vertices();
    let n_f64 = n as f64;
    let d = config.damping;
    let uniform = 1.0 / n_f64;

    // 1 / out_degree, or 0 for dangling vertices.
    let inv_out: Vec<f64> = (0..n)
        .map(|u| match graph.out_degree(u) {
            0 => 0.0,
            k => 1.0 / k as f64,
        })
        .collect();
    let dangling: Vec<usize> = (0..n).filter(|&u| graph.out_degree(u) == 0).collect();

    let mut ranks = vec![uniform; n];
    let mut next = vec![0.0_f64; n];
    let mut delta = f64::INFINITY;

    for iteration in 1..=config.max_iter {
        let dangling_mass: f64 = dangling.iter().map(|&u| ranks[u]).sum();
        // Teleport plus redistributed dangling rank, per unit of `t(v)`.
        let spread = d.mul_add(dangling_mass, 1.0 - d);

        next.par_iter_mut().enumerate().for_each(|(v, out)| {
            let t = teleport.map_or(uniform, |p| p[v]);
            let pulled: f64 = graph.in_neighbors(v).map(|(u, _)| ranks[u] * inv_out[u]).sum();
            *out = spread.mul_add(t, d * pulled);
        });

        delta = ranks.iter().zip(&next).map(|(old, new)| (old - new).abs()).sum();

        std::mem::swap(&mut ranks, &mut next);

        if delta < config.tol {
            debug!(iteration, delta, "{algorithm} converged");
            return Ok(IterativeScores {
                scores: score_map(graph, &ranks),
                iterations: iteration,
                delta,
            });
        }
    }

    warn!(
        max_iter = config.max_iter,
        delta,
        tol = config.tol,
        "{algorithm} did not converge"
    );
    Err(GraphError::Convergence {
        algorithm,
        iterations: config.max_iter,
        last_delta: delta,
        tolerance: config.tol,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use skein_core::edges;

    fn id(s: &str) -> VertexId {
        VertexId::from(s)
    }

    fn total(result: &IterativeScores) -> f64 {
        result.scores.values().sum()
    }

    #[test]
    fn chain_with_dangling_sink() {
        // a -> b -> c: c is dangling, its mass is spread uniformly.
        let g = Graph::build(&edges([("a", "b"), ("b", "c")]), true).expect("build");
        let pr = pagerank(&g, &PageRankConfig::default()).expect("pagerank");

        assert!((total(&pr) - 1.0).abs() < 1e-6);
        let s = &pr.scores;
        assert!(s[&id("a")] < s[&id("b")]);
        assert!(s[&id("b")] < s[&id("c")]);
    }

    #[test]
    fn symmetric_pair_stays_uniform() {
        let g = Graph::build(&edges([("a", "b")]), false).expect("build");
        let pr = pagerank(&g, &PageRankConfig::default()).expect("pagerank");
        assert!((pr.scores[&id("a")] - 0.5).abs() < 1e-9);
        assert_eq!(pr.iterations, 1);
    }

    #[test]
    fn zero_damping_is_pure_teleport() {
        let g = Graph::build(&edges([("a", "b"), ("a", "c")]), true).expect("build");
        let cfg = PageRankConfig {
            damping: 0.0,
            ..PageRankConfig::default()
        };
        let pr = pagerank(&g, &cfg).expect("pagerank");
        for score in pr.scores.values() {
            assert!((score - 1.0 / 3.0).abs() < 1e-12);
        }
    }

    #[test]
    fn invalid_damping_is_rejected() {
        let g = Graph::build(&edges([("a", "b")]), true).expect("build");
        let cfg = PageRankConfig {
            damping: 1.5,
            ..PageRankConfig::default()
        };
        assert!(matches!(
            pagerank(&g, &cfg),
            Err(GraphError::InvalidInput { .. })
        ));
    }

    #[test]
    fn one_iteration_is_not_enough_for_a_chain() {
        let g = Graph::build(&edges([("a", "b"), ("b", "c")]), true).expect("build");
        let cfg = PageRankConfig {
            max_iter: 1,
            tol: 1e-12,
            ..PageRankConfig::default()
        };
        let err = pagerank(&g, &cfg).expect_err("no convergence");
        match err {
            GraphError::Convergence {
                algorithm,
                iterations,
                last_delta,
                ..
            } => {
                assert_eq!(algorithm, "pagerank");
                assert_eq!(iterations, 1);
                assert!(last_delta > 1e-12);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn personalization_pulls_mass_towards_seed() {
        // Undirected path a - b - c - d.
        let g = Graph::build(&edges([("a", "b"), ("b", "c"), ("c", "d")]), false).expect("build");
        let seeds = HashMap::from([(id("a"), 1.0)]);
        let ppr = personalized_pagerank(&g, &seeds, &PageRankConfig::default()).expect("ppr");

        assert!((total(&ppr) - 1.0).abs() < 1e-6);
        let s = &ppr.scores;
        assert!(s[&id("a")] > s[&id("c")]);
        assert!(s[&id("b")] > s[&id("d")]);
    }

    #[test]
    fn personalization_is_normalized() {
        let g = Graph::build(&edges([("a", "b"), ("b", "a")]), true).expect("build");
        let small = HashMap::from([(id("a"), 1.0), (id("b"), 1.0)]);
        let large = HashMap::from([(id("a"), 50.0), (id("b"), 50.0)]);
        let cfg = PageRankConfig::default();
        let x = personalized_pagerank(&g, &small, &cfg).expect("ppr");
        let y = personalized_pagerank(&g, &large, &cfg).expect("ppr");
        for (k, v) in &x.scores {
            assert!((y.scores[k] - v).abs() < 1e-12);
        }
    }

    #[test]
    fn personalization_errors() {
        let g = Graph::build(&edges([("a", "b")]), true).expect("build");
        let cfg = PageRankConfig::default();

        let unknown = HashMap::from([(id("zzz"), 1.0)]);
        assert_eq!(
            personalized_pagerank(&g, &unknown, &cfg),
            Err(GraphError::UnknownVertex { id: id("zzz") })
        );

        let negative = HashMap::from([(id("a"), -1.0)]);
        assert!(matches!(
            personalized_pagerank(&g, &negative, &cfg),
            Err(GraphError::InvalidInput { .. })
        ));

        let zero = HashMap::from([(id("a"), 0.0)]);
        assert!(matches!(
            personalized_pagerank(&g, &zero, &cfg),
            Err(GraphError::InvalidInput { .. })
        ));
    }
}

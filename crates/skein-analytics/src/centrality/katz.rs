//! Katz centrality.
//!
//! # Algorithm
//!
//! Synchronous fixed-point iteration over in-edges:
//!
//! ```text
//! x'(v) = alpha * Σ x(u) + beta   for each u → v
//! ```
//!
//! starting from `x = beta` and stopping once the largest absolute change
//! across vertices drops below `tol`. Each iteration reads only the previous
//! iteration's vector (double buffering), so vertices update in parallel.
//!
//! The series converges only when `alpha < 1 / λ_max`. With no explicit
//! `alpha`, the default is `1 / (2 * max_in_degree)`. `λ_max` never exceeds
//! the maximum in-degree, so the change shrinks at least by half each
//! iteration and the default tolerance is met in about 20 iterations even on
//! dense regular graphs, where `λ_max` equals the maximum in-degree.
//!
//! Scores count edge multiplicity; edge weights are not used.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use skein_core::{Graph, GraphError, Result};

use super::{IterativeScores, check_iteration_limits, score_map};

/// Configuration for [`katz_centrality`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KatzConfig {
    /// Attenuation factor. `None` picks `1 / (2 * max_in_degree)`.
    /// Default: None.
    #[serde(default)]
    pub alpha: Option<f64>,
    /// Constant added to every vertex each iteration.
    /// Default: 1.0.
    #[serde(default = "default_beta")]
    pub beta: f64,
    /// Default: 100.
    #[serde(default = "default_max_iter")]
    pub max_iter: usize,
    /// Stop when the max absolute change is below this.
    /// Default: 1e-6.
    #[serde(default = "default_tol")]
    pub tol: f64,
    /// Scale the result to unit L2 norm.
    /// Default: false.
    #[serde(default)]
    pub normalized: bool,
}

impl Default for KatzConfig {
    fn default() -> Self {
        Self {
            alpha: None,
            beta: default_beta(),
            max_iter: default_max_iter(),
            tol: default_tol(),
            normalized: false,
        }
    }
}

const fn default_beta() -> f64 {
    1.0
}

const fn default_max_iter() -> usize {
    100
}

const fn default_tol() -> f64 {
    1e-6
}

impl KatzConfig {
    /// The attenuation factor that will be used on `graph`.
    ///
    /// An explicit `alpha` is returned as is; otherwise half the reciprocal
    /// of the largest in-degree (treated as at least 1).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn effective_alpha(&self, graph: &Graph) -> f64 {
        self.alpha.unwrap_or_else(|| {
            let max_in = (0..graph.num_vertices())
                .map(|v| graph.in_degree(v))
                .max()
                .unwrap_or(0)
                .max(1);
            1.0 / (2 * max_in) as f64
        })
    }
}

/// Compute Katz centrality for every vertex.
///
/// # Errors
///
/// - [`GraphError::InvalidInput`] for a non-positive or non-finite `alpha`,
///   a negative or non-finite `beta`, `max_iter == 0`, or a non-positive
///   `tol`.
/// - [`GraphError::Convergence`] if the tolerance is not met within
///   `max_iter` iterations or the scores stop being finite.
#[instrument(skip(graph, config), fields(vertices = graph.num_vertices()))]
pub fn katz_centrality(graph: &Graph, config: &KatzConfig) -> Result<IterativeScores> {
    check_iteration_limits("katz", config.max_iter, config.tol)?;
    let alpha = config.effective_alpha(graph);
    if !alpha.is_finite() || alpha <= 0.0 {
        return Err(GraphError::invalid(format!(
            "katz alpha must be a positive finite number, got {alpha}"
        )));
    }
    if !config.beta.is_finite() || config.beta < 0.0 {
        return Err(GraphError::invalid(format!(
            "katz beta must be finite and non-negative, got {}",
            config.beta
        )));
    }

    let n = graph.num_vertices();
    let beta = config.beta;
    let mut x = vec![beta; n];
    let mut next = vec![0.0_f64; n];
    let mut delta = f64::INFINITY;

    for iteration in 1..=config.max_iter {
        next.par_iter_mut().enumerate().for_each(|(v, out)| {
            let incoming: f64 = graph.in_neighbors(v).map(|(u, _)| x[u]).sum();
            *out = alpha.mul_add(incoming, beta);
        });

        delta = x
            .iter()
            .zip(&next)
            .map(|(old, new)| (old - new).abs())
            .fold(0.0, f64::max);

        std::mem::swap(&mut x, &mut next);

        if !delta.is_finite() || x.iter().any(|s| !s.is_finite()) {
            break;
        }
        if delta < config.tol {
            if config.normalized {
                normalize_l2(&mut x);
            }
            debug!(iteration, delta, alpha, "katz converged");
            return Ok(IterativeScores {
                scores: score_map(graph, &x),
                iterations: iteration,
                delta,
            });
        }
    }

    warn!(
        max_iter = config.max_iter,
        delta,
        tol = config.tol,
        alpha,
        "katz did not converge"
    );
    Err(GraphError::Convergence {
        algorithm: "katz",
        iterations: config.max_iter,
        last_delta: delta,
        tolerance: config.tol,
    })
}

fn normalize_l2(x: &mut [f64]) {
    let norm = x.iter().map(|s| s * s).sum::<f64>().sqrt();
    if norm > 0.0 {
        for s in x {
            *s /= norm;
        }
    }
}

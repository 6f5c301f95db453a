//! Centrality metrics over a [`Graph`].
//!
//! # Overview
//!
//! Each metric answers a different question about vertex importance:
//!
//! - **Degree** (`degree`): how many edges touch this vertex?
//! - **Betweenness** (`betweenness`): which vertices sit on the most
//!   shortest paths between other pairs?
//! - **Katz** (`katz`): which vertices are reachable along many attenuated
//!   walks?
//! - **PageRank** (`pagerank`): where does a damped random surfer spend its
//!   time? Also available with a personalized teleport vector.
//!
//! # Usage
//!
//! Every metric takes a `&Graph` and an explicit config, and returns scores
//! keyed by external vertex ID. The key set is always exactly the graph's
//! vertex set.
//!
//! ```
//! use skein_analytics::centrality::{PageRankConfig, pagerank};
//! use skein_core::{Graph, edges};
//!
//! let g = Graph::build(&edges([(0, 1), (1, 2), (2, 0)]), true).unwrap();
//! let pr = pagerank(&g, &PageRankConfig::default()).unwrap();
//! assert!((pr.scores.values().sum::<f64>() - 1.0).abs() < 1e-6);
//! ```

pub mod betweenness;
pub mod degree;
pub mod katz;
pub mod pagerank;

pub use betweenness::{BetweennessConfig, betweenness_centrality};
pub use degree::{DegreeCentrality, DegreeConfig, degree_breakdown, degree_centrality};
pub use katz::{KatzConfig, katz_centrality};
pub use pagerank::{PageRankConfig, pagerank, personalized_pagerank};

use skein_core::{Graph, GraphError, Result, ScoreMap};

/// Scores from an iterative solver, with its convergence record.
#[derive(Debug, Clone, PartialEq)]
pub struct IterativeScores {
    pub scores: ScoreMap,
    /// Iterations performed, including the one that met the tolerance.
    pub iterations: usize,
    /// Change measured on the final iteration.
    pub delta: f64,
}

/// Key a dense per-index vector by external ID.
pub(crate) fn score_map(graph: &Graph, dense: &[f64]) -> ScoreMap {
    graph
        .vertex_ids()
        .iter()
        .cloned()
        .zip(dense.iter().copied())
        .collect()
}

/// Shared validation for iterative solver settings.
pub(crate) fn check_iteration_limits(algorithm: &str, max_iter: usize, tol: f64) -> Result<()> {
    if max_iter == 0 {
        return Err(GraphError::invalid(format!(
            "{algorithm} max_iter must be positive"
        )));
    }
    if !tol.is_finite() || tol <= 0.0 {
        return Err(GraphError::invalid(format!(
            "{algorithm} tolerance must be a positive finite number, got {tol}"
        )));
    }
    Ok(())
}

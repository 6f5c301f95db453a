//! All four centralities side by side.
//!
//! The metrics only borrow the graph, so they run concurrently on rayon's
//! pool. [`CentralityReport::rows`] gives a per-vertex comparison table and
//! [`top_k`] picks out the leaders of any one score map.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use skein_core::{Graph, Result, ScoreMap, VertexId};

use crate::centrality::{
    BetweennessConfig, DegreeConfig, IterativeScores, KatzConfig, PageRankConfig,
    betweenness_centrality, degree_centrality, katz_centrality, pagerank,
};

/// Per-metric settings for [`centrality_report`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CentralityConfig {
    #[serde(default)]
    pub degree: DegreeConfig,
    #[serde(default)]
    pub betweenness: BetweennessConfig,
    #[serde(default)]
    pub katz: KatzConfig,
    #[serde(default)]
    pub pagerank: PageRankConfig,
}

/// Scores from every centrality metric on one graph.
#[derive(Debug, Clone, PartialEq)]
pub struct CentralityReport {
    pub degree: ScoreMap,
    pub betweenness: ScoreMap,
    pub katz: IterativeScores,
    pub pagerank: IterativeScores,
}

/// One vertex's scores across all metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CentralityRow {
    pub id: VertexId,
    pub degree: f64,
    pub betweenness: f64,
    pub katz: f64,
    pub pagerank: f64,
}

impl CentralityReport {
    /// One row per vertex, sorted by ID.
    #[must_use]
    pub fn rows(&self) -> Vec<CentralityRow> {
        let mut ids: Vec<&VertexId> = self.degree.keys().collect();
        ids.sort_unstable();

        ids.into_iter()
            .map(|id| CentralityRow {
                id: id.clone(),
                degree: self.degree.get(id).copied().unwrap_or_default(),
                betweenness: self.betweenness.get(id).copied().unwrap_or_default(),
                katz: self.katz.scores.get(id).copied().unwrap_or_default(),
                pagerank: self.pagerank.scores.get(id).copied().unwrap_or_default(),
            })
            .collect()
    }
}

/// Compute degree, betweenness, Katz and PageRank concurrently.
///
/// # Errors
///
/// Returns the first error from any metric, checked in the order
/// betweenness, Katz, PageRank.
#[instrument(skip(graph, config), fields(vertices = graph.num_vertices()))]
pub fn centrality_report(graph: &Graph, config: &CentralityConfig) -> Result<CentralityReport> {
    let ((degree, betweenness), (katz, pagerank)) = rayon::join(
        || {
            rayon::join(
                || degree_centrality(graph, &config.degree),
                || betweenness_centrality(graph, &config.betweenness),
            )
        },
        || {
            rayon::join(
                || katz_centrality(graph, &config.katz),
                || pagerank(graph, &config.pagerank),
            )
        },
    );

    let report = CentralityReport {
        degree,
        betweenness: betweenness?,
        katz: katz?,
        pagerank: pagerank?,
    };
    debug!(
        katz_iterations = report.katz.iterations,
        pagerank_iterations = report.pagerank.iterations,
        "centrality report complete"
    );
    Ok(report)
}

/// The `k` highest-scoring vertices, best first. Ties go to the smaller ID.
#[must_use]
pub fn top_k(scores: &ScoreMap, k: usize) -> Vec<(VertexId, f64)> {
    let mut ranked: Vec<(&VertexId, f64)> = scores.iter().map(|(id, &s)| (id, s)).collect();
    ranked.sort_unstable_by(|a, b| match b.1.total_cmp(&a.1) {
        Ordering::Equal => a.0.cmp(b.0),
        other => other,
    });
    ranked
        .into_iter()
        .take(k)
        .map(|(id, s)| (id.clone(), s))
        .collect()
}

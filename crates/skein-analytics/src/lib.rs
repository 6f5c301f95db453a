#![forbid(unsafe_code)]
//! skein-analytics: random walks and centrality over a [`skein_core::Graph`].
//!
//! # Modules
//!
//! - [`walk`]: seeded random walks with a per-seed offset table.
//! - [`centrality`]: degree, Brandes betweenness, Katz, PageRank, and
//!   personalized PageRank.
//! - [`report`]: every centrality at once, plus a top-k helper.
//! - [`config`]: TOML settings for all of the above.
//!
//! # Conventions
//!
//! - **Errors**: algorithms return [`skein_core::Result`]; config loading
//!   returns [`anyhow::Result`] with file context.
//! - **Parallelism**: rayon's global pool. Results never depend on thread
//!   count beyond floating-point summation order.
//! - **Logging**: `tracing` spans on every entry point; no subscriber is
//!   installed here.

pub mod centrality;
pub mod config;
pub mod report;
pub mod walk;

pub use centrality::{
    BetweennessConfig, DegreeCentrality, DegreeConfig, IterativeScores, KatzConfig,
    PageRankConfig, betweenness_centrality, degree_breakdown, degree_centrality, katz_centrality,
    pagerank, personalized_pagerank,
};
pub use config::{AnalyticsConfig, load_config, resolve_config};
pub use report::{CentralityConfig, CentralityReport, CentralityRow, centrality_report, top_k};
pub use walk::{RandomWalks, WalkConfig, WalkEdge, random_walks};

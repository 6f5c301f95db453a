//! TOML configuration for graph construction, walks, and centrality.
//!
//! Every section and field is optional; anything left out takes the same
//! default as the corresponding `Default` impl.
//!
//! ```toml
//! [graph]
//! directed = false
//!
//! [walk]
//! max_depth = 5
//!
//! [pagerank]
//! damping = 0.9
//! ```

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use skein_core::{EdgeRecord, Graph, GraphOptions};

use crate::centrality::{BetweennessConfig, DegreeConfig, KatzConfig, PageRankConfig};
use crate::report::CentralityConfig;
use crate::walk::WalkConfig;

/// Environment variable naming a config file for [`resolve_config`].
pub const CONFIG_ENV_VAR: &str = "SKEIN_CONFIG";

/// Settings for every analytics entry point.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    #[serde(default)]
    pub graph: GraphOptions,
    #[serde(default)]
    pub walk: WalkConfig,
    #[serde(default)]
    pub degree: DegreeConfig,
    #[serde(default)]
    pub betweenness: BetweennessConfig,
    #[serde(default)]
    pub katz: KatzConfig,
    #[serde(default)]
    pub pagerank: PageRankConfig,
}

impl AnalyticsConfig {
    /// Parse from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML or a field has the
    /// wrong type.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse analytics config")
    }

    /// The centrality sections as a [`CentralityConfig`].
    #[must_use]
    pub fn centrality(&self) -> CentralityConfig {
        CentralityConfig {
            degree: self.degree.clone(),
            betweenness: self.betweenness.clone(),
            katz: self.katz.clone(),
            pagerank: self.pagerank.clone(),
        }
    }

    /// Build a graph from `edges` using the `[graph]` section.
    ///
    /// # Errors
    ///
    /// Propagates [`skein_core::GraphError`] from graph construction.
    pub fn build_graph(&self, edges: &[EdgeRecord]) -> skein_core::Result<Graph> {
        Graph::build_with(edges, &self.graph)
    }
}

/// Load a config file. A missing file yields the defaults.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config(path: &Path) -> Result<AnalyticsConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "no config file, using defaults");
        return Ok(AnalyticsConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<AnalyticsConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Load the effective config: an explicit path wins, then `SKEIN_CONFIG`,
/// then the defaults.
///
/// # Errors
///
/// Returns an error if the chosen file exists but cannot be read or parsed.
pub fn resolve_config(explicit: Option<&Path>) -> Result<AnalyticsConfig> {
    match config_path(explicit, env::var_os(CONFIG_ENV_VAR)) {
        Some(path) => load_config(&path),
        None => Ok(AnalyticsConfig::default()),
    }
}

fn config_path(explicit: Option<&Path>, env_value: Option<OsString>) -> Option<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| env_value.filter(|v| !v.is_empty()).map(PathBuf::from))
}

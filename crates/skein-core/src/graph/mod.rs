//! Graph store.
//!
//! ## Pipeline
//!
//! ```text
//! &[EdgeRecord]
//!        ↓  build::Graph::build() / build_with()
//! Graph  (RenumberIndex + out-edge CSR + in-edge CSC)
//!        ↓  stats::GraphStats::from_graph()
//! GraphStats (density, dangling count, component count, …)
//! ```
//!
//! ## Typical Usage
//!
//! ```rust
//! use skein_core::graph::{Graph, GraphStats};
//! use skein_core::id::edges;
//!
//! let g = Graph::build(&edges([(0, 1), (1, 2), (2, 0)]), true)?;
//! let stats = GraphStats::from_graph(&g);
//! assert_eq!(stats.vertex_count, 3);
//! assert_eq!(stats.dangling_count, 0);
//! # Ok::<(), skein_core::GraphError>(())
//! ```

pub mod build;
pub mod csr;
pub mod stats;

pub use build::{Graph, GraphOptions};
pub use csr::Csr;
pub use stats::{GraphStats, weakly_connected_components};

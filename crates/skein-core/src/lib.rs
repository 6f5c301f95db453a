#![forbid(unsafe_code)]
//! skein-core: vertex renumbering, CSR graph store, and the error taxonomy.
//!
//! # Conventions
//!
//! - **Errors**: fallible operations return [`Result`] with a [`GraphError`].
//! - **Logging**: `tracing` macros; this crate never installs a subscriber.
//! - **Immutability**: a [`Graph`] never changes after construction and is
//!   `Send + Sync`, so any number of algorithms may borrow it at once.

pub mod error;
pub mod graph;
pub mod id;
pub mod renumber;

pub use error::{ErrorCode, GraphError, Result};
pub use graph::{Csr, Graph, GraphOptions, GraphStats, weakly_connected_components};
pub use id::{EdgeRecord, IdKind, VertexId, edges};
pub use renumber::RenumberIndex;

use std::collections::HashMap;

/// Scores keyed by external vertex ID. The key set is exactly the graph's
/// vertex set.
pub type ScoreMap = HashMap<VertexId, f64>;

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn graph_is_shareable_across_threads() {
        assert_send_sync::<Graph>();
        assert_send_sync::<GraphError>();
    }
}

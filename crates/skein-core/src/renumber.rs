//! Bidirectional mapping between external vertex IDs and dense indices.
//!
//! # Ordering
//!
//! Indices are assigned by first appearance while scanning the edge list
//! **interleaved**: edge 0's source, edge 0's destination, edge 1's source,
//! and so on. The same edge list therefore always yields the same numbering.
//!
//! # Type discipline
//!
//! A single index holds one [`IdKind`]. An edge list mixing integer and
//! string IDs is rejected instead of being coerced.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use tracing::{debug, instrument};

use crate::error::{GraphError, Result};
use crate::id::{EdgeRecord, IdKind, VertexId};

/// Dense renumbering of the vertices that appear in an edge list.
#[derive(Debug, Clone)]
pub struct RenumberIndex {
    to_internal: HashMap<VertexId, usize>,
    to_external: Vec<VertexId>,
    kind: IdKind,
}

impl RenumberIndex {
    /// Build the index from an edge list.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidInput`] if `edges` is empty or mixes
    /// integer and string IDs.
    #[instrument(skip(edges), fields(edges = edges.len()))]
    pub fn build(edges: &[EdgeRecord]) -> Result<Self> {
        let first = edges
            .first()
            .ok_or_else(|| GraphError::invalid("edge list is empty"))?;
        let kind = first.source.kind();

        let mut to_internal: HashMap<VertexId, usize> = HashMap::new();
        let mut to_external: Vec<VertexId> = Vec::new();

        for (pos, edge) in edges.iter().enumerate() {
            for id in [&edge.source, &edge.destination] {
                if id.kind() != kind {
                    return Err(GraphError::invalid(format!(
                        "edge {pos} uses {} vertex ID {id} \
                         but the edge list started with {kind} IDs",
                        id.kind()
                    )));
                }
                if let Entry::Vacant(slot) = to_internal.entry(id.clone()) {
                    slot.insert(to_external.len());
                    to_external.push(id.clone());
                }
            }
        }

        debug!(vertices = to_external.len(), %kind, "renumbered edge list");

        Ok(Self {
            to_internal,
            to_external,
            kind,
        })
    }

    /// Map an external ID to its internal index.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownVertex`] if `id` never appeared.
    pub fn translate_in(&self, id: &VertexId) -> Result<usize> {
        self.to_internal
            .get(id)
            .copied()
            .ok_or_else(|| GraphError::UnknownVertex { id: id.clone() })
    }

    /// Map an internal index back to its external ID.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::IndexOutOfRange`] if `index >= len()`.
    pub fn translate_out(&self, index: usize) -> Result<&VertexId> {
        self.to_external
            .get(index)
            .ok_or(GraphError::IndexOutOfRange {
                index,
                len: self.to_external.len(),
            })
    }

    /// Translate a batch of external IDs, failing on the first unknown one.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownVertex`] for the first unseen ID.
    pub fn translate_all(&self, ids: &[VertexId]) -> Result<Vec<usize>> {
        ids.iter().map(|id| self.translate_in(id)).collect()
    }

    #[must_use]
    pub fn contains(&self, id: &VertexId) -> bool {
        self.to_internal.contains_key(id)
    }

    /// Number of distinct vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.to_external.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.to_external.is_empty()
    }

    /// The ID kind shared by every vertex.
    #[must_use]
    pub const fn kind(&self) -> IdKind {
        self.kind
    }

    /// External IDs in internal-index order.
    #[must_use]
    pub fn ids(&self) -> &[VertexId] {
        &self.to_external
    }
}

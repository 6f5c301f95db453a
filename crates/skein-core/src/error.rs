//! Error taxonomy shared by every skein crate.
//!
//! Every public operation either returns a complete result or one of the
//! [`GraphError`] variants below. Each variant maps to a stable
//! [`ErrorCode`] so callers can branch on the kind without matching on
//! message text.

use std::fmt;

use crate::id::VertexId;

/// Convenience alias used throughout skein.
pub type Result<T> = std::result::Result<T, GraphError>;

/// Errors produced while building or analysing a graph.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphError {
    /// Malformed or empty edge list, invalid weight, or invalid configuration.
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// Human-readable description, including the offending edge or field.
        reason: String,
    },

    /// A seed or lookup ID that does not appear in the graph.
    #[error("unknown vertex: {id}")]
    UnknownVertex {
        /// The external ID that was not found.
        id: VertexId,
    },

    /// An internal index outside `[0, N)`. Indicates a caller bug.
    #[error("internal index {index} out of range for {len} vertices")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Number of vertices in the graph.
        len: usize,
    },

    /// An iterative algorithm ran out of iterations before reaching tolerance.
    #[error(
        "{algorithm} did not converge after {iterations} iterations \
         (last delta {last_delta:e}, tolerance {tolerance:e})"
    )]
    Convergence {
        /// Algorithm name (`"pagerank"`, `"katz"`, ...).
        algorithm: &'static str,
        /// Iterations performed.
        iterations: usize,
        /// Change measured on the final iteration.
        last_delta: f64,
        /// Tolerance that was requested.
        tolerance: f64,
    },
}

impl GraphError {
    /// Build an [`GraphError::InvalidInput`] from anything displayable.
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Machine-readable code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidInput { .. } => ErrorCode::InvalidInput,
            Self::UnknownVertex { .. } => ErrorCode::UnknownVertex,
            Self::IndexOutOfRange { .. } => ErrorCode::IndexOutOfRange,
            Self::Convergence { .. } => ErrorCode::Convergence,
        }
    }

    /// Whether a caller can reasonably retry with different parameters.
    ///
    /// Only convergence failures are recoverable; the rest need a different
    /// input or indicate a bug.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Convergence { .. })
    }
}

/// Stable error codes, one per [`GraphError`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    InvalidInput,
    UnknownVertex,
    IndexOutOfRange,
    Convergence,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::InvalidInput => "E1001",
            Self::UnknownVertex => "E2001",
            Self::IndexOutOfRange => "E9001",
            Self::Convergence => "E3001",
        }
    }

    /// Short human-facing summary for logs.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::InvalidInput => "Invalid edge list or configuration",
            Self::UnknownVertex => "Vertex not present in graph",
            Self::IndexOutOfRange => "Internal vertex index out of range",
            Self::Convergence => "Iterative algorithm did not converge",
        }
    }

    /// Optional remediation hint.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::InvalidInput => {
                Some("Check for an empty edge list, mixed ID types, or bad weights.")
            }
            Self::UnknownVertex => {
                Some("Only IDs that appear in the edge list can be used as seeds.")
            }
            Self::IndexOutOfRange => Some("Internal indices must come from the graph's own index."),
            Self::Convergence => Some("Raise max_iter or relax tol, or lower alpha/damping."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

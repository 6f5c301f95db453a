//! External vertex identifiers and edge records.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An external vertex identifier.
///
/// The supported domain is closed: signed integers or strings. Ordering puts
/// every integer before every string so sorted output is deterministic even
/// though a single graph never mixes the two.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VertexId {
    Int(i64),
    Str(String),
}

/// Which [`VertexId`] variant a graph uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdKind {
    Int,
    Str,
}

impl VertexId {
    #[must_use]
    pub const fn kind(&self) -> IdKind {
        match self {
            Self::Int(_) => IdKind::Int,
            Self::Str(_) => IdKind::Str,
        }
    }

    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            Self::Str(_) => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Int(_) => None,
            Self::Str(s) => Some(s),
        }
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

impl fmt::Display for IdKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int => f.write_str("integer"),
            Self::Str => f.write_str("string"),
        }
    }
}

impl From<i64> for VertexId {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for VertexId {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<u32> for VertexId {
    fn from(v: u32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<&str> for VertexId {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for VertexId {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

/// One row of the input edge list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub source: VertexId,
    pub destination: VertexId,
    /// Optional edge weight. Missing weights default to 1.0 when the graph
    /// is built as weighted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

impl EdgeRecord {
    /// An unweighted edge.
    pub fn new(source: impl Into<VertexId>, destination: impl Into<VertexId>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            weight: None,
        }
    }

    /// An edge with an explicit weight.
    pub fn weighted(
        source: impl Into<VertexId>,
        destination: impl Into<VertexId>,
        weight: f64,
    ) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            weight: Some(weight),
        }
    }

    #[must_use]
    pub fn is_self_loop(&self) -> bool {
        self.source == self.destination
    }
}

impl<S: Into<VertexId>, D: Into<VertexId>> From<(S, D)> for EdgeRecord {
    fn from((source, destination): (S, D)) -> Self {
        Self::new(source, destination)
    }
}

impl<S: Into<VertexId>, D: Into<VertexId>> From<(S, D, f64)> for EdgeRecord {
    fn from((source, destination, weight): (S, D, f64)) -> Self {
        Self::weighted(source, destination, weight)
    }
}

/// Build an edge list from anything convertible to [`EdgeRecord`].
///
/// ```
/// use skein_core::id::edges;
/// let list = edges([(0, 1), (1, 2)]);
/// assert_eq!(list.len(), 2);
/// ```
pub fn edges<E: Into<EdgeRecord>>(items: impl IntoIterator<Item = E>) -> Vec<EdgeRecord> {
    items.into_iter().map(Into::into).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_sort_before_strings() {
        let mut ids = vec![
            VertexId::from("b"),
            VertexId::from(10),
            VertexId::from("a"),
            VertexId::from(-3),
        ];
        ids.sort();
        assert_eq!(
            ids,
            vec![
                VertexId::Int(-3),
                VertexId::Int(10),
                VertexId::from("a"),
                VertexId::from("b"),
            ]
        );
    }

    #[test]
    fn display_is_the_raw_value() {
        assert_eq!(VertexId::from(42).to_string(), "42");
        assert_eq!(VertexId::from("node-7").to_string(), "node-7");
        assert_eq!(IdKind::Str.to_string(), "string");
    }

    #[test]
    fn tuple_conversions() {
        let e: EdgeRecord = ("a", "b").into();
        assert_eq!(e.weight, None);
        let w: EdgeRecord = (1, 2, 0.5).into();
        assert_eq!(w.weight, Some(0.5));
        assert!(!w.is_self_loop());
        assert!(EdgeRecord::new(3, 3).is_self_loop());
    }

    #[test]
    fn untagged_serde_accepts_numbers_and_strings() {
        #[derive(Deserialize)]
        struct Wrapper {
            ids: Vec<VertexId>,
        }
        let parsed: Wrapper = toml::from_str(r#"ids = [1, "x", 3]"#).expect("parse ids");
        assert_eq!(
            parsed.ids,
            vec![VertexId::Int(1), VertexId::from("x"), VertexId::Int(3)]
        );
    }
}

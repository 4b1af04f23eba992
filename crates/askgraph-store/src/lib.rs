//! Askgraph Store: graph database access layer
//!
//! Everything above this crate talks to the graph through the [`GraphStore`]
//! trait, so backends can be swapped without touching pipeline logic:
//!
//! - [`neo4j::Neo4jHttpStore`] — production backend over the Neo4j HTTP
//!   transaction API.
//! - [`scripted::ScriptedStore`] — in-memory double for tests.
//!
//! A `run` call is one scoped unit of work: the backend opens a session (an
//! auto-commit transaction for Neo4j), executes the statement, materializes
//! every record into a plain [`Record`], and releases the session on all exit
//! paths before returning.

pub mod neo4j;
pub mod scripted;

use serde_json::Value;
use std::collections::BTreeMap;

pub use neo4j::{Neo4jConfig, Neo4jHttpStore};
pub use scripted::ScriptedStore;

/// One result row: column name → value.
///
/// Values keep the store's JSON shape (scalars, lists, maps); nothing is
/// coerced here.
pub type Record = BTreeMap<String, Value>;

/// Build a [`Record`] from `(column, value)` pairs. Test and fixture helper.
pub fn record<I, K>(pairs: I) -> Record
where
    I: IntoIterator<Item = (K, Value)>,
    K: Into<String>,
{
    pairs.into_iter().map(|(k, v)| (k.into(), v)).collect()
}

/// Errors surfaced by a graph store backend.
///
/// The two variants matter to callers in different ways: `Connection` is
/// fatal for the current request and must propagate, while `Query` is
/// recoverable (the statement was bad, the store is fine).
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    /// The store could not be reached or refused the session.
    #[error("graph store connection error: {0}")]
    Connection(String),
    /// The store rejected the statement (syntax error, unknown property,
    /// type mismatch).
    #[error("query failed: {0}")]
    Query(String),
}

impl StoreError {
    /// True for errors raised by the statement itself rather than the
    /// transport.
    pub fn is_query_failure(&self) -> bool {
        matches!(self, StoreError::Query(_))
    }
}

/// Capability interface over a graph database.
#[async_trait::async_trait]
pub trait GraphStore: Send + Sync {
    /// Run one Cypher statement in its own scoped session and return the
    /// fully materialized rows. An empty result is `Ok(vec![])`, not an
    /// error.
    async fn run(&self, query: &str) -> Result<Vec<Record>, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_builder_keeps_columns() {
        let row = record([("name", json!("Acme")), ("count", json!(3))]);
        assert_eq!(row["name"], json!("Acme"));
        assert_eq!(row["count"], json!(3));
    }

    #[test]
    fn query_failures_are_distinguishable() {
        assert!(StoreError::Query("bad syntax".into()).is_query_failure());
        assert!(!StoreError::Connection("refused".into()).is_query_failure());
    }
}

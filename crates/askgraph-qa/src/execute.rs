//! Fail-soft query execution.
//!
//! A generated query carries no syntax guarantee, so the store rejecting it
//! is an expected outcome, not an exceptional one: it is logged with the
//! offending text and becomes [`Execution::Failed`], which the pipeline
//! treats as an empty result. Only connection-level failures propagate.

use askgraph_store::{GraphStore, Record, StoreError};
use serde::Serialize;

/// Outcome of running a synthesized query.
#[derive(Debug, Clone)]
pub enum Execution {
    /// The query ran; the row set may be empty.
    Rows(Vec<Record>),
    /// The store rejected the query. The message is diagnostic only and is
    /// never surfaced to the question-answering caller.
    Failed(String),
}

impl Execution {
    /// Rows for the answer path: a failed execution contributes none.
    pub fn into_rows(self) -> Vec<Record> {
        match self {
            Execution::Rows(rows) => rows,
            Execution::Failed(_) => Vec::new(),
        }
    }
}

/// Run a synthesized query, converting store rejection into
/// [`Execution::Failed`].
pub async fn execute(store: &dyn GraphStore, query: &str) -> Result<Execution, StoreError> {
    match store.run(query).await {
        Ok(rows) => Ok(Execution::Rows(rows)),
        Err(err) if err.is_query_failure() => {
            tracing::warn!(
                query = %query,
                error = %err,
                "generated query rejected by the store; continuing with empty result"
            );
            Ok(Execution::Failed(err.to_string()))
        }
        Err(err) => Err(err),
    }
}

/// Result of the raw pass-through path. Unlike the synthesized path, the
/// error text is intentionally returned to the caller for debugging.
#[derive(Debug, Clone, Serialize)]
pub struct RawQueryOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Vec<Record>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RawQueryOutcome {
    fn ok(rows: Vec<Record>) -> Self {
        Self {
            success: true,
            result: Some(rows),
            error: None,
        }
    }

    fn err(message: String) -> Self {
        Self {
            success: false,
            result: None,
            error: Some(message),
        }
    }
}

/// Execute caller-supplied query text directly, without synthesis. Every
/// failure, including connection loss, is reported in the outcome.
pub async fn run_raw(store: &dyn GraphStore, query: &str) -> RawQueryOutcome {
    match store.run(query).await {
        Ok(rows) => RawQueryOutcome::ok(rows),
        Err(err) => RawQueryOutcome::err(err.to_string()),
    }
}

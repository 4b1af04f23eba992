//! Askgraph QA: schema-aware query translation over a knowledge graph
//!
//! The pipeline turns a natural-language question into a Cypher query, runs
//! it, and summarizes the rows back into text:
//!
//! ```text
//! question ──► introspect ──► synthesize ──► execute ──► summarize ──► answer
//!                 │                │             │
//!              GraphStore    CompletionService  GraphStore
//! ```
//!
//! Design points:
//! - The schema snapshot is rebuilt on every question. Ingestion may have
//!   written moments earlier; staleness is not tolerated.
//! - Query execution is fail-soft: a bad generated query is logged and
//!   becomes an empty result, never an error to the caller.
//! - Free-text entity/relationship mentions are aligned with schema-exact
//!   spellings by best-effort lexical substitution ([`names`]), not by
//!   parsing Cypher.
//!
//! The externally exposed operations live on [`QaEngine`]:
//! `answer_question`, `run_raw_query`, `analytics`.

pub mod analytics;
pub mod answer;
pub mod engine;
pub mod execute;
pub mod names;
pub mod schema;
pub mod synthesize;

pub use analytics::AnalyticsReport;
pub use answer::NO_RESULTS_MESSAGE;
pub use engine::{QaConfig, QaEngine};
pub use execute::{Execution, RawQueryOutcome};
pub use names::{denormalize, normalize, replace_names_in_query};
pub use schema::{EntitySample, GraphSchema, SAMPLE_CAP};

use askgraph_llm::CompletionError;
use askgraph_store::StoreError;

/// Pipeline-level error: everything that is not handled fail-soft inside a
/// stage surfaces as one of these, carrying the message text and nothing
/// else of the partial request state.
#[derive(Debug, thiserror::Error)]
pub enum QaError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Completion(#[from] CompletionError),
}

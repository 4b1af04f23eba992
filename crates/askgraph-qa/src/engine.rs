//! Pipeline facade: the operations exposed to the boundary layer.
//!
//! One engine instance holds the store and completion collaborators for the
//! process lifetime; each question runs the stages strictly sequentially
//! and shares no mutable state with concurrent requests.

use crate::{analytics, answer, execute, schema, synthesize};
use crate::{AnalyticsReport, Execution, GraphSchema, QaError, RawQueryOutcome};
use askgraph_llm::CompletionService;
use askgraph_store::GraphStore;
use std::sync::Arc;

/// Tunables for the QA pipeline.
#[derive(Debug, Clone)]
pub struct QaConfig {
    /// Model identifier passed to the completion service for both the query
    /// and the answer call.
    pub model: String,
}

impl Default for QaConfig {
    fn default() -> Self {
        Self {
            model: "llama3.1".to_string(),
        }
    }
}

impl QaConfig {
    /// Load from `ASKGRAPH_MODEL`, falling back to the default model.
    pub fn from_env() -> Self {
        Self {
            model: std::env::var("ASKGRAPH_MODEL")
                .unwrap_or_else(|_| QaConfig::default().model),
        }
    }
}

/// Question-answering engine over a graph store and a completion service.
pub struct QaEngine {
    store: Arc<dyn GraphStore>,
    llm: Arc<dyn CompletionService>,
    config: QaConfig,
}

impl QaEngine {
    pub fn new(
        store: Arc<dyn GraphStore>,
        llm: Arc<dyn CompletionService>,
        config: QaConfig,
    ) -> Self {
        Self { store, llm, config }
    }

    /// Answer a natural-language question from the graph.
    ///
    /// introspect → synthesize → execute → summarize. A rejected query is
    /// absorbed by the executor and leads to the fixed no-results answer;
    /// store-connectivity and completion failures surface as [`QaError`].
    pub async fn answer_question(&self, question: &str) -> Result<String, QaError> {
        let snapshot = schema::introspect(self.store.as_ref()).await?;
        let query =
            synthesize::synthesize(question, &snapshot, self.llm.as_ref(), &self.config.model)
                .await?;
        tracing::debug!(query = %query, "synthesized cypher");

        let execution = execute::execute(self.store.as_ref(), &query).await?;
        if let Execution::Failed(reason) = &execution {
            tracing::debug!(reason = %reason, "answering from empty result");
        }
        let rows = execution.into_rows();

        let text = answer::summarize(question, &rows, self.llm.as_ref(), &self.config.model)
            .await?;
        Ok(text)
    }

    /// Execute caller-supplied Cypher directly (maintenance/debug path).
    pub async fn run_raw_query(&self, query: &str) -> RawQueryOutcome {
        execute::run_raw(self.store.as_ref(), query).await
    }

    /// Compute structural graph metrics.
    pub async fn analytics(&self) -> Result<AnalyticsReport, QaError> {
        Ok(analytics::compute(self.store.as_ref()).await?)
    }

    /// Introspect the current schema snapshot (operator affordance; the
    /// pipeline itself always builds a fresh one per question).
    pub async fn schema(&self) -> Result<GraphSchema, QaError> {
        Ok(schema::introspect(self.store.as_ref()).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NO_RESULTS_MESSAGE;
    use askgraph_llm::MockCompletion;
    use askgraph_store::{record, ScriptedStore};
    use serde_json::json;

    fn engine(store: ScriptedStore, llm: MockCompletion) -> QaEngine {
        QaEngine::new(Arc::new(store), Arc::new(llm), QaConfig::default())
    }

    #[tokio::test]
    async fn question_with_no_matching_rows_gets_fixed_message() {
        let store = ScriptedStore::new()
            .on("db.labels", vec![record([("label", json!("Person"))])]);
        let llm = MockCompletion::always("MATCH (n:Person) RETURN n.missing");

        let answer = engine(store, llm)
            .answer_question("Who is missing?")
            .await
            .unwrap();
        assert_eq!(answer, NO_RESULTS_MESSAGE);
    }

    #[tokio::test]
    async fn introspection_failure_is_fatal_for_the_request() {
        let store = ScriptedStore::new().on_connection_error("db.labels", "refused");
        let llm = MockCompletion::always("unused");

        let result = engine(store, llm).answer_question("anything").await;
        assert!(matches!(result, Err(QaError::Store(_))));
    }

    #[tokio::test]
    async fn raw_query_path_skips_synthesis() {
        let store = ScriptedStore::new().on("return 42", vec![record([("answer", json!(42))])]);
        let llm = MockCompletion::always("unused");
        let engine = engine(store, llm);

        let outcome = engine.run_raw_query("RETURN 42 AS answer").await;
        assert!(outcome.success);
        assert_eq!(outcome.result.unwrap()[0]["answer"], json!(42));
    }

    #[tokio::test]
    async fn config_default_model_is_used() {
        assert_eq!(QaConfig::default().model, "llama3.1");
    }
}

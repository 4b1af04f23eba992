//! Integration tests for the complete askgraph pipeline
//!
//! These tests verify end-to-end functionality across crates:
//! - introspect → synthesize → execute → summarize
//! - fail-soft behavior for rejected queries
//! - analytics over a scripted store
//!
//! Run with: cargo test --test integration_tests

use std::sync::Arc;

use askgraph_llm::MockCompletion;
use askgraph_qa::{QaConfig, QaEngine, NO_RESULTS_MESSAGE};
use askgraph_store::{record, ScriptedStore};
use serde_json::json;

// ============================================================================
// Fixtures
// ============================================================================

/// Store whose catalog holds `(Person {id:"Alice"})-[:WORKS_AT]->(Company {id:"Acme"})`.
fn workplace_store() -> ScriptedStore {
    ScriptedStore::new()
        .on(
            "db.labels",
            vec![
                record([("label", json!("Person"))]),
                record([("label", json!("Company"))]),
            ],
        )
        .on(
            "db.relationshiptypes",
            vec![record([("relationshipType", json!("WORKS_AT"))])],
        )
        .on(
            "(n:`Person`) unwind",
            vec![record([("property", json!("id"))])],
        )
        .on(
            "(n:`Person`) return id(n)",
            vec![record([("node_id", json!(1)), ("id", json!("Alice"))])],
        )
        .on(
            "(n:`Company`) unwind",
            vec![record([("property", json!("id"))])],
        )
        .on(
            "(n:`Company`) return id(n)",
            vec![record([("node_id", json!(2)), ("id", json!("Acme"))])],
        )
        .on("works_at", vec![record([("company", json!("Acme"))])])
}

fn engine(store: Arc<ScriptedStore>, llm: Arc<MockCompletion>) -> QaEngine {
    QaEngine::new(store, llm, QaConfig::default())
}

// ============================================================================
// Question answering (introspect → synthesize → execute → summarize)
// ============================================================================

#[tokio::test]
async fn answers_where_alice_works_from_the_graph() {
    let store = Arc::new(workplace_store());
    let llm = Arc::new(MockCompletion::new(vec![
        // First call: query synthesis.
        r#"MATCH (p:Person {id: "Alice"})-[:WORKS_AT]->(c:Company) RETURN c.id AS company"#
            .to_string(),
        // Second call: answer summarization.
        "Alice works at Acme.".to_string(),
    ]));

    let answer = engine(store.clone(), llm.clone())
        .answer_question("Where does Alice work?")
        .await
        .unwrap();

    assert_eq!(answer, "Alice works at Acme.");

    // The synthesis prompt was grounded in the live schema.
    let prompts = llm.prompts();
    assert_eq!(prompts.len(), 2);
    assert!(prompts[0].contains("Person, Company"));
    assert!(prompts[0].contains("WORKS_AT"));
    assert!(prompts[0].contains("`id`"));

    // The summarization prompt carried the query rows, not the graph.
    assert!(prompts[1].contains(r#"{"company":"Acme"}"#));
    assert!(prompts[1].contains("Where does Alice work?"));

    // The synthesized query was executed verbatim after sanitization.
    assert!(store
        .statements()
        .iter()
        .any(|s| s.contains(r#"(p:Person {id: "Alice"})"#)));
}

#[tokio::test]
async fn free_text_entity_mentions_are_aligned_before_execution() {
    let store = Arc::new(
        ScriptedStore::new()
            .on(
                "db.labels",
                vec![record([("label", json!("Artificial_Intelligence"))])],
            )
            .on(
                r#"{id: "Artificial_Intelligence"}"#,
                vec![record([("topic", json!("AI"))])],
            ),
    );
    let llm = Arc::new(MockCompletion::new(vec![
        "```cypher\nMATCH (n {id: \"artificial intelligence\"}) RETURN n.id AS topic\n```"
            .to_string(),
        "The graph covers Artificial_Intelligence.".to_string(),
    ]));

    let answer = engine(store.clone(), llm)
        .answer_question("What do you know about artificial intelligence?")
        .await
        .unwrap();

    assert!(answer.contains("Artificial_Intelligence"));
    assert!(store
        .statements()
        .iter()
        .any(|s| s.contains(r#"{id: "Artificial_Intelligence"}"#)));
}

#[tokio::test]
async fn invalid_generated_query_still_completes_with_no_results() {
    let store = Arc::new(
        workplace_store().on_query_error("retrn", "Neo.ClientError.Statement.SyntaxError"),
    );
    let llm = Arc::new(MockCompletion::always("RETRN everything"));

    let answer = engine(store, llm.clone())
        .answer_question("Where does Alice work?")
        .await
        .unwrap();

    assert_eq!(answer, NO_RESULTS_MESSAGE);
    // The empty result short-circuits: only the synthesis call happened.
    assert_eq!(llm.prompts().len(), 1);
}

#[tokio::test]
async fn legacy_entity_id_convention_is_patched_before_execution() {
    let store = Arc::new(workplace_store());
    let llm = Arc::new(MockCompletion::new(vec![
        r#"MATCH (p:Person {entity_id: "Alice"})-[:WORKS_AT]->(c) RETURN c.id AS company"#
            .to_string(),
        "Alice works at Acme.".to_string(),
    ]));

    engine(store.clone(), llm)
        .answer_question("Where does Alice work?")
        .await
        .unwrap();

    let statements = store.statements();
    let executed = statements
        .iter()
        .find(|s| s.contains(r#"{id: "Alice"}"#))
        .unwrap();
    assert!(executed.contains("WORKS_AT"));
    assert!(statements.iter().all(|s| !s.contains("entity_id")));
}

// ============================================================================
// Raw query path
// ============================================================================

#[tokio::test]
async fn raw_query_returns_rows_on_success_and_error_text_on_failure() {
    let store = Arc::new(
        ScriptedStore::new()
            .on("return 1", vec![record([("one", json!(1))])])
            .on_query_error("bogus", "SyntaxError at bogus"),
    );
    let llm = Arc::new(MockCompletion::always("unused"));
    let engine = engine(store, llm);

    let ok = engine.run_raw_query("RETURN 1 AS one").await;
    assert!(ok.success);
    assert_eq!(ok.result.unwrap()[0]["one"], json!(1));

    let failed = engine.run_raw_query("bogus statement").await;
    assert!(!failed.success);
    assert!(failed.error.unwrap().contains("SyntaxError"));
}

// ============================================================================
// Analytics
// ============================================================================

#[tokio::test]
async fn analytics_on_a_three_node_path() {
    use approx::assert_relative_eq;

    let store = Arc::new(
        ScriptedStore::new()
            .on("count(n)", vec![record([("total_nodes", json!(3))])])
            .on("count(r)", vec![record([("total_relationships", json!(2))])])
            .on(
                "return id(n)",
                vec![
                    record([("node_id", json!(1))]),
                    record([("node_id", json!(2))]),
                    record([("node_id", json!(3))]),
                ],
            )
            .on(
                "id(a) as source",
                vec![
                    record([("source", json!(1)), ("target", json!(2))]),
                    record([("source", json!(2)), ("target", json!(3))]),
                ],
            ),
    );
    let llm = Arc::new(MockCompletion::always("unused"));

    let report = engine(store, llm).analytics().await.unwrap();

    assert_eq!(report.total_nodes, 3);
    assert_eq!(report.total_relationships, 2);
    assert_relative_eq!(report.avg_degree, 2.0 / 3.0);
    assert_relative_eq!(report.graph_density, 2.0 / 6.0);
    assert_eq!(report.largest_component_size, 3);
}

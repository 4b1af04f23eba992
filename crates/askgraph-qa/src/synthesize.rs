//! Grounded Cypher generation.
//!
//! One prompt, one completion call. The prompt embeds the full entity and
//! relationship lists from the snapshot plus the `id`-matching convention
//! with a worked example, so the model has no room to invent labels. The
//! returned text is sanitized lexically; syntax is NOT validated here —
//! a bad query is caught at execution time and handled fail-soft.

use crate::names::replace_names_in_query;
use crate::schema::GraphSchema;
use askgraph_llm::{CompletionError, CompletionService};

/// Build the query-generation prompt for `question` against `schema`.
pub fn build_query_prompt(question: &str, schema: &GraphSchema) -> String {
    let entities = schema.entities.join(", ");
    let relationships = schema.relationships.join(", ");

    format!(
        r#"Generate a valid Cypher query for Neo4j to answer the question:
"{question}"

The graph schema includes:
- Entities: {entities}.
- Relationships: {relationships}.

Use the property `id` to match specific entities. For example:
MATCH (n {{id: "Artificial_Intelligence"}}) RETURN n

Only output the Cypher query, no explanation or comments."#
    )
}

/// Strip the wrapping a completion service may put around a query: code
/// fences, stray backticks, surrounding whitespace. Also applies the fixed
/// `entity_id` → `id` patch for the known naming-convention drift in model
/// output.
pub fn sanitize_completion(raw: &str) -> String {
    let without_fences: String = raw
        .lines()
        .filter(|line| !line.trim_start().starts_with("```"))
        .collect::<Vec<_>>()
        .join("\n");

    without_fences
        .replace('`', "")
        .trim()
        .replace("entity_id", "id")
}

/// Synthesize an executable Cypher query for `question`.
///
/// Completion failures propagate; the result string is sanitized and has
/// schema names lexically aligned, but is not guaranteed syntactically
/// valid.
pub async fn synthesize(
    question: &str,
    schema: &GraphSchema,
    llm: &dyn CompletionService,
    model: &str,
) -> Result<String, CompletionError> {
    let prompt = build_query_prompt(question, schema);
    let raw = llm.complete(&prompt, model).await?;
    let query = sanitize_completion(&raw);

    Ok(replace_names_in_query(
        &query,
        &schema.entities,
        &schema.relationships,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use askgraph_llm::MockCompletion;

    fn two_label_schema() -> GraphSchema {
        GraphSchema {
            entities: vec!["Person".to_string(), "Company".to_string()],
            relationships: vec!["WORKS_AT".to_string()],
            ..GraphSchema::default()
        }
    }

    #[test]
    fn prompt_embeds_schema_and_id_convention() {
        let prompt = build_query_prompt("Where does Alice work?", &two_label_schema());

        assert!(prompt.contains("Where does Alice work?"));
        assert!(prompt.contains("Person, Company"));
        assert!(prompt.contains("WORKS_AT"));
        assert!(prompt.contains(r#"MATCH (n {id: "Artificial_Intelligence"}) RETURN n"#));
    }

    #[test]
    fn sanitize_strips_fences_and_backticks() {
        let raw = "```cypher\nMATCH (n) RETURN `n`\n```\n";
        assert_eq!(sanitize_completion(raw), "MATCH (n) RETURN n");
    }

    #[test]
    fn sanitize_patches_legacy_entity_id() {
        let raw = r#"MATCH (n {entity_id: "Alice"}) RETURN n"#;
        assert_eq!(
            sanitize_completion(raw),
            r#"MATCH (n {id: "Alice"}) RETURN n"#
        );
    }

    #[tokio::test]
    async fn synthesized_query_gets_schema_spellings() {
        let schema = GraphSchema {
            entities: vec!["Artificial_Intelligence".to_string()],
            ..GraphSchema::default()
        };
        let llm =
            MockCompletion::always("MATCH (n {id: \"artificial intelligence\"}) RETURN n");

        let query = synthesize("What is AI?", &schema, &llm, "test-model")
            .await
            .unwrap();
        assert_eq!(
            query,
            "MATCH (n {id: \"Artificial_Intelligence\"}) RETURN n"
        );
    }

    #[tokio::test]
    async fn prompt_reaches_the_completion_service() {
        let schema = two_label_schema();
        let llm = MockCompletion::always("MATCH (n) RETURN n");

        synthesize("Who works where?", &schema, &llm, "test-model")
            .await
            .unwrap();

        let prompts = llm.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Person, Company"));
    }
}

//! Answer synthesis from query results.
//!
//! Empty rows short-circuit to a fixed message without touching the
//! completion service — summarizing nothing invites hallucination.

use askgraph_llm::{CompletionError, CompletionService};
use askgraph_store::Record;

/// Fixed answer when the query produced no rows (or failed fail-soft).
pub const NO_RESULTS_MESSAGE: &str = "No results found for your query.";

/// Build the summarization prompt: one JSON line per record, then the
/// question, with an instruction to answer strictly from the rows.
pub fn build_answer_prompt(question: &str, rows: &[Record]) -> String {
    let formatted_results = rows
        .iter()
        .map(|row| serde_json::to_string(row).unwrap_or_default())
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"Based on the following query results, generate a concise and structured answer:

Query Results:
{formatted_results}

User Question:
"{question}"

Provide the answer in a structured format.
Do not include your own knowledge, just use the answer from the query results and format it in a readable way."#
    )
}

/// Summarize `rows` as a natural-language answer to `question`.
pub async fn summarize(
    question: &str,
    rows: &[Record],
    llm: &dyn CompletionService,
    model: &str,
) -> Result<String, CompletionError> {
    if rows.is_empty() {
        return Ok(NO_RESULTS_MESSAGE.to_string());
    }

    let prompt = build_answer_prompt(question, rows);
    let completion = llm.complete(&prompt, model).await?;
    Ok(completion.trim().to_string())
}

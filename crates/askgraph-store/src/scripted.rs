//! Scripted in-memory store for tests.
//!
//! Rules pair a case-insensitive substring of the incoming statement with a
//! canned outcome. First match wins; unmatched statements return no rows.
//! Every statement is recorded so tests can assert what the pipeline sent.

use crate::{GraphStore, Record, StoreError};
use std::sync::Mutex;

enum Outcome {
    Rows(Vec<Record>),
    Fail(StoreError),
}

struct Rule {
    needle: String,
    outcome: Outcome,
}

/// Test double implementing [`GraphStore`] from a fixed script.
#[derive(Default)]
pub struct ScriptedStore {
    rules: Vec<Rule>,
    seen: Mutex<Vec<String>>,
}

impl ScriptedStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Statements containing `needle` return `rows`.
    pub fn on(mut self, needle: &str, rows: Vec<Record>) -> Self {
        self.rules.push(Rule {
            needle: needle.to_lowercase(),
            outcome: Outcome::Rows(rows),
        });
        self
    }

    /// Statements containing `needle` fail as a bad query.
    pub fn on_query_error(mut self, needle: &str, message: &str) -> Self {
        self.rules.push(Rule {
            needle: needle.to_lowercase(),
            outcome: Outcome::Fail(StoreError::Query(message.to_string())),
        });
        self
    }

    /// Statements containing `needle` fail at the connection level.
    pub fn on_connection_error(mut self, needle: &str, message: &str) -> Self {
        self.rules.push(Rule {
            needle: needle.to_lowercase(),
            outcome: Outcome::Fail(StoreError::Connection(message.to_string())),
        });
        self
    }

    /// Every statement the store has executed, in order.
    pub fn statements(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl GraphStore for ScriptedStore {
    async fn run(&self, query: &str) -> Result<Vec<Record>, StoreError> {
        self.seen.lock().unwrap().push(query.to_string());

        let lowered = query.to_lowercase();
        for rule in &self.rules {
            if lowered.contains(&rule.needle) {
                return match &rule.outcome {
                    Outcome::Rows(rows) => Ok(rows.clone()),
                    Outcome::Fail(err) => Err(err.clone()),
                };
            }
        }
        Ok(Vec::new())
    }
}

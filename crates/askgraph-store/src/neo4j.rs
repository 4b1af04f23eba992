//! Neo4j backend over the HTTP transaction API.
//!
//! Each [`GraphStore::run`] call issues one auto-commit transaction
//! (`POST /db/{database}/tx/commit`), so sessions are scoped to a single
//! logical operation and nothing is held open between pipeline stages.

use crate::{GraphStore, Record, StoreError};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Connection parameters for a Neo4j server.
#[derive(Debug, Clone)]
pub struct Neo4jConfig {
    /// Base URL of the HTTP endpoint, e.g. `http://localhost:7474`.
    pub uri: String,
    pub database: String,
    pub username: String,
    pub password: String,
    pub timeout_secs: u64,
}

impl Neo4jConfig {
    /// Load from `NEO4J_URI`, `NEO4J_USERNAME`, `NEO4J_PASSWORD` and
    /// optionally `NEO4J_DATABASE`.
    pub fn from_env() -> Result<Self, StoreError> {
        let uri = std::env::var("NEO4J_URI")
            .map_err(|_| StoreError::Connection("NEO4J_URI is not set".to_string()))?;
        let username = std::env::var("NEO4J_USERNAME")
            .map_err(|_| StoreError::Connection("NEO4J_USERNAME is not set".to_string()))?;
        let password = std::env::var("NEO4J_PASSWORD")
            .map_err(|_| StoreError::Connection("NEO4J_PASSWORD is not set".to_string()))?;

        Ok(Self {
            uri,
            database: std::env::var("NEO4J_DATABASE").unwrap_or_else(|_| "neo4j".to_string()),
            username,
            password,
            timeout_secs: 30,
        })
    }

    pub fn new(uri: &str, username: &str, password: &str) -> Self {
        Self {
            uri: uri.to_string(),
            database: "neo4j".to_string(),
            username: username.to_string(),
            password: password.to_string(),
            timeout_secs: 30,
        }
    }

    pub fn with_database(mut self, database: &str) -> Self {
        self.database = database.to_string();
        self
    }
}

/// Graph store backed by a Neo4j server.
pub struct Neo4jHttpStore {
    client: Client,
    config: Neo4jConfig,
}

impl Neo4jHttpStore {
    pub fn new(config: Neo4jConfig) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn commit_url(&self) -> String {
        format!(
            "{}/db/{}/tx/commit",
            self.config.uri.trim_end_matches('/'),
            self.config.database
        )
    }
}

#[derive(Deserialize)]
struct TxResponse {
    #[serde(default)]
    results: Vec<TxResult>,
    #[serde(default)]
    errors: Vec<TxError>,
}

#[derive(Deserialize)]
struct TxResult {
    columns: Vec<String>,
    data: Vec<TxRow>,
}

#[derive(Deserialize)]
struct TxRow {
    row: Vec<serde_json::Value>,
}

#[derive(Deserialize)]
struct TxError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

#[async_trait::async_trait]
impl GraphStore for Neo4jHttpStore {
    async fn run(&self, query: &str) -> Result<Vec<Record>, StoreError> {
        tracing::debug!(query = %query, "running cypher statement");
        let body = serde_json::json!({
            "statements": [{ "statement": query }]
        });

        let response = self
            .client
            .post(self.commit_url())
            .basic_auth(&self.config.username, Some(&self.config.password))
            .json(&body)
            .send()
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Connection(format!(
                "neo4j returned HTTP {status}"
            )));
        }

        let parsed: TxResponse = response
            .json()
            .await
            .map_err(|e| StoreError::Connection(format!("malformed neo4j response: {e}")))?;

        // The transaction endpoint reports statement failures in-band with a
        // 200 status; the transport worked, the statement did not.
        if let Some(err) = parsed.errors.first() {
            return Err(StoreError::Query(format!("{}: {}", err.code, err.message)));
        }

        let mut rows = Vec::new();
        for result in parsed.results {
            for data in result.data {
                let row: Record = result
                    .columns
                    .iter()
                    .cloned()
                    .zip(data.row.into_iter())
                    .collect();
                rows.push(row);
            }
        }
        Ok(rows)
    }
}

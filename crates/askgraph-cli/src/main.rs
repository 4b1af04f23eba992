//! Askgraph CLI
//!
//! Thin boundary over the QA engine:
//! - `ask` — answer a natural-language question from the graph
//! - `query` — run raw Cypher (maintenance/debug path)
//! - `analytics` — structural graph metrics
//! - `schema` — dump the current schema snapshot
//!
//! Connection and model selection come from the environment: `NEO4J_URI`,
//! `NEO4J_USERNAME`, `NEO4J_PASSWORD` (plus optional `NEO4J_DATABASE`),
//! and `OPENAI_API_KEY` or `OLLAMA_URL` for the completion service.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::sync::Arc;

use askgraph_llm::{CompletionService, OllamaClient, OllamaConfig, OpenAiClient, OpenAiConfig};
use askgraph_qa::{QaConfig, QaEngine};
use askgraph_store::{Neo4jConfig, Neo4jHttpStore};

#[derive(Parser)]
#[command(name = "askgraph")]
#[command(author, version, about = "Ask natural-language questions over a knowledge graph")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer a natural-language question from the graph.
    Ask {
        /// The question, e.g. "Where does Alice work?"
        question: String,
    },

    /// Run raw Cypher against the store (debug path; errors are printed).
    Query {
        /// Cypher statement to execute
        cypher: String,
        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compute structural graph metrics.
    Analytics {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Dump the current schema snapshot.
    Schema,
}

/// Pick a completion provider from the environment: OpenAI-compatible if an
/// API key is present, otherwise Ollama.
fn completion_from_env() -> Result<Arc<dyn CompletionService>> {
    if std::env::var("OPENAI_API_KEY").is_ok() {
        let config = OpenAiConfig::from_env().context("loading OpenAI configuration")?;
        return Ok(Arc::new(OpenAiClient::new(config)?));
    }
    Ok(Arc::new(OllamaClient::new(OllamaConfig::from_env())?))
}

fn engine_from_env() -> Result<QaEngine> {
    let store_config = Neo4jConfig::from_env().context("loading Neo4j configuration")?;
    let store = Arc::new(Neo4jHttpStore::new(store_config)?);
    let llm = completion_from_env()?;
    Ok(QaEngine::new(store, llm, QaConfig::from_env()))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let engine = engine_from_env()?;

    match cli.command {
        Commands::Ask { question } => {
            let answer = engine
                .answer_question(&question)
                .await
                .map_err(|e| anyhow::anyhow!("An error occurred: {e}"))?;
            println!("{answer}");
        }

        Commands::Query { cypher, json } => {
            let outcome = engine.run_raw_query(&cypher).await;
            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else if outcome.success {
                let rows = outcome.result.unwrap_or_default();
                println!("{} ({} rows)", "ok".green(), rows.len());
                for row in rows {
                    println!("{}", serde_json::to_string(&row)?);
                }
            } else {
                println!(
                    "{}: {}",
                    "query failed".red(),
                    outcome.error.unwrap_or_default()
                );
            }
        }

        Commands::Analytics { json } => {
            let report = engine.analytics().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", "Graph analytics".bold());
                println!("  nodes:             {}", report.total_nodes);
                println!("  relationships:     {}", report.total_relationships);
                println!("  density:           {:.4}", report.graph_density);
                println!("  average degree:    {:.4}", report.avg_degree);
                println!("  largest component: {}", report.largest_component_size);
            }
        }

        Commands::Schema => {
            let schema = engine.schema().await?;
            println!("{}", "Entities".bold());
            for label in &schema.entities {
                let properties = schema
                    .node_properties
                    .get(label)
                    .map(|set| set.iter().cloned().collect::<Vec<_>>().join(", "))
                    .unwrap_or_default();
                let samples = schema
                    .entity_samples
                    .get(label)
                    .map(Vec::len)
                    .unwrap_or(0);
                println!("  {} [{properties}] ({samples} sampled)", label.cyan());
            }
            println!("{}", "Relationships".bold());
            for relationship in &schema.relationships {
                let properties = schema
                    .relationship_properties
                    .get(relationship)
                    .map(|set| set.iter().cloned().collect::<Vec<_>>().join(", "))
                    .unwrap_or_default();
                println!("  {} [{properties}]", relationship.cyan());
            }
        }
    }

    Ok(())
}

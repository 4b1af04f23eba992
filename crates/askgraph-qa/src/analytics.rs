//! Structural graph metrics.
//!
//! Four store queries: node count, relationship count, node ids, and the
//! edge list. The largest connected component is computed client-side by
//! breadth-first search over the undirected edge list — size of the largest
//! component, same semantics as reachability-based variants without the
//! all-pairs cost.

use askgraph_store::{GraphStore, Record, StoreError};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};

/// Aggregate structural metrics, recomputed on every call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub total_nodes: u64,
    pub total_relationships: u64,
    pub graph_density: f64,
    pub avg_degree: f64,
    pub largest_component_size: u64,
}

fn scalar_u64(rows: &[Record], column: &str) -> u64 {
    rows.first()
        .and_then(|row| row.get(column))
        .and_then(|value| value.as_u64())
        .unwrap_or(0)
}

fn i64_column(rows: &[Record], column: &str) -> Vec<i64> {
    rows.iter()
        .filter_map(|row| row.get(column))
        .filter_map(|value| value.as_i64())
        .collect()
}

/// Size of the largest connected component, edges taken as undirected.
fn largest_component(nodes: &[i64], edges: &[(i64, i64)]) -> u64 {
    let mut adjacency: HashMap<i64, Vec<i64>> = HashMap::new();
    for node in nodes {
        adjacency.entry(*node).or_default();
    }
    for (source, target) in edges {
        adjacency.entry(*source).or_default().push(*target);
        adjacency.entry(*target).or_default().push(*source);
    }

    let mut visited: HashSet<i64> = HashSet::new();
    let mut largest = 0u64;

    for start in adjacency.keys() {
        if visited.contains(start) {
            continue;
        }
        let mut size = 0u64;
        let mut queue = VecDeque::from([*start]);
        visited.insert(*start);

        while let Some(node) = queue.pop_front() {
            size += 1;
            for neighbor in adjacency.get(&node).into_iter().flatten() {
                if visited.insert(*neighbor) {
                    queue.push_back(*neighbor);
                }
            }
        }
        largest = largest.max(size);
    }

    largest
}

/// Compute the analytics report from direct store queries.
pub async fn compute(store: &dyn GraphStore) -> Result<AnalyticsReport, StoreError> {
    let total_nodes = scalar_u64(
        &store.run("MATCH (n) RETURN count(n) AS total_nodes").await?,
        "total_nodes",
    );
    let total_relationships = scalar_u64(
        &store
            .run("MATCH ()-[r]->() RETURN count(r) AS total_relationships")
            .await?,
        "total_relationships",
    );

    let node_rows = store.run("MATCH (n) RETURN id(n) AS node_id").await?;
    let nodes = i64_column(&node_rows, "node_id");

    let edge_rows = store
        .run("MATCH (a)-[r]->(b) RETURN id(a) AS source, id(b) AS target")
        .await?;
    let edges: Vec<(i64, i64)> = i64_column(&edge_rows, "source")
        .into_iter()
        .zip(i64_column(&edge_rows, "target"))
        .collect();

    let graph_density = if total_nodes > 1 {
        total_relationships as f64 / (total_nodes as f64 * (total_nodes as f64 - 1.0))
    } else {
        0.0
    };
    let avg_degree = if total_nodes > 0 {
        total_relationships as f64 / total_nodes as f64
    } else {
        0.0
    };

    Ok(AnalyticsReport {
        total_nodes,
        total_relationships,
        graph_density,
        avg_degree,
        largest_component_size: largest_component(&nodes, &edges),
    })
}

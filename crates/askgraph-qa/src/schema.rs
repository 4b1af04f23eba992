//! Point-in-time schema snapshots of the graph.
//!
//! A snapshot is rebuilt from catalog queries on every question — entities
//! and relationships may have been ingested moments earlier, so nothing is
//! cached. Property enumeration walks all nodes of a label (not a sample);
//! identifier sampling is capped at [`SAMPLE_CAP`] pairs per label.

use askgraph_store::{GraphStore, Record, StoreError};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Cap on `(internal id, exposed id)` pairs collected per label.
pub const SAMPLE_CAP: usize = 100;

/// One sampled node: the store-internal id and the `id` property used for
/// entity matching, when present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntitySample {
    pub node_id: i64,
    pub id: Option<String>,
}

/// Snapshot of the graph's current labels, relationship types, properties,
/// and sampled identifiers.
///
/// Invariant: every key of `node_properties` and `entity_samples` occurs in
/// `entities`; every key of `relationship_properties` occurs in
/// `relationships`. Construction in [`introspect`] guarantees this.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GraphSchema {
    pub entities: Vec<String>,
    pub relationships: Vec<String>,
    pub node_properties: BTreeMap<String, BTreeSet<String>>,
    pub relationship_properties: BTreeMap<String, BTreeSet<String>>,
    pub entity_samples: BTreeMap<String, Vec<EntitySample>>,
}

fn string_column(rows: &[Record], column: &str) -> Vec<String> {
    rows.iter()
        .filter_map(|row| row.get(column))
        .filter_map(|value| value.as_str())
        .map(str::to_string)
        .collect()
}

fn dedup_preserving_order(names: Vec<String>) -> Vec<String> {
    let mut seen = BTreeSet::new();
    names
        .into_iter()
        .filter(|name| seen.insert(name.clone()))
        .collect()
}

/// Introspect the live graph into a [`GraphSchema`].
///
/// Cost is one round trip per label and relationship type on top of the two
/// catalog queries. Any store error propagates — a partial snapshot is
/// worse than none.
pub async fn introspect(store: &dyn GraphStore) -> Result<GraphSchema, StoreError> {
    let mut schema = GraphSchema::default();

    let labels = store
        .run("CALL db.labels() YIELD label RETURN label")
        .await?;
    schema.entities = dedup_preserving_order(string_column(&labels, "label"));

    let relationship_types = store
        .run("CALL db.relationshipTypes() YIELD relationshipType RETURN relationshipType")
        .await?;
    schema.relationships =
        dedup_preserving_order(string_column(&relationship_types, "relationshipType"));

    for label in schema.entities.clone() {
        let properties = store
            .run(&format!(
                "MATCH (n:`{label}`) UNWIND keys(n) AS property RETURN DISTINCT property"
            ))
            .await?;
        schema.node_properties.insert(
            label.clone(),
            string_column(&properties, "property").into_iter().collect(),
        );

        let samples = store
            .run(&format!(
                "MATCH (n:`{label}`) RETURN id(n) AS node_id, n.id AS id LIMIT {SAMPLE_CAP}"
            ))
            .await?;
        let samples = samples
            .iter()
            .filter_map(|row| {
                let node_id = row.get("node_id")?.as_i64()?;
                let id = row
                    .get("id")
                    .and_then(|value| value.as_str())
                    .map(str::to_string);
                Some(EntitySample { node_id, id })
            })
            .collect();
        schema.entity_samples.insert(label, samples);
    }

    for relationship in schema.relationships.clone() {
        let properties = store
            .run(&format!(
                "MATCH ()-[r:`{relationship}`]->() UNWIND keys(r) AS property RETURN DISTINCT property"
            ))
            .await?;
        schema.relationship_properties.insert(
            relationship,
            string_column(&properties, "property").into_iter().collect(),
        );
    }

    Ok(schema)
}

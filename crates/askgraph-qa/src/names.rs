//! Canonicalization of entity and relationship names.
//!
//! Free-text mentions ("artificial intelligence") and schema identifiers
//! ("Artificial_Intelligence") meet in the middle through [`normalize`]; the
//! reverse direction never touches tokens that are themselves schema names.
//! [`replace_names_in_query`] applies this to generated Cypher as a lexical
//! pass, preferring to leave ambiguous text unchanged over substituting
//! wrongly.

use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

fn whitespace_run() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("static regex"))
}

fn name_span() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Maximal runs of word characters, spaces, and hyphens bounded by word
    // boundaries. Spans straddling Cypher punctuation break at the
    // punctuation, which keeps keywords and identifiers separate.
    RE.get_or_init(|| Regex::new(r"\b[\w\s-]+\b").expect("static regex"))
}

/// Canonicalize a name: trim, collapse whitespace runs to a single
/// underscore, lowercase. Idempotent.
pub fn normalize(name: &str) -> String {
    whitespace_run()
        .replace_all(name.trim(), "_")
        .to_lowercase()
}

/// Reverse normalization for output text.
///
/// Schema names pass through unchanged — labels and relationship types are
/// stored underscore-free of meaning already, and humanizing them would
/// double-translate. Anything else gets its underscores turned back into
/// spaces.
pub fn denormalize(candidate: &str, original: &str, schema_names: &[String]) -> String {
    if schema_names.iter().any(|name| name == candidate) {
        return candidate.to_string();
    }
    original.replace('_', " ")
}

/// Replace free-text entity/relationship mentions in `query` with their
/// schema-exact spellings. Non-matching text, including Cypher keywords,
/// is preserved byte-for-byte.
pub fn replace_names_in_query(
    query: &str,
    schema_entities: &[String],
    schema_relationships: &[String],
) -> String {
    let entity_mapping: HashMap<String, &str> = schema_entities
        .iter()
        .map(|entity| (normalize(entity), entity.as_str()))
        .collect();
    let relationship_mapping: HashMap<String, &str> = schema_relationships
        .iter()
        .map(|relationship| (normalize(relationship), relationship.as_str()))
        .collect();

    name_span()
        .replace_all(query, |caps: &regex::Captures| {
            let matched = &caps[0];
            let normalized = normalize(matched);

            if let Some(entity) = entity_mapping.get(&normalized) {
                denormalize(entity, matched, schema_entities)
            } else if let Some(relationship) = relationship_mapping.get(&normalized) {
                denormalize(relationship, matched, schema_relationships)
            } else {
                matched.to_string()
            }
        })
        .into_owned()
}

//! JSON-LD expansion
//!
//! Rewrites a compacted document into expanded form: every key becomes a
//! full IRI, every literal becomes a `{"@value": ...}` object carrying its
//! datatype or language, and context-driven coercions (@type, @container,
//! @language) are applied. The expanded form is what the statement adapter
//! consumes.

use crate::context::{Container, ContextEntry, ParsedContext, TypeValue};
use crate::error::{JsonLdError, Result};
use crate::iri;
use serde_json::{json, Map, Value as JsonValue};

// ============================================================================
// IRI expansion
// ============================================================================

fn match_term<'a>(
    value: &str,
    context: &'a ParsedContext,
) -> Option<(String, Option<&'a ContextEntry>)> {
    let entry = context.get(value)?;
    let id = entry.id.clone()?;
    Some((id, Some(entry)))
}

fn match_prefix<'a>(
    value: &str,
    context: &'a ParsedContext,
) -> Option<(String, Option<&'a ContextEntry>)> {
    let (prefix, suffix) = iri::parse_prefix(value)?;
    let entry = context.get(&prefix)?;
    let namespace = entry.id.as_deref()?;
    Some((format!("{}{}", namespace, suffix), Some(entry)))
}

fn match_default<'a>(
    value: &str,
    context: &'a ParsedContext,
    vocab: bool,
) -> Option<(String, Option<&'a ContextEntry>)> {
    if iri::is_iri_like(value) {
        return None;
    }
    let default = if vocab {
        context.vocab.as_deref()
    } else {
        context.base.as_deref()
    };
    let default = default?;
    if vocab {
        Some((format!("{}{}", default, value), None))
    } else {
        Some((iri::join(default, value), None))
    }
}

/// Expand a term, compact IRI, or relative IRI and return the matching
/// term definition when one exists. `vocab` selects @vocab resolution
/// (predicates, types) over @base resolution (@id values).
pub fn details<'a>(
    value: &str,
    context: &'a ParsedContext,
    vocab: bool,
) -> (String, Option<&'a ContextEntry>) {
    if value.starts_with('@') {
        return (value.to_string(), None);
    }
    if let Some(matched) = match_term(value, context) {
        return matched;
    }
    if let Some(matched) = match_prefix(value, context) {
        return matched;
    }
    if let Some(matched) = match_default(value, context, vocab) {
        return matched;
    }
    (value.to_string(), None)
}

/// Expand a term, compact IRI, or relative IRI to a full IRI
pub fn iri(value: &str, context: &ParsedContext, vocab: bool) -> String {
    details(value, context, vocab).0
}

// ============================================================================
// Value expansion
// ============================================================================

fn is_list_object(map: &Map<String, JsonValue>) -> bool {
    map.contains_key("@list") && map.keys().all(|k| k == "@list" || k == "@index")
}

fn is_set_object(map: &Map<String, JsonValue>) -> bool {
    map.contains_key("@set") && map.keys().all(|k| k == "@set" || k == "@index")
}

/// Expand each element of an array, flattening nested value arrays.
/// Directly nested arrays are not valid JSON-LD.
fn expand_items(
    items: &[JsonValue],
    entry: Option<&ContextEntry>,
    context: &ParsedContext,
    path: &[JsonValue],
) -> Result<Vec<JsonValue>> {
    let mut expanded = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let mut at = path.to_vec();
        at.push(json!(i));
        if item.is_array() {
            return Err(JsonLdError::NestedArray { path: at });
        }
        match expand_value(item, entry, context, &at)? {
            JsonValue::Array(values) => expanded.extend(values),
            other => expanded.push(other),
        }
    }
    Ok(expanded)
}

/// Expand a property value under the term definition of its key
fn expand_value(
    value: &JsonValue,
    entry: Option<&ContextEntry>,
    context: &ParsedContext,
    path: &[JsonValue],
) -> Result<JsonValue> {
    match value {
        // null values drop out of the expanded document
        JsonValue::Null => Ok(json!([])),

        JsonValue::Bool(_) | JsonValue::Number(_) => {
            let mut object = Map::new();
            object.insert("@value".to_string(), value.clone());
            match entry.and_then(|e| e.type_.as_ref()) {
                Some(TypeValue::Iri(datatype)) => {
                    object.insert("@type".to_string(), json!(datatype));
                }
                Some(TypeValue::Json) => {
                    object.insert("@type".to_string(), json!("@json"));
                }
                _ => {}
            }
            Ok(JsonValue::Object(object))
        }

        JsonValue::String(s) => {
            // Type coercion wins over any default language
            match entry.and_then(|e| e.type_.as_ref()) {
                Some(TypeValue::Id) => return Ok(json!({"@id": iri(s, context, false)})),
                Some(TypeValue::Vocab) => return Ok(json!({"@id": iri(s, context, true)})),
                Some(TypeValue::Json) => return Ok(json!({"@value": s, "@type": "@json"})),
                Some(TypeValue::Iri(datatype)) => {
                    return Ok(json!({"@value": s, "@type": datatype}));
                }
                None => {}
            }
            // A per-term @language overrides the context default, and a
            // per-term null clears it
            let language = match entry.and_then(|e| e.language.as_ref()) {
                Some(per_term) => per_term.as_deref(),
                None => context.language.as_deref(),
            };
            match language {
                Some(lang) => Ok(json!({"@value": s, "@language": lang})),
                None => Ok(json!({"@value": s})),
            }
        }

        JsonValue::Array(items) => {
            let expanded = expand_items(items, entry, context, path)?;
            if entry.is_some_and(|e| e.has_container(Container::List)) {
                Ok(json!({"@list": expanded}))
            } else {
                Ok(JsonValue::Array(expanded))
            }
        }

        JsonValue::Object(map) => {
            // @json coercion keeps the whole value as a JSON literal
            if matches!(entry.and_then(|e| e.type_.as_ref()), Some(TypeValue::Json)) {
                return Ok(json!({"@value": value, "@type": "@json"}));
            }

            if is_list_object(map) {
                let expanded = match &map["@list"] {
                    JsonValue::Array(items) => expand_items(items, entry, context, path)?,
                    JsonValue::Null => Vec::new(),
                    single => match expand_value(single, entry, context, path)? {
                        JsonValue::Array(values) => values,
                        other => vec![other],
                    },
                };
                return Ok(json!({"@list": expanded}));
            }

            if is_set_object(map) {
                return expand_value(&map["@set"], entry, context, path);
            }

            if let Some(inner) = map.get("@value") {
                if inner.is_null() {
                    return Ok(json!([]));
                }
                return expand_value_object(inner, map, entry, context);
            }

            expand_node(value, context, path)
        }
    }
}

/// Expand an explicit `{"@value": ...}` object
fn expand_value_object(
    inner: &JsonValue,
    map: &Map<String, JsonValue>,
    entry: Option<&ContextEntry>,
    context: &ParsedContext,
) -> Result<JsonValue> {
    let explicit_type = map.get("@type").and_then(|v| v.as_str());
    let explicit_language = map.get("@language").and_then(|v| v.as_str());

    if explicit_type.is_some() && explicit_language.is_some() {
        return Err(JsonLdError::LanguageWithType);
    }

    // Without an explicit @type the term's coercion still applies
    if explicit_type.is_none() {
        match entry.and_then(|e| e.type_.as_ref()) {
            Some(TypeValue::Id) => {
                let target = inner
                    .as_str()
                    .map(|s| iri(s, context, false))
                    .unwrap_or_default();
                return Ok(json!({"@id": target}));
            }
            Some(TypeValue::Vocab) => {
                let target = inner
                    .as_str()
                    .map(|s| iri(s, context, true))
                    .unwrap_or_default();
                return Ok(json!({"@id": target}));
            }
            Some(TypeValue::Json) => {
                return Ok(json!({"@value": inner, "@type": "@json"}));
            }
            Some(TypeValue::Iri(datatype)) => {
                return Ok(json!({"@value": inner, "@type": datatype}));
            }
            None => {}
        }
    }

    let mut object = Map::new();
    object.insert("@value".to_string(), inner.clone());

    if let Some(datatype) = explicit_type {
        object.insert("@type".to_string(), json!(iri(datatype, context, true)));
    } else if inner.is_string() {
        let language = explicit_language.map(str::to_string).or_else(|| {
            match entry.and_then(|e| e.language.as_ref()) {
                Some(per_term) => per_term.clone(),
                None => context.language.clone(),
            }
        });
        if let Some(lang) = language {
            object.insert("@language".to_string(), json!(lang));
        }
    }

    Ok(JsonValue::Object(object))
}

// ============================================================================
// Node expansion
// ============================================================================

fn expand_types(value: &JsonValue, context: &ParsedContext) -> Vec<JsonValue> {
    match value {
        JsonValue::String(s) => vec![json!(iri(s, context, true))],
        JsonValue::Array(items) => items
            .iter()
            .filter_map(|v| v.as_str())
            .map(|s| json!(iri(s, context, true)))
            .collect(),
        _ => Vec::new(),
    }
}

/// Merge a value into an already-expanded node, turning repeated
/// predicates into arrays
fn append_property(node: &mut Map<String, JsonValue>, predicate: String, value: JsonValue) {
    match node.get_mut(&predicate) {
        Some(JsonValue::Array(existing)) => match value {
            JsonValue::Array(values) => existing.extend(values),
            other => existing.push(other),
        },
        Some(existing) => {
            let prior = existing.take();
            let mut merged = vec![prior];
            match value {
                JsonValue::Array(values) => merged.extend(values),
                other => merged.push(other),
            }
            *existing = JsonValue::Array(merged);
        }
        None => {
            node.insert(predicate, value);
        }
    }
}

fn expand_node(node: &JsonValue, context: &ParsedContext, path: &[JsonValue]) -> Result<JsonValue> {
    match node {
        JsonValue::Array(items) => {
            let mut expanded = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                let mut at = path.to_vec();
                at.push(json!(i));
                expanded.push(expand_node(item, context, &at)?);
            }
            Ok(JsonValue::Array(expanded))
        }

        JsonValue::Object(map) => {
            // A node may carry its own @context, scoped to its subtree
            let scoped;
            let context = match map.get("@context") {
                Some(local) => {
                    scoped = ParsedContext::parse(Some(context), local)?;
                    &scoped
                }
                None => context,
            };

            let mut expanded = Map::new();

            if let Some(types) = map.get("@type") {
                expanded.insert(
                    "@type".to_string(),
                    JsonValue::Array(expand_types(types, context)),
                );
            }

            for (key, value) in map {
                match key.as_str() {
                    "@context" | "@type" => {}
                    "@id" => {
                        if let Some(s) = value.as_str() {
                            expanded.insert("@id".to_string(), json!(iri(s, context, false)));
                        }
                    }
                    "@graph" => {
                        let mut at = path.to_vec();
                        at.push(json!("@graph"));
                        expanded.insert("@graph".to_string(), expand_node(value, context, &at)?);
                    }
                    other if other.starts_with('@') => {
                        // Keywords with no mapping here (@index, @reverse,
                        // @included) are dropped rather than misread
                    }
                    _ => {
                        let (predicate, entry) = details(key, context, true);
                        let mut at = path.to_vec();
                        at.push(json!(key));
                        let value = expand_value(value, entry, context, &at)?;
                        if value.as_array().is_some_and(|a| a.is_empty()) {
                            continue;
                        }
                        append_property(&mut expanded, predicate, value);
                    }
                }
            }

            Ok(JsonValue::Object(expanded))
        }

        scalar => Ok(scalar.clone()),
    }
}

/// `{"@context": ..., "@graph": [...]}` with nothing else is a plain
/// wrapper around the default graph, not a named graph
fn is_graph_wrapper(map: &Map<String, JsonValue>) -> bool {
    map.contains_key("@graph") && map.keys().all(|k| k == "@context" || k == "@graph")
}

/// Expand a whole document
pub fn node(document: &JsonValue) -> Result<JsonValue> {
    if let Some(map) = document.as_object() {
        if is_graph_wrapper(map) {
            let context = match map.get("@context") {
                Some(local) => ParsedContext::parse(None, local)?,
                None => ParsedContext::new(),
            };
            return expand_node(&map["@graph"], &context, &[json!("@graph")]);
        }
    }
    expand_node(document, &ParsedContext::new(), &[])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema_context() -> ParsedContext {
        ParsedContext::parse(None, &json!("https://schema.org")).unwrap()
    }

    #[test]
    fn test_iri_term_against_vocab() {
        let ctx = schema_context();
        assert_eq!(iri("name", &ctx, true), "https://schema.org/name");
    }

    #[test]
    fn test_iri_compact() {
        let ctx = ParsedContext::parse(None, &json!({"foaf": "http://xmlns.com/foaf/0.1/"}))
            .unwrap();
        assert_eq!(
            iri("foaf:knows", &ctx, true),
            "http://xmlns.com/foaf/0.1/knows"
        );
    }

    #[test]
    fn test_iri_absolute_and_unknown_prefix_pass_through() {
        let ctx = schema_context();
        assert_eq!(
            iri("http://example.org/thing", &ctx, true),
            "http://example.org/thing"
        );
        assert_eq!(iri("unknown:thing", &ctx, true), "unknown:thing");
    }

    #[test]
    fn test_iri_relative_id_resolves_against_base() {
        let ctx = ParsedContext::parse(None, &json!({"@base": "http://example.org/items/"}))
            .unwrap();
        assert_eq!(iri("42", &ctx, false), "http://example.org/items/42");
    }

    #[test]
    fn test_expand_simple_node() {
        let doc = json!({
            "@context": {"name": "http://xmlns.com/foaf/0.1/name"},
            "@id": "http://example.org/alice",
            "name": "Alice"
        });

        let expanded = node(&doc).unwrap();
        assert_eq!(
            expanded,
            json!({
                "@id": "http://example.org/alice",
                "http://xmlns.com/foaf/0.1/name": {"@value": "Alice"}
            })
        );
    }

    #[test]
    fn test_expand_types_to_arrays() {
        let doc = json!({
            "@context": "https://schema.org",
            "@id": "http://example.org/alice",
            "@type": "Person"
        });

        let expanded = node(&doc).unwrap();
        assert_eq!(expanded["@type"], json!(["https://schema.org/Person"]));
    }

    #[test]
    fn test_id_coercion_makes_node_reference() {
        let doc = json!({
            "@context": {
                "homepage": {"@id": "http://xmlns.com/foaf/0.1/homepage", "@type": "@id"}
            },
            "@id": "http://example.org/alice",
            "homepage": "http://example.org/~alice"
        });

        let expanded = node(&doc).unwrap();
        assert_eq!(
            expanded["http://xmlns.com/foaf/0.1/homepage"],
            json!({"@id": "http://example.org/~alice"})
        );
    }

    #[test]
    fn test_datatype_coercion() {
        let doc = json!({
            "@context": {
                "xsd": "http://www.w3.org/2001/XMLSchema#",
                "created": {"@id": "http://purl.org/dc/terms/created", "@type": "xsd:date"}
            },
            "@id": "http://example.org/doc",
            "created": "2024-01-15"
        });

        let expanded = node(&doc).unwrap();
        assert_eq!(
            expanded["http://purl.org/dc/terms/created"],
            json!({
                "@value": "2024-01-15",
                "@type": "http://www.w3.org/2001/XMLSchema#date"
            })
        );
    }

    #[test]
    fn test_type_coercion_wins_over_default_language() {
        let doc = json!({
            "@context": {
                "@language": "en",
                "created": {
                    "@id": "http://purl.org/dc/terms/created",
                    "@type": "http://www.w3.org/2001/XMLSchema#date"
                }
            },
            "@id": "http://example.org/doc",
            "created": "2024-01-15"
        });

        let expanded = node(&doc).unwrap();
        let value = &expanded["http://purl.org/dc/terms/created"];
        assert!(value.get("@language").is_none());
        assert_eq!(
            value["@type"],
            json!("http://www.w3.org/2001/XMLSchema#date")
        );
    }

    #[test]
    fn test_default_language_and_per_term_clear() {
        let doc = json!({
            "@context": {
                "@language": "en",
                "ex": "http://example.org/",
                "code": {"@id": "ex:code", "@language": null}
            },
            "@id": "http://example.org/item",
            "ex:label": "hello",
            "code": "X1"
        });

        let expanded = node(&doc).unwrap();
        assert_eq!(
            expanded["http://example.org/label"],
            json!({"@value": "hello", "@language": "en"})
        );
        assert_eq!(expanded["http://example.org/code"], json!({"@value": "X1"}));
    }

    #[test]
    fn test_explicit_type_and_language_conflict() {
        let doc = json!({
            "@id": "http://example.org/x",
            "http://example.org/p": {
                "@value": "v",
                "@type": "http://example.org/dt",
                "@language": "en"
            }
        });

        assert!(matches!(
            node(&doc),
            Err(JsonLdError::LanguageWithType)
        ));
    }

    #[test]
    fn test_list_container_wraps_arrays() {
        let doc = json!({
            "@context": {
                "steps": {"@id": "http://example.org/steps", "@container": "@list"}
            },
            "@id": "http://example.org/task",
            "steps": ["a", "b"]
        });

        let expanded = node(&doc).unwrap();
        assert_eq!(
            expanded["http://example.org/steps"],
            json!({"@list": [{"@value": "a"}, {"@value": "b"}]})
        );
    }

    #[test]
    fn test_explicit_list_not_wrapped_twice() {
        let doc = json!({
            "@context": {
                "steps": {"@id": "http://example.org/steps", "@container": "@list"}
            },
            "@id": "http://example.org/task",
            "steps": {"@list": ["a", "b"]}
        });

        let expanded = node(&doc).unwrap();
        assert_eq!(
            expanded["http://example.org/steps"],
            json!({"@list": [{"@value": "a"}, {"@value": "b"}]})
        );
    }

    #[test]
    fn test_set_flattens_into_values() {
        let doc = json!({
            "@context": {
                "tags": {"@id": "http://example.org/tags", "@container": "@set"}
            },
            "@id": "http://example.org/item",
            "tags": {"@set": ["a", "b"]}
        });

        let expanded = node(&doc).unwrap();
        assert_eq!(
            expanded["http://example.org/tags"],
            json!([{"@value": "a"}, {"@value": "b"}])
        );
    }

    #[test]
    fn test_nested_arrays_are_rejected() {
        let doc = json!({
            "@id": "http://example.org/x",
            "http://example.org/p": [["nested"]]
        });

        match node(&doc) {
            Err(JsonLdError::NestedArray { path }) => {
                assert_eq!(path, vec![json!("http://example.org/p"), json!(0)]);
            }
            other => panic!("expected nested array error, got {:?}", other),
        }
    }

    #[test]
    fn test_json_coercion_keeps_value_whole() {
        let doc = json!({
            "@context": {
                "payload": {"@id": "http://example.org/payload", "@type": "@json"}
            },
            "@id": "http://example.org/msg",
            "payload": {"b": 2, "a": 1}
        });

        let expanded = node(&doc).unwrap();
        assert_eq!(
            expanded["http://example.org/payload"],
            json!({"@value": {"a": 1, "b": 2}, "@type": "@json"})
        );
    }

    #[test]
    fn test_duplicate_predicates_merge() {
        let doc = json!({
            "@context": {
                "foaf": "http://xmlns.com/foaf/0.1/",
                "name": "http://xmlns.com/foaf/0.1/name"
            },
            "@id": "http://example.org/alice",
            "name": "Alice",
            "foaf:name": "Ally"
        });

        let expanded = node(&doc).unwrap();
        let names = expanded["http://xmlns.com/foaf/0.1/name"]
            .as_array()
            .unwrap();
        assert_eq!(names.len(), 2);
        assert!(names.contains(&json!({"@value": "Alice"})));
        assert!(names.contains(&json!({"@value": "Ally"})));
    }

    #[test]
    fn test_scoped_context_shadows_outer() {
        let doc = json!({
            "@context": {"ex": "http://example.org/"},
            "@id": "ex:outer",
            "ex:child": {
                "@context": {"ex": "http://other.example/"},
                "@id": "ex:inner"
            }
        });

        let expanded = node(&doc).unwrap();
        assert_eq!(expanded["@id"], json!("http://example.org/outer"));
        assert_eq!(
            expanded["http://example.org/child"]["@id"],
            json!("http://other.example/inner")
        );
    }

    #[test]
    fn test_graph_wrapper_unwraps_to_default_graph() {
        let doc = json!({
            "@context": {"ex": "http://example.org/"},
            "@graph": [
                {"@id": "ex:a", "ex:p": "v"}
            ]
        });

        let expanded = node(&doc).unwrap();
        assert_eq!(
            expanded,
            json!([
                {"@id": "http://example.org/a", "http://example.org/p": {"@value": "v"}}
            ])
        );
    }

    #[test]
    fn test_named_graph_stays_nested() {
        let doc = json!({
            "@context": {"ex": "http://example.org/"},
            "@id": "ex:g",
            "@graph": [{"@id": "ex:a", "ex:p": "v"}]
        });

        let expanded = node(&doc).unwrap();
        assert_eq!(expanded["@id"], json!("http://example.org/g"));
        assert_eq!(expanded["@graph"][0]["@id"], json!("http://example.org/a"));
    }

    #[test]
    fn test_top_level_array() {
        let doc = json!([
            {"@id": "http://example.org/a"},
            {"@id": "http://example.org/b"}
        ]);

        let expanded = node(&doc).unwrap();
        let nodes = expanded.as_array().unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[1]["@id"], json!("http://example.org/b"));
    }

    #[test]
    fn test_null_properties_are_dropped() {
        let doc = json!({
            "@id": "http://example.org/a",
            "http://example.org/p": null
        });

        let expanded = node(&doc).unwrap();
        assert_eq!(expanded, json!({"@id": "http://example.org/a"}));
    }
}

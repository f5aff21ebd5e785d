//! JSON-LD @context parsing
//!
//! A context maps short terms to IRIs and records per-term coercion rules.
//! Supported context forms: a string (used as @vocab), an object of term
//! definitions, an array of either (applied left to right), and null
//! (reset). Term definitions may carry @id, @type (including the @id,
//! @vocab, and @json keywords), @container (@list or @set), and @language.

use crate::error::{JsonLdError, Result};
use crate::iri;
use serde_json::{Map, Value as JsonValue};
use std::collections::HashMap;

/// Recognized @container values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    List,
    Set,
}

/// A term's @type coercion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeValue {
    /// @id: string values are IRI references resolved against @base
    Id,
    /// @vocab: string values are IRI references resolved against @vocab
    Vocab,
    /// @json: values are kept whole as JSON literals
    Json,
    /// A datatype IRI
    Iri(String),
}

/// One term definition
#[derive(Debug, Clone, Default)]
pub struct ContextEntry {
    /// Expanded IRI the term maps to
    pub id: Option<String>,
    /// @type coercion
    pub type_: Option<TypeValue>,
    /// @container values
    pub container: Option<Vec<Container>>,
    /// Per-term @language; `Some(None)` clears an inherited default
    pub language: Option<Option<String>>,
}

impl ContextEntry {
    /// True when the term's @container includes the given value
    pub fn has_container(&self, container: Container) -> bool {
        self.container
            .as_ref()
            .is_some_and(|c| c.contains(&container))
    }
}

/// A resolved @context
#[derive(Debug, Clone, Default)]
pub struct ParsedContext {
    /// Default vocabulary (@vocab)
    pub vocab: Option<String>,
    /// Base IRI for @id resolution (@base)
    pub base: Option<String>,
    /// Default language (@language)
    pub language: Option<String>,
    /// Term definitions
    pub terms: HashMap<String, ContextEntry>,
}

impl ParsedContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a term definition
    pub fn get(&self, term: &str) -> Option<&ContextEntry> {
        self.terms.get(term)
    }

    /// Check whether a term is defined
    pub fn contains(&self, term: &str) -> bool {
        self.terms.contains_key(term)
    }

    /// Parse a @context value against an optional outer context.
    ///
    /// `null` resets to the empty context, a string becomes @vocab, an
    /// object defines terms, and an array applies its elements in order.
    pub fn parse(outer: Option<&ParsedContext>, context: &JsonValue) -> Result<ParsedContext> {
        let mut active = outer.cloned().unwrap_or_default();

        match context {
            JsonValue::Null => Ok(ParsedContext::default()),

            JsonValue::String(s) => {
                active.vocab = Some(iri::as_namespace(s));
                Ok(active)
            }

            JsonValue::Object(map) => {
                // Tolerate a whole document passed in: descend into its
                // @context member
                if let Some(inner) = map.get("@context") {
                    return Self::parse(Some(&active), inner);
                }
                parse_context_map(&active, map)
            }

            JsonValue::Array(entries) => {
                for entry in entries {
                    active = Self::parse(Some(&active), entry)?;
                }
                Ok(active)
            }

            other => Err(JsonLdError::InvalidContext {
                message: format!("expected string, object, array, or null, got {}", other),
            }),
        }
    }
}

/// Parse one context object: keywords first, then term definitions.
fn parse_context_map(outer: &ParsedContext, map: &Map<String, JsonValue>) -> Result<ParsedContext> {
    let mut resolved = outer.clone();

    for (key, value) in map {
        match key.as_str() {
            "@vocab" => resolved.vocab = compute_vocab(outer, map, value)?,
            "@base" => match value {
                JsonValue::String(s) => resolved.base = Some(s.clone()),
                JsonValue::Null => resolved.base = None,
                _ => {}
            },
            "@language" => resolved.language = value.as_str().map(str::to_string),
            _ => {}
        }
    }

    let vocab = resolved.vocab.clone();

    for (key, value) in map {
        if key.starts_with('@') {
            continue;
        }
        let entry = parse_term_definition(key, value, map, outer, vocab.as_deref())?;
        resolved.terms.insert(key.clone(), entry);
    }

    Ok(resolved)
}

/// Resolve a @vocab value. The empty string means "reuse @base as @vocab";
/// a relative IRI joins onto @base.
fn compute_vocab(
    outer: &ParsedContext,
    map: &Map<String, JsonValue>,
    value: &JsonValue,
) -> Result<Option<String>> {
    // @base may be declared in the same context object
    let base = map
        .get("@base")
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .or_else(|| outer.base.clone());

    match value {
        JsonValue::Null => Ok(None),
        JsonValue::String(s) if s.is_empty() => Ok(base.map(|b| iri::as_namespace(&b))),
        JsonValue::String(s) if !iri::is_absolute(s) => match base {
            Some(base) => Ok(Some(iri::join(&base, s))),
            None => Ok(Some(iri::as_namespace(s))),
        },
        JsonValue::String(s) => Ok(Some(iri::as_namespace(s))),
        other => Err(JsonLdError::InvalidContext {
            message: format!("@vocab must be a string or null, got {}", other),
        }),
    }
}

/// Follow term-to-term references inside one context object.
///
/// `{"Address": "PostalAddress", "PostalAddress": "ex:PostalAddress"}`
/// resolves "Address" through "PostalAddress". Cycles are an error.
fn resolve_term_chain(
    term: &str,
    map: &Map<String, JsonValue>,
    seen: &mut Vec<String>,
) -> Result<String> {
    if seen.iter().any(|s| s == term) {
        return Err(JsonLdError::CircularIriMapping {
            term: term.to_string(),
        });
    }

    let value = match map.get(term) {
        Some(v) => v,
        None => return Ok(term.to_string()),
    };

    match value {
        JsonValue::String(s) => {
            if s == term {
                return Err(JsonLdError::CircularIriMapping {
                    term: term.to_string(),
                });
            }
            if !s.contains(':') && !s.starts_with('@') {
                seen.push(term.to_string());
                return resolve_term_chain(s, map, seen);
            }
            Ok(s.clone())
        }
        JsonValue::Object(def) => match def.get("@id") {
            Some(JsonValue::String(id)) => Ok(id.clone()),
            _ => Ok(term.to_string()),
        },
        _ => Ok(term.to_string()),
    }
}

/// Expand a possibly-compact IRI against the context object being parsed
/// and the outer context.
fn resolve_compact_iri(
    value: &str,
    map: &Map<String, JsonValue>,
    outer: &ParsedContext,
    vocab: Option<&str>,
) -> String {
    if let Some((prefix, suffix)) = iri::parse_prefix(value) {
        // Prefix defined in this same context object
        let local = map.get(&prefix).and_then(|v| match v {
            JsonValue::String(s) => Some(s.as_str()),
            JsonValue::Object(def) => def.get("@id").and_then(|id| id.as_str()),
            _ => None,
        });
        if let Some(ns) = local {
            return format!("{}{}", ns, suffix);
        }

        // Prefix inherited from the outer context
        if let Some(ns) = outer.get(&prefix).and_then(|e| e.id.as_deref()) {
            return format!("{}{}", ns, suffix);
        }
    }

    if !value.starts_with('@') && !iri::is_iri_like(value) {
        if let Some(vocab) = vocab {
            return format!("{}{}", vocab, value);
        }
    }

    value.to_string()
}

/// Parse a @type value from a term definition
fn parse_type_coercion(
    value: &JsonValue,
    map: &Map<String, JsonValue>,
    outer: &ParsedContext,
    vocab: Option<&str>,
) -> Result<Option<TypeValue>> {
    match value {
        JsonValue::Null => Ok(None),
        JsonValue::String(s) => {
            let resolved = resolve_compact_iri(s, map, outer, vocab);
            Ok(Some(match resolved.as_str() {
                "@id" => TypeValue::Id,
                "@vocab" => TypeValue::Vocab,
                "@json" => TypeValue::Json,
                _ => TypeValue::Iri(resolved),
            }))
        }
        other => Err(JsonLdError::InvalidContext {
            message: format!("@type in a term definition must be a string, got {}", other),
        }),
    }
}

/// Parse a @container value
fn parse_container(value: &JsonValue) -> Result<Vec<Container>> {
    fn one(v: &JsonValue) -> Result<Container> {
        match v.as_str() {
            Some("@list") => Ok(Container::List),
            Some("@set") => Ok(Container::Set),
            _ => Err(JsonLdError::InvalidContext {
                message: format!("unsupported @container value: {}", v),
            }),
        }
    }

    match value {
        JsonValue::Array(items) => items.iter().map(one).collect(),
        single => Ok(vec![one(single)?]),
    }
}

/// Parse one term definition (string form or object form)
fn parse_term_definition(
    term: &str,
    value: &JsonValue,
    map: &Map<String, JsonValue>,
    outer: &ParsedContext,
    vocab: Option<&str>,
) -> Result<ContextEntry> {
    match value {
        JsonValue::String(s) => {
            let mut seen = Vec::new();
            let target = resolve_term_chain(s, map, &mut seen)?;
            Ok(ContextEntry {
                id: Some(resolve_compact_iri(&target, map, outer, vocab)),
                ..Default::default()
            })
        }

        JsonValue::Object(def) => {
            let mut entry = ContextEntry::default();

            for (k, v) in def {
                match k.as_str() {
                    "@id" => {
                        if let JsonValue::String(s) = v {
                            entry.id = Some(resolve_compact_iri(s, map, outer, vocab));
                        }
                    }
                    "@type" => entry.type_ = parse_type_coercion(v, map, outer, vocab)?,
                    "@container" => entry.container = Some(parse_container(v)?),
                    "@language" => {
                        entry.language = if v.is_null() {
                            Some(None)
                        } else {
                            Some(v.as_str().map(str::to_string))
                        };
                    }
                    _ => {}
                }
            }

            // A definition like `"ex:date": {"@type": "xsd:date"}` keys the
            // IRI off the term itself
            if entry.id.is_none() {
                entry.id = Some(resolve_compact_iri(term, map, outer, vocab));
            }

            Ok(entry)
        }

        other => Err(JsonLdError::InvalidContext {
            message: format!("invalid definition for term '{}': {}", term, other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_context_sets_vocab() {
        let ctx = ParsedContext::parse(None, &json!("https://schema.org")).unwrap();
        assert_eq!(ctx.vocab, Some("https://schema.org/".to_string()));
    }

    #[test]
    fn test_prefix_map() {
        let ctx = ParsedContext::parse(
            None,
            &json!({
                "foaf": "http://xmlns.com/foaf/0.1/",
                "dct": "http://purl.org/dc/terms/"
            }),
        )
        .unwrap();

        assert_eq!(
            ctx.get("foaf").unwrap().id,
            Some("http://xmlns.com/foaf/0.1/".to_string())
        );
        assert_eq!(
            ctx.get("dct").unwrap().id,
            Some("http://purl.org/dc/terms/".to_string())
        );
    }

    #[test]
    fn test_term_using_local_prefix() {
        let ctx = ParsedContext::parse(
            None,
            &json!({
                "foaf": "http://xmlns.com/foaf/0.1/",
                "name": "foaf:name"
            }),
        )
        .unwrap();

        assert_eq!(
            ctx.get("name").unwrap().id,
            Some("http://xmlns.com/foaf/0.1/name".to_string())
        );
    }

    #[test]
    fn test_chained_term_references() {
        let ctx = ParsedContext::parse(
            None,
            &json!({
                "ex": "http://example.org/ns#",
                "Address": "PostalAddress",
                "PostalAddress": "ex:PostalAddress"
            }),
        )
        .unwrap();

        assert_eq!(
            ctx.get("Address").unwrap().id,
            Some("http://example.org/ns#PostalAddress".to_string())
        );
    }

    #[test]
    fn test_cyclic_term_reference_is_error() {
        assert!(ParsedContext::parse(None, &json!({"a": "a"})).is_err());
        assert!(ParsedContext::parse(None, &json!({"a": "b", "b": "a"})).is_err());
    }

    #[test]
    fn test_array_of_contexts_applies_in_order() {
        let ctx = ParsedContext::parse(
            None,
            &json!([
                {"ex": "http://example.org/"},
                {"@language": "en", "name": "ex:name"}
            ]),
        )
        .unwrap();

        assert_eq!(ctx.language, Some("en".to_string()));
        assert_eq!(
            ctx.get("name").unwrap().id,
            Some("http://example.org/name".to_string())
        );
    }

    #[test]
    fn test_null_resets_context() {
        let base = ParsedContext::parse(None, &json!({"ex": "http://example.org/"})).unwrap();
        let cleared = ParsedContext::parse(Some(&base), &JsonValue::Null).unwrap();
        assert!(cleared.terms.is_empty());
        assert!(cleared.vocab.is_none());
    }

    #[test]
    fn test_type_coercion_forms() {
        let ctx = ParsedContext::parse(
            None,
            &json!({
                "xsd": "http://www.w3.org/2001/XMLSchema#",
                "homepage": {"@id": "http://xmlns.com/foaf/0.1/homepage", "@type": "@id"},
                "created": {"@id": "http://purl.org/dc/terms/created", "@type": "xsd:date"},
                "payload": {"@id": "http://example.org/payload", "@type": "@json"}
            }),
        )
        .unwrap();

        assert_eq!(ctx.get("homepage").unwrap().type_, Some(TypeValue::Id));
        assert_eq!(
            ctx.get("created").unwrap().type_,
            Some(TypeValue::Iri(
                "http://www.w3.org/2001/XMLSchema#date".to_string()
            ))
        );
        assert_eq!(ctx.get("payload").unwrap().type_, Some(TypeValue::Json));
    }

    #[test]
    fn test_type_only_definition_keys_off_term() {
        let ctx = ParsedContext::parse(
            None,
            &json!({
                "ex": "http://example.org/ns#",
                "xsd": "http://www.w3.org/2001/XMLSchema#",
                "ex:start": {"@type": "xsd:dateTime"}
            }),
        )
        .unwrap();

        let entry = ctx.get("ex:start").unwrap();
        assert_eq!(entry.id, Some("http://example.org/ns#start".to_string()));
        assert_eq!(
            entry.type_,
            Some(TypeValue::Iri(
                "http://www.w3.org/2001/XMLSchema#dateTime".to_string()
            ))
        );
    }

    #[test]
    fn test_containers() {
        let ctx = ParsedContext::parse(
            None,
            &json!({
                "ex": "http://example.org/",
                "tags": {"@id": "ex:tags", "@container": "@set"},
                "steps": {"@id": "ex:steps", "@container": "@list"}
            }),
        )
        .unwrap();

        assert!(ctx.get("tags").unwrap().has_container(Container::Set));
        assert!(ctx.get("steps").unwrap().has_container(Container::List));
        assert!(!ctx.get("steps").unwrap().has_container(Container::Set));
    }

    #[test]
    fn test_unsupported_container_is_error() {
        let result = ParsedContext::parse(
            None,
            &json!({
                "label": {"@id": "http://example.org/label", "@container": "@language"}
            }),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_per_term_language_and_clearing() {
        let ctx = ParsedContext::parse(
            None,
            &json!({
                "@language": "en",
                "ex": "http://example.org/",
                "motto": {"@id": "ex:motto", "@language": "la"},
                "id": {"@id": "ex:id", "@language": null}
            }),
        )
        .unwrap();

        assert_eq!(ctx.language, Some("en".to_string()));
        assert_eq!(
            ctx.get("motto").unwrap().language,
            Some(Some("la".to_string()))
        );
        assert_eq!(ctx.get("id").unwrap().language, Some(None));
    }

    #[test]
    fn test_empty_vocab_reuses_base() {
        let ctx = ParsedContext::parse(
            None,
            &json!({
                "@base": "https://data.example/items/",
                "@vocab": ""
            }),
        )
        .unwrap();

        assert_eq!(ctx.vocab, Some("https://data.example/items/".to_string()));
    }

    #[test]
    fn test_relative_vocab_joins_base() {
        let ctx = ParsedContext::parse(
            None,
            &json!({
                "@base": "https://data.example/",
                "@vocab": "ns/"
            }),
        )
        .unwrap();

        assert_eq!(ctx.vocab, Some("https://data.example/ns/".to_string()));
    }

    #[test]
    fn test_wrapped_document_descends_into_context() {
        let doc = json!({
            "@context": {"ex": "http://example.org/"},
            "ex:name": "ignored here"
        });

        let ctx = ParsedContext::parse(None, &doc).unwrap();
        assert!(ctx.contains("ex"));
    }
}

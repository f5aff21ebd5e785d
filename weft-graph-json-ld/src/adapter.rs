//! Expanded JSON-LD to statement events
//!
//! Walks an expanded document and feeds every node, value, and list into a
//! [`StatementSink`]. Node references and labeled blank nodes keep their
//! identity across the document; `@list` arrays become rdf:first/rdf:rest
//! chains; `@graph` contents become statements in the graph named by the
//! enclosing node.

use crate::error::{JsonLdError, Result};
use crate::normalize;
use serde_json::{Map, Value as JsonValue};
use std::slice;
use weft_graph_ir::{Datatype, LiteralValue, StatementSink, TermId};
use weft_vocab::rdf;

fn blank_label(id: &str) -> Option<&str> {
    id.strip_prefix("_:")
}

/// Emit every statement of an expanded document into the sink
pub fn to_statements<S: StatementSink>(expanded: &JsonValue, sink: &mut S) -> Result<()> {
    match expanded {
        JsonValue::Array(nodes) => {
            for node in nodes {
                let map = node
                    .as_object()
                    .ok_or_else(|| JsonLdError::InvalidDocument {
                        message: format!("expected a node object, got {}", node),
                    })?;
                emit_node(map, sink, None)?;
            }
            Ok(())
        }
        JsonValue::Object(map) => {
            emit_node(map, sink, None)?;
            Ok(())
        }
        other => Err(JsonLdError::InvalidDocument {
            message: format!("expected a node object or array, got {}", other),
        }),
    }
}

fn emit<S: StatementSink>(
    sink: &mut S,
    subject: TermId,
    predicate: TermId,
    object: TermId,
    graph: Option<TermId>,
) {
    match graph {
        Some(g) => sink.emit_in_graph(subject, predicate, object, g),
        None => sink.emit(subject, predicate, object),
    }
}

fn string_values(value: &JsonValue) -> Vec<&str> {
    match value {
        JsonValue::String(s) => vec![s.as_str()],
        JsonValue::Array(items) => items.iter().filter_map(|v| v.as_str()).collect(),
        _ => Vec::new(),
    }
}

/// Emit one node's statements and return its subject term. A node without
/// an `@id` becomes a fresh blank node.
fn emit_node<S: StatementSink>(
    node: &Map<String, JsonValue>,
    sink: &mut S,
    graph: Option<TermId>,
) -> Result<TermId> {
    let subject = match node.get("@id") {
        Some(JsonValue::String(id)) => match blank_label(id) {
            Some(label) => sink.term_blank(Some(label)),
            None => sink.term_iri(id),
        },
        Some(other) => {
            return Err(JsonLdError::InvalidDocument {
                message: format!("@id must be a string, got {}", other),
            })
        }
        None => sink.term_blank(None),
    };

    for (key, value) in node {
        match key.as_str() {
            "@id" => {}
            "@type" => {
                let type_id = sink.term_iri(rdf::TYPE);
                for class in string_values(value) {
                    let object = sink.term_iri(class);
                    emit(sink, subject, type_id, object, graph);
                }
            }
            "@graph" => {
                // Contained statements land in the graph this node names
                let contents = match value {
                    JsonValue::Array(nodes) => nodes.as_slice(),
                    single => slice::from_ref(single),
                };
                for inner in contents {
                    let map = inner
                        .as_object()
                        .ok_or_else(|| JsonLdError::InvalidDocument {
                            message: format!("expected a node object in @graph, got {}", inner),
                        })?;
                    emit_node(map, sink, Some(subject))?;
                }
            }
            other if other.starts_with('@') => {}
            _ => {
                let predicate = sink.term_iri(key);
                let values = match value {
                    JsonValue::Array(values) => values.as_slice(),
                    single => slice::from_ref(single),
                };
                for element in values {
                    if let Some(object) = object_term(element, sink, graph)? {
                        emit(sink, subject, predicate, object, graph);
                    }
                }
            }
        }
    }

    Ok(subject)
}

/// Resolve a property value to an object term, emitting any statements an
/// embedded node or list contributes along the way
fn object_term<S: StatementSink>(
    value: &JsonValue,
    sink: &mut S,
    graph: Option<TermId>,
) -> Result<Option<TermId>> {
    match value {
        JsonValue::Object(map) => {
            if let Some(inner) = map.get("@value") {
                return literal_term(inner, map, sink);
            }
            if let Some(items) = map.get("@list") {
                return Ok(Some(list_term(items, sink, graph)?));
            }
            // Node reference or embedded node; both go through emit_node,
            // which is a no-op emitter for a bare reference
            let subject = emit_node(map, sink, graph)?;
            Ok(Some(subject))
        }

        // Tolerate values that skipped expansion
        JsonValue::String(s) => Ok(Some(sink.term_literal(s, Datatype::xsd_string(), None))),
        JsonValue::Bool(b) => Ok(Some(
            sink.term_literal_value(LiteralValue::Boolean(*b), Datatype::xsd_boolean()),
        )),
        JsonValue::Number(n) => Ok(Some(number_term(n, None, sink))),
        JsonValue::Null => Ok(None),

        JsonValue::Array(_) => Err(JsonLdError::InvalidDocument {
            message: "unexpected nested array in expanded document".to_string(),
        }),
    }
}

/// Build an rdf:first/rdf:rest chain and return its head (rdf:nil when
/// the list is empty)
fn list_term<S: StatementSink>(
    items: &JsonValue,
    sink: &mut S,
    graph: Option<TermId>,
) -> Result<TermId> {
    let first = sink.term_iri(rdf::FIRST);
    let rest = sink.term_iri(rdf::REST);
    let nil = sink.term_iri(rdf::NIL);

    let items = match items {
        JsonValue::Array(items) => items.as_slice(),
        single => slice::from_ref(single),
    };

    let mut head = nil;
    let mut tail: Option<TermId> = None;

    for item in items {
        if item.as_object().is_some_and(|m| m.contains_key("@list")) {
            return Err(JsonLdError::InvalidDocument {
                message: "lists may not contain other lists".to_string(),
            });
        }
        let object = match object_term(item, sink, graph)? {
            Some(object) => object,
            None => continue,
        };
        let cell = sink.term_blank(None);
        emit(sink, cell, first, object, graph);
        match tail {
            Some(previous) => emit(sink, previous, rest, cell, graph),
            None => head = cell,
        }
        tail = Some(cell);
    }

    if let Some(last) = tail {
        emit(sink, last, rest, nil, graph);
    }

    Ok(head)
}

/// Intern a `{"@value": ...}` object as a literal term
fn literal_term<S: StatementSink>(
    inner: &JsonValue,
    map: &Map<String, JsonValue>,
    sink: &mut S,
) -> Result<Option<TermId>> {
    let datatype = map
        .get("@type")
        .and_then(|v| v.as_str())
        .map(Datatype::from_iri);
    let language = map.get("@language").and_then(|v| v.as_str());

    // JSON literals keep the whole value in RFC 8785 canonical form
    if datatype.as_ref().is_some_and(|d| d.is_json()) {
        let canonical = normalize::normalize(inner);
        return Ok(Some(sink.term_literal_value(
            LiteralValue::json_canonical(canonical),
            Datatype::rdf_json(),
        )));
    }

    match inner {
        JsonValue::String(s) => {
            if let Some(lang) = language {
                return Ok(Some(sink.term_literal(
                    s,
                    Datatype::rdf_lang_string(),
                    Some(lang),
                )));
            }
            let datatype = datatype.unwrap_or_else(Datatype::xsd_string);
            Ok(Some(sink.term_literal(s, datatype, None)))
        }
        JsonValue::Bool(b) => Ok(Some(sink.term_literal_value(
            LiteralValue::Boolean(*b),
            datatype.unwrap_or_else(Datatype::xsd_boolean),
        ))),
        JsonValue::Number(n) => Ok(Some(number_term(n, datatype, sink))),
        // An object or array in @value is only meaningful as a JSON literal
        _ => Ok(None),
    }
}

fn number_term<S: StatementSink>(
    number: &serde_json::Number,
    datatype: Option<Datatype>,
    sink: &mut S,
) -> TermId {
    if let Some(i) = number.as_i64() {
        let datatype = datatype.unwrap_or_else(Datatype::xsd_integer);
        return sink.term_literal_value(LiteralValue::Integer(i), datatype);
    }
    let value = number.as_f64().unwrap_or_default();
    let datatype = datatype.unwrap_or_else(Datatype::xsd_double);
    sink.term_literal_value(LiteralValue::Double(value), datatype)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use weft_graph_ir::{Dataset, DatasetCollector, Term};

    fn collect(expanded: &JsonValue) -> Dataset {
        let mut sink = DatasetCollector::new();
        to_statements(expanded, &mut sink).unwrap();
        sink.finish()
    }

    fn object_of<'a>(dataset: &'a Dataset, subject: &Term, predicate: &Term) -> &'a Term {
        &dataset
            .statements()
            .iter()
            .find(|st| &st.s == subject && &st.p == predicate)
            .unwrap()
            .o
    }

    #[test]
    fn test_simple_triple() {
        let dataset = collect(&json!({
            "@id": "http://example.org/alice",
            "http://example.org/name": {"@value": "Alice"}
        }));

        assert_eq!(dataset.len(), 1);
        let stmt = &dataset.statements()[0];
        assert_eq!(stmt.s, Term::iri("http://example.org/alice"));
        assert_eq!(stmt.p, Term::iri("http://example.org/name"));
        assert_eq!(stmt.o, Term::string("Alice"));
        assert!(stmt.is_default_graph());
    }

    #[test]
    fn test_literal_kinds() {
        let dataset = collect(&json!({
            "@id": "http://example.org/x",
            "http://example.org/date": {
                "@value": "2024-01-15",
                "@type": "http://www.w3.org/2001/XMLSchema#date"
            },
            "http://example.org/greeting": {"@value": "bonjour", "@language": "fr"},
            "http://example.org/age": {"@value": 30},
            "http://example.org/score": {"@value": 2.5},
            "http://example.org/active": {"@value": true}
        }));

        let subject = Term::iri("http://example.org/x");
        assert_eq!(
            object_of(&dataset, &subject, &Term::iri("http://example.org/date")),
            &Term::typed(
                "2024-01-15",
                Datatype::from_iri("http://www.w3.org/2001/XMLSchema#date")
            )
        );
        assert_eq!(
            object_of(
                &dataset,
                &subject,
                &Term::iri("http://example.org/greeting")
            ),
            &Term::lang_string("bonjour", "fr")
        );
        assert_eq!(
            object_of(&dataset, &subject, &Term::iri("http://example.org/age")),
            &Term::integer(30)
        );
        assert_eq!(
            object_of(&dataset, &subject, &Term::iri("http://example.org/score")),
            &Term::double(2.5)
        );
        assert_eq!(
            object_of(&dataset, &subject, &Term::iri("http://example.org/active")),
            &Term::boolean(true)
        );
    }

    #[test]
    fn test_types_become_rdf_type_statements() {
        let dataset = collect(&json!({
            "@id": "http://example.org/alice",
            "@type": ["http://example.org/Person", "http://example.org/Agent"]
        }));

        assert_eq!(dataset.len(), 2);
        for stmt in dataset.statements() {
            assert_eq!(stmt.p, Term::iri(rdf::TYPE));
        }
    }

    #[test]
    fn test_node_reference() {
        let dataset = collect(&json!({
            "@id": "http://example.org/alice",
            "http://example.org/knows": {"@id": "http://example.org/bob"}
        }));

        assert_eq!(dataset.len(), 1);
        assert_eq!(
            dataset.statements()[0].o,
            Term::iri("http://example.org/bob")
        );
    }

    #[test]
    fn test_labeled_blank_nodes_share_identity() {
        let dataset = collect(&json!([
            {"@id": "_:shared", "http://example.org/name": {"@value": "N"}},
            {"@id": "http://example.org/a", "http://example.org/knows": {"@id": "_:shared"}}
        ]));

        assert_eq!(dataset.len(), 2);
        let name = dataset
            .statements()
            .iter()
            .find(|st| st.p == Term::iri("http://example.org/name"))
            .unwrap();
        let knows = dataset
            .statements()
            .iter()
            .find(|st| st.p == Term::iri("http://example.org/knows"))
            .unwrap();
        assert!(name.s.is_blank());
        assert_eq!(name.s, knows.o);
    }

    #[test]
    fn test_embedded_node_keeps_its_id() {
        let dataset = collect(&json!({
            "@id": "http://example.org/alice",
            "http://example.org/address": {
                "@id": "http://example.org/addr1",
                "http://example.org/city": {"@value": "Springfield"}
            }
        }));

        assert_eq!(dataset.len(), 2);
        let addr = Term::iri("http://example.org/addr1");
        assert_eq!(
            object_of(
                &dataset,
                &Term::iri("http://example.org/alice"),
                &Term::iri("http://example.org/address")
            ),
            &addr
        );
        assert_eq!(
            object_of(&dataset, &addr, &Term::iri("http://example.org/city")),
            &Term::string("Springfield")
        );
    }

    #[test]
    fn test_embedded_node_without_id_becomes_blank() {
        let dataset = collect(&json!({
            "@id": "http://example.org/alice",
            "http://example.org/address": {
                "http://example.org/city": {"@value": "Springfield"}
            }
        }));

        assert_eq!(dataset.len(), 2);
        let address = object_of(
            &dataset,
            &Term::iri("http://example.org/alice"),
            &Term::iri("http://example.org/address"),
        );
        assert!(address.is_blank());
        assert_eq!(
            object_of(&dataset, address, &Term::iri("http://example.org/city")),
            &Term::string("Springfield")
        );
    }

    #[test]
    fn test_list_becomes_first_rest_chain() {
        let dataset = collect(&json!({
            "@id": "http://example.org/task",
            "http://example.org/steps": {
                "@list": [{"@value": "a"}, {"@value": "b"}]
            }
        }));

        // one containing triple plus first/rest per cell
        assert_eq!(dataset.len(), 5);

        let first = Term::iri(rdf::FIRST);
        let rest = Term::iri(rdf::REST);
        let head = object_of(
            &dataset,
            &Term::iri("http://example.org/task"),
            &Term::iri("http://example.org/steps"),
        );
        assert!(head.is_blank());

        assert_eq!(object_of(&dataset, head, &first), &Term::string("a"));
        let second = object_of(&dataset, head, &rest);
        assert_eq!(object_of(&dataset, second, &first), &Term::string("b"));
        assert_eq!(object_of(&dataset, second, &rest), &Term::iri(rdf::NIL));
    }

    #[test]
    fn test_empty_list_is_nil() {
        let dataset = collect(&json!({
            "@id": "http://example.org/task",
            "http://example.org/steps": {"@list": []}
        }));

        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.statements()[0].o, Term::iri(rdf::NIL));
    }

    #[test]
    fn test_nested_list_is_rejected() {
        let result = to_statements(
            &json!({
                "@id": "http://example.org/task",
                "http://example.org/steps": {"@list": [{"@list": [{"@value": "a"}]}]}
            }),
            &mut DatasetCollector::new(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_graph_contents_become_quads() {
        let dataset = collect(&json!({
            "@id": "http://example.org/g",
            "@graph": [
                {"@id": "http://example.org/a", "http://example.org/p": {"@value": "v"}}
            ],
            "http://example.org/label": {"@value": "G"}
        }));

        assert_eq!(dataset.len(), 2);

        let quad = dataset
            .statements()
            .iter()
            .find(|st| !st.is_default_graph())
            .unwrap();
        assert_eq!(quad.graph(), Some(&Term::iri("http://example.org/g")));
        assert_eq!(quad.s, Term::iri("http://example.org/a"));
        assert_eq!(quad.o, Term::string("v"));

        let label = dataset
            .statements()
            .iter()
            .find(|st| st.is_default_graph())
            .unwrap();
        assert_eq!(label.s, Term::iri("http://example.org/g"));
        assert_eq!(label.o, Term::string("G"));
    }

    #[test]
    fn test_json_literal_is_canonicalized() {
        let dataset = collect(&json!({
            "@id": "http://example.org/msg",
            "http://example.org/payload": {
                "@value": {"b": 2, "a": 1},
                "@type": "@json"
            }
        }));

        assert_eq!(
            dataset.statements()[0].o,
            Term::json("{\"a\":1,\"b\":2}")
        );
    }

    #[test]
    fn test_scalar_document_rejected() {
        let result = to_statements(&json!("not a node"), &mut DatasetCollector::new());
        assert!(matches!(result, Err(JsonLdError::InvalidDocument { .. })));
    }

    #[test]
    fn test_expanded_document_end_to_end() {
        let doc = json!({
            "@context": {
                "name": "http://example.org/name",
                "knows": {"@id": "http://example.org/knows", "@type": "@id"}
            },
            "@id": "http://example.org/alice",
            "name": "Alice",
            "knows": "http://example.org/bob"
        });

        let expanded = crate::expand::node(&doc).unwrap();
        let dataset = collect(&expanded);

        assert_eq!(dataset.len(), 2);
        let alice = Term::iri("http://example.org/alice");
        assert_eq!(
            object_of(&dataset, &alice, &Term::iri("http://example.org/name")),
            &Term::string("Alice")
        );
        assert_eq!(
            object_of(&dataset, &alice, &Term::iri("http://example.org/knows")),
            &Term::iri("http://example.org/bob")
        );
    }
}

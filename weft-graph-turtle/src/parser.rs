//! Turtle-family parser that emits to StatementSink.
//!
//! One recursive-descent parser covers the whole family: Turtle and
//! N-Triples documents produce default-graph statements, TriG graph blocks
//! and N-Quads graph labels produce named-graph statements. Inputs in the
//! stricter syntaxes are valid in the superset, so no per-format dispatch
//! is needed.

use std::collections::HashMap;

use weft_graph_ir::{Datatype, LiteralValue, StatementSink, TermId};
use weft_vocab::rdf;

use crate::error::{Result, TurtleError};
use crate::lex::{tokenize, Token, TokenKind};

/// Parser state for a single document.
pub struct Parser<'a, S> {
    tokens: Vec<Token>,
    pos: usize,
    sink: &'a mut S,
    /// Prefix mappings (prefix -> namespace IRI)
    prefixes: HashMap<String, String>,
    /// Base IRI for relative IRI resolution
    base: Option<String>,
}

impl<'a, S: StatementSink> Parser<'a, S> {
    /// Create a new parser.
    pub fn new(input: &str, sink: &'a mut S) -> Result<Self> {
        Ok(Self {
            tokens: tokenize(input)?,
            pos: 0,
            sink,
            prefixes: HashMap::new(),
            base: None,
        })
    }

    /// Parse the entire document.
    pub fn parse(mut self) -> Result<()> {
        while !self.is_at_end() {
            self.parse_block()?;
        }
        Ok(())
    }

    /// Check if we're at the end of input.
    fn is_at_end(&self) -> bool {
        matches!(self.current().kind, TokenKind::Eof)
    }

    /// Get the current token.
    fn current(&self) -> &Token {
        &self.tokens[self.pos]
    }

    /// Advance to the next token.
    fn advance(&mut self) -> &Token {
        let token = &self.tokens[self.pos];
        if !self.is_at_end() {
            self.pos += 1;
        }
        token
    }

    /// Check if the current token matches the expected kind.
    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.current().kind) == std::mem::discriminant(kind)
    }

    /// Consume a token of the expected kind, or return an error.
    fn expect(&mut self, kind: &TokenKind) -> Result<&Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(TurtleError::parse(
                self.current().start,
                format!("expected {}, found {}", kind, self.current().kind),
            ))
        }
    }

    /// Parse a top-level block (directive, graph block or triples).
    fn parse_block(&mut self) -> Result<()> {
        match &self.current().kind {
            TokenKind::KwPrefix | TokenKind::KwSparqlPrefix => self.parse_prefix_directive(),
            TokenKind::KwBase | TokenKind::KwSparqlBase => self.parse_base_directive(),
            TokenKind::KwGraph => self.parse_graph_keyword_block(),
            TokenKind::LBrace => self.parse_wrapped_graph(None),
            TokenKind::Eof => Ok(()),
            _ => self.parse_triples_or_graph(),
        }
    }

    /// Parse @prefix or PREFIX directive.
    fn parse_prefix_directive(&mut self) -> Result<()> {
        let is_sparql_style = matches!(self.current().kind, TokenKind::KwSparqlPrefix);
        self.advance(); // consume @prefix or PREFIX

        // Get prefix name (must be PrefixedNameNs)
        let prefix = match &self.current().kind {
            TokenKind::PrefixedNameNs(p) => p.to_string(),
            _ => {
                return Err(TurtleError::parse(
                    self.current().start,
                    "expected prefix namespace",
                ))
            }
        };
        self.advance();

        // Get namespace IRI
        let namespace = match &self.current().kind {
            TokenKind::Iri(iri) => self.resolve_iri(iri)?,
            _ => {
                return Err(TurtleError::parse(
                    self.current().start,
                    "expected IRI for prefix namespace",
                ))
            }
        };
        self.advance();

        // Register prefix
        self.sink.on_prefix(&prefix, &namespace);
        self.prefixes.insert(prefix, namespace);

        // Consume trailing dot (required for @prefix, not for PREFIX)
        if !is_sparql_style {
            self.expect(&TokenKind::Dot)?;
        }

        Ok(())
    }

    /// Parse @base or BASE directive.
    fn parse_base_directive(&mut self) -> Result<()> {
        let is_sparql_style = matches!(self.current().kind, TokenKind::KwSparqlBase);
        self.advance(); // consume @base or BASE

        // Get base IRI (may be relative to an earlier base)
        let base_iri = match &self.current().kind {
            TokenKind::Iri(iri) => self.resolve_iri(iri)?,
            _ => {
                return Err(TurtleError::parse(
                    self.current().start,
                    "expected IRI for base",
                ))
            }
        };
        self.advance();

        // Set base
        self.sink.on_base(&base_iri);
        self.base = Some(base_iri);

        // Consume trailing dot (required for @base, not for BASE)
        if !is_sparql_style {
            self.expect(&TokenKind::Dot)?;
        }

        Ok(())
    }

    /// Parse `GRAPH label { ... }` (TriG).
    fn parse_graph_keyword_block(&mut self) -> Result<()> {
        self.advance(); // consume GRAPH

        let label = self.try_parse_graph_label()?.ok_or_else(|| {
            TurtleError::parse(
                self.current().start,
                format!("expected graph label, found {}", self.current().kind),
            )
        })?;

        self.parse_wrapped_graph(Some(label))
    }

    /// Parse a top-level statement that starts with a node.
    ///
    /// In TriG an IRI or labeled blank node followed by `{` labels a graph
    /// block; anything else continues as a triples statement, optionally
    /// closed by an N-Quads graph label before the dot.
    fn parse_triples_or_graph(&mut self) -> Result<()> {
        // Only IRIs and labeled blank nodes can label a graph
        let labelable = matches!(
            self.current().kind,
            TokenKind::Iri(_)
                | TokenKind::PrefixedName { .. }
                | TokenKind::PrefixedNameNs(_)
                | TokenKind::BlankNodeLabel(_)
        );

        let subject = self.parse_subject(None)?;

        if labelable && matches!(self.current().kind, TokenKind::LBrace) {
            return self.parse_wrapped_graph(Some(subject));
        }

        let pairs = self.parse_predicate_object_list(None)?;

        // N-Quads style: an optional graph label may precede the closing dot
        let graph = self.try_parse_graph_label()?;
        self.emit_pairs(subject, &pairs, graph);

        self.expect(&TokenKind::Dot)?;

        Ok(())
    }

    /// Parse `{ ... }` with the given graph context.
    ///
    /// A `None` context is the anonymous default-graph block from TriG.
    /// Dots separate statements inside the block and the last one is
    /// optional.
    fn parse_wrapped_graph(&mut self, graph: Option<TermId>) -> Result<()> {
        self.expect(&TokenKind::LBrace)?;

        loop {
            if matches!(self.current().kind, TokenKind::RBrace) {
                break;
            }

            let subject = self.parse_subject(graph)?;
            let pairs = self.parse_predicate_object_list(graph)?;
            self.emit_pairs(subject, &pairs, graph);

            if matches!(self.current().kind, TokenKind::Dot) {
                self.advance();
            } else if !matches!(self.current().kind, TokenKind::RBrace) {
                return Err(TurtleError::parse(
                    self.current().start,
                    format!(
                        "expected '.' or '}}' in graph block, found {}",
                        self.current().kind
                    ),
                ));
            }
        }

        self.expect(&TokenKind::RBrace)?;

        Ok(())
    }

    /// Try to consume an IRI-valued node, returning its expanded IRI.
    ///
    /// Returns `Ok(None)` without consuming when the current token is not
    /// an IRI or prefixed name.
    fn try_parse_iri_node(&mut self) -> Result<Option<String>> {
        let iri = match &self.current().kind.clone() {
            TokenKind::Iri(iri) => self.resolve_iri(iri)?,
            TokenKind::PrefixedName { prefix, local } => {
                self.expand_prefixed_name(prefix, local)?
            }
            TokenKind::PrefixedNameNs(prefix) => self.expand_prefixed_name(prefix, "")?,
            _ => return Ok(None),
        };
        self.advance();
        Ok(Some(iri))
    }

    /// Try to consume an N-Quads graph label (IRI or labeled blank node).
    fn try_parse_graph_label(&mut self) -> Result<Option<TermId>> {
        if let Some(iri) = self.try_parse_iri_node()? {
            return Ok(Some(self.sink.term_iri(&iri)));
        }

        if let TokenKind::BlankNodeLabel(label) = &self.current().kind.clone() {
            self.advance();
            return Ok(Some(self.sink.term_blank(Some(label))));
        }

        Ok(None)
    }

    /// Parse a subject term.
    fn parse_subject(&mut self, graph: Option<TermId>) -> Result<TermId> {
        if let Some(iri) = self.try_parse_iri_node()? {
            return Ok(self.sink.term_iri(&iri));
        }

        match &self.current().kind.clone() {
            TokenKind::BlankNodeLabel(label) => {
                self.advance();
                Ok(self.sink.term_blank(Some(label)))
            }
            TokenKind::Anon => {
                self.advance();
                Ok(self.sink.term_blank(None))
            }
            TokenKind::LBracket => {
                // Blank node with property list: [ ... ]
                self.parse_blank_node_property_list(graph)
            }
            TokenKind::LParen => {
                // Collection (RDF list)
                self.parse_collection(graph)
            }
            TokenKind::Nil => {
                // Empty collection () is tokenized as Nil
                self.advance();
                Ok(self.sink.term_iri(rdf::NIL))
            }
            _ => Err(TurtleError::parse(
                self.current().start,
                format!("expected subject, found {}", self.current().kind),
            )),
        }
    }

    /// Parse a predicate-object list, collecting the pairs.
    ///
    /// Top-level pairs are returned rather than emitted so the caller can
    /// attach a graph context that is only known once the list ends.
    /// Statements produced by nested structures are emitted immediately
    /// into `graph`.
    fn parse_predicate_object_list(
        &mut self,
        graph: Option<TermId>,
    ) -> Result<Vec<(TermId, TermId)>> {
        let mut pairs = Vec::new();

        loop {
            // Parse predicate
            let predicate = self.parse_predicate()?;

            // Parse comma-separated objects
            loop {
                let object = self.parse_object(graph)?;
                pairs.push((predicate, object));

                if matches!(self.current().kind, TokenKind::Comma) {
                    self.advance();
                } else {
                    break;
                }
            }

            // Check for semicolon (more predicate-object pairs)
            if matches!(self.current().kind, TokenKind::Semicolon) {
                self.advance();
                // Semicolon can be followed by the statement end
                if matches!(
                    self.current().kind,
                    TokenKind::Dot | TokenKind::RBracket | TokenKind::RBrace | TokenKind::Eof
                ) {
                    break;
                }
            } else {
                break;
            }
        }

        Ok(pairs)
    }

    /// Parse a predicate.
    fn parse_predicate(&mut self) -> Result<TermId> {
        if let Some(iri) = self.try_parse_iri_node()? {
            return Ok(self.sink.term_iri(&iri));
        }

        match &self.current().kind {
            TokenKind::KwA => {
                self.advance();
                Ok(self.sink.term_iri(rdf::TYPE))
            }
            _ => Err(TurtleError::parse(
                self.current().start,
                format!("expected predicate, found {}", self.current().kind),
            )),
        }
    }

    /// Parse an object term.
    fn parse_object(&mut self, graph: Option<TermId>) -> Result<TermId> {
        if let Some(iri) = self.try_parse_iri_node()? {
            return Ok(self.sink.term_iri(&iri));
        }

        match &self.current().kind.clone() {
            TokenKind::BlankNodeLabel(label) => {
                self.advance();
                Ok(self.sink.term_blank(Some(label)))
            }
            TokenKind::Anon => {
                self.advance();
                Ok(self.sink.term_blank(None))
            }
            TokenKind::LBracket => self.parse_blank_node_property_list(graph),
            TokenKind::LParen => self.parse_collection(graph),
            TokenKind::Nil => {
                // Empty collection () is tokenized as Nil
                self.advance();
                Ok(self.sink.term_iri(rdf::NIL))
            }
            TokenKind::String(_)
            | TokenKind::Integer(_)
            | TokenKind::Decimal(_)
            | TokenKind::Double(_)
            | TokenKind::KwTrue
            | TokenKind::KwFalse => self.parse_literal(),
            _ => Err(TurtleError::parse(
                self.current().start,
                format!("expected object, found {}", self.current().kind),
            )),
        }
    }

    /// Parse a literal (string with optional language tag or datatype).
    fn parse_literal(&mut self) -> Result<TermId> {
        match &self.current().kind.clone() {
            TokenKind::String(value) => {
                let value = value.clone();
                self.advance();

                // Check for language tag or datatype
                match &self.current().kind.clone() {
                    TokenKind::LangTag(lang) => {
                        let lang = lang.clone();
                        self.advance();
                        Ok(self
                            .sink
                            .term_literal(&value, Datatype::rdf_lang_string(), Some(&lang)))
                    }
                    TokenKind::DoubleCaret => {
                        self.advance();
                        let datatype_iri = self.parse_datatype_iri()?;
                        let datatype = Datatype::from_iri(&datatype_iri);
                        Ok(self.sink.term_literal(&value, datatype, None))
                    }
                    _ => {
                        // Plain string literal
                        Ok(self.sink.term_literal(&value, Datatype::xsd_string(), None))
                    }
                }
            }
            TokenKind::Integer(n) => {
                let n = *n;
                self.advance();
                Ok(self
                    .sink
                    .term_literal_value(LiteralValue::Integer(n), Datatype::xsd_integer()))
            }
            TokenKind::Decimal(s) => {
                let s = s.clone();
                self.advance();
                Ok(self.sink.term_literal(&s, Datatype::xsd_decimal(), None))
            }
            TokenKind::Double(n) => {
                let n = *n;
                self.advance();
                Ok(self
                    .sink
                    .term_literal_value(LiteralValue::Double(n), Datatype::xsd_double()))
            }
            TokenKind::KwTrue => {
                self.advance();
                Ok(self
                    .sink
                    .term_literal_value(LiteralValue::Boolean(true), Datatype::xsd_boolean()))
            }
            TokenKind::KwFalse => {
                self.advance();
                Ok(self
                    .sink
                    .term_literal_value(LiteralValue::Boolean(false), Datatype::xsd_boolean()))
            }
            _ => Err(TurtleError::parse(
                self.current().start,
                format!("expected literal, found {}", self.current().kind),
            )),
        }
    }

    /// Parse a datatype IRI after ^^.
    fn parse_datatype_iri(&mut self) -> Result<String> {
        match self.try_parse_iri_node()? {
            Some(iri) => Ok(iri),
            None => Err(TurtleError::parse(
                self.current().start,
                format!("expected datatype IRI, found {}", self.current().kind),
            )),
        }
    }

    /// Parse a blank node property list: `[ predicate object ; ... ]`
    fn parse_blank_node_property_list(&mut self, graph: Option<TermId>) -> Result<TermId> {
        self.expect(&TokenKind::LBracket)?;

        // Create anonymous blank node
        let bnode = self.sink.term_blank(None);

        // Parse property list if not empty
        if !matches!(self.current().kind, TokenKind::RBracket) {
            let pairs = self.parse_predicate_object_list(graph)?;
            self.emit_pairs(bnode, &pairs, graph);
        }

        self.expect(&TokenKind::RBracket)?;

        Ok(bnode)
    }

    /// Parse a collection (RDF list): `( item1 item2 ... )`
    fn parse_collection(&mut self, graph: Option<TermId>) -> Result<TermId> {
        self.expect(&TokenKind::LParen)?;

        // Check for empty collection
        if matches!(self.current().kind, TokenKind::RParen) {
            self.advance();
            return Ok(self.sink.term_iri(rdf::NIL));
        }

        // Parse items and build linked list
        let rdf_first = self.sink.term_iri(rdf::FIRST);
        let rdf_rest = self.sink.term_iri(rdf::REST);
        let rdf_nil = self.sink.term_iri(rdf::NIL);

        let first_node = self.sink.term_blank(None);
        let mut current_node = first_node;

        loop {
            // Parse the item
            let item = self.parse_object(graph)?;

            // Emit rdf:first statement
            self.emit_statement(current_node, rdf_first, item, graph);

            // Check if there are more items
            if matches!(self.current().kind, TokenKind::RParen) {
                // End of list
                self.emit_statement(current_node, rdf_rest, rdf_nil, graph);
                break;
            } else {
                // More items - create next node and link it
                let next_node = self.sink.term_blank(None);
                self.emit_statement(current_node, rdf_rest, next_node, graph);
                current_node = next_node;
            }
        }

        self.expect(&TokenKind::RParen)?;

        Ok(first_node)
    }

    /// Emit a single statement into the given graph context.
    fn emit_statement(&mut self, s: TermId, p: TermId, o: TermId, graph: Option<TermId>) {
        match graph {
            Some(g) => self.sink.emit_in_graph(s, p, o, g),
            None => self.sink.emit(s, p, o),
        }
    }

    /// Emit collected predicate-object pairs for a subject.
    fn emit_pairs(&mut self, subject: TermId, pairs: &[(TermId, TermId)], graph: Option<TermId>) {
        for &(p, o) in pairs {
            self.emit_statement(subject, p, o, graph);
        }
    }

    /// Resolve a potentially relative IRI against the base (RFC3986).
    ///
    /// Implements the reference resolution algorithm from RFC 3986 Section 5.
    fn resolve_iri(&self, reference: &str) -> Result<String> {
        // Empty reference = base
        if reference.is_empty() {
            return match &self.base {
                Some(base) => Ok(base.clone()),
                None => Err(TurtleError::IriResolution(
                    "empty IRI reference without base".to_string(),
                )),
            };
        }

        // Check if reference has a scheme (absolute IRI)
        if let Some(colon_pos) = reference.find(':') {
            // Only treat as absolute if the part before ':' looks like a scheme
            // (letters followed by letters/digits/+/-/.)
            let potential_scheme = &reference[..colon_pos];
            let mut chars = potential_scheme.chars();
            if chars.next().is_some_and(|c| c.is_ascii_alphabetic())
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '-' || c == '.')
            {
                // Absolute IRI - return as-is
                return Ok(reference.to_string());
            }
        }

        // Relative reference - need base
        let base = match &self.base {
            Some(b) => b,
            None => {
                return Err(TurtleError::IriResolution(format!(
                    "relative IRI '{}' without base",
                    reference
                )));
            }
        };

        // Fragment-only reference: replace the base fragment
        if let Some(frag) = reference.strip_prefix('#') {
            let stripped = match base.find('#') {
                Some(pos) => &base[..pos],
                None => base.as_str(),
            };
            return Ok(format!("{}#{}", stripped, frag));
        }

        // Split off the reference fragment; re-attached after resolution
        let (reference, fragment) = match reference.find('#') {
            Some(pos) => (&reference[..pos], Some(&reference[pos + 1..])),
            None => (reference, None),
        };

        // Parse base IRI components
        let (base_scheme, base_authority, base_path, _base_query) = parse_iri_components(base);

        // RFC3986 Section 5.2.2 - Transform References
        let (scheme, authority, path, query) = if reference.starts_with("//") {
            // Reference has authority - use base scheme only
            let (ref_authority, ref_path, ref_query) = parse_hier_part(&reference[2..]);
            (
                base_scheme.to_string(),
                Some(ref_authority),
                remove_dot_segments(&ref_path),
                ref_query,
            )
        } else if reference.starts_with('/') {
            // Absolute path reference
            let (ref_path, ref_query) = split_path_query(reference);
            (
                base_scheme.to_string(),
                base_authority.map(|s| s.to_string()),
                remove_dot_segments(ref_path),
                ref_query.map(|s| s.to_string()),
            )
        } else if reference.starts_with('?') {
            // Query-only reference
            (
                base_scheme.to_string(),
                base_authority.map(|s| s.to_string()),
                base_path.to_string(),
                Some(reference[1..].to_string()),
            )
        } else {
            // Relative path reference - merge with base
            let (ref_path, ref_query) = split_path_query(reference);
            let merged = if base_authority.is_some() && base_path.is_empty() {
                format!("/{}", ref_path)
            } else {
                // Remove last segment of base path and append reference
                let base_dir = match base_path.rfind('/') {
                    Some(pos) => &base_path[..=pos],
                    None => "",
                };
                format!("{}{}", base_dir, ref_path)
            };
            (
                base_scheme.to_string(),
                base_authority.map(|s| s.to_string()),
                remove_dot_segments(&merged),
                ref_query.map(|s| s.to_string()),
            )
        };

        // Reconstruct the target IRI
        let mut result = scheme;
        result.push(':');
        if let Some(auth) = authority {
            result.push_str("//");
            result.push_str(&auth);
        }
        result.push_str(&path);
        if let Some(q) = query {
            result.push('?');
            result.push_str(&q);
        }
        if let Some(frag) = fragment {
            result.push('#');
            result.push_str(frag);
        }

        Ok(result)
    }

    /// Expand a prefixed name to a full IRI.
    fn expand_prefixed_name(&self, prefix: &str, local: &str) -> Result<String> {
        if let Some(namespace) = self.prefixes.get(prefix) {
            Ok(format!("{}{}", namespace, local))
        } else {
            Err(TurtleError::UndefinedPrefix(prefix.to_string()))
        }
    }
}

// =============================================================================
// RFC3986 IRI Resolution Helpers
// =============================================================================

/// Parse an IRI into (scheme, authority, path, query) components.
fn parse_iri_components(iri: &str) -> (&str, Option<&str>, &str, Option<&str>) {
    // Find scheme
    let (scheme, rest) = match iri.find(':') {
        Some(pos) => (&iri[..pos], &iri[pos + 1..]),
        None => return ("", None, iri, None),
    };

    // Check for authority (starts with //)
    let (authority, path_query) = if rest.starts_with("//") {
        let after_slashes = &rest[2..];
        // Authority ends at /, ?, or #
        let auth_end = after_slashes
            .find(|c| c == '/' || c == '?' || c == '#')
            .unwrap_or(after_slashes.len());
        (
            Some(&after_slashes[..auth_end]),
            &after_slashes[auth_end..],
        )
    } else {
        (None, rest)
    };

    // Split path and query
    let (path, query) = split_path_query(path_query);

    (scheme, authority, path, query)
}

/// Parse hierarchical part after "//" - returns (authority, path, query).
fn parse_hier_part(s: &str) -> (String, String, Option<String>) {
    // Authority ends at /, ?, or #
    let auth_end = s
        .find(|c| c == '/' || c == '?' || c == '#')
        .unwrap_or(s.len());
    let authority = s[..auth_end].to_string();
    let rest = &s[auth_end..];

    let (path, query) = split_path_query(rest);
    (authority, path.to_string(), query.map(|q| q.to_string()))
}

/// Split a path from its query component.
fn split_path_query(s: &str) -> (&str, Option<&str>) {
    let s = match s.find('#') {
        Some(pos) => &s[..pos],
        None => s,
    };

    match s.find('?') {
        Some(pos) => (&s[..pos], Some(&s[pos + 1..])),
        None => (s, None),
    }
}

/// Remove dot segments from a path (RFC3986 Section 5.2.4).
fn remove_dot_segments(path: &str) -> String {
    let mut output: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "." => {
                // Skip single dot
            }
            ".." => {
                // Go up one level (but not above root)
                output.pop();
            }
            s => {
                output.push(s);
            }
        }
    }

    // Preserve leading slash
    let result = output.join("/");
    if path.starts_with('/') && !result.starts_with('/') {
        format!("/{}", result)
    } else {
        result
    }
}

/// Parse a Turtle-family document into StatementSink events.
pub fn parse<S: StatementSink>(input: &str, sink: &mut S) -> Result<()> {
    Parser::new(input, sink)?.parse()
}

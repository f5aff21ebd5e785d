//! Term display normalization
//!
//! Stable identity strings and human-readable labels. Identity is the
//! canonical term string the builder dedupes on; labels compact well-known
//! namespaces, shorten long literals, and keep the `_:` marker on blank
//! nodes. Pure functions, no failure path: anything unrecognizable falls
//! back to plain string display.

use weft_graph_ir::Term;
use weft_vocab::prefixes;

/// Longest display label before truncation, in characters
pub const MAX_LABEL_CHARS: usize = 30;

/// Stable identity string for a term.
///
/// IRIs are their own id, blank nodes keep the `_:` marker so they can
/// never collide with an IRI, and literals use their full lexical value
/// (the builder scopes literal node ids with subject and predicate).
pub fn canonical_id(term: &Term) -> String {
    if let Some(iri) = term.as_iri() {
        return iri.to_string();
    }
    if let Some(blank) = term.as_blank() {
        return format!("_:{}", blank.as_str());
    }
    term.lexical_form().unwrap_or_default()
}

/// Human-readable display label for a term
pub fn display_label(term: &Term) -> String {
    if let Some(iri) = term.as_iri() {
        return compact_iri(iri);
    }
    if let Some(blank) = term.as_blank() {
        return format!("_:{}", blank.as_str());
    }
    truncate(&term.lexical_form().unwrap_or_default(), MAX_LABEL_CHARS)
}

/// Compact an IRI against the fixed well-known prefix table, falling back
/// to the substring after the last `/` or `#`, or the whole IRI when that
/// substring is empty
pub fn compact_iri(iri: &str) -> String {
    if let Some((prefix, local)) = prefixes::split_well_known(iri) {
        return format!("{}:{}", prefix, local);
    }
    match iri.rfind(|c| c == '/' || c == '#') {
        Some(pos) if pos + 1 < iri.len() => iri[pos + 1..].to_string(),
        _ => iri.to_string(),
    }
}

/// Shorten a value to at most `max` characters, ending in `…` when
/// anything was cut. Counts characters, not bytes.
pub fn truncate(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        return value.to_string();
    }
    let mut shortened: String = value.chars().take(max.saturating_sub(1)).collect();
    shortened.push('…');
    shortened
}

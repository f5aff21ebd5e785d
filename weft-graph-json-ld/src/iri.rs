//! IRI helpers for context parsing and expansion

/// Split a compact IRI like `foaf:name` into (prefix, suffix).
///
/// Returns `None` for anything that is not prefix-shaped: full IRIs
/// (`http://...`, the suffix would start with `//`), prefixes containing
/// `/`, and plain terms with no colon. The form `:name` maps to the
/// conventional empty-prefix key `":"`.
pub fn parse_prefix(s: &str) -> Option<(String, String)> {
    let (prefix, suffix) = s.split_once(':')?;

    if prefix.contains('/') || suffix.starts_with("//") {
        return None;
    }

    if prefix.is_empty() {
        if suffix.is_empty() {
            return None;
        }
        return Some((":".to_string(), suffix.to_string()));
    }

    Some((prefix.to_string(), suffix.to_string()))
}

/// True when the string could be an IRI or compact IRI (contains a colon).
///
/// Plain vocabulary terms have no colon and are candidates for @vocab
/// expansion.
pub fn is_iri_like(s: &str) -> bool {
    s.contains(':')
}

/// True when the IRI carries an RFC 3986 scheme.
///
/// The scheme grammar is `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`,
/// which covers every scheme (http, urn, did, mailto, ipfs, ...) without a
/// hardcoded list. Compact IRIs like `foaf:name` also pass this test; the
/// distinction is made by `parse_prefix`, which rejects `//` suffixes.
pub fn is_absolute(iri: &str) -> bool {
    match iri.split_once(':') {
        Some((scheme, _)) if !scheme.is_empty() => {
            scheme.as_bytes()[0].is_ascii_alphabetic()
                && scheme
                    .bytes()
                    .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'+' | b'-' | b'.'))
        }
        _ => false,
    }
}

/// Ensure a namespace IRI ends with a term separator (`/` or `#`).
pub fn as_namespace(iri: &str) -> String {
    if iri.ends_with('/') || iri.ends_with('#') {
        iri.to_string()
    } else {
        format!("{}/", iri)
    }
}

/// Join a relative reference onto a base IRI.
///
/// Fragments replace from the base's end, absolute references pass through,
/// and everything else appends after a separator.
pub fn join(base: &str, relative: &str) -> String {
    if relative.starts_with('#') {
        format!("{}{}", base.trim_end_matches('/'), relative)
    } else if is_absolute(relative) {
        relative.to_string()
    } else {
        format!("{}{}", as_namespace(base), relative)
    }
}

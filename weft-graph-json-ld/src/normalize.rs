//! Canonical JSON serialization (RFC 8785)
//!
//! The lexical form of an rdf:JSON literal is the canonical serialization
//! of its value, so equal JSON data always yields equal literals no matter
//! how the source document was formatted.

use serde_json::Value as JsonValue;
use std::cmp::Ordering;

/// Serialize a JSON value to its RFC 8785 canonical form.
pub fn normalize(value: &JsonValue) -> String {
    let mut out = String::new();
    write_value(&mut out, value);
    out
}

fn write_value(out: &mut String, value: &JsonValue) {
    match value {
        JsonValue::Null => out.push_str("null"),
        JsonValue::Bool(true) => out.push_str("true"),
        JsonValue::Bool(false) => out.push_str("false"),
        JsonValue::Number(n) => out.push_str(&canonical_number(n)),
        JsonValue::String(s) => write_string(out, s),
        JsonValue::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_value(out, item);
            }
            out.push(']');
        }
        JsonValue::Object(map) => {
            // Member order is lexicographic over UTF-16 code units, not
            // code points or locale order
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort_by(|a, b| utf16_cmp(a, b));

            out.push('{');
            for (i, key) in keys.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_string(out, key);
                out.push(':');
                write_value(out, &map[key.as_str()]);
            }
            out.push('}');
        }
    }
}

fn utf16_cmp(a: &str, b: &str) -> Ordering {
    a.encode_utf16().cmp(b.encode_utf16())
}

fn canonical_number(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        i.to_string()
    } else if let Some(u) = n.as_u64() {
        u.to_string()
    } else if let Some(f) = n.as_f64() {
        canonical_double(f)
    } else {
        n.to_string()
    }
}

/// Double serialization per the RFC's ECMAScript number-to-string rules:
/// integral values print without a fraction, moderate magnitudes print in
/// positional notation, and magnitudes at or above 1e21 or below 1e-6
/// switch to exponential form.
fn canonical_double(f: f64) -> String {
    if f == 0.0 {
        return "0".to_string();
    }

    if f.fract() == 0.0 && f.abs() < 1e15 {
        return (f as i64).to_string();
    }

    let magnitude = f.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        return exponential_form(f);
    }

    // Display for f64 already prints the shortest round-trip decimal and
    // never uses an exponent, which matches the positional range here
    format!("{}", f)
}

/// `{:e}` output with the `+` that ECMAScript requires on non-negative
/// exponents.
fn exponential_form(f: f64) -> String {
    let formatted = format!("{:e}", f);
    match formatted.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
        _ => formatted,
    }
}

fn write_string(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c < ' ' => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
}

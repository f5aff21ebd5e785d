//! RDF datatype representation
//!
//! Datatypes are always explicit in this IR - there is no "untyped" literal.
//! Plain strings default to `xsd:string`, and language-tagged strings use
//! `rdf:langString`.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Common XSD and RDF datatype IRIs (re-exported from the vocab crate)
pub mod iri {
    pub use weft_vocab::rdf::{JSON as RDF_JSON, LANG_STRING as RDF_LANG_STRING, TYPE as RDF_TYPE};
    pub use weft_vocab::xsd::{
        BOOLEAN as XSD_BOOLEAN, DECIMAL as XSD_DECIMAL, DOUBLE as XSD_DOUBLE,
        INTEGER as XSD_INTEGER, STRING as XSD_STRING,
    };
}

/// RDF literal datatype
///
/// Datatypes are always explicit. Use `Datatype::xsd_string()` for plain
/// strings, `Datatype::rdf_lang_string()` for language-tagged strings.
///
/// # Special Handling
///
/// - `JsonLdJson` represents the JSON-LD `@json` datatype, which maps to
///   `rdf:JSON` in RDF but is recognized separately so JSON-LD output can
///   emit `"@type": "@json"` instead of the full IRI.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Datatype {
    /// Standard XSD/RDF datatype IRI (always expanded)
    Iri(Arc<str>),
    /// JSON-LD @json special type (maps to rdf:JSON)
    JsonLdJson,
}

impl Datatype {
    /// Create a datatype from an expanded IRI
    pub fn from_iri(iri: impl AsRef<str>) -> Self {
        let iri = iri.as_ref();
        // Recognize @json / rdf:JSON specially
        if iri == iri::RDF_JSON || iri == "@json" {
            Datatype::JsonLdJson
        } else {
            Datatype::Iri(Arc::from(iri))
        }
    }

    /// xsd:string - default for plain string literals
    pub fn xsd_string() -> Self {
        Datatype::Iri(Arc::from(iri::XSD_STRING))
    }

    /// xsd:boolean
    pub fn xsd_boolean() -> Self {
        Datatype::Iri(Arc::from(iri::XSD_BOOLEAN))
    }

    /// xsd:integer
    pub fn xsd_integer() -> Self {
        Datatype::Iri(Arc::from(iri::XSD_INTEGER))
    }

    /// xsd:decimal
    pub fn xsd_decimal() -> Self {
        Datatype::Iri(Arc::from(iri::XSD_DECIMAL))
    }

    /// xsd:double
    pub fn xsd_double() -> Self {
        Datatype::Iri(Arc::from(iri::XSD_DOUBLE))
    }

    /// rdf:langString - for language-tagged literals
    pub fn rdf_lang_string() -> Self {
        Datatype::Iri(Arc::from(iri::RDF_LANG_STRING))
    }

    /// rdf:JSON / @json
    pub fn rdf_json() -> Self {
        Datatype::JsonLdJson
    }

    /// Get the IRI representation of this datatype
    pub fn as_iri(&self) -> &str {
        match self {
            Datatype::Iri(iri) => iri,
            Datatype::JsonLdJson => iri::RDF_JSON,
        }
    }

    /// Check if this is the xsd:string datatype
    pub fn is_xsd_string(&self) -> bool {
        matches!(self, Datatype::Iri(iri) if iri.as_ref() == iri::XSD_STRING)
    }

    /// Check if this is the rdf:langString datatype
    pub fn is_lang_string(&self) -> bool {
        matches!(self, Datatype::Iri(iri) if iri.as_ref() == iri::RDF_LANG_STRING)
    }

    /// Check if this is the @json / rdf:JSON datatype
    pub fn is_json(&self) -> bool {
        matches!(self, Datatype::JsonLdJson)
    }

    /// Check if this is a numeric type (integer, decimal, double)
    pub fn is_numeric(&self) -> bool {
        match self {
            Datatype::Iri(iri) => matches!(
                iri.as_ref(),
                iri::XSD_INTEGER | iri::XSD_DECIMAL | iri::XSD_DOUBLE
            ),
            Datatype::JsonLdJson => false,
        }
    }
}

impl PartialEq for Datatype {
    fn eq(&self, other: &Self) -> bool {
        self.as_iri() == other.as_iri()
    }
}

impl Eq for Datatype {}

impl Hash for Datatype {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_iri().hash(state);
    }
}

impl PartialOrd for Datatype {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Datatype {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_iri().cmp(other.as_iri())
    }
}

impl std::fmt::Display for Datatype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_iri())
    }
}

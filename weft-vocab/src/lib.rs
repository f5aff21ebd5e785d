//! RDF Vocabulary Constants for weft
//!
//! This crate provides a centralized location for the vocabulary IRIs and
//! namespace tables used throughout the weft graph pipeline.
//!
//! # Organization
//!
//! Constants are organized by vocabulary:
//! - `rdf` - RDF vocabulary (http://www.w3.org/1999/02/22-rdf-syntax-ns#)
//! - `rdfs` - RDFS vocabulary (http://www.w3.org/2000/01/rdf-schema#)
//! - `xsd` - XSD datatypes (http://www.w3.org/2001/XMLSchema#)
//! - `owl` - OWL vocabulary (http://www.w3.org/2002/07/owl#)
//! - `foaf` - FOAF vocabulary (http://xmlns.com/foaf/0.1/)
//! - `dct` - Dublin Core terms (http://purl.org/dc/terms/)
//! - `schema` - schema.org (https://schema.org/)
//! - `prefixes` - the fixed well-known prefix table used for display compaction

/// RDF vocabulary constants
pub mod rdf {
    /// RDF namespace IRI
    pub const NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

    /// rdf:type IRI
    pub const TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

    /// rdf:langString IRI
    pub const LANG_STRING: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString";

    /// rdf:JSON IRI
    pub const JSON: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#JSON";

    /// rdf:first IRI (RDF list head)
    pub const FIRST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#first";

    /// rdf:rest IRI (RDF list tail)
    pub const REST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#rest";

    /// rdf:nil IRI (RDF list terminator)
    pub const NIL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#nil";
}

/// RDFS vocabulary constants
pub mod rdfs {
    /// RDFS namespace IRI
    pub const NS: &str = "http://www.w3.org/2000/01/rdf-schema#";

    /// rdfs:label IRI
    pub const LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";

    /// rdfs:comment IRI
    pub const COMMENT: &str = "http://www.w3.org/2000/01/rdf-schema#comment";

    /// rdfs:subClassOf IRI
    pub const SUB_CLASS_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subClassOf";

    /// rdfs:subPropertyOf IRI
    pub const SUB_PROPERTY_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subPropertyOf";

    /// rdfs:domain IRI
    pub const DOMAIN: &str = "http://www.w3.org/2000/01/rdf-schema#domain";

    /// rdfs:range IRI
    pub const RANGE: &str = "http://www.w3.org/2000/01/rdf-schema#range";

    /// rdfs:seeAlso IRI
    pub const SEE_ALSO: &str = "http://www.w3.org/2000/01/rdf-schema#seeAlso";
}

/// XSD datatype constants
pub mod xsd {
    /// XSD namespace IRI
    pub const NS: &str = "http://www.w3.org/2001/XMLSchema#";

    /// xsd:string IRI
    pub const STRING: &str = "http://www.w3.org/2001/XMLSchema#string";

    /// xsd:boolean IRI
    pub const BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";

    /// xsd:integer IRI
    pub const INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";

    /// xsd:long IRI
    pub const LONG: &str = "http://www.w3.org/2001/XMLSchema#long";

    /// xsd:int IRI
    pub const INT: &str = "http://www.w3.org/2001/XMLSchema#int";

    /// xsd:decimal IRI
    pub const DECIMAL: &str = "http://www.w3.org/2001/XMLSchema#decimal";

    /// xsd:float IRI
    pub const FLOAT: &str = "http://www.w3.org/2001/XMLSchema#float";

    /// xsd:double IRI
    pub const DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";

    /// xsd:date IRI
    pub const DATE: &str = "http://www.w3.org/2001/XMLSchema#date";

    /// xsd:dateTime IRI
    pub const DATE_TIME: &str = "http://www.w3.org/2001/XMLSchema#dateTime";

    /// xsd:time IRI
    pub const TIME: &str = "http://www.w3.org/2001/XMLSchema#time";

    /// xsd:anyURI IRI
    pub const ANY_URI: &str = "http://www.w3.org/2001/XMLSchema#anyURI";

    /// Check if a datatype IRI is a numeric type
    #[inline]
    pub fn is_numeric_datatype(datatype_iri: &str) -> bool {
        matches!(
            datatype_iri,
            INTEGER | LONG | INT | DECIMAL | FLOAT | DOUBLE
        )
    }
}

/// OWL vocabulary constants
pub mod owl {
    /// OWL namespace IRI
    pub const NS: &str = "http://www.w3.org/2002/07/owl#";

    /// owl:Ontology IRI
    pub const ONTOLOGY: &str = "http://www.w3.org/2002/07/owl#Ontology";

    /// owl:Class IRI
    pub const CLASS: &str = "http://www.w3.org/2002/07/owl#Class";

    /// owl:ObjectProperty IRI
    pub const OBJECT_PROPERTY: &str = "http://www.w3.org/2002/07/owl#ObjectProperty";

    /// owl:DatatypeProperty IRI
    pub const DATATYPE_PROPERTY: &str = "http://www.w3.org/2002/07/owl#DatatypeProperty";

    /// owl:sameAs IRI
    pub const SAME_AS: &str = "http://www.w3.org/2002/07/owl#sameAs";

    /// owl:equivalentClass IRI
    pub const EQUIVALENT_CLASS: &str = "http://www.w3.org/2002/07/owl#equivalentClass";
}

/// FOAF vocabulary constants
pub mod foaf {
    /// FOAF namespace IRI
    pub const NS: &str = "http://xmlns.com/foaf/0.1/";

    /// foaf:Person IRI
    pub const PERSON: &str = "http://xmlns.com/foaf/0.1/Person";

    /// foaf:name IRI
    pub const NAME: &str = "http://xmlns.com/foaf/0.1/name";

    /// foaf:knows IRI
    pub const KNOWS: &str = "http://xmlns.com/foaf/0.1/knows";

    /// foaf:nick IRI
    pub const NICK: &str = "http://xmlns.com/foaf/0.1/nick";

    /// foaf:mbox IRI
    pub const MBOX: &str = "http://xmlns.com/foaf/0.1/mbox";

    /// foaf:homepage IRI
    pub const HOMEPAGE: &str = "http://xmlns.com/foaf/0.1/homepage";
}

/// Dublin Core terms constants
pub mod dct {
    /// DCT namespace IRI
    pub const NS: &str = "http://purl.org/dc/terms/";

    /// dct:title IRI
    pub const TITLE: &str = "http://purl.org/dc/terms/title";

    /// dct:creator IRI
    pub const CREATOR: &str = "http://purl.org/dc/terms/creator";

    /// dct:description IRI
    pub const DESCRIPTION: &str = "http://purl.org/dc/terms/description";

    /// dct:date IRI
    pub const DATE: &str = "http://purl.org/dc/terms/date";

    /// dct:license IRI
    pub const LICENSE: &str = "http://purl.org/dc/terms/license";
}

/// schema.org vocabulary constants
pub mod schema {
    /// schema.org namespace IRI (https form)
    pub const NS: &str = "https://schema.org/";

    /// schema.org namespace IRI (legacy http form, still common in the wild)
    pub const NS_HTTP: &str = "http://schema.org/";

    /// schema:name IRI
    pub const NAME: &str = "https://schema.org/name";

    /// schema:Person IRI
    pub const PERSON: &str = "https://schema.org/Person";

    /// schema:url IRI
    pub const URL: &str = "https://schema.org/url";

    /// schema:description IRI
    pub const DESCRIPTION: &str = "https://schema.org/description";
}

/// Fixed well-known prefix table for display compaction
///
/// Display labels compact an IRI against this table only; prefix
/// declarations found in parsed documents are deliberately not consulted,
/// so the same data gets the same labels regardless of serialization.
pub mod prefixes {
    /// (prefix, namespace IRI) pairs checked in order.
    ///
    /// schema.org appears twice because both URI schemes occur in real data.
    pub const WELL_KNOWN: &[(&str, &str)] = &[
        ("rdf", super::rdf::NS),
        ("rdfs", super::rdfs::NS),
        ("owl", super::owl::NS),
        ("foaf", super::foaf::NS),
        ("dct", super::dct::NS),
        ("schema", super::schema::NS),
        ("schema", super::schema::NS_HTTP),
    ];

    /// Split an IRI into (prefix, local name) against the well-known table.
    ///
    /// Returns `None` when no namespace matches or when the match leaves an
    /// empty local name (the bare namespace IRI compacts to nothing useful).
    pub fn split_well_known(iri: &str) -> Option<(&'static str, &str)> {
        for &(prefix, ns) in WELL_KNOWN {
            if let Some(local) = iri.strip_prefix(ns) {
                if !local.is_empty() {
                    return Some((prefix, local));
                }
            }
        }
        None
    }
}

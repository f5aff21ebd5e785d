//! Format dispatch
//!
//! The file extension picks the parsing strategy. `.owl` ships in several
//! serializations, so it is resolved by sniffing the content instead.

/// A recognized serialization family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphFormat {
    /// Turtle, N3, N-Triples: `.`-terminated triple statements
    Turtle,
    /// N-Quads, TriG: the same grammar plus graph labels
    Quads,
    /// RDF/XML: no native XML grammar; best-effort pass through the
    /// Turtle-family parser
    RdfXml,
    /// JSON-LD: expansion to canonical N-Quads, then the family grammar
    JsonLd,
}

impl GraphFormat {
    /// Pick a format from the file extension, case-insensitively. `.owl`
    /// is resolved by content sniffing. Returns `None` for extensions no
    /// strategy covers.
    pub fn detect(file_name: &str, text: &str) -> Option<GraphFormat> {
        let extension = extension(file_name)?;
        match extension.to_ascii_lowercase().as_str() {
            "ttl" | "turtle" | "n3" | "nt" => Some(GraphFormat::Turtle),
            "nq" | "trig" => Some(GraphFormat::Quads),
            "rdf" => Some(GraphFormat::RdfXml),
            "jsonld" => Some(GraphFormat::JsonLd),
            "owl" => Some(sniff(text)),
            _ => None,
        }
    }

    /// True for formats parsed without a grammar of their own
    pub fn is_best_effort(self) -> bool {
        matches!(self, GraphFormat::RdfXml)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GraphFormat::Turtle => "turtle",
            GraphFormat::Quads => "quads",
            GraphFormat::RdfXml => "rdf-xml",
            GraphFormat::JsonLd => "json-ld",
        }
    }
}

/// The extension of a file name, without the dot
pub fn extension(file_name: &str) -> Option<&str> {
    file_name.rsplit_once('.').map(|(_, ext)| ext)
}

/// OWL ontologies arrive as RDF/XML, JSON-LD, or Turtle. The first
/// non-whitespace characters are enough to tell them apart.
fn sniff(text: &str) -> GraphFormat {
    let trimmed = text.trim_start();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return GraphFormat::JsonLd;
    }
    if trimmed.starts_with("<?xml") || trimmed.starts_with("<rdf:") || trimmed.starts_with("<!--") {
        return GraphFormat::RdfXml;
    }
    GraphFormat::Turtle
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_dispatch() {
        assert_eq!(
            GraphFormat::detect("data.ttl", ""),
            Some(GraphFormat::Turtle)
        );
        assert_eq!(
            GraphFormat::detect("data.turtle", ""),
            Some(GraphFormat::Turtle)
        );
        assert_eq!(GraphFormat::detect("data.n3", ""), Some(GraphFormat::Turtle));
        assert_eq!(GraphFormat::detect("data.nt", ""), Some(GraphFormat::Turtle));
        assert_eq!(GraphFormat::detect("data.nq", ""), Some(GraphFormat::Quads));
        assert_eq!(
            GraphFormat::detect("data.trig", ""),
            Some(GraphFormat::Quads)
        );
        assert_eq!(
            GraphFormat::detect("data.rdf", ""),
            Some(GraphFormat::RdfXml)
        );
        assert_eq!(
            GraphFormat::detect("data.jsonld", ""),
            Some(GraphFormat::JsonLd)
        );
    }

    #[test]
    fn test_extension_is_case_insensitive() {
        assert_eq!(
            GraphFormat::detect("DATA.TTL", ""),
            Some(GraphFormat::Turtle)
        );
        assert_eq!(
            GraphFormat::detect("Ontology.TriG", ""),
            Some(GraphFormat::Quads)
        );
    }

    #[test]
    fn test_unknown_or_missing_extension() {
        assert_eq!(GraphFormat::detect("data.xlsx", ""), None);
        assert_eq!(GraphFormat::detect("README", ""), None);
    }

    #[test]
    fn test_owl_sniffs_content() {
        assert_eq!(
            GraphFormat::detect("onto.owl", "{\"@context\": {}}"),
            Some(GraphFormat::JsonLd)
        );
        assert_eq!(
            GraphFormat::detect("onto.owl", "[{\"@id\": \"x\"}]"),
            Some(GraphFormat::JsonLd)
        );
        assert_eq!(
            GraphFormat::detect("onto.owl", "<?xml version=\"1.0\"?>\n<rdf:RDF/>"),
            Some(GraphFormat::RdfXml)
        );
        assert_eq!(
            GraphFormat::detect("onto.owl", "  <rdf:RDF xmlns=\"x\"/>"),
            Some(GraphFormat::RdfXml)
        );
        assert_eq!(
            GraphFormat::detect("onto.owl", "@prefix owl: <http://www.w3.org/2002/07/owl#> ."),
            Some(GraphFormat::Turtle)
        );
    }

    #[test]
    fn test_only_the_last_extension_counts() {
        assert_eq!(
            GraphFormat::detect("dump.backup.nq", ""),
            Some(GraphFormat::Quads)
        );
    }
}

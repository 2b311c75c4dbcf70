//! Identifier helpers
//!
//! Node identifiers are CURIEs (`prefix:local`). Gene aliases come in two
//! shapes: a full CURIE (`HGNC:613`) that must equal the node id, and a bare
//! symbol (`APOE`) that must equal the local part of an id in one of the
//! gene namespaces. Comparison ignores case. `alzkb:APOE_e3e4` and
//! `HGNC:6130` therefore do not match the APOE aliases.

use crate::vocabulary::GENE_ID_PREFIXES;

/// Build a CURIE from a prefix and a local id
pub fn curie(prefix: &str, local: &str) -> String {
    format!("{}:{}", prefix, local.trim())
}

/// Last path segment of an ontology URI
///
/// `http://purl.obolibrary.org/obo/MONDO_0004975` becomes `MONDO_0004975`.
/// Input without a slash is returned trimmed.
pub fn trait_id_from_uri(uri: &str) -> &str {
    let uri = uri.trim().trim_end_matches('/');
    uri.rsplit('/').next().unwrap_or(uri)
}

/// Split a CURIE into prefix and local part
pub fn split_curie(id: &str) -> Option<(&str, &str)> {
    id.split_once(':')
}

/// Whether `id` names the gene given by any of `aliases`, ignoring case
pub fn matches_gene_alias<S: AsRef<str>>(id: &str, aliases: &[S]) -> bool {
    let id = id.trim();
    let gene_local = split_curie(id)
        .filter(|(prefix, _)| GENE_ID_PREFIXES.iter().any(|g| g.eq_ignore_ascii_case(prefix)))
        .map(|(_, local)| local);

    aliases
        .iter()
        .map(|a| a.as_ref().trim())
        .filter(|a| !a.is_empty())
        .any(|alias| {
            if alias.contains(':') {
                id.eq_ignore_ascii_case(alias)
            } else {
                gene_local.is_some_and(|local| local.eq_ignore_ascii_case(alias))
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curie() {
        assert_eq!(curie("dbSNP", " rs7412 "), "dbSNP:rs7412");
    }

    #[test]
    fn test_trait_id_from_uri() {
        assert_eq!(
            trait_id_from_uri("http://purl.obolibrary.org/obo/MONDO_0004975"),
            "MONDO_0004975"
        );
        assert_eq!(trait_id_from_uri("EFO_0000249"), "EFO_0000249");
        assert_eq!(trait_id_from_uri("http://x/EFO_1/"), "EFO_1");
    }

    #[test]
    fn test_alias_matching() {
        let aliases = ["HGNC:613", "APOE"];
        assert!(matches_gene_alias("HGNC:613", &aliases));
        assert!(matches_gene_alias("hgnc:apoe", &aliases));
        assert!(!matches_gene_alias("HGNC:1100", &aliases));

        let empty: [&str; 1] = [""];
        assert!(!matches_gene_alias("anything", &empty));
    }

    #[test]
    fn test_alias_matching_ignores_lookalikes() {
        let aliases = ["HGNC:613", "APOE"];
        assert!(!matches_gene_alias("alzkb:APOE_e3e4", &aliases));
        assert!(!matches_gene_alias("HGNC:6130", &aliases));
        assert!(!matches_gene_alias("HGNC:APOER2", &aliases));
        assert!(!matches_gene_alias("sample:APOE", &aliases));
        assert!(!matches_gene_alias("APOE", &aliases));
    }

    #[test]
    fn test_split_curie() {
        assert_eq!(split_curie("HGNC:APOE"), Some(("HGNC", "APOE")));
        assert_eq!(split_curie("APOE"), None);
    }
}

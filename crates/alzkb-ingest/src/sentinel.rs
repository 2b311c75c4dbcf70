//! Sentinel selection
//!
//! Simplified LD pruning: associations at the same (gene, chromosome) locus
//! are treated as one signal and represented by their strongest record.
//! This is a grouping heuristic, not window-based clumping.

use alzkb_domain::AssociationRecord;
use std::collections::HashMap;

/// Outcome of a selection run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SentinelSelection {
    /// One record per locus, in order of the locus' first appearance
    pub sentinels: Vec<AssociationRecord>,

    /// Records dropped because their trait is not on the allowlist
    pub off_allowlist: usize,

    /// Records dropped because their p-value was missing or not numeric
    pub non_numeric: usize,

    /// Records folded into a stronger sentinel
    pub redundant: usize,
}

impl SentinelSelection {
    /// Total number of records that did not become sentinels
    pub fn discarded(&self) -> usize {
        self.off_allowlist + self.non_numeric + self.redundant
    }
}

/// Select one sentinel per (gene, chromosome) locus
///
/// Records whose trait is off the allowlist or whose p-value is missing are
/// discarded. Within each locus the record with the smallest p-value wins;
/// on ties the earlier record wins. A missing gene or chromosome is a valid
/// key of its own.
///
/// # Arguments
/// * `records` - Parsed association rows, in source order
/// * `allowlist` - Accepted trait ids (last segment of the trait URI)
pub fn select<S: AsRef<str>>(records: &[AssociationRecord], allowlist: &[S]) -> SentinelSelection {
    let mut selection = SentinelSelection::default();
    let mut slot_of: HashMap<(Option<String>, Option<String>), usize> = HashMap::new();
    let mut best: Vec<(f64, &AssociationRecord)> = Vec::new();

    for record in records {
        let allowed = record
            .trait_id()
            .is_some_and(|id| allowlist.iter().any(|a| a.as_ref() == id));
        if !allowed {
            selection.off_allowlist += 1;
            continue;
        }

        let Some(p_value) = record.p_value.filter(|p| !p.is_nan()) else {
            selection.non_numeric += 1;
            continue;
        };

        match slot_of.get(&record.group_key()) {
            Some(&slot) => {
                selection.redundant += 1;
                if p_value < best[slot].0 {
                    best[slot] = (p_value, record);
                }
            }
            None => {
                slot_of.insert(record.group_key(), best.len());
                best.push((p_value, record));
            }
        }
    }

    selection.sentinels = best.into_iter().map(|(_, r)| r.clone()).collect();

    tracing::info!(
        input = records.len(),
        sentinels = selection.sentinels.len(),
        off_allowlist = selection.off_allowlist,
        non_numeric = selection.non_numeric,
        redundant = selection.redundant,
        "Sentinel selection complete"
    );

    selection
}

#[cfg(test)]
mod tests {
    use super::*;

    const AD: &str = "http://www.ebi.ac.uk/efo/EFO_0000249";
    const ALLOW: [&str; 1] = ["EFO_0000249"];

    fn record(row: usize, rs: &str, gene: Option<&str>, chr: Option<&str>, p: Option<f64>) -> AssociationRecord {
        let mut r = AssociationRecord::new(row, rs);
        r.trait_uri = Some(AD.to_string());
        r.gene_symbol = gene.map(str::to_string);
        r.chromosome = chr.map(str::to_string);
        r.p_value = p;
        r
    }

    #[test]
    fn test_keeps_minimum_per_locus() {
        let records = vec![
            record(1, "rs1", Some("APOE"), Some("19"), Some(1e-10)),
            record(2, "rs2", Some("APOE"), Some("19"), Some(1e-300)),
            record(3, "rs3", Some("BIN1"), Some("2"), Some(1e-20)),
        ];
        let selection = select(&records, &ALLOW);

        let ids: Vec<_> = selection.sentinels.iter().map(|r| r.variant_id.as_str()).collect();
        assert_eq!(ids, vec!["rs2", "rs3"]);
        assert_eq!(selection.redundant, 1);
    }

    #[test]
    fn test_ties_keep_first_occurrence() {
        let records = vec![
            record(1, "rs_first", Some("CLU"), Some("8"), Some(1e-9)),
            record(2, "rs_second", Some("CLU"), Some("8"), Some(1e-9)),
        ];
        let selection = select(&records, &ALLOW);
        assert_eq!(selection.sentinels[0].variant_id, "rs_first");
    }

    #[test]
    fn test_filters_off_allowlist_and_missing_p() {
        let mut off = record(1, "rs1", Some("APOE"), Some("19"), Some(1e-9));
        off.trait_uri = Some("http://www.ebi.ac.uk/efo/EFO_0001360".to_string());
        let mut no_trait = record(2, "rs2", Some("APOE"), Some("19"), Some(1e-9));
        no_trait.trait_uri = None;

        let records = vec![
            off,
            no_trait,
            record(3, "rs3", Some("APOE"), Some("19"), None),
            record(4, "rs4", Some("APOE"), Some("19"), Some(f64::NAN)),
            record(5, "rs5", Some("APOE"), Some("19"), Some(0.01)),
        ];
        let selection = select(&records, &ALLOW);

        assert_eq!(selection.off_allowlist, 2);
        assert_eq!(selection.non_numeric, 2);
        assert_eq!(selection.sentinels.len(), 1);
        assert_eq!(selection.sentinels[0].variant_id, "rs5");
        assert_eq!(selection.discarded(), 4);
    }

    #[test]
    fn test_missing_gene_is_its_own_group() {
        let records = vec![
            record(1, "rs1", None, Some("19"), Some(1e-9)),
            record(2, "rs2", Some("APOE"), Some("19"), Some(1e-5)),
            record(3, "rs3", None, Some("19"), Some(1e-12)),
        ];
        let selection = select(&records, &ALLOW);

        let ids: Vec<_> = selection.sentinels.iter().map(|r| r.variant_id.as_str()).collect();
        assert_eq!(ids, vec!["rs3", "rs2"]);
    }

    #[test]
    fn test_empty_input() {
        let selection = select(&[], &ALLOW);
        assert!(selection.sentinels.is_empty());
        assert_eq!(selection.discarded(), 0);
    }
}

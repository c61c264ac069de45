//! SIC code matcher.
//!
//! Code cells hold a delimited list (`A_1, B_2`) or a list literal
//! (`['A_1', 'B_2']`). A code's prefix is the part before its first `_`;
//! codes without `_` have no prefix and take part in exact matching only.

use std::collections::HashSet;

use log::{debug, trace};

use crate::config::CODE_WRAPPER_CHARS;
use crate::error_handling::AnomalyType;

use super::{present, MatchResult, MatchedRecord, MatchedSet, WebsiteSet};

/// Exact and partial (prefix) overlap of two code lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SicMatch {
    pub exact: bool,
    pub partial: bool,
}

/// Splits a code cell into trimmed, de-duplicated codes in first-seen order.
///
/// Outer brackets and quotes are stripped from the cell and quotes from each
/// item. A cell opening with `[` is a list literal and always splits on `,`.
///
/// # Examples
///
/// ```
/// use company_match::matching::parse_codes;
///
/// assert_eq!(parse_codes("A_1, B_2", ','), vec!["A_1", "B_2"]);
/// assert_eq!(parse_codes("['A_1', ' B_2']", ','), vec!["A_1", "B_2"]);
/// assert!(parse_codes("", ',').is_empty());
/// ```
pub fn parse_codes(raw: &str, delimiter: char) -> Vec<String> {
    let trimmed = raw.trim();
    let delimiter = if trimmed.starts_with('[') { ',' } else { delimiter };
    let body = trimmed.trim_matches(CODE_WRAPPER_CHARS);

    let mut seen = HashSet::new();
    body.split(delimiter)
        .map(|item| item.trim().trim_matches(['\'', '"']).trim())
        .filter(|code| !code.is_empty())
        .filter(|code| seen.insert(code.to_string()))
        .map(str::to_string)
        .collect()
}

/// Part of a code before its first `_`, or `None` when it has no `_`.
pub fn code_prefix(code: &str) -> Option<&str> {
    code.split_once('_').map(|(prefix, _)| prefix)
}

/// Compares two code lists.
///
/// `exact` when any code occurs in both; `partial` when any prefix does. An
/// exact match on a code with a prefix implies a partial match.
pub fn sic_match(internal: &[String], external: &[String]) -> SicMatch {
    let internal_codes: HashSet<&str> = internal.iter().map(String::as_str).collect();
    let exact = external.iter().any(|code| internal_codes.contains(code.as_str()));

    let internal_prefixes: HashSet<&str> = internal.iter().filter_map(|c| code_prefix(c)).collect();
    let partial = external
        .iter()
        .filter_map(|c| code_prefix(c))
        .any(|prefix| internal_prefixes.contains(prefix));

    SicMatch { exact, partial }
}

/// Adds `sub_sic_match` and `partial_match` to every website-annotated record.
pub fn annotate_sic_match(set: WebsiteSet, delimiter: char) -> MatchedSet {
    let WebsiteSet {
        headers,
        layout,
        records,
        mut anomalies,
    } = set;

    let mut codes_of = |value: Option<&str>| -> Vec<String> {
        let Some(cell) = present(value) else {
            return Vec::new();
        };
        let codes = parse_codes(cell, delimiter);
        // `[]` is a well-formed empty list
        if codes.is_empty() && !cell.trim().trim_matches(CODE_WRAPPER_CHARS).trim().is_empty() {
            debug!("No codes in cell {cell:?}");
            anomalies.increment(AnomalyType::UnparseableCodeCell);
        }
        codes
    };

    let records: Vec<MatchedRecord> = records
        .into_iter()
        .map(|annotated| {
            let record = annotated.record;
            let internal = codes_of(record.value(layout.internal_codes));
            let external = codes_of(record.value(layout.external_codes));
            let sic = sic_match(&internal, &external);
            trace!("{}: {:?}", record.reg_number, sic);
            MatchedRecord {
                record,
                result: MatchResult {
                    website_match: annotated.website_match,
                    sub_sic_match: sic.exact,
                    partial_match: sic.partial,
                },
            }
        })
        .collect();

    MatchedSet {
        headers,
        layout,
        records,
        anomalies,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(list: &[&str]) -> Vec<String> {
        list.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_parse_codes_forms_agree() {
        let expected = vec!["A_1", "B_2"];
        assert_eq!(parse_codes("A_1, B_2", ','), expected);
        assert_eq!(parse_codes("['A_1', ' B_2']", ','), expected);
        assert_eq!(parse_codes("[\"A_1\",\"B_2\"]", ','), expected);
        assert_eq!(parse_codes("  A_1,B_2  ", ','), expected);
    }

    #[test]
    fn test_parse_codes_dedupes_in_order() {
        assert_eq!(parse_codes("B_2, A_1, B_2", ','), vec!["B_2", "A_1"]);
    }

    #[test]
    fn test_parse_codes_empty_and_degenerate() {
        assert!(parse_codes("", ',').is_empty());
        assert!(parse_codes("[]", ',').is_empty());
        assert!(parse_codes("['', ' ']", ',').is_empty());
        assert!(parse_codes(",,,", ',').is_empty());
    }

    #[test]
    fn test_parse_codes_custom_delimiter() {
        assert_eq!(parse_codes("A_1; B_2", ';'), vec!["A_1", "B_2"]);
        // List literals always use commas
        assert_eq!(parse_codes("['A_1', 'B_2']", ';'), vec!["A_1", "B_2"]);
    }

    #[test]
    fn test_annotate_sic_match_counts_unparseable_cells_only() {
        use crate::config::ColumnsConfig;
        use crate::matching::{annotate_website_match, join};
        use crate::records::Table;

        let headers = &["company_number", "website", "sic_codes"];
        let internal = Table::from_rows(
            headers,
            &[
                &["1", "a.com", "[]"],
                &["2", "b.com", "[ ]"],
                &["3", "c.com", ",,,"],
                &["4", "d.com", "A_1"],
            ],
        );
        let external = Table::from_rows(
            headers,
            &[
                &["1", "a.com", "A_1"],
                &["2", "b.com", ""],
                &["3", "c.com", "C_1"],
                &["4", "d.com", "A_2"],
            ],
        );
        let joined = join(&internal, &external, &ColumnsConfig::default(), "_ext").unwrap();
        let matched = annotate_sic_match(annotate_website_match(joined), ',');

        assert_eq!(matched.anomalies.get(AnomalyType::UnparseableCodeCell), 1);
        let partial: Vec<bool> = matched
            .records
            .iter()
            .map(|r| r.result.partial_match)
            .collect();
        assert_eq!(partial, vec![false, false, false, true]);
    }

    #[test]
    fn test_code_prefix() {
        assert_eq!(code_prefix("A_1"), Some("A"));
        assert_eq!(code_prefix("62_01_x"), Some("62"));
        assert_eq!(code_prefix("_1"), Some(""));
        assert_eq!(code_prefix("62010"), None);
    }

    #[test]
    fn test_sic_match_exact_implies_partial() {
        let result = sic_match(&codes(&["A_1", "B_2"]), &codes(&["B_2"]));
        assert!(result.exact);
        assert!(result.partial);
    }

    #[test]
    fn test_sic_match_partial_only() {
        let result = sic_match(&codes(&["A_1"]), &codes(&["A_9"]));
        assert!(!result.exact);
        assert!(result.partial);
    }

    #[test]
    fn test_sic_match_none() {
        let result = sic_match(&codes(&["A_1"]), &codes(&["C_3"]));
        assert_eq!(result, SicMatch::default());
        assert_eq!(sic_match(&[], &codes(&["A_1"])), SicMatch::default());
        assert_eq!(sic_match(&codes(&["A_1"]), &[]), SicMatch::default());
    }

    #[test]
    fn test_sic_match_codes_without_prefix() {
        let result = sic_match(&codes(&["62010"]), &codes(&["62010"]));
        assert!(result.exact);
        assert!(!result.partial);
        let result = sic_match(&codes(&["62010"]), &codes(&["62012"]));
        assert_eq!(result, SicMatch::default());
    }

    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_sic_match_exact_with_prefix_implies_partial(
            internal in prop::collection::vec("[A-C]_[0-9]", 0..6),
            external in prop::collection::vec("[A-C]_[0-9]", 0..6),
        ) {
            let result = sic_match(&internal, &external);
            prop_assert!(!result.exact || result.partial);
        }

        #[test]
        fn test_parse_codes_list_literal_agrees(
            items in prop::collection::vec("[A-Z]{1,2}_[0-9]{1,3}", 1..6),
        ) {
            let plain = items.join(", ");
            let literal = format!(
                "[{}]",
                items.iter().map(|c| format!("'{c}'")).collect::<Vec<_>>().join(", ")
            );
            prop_assert_eq!(parse_codes(&plain, ','), parse_codes(&literal, ','));
        }

        #[test]
        fn test_parse_codes_no_panic(raw in "\\PC{0,60}") {
            let _ = parse_codes(&raw, ',');
        }
    }
}

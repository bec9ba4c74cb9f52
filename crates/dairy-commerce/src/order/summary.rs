//! Parser for the free-text order-line summary.
//!
//! Summaries look like `"Light Dahi (170ml x 50) x 4, DTM (Crate) x 2"`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static ENTRY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(.+?)\s*\((.+?)\)\s*(Crate)?\s*x\s*(\d+)$").expect("summary pattern is valid")
});

/// One delivered line, for read-only display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SummaryRow {
    /// Product name, with " Crate" appended for crate lines.
    pub product: String,
    /// Pack specification from the parentheses.
    pub spec: String,
    /// Quantity as written.
    pub quantity: String,
}

/// Parse a summary string. Entries that do not match are dropped.
pub fn parse_order_summary(summary: &str) -> Vec<SummaryRow> {
    summary
        .split(',')
        .map(|entry| {
            let entry = entry.trim();
            entry.strip_suffix(':').unwrap_or(entry)
        })
        .filter(|entry| !entry.is_empty())
        .filter_map(parse_entry)
        .collect()
}

fn parse_entry(entry: &str) -> Option<SummaryRow> {
    let caps = ENTRY.captures(entry)?;
    let name = caps.get(1)?.as_str().trim();
    let product = match caps.get(3) {
        Some(suffix) => format!("{} {}", name, suffix.as_str()),
        None => name.to_string(),
    };
    Some(SummaryRow {
        product,
        spec: caps.get(2)?.as_str().to_string(),
        quantity: caps.get(4)?.as_str().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(product: &str, spec: &str, quantity: &str) -> SummaryRow {
        SummaryRow {
            product: product.to_string(),
            spec: spec.to_string(),
            quantity: quantity.to_string(),
        }
    }

    #[test]
    fn test_single_entry() {
        assert_eq!(
            parse_order_summary("Light Dahi (170ml x 50) x 4"),
            vec![row("Light Dahi", "170ml x 50", "4")]
        );
    }

    #[test]
    fn test_multiple_entries_and_trailing_colon() {
        assert_eq!(
            parse_order_summary("Light Dahi (170ml x 50) x 4, DTM (Crate) x 2:"),
            vec![row("Light Dahi", "170ml x 50", "4"), row("DTM", "Crate", "2")]
        );
    }

    #[test]
    fn test_crate_suffix_appended() {
        assert_eq!(
            parse_order_summary("Toned Milk (500ml x 24) Crate x 3"),
            vec![row("Toned Milk Crate", "500ml x 24", "3")]
        );
    }

    #[test]
    fn test_case_insensitive_multiplier() {
        assert_eq!(
            parse_order_summary("Paneer (200g) X 10"),
            vec![row("Paneer", "200g", "10")]
        );
    }

    #[test]
    fn test_malformed_entries_omitted() {
        let rows = parse_order_summary("Light Dahi 170ml x 4, , Butter (100g) x 2, Ghee (1L) x many");
        assert_eq!(rows, vec![row("Butter", "100g", "2")]);
    }

    #[test]
    fn test_empty_summary() {
        assert!(parse_order_summary("").is_empty());
        assert!(parse_order_summary(" , :").is_empty());
    }
}

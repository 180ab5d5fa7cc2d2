//! Row records and logical-field resolution.

/// Raw cell value as delivered by the spreadsheet codec.
///
/// Date cells are surfaced as `Number` carrying the spreadsheet serial;
/// the date policy decides how to render them.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Textual cell content.
    Text(String),
    /// Numeric cell content, including date serials.
    Number(f64),
}

impl CellValue {
    /// Display form of the value. Whole-number floats format without a
    /// fraction (`1001.0` becomes `"1001"`).
    pub fn display(&self) -> String {
        match self {
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => n.to_string(),
        }
    }

    /// True for textual cells with empty content. Numeric cells are
    /// never empty.
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Text(s) if s.is_empty())
    }
}

/// One spreadsheet row: raw headers paired with cell values, in sheet
/// column order. Headers keep the case and whitespace they have in the
/// sheet.
///
/// Resolution is defined over this stored order: the *first* matching
/// header wins, with no ranking by specificity. Sheets with colliding
/// header names resolve by column position; that is an input-format
/// constraint, not something the resolver disambiguates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowRecord {
    cells: Vec<(String, CellValue)>,
}

impl RowRecord {
    /// Create an empty row record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a header/value pair in column order.
    pub fn push(&mut self, header: impl Into<String>, value: CellValue) {
        self.cells.push((header.into(), value));
    }

    /// True when the row carries no cells at all.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Resolve a logical field name against the row's headers.
    ///
    /// A header matches when its lowercased form contains `key_part`
    /// (lowercased) as a substring and, if `exclude_part` is given, does
    /// not contain that as a substring. Missing fields resolve to `None`,
    /// which consumers treat as the empty sentinel.
    pub fn resolve(&self, key_part: &str, exclude_part: Option<&str>) -> Option<&CellValue> {
        let key = key_part.to_lowercase();
        let exclude = exclude_part.map(str::to_lowercase);
        self.cells
            .iter()
            .find(|(header, _)| {
                let header = header.to_lowercase();
                header.contains(&key)
                    && exclude.as_deref().is_none_or(|ex| !header.contains(ex))
            })
            .map(|(_, value)| value)
    }

    /// Like [`RowRecord::resolve`], but treats present-but-empty text
    /// like a missing field. Drives the fallback chains for customer
    /// fields and dates.
    pub fn resolve_non_empty(&self, key_part: &str, exclude_part: Option<&str>) -> Option<&CellValue> {
        self.resolve(key_part, exclude_part).filter(|v| !v.is_empty())
    }

    /// Display string for a resolved field, `""` when absent.
    pub fn resolve_text(&self, key_part: &str, exclude_part: Option<&str>) -> String {
        self.resolve(key_part, exclude_part)
            .map(CellValue::display)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[(&str, &str)]) -> RowRecord {
        let mut record = RowRecord::new();
        for (header, value) in cells {
            record.push(*header, CellValue::Text((*value).to_string()));
        }
        record
    }

    #[test]
    fn test_resolve_is_case_insensitive_substring() {
        let record = row(&[("Invoice No.", "INV-1"), ("Seller Name", "Acme")]);

        assert_eq!(
            record.resolve("invoice no", None),
            Some(&CellValue::Text("INV-1".to_string()))
        );
        assert_eq!(record.resolve_text("seller name", None), "Acme");
        assert_eq!(record.resolve("missing field", None), None);
    }

    #[test]
    fn test_resolve_exclusion() {
        let record = row(&[("Seller Name", "Acme"), ("Customer Name", "Bob")]);

        // Bare "name" matches the seller column first; the exclusion term
        // is what directs the lookup at the customer column.
        assert_eq!(record.resolve_text("name", None), "Acme");
        assert_eq!(record.resolve_text("name", Some("seller")), "Bob");
    }

    #[test]
    fn test_first_match_wins_in_column_order() {
        let record = row(&[("GST No", "27A"), ("Customer GST No", "33B")]);

        assert_eq!(record.resolve_text("gst no", None), "27A");
    }

    #[test]
    fn test_resolve_non_empty_skips_blank_text() {
        let mut record = RowRecord::new();
        record.push("Customer Name", CellValue::Text(String::new()));
        record.push("Name", CellValue::Text("Bob".to_string()));

        assert!(record.resolve("customer name", None).is_some());
        assert_eq!(record.resolve_non_empty("customer name", None), None);
        assert_eq!(
            record.resolve_non_empty("name", Some("seller")),
            Some(&CellValue::Text("Bob".to_string()))
        );
    }

    #[test]
    fn test_numeric_display_drops_whole_fraction() {
        assert_eq!(CellValue::Number(1001.0).display(), "1001");
        assert_eq!(CellValue::Number(1001.5).display(), "1001.5");
    }
}

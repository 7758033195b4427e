use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Row – one record of the CSV resource
// ---------------------------------------------------------------------------

/// A single record keyed by column name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    cells: BTreeMap<String, String>,
}

impl Row {
    /// Cell value for `column`, if the row has that column.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.cells.insert(column.into(), value.into());
    }

    /// All cell values, in no particular column order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.cells.values().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Row {
            cells: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded resource
// ---------------------------------------------------------------------------

/// The parsed resource: header order plus the rows in their current order.
///
/// Every row carries exactly the keys in `columns`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    /// Column names in header order (display order).
    pub columns: Vec<String>,
    /// All rows, in file order until the first sort.
    pub rows: Vec<Row>,
}

impl Dataset {
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Dataset { columns, rows }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cells of `row` in header order. Missing cells come back as `""`.
    pub fn cells<'a>(&'a self, row: &'a Row) -> impl Iterator<Item = &'a str> + 'a {
        self.columns
            .iter()
            .map(move |col| row.get(col).unwrap_or(""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_follow_header_order() {
        let row: Row = [("Traffic", "10"), ("Domain", "a.com")].into_iter().collect();
        let ds = Dataset::new(vec!["Domain".into(), "Traffic".into()], vec![row]);

        let cells: Vec<&str> = ds.cells(&ds.rows[0]).collect();
        assert_eq!(cells, vec!["a.com", "10"]);
    }

    #[test]
    fn missing_cell_renders_empty() {
        let row: Row = [("Domain", "a.com")].into_iter().collect();
        let ds = Dataset::new(vec!["Domain".into(), "Owner".into()], vec![row]);

        let cells: Vec<&str> = ds.cells(&ds.rows[0]).collect();
        assert_eq!(cells, vec!["a.com", ""]);
    }
}

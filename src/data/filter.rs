use super::model::{Dataset, Row};

// ---------------------------------------------------------------------------
// Free-text search across every column
// ---------------------------------------------------------------------------

/// Whether any cell of `row` contains `needle`, which must already be
/// lower-cased.
fn row_matches(row: &Row, needle: &str) -> bool {
    row.values()
        .any(|value| value.to_lowercase().contains(needle))
}

/// Return indices of rows containing `term` in at least one cell.
///
/// Matching is a case-insensitive substring test. An empty term matches every
/// row. Indices come back in dataset order.
pub fn filtered_indices(dataset: &Dataset, term: &str) -> Vec<usize> {
    if term.is_empty() {
        return (0..dataset.len()).collect();
    }
    let needle = term.to_lowercase();
    dataset
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| row_matches(row, &needle))
        .map(|(i, _)| i)
        .collect()
}

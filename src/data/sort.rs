use std::cmp::Ordering;

use super::model::Row;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Header glyph for the active sort column.
    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "⬆",
            SortDirection::Descending => "⬇",
        }
    }
}

/// Active sort column and direction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    pub key: Option<String>,
    pub direction: SortDirection,
}

impl SortState {
    /// State after the user picks `key`: the same column flips direction,
    /// a new column starts ascending.
    pub fn next(&self, key: &str) -> SortState {
        let direction = if self.key.as_deref() == Some(key) {
            self.direction.toggled()
        } else {
            SortDirection::Ascending
        };
        SortState {
            key: Some(key.to_string()),
            direction,
        }
    }

    /// Direction for `key` if it is the active column.
    pub fn direction_for(&self, key: &str) -> Option<SortDirection> {
        (self.key.as_deref() == Some(key)).then_some(self.direction)
    }
}

/// Reorder `rows` in place by the raw string value of `key`.
///
/// Stable in both directions: rows with equal keys keep their relative order.
pub fn sort_rows(rows: &mut [Row], key: &str, direction: SortDirection) {
    rows.sort_by(|a, b| {
        let ord: Ordering = a.get(key).cmp(&b.get(key));
        match direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
}

//! Country record and its sortable columns.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

// ===== Country =====

/// One row of the table.
///
/// Records are immutable once loaded; the controller only ever clones them
/// into a result page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Country {
    /// Display name, also the case-insensitive search target.
    pub name: String,
    /// Flag identifier (ISO 3166 alpha-2 code).
    pub flag: String,
    /// Surface area in square kilometres.
    pub area: u64,
    /// Head count.
    pub population: u64,
}

impl Country {
    /// Build a record from borrowed parts.
    pub fn new(name: &str, flag: &str, area: u64, population: u64) -> Self {
        Self {
            name: name.to_string(),
            flag: flag.to_string(),
            area,
            population,
        }
    }

    /// Borrow the value of a sortable column.
    pub fn field(&self, column: Column) -> FieldValue<'_> {
        match column {
            Column::Name => FieldValue::Text(&self.name),
            Column::Area => FieldValue::Number(self.area),
            Column::Population => FieldValue::Number(self.population),
        }
    }
}

// ===== FieldValue =====

/// A borrowed column value used by the sort comparator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    /// Lexicographically ordered text.
    Text(&'a str),
    /// Numerically ordered value.
    Number(u64),
}

impl PartialOrd for FieldValue<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FieldValue<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (FieldValue::Text(a), FieldValue::Text(b)) => a.cmp(b),
            (FieldValue::Number(a), FieldValue::Number(b)) => a.cmp(b),
            // Both sides always come from the same column.
            (FieldValue::Text(_), FieldValue::Number(_)) => Ordering::Greater,
            (FieldValue::Number(_), FieldValue::Text(_)) => Ordering::Less,
        }
    }
}

// ===== Column =====

/// Sortable columns of [`Country`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    /// `name`
    Name,
    /// `area`
    Area,
    /// `population`
    Population,
}

impl Column {
    /// All sortable columns in display order.
    pub const ALL: [Column; 3] = [Column::Name, Column::Area, Column::Population];

    /// Parse a record field name.
    ///
    /// Returns `None` for names that are not a field of [`Country`]; callers
    /// treat that as "no sort column".
    pub fn parse(field: &str) -> Option<Self> {
        match field {
            "name" => Some(Column::Name),
            "area" => Some(Column::Area),
            "population" => Some(Column::Population),
            _ => None,
        }
    }

    /// Field name as it appears on the record.
    pub fn as_str(self) -> &'static str {
        match self {
            Column::Name => "name",
            Column::Area => "area",
            Column::Population => "population",
        }
    }

    /// Column header label.
    pub fn title(self) -> &'static str {
        match self {
            Column::Name => "Country",
            Column::Area => "Area",
            Column::Population => "Population",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

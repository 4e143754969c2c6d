use serde::{Deserialize, Serialize};

/// A symbolic cell address as it arrives on the wire.
///
/// Either component may be absent: a row without a column letter selects
/// whole rows, a column letter without a row selects whole columns.
/// `row` is signed so that non-positive input survives deserialization and
/// is reported as an invalid address instead of a JSON error.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct CellAddress {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub col_letter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row: Option<i64>,
}

impl CellAddress {
    /// A single cell, e.g. `CellAddress::cell("B", 3)`.
    pub fn cell(col_letter: &str, row: i64) -> Self {
        Self {
            col_letter: Some(col_letter.to_string()),
            row: Some(row),
        }
    }

    /// A whole row.
    #[must_use]
    pub fn row(row: i64) -> Self {
        Self {
            col_letter: None,
            row: Some(row),
        }
    }

    /// A whole column.
    pub fn column(col_letter: &str) -> Self {
        Self {
            col_letter: Some(col_letter.to_string()),
            row: None,
        }
    }

    /// True when the address carries a row but no column letter.
    #[must_use]
    pub fn is_row_only(&self) -> bool {
        self.row.is_some() && self.col_letter.is_none()
    }
}

/// A rectangular range given by two corners. `end_cell` defaults to
/// `start_cell`, and the corners may be given in either order.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct CellRange {
    pub start_cell: CellAddress,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_cell: Option<CellAddress>,
}

impl CellRange {
    #[must_use]
    pub fn new(start_cell: CellAddress, end_cell: CellAddress) -> Self {
        Self {
            start_cell,
            end_cell: Some(end_cell),
        }
    }

    #[must_use]
    pub fn single(cell: CellAddress) -> Self {
        Self {
            start_cell: cell,
            end_cell: None,
        }
    }
}

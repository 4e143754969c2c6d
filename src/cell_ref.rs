//! Cell references: column letters, `A1` text, and range resolution.
//!
//! All indices are 1-based. Rows are limited to `1..=MAX_ROW` and columns to
//! `1..=MAX_COL` (`A..=XFD`), the xlsx grid.

use crate::error::{Result, XltransformError};
use crate::types::{CellAddress, CellRange};

/// Last addressable row.
pub const MAX_ROW: u32 = 1_048_576;
/// Last addressable column (`XFD`).
pub const MAX_COL: u32 = 16_384;

/// Convert column letters (`A`, `Z`, `AA`, ...) to a 1-based index.
///
/// Letters are case-insensitive. Fails on empty input, non-letters, more
/// than three letters, or a column past `XFD`.
pub fn column_index(letters: &str) -> Result<u32> {
    let invalid = || XltransformError::InvalidAddress(format!("invalid column letter {letters:?}"));

    if letters.is_empty() || letters.len() > 3 {
        return Err(invalid());
    }

    let mut col: u32 = 0;
    for b in letters.bytes() {
        if !b.is_ascii_alphabetic() {
            return Err(invalid());
        }
        let upper = b.to_ascii_uppercase();
        col = col * 26 + (u32::from(upper - b'A') + 1);
    }

    if col > MAX_COL {
        return Err(invalid());
    }
    Ok(col)
}

/// Convert a 1-based column index to letters (1 → `A`, 27 → `AA`).
pub fn column_letter(col: u32) -> Result<String> {
    if col == 0 || col > MAX_COL {
        return Err(XltransformError::InvalidAddress(format!(
            "column index {col} out of range"
        )));
    }

    let mut result = Vec::with_capacity(3);
    let mut n = col;
    while n > 0 {
        n -= 1;
        let rem = u8::try_from(n % 26).unwrap_or(0);
        result.push(b'A' + rem);
        n /= 26;
    }
    result.reverse();
    Ok(result.into_iter().map(char::from).collect())
}

/// Validate a wire row number.
pub fn row_index(row: i64) -> Result<u32> {
    u32::try_from(row)
        .ok()
        .filter(|r| (1..=MAX_ROW).contains(r))
        .ok_or_else(|| XltransformError::InvalidAddress(format!("row {row} out of range")))
}

/// Parse a cell reference like `"B3"` (optionally with `$` anchors) into
/// `(row, col)`.
pub fn parse_cell_ref(cell_ref: &str) -> Result<(u32, u32)> {
    let text: String = cell_ref.trim().chars().filter(|&ch| ch != '$').collect();
    let split = text
        .find(|ch: char| ch.is_ascii_digit())
        .ok_or_else(|| XltransformError::InvalidAddress(format!("invalid cell reference {cell_ref:?}")))?;
    let (letters, digits) = text.split_at(split);
    let col = column_index(letters)?;
    let row = digits
        .parse::<i64>()
        .map_err(|_| XltransformError::InvalidAddress(format!("invalid cell reference {cell_ref:?}")))?;
    Ok((row_index(row)?, col))
}

/// Format `(row, col)` as an `A1` reference.
pub fn format_cell_ref(row: u32, col: u32) -> Result<String> {
    Ok(format!("{}{}", column_letter(col)?, row))
}

/// Parse range text into a [`CellRange`].
///
/// Accepts `"B2"`, `"B2:D4"`, whole rows `"3:5"` / `"3"` and whole columns
/// `"C:E"` / `"C"`.
pub fn parse_range(range: &str) -> Result<CellRange> {
    match range.split_once(':') {
        Some((start, end)) => Ok(CellRange::new(parse_address(start)?, parse_address(end)?)),
        None => Ok(CellRange::single(parse_address(range)?)),
    }
}

fn parse_address(text: &str) -> Result<CellAddress> {
    let text: String = text.trim().chars().filter(|&ch| ch != '$').collect();
    let split = text.find(|ch: char| ch.is_ascii_digit()).unwrap_or(text.len());
    let (letters, digits) = text.split_at(split);

    let col_letter = if letters.is_empty() {
        None
    } else {
        column_index(letters)?;
        Some(letters.to_ascii_uppercase())
    };
    let row = if digits.is_empty() {
        None
    } else {
        Some(digits.parse::<i64>().map_err(|_| {
            XltransformError::InvalidAddress(format!("invalid cell reference {text:?}"))
        })?)
    };

    if col_letter.is_none() && row.is_none() {
        return Err(XltransformError::InvalidAddress(format!(
            "empty cell reference {text:?}"
        )));
    }
    Ok(CellAddress { col_letter, row })
}

/// An inclusive ascending run of indices, possibly empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Span {
    bounds: Option<(u32, u32)>,
}

impl Span {
    pub const EMPTY: Span = Span { bounds: None };

    /// Span between two indices given in either order.
    #[must_use]
    pub fn new(a: u32, b: u32) -> Self {
        Self {
            bounds: Some((a.min(b), a.max(b))),
        }
    }

    #[must_use]
    pub fn first(&self) -> Option<u32> {
        self.bounds.map(|(start, _)| start)
    }

    #[must_use]
    pub fn last(&self) -> Option<u32> {
        self.bounds.map(|(_, end)| end)
    }

    #[must_use]
    pub fn len(&self) -> u32 {
        self.bounds.map_or(0, |(start, end)| end - start + 1)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bounds.is_none()
    }

    #[must_use]
    pub fn contains(&self, idx: u32) -> bool {
        self.bounds
            .is_some_and(|(start, end)| (start..=end).contains(&idx))
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> {
        let (start, end) = self.bounds.unwrap_or((1, 0));
        start..=end
    }

    #[must_use]
    pub fn to_vec(&self) -> Vec<u32> {
        self.iter().collect()
    }
}

/// A resolved range: the rows and columns it spans, each ascending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolvedRange {
    pub rows: Span,
    pub cols: Span,
}

impl ResolvedRange {
    /// Top-left corner, when both axes are present.
    #[must_use]
    pub fn anchor(&self) -> Option<(u32, u32)> {
        Some((self.rows.first()?, self.cols.first()?))
    }

    /// True when both axes are present, i.e. the range covers a block of cells.
    #[must_use]
    pub fn is_block(&self) -> bool {
        !self.rows.is_empty() && !self.cols.is_empty()
    }

    #[must_use]
    pub fn is_single_cell(&self) -> bool {
        self.rows.len() == 1 && self.cols.len() == 1
    }

    /// Every `(row, col)` in the block, row-major.
    pub fn positions(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.rows
            .iter()
            .flat_map(move |row| self.cols.iter().map(move |col| (row, col)))
    }

    #[must_use]
    pub fn contains(&self, row: u32, col: u32) -> bool {
        self.rows.contains(row) && self.cols.contains(col)
    }
}

/// Resolve a [`CellRange`] into row and column spans.
///
/// An axis missing from the start address resolves to an empty span. A
/// component missing from the end address falls back to the start's.
pub fn resolve(range: &CellRange) -> Result<ResolvedRange> {
    let start = &range.start_cell;
    let end = range.end_cell.as_ref().unwrap_or(start);

    let start_row = start.row.map(row_index).transpose()?;
    let start_col = start.col_letter.as_deref().map(column_index).transpose()?;
    let end_row = end.row.map(row_index).transpose()?.or(start_row);
    let end_col = end
        .col_letter
        .as_deref()
        .map(column_index)
        .transpose()?
        .or(start_col);

    Ok(ResolvedRange {
        rows: axis(start_row, end_row),
        cols: axis(start_col, end_col),
    })
}

fn axis(start: Option<u32>, end: Option<u32>) -> Span {
    match (start, end) {
        (Some(a), Some(b)) => Span::new(a, b),
        (Some(a), None) => Span::new(a, a),
        (None, _) => Span::EMPTY,
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn test_column_index() {
        assert_eq!(column_index("A").unwrap(), 1);
        assert_eq!(column_index("Z").unwrap(), 26);
        assert_eq!(column_index("AA").unwrap(), 27);
        assert_eq!(column_index("zz").unwrap(), 702);
        assert_eq!(column_index("XFD").unwrap(), MAX_COL);
    }

    #[test]
    fn test_column_index_rejects_garbage() {
        for bad in ["", "A1", "XFE", "ABCD", "-", "Ä"] {
            assert!(
                matches!(column_index(bad), Err(XltransformError::InvalidAddress(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_column_letter_roundtrip() {
        for idx in 1..=702 {
            let letters = column_letter(idx).unwrap();
            assert_eq!(column_index(&letters).unwrap(), idx);
        }
        assert_eq!(column_letter(28).unwrap(), "AB");
        assert!(column_letter(0).is_err());
    }

    #[test]
    fn test_parse_cell_ref() {
        assert_eq!(parse_cell_ref("B3").unwrap(), (3, 2));
        assert_eq!(parse_cell_ref("$AA$10").unwrap(), (10, 27));
        assert!(parse_cell_ref("B0").is_err());
        assert!(parse_cell_ref("12").is_err());
        assert!(parse_cell_ref("B").is_err());
    }

    #[test]
    fn test_resolve_normalizes_corners() {
        let range = parse_range("D4:B2").unwrap();
        let resolved = resolve(&range).unwrap();
        assert_eq!(resolved.rows.to_vec(), vec![2, 3, 4]);
        assert_eq!(resolved.cols.to_vec(), vec![2, 3, 4]);
        assert_eq!(resolved.anchor(), Some((2, 2)));
    }

    #[test]
    fn test_resolve_row_only() {
        let resolved = resolve(&parse_range("3:5").unwrap()).unwrap();
        assert_eq!(resolved.rows.to_vec(), vec![3, 4, 5]);
        assert!(resolved.cols.is_empty());
        assert!(!resolved.is_block());
    }

    #[test]
    fn test_resolve_end_falls_back_to_start() {
        let range = CellRange::new(CellAddress::cell("B", 2), CellAddress::row(4));
        let resolved = resolve(&range).unwrap();
        assert_eq!(resolved.rows.to_vec(), vec![2, 3, 4]);
        assert_eq!(resolved.cols.to_vec(), vec![2]);
    }

    #[test]
    fn test_resolve_rejects_non_positive_row() {
        let range = CellRange::single(CellAddress::cell("A", 0));
        assert!(matches!(resolve(&range), Err(XltransformError::InvalidAddress(_))));
        let range = CellRange::single(CellAddress::cell("A", -3));
        assert!(matches!(resolve(&range), Err(XltransformError::InvalidAddress(_))));
    }

    #[test]
    fn test_span_iter_empty() {
        assert_eq!(Span::EMPTY.iter().count(), 0);
        assert_eq!(Span::EMPTY.len(), 0);
        assert_eq!(Span::new(5, 3).to_vec(), vec![3, 4, 5]);
    }
}

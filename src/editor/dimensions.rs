//! `insert`, `delete` and `hidden`: whole-row and whole-column operations.
//!
//! A range whose start names only a row selects rows; anything else selects
//! the columns it spans.

use crate::cell_ref::{resolve, Span};
use crate::error::{Result, XltransformError};
use crate::structure::Axis;
use crate::types::{Processing, Workbook};

use super::require_cells;

fn selection(processing: &Processing, op: &'static str) -> Result<(Axis, Span)> {
    let cells = require_cells(processing, op)?;
    let range = resolve(cells)?;
    let (axis, span) = if cells.start_cell.is_row_only() {
        (Axis::Row, range.rows)
    } else {
        (Axis::Column, range.cols)
    };
    if span.is_empty() {
        return Err(XltransformError::InvalidAddress(format!(
            "{op} needs a row or column to act on"
        )));
    }
    Ok((axis, span))
}

pub(crate) fn insert(
    workbook: &mut Workbook,
    sheet_name: &str,
    processing: &Processing,
) -> Result<String> {
    let (axis, span) = selection(processing, "insert")?;
    let sheet = workbook.sheet_mut(sheet_name)?;
    if let Some(at) = span.first() {
        sheet.insert_lines(axis, at, span.len())?;
    }
    Ok(sheet.name.clone())
}

pub(crate) fn delete(
    workbook: &mut Workbook,
    sheet_name: &str,
    processing: &Processing,
) -> Result<String> {
    let (axis, span) = selection(processing, "delete")?;
    let sheet = workbook.sheet_mut(sheet_name)?;
    if let Some(at) = span.first() {
        sheet.delete_lines(axis, at, span.len())?;
    }
    Ok(sheet.name.clone())
}

pub(crate) fn hidden(
    workbook: &mut Workbook,
    sheet_name: &str,
    processing: &Processing,
) -> Result<String> {
    let (axis, span) = selection(processing, "hidden")?;
    let sheet = workbook.sheet_mut(sheet_name)?;
    for idx in span.iter() {
        match axis {
            Axis::Row => sheet.hide_row(idx),
            Axis::Column => sheet.hide_column(idx),
        }
    }
    Ok(sheet.name.clone())
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
    use crate::cell_ref::parse_range;
    use crate::types::{CellAddress, CellRange, ProcessingType};

    fn workbook() -> Workbook {
        let mut workbook = Workbook::new();
        workbook.create_sheet("Sheet1").unwrap();
        workbook
    }

    fn op(kind: ProcessingType, range: &str) -> Processing {
        Processing::new(kind).with_cells(parse_range(range).unwrap())
    }

    #[test]
    fn test_row_only_start_selects_rows() {
        let mut wb = workbook();
        wb.sheet_mut("Sheet1").unwrap().set_value(3, 1, "x");
        insert(&mut wb, "Sheet1", &op(ProcessingType::Insert, "2:3")).unwrap();
        assert_eq!(wb.sheet("Sheet1").unwrap().value(5, 1).as_str(), Some("x"));
    }

    #[test]
    fn test_cell_start_selects_columns() {
        let mut wb = workbook();
        wb.sheet_mut("Sheet1").unwrap().set_value(1, 4, "x");
        // B2:C9 spans columns B..C; rows are ignored.
        delete(&mut wb, "Sheet1", &op(ProcessingType::Delete, "B2:C9")).unwrap();
        assert_eq!(wb.sheet("Sheet1").unwrap().value(1, 2).as_str(), Some("x"));
    }

    #[test]
    fn test_hidden_columns() {
        let mut wb = workbook();
        hidden(&mut wb, "Sheet1", &op(ProcessingType::Hidden, "C:D")).unwrap();
        let sheet = wb.sheet("Sheet1").unwrap();
        assert!(!sheet.is_column_hidden(2));
        assert!(sheet.is_column_hidden(3));
        assert!(sheet.is_column_hidden(4));
        assert!(!sheet.is_column_hidden(5));
    }

    #[test]
    fn test_empty_axis_rejected() {
        let mut wb = workbook();
        let processing = Processing::new(ProcessingType::Hidden).with_cells(CellRange::single(
            CellAddress {
                col_letter: None,
                row: None,
            },
        ));
        let err = hidden(&mut wb, "Sheet1", &processing).unwrap_err();
        assert!(matches!(err, XltransformError::InvalidAddress(_)));
    }
}

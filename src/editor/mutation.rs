//! Cell mutations: `set_cells` and `join_cells`.

use crate::cell_ref::{resolve, ResolvedRange, Span, MAX_COL, MAX_ROW};
use crate::error::{Result, XltransformError};
use crate::styles::apply_spec_to_range;
use crate::types::{CellValue, MergeRange, Processing, Sheet, Workbook};

use super::{require_cells, require_target};

/// Write `target.values` from the range's top-left corner, then apply
/// `target.styles`.
///
/// The value grid is written row-major regardless of the range size. Styles
/// cover the resolved range, except that a single-cell range with values
/// styles the written block instead.
pub(crate) fn set_cells(
    workbook: &mut Workbook,
    sheet_name: &str,
    processing: &Processing,
) -> Result<String> {
    const OP: &str = "set_cells";
    let target = require_target(processing, OP)?;
    let range = resolve(require_cells(processing, OP)?)?;
    let sheet = workbook.sheet_mut(sheet_name)?;

    let written = match target.values {
        Some(ref values) => write_values(sheet, &range, values)?,
        None => None,
    };

    if let Some(ref styles) = target.styles {
        let style_range = match written {
            Some(block) if range.is_single_cell() => block,
            _ => range,
        };
        apply_spec_to_range(sheet, &style_range, styles)?;
    }

    Ok(sheet.name.clone())
}

/// Write a row-major grid starting at the range anchor. Returns the block
/// covered by the grid, or `None` when the grid holds no values.
fn write_values(
    sheet: &mut Sheet,
    range: &ResolvedRange,
    values: &[Vec<CellValue>],
) -> Result<Option<ResolvedRange>> {
    let width = values.iter().map(Vec::len).max().unwrap_or(0);
    if width == 0 {
        return Ok(None);
    }
    let Some((anchor_row, anchor_col)) = range.anchor() else {
        return Err(XltransformError::InvalidAddress(
            "set_cells values need a starting cell with column and row".into(),
        ));
    };

    // Check the whole block fits before writing anything.
    let last_row = last_index(anchor_row, values.len(), MAX_ROW, "row")?;
    let last_col = last_index(anchor_col, width, MAX_COL, "column")?;

    for (row, row_values) in (anchor_row..).zip(values) {
        for (col, value) in (anchor_col..).zip(row_values) {
            if value.is_empty() {
                sheet.clear_value(row, col);
            } else {
                sheet.cell_mut(row, col).value = value.clone();
            }
        }
    }

    Ok(Some(ResolvedRange {
        rows: Span::new(anchor_row, last_row),
        cols: Span::new(anchor_col, last_col),
    }))
}

fn last_index(anchor: u32, len: usize, limit: u32, axis: &str) -> Result<u32> {
    u32::try_from(len)
        .ok()
        .and_then(|len| anchor.checked_add(len - 1))
        .filter(|&last| last <= limit)
        .ok_or_else(|| {
            XltransformError::InvalidAddress(format!(
                "{len} values from {axis} {anchor} run past the last {axis}"
            ))
        })
}

/// Merge the resolved block into one region. Only the top-left value
/// survives.
pub(crate) fn join_cells(
    workbook: &mut Workbook,
    sheet_name: &str,
    processing: &Processing,
) -> Result<String> {
    const OP: &str = "join_cells";
    let range = resolve(require_cells(processing, OP)?)?;
    let merge = MergeRange::from_resolved(&range).ok_or_else(|| {
        XltransformError::InvalidAddress("join_cells needs a block of cells".into())
    })?;
    let sheet = workbook.sheet_mut(sheet_name)?;
    sheet.merge_cells(merge)?;
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
    use crate::types::ProcessingType;

    fn workbook() -> Workbook {
        let mut workbook = Workbook::new();
        workbook.create_sheet("Sheet1").unwrap();
        workbook
    }

    #[test]
    fn test_values_overflow_range() {
        let mut wb = workbook();
        let processing = Processing::new(ProcessingType::SetCells)
            .with_cells(parse_range("A1:A1").unwrap())
            .with_values(vec![
                vec!["a".into(), "b".into(), "c".into()],
                vec![1.into()],
            ]);
        set_cells(&mut wb, "Sheet1", &processing).unwrap();
        let sheet = wb.sheet("Sheet1").unwrap();
        assert_eq!(sheet.value(1, 3).as_str(), Some("c"));
        assert_eq!(sheet.value(2, 1).as_f64(), Some(1.0));
        assert!(sheet.value(2, 2).is_empty());
    }

    #[test]
    fn test_values_past_grid_rejected_without_writes() {
        let mut wb = workbook();
        let processing = Processing::new(ProcessingType::SetCells)
            .with_cells(parse_range("XFD1").unwrap())
            .with_values(vec![vec!["a".into(), "b".into()]]);
        let err = set_cells(&mut wb, "Sheet1", &processing).unwrap_err();
        assert!(matches!(err, XltransformError::InvalidAddress(_)));
        assert!(wb.sheet("Sheet1").unwrap().cells.is_empty());
    }

    #[test]
    fn test_values_need_anchor() {
        let mut wb = workbook();
        let processing = Processing::new(ProcessingType::SetCells)
            .with_cells(parse_range("3:4").unwrap())
            .with_values(vec![vec!["a".into()]]);
        let err = set_cells(&mut wb, "Sheet1", &processing).unwrap_err();
        assert!(matches!(err, XltransformError::InvalidAddress(_)));
    }

    #[test]
    fn test_null_value_clears() {
        let mut wb = workbook();
        wb.sheet_mut("Sheet1").unwrap().set_value(1, 1, "old");
        let processing = Processing::new(ProcessingType::SetCells)
            .with_cells(parse_range("A1").unwrap())
            .with_values(vec![vec![CellValue::Empty]]);
        set_cells(&mut wb, "Sheet1", &processing).unwrap();
        assert!(wb.sheet("Sheet1").unwrap().get(1, 1).is_none());
    }

    #[test]
    fn test_join_requires_block() {
        let mut wb = workbook();
        let processing =
            Processing::new(ProcessingType::JoinCells).with_cells(parse_range("2:3").unwrap());
        let err = join_cells(&mut wb, "Sheet1", &processing).unwrap_err();
        assert!(matches!(err, XltransformError::InvalidAddress(_)));
    }
}

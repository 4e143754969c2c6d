//! `copy` and `copy_style`: block transfer between sheets.
//!
//! The source block is snapshotted before the destination is touched, so a
//! paste that overlaps its own source reads the original content.

use std::collections::BTreeMap;

use crate::cell_ref::{resolve, ResolvedRange, MAX_COL, MAX_ROW};
use crate::error::{Result, XltransformError};
use crate::structure::Axis;
use crate::styles::clone_style;
use crate::types::{Cell, PasteTarget, Processing, Sheet, Style, Workbook};

use super::require_cells;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transfer {
    /// Values and styles; honors `is_insert`.
    Contents,
    /// Styles only; never inserts.
    Styles,
}

impl Transfer {
    fn op(self) -> &'static str {
        match self {
            Transfer::Contents => "copy",
            Transfer::Styles => "copy_style",
        }
    }
}

/// Copied cells keyed by offset from the block's top-left corner.
struct Snapshot {
    height: u32,
    width: u32,
    cells: BTreeMap<(u32, u32), Cell>,
}

impl Snapshot {
    fn take(sheet: &Sheet, range: &ResolvedRange) -> Option<Self> {
        let (first_row, first_col) = range.anchor()?;
        let (last_row, last_col) = (range.rows.last()?, range.cols.last()?);
        let cells = sheet
            .cells
            .range((first_row, first_col)..=(last_row, last_col))
            .filter(|&(&(_, col), _)| (first_col..=last_col).contains(&col))
            .map(|(&(row, col), cell)| ((row - first_row, col - first_col), cell.clone()))
            .collect();
        Some(Self {
            height: range.rows.len(),
            width: range.cols.len(),
            cells,
        })
    }
}

pub(crate) fn copy(
    workbook: &mut Workbook,
    sheet_name: &str,
    processing: &Processing,
) -> Result<String> {
    transfer(workbook, sheet_name, processing, Transfer::Contents)
}

pub(crate) fn copy_style(
    workbook: &mut Workbook,
    sheet_name: &str,
    processing: &Processing,
) -> Result<String> {
    transfer(workbook, sheet_name, processing, Transfer::Styles)
}

fn transfer(
    workbook: &mut Workbook,
    sheet_name: &str,
    processing: &Processing,
    mode: Transfer,
) -> Result<String> {
    let op = mode.op();
    let cells = require_cells(processing, op)?;
    let paste = processing
        .paste_target
        .as_ref()
        .ok_or(XltransformError::MissingPasteTarget(op))?;

    let source = resolve(cells)?;
    if !source.is_block() {
        return Err(XltransformError::InvalidAddress(format!(
            "{op} source must be a block of cells"
        )));
    }
    let (dest_row, dest_col) = paste_anchor(paste, op)?;

    let snapshot = Snapshot::take(workbook.sheet(sheet_name)?, &source).ok_or_else(|| {
        XltransformError::InvalidAddress(format!("{op} source must be a block of cells"))
    })?;
    check_fits(dest_row, snapshot.height, MAX_ROW, "row")?;
    check_fits(dest_col, snapshot.width, MAX_COL, "column")?;

    let dest = workbook.sheet_mut(&paste.sheet_name)?;
    if mode == Transfer::Contents && paste.is_insert {
        // Row inserts never move columns.
        dest.check_insert(Axis::Row, dest_row, snapshot.height)?;
        dest.check_insert(Axis::Column, dest_col, snapshot.width)?;
        dest.insert_rows(dest_row, snapshot.height)?;
        dest.insert_cols(dest_col, snapshot.width)?;
    }

    for dr in 0..snapshot.height {
        for dc in 0..snapshot.width {
            let pos = (dest_row + dr, dest_col + dc);
            let copied = snapshot.cells.get(&(dr, dc));
            match (mode, copied) {
                (Transfer::Contents, Some(cell)) => {
                    let target = dest.cell_mut(pos.0, pos.1);
                    target.value.clone_from(&cell.value);
                    clone_style(&cell.style, &mut target.style);
                }
                (Transfer::Contents, None) => {
                    dest.cells.remove(&pos);
                }
                (Transfer::Styles, Some(cell)) => {
                    clone_style(&cell.style, &mut dest.cell_mut(pos.0, pos.1).style);
                }
                (Transfer::Styles, None) => {
                    if let Some(target) = dest.cells.get_mut(&pos) {
                        clone_style(&Style::EMPTY, &mut target.style);
                        if target.is_blank() {
                            dest.cells.remove(&pos);
                        }
                    }
                }
            }
        }
    }

    Ok(dest.name.clone())
}

fn paste_anchor(paste: &PasteTarget, op: &str) -> Result<(u32, u32)> {
    resolve(&paste.cells)?.anchor().ok_or_else(|| {
        XltransformError::InvalidAddress(format!(
            "{op} paste target needs a starting cell with column and row"
        ))
    })
}

fn check_fits(anchor: u32, len: u32, limit: u32, axis: &str) -> Result<()> {
    if u64::from(anchor) + u64::from(len) - 1 > u64::from(limit) {
        return Err(XltransformError::InvalidAddress(format!(
            "pasting {len} {axis}s at {axis} {anchor} runs past the last {axis}"
        )));
    }
    Ok(())
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
    use crate::types::{Font, ProcessingType};

    fn workbook() -> Workbook {
        let mut workbook = Workbook::new();
        workbook.create_sheet("Sheet1").unwrap();
        workbook
    }

    fn copy_op(kind: ProcessingType, source: &str, dest: &str, is_insert: bool) -> Processing {
        Processing::new(kind)
            .with_cells(parse_range(source).unwrap())
            .with_paste_target("Sheet1", parse_range(dest).unwrap(), is_insert)
    }

    #[test]
    fn test_overlapping_paste_reads_snapshot() {
        let mut wb = workbook();
        let sheet = wb.sheet_mut("Sheet1").unwrap();
        sheet.set_value(1, 1, "a");
        sheet.set_value(1, 2, "b");
        let processing = copy_op(ProcessingType::Copy, "A1:B1", "B1", false);
        copy(&mut wb, "Sheet1", &processing).unwrap();
        let sheet = wb.sheet("Sheet1").unwrap();
        assert_eq!(sheet.value(1, 1).as_str(), Some("a"));
        assert_eq!(sheet.value(1, 2).as_str(), Some("a"));
        assert_eq!(sheet.value(1, 3).as_str(), Some("b"));
    }

    #[test]
    fn test_empty_source_clears_destination() {
        let mut wb = workbook();
        wb.sheet_mut("Sheet1").unwrap().set_value(5, 5, "stale");
        let processing = copy_op(ProcessingType::Copy, "A1", "E5", false);
        copy(&mut wb, "Sheet1", &processing).unwrap();
        assert!(wb.sheet("Sheet1").unwrap().get(5, 5).is_none());
    }

    #[test]
    fn test_copy_style_keeps_values() {
        let mut wb = workbook();
        let sheet = wb.sheet_mut("Sheet1").unwrap();
        sheet.cell_mut(1, 1).style.font = Some(Font {
            bold: true,
            ..Font::default()
        });
        sheet.set_value(2, 1, "kept");
        let processing = copy_op(ProcessingType::CopyStyle, "A1", "A2", true);
        copy_style(&mut wb, "Sheet1", &processing).unwrap();
        let sheet = wb.sheet("Sheet1").unwrap();
        assert_eq!(sheet.value(2, 1).as_str(), Some("kept"));
        assert_eq!(sheet.style(2, 1), sheet.style(1, 1));
        // is_insert is ignored for styles.
        assert_eq!(sheet.max_row(), 2);
    }

    #[test]
    fn test_missing_paste_target() {
        let mut wb = workbook();
        let processing =
            Processing::new(ProcessingType::Copy).with_cells(parse_range("A1").unwrap());
        let err = copy(&mut wb, "Sheet1", &processing).unwrap_err();
        assert!(matches!(err, XltransformError::MissingPasteTarget("copy")));
    }

    #[test]
    fn test_insert_mode_checks_both_axes_first() {
        let mut wb = workbook();
        let sheet = wb.sheet_mut("Sheet1").unwrap();
        sheet.set_value(1, 1, "a");
        sheet.set_value(10, MAX_COL, "edge");
        let before = wb.clone();

        let processing = copy_op(ProcessingType::Copy, "A1:B1", "A1", true);
        let err = copy(&mut wb, "Sheet1", &processing).unwrap_err();
        assert!(matches!(err, XltransformError::InvalidAddress(_)));
        // No rows were inserted ahead of the failing column insert.
        assert_eq!(wb, before);
    }

    #[test]
    fn test_paste_past_grid_rejected() {
        let mut wb = workbook();
        let processing = copy_op(ProcessingType::Copy, "A1:C1", "XFC1", false);
        let err = copy(&mut wb, "Sheet1", &processing).unwrap_err();
        assert!(matches!(err, XltransformError::InvalidAddress(_)));
    }
}

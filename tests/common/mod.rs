//! Common test utilities and assertion helpers.
//!
//! Cells are addressed with `A1` references so assertions read like the
//! operations that produced them.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use xltransform::cell_ref::{parse_cell_ref, parse_range, resolve};
use xltransform::{BorderSide, BorderStyle, CellValue, Sheet, Style, Workbook};

// Re-export fixtures for convenience
pub use super::fixtures::*;

/// Which side of a cell border to inspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

pub fn sheet<'a>(workbook: &'a Workbook, name: &str) -> &'a Sheet {
    workbook
        .sheet(name)
        .unwrap_or_else(|e| panic!("sheet {name}: {e}"))
}

pub fn value<'a>(workbook: &'a Workbook, sheet_name: &str, cell_ref: &str) -> &'a CellValue {
    let (row, col) = parse_cell_ref(cell_ref).unwrap();
    sheet(workbook, sheet_name).value(row, col)
}

pub fn style<'a>(workbook: &'a Workbook, sheet_name: &str, cell_ref: &str) -> &'a Style {
    let (row, col) = parse_cell_ref(cell_ref).unwrap();
    sheet(workbook, sheet_name).style(row, col)
}

/// Read a range back as a row-major grid.
pub fn values_grid(workbook: &Workbook, sheet_name: &str, cells: &str) -> Vec<Vec<CellValue>> {
    let resolved = resolve(&parse_range(cells).unwrap()).unwrap();
    let sheet = sheet(workbook, sheet_name);
    resolved
        .rows
        .iter()
        .map(|row| {
            resolved
                .cols
                .iter()
                .map(|col| sheet.value(row, col).clone())
                .collect()
        })
        .collect()
}

pub fn border_side(style: &Style, side: Side) -> Option<&BorderSide> {
    let border = style.border.as_ref()?;
    match side {
        Side::Top => border.top.as_ref(),
        Side::Bottom => border.bottom.as_ref(),
        Side::Left => border.left.as_ref(),
        Side::Right => border.right.as_ref(),
    }
}

// ============================================================================
// Assertions
// ============================================================================

pub fn assert_text(workbook: &Workbook, sheet_name: &str, cell_ref: &str, expected: &str) {
    let actual = value(workbook, sheet_name, cell_ref);
    assert_eq!(
        actual.as_str(),
        Some(expected),
        "{sheet_name}!{cell_ref}: expected {expected:?}, got {actual:?}"
    );
}

pub fn assert_number(workbook: &Workbook, sheet_name: &str, cell_ref: &str, expected: f64) {
    let actual = value(workbook, sheet_name, cell_ref);
    assert_eq!(
        actual.as_f64(),
        Some(expected),
        "{sheet_name}!{cell_ref}: expected {expected}, got {actual:?}"
    );
}

pub fn assert_empty(workbook: &Workbook, sheet_name: &str, cell_ref: &str) {
    let actual = value(workbook, sheet_name, cell_ref);
    assert!(
        actual.is_empty(),
        "{sheet_name}!{cell_ref}: expected empty, got {actual:?}"
    );
}

pub fn assert_border(
    workbook: &Workbook,
    sheet_name: &str,
    cell_ref: &str,
    side: Side,
    expected: Option<BorderStyle>,
) {
    let style = style(workbook, sheet_name, cell_ref);
    let actual = border_side(style, side).map(|s| s.style);
    assert_eq!(
        actual, expected,
        "{sheet_name}!{cell_ref} {side:?} border"
    );
}

pub fn assert_sheet_names(workbook: &Workbook, expected: &[&str]) {
    assert_eq!(workbook.sheet_names(), expected);
}

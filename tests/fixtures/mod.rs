//! Test fixtures for building workbooks and operations in memory.
//!
//! Workbooks are assembled with [`WorkbookBuilder`]/[`SheetBuilder`];
//! operations are built from their JSON wire form so every test also
//! exercises deserialization.
//!
//! # Example
//!
//! ```rust,ignore
//! use fixtures::{group, set_values, SheetBuilder, WorkbookBuilder};
//!
//! let mut workbook = WorkbookBuilder::new()
//!     .sheet(SheetBuilder::new("Sheet1").cell("A1", "Test"))
//!     .build();
//! let ops = vec![group("Sheet1", vec![set_values("B1", json!([["x"]]))])];
//! xltransform::apply_operations(&mut workbook, &ops).unwrap();
//! ```
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use serde_json::{json, Value};
use xltransform::cell_ref::{parse_cell_ref, parse_range};
use xltransform::{CellValue, MergeRange, OperationGroup, Processing, Sheet, Style, Workbook};

// ============================================================================
// Workbook Builders
// ============================================================================

/// Builder for one sheet.
#[derive(Debug, Clone)]
pub struct SheetBuilder {
    sheet: Sheet,
}

impl SheetBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            sheet: Sheet::new(name),
        }
    }

    /// Set a value at an `A1` reference.
    pub fn cell(mut self, cell_ref: &str, value: impl Into<CellValue>) -> Self {
        let (row, col) = parse_cell_ref(cell_ref).unwrap();
        self.sheet.set_value(row, col, value);
        self
    }

    /// Set a value and style at an `A1` reference.
    pub fn styled_cell(mut self, cell_ref: &str, value: impl Into<CellValue>, style: Style) -> Self {
        let (row, col) = parse_cell_ref(cell_ref).unwrap();
        let cell = self.sheet.cell_mut(row, col);
        cell.value = value.into();
        cell.style = style;
        self
    }

    /// Register a merged region, e.g. `"A1:B2"`.
    pub fn merge(mut self, range: &str) -> Self {
        let (start, end) = range.split_once(':').unwrap();
        let (start_row, start_col) = parse_cell_ref(start).unwrap();
        let (end_row, end_col) = parse_cell_ref(end).unwrap();
        self.sheet.merges.push(MergeRange {
            start_row,
            start_col,
            end_row,
            end_col,
        });
        self
    }

    pub fn row_height(mut self, row: u32, height: f64) -> Self {
        self.sheet.set_row_height(row, height);
        self
    }

    pub fn column_width(mut self, col: u32, width: f64) -> Self {
        self.sheet.set_column_width(col, width);
        self
    }

    pub fn build(self) -> Sheet {
        self.sheet
    }
}

/// Builder for a whole workbook.
#[derive(Debug, Clone, Default)]
pub struct WorkbookBuilder {
    workbook: Workbook,
}

impl WorkbookBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sheet(mut self, sheet: SheetBuilder) -> Self {
        self.workbook.sheets.push(sheet.build());
        self
    }

    /// Add an empty sheet.
    pub fn add_sheet(self, name: &str) -> Self {
        self.sheet(SheetBuilder::new(name))
    }

    pub fn build(self) -> Workbook {
        self.workbook
    }
}

/// Sheet1 with A1="Test", B1="Data".
pub fn test_data_workbook() -> Workbook {
    WorkbookBuilder::new()
        .sheet(SheetBuilder::new("Sheet1").cell("A1", "Test").cell("B1", "Data"))
        .build()
}

// ============================================================================
// Operation Builders (JSON wire form)
// ============================================================================

/// Wire form of an `A1`-style range: `"B2"`, `"B2:D4"`, `"3:5"`, `"C:E"`.
pub fn range(text: &str) -> Value {
    serde_json::to_value(parse_range(text).unwrap()).unwrap()
}

/// Deserialize a `Processing` from JSON.
pub fn processing(value: Value) -> Processing {
    serde_json::from_value(value).unwrap()
}

pub fn group(sheet_name: &str, processing: Vec<Processing>) -> OperationGroup {
    OperationGroup::new(sheet_name, processing)
}

pub fn set_values(cells: &str, values: Value) -> Processing {
    processing(json!({
        "processing_type": "set_cells",
        "target": { "cells": range(cells), "values": values }
    }))
}

pub fn set_styles(cells: &str, styles: Value) -> Processing {
    processing(json!({
        "processing_type": "set_cells",
        "target": { "cells": range(cells), "styles": styles }
    }))
}

fn transfer(kind: &str, cells: &str, sheet_name: &str, dest: &str, is_insert: bool) -> Processing {
    processing(json!({
        "processing_type": kind,
        "target": { "cells": range(cells) },
        "paste_target": {
            "sheet_name": sheet_name,
            "cells": range(dest),
            "is_insert": is_insert
        }
    }))
}

pub fn copy(cells: &str, sheet_name: &str, dest: &str, is_insert: bool) -> Processing {
    transfer("copy", cells, sheet_name, dest, is_insert)
}

pub fn copy_style(cells: &str, sheet_name: &str, dest: &str) -> Processing {
    transfer("copy_style", cells, sheet_name, dest, false)
}

/// An operation that only needs `target.cells`: insert, delete, hidden,
/// join_cells.
pub fn on_range(kind: &str, cells: &str) -> Processing {
    processing(json!({
        "processing_type": kind,
        "target": { "cells": range(cells) }
    }))
}

/// An operation with no target: copy_sheet, insert_sheet, delete_sheet.
pub fn sheet_op(kind: &str) -> Processing {
    processing(json!({ "processing_type": kind }))
}

//! Tests for `join_cells` and merged-region bookkeeping.
//!
//! Only the top-left cell of a merged region keeps its value; the rest are
//! cleared but keep their styles. Regions never overlap.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;
mod fixtures;

use common::{
    assert_empty, assert_text, group, on_range, processing, set_values, sheet, style, SheetBuilder,
    WorkbookBuilder,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use xltransform::{apply_operations, Font, MergeRange, Style, Workbook, XltransformError};

fn grid_3x3() -> Workbook {
    let mut builder = SheetBuilder::new("Sheet1");
    for (idx, cell) in ["A1", "B1", "C1", "A2", "B2", "C2", "A3", "B3", "C3"]
        .iter()
        .enumerate()
    {
        builder = builder.cell(cell, format!("v{idx}"));
    }
    WorkbookBuilder::new().sheet(builder).build()
}

// ============================================================================
// BASIC MERGES
// ============================================================================

#[test]
fn test_join_clears_non_anchor_values() {
    let mut wb = grid_3x3();
    apply_operations(&mut wb, &[group("Sheet1", vec![on_range("join_cells", "A1:B2")])])
        .unwrap();

    assert_text(&wb, "Sheet1", "A1", "v0");
    assert_empty(&wb, "Sheet1", "B1");
    assert_empty(&wb, "Sheet1", "A2");
    assert_empty(&wb, "Sheet1", "B2");
    // Outside the region nothing changes.
    assert_text(&wb, "Sheet1", "C1", "v2");
    assert_text(&wb, "Sheet1", "A3", "v6");

    assert_eq!(
        sheet(&wb, "Sheet1").merges,
        vec![MergeRange {
            start_row: 1,
            start_col: 1,
            end_row: 2,
            end_col: 2,
        }]
    );
}

#[test]
fn test_join_reversed_corners() {
    let mut wb = grid_3x3();
    let op = processing(json!({
        "processing_type": "join_cells",
        "target": { "cells": {
            "start_cell": { "col_letter": "C", "row": 3 },
            "end_cell": { "col_letter": "B", "row": 2 }
        } }
    }));
    apply_operations(&mut wb, &[group("Sheet1", vec![op])]).unwrap();

    let merges = &sheet(&wb, "Sheet1").merges;
    assert_eq!(merges.len(), 1);
    assert_eq!(merges[0].to_string(), "B2:C3");
    assert_text(&wb, "Sheet1", "B2", "v4");
    assert_empty(&wb, "Sheet1", "C3");
}

#[test]
fn test_join_keeps_styles_of_cleared_cells() {
    let bold = Style {
        font: Some(Font {
            bold: true,
            ..Font::default()
        }),
        ..Style::default()
    };
    let mut wb = WorkbookBuilder::new()
        .sheet(
            SheetBuilder::new("Sheet1")
                .cell("A1", "title")
                .styled_cell("B1", "gone", bold.clone()),
        )
        .build();
    apply_operations(&mut wb, &[group("Sheet1", vec![on_range("join_cells", "A1:B1")])])
        .unwrap();

    assert_empty(&wb, "Sheet1", "B1");
    assert_eq!(style(&wb, "Sheet1", "B1"), &bold);
}

#[test]
fn test_join_single_cell_is_noop() {
    let mut wb = grid_3x3();
    let before = wb.clone();
    apply_operations(&mut wb, &[group("Sheet1", vec![on_range("join_cells", "B2")])]).unwrap();
    assert_eq!(wb, before);
}

// ============================================================================
// OVERLAP POLICY
// ============================================================================

#[test]
fn test_identical_merge_is_noop() {
    let mut wb = grid_3x3();
    let ops = vec![on_range("join_cells", "A1:B2"), on_range("join_cells", "A1:B2")];
    apply_operations(&mut wb, &[group("Sheet1", ops)]).unwrap();
    assert_eq!(sheet(&wb, "Sheet1").merges.len(), 1);
}

#[test]
fn test_rejoin_clears_values_written_after_first_join() {
    let mut wb = grid_3x3();
    let ops = vec![
        on_range("join_cells", "A1:B1"),
        set_values("B1", json!([["late"]])),
        on_range("join_cells", "A1:B1"),
    ];
    apply_operations(&mut wb, &[group("Sheet1", ops)]).unwrap();

    assert_text(&wb, "Sheet1", "A1", "v0");
    assert_empty(&wb, "Sheet1", "B1");
    assert_eq!(sheet(&wb, "Sheet1").merges.len(), 1);
}

#[test]
fn test_overlapping_merge_rejected() {
    let mut wb = grid_3x3();
    apply_operations(&mut wb, &[group("Sheet1", vec![on_range("join_cells", "A1:B2")])])
        .unwrap();
    let before = wb.clone();

    let err = apply_operations(&mut wb, &[group("Sheet1", vec![on_range("join_cells", "B2:C3")])])
        .unwrap_err();
    match err {
        XltransformError::MergeConflict(new, existing) => {
            assert_eq!(new, "B2:C3");
            assert_eq!(existing, "A1:B2");
        }
        other => panic!("expected MergeConflict, got {other:?}"),
    }
    // Rejected before any value was cleared.
    assert_eq!(wb, before);
}

#[test]
fn test_adjacent_merges_allowed() {
    let mut wb = grid_3x3();
    let ops = vec![on_range("join_cells", "A1:B1"), on_range("join_cells", "A2:C3")];
    apply_operations(&mut wb, &[group("Sheet1", ops)]).unwrap();
    assert_eq!(sheet(&wb, "Sheet1").merges.len(), 2);
}

#[test]
fn test_join_needs_cells() {
    let mut wb = grid_3x3();
    let err = apply_operations(&mut wb, &[group("Sheet1", vec![on_range("join_cells", "1:2")])])
        .unwrap_err();
    assert!(matches!(err, XltransformError::InvalidAddress(_)));

    let op = processing(json!({ "processing_type": "join_cells" }));
    let err = apply_operations(&mut wb, &[group("Sheet1", vec![op])]).unwrap_err();
    assert!(matches!(err, XltransformError::MissingTarget("join_cells")));
}

#[test]
fn test_merges_serialize_camel_case() {
    let wb = WorkbookBuilder::new()
        .sheet(SheetBuilder::new("Sheet1").merge("A1:B2"))
        .build();
    let json = serde_json::to_value(&wb).unwrap();
    assert_eq!(
        json["sheets"][0]["merges"][0],
        json!({ "startRow": 1, "startCol": 1, "endRow": 2, "endCol": 2 })
    );
}

//! Tests for address resolution: column letters, `A1` references, and
//! range normalization.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

mod common;
mod fixtures;

use test_case::test_case;
use xltransform::cell_ref::{
    column_index, column_letter, format_cell_ref, parse_cell_ref, parse_range, resolve, MAX_COL,
    MAX_ROW,
};
use xltransform::{CellAddress, CellRange, XltransformError};

// ============================================================================
// COLUMN LETTERS
// ============================================================================

#[test_case("A", 1)]
#[test_case("Z", 26)]
#[test_case("AA", 27)]
#[test_case("AZ", 52)]
#[test_case("ZZ", 702)]
#[test_case("AAA", 703)]
#[test_case("XFD", 16_384)]
#[test_case("b", 2 ; "lowercase")]
fn test_column_index(letters: &str, expected: u32) {
    assert_eq!(column_index(letters).unwrap(), expected);
}

#[test_case("" ; "empty")]
#[test_case("A1" ; "digit")]
#[test_case("XFE" ; "past last column")]
#[test_case("AAAA" ; "four letters")]
fn test_column_index_invalid(letters: &str) {
    assert!(matches!(
        column_index(letters),
        Err(XltransformError::InvalidAddress(_))
    ));
}

#[test]
fn test_column_roundtrip_and_monotonic() {
    let mut previous = 0;
    for idx in 1..=702 {
        let letters = column_letter(idx).unwrap();
        let back = column_index(&letters).unwrap();
        assert_eq!(back, idx, "{letters}");
        assert!(back > previous);
        previous = back;
    }
}

#[test]
fn test_column_letter_out_of_range() {
    assert!(column_letter(0).is_err());
    assert!(column_letter(MAX_COL + 1).is_err());
}

// ============================================================================
// CELL REFERENCES
// ============================================================================

#[test_case("A1", (1, 1))]
#[test_case("B3", (3, 2))]
#[test_case("xfd1048576", (MAX_ROW, MAX_COL) ; "last cell")]
fn test_parse_cell_ref(cell_ref: &str, expected: (u32, u32)) {
    assert_eq!(parse_cell_ref(cell_ref).unwrap(), expected);
}

#[test_case("A0")]
#[test_case("1A")]
#[test_case("A1048577")]
#[test_case("B")]
fn test_parse_cell_ref_invalid(cell_ref: &str) {
    assert!(parse_cell_ref(cell_ref).is_err());
}

#[test]
fn test_format_cell_ref() {
    assert_eq!(format_cell_ref(4, 28).unwrap(), "AB4");
}

// ============================================================================
// RANGES
// ============================================================================

#[test]
fn test_resolve_reversed_corners() {
    let range = CellRange::new(CellAddress::cell("D", 4), CellAddress::cell("B", 2));
    let resolved = resolve(&range).unwrap();
    assert_eq!(resolved.rows.to_vec(), vec![2, 3, 4]);
    assert_eq!(resolved.cols.to_vec(), vec![2, 3, 4]);
}

#[test]
fn test_resolve_single_cell() {
    let resolved = resolve(&parse_range("C7").unwrap()).unwrap();
    assert!(resolved.is_single_cell());
    assert_eq!(resolved.anchor(), Some((7, 3)));
}

#[test]
fn test_resolve_whole_rows() {
    let resolved = resolve(&parse_range("5:3").unwrap()).unwrap();
    assert_eq!(resolved.rows.to_vec(), vec![3, 4, 5]);
    assert!(resolved.cols.is_empty());
    assert!(resolved.anchor().is_none());
}

#[test]
fn test_resolve_whole_columns() {
    let resolved = resolve(&parse_range("C:E").unwrap()).unwrap();
    assert_eq!(resolved.cols.to_vec(), vec![3, 4, 5]);
    assert!(resolved.rows.is_empty());
}

#[test]
fn test_resolve_whole_sheet_is_cheap() {
    let range = CellRange::new(CellAddress::cell("A", 1), CellAddress::cell("XFD", 1_048_576));
    let resolved = resolve(&range).unwrap();
    assert_eq!(resolved.rows.len(), MAX_ROW);
    assert_eq!(resolved.cols.len(), MAX_COL);
}

#[test]
fn test_end_cell_component_falls_back_to_start() {
    let range = CellRange::new(CellAddress::cell("B", 2), CellAddress::row(4));
    let resolved = resolve(&range).unwrap();
    assert_eq!(resolved.rows.to_vec(), vec![2, 3, 4]);
    assert_eq!(resolved.cols.to_vec(), vec![2]);
}

#[test_case(0 ; "zero")]
#[test_case(-3 ; "negative")]
#[test_case(1_048_577 ; "past last row")]
fn test_resolve_invalid_row(row: i64) {
    let range = CellRange::single(CellAddress::cell("A", row));
    assert!(matches!(
        resolve(&range),
        Err(XltransformError::InvalidAddress(_))
    ));
}

#[test]
fn test_range_wire_form() {
    let range: CellRange = serde_json::from_str(
        r#"{"start_cell": {"col_letter": "B", "row": 2}, "end_cell": {"col_letter": "D", "row": 4}}"#,
    )
    .unwrap();
    assert_eq!(range, parse_range("B2:D4").unwrap());

    let row_only: CellRange = serde_json::from_str(r#"{"start_cell": {"row": 3}}"#).unwrap();
    assert!(row_only.start_cell.is_row_only());
    assert!(row_only.end_cell.is_none());
}

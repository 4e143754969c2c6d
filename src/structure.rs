//! Row and column insertion and deletion.
//!
//! Cells, row/column metadata and merged regions at or after the insertion
//! point shift by the inserted count; deletion removes the span and shifts
//! everything after it back.

use std::collections::BTreeMap;

use crate::cell_ref::{MAX_COL, MAX_ROW};
use crate::error::{Result, XltransformError};
use crate::types::{CellPos, Sheet};

/// Dimension for row/column operations
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Axis {
    Row,
    Column,
}

impl Axis {
    /// Get the coordinate of a position along this axis
    fn coord(self, (row, col): CellPos) -> u32 {
        match self {
            Axis::Row => row,
            Axis::Column => col,
        }
    }

    /// Position with its coordinate along this axis replaced
    fn with_coord(self, (row, col): CellPos, coord: u32) -> CellPos {
        match self {
            Axis::Row => (coord, col),
            Axis::Column => (row, coord),
        }
    }

    fn limit(self) -> u32 {
        match self {
            Axis::Row => MAX_ROW,
            Axis::Column => MAX_COL,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Axis::Row => "row",
            Axis::Column => "column",
        }
    }
}

/// New bounds of an inclusive span after `count` lines are inserted at `at`.
pub(crate) fn shift_span_for_insert((start, end): (u32, u32), at: u32, count: u32) -> (u32, u32) {
    if start >= at {
        (start + count, end + count)
    } else if end >= at {
        (start, end + count)
    } else {
        (start, end)
    }
}

/// New bounds of an inclusive span after lines `at..at + count` are removed,
/// or `None` when the span lies entirely inside the removed lines.
pub(crate) fn shift_span_for_delete(
    (start, end): (u32, u32),
    at: u32,
    count: u32,
) -> Option<(u32, u32)> {
    let last_removed = at + count - 1;
    if end < at {
        return Some((start, end));
    }
    if start > last_removed {
        return Some((start - count, end - count));
    }
    let new_start = start.min(at);
    let new_end = if end > last_removed { end - count } else { at - 1 };
    (new_end >= new_start && new_end > 0).then_some((new_start, new_end))
}

impl Sheet {
    /// Insert `count` rows before row `at`.
    pub fn insert_rows(&mut self, at: u32, count: u32) -> Result<()> {
        self.insert_lines(Axis::Row, at, count)
    }

    /// Delete `count` rows starting at row `at`.
    pub fn delete_rows(&mut self, at: u32, count: u32) -> Result<()> {
        self.delete_lines(Axis::Row, at, count)
    }

    /// Insert `count` columns before column `at`.
    pub fn insert_cols(&mut self, at: u32, count: u32) -> Result<()> {
        self.insert_lines(Axis::Column, at, count)
    }

    /// Delete `count` columns starting at column `at`.
    pub fn delete_cols(&mut self, at: u32, count: u32) -> Result<()> {
        self.delete_lines(Axis::Column, at, count)
    }

    /// Generic insert operation for row or column
    pub(crate) fn insert_lines(&mut self, axis: Axis, at: u32, count: u32) -> Result<()> {
        self.check_insert(axis, at, count)?;
        if count == 0 {
            return Ok(());
        }

        self.cells = std::mem::take(&mut self.cells)
            .into_iter()
            .map(|(pos, cell)| {
                let coord = axis.coord(pos);
                if coord >= at {
                    (axis.with_coord(pos, coord + count), cell)
                } else {
                    (pos, cell)
                }
            })
            .collect();

        match axis {
            Axis::Row => shift_keys_for_insert(&mut self.rows, at, count),
            Axis::Column => shift_keys_for_insert(&mut self.cols, at, count),
        }
        self.shift_merges_for_insert(axis, at, count);
        Ok(())
    }

    /// Fail when inserting `count` lines at `at` would push content off the grid.
    pub(crate) fn check_insert(&self, axis: Axis, at: u32, count: u32) -> Result<()> {
        check_line(axis, at)?;
        let furthest = self.furthest_line(axis);
        if count > 0
            && furthest >= at
            && u64::from(furthest) + u64::from(count) > u64::from(axis.limit())
        {
            return Err(XltransformError::InvalidAddress(format!(
                "inserting {count} {}s at {at} would push content past the last {}",
                axis.name(),
                axis.name()
            )));
        }
        Ok(())
    }

    /// Generic delete operation for row or column
    pub(crate) fn delete_lines(&mut self, axis: Axis, at: u32, count: u32) -> Result<()> {
        check_line(axis, at)?;
        if count == 0 {
            return Ok(());
        }
        // Deleting past the grid end only removes what exists.
        let count = count.min(axis.limit() - at + 1);

        self.cells = std::mem::take(&mut self.cells)
            .into_iter()
            .filter_map(|(pos, cell)| {
                let coord = axis.coord(pos);
                if coord < at {
                    Some((pos, cell))
                } else if coord - at < count {
                    None
                } else {
                    Some((axis.with_coord(pos, coord - count), cell))
                }
            })
            .collect();

        match axis {
            Axis::Row => shift_keys_for_delete(&mut self.rows, at, count),
            Axis::Column => shift_keys_for_delete(&mut self.cols, at, count),
        }
        self.shift_merges_for_delete(axis, at, count);
        Ok(())
    }

    /// Furthest line along `axis` holding a cell, metadata, or a merged region.
    fn furthest_line(&self, axis: Axis) -> u32 {
        let cells = self.cells.keys().map(|&pos| axis.coord(pos)).max();
        let meta = match axis {
            Axis::Row => self.rows.keys().next_back().copied(),
            Axis::Column => self.cols.keys().next_back().copied(),
        };
        let merges = self
            .merges
            .iter()
            .map(|m| match axis {
                Axis::Row => m.end_row,
                Axis::Column => m.end_col,
            })
            .max();
        cells.max(meta).max(merges).unwrap_or(0)
    }
}

fn check_line(axis: Axis, at: u32) -> Result<()> {
    if at == 0 || at > axis.limit() {
        return Err(XltransformError::InvalidAddress(format!(
            "{} {at} out of range",
            axis.name()
        )));
    }
    Ok(())
}

fn shift_keys_for_insert<V>(map: &mut BTreeMap<u32, V>, at: u32, count: u32) {
    let tail = map.split_off(&at);
    map.extend(tail.into_iter().map(|(k, v)| (k + count, v)));
}

fn shift_keys_for_delete<V>(map: &mut BTreeMap<u32, V>, at: u32, count: u32) {
    let tail = map.split_off(&at);
    map.extend(
        tail.into_iter()
            .filter(|&(k, _)| k - at >= count)
            .map(|(k, v)| (k - count, v)),
    );
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn test_span_insert() {
        assert_eq!(shift_span_for_insert((5, 6), 3, 2), (7, 8));
        assert_eq!(shift_span_for_insert((2, 4), 3, 2), (2, 6));
        assert_eq!(shift_span_for_insert((1, 2), 3, 2), (1, 2));
        assert_eq!(shift_span_for_insert((3, 3), 3, 1), (4, 4));
    }

    #[test]
    fn test_span_delete() {
        assert_eq!(shift_span_for_delete((1, 2), 3, 2), Some((1, 2)));
        assert_eq!(shift_span_for_delete((6, 8), 3, 2), Some((4, 6)));
        assert_eq!(shift_span_for_delete((3, 4), 3, 2), None);
        assert_eq!(shift_span_for_delete((2, 6), 3, 2), Some((2, 4)));
        assert_eq!(shift_span_for_delete((4, 6), 3, 2), Some((3, 4)));
        assert_eq!(shift_span_for_delete((1, 3), 3, 2), Some((1, 2)));
    }

    #[test]
    fn test_insert_rows_shifts_cells_and_metadata() {
        let mut sheet = Sheet::new("Sheet1");
        sheet.set_value(1, 1, "above");
        sheet.set_value(3, 2, "moved");
        sheet.set_row_height(3, 40.0);
        sheet.hide_row(1);
        sheet.insert_rows(2, 3).unwrap();

        assert_eq!(sheet.value(1, 1).as_str(), Some("above"));
        assert_eq!(sheet.value(6, 2).as_str(), Some("moved"));
        assert!(sheet.value(3, 2).is_empty());
        assert_eq!(sheet.row_height(6), Some(40.0));
        assert_eq!(sheet.row_height(3), None);
        assert!(sheet.is_row_hidden(1));
    }

    #[test]
    fn test_delete_cols_removes_span() {
        let mut sheet = Sheet::new("Sheet1");
        for col in 1..=5 {
            sheet.set_value(1, col, f64::from(col));
        }
        sheet.set_column_width(2, 20.0);
        sheet.set_column_width(5, 9.0);
        sheet.delete_cols(2, 2).unwrap();

        assert_eq!(sheet.value(1, 1).as_f64(), Some(1.0));
        assert_eq!(sheet.value(1, 2).as_f64(), Some(4.0));
        assert_eq!(sheet.value(1, 3).as_f64(), Some(5.0));
        assert!(sheet.value(1, 4).is_empty());
        assert_eq!(sheet.column_width(2), None);
        assert_eq!(sheet.column_width(3), Some(9.0));
    }

    #[test]
    fn test_insert_refuses_to_push_past_grid() {
        let mut sheet = Sheet::new("Sheet1");
        sheet.set_value(MAX_ROW, 1, "last");
        let err = sheet.insert_rows(5, 1).unwrap_err();
        assert!(matches!(err, XltransformError::InvalidAddress(_)));
        assert_eq!(sheet.value(MAX_ROW, 1).as_str(), Some("last"));
    }

    #[test]
    fn test_delete_past_grid_end() {
        let mut sheet = Sheet::new("Sheet1");
        sheet.set_value(MAX_ROW, 1, "last");
        sheet.delete_rows(MAX_ROW, 10).unwrap();
        assert!(sheet.cells.is_empty());
    }
}

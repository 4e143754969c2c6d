//! Merged-region bookkeeping.
//!
//! Regions within a sheet never overlap. Re-merging an identical region is a
//! no-op, any other overlap is rejected, and a 1×1 region is accepted but not
//! registered. Only the top-left (anchor) cell of a region keeps its value.

use std::fmt;

use crate::cell_ref::{format_cell_ref, ResolvedRange};
use crate::error::{Result, XltransformError};
use crate::structure::{shift_span_for_delete, shift_span_for_insert, Axis};
use crate::types::{MergeRange, Sheet};

impl MergeRange {
    /// The region spanning a resolved block's outer corners.
    #[must_use]
    pub fn from_resolved(range: &ResolvedRange) -> Option<Self> {
        Some(Self {
            start_row: range.rows.first()?,
            start_col: range.cols.first()?,
            end_row: range.rows.last()?,
            end_col: range.cols.last()?,
        })
    }

    #[must_use]
    pub fn contains(&self, row: u32, col: u32) -> bool {
        (self.start_row..=self.end_row).contains(&row)
            && (self.start_col..=self.end_col).contains(&col)
    }

    #[must_use]
    pub fn overlaps(&self, other: &MergeRange) -> bool {
        self.start_row <= other.end_row
            && other.start_row <= self.end_row
            && self.start_col <= other.end_col
            && other.start_col <= self.end_col
    }

    #[must_use]
    pub fn is_single_cell(&self) -> bool {
        self.start_row == self.end_row && self.start_col == self.end_col
    }

    fn span(&self, axis: Axis) -> (u32, u32) {
        match axis {
            Axis::Row => (self.start_row, self.end_row),
            Axis::Column => (self.start_col, self.end_col),
        }
    }

    fn with_span(mut self, axis: Axis, (start, end): (u32, u32)) -> Self {
        match axis {
            Axis::Row => {
                self.start_row = start;
                self.end_row = end;
            }
            Axis::Column => {
                self.start_col = start;
                self.end_col = end;
            }
        }
        self
    }
}

impl fmt::Display for MergeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (
            format_cell_ref(self.start_row, self.start_col),
            format_cell_ref(self.end_row, self.end_col),
        ) {
            (Ok(start), Ok(end)) => write!(f, "{start}:{end}"),
            _ => write!(
                f,
                "R{}C{}:R{}C{}",
                self.start_row, self.start_col, self.end_row, self.end_col
            ),
        }
    }
}

impl Sheet {
    /// Register a merged region and blank every non-anchor value in it.
    /// Re-merging an identical region blanks again but registers nothing.
    ///
    /// Returns whether a new region was registered.
    pub fn merge_cells(&mut self, merge: MergeRange) -> Result<bool> {
        if merge.is_single_cell() {
            return Ok(false);
        }
        if let Some(existing) = self
            .merges
            .iter()
            .find(|m| **m != merge && m.overlaps(&merge))
        {
            return Err(XltransformError::MergeConflict(
                merge.to_string(),
                existing.to_string(),
            ));
        }

        let covered: Vec<(u32, u32)> = self
            .cells
            .range((merge.start_row, 0)..=(merge.end_row, u32::MAX))
            .map(|(&pos, _)| pos)
            .filter(|&(row, col)| merge.contains(row, col))
            .filter(|&pos| pos != (merge.start_row, merge.start_col))
            .collect();
        for (row, col) in covered {
            self.clear_value(row, col);
        }

        if self.merges.contains(&merge) {
            return Ok(false);
        }
        self.merges.push(merge);
        Ok(true)
    }

    /// Move regions for `count` lines inserted before `at`. Regions straddling
    /// the insertion point grow.
    pub(crate) fn shift_merges_for_insert(&mut self, axis: Axis, at: u32, count: u32) {
        for merge in &mut self.merges {
            let span = shift_span_for_insert(merge.span(axis), at, count);
            *merge = merge.with_span(axis, span);
        }
    }

    /// Move regions for `count` lines removed from `at`. Regions inside the
    /// removed span vanish, partially covered ones shrink, and anything
    /// reduced to a single cell is dropped.
    pub(crate) fn shift_merges_for_delete(&mut self, axis: Axis, at: u32, count: u32) {
        self.merges = std::mem::take(&mut self.merges)
            .into_iter()
            .filter_map(|merge| {
                shift_span_for_delete(merge.span(axis), at, count)
                    .map(|span| merge.with_span(axis, span))
            })
            .filter(|merge| !merge.is_single_cell())
            .collect();
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

    fn region(start_row: u32, start_col: u32, end_row: u32, end_col: u32) -> MergeRange {
        MergeRange {
            start_row,
            start_col,
            end_row,
            end_col,
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(region(1, 1, 2, 3).to_string(), "A1:C2");
    }

    #[test]
    fn test_overlap() {
        let a = region(1, 1, 2, 2);
        assert!(a.overlaps(&region(2, 2, 3, 3)));
        assert!(!a.overlaps(&region(3, 1, 4, 2)));
        assert!(!a.overlaps(&region(1, 3, 2, 4)));
    }

    #[test]
    fn test_merge_rejects_overlap() {
        let mut sheet = Sheet::new("Sheet1");
        assert!(sheet.merge_cells(region(1, 1, 2, 2)).unwrap());
        let err = sheet.merge_cells(region(2, 2, 3, 3)).unwrap_err();
        assert!(matches!(err, XltransformError::MergeConflict(..)));
        assert_eq!(sheet.merges.len(), 1);
    }

    #[test]
    fn test_merge_identical_is_noop() {
        let mut sheet = Sheet::new("Sheet1");
        assert!(sheet.merge_cells(region(1, 1, 2, 2)).unwrap());
        assert!(!sheet.merge_cells(region(1, 1, 2, 2)).unwrap());
        assert_eq!(sheet.merges.len(), 1);
    }

    #[test]
    fn test_single_cell_not_registered() {
        let mut sheet = Sheet::new("Sheet1");
        sheet.set_value(1, 1, "keep");
        assert!(!sheet.merge_cells(region(1, 1, 1, 1)).unwrap());
        assert!(sheet.merges.is_empty());
        assert_eq!(sheet.value(1, 1).as_str(), Some("keep"));
    }

    #[test]
    fn test_remerge_blanks_late_values() {
        let mut sheet = Sheet::new("Sheet1");
        sheet.merge_cells(region(1, 1, 1, 2)).unwrap();
        sheet.set_value(1, 2, "late");
        assert!(!sheet.merge_cells(region(1, 1, 1, 2)).unwrap());
        assert!(sheet.value(1, 2).is_empty());
        assert_eq!(sheet.merges.len(), 1);
    }

    #[test]
    fn test_delete_shrinks_and_drops() {
        let mut sheet = Sheet::new("Sheet1");
        sheet.merges = vec![region(2, 1, 5, 1), region(8, 1, 9, 2), region(3, 3, 4, 4)];
        // Remove rows 3..=4.
        sheet.shift_merges_for_delete(Axis::Row, 3, 2);
        assert_eq!(sheet.merges, vec![region(2, 1, 3, 1), region(6, 1, 7, 2)]);
    }

    #[test]
    fn test_insert_grows_straddling_region() {
        let mut sheet = Sheet::new("Sheet1");
        sheet.merges = vec![region(1, 2, 1, 4), region(1, 6, 2, 7)];
        sheet.shift_merges_for_insert(Axis::Column, 3, 2);
        assert_eq!(sheet.merges, vec![region(1, 2, 1, 6), region(1, 8, 2, 9)]);
    }
}

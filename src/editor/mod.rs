//! Operation engine.
//!
//! `Editor` wraps a workbook and applies one [`Processing`] at a time,
//! dispatching on its [`ProcessingType`]. It tracks which sheets were
//! modified so callers can re-encode only what changed.

pub(crate) mod clipboard;
pub(crate) mod dimensions;
pub(crate) mod mutation;
pub(crate) mod sheets;

use std::collections::BTreeSet;

use crate::error::{Result, XltransformError};
use crate::options::Options;
use crate::types::{CellRange, Processing, ProcessingTarget, ProcessingType, Workbook};

/// Applies operations to a borrowed workbook.
pub struct Editor<'a> {
    workbook: &'a mut Workbook,
    options: &'a Options,
    /// Names of sheets created, modified or removed so far.
    dirty_sheets: BTreeSet<String>,
}

impl<'a> Editor<'a> {
    pub fn new(workbook: &'a mut Workbook, options: &'a Options) -> Self {
        Self {
            workbook,
            options,
            dirty_sheets: BTreeSet::new(),
        }
    }

    /// Apply one operation in the context of `sheet_name`.
    ///
    /// Fails with `UnsupportedOperation` for an unknown `processing_type`
    /// before anything is touched.
    pub fn apply(&mut self, sheet_name: &str, processing: &Processing) -> Result<()> {
        let touched = match processing.kind()? {
            ProcessingType::Copy => clipboard::copy(self.workbook, sheet_name, processing)?,
            ProcessingType::CopyStyle => {
                clipboard::copy_style(self.workbook, sheet_name, processing)?
            }
            ProcessingType::CopySheet => {
                sheets::copy_sheet(self.workbook, sheet_name, &self.options.sheet_copy_suffix)?
            }
            ProcessingType::InsertSheet => sheets::insert_sheet(self.workbook, sheet_name)?,
            ProcessingType::DeleteSheet => sheets::delete_sheet(self.workbook, sheet_name)?,
            ProcessingType::Insert => dimensions::insert(self.workbook, sheet_name, processing)?,
            ProcessingType::Delete => dimensions::delete(self.workbook, sheet_name, processing)?,
            ProcessingType::Hidden => dimensions::hidden(self.workbook, sheet_name, processing)?,
            ProcessingType::SetCells => mutation::set_cells(self.workbook, sheet_name, processing)?,
            ProcessingType::JoinCells => {
                mutation::join_cells(self.workbook, sheet_name, processing)?
            }
        };
        self.dirty_sheets.insert(touched);
        Ok(())
    }

    /// Check if any operation has modified the workbook.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        !self.dirty_sheets.is_empty()
    }

    #[must_use]
    pub fn dirty_sheets(&self) -> &BTreeSet<String> {
        &self.dirty_sheets
    }

    #[must_use]
    pub fn into_dirty_sheets(self) -> BTreeSet<String> {
        self.dirty_sheets
    }
}

pub(crate) fn require_target<'p>(
    processing: &'p Processing,
    op: &'static str,
) -> Result<&'p ProcessingTarget> {
    processing
        .target
        .as_ref()
        .ok_or(XltransformError::MissingTarget(op))
}

pub(crate) fn require_cells<'p>(processing: &'p Processing, op: &'static str) -> Result<&'p CellRange> {
    require_target(processing, op)?
        .cells
        .as_ref()
        .ok_or(XltransformError::MissingTarget(op))
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
    use crate::types::CellValue;

    fn workbook() -> Workbook {
        let mut workbook = Workbook::new();
        workbook.create_sheet("Sheet1").unwrap();
        workbook
    }

    #[test]
    fn test_unknown_type_rejected_untouched() {
        let mut wb = workbook();
        let before = wb.clone();
        let options = Options::default();
        let mut editor = Editor::new(&mut wb, &options);
        let processing = Processing {
            processing_type: "frobnicate".into(),
            target: None,
            paste_target: None,
        };
        let err = editor.apply("Sheet1", &processing).unwrap_err();
        assert!(matches!(err, XltransformError::UnsupportedOperation(ref t) if t == "frobnicate"));
        assert!(!editor.is_dirty());
        assert_eq!(wb, before);
    }

    #[test]
    fn test_dirty_tracking() {
        let mut wb = workbook();
        let options = Options::default();
        let mut editor = Editor::new(&mut wb, &options);
        editor
            .apply(
                "Sheet1",
                &Processing::new(ProcessingType::SetCells)
                    .with_cells(parse_range("A1").unwrap())
                    .with_values(vec![vec![CellValue::from("x")]]),
            )
            .unwrap();
        editor
            .apply("Sheet1", &Processing::new(ProcessingType::CopySheet))
            .unwrap();
        let dirty: Vec<_> = editor.dirty_sheets().iter().cloned().collect();
        assert_eq!(dirty, vec!["Sheet1".to_string(), "Sheet1_copy".to_string()]);
    }

    #[test]
    fn test_missing_target_reports_operation() {
        let mut wb = workbook();
        let options = Options::default();
        let mut editor = Editor::new(&mut wb, &options);
        for kind in [
            ProcessingType::SetCells,
            ProcessingType::Insert,
            ProcessingType::Delete,
            ProcessingType::Hidden,
            ProcessingType::JoinCells,
            ProcessingType::Copy,
            ProcessingType::CopyStyle,
        ] {
            let err = editor.apply("Sheet1", &Processing::new(kind)).unwrap_err();
            assert!(
                matches!(err, XltransformError::MissingTarget(op) if op == kind.as_str()),
                "{kind}: {err}"
            );
        }
    }
}

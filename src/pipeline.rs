//! Pipeline runner.
//!
//! Applies operation groups to one workbook in order: groups in list order,
//! operations within a group in list order. The first failure halts the run.
//! Operations that already succeeded stay applied unless
//! [`Options::atomic`] is set, in which case the run works on a staged copy
//! and the workbook is only replaced once every operation has succeeded.

use log::{debug, warn};
use serde::Serialize;

use crate::editor::Editor;
use crate::error::Result;
use crate::options::Options;
use crate::types::{OperationGroup, Workbook};

/// Lifecycle of a [`Pipeline`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// Workbook loaded, nothing applied yet.
    Idle,
    /// Iterating the operation list.
    Applying,
}

/// Outcome of a successful run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PipelineReport {
    /// Number of operations applied.
    pub applied: usize,
    /// Sheets created, modified or removed, sorted by name.
    pub dirty_sheets: Vec<String>,
}

pub struct Pipeline<'a> {
    workbook: &'a mut Workbook,
    options: Options,
    state: PipelineState,
}

impl<'a> Pipeline<'a> {
    pub fn new(workbook: &'a mut Workbook, options: Options) -> Self {
        Self {
            workbook,
            options,
            state: PipelineState::Idle,
        }
    }

    #[must_use]
    pub fn state(&self) -> PipelineState {
        self.state
    }

    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Apply every group in order.
    ///
    /// # Errors
    /// Returns the first operation error. Without `atomic`, operations
    /// before the failing one remain applied.
    pub fn run(&mut self, groups: &[OperationGroup]) -> Result<PipelineReport> {
        self.state = PipelineState::Applying;
        if !self.options.atomic {
            return apply_groups(self.workbook, &self.options, groups);
        }

        let mut staged = self.workbook.clone();
        let report = apply_groups(&mut staged, &self.options, groups)?;
        *self.workbook = staged;
        Ok(report)
    }
}

fn apply_groups(
    workbook: &mut Workbook,
    options: &Options,
    groups: &[OperationGroup],
) -> Result<PipelineReport> {
    let mut editor = Editor::new(workbook, options);
    let mut applied = 0;

    for (group_idx, group) in groups.iter().enumerate() {
        for (op_idx, processing) in group.processing.iter().enumerate() {
            debug!(
                "group {group_idx} op {op_idx}: {} on '{}'",
                processing.processing_type, group.sheet_name
            );
            if let Err(err) = editor.apply(&group.sheet_name, processing) {
                warn!(
                    "group {group_idx} op {op_idx} ({}) failed: {err}",
                    processing.processing_type
                );
                return Err(err);
            }
            applied += 1;
        }
    }

    Ok(PipelineReport {
        applied,
        dirty_sheets: editor.into_dirty_sheets().into_iter().collect(),
    })
}

/// Run `groups` against `workbook` with default options.
///
/// # Errors
/// Returns the first operation error; earlier operations stay applied.
pub fn apply_operations(
    workbook: &mut Workbook,
    groups: &[OperationGroup],
) -> Result<PipelineReport> {
    Pipeline::new(workbook, Options::default()).run(groups)
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
    use crate::error::XltransformError;
    use crate::types::{Processing, ProcessingType};

    fn set(cell: &str, value: &str) -> Processing {
        Processing::new(ProcessingType::SetCells)
            .with_cells(parse_range(cell).unwrap())
            .with_values(vec![vec![value.into()]])
    }

    fn workbook() -> Workbook {
        let mut workbook = Workbook::new();
        workbook.create_sheet("Sheet1").unwrap();
        workbook
    }

    #[test]
    fn test_state_transitions() {
        let mut wb = workbook();
        let mut pipeline = Pipeline::new(&mut wb, Options::default());
        assert_eq!(pipeline.state(), PipelineState::Idle);
        pipeline.run(&[]).unwrap();
        assert_eq!(pipeline.state(), PipelineState::Applying);
    }

    #[test]
    fn test_atomic_failure_leaves_workbook() {
        let mut wb = workbook();
        let before = wb.clone();
        let groups = vec![
            OperationGroup::new("Sheet1", vec![set("A1", "x")]),
            OperationGroup::new("Missing", vec![set("A1", "y")]),
        ];
        let options = Options {
            atomic: true,
            ..Options::default()
        };
        let err = Pipeline::new(&mut wb, options).run(&groups).unwrap_err();
        assert!(matches!(err, XltransformError::SheetNotFound(_)));
        assert_eq!(wb, before);
    }

    #[test]
    fn test_report_counts() {
        let mut wb = workbook();
        let groups = vec![OperationGroup::new(
            "Sheet1",
            vec![set("A1", "x"), set("B1", "y")],
        )];
        let report = apply_operations(&mut wb, &groups).unwrap();
        assert_eq!(report.applied, 2);
        assert_eq!(report.dirty_sheets, vec!["Sheet1".to_string()]);
    }
}

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::*;
use crate::error::XltransformError;

/// Operations to apply to one sheet, in order.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OperationGroup {
    pub sheet_name: String,
    #[serde(default)]
    pub processing: Vec<Processing>,
}

impl OperationGroup {
    pub fn new(sheet_name: &str, processing: Vec<Processing>) -> Self {
        Self {
            sheet_name: sheet_name.to_string(),
            processing,
        }
    }
}

/// One operation as it arrives on the wire.
///
/// `processing_type` stays a string here so an unknown type is reported as
/// an unsupported operation when it is reached, not as a malformed request.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Processing {
    pub processing_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<ProcessingTarget>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paste_target: Option<PasteTarget>,
}

impl Processing {
    #[must_use]
    pub fn new(kind: ProcessingType) -> Self {
        Self {
            processing_type: kind.as_str().to_string(),
            target: None,
            paste_target: None,
        }
    }

    /// Resolve `processing_type` to a known operation kind.
    pub fn kind(&self) -> Result<ProcessingType, XltransformError> {
        self.processing_type.parse()
    }

    #[must_use]
    pub fn with_cells(mut self, cells: CellRange) -> Self {
        self.target.get_or_insert_with(ProcessingTarget::default).cells = Some(cells);
        self
    }

    #[must_use]
    pub fn with_values(mut self, values: Vec<Vec<CellValue>>) -> Self {
        self.target.get_or_insert_with(ProcessingTarget::default).values = Some(values);
        self
    }

    #[must_use]
    pub fn with_styles(mut self, styles: StyleSpec) -> Self {
        self.target.get_or_insert_with(ProcessingTarget::default).styles = Some(styles);
        self
    }

    #[must_use]
    pub fn with_paste_target(mut self, sheet_name: &str, cells: CellRange, is_insert: bool) -> Self {
        self.paste_target = Some(PasteTarget {
            sheet_name: sheet_name.to_string(),
            cells,
            is_insert,
        });
        self
    }
}

/// The closed set of operation kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProcessingType {
    Copy,
    CopyStyle,
    CopySheet,
    InsertSheet,
    DeleteSheet,
    Insert,
    Delete,
    Hidden,
    SetCells,
    JoinCells,
}

impl ProcessingType {
    pub const ALL: [ProcessingType; 10] = [
        Self::Copy,
        Self::CopyStyle,
        Self::CopySheet,
        Self::InsertSheet,
        Self::DeleteSheet,
        Self::Insert,
        Self::Delete,
        Self::Hidden,
        Self::SetCells,
        Self::JoinCells,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Copy => "copy",
            Self::CopyStyle => "copy_style",
            Self::CopySheet => "copy_sheet",
            Self::InsertSheet => "insert_sheet",
            Self::DeleteSheet => "delete_sheet",
            Self::Insert => "insert",
            Self::Delete => "delete",
            Self::Hidden => "hidden",
            Self::SetCells => "set_cells",
            Self::JoinCells => "join_cells",
        }
    }
}

impl FromStr for ProcessingType {
    type Err = XltransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| XltransformError::UnsupportedOperation(s.to_string()))
    }
}

impl fmt::Display for ProcessingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What an operation acts on.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct ProcessingTarget {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cells: Option<CellRange>,
    /// Row-major value grid, written from the range's top-left corner.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<Vec<CellValue>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styles: Option<StyleSpec>,
}

/// Destination of a copy.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PasteTarget {
    pub sheet_name: String,
    pub cells: CellRange,
    #[serde(default = "default_is_insert")]
    pub is_insert: bool,
}

fn default_is_insert() -> bool {
    true
}

/// Style facets to apply in spec mode. Absent facets leave the target
/// untouched; present facets replace the target facet wholesale, except
/// `border`, whose sides are applied positionally on the range edges.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct StyleSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<Font>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<Fill>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border: Option<Border>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        alias = "numberFormat"
    )]
    pub number_format: Option<String>,
    /// Height applied to every row the range spans.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_height: Option<f64>,
    /// Width applied to every column the range spans.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_width: Option<f64>,
    /// Per-cell overrides keyed by `A1` reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cells: Option<BTreeMap<String, StyleSpec>>,
}

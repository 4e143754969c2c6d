use serde::{Deserialize, Serialize};

use super::Style;

/// A cell value. On the wire this is a bare JSON scalar: `null` is the
/// empty variant.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Empty,
    Boolean(bool),
    Number(f64),
    String(String),
}

impl CellValue {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

/// A single cell's value and style. Owned by its sheet; moving a cell to
/// another position or sheet always clones it.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Cell {
    #[serde(default, skip_serializing_if = "CellValue::is_empty")]
    pub value: CellValue,
    #[serde(default, skip_serializing_if = "Style::is_empty")]
    pub style: Style,
}

impl Cell {
    #[must_use]
    pub fn with_value(value: CellValue) -> Self {
        Self {
            value,
            style: Style::default(),
        }
    }

    /// A cell with neither value nor style carries no information.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.value.is_empty() && self.style.is_empty()
    }
}

/// Cell with position (serialized form of the sparse grid)
#[derive(Debug, Serialize, Deserialize)]
pub struct CellData {
    pub r: u32, // row (1-indexed)
    pub c: u32, // col (1-indexed)
    #[serde(flatten)]
    pub cell: Cell,
}

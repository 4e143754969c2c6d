use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

use super::*;
use crate::error::{Result, XltransformError};

/// Sheet position key: `(row, col)`, both 1-indexed.
pub type CellPos = (u32, u32);

/// A complete workbook: an ordered list of uniquely named sheets.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

/// Helper function for serde skip_serializing_if
pub(crate) fn is_false(b: &bool) -> bool {
    !b
}

impl Workbook {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sheet names in workbook order.
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    #[must_use]
    pub fn contains_sheet(&self, name: &str) -> bool {
        self.sheets.iter().any(|s| s.name == name)
    }

    /// Look up a sheet by its (case-sensitive) name.
    pub fn sheet(&self, name: &str) -> Result<&Sheet> {
        self.sheets
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| XltransformError::SheetNotFound(name.to_string()))
    }

    pub fn sheet_mut(&mut self, name: &str) -> Result<&mut Sheet> {
        self.sheets
            .iter_mut()
            .find(|s| s.name == name)
            .ok_or_else(|| XltransformError::SheetNotFound(name.to_string()))
    }

    /// Append an empty sheet.
    pub fn create_sheet(&mut self, name: &str) -> Result<&mut Sheet> {
        self.push_sheet(Sheet::new(name))
    }

    /// Remove a sheet, returning it.
    pub fn remove_sheet(&mut self, name: &str) -> Result<Sheet> {
        let idx = self
            .sheets
            .iter()
            .position(|s| s.name == name)
            .ok_or_else(|| XltransformError::SheetNotFound(name.to_string()))?;
        Ok(self.sheets.remove(idx))
    }

    /// Append a deep copy of `name` called `<name><suffix>`.
    ///
    /// Name collisions are not resolved: a taken name is an error.
    pub fn duplicate_sheet(&mut self, name: &str, suffix: &str) -> Result<&mut Sheet> {
        let mut copy = self.sheet(name)?.clone();
        copy.name = format!("{name}{suffix}");
        self.push_sheet(copy)
    }

    fn push_sheet(&mut self, sheet: Sheet) -> Result<&mut Sheet> {
        if self.contains_sheet(&sheet.name) {
            return Err(XltransformError::SheetAlreadyExists(sheet.name));
        }
        let name = sheet.name.clone();
        self.sheets.push(sheet);
        self.sheet_mut(&name)
    }
}

/// Row metadata
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct RowDimension {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub hidden: bool,
}

/// Column metadata
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct ColDimension {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub hidden: bool,
}

/// A merged region, inclusive on both corners (1-indexed).
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MergeRange {
    pub start_row: u32,
    pub start_col: u32,
    pub end_row: u32,
    pub end_col: u32,
}

/// A single worksheet
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Sheet {
    pub name: String,
    /// Sparse grid; serialized as a list of `{r, c, value, style}` records.
    #[serde(
        default,
        serialize_with = "serialize_cells",
        deserialize_with = "deserialize_cells"
    )]
    pub cells: BTreeMap<CellPos, Cell>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub rows: BTreeMap<u32, RowDimension>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub cols: BTreeMap<u32, ColDimension>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub merges: Vec<MergeRange>,
}

static EMPTY_VALUE: CellValue = CellValue::Empty;
static DEFAULT_STYLE: Style = Style::EMPTY;

impl Sheet {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn get(&self, row: u32, col: u32) -> Option<&Cell> {
        self.cells.get(&(row, col))
    }

    /// Value at a position; unset cells read as empty.
    #[must_use]
    pub fn value(&self, row: u32, col: u32) -> &CellValue {
        self.get(row, col).map_or(&EMPTY_VALUE, |cell| &cell.value)
    }

    /// Style at a position; unset cells read as the default style.
    #[must_use]
    pub fn style(&self, row: u32, col: u32) -> &Style {
        self.get(row, col).map_or(&DEFAULT_STYLE, |cell| &cell.style)
    }

    /// Mutable access, materializing the cell on first touch.
    pub fn cell_mut(&mut self, row: u32, col: u32) -> &mut Cell {
        self.cells.entry((row, col)).or_default()
    }

    pub fn set_value(&mut self, row: u32, col: u32, value: impl Into<CellValue>) {
        self.cell_mut(row, col).value = value.into();
    }

    /// Clear the stored value but keep the style. Drops the cell once it
    /// carries nothing.
    pub fn clear_value(&mut self, row: u32, col: u32) {
        if let Some(cell) = self.cells.get_mut(&(row, col)) {
            cell.value = CellValue::Empty;
            if cell.is_blank() {
                self.cells.remove(&(row, col));
            }
        }
    }

    /// Highest populated row, or 0 for an empty sheet.
    #[must_use]
    pub fn max_row(&self) -> u32 {
        self.cells.keys().map(|&(r, _)| r).max().unwrap_or(0)
    }

    /// Highest populated column, or 0 for an empty sheet.
    #[must_use]
    pub fn max_col(&self) -> u32 {
        self.cells.keys().map(|&(_, c)| c).max().unwrap_or(0)
    }

    #[must_use]
    pub fn row_height(&self, row: u32) -> Option<f64> {
        self.rows.get(&row).and_then(|d| d.height)
    }

    pub fn set_row_height(&mut self, row: u32, height: f64) {
        self.rows.entry(row).or_default().height = Some(height);
    }

    #[must_use]
    pub fn is_row_hidden(&self, row: u32) -> bool {
        self.rows.get(&row).is_some_and(|d| d.hidden)
    }

    pub fn hide_row(&mut self, row: u32) {
        self.rows.entry(row).or_default().hidden = true;
    }

    #[must_use]
    pub fn column_width(&self, col: u32) -> Option<f64> {
        self.cols.get(&col).and_then(|d| d.width)
    }

    pub fn set_column_width(&mut self, col: u32, width: f64) {
        self.cols.entry(col).or_default().width = Some(width);
    }

    #[must_use]
    pub fn is_column_hidden(&self, col: u32) -> bool {
        self.cols.get(&col).is_some_and(|d| d.hidden)
    }

    pub fn hide_column(&mut self, col: u32) {
        self.cols.entry(col).or_default().hidden = true;
    }
}

fn serialize_cells<S>(
    cells: &BTreeMap<CellPos, Cell>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_seq(cells.iter().map(|(&(r, c), cell)| CellDataRef { r, c, cell }))
}

fn deserialize_cells<'de, D>(
    deserializer: D,
) -> std::result::Result<BTreeMap<CellPos, Cell>, D::Error>
where
    D: Deserializer<'de>,
{
    let records = Vec::<CellData>::deserialize(deserializer)?;
    Ok(records
        .into_iter()
        .map(|record| ((record.r, record.c), record.cell))
        .collect())
}

/// Borrowed twin of [`CellData`] so serialization does not clone cells.
#[derive(Serialize)]
struct CellDataRef<'a> {
    r: u32,
    c: u32,
    #[serde(flatten)]
    cell: &'a Cell,
}

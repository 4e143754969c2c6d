//! Style application.
//!
//! Three modes:
//! - clone: every facet of a source style replaces the target's, absent
//!   facets included
//! - spec: only facets present in a [`StyleSpec`] replace the target's
//! - border positional: each side of a border spec lands only on the cells
//!   along that edge of the range

use crate::cell_ref::{parse_cell_ref, ResolvedRange};
use crate::error::{Result, XltransformError};
use crate::types::{Border, BorderSide, Sheet, Style, StyleSpec};

/// Replace every facet of `target` with the source's.
pub fn clone_style(source: &Style, target: &mut Style) {
    target.clone_from(source);
}

/// Apply the non-border facets of a spec. Each present facet replaces the
/// target facet wholesale.
pub fn apply_spec(spec: &StyleSpec, target: &mut Style) {
    if let Some(ref font) = spec.font {
        target.font = Some(font.clone());
    }
    if let Some(ref fill) = spec.fill {
        target.fill = Some(fill.clone());
    }
    if let Some(ref alignment) = spec.alignment {
        target.alignment = Some(alignment.clone());
    }
    if let Some(ref number_format) = spec.number_format {
        target.number_format = Some(number_format.clone());
    }
}

/// Which edges of a range a cell lies on.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Edges {
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
}

impl Edges {
    #[must_use]
    pub fn of(range: &ResolvedRange, row: u32, col: u32) -> Self {
        Self {
            top: range.rows.first() == Some(row),
            bottom: range.rows.last() == Some(row),
            left: range.cols.first() == Some(col),
            right: range.cols.last() == Some(col),
        }
    }

    /// A lone cell is on every edge.
    pub const ALL: Edges = Edges {
        top: true,
        bottom: true,
        left: true,
        right: true,
    };
}

/// Replace the target's border with the sides of `border` that match
/// `edges`. A cell no side lands on keeps its border.
pub fn apply_border_edges(border: &Border, edges: Edges, target: &mut Style) {
    if !border_touches(border, edges) {
        return;
    }

    let pick = |on_edge: bool, side: &Option<BorderSide>| {
        if on_edge {
            side.clone()
        } else {
            None
        }
    };
    target.border = Some(Border {
        top: pick(edges.top, &border.top),
        bottom: pick(edges.bottom, &border.bottom),
        left: pick(edges.left, &border.left),
        right: pick(edges.right, &border.right),
    });
}

/// True when at least one side of `border` lands on one of `edges`.
fn border_touches(border: &Border, edges: Edges) -> bool {
    (edges.top && border.top.is_some())
        || (edges.bottom && border.bottom.is_some())
        || (edges.left && border.left.is_some())
        || (edges.right && border.right.is_some())
}

/// Apply a spec to every cell of `range`, plus row heights and column widths
/// for every spanned row and column.
pub fn apply_spec_to_range(
    sheet: &mut Sheet,
    range: &ResolvedRange,
    spec: &StyleSpec,
) -> Result<()> {
    if let Some(height) = spec.row_height {
        check_dimension("row_height", height)?;
    }
    if let Some(width) = spec.column_width {
        check_dimension("column_width", width)?;
    }
    let overrides = match spec.cells {
        Some(ref cells) => cells
            .iter()
            .map(|(cell_ref, cell_spec)| Ok((parse_cell_ref(cell_ref)?, cell_spec)))
            .collect::<Result<Vec<_>>>()?,
        None => Vec::new(),
    };

    let has_facets = spec.font.is_some()
        || spec.fill.is_some()
        || spec.alignment.is_some()
        || spec.number_format.is_some();
    for (row, col) in range.positions() {
        let edges = Edges::of(range, row, col);
        let border = spec
            .border
            .as_ref()
            .filter(|border| border_touches(border, edges));
        // Interior cells untouched by any facet are not materialized.
        if !has_facets && border.is_none() {
            continue;
        }
        let style = &mut sheet.cell_mut(row, col).style;
        apply_spec(spec, style);
        if let Some(border) = border {
            apply_border_edges(border, edges, style);
        }
    }

    for ((row, col), cell_spec) in overrides {
        if !range.contains(row, col) {
            continue;
        }
        let style = &mut sheet.cell_mut(row, col).style;
        apply_spec(cell_spec, style);
        if let Some(ref border) = cell_spec.border {
            apply_border_edges(border, Edges::ALL, style);
        }
    }

    if let Some(height) = spec.row_height {
        for row in range.rows.iter() {
            sheet.set_row_height(row, height);
        }
    }
    if let Some(width) = spec.column_width {
        for col in range.cols.iter() {
            sheet.set_column_width(col, width);
        }
    }

    Ok(())
}

fn check_dimension(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(XltransformError::InvalidAddress(format!(
            "{name} must be a non-negative number, got {value}"
        )))
    }
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
    use crate::cell_ref::{parse_range, resolve};
    use crate::types::{BorderStyle, Fill, Font, PatternType};

    fn bold_font() -> Font {
        Font {
            bold: true,
            ..Font::default()
        }
    }

    #[test]
    fn test_clone_clears_absent_facets() {
        let source = Style {
            font: Some(bold_font()),
            ..Style::default()
        };
        let mut target = Style {
            fill: Some(Fill {
                pattern_type: Some(PatternType::Solid),
                fg_color: Some("FF0000".into()),
                bg_color: None,
            }),
            number_format: Some("0.00".into()),
            ..Style::default()
        };
        clone_style(&source, &mut target);
        assert_eq!(target, source);
        assert!(target.fill.is_none());
    }

    #[test]
    fn test_spec_replaces_whole_facet() {
        let mut target = Style {
            font: Some(Font {
                name: Some("Arial".into()),
                size: Some(11.0),
                ..Font::default()
            }),
            number_format: Some("0%".into()),
            ..Style::default()
        };
        let spec = StyleSpec {
            font: Some(bold_font()),
            ..StyleSpec::default()
        };
        apply_spec(&spec, &mut target);
        let font = target.font.unwrap();
        assert!(font.bold);
        assert_eq!(font.name, None);
        assert_eq!(target.number_format.as_deref(), Some("0%"));
    }

    #[test]
    fn test_border_edges_interior_untouched() {
        let range = resolve(&parse_range("B2:D4").unwrap()).unwrap();
        assert_eq!(Edges::of(&range, 3, 3), Edges::default());
        let corner = Edges::of(&range, 2, 2);
        assert!(corner.top && corner.left && !corner.bottom && !corner.right);
    }

    #[test]
    fn test_border_replaces_other_sides() {
        let mut target = Style {
            border: Some(Border {
                left: Some(BorderSide::new(BorderStyle::Thin)),
                ..Border::default()
            }),
            ..Style::default()
        };
        let spec = Border {
            top: Some(BorderSide::new(BorderStyle::Thick)),
            left: Some(BorderSide::new(BorderStyle::Double)),
            ..Border::default()
        };
        let edges = Edges {
            top: true,
            ..Edges::default()
        };
        apply_border_edges(&spec, edges, &mut target);
        let border = target.border.unwrap();
        assert_eq!(border.top.unwrap().style, BorderStyle::Thick);
        assert_eq!(border.left, None);
    }

    #[test]
    fn test_border_not_on_edge_creates_nothing() {
        let mut target = Style::default();
        let spec = Border {
            top: Some(BorderSide::new(BorderStyle::Thick)),
            ..Border::default()
        };
        apply_border_edges(&spec, Edges::default(), &mut target);
        assert!(target.border.is_none());
    }

    #[test]
    fn test_dimensions_cover_spanned_rows_and_cols() {
        let mut sheet = Sheet::new("Sheet1");
        let range = resolve(&parse_range("B2:C3").unwrap()).unwrap();
        let spec = StyleSpec {
            row_height: Some(30.0),
            column_width: Some(12.5),
            ..StyleSpec::default()
        };
        apply_spec_to_range(&mut sheet, &range, &spec).unwrap();
        assert_eq!(sheet.row_height(2), Some(30.0));
        assert_eq!(sheet.row_height(3), Some(30.0));
        assert_eq!(sheet.row_height(4), None);
        assert_eq!(sheet.column_width(3), Some(12.5));
        assert_eq!(sheet.column_width(1), None);
    }

    #[test]
    fn test_negative_row_height_rejected() {
        let mut sheet = Sheet::new("Sheet1");
        let range = resolve(&parse_range("1:1").unwrap()).unwrap();
        let spec = StyleSpec {
            row_height: Some(-1.0),
            ..StyleSpec::default()
        };
        assert!(apply_spec_to_range(&mut sheet, &range, &spec).is_err());
    }
}

use serde::{Deserialize, Serialize};

use super::is_false;

/// Cell style: five independent facets. A value object: copying a style
/// into another cell duplicates it.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct Style {
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
}

impl Style {
    /// The default style: every facet absent.
    pub const EMPTY: Style = Style {
        font: None,
        fill: None,
        border: None,
        alignment: None,
        number_format: None,
    };

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.font.is_none()
            && self.fill.is_none()
            && self.border.is_none()
            && self.alignment.is_none()
            && self.number_format.is_none()
    }
}

#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct Font {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "sz")]
    pub size: Option<f64>,
    #[serde(default, skip_serializing_if = "is_false", alias = "b")]
    pub bold: bool,
    #[serde(default, skip_serializing_if = "is_false", alias = "i")]
    pub italic: bool,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "u")]
    pub underline: Option<UnderlineStyle>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub strike: bool,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "vertAlign")]
    pub vert_align: Option<VertAlign>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct Fill {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        alias = "patternType",
        alias = "fill_type"
    )]
    pub pattern_type: Option<PatternType>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        alias = "fgColor",
        alias = "start_color"
    )]
    pub fg_color: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        alias = "bgColor",
        alias = "end_color"
    )]
    pub bg_color: Option<String>,
}

/// Per-side border. Also used as the `border` part of a style spec, where
/// each side is applied positionally.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct Border {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<BorderSide>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom: Option<BorderSide>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<BorderSide>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<BorderSide>,
}

impl Border {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.top.is_none() && self.bottom.is_none() && self.left.is_none() && self.right.is_none()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BorderSide {
    #[serde(default)]
    pub style: BorderStyle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl BorderSide {
    #[must_use]
    pub fn new(style: BorderStyle) -> Self {
        Self { style, color: None }
    }
}

#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct Alignment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horizontal: Option<HAlign>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertical: Option<VAlign>,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "textRotation")]
    pub text_rotation: Option<i32>,
    #[serde(
        default,
        skip_serializing_if = "is_false",
        alias = "wrapText",
        alias = "wrap"
    )]
    pub wrap_text: bool,
    #[serde(default, skip_serializing_if = "is_false", alias = "shrinkToFit")]
    pub shrink_to_fit: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indent: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum BorderStyle {
    #[default]
    None,
    Thin,
    Medium,
    Thick,
    Dashed,
    Dotted,
    Double,
    Hair,
    MediumDashed,
    DashDot,
    MediumDashDot,
    DashDotDot,
    MediumDashDotDot,
    SlantDashDot,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum HAlign {
    General,
    Left,
    Center,
    Right,
    Fill,
    Justify,
    CenterContinuous,
    Distributed,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum VAlign {
    Top,
    Center, // Note: Excel uses "center" not "middle"
    Bottom,
    Justify,
    Distributed,
}

/// Underline style for font formatting
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum UnderlineStyle {
    Single,
    Double,
    SingleAccounting,
    DoubleAccounting,
    None,
}

/// Vertical alignment for text (subscript/superscript)
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum VertAlign {
    Baseline,
    Subscript,
    Superscript,
}

/// Pattern fill types from ECMA-376 Part 1, Section 18.18.55
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum PatternType {
    None,
    Solid,
    Gray125,
    Gray0625,
    DarkGray,
    MediumGray,
    LightGray,
    DarkHorizontal,
    DarkVertical,
    DarkDown,
    DarkUp,
    DarkGrid,
    DarkTrellis,
    LightHorizontal,
    LightVertical,
    LightDown,
    LightUp,
    LightGrid,
    LightTrellis,
}

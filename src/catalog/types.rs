//! Catalog records: sizes, materials, poster styles and map styles

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;

use super::dimensions::{Dimensions, SizeUnit};

/// A printable poster size
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PosterSize {
    pub id: String,
    #[serde(rename = "type")]
    pub unit: SizeUnit,
    pub label: String,
    /// Physical width in `unit`
    pub width: f64,
    /// Physical height in `unit`
    pub height: f64,
    /// Stroke width of the poster's middle line, when the size overrides it
    #[serde(default)]
    pub middle_line_stroke_width: Option<f64>,
}

impl PosterSize {
    /// Portrait physical dimensions in the size's own unit
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.height, self.unit)
    }
}

/// A family of sizes sharing a unit system ("Europe", "US")
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PosterSizeType {
    pub id: SizeUnit,
    pub label: String,
    pub description: String,
}

/// How a material restricts map styles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialClass {
    #[default]
    Paper,
    /// Styles use their plywood-specific map style subset
    Plywood,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PosterMaterial {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub class: MaterialClass,
    pub allowed_poster_styles: Vec<String>,
    pub allowed_poster_sizes: Vec<String>,
}

impl PosterMaterial {
    pub fn allows_style(&self, style_id: &str) -> bool {
        self.allowed_poster_styles.iter().any(|s| s == style_id)
    }

    pub fn allows_size(&self, size_id: &str) -> bool {
        self.allowed_poster_sizes.iter().any(|s| s == size_id)
    }
}

/// Text labels a poster style can render. The name doubles as the element id
/// of the label in the poster SVG.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum LabelName {
    #[serde(rename = "header")]
    Header,
    #[serde(rename = "smallHeader")]
    SmallHeader,
    #[serde(rename = "text")]
    Text,
}

impl LabelName {
    pub fn as_str(&self) -> &'static str {
        match self {
            LabelName::Header => "header",
            LabelName::SmallHeader => "smallHeader",
            LabelName::Text => "text",
        }
    }
}

impl fmt::Display for LabelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attribute override of a label rule
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawAttributeValue")]
pub enum AttributeValue {
    /// Set as is
    Literal(String),
    /// Multiplier of the element's original, pre-scaling value
    Factor(f64),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAttributeValue {
    Factor { factor: f64 },
    Number(f64),
    Text(String),
}

impl From<RawAttributeValue> for AttributeValue {
    fn from(raw: RawAttributeValue) -> Self {
        match raw {
            RawAttributeValue::Factor { factor } => AttributeValue::Factor(factor),
            RawAttributeValue::Number(n) => AttributeValue::Literal(n.to_string()),
            RawAttributeValue::Text(s) => AttributeValue::Literal(s),
        }
    }
}

/// Typography override applied when a label is at least `min_length` long
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LabelRule {
    pub label: LabelName,
    pub min_length: usize,
    pub svg_attributes: BTreeMap<String, AttributeValue>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PosterStyle {
    pub id: String,
    pub name: String,
    pub labels: Vec<LabelName>,
    #[serde(default)]
    pub upper_case_labels: bool,
    /// Whether accent lines flank the small header
    #[serde(default)]
    pub add_lines: bool,
    /// Ordered by descending `min_length`, ending in a catch-all
    #[serde(default)]
    pub label_rules: Vec<LabelRule>,
    #[serde(default)]
    pub allowed_map_styles: Option<Vec<String>>,
    #[serde(default)]
    pub allowed_plywood_map_styles: Option<Vec<String>>,
}

impl PosterStyle {
    /// Whether a map style may be combined with this style. Styles without a
    /// restriction allow every map style.
    pub fn allows_map_style(&self, map_style_id: &str) -> bool {
        self.allowed_map_styles
            .as_ref()
            .is_none_or(|ids| ids.iter().any(|id| id == map_style_id))
    }

    /// Text as it is printed with this style
    pub fn format_label(&self, text: &str) -> String {
        if self.upper_case_labels {
            text.to_uppercase()
        } else {
            text.to_string()
        }
    }
}

/// Color theme of the map
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MapStyle {
    pub id: String,
    pub color: String,
    pub label_color: String,
    #[serde(rename = "type")]
    pub render_type: String,
    pub name: String,
}

impl MapStyle {
    /// Map color as upper-case hex digits without the leading '#'
    pub fn color_hex(&self) -> String {
        self.color.trim_start_matches('#').to_uppercase()
    }
}

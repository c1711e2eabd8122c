//! Accent lines flanking a text label
//!
//! Two horizontal strokes are kept on either side of a label, vertically
//! centered on the cap height of its font. Existing line elements are reused
//! by id so repeated calls update the same paths. A label that is empty or a
//! single space gets no lines at all.

pub mod config;

use tracing::debug;

use crate::error::{PosterError, Result};
use crate::svg::{element_position, parse_number, BoundingBox, Point, SvgDocument};

pub use config::{LineConfig, LineUnits};

/// Measured placement of a label
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextInfo {
    pub font_size: f64,
    /// Absolute position of the label's tspan
    pub position: Point,
    pub bbox: BoundingBox,
}

/// What [`add_or_update_lines`] did to the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome<N> {
    Placed { left: N, right: N },
    Removed,
}

/// The `d` attributes of the left and right line
pub fn line_paths(info: &TextInfo, config: &LineConfig, scale: f64) -> (String, String) {
    let padding = config.padding_between_line_and_text * scale;
    let length = config.line_length * scale;
    let y = info.position.y - info.font_size / 2.0
        + (1.0 - config.font_cap_height_ratio) * info.font_size;

    let half_width = info.bbox.width / 2.0;
    let left_x = info.position.x - half_width - padding;
    let right_x = info.position.x + half_width + padding;

    (
        format!("M{},{} L{},{}", left_x, y, left_x - length, y),
        format!("M{},{} L{},{}", right_x, y, right_x + length, y),
    )
}

/// Create or update the lines around `text`, or remove them when the label
/// is blank.
///
/// `measure` reports the rendered size of the text element. The label must
/// be rendered through exactly one `<tspan>`, whose position anchors the
/// lines.
pub fn add_or_update_lines<D, M>(
    doc: &mut D,
    text: D::Node,
    measure: M,
    config: &LineConfig,
) -> Result<LineOutcome<D::Node>>
where
    D: SvgDocument,
    M: Fn(&D, D::Node) -> BoundingBox,
{
    let content = doc.text_content(text);
    if content.is_empty() || content == " " {
        remove_lines(doc, config);
        return Ok(LineOutcome::Removed);
    }

    let tspan = single_tspan(&*doc, text)?;
    let font_size = doc
        .attribute(text, "font-size")
        .and_then(parse_number)
        .ok_or_else(|| PosterError::invalid_attribute(doc.describe(text), "font-size"))?;
    let scale = match config.units {
        LineUnits::Absolute => 1.0,
        LineUnits::CanvasRelative => canvas_min_side(&*doc)?,
    };

    let info = TextInfo {
        font_size,
        position: element_position(&*doc, tspan),
        bbox: measure(&*doc, text),
    };
    let (left_d, right_d) = line_paths(&info, config, scale);

    let left = find_or_create_line(doc, &config.left_line_id);
    let right = find_or_create_line(doc, &config.right_line_id);
    doc.set_attribute(left, "d", &left_d);
    doc.set_attribute(right, "d", &right_d);
    for (name, value) in &config.svg_attributes {
        doc.set_attribute(left, name, value);
        doc.set_attribute(right, name, value);
    }
    debug!(label = %doc.describe(text), left = %left_d, right = %right_d, "placed accent lines");

    if config.debug_lines {
        add_debug_rect(doc, &info);
    }

    Ok(LineOutcome::Placed { left, right })
}

/// Remove both configured line elements if present
pub fn remove_lines<D: SvgDocument>(doc: &mut D, config: &LineConfig) {
    for id in [&config.left_line_id, &config.right_line_id] {
        if let Some(line) = doc.element_by_id(id) {
            debug!(id = %id, "removing accent line");
            doc.remove(line);
        }
    }
}

fn single_tspan<D: SvgDocument>(doc: &D, text: D::Node) -> Result<D::Node> {
    match doc.elements_by_tag(text, "tspan").as_slice() {
        [tspan] => Ok(*tspan),
        other => Err(PosterError::TspanCount {
            element: doc.describe(text),
            found: other.len(),
        }),
    }
}

/// Shorter side of the canvas, from the integer part of the root size
fn canvas_min_side<D: SvgDocument>(doc: &D) -> Result<f64> {
    let root = doc.root();
    let side = |name: &str| {
        doc.attribute(root, name)
            .and_then(parse_number)
            .map(f64::trunc)
            .ok_or_else(|| PosterError::invalid_attribute(doc.describe(root), name))
    };
    Ok(side("width")?.min(side("height")?))
}

fn find_or_create_line<D: SvgDocument>(doc: &mut D, id: &str) -> D::Node {
    if let Some(existing) = doc.element_by_id(id) {
        return existing;
    }
    let root = doc.root();
    let line = doc.create_element("path");
    doc.append_child(root, line);
    doc.set_attribute(line, "id", id);
    debug!(id, "created accent line");
    line
}

fn add_debug_rect<D: SvgDocument>(doc: &mut D, info: &TextInfo) {
    let root = doc.root();
    let rect = doc.create_element("rect");
    let attributes = [
        ("x", (info.position.x - info.bbox.width / 2.0).to_string()),
        ("y", (info.position.y - info.bbox.height).to_string()),
        ("width", info.bbox.width.to_string()),
        ("height", info.bbox.height.to_string()),
        ("stroke", "red".to_string()),
        ("stroke-width", "2".to_string()),
        ("fill", "none".to_string()),
    ];
    for (name, value) in &attributes {
        doc.set_attribute(rect, name, value);
    }
    doc.append_child(root, rect);
}

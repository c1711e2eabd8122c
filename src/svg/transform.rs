//! Translate extraction and absolute position resolution.
//!
//! Poster templates position their labels through nested groups, each of
//! which may carry `x`/`y` attributes and a CSS-style `transform`. Only the
//! translation part of a transform matters for label placement.
//!
//! ## Transform Strings
//!
//! [`parse_translate`] understands three call forms, case-insensitively and
//! anywhere in the string:
//! - `translate(x, y)` or `translate(x y)`: both components at once. The
//!   arguments are split on commas when a comma is present, on whitespace
//!   otherwise.
//! - `translateX(x)` and `translateY(y)`: a single component. These always
//!   win over the same component of `translate(...)`, regardless of order.
//!
//! Numbers are read like JavaScript's `parseFloat`: leading whitespace is
//! skipped and the longest numeric prefix is used (`"12px"` is 12). A
//! component without a finite numeric prefix is left out of the result rather
//! than defaulted to zero.
//!
//! ## Position Accumulation
//!
//! [`element_position`] walks from a node up its parent chain, stopping
//! before the `<svg>` canvas, and sums `x + translateX` and `y + translateY`
//! of every element on the way. Missing attributes and components count as 0.
//!
//! ```text
//!  svg
//!   - g      (transform="translate(100, 50)")
//!     - text (x="10")
//!       - tspan (x="5" y="7")
//!
//!  position(tspan) = (5 + 10 + 100, 7 + 0 + 50) = (115, 57)
//! ```

use std::sync::OnceLock;

use regex::Regex;

use super::document::SvgDocument;
use super::geometry::Point;

/// Translation components found in a transform string
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Translate {
    pub translate_x: Option<f64>,
    pub translate_y: Option<f64>,
}

impl Translate {
    /// The translation as a point, absent components counting as 0
    pub fn offset(&self) -> Point {
        Point::new(
            self.translate_x.unwrap_or(0.0),
            self.translate_y.unwrap_or(0.0),
        )
    }
}

fn re_number_prefix() -> &'static Regex {
    static ONCE: OnceLock<Regex> = OnceLock::new();
    ONCE.get_or_init(|| {
        Regex::new(r"^\s*[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").expect("valid regex")
    })
}

fn re_translate() -> &'static Regex {
    static ONCE: OnceLock<Regex> = OnceLock::new();
    ONCE.get_or_init(|| Regex::new(r"(?i)translate\(([^)]*)\)").expect("valid regex"))
}

fn re_translate_x() -> &'static Regex {
    static ONCE: OnceLock<Regex> = OnceLock::new();
    ONCE.get_or_init(|| Regex::new(r"(?i)translateX\(([^)]*)\)").expect("valid regex"))
}

fn re_translate_y() -> &'static Regex {
    static ONCE: OnceLock<Regex> = OnceLock::new();
    ONCE.get_or_init(|| Regex::new(r"(?i)translateY\(([^)]*)\)").expect("valid regex"))
}

/// Read the leading number of `s`, if it has one and it is finite
pub fn parse_number(s: &str) -> Option<f64> {
    let m = re_number_prefix().find(s)?;
    m.as_str()
        .trim_start()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Extract the translation of a CSS-style transform string
pub fn parse_translate(transform: &str) -> Translate {
    let mut result = Translate::default();

    if let Some(caps) = re_translate().captures(transform) {
        let args = &caps[1];
        let mut parts: Vec<&str> = if args.contains(',') {
            args.split(',').collect()
        } else {
            args.split_whitespace().collect()
        };
        parts.resize(2, "");
        result.translate_x = parse_number(parts[0]);
        result.translate_y = parse_number(parts[1]);
    }

    if let Some(caps) = re_translate_x().captures(transform) {
        result.translate_x = parse_number(&caps[1]);
    }

    if let Some(caps) = re_translate_y().captures(transform) {
        result.translate_y = parse_number(&caps[1]);
    }

    result
}

/// Absolute position of `node`, accumulated over its ancestors below the
/// `<svg>` canvas
pub fn element_position<D: SvgDocument>(doc: &D, node: D::Node) -> Point {
    let mut position = Point::new(0.0, 0.0);
    let mut current = Some(node);

    while let Some(n) = current {
        if doc.tag_name(n) == "svg" {
            break;
        }

        let x = doc.attribute(n, "x").and_then(parse_number).unwrap_or(0.0);
        let y = doc.attribute(n, "y").and_then(parse_number).unwrap_or(0.0);
        let offset = doc
            .attribute(n, "transform")
            .map(parse_translate)
            .unwrap_or_default()
            .offset();

        position.x += x + offset.x;
        position.y += y + offset.y;
        current = doc.parent(n);
    }

    position
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::svg::SvgTree;

    const EPSILON: f64 = 0.001;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_translate_after_scale() {
        let t = parse_translate("scale(1.2) translate(10.21, 100)");
        assert_eq!(
            t,
            Translate {
                translate_x: Some(10.21),
                translate_y: Some(100.0),
            }
        );
    }

    #[test]
    fn test_translate_x_overrides_combined() {
        let t = parse_translate("scale(1.2) translateX(-100) translate(10.21, 100)");
        assert_eq!(t.translate_x, Some(-100.0));
        assert_eq!(t.translate_y, Some(100.0));
    }

    #[test]
    fn test_both_single_axis_calls_override() {
        let t = parse_translate("scale(1.2) translateX(-100) translateY(89) translate(10.21, 100)");
        assert_eq!(t.translate_x, Some(-100.0));
        assert_eq!(t.translate_y, Some(89.0));
    }

    #[test]
    fn test_invalid_component_is_absent() {
        let t = parse_translate("scale(1.2) translateX(invalid) translateY(89)");
        assert_eq!(
            t,
            Translate {
                translate_x: None,
                translate_y: Some(89.0),
            }
        );
    }

    #[test]
    fn test_space_separated_translate() {
        let t = parse_translate("translate(12 -4.5)");
        assert_eq!(t.translate_x, Some(12.0));
        assert_eq!(t.translate_y, Some(-4.5));
    }

    #[test]
    fn test_case_insensitive() {
        let t = parse_translate("TRANSLATE(1,2) TRANSLATEY(3)");
        assert_eq!(t.translate_x, Some(1.0));
        assert_eq!(t.translate_y, Some(3.0));
    }

    #[test]
    fn test_single_argument_translate() {
        let t = parse_translate("translate(7)");
        assert_eq!(t.translate_x, Some(7.0));
        assert_eq!(t.translate_y, None);
    }

    #[test]
    fn test_no_translate() {
        assert_eq!(parse_translate("rotate(45)"), Translate::default());
        assert_eq!(parse_translate(""), Translate::default());
    }

    #[test]
    fn test_parse_number_prefix() {
        assert_eq!(parse_number("12px"), Some(12.0));
        assert_eq!(parse_number("  -3.5e2 "), Some(-350.0));
        assert_eq!(parse_number(".5"), Some(0.5));
        assert_eq!(parse_number("1e"), Some(1.0));
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("1e999"), None);
    }

    #[test]
    fn test_element_position_sums_ancestors() {
        let tree = SvgTree::parse(
            r#"<svg width="100" height="100" x="1000"><g transform="translate(100, 50)"><text x="10"><tspan x="5" y="7">A</tspan></text></g></svg>"#,
        )
        .unwrap();
        let tspan = tree.elements_by_tag(tree.root(), "tspan")[0];
        let pos = element_position(&tree, tspan);
        assert!(approx_eq(pos.x, 115.0), "x: expected 115, got {}", pos.x);
        assert!(approx_eq(pos.y, 57.0), "y: expected 57, got {}", pos.y);
    }

    #[test]
    fn test_element_position_ignores_unparsable_parts() {
        let tree = SvgTree::parse(
            r#"<svg><g x="oops" transform="translateX(bad) translateY(-20)"><g transform="scale(2)" y="3"><tspan x="1">A</tspan></g></g></svg>"#,
        )
        .unwrap();
        let tspan = tree.elements_by_tag(tree.root(), "tspan")[0];
        let pos = element_position(&tree, tspan);
        assert!(approx_eq(pos.x, 1.0), "x: expected 1, got {}", pos.x);
        assert!(approx_eq(pos.y, -17.0), "y: expected -17, got {}", pos.y);
    }
}

//! Poster Common - catalog resolution and SVG decoration for map posters
//!
//! This library resolves poster configurations (size, material, style, map
//! style, orientation) against a static catalog, encodes them as product ids,
//! and prepares poster SVG documents for printing: label text, length-tiered
//! label typography and accent lines around the small header.
//!
//! # Example
//!
//! ```rust
//! use poster_common::{Catalog, Orientation};
//!
//! let catalog = Catalog::builtin();
//! let dims = catalog
//!     .physical_dimensions_in_cm("30x40cm", Orientation::Landscape)
//!     .unwrap();
//! assert_eq!((dims.width, dims.height), (40.0, 30.0));
//! ```

pub mod catalog;
pub mod error;
pub mod labels;
pub mod lines;
pub mod product_id;
pub mod svg;

pub use catalog::{
    resolve_orientation, Catalog, CatalogError, Dimensions, LabelName, MapStyle, Orientation,
    PosterMaterial, PosterSize, PosterStyle, SizeUnit,
};
pub use error::{PosterError, Result};
pub use labels::{apply_label_rules, change_dynamic_attributes, LabelTexts, OriginalAttributes};
pub use lines::{add_or_update_lines, LineConfig, LineOutcome, LineUnits};
pub use product_id::{create_product_id, ProductConfig};
pub use svg::{BoundingBox, SvgDocument, SvgTree};

use tracing::{debug, warn};

/// Configuration for the complete decoration pipeline
#[derive(Debug, Clone, Default)]
pub struct DecorateConfig {
    /// Accent line configuration, used for styles with `add_lines`
    pub lines: LineConfig,
}

impl DecorateConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the accent line configuration
    pub fn with_lines(mut self, lines: LineConfig) -> Self {
        self.lines = lines;
        self
    }

    /// Enable or disable the debug bounding box around the small header
    pub fn with_debug_lines(mut self, debug: bool) -> Self {
        self.lines = self.lines.with_debug_lines(debug);
        self
    }
}

/// What [`decorate`] changed in the document
#[derive(Debug, Clone, PartialEq)]
pub struct Decoration<N> {
    /// Minimum length of the label rule that was applied
    pub rule_min_length: Option<usize>,
    /// Accent line result, `None` when the style has no lines
    pub lines: Option<LineOutcome<N>>,
}

/// Decorate a poster document for `style_id`
///
/// For every label of the style that exists in the document, the text is
/// written (upper-cased if the style says so) into its `<tspan>`. The
/// matching label rule is applied next, then the accent lines are placed
/// around the small header if the style has them.
///
/// `originals` must be kept by the caller across calls on the same document
/// so that repeated decoration never compounds factor rules.
///
/// # Example
///
/// ```rust
/// use poster_common::svg::NodeId;
/// use poster_common::{decorate, BoundingBox, Catalog, DecorateConfig, LabelTexts,
///     OriginalAttributes, SvgTree};
///
/// let mut doc = SvgTree::parse(
///     r#"<svg width="3543" height="4961"><text id="header" font-size="240"><tspan/></text></svg>"#,
/// ).unwrap();
/// let mut originals = OriginalAttributes::new();
/// let labels = LabelTexts::new("Helsinki", "", "");
/// let measure = |_: &SvgTree, _: NodeId| BoundingBox::new(100.0, 20.0);
///
/// decorate(&mut doc, &mut originals, Catalog::builtin(), "sharp", &labels, measure,
///     &DecorateConfig::new()).unwrap();
/// assert!(doc.to_svg_string().contains("HELSINKI"));
/// ```
pub fn decorate<D, M>(
    doc: &mut D,
    originals: &mut OriginalAttributes<D::Node>,
    catalog: &Catalog,
    style_id: &str,
    labels: &LabelTexts,
    measure: M,
    config: &DecorateConfig,
) -> Result<Decoration<D::Node>>
where
    D: SvgDocument,
    M: Fn(&D, D::Node) -> BoundingBox,
{
    let style = catalog.poster_style(style_id, None)?;

    for &label in &style.labels {
        let Some(element) = doc.element_by_id(label.as_str()) else {
            debug!(label = %label, "label not present in document");
            continue;
        };
        let text = style.format_label(labels.get(label));
        // Labels render through their first tspan when they have one
        let target = doc
            .elements_by_tag(element, "tspan")
            .first()
            .copied()
            .unwrap_or(element);
        doc.set_text_content(target, &text);
    }

    let rule_min_length = apply_label_rules(doc, originals, &style, labels).map(|r| r.min_length);

    let lines = if style.add_lines {
        match doc.element_by_id(LabelName::SmallHeader.as_str()) {
            Some(small_header) => Some(add_or_update_lines(
                doc,
                small_header,
                measure,
                &config.lines,
            )?),
            None => {
                warn!(style = %style.id, "style has accent lines but the document has no small header");
                None
            }
        }
    } else {
        None
    };

    Ok(Decoration {
        rule_min_length,
        lines,
    })
}

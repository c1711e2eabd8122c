//! Static poster catalogs and lookups over them
//!
//! The bundled catalog is TOML embedded in the binary and parsed once on
//! first use. Lookups of sizes, size types, styles and materials fail with
//! [`PosterError`] on unknown ids. Map style lookups never fail: unknown ids
//! resolve to the catalog's default theme carrying the requested id.

mod dimensions;
mod types;

use std::borrow::Cow;
use std::path::Path;
use std::sync::OnceLock;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::error::{PosterError, Result};

pub use dimensions::{resolve_orientation, Dimensions, Orientation, SizeUnit, CM_PER_INCH};
pub use types::{
    AttributeValue, LabelName, LabelRule, MapStyle, MaterialClass, PosterMaterial, PosterSize,
    PosterSizeType, PosterStyle,
};

/// Stroke width of the middle line for sizes that do not declare one
pub const DEFAULT_MIDDLE_LINE_STROKE_WIDTH: f64 = 6.0;

const BUILTIN_CATALOG: &str = include_str!("builtin.toml");

/// Errors that can occur when loading or validating a catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse catalog TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("default map style '{id}' is not declared")]
    MissingDefaultMapStyle { id: String },
    #[error("label rules of style '{style}' must have descending min_length and end with min_length 0")]
    InvalidLabelRules { style: String },
    #[error("{owner} references unknown {kind} '{id}'")]
    UnknownReference {
        owner: String,
        kind: &'static str,
        id: String,
    },
}

/// TOML structure for deserializing catalogs
#[derive(Deserialize)]
struct TomlCatalog {
    default_map_style: String,
    size_types: Vec<PosterSizeType>,
    sizes: Vec<PosterSize>,
    materials: Vec<PosterMaterial>,
    styles: Vec<PosterStyle>,
    map_styles: Vec<MapStyle>,
}

/// Immutable poster catalog
#[derive(Debug, Clone)]
pub struct Catalog {
    default_map_style: String,
    /// Index of the default theme in `map_styles`
    default_theme: usize,
    size_types: Vec<PosterSizeType>,
    sizes: Vec<PosterSize>,
    materials: Vec<PosterMaterial>,
    styles: Vec<PosterStyle>,
    map_styles: Vec<MapStyle>,
}

impl Catalog {
    /// The catalog bundled with the library
    pub fn builtin() -> &'static Catalog {
        static BUILTIN: OnceLock<Catalog> = OnceLock::new();
        BUILTIN.get_or_init(|| {
            Catalog::from_str(BUILTIN_CATALOG).expect("Bundled catalog should be valid")
        })
    }

    /// Load a catalog from a TOML file
    pub fn from_file(path: &Path) -> std::result::Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a catalog from a TOML string
    pub fn from_str(content: &str) -> std::result::Result<Self, CatalogError> {
        let parsed: TomlCatalog = toml::from_str(content)?;
        let default_theme = parsed
            .map_styles
            .iter()
            .position(|m| m.id == parsed.default_map_style)
            .ok_or_else(|| CatalogError::MissingDefaultMapStyle {
                id: parsed.default_map_style.clone(),
            })?;
        let catalog = Catalog {
            default_map_style: parsed.default_map_style,
            default_theme,
            size_types: parsed.size_types,
            sizes: parsed.sizes,
            materials: parsed.materials,
            styles: parsed.styles,
            map_styles: parsed.map_styles,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> std::result::Result<(), CatalogError> {
        for size in &self.sizes {
            if !self.size_types.iter().any(|t| t.id == size.unit) {
                return Err(CatalogError::UnknownReference {
                    owner: format!("size '{}'", size.id),
                    kind: "size type",
                    id: size.unit.to_string(),
                });
            }
        }

        for style in &self.styles {
            let descending = style
                .label_rules
                .windows(2)
                .all(|pair| pair[0].min_length >= pair[1].min_length);
            let has_catch_all = style
                .label_rules
                .last()
                .is_none_or(|rule| rule.min_length == 0);
            if !descending || !has_catch_all {
                return Err(CatalogError::InvalidLabelRules {
                    style: style.id.clone(),
                });
            }
        }

        for material in &self.materials {
            let owner = || format!("material '{}'", material.id);
            if let Some(id) = material
                .allowed_poster_styles
                .iter()
                .find(|id| !self.styles.iter().any(|s| &s.id == *id))
            {
                return Err(CatalogError::UnknownReference {
                    owner: owner(),
                    kind: "poster style",
                    id: id.clone(),
                });
            }
            if let Some(id) = material
                .allowed_poster_sizes
                .iter()
                .find(|id| !self.sizes.iter().any(|s| &s.id == *id))
            {
                return Err(CatalogError::UnknownReference {
                    owner: owner(),
                    kind: "poster size",
                    id: id.clone(),
                });
            }
        }

        Ok(())
    }

    pub fn sizes(&self) -> &[PosterSize] {
        &self.sizes
    }

    pub fn size_types(&self) -> &[PosterSizeType] {
        &self.size_types
    }

    pub fn orientations(&self) -> &'static [Orientation] {
        &Orientation::ALL
    }

    pub fn materials(&self) -> &[PosterMaterial] {
        &self.materials
    }

    pub fn styles(&self) -> &[PosterStyle] {
        &self.styles
    }

    pub fn map_styles(&self) -> &[MapStyle] {
        &self.map_styles
    }

    pub fn poster_size(&self, id: &str) -> Result<&PosterSize> {
        self.sizes
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| PosterError::unknown_size(id))
    }

    pub fn poster_size_type(&self, id: &str) -> Result<&PosterSizeType> {
        self.size_types
            .iter()
            .find(|t| t.id.as_str() == id)
            .ok_or_else(|| PosterError::unknown_size_type(id))
    }

    pub fn material(&self, id: &str) -> Result<&PosterMaterial> {
        self.materials
            .iter()
            .find(|m| m.id == id)
            .ok_or_else(|| PosterError::unknown_material(id))
    }

    /// Look up a poster style.
    ///
    /// With a plywood-class material the style's allowed map styles are
    /// replaced by its plywood subset.
    pub fn poster_style(&self, id: &str, material: Option<&str>) -> Result<Cow<'_, PosterStyle>> {
        let style = self.find_style(id)?;
        match material {
            Some(material_id) => Ok(self.style_for_material(style, self.material(material_id)?)),
            None => Ok(Cow::Borrowed(style)),
        }
    }

    pub(crate) fn find_style(&self, id: &str) -> Result<&PosterStyle> {
        self.styles
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| PosterError::unknown_style(id))
    }

    fn style_for_material<'a>(
        &'a self,
        style: &'a PosterStyle,
        material: &PosterMaterial,
    ) -> Cow<'a, PosterStyle> {
        match material.class {
            MaterialClass::Paper => Cow::Borrowed(style),
            MaterialClass::Plywood => {
                let mut substituted = style.clone();
                substituted.allowed_map_styles = style.allowed_plywood_map_styles.clone();
                Cow::Owned(substituted)
            }
        }
    }

    /// Look up a map style, falling back to the default theme with `id`
    /// substituted.
    pub fn map_style(&self, id: &str) -> Cow<'_, MapStyle> {
        if let Some(style) = self.map_styles.iter().find(|m| m.id == id) {
            return Cow::Borrowed(style);
        }

        debug!(id, default = %self.default_map_style, "unknown map style, using default theme");
        let mut fallback = self.map_styles[self.default_theme].clone();
        fallback.id = id.to_string();
        Cow::Owned(fallback)
    }

    /// Sizes available in a material, in catalog order
    pub fn poster_sizes(&self, material_id: &str) -> Result<Vec<&PosterSize>> {
        let material = self.material(material_id)?;
        Ok(self
            .sizes
            .iter()
            .filter(|s| material.allows_size(&s.id))
            .collect())
    }

    /// Styles available in a material, in catalog order, with map styles
    /// restricted for the material
    pub fn poster_styles(&self, material_id: &str) -> Result<Vec<Cow<'_, PosterStyle>>> {
        let material = self.material(material_id)?;
        Ok(self
            .styles
            .iter()
            .filter(|s| material.allows_style(&s.id))
            .map(|s| self.style_for_material(s, material))
            .collect())
    }

    /// Physical dimensions of a size in centimeters with orientation applied
    pub fn physical_dimensions_in_cm(
        &self,
        size_id: &str,
        orientation: Orientation,
    ) -> Result<Dimensions> {
        let size = self.poster_size(size_id)?;
        Ok(resolve_orientation(size.dimensions().to_cm(), orientation))
    }

    /// Find the size of another unit system closest to `size_id`.
    ///
    /// Sizes are compared in portrait orientation by L1 distance in
    /// centimeters; ties go to the candidate declared first. A size already
    /// in `target` is returned unchanged.
    pub fn closest_size_for_other_size_type(
        &self,
        size_id: &str,
        target: SizeUnit,
    ) -> Result<&PosterSize> {
        let size = self.poster_size(size_id)?;
        if size.unit == target {
            return Ok(size);
        }

        let source = self.physical_dimensions_in_cm(&size.id, Orientation::Portrait)?;
        let mut best: Option<(&PosterSize, f64)> = None;
        for candidate in self.sizes.iter().filter(|s| s.unit == target) {
            let distance = source.l1_distance(&candidate.dimensions().to_cm());
            match best {
                Some((_, best_distance)) if distance >= best_distance => {}
                _ => best = Some((candidate, distance)),
            }
        }

        let (closest, distance) =
            best.ok_or_else(|| PosterError::unknown_size_type(target.as_str()))?;
        debug!(from = size_id, to = %closest.id, distance, "matched size across unit systems");
        Ok(closest)
    }

    /// Stroke width of the middle line printed on a poster of `size_id`
    pub fn middle_line_stroke_width(&self, size_id: &str) -> f64 {
        self.sizes
            .iter()
            .find(|s| s.id == size_id)
            .and_then(|s| s.middle_line_stroke_width)
            .unwrap_or(DEFAULT_MIDDLE_LINE_STROKE_WIDTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    fn ids<'a>(items: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
        items.into_iter().collect()
    }

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.sizes().len(), 6);
        assert_eq!(catalog.size_types().len(), 2);
        assert_eq!(catalog.materials().len(), 2);
        assert_eq!(catalog.styles().len(), 7);
        assert_eq!(catalog.map_styles().len(), 12);
        assert_eq!(catalog.orientations().len(), 2);
    }

    #[test]
    fn test_poster_size_lookup() {
        let size = Catalog::builtin().poster_size("12x18inch").unwrap();
        assert_eq!(size.unit, SizeUnit::Inch);
        assert_eq!(size.label, "12 x 18\"");
        assert_eq!((size.width, size.height), (12.0, 18.0));
    }

    #[test]
    fn test_unknown_ids_fail() {
        let catalog = Catalog::builtin();
        assert!(matches!(
            catalog.poster_size("1x1cm"),
            Err(PosterError::UnknownPosterSize { .. })
        ));
        assert!(matches!(
            catalog.poster_size_type("mm"),
            Err(PosterError::UnknownSizeType { .. })
        ));
        assert!(matches!(
            catalog.poster_style("baroque", None),
            Err(PosterError::UnknownPosterStyle { .. })
        ));
        assert!(matches!(
            catalog.material("marble"),
            Err(PosterError::UnknownMaterial { .. })
        ));
    }

    #[test]
    fn test_size_type_lookup() {
        let size_type = Catalog::builtin().poster_size_type("inch").unwrap();
        assert_eq!(size_type.label, "US");
        assert_eq!(size_type.description, "Inch sizes");
    }

    #[test]
    fn test_sharp_style() {
        let style = Catalog::builtin().poster_style("sharp", None).unwrap();
        assert_eq!(style.name, "Sharp");
        assert_eq!(style.labels, vec![LabelName::Header]);
        assert!(style.upper_case_labels);
        assert!(!style.add_lines);
        assert!(style.label_rules.is_empty());
        assert!(matches!(style, Cow::Borrowed(_)));
    }

    #[test]
    fn test_plywood_substitutes_map_styles() {
        let catalog = Catalog::builtin();
        let paper = catalog.poster_style("sharp", Some("paper")).unwrap();
        let plywood = catalog.poster_style("sharp", Some("plywood")).unwrap();

        assert_eq!(
            paper.allowed_map_styles.as_deref(),
            Some(&["bw", "gray", "black", "petrol"].map(String::from)[..])
        );
        assert_eq!(
            plywood.allowed_map_styles.as_deref(),
            Some(&["bw", "gray", "black-plywood-transparent"].map(String::from)[..])
        );
        assert!(plywood.allows_map_style("black-plywood-transparent"));
        assert!(!plywood.allows_map_style("petrol"));
    }

    #[test]
    fn test_style_with_unknown_material_fails() {
        let result = Catalog::builtin().poster_style("sharp", Some("marble"));
        assert!(matches!(result, Err(PosterError::UnknownMaterial { .. })));
    }

    #[test]
    fn test_map_style_lookup() {
        let style = Catalog::builtin().map_style("madang");
        assert_eq!(
            *style,
            MapStyle {
                id: "madang".to_string(),
                color: "#A7E19E".to_string(),
                label_color: "#A7E19E".to_string(),
                render_type: "raster".to_string(),
                name: "Madang".to_string(),
            }
        );
    }

    #[test]
    fn test_unknown_map_style_uses_default_theme() {
        let style = Catalog::builtin().map_style("not-existing-id");
        assert_eq!(style.id, "not-existing-id");
        assert_eq!(style.color, "#000000");
        assert_eq!(style.label_color, "#000000");
        assert_eq!(style.name, "Default black (for internal use)");
    }

    #[test]
    fn test_material_filters() {
        let catalog = Catalog::builtin();
        let sizes = catalog.poster_sizes("plywood").unwrap();
        assert_eq!(
            ids(sizes.iter().map(|s| s.id.as_str())),
            vec!["30x40cm", "50x70cm", "12x18inch", "18x24inch"]
        );

        let styles = catalog.poster_styles("paper").unwrap();
        assert_eq!(
            ids(styles.iter().map(|s| s.id.as_str())),
            vec!["sharp", "classic", "sans", "bw", "pacific", "summer", "round"]
        );
        assert_eq!(styles.len(), catalog.styles().len());

        let plywood_styles = catalog.poster_styles("plywood").unwrap();
        let bw = plywood_styles.iter().find(|s| s.id == "bw").unwrap();
        assert!(bw.allows_map_style("black-plywood-transparent"));
        assert!(!bw.allows_map_style("black"));
    }

    #[test]
    fn test_physical_dimensions_in_cm() {
        let catalog = Catalog::builtin();
        let dims = catalog
            .physical_dimensions_in_cm("12x18inch", Orientation::Portrait)
            .unwrap();
        assert!(approx_eq(dims.width, 30.48));
        assert!(approx_eq(dims.height, 45.72));
        assert_eq!(dims.unit, SizeUnit::Cm);

        let landscape = catalog
            .physical_dimensions_in_cm("50x70cm", Orientation::Landscape)
            .unwrap();
        assert_eq!(landscape, Dimensions::new(70.0, 50.0, SizeUnit::Cm));
    }

    #[test]
    fn test_every_inch_size_converts_exactly() {
        let catalog = Catalog::builtin();
        for size in catalog.sizes().iter().filter(|s| s.unit == SizeUnit::Inch) {
            let dims = catalog
                .physical_dimensions_in_cm(&size.id, Orientation::Portrait)
                .unwrap();
            assert!(approx_eq(dims.width, size.width * CM_PER_INCH), "{}", size.id);
            assert!(approx_eq(dims.height, size.height * CM_PER_INCH), "{}", size.id);
        }
    }

    #[test]
    fn test_closest_size_cm_to_inch() {
        let catalog = Catalog::builtin();
        let closest = |id| {
            catalog
                .closest_size_for_other_size_type(id, SizeUnit::Inch)
                .unwrap()
                .id
                .as_str()
        };
        assert_eq!(closest("30x40cm"), "12x18inch");
        assert_eq!(closest("50x70cm"), "18x24inch");
        assert_eq!(closest("70x100cm"), "24x36inch");
    }

    #[test]
    fn test_closest_size_inch_to_cm() {
        let catalog = Catalog::builtin();
        let closest = |id| {
            catalog
                .closest_size_for_other_size_type(id, SizeUnit::Cm)
                .unwrap()
                .id
                .as_str()
        };
        assert_eq!(closest("12x18inch"), "30x40cm");
        assert_eq!(closest("18x24inch"), "50x70cm");
        assert_eq!(closest("24x36inch"), "70x100cm");
    }

    #[test]
    fn test_closest_size_same_unit_is_unchanged() {
        let size = Catalog::builtin()
            .closest_size_for_other_size_type("50x70cm", SizeUnit::Cm)
            .unwrap();
        assert_eq!(size.id, "50x70cm");
    }

    #[test]
    fn test_closest_size_tie_goes_to_first_declared() {
        let catalog = Catalog::from_str(
            r##"
default_map_style = "default"
materials = []
styles = []

[[size_types]]
id = "cm"
label = "Europe"
description = "Metric sizes"

[[size_types]]
id = "inch"
label = "US"
description = "Inch sizes"

[[sizes]]
id = "10x10inch"
type = "inch"
label = "10 x 10"
width = 10
height = 10

[[sizes]]
id = "a"
type = "cm"
label = "A"
width = 24
height = 26

[[sizes]]
id = "b"
type = "cm"
label = "B"
width = 26
height = 24

[[map_styles]]
id = "default"
color = "#000000"
label_color = "#000000"
type = "raster"
name = "Default"
"##,
        )
        .expect("Should parse");

        let closest = catalog
            .closest_size_for_other_size_type("10x10inch", SizeUnit::Cm)
            .unwrap();
        assert_eq!(closest.id, "a");
    }

    #[test]
    fn test_middle_line_stroke_width() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.middle_line_stroke_width("30x40cm"), 6.0);
        assert_eq!(catalog.middle_line_stroke_width("50x70cm"), 9.0);
        assert_eq!(catalog.middle_line_stroke_width("70x100cm"), 12.0);
        assert_eq!(catalog.middle_line_stroke_width("18x24inch"), 6.0);
        assert_eq!(catalog.middle_line_stroke_width("unknown"), 6.0);
    }

    #[test]
    fn test_missing_default_map_style_rejected() {
        let result = Catalog::from_str(
            r#"
default_map_style = "nope"
size_types = []
sizes = []
materials = []
styles = []
map_styles = []
"#,
        );
        assert!(matches!(
            result,
            Err(CatalogError::MissingDefaultMapStyle { .. })
        ));
    }

    #[test]
    fn test_label_rules_without_catch_all_rejected() {
        let result = Catalog::from_str(
            r##"
default_map_style = "default"
size_types = []
sizes = []
materials = []

[[styles]]
id = "broken"
name = "Broken"
labels = ["header"]

[[styles.label_rules]]
label = "header"
min_length = 11
svg_attributes = { font-size = 200 }

[[map_styles]]
id = "default"
color = "#000000"
label_color = "#000000"
type = "raster"
name = "Default"
"##,
        );
        assert!(matches!(result, Err(CatalogError::InvalidLabelRules { .. })));
    }

    #[test]
    fn test_material_with_unknown_size_rejected() {
        let result = Catalog::from_str(
            r##"
default_map_style = "default"
size_types = []
sizes = []
styles = []

[[materials]]
id = "paper"
name = "Paper"
allowed_poster_styles = []
allowed_poster_sizes = ["30x40cm"]

[[map_styles]]
id = "default"
color = "#000000"
label_color = "#000000"
type = "raster"
name = "Default"
"##,
        );
        assert!(matches!(
            result,
            Err(CatalogError::UnknownReference { kind: "poster size", .. })
        ));
    }

    #[test]
    fn test_invalid_toml_error() {
        let result = Catalog::from_str("this is not valid toml {{{{");
        assert!(matches!(result, Err(CatalogError::ParseError(_))));
    }
}

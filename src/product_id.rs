//! Product identifiers for downstream fulfillment
//!
//! ```text
//! <version>/<STYLE>/<MAP COLOR>/<ORIENTATION>/<SIZE>/<paper weight>/<city id>
//! ```
//!
//! Fields are joined with `/`. Style and size ids are upper-cased, the map
//! color is written as upper-case hex without `#`, and the orientation is its
//! initial. Changing the layout requires bumping [`PRODUCT_ID_VERSION`].

use crate::catalog::{Catalog, Orientation};

/// Layout version written as the first field
pub const PRODUCT_ID_VERSION: u32 = 0;

/// Paper weight field; 0 selects the fulfillment system's default
pub const DEFAULT_PAPER_WEIGHT: u32 = 0;

/// A poster configuration to encode
#[derive(Debug, Clone, PartialEq)]
pub struct ProductConfig {
    pub poster_style: String,
    pub map_style: String,
    pub orientation: Orientation,
    pub size: String,
    pub city_id: String,
}

impl ProductConfig {
    pub fn new(
        poster_style: impl Into<String>,
        map_style: impl Into<String>,
        orientation: Orientation,
        size: impl Into<String>,
        city_id: impl Into<String>,
    ) -> Self {
        Self {
            poster_style: poster_style.into(),
            map_style: map_style.into(),
            orientation,
            size: size.into(),
            city_id: city_id.into(),
        }
    }
}

/// Encode `config` as a product id. Unknown map styles encode the default
/// theme's color.
pub fn create_product_id(catalog: &Catalog, config: &ProductConfig) -> String {
    let map_style = catalog.map_style(&config.map_style);
    format!(
        "{}/{}/{}/{}/{}/{}/{}",
        PRODUCT_ID_VERSION,
        config.poster_style.to_uppercase(),
        map_style.color_hex(),
        config.orientation.initial(),
        config.size.to_uppercase(),
        DEFAULT_PAPER_WEIGHT,
        config.city_id,
    )
}

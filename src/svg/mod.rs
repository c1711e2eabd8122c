//! SVG document access: the collaborator trait, a bundled tree
//! implementation, and position resolution over it.

mod document;
mod geometry;
pub mod transform;
mod tree;

pub use document::SvgDocument;
pub use geometry::{BoundingBox, Point};
pub use transform::{element_position, parse_number, parse_translate, Translate};
pub use tree::{DocumentError, NodeId, SvgTree};

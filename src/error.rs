//! Error types for catalog lookups and document mutation

use thiserror::Error;

pub type Result<T, E = PosterError> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum PosterError {
    #[error("unknown poster size: {id}")]
    UnknownPosterSize { id: String },

    #[error("unknown poster size type: {id}")]
    UnknownSizeType { id: String },

    #[error("unknown poster style: {id}")]
    UnknownPosterStyle { id: String },

    #[error("unknown poster material: {id}")]
    UnknownMaterial { id: String },

    /// A label must be rendered through exactly one `<tspan>`
    #[error("unexpected amount of tspan elements in {element}: {found}")]
    TspanCount { element: String, found: usize },

    /// An attribute needed for geometry is missing or not a number
    #[error("attribute '{attribute}' on {element} is missing or not numeric")]
    InvalidAttribute { element: String, attribute: String },
}

impl PosterError {
    pub fn unknown_size(id: impl Into<String>) -> Self {
        Self::UnknownPosterSize { id: id.into() }
    }

    pub fn unknown_size_type(id: impl Into<String>) -> Self {
        Self::UnknownSizeType { id: id.into() }
    }

    pub fn unknown_style(id: impl Into<String>) -> Self {
        Self::UnknownPosterStyle { id: id.into() }
    }

    pub fn unknown_material(id: impl Into<String>) -> Self {
        Self::UnknownMaterial { id: id.into() }
    }

    pub fn invalid_attribute(element: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::InvalidAttribute {
            element: element.into(),
            attribute: attribute.into(),
        }
    }

    /// True for the lookup failures (`Unknown*` variants)
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UnknownPosterSize { .. }
                | Self::UnknownSizeType { .. }
                | Self::UnknownPosterStyle { .. }
                | Self::UnknownMaterial { .. }
        )
    }
}

#![allow(dead_code)]

use thiserror::Error;

use crate::catalog::CatalogError;

/// Application-level error type. Layout itself performs no I/O, so most
/// variants come from the collaborators around it: the catalog service, the
/// artwork downloads, and the raster backend.
#[derive(Debug, Error)]
pub enum PosterError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Font error: {0}")]
    Font(String),

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

//! Defines [`GeoGmlError`], representing all errors returned by this crate.

use thiserror::Error;

/// Enum with all errors in this crate.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum GeoGmlError {
    /// The encoder received a geometry variant it does not implement.
    #[error("Unsupported geometry type: {0}")]
    UnsupportedGeometryType(String),

    /// The bounding-polygon lookup path matched no node in the target document.
    #[error("Path not found in document: {0}")]
    PathNotFound(String),

    /// The lookup path uses a namespace prefix the target document never declares.
    #[error("Namespace prefix not declared by document root: {0}")]
    UndeclaredPrefix(String),

    /// [quick_xml::Error]
    #[error(transparent)]
    Xml(#[from] quick_xml::Error),

    /// [std::io::Error]
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Crate-specific result type.
pub type Result<T> = std::result::Result<T, GeoGmlError>;

//! GML 3.2 encoding of geometries.
//!
//! Geometries are encoded as namespace-qualified element trees with the axis
//! order mandated for EPSG:4326 (latitude before longitude) and coordinates
//! at a fixed precision of six decimal digits.

mod element;
mod encoder;

pub use element::{GmlElement, GML_NS};
pub use encoder::encode;

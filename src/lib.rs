//! Stitch surveyed line fragments into continuous polylines and encode
//! geometries as GML 3.2 fragments, optionally splicing the result into the
//! bounding-polygon slot of an ISO 19115-2 metadata document.
//!
//! The pipeline: normalize a [geo::Geometry] with [collection::to_collection],
//! optionally consolidate line fragments with [merge::merge_lines], encode
//! with [gml::encode], and patch a metadata document with
//! [patch::replace_bounding_polygon].
//!
//! ```
//! use geo::{line_string, Geometry, MultiLineString};
//! use geogml::gml;
//! use geogml::merge::{merge_lines, DEFAULT_TOLERANCE};
//!
//! let fragments = MultiLineString::new(vec![
//!     line_string![(x: -80.0, y: 25.0), (x: -79.5, y: 25.2)],
//!     line_string![(x: -79.499, y: 25.2), (x: -79.0, y: 25.4)],
//! ]);
//! let merged = merge_lines(&fragments, DEFAULT_TOLERANCE);
//! assert_eq!(merged.0.len(), 1);
//!
//! let element = gml::encode(&Geometry::MultiLineString(merged))?;
//! assert_eq!(element.name(), "MultiCurve");
//! # Ok::<(), geogml::GeoGmlError>(())
//! ```

#![cfg_attr(not(test), deny(unused_crate_dependencies))]

pub mod collection;
pub mod error;
pub mod gml;
pub mod merge;
pub mod patch;
pub mod round;

pub use error::{GeoGmlError, Result};

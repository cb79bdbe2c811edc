//! Fixed-precision coordinate rounding.

use geo::{Coord, Geometry, MapCoords};

/// Decimal digits kept by the fixed-precision coordinate contract.
pub const PRECISION: u32 = 6;

const SCALE: f64 = 1e6;

pub(crate) fn round6(value: f64) -> f64 {
    (value * SCALE).round() / SCALE
}

/// Returns a copy of the geometry with every coordinate rounded to
/// [PRECISION] decimal digits. Rounding, not truncation.
pub fn round_geometry(geometry: &Geometry<f64>) -> Geometry<f64> {
    geometry.map_coords(|coord| Coord {
        x: round6(coord.x),
        y: round6(coord.y),
    })
}

//! Variant dispatch helpers: collection normalization and coordinate counting.

use geo::{Geometry, MultiLineString, MultiPoint, MultiPolygon};

/// Returns `false` for the three singular variants (Point, LineString,
/// Polygon) and `true` for everything else.
pub fn is_collection(geometry: &Geometry<f64>) -> bool {
    !matches!(
        geometry,
        Geometry::Point(_) | Geometry::LineString(_) | Geometry::Polygon(_)
    )
}

/// Wraps a singular geometry in its corresponding collection variant
/// (Point → MultiPoint, LineString → MultiLineString, Polygon →
/// MultiPolygon). Identity for everything else, so applying it twice is the
/// same as applying it once.
///
/// ```
/// use geo::{point, Geometry};
/// use geogml::collection::{is_collection, to_collection};
///
/// let normalized = to_collection(Geometry::Point(point!(x: -80.0, y: 25.0)));
/// assert!(is_collection(&normalized));
/// assert!(matches!(normalized, Geometry::MultiPoint(_)));
/// ```
pub fn to_collection(geometry: Geometry<f64>) -> Geometry<f64> {
    match geometry {
        Geometry::Point(point) => Geometry::MultiPoint(MultiPoint::new(vec![point])),
        Geometry::LineString(line) => Geometry::MultiLineString(MultiLineString::new(vec![line])),
        Geometry::Polygon(polygon) => Geometry::MultiPolygon(MultiPolygon::new(vec![polygon])),
        other => other,
    }
}

/// Diagnostic coordinate and sub-geometry counts for a geometry.
///
/// Check [`GeometryCount::supported`] (or the variant name) before trusting
/// the counts: unsupported variants report zeros.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeometryCount {
    /// Total coordinate count. Polygons count their exterior ring only.
    pub coords: usize,
    /// Number of sub-geometries (1 for singular variants).
    pub geometries: usize,
    /// Name of the runtime variant, e.g. `"MultiLineString"`.
    pub variant: &'static str,
    /// `false` when the variant is not covered by this counter.
    pub supported: bool,
}

/// Counts coordinates and sub-geometries per variant.
///
/// Best-effort diagnostics: variants outside the six supported ones
/// (GeometryCollection among them) yield zero counts with
/// `supported == false` instead of an error.
pub fn count_geometry(geometry: &Geometry<f64>) -> GeometryCount {
    let variant = variant_name(geometry);
    let (coords, geometries, supported) = match geometry {
        Geometry::Point(_) => (1, 1, true),
        Geometry::LineString(line) => (line.0.len(), 1, true),
        Geometry::Polygon(polygon) => (polygon.exterior().0.len(), 1, true),
        Geometry::MultiPoint(points) => (points.0.len(), points.0.len(), true),
        Geometry::MultiLineString(lines) => (
            lines.0.iter().map(|line| line.0.len()).sum(),
            lines.0.len(),
            true,
        ),
        Geometry::MultiPolygon(polygons) => (
            polygons.0.iter().map(|polygon| polygon.exterior().0.len()).sum(),
            polygons.0.len(),
            true,
        ),
        _ => (0, 0, false),
    };
    GeometryCount {
        coords,
        geometries,
        variant,
        supported,
    }
}

/// Every vertex of every line, in order, as a [MultiPoint].
pub fn multi_line_points(multi_line: &MultiLineString<f64>) -> MultiPoint<f64> {
    MultiPoint::new(multi_line.0.iter().flat_map(|line| line.points()).collect())
}

pub(crate) fn variant_name(geometry: &Geometry<f64>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{line_string, point, polygon, GeometryCollection};

    #[test]
    fn singular_variants_are_not_collections() {
        assert!(!is_collection(&Geometry::Point(point!(x: 0.0, y: 0.0))));
        assert!(!is_collection(&Geometry::LineString(line_string![
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 1.0),
        ])));
        assert!(is_collection(&Geometry::GeometryCollection(
            GeometryCollection::default()
        )));
    }

    #[test]
    fn to_collection_is_idempotent() {
        let wrapped = to_collection(Geometry::LineString(line_string![
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 1.0),
        ]));
        assert!(is_collection(&wrapped));
        assert_eq!(to_collection(wrapped.clone()), wrapped);
    }

    #[test]
    fn to_collection_wraps_each_singular_variant() {
        assert!(matches!(
            to_collection(Geometry::Point(point!(x: 0.0, y: 0.0))),
            Geometry::MultiPoint(_)
        ));
        let polygon = polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0)];
        assert!(matches!(
            to_collection(Geometry::Polygon(polygon)),
            Geometry::MultiPolygon(_)
        ));
    }

    #[test]
    fn counts_supported_variants() {
        let line = line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 1.0), (x: 2.0, y: 2.0)];
        let count = count_geometry(&Geometry::LineString(line.clone()));
        assert_eq!(count.coords, 3);
        assert_eq!(count.geometries, 1);
        assert_eq!(count.variant, "LineString");
        assert!(count.supported);

        let multi = count_geometry(&Geometry::MultiLineString(MultiLineString::new(vec![
            line.clone(),
            line,
        ])));
        assert_eq!(multi.coords, 6);
        assert_eq!(multi.geometries, 2);
    }

    #[test]
    fn counts_polygon_exterior_only() {
        // polygon! closes the ring, so 3 input coords become 4
        let polygon = polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0)];
        let count = count_geometry(&Geometry::Polygon(polygon));
        assert_eq!(count.coords, 4);
        assert_eq!(count.geometries, 1);
    }

    #[test]
    fn unsupported_variant_reports_zero_counts() {
        let count = count_geometry(&Geometry::GeometryCollection(GeometryCollection::default()));
        assert_eq!(count.coords, 0);
        assert_eq!(count.geometries, 0);
        assert_eq!(count.variant, "GeometryCollection");
        assert!(!count.supported);
    }

    #[test]
    fn explodes_multi_line_into_points() {
        let multi_line = MultiLineString::new(vec![
            line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 1.0)],
            line_string![(x: 2.0, y: 2.0), (x: 3.0, y: 3.0)],
        ]);
        let points = multi_line_points(&multi_line);
        assert_eq!(points.0.len(), 4);
        assert_eq!(points.0[2], point!(x: 2.0, y: 2.0));
    }
}

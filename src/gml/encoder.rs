//! Per-variant construction of GML 3.2 element trees.

use geo::{Geometry, LineString, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon};

use super::element::GmlElement;
use crate::collection::variant_name;
use crate::error::{GeoGmlError, Result};

const SRS_NAME: &str = "urn:ogc:def:crs:EPSG::4326";
const SRS_DIMENSION: &str = "2";

/// Encodes a geometry as a GML 3.2 element tree.
///
/// Supported variants and their root elements:
///
/// | Variant         | Root element   | `gml:id`    |
/// |-----------------|----------------|-------------|
/// | Polygon         | `Polygon`      | `polygon`   |
/// | MultiPoint      | `MultiPoint`   | `points`    |
/// | LineString      | `Curve`        | `transect`  |
/// | MultiLineString | `MultiCurve`   | `transects` |
/// | MultiPolygon    | `MultiSurface` | `features`  |
///
/// Member elements are numbered from 1 per call (`point1`, `line1`, `poly1`,
/// ...). The outermost element carries `srsName`; every coordinate-bearing
/// element carries `srsDimension="2"`. Coordinates are emitted latitude
/// before longitude (the GML axis order for EPSG:4326) at six decimal
/// digits. Only polygon exterior rings are encoded.
///
/// Anything else, including bare `Point` and `GeometryCollection`, fails
/// with [GeoGmlError::UnsupportedGeometryType] before any output is built.
///
/// ```
/// use geo::{polygon, Geometry};
///
/// let ring = polygon![
///     (x: -80.0, y: 25.0),
///     (x: -79.0, y: 25.0),
///     (x: -79.0, y: 26.0),
///     (x: -80.0, y: 25.0),
/// ];
/// let element = geogml::gml::encode(&Geometry::Polygon(ring))?;
/// assert_eq!(element.name(), "Polygon");
/// assert_eq!(element.attribute("srsName"), Some("urn:ogc:def:crs:EPSG::4326"));
/// # Ok::<(), geogml::GeoGmlError>(())
/// ```
pub fn encode(geometry: &Geometry<f64>) -> Result<GmlElement> {
    match geometry {
        Geometry::Polygon(polygon) => Ok(encode_polygon(polygon)),
        Geometry::MultiPoint(points) => Ok(encode_multi_point(points)),
        Geometry::LineString(line) => Ok(encode_line_string(line)),
        Geometry::MultiLineString(lines) => Ok(encode_multi_line_string(lines)),
        Geometry::MultiPolygon(polygons) => Ok(encode_multi_polygon(polygons)),
        other => Err(GeoGmlError::UnsupportedGeometryType(
            variant_name(other).to_string(),
        )),
    }
}

fn encode_polygon(polygon: &Polygon<f64>) -> GmlElement {
    GmlElement::new("Polygon")
        .with_attr("gml:id", "polygon")
        .with_attr("srsName", SRS_NAME)
        .with_child(exterior_ring(polygon))
}

fn encode_multi_point(points: &MultiPoint<f64>) -> GmlElement {
    let mut root = GmlElement::new("MultiPoint")
        .with_attr("gml:id", "points")
        .with_attr("srsName", SRS_NAME);
    for (index, point) in points.0.iter().enumerate() {
        root = root.with_child(
            GmlElement::new("pointMember").with_child(
                GmlElement::new("Point")
                    .with_attr("gml:id", format!("point{}", index + 1))
                    .with_child(
                        GmlElement::new("pos")
                            .with_attr("srsDimension", SRS_DIMENSION)
                            .with_text(pos(point)),
                    ),
            ),
        );
    }
    root
}

fn encode_line_string(line: &LineString<f64>) -> GmlElement {
    GmlElement::new("Curve")
        .with_attr("gml:id", "transect")
        .with_attr("srsName", SRS_NAME)
        .with_child(segments(line))
}

fn encode_multi_line_string(lines: &MultiLineString<f64>) -> GmlElement {
    let mut root = GmlElement::new("MultiCurve")
        .with_attr("gml:id", "transects")
        .with_attr("srsName", SRS_NAME);
    for (index, line) in lines.0.iter().enumerate() {
        root = root.with_child(
            GmlElement::new("curveMember").with_child(
                GmlElement::new("Curve")
                    .with_attr("gml:id", format!("line{}", index + 1))
                    .with_child(segments(line)),
            ),
        );
    }
    root
}

fn encode_multi_polygon(polygons: &MultiPolygon<f64>) -> GmlElement {
    let mut root = GmlElement::new("MultiSurface")
        .with_attr("gml:id", "features")
        .with_attr("srsName", SRS_NAME);
    for (index, polygon) in polygons.0.iter().enumerate() {
        root = root.with_child(
            GmlElement::new("surfaceMember").with_child(
                GmlElement::new("Polygon")
                    .with_attr("gml:id", format!("poly{}", index + 1))
                    .with_child(exterior_ring(polygon)),
            ),
        );
    }
    root
}

fn exterior_ring(polygon: &Polygon<f64>) -> GmlElement {
    GmlElement::new("exterior").with_child(
        GmlElement::new("LinearRing").with_child(
            GmlElement::new("posList")
                .with_attr("srsDimension", SRS_DIMENSION)
                .with_text(pos_list(polygon.exterior())),
        ),
    )
}

fn segments(line: &LineString<f64>) -> GmlElement {
    GmlElement::new("segments").with_child(
        GmlElement::new("LineStringSegment").with_child(
            GmlElement::new("posList")
                .with_attr("srsDimension", SRS_DIMENSION)
                .with_text(pos_list(line)),
        ),
    )
}

fn pos(point: &Point<f64>) -> String {
    format!("{:.6} {:.6}", point.y(), point.x())
}

/// Space-separated ordinates, each coordinate contributing a latitude token
/// then a longitude token.
fn pos_list(line: &LineString<f64>) -> String {
    let mut text = String::with_capacity(line.0.len() * 22);
    for coord in &line.0 {
        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(&format!("{:.6} {:.6}", coord.y, coord.x));
    }
    text
}

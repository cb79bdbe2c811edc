//! In-place replacement of the bounding polygon inside an ISO 19115-2
//! metadata document.

use std::collections::HashMap;

use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::{NsReader, Reader, Writer};

use crate::error::{GeoGmlError, Result};
use crate::gml::GmlElement;

/// Fixed location of the bounding-polygon payload. Prefixes are resolved
/// against the target document's own declarations.
const BOUNDING_POLYGON_PATH: [(&str, &str); 8] = [
    ("gmi", "MI_Metadata"),
    ("gmd", "identificationInfo"),
    ("gmd", "MD_DataIdentification"),
    ("gmd", "extent"),
    ("gmd", "EX_Extent"),
    ("gmd", "geographicElement"),
    ("gmd", "EX_BoundingPolygon"),
    ("gmd", "polygon"),
];

const BOUNDING_POLYGON_XPATH: &str = "/gmi:MI_Metadata/gmd:identificationInfo/gmd:MD_DataIdentification/gmd:extent/gmd:EX_Extent/gmd:geographicElement/gmd:EX_BoundingPolygon/gmd:polygon/*";

/// A caller-owned XML metadata document held as text.
///
/// The crate never reads or writes files: the caller loads the document,
/// hands it to [replace_bounding_polygon], and persists the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument {
    content: String,
}

impl XmlDocument {
    /// Takes ownership of the document text, checking it is well-formed XML.
    pub fn parse(content: impl Into<String>) -> Result<Self> {
        let content = content.into();
        let mut reader = Reader::from_str(&content);
        loop {
            if matches!(reader.read_event()?, Event::Eof) {
                break;
            }
        }
        Ok(Self { content })
    }

    /// The current document text.
    pub fn as_str(&self) -> &str {
        &self.content
    }

    /// Consumes the document, returning its text for persistence.
    pub fn into_string(self) -> String {
        self.content
    }

    /// Prefix-to-URI bindings declared on the document root. The default
    /// (unprefixed) namespace is dropped from the lookup table.
    fn root_namespaces(&self) -> Result<HashMap<String, String>> {
        let mut reader = Reader::from_str(&self.content);
        loop {
            match reader.read_event()? {
                Event::Start(e) | Event::Empty(e) => {
                    let mut namespaces = HashMap::new();
                    for attribute in e.attributes() {
                        let attribute = attribute.map_err(quick_xml::Error::from)?;
                        if let Some(prefix) = attribute.key.as_ref().strip_prefix(b"xmlns:") {
                            namespaces.insert(
                                String::from_utf8_lossy(prefix).into_owned(),
                                attribute.unescape_value()?.into_owned(),
                            );
                        }
                    }
                    return Ok(namespaces);
                }
                Event::Eof => {
                    return Err(GeoGmlError::PathNotFound(BOUNDING_POLYGON_XPATH.to_string()))
                }
                _ => {}
            }
        }
    }
}

/// Replaces the bounding polygon of a metadata document with a freshly
/// encoded GML element.
///
/// The single node matching [`BOUNDING_POLYGON_XPATH`](self) is removed from
/// its parent and the new element is appended as the parent's last child;
/// the resulting change of child order is accepted. When several nodes match,
/// only the first (in document order) is replaced. The document is only
/// modified if the whole rewrite succeeds, so a failure never leaves it
/// half-patched.
///
/// Errors: [GeoGmlError::PathNotFound] when the path matches nothing,
/// [GeoGmlError::UndeclaredPrefix] when the document root does not declare a
/// prefix the path needs.
///
/// ```
/// use geo::{polygon, Geometry};
/// use geogml::gml;
/// use geogml::patch::{replace_bounding_polygon, XmlDocument};
///
/// let metadata = r#"<gmi:MI_Metadata xmlns:gmi="http://www.isotc211.org/2005/gmi" xmlns:gmd="http://www.isotc211.org/2005/gmd" xmlns:gml="http://www.opengis.net/gml/3.2"><gmd:identificationInfo><gmd:MD_DataIdentification><gmd:extent><gmd:EX_Extent><gmd:geographicElement><gmd:EX_BoundingPolygon><gmd:polygon><gml:Polygon gml:id="stale"/></gmd:polygon></gmd:EX_BoundingPolygon></gmd:geographicElement></gmd:EX_Extent></gmd:extent></gmd:MD_DataIdentification></gmd:identificationInfo></gmi:MI_Metadata>"#;
/// let mut document = XmlDocument::parse(metadata)?;
///
/// let ring = polygon![(x: -80.0, y: 25.0), (x: -79.0, y: 25.0), (x: -79.0, y: 26.0)];
/// let element = gml::encode(&Geometry::Polygon(ring))?;
/// replace_bounding_polygon(&element, &mut document)?;
///
/// assert!(!document.as_str().contains("stale"));
/// assert!(document.as_str().contains("gml:id=\"polygon\""));
/// # Ok::<(), geogml::GeoGmlError>(())
/// ```
pub fn replace_bounding_polygon(
    new_gml: &GmlElement,
    document: &mut XmlDocument,
) -> Result<()> {
    let namespaces = document.root_namespaces()?;
    let target: Vec<(String, String)> = BOUNDING_POLYGON_PATH
        .iter()
        .map(|(prefix, local)| {
            let uri = namespaces
                .get(*prefix)
                .ok_or_else(|| GeoGmlError::UndeclaredPrefix((*prefix).to_string()))?;
            Ok((uri.clone(), (*local).to_string()))
        })
        .collect::<Result<_>>()?;

    let mut reader = NsReader::from_str(document.as_str());
    let mut writer = Writer::new(Vec::new());
    let mut stack: Vec<(String, String)> = Vec::new();
    let mut removed = false;
    let mut awaiting_insert = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                if !removed && stack == target {
                    // first element child of the located polygon node
                    reader.read_to_end(e.name())?;
                    removed = true;
                    awaiting_insert = true;
                    continue;
                }
                let (resolved, local) = reader.resolve_element(e.name());
                stack.push(path_step(resolved, local.into_inner()));
                writer.write_event(Event::Start(e))?;
            }
            Event::Empty(e) => {
                if !removed && stack == target {
                    removed = true;
                    awaiting_insert = true;
                    continue;
                }
                writer.write_event(Event::Empty(e))?;
            }
            Event::End(e) => {
                if awaiting_insert && stack == target {
                    new_gml.write_into(&mut writer, true)?;
                    awaiting_insert = false;
                }
                writer.write_event(Event::End(e))?;
                stack.pop();
            }
            Event::Eof => break,
            other => writer.write_event(other)?,
        }
    }

    if !removed {
        return Err(GeoGmlError::PathNotFound(BOUNDING_POLYGON_XPATH.to_string()));
    }

    document.content = String::from_utf8_lossy(&writer.into_inner()).into_owned();
    Ok(())
}

fn path_step(resolved: ResolveResult<'_>, local: &[u8]) -> (String, String) {
    let uri = match resolved {
        ResolveResult::Bound(Namespace(uri)) => String::from_utf8_lossy(uri).into_owned(),
        _ => String::new(),
    };
    (uri, String::from_utf8_lossy(local).into_owned())
}

//! Immutable GML element trees.

use std::io::Write;

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::Result;

/// The GML 3.2 namespace URI.
pub const GML_NS: &str = "http://www.opengis.net/gml/3.2";

/// One element of a GML fragment: a local name in the GML namespace, its
/// attributes, child elements and optional text content.
///
/// Trees are built bottom-up by value (children before parents) and never
/// mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GmlElement {
    name: &'static str,
    attributes: Vec<(&'static str, String)>,
    children: Vec<GmlElement>,
    text: Option<String>,
}

impl GmlElement {
    pub(crate) fn new(name: &'static str) -> Self {
        Self {
            name,
            attributes: Vec::new(),
            children: Vec::new(),
            text: None,
        }
    }

    pub(crate) fn with_attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attributes.push((name, value.into()));
        self
    }

    pub(crate) fn with_child(mut self, child: GmlElement) -> Self {
        self.children.push(child);
        self
    }

    pub(crate) fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Local name of the element, without the `gml:` prefix.
    pub fn name(&self) -> &str {
        self.name
    }

    /// Looks up an attribute by its serialized name, e.g. `"gml:id"` or
    /// `"srsName"`.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Child elements in document order.
    pub fn children(&self) -> &[GmlElement] {
        &self.children
    }

    /// Text content, if any.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Serializes the element as an XML fragment with `xmlns:gml` declared on
    /// the root.
    pub fn to_xml(&self) -> Result<String> {
        let mut writer = Writer::new(Vec::new());
        self.write_into(&mut writer, true)?;
        Ok(String::from_utf8_lossy(&writer.into_inner()).into_owned())
    }

    pub(crate) fn write_into<W: Write>(
        &self,
        writer: &mut Writer<W>,
        declare_namespace: bool,
    ) -> Result<()> {
        let qualified = format!("gml:{}", self.name);
        let mut start = BytesStart::new(qualified.as_str());
        if declare_namespace {
            start.push_attribute(("xmlns:gml", GML_NS));
        }
        for (name, value) in &self.attributes {
            start.push_attribute((*name, value.as_str()));
        }

        if self.children.is_empty() && self.text.is_none() {
            writer.write_event(Event::Empty(start))?;
            return Ok(());
        }

        writer.write_event(Event::Start(start))?;
        if let Some(text) = &self.text {
            writer.write_event(Event::Text(BytesText::new(text)))?;
        }
        for child in &self.children {
            child.write_into(writer, false)?;
        }
        writer.write_event(Event::End(BytesEnd::new(qualified.as_str())))?;
        Ok(())
    }
}

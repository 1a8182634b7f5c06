//! Generic XML element tree.
//!
//! The TCX format is element-oriented: sections are elements, values are
//! text children. The tree keeps attributes and child order verbatim so
//! that sections the backup system never interprets still round-trip.

use crate::error::CodecError;
use quick_xml::events::{BytesDecl, BytesEnd, BytesRef, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

/// One XML element with its attributes, text, and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlNode {
    /// Element name
    pub name: String,
    /// Attributes in document order
    pub attributes: Vec<(String, String)>,
    /// Child elements in document order
    pub children: Vec<XmlNode>,
    /// Concatenated text content, if any
    pub text: Option<String>,
}

impl XmlNode {
    /// Create an element with no attributes, children, or text.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
            text: None,
        }
    }

    /// Create an element carrying only text.
    #[must_use]
    pub fn text_element(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
            text: Some(text.into()),
        }
    }

    /// Find the first child with the given element name.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&XmlNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Iterate over all children with the given element name.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlNode> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Text content of this element, trimmed to `None` when absent.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    fn append_text(&mut self, chunk: &str) {
        match &mut self.text {
            Some(text) => text.push_str(chunk),
            None => self.text = Some(chunk.to_string()),
        }
    }

    // Inter-element whitespace accumulates as text while parsing; strip it
    // once the element is complete.
    fn finalize_text(&mut self) {
        if let Some(text) = &self.text {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                self.text = None;
            } else if trimmed.len() != text.len() {
                self.text = Some(trimmed.to_string());
            }
        }
    }
}

/// Parse a document into its root element.
///
/// Comments, processing instructions, and the XML declaration are dropped;
/// the backup system never needs them and the original tool regenerates the
/// declaration on write.
///
/// # Errors
///
/// Returns [`CodecError::Xml`] on malformed XML and
/// [`CodecError::EmptyDocument`] when no root element is present.
pub fn parse(content: &str) -> Result<XmlNode, CodecError> {
    let mut reader = Reader::from_str(content);

    let mut stack: Vec<XmlNode> = Vec::new();
    let mut root: Option<XmlNode> = None;

    loop {
        match reader.read_event().map_err(|e| CodecError::Xml(e.to_string()))? {
            Event::Start(start) => {
                stack.push(node_from_start(&start)?);
            }
            Event::Empty(start) => {
                let node = node_from_start(&start)?;
                attach(&mut stack, &mut root, node);
            }
            Event::Text(text) => {
                let chunk = text
                    .xml_content()
                    .map_err(|e| CodecError::Xml(e.to_string()))?;
                if let Some(current) = stack.last_mut() {
                    current.append_text(&chunk);
                }
            }
            Event::CData(cdata) => {
                let bytes = cdata.into_inner();
                let chunk = String::from_utf8_lossy(&bytes);
                if let Some(current) = stack.last_mut() {
                    current.append_text(&chunk);
                }
            }
            Event::GeneralRef(reference) => {
                let chunk = resolve_reference(&reference)?;
                if let Some(current) = stack.last_mut() {
                    current.append_text(&chunk);
                }
            }
            Event::End(_) => {
                if let Some(node) = stack.pop() {
                    attach(&mut stack, &mut root, node);
                }
            }
            Event::Eof => break,
            // Declaration, comments, PIs, and doctype carry no model data
            Event::Decl(_) | Event::Comment(_) | Event::PI(_) | Event::DocType(_) => {}
        }
    }

    root.ok_or(CodecError::EmptyDocument)
}

fn resolve_reference(reference: &BytesRef<'_>) -> Result<String, CodecError> {
    if let Some(ch) = reference
        .resolve_char_ref()
        .map_err(|e| CodecError::Xml(e.to_string()))?
    {
        return Ok(ch.to_string());
    }

    // The TCX format declares no custom entities
    match &reference[..] {
        b"amp" => Ok("&".to_string()),
        b"lt" => Ok("<".to_string()),
        b"gt" => Ok(">".to_string()),
        b"apos" => Ok("'".to_string()),
        b"quot" => Ok("\"".to_string()),
        other => Err(CodecError::Xml(format!(
            "unknown entity: &{};",
            String::from_utf8_lossy(other)
        ))),
    }
}

fn node_from_start(start: &BytesStart<'_>) -> Result<XmlNode, CodecError> {
    let mut node = XmlNode::new(String::from_utf8_lossy(start.name().as_ref()).into_owned());
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|e| CodecError::Xml(e.to_string()))?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute
            .unescape_value()
            .map_err(|e| CodecError::Xml(e.to_string()))?
            .into_owned();
        node.attributes.push((key, value));
    }
    Ok(node)
}

fn attach(stack: &mut [XmlNode], root: &mut Option<XmlNode>, mut node: XmlNode) {
    node.finalize_text();
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
    } else if root.is_none() {
        *root = Some(node);
    }
}

/// Serialize a root element back into document text.
///
/// Output is indented and prefixed with a UTF-8 XML declaration.
///
/// # Errors
///
/// Returns [`CodecError::Xml`] if the writer fails.
pub fn serialize(root: &XmlNode) -> Result<String, CodecError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(|e| CodecError::Xml(e.to_string()))?;
    write_node(&mut writer, root)?;

    String::from_utf8(writer.into_inner()).map_err(|e| CodecError::Xml(e.to_string()))
}

fn write_node(writer: &mut Writer<Vec<u8>>, node: &XmlNode) -> Result<(), CodecError> {
    let mut start = BytesStart::new(node.name.as_str());
    for (key, value) in &node.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if node.children.is_empty() && node.text.is_none() {
        return writer
            .write_event(Event::Empty(start))
            .map_err(|e| CodecError::Xml(e.to_string()));
    }

    writer
        .write_event(Event::Start(start))
        .map_err(|e| CodecError::Xml(e.to_string()))?;

    if let Some(text) = &node.text {
        writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(|e| CodecError::Xml(e.to_string()))?;
    }
    for child in &node.children {
        write_node(writer, child)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new(node.name.as_str())))
        .map_err(|e| CodecError::Xml(e.to_string()))
}

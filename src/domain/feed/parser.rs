//! Converts feed XML into an element tree.
//!
//! The tree mirrors the document: element names keep their namespace prefix
//! (`m:properties`, `d:NEW_DATE`), attributes are dropped and text content is
//! unescaped and trimmed.

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::domain::error::FeedError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    pub name: String,
    pub text: String,
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// First child with the given name.
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Follows a chain of child names, e.g. `["content", "m:properties"]`.
    pub fn descend(&self, path: &[&str]) -> Option<&XmlElement> {
        path.iter().try_fold(self, |node, name| node.child(name))
    }
}

/// Parses `xml` into its root element.
pub fn parse(xml: &str) -> Result<XmlElement, FeedError> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        let event = reader.read_event().map_err(|e| parse_error(e.to_string()))?;
        match event {
            Event::Start(start) => stack.push(XmlElement::new(element_name(&start)?)),
            Event::Empty(empty) => {
                let element = XmlElement::new(element_name(&empty)?);
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                let mut element = stack
                    .pop()
                    .ok_or_else(|| parse_error("closing tag without opening tag"))?;
                element.text = element.text.trim().to_string();
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(text) => {
                if let Some(current) = stack.last_mut() {
                    let unescaped = text.unescape().map_err(|e| parse_error(e.to_string()))?;
                    current.text.push_str(&unescaped);
                }
            }
            Event::CData(cdata) => {
                if let Some(current) = stack.last_mut() {
                    let raw = cdata.into_inner();
                    let decoded = std::str::from_utf8(&raw)
                        .map_err(|e| parse_error(format!("invalid UTF-8 in CDATA: {e}")))?;
                    current.text.push_str(decoded);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(parse_error("unexpected end of document"));
    }
    root.ok_or_else(|| parse_error("document has no root element"))
}

fn element_name(tag: &BytesStart<'_>) -> Result<String, FeedError> {
    std::str::from_utf8(tag.name().as_ref())
        .map(str::to_string)
        .map_err(|e| parse_error(format!("invalid UTF-8 in element name: {e}")))
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<(), FeedError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => return Err(parse_error("more than one root element")),
    }
    Ok(())
}

fn parse_error(reason: impl Into<String>) -> FeedError {
    FeedError::ParseError {
        reason: reason.into(),
    }
}

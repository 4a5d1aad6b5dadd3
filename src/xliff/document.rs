/*!
 * Owned XML tree used to edit localization files in memory.
 *
 * Parsing goes through `quick_xml::Reader`; everything the reader reports
 * (elements, attributes, text, CDATA, comments, processing instructions) is
 * kept so that a rewrite only differs from the input where a value was
 * changed. The XML declaration is always written fresh as UTF-8.
 */

use quick_xml::escape::{escape, partial_escape};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fmt::Write as _;

use crate::errors::XliffError;

/// Declaration written at the top of every serialized document
pub const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"utf-8\"?>";

/// A node in the tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
    CData(String),
    Comment(String),
    ProcessingInstruction(String),
    DocType(String),
}

/// An element with its qualified name, attributes in document order and children
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    /// Create an empty element
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Name without the namespace prefix
    pub fn local_name(&self) -> &str {
        self.name.split_once(':').map_or(self.name.as_str(), |(_, local)| local)
    }

    /// Namespace prefix, if the name has one
    pub fn prefix(&self) -> Option<&str> {
        self.name.split_once(':').map(|(prefix, _)| prefix)
    }

    /// Value of an attribute
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    /// Set an attribute, keeping its position if it already exists
    pub fn set_attribute(&mut self, key: &str, value: &str) {
        match self.attributes.iter_mut().find(|(name, _)| name == key) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.attributes.push((key.to_string(), value.to_string())),
        }
    }

    /// Child elements, skipping text and comments
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            _ => None,
        })
    }

    /// First child element with the given local name
    pub fn find_child(&self, local_name: &str) -> Option<&Element> {
        self.child_elements().find(|child| child.local_name() == local_name)
    }

    /// Mutable access to the first child element with the given local name
    pub fn find_child_mut(&mut self, local_name: &str) -> Option<&mut Element> {
        self.children.iter_mut().find_map(|node| match node {
            Node::Element(element) if element.local_name() == local_name => Some(element),
            _ => None,
        })
    }

    /// Position in `children` of the first child element with the given local name
    pub fn child_position(&self, local_name: &str) -> Option<usize> {
        self.children.iter().position(|node| {
            matches!(node, Node::Element(element) if element.local_name() == local_name)
        })
    }

    fn first_element_position(&self) -> usize {
        self.children
            .iter()
            .position(|node| matches!(node, Node::Element(_)))
            .unwrap_or(self.children.len())
    }

    /// Character data before the first child element
    ///
    /// Comments and processing instructions in between are skipped, so
    /// `<target>Hi <!-- note --> there</target>` reads as `"Hi  there"`.
    pub fn text(&self) -> String {
        let mut text = String::new();
        for node in &self.children[..self.first_element_position()] {
            match node {
                Node::Text(value) | Node::CData(value) => text.push_str(value),
                _ => {}
            }
        }
        text
    }

    /// Replace the character data before the first child element
    pub fn set_text(&mut self, text: &str) {
        let first_element = self.first_element_position();
        let mut position = 0;
        self.children.retain(|node| {
            let keep = position >= first_element || !matches!(node, Node::Text(_) | Node::CData(_));
            position += 1;
            keep
        });
        if !text.is_empty() {
            self.children.insert(0, Node::Text(text.to_string()));
        }
    }
}

/// A parsed XML document
#[derive(Debug, Clone, PartialEq)]
pub struct XmlDocument {
    /// Comments, processing instructions and doctype before the root
    pub prolog: Vec<Node>,
    pub root: Element,
    /// Comments and processing instructions after the root
    pub epilog: Vec<Node>,
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn malformed(position: u64, message: impl ToString) -> XliffError {
    XliffError::Malformed {
        position,
        message: message.to_string(),
    }
}

fn element_from_start(start: &BytesStart, position: u64) -> Result<Element, XliffError> {
    let mut element = Element::new(lossy(start.name().as_ref()));
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|e| malformed(position, e))?;
        let value = attribute.unescape_value().map_err(|e| malformed(position, e))?;
        element
            .attributes
            .push((lossy(attribute.key.as_ref()), value.into_owned()));
    }
    Ok(element)
}

/// Tracks open elements while the reader walks the input
struct TreeBuilder {
    stack: Vec<Element>,
    prolog: Vec<Node>,
    root: Option<Element>,
    epilog: Vec<Node>,
}

impl TreeBuilder {
    fn attach(&mut self, node: Node, position: u64) -> Result<(), XliffError> {
        if let Some(parent) = self.stack.last_mut() {
            parent.children.push(node);
            return Ok(());
        }

        match node {
            Node::Element(element) => {
                if self.root.is_some() {
                    return Err(malformed(position, "more than one root element"));
                }
                self.root = Some(element);
            }
            Node::Text(text) | Node::CData(text) => {
                if !text.trim().is_empty() {
                    return Err(malformed(position, "text outside the root element"));
                }
            }
            other if self.root.is_none() => self.prolog.push(other),
            other => self.epilog.push(other),
        }
        Ok(())
    }
}

impl XmlDocument {
    /// Parse a document from a string
    pub fn parse(content: &str) -> Result<Self, XliffError> {
        let mut reader = Reader::from_str(content);
        reader.config_mut().trim_text(false);

        let mut builder = TreeBuilder {
            stack: Vec::new(),
            prolog: Vec::new(),
            root: None,
            epilog: Vec::new(),
        };

        loop {
            let position = reader.buffer_position() as u64;
            let event = reader.read_event().map_err(|e| malformed(position, e))?;

            match event {
                Event::Start(start) => {
                    let element = element_from_start(&start, position)?;
                    builder.stack.push(element);
                }
                Event::Empty(start) => {
                    let element = element_from_start(&start, position)?;
                    builder.attach(Node::Element(element), position)?;
                }
                Event::End(end) => {
                    let found = lossy(end.name().as_ref());
                    let element = builder.stack.pop().ok_or_else(|| XliffError::Unbalanced {
                        expected: String::new(),
                        found: found.clone(),
                    })?;
                    if element.name != found {
                        return Err(XliffError::Unbalanced {
                            expected: element.name,
                            found,
                        });
                    }
                    builder.attach(Node::Element(element), position)?;
                }
                Event::Text(text) => {
                    let value = text.unescape().map_err(|e| malformed(position, e))?;
                    builder.attach(Node::Text(value.into_owned()), position)?;
                }
                Event::CData(data) => {
                    builder.attach(Node::CData(lossy(&data)), position)?;
                }
                Event::Comment(comment) => {
                    builder.attach(Node::Comment(lossy(&comment)), position)?;
                }
                Event::PI(instruction) => {
                    builder.attach(Node::ProcessingInstruction(lossy(&instruction)), position)?;
                }
                Event::DocType(doctype) => {
                    builder.attach(Node::DocType(lossy(&doctype)), position)?;
                }
                Event::Eof => break,
                // The declaration is regenerated on output
                _ => {}
            }
        }

        if let Some(open) = builder.stack.last() {
            return Err(malformed(
                reader.buffer_position() as u64,
                format!("element <{}> is never closed", open.name),
            ));
        }

        let root = builder.root.ok_or(XliffError::MissingRoot)?;
        Ok(Self {
            prolog: builder.prolog,
            root,
            epilog: builder.epilog,
        })
    }

    /// Serialize with a UTF-8 declaration
    pub fn to_xml_string(&self) -> String {
        let mut out = String::with_capacity(4096);
        out.push_str(XML_DECLARATION);
        out.push('\n');
        for node in &self.prolog {
            write_node(&mut out, node);
            out.push('\n');
        }
        write_element(&mut out, &self.root);
        for node in &self.epilog {
            out.push('\n');
            write_node(&mut out, node);
        }
        out.push('\n');
        out
    }

    /// Index paths (from the root) of every element with the given local name,
    /// in document order. The root itself has the empty path.
    pub fn find_paths(&self, local_name: &str) -> Vec<Vec<usize>> {
        let mut paths = Vec::new();
        let mut current = Vec::new();
        collect_paths(&self.root, local_name, &mut current, &mut paths);
        paths
    }

    /// Element at an index path
    pub fn element_at(&self, path: &[usize]) -> Option<&Element> {
        let mut element = &self.root;
        for &index in path {
            element = match element.children.get(index)? {
                Node::Element(child) => child,
                _ => return None,
            };
        }
        Some(element)
    }

    /// Mutable element at an index path
    pub fn element_at_mut(&mut self, path: &[usize]) -> Option<&mut Element> {
        let mut element = &mut self.root;
        for &index in path {
            element = match element.children.get_mut(index)? {
                Node::Element(child) => child,
                _ => return None,
            };
        }
        Some(element)
    }
}

fn collect_paths(element: &Element, local_name: &str, current: &mut Vec<usize>, paths: &mut Vec<Vec<usize>>) {
    if element.local_name() == local_name {
        paths.push(current.clone());
    }
    for (index, node) in element.children.iter().enumerate() {
        if let Node::Element(child) = node {
            current.push(index);
            collect_paths(child, local_name, current, paths);
            current.pop();
        }
    }
}

fn write_element(out: &mut String, element: &Element) {
    out.push('<');
    out.push_str(&element.name);
    for (key, value) in &element.attributes {
        let _ = write!(out, " {}=\"{}\"", key, escape(value.as_str()));
    }
    if element.children.is_empty() {
        out.push_str("/>");
        return;
    }
    out.push('>');
    for child in &element.children {
        write_node(out, child);
    }
    let _ = write!(out, "</{}>", element.name);
}

fn write_node(out: &mut String, node: &Node) {
    match node {
        Node::Element(element) => write_element(out, element),
        Node::Text(text) => out.push_str(&partial_escape(text.as_str())),
        Node::CData(data) => {
            let _ = write!(out, "<![CDATA[{}]]>", data);
        }
        Node::Comment(comment) => {
            let _ = write!(out, "<!--{}-->", comment);
        }
        Node::ProcessingInstruction(instruction) => {
            let _ = write!(out, "<?{}?>", instruction);
        }
        Node::DocType(doctype) => {
            let _ = write!(out, "<!DOCTYPE {}>", doctype.trim_start());
        }
    }
}

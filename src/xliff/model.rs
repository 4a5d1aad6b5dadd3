/*!
 * XLIFF 1.2 view over the XML tree: files, trans-units and their targets.
 *
 * Elements are matched by local name, so prefixed documents work too.
 */

use std::path::Path;

use crate::errors::XliffError;
use crate::xliff::document::{Element, Node, XmlDocument};

/// Namespace of XLIFF 1.2 documents
pub const XLIFF_NAMESPACE: &str = "urn:oasis:names:tc:xliff:document:1.2";

/// State written on targets produced by the Cyrillic pass
pub const STATE_FINAL: &str = "final";

/// Snapshot of one `<trans-unit>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransUnit {
    /// Position among the document's trans-units
    pub index: usize,
    /// `id` attribute
    pub id: Option<String>,
    /// Text of `<source>`, `None` when the element is missing
    pub source: Option<String>,
    /// Text of `<target>`, `None` when the element is missing
    pub target: Option<String>,
    /// `state` attribute of `<target>`
    pub state: Option<String>,
}

impl TransUnit {
    /// Source text, empty when missing
    pub fn source_text(&self) -> &str {
        self.source.as_deref().unwrap_or_default()
    }

    /// Target text, empty when missing
    pub fn target_text(&self) -> &str {
        self.target.as_deref().unwrap_or_default()
    }

    /// Whether the unit has a `<target>` element at all
    pub fn has_target(&self) -> bool {
        self.target.is_some()
    }
}

/// An XLIFF document with its `file` and `trans-unit` elements located
#[derive(Debug, Clone)]
pub struct XliffDocument {
    xml: XmlDocument,
    files: Vec<Vec<usize>>,
    units: Vec<Vec<usize>>,
}

impl XliffDocument {
    /// Parse a document from a string
    pub fn parse(content: &str) -> Result<Self, XliffError> {
        let xml = XmlDocument::parse(content)?;
        let files = xml.find_paths("file");
        let units = xml.find_paths("trans-unit");
        Ok(Self { xml, files, units })
    }

    /// Read and parse a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, XliffError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Serialize the document with an encoding declaration
    pub fn to_xml_string(&self) -> String {
        self.xml.to_xml_string()
    }

    /// Underlying XML tree
    pub fn xml(&self) -> &XmlDocument {
        &self.xml
    }

    /// Namespace bound to the root element's prefix (or the default namespace)
    pub fn namespace(&self) -> Option<&str> {
        let root = &self.xml.root;
        match root.prefix() {
            Some(prefix) => root.attribute(&format!("xmlns:{}", prefix)),
            None => root.attribute("xmlns"),
        }
    }

    /// Whether the root is an XLIFF 1.2 `<xliff>` element
    pub fn is_xliff_1_2(&self) -> bool {
        self.xml.root.local_name() == "xliff" && self.namespace() == Some(XLIFF_NAMESPACE)
    }

    /// Number of `<file>` elements
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// `target-language` of every `<file>` element, in document order
    pub fn target_languages(&self) -> Vec<Option<&str>> {
        self.files
            .iter()
            .map(|path| {
                self.xml
                    .element_at(path)
                    .and_then(|file| file.attribute("target-language"))
            })
            .collect()
    }

    /// `target-language` of the first `<file>` element
    pub fn target_language(&self) -> Option<&str> {
        self.target_languages().into_iter().next().flatten()
    }

    /// Set `target-language` on every `<file>` element; returns how many were updated
    pub fn set_target_language(&mut self, tag: &str) -> usize {
        let mut updated = 0;
        for path in &self.files {
            if let Some(file) = self.xml.element_at_mut(path) {
                file.set_attribute("target-language", tag);
                updated += 1;
            }
        }
        updated
    }

    /// Number of `<trans-unit>` elements
    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    /// Snapshot of one unit
    pub fn unit(&self, index: usize) -> Option<TransUnit> {
        let element = self.xml.element_at(self.units.get(index)?)?;
        let target = element.find_child("target");
        Some(TransUnit {
            index,
            id: element.attribute("id").map(str::to_string),
            source: element.find_child("source").map(Element::text),
            target: target.map(Element::text),
            state: target
                .and_then(|target| target.attribute("state"))
                .map(str::to_string),
        })
    }

    /// Snapshots of all units, in document order
    pub fn units(&self) -> Vec<TransUnit> {
        (0..self.units.len()).filter_map(|index| self.unit(index)).collect()
    }

    /// Write a unit's target text, creating `<target>` right after `<source>`
    /// when the unit has none. `state`, when given, is set on the target.
    /// Returns false if the index is out of range.
    pub fn set_target(&mut self, index: usize, text: &str, state: Option<&str>) -> bool {
        let Some(path) = self.units.get(index) else {
            return false;
        };
        let Some(unit) = self.xml.element_at_mut(path) else {
            return false;
        };

        if unit.find_child("target").is_none() {
            let prefix = unit
                .find_child("source")
                .and_then(Element::prefix)
                .or_else(|| unit.prefix())
                .map(|prefix| format!("{}:", prefix))
                .unwrap_or_default();
            let target = Node::Element(Element::new(format!("{}target", prefix)));
            match unit.child_position("source") {
                Some(position) => unit.children.insert(position + 1, target),
                None => unit.children.push(target),
            }
        }

        if let Some(target) = unit.find_child_mut("target") {
            target.set_text(text);
            if let Some(state) = state {
                target.set_attribute("state", state);
            }
        }
        true
    }
}

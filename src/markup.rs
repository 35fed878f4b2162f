//! # Job Document Markup
//!
//! A thin wrapper around the `xot` XML tree that exposes exactly the
//! operations the job compiler and the publisher need: creating elements and
//! text, setting attributes, finding or creating container children, and
//! pretty serialization with an XML declaration.
//!
//! Keeping every `xot` call behind this module means the rest of the crate
//! talks about job documents in domain terms (append an element here, read the
//! text there) and the tree library can be swapped without touching the
//! compiler or the publisher.

use crate::error::{Error, Result};
use xot::Xot;

pub use xot::Node;

fn markup_err(e: impl std::fmt::Display) -> Error {
    Error::Markup {
        message: e.to_string(),
    }
}

/// A mutable XML document with a single root element.
pub struct Document {
    xot: Xot,
    document: Node,
    root: Node,
}

impl Document {
    /// Create a new document whose root element has the given name.
    pub fn new(root_name: &str) -> Result<Self> {
        Self::parse(&format!("<{}/>", root_name))
    }

    /// Parse an existing XML string into a document.
    pub fn parse(xml: &str) -> Result<Self> {
        let mut xot = Xot::new();
        let document = xot.parse(xml).map_err(markup_err)?;
        let root = xot.document_element(document).map_err(markup_err)?;
        Ok(Document {
            xot,
            document,
            root,
        })
    }

    /// The root element node.
    pub fn root(&self) -> Node {
        self.root
    }

    /// Append a new empty element under `parent`.
    pub fn add_element(&mut self, parent: Node, name: &str) -> Result<Node> {
        let name_id = self.xot.add_name(name);
        let element = self.xot.new_element(name_id);
        self.xot.append(parent, element).map_err(markup_err)?;
        Ok(element)
    }

    /// Append a new element containing only the given text.
    pub fn add_text_element(&mut self, parent: Node, name: &str, text: &str) -> Result<Node> {
        let element = self.add_element(parent, name)?;
        self.append_text(element, text)?;
        Ok(element)
    }

    /// Append a text node under `parent`.
    pub fn append_text(&mut self, parent: Node, text: &str) -> Result<()> {
        let text_node = self.xot.new_text(text);
        self.xot.append(parent, text_node).map_err(markup_err)
    }

    /// Set an attribute on an element.
    pub fn set_attribute(&mut self, node: Node, name: &str, value: &str) {
        let name_id = self.xot.add_name(name);
        self.xot.attributes_mut(node).insert(name_id, value.to_string());
    }

    /// Read an attribute from an element, if present.
    pub fn attribute(&self, node: Node, name: &str) -> Option<&str> {
        let name_id = self.xot.name(name)?;
        self.xot.attributes(node).get(name_id).map(|s| s.as_str())
    }

    /// Replace the content of an element with a single text node.
    pub fn set_text(&mut self, node: Node, text: &str) -> Result<()> {
        let children: Vec<Node> = self.xot.children(node).collect();
        for child in children {
            self.xot.remove(child).map_err(markup_err)?;
        }
        self.append_text(node, text)
    }

    /// The concatenated text content directly under `node`.
    pub fn text_of(&self, node: Node) -> String {
        self.xot
            .children(node)
            .filter_map(|child| self.xot.text_str(child))
            .collect()
    }

    /// The first child element of `parent` with the given name, if any.
    pub fn find_child(&self, parent: Node, name: &str) -> Option<Node> {
        let name_id = self.xot.name(name)?;
        self.xot.children(parent).find(|&child| {
            self.xot
                .element(child)
                .map(|element| element.name() == name_id)
                .unwrap_or(false)
        })
    }

    /// All child elements of `parent` with the given name, in document order.
    pub fn children_named(&self, parent: Node, name: &str) -> Vec<Node> {
        let Some(name_id) = self.xot.name(name) else {
            return Vec::new();
        };
        self.xot
            .children(parent)
            .filter(|&child| {
                self.xot
                    .element(child)
                    .map(|element| element.name() == name_id)
                    .unwrap_or(false)
            })
            .collect()
    }

    /// All child elements of `parent`, regardless of name.
    pub fn child_elements(&self, parent: Node) -> Vec<Node> {
        self.xot
            .children(parent)
            .filter(|&child| self.xot.element(child).is_some())
            .collect()
    }

    /// All element descendants of `parent` with the given name, depth-first.
    pub fn descendants_named(&self, parent: Node, name: &str) -> Vec<Node> {
        let mut found = Vec::new();
        let Some(name_id) = self.xot.name(name) else {
            return found;
        };
        let mut stack: Vec<Node> = self.xot.children(parent).collect();
        stack.reverse();
        while let Some(node) = stack.pop() {
            if let Some(element) = self.xot.element(node) {
                if element.name() == name_id {
                    found.push(node);
                }
                let mut children: Vec<Node> = self.xot.children(node).collect();
                children.reverse();
                stack.append(&mut children);
            }
        }
        found
    }

    /// The first child element with the given name, created if absent.
    ///
    /// Container nodes like `<publishers>` and `<buildWrappers>` are shared
    /// between option handlers; whichever handler runs first creates them.
    pub fn ensure_child(&mut self, parent: Node, name: &str) -> Result<Node> {
        if let Some(existing) = self.find_child(parent, name) {
            return Ok(existing);
        }
        self.add_element(parent, name)
    }

    /// Serialize the document with an XML declaration and indentation.
    pub fn to_pretty_xml(&self) -> Result<String> {
        let parameters = xot::output::xml::Parameters {
            indentation: Some(Default::default()),
            declaration: Some(Default::default()),
            ..Default::default()
        };
        self.xot
            .serialize_xml_string(parameters, self.document)
            .map_err(markup_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_and_serialize() {
        let mut doc = Document::new("project").unwrap();
        let root = doc.root();
        doc.add_text_element(root, "description", "a job").unwrap();
        let xml = doc.to_pretty_xml().unwrap();
        assert!(xml.contains("<?xml"));
        assert!(xml.contains("<description>a job</description>"));
    }

    #[test]
    fn test_text_is_escaped() {
        let mut doc = Document::new("project").unwrap();
        let root = doc.root();
        doc.add_text_element(root, "assignedNode", "win32&&dist-12.0")
            .unwrap();
        let xml = doc.to_pretty_xml().unwrap();
        assert!(xml.contains("win32&amp;&amp;dist-12.0"));
    }

    #[test]
    fn test_attributes() {
        let mut doc = Document::new("project").unwrap();
        let root = doc.root();
        let scm = doc.add_element(root, "scm").unwrap();
        doc.set_attribute(scm, "class", "hudson.plugins.git.GitSCM");
        assert_eq!(doc.attribute(scm, "class"), Some("hudson.plugins.git.GitSCM"));
        let xml = doc.to_pretty_xml().unwrap();
        assert!(xml.contains(r#"<scm class="hudson.plugins.git.GitSCM""#));
    }

    #[test]
    fn test_ensure_child_is_idempotent() {
        let mut doc = Document::new("project").unwrap();
        let root = doc.root();
        let first = doc.ensure_child(root, "publishers").unwrap();
        let second = doc.ensure_child(root, "publishers").unwrap();
        assert_eq!(first, second);
        assert_eq!(doc.children_named(root, "publishers").len(), 1);
    }

    #[test]
    fn test_set_text_replaces_content() {
        let mut doc = Document::new("project").unwrap();
        let root = doc.root();
        let node = doc.add_text_element(root, "assignedNode", "fake").unwrap();
        doc.set_text(node, "win64").unwrap();
        assert_eq!(doc.text_of(node), "win64");
    }

    #[test]
    fn test_parse_and_descendants() {
        let doc = Document::parse(
            "<project><scm><scms><a><url> x </url></a><b><url>y</url></b></scms></scm></project>",
        )
        .unwrap();
        let urls = doc.descendants_named(doc.root(), "url");
        assert_eq!(urls.len(), 2);
        assert_eq!(doc.text_of(urls[0]).trim(), "x");
    }
}

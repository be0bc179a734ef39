use crate::error::{Error, Result};
use scraper::{Html, Node as HtmlNode};
use std::io::Read;
use sxd_document::dom::{self, Document};
use sxd_document::Package;
use sxd_xpath::nodeset::Node;

/// A parsed HTML document ready for XPath queries.
pub struct HtmlDocument {
    package: Package,
}

impl HtmlDocument {
    /// Parse HTML source. HTML parsing never fails; malformed markup is
    /// repaired following the HTML5 tree construction rules.
    pub fn parse(source: &str) -> Self {
        let html = Html::parse_document(source);
        let package = Package::new();
        mirror_tree(&html, &package.as_document());
        tracing::trace!(bytes = source.len(), "parsed html document");
        Self { package }
    }

    /// Parse HTML from bytes. Invalid UTF-8 sequences are replaced with
    /// U+FFFD, as a browser would.
    pub fn from_slice(bytes: &[u8]) -> Self {
        Self::parse(&String::from_utf8_lossy(bytes))
    }

    /// Read the whole input and parse it. Only I/O failures are errors.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .map_err(|source| Error::DocumentParse { source })?;
        Ok(Self::from_slice(&bytes))
    }

    /// The document root as an XPath node.
    pub fn root(&self) -> Node<'_> {
        Node::from(self.package.as_document().root())
    }

    /// Concatenated text of the whole document, in document order.
    pub fn text(&self) -> String {
        self.root().string_value()
    }
}

impl std::fmt::Debug for HtmlDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HtmlDocument").finish_non_exhaustive()
    }
}

#[derive(Clone, Copy)]
enum Parent<'d> {
    Root(dom::Root<'d>),
    Element(dom::Element<'d>),
}

fn mirror_tree<'d>(html: &Html, doc: &Document<'d>) {
    let root = Parent::Root(doc.root());

    // Children are pushed in reverse so nodes are popped, and appended to
    // their parent, in document order.
    let mut pending: Vec<_> = html
        .tree
        .root()
        .children()
        .rev()
        .map(|child| (child, root))
        .collect();

    while let Some((node, parent)) = pending.pop() {
        match node.value() {
            HtmlNode::Element(element) => {
                let mirrored = doc.create_element(element.name());
                for (name, value) in element.attrs() {
                    mirrored.set_attribute_value(name, value);
                }
                match parent {
                    Parent::Root(root) => root.append_child(mirrored),
                    Parent::Element(parent) => parent.append_child(mirrored),
                }
                pending.extend(
                    node.children()
                        .rev()
                        .map(|child| (child, Parent::Element(mirrored))),
                );
            }
            HtmlNode::Text(text) => {
                // The document root cannot hold text; html5ever only puts
                // inter-element whitespace there.
                if let Parent::Element(parent) = parent {
                    parent.append_child(doc.create_text(&**text));
                }
            }
            HtmlNode::Comment(comment) => {
                let mirrored = doc.create_comment(&**comment);
                match parent {
                    Parent::Root(root) => root.append_child(mirrored),
                    Parent::Element(parent) => parent.append_child(mirrored),
                }
            }
            _ => {}
        }
    }
}

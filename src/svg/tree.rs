//! Arena-backed SVG tree implementing [`SvgDocument`]

use std::fmt::Write;

use thiserror::Error;

use super::document::SvgDocument;

const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// Errors that can occur when reading an SVG document
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Failed to parse SVG: {0}")]
    Parse(#[from] roxmltree::Error),
}

/// Handle of a node in an [`SvgTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
enum NodeKind {
    Element {
        tag: String,
        attributes: Vec<(String, String)>,
    },
    Text(String),
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// A mutable SVG document.
///
/// Element and text nodes are kept; comments and processing instructions are
/// dropped on parse. Prefixed names (`xlink:href`) keep their prefix and
/// namespace declarations are carried over as plain `xmlns` attributes.
#[derive(Debug, Clone)]
pub struct SvgTree {
    nodes: Vec<NodeData>,
    root: NodeId,
}

impl SvgTree {
    /// Create a document holding an empty `<svg>` canvas
    pub fn new() -> Self {
        Self {
            nodes: vec![NodeData {
                kind: NodeKind::Element {
                    tag: "svg".to_string(),
                    attributes: vec![],
                },
                parent: None,
                children: vec![],
            }],
            root: NodeId(0),
        }
    }

    /// Parse SVG markup. A DOCTYPE declaration is accepted and dropped.
    pub fn parse(text: &str) -> Result<Self, DocumentError> {
        let options = roxmltree::ParsingOptions {
            allow_dtd: true,
            ..Default::default()
        };
        let doc = roxmltree::Document::parse_with_options(text, options)?;
        let mut tree = SvgTree {
            nodes: vec![],
            root: NodeId(0),
        };
        tree.root = tree.import(doc.root_element(), None);
        Ok(tree)
    }

    fn import(&mut self, node: roxmltree::Node<'_, '_>, parent: Option<NodeId>) -> NodeId {
        let mut attributes = Vec::new();

        // Declarations that are new at this element
        for ns in node.namespaces() {
            let inherited = node.parent_element().is_some_and(|p| {
                p.namespaces()
                    .any(|pns| pns.name() == ns.name() && pns.uri() == ns.uri())
            });
            if inherited || ns.uri() == XML_NAMESPACE {
                continue;
            }
            let name = match ns.name() {
                Some(prefix) => format!("xmlns:{}", prefix),
                None => "xmlns".to_string(),
            };
            attributes.push((name, ns.uri().to_string()));
        }

        for attr in node.attributes() {
            let name = qualified_name(&node, attr.namespace(), attr.name());
            attributes.push((name, attr.value().to_string()));
        }

        let tag_name = node.tag_name();
        let id = self.push(
            NodeKind::Element {
                tag: qualified_name(&node, tag_name.namespace(), tag_name.name()),
                attributes,
            },
            parent,
        );

        for child in node.children() {
            if child.is_element() {
                self.import(child, Some(id));
            } else if child.is_text() {
                let text = child.text().unwrap_or_default();
                self.push(NodeKind::Text(text.to_string()), Some(id));
            }
        }

        id
    }

    fn push(&mut self, kind: NodeKind, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            kind,
            parent,
            children: vec![],
        });
        if let Some(parent) = parent {
            self.nodes[parent.0].children.push(id);
        }
        id
    }

    fn data(&self, node: NodeId) -> &NodeData {
        &self.nodes[node.0]
    }

    fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.0].parent.take() {
            self.nodes[parent.0].children.retain(|c| *c != node);
        }
    }

    /// Attached descendants of `node` in document order, excluding `node`
    fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.data(node).children.iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.data(current).children.iter().rev().copied());
        }
        out
    }

    /// Serialize the document back to SVG markup
    pub fn to_svg_string(&self) -> String {
        let mut out = String::new();
        self.write_node(self.root, &mut out);
        out
    }

    fn write_node(&self, node: NodeId, out: &mut String) {
        let data = self.data(node);
        match &data.kind {
            NodeKind::Text(text) => out.push_str(&escape_text(text)),
            NodeKind::Element { tag, attributes } => {
                let _ = write!(out, "<{}", tag);
                for (name, value) in attributes {
                    let _ = write!(out, " {}=\"{}\"", name, escape_attribute(value));
                }
                if data.children.is_empty() {
                    out.push_str("/>");
                } else {
                    out.push('>');
                    for child in &data.children {
                        self.write_node(*child, out);
                    }
                    let _ = write!(out, "</{}>", tag);
                }
            }
        }
    }
}

impl Default for SvgTree {
    fn default() -> Self {
        Self::new()
    }
}

impl SvgDocument for SvgTree {
    type Node = NodeId;

    fn root(&self) -> NodeId {
        self.root
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        std::iter::once(self.root)
            .chain(self.descendants(self.root))
            .find(|n| self.attribute(*n, "id") == Some(id))
    }

    fn elements_by_tag(&self, node: NodeId, tag: &str) -> Vec<NodeId> {
        self.descendants(node)
            .into_iter()
            .filter(|n| matches!(&self.data(*n).kind, NodeKind::Element { tag: t, .. } if t == tag))
            .collect()
    }

    fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(
            NodeKind::Element {
                tag: tag.to_string(),
                attributes: vec![],
            },
            None,
        )
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    fn remove(&mut self, node: NodeId) {
        self.detach(node);
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        match &self.data(node).kind {
            NodeKind::Element { attributes, .. } => attributes
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, v)| v.as_str()),
            NodeKind::Text(_) => None,
        }
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let NodeKind::Element { attributes, .. } = &mut self.nodes[node.0].kind {
            match attributes.iter_mut().find(|(n, _)| n == name) {
                Some((_, existing)) => *existing = value.to_string(),
                None => attributes.push((name.to_string(), value.to_string())),
            }
        }
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.data(node).parent
    }

    fn tag_name(&self, node: NodeId) -> &str {
        match &self.data(node).kind {
            NodeKind::Element { tag, .. } => tag,
            NodeKind::Text(_) => "",
        }
    }

    fn text_content(&self, node: NodeId) -> String {
        if let NodeKind::Text(text) = &self.data(node).kind {
            return text.clone();
        }
        self.descendants(node)
            .into_iter()
            .filter_map(|n| match &self.data(n).kind {
                NodeKind::Text(text) => Some(text.as_str()),
                NodeKind::Element { .. } => None,
            })
            .collect()
    }

    fn set_text_content(&mut self, node: NodeId, text: &str) {
        for child in std::mem::take(&mut self.nodes[node.0].children) {
            self.nodes[child.0].parent = None;
        }
        if !text.is_empty() {
            self.push(NodeKind::Text(text.to_string()), Some(node));
        }
    }
}

fn qualified_name(node: &roxmltree::Node<'_, '_>, namespace: Option<&str>, name: &str) -> String {
    let prefix = match namespace {
        Some(XML_NAMESPACE) => Some("xml"),
        Some(uri) => node.lookup_prefix(uri),
        None => None,
    };
    match prefix {
        Some(prefix) => format!("{}:{}", prefix, name),
        None => name.to_string(),
    }
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attribute(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}

//! The document surface the poster mutations need

use std::fmt::Debug;
use std::hash::Hash;

/// DOM operations consumed by line placement and label scaling.
///
/// Node handles are cheap copies that stay valid for the lifetime of the
/// document, so they can key side tables such as the original attribute
/// store.
pub trait SvgDocument {
    type Node: Copy + Eq + Hash + Debug;

    /// The root `<svg>` canvas
    fn root(&self) -> Self::Node;

    /// First attached element whose `id` attribute equals `id`
    fn element_by_id(&self, id: &str) -> Option<Self::Node>;

    /// Descendants of `node` with tag `tag`, in document order
    fn elements_by_tag(&self, node: Self::Node, tag: &str) -> Vec<Self::Node>;

    /// Create a detached element
    fn create_element(&mut self, tag: &str) -> Self::Node;

    /// Append `child` as the last child of `parent`, detaching it first if needed
    fn append_child(&mut self, parent: Self::Node, child: Self::Node);

    /// Detach `node` and its subtree from the document
    fn remove(&mut self, node: Self::Node);

    fn attribute(&self, node: Self::Node, name: &str) -> Option<&str>;

    fn set_attribute(&mut self, node: Self::Node, name: &str, value: &str);

    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    fn tag_name(&self, node: Self::Node) -> &str;

    /// Concatenated text of all descendant text nodes
    fn text_content(&self, node: Self::Node) -> String;

    /// Replace all children of `node` with a single text node
    fn set_text_content(&mut self, node: Self::Node, text: &str);

    /// Short human readable reference to a node, for error messages
    fn describe(&self, node: Self::Node) -> String {
        match self.attribute(node, "id") {
            Some(id) => format!("<{} id=\"{}\">", self.tag_name(node), id),
            None => format!("<{}>", self.tag_name(node)),
        }
    }
}

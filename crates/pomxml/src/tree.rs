//! Configuration trees: schema-less element content captured as nodes.
//!
//! Plugin `<configuration>` blocks have no fixed schema, so their content is
//! captured generically. Nodes live in an arena owned by [`Configuration`]
//! and refer to each other by [`NodeId`]; a parent owns its children through
//! the `children` list, while the `parent` link is only a back-reference
//! used for traversal.
//!
//! # Examples
//!
//! ```
//! use pomxml::Configuration;
//! # fn main() -> pomxml::Result<()> {
//! let tree = Configuration::from_fragment(
//!     r#"<transformers><transformer implementation="Foo"/></transformers>"#,
//! )?;
//! let transformer = tree.find_path(&["transformers", "transformer"]).unwrap();
//! assert_eq!(tree.node(transformer).unwrap().attribute("implementation"), Some("Foo"));
//! # Ok(())
//! # }
//! ```

use tracing::debug;

use crate::error::Result;
use crate::xml::escape::{escape_attribute, escape_text};
use crate::xml::writer::check_name;
use crate::xml::{Attribute, Config, Event, Reader, StartTag, Writer};

/// Index of a node inside its [`Configuration`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// One captured element
#[derive(Debug, Clone)]
pub struct Node {
    /// Local name
    pub name: String,
    pub prefix: Option<String>,
    /// Attributes in document order
    pub attributes: Vec<Attribute>,
    /// Trimmed character data; only the last text run seen at this level is kept
    pub text: String,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

impl Node {
    fn new(name: impl Into<String>, parent: Option<NodeId>) -> Self {
        Self {
            name: name.into(),
            prefix: None,
            attributes: Vec::new(),
            text: String::new(),
            children: Vec::new(),
            parent,
        }
    }

    fn from_tag(tag: StartTag, parent: Option<NodeId>) -> Self {
        Self {
            name: tag.name.local,
            prefix: tag.name.prefix,
            attributes: tag.attributes,
            text: String::new(),
            children: Vec::new(),
            parent,
        }
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Value of the first attribute with the given local name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    /// The element name as written in markup
    pub fn qualified_name(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}:{}", self.name),
            None => self.name.clone(),
        }
    }
}

/// Ordered sequence of root nodes captured from one element's content
#[derive(Debug, Clone, Default)]
pub struct Configuration {
    /// Attributes of the enclosing element, e.g. `combine.children`
    pub attributes: Vec<Attribute>,
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
}

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode nodes from `reader`.
    ///
    /// The reader is expected to sit just after the start tag of the
    /// enclosing element. Decoding stops once that element's end tag has been
    /// consumed, or at end of input when reading a bare fragment.
    pub fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        let mut tree = Self::new();
        let mut current: Option<NodeId> = None;

        while let Some(event) = reader.next_event()? {
            match event {
                Event::Start(tag) => {
                    let id = tree.push(Node::from_tag(tag, current));
                    current = Some(id);
                }
                Event::Text(text) => {
                    if let Some(node) = current.and_then(|id| tree.nodes.get_mut(id.0)) {
                        node.text = text.trim().to_string();
                    }
                }
                Event::End(_) => match current {
                    Some(id) => current = tree.parent(id),
                    None => break,
                },
                Event::Comment(_) | Event::ProcessingInstruction { .. } | Event::Doctype(_) => {}
            }
        }

        debug!(
            roots = tree.roots.len(),
            nodes = tree.nodes.len(),
            "decoded configuration tree"
        );
        Ok(tree)
    }

    /// Decode a standalone markup fragment
    pub fn from_fragment(fragment: &str) -> Result<Self> {
        Self::from_fragment_with_config(fragment, Config::default())
    }

    /// Decode a standalone markup fragment with custom reader limits
    pub fn from_fragment_with_config(fragment: &str, config: Config) -> Result<Self> {
        let mut reader = Reader::with_config(fragment.as_bytes(), config);
        Self::decode(&mut reader)
    }

    /// Render every root to its own fragment and join them with newlines.
    ///
    /// Fails with [`ErrorKind::InvalidName`](crate::ErrorKind::InvalidName) when a node or attribute name
    /// could not be read back as markup.
    pub fn to_fragment(&self) -> Result<String> {
        let mut out = String::new();
        for (i, root) in self.roots.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            self.render_into(*root, &mut out)?;
        }
        Ok(out)
    }

    /// Write this tree as the content of element `name`
    pub fn encode(&self, name: &str, writer: &mut Writer) -> Result<()> {
        let fragment = self.to_fragment()?;
        writer.start(name, &self.attributes)?;
        writer.embed(&fragment);
        writer.end()?;
        debug!(element = name, roots = self.roots.len(), "encoded configuration tree");
        Ok(())
    }

    /// Markup for a single node and its subtree
    pub fn render(&self, id: NodeId) -> Result<String> {
        let mut out = String::new();
        self.render_into(id, &mut out)?;
        Ok(out)
    }

    /// Markup for the content of a node, without its own tags
    pub fn inner_markup(&self, id: NodeId) -> Result<String> {
        let mut out = String::new();
        if let Some(node) = self.node(id) {
            for child in &node.children {
                self.render_into(*child, &mut out)?;
            }
            out.push_str(&escape_text(&node.text));
        }
        Ok(out)
    }

    fn render_into(&self, id: NodeId, out: &mut String) -> Result<()> {
        let Some(node) = self.node(id) else {
            return Ok(());
        };
        let name = node.qualified_name();
        check_name(&name)?;
        out.push('<');
        out.push_str(&name);
        for attr in &node.attributes {
            let attr_name = attr.qualified_name();
            check_name(&attr_name)?;
            out.push(' ');
            out.push_str(&attr_name);
            out.push_str("=\"");
            out.push_str(&escape_attribute(&attr.value));
            out.push('"');
        }
        if node.children.is_empty() && node.text.is_empty() {
            out.push_str("/>");
            return Ok(());
        }
        out.push('>');
        for child in &node.children {
            self.render_into(*child, out)?;
        }
        out.push_str(&escape_text(&node.text));
        out.push_str("</");
        out.push_str(&name);
        out.push('>');
        Ok(())
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Iterate over the root nodes in document order
    pub fn root_nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.roots.iter().filter_map(|id| self.node(*id))
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Mutable access to a node's name, attributes and text
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(Node::parent)
    }

    /// Iterate from `id` up through its ancestors
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.node(id).map(|_| id),
        }
    }

    /// First root with the given local name
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.first_named(&self.roots, name)
    }

    /// First child of `parent` with the given local name
    pub fn child(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.node(parent)
            .and_then(|node| self.first_named(&node.children, name))
    }

    /// Follow local names from the roots down, taking the first match at each level
    pub fn find_path(&self, path: &[&str]) -> Option<NodeId> {
        let (first, rest) = path.split_first()?;
        rest.iter()
            .try_fold(self.find(first)?, |id, name| self.child(id, name))
    }

    fn first_named(&self, ids: &[NodeId], name: &str) -> Option<NodeId> {
        ids.iter()
            .copied()
            .find(|id| self.node(*id).is_some_and(|node| node.name == name))
    }

    /// Append a new root element
    pub fn add_root(&mut self, name: impl Into<String>) -> NodeId {
        self.push(Node::new(name, None))
    }

    /// Append a new child element to `parent`; `None` if `parent` is not in this tree
    pub fn add_child(&mut self, parent: NodeId, name: impl Into<String>) -> Option<NodeId> {
        self.node(parent)?;
        Some(self.push(Node::new(name, Some(parent))))
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        let parent = node.parent;
        self.nodes.push(node);
        match parent.and_then(|p| self.nodes.get_mut(p.0)) {
            Some(parent) => parent.children.push(id),
            None => self.roots.push(id),
        }
        id
    }

    /// Number of nodes at every level
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// True when no element was captured
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Flattened name-to-value view of the roots.
    #[deprecated(note = "walk the node tree instead")]
    pub fn legacy_entries(&self) -> crate::legacy::LegacyMap {
        crate::legacy::flatten(self)
    }

    fn subtree_eq(&self, id: NodeId, other: &Self, other_id: NodeId) -> bool {
        let (Some(a), Some(b)) = (self.node(id), other.node(other_id)) else {
            return false;
        };
        a.name == b.name
            && a.prefix == b.prefix
            && a.attributes == b.attributes
            && a.text == b.text
            && a.children.len() == b.children.len()
            && a.children
                .iter()
                .zip(&b.children)
                .all(|(x, y)| self.subtree_eq(*x, other, *y))
    }
}

/// Structural equality: names, attributes in order, text and child order.
/// Arena layout is not compared.
impl PartialEq for Configuration {
    fn eq(&self, other: &Self) -> bool {
        self.attributes == other.attributes
            && self.roots.len() == other.roots.len()
            && self
                .roots
                .iter()
                .zip(&other.roots)
                .all(|(a, b)| self.subtree_eq(*a, other, *b))
    }
}

/// Iterator over a node and its ancestors
pub struct Ancestors<'a> {
    tree: &'a Configuration,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.tree.parent(current);
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, ErrorKind, Span};

    fn missing(what: &str) -> Error {
        Error::with_message(ErrorKind::InvalidToken, Span::empty(), format!("missing {what}"))
    }

    #[test]
    fn test_decode_nested_capture() -> Result<()> {
        let tree = Configuration::from_fragment(
            r#"<transformers><transformer implementation="Foo"><resource>META-INF/spring.handlers</resource></transformer></transformers>"#,
        )?;
        assert_eq!(tree.roots().len(), 1);
        let transformers = tree.find("transformers").ok_or_else(|| missing("root"))?;
        let transformer = tree
            .child(transformers, "transformer")
            .ok_or_else(|| missing("transformer"))?;
        let resource = tree
            .child(transformer, "resource")
            .ok_or_else(|| missing("resource"))?;

        let node = tree.node(transformer).ok_or_else(|| missing("node"))?;
        assert_eq!(node.attributes, vec![Attribute::new("implementation", "Foo")]);
        assert_eq!(
            tree.node(resource).map(|n| n.text.as_str()),
            Some("META-INF/spring.handlers")
        );
        Ok(())
    }

    #[test]
    fn test_parent_links_match_children() -> Result<()> {
        let tree = Configuration::from_fragment("<a><b><c/></b><d/></a><e/>")?;
        for (index, node) in tree.nodes.iter().enumerate() {
            for child in node.children() {
                assert_eq!(tree.parent(*child), Some(NodeId(index)));
            }
        }
        let c = tree.find_path(&["a", "b", "c"]).ok_or_else(|| missing("c"))?;
        let names: Vec<&str> = tree
            .ancestors(c)
            .filter_map(|id| tree.node(id).map(|n| n.name.as_str()))
            .collect();
        assert_eq!(names, vec!["c", "b", "a"]);
        assert_eq!(tree.parent(tree.find("e").ok_or_else(|| missing("e"))?), None);
        Ok(())
    }

    #[test]
    fn test_whitespace_only_text_collapses() -> Result<()> {
        let tree = Configuration::from_fragment("<a>\n   \n</a>")?;
        assert_eq!(tree.root_nodes().next().map(|n| n.text.as_str()), Some(""));
        Ok(())
    }

    #[test]
    fn test_later_text_overwrites_earlier() -> Result<()> {
        let tree = Configuration::from_fragment("<a>first<b/>second</a>")?;
        assert_eq!(tree.root_nodes().next().map(|n| n.text.as_str()), Some("second"));

        let tree = Configuration::from_fragment("<a>kept<b/>\n</a>")?;
        assert_eq!(tree.root_nodes().next().map(|n| n.text.as_str()), Some(""));
        Ok(())
    }

    #[test]
    fn test_decode_stops_at_enclosing_end_tag() -> Result<()> {
        let mut reader = Reader::from_str("<configuration><skip>true</skip></configuration><next/>");
        reader.next_event()?;
        let tree = Configuration::decode(&mut reader)?;
        assert_eq!(tree.to_fragment()?, "<skip>true</skip>");
        assert_eq!(reader.depth(), 0);
        assert!(matches!(reader.next_event()?, Some(Event::Start(tag)) if tag.name.local == "next"));
        Ok(())
    }

    #[test]
    fn test_render_orders_children_then_text() -> Result<()> {
        let mut tree = Configuration::new();
        let root = tree.add_root("a");
        let child = tree.add_child(root, "b").ok_or_else(|| missing("b"))?;
        if let Some(node) = tree.node_mut(root) {
            node.text = "x & y".to_string();
            node.attributes.push(Attribute::new("k", "\"v\""));
        }
        assert_eq!(tree.render(child)?, "<b/>");
        assert_eq!(tree.render(root)?, r#"<a k="&quot;v&quot;"><b/>x &amp; y</a>"#);
        assert_eq!(tree.inner_markup(root)?, "<b/>x &amp; y");
        Ok(())
    }

    #[test]
    fn test_fragment_joins_roots_with_newline() -> Result<()> {
        let tree = Configuration::from_fragment("<a/>  <b>1</b>")?;
        assert_eq!(tree.to_fragment()?, "<a/>\n<b>1</b>");
        Ok(())
    }

    #[test]
    fn test_encode_inside_enclosing_tags() -> Result<()> {
        let mut tree = Configuration::from_fragment("<note>a &lt; b</note>")?;
        tree.attributes.push(Attribute::new("combine.children", "append"));
        let mut writer = Writer::new();
        tree.encode("configuration", &mut writer)?;
        assert_eq!(
            writer.finish()?,
            r#"<configuration combine.children="append"><note>a &lt; b</note></configuration>"#
        );
        Ok(())
    }

    #[test]
    fn test_invalid_names_not_rendered() {
        let mut tree = Configuration::new();
        tree.add_root("not valid");
        assert!(matches!(
            tree.to_fragment().as_ref().map_err(Error::kind),
            Err(ErrorKind::InvalidName { name }) if name == "not valid"
        ));

        let mut tree = Configuration::new();
        let entry = tree.add_root("entry");
        if let Some(node) = tree.node_mut(entry) {
            node.attributes.push(Attribute::new("bad attr", "v"));
        }
        let mut writer = Writer::new();
        assert!(matches!(
            tree.encode("configuration", &mut writer).as_ref().map_err(Error::kind),
            Err(ErrorKind::InvalidName { name }) if name == "bad attr"
        ));
    }

    #[test]
    fn test_structural_equality_ignores_arena_layout() -> Result<()> {
        let parsed = Configuration::from_fragment("<a><b/></a><c/>")?;
        let mut built = Configuration::new();
        let a = built.add_root("a");
        built.add_root("c");
        built.add_child(a, "b");
        assert_eq!(parsed, built);

        if let Some(node) = built.node_mut(a) {
            node.text = "changed".to_string();
        }
        assert_ne!(parsed, built);
        Ok(())
    }

    #[test]
    fn test_unclosed_fragment_is_error_not_partial_tree() {
        let result = Configuration::from_fragment("<a><b>text</b>");
        assert!(result.as_ref().is_err_and(Error::is_malformed_stream));
    }

    #[test]
    fn test_add_child_to_unknown_parent() {
        let mut tree = Configuration::new();
        assert_eq!(tree.add_child(NodeId(7), "x"), None);
        assert!(tree.is_empty());
    }
}

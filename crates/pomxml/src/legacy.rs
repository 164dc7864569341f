//! Flattened name-to-value view of a configuration tree.
//!
//! Older callers read configuration blocks as a plain map from element name
//! to either text or a nested map. The view is rebuilt on demand by
//! re-parsing each root's inner markup on its own; it is never stored and the
//! node tree stays authoritative.
//!
//! Nested maps follow the usual XML-to-map conventions: attributes appear
//! under `-name`, text next to child elements under `#text`, and repeated
//! sibling names collect into a list.

use indexmap::IndexMap;
use tracing::warn;

use crate::tree::{Configuration, NodeId};

/// Map from element name to value, in first-seen order
pub type LegacyMap = IndexMap<String, LegacyValue>;

/// Key prefix for attributes inside a nested map
pub const ATTRIBUTE_PREFIX: char = '-';
/// Key for text that sits next to child elements
pub const TEXT_KEY: &str = "#text";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LegacyValue {
    Text(String),
    Nested(LegacyMap),
    /// Values of sibling elements sharing a name
    List(Vec<LegacyValue>),
}

impl LegacyValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_nested(&self) -> Option<&LegacyMap> {
        match self {
            Self::Nested(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }
}

/// One entry per root of `tree`, keyed by the root's local name.
/// A later root with a repeated name replaces the earlier entry.
pub fn flatten(tree: &Configuration) -> LegacyMap {
    let mut entries = LegacyMap::new();
    for id in tree.roots() {
        if let Some(node) = tree.node(*id) {
            let value = match tree.inner_markup(*id) {
                Ok(inner) => entry_value(&inner),
                Err(err) => {
                    warn!(%err, element = %node.name, "inner markup could not be rendered, keeping text");
                    LegacyValue::Text(node.text.clone())
                }
            };
            entries.insert(node.name.clone(), value);
        }
    }
    entries
}

/// Value for one element given its inner markup.
///
/// Markup that parses and holds at least one element becomes
/// [`LegacyValue::Nested`]; anything else, including markup that fails to
/// parse, is kept as the trimmed raw text.
pub fn entry_value(inner: &str) -> LegacyValue {
    match Configuration::from_fragment(inner) {
        Ok(fragment) if !fragment.is_empty() => LegacyValue::Nested(fragment_map(&fragment)),
        Ok(_) => LegacyValue::Text(inner.trim().to_string()),
        Err(err) => {
            warn!(%err, "inner markup could not be re-parsed, keeping raw text");
            LegacyValue::Text(inner.trim().to_string())
        }
    }
}

fn fragment_map(fragment: &Configuration) -> LegacyMap {
    let mut map = LegacyMap::new();
    for id in fragment.roots() {
        if let Some(node) = fragment.node(*id) {
            insert_or_collect(&mut map, &node.name, node_value(fragment, *id));
        }
    }
    map
}

fn node_value(tree: &Configuration, id: NodeId) -> LegacyValue {
    let Some(node) = tree.node(id) else {
        return LegacyValue::Text(String::new());
    };
    if node.attributes.is_empty() && node.children().is_empty() {
        return LegacyValue::Text(node.text.clone());
    }

    let mut map = LegacyMap::new();
    for attr in &node.attributes {
        map.insert(
            format!("{ATTRIBUTE_PREFIX}{}", attr.name),
            LegacyValue::Text(attr.value.clone()),
        );
    }
    if !node.text.is_empty() {
        map.insert(TEXT_KEY.to_string(), LegacyValue::Text(node.text.clone()));
    }
    for child in node.children() {
        if let Some(child_node) = tree.node(*child) {
            insert_or_collect(&mut map, &child_node.name, node_value(tree, *child));
        }
    }
    LegacyValue::Nested(map)
}

fn insert_or_collect(map: &mut LegacyMap, key: &str, value: LegacyValue) {
    match map.get_mut(key) {
        Some(LegacyValue::List(items)) => items.push(value),
        Some(existing) => {
            let first = std::mem::replace(existing, LegacyValue::List(Vec::new()));
            *existing = LegacyValue::List(vec![first, value]);
        }
        None => {
            map.insert(key.to_string(), value);
        }
    }
}

//! Ordered properties blocks.
//!
//! A `<properties>` block is a flat list of child elements whose names are
//! the keys. Order matters to tools that resolve later properties against
//! earlier ones, so entries keep first-seen order and an update never moves
//! an entry.

use indexmap::IndexMap;
use tracing::debug;

use crate::error::Result;
use crate::xml::{Config, Event, Reader, Writer};

/// Insertion-ordered key/value text entries with O(1) expected lookup
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OrderedProperties {
    entries: IndexMap<String, String>,
}

impl OrderedProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode one entry per direct child element.
    ///
    /// The reader is expected to sit just after the start tag of the
    /// enclosing element; decoding stops once that element's end tag has been
    /// consumed, or at end of input when reading a bare fragment. Values are
    /// trimmed; a repeated key overwrites the earlier value in place.
    pub fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        let mut properties = Self::new();
        while let Some(event) = reader.next_event()? {
            match event {
                Event::Start(tag) => {
                    let value = reader.read_text()?;
                    properties.set(tag.name.local, value.trim());
                }
                Event::End(_) => break,
                Event::Text(_)
                | Event::Comment(_)
                | Event::ProcessingInstruction { .. }
                | Event::Doctype(_) => {}
            }
        }
        debug!(entries = properties.len(), "decoded properties");
        Ok(properties)
    }

    /// Decode a standalone run of entry elements
    pub fn from_fragment(fragment: &str) -> Result<Self> {
        let mut reader = Reader::with_config(fragment.as_bytes(), Config::default());
        Self::decode(&mut reader)
    }

    /// Write the entries wrapped in element `name`
    pub fn encode(&self, name: &str, writer: &mut Writer) -> Result<()> {
        writer.start(name, &[])?;
        self.encode_entries(writer)?;
        writer.end()?;
        debug!(element = name, entries = self.len(), "encoded properties");
        Ok(())
    }

    /// Write one element per entry, in order
    pub fn encode_entries(&self, writer: &mut Writer) -> Result<()> {
        for (key, value) in &self.entries {
            writer.text_element(key, value)?;
        }
        Ok(())
    }

    /// Entries as compact markup, without an enclosing element
    pub fn to_fragment(&self) -> Result<String> {
        let mut writer = Writer::new();
        self.encode_entries(&mut writer)?;
        writer.finish()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Set `key`, returning the previous value. An existing key keeps its position.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    /// Remove `key`, keeping the order of the remaining entries
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.shift_remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for OrderedProperties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut properties = Self::new();
        properties.extend(iter);
        properties
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for OrderedProperties {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}

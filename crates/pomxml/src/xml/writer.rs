//! Markup writer

use crate::error::{Error, ErrorKind, Result, Span};
use crate::xml::escape::{escape_attribute, escape_for_embedding, escape_text, undo_embedding_escape};
use crate::xml::event::Attribute;
use crate::xml::reader::is_valid_name;

/// XML declaration written ahead of a full document
pub const XML_HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

#[derive(Debug)]
struct OpenElement {
    name: String,
    has_child_elements: bool,
}

/// Incremental markup writer.
///
/// When indentation is enabled every start tag goes on its own line, and an
/// end tag does too when its element contained child elements; character
/// data is always written inline.
#[derive(Debug, Default)]
pub struct Writer {
    out: String,
    indent: Option<String>,
    open: Vec<OpenElement>,
}

impl Writer {
    /// Compact writer
    pub fn new() -> Self {
        Self::default()
    }

    /// Writer that indents nested start tags with `indent` per level
    pub fn indented(indent: impl Into<String>) -> Self {
        Self {
            indent: Some(indent.into()),
            ..Self::default()
        }
    }

    /// Write the XML declaration
    pub fn declaration(&mut self) {
        self.out.push_str(XML_HEADER);
        self.out.push('\n');
    }

    /// Open an element
    pub fn start(&mut self, name: &str, attributes: &[Attribute]) -> Result<()> {
        check_name(name)?;
        self.newline_and_indent(self.open.len());
        if let Some(parent) = self.open.last_mut() {
            parent.has_child_elements = true;
        }

        self.out.push('<');
        self.out.push_str(name);
        for attr in attributes {
            let qualified = attr.qualified_name();
            check_name(&qualified)?;
            self.out.push(' ');
            self.out.push_str(&qualified);
            self.out.push_str("=\"");
            self.out.push_str(&escape_attribute(&attr.value));
            self.out.push('"');
        }
        self.out.push('>');

        self.open.push(OpenElement {
            name: name.to_string(),
            has_child_elements: false,
        });
        Ok(())
    }

    /// Write escaped character data
    pub fn text(&mut self, value: &str) {
        self.out.push_str(&escape_text(value));
    }

    /// Write a markup payload through the character-data path.
    ///
    /// The payload is encoded as character data and the encoding is then
    /// undone exactly once, so the payload lands in the output verbatim.
    pub fn embed(&mut self, payload: &str) {
        let encoded = escape_for_embedding(payload);
        self.out.push_str(&undo_embedding_escape(&encoded));
    }

    /// Close the innermost open element
    pub fn end(&mut self) -> Result<()> {
        let Some(element) = self.open.pop() else {
            return Err(Error::with_message(
                ErrorKind::InvalidToken,
                Span::empty(),
                "end tag written with no open element",
            ));
        };
        if element.has_child_elements {
            self.newline_and_indent(self.open.len());
        }
        self.out.push_str("</");
        self.out.push_str(&element.name);
        self.out.push('>');
        Ok(())
    }

    /// Write `<name>value</name>`
    pub fn text_element(&mut self, name: &str, value: &str) -> Result<()> {
        self.start(name, &[])?;
        self.text(value);
        self.end()
    }

    /// Number of currently open elements
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    /// Return the written markup; every element must be closed
    pub fn finish(self) -> Result<String> {
        if let Some(element) = self.open.last() {
            return Err(Error::with_message(
                ErrorKind::UnexpectedEof,
                Span::empty(),
                format!("element <{}> was never closed", element.name),
            ));
        }
        Ok(self.out)
    }

    fn newline_and_indent(&mut self, depth: usize) {
        let Some(indent) = &self.indent else {
            return;
        };
        if !self.out.is_empty() && !self.out.ends_with('\n') {
            self.out.push('\n');
        }
        for _ in 0..depth {
            self.out.push_str(indent);
        }
    }
}

pub(crate) fn check_name(name: &str) -> Result<()> {
    if is_valid_name(name) {
        Ok(())
    } else {
        Err(Error::new(
            ErrorKind::InvalidName {
                name: name.to_string(),
            },
            Span::empty(),
        ))
    }
}

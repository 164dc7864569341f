//! Markup streaming events

use std::fmt;

/// An element or attribute name split at its namespace prefix
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct QName {
    pub prefix: Option<String>,
    pub local: String,
}

impl QName {
    /// A name without prefix
    pub fn local(local: impl Into<String>) -> Self {
        Self {
            prefix: None,
            local: local.into(),
        }
    }

    /// Split `raw` at its first colon. Names with an empty side stay unsplit.
    pub fn parse(raw: &str) -> Self {
        match raw.split_once(':') {
            Some((prefix, local)) if !prefix.is_empty() && !local.is_empty() => Self {
                prefix: Some(prefix.to_string()),
                local: local.to_string(),
            },
            _ => Self::local(raw),
        }
    }

    /// The name as written in markup
    pub fn qualified(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.prefix {
            Some(prefix) => write!(f, "{prefix}:{}", self.local),
            None => f.write_str(&self.local),
        }
    }
}

/// An attribute in document order
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub prefix: Option<String>,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prefix: None,
            value: value.into(),
        }
    }

    pub(crate) fn from_qname(name: QName, value: String) -> Self {
        Self {
            name: name.local,
            prefix: name.prefix,
            value,
        }
    }

    /// The attribute name as written in markup
    pub fn qualified_name(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}:{}", self.name),
            None => self.name.clone(),
        }
    }
}

/// An element start tag
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StartTag {
    pub name: QName,
    pub attributes: Vec<Attribute>,
}

impl StartTag {
    /// Value of the first attribute with the given local name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }
}

/// Events emitted by the streaming markup reader
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Element start; a self-closing element is followed by a synthesized `End`
    Start(StartTag),
    End(QName),
    /// One run of decoded character data, or one CDATA section
    Text(String),
    Comment(String),
    /// Processing instruction, including the `<?xml ...?>` declaration
    ProcessingInstruction { target: String, data: String },
    Doctype(String),
}

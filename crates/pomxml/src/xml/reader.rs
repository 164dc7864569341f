//! Streaming pull reader over markup bytes

use crate::error::{Error, ErrorKind, Pos, Result};
use crate::lexer::Cursor;
use crate::xml::escape::decode_entities;
use crate::xml::event::{Attribute, Event, QName, StartTag};

/// Limits applied by the reader
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Maximum element nesting depth (0 means unlimited)
    pub max_depth: u16,
    /// Maximum input size in bytes (0 means unlimited)
    pub max_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_depth: 256,
            max_size: 16 * 1024 * 1024, // 16 MiB default
        }
    }
}

impl Config {
    /// Create a new config with unlimited depth and size
    pub const fn unlimited() -> Self {
        Self {
            max_depth: 0,
            max_size: 0,
        }
    }

    /// Create a new config with specific limits
    pub const fn new(max_depth: u16, max_size: usize) -> Self {
        Self {
            max_depth,
            max_size,
        }
    }
}

/// Pull reader producing one [`Event`] per call.
///
/// Both documents and fragments are accepted: several top-level elements and
/// top-level text are fine. Tag balance is checked as the stream is consumed,
/// and running out of input with elements still open is an error.
#[derive(Debug)]
pub struct Reader<'a> {
    cursor: Cursor<'a>,
    config: Config,
    input_len: usize,
    /// Names of the currently open elements, innermost last
    open: Vec<QName>,
    /// End event owed for a self-closing element
    pending_end: Option<QName>,
}

impl<'a> Reader<'a> {
    /// Create a new reader with default configuration
    pub fn new(input: &'a [u8]) -> Self {
        Self::with_config(input, Config::default())
    }

    /// Create a new reader with custom configuration
    pub fn with_config(input: &'a [u8], config: Config) -> Self {
        let input = input.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(input);
        Self {
            cursor: Cursor::new(input),
            config,
            input_len: input.len(),
            open: Vec::new(),
            pending_end: None,
        }
    }

    /// Create a reader over a string
    pub fn from_str(input: &'a str) -> Self {
        Self::new(input.as_bytes())
    }

    /// Number of currently open elements
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    /// Current position in the input
    pub const fn position(&self) -> Pos {
        self.cursor.position()
    }

    /// Get the next event, or `None` at end of input
    pub fn next_event(&mut self) -> Result<Option<Event>> {
        if self.config.max_size > 0 && self.input_len > self.config.max_size {
            return Err(self.error_here(ErrorKind::MaxSizeExceeded {
                max: self.config.max_size,
            }));
        }

        if let Some(name) = self.pending_end.take() {
            return Ok(Some(Event::End(name)));
        }

        let Some(current) = self.cursor.current() else {
            return match self.open.last() {
                Some(name) => {
                    let message = format!("unexpected end of input inside <{name}>");
                    Err(self.error_with_message(ErrorKind::UnexpectedEof, message))
                }
                None => Ok(None),
            };
        };

        if current != b'<' {
            return self.parse_text().map(Some);
        }

        let event = if self.cursor.starts_with(b"<!--") {
            self.parse_comment()?
        } else if self.cursor.starts_with(b"<![CDATA[") {
            self.parse_cdata()?
        } else if self.cursor.starts_with(b"<!DOCTYPE") {
            self.parse_doctype()?
        } else if self.cursor.starts_with(b"<?") {
            self.parse_processing_instruction()?
        } else if self.cursor.starts_with(b"</") {
            self.parse_end_tag()?
        } else if self.cursor.peek(1) == Some(b'!') {
            return Err(self.error_here(ErrorKind::InvalidToken));
        } else {
            self.parse_start_tag()?
        };
        Ok(Some(event))
    }

    /// Collect the character data directly inside the element whose start tag
    /// was just returned, skipping nested elements, and consume its end tag.
    pub fn read_text(&mut self) -> Result<String> {
        let mut text = String::new();
        let mut depth = 0usize;
        loop {
            match self.next_event()? {
                Some(Event::Text(run)) if depth == 0 => text.push_str(&run),
                Some(Event::Start(_)) => depth += 1,
                Some(Event::End(_)) => {
                    if depth == 0 {
                        return Ok(text);
                    }
                    depth -= 1;
                }
                Some(_) => {}
                None => return Err(self.error_here(ErrorKind::UnexpectedEof)),
            }
        }
    }

    /// Consume everything up to and including the end tag of the element
    /// whose start tag was just returned.
    pub fn skip_element(&mut self) -> Result<()> {
        let mut depth = 0usize;
        loop {
            match self.next_event()? {
                Some(Event::Start(_)) => depth += 1,
                Some(Event::End(_)) => {
                    if depth == 0 {
                        return Ok(());
                    }
                    depth -= 1;
                }
                Some(_) => {}
                None => return Err(self.error_here(ErrorKind::UnexpectedEof)),
            }
        }
    }

    fn parse_text(&mut self) -> Result<Event> {
        let start = self.cursor.pos();
        while let Some(b) = self.cursor.current() {
            if b == b'<' {
                break;
            }
            self.cursor.advance();
        }
        let raw = self.to_str(self.cursor.slice_from(start))?;
        let text = decode_entities(raw).map_err(|kind| self.error_here(kind))?;
        Ok(Event::Text(text.into_owned()))
    }

    fn parse_start_tag(&mut self) -> Result<Event> {
        self.cursor.advance(); // '<'
        let name = QName::parse(&self.parse_name()?);
        let mut attributes: Vec<Attribute> = Vec::new();

        let self_closing = loop {
            let had_space = self.skip_whitespace();
            match self.cursor.current() {
                Some(b'>') => {
                    self.cursor.advance();
                    break false;
                }
                Some(b'/') => {
                    if !self.cursor.consume_bytes(b"/>") {
                        return Err(self.error_here(ErrorKind::InvalidToken));
                    }
                    break true;
                }
                None => {
                    let message = format!("unterminated start tag <{name}");
                    return Err(self.error_with_message(ErrorKind::UnexpectedEof, message));
                }
                Some(_) if !had_space => {
                    return Err(self.error_here(ErrorKind::InvalidToken));
                }
                Some(_) => {}
            }

            let attr_pos = self.cursor.position();
            let attr_name = QName::parse(&self.parse_name()?);
            self.skip_whitespace();
            if !self.cursor.consume(b'=') {
                return Err(self.error_here(ErrorKind::InvalidToken));
            }
            self.skip_whitespace();
            let value = self.parse_attribute_value()?;

            if attributes
                .iter()
                .any(|a| a.name == attr_name.local && a.prefix == attr_name.prefix)
            {
                return Err(Error::at(
                    ErrorKind::DuplicateAttribute {
                        name: attr_name.qualified(),
                    },
                    attr_pos,
                ));
            }
            attributes.push(Attribute::from_qname(attr_name, value));
        };

        if self.config.max_depth > 0 && self.open.len() >= usize::from(self.config.max_depth) {
            return Err(self.error_here(ErrorKind::MaxDepthExceeded {
                max: self.config.max_depth,
            }));
        }
        if self_closing {
            self.pending_end = Some(name.clone());
        } else {
            self.open.push(name.clone());
        }

        Ok(Event::Start(StartTag { name, attributes }))
    }

    fn parse_end_tag(&mut self) -> Result<Event> {
        let pos = self.cursor.position();
        self.cursor.advance_by(2); // "</"
        let name = QName::parse(&self.parse_name()?);
        self.skip_whitespace();
        if !self.cursor.consume(b'>') {
            return Err(self.error_here(ErrorKind::InvalidToken));
        }

        match self.open.pop() {
            Some(open) if open == name => Ok(Event::End(name)),
            Some(open) => Err(Error::at(
                ErrorKind::MismatchedTag {
                    expected: open.qualified(),
                    found: name.qualified(),
                },
                pos,
            )),
            None => Err(Error::at(
                ErrorKind::UnexpectedClosingTag {
                    name: name.qualified(),
                },
                pos,
            )),
        }
    }

    fn parse_attribute_value(&mut self) -> Result<String> {
        let quote = match self.cursor.current() {
            Some(b'"') => b'"',
            Some(b'\'') => b'\'',
            _ => return Err(self.error_here(ErrorKind::InvalidToken)),
        };
        self.cursor.advance();

        let start = self.cursor.pos();
        while let Some(b) = self.cursor.current() {
            if b == quote {
                let raw = self.to_str(self.cursor.slice_from(start))?;
                self.cursor.advance();
                let value = decode_entities(raw).map_err(|kind| self.error_here(kind))?;
                return Ok(value.into_owned());
            }
            if b == b'<' {
                return Err(self.error_here(ErrorKind::InvalidToken));
            }
            self.cursor.advance();
        }

        Err(self.error_with_message(ErrorKind::UnexpectedEof, "unterminated attribute value"))
    }

    fn parse_comment(&mut self) -> Result<Event> {
        self.cursor.advance_by(4); // "<!--"
        let content = self.take_until(b"-->", "unterminated comment")?;
        Ok(Event::Comment(content))
    }

    fn parse_cdata(&mut self) -> Result<Event> {
        self.cursor.advance_by(9); // "<![CDATA["
        let content = self.take_until(b"]]>", "unterminated CDATA section")?;
        Ok(Event::Text(content))
    }

    fn parse_processing_instruction(&mut self) -> Result<Event> {
        self.cursor.advance_by(2); // "<?"
        let target = self.parse_name()?;
        let data = self.take_until(b"?>", "unterminated processing instruction")?;
        Ok(Event::ProcessingInstruction {
            target,
            data: data.trim().to_string(),
        })
    }

    fn parse_doctype(&mut self) -> Result<Event> {
        self.cursor.advance_by(9); // "<!DOCTYPE"
        let start = self.cursor.pos();
        let mut subset_depth = 0usize;
        let mut quote: Option<u8> = None;
        while let Some(b) = self.cursor.current() {
            match (quote, b) {
                (Some(q), _) if b == q => quote = None,
                (Some(_), _) => {}
                (None, b'"' | b'\'') => quote = Some(b),
                (None, b'[') => subset_depth += 1,
                (None, b']') => subset_depth = subset_depth.saturating_sub(1),
                (None, b'>') if subset_depth == 0 => {
                    let body = self.to_str(self.cursor.slice_from(start))?.trim().to_string();
                    self.cursor.advance();
                    return Ok(Event::Doctype(body));
                }
                _ => {}
            }
            self.cursor.advance();
        }
        Err(self.error_with_message(ErrorKind::UnexpectedEof, "unterminated DOCTYPE"))
    }

    /// Consume up to and including `terminator`, returning the text before it
    fn take_until(&mut self, terminator: &[u8], context: &str) -> Result<String> {
        let start = self.cursor.pos();
        while !self.cursor.is_eof() {
            if self.cursor.starts_with(terminator) {
                let content = self.to_str(self.cursor.slice_from(start))?.to_string();
                self.cursor.advance_by(terminator.len());
                return Ok(content);
            }
            self.cursor.advance();
        }
        Err(self.error_with_message(ErrorKind::UnexpectedEof, context))
    }

    fn parse_name(&mut self) -> Result<String> {
        let start = self.cursor.pos();
        match self.cursor.current() {
            Some(first) if is_name_start(first) => self.cursor.advance(),
            found => {
                let name = found.map(|b| char::from(b).to_string()).unwrap_or_default();
                return Err(self.error_here(ErrorKind::InvalidName { name }));
            }
        }
        while let Some(b) = self.cursor.current() {
            if is_name_char(b) {
                self.cursor.advance();
            } else {
                break;
            }
        }
        Ok(self.to_str(self.cursor.slice_from(start))?.to_string())
    }

    fn skip_whitespace(&mut self) -> bool {
        let before = self.cursor.pos();
        self.cursor.skip_whitespace();
        self.cursor.pos() != before
    }

    fn to_str(&self, bytes: &'a [u8]) -> Result<&'a str> {
        std::str::from_utf8(bytes).map_err(|_| self.error_here(ErrorKind::InvalidUtf8))
    }

    fn error_here(&self, kind: ErrorKind) -> Error {
        Error::at(kind, self.cursor.position())
    }

    fn error_with_message(&self, kind: ErrorKind, message: impl Into<String>) -> Error {
        let pos = self.cursor.position();
        Error::with_message(kind, crate::error::Span::at(pos), message)
    }
}

/// True if `name` is usable as an element name
pub fn is_valid_name(name: &str) -> bool {
    let mut bytes = name.bytes();
    match bytes.next() {
        Some(first) if is_name_start(first) => bytes.all(is_name_char),
        _ => false,
    }
}

fn is_name_start(b: u8) -> bool {
    matches!(b, b'A'..=b'Z' | b'a'..=b'z' | b'_' | b':') || b >= 0x80
}

fn is_name_char(b: u8) -> bool {
    is_name_start(b) || matches!(b, b'0'..=b'9' | b'-' | b'.')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(input: &str) -> Result<Vec<Event>> {
        let mut reader = Reader::from_str(input);
        let mut events = Vec::new();
        while let Some(event) = reader.next_event()? {
            events.push(event);
        }
        Ok(events)
    }

    fn start(name: &str, attributes: Vec<Attribute>) -> Event {
        Event::Start(StartTag {
            name: QName::parse(name),
            attributes,
        })
    }

    fn end(name: &str) -> Event {
        Event::End(QName::parse(name))
    }

    #[test]
    fn test_simple_element_events() -> Result<()> {
        let events = collect("<root><child>text</child></root>")?;
        assert_eq!(
            events,
            vec![
                start("root", vec![]),
                start("child", vec![]),
                Event::Text("text".to_string()),
                end("child"),
                end("root"),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_attributes_keep_document_order() -> Result<()> {
        let events = collect(r#"<x attr2='2' attr1="1"/>"#)?;
        assert_eq!(
            events,
            vec![
                start(
                    "x",
                    vec![Attribute::new("attr2", "2"), Attribute::new("attr1", "1")]
                ),
                end("x"),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_fragment_with_several_roots() -> Result<()> {
        let events = collect("<a/>\n<b>x</b>")?;
        assert_eq!(events.len(), 6);
        assert_eq!(events.get(2), Some(&Event::Text("\n".to_string())));
        Ok(())
    }

    #[test]
    fn test_prolog_events() -> Result<()> {
        let events = collect(
            "<?xml version=\"1.0\"?><!DOCTYPE project [<!ELEMENT a ANY>]><!-- c --><project/>",
        )?;
        assert_eq!(
            events.first(),
            Some(&Event::ProcessingInstruction {
                target: "xml".to_string(),
                data: "version=\"1.0\"".to_string(),
            })
        );
        assert_eq!(
            events.get(1),
            Some(&Event::Doctype("project [<!ELEMENT a ANY>]".to_string()))
        );
        assert_eq!(events.get(2), Some(&Event::Comment(" c ".to_string())));
        assert_eq!(events.get(3), Some(&start("project", vec![])));
        Ok(())
    }

    #[test]
    fn test_entities_and_cdata() -> Result<()> {
        let events = collect("<a t=\"&quot;q&quot;\">x &amp; y<![CDATA[<raw>]]></a>")?;
        assert_eq!(
            events,
            vec![
                start("a", vec![Attribute::new("t", "\"q\"")]),
                Event::Text("x & y".to_string()),
                Event::Text("<raw>".to_string()),
                end("a"),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_prefixed_names() -> Result<()> {
        let events = collect(r#"<p:a xmlns:p="urn:p" p:k="v"></p:a>"#)?;
        let Some(Event::Start(tag)) = events.first() else {
            return Err(Error::at(ErrorKind::InvalidToken, Default::default()));
        };
        assert_eq!(tag.name.prefix.as_deref(), Some("p"));
        assert_eq!(tag.name.local, "a");
        assert_eq!(tag.attributes.len(), 2);
        assert_eq!(tag.attribute("k"), Some("v"));
        Ok(())
    }

    #[test]
    fn test_unclosed_element_is_error() {
        let err = collect("<a><b></b>").err();
        assert_eq!(err.map(|e| e.kind().clone()), Some(ErrorKind::UnexpectedEof));
    }

    #[test]
    fn test_mismatched_tag_is_error() {
        let err = collect("<a></b>").err();
        assert_eq!(
            err.map(|e| e.kind().clone()),
            Some(ErrorKind::MismatchedTag {
                expected: "a".to_string(),
                found: "b".to_string(),
            })
        );
    }

    #[test]
    fn test_stray_closing_tag_is_error() {
        let err = collect("</a>").err();
        assert!(matches!(
            err.as_ref().map(Error::kind),
            Some(ErrorKind::UnexpectedClosingTag { .. })
        ));
    }

    #[test]
    fn test_duplicate_attribute_is_error() {
        let err = collect(r#"<a x="1" x="2"/>"#).err();
        assert!(matches!(
            err.as_ref().map(Error::kind),
            Some(ErrorKind::DuplicateAttribute { .. })
        ));
    }

    #[test]
    fn test_missing_space_between_attributes_is_error() {
        assert!(collect(r#"<a x="1"y="2"/>"#).is_err());
    }

    #[test]
    fn test_unterminated_markup_is_error() {
        assert!(collect("<a><!-- open").is_err());
        assert!(collect("<a x=\"1").is_err());
        assert!(collect("<a><![CDATA[x").is_err());
    }

    #[test]
    fn test_max_depth() {
        let mut reader = Reader::with_config(b"<a><b><c/></b></a>", Config::new(2, 0));
        let mut result = Ok(None);
        for _ in 0..4 {
            result = reader.next_event();
            if result.is_err() {
                break;
            }
        }
        assert!(matches!(
            result.as_ref().map_err(Error::kind),
            Err(ErrorKind::MaxDepthExceeded { max: 2 })
        ));
    }

    #[test]
    fn test_max_depth_counts_self_closing() -> Result<()> {
        let mut reader = Reader::with_config(b"<a><b/></a>", Config::new(2, 0));
        while reader.next_event()?.is_some() {}

        let mut reader = Reader::with_config(b"<a><b/></a>", Config::new(1, 0));
        assert!(matches!(reader.next_event()?, Some(Event::Start(_))));
        assert!(matches!(
            reader.next_event().as_ref().map_err(Error::kind),
            Err(ErrorKind::MaxDepthExceeded { max: 1 })
        ));
        Ok(())
    }

    #[test]
    fn test_max_size() {
        let mut reader = Reader::with_config(b"<abc/>", Config::new(0, 4));
        assert!(matches!(
            reader.next_event().as_ref().map_err(Error::kind),
            Err(ErrorKind::MaxSizeExceeded { max: 4 })
        ));
    }

    #[test]
    fn test_read_text_skips_nested() -> Result<()> {
        let mut reader = Reader::from_str("<a> one <b>two</b> three </a><c/>");
        assert!(matches!(reader.next_event()?, Some(Event::Start(_))));
        assert_eq!(reader.read_text()?, " one  three ");
        assert_eq!(reader.depth(), 0);
        assert_eq!(reader.next_event()?, Some(start("c", vec![])));
        Ok(())
    }

    #[test]
    fn test_skip_element() -> Result<()> {
        let mut reader = Reader::from_str("<a><b><c/></b></a><d/>");
        reader.next_event()?;
        reader.skip_element()?;
        assert_eq!(reader.next_event()?, Some(start("d", vec![])));
        Ok(())
    }

    #[test]
    fn test_is_valid_name() {
        assert!(is_valid_name("project.build.sourceEncoding"));
        assert!(is_valid_name("_x-1"));
        assert!(!is_valid_name("1abc"));
        assert!(!is_valid_name("a b"));
        assert!(!is_valid_name(""));
    }

    #[test]
    fn test_bom_is_skipped() -> Result<()> {
        let mut reader = Reader::new(b"\xEF\xBB\xBF<a/>");
        assert_eq!(reader.next_event()?, Some(start("a", vec![])));
        Ok(())
    }
}

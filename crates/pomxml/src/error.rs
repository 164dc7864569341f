//! Error types for pomxml

use std::fmt;
use thiserror::Error;

/// Position in source markup
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pos {
    pub offset: usize,
    pub line: u32,
    pub col: u32,
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

impl Pos {
    pub const fn new(offset: usize, line: u32, col: u32) -> Self {
        Self { offset, line, col }
    }
}

/// Span representing a range in source markup
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Span {
    pub start: Pos,
    pub end: Pos,
}

impl Span {
    pub const fn new(start: Pos, end: Pos) -> Self {
        Self { start, end }
    }

    pub const fn at(pos: Pos) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    pub const fn empty() -> Self {
        Self {
            start: Pos::new(0, 0, 0),
            end: Pos::new(0, 0, 0),
        }
    }
}

/// Error kind for detailed categorization
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input ended while markup or elements were still open
    UnexpectedEof,
    MismatchedTag { expected: String, found: String },
    UnexpectedClosingTag { name: String },
    InvalidToken,
    InvalidEntity { entity: String },
    InvalidName { name: String },
    DuplicateAttribute { name: String },
    InvalidUtf8,
    MaxDepthExceeded { max: u16 },
    MaxSizeExceeded { max: usize },
    /// A known group was found where another element was required
    UnexpectedElement { expected: String, found: String },
    InvalidValue { element: String, value: String },
    Io,
}

impl ErrorKind {
    /// True for the kinds raised by the tokenizer on markup that is not well formed.
    pub const fn is_malformed_stream(&self) -> bool {
        matches!(
            self,
            Self::UnexpectedEof
                | Self::MismatchedTag { .. }
                | Self::UnexpectedClosingTag { .. }
                | Self::InvalidToken
                | Self::InvalidEntity { .. }
                | Self::InvalidName { .. }
                | Self::DuplicateAttribute { .. }
                | Self::InvalidUtf8
                | Self::MaxDepthExceeded { .. }
                | Self::MaxSizeExceeded { .. }
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEof => write!(f, "unexpected end of input"),
            Self::MismatchedTag { expected, found } => {
                write!(f, "expected </{expected}>, found </{found}>")
            }
            Self::UnexpectedClosingTag { name } => {
                write!(f, "closing tag </{name}> has no open element")
            }
            Self::InvalidToken => write!(f, "invalid token"),
            Self::InvalidEntity { entity } => write!(f, "invalid entity reference: &{entity};"),
            Self::InvalidName { name } => write!(f, "invalid name: {name:?}"),
            Self::DuplicateAttribute { name } => write!(f, "duplicate attribute: {name}"),
            Self::InvalidUtf8 => write!(f, "invalid utf-8"),
            Self::MaxDepthExceeded { max } => write!(f, "max depth exceeded: {max}"),
            Self::MaxSizeExceeded { max } => write!(f, "max size exceeded: {max}"),
            Self::UnexpectedElement { expected, found } => {
                write!(f, "expected element <{expected}>, found <{found}>")
            }
            Self::InvalidValue { element, value } => {
                write!(f, "invalid value {value:?} in <{element}>")
            }
            Self::Io => write!(f, "i/o error"),
        }
    }
}

/// Main error type for pomxml
#[derive(Error, Clone, Debug, PartialEq)]
pub struct Error {
    kind: ErrorKind,
    span: Span,
    message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, span: Span) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            span,
            message,
        }
    }

    pub fn with_message(kind: ErrorKind, span: Span, message: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Shorthand for [`ErrorKind::is_malformed_stream`]
    pub fn is_malformed_stream(&self) -> bool {
        self.kind.is_malformed_stream()
    }

    /// Create error at specific position
    pub fn at(kind: ErrorKind, pos: Pos) -> Self {
        Self::new(kind, Span::at(pos))
    }

    /// Wrap an I/O failure, keeping the path in the message
    pub fn io(path: &std::path::Path, err: &std::io::Error) -> Self {
        Self::with_message(
            ErrorKind::Io,
            Span::empty(),
            format!("{}: {err}", path.display()),
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kind == ErrorKind::Io {
            return write!(f, "{}", self.message);
        }
        write!(f, "error at {}: {}", self.span.start, self.message)
    }
}

/// Result type alias for pomxml
pub type Result<T> = std::result::Result<T, Error>;

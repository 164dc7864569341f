//! Markup tokenizer, writer and the escape transformations they share

pub mod escape;
pub mod event;
pub mod reader;
pub mod writer;

pub use event::{Attribute, Event, QName, StartTag};
pub use reader::{Config, Reader};
pub use writer::Writer;

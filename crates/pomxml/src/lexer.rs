//! Byte-level scanning shared by the markup reader

pub mod cursor;

pub use cursor::Cursor;

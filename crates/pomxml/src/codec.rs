//! Mapping between element content and typed fields.
//!
//! Every known group implements [`XmlValue`]; leaf types cover text and
//! flags, and the [`pom_group!`] macro generates the field dispatch for
//! structs. Elements a group does not know are skipped.

use tracing::trace;

use crate::error::{Error, ErrorKind, Result};
use crate::properties::OrderedProperties;
use crate::tree::Configuration;
use crate::xml::{Event, Reader, StartTag, Writer};

/// A value that can be read from and written as one element
pub trait XmlValue: Sized {
    /// Decode the content of the element whose start tag `start` was just
    /// read, consuming its end tag.
    fn decode(reader: &mut Reader<'_>, start: &StartTag) -> Result<Self>;

    /// Write the value as element `name`
    fn encode(&self, name: &str, writer: &mut Writer) -> Result<()>;

    /// True when the field should be left out of the output
    fn is_omitted(&self) -> bool {
        false
    }
}

/// Named child elements of a group
pub trait Fields: Default {
    /// Decode child element `tag` into the matching field.
    /// Returns `false` when no field has that name.
    fn decode_field(&mut self, reader: &mut Reader<'_>, tag: &StartTag) -> Result<bool>;

    /// Write every non-omitted field in declaration order
    fn encode_fields(&self, writer: &mut Writer) -> Result<()>;
}

impl XmlValue for String {
    fn decode(reader: &mut Reader<'_>, _start: &StartTag) -> Result<Self> {
        Ok(reader.read_text()?.trim().to_string())
    }

    fn encode(&self, name: &str, writer: &mut Writer) -> Result<()> {
        writer.text_element(name, self)
    }

    fn is_omitted(&self) -> bool {
        self.is_empty()
    }
}

impl XmlValue for bool {
    fn decode(reader: &mut Reader<'_>, start: &StartTag) -> Result<Self> {
        let text = reader.read_text()?;
        match text.trim() {
            "" | "0" | "f" | "F" | "false" | "FALSE" | "False" => Ok(false),
            "1" | "t" | "T" | "true" | "TRUE" | "True" => Ok(true),
            other => Err(Error::at(
                ErrorKind::InvalidValue {
                    element: start.name.qualified(),
                    value: other.to_string(),
                },
                reader.position(),
            )),
        }
    }

    fn encode(&self, name: &str, writer: &mut Writer) -> Result<()> {
        writer.text_element(name, if *self { "true" } else { "false" })
    }

    fn is_omitted(&self) -> bool {
        !*self
    }
}

impl<T: XmlValue> XmlValue for Option<T> {
    fn decode(reader: &mut Reader<'_>, start: &StartTag) -> Result<Self> {
        T::decode(reader, start).map(Some)
    }

    fn encode(&self, name: &str, writer: &mut Writer) -> Result<()> {
        match self {
            Some(value) => value.encode(name, writer),
            None => Ok(()),
        }
    }

    fn is_omitted(&self) -> bool {
        self.is_none()
    }
}

impl XmlValue for Configuration {
    fn decode(reader: &mut Reader<'_>, start: &StartTag) -> Result<Self> {
        let mut tree = Self::decode(reader)?;
        tree.attributes.clone_from(&start.attributes);
        Ok(tree)
    }

    fn encode(&self, name: &str, writer: &mut Writer) -> Result<()> {
        Self::encode(self, name, writer)
    }
}

impl XmlValue for OrderedProperties {
    fn decode(reader: &mut Reader<'_>, _start: &StartTag) -> Result<Self> {
        Self::decode(reader)
    }

    fn encode(&self, name: &str, writer: &mut Writer) -> Result<()> {
        Self::encode(self, name, writer)
    }
}

/// Decode the children of a group element into `T`'s fields
pub fn decode_fields<T: Fields>(reader: &mut Reader<'_>) -> Result<T> {
    let mut value = T::default();
    while let Some(event) = reader.next_event()? {
        match event {
            Event::Start(tag) => {
                if !value.decode_field(reader, &tag)? {
                    trace!(element = %tag.name, "skipping unknown element");
                    reader.skip_element()?;
                }
            }
            Event::End(_) => return Ok(value),
            Event::Text(_)
            | Event::Comment(_)
            | Event::ProcessingInstruction { .. }
            | Event::Doctype(_) => {}
        }
    }
    Err(Error::at(ErrorKind::UnexpectedEof, reader.position()))
}

/// Decode the `item` children of a wrapper element such as `<dependencies>`
pub fn decode_list<T: XmlValue>(reader: &mut Reader<'_>, item: &str) -> Result<Vec<T>> {
    let mut items = Vec::new();
    while let Some(event) = reader.next_event()? {
        match event {
            Event::Start(tag) if tag.name.local == item => items.push(T::decode(reader, &tag)?),
            Event::Start(tag) => {
                trace!(element = %tag.name, expected = item, "skipping unexpected list entry");
                reader.skip_element()?;
            }
            Event::End(_) => return Ok(items),
            Event::Text(_)
            | Event::Comment(_)
            | Event::ProcessingInstruction { .. }
            | Event::Doctype(_) => {}
        }
    }
    Err(Error::at(ErrorKind::UnexpectedEof, reader.position()))
}

/// Write `values` as `item` elements inside a `name` wrapper; nothing when empty
pub fn encode_list<T: XmlValue>(
    name: &str,
    item: &str,
    values: &[T],
    writer: &mut Writer,
) -> Result<()> {
    if values.is_empty() {
        return Ok(());
    }
    writer.start(name, &[])?;
    for value in values {
        value.encode(item, writer)?;
    }
    writer.end()
}

/// Declare a group struct and its element mapping.
///
/// Each field names its element; `"wrapper" > "item"` maps a `Vec` through
/// a wrapper element. An optional `[attributes]` after the struct name keeps
/// the group element's own attributes, and a trailing `..pub base: Type`
/// merges another group's fields into the same element.
macro_rules! pom_group {
    (@decode $target:expr, $reader:ident, $tag:ident) => {
        $target = $crate::codec::XmlValue::decode($reader, $tag)?
    };
    (@decode $target:expr, $reader:ident, $tag:ident, $item:literal) => {
        $target = $crate::codec::decode_list($reader, $item)?
    };
    (@encode $value:expr, $writer:ident, $name:literal) => {
        if !$crate::codec::XmlValue::is_omitted(&$value) {
            $crate::codec::XmlValue::encode(&$value, $name, $writer)?;
        }
    };
    (@encode $value:expr, $writer:ident, $name:literal, $item:literal) => {
        $crate::codec::encode_list($name, $item, &$value, $writer)?
    };
    (
        $(#[$meta:meta])*
        pub struct $group:ident $([$attrs:ident])? {
            $(
                $(#[$field_meta:meta])*
                pub $field:ident : $ty:ty = $name:literal $(> $item:literal)?
            ),* $(,)?
            $(..pub $flat:ident : $flat_ty:ty)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default, PartialEq)]
        pub struct $group {
            $(pub $attrs: Vec<$crate::xml::Attribute>,)?
            $(
                $(#[$field_meta])*
                pub $field: $ty,
            )*
            $(pub $flat: $flat_ty,)?
        }

        impl $crate::codec::Fields for $group {
            fn decode_field(
                &mut self,
                reader: &mut $crate::xml::Reader<'_>,
                tag: &$crate::xml::StartTag,
            ) -> $crate::Result<bool> {
                match tag.name.local.as_str() {
                    $(
                        $name => {
                            $crate::codec::pom_group!(@decode self.$field, reader, tag $(, $item)?);
                        }
                    )*
                    _ => {
                        $(
                            if $crate::codec::Fields::decode_field(&mut self.$flat, reader, tag)? {
                                return Ok(true);
                            }
                        )?
                        return Ok(false);
                    }
                }
                Ok(true)
            }

            fn encode_fields(&self, writer: &mut $crate::xml::Writer) -> $crate::Result<()> {
                $(
                    $crate::codec::pom_group!(@encode self.$field, writer, $name $(, $item)?);
                )*
                $(
                    $crate::codec::Fields::encode_fields(&self.$flat, writer)?;
                )?
                Ok(())
            }
        }

        impl $crate::codec::XmlValue for $group {
            #[allow(unused_variables)]
            fn decode(
                reader: &mut $crate::xml::Reader<'_>,
                start: &$crate::xml::StartTag,
            ) -> $crate::Result<Self> {
                #[allow(unused_mut)]
                let mut value: Self = $crate::codec::decode_fields(reader)?;
                $(value.$attrs.clone_from(&start.attributes);)?
                Ok(value)
            }

            #[allow(unused_variables)]
            fn encode(&self, name: &str, writer: &mut $crate::xml::Writer) -> $crate::Result<()> {
                let attributes: &[$crate::xml::Attribute] = &[];
                $(let attributes: &[$crate::xml::Attribute] = &self.$attrs;)?
                writer.start(name, attributes)?;
                $crate::codec::Fields::encode_fields(self, writer)?;
                writer.end()
            }
        }
    };
}

pub(crate) use pom_group;

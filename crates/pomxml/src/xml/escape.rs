//! Escape transformations between plain text and markup
//!
//! The writer escapes character data with [`escape_text`]. A configuration
//! tree is embedded as character data whose payload is itself markup, so the
//! escaping performed on the way out has to be reversed exactly once. That
//! pair is exposed as [`escape_for_embedding`] / [`undo_embedding_escape`]:
//! the second must stay the precise inverse of the first, and any change to
//! the escape table has to be made in both.

use std::borrow::Cow;

use crate::error::ErrorKind;

/// Characters the encoder escapes, with their references.
const ESCAPES: [(char, &str); 5] = [
    ('&', "&amp;"),
    ('<', "&lt;"),
    ('>', "&gt;"),
    ('"', "&quot;"),
    ('\'', "&apos;"),
];

fn escape(input: &str) -> Cow<'_, str> {
    if !input.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(input);
    }
    let mut out = String::with_capacity(input.len() + 16);
    for ch in input.chars() {
        match ESCAPES.iter().find(|(c, _)| *c == ch) {
            Some((_, reference)) => out.push_str(reference),
            None => out.push(ch),
        }
    }
    Cow::Owned(out)
}

/// Escape character data
pub fn escape_text(input: &str) -> Cow<'_, str> {
    escape(input)
}

/// Escape a double-quoted attribute value
pub fn escape_attribute(input: &str) -> Cow<'_, str> {
    escape(input)
}

/// The character-data encoding applied to an embedded markup payload.
pub fn escape_for_embedding(payload: &str) -> Cow<'_, str> {
    escape_text(payload)
}

/// Reverse [`escape_for_embedding`] in a single left-to-right pass.
///
/// Only the five references the encoder produces are replaced; a reference
/// that appears after a replacement is never revisited, so `&amp;lt;` becomes
/// `&lt;` and not `<`.
pub fn undo_embedding_escape(encoded: &str) -> Cow<'_, str> {
    if !encoded.contains('&') {
        return Cow::Borrowed(encoded);
    }
    let mut out = String::with_capacity(encoded.len());
    let mut rest = encoded;
    while let Some(idx) = rest.find('&') {
        let (head, tail) = rest.split_at(idx);
        out.push_str(head);
        match ESCAPES
            .iter()
            .find(|(_, reference)| tail.starts_with(reference))
        {
            Some((ch, reference)) => {
                out.push(*ch);
                rest = tail.get(reference.len()..).unwrap_or_default();
            }
            None => {
                out.push('&');
                rest = tail.get(1..).unwrap_or_default();
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

/// Decode predefined entities and character references.
///
/// Returns the offending reference body on failure.
pub fn decode_entities(input: &str) -> Result<Cow<'_, str>, ErrorKind> {
    if !input.contains('&') {
        return Ok(Cow::Borrowed(input));
    }
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(idx) = rest.find('&') {
        let (head, tail) = rest.split_at(idx);
        out.push_str(head);
        let body_and_rest = tail.get(1..).unwrap_or_default();
        let Some(end) = body_and_rest.find(';') else {
            return Err(ErrorKind::InvalidEntity {
                entity: body_and_rest.chars().take(16).collect(),
            });
        };
        let entity = body_and_rest.get(..end).unwrap_or_default();
        let decoded = match entity {
            "amp" => Some('&'),
            "lt" => Some('<'),
            "gt" => Some('>'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            _ => decode_numeric_entity(entity),
        };
        match decoded {
            Some(ch) => out.push(ch),
            None => {
                return Err(ErrorKind::InvalidEntity {
                    entity: entity.to_string(),
                })
            }
        }
        rest = body_and_rest.get(end + 1..).unwrap_or_default();
    }
    out.push_str(rest);
    Ok(Cow::Owned(out))
}

fn decode_numeric_entity(entity: &str) -> Option<char> {
    if let Some(hex) = entity.strip_prefix("#x") {
        u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
    } else if let Some(dec) = entity.strip_prefix('#') {
        dec.parse::<u32>().ok().and_then(char::from_u32)
    } else {
        None
    }
}

//! Well-formedness check run before the feed is parsed.
//!
//! Only syntax is checked here. Entity references must be well formed, but
//! named entities are not resolved, so an undefined one surfaces later as a
//! parse error.

use quick_xml::escape::unescape_with;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::domain::error::FeedError;

/// `Ok(())` when `xml` is a single well-formed document.
pub fn validate(xml: &str) -> Result<(), FeedError> {
    check_characters(xml)?;

    let mut reader = Reader::from_str(xml);
    let mut depth: usize = 0;
    let mut roots: usize = 0;

    loop {
        let event = reader.read_event().map_err(|e| FeedError::MalformedFeed {
            reason: format!("{e} at byte {}", reader.error_position()),
        })?;

        match event {
            Event::Start(start) => {
                if depth == 0 {
                    roots += 1;
                    if roots > 1 {
                        return Err(malformed("more than one root element"));
                    }
                }
                check_tag(&start)?;
                depth += 1;
            }
            Event::Empty(empty) => {
                if depth == 0 {
                    roots += 1;
                    if roots > 1 {
                        return Err(malformed("more than one root element"));
                    }
                }
                check_tag(&empty)?;
            }
            Event::End(_) => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| malformed("closing tag without opening tag"))?;
            }
            Event::Text(text) => {
                if depth == 0 && !text.iter().all(u8::is_ascii_whitespace) {
                    return Err(malformed("text outside the root element"));
                }
                check_references(&text)?;
            }
            Event::CData(_) if depth == 0 => {
                return Err(malformed("CDATA outside the root element"));
            }
            Event::Comment(comment) => {
                if comment.windows(2).any(|w| w == b"--") || comment.ends_with(b"-") {
                    return Err(malformed("'--' inside comment"));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if depth > 0 {
        return Err(malformed("unexpected end of document: unclosed element"));
    }
    if roots == 0 {
        return Err(malformed("document has no root element"));
    }
    Ok(())
}

/// Boolean form of [`validate`].
pub fn is_valid(xml: &str) -> bool {
    validate(xml).is_ok()
}

/// Rejects characters XML 1.0 does not allow anywhere in a document.
fn check_characters(xml: &str) -> Result<(), FeedError> {
    match xml.char_indices().find(|(_, c)| !is_xml_char(*c)) {
        Some((offset, c)) => Err(FeedError::MalformedFeed {
            reason: format!("illegal character U+{:04X} at byte {offset}", c as u32),
        }),
        None => Ok(()),
    }
}

fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r')
        || (c >= ' ' && c != '\u{FFFE}' && c != '\u{FFFF}')
}

fn check_tag(tag: &BytesStart<'_>) -> Result<(), FeedError> {
    check_name(tag.name().as_ref())?;
    for attr in tag.attributes() {
        let attr = attr.map_err(|e| FeedError::MalformedFeed {
            reason: format!("bad attribute: {e}"),
        })?;
        check_name(attr.key.as_ref())?;
        if attr.value.contains(&b'<') {
            return Err(malformed("'<' in attribute value"));
        }
        check_references(&attr.value)?;
    }
    Ok(())
}

fn check_name(name: &[u8]) -> Result<(), FeedError> {
    let name = std::str::from_utf8(name).map_err(|e| FeedError::MalformedFeed {
        reason: format!("invalid UTF-8 in name: {e}"),
    })?;
    if is_xml_name(name) {
        Ok(())
    } else {
        Err(FeedError::MalformedFeed {
            reason: format!("invalid name '{name}'"),
        })
    }
}

fn is_xml_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    let name_start = |c: char| c.is_alphabetic() || c == '_' || c == ':';
    name_start(first)
        && chars.all(|c| name_start(c) || c.is_alphanumeric() || matches!(c, '-' | '.'))
}

/// Checks that every `&` starts a complete reference: a valid character
/// reference or a syntactically valid entity name.
fn check_references(raw: &[u8]) -> Result<(), FeedError> {
    if !raw.contains(&b'&') {
        return Ok(());
    }
    let raw = std::str::from_utf8(raw).map_err(|e| FeedError::MalformedFeed {
        reason: format!("invalid UTF-8 in text: {e}"),
    })?;
    unescape_with(raw, |entity| is_xml_name(entity).then_some(""))
        .map(drop)
        .map_err(|e| FeedError::MalformedFeed {
            reason: format!("bad entity reference: {e}"),
        })
}

fn malformed(reason: &str) -> FeedError {
    FeedError::MalformedFeed {
        reason: reason.to_string(),
    }
}

//! Project document loading.
//!
//! Bytes are decoded here, the `<?xml ...?>` declaration is read with
//! `quick-xml`, and the rest is parsed by `xot`. Whitespace text nodes are
//! kept so removals can tidy the formatting around them.

use std::borrow::Cow;

use quick_xml::{
    Reader,
    events::{BytesDecl, Event},
};
use xot::Xot;

use super::error::DocumentError;
use super::tree::{Declaration, Document};

/// Decode raw file bytes and parse them.
pub fn load_document(bytes: &[u8]) -> Result<Document, DocumentError> {
    let text = decode_source(bytes)?;
    parse_document(&text)
}

/// Decode UTF-8 (optionally with BOM) or BOM-marked UTF-16 input.
pub fn decode_source(bytes: &[u8]) -> Result<Cow<'_, str>, DocumentError> {
    match bytes {
        [0xEF, 0xBB, 0xBF, rest @ ..] => utf8(rest).map(Cow::Borrowed),
        [0xFF, 0xFE, rest @ ..] => decode_utf16(rest, u16::from_le_bytes).map(Cow::Owned),
        [0xFE, 0xFF, rest @ ..] => decode_utf16(rest, u16::from_be_bytes).map(Cow::Owned),
        _ => utf8(bytes).map(Cow::Borrowed),
    }
}

fn decode_utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> Result<String, DocumentError> {
    if bytes.len() % 2 != 0 {
        return Err(DocumentError::Encoding {
            bits: 16,
            message: "odd number of bytes".to_string(),
        });
    }
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| unit([pair[0], pair[1]]))
        .collect();
    String::from_utf16(&units).map_err(|e| DocumentError::Encoding {
        bits: 16,
        message: e.to_string(),
    })
}

fn utf8(bytes: &[u8]) -> Result<&str, DocumentError> {
    std::str::from_utf8(bytes).map_err(|e| DocumentError::Encoding {
        bits: 8,
        message: e.to_string(),
    })
}

/// Parse document text into a tree.
///
/// The declaration is split off first: the text is already decoded, so
/// whatever encoding it names no longer applies.
pub fn parse_document(text: &str) -> Result<Document, DocumentError> {
    let (declaration, body) = split_declaration(text);
    if body.trim().is_empty() {
        return Err(DocumentError::MissingRoot);
    }

    let mut xot = Xot::new();
    let node = xot
        .parse(body)
        .map_err(|e| DocumentError::Syntax(e.to_string()))?;
    Document::new(xot, node, declaration)
}

/// Read a leading declaration, returning it with the text that follows.
fn split_declaration(text: &str) -> (Option<Declaration>, &str) {
    let mut reader = Reader::from_str(text);
    match reader.read_event() {
        Ok(Event::Decl(decl)) => {
            let end = reader.buffer_position() as usize;
            (Some(declaration(&decl)), &text[end..])
        }
        _ => (None, text),
    }
}

fn declaration(decl: &BytesDecl<'_>) -> Declaration {
    Declaration {
        version: decl.version().map(lossy).unwrap_or_else(|_| "1.0".to_string()),
        encoding: decl.encoding().and_then(Result::ok).map(lossy),
        standalone: decl.standalone().and_then(Result::ok).map(lossy),
    }
}

fn lossy(bytes: Cow<'_, [u8]>) -> String {
    String::from_utf8_lossy(&bytes).into_owned()
}

//! Project document serialization.
//!
//! Walks the `xot` tree and re-emits it through the indenting `quick-xml`
//! writer. Whitespace-only text nodes are dropped, so the output formatting no
//! longer depends on how the transform left the original whitespace.
//!
//! Element and attribute names get a prefix only when one is still declared
//! in scope. Names whose namespace declaration was removed are written bare.

use std::borrow::Cow;

use anyhow::Result;
use quick_xml::{
    Writer,
    escape::partial_escape,
    events::{BytesDecl, BytesEnd, BytesPI, BytesStart, BytesText, Event, attributes::Attribute},
    name::QName,
};
use serde::{Deserialize, Serialize};
use xot::{NameId, Node, Value, Xot};

use super::tree::Document;

const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// Line terminator used in written files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    Lf,
    #[default]
    Crlf,
}

/// Serialize `doc` with `indent` spaces per level and `\n` line breaks.
pub fn serialize_document(doc: &Document, indent: usize) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', indent);

    if let Some(decl) = &doc.declaration {
        writer.write_event(Event::Decl(BytesDecl::new(
            &decl.version,
            decl.encoding.as_deref(),
            decl.standalone.as_deref(),
        )))?;
    }
    for node in doc.content_children(doc.node()) {
        write_node(&mut writer, doc, node)?;
    }

    Ok(String::from_utf8(writer.into_inner())?)
}

fn write_node(writer: &mut Writer<Vec<u8>>, doc: &Document, node: Node) -> Result<()> {
    let xot = doc.xot();
    match xot.value(node) {
        Value::Element(element) => {
            let tag = qualified_name(xot, node, element.name());
            let mut start = BytesStart::new(tag.as_str());
            for (prefix, namespace) in xot.namespaces(node).iter() {
                let prefix = xot.prefix_str(prefix);
                let key = if prefix.is_empty() {
                    "xmlns".to_string()
                } else {
                    format!("xmlns:{prefix}")
                };
                push_attr(&mut start, &key, xot.namespace_str(*namespace));
            }
            for (name, value) in xot.attributes(node).iter() {
                push_attr(&mut start, &qualified_name(xot, node, name), value);
            }

            let children: Vec<Node> = doc
                .content_children(node)
                .filter(|&child| !doc.is_whitespace(child))
                .collect();

            if children.is_empty() {
                writer.write_event(Event::Empty(start))?;
            } else {
                writer.write_event(Event::Start(start))?;
                for child in children {
                    write_node(writer, doc, child)?;
                }
                writer.write_event(Event::End(BytesEnd::new(tag.as_str())))?;
            }
        }
        Value::Text(text) => {
            writer.write_event(Event::Text(BytesText::from_escaped(partial_escape(text.get()))))?;
        }
        Value::Comment(comment) => {
            writer.write_event(Event::Comment(BytesText::from_escaped(comment.get())))?;
        }
        Value::ProcessingInstruction(pi) => {
            let target = xot.name_ns_str(pi.target()).0;
            let content = match pi.data() {
                Some(data) => format!("{target} {data}"),
                None => target.to_string(),
            };
            writer.write_event(Event::PI(BytesPI::new(content)))?;
        }
        _ => {}
    }
    Ok(())
}

fn push_attr(start: &mut BytesStart<'_>, key: &str, value: &str) {
    start.push_attribute(Attribute {
        key: QName(key.as_bytes()),
        value: Cow::Owned(escape_attr(value).into_bytes()),
    });
}

/// `prefix:local` when a prefix for the name's namespace is in scope.
fn qualified_name(xot: &Xot, node: Node, name: NameId) -> String {
    let (local, uri) = xot.name_ns_str(name);
    match prefix_for(xot, node, uri) {
        Some(prefix) => format!("{prefix}:{local}"),
        None => local.to_string(),
    }
}

/// Nearest declaration of `uri` on `node` or its ancestors. A default
/// namespace binding yields `None`, as does no binding at all.
fn prefix_for<'x>(xot: &'x Xot, node: Node, uri: &str) -> Option<&'x str> {
    if uri.is_empty() {
        return None;
    }
    if uri == XML_NAMESPACE {
        return Some("xml");
    }
    for scope in std::iter::successors(Some(node), |&n| xot.parent(n)) {
        if !xot.is_element(scope) {
            break;
        }
        for (prefix, namespace) in xot.namespaces(scope).iter() {
            if xot.namespace_str(*namespace) == uri {
                let prefix = xot.prefix_str(prefix);
                return (!prefix.is_empty()).then_some(prefix);
            }
        }
    }
    None
}

/// Escape a double-quoted attribute value. Apostrophes stay readable, which
/// keeps MSBuild conditions like `'$(Configuration)' == 'Debug'` intact.
fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Rewrite every line break in `text` as `ending`.
pub fn normalize_line_endings(text: &str, ending: LineEnding) -> String {
    let unix = text.replace("\r\n", "\n").replace('\r', "\n");
    match ending {
        LineEnding::Lf => unix,
        LineEnding::Crlf => unix.replace('\n', "\r\n"),
    }
}

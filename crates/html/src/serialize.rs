//! HTML serialization from the document arena.
//!
//! Void elements close with `/>` and attribute values are always
//! double-quoted. An element with an empty tag name renders as `<>…</>`.

use std::io::Write;

use stitch_dom::{Document, NodeId, NodeKind};

use crate::error::HtmlError;

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "keygen", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Elements whose text children are written without escaping.
const RAW_TEXT_ELEMENTS: &[&str] = &[
    "iframe", "noembed", "noframes", "noscript", "plaintext", "script", "style", "xmp",
];

/// Elements where a leading newline in the first text child would be eaten on reparse.
const LEADING_NEWLINE_ELEMENTS: &[&str] = &["pre", "listing", "textarea"];

/// Pending work for the serializer. Children are pushed in reverse so they pop in order.
enum Frame {
    Open(NodeId),
    RawText(NodeId),
    Close(NodeId),
}

/// Writes `node` and its descendants to `writer`.
///
/// Uses an explicit stack, so nesting depth is bounded by memory only.
pub fn serialize<W: Write>(doc: &Document, node: NodeId, writer: &mut W) -> Result<(), HtmlError> {
    let mut stack = vec![Frame::Open(node)];
    while let Some(frame) = stack.pop() {
        match frame {
            Frame::Open(id) => open(doc, id, writer, &mut stack)?,
            Frame::RawText(id) => {
                if let NodeKind::Text(text) = doc.kind(id) {
                    writer.write_all(text.as_bytes())?;
                }
            }
            Frame::Close(id) => {
                if let Some(name) = doc.tag_name(id) {
                    write!(writer, "</{}>", name)?;
                }
            }
        }
    }
    Ok(())
}

fn open<W: Write>(
    doc: &Document,
    node: NodeId,
    writer: &mut W,
    stack: &mut Vec<Frame>,
) -> Result<(), HtmlError> {
    match doc.kind(node) {
        NodeKind::Document => push_children(doc, node, false, stack),
        NodeKind::Text(text) => escape(writer, text)?,
        NodeKind::Comment(text) => {
            writer.write_all(b"<!--")?;
            writer.write_all(text.as_bytes())?;
            writer.write_all(b"-->")?;
        }
        NodeKind::Doctype {
            name,
            public_id,
            system_id,
        } => {
            write!(writer, "<!DOCTYPE {}", name)?;
            if !public_id.is_empty() {
                write!(writer, " PUBLIC \"{}\"", public_id)?;
                if !system_id.is_empty() {
                    write!(writer, " \"{}\"", system_id)?;
                }
            } else if !system_id.is_empty() {
                write!(writer, " SYSTEM \"{}\"", system_id)?;
            }
            writer.write_all(b">")?;
        }
        NodeKind::Element { name, attrs } => {
            write!(writer, "<{}", name)?;
            for attr in attrs {
                write!(writer, " {}=\"", attr.name)?;
                escape(writer, &attr.value)?;
                writer.write_all(b"\"")?;
            }

            if VOID_ELEMENTS.contains(&name.as_str()) {
                if doc.first_child(node).is_some() {
                    return Err(HtmlError::VoidElementChildren(name.clone()));
                }
                writer.write_all(b"/>")?;
                return Ok(());
            }
            writer.write_all(b">")?;

            if LEADING_NEWLINE_ELEMENTS.contains(&name.as_str()) {
                if let Some(first) = doc.first_child(node) {
                    if let NodeKind::Text(text) = doc.kind(first) {
                        if text.starts_with('\n') {
                            writer.write_all(b"\n")?;
                        }
                    }
                }
            }

            stack.push(Frame::Close(node));
            push_children(doc, node, RAW_TEXT_ELEMENTS.contains(&name.as_str()), stack);
        }
    }
    Ok(())
}

fn push_children(doc: &Document, node: NodeId, raw: bool, stack: &mut Vec<Frame>) {
    let children: Vec<NodeId> = doc.children(node).collect();
    for child in children.into_iter().rev() {
        match doc.kind(child) {
            NodeKind::Text(_) if raw => stack.push(Frame::RawText(child)),
            _ => stack.push(Frame::Open(child)),
        }
    }
}

/// Serializes `node` into a `String`.
pub fn to_string(doc: &Document, node: NodeId) -> Result<String, HtmlError> {
    let mut buffer = Vec::new();
    serialize(doc, node, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

fn escape<W: Write>(writer: &mut W, text: &str) -> Result<(), HtmlError> {
    let mut last = 0;
    for (i, c) in text.char_indices() {
        let replacement = match c {
            '&' => "&amp;",
            '\'' => "&#39;",
            '<' => "&lt;",
            '>' => "&gt;",
            '"' => "&#34;",
            '\r' => "&#13;",
            _ => continue,
        };
        writer.write_all(text[last..i].as_bytes())?;
        writer.write_all(replacement.as_bytes())?;
        last = i + c.len_utf8();
    }
    writer.write_all(text[last..].as_bytes())?;
    Ok(())
}

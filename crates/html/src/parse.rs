//! HTML parsing into the document arena.

use std::io::Read;

use html5ever::tendril::TendrilSink;
use html5ever::{LocalName, ParseOpts, QualName, namespace_url, ns};
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use stitch_dom::{Attribute, Document, NodeId};

use crate::error::HtmlError;

/// Context element used when parsing fetched fragments. Being an unknown tag it
/// puts the tree builder in body mode, so bare text and elements are accepted.
pub const DEFAULT_CONTEXT_TAG: &str = "content";

/// Parses a complete HTML document.
///
/// Missing `html`, `head` and `body` elements are synthesized by the tree
/// builder, so an empty input yields `<html><head></head><body></body></html>`.
pub fn parse_document<R: Read>(mut reader: R) -> Result<Document, HtmlError> {
    let dom = html5ever::parse_document(RcDom::default(), ParseOpts::default())
        .from_utf8()
        .read_from(&mut reader)
        .map_err(HtmlError::Parse)?;

    let mut doc = Document::new();
    let root = doc.root();
    let children = dom.document.children.borrow();
    for child in children.iter() {
        if let Some(id) = convert(&mut doc, child)? {
            doc.append_child(root, id)?;
        }
    }
    Ok(doc)
}

pub fn parse_str(input: &str) -> Result<Document, HtmlError> {
    parse_document(input.as_bytes())
}

/// Parses `input` as the content of a `<context>` element.
///
/// The top-level nodes are allocated in `doc` and returned detached, in order.
pub fn parse_fragment(
    doc: &mut Document,
    input: &[u8],
    context: &str,
) -> Result<Vec<NodeId>, HtmlError> {
    let context_name = QualName::new(None, ns!(html), LocalName::from(context));
    let mut reader = input;
    let dom = html5ever::parse_fragment(
        RcDom::default(),
        ParseOpts::default(),
        context_name,
        Vec::new(),
    )
    .from_utf8()
    .read_from(&mut reader)
    .map_err(HtmlError::Parse)?;

    // The tree builder hangs fragment content off a synthetic <html> root.
    let mut nodes = Vec::new();
    let containers = dom.document.children.borrow();
    for container in containers.iter() {
        for child in container.children.borrow().iter() {
            if let Some(id) = convert(doc, child)? {
                nodes.push(id);
            }
        }
    }
    log::trace!("Parsed fragment into {} top-level nodes", nodes.len());
    Ok(nodes)
}

/// Copies the subtree under `handle` into `doc` and returns its detached root.
///
/// Nodes are created top-down from a worklist, then linked bottom-up so that
/// every parent is still detached while its children are appended.
fn convert(doc: &mut Document, handle: &Handle) -> Result<Option<NodeId>, HtmlError> {
    let Some(root) = create_node(doc, handle) else {
        return Ok(None);
    };

    let mut pending = vec![(handle.clone(), root)];
    let mut links: Vec<(NodeId, Vec<NodeId>)> = Vec::new();
    while let Some((handle, id)) = pending.pop() {
        let mut children = Vec::new();
        for child in content_children(&handle) {
            if let Some(child_id) = create_node(doc, &child) {
                children.push(child_id);
                pending.push((child, child_id));
            }
        }
        links.push((id, children));
    }

    for (parent, children) in links.into_iter().rev() {
        for child in children {
            doc.append_child(parent, child)?;
        }
    }
    Ok(Some(root))
}

fn create_node(doc: &mut Document, handle: &Handle) -> Option<NodeId> {
    let id = match &handle.data {
        NodeData::Element { name, attrs, .. } => {
            let attrs = attrs
                .borrow()
                .iter()
                .map(|attr| {
                    let key = match &attr.name.prefix {
                        Some(prefix) => format!("{}:{}", prefix, attr.name.local),
                        None => attr.name.local.to_string(),
                    };
                    Attribute::new(key, attr.value.to_string())
                })
                .collect();
            doc.create_element(name.local.to_string(), attrs)
        }
        NodeData::Text { contents } => doc.create_text(contents.borrow().to_string()),
        NodeData::Comment { contents } => doc.create_comment(contents.to_string()),
        NodeData::Doctype {
            name,
            public_id,
            system_id,
        } => doc.create_doctype(name.to_string(), public_id.to_string(), system_id.to_string()),
        NodeData::Document | NodeData::ProcessingInstruction { .. } => return None,
    };
    Some(id)
}

/// Children of `handle`. `<template>` keeps them in a separate content fragment.
fn content_children(handle: &Handle) -> Vec<Handle> {
    match &handle.data {
        NodeData::Element {
            template_contents, ..
        } => match &*template_contents.borrow() {
            Some(content) => content.children.borrow().clone(),
            None => handle.children.borrow().clone(),
        },
        _ => handle.children.borrow().clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stitch_dom::{NodeKind, walk};

    fn walk_tags(doc: &Document) -> String {
        walk(doc, doc.root())
            .map(|id| match doc.kind(id) {
                NodeKind::Element { name, .. } => name.clone(),
                NodeKind::Text(text) => text.clone(),
                _ => "#other".to_string(),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn test_parse_empty_input_synthesizes_skeleton() {
        let doc = parse_str("").unwrap();
        assert_eq!(walk_tags(&doc), "body head html");
    }

    #[test]
    fn test_parse_html_only() {
        let doc = parse_str("<html></html>").unwrap();
        assert_eq!(walk_tags(&doc), "body head html");
    }

    #[test]
    fn test_parse_self_closing_tags_follow_tree_construction() {
        let doc = parse_str(
            "<html><head/><body><p><a/><a/></p><div><a/></div><div><foo/><bar/></body></html>",
        )
        .unwrap();
        assert_eq!(walk_tags(&doc), "bar foo a div a div a a p body head html");
    }

    #[test]
    fn test_parse_sibling_divs() {
        let doc = parse_str("<html><head/><body><div/><div/></body></html>").unwrap();
        assert_eq!(walk_tags(&doc), "div div body head html");
    }

    #[test]
    fn test_parse_keeps_attributes_in_order() {
        let doc = parse_str(r#"<fragment src="http://a" id="x">Foo</fragment>"#).unwrap();
        let fragment = walk(&doc, doc.root())
            .find(|&id| doc.is_element_named(id, "fragment"))
            .unwrap();
        match doc.kind(fragment) {
            NodeKind::Element { attrs, .. } => {
                assert_eq!(attrs[0], Attribute::new("src", "http://a"));
                assert_eq!(attrs[1], Attribute::new("id", "x"));
            }
            other => panic!("expected element, got {:?}", other),
        }
        assert_eq!(doc.text_content(fragment), "Foo");
    }

    #[test]
    fn test_parse_fragment_returns_detached_top_level_nodes() {
        let mut doc = Document::new();
        let nodes = parse_fragment(
            &mut doc,
            b"<content><p>hello</p></content>tail",
            DEFAULT_CONTEXT_TAG,
        )
        .unwrap();

        assert_eq!(nodes.len(), 2);
        assert!(doc.is_element_named(nodes[0], "content"));
        assert_eq!(doc.kind(nodes[1]), &NodeKind::Text("tail".to_string()));
        assert!(nodes.iter().all(|&id| doc.node(id).is_detached()));
    }

    #[test]
    fn test_parse_fragment_drops_document_wrappers() {
        let mut doc = Document::new();
        let nodes = parse_fragment(
            &mut doc,
            b"<html><head/><body><content>Foo</content></body></html>",
            DEFAULT_CONTEXT_TAG,
        )
        .unwrap();

        assert_eq!(nodes.len(), 1);
        assert!(doc.is_element_named(nodes[0], "content"));
        assert_eq!(doc.text_content(nodes[0]), "Foo");
    }

    #[test]
    fn test_parse_fragment_keeps_link_elements() {
        let mut doc = Document::new();
        let nodes = parse_fragment(
            &mut doc,
            br#"<content><link rel="stylesheet" href="https://example.com"></content>"#,
            DEFAULT_CONTEXT_TAG,
        )
        .unwrap();
        let link = doc.first_child(nodes[0]).unwrap();
        assert!(doc.is_element_named(link, "link"));
        assert_eq!(doc.attr(link, "href"), Some("https://example.com"));
    }

    #[test]
    fn test_parse_fragment_empty_body() {
        let mut doc = Document::new();
        let nodes = parse_fragment(&mut doc, b"", DEFAULT_CONTEXT_TAG).unwrap();
        assert!(nodes.is_empty());
    }

    #[test]
    fn test_parse_deeply_nested_document() {
        let depth = 20_000;
        let doc = parse_str(&"<div>".repeat(depth)).unwrap();

        let innermost = walk(&doc, doc.root())
            .find(|&id| doc.is_element_named(id, "div") && doc.first_child(id).is_none())
            .unwrap();
        let mut levels = 0;
        let mut cursor = Some(innermost);
        while let Some(id) = cursor {
            if doc.is_element_named(id, "div") {
                levels += 1;
            }
            cursor = doc.parent(id);
        }
        assert_eq!(levels, depth);
    }
}

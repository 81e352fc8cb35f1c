//! Resolution of a single placeholder into a detached sub-tree.

use stitch_dom::{DomError, Document, NodeId};
use stitch_html::{HtmlError, parse_fragment};
use stitch_traits::Fetcher;

use crate::config::ComposeConfig;
use crate::error::ResolveError;

/// Fetches the placeholder's source and wraps the parsed top-level nodes in a
/// new anonymous element. The placeholder itself is left untouched.
///
/// The fetch happens exactly once; there is no retry.
pub fn resolve(
    doc: &mut Document,
    placeholder: NodeId,
    fetcher: &dyn Fetcher,
    config: &ComposeConfig,
) -> Result<NodeId, ResolveError> {
    let url = match doc.attr(placeholder, &config.source_attr) {
        Some(src) if !src.is_empty() => src.to_string(),
        _ => return Err(ResolveError::MissingSource(config.source_attr.clone())),
    };

    let response = fetcher
        .fetch(&url)
        .map_err(|source| ResolveError::Transport {
            url: url.clone(),
            source,
        })?;

    if !response.is_ok() {
        return Err(ResolveError::UpstreamStatus {
            url,
            status: response.status,
        });
    }

    let nodes = parse_fragment(doc, &response.body, &config.context_tag).map_err(|source| {
        ResolveError::FragmentParse {
            url: url.clone(),
            source,
        }
    })?;

    let wrapper = doc.create_anonymous();
    for node in nodes {
        doc.append_child(wrapper, node)
            .map_err(|e| ResolveError::FragmentParse {
                url: url.clone(),
                source: HtmlError::Dom(e),
            })?;
    }
    log::debug!("Resolved '{}' via {}", url, fetcher.name());
    Ok(wrapper)
}

/// Moves the placeholder's children under a new anonymous element.
///
/// The fallback keeps the original content verbatim; only the `fragment` tag
/// itself is replaced by the tag-less wrapper.
pub fn fallback(doc: &mut Document, placeholder: NodeId) -> Result<NodeId, DomError> {
    let wrapper = doc.create_anonymous();
    doc.reparent_children(placeholder, wrapper)?;
    Ok(wrapper)
}

#[cfg(test)]
mod tests {
    use super::*;
    use stitch_dom::Attribute;
    use stitch_html::to_string;
    use stitch_traits::{FetchError, FetchResponse, InMemoryFetcher};

    fn placeholder(doc: &mut Document, attrs: Vec<Attribute>, fallback_text: &str) -> NodeId {
        let root = doc.root();
        let el = doc.create_element("fragment", attrs);
        doc.append_child(root, el).unwrap();
        if !fallback_text.is_empty() {
            let text = doc.create_text(fallback_text);
            doc.append_child(el, text).unwrap();
        }
        el
    }

    #[test]
    fn test_resolve_missing_src() {
        let mut doc = Document::new();
        let el = placeholder(&mut doc, vec![], "");
        let fetcher = InMemoryFetcher::new();

        let err = resolve(&mut doc, el, &fetcher, &ComposeConfig::default()).unwrap_err();
        assert!(matches!(err, ResolveError::MissingSource(ref attr) if attr == "src"));
        assert_eq!(fetcher.total_hits(), 0);
    }

    #[test]
    fn test_resolve_empty_src_is_never_fetched() {
        let mut doc = Document::new();
        let el = placeholder(&mut doc, vec![Attribute::new("src", "")], "");
        let fetcher = InMemoryFetcher::new();

        let err = resolve(&mut doc, el, &fetcher, &ComposeConfig::default()).unwrap_err();
        assert!(matches!(err, ResolveError::MissingSource(_)));
        assert_eq!(fetcher.total_hits(), 0);
    }

    #[test]
    fn test_resolve_wraps_parsed_content() {
        let mut doc = Document::new();
        let el = placeholder(&mut doc, vec![Attribute::new("src", "http://frag")], "");
        let fetcher = InMemoryFetcher::new()
            .with("http://frag", "<html><head/><body><content>Foo</content></body></html>");

        let wrapper = resolve(&mut doc, el, &fetcher, &ComposeConfig::default()).unwrap();
        assert_eq!(to_string(&doc, wrapper).unwrap(), "<><content>Foo</content></>");
        assert!(doc.node(wrapper).is_detached());
        assert_eq!(fetcher.hits("http://frag"), 1);
    }

    #[test]
    fn test_resolve_upstream_status() {
        let mut doc = Document::new();
        let el = placeholder(&mut doc, vec![Attribute::new("src", "http://broken")], "");
        let fetcher = InMemoryFetcher::new();
        fetcher.add_response("http://broken", FetchResponse::new(500, "oops")).unwrap();

        let err = resolve(&mut doc, el, &fetcher, &ComposeConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            ResolveError::UpstreamStatus { status: 500, .. }
        ));
    }

    #[test]
    fn test_resolve_non_200_success_status_is_rejected() {
        let mut doc = Document::new();
        let el = placeholder(&mut doc, vec![Attribute::new("src", "http://nocontent")], "");
        let fetcher = InMemoryFetcher::new();
        fetcher.add_response("http://nocontent", FetchResponse::new(204, "")).unwrap();

        let err = resolve(&mut doc, el, &fetcher, &ComposeConfig::default()).unwrap_err();
        assert!(matches!(err, ResolveError::UpstreamStatus { status: 204, .. }));
    }

    #[test]
    fn test_resolve_transport_error() {
        let mut doc = Document::new();
        let el = placeholder(&mut doc, vec![Attribute::new("src", "http://down")], "");
        let fetcher = InMemoryFetcher::new();
        fetcher.add_failure(
            "http://down",
            FetchError::Timeout {
                url: "http://down".to_string(),
            },
        )
        .unwrap();

        let err = resolve(&mut doc, el, &fetcher, &ComposeConfig::default()).unwrap_err();
        match err {
            ResolveError::Transport { url, source } => {
                assert_eq!(url, "http://down");
                assert!(matches!(source, FetchError::Timeout { .. }));
            }
            other => panic!("expected transport error, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_uses_configured_source_attribute() {
        let mut doc = Document::new();
        let el = placeholder(&mut doc, vec![Attribute::new("data-src", "http://frag")], "");
        let fetcher = InMemoryFetcher::new().with("http://frag", "<p>x</p>");
        let config = ComposeConfig {
            source_attr: "data-src".to_string(),
            ..Default::default()
        };

        let wrapper = resolve(&mut doc, el, &fetcher, &config).unwrap();
        assert_eq!(to_string(&doc, wrapper).unwrap(), "<><p>x</p></>");
    }

    #[test]
    fn test_fallback_moves_children_verbatim() {
        let mut doc = Document::new();
        let el = placeholder(&mut doc, vec![], "Foo");
        let bold = doc.create_element("b", vec![]);
        doc.append_child(el, bold).unwrap();

        let wrapper = fallback(&mut doc, el).unwrap();
        assert_eq!(to_string(&doc, wrapper).unwrap(), "<>Foo<b></b></>");
        assert_eq!(doc.first_child(el), None);
    }

    #[test]
    fn test_fallback_of_empty_placeholder() {
        let mut doc = Document::new();
        let el = placeholder(&mut doc, vec![], "");
        let wrapper = fallback(&mut doc, el).unwrap();
        assert_eq!(to_string(&doc, wrapper).unwrap(), "<></>");
    }
}

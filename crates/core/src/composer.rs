//! The composition engine.
//!
//! Placeholders are visited in walk order, deepest and last first. Each one is
//! resolved (or falls back to its own children), its content is composed
//! recursively, any `<link>` found in it is moved into the document `head`, and
//! the result is spliced where the placeholder was.

use std::io::Read;
use std::sync::Arc;

use stitch_dom::{DomError, Document, NodeId, find_section, walk};
use stitch_traits::Fetcher;

use crate::config::{ComposeConfig, HEAD_TAG, HeadPolicy, LINK_TAG, SCRIPT_TAG};
use crate::error::{ComposeError, ResolveError};
use crate::hoist::{add_header, add_script};
use crate::resolver::{fallback, resolve};

/// Lifecycle of a single placeholder occurrence. There is no retry state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderState {
    Pending,
    Resolved,
    Fallback,
    Spliced,
}

/// Counters collected over one composition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComposeReport {
    /// Placeholders replaced with fetched content.
    pub resolved: usize,
    /// Placeholders replaced with their own children.
    pub fallbacks: usize,
    /// `<link>` elements moved into the document head.
    pub hoisted: usize,
}

impl ComposeReport {
    pub fn placeholders(&self) -> usize {
        self.resolved + self.fallbacks
    }
}

/// Composes documents using an injected [`Fetcher`].
///
/// A `Composer` holds no per-document state, so one instance can serve any
/// number of documents. The documents themselves are mutated in place and must
/// not be shared between concurrent compositions.
#[derive(Debug, Clone)]
pub struct Composer {
    fetcher: Arc<dyn Fetcher>,
    config: ComposeConfig,
}

impl Composer {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            fetcher,
            config: ComposeConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ComposeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ComposeConfig {
        &self.config
    }

    pub fn fetcher(&self) -> &Arc<dyn Fetcher> {
        &self.fetcher
    }

    /// Parses an HTML document, composes it and returns the serialized result.
    pub fn compose<R: Read>(&self, reader: R) -> Result<Vec<u8>, ComposeError> {
        let mut doc = stitch_html::parse_document(reader).map_err(ComposeError::Parse)?;
        let root = doc.root();
        let report = self.compose_node_with_report(&mut doc, root)?;
        log::info!(
            "Composed document: {} resolved, {} fallbacks, {} links hoisted",
            report.resolved,
            report.fallbacks,
            report.hoisted
        );

        let mut output = Vec::new();
        stitch_html::serialize(&doc, root, &mut output).map_err(ComposeError::Serialize)?;
        Ok(output)
    }

    pub fn compose_str(&self, input: &str) -> Result<String, ComposeError> {
        let output = self.compose(input.as_bytes())?;
        String::from_utf8(output)
            .map_err(|e| ComposeError::Serialize(stitch_html::HtmlError::InvalidUtf8(e)))
    }

    /// Composes every placeholder below `node`, in place.
    pub fn compose_node(&self, doc: &mut Document, node: NodeId) -> Result<(), ComposeError> {
        self.compose_node_with_report(doc, node).map(|_| ())
    }

    pub fn compose_node_with_report(
        &self,
        doc: &mut Document,
        node: NodeId,
    ) -> Result<ComposeReport, ComposeError> {
        let mut report = ComposeReport::default();
        let placeholders: Vec<NodeId> = walk(doc, node)
            .filter(|&id| doc.is_element_named(id, &self.config.placeholder_tag))
            .collect();
        log::debug!("Found {} placeholders", placeholders.len());

        for placeholder in placeholders {
            self.substitute(doc, placeholder, placeholder, 0, &mut report)?;
        }
        Ok(report)
    }

    /// Replaces one placeholder with its resolved or fallback content.
    ///
    /// `anchor` is the top-level placeholder the chain started from; links are
    /// hoisted into the head of the document it belongs to.
    fn substitute(
        &self,
        doc: &mut Document,
        placeholder: NodeId,
        anchor: NodeId,
        depth: usize,
        report: &mut ComposeReport,
    ) -> Result<(), ComposeError> {
        let Some(parent) = doc.parent(placeholder) else {
            log::warn!("Skipping detached placeholder {:?}", placeholder);
            return Ok(());
        };
        log::debug!("{:?} {:?} at depth {}", placeholder, PlaceholderState::Pending, depth);

        let attempt = match self.config.max_depth {
            Some(limit) if depth > limit => Err(ResolveError::DepthExceeded { depth, limit }),
            _ => resolve(doc, placeholder, self.fetcher.as_ref(), &self.config),
        };
        let (content, state) = match attempt {
            Ok(content) => {
                report.resolved += 1;
                (content, PlaceholderState::Resolved)
            }
            Err(e) => {
                match &e {
                    ResolveError::MissingSource(_) => log::debug!("Rendering fallback: {}", e),
                    _ => log::warn!("Rendering fallback: {}", e),
                }
                // Fail before the fallback children leave the placeholder.
                if self.config.missing_head == HeadPolicy::Error
                    && walk(doc, placeholder).any(|id| doc.is_element_named(id, LINK_TAG))
                {
                    find_section(doc, HEAD_TAG, anchor)?;
                }
                report.fallbacks += 1;
                (fallback(doc, placeholder)?, PlaceholderState::Fallback)
            }
        };
        log::debug!("{:?} {:?}", placeholder, state);

        if let Err(e) = self.compose_content(doc, content, anchor, depth, report) {
            if state == PlaceholderState::Fallback {
                doc.reparent_children(content, placeholder)?;
            }
            return Err(e);
        }

        doc.insert_before(parent, content, placeholder)?;
        doc.remove_child(parent, placeholder)?;
        log::debug!("{:?} {:?}", placeholder, PlaceholderState::Spliced);
        Ok(())
    }

    /// Composes nested placeholders and hoists links found in `content`.
    fn compose_content(
        &self,
        doc: &mut Document,
        content: NodeId,
        anchor: NodeId,
        depth: usize,
        report: &mut ComposeReport,
    ) -> Result<(), ComposeError> {
        for id in walk(doc, content) {
            if doc.is_element_named(id, &self.config.placeholder_tag) {
                self.substitute(doc, id, anchor, depth + 1, report)?;
            } else if doc.is_element_named(id, LINK_TAG) {
                if self.hoist(doc, anchor, id)? {
                    report.hoisted += 1;
                }
            } else if doc.is_element_named(id, SCRIPT_TAG) {
                add_script(doc, id)?;
            }
        }
        Ok(())
    }

    /// Moves `link` into the head. Returns `false` if it was left in place.
    fn hoist(&self, doc: &mut Document, anchor: NodeId, link: NodeId) -> Result<bool, ComposeError> {
        match add_header(doc, anchor, link) {
            Ok(_) => {
                doc.detach(link);
                Ok(true)
            }
            Err(DomError::SectionNotFound(tag)) if self.config.missing_head == HeadPolicy::Ignore => {
                log::warn!("No <{}> to hoist into, leaving <{}> in place", tag, LINK_TAG);
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }
}

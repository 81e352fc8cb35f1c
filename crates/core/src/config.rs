use serde::Deserialize;

pub const PLACEHOLDER_TAG: &str = "fragment";
pub const SOURCE_ATTR: &str = "src";
pub const HEAD_TAG: &str = "head";
pub const LINK_TAG: &str = "link";
pub const SCRIPT_TAG: &str = "script";

/// What to do when a `<link>` must be hoisted but the document has no `head`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadPolicy {
    /// Abort composition with `ComposeError::SectionNotFound`. (Default)
    #[default]
    Error,
    /// Log a warning and leave the element where it was found.
    Ignore,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ComposeConfig {
    /// How many levels of placeholders inside fetched content are resolved.
    ///
    /// A placeholder written in the document itself is at depth 0. Deeper
    /// placeholders render their fallback without being fetched.
    ///
    /// Defaults to `None` (unbounded). Cyclic sources then recurse until the
    /// stack runs out, so set a limit when sources are not trusted.
    pub max_depth: Option<usize>,

    pub missing_head: HeadPolicy,

    /// Tag name marking a placeholder. Defaults to `fragment`.
    pub placeholder_tag: String,

    /// Attribute holding the source URL. Defaults to `src`.
    pub source_attr: String,

    /// Context element fetched bodies are parsed in. Defaults to `content`.
    pub context_tag: String,
}

impl Default for ComposeConfig {
    fn default() -> Self {
        Self {
            max_depth: None,
            missing_head: HeadPolicy::default(),
            placeholder_tag: PLACEHOLDER_TAG.to_string(),
            source_attr: SOURCE_ATTR.to_string(),
            context_tag: stitch_html::DEFAULT_CONTEXT_TAG.to_string(),
        }
    }
}

//! Builder configuration

/// Tag used for selectors such as `#id.class` that name no tag
pub const DEFAULT_TAG: &str = "div";

/// Builder configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuilderConfig {
    /// Tag for element selectors without a tag token. With `None` such a
    /// selector is rejected because there is no element to apply it to.
    pub default_tag: Option<String>,
}

impl BuilderConfig {
    /// Require an explicit tag (or an update target) for every element
    pub fn strict() -> Self {
        Self { default_tag: None }
    }
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            default_tag: Some(DEFAULT_TAG.to_string()),
        }
    }
}

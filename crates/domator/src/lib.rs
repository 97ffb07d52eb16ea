//! Declarative element construction from compact selector strings
//!
//! A selector such as `ul.menu[role=menu]` or `h1 Hello` plus optional
//! attribute mappings and child lists turns into the same nodes a sequence of
//! manual document calls would produce. Passing an existing node first
//! updates it in place instead.
//!
//! ## Core Design
//!
//! ```text
//! "tag#id.class[k=v] text" → parse_selector → SelectorDescriptor
//!                                                    ↓
//! Vec<BuildArg> ─────────────→ plan (validate) → realize → NodeApi
//! ```
//!
//! ```
//! use dom::DomArena;
//! use domator::{args, Attrs, Domator};
//!
//! let mut d = Domator::new(DomArena::new());
//! let card = d
//!     .build(args!["div.card", Attrs::new().with("title", "Card"), ["h1 Hello", "p World"]])
//!     .unwrap();
//!
//! assert_eq!(
//!     d.to_string(card).unwrap(),
//!     "<div class=\"card\" title=\"Card\"><h1>Hello</h1><p>World</p></div>"
//! );
//! ```

pub mod args;
pub mod attrs;
mod builder;
pub mod config;
pub mod error;
pub mod selector;

pub use args::{args_from_json, BuildArg, Child};
pub use attrs::{AttrList, Attrs};
pub use config::BuilderConfig;
pub use error::{DomatorError, ParseError, Result};
pub use selector::{parse_selector, SelectorDescriptor};

use dom::NodeApi;
use serde_json::Value;

/// Build with the default configuration
///
/// A first argument that is a node switches to update mode: the node is
/// mutated in place and returned.
pub fn build<A: NodeApi>(api: &mut A, args: Vec<BuildArg<A::Node>>) -> Result<A::Node> {
    builder::build(api, &BuilderConfig::default(), args)
}

/// Serialize a node subtree to markup
pub fn to_string<A: NodeApi>(api: &A, node: A::Node) -> Result<String> {
    Ok(api.outer_html(node)?)
}

/// Builder bound to one document
pub struct Domator<A: NodeApi> {
    config: BuilderConfig,
    document: A,
}

impl<A: NodeApi> Domator<A> {
    pub fn new(document: A) -> Self {
        Self::with_config(document, BuilderConfig::default())
    }

    pub fn with_config(document: A, config: BuilderConfig) -> Self {
        Self { config, document }
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    pub fn document(&self) -> &A {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut A {
        &mut self.document
    }

    /// Swap the document nodes are built into, returning the previous one
    pub fn set_document(&mut self, document: A) -> A {
        std::mem::replace(&mut self.document, document)
    }

    pub fn into_document(self) -> A {
        self.document
    }

    pub fn build(&mut self, args: Vec<BuildArg<A::Node>>) -> Result<A::Node> {
        builder::build(&mut self.document, &self.config, args)
    }

    /// Update `target` in place; same as a build whose first argument is it
    pub fn update(&mut self, target: A::Node, args: Vec<BuildArg<A::Node>>) -> Result<A::Node> {
        let mut all = Vec::with_capacity(args.len() + 1);
        all.push(BuildArg::Node(target));
        all.extend(args);
        self.build(all)
    }

    /// Build from a JSON array of arguments (see [`args_from_json`])
    pub fn build_json(&mut self, value: &Value) -> Result<A::Node> {
        let args = args_from_json(value)?;
        self.build(args)
    }

    pub fn to_string(&self, node: A::Node) -> Result<String> {
        to_string(&self.document, node)
    }
}

impl<A: NodeApi + Default> Default for Domator<A> {
    fn default() -> Self {
        Self::new(A::default())
    }
}

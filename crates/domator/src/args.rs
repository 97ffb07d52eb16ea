//! Build arguments
//!
//! A build call takes an ordered list of heterogeneous arguments. Each one is
//! a closed variant resolved once, so the builder never inspects types at run
//! time.

use serde_json::{Map, Value};

use crate::attrs::Attrs;
use crate::error::{DomatorError, Result};

/// Object key that carries a child list inside a JSON attribute mapping
pub const CHILDREN_KEY: &str = "children";

/// One positional argument of a build call
#[derive(Debug, Clone, PartialEq)]
pub enum BuildArg<N> {
    /// Selector string (`tag#id.class[attr] text`)
    Selector(String),
    /// Attribute mapping for the current element
    Attrs(Attrs),
    /// Child list for the current element
    Children(Vec<Child<N>>),
    /// Existing node: update target when first, a child otherwise
    Node(N),
}

impl<N> BuildArg<N> {
    pub fn node(node: N) -> Self {
        BuildArg::Node(node)
    }
}

/// One entry of a child list
#[derive(Debug, Clone, PartialEq)]
pub enum Child<N> {
    /// Literal text node
    Text(String),
    /// Selector realized into a new node
    Selector(String),
    /// Existing node, attached as-is
    Node(N),
    /// Nested list, flattened into siblings
    List(Vec<Child<N>>),
}

impl<N> Child<N> {
    pub fn text(text: impl Into<String>) -> Self {
        Child::Text(text.into())
    }

    pub fn node(node: N) -> Self {
        Child::Node(node)
    }
}

impl<N> From<&str> for BuildArg<N> {
    fn from(selector: &str) -> Self {
        BuildArg::Selector(selector.to_string())
    }
}

impl<N> From<String> for BuildArg<N> {
    fn from(selector: String) -> Self {
        BuildArg::Selector(selector)
    }
}

impl<N> From<Attrs> for BuildArg<N> {
    fn from(attrs: Attrs) -> Self {
        BuildArg::Attrs(attrs)
    }
}

impl<N> From<Vec<Child<N>>> for BuildArg<N> {
    fn from(children: Vec<Child<N>>) -> Self {
        BuildArg::Children(children)
    }
}

impl<N, const M: usize> From<[&str; M]> for BuildArg<N> {
    fn from(selectors: [&str; M]) -> Self {
        BuildArg::Children(selectors.into_iter().map(Child::from).collect())
    }
}

impl<N> From<&str> for Child<N> {
    fn from(selector: &str) -> Self {
        Child::Selector(selector.to_string())
    }
}

impl<N> From<String> for Child<N> {
    fn from(selector: String) -> Self {
        Child::Selector(selector)
    }
}

impl<N> From<Vec<Child<N>>> for Child<N> {
    fn from(children: Vec<Child<N>>) -> Self {
        Child::List(children)
    }
}

/// Collect build arguments, converting each with `BuildArg::from`
///
/// ```
/// use domator::{args, Attrs, BuildArg};
///
/// let menu = Attrs::new().with("role", "menu");
/// let list: Vec<BuildArg<u32>> = args!["ul.menu", menu, ["li", "li"]];
/// assert_eq!(list.len(), 3);
/// ```
#[macro_export]
macro_rules! args {
    ($($arg:expr),* $(,)?) => {
        vec![$($crate::BuildArg::from($arg)),*]
    };
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn invalid(index: usize, reason: String) -> DomatorError {
    DomatorError::InvalidArgument { index, reason }
}

/// Decode a JSON array of build arguments
///
/// Strings are selectors, objects are attribute mappings (a `children` key
/// becomes a child list right after the mapping), arrays are child lists.
pub fn args_from_json<N>(value: &Value) -> Result<Vec<BuildArg<N>>> {
    let items = value.as_array().ok_or_else(|| {
        invalid(
            0,
            format!("expected an array of arguments, got {}", value_kind(value)),
        )
    })?;

    let mut args = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match item {
            Value::String(selector) => args.push(BuildArg::Selector(selector.clone())),
            Value::Object(map) => {
                let (attrs, children) = attrs_from_json(index, map)?;
                args.push(BuildArg::Attrs(attrs));
                if let Some(children) = children {
                    args.push(BuildArg::Children(children));
                }
            }
            Value::Array(list) => args.push(BuildArg::Children(children_from_json(index, list)?)),
            other => {
                return Err(invalid(
                    index,
                    format!("unsupported {} argument", value_kind(other)),
                ))
            }
        }
    }

    Ok(args)
}

fn attrs_from_json<N>(
    index: usize,
    map: &Map<String, Value>,
) -> Result<(Attrs, Option<Vec<Child<N>>>)> {
    let mut attrs = Attrs::new();
    let mut children = None;

    for (key, value) in map {
        if key == CHILDREN_KEY {
            let list = value.as_array().ok_or_else(|| {
                invalid(
                    index,
                    format!("`{CHILDREN_KEY}` must be an array, got {}", value_kind(value)),
                )
            })?;
            children = Some(children_from_json(index, list)?);
            continue;
        }

        match value {
            Value::String(s) => attrs.insert(key, s),
            Value::Number(n) => attrs.insert(key, n),
            Value::Bool(b) => attrs.insert(key, b),
            other => {
                return Err(invalid(
                    index,
                    format!(
                        "attribute `{key}` has unsupported {} value",
                        value_kind(other)
                    ),
                ))
            }
        }
    }

    Ok((attrs, children))
}

fn children_from_json<N>(index: usize, list: &[Value]) -> Result<Vec<Child<N>>> {
    list.iter()
        .map(|item| match item {
            Value::String(selector) => Ok(Child::Selector(selector.clone())),
            Value::Array(nested) => Ok(Child::List(children_from_json(index, nested)?)),
            other => Err(invalid(
                index,
                format!("unsupported {} in child list", value_kind(other)),
            )),
        })
        .collect()
}

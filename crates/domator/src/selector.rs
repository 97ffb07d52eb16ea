//! Selector parser
//!
//! A selector is a compact description of one element:
//!
//! ```text
//! tag#id.class.class[name="value"][flag] literal text
//! └────────── head ──────────────────────┘ └── text ──┘
//! ```
//!
//! Everything after the first space is literal text (possibly empty). The
//! head is scanned left to right: an optional tag at the very start, then any
//! number of `#id`, `.class` and `[attr]` tokens.

use std::str::FromStr;

use serde::Serialize;

use crate::attrs::AttrList;
use crate::error::ParseError;

/// Parsed form of a selector string
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SelectorDescriptor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
    #[serde(skip_serializing_if = "AttrList::is_empty")]
    pub attrs: AttrList,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl SelectorDescriptor {
    /// Only literal text, nothing that needs an element
    pub fn is_text_only(&self) -> bool {
        self.tag.is_none()
            && self.id.is_none()
            && self.classes.is_empty()
            && self.attrs.is_empty()
            && self.text.is_some()
    }

    /// Fold a later descriptor into this one. The tag is left alone.
    pub fn merge(&mut self, other: SelectorDescriptor) {
        if other.id.is_some() {
            self.id = other.id;
        }
        self.classes.extend(other.classes);
        self.attrs.extend(other.attrs);
        if other.text.is_some() {
            self.text = other.text;
        }
    }
}

impl FromStr for SelectorDescriptor {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_selector(s)
    }
}

fn is_tag_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-'
}

fn is_token_start(c: char) -> bool {
    matches!(c, '#' | '.' | '[')
}

/// Attribute syntax that cannot appear inside an id or class name
fn is_reserved_char(c: char) -> bool {
    matches!(c, ']' | '=' | '"' | '\'')
}

/// Parse a selector string into its descriptor
pub fn parse_selector(selector: &str) -> Result<SelectorDescriptor, ParseError> {
    if selector.is_empty() {
        return Err(ParseError::Empty);
    }

    let (head, text) = match selector.split_once(' ') {
        Some((head, text)) => (head, Some(text.to_string())),
        None => (selector, None),
    };

    let mut descriptor = SelectorDescriptor {
        text,
        ..Default::default()
    };

    let mut pos = head.find(|c: char| !is_tag_char(c)).unwrap_or(head.len());
    if pos > 0 {
        descriptor.tag = Some(head[..pos].to_string());
    }

    while let Some(c) = head[pos..].chars().next() {
        match c {
            '#' => {
                let (name, end) = read_name(head, pos, "id")?;
                descriptor.id = Some(name.to_string());
                pos = end;
            }
            '.' => {
                let (name, end) = read_name(head, pos, "class")?;
                descriptor.classes.push(name.to_string());
                pos = end;
            }
            '[' => {
                let (name, value, end) = read_attribute(head, pos)?;
                descriptor.attrs.insert(name, value);
                pos = end;
            }
            found => return Err(ParseError::UnexpectedChar { found, position: pos }),
        }
    }

    Ok(descriptor)
}

/// Read an id or class name following the sigil at `sigil`
fn read_name<'a>(
    head: &'a str,
    sigil: usize,
    kind: &'static str,
) -> Result<(&'a str, usize), ParseError> {
    let start = sigil + 1;
    let end = head[start..]
        .find(is_token_start)
        .map_or(head.len(), |i| start + i);

    if end == start {
        return Err(ParseError::EmptyName {
            kind,
            position: sigil,
        });
    }

    let name = &head[start..end];
    if let Some((offset, found)) = name.char_indices().find(|&(_, c)| is_reserved_char(c)) {
        return Err(ParseError::UnexpectedChar {
            found,
            position: start + offset,
        });
    }
    Ok((name, end))
}

/// Read `[name]`, `[name=value]` or `[name="value"]` starting at `open`
fn read_attribute(head: &str, open: usize) -> Result<(&str, &str, usize), ParseError> {
    let unterminated = ParseError::UnterminatedAttribute { position: open };
    let body = open + 1;

    let name_end = head[body..]
        .find(|c: char| c == '=' || c == ']')
        .map(|i| body + i)
        .ok_or(unterminated.clone())?;

    if name_end == body {
        return Err(ParseError::MissingAttributeName { position: body });
    }
    let name = &head[body..name_end];

    if head[name_end..].starts_with(']') {
        return Ok((name, "", name_end + 1));
    }

    let value_start = name_end + 1;
    match head[value_start..].chars().next() {
        Some(quote @ ('"' | '\'')) => {
            let inner = value_start + 1;
            let close = head[inner..]
                .find(quote)
                .map(|i| inner + i)
                .ok_or(unterminated.clone())?;
            let after = close + 1;

            match head[after..].chars().next() {
                Some(']') => Ok((name, &head[inner..close], after + 1)),
                Some(found) => Err(ParseError::UnexpectedChar {
                    found,
                    position: after,
                }),
                None => Err(unterminated),
            }
        }
        _ => {
            let close = head[value_start..]
                .find(']')
                .map(|i| value_start + i)
                .ok_or(unterminated)?;
            Ok((name, &head[value_start..close], close + 1))
        }
    }
}

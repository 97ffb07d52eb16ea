//! Attribute containers
//!
//! `AttrList` is an insertion-ordered name/value list with upsert semantics.
//! `Attrs` is the attribute mapping a caller passes to a build: the reserved
//! keys `class`, `className` and `text` are pulled out on insertion, every
//! other key lands in the plain list.

use serde::{Serialize, Serializer};
use smallvec::SmallVec;

pub const CLASS_KEY: &str = "class";
pub const CLASS_NAME_KEY: &str = "className";
pub const TEXT_KEY: &str = "text";

/// Ordered attribute list. A repeated name keeps its first position and
/// takes the last value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttrList(SmallVec<[(String, String); 4]>);

impl AttrList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Upsert every entry of `other`, in its order
    pub fn extend(&mut self, other: AttrList) {
        for (name, value) in other.0 {
            self.insert(name, value);
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AttrList {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut list = AttrList::new();
        for (name, value) in iter {
            list.insert(name, value);
        }
        list
    }
}

// Serialized as a map in insertion order
impl Serialize for AttrList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// Attribute mapping argument of a build call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attrs {
    class: Option<String>,
    class_name: Option<String>,
    text: Option<String>,
    plain: AttrList,
}

impl Attrs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    ///
    /// ```
    /// use domator::Attrs;
    ///
    /// let attrs = Attrs::new().with("title", "Hi").with("tabindex", 2).with("text", "body");
    /// assert_eq!(attrs.text(), Some("body"));
    /// assert_eq!(attrs.plain().get("tabindex"), Some("2"));
    /// ```
    pub fn with(mut self, key: &str, value: impl ToString) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert a key, routing reserved keys to their dedicated slots.
    /// Values are coerced to strings.
    pub fn insert(&mut self, key: &str, value: impl ToString) {
        let value = value.to_string();
        match key {
            CLASS_KEY => self.class = Some(value),
            CLASS_NAME_KEY => self.class_name = Some(value),
            TEXT_KEY => self.text = Some(value),
            _ => self.plain.insert(key, value),
        }
    }

    pub fn class(&self) -> Option<&str> {
        self.class.as_deref()
    }

    pub fn class_name(&self) -> Option<&str> {
        self.class_name.as_deref()
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Every non-reserved attribute, in insertion order
    pub fn plain(&self) -> &AttrList {
        &self.plain
    }

    /// Class tokens from `class` followed by those from `className`
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.class
            .iter()
            .chain(self.class_name.iter())
            .flat_map(|value| value.split_ascii_whitespace())
    }

    /// Apply a later mapping over this one; its values win
    pub fn merge(&mut self, other: Attrs) {
        if other.class.is_some() {
            self.class = other.class;
        }
        if other.class_name.is_some() {
            self.class_name = other.class_name;
        }
        if other.text.is_some() {
            self.text = other.text;
        }
        self.plain.extend(other.plain);
    }

    pub fn is_empty(&self) -> bool {
        self.class.is_none()
            && self.class_name.is_none()
            && self.text.is_none()
            && self.plain.is_empty()
    }
}

impl<K: AsRef<str>, V: ToString> FromIterator<(K, V)> for Attrs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Attrs::new();
        for (key, value) in iter {
            attrs.insert(key.as_ref(), value);
        }
        attrs
    }
}

impl<K: AsRef<str>, V: ToString, const N: usize> From<[(K, V); N]> for Attrs {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

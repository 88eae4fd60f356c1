use bson::{Bson, Document};
use serde::{Serialize, Serializer};

use crate::types::FieldName;

/// Operator applied by a [`Condition`] once it is turned into a [`Fragment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionKind {
    Eq,
    StartsWith,
    StartsWithCi,
    ObjectIdEq,
    In,
    ObjectIdIn,
}

impl ConditionKind {
    #[must_use]
    pub const fn operator(self) -> &'static str {
        match self {
            Self::Eq | Self::ObjectIdEq => "$eq",
            Self::StartsWith | Self::StartsWithCi => "$regex",
            Self::In | Self::ObjectIdIn => "$in",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub key: FieldName,
    pub value: Bson,
}

impl Condition {
    pub fn new(key: impl Into<FieldName>, value: impl Into<Bson>) -> Self {
        Self { key: key.into(), value: value.into() }
    }
}

/// One filter condition in query-document shape: `{ key: { $op: value, .. } }`.
///
/// Only the builders in this module construct fragments, so the key is never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    key: FieldName,
    body: Document,
}

impl Fragment {
    pub(crate) fn new(key: FieldName, body: Document) -> Self {
        Self { key, body }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Operator document stored under [`Fragment::key`].
    #[must_use]
    pub fn body(&self) -> &Document {
        &self.body
    }

    #[must_use]
    pub fn to_document(&self) -> Document {
        let mut d = Document::new();
        d.insert(self.key.clone(), self.body.clone());
        d
    }

    #[must_use]
    pub fn into_document(self) -> Document {
        let mut d = Document::new();
        d.insert(self.key, self.body);
        d
    }
}

impl Serialize for Fragment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_document().serialize(serializer)
    }
}

/// Logical AND of fragments.
///
/// Fragments are kept in insertion order so serialization is deterministic.
/// When two fragments share a top-level key the later one wins: operators are
/// not merged, so callers should use one condition per key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompositeFilter {
    fragments: Vec<Fragment>,
}

impl CompositeFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, fragment: Fragment) {
        self.fragments.push(fragment);
    }

    #[must_use]
    pub fn and(mut self, fragment: Fragment) -> Self {
        self.push(fragment);
        self
    }

    #[must_use]
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    #[must_use]
    pub fn to_document(&self) -> Document {
        let mut out = Document::new();
        for f in &self.fragments {
            out.insert(f.key.clone(), f.body.clone());
        }
        out
    }
}

impl From<Fragment> for CompositeFilter {
    fn from(fragment: Fragment) -> Self {
        Self { fragments: vec![fragment] }
    }
}

impl FromIterator<Fragment> for CompositeFilter {
    fn from_iter<I: IntoIterator<Item = Fragment>>(iter: I) -> Self {
        Self { fragments: iter.into_iter().collect() }
    }
}

impl From<CompositeFilter> for Document {
    fn from(filter: CompositeFilter) -> Self {
        filter.to_document()
    }
}

impl Serialize for CompositeFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_document().serialize(serializer)
    }
}

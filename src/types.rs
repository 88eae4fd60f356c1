use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::ops::Deref;

pub type FieldName = String;

/// Variable mapping consumed by the template engine.
pub type Variables = bson::Document;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Order {
    Asc,
    Desc,
}

impl Order {
    #[must_use]
    pub const fn direction(self) -> i32 {
        match self {
            Self::Asc => 1,
            Self::Desc => -1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: FieldName,
    pub order: Order,
}

impl SortSpec {
    pub fn asc(field: impl Into<FieldName>) -> Self {
        Self { field: field.into(), order: Order::Asc }
    }

    pub fn desc(field: impl Into<FieldName>) -> Self {
        Self { field: field.into(), order: Order::Desc }
    }
}

/// A string field that decodes `null` or a missing value as the empty string.
///
/// Pair with `#[serde(default)]` on the containing struct field so absent keys
/// are accepted as well.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct OptionalString(pub String);

impl OptionalString {
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for OptionalString {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self(Option::<String>::deserialize(deserializer)?.unwrap_or_default()))
    }
}

impl Deref for OptionalString {
    type Target = str;
    fn deref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OptionalString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for OptionalString {
    fn from(s: String) -> Self {
        Self(s)
    }
}

use bson::{Bson, Document};
use serde::{Serialize, Serializer};
use std::collections::HashSet;

use crate::condition::CompositeFilter;
use crate::errors::QueryError;
use crate::types::{FieldName, SortSpec};

/// Named-field mapping used as a stage body, typically a projection.
///
/// Keys are unique; inserting an existing key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Operation {
    fields: Document,
}

impl Operation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    /// Returns [`QueryError::EmptyKey`] if `key` is empty.
    pub fn insert(
        &mut self,
        key: impl Into<FieldName>,
        value: impl Into<Bson>,
    ) -> Result<(), QueryError> {
        let key = key.into();
        if key.is_empty() {
            return Err(QueryError::EmptyKey);
        }
        self.fields.insert(key, value);
        Ok(())
    }

    /// Builder form of [`Operation::insert`].
    ///
    /// # Errors
    /// Returns [`QueryError::EmptyKey`] if `key` is empty.
    pub fn with(
        mut self,
        key: impl Into<FieldName>,
        value: impl Into<Bson>,
    ) -> Result<Self, QueryError> {
        self.insert(key, value)?;
        Ok(self)
    }

    /// `key: 1`
    ///
    /// # Errors
    /// Returns [`QueryError::EmptyKey`] if `key` is empty.
    pub fn include(self, key: impl Into<FieldName>) -> Result<Self, QueryError> {
        self.with(key, 1)
    }

    /// `key: 0`
    ///
    /// # Errors
    /// Returns [`QueryError::EmptyKey`] if `key` is empty.
    pub fn exclude(self, key: impl Into<FieldName>) -> Result<Self, QueryError> {
        self.with(key, 0)
    }

    /// `key: <expression>`, e.g. `compute("full", doc! {"$concat": ["$first", " ", "$last"]})`.
    ///
    /// # Errors
    /// Returns [`QueryError::EmptyKey`] if `key` is empty.
    pub fn compute(
        self,
        key: impl Into<FieldName>,
        expr: impl Into<Bson>,
    ) -> Result<Self, QueryError> {
        self.with(key, expr)
    }

    /// # Errors
    /// Returns [`QueryError::EmptyKey`] on the first empty key.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, QueryError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<FieldName>,
        V: Into<Bson>,
    {
        let mut op = Self::new();
        for (k, v) in pairs {
            op.insert(k, v)?;
        }
        Ok(op)
    }

    #[must_use]
    pub fn as_document(&self) -> &Document {
        &self.fields
    }

    #[must_use]
    pub fn into_document(self) -> Document {
        self.fields
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl TryFrom<Document> for Operation {
    type Error = QueryError;

    fn try_from(fields: Document) -> Result<Self, Self::Error> {
        if fields.keys().any(String::is_empty) {
            return Err(QueryError::EmptyKey);
        }
        Ok(Self { fields })
    }
}

impl From<CompositeFilter> for Operation {
    fn from(filter: CompositeFilter) -> Self {
        Self { fields: filter.to_document() }
    }
}

impl Serialize for Operation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

#[derive(Debug, Clone, PartialEq)]
enum StageKind {
    Match(CompositeFilter),
    Project(Operation),
    Sort(Vec<SortSpec>),
    Limit(i64),
    Skip(i64),
}

/// One aggregation step.
///
/// Only [`match_stage`], [`project`], [`sort`], [`limit`] and [`skip`] construct
/// stages, so every stage has passed its leaf checks.
#[derive(Debug, Clone, PartialEq)]
pub struct Stage(StageKind);

impl Stage {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match &self.0 {
            StageKind::Match(_) => "$match",
            StageKind::Project(_) => "$project",
            StageKind::Sort(_) => "$sort",
            StageKind::Limit(_) => "$limit",
            StageKind::Skip(_) => "$skip",
        }
    }

    #[must_use]
    pub fn as_match(&self) -> Option<&CompositeFilter> {
        match &self.0 {
            StageKind::Match(filter) => Some(filter),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_project(&self) -> Option<&Operation> {
        match &self.0 {
            StageKind::Project(op) => Some(op),
            _ => None,
        }
    }

    #[must_use]
    pub fn body(&self) -> Bson {
        match &self.0 {
            StageKind::Match(filter) => Bson::Document(filter.to_document()),
            StageKind::Project(op) => Bson::Document(op.as_document().clone()),
            StageKind::Sort(specs) => {
                let mut d = Document::new();
                for s in specs {
                    d.insert(s.field.clone(), s.order.direction());
                }
                Bson::Document(d)
            }
            StageKind::Limit(n) | StageKind::Skip(n) => Bson::Int64(*n),
        }
    }

    /// `{ <name>: <body> }`
    #[must_use]
    pub fn to_document(&self) -> Document {
        let mut d = Document::new();
        d.insert(self.name(), self.body());
        d
    }
}

impl Serialize for Stage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_document().serialize(serializer)
    }
}

/// Wraps a filter (or a single fragment) in a `$match` stage.
pub fn match_stage(filter: impl Into<CompositeFilter>) -> Stage {
    Stage(StageKind::Match(filter.into()))
}

/// Wraps an operation in a `$project` stage. An empty operation is accepted.
#[must_use]
pub fn project(op: Operation) -> Stage {
    Stage(StageKind::Project(op))
}

/// `$sort` over the given keys in order. Each field may appear once.
///
/// # Errors
/// [`QueryError::InvalidStage`] for no keys or a repeated field, [`QueryError::EmptyKey`]
/// for an empty field.
pub fn sort<I>(specs: I) -> Result<Stage, QueryError>
where
    I: IntoIterator<Item = SortSpec>,
{
    let specs: Vec<SortSpec> = specs.into_iter().collect();
    if specs.is_empty() {
        return Err(QueryError::InvalidStage("$sort requires at least one key".into()));
    }
    let mut seen = HashSet::new();
    for s in &specs {
        if s.field.is_empty() {
            return Err(QueryError::EmptyKey);
        }
        if !seen.insert(s.field.as_str()) {
            return Err(QueryError::InvalidStage(format!("$sort repeats field '{}'", s.field)));
        }
    }
    Ok(Stage(StageKind::Sort(specs)))
}

fn count(stage: &str, n: u64) -> Result<i64, QueryError> {
    i64::try_from(n)
        .map_err(|_| QueryError::InvalidStage(format!("{stage} out of range, got {n}")))
}

/// # Errors
/// Returns [`QueryError::InvalidStage`] for zero or a count beyond `i64::MAX`.
pub fn limit(n: u64) -> Result<Stage, QueryError> {
    if n == 0 {
        return Err(QueryError::InvalidStage("$limit must be positive, got 0".into()));
    }
    Ok(Stage(StageKind::Limit(count("$limit", n)?)))
}

/// # Errors
/// Returns [`QueryError::InvalidStage`] for a count beyond `i64::MAX`.
pub fn skip(n: u64) -> Result<Stage, QueryError> {
    Ok(Stage(StageKind::Skip(count("$skip", n)?)))
}

use bson::{Bson, Document};

use super::types::{CompositeFilter, Condition, ConditionKind, Fragment};
use crate::errors::QueryError;
use crate::ident::{IdFallback, parse_object_id_with};

/// Turns a condition into a fragment for the given operator kind.
///
/// `fallback` only matters for the identifier kinds.
///
/// # Errors
/// [`QueryError::EmptyKey`] for an empty key, [`QueryError::IncompatibleValue`] when the
/// value type does not suit the operator and [`QueryError::InvalidIdentifier`] for a bad
/// identifier under [`IdFallback::Reject`].
pub fn fragment(
    kind: ConditionKind,
    cond: Condition,
    fallback: IdFallback,
) -> Result<Fragment, QueryError> {
    let Condition { key, value } = cond;
    if key.is_empty() {
        return Err(QueryError::EmptyKey);
    }
    let op = kind.operator();
    let body = match kind {
        ConditionKind::Eq => op_doc(op, value),
        ConditionKind::StartsWith | ConditionKind::StartsWithCi => {
            let Bson::String(prefix) = value else {
                return Err(QueryError::IncompatibleValue { key, expected: "string" });
            };
            let mut body = op_doc(op, format!("^{}", regex::escape(&prefix)));
            if kind == ConditionKind::StartsWithCi {
                body.insert("$options", "i");
            }
            body
        }
        ConditionKind::ObjectIdEq => op_doc(op, to_object_id(&key, value, fallback)?),
        ConditionKind::In => {
            let Bson::Array(values) = value else {
                return Err(QueryError::IncompatibleValue { key, expected: "array" });
            };
            op_doc(op, values)
        }
        ConditionKind::ObjectIdIn => {
            let Bson::Array(values) = value else {
                return Err(QueryError::IncompatibleValue { key, expected: "array of identifiers" });
            };
            let ids = values
                .into_iter()
                .map(|v| to_object_id(&key, v, fallback))
                .collect::<Result<Vec<_>, _>>()?;
            op_doc(op, ids)
        }
    };
    log::trace!(target: "querykit::condition", "built {op} fragment on '{key}'");
    Ok(Fragment::new(key, body))
}

fn op_doc(op: &str, value: impl Into<Bson>) -> Document {
    let mut d = Document::new();
    d.insert(op, value);
    d
}

fn to_object_id(key: &str, value: Bson, fallback: IdFallback) -> Result<Bson, QueryError> {
    match value {
        Bson::ObjectId(oid) => Ok(Bson::ObjectId(oid)),
        Bson::String(s) => parse_object_id_with(&s, fallback).map(Bson::ObjectId),
        _ => Err(QueryError::IncompatibleValue {
            key: key.to_owned(),
            expected: "hex identifier string",
        }),
    }
}

/// `{key: {$eq: value}}`
///
/// # Errors
/// Returns [`QueryError::EmptyKey`] if the key is empty.
pub fn equal_to(cond: Condition) -> Result<Fragment, QueryError> {
    fragment(ConditionKind::Eq, cond, IdFallback::Reject)
}

/// Anchored prefix match: `{key: {$regex: "^<escaped value>"}}`.
///
/// Regex metacharacters in the value are escaped, so `"a.b"` only matches a literal dot.
///
/// # Errors
/// Fails on an empty key or a non-string value.
pub fn string_starts_with(cond: Condition) -> Result<Fragment, QueryError> {
    fragment(ConditionKind::StartsWith, cond, IdFallback::Reject)
}

/// Case-insensitive variant of [`string_starts_with`].
///
/// # Errors
/// Fails on an empty key or a non-string value.
pub fn string_starts_with_ci(cond: Condition) -> Result<Fragment, QueryError> {
    fragment(ConditionKind::StartsWithCi, cond, IdFallback::Reject)
}

/// `{key: {$eq: ObjectId(value)}}`. An unparsable value is an error.
///
/// # Errors
/// Returns [`QueryError::InvalidIdentifier`] if the value is not a valid hex identifier.
pub fn object_id_match(cond: Condition) -> Result<Fragment, QueryError> {
    fragment(ConditionKind::ObjectIdEq, cond, IdFallback::Reject)
}

/// [`object_id_match`] with an explicit fallback policy.
///
/// # Errors
/// Same as [`object_id_match`] unless `fallback` is [`IdFallback::Generate`].
pub fn object_id_match_with(cond: Condition, fallback: IdFallback) -> Result<Fragment, QueryError> {
    fragment(ConditionKind::ObjectIdEq, cond, fallback)
}

/// `{key: {$in: [..]}}`; the condition value must be an array.
///
/// # Errors
/// Fails on an empty key or a non-array value.
pub fn in_values(cond: Condition) -> Result<Fragment, QueryError> {
    fragment(ConditionKind::In, cond, IdFallback::Reject)
}

/// `{key: {$in: [ObjectId..]}}` from hex strings, preserving order.
///
/// # Errors
/// Fails on an empty key, or on the first invalid identifier under [`IdFallback::Reject`].
pub fn object_id_in<I, S>(
    key: impl Into<String>,
    ids: I,
    fallback: IdFallback,
) -> Result<Fragment, QueryError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let values: Vec<Bson> = ids.into_iter().map(|s| Bson::String(s.into())).collect();
    fragment(ConditionKind::ObjectIdIn, Condition::new(key, values), fallback)
}

/// ANDs fragments into one filter. Later fragments win on duplicate keys.
pub fn pipe<I>(fragments: I) -> CompositeFilter
where
    I: IntoIterator<Item = Fragment>,
{
    fragments.into_iter().collect()
}

/// [`pipe`] over builder results, stopping at the first error.
///
/// # Errors
/// Returns the first error among `fragments`.
pub fn try_pipe<I>(fragments: I) -> Result<CompositeFilter, QueryError>
where
    I: IntoIterator<Item = Result<Fragment, QueryError>>,
{
    fragments.into_iter().collect()
}

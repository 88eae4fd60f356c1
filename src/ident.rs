//! Conversion from hex strings to store identifiers.
//!
//! Conversion fails loudly by default. [`IdFallback::Generate`] restores the
//! substitute-a-fresh-identifier behaviour some callers rely on; it has to be
//! requested explicitly because a typo in an id then silently targets an
//! unrelated document.

use crate::errors::QueryError;
use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// What to do when an identifier string does not parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IdFallback {
    /// Fail with [`QueryError::InvalidIdentifier`].
    #[default]
    Reject,
    /// Substitute a newly generated identifier.
    Generate,
}

impl FromStr for IdFallback {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "generate" => Ok(Self::Generate),
            other => Err(QueryError::Config(format!("unknown id fallback '{other}'"))),
        }
    }
}

/// # Errors
/// Returns [`QueryError::InvalidIdentifier`] if `id` is not a 24-character hex string.
pub fn parse_object_id(id: &str) -> Result<ObjectId, QueryError> {
    ObjectId::parse_str(id).map_err(|e| QueryError::InvalidIdentifier(format!("'{id}': {e}")))
}

/// # Errors
/// Returns [`QueryError::InvalidIdentifier`] when `id` does not parse and `fallback` is
/// [`IdFallback::Reject`].
pub fn parse_object_id_with(id: &str, fallback: IdFallback) -> Result<ObjectId, QueryError> {
    match (parse_object_id(id), fallback) {
        (Ok(oid), _) => Ok(oid),
        (Err(e), IdFallback::Reject) => Err(e),
        (Err(_), IdFallback::Generate) => {
            let fresh = ObjectId::new();
            log::warn!(
                target: "querykit::ident",
                "identifier '{id}' did not parse; substituting generated {}",
                fresh.to_hex()
            );
            Ok(fresh)
        }
    }
}

/// List form of [`parse_object_id_with`]. Output order matches input order.
///
/// # Errors
/// With [`IdFallback::Reject`] the first invalid entry fails the whole call.
pub fn parse_object_ids<I, S>(ids: I, fallback: IdFallback) -> Result<Vec<ObjectId>, QueryError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    ids.into_iter().map(|id| parse_object_id_with(id.as_ref(), fallback)).collect()
}

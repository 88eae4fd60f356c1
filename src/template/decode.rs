use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::QueryError;
use crate::json::{ExtJsonError, parse_document};

/// Text serialization a rendered template is decoded from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextFormat {
    /// Plain JSON through serde.
    #[default]
    Json,
    /// Extended JSON: `$oid`, `$date`, `$regularExpression` wrappers become native values.
    ExtendedJson,
}

impl FromStr for TextFormat {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "extended-json" | "extjson" => Ok(Self::ExtendedJson),
            other => Err(QueryError::Config(format!("unknown template format '{other}'"))),
        }
    }
}

pub(crate) fn decode_extended_json(text: &str) -> Result<bson::Document, ExtJsonError> {
    parse_document(text)
}

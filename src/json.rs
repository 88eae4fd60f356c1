//! JSON text to `bson::Document`, honouring extended-JSON wrappers such as `{"$oid": ".."}`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtJsonError {
    #[error("invalid JSON: {0}")]
    Syntax(#[from] serde_json::Error),

    #[error("expected a JSON object, found {0}")]
    NotAnObject(&'static str),

    #[error("invalid extended JSON: {0}")]
    Bson(String),
}

fn kind_of(val: &serde_json::Value) -> &'static str {
    match val {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// Converts a JSON value that must be an object into a document.
///
/// # Errors
/// Fails if `val` is not an object or holds malformed extended-JSON wrappers.
pub fn value_to_document(val: serde_json::Value) -> Result<bson::Document, ExtJsonError> {
    match val {
        serde_json::Value::Object(obj) => {
            bson::Document::try_from(obj).map_err(|e| ExtJsonError::Bson(e.to_string()))
        }
        other => Err(ExtJsonError::NotAnObject(kind_of(&other))),
    }
}

/// Parses extended-JSON text whose top level is an object.
///
/// # Errors
/// Fails on invalid JSON, a non-object top level or malformed wrappers.
pub fn parse_document(json: &str) -> Result<bson::Document, ExtJsonError> {
    let val: serde_json::Value = serde_json::from_str(json)?;
    value_to_document(val)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_becomes_document() {
        let d = parse_document("{\"a\":1,\"b\":\"x\"}").unwrap();
        assert_eq!(d.get_str("b").unwrap(), "x");
        assert!(d.contains_key("a"));
    }

    #[test]
    fn oid_wrapper_becomes_object_id() {
        let d = parse_document(r#"{"_id":{"$oid":"5c7836b73a8de34c78fec399"}}"#).unwrap();
        assert_eq!(d.get_object_id("_id").unwrap().to_hex(), "5c7836b73a8de34c78fec399");
    }

    #[test]
    fn array_is_rejected() {
        let e = parse_document("[1,2,3]").unwrap_err();
        assert!(matches!(e, ExtJsonError::NotAnObject("an array")));
    }
}

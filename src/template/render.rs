use bson::Bson;
use serde::de::DeserializeOwned;

use super::decode::{TextFormat, decode_extended_json};
use super::scan::{Segment, scan};
use crate::errors::{DecodeCause, QueryError};
use crate::types::Variables;

/// Text substituted for a variable value.
///
/// Strings go in raw, without quotes or escaping; the surrounding template supplies
/// whatever quoting the target syntax needs.
#[must_use]
pub fn value_text(value: &Bson) -> String {
    match value {
        Bson::String(s) => s.clone(),
        Bson::Int32(i) => i.to_string(),
        Bson::Int64(i) => i.to_string(),
        Bson::Double(f) => f.to_string(),
        Bson::Boolean(b) => b.to_string(),
        Bson::Null => "null".to_owned(),
        Bson::ObjectId(oid) => oid.to_hex(),
        other => other.to_string(),
    }
}

/// A template scanned once and rendered any number of times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    /// # Errors
    /// Returns [`QueryError::MalformedPlaceholder`] for an unterminated or invalid placeholder.
    pub fn parse(text: &str) -> Result<Self, QueryError> {
        Ok(Self { segments: scan(text)? })
    }

    /// Distinct placeholder names in order of first appearance.
    #[must_use]
    pub fn placeholders(&self) -> Vec<&str> {
        let vars = self.segments.iter().filter_map(|seg| match seg {
            Segment::Var { name, .. } => Some(name.as_str()),
            Segment::Literal(_) => None,
        });
        let mut names: Vec<&str> = Vec::new();
        for name in vars {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }

    /// Substitutes every placeholder. Output is a pure function of the template and `vars`.
    ///
    /// # Errors
    /// Returns [`QueryError::UndefinedVariable`] for the first placeholder missing from `vars`.
    pub fn render(&self, vars: &Variables) -> Result<String, QueryError> {
        let mut out = String::new();
        for seg in &self.segments {
            match seg {
                Segment::Literal(text) => out.push_str(text),
                Segment::Var { name, offset } => {
                    let value =
                        vars.get(name).ok_or_else(|| QueryError::UndefinedVariable(name.clone()))?;
                    log::trace!(
                        target: "querykit::template",
                        "substituting '{name}' at byte {offset}"
                    );
                    out.push_str(&value_text(value));
                }
            }
        }
        Ok(out)
    }

    /// Renders, then decodes the text with `decode`.
    ///
    /// # Errors
    /// Rendering errors as in [`Template::render`]; a decode failure becomes
    /// [`QueryError::TemplateRender`] carrying the rendered text.
    pub fn build_with<T, E, F>(&self, vars: &Variables, decode: F) -> Result<T, QueryError>
    where
        F: FnOnce(&str) -> Result<T, E>,
        E: Into<DecodeCause>,
    {
        let rendered = self.render(vars)?;
        match decode(&rendered) {
            Ok(v) => Ok(v),
            Err(e) => Err(QueryError::render(rendered, e)),
        }
    }

    /// Renders and decodes plain JSON into any deserializable type.
    ///
    /// # Errors
    /// See [`Template::build_with`].
    pub fn build<T: DeserializeOwned>(&self, vars: &Variables) -> Result<T, QueryError> {
        self.build_with(vars, |text| serde_json::from_str::<T>(text))
    }

    /// Renders and decodes extended JSON into a document.
    ///
    /// # Errors
    /// See [`Template::build_with`].
    pub fn build_document(&self, vars: &Variables) -> Result<bson::Document, QueryError> {
        self.build_with(vars, decode_extended_json)
    }

    /// Renders and decodes into a document using the configured format.
    ///
    /// # Errors
    /// See [`Template::build_with`].
    pub fn build_as(
        &self,
        vars: &Variables,
        format: TextFormat,
    ) -> Result<bson::Document, QueryError> {
        match format {
            TextFormat::Json => self.build(vars),
            TextFormat::ExtendedJson => self.build_document(vars),
        }
    }
}

/// Renders `text` against `vars`.
///
/// # Errors
/// See [`Template::parse`] and [`Template::render`].
pub fn render(text: &str, vars: &Variables) -> Result<String, QueryError> {
    Template::parse(text)?.render(vars)
}

/// Renders `text` against `vars` and decodes the JSON result into `T`.
///
/// ```
/// use bson::doc;
/// let text = r#"{ "name": "{{name}}" }"#;
/// let q: bson::Document = querykit::template::build(text, &doc! {"name": "john"})?;
/// assert_eq!(q, doc! {"name": "john"});
/// # Ok::<(), querykit::errors::QueryError>(())
/// ```
///
/// # Errors
/// See [`Template::build_with`].
pub fn build<T: DeserializeOwned>(text: &str, vars: &Variables) -> Result<T, QueryError> {
    Template::parse(text)?.build(vars)
}

/// # Errors
/// See [`Template::build_with`].
pub fn build_document(text: &str, vars: &Variables) -> Result<bson::Document, QueryError> {
    Template::parse(text)?.build_document(vars)
}

/// # Errors
/// See [`Template::build_with`].
pub fn build_with<T, E, F>(text: &str, vars: &Variables, decode: F) -> Result<T, QueryError>
where
    F: FnOnce(&str) -> Result<T, E>,
    E: Into<DecodeCause>,
{
    Template::parse(text)?.build_with(vars, decode)
}

/// # Errors
/// See [`Template::build_with`].
pub fn build_as(
    text: &str,
    vars: &Variables,
    format: TextFormat,
) -> Result<bson::Document, QueryError> {
    Template::parse(text)?.build_as(vars, format)
}

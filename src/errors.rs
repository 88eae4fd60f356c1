use thiserror::Error;

/// Boxed cause carried by [`QueryError::TemplateRender`].
pub type DecodeCause = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Empty key")]
    EmptyKey,

    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Undefined variable: {0}")]
    UndefinedVariable(String),

    /// Decoding the substituted text failed. `rendered` is the exact text that was handed
    /// to the decoder.
    #[error("Template render error: {source}; rendered text: {rendered}")]
    TemplateRender {
        rendered: String,
        #[source]
        source: DecodeCause,
    },

    #[error("Malformed placeholder at byte {offset}")]
    MalformedPlaceholder { offset: usize },

    #[error("Incompatible value for '{key}': expected {expected}")]
    IncompatibleValue { key: String, expected: &'static str },

    #[error("Invalid stage: {0}")]
    InvalidStage(String),

    #[error("Serde JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl From<std::io::Error> for QueryError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

impl QueryError {
    /// Builds a [`QueryError::TemplateRender`] from the rendered text and any decoder error.
    pub fn render<E>(rendered: impl Into<String>, source: E) -> Self
    where
        E: Into<DecodeCause>,
    {
        Self::TemplateRender { rendered: rendered.into(), source: source.into() }
    }
}

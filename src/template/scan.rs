use crate::errors::QueryError;

pub(crate) const OPEN: &str = "{{";
pub(crate) const CLOSE: &str = "}}";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Segment {
    Literal(String),
    Var { name: String, offset: usize },
}

/// Splits template text into literal runs and placeholders.
pub(crate) fn scan(text: &str) -> Result<Vec<Segment>, QueryError> {
    let mut segments = Vec::new();
    let mut rest = text;
    let mut base = 0usize;
    while let Some(start) = rest.find(OPEN) {
        let offset = base + start;
        if start > 0 {
            segments.push(Segment::Literal(rest[..start].to_owned()));
        }
        let inner_start = start + OPEN.len();
        let Some(len) = rest[inner_start..].find(CLOSE) else {
            return Err(QueryError::MalformedPlaceholder { offset });
        };
        let name = placeholder_name(&rest[inner_start..inner_start + len])
            .ok_or(QueryError::MalformedPlaceholder { offset })?;
        segments.push(Segment::Var { name: name.to_owned(), offset });
        let consumed = inner_start + len + CLOSE.len();
        base += consumed;
        rest = &rest[consumed..];
    }
    if !rest.is_empty() {
        segments.push(Segment::Literal(rest.to_owned()));
    }
    Ok(segments)
}

// `{{ name }}` and `{{.name}}` both name `name`.
fn placeholder_name(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    let name = trimmed.strip_prefix('.').unwrap_or(trimmed);
    let mut chars = name.chars();
    let first = chars.next()?;
    if !(first.is_ascii_alphabetic() || first == '_') {
        return None;
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-')).then_some(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(name: &str, offset: usize) -> Segment {
        Segment::Var { name: name.into(), offset }
    }

    #[test]
    fn splits_literals_and_vars() {
        let segs = scan(r#"{"a":"{{x}}","b":{{ y }}}"#).unwrap();
        assert_eq!(
            segs,
            vec![
                Segment::Literal(r#"{"a":""#.into()),
                var("x", 6),
                Segment::Literal(r#"","b":"#.into()),
                var("y", 17),
                Segment::Literal("}".into()),
            ]
        );
    }

    #[test]
    fn dotted_form_is_accepted() {
        assert_eq!(scan("{{.name}}").unwrap(), vec![var("name", 0)]);
    }

    #[test]
    fn no_placeholders_is_one_literal() {
        let text = r#"{"a":{"b":1}}"#;
        assert_eq!(scan(text).unwrap(), vec![Segment::Literal(text.into())]);
        assert!(scan("").unwrap().is_empty());
    }

    #[test]
    fn unterminated_and_bad_names_fail() {
        assert!(matches!(scan("ab{{name"), Err(QueryError::MalformedPlaceholder { offset: 2 })));
        assert!(matches!(scan("{{ }}"), Err(QueryError::MalformedPlaceholder { offset: 0 })));
        assert!(matches!(scan("{{1x}}"), Err(QueryError::MalformedPlaceholder { offset: 0 })));
        assert!(matches!(scan("{{a b}}"), Err(QueryError::MalformedPlaceholder { offset: 0 })));
    }
}

//! Bracket-list annotation values.

use dispatch_core::{Error, Result};

/// Parse a `[a, b, ...]` annotation value into its trimmed elements.
///
/// Whitespace around the brackets is ignored. The whole value must be a
/// single bracketed line; anything else is [`Error::MalformedAnnotation`].
/// A list whose first element is blank is [`Error::EmptyAnnotation`].
pub fn parse_list(raw: &str) -> Result<Vec<String>> {
    let inner = raw
        .trim()
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .filter(|inner| !inner.contains('\n'))
        .ok_or_else(|| Error::MalformedAnnotation(raw.to_string()))?;

    let values: Vec<String> = inner.split(',').map(|v| v.trim().to_string()).collect();
    if values[0].is_empty() {
        return Err(Error::EmptyAnnotation(raw.to_string()));
    }

    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single() {
        assert_eq!(parse_list("[push]").unwrap(), vec!["push"]);
    }

    #[test]
    fn test_parse_trims_elements_and_brackets() {
        assert_eq!(
            parse_list("  [ pull_request ,push,  retest ]  ").unwrap(),
            vec!["pull_request", "push", "retest"]
        );
    }

    #[test]
    fn test_parse_keeps_order() {
        assert_eq!(parse_list("[release, main]").unwrap(), vec!["release", "main"]);
    }

    #[test]
    fn test_parse_missing_brackets() {
        for raw in ["push", "[push", "push]", "", "[", "]", "x[push]", "[push]x"] {
            assert!(
                matches!(parse_list(raw), Err(Error::MalformedAnnotation(_))),
                "expected malformed for {raw:?}"
            );
        }
    }

    #[test]
    fn test_parse_multiline_is_malformed() {
        assert!(matches!(
            parse_list("[push,\n pull_request]"),
            Err(Error::MalformedAnnotation(_))
        ));
    }

    #[test]
    fn test_parse_empty() {
        for raw in ["[]", "[ ]", " [   ] ", "[, main]"] {
            assert!(
                matches!(parse_list(raw), Err(Error::EmptyAnnotation(_))),
                "expected empty for {raw:?}"
            );
        }
    }

    #[test]
    fn test_parse_trailing_blank_element_is_kept() {
        assert_eq!(parse_list("[main,]").unwrap(), vec!["main", ""]);
    }

    #[test]
    fn test_error_carries_raw_value() {
        let err = parse_list("main").unwrap_err();
        assert_eq!(err.to_string(), "Annotation is not in `[item, ...]` format: \"main\"");
    }
}

//! The bracketed list encoding used by the catalog for list-valued columns.
//!
//! A list is written `c("first", "second")`. Parsing strips the enclosing
//! `c(` and `)`, collapses doubled quotes, splits on commas and trims each
//! element of whitespace and then quote characters. Anything that is not of
//! the `c(...)` form parses to an empty list.

/// Parse a list literal; malformed input yields an empty list
pub fn parse(raw: &str) -> Vec<String> {
    let inner = match raw
        .strip_prefix("c(")
        .and_then(|rest| rest.strip_suffix(')'))
    {
        Some(inner) => inner,
        None => return Vec::new(),
    };

    inner
        .replace("\"\"", "\"")
        .split(',')
        .filter(|part| !part.is_empty())
        .map(|part| part.trim().trim_matches('"').to_string())
        .collect()
}

/// Same as [`parse`], treating a missing field as malformed
pub fn parse_field(raw: Option<&str>) -> Vec<String> {
    raw.map(parse).unwrap_or_default()
}

/// Encode items as a list literal. Embedded quotes are doubled; items must
/// not contain commas, which the grammar cannot represent.
pub fn encode<S: AsRef<str>>(items: &[S]) -> String {
    let body = items
        .iter()
        .map(|item| format!("\"{}\"", item.as_ref().replace('"', "\"\"")))
        .collect::<Vec<_>>()
        .join(", ");
    format!("c({})", body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_quoted_elements() {
        assert_eq!(
            parse(r#"c("blueberries", "granulated sugar", "vanilla yogurt")"#),
            vec!["blueberries", "granulated sugar", "vanilla yogurt"]
        );
    }

    #[test]
    fn test_encode_then_parse_recovers_items() {
        let encoded = encode(&["salt", "pepper"]);
        assert_eq!(encoded, r#"c("salt", "pepper")"#);
        assert_eq!(parse(&encoded), vec!["salt", "pepper"]);
    }

    #[test]
    fn test_doubled_quotes_collapse() {
        let encoded = encode(&[r#"9" pie crust"#]);
        assert_eq!(parse(&encoded), vec![r#"9" pie crust"#]);
    }

    #[test]
    fn test_malformed_values_are_empty() {
        assert!(parse("salt, pepper").is_empty());
        assert!(parse(r#"c("salt""#).is_empty());
        assert!(parse("").is_empty());
        assert!(parse("c()").is_empty());
        assert!(parse_field(None).is_empty());
    }

    #[test]
    fn test_unquoted_and_na_elements_are_kept() {
        assert_eq!(parse(r#"c("1", NA, "2")"#), vec!["1", "NA", "2"]);
    }
}

//! Literal and identifier quoting for MySQL text.

use crate::core::{ExprError, Result, Value};

/// Renders a literal scalar as SQL text.
pub fn quote_literal(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Integer(i) => i.to_string(),
        Value::Float(f) if f.is_finite() => format!("{:?}", f),
        Value::Float(f) => {
            log::warn!("Non-finite float literal {} has no SQL form, rendering NULL", f);
            "NULL".to_string()
        }
        Value::Boolean(true) => "TRUE".to_string(),
        Value::Boolean(false) => "FALSE".to_string(),
        Value::Text(s) => quote_string(s),
    }
}

/// Wraps `s` in single quotes using the backslash escape table.
pub fn quote_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\0' => out.push_str("\\0"),
            '\u{8}' => out.push_str("\\b"),
            '\u{1a}' => out.push_str("\\Z"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Inverse of [`quote_string`]. Also accepts doubled quotes, which MySQL reads the same way.
pub fn unescape_literal(quoted: &str) -> Result<String> {
    let inner = quoted
        .strip_prefix('\'')
        .and_then(|rest| rest.strip_suffix('\''))
        .filter(|_| quoted.len() >= 2)
        .ok_or_else(|| ExprError::SyntaxError(format!("not a quoted string literal: {}", quoted)))?;

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                let escaped = chars.next().ok_or_else(|| {
                    ExprError::SyntaxError(format!("dangling escape in {}", quoted))
                })?;
                out.push(match escaped {
                    'n' => '\n',
                    'r' => '\r',
                    't' => '\t',
                    '0' => '\0',
                    'b' => '\u{8}',
                    'Z' => '\u{1a}',
                    other => other,
                });
            }
            '\'' => {
                if chars.next() != Some('\'') {
                    return Err(ExprError::SyntaxError(format!(
                        "unescaped quote inside {}",
                        quoted
                    )));
                }
                out.push('\'');
            }
            c => out.push(c),
        }
    }
    Ok(out)
}

/// Wraps `s` in single quotes, doubling embedded quotes. Used for paths and
/// `JSON_TABLE` column-list text.
pub fn quote_doubled(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

/// Backtick-quoted identifier with embedded backticks doubled.
pub fn quote_identifier(ident: &str) -> String {
    format!("`{}`", ident.replace('`', "``"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_literals() {
        assert_eq!(quote_literal(&Value::Null), "NULL");
        assert_eq!(quote_literal(&Value::Integer(-7)), "-7");
        assert_eq!(quote_literal(&Value::Float(2.5)), "2.5");
        assert_eq!(quote_literal(&Value::Float(2.0)), "2.0");
        assert_eq!(quote_literal(&Value::Float(f64::NAN)), "NULL");
        assert_eq!(quote_literal(&Value::Boolean(true)), "TRUE");
        assert_eq!(quote_literal(&Value::Boolean(false)), "FALSE");
        assert_eq!(quote_literal(&Value::Text("admin".into())), "'admin'");
    }

    #[test]
    fn test_string_escaping_single_layer() {
        let original = "it's a \\ path\nnext\tcol\r\0";
        let quoted = quote_string(original);
        assert_eq!(quoted, r"'it\'s a \\ path\nnext\tcol\r\0'");
        assert_eq!(unescape_literal(&quoted).unwrap(), original);
    }

    #[test]
    fn test_control_characters() {
        let original = "a\u{8}b\u{1a}c";
        let quoted = quote_string(original);
        assert_eq!(quoted, r"'a\bb\Zc'");
        assert_eq!(unescape_literal(&quoted).unwrap(), original);
    }

    #[test]
    fn test_other_control_characters_pass_through() {
        // MySQL has no escape sequence for these; they are valid inside a literal as-is.
        let original = "a\u{1}b\u{1f}c\u{7f}";
        let quoted = quote_string(original);
        assert_eq!(quoted, "'a\u{1}b\u{1f}c\u{7f}'");
        assert_eq!(quoted.chars().count(), original.chars().count() + 2);
        assert_eq!(unescape_literal(&quoted).unwrap(), original);
    }

    #[test]
    fn test_unescape_rejects_malformed() {
        assert!(unescape_literal("abc").is_err());
        assert!(unescape_literal("'").is_err());
        assert!(unescape_literal(r"'abc\'").is_err());
        assert!(unescape_literal("'a'b'").is_err());
        assert_eq!(unescape_literal("'O''Reilly'").unwrap(), "O'Reilly");
        assert_eq!(unescape_literal("''").unwrap(), "");
    }

    #[test]
    fn test_doubled_and_identifier_quoting() {
        assert_eq!(quote_doubled("$.\"o'clock\""), "'$.\"o''clock\"'");
        assert_eq!(quote_identifier("order`id"), "`order``id`");
    }
}

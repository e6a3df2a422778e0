//! Rust literal encoding for emitted source
//!
//! Every value that reaches generated code goes through this module. The
//! output of [`string_literal`] is always a single well-formed string
//! literal, whatever the input contains, and [`value_expr`] builds a
//! `serde_json::Value` expression out of such literals.

use serde_json::{Number, Value};

/// Encodes `value` as a double-quoted Rust string literal
pub fn string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\0' => out.push_str("\\0"),
            c if c.is_control() => out.push_str(&format!("\\u{{{:x}}}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Encodes `value` as an expression evaluating to an equal `serde_json::Value`
pub fn value_expr(value: &Value) -> String {
    match value {
        Value::Null => "::serde_json::Value::Null".to_string(),
        Value::Bool(b) => format!("::serde_json::Value::Bool({})", b),
        Value::Number(n) => format!("::serde_json::Value::from({})", number_literal(n)),
        Value::String(s) => format!(
            "::serde_json::Value::String(::std::string::String::from({}))",
            string_literal(s)
        ),
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(value_expr).collect();
            format!("::serde_json::Value::Array(::std::vec![{}])", items.join(", "))
        }
        Value::Object(map) if map.is_empty() => {
            "::serde_json::Value::Object(::serde_json::Map::new())".to_string()
        }
        Value::Object(map) => {
            let entries: Vec<String> = map
                .iter()
                .map(|(key, value)| {
                    format!(
                        "(::std::string::String::from({}), {})",
                        string_literal(key),
                        value_expr(value)
                    )
                })
                .collect();
            format!(
                "::serde_json::Value::Object([{}].into_iter().collect::<::serde_json::Map<::std::string::String, ::serde_json::Value>>())",
                entries.join(", ")
            )
        }
    }
}

fn number_literal(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        if i == i64::MIN {
            "i64::MIN".to_string()
        } else {
            format!("{}_i64", i)
        }
    } else if let Some(u) = n.as_u64() {
        format!("{}_u64", u)
    } else {
        // Finite by construction; serde_json has no NaN or infinity.
        format!("{:?}_f64", n.as_f64().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    /// Reverses the escapes produced by `string_literal`
    fn unescape(literal: &str) -> Option<String> {
        let inner = literal.strip_prefix('"')?.strip_suffix('"')?;
        let mut out = String::new();
        let mut chars = inner.chars();
        while let Some(ch) = chars.next() {
            if ch == '"' {
                return None;
            }
            if ch != '\\' {
                out.push(ch);
                continue;
            }
            match chars.next()? {
                '"' => out.push('"'),
                '\\' => out.push('\\'),
                'n' => out.push('\n'),
                'r' => out.push('\r'),
                't' => out.push('\t'),
                '0' => out.push('\0'),
                'u' => {
                    if chars.next()? != '{' {
                        return None;
                    }
                    let hex: String = chars.by_ref().take_while(|c| *c != '}').collect();
                    out.push(char::from_u32(u32::from_str_radix(&hex, 16).ok()?)?);
                }
                _ => return None,
            }
        }
        Some(out)
    }

    #[test]
    fn test_structural_characters_are_escaped() {
        let hostile = "\"); panic!(\"boom\"); (\"";
        let literal = string_literal(hostile);
        assert_eq!(literal, r#""\"); panic!(\"boom\"); (\"""#);
        assert_eq!(unescape(&literal).as_deref(), Some(hostile));
    }

    #[test]
    fn test_control_characters() {
        assert_eq!(string_literal("a\nb\t\u{7}"), r#""a\nb\t\u{7}""#);
    }

    #[test]
    fn test_value_expressions() {
        assert_eq!(value_expr(&json!(null)), "::serde_json::Value::Null");
        assert_eq!(value_expr(&json!(true)), "::serde_json::Value::Bool(true)");
        assert_eq!(value_expr(&json!(-3)), "::serde_json::Value::from(-3_i64)");
        assert_eq!(
            value_expr(&json!(u64::MAX)),
            format!("::serde_json::Value::from({}_u64)", u64::MAX)
        );
        assert_eq!(value_expr(&json!(1.5)), "::serde_json::Value::from(1.5_f64)");
        assert_eq!(
            value_expr(&json!(["a"])),
            "::serde_json::Value::Array(::std::vec![::serde_json::Value::String(::std::string::String::from(\"a\"))])"
        );
        assert_eq!(
            value_expr(&json!({})),
            "::serde_json::Value::Object(::serde_json::Map::new())"
        );
        assert!(value_expr(&json!({"k\"": 1})).contains(r#"String::from("k\"")"#));
    }

    proptest! {
        #[test]
        fn prop_string_literal_is_reversible(value in any::<String>()) {
            let literal = string_literal(&value);
            prop_assert!(!literal.contains('\n'));
            prop_assert_eq!(unescape(&literal), Some(value));
        }
    }
}

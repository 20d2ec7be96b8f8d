use serde_json::Value;

/// Extracts a non-empty trimmed string from a value that may be a plain
/// string or a translation object carrying a `default` variant (the roster
/// endpoint uses both shapes for name fields).
pub fn str_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Value::Object(map) => match map.get("default") {
            Some(Value::String(s)) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            _ => None,
        },
        _ => None,
    }
}

pub fn pick_str(value: &Value, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(found) = value.get(*key).and_then(str_of) {
            return Some(found);
        }
    }
    None
}

/// Accepts only genuinely integer JSON numbers. Floats, bools, strings and
/// nulls all yield `None` rather than being coerced.
pub fn int_of(value: &Value) -> Option<i64> {
    value.as_i64()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn str_of_handles_both_name_shapes() {
        assert_eq!(str_of(&json!("  Quinn ")), Some("Quinn".to_string()));
        assert_eq!(str_of(&json!({"default": "Hughes"})), Some("Hughes".to_string()));
        assert_eq!(str_of(&json!({"fr": "Hughes"})), None);
        assert_eq!(str_of(&json!("   ")), None);
        assert_eq!(str_of(&json!(42)), None);
    }

    #[test]
    fn pick_str_respects_key_order() {
        let value = json!({"abbrev": "VAN", "name": "Canucks"});
        assert_eq!(pick_str(&value, &["code", "abbrev"]), Some("VAN".to_string()));
    }

    #[test]
    fn int_of_rejects_non_integers() {
        assert_eq!(int_of(&json!(3)), Some(3));
        assert_eq!(int_of(&json!(3.5)), None);
        assert_eq!(int_of(&json!(true)), None);
        assert_eq!(int_of(&json!("3")), None);
        assert_eq!(int_of(&json!(null)), None);
    }
}

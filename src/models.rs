use serde::Deserialize;
use serde_json::Value;

// ============ HTB API Models ============

/// Envelope returned by `GET /api/v4/profile/{id}`.
///
/// `profile` stays a raw value so that a missing key, `null` or another falsy
/// value can be reported as "not found" before the record itself is decoded.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileEnvelope {
    #[serde(default)]
    pub profile: Option<Value>,
}

/// A user's statistics as reported by the profile provider.
///
/// Fields are kept as raw JSON so they render exactly as the provider sent
/// them; missing fields decode to `Value::Null`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub name: Value,
    #[serde(default)]
    pub points: Value,
    #[serde(default)]
    pub system_owns: Value,
    #[serde(default)]
    pub user_owns: Value,
    #[serde(default)]
    pub rank: Value,
    #[serde(default)]
    pub next_rank: Value,
    /// Percentage towards the next rank, 0-100.
    #[serde(default)]
    pub current_rank_progress: Value,
    #[serde(default)]
    pub rank_ownership: Value,
    #[serde(default)]
    pub rank_requirement: Value,
}

impl ProfileEnvelope {
    /// Extracts the profile record. Absent and falsy values (`null`, `false`,
    /// `0`, `""`) all mean "no profile".
    pub fn into_profile(self) -> Result<Option<Profile>, serde_json::Error> {
        match self.profile {
            Some(value) if is_truthy(&value) => serde_json::from_value(value).map(Some),
            _ => Ok(None),
        }
    }
}

/// Loose-JSON truthiness: everything except `null`, `false`, zero, NaN and the
/// empty string.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Reads a numeric field the way a loose JSON consumer would: numbers and
/// numeric strings count, while zero, NaN, null, booleans and anything else
/// fall back to `default`.
pub fn number_or(value: &Value, default: f64) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match parsed {
        Some(n) if n != 0.0 && n.is_finite() => n,
        _ => default,
    }
}

/// Renders a display field as text. Strings pass through, numbers use their
/// shortest decimal form, anything else renders empty.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() => format_number(f),
            _ => n.to_string(),
        },
        _ => String::new(),
    }
}

/// Shortest round-trip formatting: `500`, `187.65`, `0`.
pub fn format_number(n: f64) -> String {
    if n == 0.0 {
        // Avoid rendering "-0".
        return "0".to_string();
    }
    format!("{}", n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_profile_is_none() {
        let envelope: ProfileEnvelope = serde_json::from_value(json!({"profile": null})).unwrap();
        assert_eq!(envelope.into_profile().unwrap(), None);
    }

    #[test]
    fn test_missing_profile_is_none() {
        let envelope: ProfileEnvelope = serde_json::from_value(json!({"other": 1})).unwrap();
        assert_eq!(envelope.into_profile().unwrap(), None);
    }

    #[test]
    fn test_falsy_profile_is_none() {
        for profile in [json!(false), json!(0), json!(0.0), json!("")] {
            let envelope: ProfileEnvelope =
                serde_json::from_value(json!({ "profile": profile })).unwrap();
            assert_eq!(envelope.into_profile().unwrap(), None);
        }
    }

    #[test]
    fn test_is_truthy() {
        assert!(is_truthy(&json!({})));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!("0")));
        assert!(is_truthy(&json!(-1)));
        assert!(is_truthy(&json!(true)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&Value::Null));
    }

    #[test]
    fn test_partial_profile_decodes() {
        let envelope: ProfileEnvelope =
            serde_json::from_value(json!({"profile": {"name": "abc"}})).unwrap();
        let profile = envelope.into_profile().unwrap().unwrap();
        assert_eq!(profile.name, json!("abc"));
        assert_eq!(profile.rank_requirement, Value::Null);
    }

    #[test]
    fn test_non_object_profile_is_an_error() {
        let envelope: ProfileEnvelope =
            serde_json::from_value(json!({"profile": "abc"})).unwrap();
        assert!(envelope.into_profile().is_err());
    }

    #[test]
    fn test_number_or_truthiness() {
        assert_eq!(number_or(&json!(45), 0.0), 45.0);
        assert_eq!(number_or(&json!(12.5), 0.0), 12.5);
        assert_eq!(number_or(&json!("30"), 0.0), 30.0);
        assert_eq!(number_or(&json!(0), 1.0), 1.0);
        assert_eq!(number_or(&Value::Null, 1.0), 1.0);
        assert_eq!(number_or(&json!(""), 0.0), 0.0);
        assert_eq!(number_or(&json!("n/a"), 0.0), 0.0);
        assert_eq!(number_or(&json!(true), 0.0), 0.0);
    }

    #[test]
    fn test_display_value() {
        assert_eq!(display_value(&json!("Hacker")), "Hacker");
        assert_eq!(display_value(&json!(500)), "500");
        assert_eq!(display_value(&json!(-3)), "-3");
        assert_eq!(display_value(&json!(12.5)), "12.5");
        assert_eq!(display_value(&Value::Null), "");
        assert_eq!(display_value(&json!(true)), "");
        assert_eq!(display_value(&json!(["a"])), "");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(417.0), "417");
        assert_eq!(format_number(208.5), "208.5");
    }
}

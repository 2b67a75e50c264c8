use crate::badge::Layout;
use crate::errors::{AppError, INVALID_ID_MESSAGE};
use regex::Regex;
use std::sync::OnceLock;

/// ASCII digits only; `\d` would also accept other Unicode decimal digits.
fn id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9]+$").expect("static id pattern is valid"))
}

/// Returns true when `id` is one or more ASCII decimal digits.
pub fn is_valid_id(id: &str) -> bool {
    id_pattern().is_match(id)
}

/// Validates the raw `id` parameter and hands back the accepted value.
pub fn validate_id(raw: Option<&str>) -> Result<&str, AppError> {
    match raw {
        Some(id) if is_valid_id(id) => Ok(id),
        _ => Err(AppError::InvalidInput(INVALID_ID_MESSAGE.to_string())),
    }
}

/// Resolves the optional `layout` parameter against the configured default.
pub fn resolve_layout(raw: Option<&str>, default: Layout) -> Result<Layout, AppError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| AppError::InvalidLayout(value.to_string())),
    }
}

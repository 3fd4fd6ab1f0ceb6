//! Input validation helpers
//!
//! Centralized text length constants and validation functions. All checks
//! run before any write is attempted, so a rejected operation leaves the
//! store (and the caller's draft input) untouched.

use rust_decimal::Decimal;

use crate::db::repository::RepoError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: category, item, variant, modifier group, modifier
pub const MAX_NAME_LEN: usize = 200;

/// Item descriptions
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// Image URLs (stored verbatim from the upload collaborator)
pub const MAX_URL_LEN: usize = 2048;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required name is non-empty after trimming and within
/// the length limit. Returns the trimmed value.
pub fn validate_name(value: &str, field: &str) -> Result<String, RepoError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RepoError::Validation(format!("{field} must not be empty")));
    }
    if trimmed.len() > MAX_NAME_LEN {
        return Err(RepoError::Validation(format!(
            "{field} is too long ({} chars, max {MAX_NAME_LEN})",
            trimmed.len()
        )));
    }
    Ok(trimmed.to_string())
}

/// Validate that an optional text, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), RepoError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(RepoError::Validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Parse a monetary amount from signed decimal text.
///
/// Prices arrive as user-typed text ("4.00", "-0.25"); anything that does
/// not parse as a decimal rejects the whole operation so the caller can
/// leave the draft input in place for correction.
pub fn parse_money(value: &str, field: &str) -> Result<Decimal, RepoError> {
    value
        .trim()
        .parse::<Decimal>()
        .map_err(|_| RepoError::Validation(format!("{field} must be a decimal amount")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_rejects_whitespace_only() {
        assert!(validate_name("   ", "name").is_err());
        assert!(validate_name("", "name").is_err());
    }

    #[test]
    fn name_trims() {
        assert_eq!(validate_name("  Latte ", "name").unwrap(), "Latte");
    }

    #[test]
    fn money_parses_signed_decimal_text() {
        assert_eq!(parse_money("4.00", "price").unwrap(), Decimal::new(400, 2));
        assert_eq!(
            parse_money("-0.25", "price").unwrap(),
            Decimal::new(-25, 2)
        );
        assert_eq!(parse_money(" 0.50 ", "price").unwrap(), Decimal::new(50, 2));
    }

    #[test]
    fn money_rejects_non_numeric() {
        assert!(parse_money("free", "price").is_err());
        assert!(parse_money("", "price").is_err());
        assert!(parse_money("1.2.3", "price").is_err());
    }
}

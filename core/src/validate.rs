//! Flag spec validation.
//!
//! Catches malformed declarations (empty names, tokens without the `-`
//! marker, tokens with whitespace) before they enter a registry. Token
//! collisions across specs are the registry's job.
//!
//! # Examples
//!
//! ```
//! use command_flags_core::*;
//!
//! let spec = FlagSpec::new("Seed", "--seed", PresenceClass::Required).with_aliases(["-s"]);
//! assert!(validate_spec(&spec).is_ok());
//!
//! // Invalid: alias missing the leading dash
//! let bad = FlagSpec::new("Seed", "--seed", PresenceClass::Required).with_aliases(["s"]);
//! assert_eq!(validate_spec(&bad), Err(ValidationError::MissingMarker("s".into())));
//! ```

use thiserror::Error;

use crate::{FLAG_MARKER, FlagSpec};

/// Flag declaration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Display name is empty or whitespace-only.
    #[error("flag name cannot be empty")]
    EmptyName,
    /// Token does not start with the `-` marker.
    #[error("flag token must start with '-': {0}")]
    MissingMarker(String),
    /// Token is only markers (e.g. `"-"`, `"--"`) or contains whitespace.
    #[error("invalid flag token: {0:?}")]
    InvalidToken(String),
}

/// Validates a single flag spec.
///
/// Checks the display name and the shape of the primary token and every
/// alias. Stops at the first problem found.
pub fn validate_spec(spec: &FlagSpec) -> Result<(), ValidationError> {
    if spec.name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }

    for token in spec.tokens() {
        validate_token(token)?;
    }

    Ok(())
}

fn validate_token(token: &str) -> Result<(), ValidationError> {
    if !token.starts_with(FLAG_MARKER) {
        return Err(ValidationError::MissingMarker(token.to_string()));
    }

    let body = token.trim_start_matches(FLAG_MARKER);
    if body.is_empty() || token.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidToken(token.to_string()));
    }

    Ok(())
}

/// Returns `true` when a token is shaped like a flag.
///
/// Negative numbers (`-5`, `-1.5`, `-.5`) are not flag-shaped, so they can
/// be used as values and show up as plain leftovers.
///
/// # Examples
///
/// ```
/// use command_flags_core::looks_like_flag;
///
/// assert!(looks_like_flag("--seed"));
/// assert!(looks_like_flag("-x"));
/// assert!(!looks_like_flag("-42"));
/// assert!(!looks_like_flag("-"));
/// assert!(!looks_like_flag("flat"));
/// ```
pub fn looks_like_flag(token: &str) -> bool {
    validate_token(token).is_ok()
        && !token[1..].starts_with(|c: char| c.is_ascii_digit() || c == '.')
}

#[cfg(test)]
mod tests {
    use crate::PresenceClass;

    use super::*;

    #[test]
    fn test_validate_spec_rejects_empty_name() {
        let spec = FlagSpec::new("  ", "--seed", PresenceClass::Required);
        assert_eq!(validate_spec(&spec), Err(ValidationError::EmptyName));
    }

    #[test]
    fn test_validate_spec_rejects_bare_marker() {
        let spec = FlagSpec::new("Seed", "--", PresenceClass::Required);
        assert_eq!(
            validate_spec(&spec),
            Err(ValidationError::InvalidToken("--".to_string()))
        );
    }

    #[test]
    fn test_validate_spec_rejects_whitespace_alias() {
        let spec =
            FlagSpec::new("Seed", "--seed", PresenceClass::Required).with_aliases(["-s x"]);
        assert_eq!(
            validate_spec(&spec),
            Err(ValidationError::InvalidToken("-s x".to_string()))
        );
    }

    #[test]
    fn test_validate_spec_accepts_multi_char_short_alias() {
        let spec = FlagSpec::new("IncludePlugins", "--include-plugin-list", PresenceClass::NoValue)
            .with_aliases(["-pl"]);
        assert!(validate_spec(&spec).is_ok());
    }

    #[test]
    fn test_looks_like_flag_ignores_negative_numbers() {
        assert!(!looks_like_flag("-9000000000"));
        assert!(!looks_like_flag("-0.5"));
        assert!(looks_like_flag("-n"));
    }
}

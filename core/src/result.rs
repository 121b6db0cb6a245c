//! Parse results and per-flag errors.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use thiserror::Error;

use crate::flag::BoxedValue;
use crate::{Flag, FlagId, FlagParseFailed, FlagValue, looks_like_flag};

/// Why a flag occurrence produced no value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// A `Required` flag was the last token or was followed by another flag.
    #[error("missing value")]
    MissingValue,
    /// The value token (or the zero-argument fallback) was rejected.
    #[error(transparent)]
    ParseFailed(#[from] FlagParseFailed),
}

impl ParseErrorKind {
    /// Short machine-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::MissingValue => "missing_value",
            Self::ParseFailed(_) => "parse_failed",
        }
    }
}

/// A failed flag occurrence, with enough context to render a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{token}: {kind}")]
pub struct ParseError {
    /// Identity of the failing flag.
    pub flag: FlagId,
    /// The token as written in the input (primary token or alias).
    pub token: String,
    /// The value token that was rejected, if one was consumed.
    pub raw_input: Option<String>,
    /// What went wrong.
    pub kind: ParseErrorKind,
}

impl ParseError {
    /// Human-readable message without the flag prefix.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

struct BoundValue {
    token: String,
    value: BoxedValue,
}

/// Outcome of parsing one token stream.
///
/// Holds the values bound by flags that appeared in the input, the errors
/// of occurrences that failed, and the tokens that matched no flag. Defaults
/// are never injected; use [`get_or_default`](Self::get_or_default) to fall
/// back to a flag's default value.
#[derive(Default)]
pub struct FlagParseResult {
    values: HashMap<FlagId, BoundValue>,
    errors: Vec<ParseError>,
    remaining: Vec<String>,
}

impl FlagParseResult {
    /// Returns the value bound for `flag`, if it appeared and parsed.
    ///
    /// Values are keyed by [`FlagId`], so `flag` should come from the
    /// registry that produced this result.
    pub fn get<T: FlagValue>(&self, flag: &Flag<T>) -> Option<&T> {
        self.values
            .get(&flag.spec().id())
            .and_then(|bound| (*bound.value).as_any().downcast_ref::<T>())
    }

    /// Returns the bound value, else the flag's default value.
    ///
    /// The default only stands in for a flag absent from the input. A flag
    /// that appeared but failed (missing or rejected value) yields `None`.
    pub fn get_or_default<T: FlagValue>(&self, flag: &Flag<T>) -> Option<T> {
        match self.get(flag) {
            Some(value) => Some(value.clone()),
            None if self.error_for(&flag.spec().id()).is_some() => None,
            None => flag.default_value(),
        }
    }

    /// Returns `true` if a value is bound for `id`.
    pub fn contains(&self, id: &FlagId) -> bool {
        self.values.contains_key(id)
    }

    /// Returns the token (primary or alias) that bound the value for `id`.
    pub fn bound_token(&self, id: &FlagId) -> Option<&str> {
        self.values.get(id).map(|bound| bound.token.as_str())
    }

    /// Number of bound values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if no value is bound.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Errors in input order.
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    /// Returns the error recorded for `id`, if any.
    pub fn error_for(&self, id: &FlagId) -> Option<&ParseError> {
        self.errors.iter().find(|err| err.flag == *id)
    }

    /// Returns `true` if no occurrence failed.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Tokens that matched no flag, unmodified and in input order.
    pub fn remaining(&self) -> &[String] {
        &self.remaining
    }

    /// Remaining tokens that are flag-shaped but unknown to the registry.
    pub fn unknown_flags(&self) -> impl Iterator<Item = &str> {
        self.remaining
            .iter()
            .map(String::as_str)
            .filter(|token| looks_like_flag(token))
    }

    /// Bound values rendered with `Display`, ordered by identity.
    pub fn render_values(&self) -> BTreeMap<FlagId, String> {
        self.values
            .iter()
            .map(|(id, bound)| (id.clone(), (*bound.value).render()))
            .collect()
    }

    /// Serializable summary for callers that print or log results.
    pub fn report(&self) -> ParseReport {
        ParseReport {
            values: self.render_values(),
            errors: self
                .errors
                .iter()
                .map(|err| ErrorReport {
                    flag: err.flag.clone(),
                    token: err.token.clone(),
                    raw_input: err.raw_input.clone(),
                    kind: err.kind.label(),
                    message: err.message(),
                })
                .collect(),
            remaining: self.remaining.clone(),
            unknown_flags: self.unknown_flags().map(String::from).collect(),
        }
    }

    /// Binds a value, replacing any earlier binding or error for the flag.
    pub(crate) fn bind(&mut self, id: FlagId, token: &str, value: BoxedValue) {
        self.errors.retain(|err| err.flag != id);
        self.values.insert(
            id,
            BoundValue {
                token: token.to_string(),
                value,
            },
        );
    }

    /// Records a failure, discarding any earlier binding or error for the
    /// flag.
    pub(crate) fn fail(&mut self, error: ParseError) {
        self.values.remove(&error.flag);
        self.errors.retain(|err| err.flag != error.flag);
        self.errors.push(error);
    }

    pub(crate) fn pass_through(&mut self, token: &str) {
        self.remaining.push(token.to_string());
    }
}

impl std::fmt::Debug for FlagParseResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlagParseResult")
            .field("values", &self.render_values())
            .field("errors", &self.errors)
            .field("remaining", &self.remaining)
            .finish()
    }
}

/// Serializable view of a [`FlagParseResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseReport {
    /// Bound values by flag identity.
    pub values: BTreeMap<FlagId, String>,
    /// Failed occurrences.
    pub errors: Vec<ErrorReport>,
    /// Tokens that matched no flag.
    pub remaining: Vec<String>,
    /// Flag-shaped tokens among `remaining`.
    pub unknown_flags: Vec<String>,
}

/// Serializable view of a [`ParseError`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorReport {
    /// Identity of the failing flag.
    pub flag: FlagId,
    /// The token as written in the input.
    pub token: String,
    /// The rejected value token, omitted when none was consumed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_input: Option<String>,
    /// Machine-readable error label, see [`ParseErrorKind::label`].
    pub kind: &'static str,
    /// Human-readable message.
    pub message: String,
}

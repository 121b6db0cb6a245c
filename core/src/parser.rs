//! Token-stream parsing.
//!
//! [`FlagParser`] walks a token stream once, left to right. Each token is
//! resolved against the registry; the owning flag's [`PresenceClass`]
//! decides whether the next token is consumed as its value:
//!
//! ```text
//! ExpectFlagToken ──known Required/Optional flag──▶ ExpectValueTokenOrNone
//!       ▲   │                                               │
//!       │   ├─known NoValue flag: bind fixed value ─────────┤
//!       │   ├─anything else: pass through ──────────────────┤
//!       │   └─end of stream ──▶ Done                        │
//!       └───────────── value consumed / fallback / error ◀──┘
//! ```
//!
//! A value token is any next token that does not itself resolve to a
//! registered flag. When there is none, `Required` flags record a
//! [`MissingValue`](ParseErrorKind::MissingValue) error and `Optional` flags
//! use their zero-argument fallback. Failures never stop the walk.

use tracing::debug;

use crate::flag::ErasedFlag;
use crate::{FlagParseResult, FlagRegistry, ParseError, ParseErrorKind, PresenceClass};

enum State<'r, 't> {
    ExpectFlagToken,
    ExpectValueTokenOrNone {
        flag: &'r dyn ErasedFlag,
        token: &'t str,
    },
    Done,
}

/// Parses token streams against a registry.
///
/// # Examples
///
/// ```
/// use command_flags_core::*;
///
/// struct Text;
/// impl FlagBehavior<String> for Text {
///     fn parse(&self, input: &str) -> Result<String, FlagParseFailed> {
///         Ok(input.to_string())
///     }
/// }
///
/// let seed = Flag::required("Seed", "--seed", Text).with_aliases(["-s"]);
/// let mut builder = FlagRegistry::builder();
/// builder.register(&seed).unwrap();
/// let registry = builder.build();
///
/// let result = FlagParser::new(&registry).parse(&["world", "-s", "42"]);
/// assert_eq!(result.get(&seed).map(String::as_str), Some("42"));
/// assert_eq!(result.remaining(), ["world"]);
///
/// let result = registry.parse(&["--seed"]);
/// assert!(result.get(&seed).is_none());
/// assert_eq!(result.errors()[0].kind, ParseErrorKind::MissingValue);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FlagParser<'r> {
    registry: &'r FlagRegistry,
}

impl<'r> FlagParser<'r> {
    /// Creates a parser over `registry`.
    pub fn new(registry: &'r FlagRegistry) -> Self {
        Self { registry }
    }

    /// Parses `tokens` into a [`FlagParseResult`].
    ///
    /// Never fails as a whole: per-flag problems are collected as
    /// [`ParseError`]s and tokens matching no flag are passed through.
    pub fn parse<S: AsRef<str>>(&self, tokens: &[S]) -> FlagParseResult {
        let mut result = FlagParseResult::default();
        let mut cursor = 0;
        let mut state = State::ExpectFlagToken;

        loop {
            state = match state {
                State::ExpectFlagToken => match tokens.get(cursor).map(AsRef::as_ref) {
                    None => State::Done,
                    Some(token) => {
                        cursor += 1;
                        match self.registry.lookup(token) {
                            Some(flag) if flag.spec().presence.accepts_value() => {
                                State::ExpectValueTokenOrNone { flag, token }
                            }
                            Some(flag) => {
                                Self::bind_without_input(flag, token, &mut result);
                                State::ExpectFlagToken
                            }
                            None => {
                                result.pass_through(token);
                                State::ExpectFlagToken
                            }
                        }
                    }
                },
                State::ExpectValueTokenOrNone { flag, token } => {
                    let value = tokens
                        .get(cursor)
                        .map(AsRef::as_ref)
                        .filter(|next| !self.registry.contains(next));

                    match (value, flag.spec().presence) {
                        (Some(value), _) => {
                            cursor += 1;
                            Self::bind_value(flag, token, value, &mut result);
                        }
                        (None, PresenceClass::Required) => {
                            debug!(flag = %flag.spec().name, token, "Flag is missing its value");
                            result.fail(ParseError {
                                flag: flag.spec().id(),
                                token: token.to_string(),
                                raw_input: None,
                                kind: ParseErrorKind::MissingValue,
                            });
                        }
                        (None, _) => Self::bind_without_input(flag, token, &mut result),
                    }
                    State::ExpectFlagToken
                }
                State::Done => break,
            };
        }

        result
    }

    fn bind_value(flag: &dyn ErasedFlag, token: &str, value: &str, result: &mut FlagParseResult) {
        let spec = flag.spec();
        match flag.parse(value) {
            Ok(parsed) => {
                if result.contains(&spec.id()) {
                    debug!(flag = %spec.name, token, "Flag repeated, last occurrence wins");
                }
                result.bind(spec.id(), token, parsed);
            }
            Err(err) => {
                debug!(flag = %spec.name, token, value, error = %err, "Flag value rejected");
                result.fail(ParseError {
                    flag: spec.id(),
                    token: token.to_string(),
                    raw_input: Some(value.to_string()),
                    kind: err.into(),
                });
            }
        }
    }

    fn bind_without_input(flag: &dyn ErasedFlag, token: &str, result: &mut FlagParseResult) {
        let spec = flag.spec();
        match flag.value_without_input() {
            Ok(value) => result.bind(spec.id(), token, value),
            Err(err) => {
                debug!(flag = %spec.name, token, error = %err, "Flag fallback rejected");
                result.fail(ParseError {
                    flag: spec.id(),
                    token: token.to_string(),
                    raw_input: None,
                    kind: err.into(),
                });
            }
        }
    }
}

impl FlagRegistry {
    /// Shortcut for `FlagParser::new(self).parse(tokens)`.
    pub fn parse<S: AsRef<str>>(&self, tokens: &[S]) -> FlagParseResult {
        FlagParser::new(self).parse(tokens)
    }
}

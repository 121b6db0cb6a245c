//! Flag descriptor types.
//!
//! A [`FlagSpec`] is the immutable, untyped half of a flag declaration: its
//! display name, primary token, aliases and [`PresenceClass`]. The typed half
//! (value parsing, suggestions, defaults) lives on
//! [`FlagBehavior`](crate::FlagBehavior).

use std::any::Any;
use std::fmt;

use serde::Serialize;

/// Prefix every flag token must start with.
pub const FLAG_MARKER: char = '-';

/// Values a flag can bind.
///
/// Blanket-implemented for every type that is cloneable, printable and
/// shareable across threads, so command authors never implement it by hand.
pub trait FlagValue: Any + Clone + fmt::Debug + fmt::Display + Send + Sync {}

impl<T> FlagValue for T where T: Any + Clone + fmt::Debug + fmt::Display + Send + Sync {}

/// Identity of a flag inside a registry and a parse result.
///
/// Derived from the primary token, lower-cased, so two specs with the same
/// identity can never coexist in one registry.
///
/// Identity is scoped to a single registry. Flags from different
/// registries may share a primary token, so a [`FlagParseResult`] should
/// only be read with handles registered in the registry that produced it.
///
/// [`FlagParseResult`]: crate::FlagParseResult
///
/// # Examples
///
/// ```
/// use command_flags_core::FlagId;
///
/// assert_eq!(FlagId::from_token("--Seed"), FlagId::from_token("--seed"));
/// assert_eq!(FlagId::from_token("--seed").as_str(), "--seed");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct FlagId(String);

impl FlagId {
    /// Builds the identity for a primary token.
    pub fn from_token(token: &str) -> Self {
        Self(normalize_token(token))
    }

    /// Returns the normalized primary token.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FlagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Governs whether a flag consumes the token that follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PresenceClass {
    /// A value token must follow the flag.
    Required,
    /// A value token may follow; without one the zero-argument fallback is
    /// used.
    Optional,
    /// The flag never consumes a value; presence alone yields a fixed value.
    NoValue,
}

impl PresenceClass {
    /// Returns `true` when the flag looks ahead for a value token.
    pub fn accepts_value(self) -> bool {
        !matches!(self, Self::NoValue)
    }
}

impl fmt::Display for PresenceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Required => "required",
            Self::Optional => "optional",
            Self::NoValue => "no-value",
        };
        f.write_str(label)
    }
}

/// Immutable descriptor of a flag.
///
/// # Examples
///
/// ```
/// use command_flags_core::{FlagSpec, PresenceClass};
///
/// let spec = FlagSpec::new("WorldType", "--type", PresenceClass::Required)
///     .with_aliases(["-t"]);
/// assert!(spec.matches("--TYPE"));
/// assert!(spec.matches("-t"));
/// assert_eq!(spec.tokens().collect::<Vec<_>>(), vec!["--type", "-t"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlagSpec {
    /// Human-readable name (e.g. "WorldType").
    pub name: String,
    /// Primary token (e.g. "--type").
    pub token: String,
    /// Secondary tokens resolving to the same flag.
    pub aliases: Vec<String>,
    /// Value consumption rule.
    pub presence: PresenceClass,
}

impl FlagSpec {
    /// Creates a spec without aliases.
    pub fn new(name: impl Into<String>, token: impl Into<String>, presence: PresenceClass) -> Self {
        Self {
            name: name.into(),
            token: token.into(),
            aliases: Vec::new(),
            presence,
        }
    }

    /// Adds aliases, skipping any that repeat a token this spec already has.
    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for alias in aliases {
            let alias = alias.into();
            if !self.matches(&alias) {
                self.aliases.push(alias);
            }
        }
        self
    }

    /// Returns the identity of this flag.
    pub fn id(&self) -> FlagId {
        FlagId::from_token(&self.token)
    }

    /// Iterates the primary token followed by the aliases.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.token.as_str()).chain(self.aliases.iter().map(String::as_str))
    }

    /// Case-insensitive match against the primary token or any alias.
    pub fn matches(&self, token: &str) -> bool {
        let wanted = normalize_token(token);
        self.tokens().any(|own| normalize_token(own) == wanted)
    }
}

/// Normalizes a token for case-insensitive lookup.
pub(crate) fn normalize_token(token: &str) -> String {
    token.to_lowercase()
}

//! Flag registration and token resolution.
//!
//! Registration happens once, on a [`RegistryBuilder`]. [`build`] freezes it
//! into a [`FlagRegistry`]: an immutable snapshot with no interior
//! mutability, so it can be shared behind an [`Arc`] and read from any
//! number of threads without locking.
//!
//! # Example
//!
//! ```
//! use command_flags_core::*;
//!
//! struct Text;
//! impl FlagBehavior<String> for Text {
//!     fn parse(&self, input: &str) -> Result<String, FlagParseFailed> {
//!         Ok(input.to_string())
//!     }
//! }
//!
//! let seed = Flag::required("Seed", "--seed", Text).with_aliases(["-s"]);
//! let mut builder = FlagRegistry::builder();
//! builder.register(&seed).unwrap();
//!
//! // A second flag claiming "-S" collides case-insensitively
//! let other = Flag::required("Other", "--other", Text).with_aliases(["-S"]);
//! assert!(matches!(
//!     builder.register(&other),
//!     Err(RegistryError::DuplicateToken { .. })
//! ));
//!
//! let registry = builder.build();
//! assert_eq!(registry.resolve("-s").map(|spec| spec.id()), Some(seed.spec().id()));
//! assert!(registry.resolve("--other").is_none());
//! ```
//!
//! [`build`]: RegistryBuilder::build

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::flag::ErasedFlag;
use crate::types::normalize_token;
use crate::validate::{ValidationError, validate_spec};
use crate::{Flag, FlagId, FlagSpec, FlagValue};

/// Registration-time errors. Fatal to startup; never produced by parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The descriptor itself is malformed.
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    /// A token or alias is already claimed by another flag.
    #[error("flag token '{token}' of {rejected} is already claimed by {owner}")]
    DuplicateToken {
        /// The colliding token as written in the rejected spec.
        token: String,
        /// Name of the flag that already owns the token.
        owner: String,
        /// Name of the flag whose registration was refused.
        rejected: String,
    },
}

/// Single-writer side of the registry.
#[derive(Default)]
pub struct RegistryBuilder {
    flags: Vec<Arc<dyn ErasedFlag>>,
    tokens: HashMap<String, usize>,
}

impl RegistryBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a flag under its primary token and every alias.
    ///
    /// The descriptor is validated first. All tokens are checked before any is
    /// inserted, so a rejected registration leaves the builder exactly as it
    /// was.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Invalid`] for a malformed spec and
    /// [`RegistryError::DuplicateToken`] when any token is already claimed
    /// (case-insensitive).
    pub fn register<T: FlagValue>(&mut self, flag: &Flag<T>) -> Result<&mut Self, RegistryError> {
        let spec = flag.spec();
        validate_spec(spec)?;

        let keys: Vec<String> = spec.tokens().map(normalize_token).collect();
        for (token, key) in spec.tokens().zip(&keys) {
            if let Some(&index) = self.tokens.get(key) {
                return Err(RegistryError::DuplicateToken {
                    token: token.to_string(),
                    owner: self.flags[index].spec().name.clone(),
                    rejected: spec.name.clone(),
                });
            }
        }

        let index = self.flags.len();
        self.flags.push(flag.erased());
        self.tokens.extend(keys.into_iter().map(|key| (key, index)));
        debug!(flag = %spec.name, token = %spec.token, aliases = ?spec.aliases, "Registered flag");
        Ok(self)
    }

    /// Freezes the builder into a shareable registry.
    pub fn build(self) -> FlagRegistry {
        FlagRegistry {
            flags: self.flags,
            tokens: self.tokens,
        }
    }
}

impl fmt::Debug for RegistryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryBuilder")
            .field("flags", &self.flags.len())
            .finish()
    }
}

/// Immutable lookup table from tokens to flags.
///
/// Lookups are case-insensitive and O(1). Flags are kept in registration
/// order.
pub struct FlagRegistry {
    flags: Vec<Arc<dyn ErasedFlag>>,
    tokens: HashMap<String, usize>,
}

impl FlagRegistry {
    /// Returns a new [`RegistryBuilder`].
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Resolves a primary token or alias to its flag's descriptor.
    pub fn resolve(&self, token: &str) -> Option<&FlagSpec> {
        self.lookup(token).map(|flag| flag.spec())
    }

    /// Returns `true` if `token` resolves to a registered flag.
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains_key(&normalize_token(token))
    }

    /// Looks up a flag by identity.
    pub fn get(&self, id: &FlagId) -> Option<&FlagSpec> {
        self.resolve(id.as_str()).filter(|spec| spec.id() == *id)
    }

    /// Iterates registered specs in registration order.
    pub fn flags(&self) -> impl Iterator<Item = &FlagSpec> {
        self.flags.iter().map(|flag| flag.spec())
    }

    /// Value suggestions for the flag owning `token`.
    ///
    /// Unknown tokens yield an empty list.
    pub fn suggest(&self, token: &str) -> Vec<String> {
        self.lookup(token)
            .map(|flag| flag.suggest())
            .unwrap_or_default()
    }

    /// Returns the number of registered flags.
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// Returns `true` if no flags are registered.
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub(crate) fn lookup(&self, token: &str) -> Option<&dyn ErasedFlag> {
        self.tokens
            .get(&normalize_token(token))
            .map(|&index| self.flags[index].as_ref())
    }
}

impl fmt::Debug for FlagRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.flags()).finish()
    }
}

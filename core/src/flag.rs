//! Typed flags and their per-flag behavior.
//!
//! A [`Flag<T>`] pairs a [`FlagSpec`] with a [`FlagBehavior<T>`]: the single
//! capability interface through which a command author supplies value
//! parsing, the zero-argument fallback, completion suggestions and the
//! default value. The [`PresenceClass`] decides which of these the parser
//! calls.
//!
//! # Example
//!
//! ```
//! use command_flags_core::*;
//!
//! struct Level;
//!
//! impl FlagBehavior<u8> for Level {
//!     fn parse(&self, input: &str) -> Result<u8, FlagParseFailed> {
//!         match input.parse::<u8>() {
//!             Ok(level) if level <= 3 => Ok(level),
//!             _ => Err(FlagParseFailed::new("'%s' is not a valid debug level", input)),
//!         }
//!     }
//!
//!     fn suggest(&self) -> Vec<String> {
//!         (0..=3).map(|level| level.to_string()).collect()
//!     }
//!
//!     fn default_value(&self) -> Option<u8> {
//!         Some(0)
//!     }
//! }
//!
//! let level = Flag::required("DebugLevel", "--level", Level).with_aliases(["-l"]);
//! assert_eq!(level.spec().presence, PresenceClass::Required);
//! assert_eq!(level.suggest().len(), 4);
//! assert_eq!(level.default_value(), Some(0));
//! ```

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::{FlagSpec, FlagValue, PresenceClass};

/// Recoverable failure to turn a value token into a typed value.
///
/// Built from a message template in which every `%s` is replaced by the
/// offending input.
///
/// # Examples
///
/// ```
/// use command_flags_core::FlagParseFailed;
///
/// let err = FlagParseFailed::new("'%s' is not a valid world type", "bogus");
/// assert_eq!(err.to_string(), "'bogus' is not a valid world type");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{message}")]
pub struct FlagParseFailed {
    message: String,
}

impl FlagParseFailed {
    /// Renders `template` with `input` substituted for `%s`.
    pub fn new(template: &str, input: &str) -> Self {
        Self {
            message: template.replace("%s", input),
        }
    }

    /// Wraps an already rendered message.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the rendered message.
    pub fn as_str(&self) -> &str {
        &self.message
    }
}

/// Per-flag capability interface.
///
/// Every method has a default, so an implementation only provides what its
/// presence class needs:
///
/// | Presence   | Called by the parser                                  |
/// |------------|-------------------------------------------------------|
/// | `Required` | [`parse`](Self::parse)                                |
/// | `Optional` | [`parse`](Self::parse), else [`value_without_input`](Self::value_without_input) |
/// | `NoValue`  | [`value_without_input`](Self::value_without_input)    |
///
/// [`suggest`](Self::suggest) and [`default_value`](Self::default_value) are
/// never called during parsing. Suggestions must not fail: an unavailable
/// data source yields an empty list. A flag without a sensible default keeps
/// the `None` default.
pub trait FlagBehavior<T>: Send + Sync {
    /// Parses a value token.
    fn parse(&self, input: &str) -> Result<T, FlagParseFailed> {
        Err(FlagParseFailed::new("this flag does not accept a value, got '%s'", input))
    }

    /// Produces the value for an occurrence without a value token.
    fn value_without_input(&self) -> Result<T, FlagParseFailed> {
        Err(FlagParseFailed::message("this flag requires a value"))
    }

    /// Completion candidates for the flag's value.
    fn suggest(&self) -> Vec<String> {
        Vec::new()
    }

    /// Value to use when the flag is absent from the input entirely.
    fn default_value(&self) -> Option<T> {
        None
    }
}

struct FlagInner<T> {
    spec: FlagSpec,
    behavior: Arc<dyn FlagBehavior<T>>,
}

/// A typed flag handle.
///
/// Cheap to clone; every clone refers to the same declaration. Register it
/// with a [`RegistryBuilder`](crate::RegistryBuilder) and keep it around to
/// read typed values from a [`FlagParseResult`](crate::FlagParseResult).
pub struct Flag<T> {
    inner: Arc<FlagInner<T>>,
}

impl<T: FlagValue> Flag<T> {
    /// Declares a flag from a prepared spec.
    pub fn new(spec: FlagSpec, behavior: impl FlagBehavior<T> + 'static) -> Self {
        Self {
            inner: Arc::new(FlagInner {
                spec,
                behavior: Arc::new(behavior),
            }),
        }
    }

    /// Declares a flag that must be followed by a value.
    pub fn required(name: &str, token: &str, behavior: impl FlagBehavior<T> + 'static) -> Self {
        Self::new(FlagSpec::new(name, token, PresenceClass::Required), behavior)
    }

    /// Declares a flag whose value may be omitted.
    pub fn optional(name: &str, token: &str, behavior: impl FlagBehavior<T> + 'static) -> Self {
        Self::new(FlagSpec::new(name, token, PresenceClass::Optional), behavior)
    }

    /// Declares a flag that never takes a value.
    pub fn no_value(name: &str, token: &str, behavior: impl FlagBehavior<T> + 'static) -> Self {
        Self::new(FlagSpec::new(name, token, PresenceClass::NoValue), behavior)
    }

    /// Adds aliases.
    ///
    /// Returns a new declaration sharing this flag's behavior; handles
    /// cloned earlier keep the old alias set.
    pub fn with_aliases<I, S>(self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inner: Arc::new(FlagInner {
                spec: self.inner.spec.clone().with_aliases(aliases),
                behavior: Arc::clone(&self.inner.behavior),
            }),
        }
    }

    /// Returns the flag's descriptor.
    pub fn spec(&self) -> &FlagSpec {
        &self.inner.spec
    }

    /// Completion candidates for this flag's value.
    pub fn suggest(&self) -> Vec<String> {
        self.inner.behavior.suggest()
    }

    /// The value to use when the flag is absent.
    pub fn default_value(&self) -> Option<T> {
        self.inner.behavior.default_value()
    }

    pub(crate) fn erased(&self) -> Arc<dyn ErasedFlag> {
        self.inner.clone()
    }
}

impl<T> Clone for Flag<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for Flag<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Flag").field("spec", &self.inner.spec).finish()
    }
}

/// A value bound by the parser with its type erased.
pub(crate) trait AnyValue: Any + fmt::Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn render(&self) -> String;
}

impl<T: FlagValue> AnyValue for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn render(&self) -> String {
        self.to_string()
    }
}

pub(crate) type BoxedValue = Box<dyn AnyValue>;

/// Object-safe view of a [`Flag<T>`] as stored in a registry.
pub(crate) trait ErasedFlag: Send + Sync {
    fn spec(&self) -> &FlagSpec;
    fn parse(&self, input: &str) -> Result<BoxedValue, FlagParseFailed>;
    fn value_without_input(&self) -> Result<BoxedValue, FlagParseFailed>;
    fn suggest(&self) -> Vec<String>;
}

impl<T: FlagValue> ErasedFlag for FlagInner<T> {
    fn spec(&self) -> &FlagSpec {
        &self.spec
    }

    fn parse(&self, input: &str) -> Result<BoxedValue, FlagParseFailed> {
        self.behavior
            .parse(input)
            .map(|value| Box::new(value) as BoxedValue)
    }

    fn value_without_input(&self) -> Result<BoxedValue, FlagParseFailed> {
        self.behavior
            .value_without_input()
            .map(|value| Box::new(value) as BoxedValue)
    }

    fn suggest(&self) -> Vec<String> {
        self.behavior.suggest()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed;

    impl FlagBehavior<bool> for Fixed {
        fn value_without_input(&self) -> Result<bool, FlagParseFailed> {
            Ok(false)
        }
    }

    #[test]
    fn test_template_replaces_every_placeholder() {
        let err = FlagParseFailed::new("'%s' is not '%s'", "x");
        assert_eq!(err.as_str(), "'x' is not 'x'");
    }

    #[test]
    fn test_default_behavior_rejects_value_and_has_no_default() {
        let flag = Flag::no_value("AdjustSpawn", "--dont-adjust-spawn", Fixed);
        let erased = flag.erased();
        assert!(erased.parse("true").is_err());
        assert_eq!(flag.default_value(), None);
        assert!(flag.suggest().is_empty());
    }

    #[test]
    fn test_erased_value_downcasts_to_declared_type() {
        let flag = Flag::no_value("AdjustSpawn", "--dont-adjust-spawn", Fixed);
        let value = flag.erased().value_without_input().unwrap();
        assert_eq!((*value).as_any().downcast_ref::<bool>(), Some(&false));
        assert_eq!((*value).render(), "false");
    }

    #[test]
    fn test_clones_share_declaration() {
        let flag = Flag::no_value("AdjustSpawn", "--dont-adjust-spawn", Fixed).with_aliases(["-n"]);
        let copy = flag.clone();
        assert_eq!(copy.spec().aliases, vec!["-n"]);
        assert!(Arc::ptr_eq(&flag.inner, &copy.inner));
    }

    #[test]
    fn test_with_aliases_leaves_earlier_clones_untouched() {
        let flag = Flag::no_value("AdjustSpawn", "--dont-adjust-spawn", Fixed);
        let before = flag.clone();
        let after = flag.with_aliases(["-n"]);
        assert!(before.spec().aliases.is_empty());
        assert_eq!(after.spec().aliases, vec!["-n"]);
        assert!(Arc::ptr_eq(&before.inner.behavior, &after.inner.behavior));
    }
}

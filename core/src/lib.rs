//! Typed command-flag parsing, validation and completion.
//!
//! This crate is the reusable machinery behind named command modifiers such
//! as `--seed 123 --type flat`:
//!
//! - [`FlagSpec`]: immutable descriptor holding the name, primary token, aliases and
//!   [`PresenceClass`].
//! - [`FlagBehavior`]: per-flag capability interface supplying value
//!   parsing, the zero-argument fallback, suggestions and the default value.
//! - [`Flag`]: typed handle combining the two.
//! - [`FlagRegistry`]: case-insensitive token lookup, built once through a
//!   [`RegistryBuilder`] and shared read-only afterwards.
//! - [`FlagParser`]: walks a token stream and produces a
//!   [`FlagParseResult`] of typed values, [`ParseError`]s and leftover
//!   tokens.
//!
//! Splitting raw text into tokens, dispatching commands and deciding what
//! to do with errors or leftover tokens are the caller's business.
//!
//! # Example
//!
//! ```
//! use command_flags_core::*;
//!
//! struct Structures;
//!
//! impl FlagBehavior<bool> for Structures {
//!     fn parse(&self, input: &str) -> Result<bool, FlagParseFailed> {
//!         Ok(input.eq_ignore_ascii_case("true"))
//!     }
//!     fn suggest(&self) -> Vec<String> {
//!         vec!["true".into(), "false".into()]
//!     }
//!     fn default_value(&self) -> Option<bool> {
//!         Some(true)
//!     }
//! }
//!
//! let structures = Flag::required("GenerateStructures", "--structures", Structures)
//!     .with_aliases(["-a"]);
//!
//! let mut builder = FlagRegistry::builder();
//! builder.register(&structures).unwrap();
//! let registry = builder.build();
//!
//! let result = registry.parse(&["-a", "false"]);
//! assert_eq!(result.get(&structures), Some(&false));
//!
//! let result = registry.parse::<&str>(&[]);
//! assert_eq!(result.get(&structures), None);
//! assert_eq!(result.get_or_default(&structures), Some(true));
//! ```

mod complete;
mod flag;
mod parser;
mod registry;
mod result;
mod types;
mod validate;

pub use flag::{Flag, FlagBehavior, FlagParseFailed};
pub use parser::FlagParser;
pub use registry::{FlagRegistry, RegistryBuilder, RegistryError};
pub use result::{ErrorReport, FlagParseResult, ParseError, ParseErrorKind, ParseReport};
pub use types::{FLAG_MARKER, FlagId, FlagSpec, FlagValue, PresenceClass};
pub use validate::{ValidationError, looks_like_flag, validate_spec};

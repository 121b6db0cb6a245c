//! Environment queries used by flags that validate against live state.
//!
//! The flag set never reaches for global state: a [`WorldEnvironment`] is
//! built once at startup and handed to [`WorldFlags::new`](crate::WorldFlags::new)
//! behind an [`Arc`](std::sync::Arc).

use tracing::debug;

use crate::config::GeneratorConfig;
use crate::error::EnvironmentError;

/// Opaque view of the hosting environment.
pub trait WorldEnvironment: Send + Sync {
    /// Names of the content generators that can currently be used.
    fn available_generators(&self) -> Result<Vec<String>, EnvironmentError>;

    /// Returns `true` if generator `name` accepts generator id `id`.
    ///
    /// An empty `id` means "no id given".
    fn has_generator(&self, name: &str, id: &str) -> Result<bool, EnvironmentError>;
}

/// Fixed generator catalog, typically loaded from an
/// [`EnvironmentConfig`](crate::EnvironmentConfig).
///
/// Generator names match case-insensitively. A generator without declared
/// ids accepts any id; otherwise the id must be empty or one of the
/// declared ids.
///
/// # Examples
///
/// ```
/// use command_flags_world::{StaticEnvironment, WorldEnvironment};
///
/// let env = StaticEnvironment::default()
///     .with_generator("TerrainControl", &[])
///     .with_generator("CleanroomGenerator", &["flat", "void"]);
///
/// assert!(env.has_generator("terraincontrol", "anything").unwrap());
/// assert!(env.has_generator("CleanroomGenerator", "void").unwrap());
/// assert!(!env.has_generator("CleanroomGenerator", "ocean").unwrap());
/// assert!(!env.has_generator("Missing", "").unwrap());
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticEnvironment {
    generators: Vec<GeneratorConfig>,
}

impl StaticEnvironment {
    /// Creates an environment from generator entries.
    pub fn new(generators: Vec<GeneratorConfig>) -> Self {
        Self { generators }
    }

    /// Adds a generator.
    pub fn with_generator(mut self, name: &str, ids: &[&str]) -> Self {
        self.generators.push(GeneratorConfig {
            name: name.to_string(),
            ids: ids.iter().map(|id| id.to_string()).collect(),
        });
        self
    }
}

impl WorldEnvironment for StaticEnvironment {
    fn available_generators(&self) -> Result<Vec<String>, EnvironmentError> {
        Ok(self.generators.iter().map(|g| g.name.clone()).collect())
    }

    fn has_generator(&self, name: &str, id: &str) -> Result<bool, EnvironmentError> {
        let Some(generator) = self
            .generators
            .iter()
            .find(|g| g.name.eq_ignore_ascii_case(name))
        else {
            debug!(generator = name, "Generator not found");
            return Ok(false);
        };

        Ok(id.is_empty() || generator.ids.is_empty() || generator.ids.iter().any(|known| known == id))
    }
}

/// An environment that cannot be queried.
///
/// Useful when a command runs before the host has finished loading its
/// generators: generator values are rejected and suggestions are empty.
#[derive(Debug, Clone)]
pub struct UnavailableEnvironment {
    reason: String,
}

impl UnavailableEnvironment {
    /// Creates an environment that fails every query with `reason`.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl WorldEnvironment for UnavailableEnvironment {
    fn available_generators(&self) -> Result<Vec<String>, EnvironmentError> {
        Err(EnvironmentError::Unavailable(self.reason.clone()))
    }

    fn has_generator(&self, name: &str, _id: &str) -> Result<bool, EnvironmentError> {
        Err(EnvironmentError::LookupFailed {
            generator: name.to_string(),
            reason: self.reason.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_environment_lists_generators_in_order() {
        let env = StaticEnvironment::default()
            .with_generator("b", &[])
            .with_generator("a", &[]);
        assert_eq!(env.available_generators().unwrap(), vec!["b", "a"]);
    }

    #[test]
    fn test_empty_id_always_matches_known_generator() {
        let env = StaticEnvironment::default().with_generator("Cleanroom", &["flat"]);
        assert!(env.has_generator("cleanroom", "").unwrap());
    }

    #[test]
    fn test_unavailable_environment_fails_every_query() {
        let env = UnavailableEnvironment::new("plugins not loaded");
        assert_eq!(
            env.available_generators(),
            Err(EnvironmentError::Unavailable("plugins not loaded".to_string()))
        );
        assert!(matches!(
            env.has_generator("x", ""),
            Err(EnvironmentError::LookupFailed { .. })
        ));
    }
}

//! World creation and debug flags built on [`command_flags_core`].
//!
//! - [`WorldFlags`]: `--seed`, `--type`, `--gen`, `--structures`,
//!   `--dont-adjust-spawn` for world creation.
//! - [`RegenFlags`]: `--seed` with an optional value for regeneration.
//! - [`DebugFlags`]: `--paste`, `--include-plugin-list` for debug dumps.
//! - [`WorldEnvironment`]: the injected view of available generators,
//!   with [`StaticEnvironment`] loaded from an [`EnvironmentConfig`].
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use command_flags_world::*;
//!
//! let env = Arc::new(StaticEnvironment::default().with_generator("TerrainControl", &[]));
//! let flags = WorldFlags::new(env);
//! let registry = flags.registry().unwrap();
//!
//! let result = registry.parse(&["--type", "flat", "-g", "TerrainControl", "-n"]);
//! assert!(result.is_ok());
//! assert_eq!(result.get(&flags.world_type), Some(&WorldType::Flat));
//! assert_eq!(result.get(&flags.spawn_adjust), Some(&false));
//! assert_eq!(result.get_or_default(&flags.generate_structures), Some(true));
//! ```

mod config;
mod environment;
mod error;
mod flags;
mod types;

pub use config::{EnvironmentConfig, GeneratorConfig};
pub use environment::{StaticEnvironment, UnavailableEnvironment, WorldEnvironment};
pub use error::{ConfigError, EnvironmentError, Result};
pub use flags::{
    DebugFlags, RegenFlags, WorldFlags, generate_structures_flag, generator_flag,
    include_plugin_list_flag, paste_service_flag, random_seed_flag, seed_flag, spawn_adjust_flag,
    world_type_flag,
};
pub use types::{PasteServiceType, WorldType};

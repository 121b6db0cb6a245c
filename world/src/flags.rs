//! The world and debug flag declarations.
//!
//! Each flag is a [`Flag`] built from a small behavior type. Flags that
//! need live state take a [`WorldEnvironment`] at construction; nothing is
//! looked up globally.

use std::sync::Arc;

use command_flags_core::{Flag, FlagBehavior, FlagParseFailed, FlagRegistry, RegistryError};
use tracing::{debug, warn};

use crate::environment::WorldEnvironment;
use crate::types::{PasteServiceType, WorldType};

const INVALID_WORLD_TYPE: &str =
    "'%s' is not a valid world type. See /mv env for available world types.";
const INVALID_GENERATOR: &str =
    "Invalid generator string '%s'. See /mv gens for available generators.";
const INVALID_PASTE_SERVICE: &str = "Invalid paste service type '%s'.";

/// Shorthand names accepted for `--type`, also offered as suggestions.
const WORLD_TYPE_ALIASES: [(&str, WorldType); 4] = [
    ("normal", WorldType::Normal),
    ("flat", WorldType::Flat),
    ("largebiomes", WorldType::LargeBiomes),
    ("amplified", WorldType::Amplified),
];

fn random_seed() -> String {
    rand::random::<i64>().to_string()
}

struct Seed;

impl FlagBehavior<String> for Seed {
    fn parse(&self, input: &str) -> Result<String, FlagParseFailed> {
        Ok(input.to_string())
    }

    fn value_without_input(&self) -> Result<String, FlagParseFailed> {
        Ok(random_seed())
    }

    fn suggest(&self) -> Vec<String> {
        vec![random_seed()]
    }
}

struct WorldTypeChoice;

impl FlagBehavior<WorldType> for WorldTypeChoice {
    fn parse(&self, input: &str) -> Result<WorldType, FlagParseFailed> {
        let lowered = input.to_lowercase();
        WORLD_TYPE_ALIASES
            .iter()
            .find(|(alias, _)| *alias == lowered)
            .map(|&(_, kind)| kind)
            .or_else(|| WorldType::from_name(input))
            .ok_or_else(|| FlagParseFailed::new(INVALID_WORLD_TYPE, input))
    }

    fn suggest(&self) -> Vec<String> {
        WORLD_TYPE_ALIASES
            .iter()
            .map(|(alias, _)| alias.to_string())
            .collect()
    }

    fn default_value(&self) -> Option<WorldType> {
        Some(WorldType::Normal)
    }
}

struct Generator {
    env: Arc<dyn WorldEnvironment>,
}

impl FlagBehavior<String> for Generator {
    /// Accepts `name` or `name:id` when the environment knows the generator.
    fn parse(&self, input: &str) -> Result<String, FlagParseFailed> {
        let mut parts = input.split(':');
        let name = parts.next().unwrap_or_default();
        let id = parts.next().unwrap_or_default();

        if name.is_empty() {
            return Err(FlagParseFailed::new(INVALID_GENERATOR, input));
        }

        match self.env.has_generator(name, id) {
            Ok(true) => Ok(input.to_string()),
            Ok(false) => Err(FlagParseFailed::new(INVALID_GENERATOR, input)),
            Err(err) => {
                warn!(generator = name, id, error = %err, "Generator lookup failed");
                Err(FlagParseFailed::new(INVALID_GENERATOR, input))
            }
        }
    }

    fn suggest(&self) -> Vec<String> {
        self.env.available_generators().unwrap_or_else(|err| {
            debug!(error = %err, "No generator suggestions");
            Vec::new()
        })
    }
}

struct Structures;

impl FlagBehavior<bool> for Structures {
    fn parse(&self, input: &str) -> Result<bool, FlagParseFailed> {
        Ok(input.eq_ignore_ascii_case("true"))
    }

    fn suggest(&self) -> Vec<String> {
        vec!["true".to_string(), "false".to_string()]
    }

    fn default_value(&self) -> Option<bool> {
        Some(true)
    }
}

struct SpawnAdjust;

impl FlagBehavior<bool> for SpawnAdjust {
    fn value_without_input(&self) -> Result<bool, FlagParseFailed> {
        Ok(false)
    }

    fn default_value(&self) -> Option<bool> {
        Some(true)
    }
}

struct PasteService;

impl FlagBehavior<PasteServiceType> for PasteService {
    fn parse(&self, input: &str) -> Result<PasteServiceType, FlagParseFailed> {
        PasteServiceType::from_name(input)
            .ok_or_else(|| FlagParseFailed::new(INVALID_PASTE_SERVICE, input))
    }

    fn value_without_input(&self) -> Result<PasteServiceType, FlagParseFailed> {
        Ok(PasteServiceType::PasteGg)
    }

    fn suggest(&self) -> Vec<String> {
        PasteServiceType::ALL
            .into_iter()
            .filter(|service| *service != PasteServiceType::None)
            .map(|service| service.as_str().to_string())
            .collect()
    }

    fn default_value(&self) -> Option<PasteServiceType> {
        Some(PasteServiceType::None)
    }
}

struct IncludePluginList;

impl FlagBehavior<bool> for IncludePluginList {
    fn value_without_input(&self) -> Result<bool, FlagParseFailed> {
        Ok(true)
    }

    fn default_value(&self) -> Option<bool> {
        Some(true)
    }
}

/// `--seed` / `-s`: custom seed, value required.
pub fn seed_flag() -> Flag<String> {
    Flag::required("Seed", "--seed", Seed).with_aliases(["-s"])
}

/// `--seed` / `-s`: custom seed; without a value a random seed is used.
pub fn random_seed_flag() -> Flag<String> {
    Flag::optional("Seed", "--seed", Seed).with_aliases(["-s"])
}

/// `--type` / `-t`: world type, defaults to [`WorldType::Normal`].
pub fn world_type_flag() -> Flag<WorldType> {
    Flag::required("WorldType", "--type", WorldTypeChoice).with_aliases(["-t"])
}

/// `--gen` / `-g`: generator string `name[:id]`, checked against `env`.
pub fn generator_flag(env: Arc<dyn WorldEnvironment>) -> Flag<String> {
    Flag::required("Generator", "--gen", Generator { env }).with_aliases(["-g"])
}

/// `--structures` / `--structure` / `-a`: generate structures, defaults to
/// `true`.
pub fn generate_structures_flag() -> Flag<bool> {
    Flag::required("GenerateStructures", "--structures", Structures)
        .with_aliases(["--structure", "-a"])
}

/// `--dont-adjust-spawn` / `-n`: binds `false` when present, defaults to
/// `true`.
pub fn spawn_adjust_flag() -> Flag<bool> {
    Flag::no_value("AdjustSpawn", "--dont-adjust-spawn", SpawnAdjust).with_aliases(["-n"])
}

/// `--paste` / `-p`: paste service; without a value paste.gg is used,
/// absent means no upload.
pub fn paste_service_flag() -> Flag<PasteServiceType> {
    Flag::optional("PasteServiceType", "--paste", PasteService).with_aliases(["-p"])
}

/// `--include-plugin-list` / `-pl`.
pub fn include_plugin_list_flag() -> Flag<bool> {
    Flag::no_value("IncludePlugins", "--include-plugin-list", IncludePluginList)
        .with_aliases(["-pl"])
}

/// Flags of the world creation command.
#[derive(Debug, Clone)]
pub struct WorldFlags {
    /// `--seed` / `-s`, value required.
    pub seed: Flag<String>,
    /// `--type` / `-t`.
    pub world_type: Flag<WorldType>,
    /// `--gen` / `-g`, checked against the environment.
    pub generator: Flag<String>,
    /// `--structures` / `--structure` / `-a`.
    pub generate_structures: Flag<bool>,
    /// `--dont-adjust-spawn` / `-n`.
    pub spawn_adjust: Flag<bool>,
}

impl WorldFlags {
    /// Declares the world creation flags against `env`.
    pub fn new(env: Arc<dyn WorldEnvironment>) -> Self {
        Self {
            seed: seed_flag(),
            world_type: world_type_flag(),
            generator: generator_flag(env),
            generate_structures: generate_structures_flag(),
            spawn_adjust: spawn_adjust_flag(),
        }
    }

    /// Registers every flag into a fresh registry.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if two flags claim the same token.
    pub fn registry(&self) -> Result<FlagRegistry, RegistryError> {
        let mut builder = FlagRegistry::builder();
        builder
            .register(&self.seed)?
            .register(&self.world_type)?
            .register(&self.generator)?
            .register(&self.generate_structures)?
            .register(&self.spawn_adjust)?;
        Ok(builder.build())
    }
}

/// Flags of the world regeneration command.
#[derive(Debug, Clone)]
pub struct RegenFlags {
    /// `--seed` / `-s`, random when the value is omitted.
    pub seed: Flag<String>,
}

impl RegenFlags {
    /// Declares the regeneration flags.
    pub fn new() -> Self {
        Self {
            seed: random_seed_flag(),
        }
    }

    /// Registers every flag into a fresh registry.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if two flags claim the same token.
    pub fn registry(&self) -> Result<FlagRegistry, RegistryError> {
        let mut builder = FlagRegistry::builder();
        builder.register(&self.seed)?;
        Ok(builder.build())
    }
}

impl Default for RegenFlags {
    fn default() -> Self {
        Self::new()
    }
}

/// Flags of the debug dump command.
#[derive(Debug, Clone)]
pub struct DebugFlags {
    /// `--paste` / `-p`.
    pub paste_service: Flag<PasteServiceType>,
    /// `--include-plugin-list` / `-pl`.
    pub include_plugin_list: Flag<bool>,
}

impl DebugFlags {
    /// Declares the debug dump flags.
    pub fn new() -> Self {
        Self {
            paste_service: paste_service_flag(),
            include_plugin_list: include_plugin_list_flag(),
        }
    }

    /// Registers every flag into a fresh registry.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if two flags claim the same token.
    pub fn registry(&self) -> Result<FlagRegistry, RegistryError> {
        let mut builder = FlagRegistry::builder();
        builder
            .register(&self.paste_service)?
            .register(&self.include_plugin_list)?;
        Ok(builder.build())
    }
}

impl Default for DebugFlags {
    fn default() -> Self {
        Self::new()
    }
}

//! Value types bound by the world flag set.

use std::fmt;

/// Terrain preset for a new world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorldType {
    /// Default terrain.
    Normal,
    /// Superflat terrain.
    Flat,
    /// Default terrain with enlarged biomes.
    LargeBiomes,
    /// Exaggerated terrain heights.
    Amplified,
}

impl WorldType {
    /// Every world type, in declaration order.
    pub const ALL: [WorldType; 4] = [
        WorldType::Normal,
        WorldType::Flat,
        WorldType::LargeBiomes,
        WorldType::Amplified,
    ];

    /// Constant-style name, e.g. `LARGE_BIOMES`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Flat => "FLAT",
            Self::LargeBiomes => "LARGE_BIOMES",
            Self::Amplified => "AMPLIFIED",
        }
    }

    /// Looks up a world type by its constant-style name, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for WorldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Service a debug dump is uploaded to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PasteServiceType {
    /// Do not upload.
    None,
    /// paste.gg, used when `--paste` has no value.
    PasteGg,
    /// pastebin.com.
    Pastebin,
    /// hastebin.com.
    Hastebin,
    /// A GitHub gist.
    GitHub,
}

impl PasteServiceType {
    /// Every paste service, `None` included.
    pub const ALL: [PasteServiceType; 5] = [
        PasteServiceType::None,
        PasteServiceType::PasteGg,
        PasteServiceType::Pastebin,
        PasteServiceType::Hastebin,
        PasteServiceType::GitHub,
    ];

    /// Lower-case name as typed on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::PasteGg => "pastegg",
            Self::Pastebin => "pastebin",
            Self::Hastebin => "hastebin",
            Self::GitHub => "github",
        }
    }

    /// Looks up a paste service by name, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|service| service.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for PasteServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_type_from_name_ignores_case() {
        assert_eq!(WorldType::from_name("large_biomes"), Some(WorldType::LargeBiomes));
        assert_eq!(WorldType::from_name("Flat"), Some(WorldType::Flat));
        assert_eq!(WorldType::from_name("largebiomes"), None);
    }

    #[test]
    fn test_paste_service_round_trips_name() {
        for service in PasteServiceType::ALL {
            assert_eq!(PasteServiceType::from_name(service.as_str()), Some(service));
        }
        assert_eq!(PasteServiceType::from_name("GitHub"), Some(PasteServiceType::GitHub));
    }
}

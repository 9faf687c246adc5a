use std::path::Path;

use serde::{Deserialize, Serialize};

/// Configuration for the planner.
///
/// This struct holds the presentation-independent defaults applied when
/// trips and activities are created: the emoji placeholder used when a form
/// is submitted without a glyph, and the number of days a fresh trip spans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// The glyph used for activities created without an emoji.
    default_emoji: String,

    /// How many days beyond the start date a newly created trip covers.
    ///
    /// A value of 7 yields an eight-day trip (the start date plus seven
    /// more).
    default_trip_days: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_emoji: default_emoji(),
            default_trip_days: default_trip_days(),
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// The glyph used for activities created without an emoji.
    #[must_use]
    pub fn default_emoji(&self) -> &str {
        &self.default_emoji
    }

    /// How many days beyond the start date a newly created trip covers.
    #[must_use]
    pub const fn default_trip_days(&self) -> u64 {
        self.default_trip_days
    }
}

fn default_emoji() -> String {
    "🎯".to_string()
}

const fn default_trip_days() -> u64 {
    7
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the
/// domain type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_emoji")]
        default_emoji: String,

        #[serde(default = "default_trip_days")]
        default_trip_days: u64,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                default_emoji,
                default_trip_days,
            } => Self {
                default_emoji,
                default_trip_days,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            default_emoji: config.default_emoji,
            default_trip_days: config.default_trip_days,
        }
    }
}

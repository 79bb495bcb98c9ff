//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Settings for the `fl` binary. Every key can be set from a file or `FL_*`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// `SQLite` file holding users and feedings.
    pub database_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            database_path: data_dir.join("feedlog.db"),
        }
    }
}

impl Config {
    /// Layers defaults, the user config file, `config_path`, then `FL_*` variables.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let user_file = dirs_config_path().map(|dir| dir.join("config.toml"));
        [user_file.as_deref(), config_path]
            .into_iter()
            .flatten()
            .fold(
                Figment::from(Serialized::defaults(Self::default())),
                |figment, path| figment.merge(Toml::file(path)),
            )
            .merge(Env::prefixed("FL_"))
            .extract()
    }
}

fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("feedlog"))
}

/// Returns the platform-specific data directory for feedlog.
///
/// On Linux: `~/.local/share/feedlog`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("feedlog"))
}

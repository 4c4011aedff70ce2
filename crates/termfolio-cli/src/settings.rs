use std::path::Path;
use std::path::PathBuf;

use termfolio_core::config::Config;
use termfolio_core::profile::Roster;
use tracing::warn;

const APP_DIR: &str = "termfolio";
const CONFIG_FILE: &str = "config.toml";

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// Reads `config.toml`. A missing file is normal; an unreadable or invalid
/// one is logged and replaced by defaults.
pub fn load_config(path: Option<&Path>) -> Config {
    let Some(path) = path else {
        return Config::default();
    };
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Config::default(),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "could not read config");
            return Config::default();
        }
    };
    match toml::from_str::<Config>(&text) {
        Ok(config) => config,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "invalid config, using defaults");
            Config::default()
        }
    }
}

/// The configured roster file, or the one baked into the binary. A broken
/// override file is an error: silently showing the wrong team is worse.
pub fn load_roster(config: &Config) -> Result<Roster, Box<dyn std::error::Error>> {
    match &config.roster.path {
        Some(path) => {
            let source = std::fs::read_to_string(path)
                .map_err(|err| format!("reading roster {}: {err}", path.display()))?;
            Ok(Roster::from_yaml(&source)?)
        }
        None => Ok(Roster::embedded()?),
    }
}

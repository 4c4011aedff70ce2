use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

pub const DEFAULT_GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub terminal: TerminalConfig,
    pub weather: WeatherConfig,
    pub roster: RosterConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct TerminalConfig {
    /// Host part of the prompt, `user@hostname:/cwd$`.
    pub hostname: String,
    /// Whether unknown commands bump the command counter.
    pub count_unknown_commands: bool,
    pub history_limit: usize,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            hostname: "codecraft".to_string(),
            count_unknown_commands: false,
            history_limit: 500,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct WeatherConfig {
    pub geocoding_url: String,
    pub forecast_url: String,
    pub timeout_secs: u64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            geocoding_url: DEFAULT_GEOCODING_URL.to_string(),
            forecast_url: DEFAULT_FORECAST_URL.to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct RosterConfig {
    pub path: Option<PathBuf>,
}

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conditions {
    pub place: String,
    pub temperature_celsius: f64,
    pub wind_kph: f64,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeatherError {
    #[error("city required")]
    EmptyCity,
    #[error("city not found: {0}")]
    NotFound(String),
    #[error("network failure: {0}")]
    Network(String),
    #[error("unexpected response: {0}")]
    UpstreamData(String),
}

/// Looks up current conditions for a city name. Implementations may block;
/// callers run them off the input thread.
pub trait WeatherClient: Send + Sync {
    fn fetch_current_conditions(&self, city: &str) -> Result<Conditions, WeatherError>;
}

/// WMO weather interpretation codes, coarsened.
pub fn describe_weather_code(code: i64) -> &'static str {
    match code {
        0 => "Clear",
        1..=3 => "Partly cloudy",
        45 | 48 => "Fog",
        51 | 53 | 55 => "Drizzle",
        56 | 57 => "Freezing drizzle",
        61 | 63 | 65 => "Rain",
        66 | 67 => "Freezing rain",
        71 | 73 | 75 => "Snow",
        77 => "Snow grains",
        80..=82 => "Rain showers",
        85 | 86 => "Snow showers",
        95 => "Thunderstorm",
        96 | 99 => "Thunderstorm (hail)",
        _ => "Conditions",
    }
}

const CLEAR_ART: [&str; 5] = [
    r"     \   /     ",
    r"      .-.      ",
    r"   ― (   ) ―   ",
    r"      `-'      ",
    r"     /   \     ",
];

const CLOUD_ART: [&str; 5] = [
    r"             ",
    r"     .--.    ",
    r"  .-(    ).  ",
    r" (___.__)__) ",
    r"             ",
];

const FOG_ART: [&str; 5] = [
    r" _ - _ - _ - ",
    r"  _ - _ - _  ",
    r" _ - _ - _ - ",
    r"  _ - _ - _  ",
    r" _ - _ - _ - ",
];

const SNOW_ART: [&str; 5] = [
    r"     .--.    ",
    r"  .-(    ).  ",
    r" (___.__)__) ",
    r"   *  *  *   ",
    r"  *  *  *    ",
];

const STORM_ART: [&str; 5] = [
    r"     .--.    ",
    r"  .-(    ).  ",
    r" (___.__)__) ",
    r"    ⚡⚡⚡     ",
    r"    ' ' '    ",
];

const RAIN_ART: [&str; 5] = [
    r"     .--.    ",
    r"  .-(    ).  ",
    r" (___.__)__) ",
    r"   ' ' ' '   ",
    r"  ' ' ' '    ",
];

pub fn weather_art(description: &str) -> &'static [&'static str] {
    let lower = description.to_ascii_lowercase();
    if lower.contains("clear") {
        &CLEAR_ART
    } else if lower.contains("cloud") {
        &CLOUD_ART
    } else if lower.contains("fog") {
        &FOG_ART
    } else if lower.contains("snow") {
        &SNOW_ART
    } else if lower.contains("thunder") {
        &STORM_ART
    } else {
        &RAIN_ART
    }
}

/// Summary block: place, one-line reading, blank line, ascii art.
pub fn render_conditions(conditions: &Conditions) -> String {
    let mut lines = vec![
        conditions.place.clone(),
        format!(
            "{} · {}°C · wind {} km/h",
            conditions.description,
            conditions.temperature_celsius.round() as i64,
            conditions.wind_kph.round() as i64
        ),
        String::new(),
    ];
    lines.extend(
        weather_art(&conditions.description)
            .iter()
            .map(|line| line.to_string()),
    );
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn weather_codes_cover_the_documented_groups() {
        assert_eq!(describe_weather_code(0), "Clear");
        assert_eq!(describe_weather_code(2), "Partly cloudy");
        assert_eq!(describe_weather_code(81), "Rain showers");
        assert_eq!(describe_weather_code(99), "Thunderstorm (hail)");
        assert_eq!(describe_weather_code(4), "Conditions");
    }

    #[test]
    fn art_falls_back_to_rain() {
        assert_eq!(weather_art("Partly cloudy"), &CLOUD_ART);
        assert_eq!(weather_art("Snow showers"), &SNOW_ART);
        assert_eq!(weather_art("Conditions"), &RAIN_ART);
    }

    #[test]
    fn summary_rounds_readings() {
        let text = render_conditions(&Conditions {
            place: "Kathmandu, Bagmati, Nepal".to_string(),
            temperature_celsius: 18.6,
            wind_kph: 7.2,
            description: "Clear".to_string(),
        });
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Kathmandu, Bagmati, Nepal");
        assert_eq!(lines[1], "Clear · 19°C · wind 7 km/h");
        assert_eq!(lines[2], "");
        assert_eq!(lines.len(), 8);
    }
}

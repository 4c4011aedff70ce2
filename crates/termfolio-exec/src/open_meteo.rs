use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use termfolio_core::config::WeatherConfig;
use termfolio_core::weather::describe_weather_code;
use termfolio_core::weather::Conditions;
use termfolio_core::weather::WeatherClient;
use termfolio_core::weather::WeatherError;
use tracing::debug;

const CURRENT_FIELDS: &str = "temperature_2m,weather_code,wind_speed_10m";

/// First geocoding hit for a city query.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Place {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub admin1: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

impl Place {
    /// `name, region, country`, skipping whatever the geocoder left out.
    pub fn label(&self) -> String {
        let mut parts = vec![self.name.as_str()];
        if let Some(admin1) = self.admin1.as_deref().filter(|value| !value.is_empty()) {
            parts.push(admin1);
        }
        if let Some(country) = self.country.as_deref().filter(|value| !value.is_empty()) {
            parts.push(country);
        }
        parts.join(", ")
    }
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    results: Vec<Place>,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: Option<CurrentReading>,
}

#[derive(Debug, Deserialize)]
struct CurrentReading {
    temperature_2m: f64,
    weather_code: i64,
    wind_speed_10m: f64,
}

pub fn parse_geocoding(body: &str, city: &str) -> Result<Place, WeatherError> {
    let response: GeocodingResponse = serde_json::from_str(body)
        .map_err(|err| WeatherError::UpstreamData(format!("geocoding: {err}")))?;
    response
        .results
        .into_iter()
        .next()
        .ok_or_else(|| WeatherError::NotFound(city.to_string()))
}

pub fn parse_forecast(body: &str, place: &Place) -> Result<Conditions, WeatherError> {
    let response: ForecastResponse = serde_json::from_str(body)
        .map_err(|err| WeatherError::UpstreamData(format!("forecast: {err}")))?;
    let current = response
        .current
        .ok_or_else(|| WeatherError::UpstreamData("weather unavailable".to_string()))?;
    Ok(Conditions {
        place: place.label(),
        temperature_celsius: current.temperature_2m,
        wind_kph: current.wind_speed_10m,
        description: describe_weather_code(current.weather_code).to_string(),
    })
}

pub struct OpenMeteoClient {
    http: Client,
    geocoding_url: String,
    forecast_url: String,
}

impl OpenMeteoClient {
    pub fn new(config: &WeatherConfig) -> Result<Self, WeatherError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .user_agent(concat!("termfolio/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|err| WeatherError::Network(err.to_string()))?;
        Ok(Self {
            http,
            geocoding_url: config.geocoding_url.clone(),
            forecast_url: config.forecast_url.clone(),
        })
    }

    fn get_text(&self, url: &str, query: &[(&str, String)], what: &str) -> Result<String, WeatherError> {
        let response = self
            .http
            .get(url)
            .query(query)
            .send()
            .map_err(|err| WeatherError::Network(format!("{what}: {err}")))?;
        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::Network(format!("{what} failed: {status}")));
        }
        response
            .text()
            .map_err(|err| WeatherError::Network(format!("{what}: {err}")))
    }

    pub fn geocode(&self, city: &str) -> Result<Place, WeatherError> {
        let query = [
            ("name", city.to_string()),
            ("count", "1".to_string()),
            ("language", "en".to_string()),
            ("format", "json".to_string()),
        ];
        let body = self.get_text(&self.geocoding_url, &query, "geocoding")?;
        parse_geocoding(&body, city)
    }

    pub fn current_conditions(&self, place: &Place) -> Result<Conditions, WeatherError> {
        let query = [
            ("latitude", place.latitude.to_string()),
            ("longitude", place.longitude.to_string()),
            ("current", CURRENT_FIELDS.to_string()),
            ("timezone", "auto".to_string()),
        ];
        let body = self.get_text(&self.forecast_url, &query, "weather fetch")?;
        parse_forecast(&body, place)
    }
}

impl WeatherClient for OpenMeteoClient {
    fn fetch_current_conditions(&self, city: &str) -> Result<Conditions, WeatherError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(WeatherError::EmptyCity);
        }
        let place = self.geocode(city)?;
        debug!(place = %place.label(), lat = place.latitude, lon = place.longitude, "geocoded");
        self.current_conditions(&place)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const GEOCODING_HIT: &str = include_str!("../fixtures/geocoding_kathmandu.json");
    const GEOCODING_EMPTY: &str = include_str!("../fixtures/geocoding_empty.json");
    const FORECAST: &str = include_str!("../fixtures/forecast_current.json");
    const FORECAST_NO_CURRENT: &str = include_str!("../fixtures/forecast_missing_current.json");

    fn kathmandu() -> Place {
        parse_geocoding(GEOCODING_HIT, "kathmandu").expect("hit")
    }

    #[test]
    fn geocoding_takes_the_first_hit() {
        let place = kathmandu();
        assert_eq!(place.name, "Kathmandu");
        assert_eq!(place.label(), "Kathmandu, Bagmati Province, Nepal");
        assert!((place.latitude - 27.70169).abs() < 1e-9);
    }

    #[test]
    fn missing_results_mean_city_not_found() {
        let err = parse_geocoding(GEOCODING_EMPTY, "Atlantis").expect_err("no hit");
        assert_eq!(err, WeatherError::NotFound("Atlantis".to_string()));
        assert_eq!(err.to_string(), "city not found: Atlantis");
    }

    #[test]
    fn label_skips_missing_region() {
        let place = Place {
            name: "Monaco".to_string(),
            latitude: 43.7,
            longitude: 7.4,
            admin1: None,
            country: Some("Monaco".to_string()),
        };
        assert_eq!(place.label(), "Monaco, Monaco");
    }

    #[test]
    fn forecast_becomes_conditions() {
        let conditions = parse_forecast(FORECAST, &kathmandu()).expect("conditions");
        assert_eq!(
            conditions,
            Conditions {
                place: "Kathmandu, Bagmati Province, Nepal".to_string(),
                temperature_celsius: 21.6,
                wind_kph: 6.8,
                description: "Partly cloudy".to_string(),
            }
        );
    }

    #[test]
    fn forecast_without_current_block_is_upstream_data() {
        let err = parse_forecast(FORECAST_NO_CURRENT, &kathmandu()).expect_err("no current");
        assert_eq!(err, WeatherError::UpstreamData("weather unavailable".to_string()));
    }

    #[test]
    fn garbage_bodies_are_upstream_data() {
        assert!(matches!(
            parse_geocoding("<html>", "x"),
            Err(WeatherError::UpstreamData(_))
        ));
        assert!(matches!(
            parse_forecast("[]", &kathmandu()),
            Err(WeatherError::UpstreamData(_))
        ));
    }

    #[test]
    fn blank_city_never_reaches_the_network() {
        let client = OpenMeteoClient::new(&WeatherConfig {
            geocoding_url: "http://127.0.0.1:9/unused".to_string(),
            ..WeatherConfig::default()
        })
        .expect("client");
        assert_eq!(
            client.fetch_current_conditions("   "),
            Err(WeatherError::EmptyCity)
        );
    }
}

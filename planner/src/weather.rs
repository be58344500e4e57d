//! Weather widget.
//!
//! The provider key is relayed by the server once at startup and handed to
//! the widget in a [`WeatherConfig`]; the widget never fetches it lazily.

#[cfg(test)]
#[path = "weather_test.rs"]
mod weather_test;

use crate::api::{ApiError, TravelApi, WeatherReport};

pub const OPENWEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
pub const DEFAULT_CITY: &str = "Bangalore";

pub const CITY_NOT_FOUND: &str = "City not found";
pub const FETCH_FAILED: &str = "Error fetching weather";
pub const INIT_FAILED: &str = "Error initializing app";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherConfig {
    pub api_key: String,
    pub base_url: String,
}

impl WeatherConfig {
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self { api_key: api_key.into(), base_url: OPENWEATHER_URL.to_owned() }
    }

    /// Fetch the key from the server relay.
    ///
    /// # Errors
    ///
    /// Propagates the relay failure (e.g. 500 when the key is unset).
    pub async fn from_relay(api: &dyn TravelApi) -> Result<Self, ApiError> {
        Ok(Self::new(api.weather_key().await?))
    }

    /// Query parameters for current conditions in metric units.
    #[must_use]
    pub fn query<'a>(&'a self, city: &'a str) -> [(&'static str, &'a str); 3] {
        [("q", city), ("appid", &self.api_key), ("units", "metric")]
    }
}

/// Text for each weather slot on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherView {
    pub loading: bool,
    pub city_name: String,
    pub temperature: String,
    pub summary: String,
    pub description: String,
    pub feels_like: String,
    pub humidity: String,
    pub min_temp: String,
    pub max_temp: String,
    pub wind: String,
}

impl WeatherView {
    #[must_use]
    pub fn loading() -> Self {
        Self {
            loading: true,
            city_name: "Loading...".into(),
            temperature: "--°C".into(),
            summary: "--".into(),
            description: "Fetching weather...".into(),
            feels_like: "--°C".into(),
            humidity: "--%".into(),
            min_temp: "--°C".into(),
            max_temp: "--°C".into(),
            wind: "-- m/s".into(),
        }
    }

    /// Placeholders with only the city slot replaced by `message`.
    #[must_use]
    pub fn message(message: &str) -> Self {
        Self { loading: false, city_name: message.to_owned(), ..Self::loading() }
    }

    /// Format a found report. `None` if a section the view needs is missing.
    #[must_use]
    pub fn from_report(report: &WeatherReport) -> Option<Self> {
        let main = report.main?;
        let wind = report.wind?;
        let condition = report.weather.first()?;

        Some(Self {
            loading: false,
            city_name: report.name.clone(),
            temperature: degrees(main.temp.ceil()),
            summary: condition.main.clone(),
            description: capitalize(&condition.description),
            feels_like: degrees(main.feels_like.floor()),
            humidity: format!("{}%", main.humidity),
            min_temp: degrees(main.temp_min.floor()),
            max_temp: degrees(main.temp_max.ceil()),
            wind: format!("{} m/s", wind.speed),
        })
    }
}

fn degrees(rounded: f64) -> String {
    // `+ 0.0` turns -0 into 0.
    format!("{:.0}°C", rounded + 0.0)
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[derive(Debug)]
pub struct WeatherWidget {
    config: WeatherConfig,
    view: WeatherView,
}

impl WeatherWidget {
    #[must_use]
    pub fn new(config: WeatherConfig) -> Self {
        Self { config, view: WeatherView::loading() }
    }

    /// View to show when the key relay failed and no widget could be built.
    #[must_use]
    pub fn init_failed() -> WeatherView {
        WeatherView::message(INIT_FAILED)
    }

    #[must_use]
    pub fn config(&self) -> &WeatherConfig {
        &self.config
    }

    #[must_use]
    pub fn view(&self) -> &WeatherView {
        &self.view
    }

    /// Show placeholders and return the city to fetch; blank input falls
    /// back to the default city.
    pub fn begin_update(&mut self, input: &str) -> String {
        self.view = WeatherView::loading();
        let city = input.trim();
        if city.is_empty() { DEFAULT_CITY.to_owned() } else { city.to_owned() }
    }

    /// Render the fetch outcome. Loading always ends here.
    pub fn finish_update(&mut self, result: Result<WeatherReport, ApiError>) {
        self.view = match result {
            Ok(report) if report.is_found() => WeatherView::from_report(&report).unwrap_or_else(|| {
                log::error!("weather report for {} is missing fields", report.name);
                WeatherView::message(FETCH_FAILED)
            }),
            Ok(_) => WeatherView::message(CITY_NOT_FOUND),
            Err(e) => {
                log::error!("weather update failed: {e}");
                WeatherView::message(FETCH_FAILED)
            }
        };
    }

    /// Full update cycle for the value typed in the search box.
    pub async fn update(&mut self, api: &dyn TravelApi, input: &str) {
        let city = self.begin_update(input);
        let result = api.current_weather(&self.config, &city).await;
        self.finish_update(result);
    }
}

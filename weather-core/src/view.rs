//! Pure screen model: every string the weather screen shows, derived from [`ScreenState`].

use crate::{model::WeatherSnapshot, state::ScreenState};

pub const TITLE_APP_NAME: &str = "IR Weather";
pub const TITLE_SUFFIX: &str = " Service";
pub const CREDIT_PREFIX: &str = "Developed By ";
pub const CREDIT_NAME: &str = "Istiak Rahman";

const FETCHING_LOCATION: &str = "Fetching location...";
const FETCHING_WEATHER: &str = "Fetching weather...";
const LOADING: &str = "Loading...";
const WAITING_FOR_PERMISSION: &str = "Waiting for location permission...";

/// Icon picked from the temperature band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherIcon {
    Sun,
    Cloud,
    Snowflake,
    /// Below freezing, and the placeholder while loading.
    DimCloud,
}

impl WeatherIcon {
    /// `>= 30` sun, `>= 20` cloud, `>= 0` snowflake, otherwise dim cloud.
    pub fn for_temperature(temp_c: f64) -> Self {
        if temp_c >= 30.0 {
            WeatherIcon::Sun
        } else if temp_c >= 20.0 {
            WeatherIcon::Cloud
        } else if temp_c >= 0.0 {
            WeatherIcon::Snowflake
        } else {
            WeatherIcon::DimCloud
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            WeatherIcon::Sun => "☀",
            WeatherIcon::Cloud | WeatherIcon::DimCloud => "☁",
            WeatherIcon::Snowflake => "❄",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            WeatherIcon::Sun => "sun",
            WeatherIcon::Cloud => "cloud",
            WeatherIcon::Snowflake => "snowflake",
            WeatherIcon::DimCloud => "dim cloud",
        }
    }

    /// RGB colour of the glyph.
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            WeatherIcon::Sun => (0xff, 0xcc, 0x00),
            WeatherIcon::Cloud => (0xa0, 0xa0, 0xa0),
            WeatherIcon::Snowflake => (0x00, 0x00, 0xff),
            WeatherIcon::DimCloud => (0xb0, 0xb0, 0xb0),
        }
    }
}

/// What the status line says.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Progress(String),
    Error(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScreenView {
    pub title: String,
    pub location: String,
    pub temperature: String,
    pub icon: WeatherIcon,
    pub sky: String,
    pub humidity: String,
    pub wind: String,
    pub status: Option<Status>,
    pub footer: String,
}

impl ScreenView {
    /// Marks the view as blocked on the location permission prompt.
    pub fn awaiting_permission(mut self) -> Self {
        if !matches!(self.status, Some(Status::Error(_))) {
            self.status = Some(Status::Progress(WAITING_FOR_PERMISSION.to_string()));
        }
        self
    }
}

pub fn render(state: &ScreenState) -> ScreenView {
    let mut view = match state.snapshot() {
        Some(snapshot) => loaded(snapshot),
        None => loading(),
    };
    view.status = status(state);
    view
}

fn loaded(snapshot: &WeatherSnapshot) -> ScreenView {
    ScreenView {
        location: snapshot.location_name.clone(),
        temperature: format_temperature(snapshot.temperature_c),
        icon: WeatherIcon::for_temperature(snapshot.temperature_c),
        sky: format!("Weather: {}", snapshot.sky_description),
        humidity: format!("Humidity: {}%", snapshot.humidity_pct),
        wind: format!("Wind: {} m/s", snapshot.wind_speed_mps),
        ..loading()
    }
}

fn loading() -> ScreenView {
    ScreenView {
        title: format!("{TITLE_APP_NAME}{TITLE_SUFFIX}"),
        location: FETCHING_LOCATION.to_string(),
        temperature: FETCHING_WEATHER.to_string(),
        icon: WeatherIcon::DimCloud,
        sky: LOADING.to_string(),
        humidity: format!("Humidity: {LOADING}"),
        wind: format!("Wind: {LOADING}"),
        status: None,
        footer: format!("{CREDIT_PREFIX}{CREDIT_NAME}"),
    }
}

fn status(state: &ScreenState) -> Option<Status> {
    if let Some(message) = state.error_message() {
        return Some(Status::Error(message.to_string()));
    }

    let progress = match state {
        ScreenState::Idle => "Starting...",
        ScreenState::ResolvingLocation => "Resolving location...",
        ScreenState::Fetching(_) => FETCHING_WEATHER,
        _ => return None,
    };
    Some(Status::Progress(progress.to_string()))
}

pub fn format_temperature(temp_c: f64) -> String {
    format!("{temp_c:.2}°C")
}

impl std::fmt::Display for ScreenView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f)?;
        writeln!(f, "📍 {}", self.location)?;
        writeln!(f, "{}", self.temperature)?;
        writeln!(f, "{} {}", self.icon.glyph(), self.sky)?;
        writeln!(f, "{}", self.humidity)?;
        writeln!(f, "{}", self.wind)?;
        if let Some(Status::Error(message)) = &self.status {
            writeln!(f)?;
            writeln!(f, "Error: {message}")?;
        }
        writeln!(f)?;
        write!(f, "{}", self.footer)
    }
}

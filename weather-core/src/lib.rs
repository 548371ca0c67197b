//! Core library for the IR Weather screen.
//!
//! This crate defines:
//! - Configuration & credential loading
//! - Location resolution behind a permission step
//! - The OpenWeather current-conditions client
//! - The screen state, its transitions, and the pure screen model
//!
//! It is used by `ir-weather-cli`, but can also back other front ends.

pub mod config;
pub mod error;
pub mod location;
pub mod model;
pub mod pipeline;
pub mod provider;
pub mod state;
pub mod view;

pub use config::Config;
pub use error::{FailureKind, FetchError, FetchFailure, LocationError};
pub use location::{LocationProvider, PermissionPrompt, PermissionStatus};
pub use model::{Coordinates, WeatherSnapshot};
pub use pipeline::{Outcome, PipelineHandle};
pub use provider::{OpenWeatherProvider, WeatherProvider};
pub use state::{Event, ScreenState};
pub use view::{ScreenView, WeatherIcon};

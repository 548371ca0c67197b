use crate::{
    error::FetchError,
    model::{Coordinates, WeatherSnapshot},
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

pub use openweather::OpenWeatherProvider;

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn get_weather(&self, coords: Coordinates) -> Result<WeatherSnapshot, FetchError>;
}

/// Fetch current weather once coordinates are known.
///
/// Returns `None` without touching the network while the position is unresolved.
pub async fn fetch_weather<P>(
    provider: &P,
    coords: Option<Coordinates>,
) -> Option<Result<WeatherSnapshot, FetchError>>
where
    P: WeatherProvider + ?Sized,
{
    let coords = coords?;
    tracing::debug!(%coords, "fetching current weather");

    let result = provider.get_weather(coords).await;
    if let Err(err) = &result {
        match err {
            FetchError::Http { status, .. } => {
                tracing::warn!(%status, "weather provider rejected request")
            }
            FetchError::Transport(_) | FetchError::Decode(_) => {
                tracing::error!(error = %err, "Error fetching weather data")
            }
        }
    }
    Some(result)
}

//! Location resolution: a permission step followed by a single position query.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::{fmt::Debug, time::Duration};

use crate::{error::LocationError, model::Coordinates};

pub const IP_LOCATION_URL: &str = "http://ip-api.com/json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

#[async_trait]
pub trait LocationProvider: Send + Sync + Debug {
    /// Ask for access to the device position.
    async fn request_permission(&self) -> PermissionStatus;

    /// Query the current position once. Only called after a grant.
    async fn current_position(&self) -> Result<Coordinates, LocationError>;
}

/// Something that can ask the user whether location access is allowed.
#[async_trait]
pub trait PermissionPrompt: Send + Sync + Debug {
    async fn ask(&self) -> PermissionStatus;
}

/// Request permission, then query the position once.
pub async fn resolve_location<L>(provider: &L) -> Result<Coordinates, LocationError>
where
    L: LocationProvider + ?Sized,
{
    match provider.request_permission().await {
        PermissionStatus::Granted => {
            let coords = provider.current_position().await?;
            tracing::info!(%coords, "location resolved");
            Ok(coords)
        }
        PermissionStatus::Denied => {
            tracing::info!("location permission denied");
            Err(LocationError::PermissionDenied)
        }
    }
}

/// Coordinates given up front; there is nothing to ask permission for.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation {
    coords: Coordinates,
}

impl FixedLocation {
    pub fn new(coords: Coordinates) -> Self {
        Self { coords }
    }
}

#[async_trait]
impl LocationProvider for FixedLocation {
    async fn request_permission(&self) -> PermissionStatus {
        PermissionStatus::Granted
    }

    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        Ok(self.coords)
    }
}

/// Approximate position from the public IP address.
#[derive(Debug, Clone)]
pub struct IpLocation {
    url: String,
    http: Client,
}

impl IpLocation {
    pub fn new(timeout: Duration) -> reqwest::Result<Self> {
        Self::with_url(IP_LOCATION_URL, timeout)
    }

    pub fn with_url(url: &str, timeout: Duration) -> reqwest::Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            url: url.to_string(),
            http,
        })
    }
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    lat: Option<f64>,
    lon: Option<f64>,
    message: Option<String>,
}

#[async_trait]
impl LocationProvider for IpLocation {
    async fn request_permission(&self) -> PermissionStatus {
        PermissionStatus::Granted
    }

    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        let res = self.http.get(&self.url).send().await?.error_for_status()?;
        let parsed: IpApiResponse = res.json().await?;

        match (parsed.status.as_str(), parsed.lat, parsed.lon) {
            ("success", Some(lat), Some(lon)) => Ok(Coordinates::new(lat, lon)),
            _ => Err(LocationError::Unavailable(
                parsed
                    .message
                    .unwrap_or_else(|| format!("lookup status '{}'", parsed.status)),
            )),
        }
    }
}

/// Wraps a provider so that the user is asked before the position is read.
#[derive(Debug)]
pub struct Consent<L, P> {
    inner: L,
    prompt: P,
}

impl<L, P> Consent<L, P> {
    pub fn new(inner: L, prompt: P) -> Self {
        Self { inner, prompt }
    }
}

#[async_trait]
impl<L, P> LocationProvider for Consent<L, P>
where
    L: LocationProvider,
    P: PermissionPrompt,
{
    async fn request_permission(&self) -> PermissionStatus {
        match self.prompt.ask().await {
            PermissionStatus::Granted => self.inner.request_permission().await,
            PermissionStatus::Denied => PermissionStatus::Denied,
        }
    }

    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        self.inner.current_position().await
    }
}

/// Answers every prompt the same way. Backs the `--yes` flag.
#[derive(Debug, Clone, Copy)]
pub struct StaticAnswer(pub PermissionStatus);

#[async_trait]
impl PermissionPrompt for StaticAnswer {
    async fn ask(&self) -> PermissionStatus {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Default)]
    struct CountingLocation {
        position_calls: AtomicUsize,
    }

    #[async_trait]
    impl LocationProvider for CountingLocation {
        async fn request_permission(&self) -> PermissionStatus {
            PermissionStatus::Granted
        }

        async fn current_position(&self) -> Result<Coordinates, LocationError> {
            self.position_calls.fetch_add(1, Ordering::SeqCst);
            Ok(Coordinates::new(23.8103, 90.4125))
        }
    }

    #[tokio::test]
    async fn fixed_location_resolves_without_prompt() {
        let coords = Coordinates::new(1.5, -2.5);
        let resolved = resolve_location(&FixedLocation::new(coords)).await.expect("resolved");
        assert_eq!(resolved, coords);
    }

    #[tokio::test]
    async fn denied_consent_never_reads_position() {
        let provider = Consent::new(
            CountingLocation::default(),
            StaticAnswer(PermissionStatus::Denied),
        );

        let err = resolve_location(&provider).await.unwrap_err();

        assert!(matches!(err, LocationError::PermissionDenied));
        assert_eq!(provider.inner.position_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn granted_consent_reads_position_once() {
        let provider = Consent::new(
            CountingLocation::default(),
            StaticAnswer(PermissionStatus::Granted),
        );

        let coords = resolve_location(&provider).await.expect("resolved");

        assert_eq!(coords, Coordinates::new(23.8103, 90.4125));
        assert_eq!(provider.inner.position_calls.load(Ordering::SeqCst), 1);
    }
}

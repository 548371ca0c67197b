//! permission → position → fetch, as one cancellable task.

use std::sync::Arc;

use tokio::{sync::mpsc, task::JoinHandle};
use tokio_util::sync::{CancellationToken, DropGuard};

use crate::{
    error::{FetchFailure, LocationError},
    location::{LocationProvider, resolve_location},
    provider::{WeatherProvider, fetch_weather},
    state::Event,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    Cancelled,
}

/// Run the pipeline once, reporting each step on `events`.
///
/// Stops early on denial or location failure; the weather provider is only
/// called with resolved coordinates.
pub async fn run<L, W>(
    location: &L,
    weather: &W,
    events: &mpsc::UnboundedSender<Event>,
    cancel: &CancellationToken,
) -> Outcome
where
    L: LocationProvider + ?Sized,
    W: WeatherProvider + ?Sized,
{
    let emit = |event: Event| {
        // A closed receiver means the screen is gone.
        if events.send(event).is_err() {
            cancel.cancel();
        }
    };

    emit(Event::Started);

    let resolved = tokio::select! {
        _ = cancel.cancelled() => return Outcome::Cancelled,
        resolved = resolve_location(location) => resolved,
    };

    let coords = match resolved {
        Ok(coords) => coords,
        Err(LocationError::PermissionDenied) => {
            emit(Event::PermissionDenied);
            return Outcome::Completed;
        }
        Err(err) => {
            tracing::error!(error = %err, "could not resolve location");
            emit(Event::LocationFailed(FetchFailure::from(&err)));
            return Outcome::Completed;
        }
    };
    emit(Event::LocationResolved(coords));

    let fetched = tokio::select! {
        _ = cancel.cancelled() => return Outcome::Cancelled,
        fetched = fetch_weather(weather, Some(coords)) => fetched,
    };

    match fetched {
        Some(Ok(snapshot)) => {
            tracing::info!(location = %snapshot.location_name, "weather loaded");
            emit(Event::WeatherLoaded(snapshot));
        }
        Some(Err(err)) => emit(Event::WeatherFailed(FetchFailure::from(&err))),
        None => {}
    }

    if cancel.is_cancelled() {
        Outcome::Cancelled
    } else {
        Outcome::Completed
    }
}

/// A spawned pipeline bound to the lifetime of its screen.
///
/// Dropping the handle cancels the task and aborts any in-flight request.
#[derive(Debug)]
pub struct PipelineHandle {
    pub events: mpsc::UnboundedReceiver<Event>,
    task: JoinHandle<Outcome>,
    cancel: CancellationToken,
    _guard: DropGuard,
}

impl PipelineHandle {
    pub fn spawn(location: Arc<dyn LocationProvider>, weather: Arc<dyn WeatherProvider>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();

        let task = tokio::spawn({
            let cancel = cancel.clone();
            async move { run(location.as_ref(), weather.as_ref(), &tx, &cancel).await }
        });

        Self {
            events: rx,
            task,
            _guard: cancel.clone().drop_guard(),
            cancel,
        }
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Wait for the task to finish. A panicked or aborted task counts as cancelled.
    pub async fn join(mut self) -> Outcome {
        match (&mut self.task).await {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::error!(error = %err, "weather pipeline task failed");
                Outcome::Cancelled
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::FetchError,
        location::{Consent, FixedLocation, PermissionStatus, StaticAnswer},
        model::{Coordinates, WeatherSnapshot},
    };
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Default)]
    struct StubWeather {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl WeatherProvider for StubWeather {
        async fn get_weather(&self, _coords: Coordinates) -> Result<WeatherSnapshot, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(WeatherSnapshot {
                location_name: "Dhaka".into(),
                temperature_c: 31.5,
                sky_description: "clear sky".into(),
                humidity_pct: 60,
                wind_speed_mps: 3.2,
            })
        }
    }

    #[derive(Debug)]
    struct NeverWeather;

    #[async_trait]
    impl WeatherProvider for NeverWeather {
        async fn get_weather(&self, _coords: Coordinates) -> Result<WeatherSnapshot, FetchError> {
            std::future::pending().await
        }
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<Event>) -> Vec<Event> {
        let mut out = Vec::new();
        while let Ok(event) = rx.try_recv() {
            out.push(event);
        }
        out
    }

    #[tokio::test]
    async fn denied_permission_skips_fetch() {
        let location = Consent::new(
            FixedLocation::new(Coordinates::new(1.0, 2.0)),
            StaticAnswer(PermissionStatus::Denied),
        );
        let weather = StubWeather::default();
        let (tx, mut rx) = mpsc::unbounded_channel();

        let outcome = run(&location, &weather, &tx, &CancellationToken::new()).await;

        assert_eq!(outcome, Outcome::Completed);
        assert_eq!(weather.calls.load(Ordering::SeqCst), 0);
        assert_eq!(drain(&mut rx), vec![Event::Started, Event::PermissionDenied]);
    }

    #[tokio::test]
    async fn granted_permission_fetches_once() {
        let coords = Coordinates::new(23.8103, 90.4125);
        let weather = StubWeather::default();
        let (tx, mut rx) = mpsc::unbounded_channel();

        let outcome = run(&FixedLocation::new(coords), &weather, &tx, &CancellationToken::new()).await;

        assert_eq!(outcome, Outcome::Completed);
        assert_eq!(weather.calls.load(Ordering::SeqCst), 1);

        let events = drain(&mut rx);
        assert_eq!(events.len(), 3);
        assert_eq!(events[1], Event::LocationResolved(coords));
        assert!(matches!(events[2], Event::WeatherLoaded(_)));
    }

    #[tokio::test]
    async fn cancellation_aborts_inflight_fetch() {
        let handle = PipelineHandle::spawn(
            Arc::new(FixedLocation::new(Coordinates::new(0.0, 0.0))),
            Arc::new(NeverWeather),
        );

        handle.cancel();
        assert_eq!(handle.join().await, Outcome::Cancelled);
    }

    #[tokio::test]
    async fn dropped_receiver_cancels() {
        let weather = NeverWeather;
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let cancel = CancellationToken::new();

        let outcome = run(
            &FixedLocation::new(Coordinates::new(0.0, 0.0)),
            &weather,
            &tx,
            &cancel,
        )
        .await;

        assert_eq!(outcome, Outcome::Cancelled);
    }
}

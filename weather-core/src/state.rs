//! The single state value the weather screen renders from.

use crate::{
    error::{FetchFailure, PERMISSION_DENIED_MESSAGE},
    model::{Coordinates, WeatherSnapshot},
};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ScreenState {
    #[default]
    Idle,
    ResolvingLocation,
    PermissionDenied,
    Fetching(Coordinates),
    Loaded(WeatherSnapshot),
    Failed(FetchFailure),
}

/// Progress reported by the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Started,
    PermissionDenied,
    LocationFailed(FetchFailure),
    LocationResolved(Coordinates),
    WeatherLoaded(WeatherSnapshot),
    WeatherFailed(FetchFailure),
}

impl ScreenState {
    /// Next state for `event`. Events that do not apply to the current state leave it as is.
    pub fn transition(self, event: Event) -> ScreenState {
        match (self, event) {
            (ScreenState::Idle, Event::Started) => ScreenState::ResolvingLocation,
            (ScreenState::ResolvingLocation, Event::PermissionDenied) => {
                ScreenState::PermissionDenied
            }
            (ScreenState::ResolvingLocation, Event::LocationFailed(failure)) => {
                ScreenState::Failed(failure)
            }
            (ScreenState::ResolvingLocation, Event::LocationResolved(coords)) => {
                ScreenState::Fetching(coords)
            }
            (
                ScreenState::Fetching(_) | ScreenState::Loaded(_) | ScreenState::Failed(_),
                Event::WeatherLoaded(snapshot),
            ) => ScreenState::Loaded(snapshot),
            (ScreenState::Fetching(_), Event::WeatherFailed(failure)) => {
                ScreenState::Failed(failure)
            }
            (state, event) => {
                tracing::debug!(?state, ?event, "ignoring event");
                state
            }
        }
    }

    pub fn apply(&mut self, event: Event) {
        *self = std::mem::take(self).transition(event);
    }

    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        match self {
            ScreenState::Loaded(snapshot) => Some(snapshot),
            _ => None,
        }
    }

    /// The human-readable failure, if the screen ended in one.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            ScreenState::PermissionDenied => Some(PERMISSION_DENIED_MESSAGE),
            ScreenState::Failed(failure) => Some(&failure.message),
            _ => None,
        }
    }

    /// No further events are expected.
    pub fn is_settled(&self) -> bool {
        matches!(
            self,
            ScreenState::PermissionDenied | ScreenState::Loaded(_) | ScreenState::Failed(_)
        )
    }
}

//! Full-screen terminal rendering of the weather screen.

mod render;
mod terminal;
mod theme;

use std::sync::Arc;

use crossterm::event::{Event as TermEvent, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ir_weather_core::{
    LocationProvider, PermissionStatus, PipelineHandle, ScreenState, WeatherProvider, view,
};
use tokio::sync::mpsc;

use crate::prompt::PermissionRequest;

/// What a key press asks the screen to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyAction {
    Quit,
    Answer(PermissionStatus),
    Ignore,
}

fn key_action(key: &KeyEvent, asking_permission: bool) -> KeyAction {
    if key.kind != KeyEventKind::Press {
        return KeyAction::Ignore;
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        KeyCode::Char('y' | 'Y') if asking_permission => {
            KeyAction::Answer(PermissionStatus::Granted)
        }
        KeyCode::Char('n' | 'N') if asking_permission => {
            KeyAction::Answer(PermissionStatus::Denied)
        }
        KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,
        _ => KeyAction::Ignore,
    }
}

/// Show the screen until the user quits. Returns the last state.
///
/// The pipeline is spawned when the screen opens and cancelled when it closes.
pub async fn run(
    location: Arc<dyn LocationProvider>,
    weather: Arc<dyn WeatherProvider>,
    mut permission_requests: mpsc::UnboundedReceiver<PermissionRequest>,
) -> anyhow::Result<ScreenState> {
    let (mut terminal, _guard) = terminal::setup_terminal()?;
    let mut keys = EventStream::new();

    let mut pipeline = PipelineHandle::spawn(location, weather);
    let mut state = ScreenState::default();
    let mut pending: Option<PermissionRequest> = None;

    loop {
        let mut screen = view::render(&state);
        if pending.is_some() {
            screen = screen.awaiting_permission();
        }
        terminal.draw(|frame| render::draw(frame, &screen, pending.is_some()))?;

        tokio::select! {
            Some(event) = pipeline.events.recv() => {
                tracing::debug!(?event, "pipeline event");
                state.apply(event);
            }
            Some(request) = permission_requests.recv() => {
                pending = Some(request);
            }
            key = keys.next() => match key {
                Some(Ok(TermEvent::Key(key))) => match key_action(&key, pending.is_some()) {
                    KeyAction::Quit => break,
                    KeyAction::Answer(status) => {
                        if let Some(request) = pending.take() {
                            request.answer(status);
                        }
                    }
                    KeyAction::Ignore => {}
                },
                Some(Ok(_)) => {}
                Some(Err(err)) => return Err(err.into()),
                None => break,
            },
        }
    }

    pipeline.cancel();
    Ok(state)
}

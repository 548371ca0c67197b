//! Ways of asking the user for location access.

use async_trait::async_trait;
use ir_weather_core::{PermissionPrompt, PermissionStatus};
use tokio::sync::{mpsc, oneshot};

pub const QUESTION: &str = "Allow IR Weather to use your approximate location?";

/// Asks on the terminal before the screen is drawn. Used by `--plain`.
#[derive(Debug, Clone, Copy, Default)]
pub struct InquirePrompt;

#[async_trait]
impl PermissionPrompt for InquirePrompt {
    async fn ask(&self) -> PermissionStatus {
        let answer = tokio::task::spawn_blocking(|| {
            inquire::Confirm::new(QUESTION)
                .with_default(true)
                .with_help_message("Your IP address is used to look up an approximate position")
                .prompt()
        })
        .await;

        match answer {
            Ok(Ok(true)) => PermissionStatus::Granted,
            Ok(Ok(false)) => PermissionStatus::Denied,
            Ok(Err(err)) => {
                tracing::warn!(error = %err, "permission prompt failed");
                PermissionStatus::Denied
            }
            Err(err) => {
                tracing::error!(error = %err, "permission prompt task failed");
                PermissionStatus::Denied
            }
        }
    }
}

/// A pending question for the screen to answer.
#[derive(Debug)]
pub struct PermissionRequest {
    reply: oneshot::Sender<PermissionStatus>,
}

impl PermissionRequest {
    pub fn answer(self, status: PermissionStatus) {
        // The pipeline may already be gone.
        let _ = self.reply.send(status);
    }
}

/// Forwards the question to the screen's event loop and waits for the key press.
#[derive(Debug, Clone)]
pub struct ScreenPrompt {
    requests: mpsc::UnboundedSender<PermissionRequest>,
}

pub fn screen_prompt() -> (ScreenPrompt, mpsc::UnboundedReceiver<PermissionRequest>) {
    let (requests, rx) = mpsc::unbounded_channel();
    (ScreenPrompt { requests }, rx)
}

#[async_trait]
impl PermissionPrompt for ScreenPrompt {
    async fn ask(&self) -> PermissionStatus {
        let (reply, answer) = oneshot::channel();
        if self.requests.send(PermissionRequest { reply }).is_err() {
            return PermissionStatus::Denied;
        }
        // A screen that closes without answering denies.
        answer.await.unwrap_or(PermissionStatus::Denied)
    }
}

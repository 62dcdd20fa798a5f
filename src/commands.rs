//! Async commands.
//!
//! Screens return commands from `update()`; the App spawns each one on the
//! runtime and reports completion back as [`AppMessage::CommandCompleted`].

use async_trait::async_trait;
use color_eyre::Result;
use tokio::sync::mpsc::UnboundedSender;

use crate::app::AppMessage;

/// An async side effect.
///
/// Results are sent back to the owning screen through its own channel;
/// app-wide effects (toasts, navigation) go through `action_tx`.
#[async_trait]
pub trait Command: Send + 'static {
    /// Human-readable name for logs, including identifying context.
    fn name(&self) -> String;

    /// Run the command to completion.
    async fn execute(self: Box<Self>, action_tx: UnboundedSender<AppMessage>) -> Result<()>;
}

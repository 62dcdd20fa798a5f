use color_eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::Theme;
use crate::commands::Command;
use crate::route::Route;
use crate::ui::{EventResult, Keybinding};

pub enum ScreenMsg {
    /// No action needed
    Idle,
    /// Run one or more commands
    Run(Vec<Box<dyn Command>>),
    /// Leave this screen for another route
    Navigate(Route),
}

impl<T: Command> From<T> for ScreenMsg {
    fn from(value: T) -> Self {
        Self::Run(vec![Box::new(value)])
    }
}

/// A routed page.
///
/// Screens own their state and a private message queue. The App calls:
///
/// 1. `init()` once when the screen becomes active, then `update()`
/// 2. `handle_key()` for input, then `update()` if consumed
/// 3. `handle_tick()` and `update()` on every tick, so results sent by
///    running commands are applied promptly
/// 4. `update()` whenever a command completes
pub trait Screen {
    /// Queue startup messages.
    fn init(&mut self) {}

    /// Advance animations.
    fn handle_tick(&mut self) {}

    /// Handle a key event. `Ignored` lets global bindings apply.
    ///
    /// # Errors
    /// Returns an error if the key could not be handled.
    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<()>>;

    /// Handle pasted text. Returns whether it was used.
    fn handle_paste(&mut self, text: &str) -> bool {
        _ = text;
        false
    }

    /// Drain and apply all queued messages.
    ///
    /// # Errors
    /// Returns an error if message processing fails; the App shows it in a
    /// modal dialog.
    fn update(&mut self) -> Result<ScreenMsg>;

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme);

    /// Breadcrumb segments for the title bar.
    fn breadcrumbs(&self) -> Vec<String>;

    /// Bindings for the help overlay and status bar hints.
    fn keybindings(&self) -> Vec<Keybinding> {
        vec![]
    }
}

/// Merge one processed message into the batch result of `update()`.
///
/// Navigation wins over commands; commands accumulate.
pub fn merge(acc: ScreenMsg, next: ScreenMsg) -> ScreenMsg {
    match (acc, next) {
        (nav @ ScreenMsg::Navigate(_), _) | (_, nav @ ScreenMsg::Navigate(_)) => nav,
        (ScreenMsg::Idle, other) | (other, ScreenMsg::Idle) => other,
        (ScreenMsg::Run(mut a), ScreenMsg::Run(b)) => {
            a.extend(b);
            ScreenMsg::Run(a)
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use tokio::sync::mpsc::UnboundedSender;

    use super::*;
    use crate::app::AppMessage;

    struct NoopCmd;

    #[async_trait]
    impl Command for NoopCmd {
        fn name(&self) -> String {
            "noop".into()
        }

        async fn execute(self: Box<Self>, _action_tx: UnboundedSender<AppMessage>) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_merge_accumulates_commands() {
        let merged = merge(NoopCmd.into(), NoopCmd.into());
        assert!(matches!(merged, ScreenMsg::Run(cmds) if cmds.len() == 2));
    }

    #[test]
    fn test_merge_navigation_wins() {
        let merged = merge(NoopCmd.into(), ScreenMsg::Navigate(Route::About));
        assert!(matches!(merged, ScreenMsg::Navigate(Route::About)));
        let merged = merge(ScreenMsg::Navigate(Route::Legal), ScreenMsg::Idle);
        assert!(matches!(merged, ScreenMsg::Navigate(Route::Legal)));
    }
}

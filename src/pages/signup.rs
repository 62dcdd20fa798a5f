use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::Theme;
use crate::app::AppMessage;
use crate::config::{GlobalAction, KeyResolver};
use crate::model::User;
use crate::route::Route;
use crate::screen::{Screen, ScreenMsg, merge};
use crate::theme::TextVariant;
use crate::ui::{Component, EventResult, Keybinding, Result, TextInput, TextInputEvent};

#[derive(Debug)]
enum SignUpMsg {
    Submit(String),
}

fn parse_account_id(input: &str) -> Option<i64> {
    input.trim().parse::<i64>().ok().filter(|id| *id > 0)
}

fn account_input() -> TextInput {
    TextInput::new("Account ID")
        .with_placeholder("e.g. 1042")
        .with_help("The number from your Servly welcome email.")
}

/// Entry point for users without a session.
///
/// Accounts are created by the external auth provider; this page only
/// records which account the terminal acts as.
pub struct SignUpPage {
    input: TextInput,
    resolver: Arc<KeyResolver>,
    msg_tx: UnboundedSender<SignUpMsg>,
    msg_rx: UnboundedReceiver<SignUpMsg>,
    app_tx: UnboundedSender<AppMessage>,
}

impl SignUpPage {
    pub fn new(resolver: Arc<KeyResolver>, app_tx: UnboundedSender<AppMessage>) -> Self {
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        Self {
            input: account_input(),
            resolver,
            msg_tx,
            msg_rx,
            app_tx,
        }
    }

    fn process_message(&mut self, msg: SignUpMsg) -> ScreenMsg {
        match msg {
            SignUpMsg::Submit(value) => {
                let Some(id) = parse_account_id(&value) else {
                    self.input.set_error("Account ID must be a positive number");
                    return ScreenMsg::Idle;
                };
                tracing::info!(user_id = id, "Signed in");
                let _ = self.app_tx.send(AppMessage::SignedIn(User::new(id)));
                ScreenMsg::Navigate(Route::RoleSelection)
            }
        }
    }
}

impl Screen for SignUpPage {
    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<()>> {
        // Function keys reach About and Legal even while typing.
        if matches!(key.code, KeyCode::F(_)) {
            return Ok(EventResult::Ignored);
        }
        Ok(match self.input.handle_key(key)? {
            EventResult::Event(TextInputEvent::Submitted(value)) => {
                let _ = self.msg_tx.send(SignUpMsg::Submit(value));
                EventResult::Consumed
            }
            EventResult::Event(TextInputEvent::Cancelled) => {
                self.input = account_input();
                EventResult::Consumed
            }
            EventResult::Consumed => EventResult::Consumed,
            EventResult::Ignored => EventResult::Ignored,
        })
    }

    fn handle_paste(&mut self, text: &str) -> bool {
        self.input = account_input().with_value(text.trim());
        true
    }

    fn update(&mut self) -> Result<ScreenMsg> {
        let mut result = ScreenMsg::Idle;
        while let Ok(msg) = self.msg_rx.try_recv() {
            let next = self.process_message(msg);
            result = merge(result, next);
        }
        Ok(result)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let [header, body] =
            Layout::vertical([Constraint::Length(6), Constraint::Min(0)]).areas(area);
        frame.render_widget(
            Paragraph::new(vec![
                Line::from(""),
                Line::styled("Welcome to Servly", theme.typography(TextVariant::Heading)),
                Line::from(""),
                Line::styled(
                    "Sign in with the account you created on servly.app.",
                    theme.typography(TextVariant::Subtitle),
                ),
                Line::styled(
                    format!(
                        "Press {} to read how Servly works.",
                        self.resolver.display_global(GlobalAction::About)
                    ),
                    theme.typography(TextVariant::Caption),
                ),
            ])
            .alignment(Alignment::Center),
            header,
        );
        self.input.render(frame, body, theme);
    }

    fn breadcrumbs(&self) -> Vec<String> {
        vec!["Sign in".to_string()]
    }

    fn keybindings(&self) -> Vec<Keybinding> {
        vec![
            Keybinding::hint("Enter", "Continue"),
            Keybinding::new("Esc", "Clear"),
        ]
    }
}

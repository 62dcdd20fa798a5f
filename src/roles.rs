//! Role selection: a signed-in user declares whether they book services or
//! provide them.

use std::sync::Arc;

use async_trait::async_trait;
use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::Theme;
use crate::api::UserApi;
use crate::app::AppMessage;
use crate::commands::Command;
use crate::config::{KeyResolver, NavAction, RolesAction};
use crate::model::{Role, User};
use crate::route::Route;
use crate::screen::{Screen, ScreenMsg, merge};
use crate::theme::TextVariant;
use crate::ui::{Component, EventResult, Keybinding, Result, Spinner, Toast};

const ROLE_UPDATE_FALLBACK: &str = "Failed to update role";

// === Messages ===

#[derive(Debug)]
pub enum RolesMsg {
    /// No signed-in user; leave for sign-up.
    RedirectToSignUp,
    Select(Role),
    Updated(Role),
    Failed(Option<String>),
}

// === State ===

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Ready,
    Submitting(Role),
    /// Server confirmed; navigation follows and controls stay disabled.
    Completed(Role),
}

const fn welcome(role: Role) -> (&'static str, &'static str) {
    match role {
        Role::Customer => (
            "Welcome, customer!",
            "Browse local services and book trusted providers.",
        ),
        Role::Provider => (
            "Welcome, provider!",
            "Upload your verification documents to start receiving bookings.",
        ),
    }
}

const fn pitch(role: Role) -> (&'static str, &'static str) {
    match role {
        Role::Customer => (
            "I need a service",
            "Find and book vetted local professionals for jobs around the home.",
        ),
        Role::Provider => (
            "I provide services",
            "Offer your skills, get verified and grow your business with Servly.",
        ),
    }
}

// === Screen ===

pub struct RoleSelection {
    user: Option<User>,
    api: Arc<dyn UserApi>,
    state: State,
    highlighted: Role,
    spinner: Spinner,
    resolver: Arc<KeyResolver>,
    msg_tx: UnboundedSender<RolesMsg>,
    msg_rx: UnboundedReceiver<RolesMsg>,
    app_tx: UnboundedSender<AppMessage>,
}

impl RoleSelection {
    /// `user` is the signed-in user, if any.
    pub fn new(
        user: Option<User>,
        api: Arc<dyn UserApi>,
        resolver: Arc<KeyResolver>,
        app_tx: UnboundedSender<AppMessage>,
    ) -> Self {
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        Self {
            user,
            api,
            state: State::Ready,
            highlighted: Role::Customer,
            spinner: Spinner::new("Saving your choice..."),
            resolver,
            msg_tx,
            msg_rx,
            app_tx,
        }
    }

    fn queue(&self, msg: RolesMsg) {
        let _ = self.msg_tx.send(msg);
    }

    const fn controls_enabled(&self) -> bool {
        matches!(self.state, State::Ready)
    }

    fn process_message(&mut self, msg: RolesMsg) -> ScreenMsg {
        match msg {
            RolesMsg::RedirectToSignUp => ScreenMsg::Navigate(Route::SignUp),

            RolesMsg::Select(role) => {
                let Some(user) = &self.user else {
                    return ScreenMsg::Navigate(Route::SignUp);
                };
                if !self.controls_enabled() {
                    return ScreenMsg::Idle;
                }
                self.state = State::Submitting(role);
                UpdateRoleCmd {
                    api: self.api.clone(),
                    user_id: user.id,
                    role,
                    tx: self.msg_tx.clone(),
                }
                .into()
            }

            RolesMsg::Updated(role) => {
                self.state = State::Completed(role);
                let (title, description) = welcome(role);
                let _ = self
                    .app_tx
                    .send(AppMessage::ShowToast(Toast::success(title, description)));
                let _ = self.app_tx.send(AppMessage::RoleAssigned(role));
                ScreenMsg::Navigate(Route::dashboard(role))
            }

            RolesMsg::Failed(message) => {
                self.state = State::Ready;
                let _ = self.app_tx.send(AppMessage::ShowToast(Toast::error(
                    "Could not save your role",
                    message.unwrap_or_else(|| ROLE_UPDATE_FALLBACK.to_string()),
                )));
                ScreenMsg::Idle
            }
        }
    }

    fn render_card(&self, frame: &mut Frame, area: Rect, theme: &Theme, role: Role) {
        let (title, body) = pitch(role);
        let key = self.resolver.display_roles(match role {
            Role::Customer => RolesAction::Customer,
            Role::Provider => RolesAction::Provider,
        });

        let highlighted = self.highlighted == role;
        let submitting = self.state == State::Submitting(role);
        let enabled = self.controls_enabled();

        let border = if highlighted && enabled {
            theme.border_focused()
        } else {
            theme.border()
        };
        let title_style = if enabled {
            theme.typography(TextVariant::Title)
        } else {
            Style::default()
                .fg(theme.overlay0())
                .add_modifier(Modifier::BOLD)
        };

        let footer = if submitting {
            "Saving...".to_string()
        } else {
            format!("Press {key}")
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(border));

        let lines = vec![
            Line::styled(title, title_style),
            Line::from(""),
            Line::styled(body, theme.typography(TextVariant::Body)),
            Line::from(""),
            Line::styled(footer, theme.typography(TextVariant::Caption)),
        ];
        frame.render_widget(
            Paragraph::new(lines)
                .block(block)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            area,
        );
    }
}

impl Screen for RoleSelection {
    fn init(&mut self) {
        if self.user.is_none() {
            self.queue(RolesMsg::RedirectToSignUp);
        }
    }

    fn handle_tick(&mut self) {
        if matches!(self.state, State::Submitting(_)) {
            self.spinner.handle_tick();
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<()>> {
        if self.user.is_none() {
            return Ok(EventResult::Ignored);
        }
        let role = if self.resolver.matches_roles(&key, RolesAction::Customer) {
            Some(Role::Customer)
        } else if self.resolver.matches_roles(&key, RolesAction::Provider) {
            Some(Role::Provider)
        } else if self.resolver.matches_nav(&key, NavAction::Select) {
            Some(self.highlighted)
        } else if self.resolver.matches_nav(&key, NavAction::Left) {
            self.highlighted = Role::Customer;
            return Ok(EventResult::Consumed);
        } else if self.resolver.matches_nav(&key, NavAction::Right) {
            self.highlighted = Role::Provider;
            return Ok(EventResult::Consumed);
        } else {
            None
        };

        match role {
            Some(role) if self.controls_enabled() => {
                self.highlighted = role;
                self.queue(RolesMsg::Select(role));
                Ok(EventResult::Consumed)
            }
            // Disabled controls swallow their keys.
            Some(_) => Ok(EventResult::Consumed),
            None => Ok(EventResult::Ignored),
        }
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
        // Nothing of our own without a user; the redirect is queued.
        if self.user.is_none() {
            return;
        }

        let [header, cards, footer] = Layout::vertical([
            Constraint::Length(4),
            Constraint::Length(9),
            Constraint::Length(1),
        ])
        .flex(Flex::Center)
        .areas(area);

        frame.render_widget(
            Paragraph::new(vec![
                Line::styled("How will you use Servly?", theme.typography(TextVariant::Heading)),
                Line::from(""),
                Line::styled(
                    "You can only choose once, so pick the one that fits.",
                    theme.typography(TextVariant::Subtitle),
                ),
            ])
            .alignment(Alignment::Center),
            header,
        );

        let [left, right] = Layout::horizontal([Constraint::Length(36), Constraint::Length(36)])
            .flex(Flex::Center)
            .spacing(2)
            .areas(cards);
        self.render_card(frame, left, theme, Role::Customer);
        self.render_card(frame, right, theme, Role::Provider);

        if matches!(self.state, State::Submitting(_)) {
            self.spinner.render(frame, footer, theme);
        }
    }

    fn breadcrumbs(&self) -> Vec<String> {
        vec!["Choose your role".to_string()]
    }

    fn keybindings(&self) -> Vec<Keybinding> {
        vec![
            Keybinding::hint(self.resolver.display_roles(RolesAction::Customer), "Customer"),
            Keybinding::hint(self.resolver.display_roles(RolesAction::Provider), "Provider"),
            Keybinding::new(
                format!(
                    "{}/{}",
                    self.resolver.display_nav(NavAction::Left),
                    self.resolver.display_nav(NavAction::Right)
                ),
                "Highlight",
            ),
        ]
    }
}

// === Commands ===

struct UpdateRoleCmd {
    api: Arc<dyn UserApi>,
    user_id: i64,
    role: Role,
    tx: UnboundedSender<RolesMsg>,
}

#[async_trait]
impl Command for UpdateRoleCmd {
    fn name(&self) -> String {
        format!("Setting role of user {} to {}", self.user_id, self.role)
    }

    async fn execute(self: Box<Self>, _action_tx: UnboundedSender<AppMessage>) -> Result<()> {
        let msg = match self.api.update_role(self.user_id, self.role).await {
            Ok(()) => RolesMsg::Updated(self.role),
            Err(e) => {
                tracing::warn!(user_id = self.user_id, "Role update failed: {e}");
                RolesMsg::Failed(e.user_message())
            }
        };
        if self.tx.send(msg).is_err() {
            tracing::debug!("Role selection closed before the update finished");
        }
        Ok(())
    }
}

//! Application shell: owns the terminal loop, the active screen, overlays
//! and the signed-in session.

use std::path::PathBuf;
use std::sync::Arc;

use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

use crate::Theme;
use crate::api::ApiClient;
use crate::cli::Args;
use crate::commands::Command;
use crate::config::{self, AppConfig, GlobalAction, KeyResolver};
use crate::documents::DocumentsScreen;
use crate::model::{Role, User};
use crate::pages::{AboutPage, CustomerDashboard, LegalPage, SignUpPage};
use crate::roles::RoleSelection;
use crate::route::Route;
use crate::screen::{Screen, ScreenMsg};
use crate::session::{self, Session};
use crate::theme::{ThemeEvent, ThemeInfo, ThemeSelectorView, theme_from_name};
use crate::tui::{Event, Tui};
use crate::ui::{
    Component, ErrorDialog, ErrorDialogEvent, EventResult, HelpEvent, HelpOverlay, StatusBar,
    Toast, ToastManager,
};

const STATUS_BAR_HEIGHT: u16 = 7;

/// Application-level messages.
///
/// Screen-specific messages stay on each screen's own channel; this enum
/// only carries what the shell itself acts on.
#[derive(Debug)]
pub enum AppMessage {
    // === Lifecycle ===
    /// Periodic tick for animations and polling
    Tick,
    /// Render the UI
    Render,
    /// Terminal resized
    Resize(u16, u16),
    /// Suspend the application (Ctrl+Z)
    Suspend,
    /// Resume from suspension
    Resume,
    /// Quit the application
    Quit,
    /// Clear and redraw the terminal
    ClearScreen,

    // === Feedback ===
    /// Display an error in a modal dialog
    DisplayError(String),
    /// Display help overlay
    DisplayHelp,
    /// Display theme selector overlay
    DisplayThemeSelector,
    /// Close any open popup
    ClosePopup,
    /// Show a transient notification
    ShowToast(Toast),

    // === Screens ===
    /// A command finished; the screen should drain its queue
    CommandCompleted { name: String, success: bool },
    /// Workflow transition; replaces the navigation history
    Navigate(Route),
    /// Return to the previous page
    GoBack,
    /// User picked a theme
    SelectTheme(ThemeInfo),

    // === Session ===
    /// Account chosen on the sign-in page
    SignedIn(User),
    /// Server confirmed the user's role
    RoleAssigned(Role),
    /// The provider's document list changed
    DocumentsChanged(usize),
}

enum Overlay {
    Help(HelpOverlay),
    ThemeSelector(ThemeSelectorView),
    Error(ErrorDialog),
}

/// Where to start given the stored session.
fn start_route(session: &Session) -> Route {
    match session.user() {
        None => Route::SignUp,
        Some(User { role: None, .. }) => Route::RoleSelection,
        Some(User {
            role: Some(role), ..
        }) => Route::dashboard(*role),
    }
}

/// A page left open under About or Legal.
///
/// The screen stays alive so commands it started keep reporting to it.
struct Visited {
    route: Route,
    screen: Box<dyn Screen>,
    document_count: Option<usize>,
}

pub struct App {
    route: Route,
    screen: Box<dyn Screen>,
    /// Pages to return to with Back, most recent last.
    history: Vec<Visited>,
    session: Session,
    api: Arc<ApiClient>,
    config: Arc<AppConfig>,
    resolver: Arc<KeyResolver>,
    theme: Theme,
    overlay: Option<Overlay>,
    toasts: ToastManager,
    status_bar: StatusBar,
    /// Files passed with `--upload`, handed to the next documents screen.
    pending_uploads: Vec<PathBuf>,
    should_quit: bool,
    should_suspend: bool,
    message_tx: UnboundedSender<AppMessage>,
    message_rx: UnboundedReceiver<AppMessage>,
}

impl App {
    pub fn new(
        config: Arc<AppConfig>,
        resolver: Arc<KeyResolver>,
        theme: Theme,
        api: Arc<ApiClient>,
        session: Session,
    ) -> Self {
        let (message_tx, message_rx) = mpsc::unbounded_channel();
        let mut status_bar = StatusBar::new(api.base_url(), resolver.clone());
        status_bar.set_user(session.user().cloned());

        // Placeholder until `start` opens the first page.
        let screen: Box<dyn Screen> =
            Box::new(SignUpPage::new(resolver.clone(), message_tx.clone()));

        Self {
            route: Route::SignUp,
            screen,
            history: Vec::new(),
            session,
            api,
            config,
            resolver,
            theme,
            overlay: None,
            toasts: ToastManager::new(),
            status_bar,
            pending_uploads: Vec::new(),
            should_quit: false,
            should_suspend: false,
            message_tx,
            message_rx,
        }
    }

    /// Apply `--user`, `--route` and `--upload`, then open the first page.
    ///
    /// # Errors
    /// Returns an error if the route is unknown.
    pub fn start(&mut self, args: &Args) -> Result<()> {
        if let Some(id) = args.user
            && self.session.user().is_none_or(|u| u.id != id)
        {
            info!(user_id = id, "Signing in from command line");
            self.sign_in(User::new(id));
        }

        if !args.upload.is_empty() {
            self.pending_uploads.clone_from(&args.upload);
        }

        let route = match &args.route {
            Some(path) => path.parse::<Route>()?,
            None if !args.upload.is_empty() => Route::ProviderDashboard,
            None => start_route(&self.session),
        };
        self.open(route);
        Ok(())
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new(60.0, 4.0)?;
        tui.enter()?;

        loop {
            self.handle_events(&mut tui).await?;
            self.handle_messages(&mut tui)?;
            if self.should_suspend {
                tui.suspend()?;
                self.message_tx.send(AppMessage::Resume)?;
                self.message_tx.send(AppMessage::ClearScreen)?;
                tui.resume()?;
            } else if self.should_quit {
                break;
            }
        }

        tui.exit()?;
        Ok(())
    }

    async fn handle_events(&mut self, tui: &mut Tui) -> Result<()> {
        let Some(event) = tui.next_event().await else {
            return Ok(());
        };

        match event {
            Event::Init => {}
            Event::Quit => self.message_tx.send(AppMessage::Quit)?,
            Event::Tick => self.message_tx.send(AppMessage::Tick)?,
            Event::Render => self.message_tx.send(AppMessage::Render)?,
            Event::Resize(width, height) => {
                self.message_tx.send(AppMessage::Resize(width, height))?;
            }
            Event::Error(e) => warn!("Terminal event error: {e}"),
            Event::Paste(text) => {
                if self.overlay.is_none() && self.screen.handle_paste(&text) {
                    self.update_screen()?;
                }
            }
            Event::Key(key) => self.handle_key(key)?,
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('z') {
            self.message_tx.send(AppMessage::Suspend)?;
            return Ok(());
        }

        if self.overlay.is_some() {
            return self.handle_overlay_key(key);
        }

        // Screen first, so typing never triggers global bindings.
        match self.screen.handle_key(key) {
            Ok(result) if result.is_consumed() => {
                self.update_screen()?;
                return Ok(());
            }
            Ok(_) => {}
            Err(e) => {
                self.message_tx.send(AppMessage::DisplayError(format!(
                    "Error encountered while handling key: {e}"
                )))?;
                return Ok(());
            }
        }

        let message = if self.resolver.matches_global(&key, GlobalAction::Quit) {
            AppMessage::Quit
        } else if self.resolver.matches_global(&key, GlobalAction::Help) {
            AppMessage::DisplayHelp
        } else if self.resolver.matches_global(&key, GlobalAction::Theme) {
            AppMessage::DisplayThemeSelector
        } else if self.resolver.matches_global(&key, GlobalAction::Back) {
            AppMessage::GoBack
        } else if self.resolver.matches_global(&key, GlobalAction::About) {
            self.visit(Route::About);
            return Ok(());
        } else if self.resolver.matches_global(&key, GlobalAction::Legal) {
            self.visit(Route::Legal);
            return Ok(());
        } else {
            return Ok(());
        };
        self.message_tx.send(message)?;
        Ok(())
    }

    fn handle_overlay_key(&mut self, key: KeyEvent) -> Result<()> {
        let message = match &mut self.overlay {
            Some(Overlay::Help(help)) => match help.handle_key(key)? {
                EventResult::Event(HelpEvent::Close) => Some(AppMessage::ClosePopup),
                _ => None,
            },
            Some(Overlay::ThemeSelector(selector)) => match selector.handle_key(key)? {
                EventResult::Event(ThemeEvent::Selected(info)) => {
                    Some(AppMessage::SelectTheme(info))
                }
                EventResult::Event(ThemeEvent::Cancelled) => Some(AppMessage::ClosePopup),
                _ => None,
            },
            Some(Overlay::Error(dialog)) => match dialog.handle_key(key)? {
                EventResult::Event(ErrorDialogEvent::Dismissed) => Some(AppMessage::ClosePopup),
                _ => None,
            },
            None => None,
        };
        if let Some(message) = message {
            self.message_tx.send(message)?;
        }
        Ok(())
    }

    fn handle_messages(&mut self, tui: &mut Tui) -> Result<()> {
        while let Ok(message) = self.message_rx.try_recv() {
            if !matches!(message, AppMessage::Tick | AppMessage::Render) {
                debug!("Handling message: {message:?}");
            }

            match message {
                AppMessage::Tick => {
                    self.screen.handle_tick();
                    self.toasts.handle_tick();
                    self.update_screen()?;
                    self.update_background();
                }
                AppMessage::Render => self.render(tui)?,
                AppMessage::Resize(width, height) => {
                    tui.resize(Rect::new(0, 0, width, height))?;
                    self.render(tui)?;
                }
                AppMessage::Suspend => self.should_suspend = true,
                AppMessage::Resume => self.should_suspend = false,
                AppMessage::Quit => self.should_quit = true,
                AppMessage::ClearScreen => tui.clear()?,
                other => self.handle_message(other)?,
            }
        }
        Ok(())
    }

    /// Messages that don't touch the terminal.
    fn handle_message(&mut self, message: AppMessage) -> Result<()> {
        match message {
            AppMessage::DisplayError(error) => {
                tracing::error!("{error}");
                self.overlay = Some(Overlay::Error(ErrorDialog::new(
                    error,
                    self.resolver.clone(),
                )));
            }
            AppMessage::DisplayHelp => {
                self.overlay = Some(Overlay::Help(HelpOverlay::new(
                    self.route.title(),
                    self.screen.keybindings(),
                    self.status_bar.global_keybindings(),
                    self.resolver.clone(),
                )));
            }
            AppMessage::DisplayThemeSelector => {
                self.overlay = Some(Overlay::ThemeSelector(ThemeSelectorView::new(
                    self.resolver.clone(),
                )));
            }
            AppMessage::ClosePopup => self.overlay = None,
            AppMessage::ShowToast(toast) => self.toasts.show(toast),
            AppMessage::CommandCompleted { name, success } => {
                debug!(%name, success, "Command completed");
                self.update_screen()?;
                self.update_background();
            }
            AppMessage::Navigate(route) => {
                self.history.clear();
                self.open(route);
            }
            AppMessage::GoBack => self.go_back(),
            AppMessage::SelectTheme(info) => {
                info!(theme = info.name, "Theme selected");
                self.theme = theme_from_name(info.name);
                self.overlay = None;
                if let Err(e) = config::save_theme(info.name) {
                    warn!("Failed to save theme: {e}");
                }
            }
            AppMessage::SignedIn(user) => self.sign_in(user),
            AppMessage::RoleAssigned(role) => {
                self.session.set_role(role);
                self.session_changed();
            }
            AppMessage::DocumentsChanged(count) => {
                if self.route == Route::ProviderDashboard {
                    self.status_bar.set_document_count(Some(count));
                } else if let Some(page) = self
                    .history
                    .iter_mut()
                    .rev()
                    .find(|v| v.route == Route::ProviderDashboard)
                {
                    page.document_count = Some(count);
                }
            }
            AppMessage::Tick
            | AppMessage::Render
            | AppMessage::Resize(..)
            | AppMessage::Suspend
            | AppMessage::Resume
            | AppMessage::Quit
            | AppMessage::ClearScreen => {}
        }
        Ok(())
    }

    fn sign_in(&mut self, user: User) {
        self.session = Session::signed_in(user);
        self.session_changed();
    }

    fn session_changed(&mut self) {
        self.status_bar.set_user(self.session.user().cloned());
        if let Err(e) = session::save(&self.session) {
            warn!("Failed to save session: {e}");
        }
    }

    /// Open a page on top of the current one, reachable again with Back.
    fn visit(&mut self, route: Route) {
        if route == self.route {
            return;
        }
        let (route, screen) = self.build_screen(route);
        let previous = Visited {
            route: self.route,
            screen: std::mem::replace(&mut self.screen, screen),
            document_count: self.status_bar.document_count(),
        };
        self.history.push(previous);
        self.show(route);
    }

    /// Restore the previous page as it was left, without rebuilding it.
    fn go_back(&mut self) {
        let Some(previous) = self.history.pop() else {
            return;
        };
        info!(route = %previous.route, "Returning to page");
        self.route = previous.route;
        self.screen = previous.screen;
        self.status_bar.set_route(self.route.path());
        self.status_bar.set_document_count(previous.document_count);
        if let Err(e) = self.update_screen() {
            warn!("Failed to resume {}: {e}", self.route);
        }
    }

    fn open(&mut self, route: Route) {
        let (route, screen) = self.build_screen(route);
        self.screen = screen;
        self.show(route);
    }

    /// Make the freshly built `self.screen` current under `route`.
    fn show(&mut self, route: Route) {
        info!(route = %route, "Opening page");
        self.route = route;
        self.status_bar.set_route(route.path());
        self.status_bar.set_document_count(None);
        self.screen.init();
        if let Err(e) = self.update_screen() {
            warn!("Failed to start {route}: {e}");
        }
    }

    /// Build the screen for `route`, redirecting when a precondition fails.
    fn build_screen(&mut self, route: Route) -> (Route, Box<dyn Screen>) {
        let resolver = self.resolver.clone();
        let tx = self.message_tx.clone();
        match route {
            Route::SignUp => (route, Box::new(SignUpPage::new(resolver, tx))),
            Route::RoleSelection => (
                route,
                Box::new(RoleSelection::new(
                    self.session.user().cloned(),
                    self.api.clone(),
                    resolver,
                    tx,
                )),
            ),
            Route::CustomerDashboard => {
                (route, Box::new(CustomerDashboard::new(resolver, tx)))
            }
            Route::ProviderDashboard => {
                let Some(user) = self.session.user().cloned() else {
                    debug!("No session for provider dashboard, redirecting to sign-up");
                    return (
                        Route::SignUp,
                        Box::new(SignUpPage::new(resolver, tx)),
                    );
                };
                match user.role {
                    Some(Role::Provider) => {}
                    Some(role) => {
                        debug!(?role, "Not a provider, redirecting to their dashboard");
                        return self.build_screen(Route::dashboard(role));
                    }
                    None => {
                        debug!("No role chosen, redirecting to role selection");
                        return self.build_screen(Route::RoleSelection);
                    }
                }
                let screen = DocumentsScreen::new(
                    user.id,
                    self.api.clone(),
                    self.config.upload.max_file_bytes,
                    resolver,
                    tx,
                );
                let uploads = std::mem::take(&mut self.pending_uploads);
                if !uploads.is_empty() {
                    screen.queue_upload(uploads);
                }
                (route, Box::new(screen))
            }
            Route::About => (route, Box::new(AboutPage::new(resolver))),
            Route::Legal => (route, Box::new(LegalPage::new(resolver))),
        }
    }

    fn update_screen(&mut self) -> Result<()> {
        match self.screen.update() {
            Ok(ScreenMsg::Idle) => {}
            Ok(ScreenMsg::Run(commands)) => {
                for command in commands {
                    self.spawn_command(command);
                }
            }
            Ok(ScreenMsg::Navigate(route)) => {
                self.message_tx.send(AppMessage::Navigate(route))?;
            }
            Err(e) => {
                self.message_tx.send(AppMessage::DisplayError(format!(
                    "Error encountered while updating page: {e}"
                )))?;
            }
        }
        Ok(())
    }

    /// Drain the pages waiting in history so their results are not lost.
    ///
    /// Navigation requested by a page that is not shown is dropped.
    fn update_background(&mut self) {
        let mut commands = Vec::new();
        for page in &mut self.history {
            match page.screen.update() {
                Ok(ScreenMsg::Idle) => {}
                Ok(ScreenMsg::Run(run)) => commands.extend(run),
                Ok(ScreenMsg::Navigate(route)) => {
                    debug!(from = %page.route, to = %route, "Ignoring navigation from a background page");
                }
                Err(e) => warn!(route = %page.route, "Background page update failed: {e}"),
            }
        }
        for command in commands {
            self.spawn_command(command);
        }
    }

    fn spawn_command(&self, command: Box<dyn Command>) {
        let name = command.name();
        let tx = self.message_tx.clone();
        debug!(%name, "Spawning command");
        tokio::spawn(async move {
            let success = match command.execute(tx.clone()).await {
                Ok(()) => true,
                Err(e) => {
                    let _ = tx.send(AppMessage::DisplayError(format!("{name} failed: {e}")));
                    false
                }
            };
            let _ = tx.send(AppMessage::CommandCompleted { name, success });
        });
    }

    fn render(&mut self, tui: &mut Tui) -> Result<()> {
        tui.draw(|frame| self.draw(frame))?;
        Ok(())
    }

    fn draw(&mut self, frame: &mut Frame) {
        let theme = self.theme;
        let area = frame.area();
        frame.render_widget(
            Block::default().style(Style::default().bg(theme.base())),
            area,
        );

        let [title_area, body_area, status_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .areas(area);

        self.render_breadcrumbs(frame, title_area, &theme);
        self.screen.render(frame, body_area, &theme);
        self.status_bar.render_with_keybindings(
            frame,
            status_area,
            &theme,
            &self.screen.keybindings(),
        );
        self.toasts.render(frame, body_area, &theme);

        match &mut self.overlay {
            Some(Overlay::Help(help)) => help.render(frame, area, &theme),
            Some(Overlay::ThemeSelector(selector)) => selector.render(frame, area, &theme),
            Some(Overlay::Error(dialog)) => dialog.render(frame, area, &theme),
            None => {}
        }
    }

    fn render_breadcrumbs(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let separator = Span::styled(" › ", Style::default().fg(theme.overlay0()));
        let mut spans = vec![Span::styled(
            " Servly",
            Style::default()
                .fg(theme.primary())
                .add_modifier(Modifier::BOLD),
        )];
        for crumb in self.screen.breadcrumbs() {
            spans.push(separator.clone());
            spans.push(Span::styled(crumb, Style::default().fg(theme.text())));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::config::ApiConfig;

    fn app(session: Session) -> App {
        app_with_api(session, ApiConfig::default())
    }

    fn app_with_api(session: Session, api: ApiConfig) -> App {
        let api = Arc::new(ApiClient::new(&api).unwrap());
        let mut app = App::new(
            Arc::new(AppConfig::default()),
            Arc::new(KeyResolver::default()),
            Theme::default(),
            api,
            session,
        );
        app.open(start_route(&app.session));
        app
    }

    fn provider() -> User {
        User {
            id: 9,
            email: None,
            role: Some(Role::Provider),
        }
    }

    #[test]
    fn test_start_route_follows_session() {
        assert_eq!(start_route(&Session::default()), Route::SignUp);
        assert_eq!(
            start_route(&Session::signed_in(User::new(1))),
            Route::RoleSelection
        );
        assert_eq!(
            start_route(&Session::signed_in(provider())),
            Route::ProviderDashboard
        );
    }

    #[tokio::test]
    async fn test_about_and_back() {
        let mut app = app(Session::default());
        assert_eq!(app.route, Route::SignUp);

        app.visit(Route::About);
        app.visit(Route::Legal);
        assert_eq!(app.route, Route::Legal);

        app.go_back();
        assert_eq!(app.route, Route::About);
        app.go_back();
        assert_eq!(app.route, Route::SignUp);
        // Nothing left to go back to.
        app.go_back();
        assert_eq!(app.route, Route::SignUp);
    }

    #[tokio::test]
    async fn test_workflow_navigation_resets_history() {
        let mut app = app(Session::signed_in(User::new(3)));
        app.visit(Route::About);
        app.handle_message(AppMessage::Navigate(Route::CustomerDashboard))
            .unwrap();
        assert_eq!(app.route, Route::CustomerDashboard);
        assert!(app.history.is_empty());
    }

    #[tokio::test]
    async fn test_provider_dashboard_requires_session() {
        let mut app = app(Session::default());
        app.open(Route::ProviderDashboard);
        assert_eq!(app.route, Route::SignUp);
    }

    #[tokio::test]
    async fn test_provider_session_opens_documents() {
        let app = app(Session::signed_in(provider()));
        assert_eq!(app.route, Route::ProviderDashboard);
        assert_eq!(app.screen.breadcrumbs()[0], "Provider");
    }

    #[tokio::test]
    async fn test_popups_open_and_close() {
        let mut app = app(Session::default());
        app.handle_message(AppMessage::DisplayHelp).unwrap();
        assert!(matches!(app.overlay, Some(Overlay::Help(_))));
        app.handle_message(AppMessage::ClosePopup).unwrap();
        assert!(app.overlay.is_none());

        app.handle_message(AppMessage::DisplayError("boom".into()))
            .unwrap();
        assert!(matches!(&app.overlay, Some(Overlay::Error(d)) if d.message() == "boom"));
    }

    #[tokio::test]
    async fn test_customer_sent_to_own_dashboard() {
        let mut app = app(Session::signed_in(User {
            id: 4,
            email: None,
            role: Some(Role::Customer),
        }));
        app.open(Route::ProviderDashboard);
        assert_eq!(app.route, Route::CustomerDashboard);
        assert_eq!(app.screen.breadcrumbs()[0], "Customer");
    }

    #[tokio::test]
    async fn test_user_without_role_sent_to_role_selection() {
        let mut app = app(Session::signed_in(User::new(5)));
        app.pending_uploads = vec![PathBuf::from("license.pdf")];
        app.open(Route::ProviderDashboard);
        assert_eq!(app.route, Route::RoleSelection);
        // Kept for when the provider role is chosen.
        assert_eq!(app.pending_uploads.len(), 1);
    }

    /// Provider app with one slow upload already started.
    async fn uploading_app(server: &MockServer, dir: &tempfile::TempDir) -> App {
        Mock::given(method("POST"))
            .and(path("/api/documents"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({
                        "id": 1,
                        "providerId": 9,
                        "filename": "business-license.pdf",
                        "documentType": "license",
                        "fileUrl": "data:application/pdf;base64,JVBERi0xLjQ="
                    }))
                    .set_delay(Duration::from_millis(300)),
            )
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/documents/provider/9"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(server)
            .await;

        let file = dir.path().join("business-license.pdf");
        std::fs::write(&file, b"%PDF-1.4").unwrap();

        let mut app = app_with_api(
            Session::signed_in(provider()),
            ApiConfig {
                base_url: server.uri(),
                timeout_secs: 5,
                token: None,
            },
        );
        app.pending_uploads = vec![file];
        app.open(Route::ProviderDashboard);
        assert!(is_busy(&app));
        app
    }

    fn is_busy(app: &App) -> bool {
        app.screen
            .keybindings()
            .iter()
            .any(|k| k.description == "Upload (busy)")
    }

    /// Feed messages through the app until the upload command completes.
    async fn finish_upload(app: &mut App) {
        tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                let Some(message) = app.message_rx.recv().await else {
                    break;
                };
                let done = matches!(
                    &message,
                    AppMessage::CommandCompleted { name, .. } if name.starts_with("Uploading")
                );
                app.handle_message(message).unwrap();
                if done {
                    break;
                }
            }
        })
        .await
        .expect("upload did not finish");
        while let Ok(message) = app.message_rx.try_recv() {
            app.handle_message(message).unwrap();
        }
    }

    fn upload_toast(app: &App) -> Option<&Toast> {
        app.toasts.visible().find(|t| t.title == "Document uploaded")
    }

    #[tokio::test]
    async fn test_back_mid_upload_resumes_same_page() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let mut app = uploading_app(&server, &dir).await;

        app.visit(Route::About);
        app.go_back();
        assert_eq!(app.route, Route::ProviderDashboard);
        // Same page as before, so the picker stays locked.
        assert!(is_busy(&app));

        finish_upload(&mut app).await;
        let toast = upload_toast(&app).expect("upload toast shown");
        assert!(toast.description.contains("business-license.pdf"));
        assert!(!is_busy(&app));
        assert_eq!(app.screen.breadcrumbs()[1], "Documents (1)");
        assert_eq!(app.status_bar.document_count(), Some(1));
    }

    #[tokio::test]
    async fn test_upload_reports_while_on_about() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let mut app = uploading_app(&server, &dir).await;

        app.visit(Route::About);
        finish_upload(&mut app).await;
        assert_eq!(app.route, Route::About);
        assert!(upload_toast(&app).is_some());
        assert_eq!(app.status_bar.document_count(), None);

        app.go_back();
        assert!(!is_busy(&app));
        assert_eq!(app.screen.breadcrumbs()[1], "Documents (1)");
        assert_eq!(app.status_bar.document_count(), Some(1));
    }
}

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Paragraph};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::Theme;
use crate::api::DocumentApi;
use crate::app::AppMessage;
use crate::commands::Command;
use crate::config::{DocumentsAction, KeyResolver};
use crate::documents::encode::parse_selection;
use crate::documents::list::{DocumentEvent, DocumentList};
use crate::documents::pipeline::upload_batch;
use crate::model::Document;
use crate::screen::{Screen, ScreenMsg, merge};
use crate::theme::TextVariant;
use crate::ui::{
    ColumnDef, Component, EventResult, Keybinding, Result, Spinner, Table, TableRow, TextInput,
    TextInputEvent, Toast,
};

// === Messages ===

#[derive(Debug)]
pub enum DocumentsMsg {
    /// Open the file picker.
    OpenPicker,
    /// Start a batch upload.
    Upload(Vec<PathBuf>),
    /// Manual reload from the server.
    Reload,
    /// Result forwarded by a running command.
    Event(DocumentEvent),
}

impl From<DocumentEvent> for DocumentsMsg {
    fn from(event: DocumentEvent) -> Self {
        Self::Event(event)
    }
}

// === Rows ===

impl TableRow for Document {
    fn columns() -> &'static [ColumnDef] {
        static COLUMNS: &[ColumnDef] = &[
            ColumnDef::new("File", Constraint::Min(24)),
            ColumnDef::new("Type", Constraint::Length(18)),
            ColumnDef::new("Submitted", Constraint::Length(18)),
        ];
        COLUMNS
    }

    fn render_cells(&self, theme: &Theme) -> Vec<Cell<'static>> {
        let submitted = self.created_at.map_or_else(
            || "-".to_string(),
            |at| at.format("%Y-%m-%d %H:%M").to_string(),
        );
        vec![
            Cell::from(self.filename.clone()),
            Cell::from(self.document_type.display_name())
                .style(Style::default().fg(theme.sapphire())),
            Cell::from(submitted).style(theme.typography(TextVariant::Caption)),
        ]
    }
}

// === Screen ===

/// Provider dashboard: submit verification documents and see their status.
pub struct DocumentsScreen {
    provider_id: i64,
    api: Arc<dyn DocumentApi>,
    max_file_bytes: u64,
    list: DocumentList,
    table: Table<Document>,
    picker: Option<TextInput>,
    spinner: Spinner,
    resolver: Arc<KeyResolver>,
    msg_tx: UnboundedSender<DocumentsMsg>,
    msg_rx: UnboundedReceiver<DocumentsMsg>,
    app_tx: UnboundedSender<AppMessage>,
}

impl DocumentsScreen {
    pub fn new(
        provider_id: i64,
        api: Arc<dyn DocumentApi>,
        max_file_bytes: u64,
        resolver: Arc<KeyResolver>,
        app_tx: UnboundedSender<AppMessage>,
    ) -> Self {
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        let listener_tx = app_tx.clone();
        let list = DocumentList::new().with_listener(move |docs| {
            let _ = listener_tx.send(AppMessage::DocumentsChanged(docs.len()));
        });
        let table = Table::new(Vec::new(), resolver.clone())
            .with_title(" Submitted documents ")
            .with_empty_message("No documents yet");

        Self {
            provider_id,
            api,
            max_file_bytes,
            list,
            table,
            picker: None,
            spinner: Spinner::default(),
            resolver,
            msg_tx,
            msg_rx,
            app_tx,
        }
    }

    /// Queue an upload of files chosen outside the picker.
    pub fn queue_upload(&self, paths: Vec<PathBuf>) {
        self.queue(DocumentsMsg::Upload(paths));
    }

    #[cfg(test)]
    pub const fn list(&self) -> &DocumentList {
        &self.list
    }

    fn queue(&self, msg: DocumentsMsg) {
        let _ = self.msg_tx.send(msg);
    }

    fn toast(&self, toast: Toast) {
        let _ = self.app_tx.send(AppMessage::ShowToast(toast));
    }

    fn open_picker(&mut self) {
        // Disabled while a batch runs.
        if self.list.is_uploading() {
            return;
        }
        let limit_mib = self.max_file_bytes / (1024 * 1024);
        self.picker = Some(
            TextInput::new("Upload documents")
                .with_placeholder("business-license.pdf ~/Documents/insurance.png")
                .with_help(format!(
                    "PDF, JPG, JPEG or PNG up to {limit_mib} MiB each. Separate files with spaces or commas."
                )),
        );
    }

    fn process_message(&mut self, msg: DocumentsMsg) -> ScreenMsg {
        match msg {
            DocumentsMsg::OpenPicker => {
                self.open_picker();
                ScreenMsg::Idle
            }

            DocumentsMsg::Upload(paths) => self.start_upload(paths),

            DocumentsMsg::Reload => {
                if self.list.is_uploading() || self.list.is_loading() {
                    return ScreenMsg::Idle;
                }
                self.load()
            }

            DocumentsMsg::Event(event) => {
                if let Some(toast) = self.list.apply(event) {
                    self.toast(toast);
                }
                self.table.set_items(self.list.documents().to_vec());
                ScreenMsg::Idle
            }
        }
    }

    fn start_upload(&mut self, paths: Vec<PathBuf>) -> ScreenMsg {
        if paths.is_empty() {
            return ScreenMsg::Idle;
        }
        if !self.list.begin_upload() {
            tracing::debug!("Upload already in progress, ignoring selection");
            return ScreenMsg::Idle;
        }
        let count = paths.len();
        self.spinner.set_label(if count == 1 {
            "Uploading 1 document...".to_string()
        } else {
            format!("Uploading {count} documents...")
        });
        UploadDocumentsCmd {
            api: self.api.clone(),
            provider_id: self.provider_id,
            paths,
            max_file_bytes: self.max_file_bytes,
            tx: self.msg_tx.clone(),
        }
        .into()
    }

    fn load(&mut self) -> ScreenMsg {
        self.list.begin_load();
        self.spinner.set_label("Loading documents...");
        LoadDocumentsCmd {
            api: self.api.clone(),
            provider_id: self.provider_id,
            tx: self.msg_tx.clone(),
        }
        .into()
    }

    fn handle_picker_key(&mut self, key: KeyEvent) -> Result<EventResult<()>> {
        let Some(picker) = &mut self.picker else {
            return Ok(EventResult::Ignored);
        };
        match picker.handle_key(key)? {
            EventResult::Event(TextInputEvent::Submitted(value)) => {
                let paths = parse_selection(&value);
                if paths.is_empty() {
                    picker.set_error("Select at least one file");
                } else {
                    self.picker = None;
                    self.queue(DocumentsMsg::Upload(paths));
                }
            }
            EventResult::Event(TextInputEvent::Cancelled) => self.picker = None,
            EventResult::Consumed | EventResult::Ignored => {}
        }
        Ok(EventResult::Consumed)
    }

    fn render_status(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let color = if self.list.is_empty() {
            theme.warning()
        } else {
            theme.success()
        };
        let lines = vec![
            Line::styled("Verification documents", theme.typography(TextVariant::Heading)),
            Line::from(""),
            Line::from(vec![
                Span::styled("Status  ", theme.typography(TextVariant::Label)),
                Span::styled(self.list.status_text(), Style::default().fg(color)),
            ]),
            Line::styled(
                "Upload your business license, proof of insurance and a photo ID.",
                theme.typography(TextVariant::Caption),
            ),
        ];
        frame.render_widget(Paragraph::new(lines), area);
    }
}

impl Screen for DocumentsScreen {
    fn handle_tick(&mut self) {
        if self.list.is_uploading() || self.list.is_loading() {
            self.spinner.handle_tick();
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<()>> {
        if self.picker.is_some() {
            return self.handle_picker_key(key);
        }
        if self.resolver.matches_documents(&key, DocumentsAction::Upload) {
            self.queue(DocumentsMsg::OpenPicker);
            return Ok(EventResult::Consumed);
        }
        if self.resolver.matches_documents(&key, DocumentsAction::Reload) {
            self.queue(DocumentsMsg::Reload);
            return Ok(EventResult::Consumed);
        }
        self.table.handle_key(key)
    }

    fn handle_paste(&mut self, text: &str) -> bool {
        if self.list.is_uploading() {
            return false;
        }
        let paths = parse_selection(text);
        if paths.is_empty() {
            return false;
        }
        self.picker = None;
        self.queue(DocumentsMsg::Upload(paths));
        true
    }

    fn update(&mut self) -> Result<ScreenMsg> {
        let mut result = ScreenMsg::Idle;
        while let Ok(msg) = self.msg_rx.try_recv() {
            let next = self.process_message(msg);
            result = merge(result, next);
        }
        if self.list.should_load() {
            result = merge(result, self.load());
        }
        Ok(result)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let busy = self.list.is_uploading() || self.list.is_loading();
        let [status_area, table_area, spinner_area] = Layout::vertical([
            Constraint::Length(5),
            Constraint::Min(3),
            Constraint::Length(u16::from(busy)),
        ])
        .areas(area);

        self.render_status(frame, status_area, theme);
        self.table.render(frame, table_area, theme);
        if busy {
            self.spinner.render(frame, spinner_area, theme);
        }
        if let Some(picker) = &mut self.picker {
            picker.render(frame, area, theme);
        }
    }

    fn breadcrumbs(&self) -> Vec<String> {
        let mut bc = vec![
            "Provider".to_string(),
            format!("Documents ({})", self.list.len()),
        ];
        if self.picker.is_some() {
            bc.push("Upload".to_string());
        }
        bc
    }

    fn keybindings(&self) -> Vec<Keybinding> {
        let upload = if self.list.is_uploading() {
            "Upload (busy)"
        } else {
            "Upload"
        };
        vec![
            Keybinding::hint(self.resolver.display_documents(DocumentsAction::Upload), upload),
            Keybinding::hint(
                self.resolver.display_documents(DocumentsAction::Reload),
                "Reload",
            ),
        ]
    }
}

// === Commands ===

/// Joins every per-file pipeline of one batch.
struct UploadDocumentsCmd {
    api: Arc<dyn DocumentApi>,
    provider_id: i64,
    paths: Vec<PathBuf>,
    max_file_bytes: u64,
    tx: UnboundedSender<DocumentsMsg>,
}

#[async_trait]
impl Command for UploadDocumentsCmd {
    fn name(&self) -> String {
        format!("Uploading {} document(s)", self.paths.len())
    }

    async fn execute(self: Box<Self>, _action_tx: UnboundedSender<AppMessage>) -> Result<()> {
        let tx = self.tx;
        upload_batch(
            self.api,
            self.provider_id,
            self.paths,
            self.max_file_bytes,
            |outcome| {
                let _ = tx.send(DocumentEvent::Pipeline(outcome).into());
            },
        )
        .await;
        if tx.send(DocumentEvent::BatchFinished.into()).is_err() {
            tracing::debug!("Documents page closed before the batch finished");
        }
        Ok(())
    }
}

struct LoadDocumentsCmd {
    api: Arc<dyn DocumentApi>,
    provider_id: i64,
    tx: UnboundedSender<DocumentsMsg>,
}

#[async_trait]
impl Command for LoadDocumentsCmd {
    fn name(&self) -> String {
        format!("Loading documents for provider {}", self.provider_id)
    }

    async fn execute(self: Box<Self>, _action_tx: UnboundedSender<AppMessage>) -> Result<()> {
        let event = match self.api.list_by_provider(self.provider_id).await {
            Ok(documents) => DocumentEvent::Loaded(documents),
            Err(e) => DocumentEvent::LoadFailed(e.to_string()),
        };
        if self.tx.send(event.into()).is_err() {
            tracing::debug!("Documents page closed before the list arrived");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyModifiers};

    use super::*;
    use crate::documents::pipeline::tests::FakeDocumentApi;
    use crate::model::DocumentType;
    use crate::ui::ToastType;

    struct Harness {
        screen: DocumentsScreen,
        api: Arc<FakeDocumentApi>,
        app_rx: UnboundedReceiver<AppMessage>,
        dir: tempfile::TempDir,
    }

    fn harness() -> Harness {
        let api = Arc::new(FakeDocumentApi::default());
        let (app_tx, app_rx) = mpsc::unbounded_channel();
        let screen = DocumentsScreen::new(
            1,
            api.clone(),
            1024,
            Arc::new(KeyResolver::default()),
            app_tx,
        );
        Harness {
            screen,
            api,
            app_rx,
            dir: tempfile::tempdir().unwrap(),
        }
    }

    impl Harness {
        fn file(&self, name: &str) -> PathBuf {
            let path = self.dir.path().join(name);
            std::fs::write(&path, b"bytes").unwrap();
            path
        }

        /// Run `update()` and execute returned commands until quiet.
        async fn settle(&mut self) {
            loop {
                match self.screen.update().unwrap() {
                    ScreenMsg::Run(cmds) => {
                        let (tx, _rx) = mpsc::unbounded_channel();
                        for cmd in cmds {
                            cmd.execute(tx.clone()).await.unwrap();
                        }
                    }
                    ScreenMsg::Idle => return,
                    ScreenMsg::Navigate(route) => panic!("unexpected navigation to {route}"),
                }
            }
        }

        fn toasts(&mut self) -> Vec<crate::ui::Toast> {
            let mut toasts = Vec::new();
            while let Ok(msg) = self.app_rx.try_recv() {
                if let AppMessage::ShowToast(t) = msg {
                    toasts.push(t);
                }
            }
            toasts
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[tokio::test]
    async fn test_initial_load_fetches_once() {
        let mut h = harness();
        h.settle().await;
        assert!(h.screen.list().is_empty());
        assert!(!h.screen.list().is_loading());
        // An empty server result does not trigger another fetch.
        assert!(matches!(h.screen.update().unwrap(), ScreenMsg::Idle));
    }

    #[tokio::test]
    async fn test_two_file_scenario() {
        let mut h = harness();
        h.settle().await;

        let license = h.file("business-license.pdf");
        let photo = h.file("photo.png");
        h.screen.queue_upload(vec![license, photo]);
        h.settle().await;

        let uploads = h.api.uploads.lock().unwrap().clone();
        assert_eq!(uploads.len(), 2);
        let kinds: Vec<_> = uploads
            .iter()
            .map(|u| (u.filename.as_str(), u.document_type))
            .collect();
        assert!(kinds.contains(&("business-license.pdf", DocumentType::License)));
        assert!(kinds.contains(&("photo.png", DocumentType::Other)));

        assert_eq!(h.screen.list().len(), 2);
        assert!(!h.screen.list().is_uploading());
        assert_eq!(
            h.screen.list().status_text(),
            "Documents submitted - waiting for admin approval"
        );

        let toasts = h.toasts();
        assert_eq!(toasts.len(), 2);
        assert!(toasts.iter().all(|t| t.toast_type == ToastType::Success));
        assert!(toasts.iter().any(|t| t.description.contains("photo.png")));
    }

    #[tokio::test]
    async fn test_failures_do_not_stop_siblings() {
        let mut h = harness();
        h.settle().await;

        let ok = h.file("id-card.png");
        let bad = h.file("fail.pdf");
        let missing = h.dir.path().join("missing.pdf");
        h.screen.queue_upload(vec![ok, bad, missing]);
        h.settle().await;

        assert_eq!(h.screen.list().len(), 1);
        let toasts = h.toasts();
        let errors: Vec<_> = toasts
            .iter()
            .filter(|t| t.toast_type == ToastType::Error)
            .collect();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().any(|t| t.description == "Failed to upload document"));
        assert!(errors.iter().any(|t| t.description.starts_with("missing.pdf: ")));
    }

    #[tokio::test]
    async fn test_picker_disabled_while_uploading() {
        let mut h = harness();
        h.settle().await;

        let path = h.file("license.pdf");
        h.screen.queue_upload(vec![path]);
        // Start the batch but don't run the command yet.
        let pending = h.screen.update().unwrap();
        assert!(matches!(pending, ScreenMsg::Run(_)));
        assert!(h.screen.list().is_uploading());

        h.screen.handle_key(key(KeyCode::Char('u'))).unwrap();
        h.screen.update().unwrap();
        assert!(h.screen.picker.is_none());
    }

    #[tokio::test]
    async fn test_picker_submits_selection() {
        let mut h = harness();
        h.settle().await;
        let path = h.file("insurance.pdf");

        h.screen.handle_key(key(KeyCode::Char('u'))).unwrap();
        h.screen.update().unwrap();
        assert!(h.screen.picker.is_some());

        for c in path.display().to_string().chars() {
            h.screen.handle_key(key(KeyCode::Char(c))).unwrap();
        }
        h.screen.handle_key(key(KeyCode::Enter)).unwrap();
        assert!(h.screen.picker.is_none());

        h.settle().await;
        assert_eq!(h.screen.list().len(), 1);
        assert_eq!(
            h.screen.list().documents()[0].document_type,
            DocumentType::Insurance
        );
    }

    #[tokio::test]
    async fn test_empty_picker_submission_keeps_picker_open() {
        let mut h = harness();
        h.screen.handle_key(key(KeyCode::Char('u'))).unwrap();
        h.screen.update().unwrap();
        h.screen.handle_key(key(KeyCode::Enter)).unwrap();
        assert!(h.screen.picker.is_some());
    }

    #[tokio::test]
    async fn test_listener_reports_document_count() {
        let mut h = harness();
        h.settle().await;
        let path = h.file("license.pdf");
        h.screen.queue_upload(vec![path]);
        h.settle().await;

        let mut counts = Vec::new();
        while let Ok(msg) = h.app_rx.try_recv() {
            if let AppMessage::DocumentsChanged(n) = msg {
                counts.push(n);
            }
        }
        assert_eq!(counts, vec![1]);
    }
}

//! The provider's document list and the reducer that owns it.
//!
//! Every change goes through [`DocumentList::apply`], called from the screen's
//! `update()`, so outcomes of concurrent pipelines are applied one at a time
//! and none is lost.

use crate::documents::pipeline::PipelineOutcome;
use crate::model::Document;
use crate::ui::Toast;

pub const STATUS_AWAITING: &str = "Awaiting documents";
pub const STATUS_SUBMITTED: &str = "Documents submitted - waiting for admin approval";
pub const UPLOAD_FALLBACK_MESSAGE: &str = "Failed to upload document";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentEvent {
    /// One pipeline finished.
    Pipeline(PipelineOutcome),
    /// Every pipeline of the current batch finished.
    BatchFinished,
    Loaded(Vec<Document>),
    LoadFailed(String),
}

type Listener = Box<dyn FnMut(&[Document]) + Send>;

pub struct DocumentList {
    documents: Vec<Document>,
    uploading: bool,
    loading: bool,
    /// Set while an empty list may be fetched, so a provider with no
    /// documents is not refetched on every poll.
    needs_load: bool,
    listener: Option<Listener>,
}

impl Default for DocumentList {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentList {
    pub const fn new() -> Self {
        Self {
            documents: Vec::new(),
            uploading: false,
            loading: false,
            needs_load: true,
            listener: None,
        }
    }

    /// Called with the full list whenever it changes.
    #[must_use]
    pub fn with_listener(mut self, listener: impl FnMut(&[Document]) + Send + 'static) -> Self {
        self.listener = Some(Box::new(listener));
        self
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub const fn len(&self) -> usize {
        self.documents.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub const fn is_uploading(&self) -> bool {
        self.uploading
    }

    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    pub const fn status_text(&self) -> &'static str {
        if self.documents.is_empty() {
            STATUS_AWAITING
        } else {
            STATUS_SUBMITTED
        }
    }

    /// `Idle → Uploading`. Returns false if a batch is already running.
    pub const fn begin_upload(&mut self) -> bool {
        if self.uploading {
            return false;
        }
        self.uploading = true;
        true
    }

    /// Whether the empty list should be fetched from the server now.
    pub const fn should_load(&self) -> bool {
        self.needs_load && self.documents.is_empty() && !self.uploading && !self.loading
    }

    /// Mark a fetch as in flight. Also used for a manual reload.
    pub const fn begin_load(&mut self) {
        self.loading = true;
        self.needs_load = false;
    }

    /// Apply one event. Returns the notification to show, if any.
    pub fn apply(&mut self, event: DocumentEvent) -> Option<Toast> {
        match event {
            DocumentEvent::Pipeline(PipelineOutcome::Uploaded(document)) => {
                let toast = Toast::success(
                    "Document uploaded",
                    format!("{} has been uploaded successfully", document.filename),
                );
                if !self.documents.iter().any(|d| d.id == document.id) {
                    self.documents.push(document);
                }
                self.notify();
                Some(toast)
            }

            DocumentEvent::Pipeline(PipelineOutcome::UploadFailed { filename, message }) => {
                tracing::debug!(%filename, "Upload failure reported");
                Some(Toast::error(
                    "Upload failed",
                    message.unwrap_or_else(|| UPLOAD_FALLBACK_MESSAGE.to_string()),
                ))
            }

            DocumentEvent::Pipeline(PipelineOutcome::Rejected { filename, reason }) => Some(
                Toast::error("Could not read file", format!("{filename}: {reason}")),
            ),

            DocumentEvent::BatchFinished => {
                self.uploading = false;
                // Nothing came through, so check the server again.
                if self.documents.is_empty() {
                    self.needs_load = true;
                }
                None
            }

            DocumentEvent::Loaded(server) => {
                self.loading = false;
                let changed = self.replace(server);
                if changed {
                    self.notify();
                }
                None
            }

            DocumentEvent::LoadFailed(message) => {
                self.loading = false;
                tracing::warn!("Failed to load documents: {message}");
                Some(Toast::error("Could not load documents", message))
            }
        }
    }

    /// Replace the list with the server's, keeping uploads that completed
    /// while the fetch was in flight. Returns whether anything changed.
    fn replace(&mut self, server: Vec<Document>) -> bool {
        let mut merged = server;
        for local in &self.documents {
            if !merged.iter().any(|d| d.id == local.id) {
                merged.push(local.clone());
            }
        }
        let changed = merged != self.documents;
        self.documents = merged;
        changed
    }

    fn notify(&mut self) {
        if let Some(listener) = &mut self.listener {
            listener(&self.documents);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::model::DocumentType;
    use crate::ui::ToastType;

    fn doc(id: i64, filename: &str) -> Document {
        Document {
            id,
            provider_id: 1,
            filename: filename.to_string(),
            document_type: DocumentType::Other,
            file_url: "data:image/png;base64,".to_string(),
            created_at: None,
        }
    }

    fn uploaded(id: i64, filename: &str) -> DocumentEvent {
        DocumentEvent::Pipeline(PipelineOutcome::Uploaded(doc(id, filename)))
    }

    #[test]
    fn test_status_text_has_two_states() {
        let mut list = DocumentList::new();
        assert_eq!(list.status_text(), "Awaiting documents");

        list.apply(uploaded(1, "a.pdf"));
        assert_eq!(
            list.status_text(),
            "Documents submitted - waiting for admin approval"
        );

        list.apply(uploaded(2, "b.pdf"));
        assert_eq!(list.status_text(), STATUS_SUBMITTED);
    }

    #[test]
    fn test_out_of_order_completions_are_all_kept() {
        let mut list = DocumentList::new();
        assert!(list.begin_upload());

        list.apply(uploaded(2, "photo.png"));
        list.apply(uploaded(1, "business-license.pdf"));
        list.apply(DocumentEvent::BatchFinished);

        assert_eq!(list.len(), 2);
        assert!(!list.is_uploading());
    }

    #[test]
    fn test_busy_until_batch_finishes() {
        let mut list = DocumentList::new();
        assert!(list.begin_upload());
        assert!(!list.begin_upload(), "re-entrant selection must be refused");

        list.apply(uploaded(1, "a.pdf"));
        assert!(list.is_uploading());

        list.apply(DocumentEvent::BatchFinished);
        assert!(!list.is_uploading());
        assert!(list.begin_upload());
    }

    #[test]
    fn test_success_toast_names_the_file() {
        let mut list = DocumentList::new();
        let toast = list.apply(uploaded(1, "business-license.pdf")).unwrap();
        assert_eq!(toast.toast_type, ToastType::Success);
        assert!(toast.description.contains("business-license.pdf"));
    }

    #[test]
    fn test_failure_toast_message_or_fallback() {
        let mut list = DocumentList::new();
        let with_message = list
            .apply(DocumentEvent::Pipeline(PipelineOutcome::UploadFailed {
                filename: "a.pdf".into(),
                message: Some("File too large".into()),
            }))
            .unwrap();
        assert_eq!(with_message.toast_type, ToastType::Error);
        assert_eq!(with_message.description, "File too large");

        let without = list
            .apply(DocumentEvent::Pipeline(PipelineOutcome::UploadFailed {
                filename: "a.pdf".into(),
                message: None,
            }))
            .unwrap();
        assert_eq!(without.description, "Failed to upload document");
        assert!(list.is_empty());
    }

    #[test]
    fn test_rejected_file_toast() {
        let mut list = DocumentList::new();
        let toast = list
            .apply(DocumentEvent::Pipeline(PipelineOutcome::Rejected {
                filename: "notes.txt".into(),
                reason: "unsupported file type".into(),
            }))
            .unwrap();
        assert_eq!(toast.toast_type, ToastType::Error);
        assert_eq!(toast.description, "notes.txt: unsupported file type");
    }

    #[test]
    fn test_load_only_when_empty_and_idle() {
        let mut list = DocumentList::new();
        assert!(list.should_load());

        list.begin_load();
        assert!(!list.should_load(), "one fetch at a time");

        list.apply(DocumentEvent::Loaded(vec![]));
        assert!(!list.should_load(), "an empty result is not refetched");

        assert!(list.begin_upload());
        list.apply(DocumentEvent::Pipeline(PipelineOutcome::UploadFailed {
            filename: "a.pdf".into(),
            message: None,
        }));
        assert!(!list.should_load(), "never while uploading");

        list.apply(DocumentEvent::BatchFinished);
        assert!(list.should_load(), "still empty after the batch");
    }

    #[test]
    fn test_load_never_runs_with_documents() {
        let mut list = DocumentList::new();
        list.apply(uploaded(1, "a.pdf"));
        assert!(!list.should_load());
    }

    #[test]
    fn test_loaded_keeps_concurrent_uploads() {
        let mut list = DocumentList::new();
        list.begin_load();
        list.apply(uploaded(5, "fresh.pdf"));

        list.apply(DocumentEvent::Loaded(vec![doc(3, "old.pdf"), doc(5, "fresh.pdf")]));

        let ids: Vec<_> = list.documents().iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![3, 5]);
        assert!(!list.is_loading());
    }

    #[test]
    fn test_load_failure_is_surfaced() {
        let mut list = DocumentList::new();
        list.begin_load();
        let toast = list
            .apply(DocumentEvent::LoadFailed("connection refused".into()))
            .unwrap();
        assert_eq!(toast.toast_type, ToastType::Error);
        assert!(!list.is_loading());
        assert!(!list.should_load(), "no automatic retry");
    }

    #[test]
    fn test_listener_receives_full_list() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let mut list = DocumentList::new()
            .with_listener(move |docs| sink.lock().unwrap().push(docs.len()));

        list.apply(uploaded(1, "a.pdf"));
        list.apply(uploaded(2, "b.pdf"));
        list.apply(DocumentEvent::Pipeline(PipelineOutcome::UploadFailed {
            filename: "c.pdf".into(),
            message: None,
        }));
        list.apply(DocumentEvent::Loaded(vec![doc(1, "a.pdf"), doc(2, "b.pdf")]));

        assert_eq!(*seen.lock().unwrap(), vec![1, 2]);
    }
}

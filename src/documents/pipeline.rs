//! Per-file upload pipelines and the coordinator that joins them.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::task::JoinSet;

use crate::api::DocumentApi;
use crate::documents::classify::classify;
use crate::documents::encode::{filename, read_as_data_uri};
use crate::model::{Document, NewDocument};

/// Result of one file's read → classify → upload pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutcome {
    Uploaded(Document),
    /// The API rejected the upload or could not be reached.
    UploadFailed {
        filename: String,
        message: Option<String>,
    },
    /// The file never reached the API: wrong type, too large or unreadable.
    Rejected { filename: String, reason: String },
}

pub async fn run_pipeline(
    api: &dyn DocumentApi,
    provider_id: i64,
    path: &Path,
    max_bytes: u64,
) -> PipelineOutcome {
    let filename = filename(path);

    let file_url = match read_as_data_uri(path, max_bytes).await {
        Ok(uri) => uri,
        Err(e) => {
            tracing::warn!(path = %path.display(), "Rejected file: {e}");
            return PipelineOutcome::Rejected {
                filename,
                reason: e.to_string(),
            };
        }
    };

    let document = NewDocument {
        provider_id,
        document_type: classify(&filename),
        filename,
        file_url,
    };

    match api.upload(&document).await {
        Ok(stored) => {
            tracing::info!(id = stored.id, filename = %stored.filename, "Uploaded document");
            PipelineOutcome::Uploaded(stored)
        }
        Err(e) => {
            tracing::warn!(filename = %document.filename, "Upload failed: {e}");
            PipelineOutcome::UploadFailed {
                filename: document.filename,
                message: e.user_message(),
            }
        }
    }
}

/// Run one pipeline per path concurrently and hand each outcome to
/// `on_outcome` in completion order. Returns once every pipeline is done.
pub async fn upload_batch(
    api: Arc<dyn DocumentApi>,
    provider_id: i64,
    paths: Vec<PathBuf>,
    max_bytes: u64,
    mut on_outcome: impl FnMut(PipelineOutcome),
) {
    let mut set = JoinSet::new();
    for path in paths {
        let api = api.clone();
        set.spawn(async move { run_pipeline(api.as_ref(), provider_id, &path, max_bytes).await });
    }

    while let Some(joined) = set.join_next().await {
        match joined {
            Ok(outcome) => on_outcome(outcome),
            Err(e) => tracing::error!("Upload pipeline panicked: {e}"),
        }
    }
}

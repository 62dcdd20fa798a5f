//! Reading selected files into `data:` URIs.

use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;

/// Extensions the picker accepts, compared case-insensitively.
pub const ACCEPTED_EXTENSIONS: [&str; 4] = ["pdf", "jpg", "jpeg", "png"];

#[derive(Debug, Error)]
pub enum FileError {
    #[error("unsupported file type, expected PDF, JPG, JPEG or PNG")]
    Unsupported,
    #[error("file is {} but the limit is {}", format_size(*.size), format_size(*.limit))]
    TooLarge { size: u64, limit: u64 },
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
}

pub fn is_accepted(path: &Path) -> bool {
    extension(path).is_some_and(|ext| ACCEPTED_EXTENSIONS.contains(&ext.as_str()))
}

/// MIME type inferred from the extension.
pub fn mime_type(path: &Path) -> &'static str {
    match extension(path).as_deref() {
        Some("pdf") => "application/pdf",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        _ => "application/octet-stream",
    }
}

/// `data:<mime>;base64,<standard base64 with padding>`
pub fn data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Name sent to the API: the last path component.
pub fn filename(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}

/// Check the type and size, then read the whole file and encode it.
pub async fn read_as_data_uri(path: &Path, max_bytes: u64) -> Result<String, FileError> {
    if !is_accepted(path) {
        return Err(FileError::Unsupported);
    }
    let size = tokio::fs::metadata(path).await?.len();
    if size > max_bytes {
        return Err(FileError::TooLarge {
            size,
            limit: max_bytes,
        });
    }
    let bytes = tokio::fs::read(path).await?;
    Ok(data_uri(mime_type(path), &bytes))
}

/// Split picker input into paths.
///
/// Paths are separated by whitespace or commas. Single or double quotes
/// group a path containing spaces, and a backslash escapes the next
/// character, which covers paths dropped into the terminal. A leading `~/`
/// expands to the home directory.
pub fn parse_selection(input: &str) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut chars = input.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), c) => current.push(c),
            (None, '\'' | '"') => quote = Some(c),
            (None, '\\') => {
                if let Some(next) = chars.next() {
                    current.push(next);
                }
            }
            (None, c) if c.is_whitespace() || c == ',' => {
                if !current.is_empty() {
                    paths.push(expand_home(&std::mem::take(&mut current)));
                }
            }
            (None, c) => current.push(c),
        }
    }
    if !current.is_empty() {
        paths.push(expand_home(&current));
    }
    paths
}

fn expand_home(raw: &str) -> PathBuf {
    if let Some(rest) = raw.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(raw)
}

#[allow(clippy::cast_precision_loss)]
fn format_size(bytes: u64) -> String {
    const KIB: f64 = 1024.0;
    let bytes = bytes as f64;
    if bytes >= KIB * KIB {
        format!("{:.1} MiB", bytes / (KIB * KIB))
    } else if bytes >= KIB {
        format!("{:.1} KiB", bytes / KIB)
    } else {
        format!("{bytes} B")
    }
}

//! Provider verification documents.
//!
//! Files are read, classified and uploaded by independent pipelines
//! ([`pipeline`]); a single coordinator command joins them and forwards each
//! outcome to the screen, which folds it into the [`list::DocumentList`].

mod classify;
mod encode;
mod list;
mod pipeline;
mod screen;

pub use screen::DocumentsScreen;

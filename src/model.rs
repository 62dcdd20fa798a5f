//! Domain models shared by the API client and the screens.
//!
//! - [`Document`] - a verification artifact submitted by a provider
//! - [`User`] / [`Role`] - the authenticated account and its classification

pub mod document;
pub mod user;

pub use document::{Document, DocumentType, NewDocument};
pub use user::{Role, User};

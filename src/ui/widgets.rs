//! Presentational widgets.
//!
//! These render from the props they are given and keep no business state.
//! Interaction is reported back as events for the owning screen to act on.

mod category_icon;
mod search_bar;
mod section_header;
mod spinner;

pub use category_icon::CategoryIcon;
pub use search_bar::{SearchBar, SearchBarEvent};
pub use section_header::SectionHeader;
pub use spinner::Spinner;

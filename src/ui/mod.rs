//! User interface components and views.
//!
//! Rendering and key handling for the table screens, plus the overlays
//! shared between them.

mod components;
pub mod theme;
mod views;

pub use components::{
    highlight_text, render_data_table, ErrorDialog, Hit, InputOutcome, Notification,
    NotificationManager, NotificationType, TableGeometry, TextInput,
};
pub use theme::init_theme;
pub use views::{HelpAction, HelpView, TableAction, TableView};

//! Application views (screens).

mod help;
mod table_view;

pub use help::{HelpAction, HelpView};
pub use table_view::{TableAction, TableView};

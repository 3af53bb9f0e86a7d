//! Reusable UI components.

mod column_picker;
mod data_table;
mod input;
mod modal;
mod notification;
mod search_bar;

pub use column_picker::{ColumnPicker, ColumnPickerAction};
pub use data_table::{render_data_table, Hit, TableGeometry};
pub use input::{InputOutcome, TextInput};
pub use modal::{centered_rect, ErrorDialog};
pub use notification::{Notification, NotificationManager, NotificationType};
pub use search_bar::{highlight_text, render_search_bar};

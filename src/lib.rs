//! realtydesk - a terminal admin dashboard for real-estate listings.
//!
//! The dashboard shows four tables (properties, realtors, inquiries and mail
//! templates) with paging, selection, search, column configuration and CSV
//! export. The same actions are available from the command line.

pub mod actions;
pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod events;
pub mod logging;
pub mod store;
pub mod table;
pub mod tasks;
pub mod ui;

pub use app::{App, Screen};
pub use error::{AppError, Result};

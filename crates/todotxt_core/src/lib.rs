//! Core model for single todo.txt task lines.
//! This crate is the single source of truth for line parsing and editing.

pub mod grammar;
pub mod logging;
pub mod model;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::date::{format_date_token, parse_date_token, DateTokenError};
pub use model::priority::{Priority, PriorityError};
pub use model::record::{RecordFields, Tag, TodoRecord};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

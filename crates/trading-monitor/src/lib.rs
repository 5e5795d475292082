//! Logging, terminal dashboard and headless reports.

mod dashboard;
mod logging;
mod text;

pub use dashboard::{signal_color, Dashboard, DashboardState};
pub use logging::{setup_logging, LogOptions, LOG_FILE_PREFIX};
pub use text::render_text;

//! Finscope TUI - terminal dashboard for company financial analysis
//!
//! Provides:
//! - A symbol/market form with a metrics table
//! - Six smoothed metric charts
//! - Severity-coloured anomaly cards and analyst notes
//! - A persisted light/dark theme

pub mod app;
pub mod input;
pub mod theme;
pub mod ui;
pub mod worker;

pub use app::AppState;
pub use input::handle_key;
pub use theme::Palette;

#[cfg(test)]
mod test_helpers;

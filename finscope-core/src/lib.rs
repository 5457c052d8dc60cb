//! FinScope Core — everything the dashboard needs except the terminal.
//!
//! - Analysis request/response model (`model`)
//! - Form validation and the request generation counter (`dispatch`)
//! - The `/analyze` HTTP backend (`backend`)
//! - Response → table rows, chart series, anomaly cards, notes (`render`)
//! - Persisted light/dark theme state (`theme`, `storage`)
//! - Client configuration (`config`)

pub mod backend;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod format;
pub mod model;
pub mod render;
pub mod sample;
pub mod storage;
pub mod theme;

pub use backend::{AnalysisBackend, HttpBackend};
pub use config::ClientConfig;
pub use dispatch::{Completion, Dispatcher, Ticket};
pub use error::{AnalyzeError, ConfigError, RequestError, StorageError, ValidationError};
pub use model::{AnalysisRequest, AnalysisResponse, Anomaly, FiscalYear, Severity, SeverityLevel, YearMetric};
pub use render::{render, RenderContext};
pub use storage::{JsonFileStorage, MemoryStorage, Storage};
pub use theme::{ThemeController, ThemeMode};

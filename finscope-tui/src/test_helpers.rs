//! Test helpers for building an `AppState` without a terminal or worker.

use std::sync::mpsc::{self, Receiver, Sender};

use finscope_core::theme::THEME_KEY;
use finscope_core::{MemoryStorage, ThemeController};

use crate::app::AppState;
use crate::worker::{WorkerCommand, WorkerResponse};

/// App with in-memory theme storage. Returns the worker-side channel ends so
/// tests can observe commands and keep the response channel open.
pub fn test_app() -> (AppState, Receiver<WorkerCommand>, Sender<WorkerResponse>) {
    build(ThemeController::load(Box::new(MemoryStorage::new())))
}

pub fn test_app_with_theme(theme: &str) -> (AppState, Receiver<WorkerCommand>, Sender<WorkerResponse>) {
    build(ThemeController::load(Box::new(MemoryStorage::with(THEME_KEY, theme))))
}

fn build(theme: ThemeController) -> (AppState, Receiver<WorkerCommand>, Sender<WorkerResponse>) {
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();
    let app = AppState::new(cmd_tx, resp_rx, theme, "NSE");
    (app, cmd_rx, resp_tx)
}

//! Background worker — the blocking `/analyze` calls run off the UI thread.
//!
//! Communication with the TUI main thread is via `mpsc` channels. The worker
//! loop only receives commands; each `Analyze` runs on its own short-lived
//! request thread, so a slow or hung request never delays a newer one.
//! Every `Analyze` command produces exactly one `AnalysisDone`, success or
//! failure, unless the UI has hung up first.

use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::{debug, warn};

use finscope_core::{AnalysisBackend, AnalysisResponse, RequestError, Ticket};

/// Commands sent from the TUI to the worker.
#[derive(Debug)]
pub enum WorkerCommand {
    Analyze(Ticket),
    Shutdown,
}

/// Responses sent from the worker back to the TUI.
#[derive(Debug)]
pub enum WorkerResponse {
    AnalysisDone {
        ticket: Ticket,
        result: Result<AnalysisResponse, RequestError>,
    },
}

/// Spawn the background worker thread.
///
/// Joining the returned handle after `Shutdown` waits only for the command
/// loop. Request threads still in flight are detached; their late responses
/// go nowhere once the receiver is dropped.
pub fn spawn_worker(
    backend: Arc<dyn AnalysisBackend>,
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("finscope-worker".into())
        .spawn(move || worker_loop(backend, rx, tx))
}

fn worker_loop(
    backend: Arc<dyn AnalysisBackend>,
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
) {
    loop {
        match rx.recv() {
            Ok(WorkerCommand::Shutdown) | Err(_) => break,
            Ok(WorkerCommand::Analyze(ticket)) => {
                if let Err(ticket) = spawn_request(Arc::clone(&backend), ticket, tx.clone()) {
                    // No thread for it: settle here so the UI's loading state clears.
                    let result = Err(RequestError::Network(
                        "failed to start request thread".into(),
                    ));
                    if tx.send(WorkerResponse::AnalysisDone { ticket, result }).is_err() {
                        break;
                    }
                }
            }
        }
    }
}

/// Run one analysis on its own thread. Hands the ticket back if the thread
/// could not be started.
fn spawn_request(
    backend: Arc<dyn AnalysisBackend>,
    ticket: Ticket,
    tx: Sender<WorkerResponse>,
) -> Result<(), Ticket> {
    let generation = ticket.generation;
    // The closure owns the ticket; keep a copy to return if spawning fails.
    let fallback = ticket.clone();
    let spawned = thread::Builder::new()
        .name(format!("finscope-request-{generation}"))
        .spawn(move || {
            debug!(
                backend = backend.name(),
                generation = ticket.generation,
                "running analysis"
            );
            let result = backend.analyze(&ticket.request);
            // UI side may have hung up; nothing left to notify.
            let _ = tx.send(WorkerResponse::AnalysisDone { ticket, result });
        });
    match spawned {
        Ok(_) => Ok(()),
        Err(e) => {
            warn!(generation, error = %e, "failed to spawn request thread");
            Err(fallback)
        }
    }
}

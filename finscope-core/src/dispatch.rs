//! Request dispatch bookkeeping: validation, loading state, stale-response guard.
//!
//! Every accepted trigger gets a [`Ticket`] with a fresh generation number.
//! Only the completion carrying the latest generation is acted on; anything
//! older is reported as [`Completion::Stale`] and leaves all state untouched.

use tracing::{debug, warn};

use crate::backend::AnalysisBackend;
use crate::error::{AnalyzeError, RequestError, ValidationError};
use crate::model::{AnalysisRequest, AnalysisResponse};

/// Handle for one in-flight analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub generation: u64,
    pub request: AnalysisRequest,
}

/// What the caller should do with a finished request.
#[derive(Debug)]
pub enum Completion {
    /// Latest request succeeded: hand the response to the renderer.
    Render(Box<AnalysisResponse>),
    /// Latest request failed: show the error, render nothing.
    Failed(RequestError),
    /// A newer request was issued since this one; ignore it.
    Stale,
}

#[derive(Debug, Default)]
pub struct Dispatcher {
    generation: u64,
    in_flight: Option<u64>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate form input and, if it passes, start a new request.
    ///
    /// On a validation error nothing changes: no generation is consumed and
    /// the loading flag keeps whatever value it had.
    pub fn begin(&mut self, symbol: &str, market: &str) -> Result<Ticket, ValidationError> {
        let request = AnalysisRequest::from_form(symbol, market)?;
        self.generation += 1;
        self.in_flight = Some(self.generation);
        debug!(
            generation = self.generation,
            symbol = %request.symbol,
            market = %request.market,
            "analysis dispatched"
        );
        Ok(Ticket {
            generation: self.generation,
            request,
        })
    }

    /// Settle a request. Clears the loading flag when the latest request finishes.
    pub fn complete(
        &mut self,
        ticket: &Ticket,
        result: Result<AnalysisResponse, RequestError>,
    ) -> Completion {
        if ticket.generation != self.generation {
            debug!(
                generation = ticket.generation,
                latest = self.generation,
                "discarding stale analysis response"
            );
            return Completion::Stale;
        }

        self.in_flight = None;
        match result {
            Ok(response) => Completion::Render(Box::new(response)),
            Err(err) => {
                warn!(symbol = %ticket.request.symbol, error = %err, "analysis failed");
                Completion::Failed(err)
            }
        }
    }

    /// Begin, call `backend` on the current thread, and settle in one step.
    pub fn run_blocking(
        &mut self,
        backend: &dyn AnalysisBackend,
        symbol: &str,
        market: &str,
    ) -> Result<AnalysisResponse, AnalyzeError> {
        let ticket = self.begin(symbol, market)?;
        let result = backend.analyze(&ticket.request);
        match self.complete(&ticket, result) {
            Completion::Render(response) => Ok(*response),
            Completion::Failed(err) => Err(err.into()),
            // Nothing can begin between our own begin and complete.
            Completion::Stale => Err(RequestError::Network("request superseded".into()).into()),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn latest_generation(&self) -> u64 {
        self.generation
    }
}

//! Application state — single-owner, main-thread only.
//!
//! All TUI state lives here. The worker thread communicates via channels.

use std::collections::VecDeque;
use std::sync::mpsc::{Receiver, Sender};

use chrono::NaiveDateTime;

use finscope_core::config::MARKET_PRESETS;
use finscope_core::{render, Completion, Dispatcher, RenderContext, RequestError, ThemeController};

use crate::theme::Palette;
use crate::worker::{WorkerCommand, WorkerResponse};

const ERROR_HISTORY_CAP: usize = 50;

/// Which panel is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Analyze,
    Charts,
    Anomalies,
    Notes,
    Help,
}

impl Panel {
    pub const COUNT: usize = 5;

    pub fn index(self) -> usize {
        match self {
            Panel::Analyze => 0,
            Panel::Charts => 1,
            Panel::Anomalies => 2,
            Panel::Notes => 3,
            Panel::Help => 4,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        match i {
            0 => Some(Panel::Analyze),
            1 => Some(Panel::Charts),
            2 => Some(Panel::Anomalies),
            3 => Some(Panel::Notes),
            4 => Some(Panel::Help),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Panel::Analyze => "Analyze",
            Panel::Charts => "Charts",
            Panel::Anomalies => "Anomalies",
            Panel::Notes => "Notes",
            Panel::Help => "Help",
        }
    }

    pub fn next(self) -> Panel {
        Panel::from_index((self.index() + 1) % Self::COUNT).unwrap_or(Panel::Analyze)
    }

    pub fn prev(self) -> Panel {
        Panel::from_index((self.index() + Self::COUNT - 1) % Self::COUNT).unwrap_or(Panel::Analyze)
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// Error category for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Network,
    Http,
    Decode,
    Storage,
}

impl ErrorCategory {
    pub fn label(self) -> &'static str {
        match self {
            ErrorCategory::Validation => "INPUT",
            ErrorCategory::Network => "NET",
            ErrorCategory::Http => "HTTP",
            ErrorCategory::Decode => "JSON",
            ErrorCategory::Storage => "STORE",
        }
    }

    pub fn of(err: &RequestError) -> Self {
        match err {
            RequestError::Network(_) => ErrorCategory::Network,
            RequestError::Status { .. } => ErrorCategory::Http,
            RequestError::Decode(_) => ErrorCategory::Decode,
        }
    }
}

/// An error record for the error history overlay.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub category: ErrorCategory,
    pub message: String,
    pub context: String,
}

/// Which form field an edit overlay targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Symbol,
    Market,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Field::Symbol => "Symbol",
            Field::Market => "Market",
        }
    }
}

/// The two form inputs, as typed.
#[derive(Debug, Clone)]
pub struct FormState {
    pub symbol: String,
    pub market: String,
}

impl FormState {
    pub fn new(default_market: &str) -> Self {
        Self {
            symbol: String::new(),
            market: default_market.to_string(),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Symbol => &self.symbol,
            Field::Market => &self.market,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Symbol => self.symbol = value,
            Field::Market => self.market = value,
        }
    }

    /// Step through the market presets; a custom market jumps to the first preset.
    pub fn cycle_market(&mut self, direction: i32) {
        let len = MARKET_PRESETS.len();
        let next = match MARKET_PRESETS.iter().position(|m| *m == self.market) {
            Some(i) if direction >= 0 => (i + 1) % len,
            Some(i) => (i + len - 1) % len,
            None => 0,
        };
        self.market = MARKET_PRESETS[next].to_string();
    }
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    None,
    /// Modal message; any key dismisses it.
    Alert(String),
    Edit(Field),
    ErrorHistory,
}

/// Top-level application state.
pub struct AppState {
    // Navigation
    pub active_panel: Panel,
    pub running: bool,

    // Form and request flow
    pub form: FormState,
    pub edit_buffer: String,
    pub dispatcher: Dispatcher,
    pub results: RenderContext,
    pub last_symbol: Option<String>,

    // Theme
    pub theme: ThemeController,

    // Worker communication
    pub worker_tx: Sender<WorkerCommand>,
    pub worker_rx: Receiver<WorkerResponse>,

    // Cross-cutting
    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,
    pub error_scroll: usize,
    pub overlay: Overlay,
    /// Frame counter driving the spinner.
    pub tick: u64,
}

impl AppState {
    pub fn new(
        worker_tx: Sender<WorkerCommand>,
        worker_rx: Receiver<WorkerResponse>,
        theme: ThemeController,
        default_market: &str,
    ) -> Self {
        Self {
            active_panel: Panel::Analyze,
            running: true,
            form: FormState::new(default_market),
            edit_buffer: String::new(),
            dispatcher: Dispatcher::new(),
            results: RenderContext::new(),
            last_symbol: None,
            theme,
            worker_tx,
            worker_rx,
            status_message: None,
            error_history: VecDeque::with_capacity(ERROR_HISTORY_CAP),
            error_scroll: 0,
            overlay: Overlay::None,
            tick: 0,
        }
    }

    pub fn palette(&self) -> Palette {
        Palette::for_mode(self.theme.mode())
    }

    pub fn is_loading(&self) -> bool {
        self.dispatcher.is_loading()
    }

    /// Validate the form and hand the request to the worker.
    pub fn submit_analysis(&mut self) {
        let ticket = match self.dispatcher.begin(&self.form.symbol, &self.form.market) {
            Ok(ticket) => ticket,
            Err(e) => {
                self.alert(ErrorCategory::Validation, e.to_string(), String::new());
                return;
            }
        };

        let symbol = ticket.request.symbol.clone();
        self.set_status(format!("Analyzing {symbol}..."));
        if let Err(send_err) = self.worker_tx.send(WorkerCommand::Analyze(ticket)) {
            // Worker is gone: settle the ticket here so loading clears.
            let WorkerCommand::Analyze(ticket) = send_err.0 else {
                return;
            };
            let err = RequestError::Network("analysis worker is not running".into());
            self.apply_worker_response(WorkerResponse::AnalysisDone {
                ticket,
                result: Err(err),
            });
        }
    }

    /// Fold one worker response into the state.
    pub fn apply_worker_response(&mut self, resp: WorkerResponse) {
        match resp {
            WorkerResponse::AnalysisDone { ticket, result } => {
                let symbol = ticket.request.symbol.clone();
                match self.dispatcher.complete(&ticket, result) {
                    Completion::Render(response) => {
                        let ctx = std::mem::take(&mut self.results);
                        self.results = render(ctx, &response);
                        self.set_status(format!(
                            "{symbol}: {} years, {} anomalies",
                            self.results.table.len(),
                            self.results.anomalies.len()
                        ));
                        self.last_symbol = Some(symbol);
                    }
                    Completion::Failed(err) => {
                        self.alert(ErrorCategory::of(&err), format!("Error: {err}"), symbol);
                    }
                    Completion::Stale => {}
                }
            }
        }
    }

    pub fn toggle_theme(&mut self) {
        match self.theme.toggle() {
            Ok(mode) => self.set_status(format!("Theme: {mode}")),
            Err(e) => self.push_error(
                ErrorCategory::Storage,
                format!("Theme not saved: {e}"),
                "theme toggle".into(),
            ),
        }
    }

    /// Record an error and raise it as a modal alert.
    pub fn alert(&mut self, category: ErrorCategory, message: String, context: String) {
        self.push_error(category, message.clone(), context);
        self.overlay = Overlay::Alert(message);
    }

    /// Push an error to the history, capping at 50.
    pub fn push_error(&mut self, category: ErrorCategory, message: String, context: String) {
        let record = ErrorRecord {
            timestamp: chrono::Local::now().naive_local(),
            category,
            message: message.clone(),
            context,
        };
        self.error_history.push_front(record);
        if self.error_history.len() > ERROR_HISTORY_CAP {
            self.error_history.pop_back();
        }
        self.status_message = Some((message, StatusLevel::Error));
    }

    /// Set an info status message.
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    /// Set a warning status message.
    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{test_app, test_app_with_theme};
    use finscope_core::sample::sample_response;
    use finscope_core::ThemeMode;

    #[test]
    fn panel_cycle() {
        assert_eq!(Panel::Analyze.next(), Panel::Charts);
        assert_eq!(Panel::Help.next(), Panel::Analyze);
        assert_eq!(Panel::Analyze.prev(), Panel::Help);
        assert_eq!(Panel::Charts.prev(), Panel::Analyze);
    }

    #[test]
    fn panel_from_index() {
        for i in 0..Panel::COUNT {
            let p = Panel::from_index(i).unwrap();
            assert_eq!(p.index(), i);
        }
        assert!(Panel::from_index(Panel::COUNT).is_none());
    }

    #[test]
    fn error_history_caps_at_50() {
        let (mut app, _worker_rx, _resp_tx) = test_app();
        for i in 0..60 {
            app.push_error(ErrorCategory::Network, format!("error {i}"), String::new());
        }
        assert_eq!(app.error_history.len(), 50);
        assert!(app.error_history[0].message.contains("59"));
    }

    #[test]
    fn empty_symbol_alerts_without_dispatch() {
        let (mut app, worker_rx, _resp_tx) = test_app();
        app.form.symbol = "   ".into();
        app.submit_analysis();

        assert_eq!(app.overlay, Overlay::Alert("Please enter a stock symbol".into()));
        assert!(!app.is_loading());
        assert!(worker_rx.try_recv().is_err());
    }

    #[test]
    fn submit_sends_uppercased_request() {
        let (mut app, worker_rx, _resp_tx) = test_app();
        app.form.symbol = " wipro ".into();
        app.form.market = "BSE".into();
        app.submit_analysis();

        assert!(app.is_loading());
        match worker_rx.try_recv().unwrap() {
            WorkerCommand::Analyze(ticket) => {
                assert_eq!(ticket.request.symbol, "WIPRO");
                assert_eq!(ticket.request.market, "BSE");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn success_renders_and_clears_loading() {
        let (mut app, worker_rx, _resp_tx) = test_app();
        app.form.symbol = "tcs".into();
        app.submit_analysis();
        let WorkerCommand::Analyze(ticket) = worker_rx.try_recv().unwrap() else {
            panic!("expected Analyze");
        };

        app.apply_worker_response(WorkerResponse::AnalysisDone {
            ticket,
            result: Ok(sample_response("TCS", "NSE")),
        });
        assert!(!app.is_loading());
        assert!(app.results.visible);
        assert_eq!(app.results.table.len(), 5);
        assert_eq!(app.overlay, Overlay::None);
        assert_eq!(app.last_symbol.as_deref(), Some("TCS"));
    }

    #[test]
    fn failure_alerts_and_keeps_previous_results() {
        let (mut app, worker_rx, _resp_tx) = test_app();
        app.form.symbol = "tcs".into();
        app.submit_analysis();
        let WorkerCommand::Analyze(ticket) = worker_rx.try_recv().unwrap() else {
            panic!("expected Analyze");
        };
        app.apply_worker_response(WorkerResponse::AnalysisDone {
            ticket,
            result: Err(RequestError::Status { status: 503 }),
        });

        assert!(!app.is_loading());
        assert!(!app.results.visible);
        assert_eq!(app.overlay, Overlay::Alert("Error: Analysis failed (HTTP 503)".into()));
        assert_eq!(app.error_history[0].category, ErrorCategory::Http);
    }

    #[test]
    fn resubmit_while_loading_dispatches_again() {
        let (mut app, worker_rx, _resp_tx) = test_app();
        app.form.symbol = "tcs".into();
        app.submit_analysis();
        app.form.symbol = "infy".into();
        app.submit_analysis();
        assert!(app.is_loading());

        let generations: Vec<u64> = worker_rx
            .try_iter()
            .map(|cmd| match cmd {
                WorkerCommand::Analyze(ticket) => ticket.generation,
                other => panic!("unexpected command {other:?}"),
            })
            .collect();
        assert_eq!(generations, [1, 2]);
    }

    #[test]
    fn dead_worker_settles_ticket() {
        let (mut app, worker_rx, _resp_tx) = test_app();
        drop(worker_rx);
        app.form.symbol = "tcs".into();
        app.submit_analysis();
        assert!(!app.is_loading());
        assert!(matches!(app.overlay, Overlay::Alert(_)));
    }

    #[test]
    fn theme_toggle_switches_palette() {
        let (mut app, _worker_rx, _resp_tx) = test_app_with_theme("dark");
        assert_eq!(app.theme.mode(), ThemeMode::Dark);
        let dark_bg = app.palette().background;
        app.toggle_theme();
        assert_eq!(app.theme.mode(), ThemeMode::Light);
        assert_ne!(app.palette().background, dark_bg);
        assert_eq!(app.theme.persisted().as_deref(), Some("light"));
    }

    #[test]
    fn market_cycles_through_presets() {
        let mut form = FormState::new("NSE");
        form.cycle_market(1);
        assert_eq!(form.market, "BSE");
        form.cycle_market(-1);
        form.cycle_market(-1);
        assert_eq!(form.market, "NASDAQ");
        form.market = "LSE".into();
        form.cycle_market(1);
        assert_eq!(form.market, "NSE");
    }
}

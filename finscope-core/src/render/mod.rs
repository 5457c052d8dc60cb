//! Result rendering — response → table rows, chart series, anomaly cards, notes.
//!
//! [`render`] is a pure function of the previous [`RenderContext`] and the
//! response: it consumes the old context and returns the next one. Chart
//! handles are owned by the context and replaced wholesale on each pass;
//! the previous handle for an id is destroyed before its successor is built.

pub mod anomalies;
pub mod charts;
pub mod table;

use std::collections::BTreeMap;

use tracing::debug;

use crate::model::AnalysisResponse;

pub use anomalies::AnomalyCard;
pub use charts::{ChartSeries, ChartSpec, CHART_SPECS};
pub use table::{TableRow, TABLE_HEADERS};

/// A live chart instance. Never mutated after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartHandle {
    /// Monotonic instance number, unique across the context's lifetime.
    pub instance: u64,
    pub series: ChartSeries,
}

/// Everything the results section shows, plus the chart handles it owns.
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    pub table: Vec<TableRow>,
    pub anomalies: Vec<AnomalyCard>,
    pub notes: String,
    /// False until the first successful render.
    pub visible: bool,
    charts: BTreeMap<&'static str, ChartHandle>,
    next_instance: u64,
    destroyed: u64,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Chart handles in display order.
    pub fn charts(&self) -> impl Iterator<Item = &ChartHandle> {
        CHART_SPECS.iter().filter_map(|spec| self.charts.get(spec.id))
    }

    pub fn chart(&self, id: &str) -> Option<&ChartHandle> {
        self.charts.get(id)
    }

    pub fn chart_count(&self) -> usize {
        self.charts.len()
    }

    /// Total handles destroyed so far.
    pub fn destroyed_count(&self) -> u64 {
        self.destroyed
    }

    /// Destroy any handle registered under the series' id, then create the new one.
    fn replace_chart(&mut self, series: ChartSeries) -> &ChartHandle {
        let id = series.id;
        if let Some(old) = self.charts.remove(id) {
            debug!(chart = id, instance = old.instance, "destroying chart");
            self.destroyed += 1;
            drop(old);
        }
        self.next_instance += 1;
        let handle = ChartHandle {
            instance: self.next_instance,
            series,
        };
        self.charts.entry(id).or_insert(handle)
    }
}

/// Run one render pass.
pub fn render(mut ctx: RenderContext, response: &AnalysisResponse) -> RenderContext {
    ctx.table = table::rows(&response.metrics);

    for spec in CHART_SPECS.iter() {
        ctx.replace_chart(ChartSeries::build(spec, &response.metrics));
    }

    ctx.anomalies = anomalies::cards(&response.anomalies);
    ctx.notes = response.analyst_notes.clone();
    ctx.visible = true;

    debug!(
        rows = ctx.table.len(),
        anomalies = ctx.anomalies.len(),
        "render pass complete"
    );
    ctx
}

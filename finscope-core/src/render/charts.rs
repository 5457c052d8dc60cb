//! The six metric line charts.

use crate::model::YearMetric;

/// Line smoothing applied to every series.
pub const TENSION: f64 = 0.4;

/// Static description of one chart.
#[derive(Debug, Clone, Copy)]
pub struct ChartSpec {
    pub id: &'static str,
    pub label: &'static str,
    /// `#RRGGBB` line colour.
    pub color: &'static str,
    pub value: fn(&YearMetric) -> f64,
}

pub static CHART_SPECS: [ChartSpec; 6] = [
    ChartSpec {
        id: "revenueChart",
        label: "Revenue",
        color: "#4CAF50",
        value: |m| m.revenue,
    },
    ChartSpec {
        id: "marginChart",
        label: "Op. Margin %",
        color: "#2196F3",
        value: |m| m.operating_margin,
    },
    ChartSpec {
        id: "roeChart",
        label: "ROE %",
        color: "#FF9800",
        value: |m| m.roe,
    },
    ChartSpec {
        id: "debtChart",
        label: "D/E Ratio",
        color: "#F44336",
        value: |m| m.debt_to_equity,
    },
    ChartSpec {
        id: "wcChart",
        label: "WC Days",
        color: "#9C27B0",
        value: |m| m.working_capital_days,
    },
    ChartSpec {
        id: "cashChart",
        label: "Cash Ratio",
        color: "#00BCD4",
        value: |m| m.cash_ratio,
    },
];

/// A single-series line chart keyed by year.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub id: &'static str,
    pub label: &'static str,
    pub color: &'static str,
    pub tension: f64,
    pub show_legend: bool,
    /// X-axis labels, one per metric row.
    pub labels: Vec<String>,
    /// Y values, one per metric row.
    pub points: Vec<f64>,
}

impl ChartSeries {
    pub fn build(spec: &ChartSpec, metrics: &[YearMetric]) -> Self {
        Self {
            id: spec.id,
            label: spec.label,
            color: spec.color,
            tension: TENSION,
            show_legend: false,
            labels: metrics.iter().map(|m| m.year.to_string()).collect(),
            points: metrics.iter().map(spec.value).collect(),
        }
    }

    /// Line colour as RGB. Malformed hex falls back to mid grey.
    pub fn rgb(&self) -> (u8, u8, u8) {
        parse_hex(self.color).unwrap_or((128, 128, 128))
    }

    /// Raw points as `(index, value)`.
    pub fn xy(&self) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .enumerate()
            .map(|(i, &v)| (i as f64, v))
            .collect()
    }

    /// Smoothed polyline through the points, `samples` steps per segment.
    ///
    /// Cubic Hermite segments with tangents `tension * (y[i+1] - y[i-1])`,
    /// clamped at the ends. The curve passes through every original point;
    /// tension 0 gives flat tangents, so no segment leaves its endpoints' range.
    pub fn smoothed(&self, samples: usize) -> Vec<(f64, f64)> {
        let n = self.points.len();
        if n < 2 || samples < 2 {
            return self.xy();
        }

        let y = &self.points;
        let tangent = |i: usize| {
            let prev = y[i.saturating_sub(1)];
            let next = y[(i + 1).min(n - 1)];
            self.tension * (next - prev)
        };

        let mut out = Vec::with_capacity((n - 1) * samples + 1);
        for i in 0..n - 1 {
            let (y0, y1) = (y[i], y[i + 1]);
            let (m0, m1) = (tangent(i), tangent(i + 1));
            for s in 0..samples {
                let t = s as f64 / samples as f64;
                let t2 = t * t;
                let t3 = t2 * t;
                let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
                let h10 = t3 - 2.0 * t2 + t;
                let h01 = -2.0 * t3 + 3.0 * t2;
                let h11 = t3 - t2;
                out.push((i as f64 + t, h00 * y0 + h10 * m0 + h01 * y1 + h11 * m1));
            }
        }
        out.push(((n - 1) as f64, y[n - 1]));
        out
    }
}

fn parse_hex(s: &str) -> Option<(u8, u8, u8)> {
    let hex = s.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

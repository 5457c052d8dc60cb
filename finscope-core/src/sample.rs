//! Bundled sample response for demo mode and tests.
//!
//! Mirrors the mock payload the analysis backend returns while its real
//! pipeline is offline: five fiscal years, newest first, two anomalies.

use crate::model::{AnalysisResponse, Anomaly, FiscalYear, Severity, YearMetric};

#[allow(clippy::too_many_arguments)]
fn year(
    label: &str,
    revenue: f64,
    ebitda: f64,
    operating_margin: f64,
    roe: f64,
    debt_to_equity: f64,
    working_capital_days: f64,
    cash_ratio: f64,
) -> YearMetric {
    YearMetric {
        year: FiscalYear::from(label),
        revenue,
        ebitda,
        operating_margin,
        roe,
        debt_to_equity,
        working_capital_days,
        cash_ratio,
    }
}

pub fn sample_response(symbol: &str, market: &str) -> AnalysisResponse {
    let metrics = vec![
        year("FY25", 1000.5, 250.1, 25.0, 15.0, 0.30, 30.0, 1.5),
        year("FY24", 950.2, 220.3, 23.2, 14.0, 0.28, 28.0, 1.6),
        year("FY23", 880.7, 185.5, 21.1, 12.5, 0.25, 26.0, 1.8),
        year("FY22", 750.3, 150.2, 20.0, 11.0, 0.22, 24.0, 2.0),
        year("FY21", 680.1, 130.4, 19.2, 10.5, 0.20, 22.0, 2.1),
    ];

    let anomalies = vec![
        Anomaly {
            metric: "Working Capital Days".into(),
            severity: Severity::new("RED"),
            description: "WC days increased from 26 to 30 (up 15%)".into(),
            recommendation: "Tighten AR collection policy".into(),
        },
        Anomaly {
            metric: "Leverage Ratio".into(),
            severity: Severity::new("ORANGE"),
            description: "D/E ratio increased from 0.25 to 0.30".into(),
            recommendation: "Monitor debt levels carefully".into(),
        },
    ];

    AnalysisResponse {
        symbol: Some(symbol.to_string()),
        market: Some(market.to_string()),
        metrics,
        anomalies,
        analyst_notes: format!(
            "Analysis for {symbol}. Strong revenue growth of 8% CAGR over 5 years. \
             Operating margins expanding. Working capital management needs attention."
        ),
        summary: "Strong fundamentals with some operational concerns".into(),
    }
}

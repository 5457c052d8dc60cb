//! Wire types for the `/analyze` endpoint.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Body of `POST /analyze`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub symbol: String,
    pub market: String,
}

impl AnalysisRequest {
    /// Build a request from raw form input.
    ///
    /// The symbol is trimmed and uppercased; an empty symbol is rejected.
    /// The market is passed through trimmed but otherwise untouched.
    pub fn from_form(symbol: &str, market: &str) -> Result<Self, ValidationError> {
        let symbol = symbol.trim().to_uppercase();
        if symbol.is_empty() {
            return Err(ValidationError::EmptySymbol);
        }
        Ok(Self {
            symbol,
            market: market.trim().to_string(),
        })
    }
}

/// Reporting-year label. The backend sends either `2023` or `"FY25"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FiscalYear {
    Number(i64),
    Label(String),
}

impl fmt::Display for FiscalYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FiscalYear::Number(n) => write!(f, "{n}"),
            FiscalYear::Label(s) => f.write_str(s),
        }
    }
}

impl From<i64> for FiscalYear {
    fn from(n: i64) -> Self {
        FiscalYear::Number(n)
    }
}

impl From<&str> for FiscalYear {
    fn from(s: &str) -> Self {
        FiscalYear::Label(s.to_string())
    }
}

/// One reporting year of financial metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearMetric {
    pub year: FiscalYear,
    pub revenue: f64,
    pub ebitda: f64,
    pub operating_margin: f64,
    pub roe: f64,
    pub debt_to_equity: f64,
    pub working_capital_days: f64,
    pub cash_ratio: f64,
}

/// Coarse severity bucket used for colouring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeverityLevel {
    Low,
    Medium,
    High,
    Unknown,
}

/// Severity as sent by the backend (`"High"`, `"RED"`, ...).
///
/// The raw text is kept for the badge; comparisons go through the
/// lower-cased style key so `"HIGH"` and `"high"` style identically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Severity(pub String);

impl Severity {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn style_key(&self) -> String {
        self.0.to_lowercase()
    }

    pub fn level(&self) -> SeverityLevel {
        match self.style_key().trim() {
            "high" | "red" | "critical" => SeverityLevel::High,
            "medium" | "orange" | "amber" => SeverityLevel::Medium,
            "low" | "yellow" | "green" => SeverityLevel::Low,
            _ => SeverityLevel::Unknown,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A flagged deviation in one metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anomaly {
    pub metric: String,
    pub severity: Severity,
    pub description: String,
    pub recommendation: String,
}

/// Successful `/analyze` response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market: Option<String>,
    pub metrics: Vec<YearMetric>,
    pub anomalies: Vec<Anomaly>,
    pub analyst_notes: String,
    pub summary: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_form_trims_and_uppercases() {
        let req = AnalysisRequest::from_form("  reliance ", "NSE").unwrap();
        assert_eq!(req.symbol, "RELIANCE");
        assert_eq!(req.market, "NSE");
    }

    #[test]
    fn from_form_rejects_blank_symbol() {
        assert_eq!(
            AnalysisRequest::from_form("   ", "NSE"),
            Err(ValidationError::EmptySymbol)
        );
        assert_eq!(
            AnalysisRequest::from_form("", "NSE"),
            Err(ValidationError::EmptySymbol)
        );
    }

    #[test]
    fn request_serializes_to_symbol_and_market() {
        let req = AnalysisRequest::from_form("tcs", "BSE").unwrap();
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json, serde_json::json!({"symbol": "TCS", "market": "BSE"}));
    }

    #[test]
    fn fiscal_year_accepts_number_or_label() {
        let n: FiscalYear = serde_json::from_str("2023").unwrap();
        let s: FiscalYear = serde_json::from_str("\"FY25\"").unwrap();
        assert_eq!(n, FiscalYear::Number(2023));
        assert_eq!(s, FiscalYear::Label("FY25".into()));
        assert_eq!(n.to_string(), "2023");
        assert_eq!(s.to_string(), "FY25");
    }

    #[test]
    fn severity_is_case_insensitive() {
        assert_eq!(Severity::new("HIGH").style_key(), Severity::new("high").style_key());
        assert_eq!(Severity::new("HIGH").level(), SeverityLevel::High);
        assert_eq!(Severity::new("Red").level(), SeverityLevel::High);
        assert_eq!(Severity::new("ORANGE").level(), SeverityLevel::Medium);
        assert_eq!(Severity::new("yellow").level(), SeverityLevel::Low);
        assert_eq!(Severity::new("purple").level(), SeverityLevel::Unknown);
    }

    #[test]
    fn response_without_echo_fields_parses() {
        let json = r#"{
            "metrics": [],
            "anomalies": [{"metric": "ROE", "severity": "Low", "description": "d", "recommendation": "r"}],
            "analyst_notes": "ok",
            "summary": "x"
        }"#;
        let resp: AnalysisResponse = serde_json::from_str(json).unwrap();
        assert!(resp.symbol.is_none());
        assert_eq!(resp.anomalies[0].severity.as_str(), "Low");
    }

    #[test]
    fn metric_with_missing_field_is_rejected() {
        let json = r#"{"year": 2023, "revenue": 1.0}"#;
        assert!(serde_json::from_str::<YearMetric>(json).is_err());
    }
}

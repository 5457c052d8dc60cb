//! Metrics table rows with fixed decimal precision per column.

use serde::Serialize;

use crate::format::to_fixed;
use crate::model::YearMetric;

pub const TABLE_HEADERS: [&str; 8] = [
    "Year",
    "Revenue",
    "EBITDA",
    "Op. Margin %",
    "ROE %",
    "D/E",
    "WC Days",
    "Cash Ratio",
];

/// One formatted table row, columns in `TABLE_HEADERS` order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    pub year: String,
    pub revenue: String,
    pub ebitda: String,
    pub operating_margin: String,
    pub roe: String,
    pub debt_to_equity: String,
    pub working_capital_days: String,
    pub cash_ratio: String,
}

impl TableRow {
    pub fn from_metric(m: &YearMetric) -> Self {
        Self {
            year: m.year.to_string(),
            revenue: to_fixed(m.revenue, 1),
            ebitda: to_fixed(m.ebitda, 1),
            operating_margin: to_fixed(m.operating_margin, 1),
            roe: to_fixed(m.roe, 1),
            debt_to_equity: to_fixed(m.debt_to_equity, 2),
            working_capital_days: to_fixed(m.working_capital_days, 0),
            cash_ratio: to_fixed(m.cash_ratio, 2),
        }
    }

    pub fn cells(&self) -> [&str; 8] {
        [
            &self.year,
            &self.revenue,
            &self.ebitda,
            &self.operating_margin,
            &self.roe,
            &self.debt_to_equity,
            &self.working_capital_days,
            &self.cash_ratio,
        ]
    }
}

/// Rebuild all rows, preserving input order.
pub fn rows(metrics: &[YearMetric]) -> Vec<TableRow> {
    metrics.iter().map(TableRow::from_metric).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FiscalYear;

    fn metric() -> YearMetric {
        YearMetric {
            year: FiscalYear::Number(2023),
            revenue: 100.25,
            ebitda: 30.0,
            operating_margin: 12.3,
            roe: 8.456,
            debt_to_equity: 1.2,
            working_capital_days: 45.0,
            cash_ratio: 0.5,
        }
    }

    #[test]
    fn precision_per_column() {
        let row = TableRow::from_metric(&metric());
        assert_eq!(
            row.cells(),
            ["2023", "100.3", "30.0", "12.3", "8.5", "1.20", "45", "0.50"]
        );
    }

    #[test]
    fn rows_keep_input_order() {
        let mut older = metric();
        older.year = FiscalYear::Number(2019);
        let rows = rows(&[metric(), older]);
        assert_eq!(rows[0].year, "2023");
        assert_eq!(rows[1].year, "2019");
    }

    #[test]
    fn headers_match_cell_count() {
        assert_eq!(TABLE_HEADERS.len(), TableRow::from_metric(&metric()).cells().len());
    }
}

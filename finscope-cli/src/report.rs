//! Text and CSV rendering of a finished analysis.

use std::fmt::Write as _;

use anyhow::{Context, Result};

use finscope_core::render::{RenderContext, TableRow, TABLE_HEADERS};

/// Plain-text report: metrics table, anomaly cards, analyst notes.
pub fn text_report(symbol: &str, market: &str, ctx: &RenderContext) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{symbol} ({market})");
    let _ = writeln!(out);

    out.push_str(&metrics_table(&ctx.table));
    let _ = writeln!(out);

    let _ = writeln!(out, "Anomalies: {}", ctx.anomalies.len());
    for card in &ctx.anomalies {
        let _ = writeln!(out, "  [{}] {}", card.badge, card.title);
        let _ = writeln!(out, "      {}", card.description);
        let _ = writeln!(out, "      {}", card.recommendation);
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Analyst notes:");
    for line in ctx.notes.lines() {
        let _ = writeln!(out, "  {line}");
    }
    out
}

/// Fixed-width table; the year column is left-aligned, numbers right-aligned.
pub fn metrics_table(rows: &[TableRow]) -> String {
    let mut widths: Vec<usize> = TABLE_HEADERS.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row.cells()) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &TABLE_HEADERS, &widths);
    let total: usize = widths.iter().sum::<usize>() + 2 * (widths.len() - 1);
    let _ = writeln!(out, "{}", "-".repeat(total));
    for row in rows {
        push_row(&mut out, &row.cells(), &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[&str], widths: &[usize]) {
    let mut line = String::new();
    for (i, (cell, w)) in cells.iter().zip(widths).enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        if i == 0 {
            let _ = write!(line, "{cell:<w$}");
        } else {
            let _ = write!(line, "{cell:>w$}");
        }
    }
    let _ = writeln!(out, "{}", line.trim_end());
}

/// Export table rows as CSV, with the same headers and precision as the table.
pub fn export_table_csv(rows: &[TableRow]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(TABLE_HEADERS)?;
    for row in rows {
        wtr.write_record(row.cells())?;
    }
    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;
    use finscope_core::render::render;
    use finscope_core::sample::sample_response;
    use finscope_core::{AnalysisResponse, FiscalYear, YearMetric};

    fn one_row() -> AnalysisResponse {
        AnalysisResponse {
            symbol: None,
            market: None,
            metrics: vec![YearMetric {
                year: FiscalYear::Number(2023),
                revenue: 100.25,
                ebitda: 30.0,
                operating_margin: 12.3,
                roe: 8.456,
                debt_to_equity: 1.2,
                working_capital_days: 45.0,
                cash_ratio: 0.5,
            }],
            anomalies: vec![],
            analyst_notes: "Line one\nLine two".into(),
            summary: String::new(),
        }
    }

    #[test]
    fn csv_has_header_and_fixed_precision() {
        let ctx = render(RenderContext::new(), &one_row());
        let csv = export_table_csv(&ctx.table).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("Year,Revenue,EBITDA,Op. Margin %,ROE %,D/E,WC Days,Cash Ratio")
        );
        assert_eq!(lines.next(), Some("2023,100.3,30.0,12.3,8.5,1.20,45,0.50"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn table_columns_line_up() {
        let ctx = render(RenderContext::new(), &sample_response("TCS", "NSE"));
        let table = metrics_table(&ctx.table);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 2 + ctx.table.len());
        assert!(lines[0].starts_with("Year"));
        assert!(lines[1].chars().all(|c| c == '-'));
        // Right-aligned numeric columns end at the same offset.
        let header_len = lines[0].chars().count();
        for row in &lines[2..] {
            assert_eq!(row.chars().count(), header_len);
        }
    }

    #[test]
    fn text_report_sections() {
        let ctx = render(RenderContext::new(), &sample_response("TCS", "NSE"));
        let text = text_report("TCS", "NSE", &ctx);
        assert!(text.starts_with("TCS (NSE)"));
        assert!(text.contains("Anomalies: 2"));
        assert!(text.contains("[RED] Working Capital Days"));
        assert!(text.contains("💡 "));
        assert!(text.contains("Analyst notes:"));
    }

    #[test]
    fn notes_lines_are_indented() {
        let ctx = render(RenderContext::new(), &one_row());
        let text = text_report("X", "NSE", &ctx);
        assert!(text.contains("  Line one\n  Line two\n"));
        assert!(text.contains("Anomalies: 0"));
    }
}

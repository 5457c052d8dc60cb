//! Panel 1 — Analyze: the symbol/market form and the metrics table.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Paragraph, Row, Table};
use ratatui::Frame;

use finscope_core::render::TABLE_HEADERS;

use crate::app::AppState;
use crate::theme::Palette;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let palette = app.palette();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(0)])
        .split(area);

    render_form(f, chunks[0], app, &palette);

    if app.results.visible {
        render_table(f, chunks[1], app, &palette);
    } else {
        let hint = vec![
            Line::from(""),
            Line::from(Span::styled(
                "No analysis yet. Press s to enter a symbol, then Enter to analyze.",
                palette.muted(),
            )),
        ];
        f.render_widget(Paragraph::new(hint), chunks[1]);
    }
}

fn render_form(f: &mut Frame, area: Rect, app: &AppState, palette: &Palette) {
    let symbol = if app.form.symbol.is_empty() {
        Span::styled("(empty)", palette.muted())
    } else {
        Span::styled(app.form.symbol.as_str(), palette.accent_bold())
    };

    // "Analyzing..." while a request is in flight; submitting again still dispatches.
    let button = if app.is_loading() {
        Span::styled("[ Analyzing... ]", palette.muted().add_modifier(Modifier::ITALIC))
    } else {
        Span::styled("[ Analyze ]", palette.accent_bold())
    };

    let lines = vec![
        Line::from(vec![
            Span::styled(format!("{:>8}  ", "Symbol"), palette.secondary()),
            symbol,
            Span::styled("   [s] edit", palette.muted()),
        ]),
        Line::from(vec![
            Span::styled(format!("{:>8}  ", "Market"), palette.secondary()),
            Span::styled(app.form.market.as_str(), palette.accent()),
            Span::styled("   [m/h/l] preset  [M] edit", palette.muted()),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::raw("          "),
            button,
            Span::styled("  [Enter]", palette.muted()),
        ]),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

fn render_table(f: &mut Frame, area: Rect, app: &AppState, palette: &Palette) {
    let header = Row::new(
        TABLE_HEADERS
            .iter()
            .map(|h| Cell::from(*h).style(palette.accent_bold())),
    );

    let rows = app.results.table.iter().map(|row| {
        Row::new(
            row.cells()
                .into_iter()
                .map(|c| Cell::from(c.to_string()).style(palette.text())),
        )
    });

    let widths = [
        Constraint::Length(6),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(13),
        Constraint::Length(8),
        Constraint::Length(6),
        Constraint::Length(8),
        Constraint::Length(10),
    ];

    let table = Table::new(rows, widths).header(header).column_spacing(1);
    f.render_widget(table, area);
}

#[cfg(test)]
mod tests {
    use crate::test_helpers::test_app;
    use crate::ui::testing::draw_to_string;
    use crate::worker::{WorkerCommand, WorkerResponse};
    use finscope_core::{AnalysisResponse, FiscalYear, YearMetric};

    #[test]
    fn table_shows_fixed_precision_cells() {
        let (mut app, worker_rx, _tx) = test_app();
        app.form.symbol = "tcs".into();
        app.submit_analysis();
        let WorkerCommand::Analyze(ticket) = worker_rx.try_recv().unwrap() else {
            panic!("expected Analyze");
        };
        let response = AnalysisResponse {
            symbol: None,
            market: None,
            metrics: vec![YearMetric {
                year: FiscalYear::Number(2024),
                revenue: 100.25,
                ebitda: 20.0,
                operating_margin: 8.5,
                roe: 12.0,
                debt_to_equity: 1.2,
                working_capital_days: 45.4,
                cash_ratio: 0.5,
            }],
            anomalies: vec![],
            analyst_notes: String::new(),
            summary: String::new(),
        };
        app.apply_worker_response(WorkerResponse::AnalysisDone {
            ticket,
            result: Ok(response),
        });

        let text = draw_to_string(&app, 120, 20);
        assert!(text.contains("Op. Margin %"));
        assert!(text.contains("2024"));
        assert!(text.contains("8.5"));
        assert!(text.contains("1.20"));
        assert!(text.contains("0.50"));
    }

    #[test]
    fn loading_shows_analyzing_button() {
        let (mut app, _worker_rx, _tx) = test_app();
        app.form.symbol = "tcs".into();
        app.submit_analysis();
        let text = draw_to_string(&app, 120, 20);
        assert!(text.contains("Analyzing..."));
    }
}

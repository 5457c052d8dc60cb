//! Panel 2 — Charts: six smoothed line charts in a 3×2 grid.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph};
use ratatui::Frame;

use finscope_core::format::to_fixed;
use finscope_core::render::ChartSeries;

use crate::app::AppState;
use crate::theme::Palette;

const SAMPLES_PER_SEGMENT: usize = 8;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let palette = app.palette();

    if !app.results.visible {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Charts appear here after a successful analysis (press 1).",
                palette.muted(),
            )),
        ];
        f.render_widget(Paragraph::new(lines), area);
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let cells: Vec<Rect> = rows
        .iter()
        .flat_map(|row| {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
                .split(*row)
                .to_vec()
        })
        .collect();

    for (handle, cell) in app.results.charts().zip(cells) {
        render_series(f, cell, &handle.series, &palette);
    }
}

fn render_series(f: &mut Frame, area: Rect, series: &ChartSeries, palette: &Palette) {
    let color = Palette::series_color(series);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.muted())
        .title(Span::styled(format!(" {} ", series.label), Style::default().fg(color)));

    if series.points.is_empty() {
        let para = Paragraph::new(Span::styled("no data", palette.muted())).block(block);
        f.render_widget(para, area);
        return;
    }

    let data = series.smoothed(SAMPLES_PER_SEGMENT);
    let (y_min, y_max) = y_bounds(&data);
    let x_max = series.points.len().saturating_sub(1) as f64;

    let dataset = Dataset::default()
        .name(series.label)
        .marker(symbols::Marker::Braille)
        .style(Style::default().fg(color))
        .graph_type(GraphType::Line)
        .data(&data);

    let x_labels = x_axis_labels(series, palette);

    let chart = Chart::new(vec![dataset])
        .block(block)
        // Legend hidden: the block title already names the series.
        .legend_position(None)
        .x_axis(
            Axis::default()
                .style(palette.muted())
                .bounds([0.0, x_max.max(1.0)])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(palette.muted())
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::styled(to_fixed(y_min, 1), palette.muted()),
                    Span::styled(to_fixed(y_max, 1), palette.muted()),
                ]),
        );

    f.render_widget(chart, area);
}

/// First and last year labels; the middle one too when there is room for it.
fn x_axis_labels<'a>(series: &'a ChartSeries, palette: &Palette) -> Vec<Span<'a>> {
    let labels = &series.labels;
    match labels.len() {
        0 => Vec::new(),
        1 => vec![Span::styled(labels[0].as_str(), palette.muted())],
        2 => labels
            .iter()
            .map(|l| Span::styled(l.as_str(), palette.muted()))
            .collect(),
        n => [0, n / 2, n - 1]
            .into_iter()
            .map(|i| Span::styled(labels[i].as_str(), palette.muted()))
            .collect(),
    }
}

/// Y bounds with 5% padding. A flat series gets a unit band around its value.
fn y_bounds(data: &[(f64, f64)]) -> (f64, f64) {
    let min = data.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
    let max = data.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    let span = max - min;
    if span <= f64::EPSILON {
        return (min - 1.0, max + 1.0);
    }
    let pad = span * 0.05;
    (min - pad, max + pad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::test_app;
    use crate::ui::testing::draw_to_string;
    use crate::app::Panel;
    use crate::worker::{WorkerCommand, WorkerResponse};
    use finscope_core::render::CHART_SPECS;
    use finscope_core::sample::sample_response;

    #[test]
    fn y_bounds_pads_range() {
        let (lo, hi) = y_bounds(&[(0.0, 10.0), (1.0, 20.0)]);
        assert!((lo - 9.5).abs() < 1e-9);
        assert!((hi - 20.5).abs() < 1e-9);
    }

    #[test]
    fn y_bounds_flat_and_empty() {
        assert_eq!(y_bounds(&[(0.0, 3.0), (1.0, 3.0)]), (2.0, 4.0));
        assert_eq!(y_bounds(&[]), (0.0, 1.0));
    }

    #[test]
    fn x_labels_pick_ends_and_middle() {
        let mut series = ChartSeries::build(&CHART_SPECS[0], &[]);
        series.labels = ["FY25", "FY24", "FY23", "FY22", "FY21"].map(String::from).to_vec();
        let labels = x_axis_labels(&series, &Palette::dark());
        let text: Vec<String> = labels.iter().map(|s| s.content.to_string()).collect();
        assert_eq!(text, ["FY25", "FY23", "FY21"]);
    }

    #[test]
    fn all_six_titles_are_drawn() {
        let (mut app, worker_rx, _tx) = test_app();
        app.form.symbol = "tcs".into();
        app.submit_analysis();
        let WorkerCommand::Analyze(ticket) = worker_rx.try_recv().unwrap() else {
            panic!("expected Analyze");
        };
        app.apply_worker_response(WorkerResponse::AnalysisDone {
            ticket,
            result: Ok(sample_response("TCS", "NSE")),
        });
        app.active_panel = Panel::Charts;

        let text = draw_to_string(&app, 160, 60);
        for spec in CHART_SPECS.iter() {
            assert!(text.contains(spec.label), "missing {}", spec.label);
        }
    }
}

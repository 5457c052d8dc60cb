//! Panel 4 — Notes: the analyst notes, wrapped.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;

use crate::app::AppState;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let palette = app.palette();

    if !app.results.visible {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Analyst notes appear here after a successful analysis.",
                palette.muted(),
            )),
        ];
        f.render_widget(Paragraph::new(lines), area);
        return;
    }

    // Notes are shown verbatim, one terminal line per source line.
    let lines: Vec<Line> = app
        .results
        .notes
        .lines()
        .map(|l| Line::from(Span::styled(l, palette.text())))
        .collect();

    let para = Paragraph::new(lines).wrap(Wrap { trim: false });
    f.render_widget(para, area);
}

#[cfg(test)]
mod tests {
    use crate::app::Panel;
    use crate::test_helpers::test_app;
    use crate::ui::testing::draw_to_string;
    use crate::worker::{WorkerCommand, WorkerResponse};
    use finscope_core::sample::sample_response;

    #[test]
    fn notes_text_is_drawn() {
        let (mut app, worker_rx, _tx) = test_app();
        app.form.symbol = "tcs".into();
        app.submit_analysis();
        let WorkerCommand::Analyze(ticket) = worker_rx.try_recv().unwrap() else {
            panic!("expected Analyze");
        };
        let mut response = sample_response("TCS", "NSE");
        response.analyst_notes = "Margins stable.\nWatch receivables.".into();
        app.apply_worker_response(WorkerResponse::AnalysisDone {
            ticket,
            result: Ok(response),
        });
        app.active_panel = Panel::Notes;

        let text = draw_to_string(&app, 100, 20);
        assert!(text.contains("Margins stable."));
        assert!(text.contains("Watch receivables."));
    }
}

//! Bottom status bar — spinner, last status message, theme indicator.

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{AppState, StatusLevel};

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn spinner_frame(tick: u64) -> &'static str {
    SPINNER[(tick % SPINNER.len() as u64) as usize]
}

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let palette = app.palette();

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(10)])
        .split(area);

    let mut spans: Vec<Span> = Vec::new();

    spans.push(Span::styled(
        " 1:Analyze 2:Charts 3:Anomalies 4:Notes 5:Help",
        palette.muted(),
    ));
    spans.push(Span::raw(" | "));

    if app.is_loading() {
        spans.push(Span::styled(
            format!("{} ", spinner_frame(app.tick)),
            palette.accent(),
        ));
    }

    if let Some((msg, level)) = &app.status_message {
        let style = match level {
            StatusLevel::Info => palette.accent(),
            StatusLevel::Warning => palette.warning(),
            StatusLevel::Error => palette.negative(),
        };
        spans.push(Span::styled(msg.as_str(), style));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), chunks[0]);

    let mode = app.theme.mode();
    let indicator = Paragraph::new(Span::styled(format!("[{mode}] "), palette.secondary()))
        .alignment(Alignment::Right);
    f.render_widget(indicator, chunks[1]);
}

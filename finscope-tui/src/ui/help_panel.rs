//! Panel 5 — Help: keyboard shortcuts.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::AppState;
use crate::theme::Palette;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let palette = app.palette();
    let mut lines: Vec<Line> = Vec::new();

    section(&mut lines, &palette, "Global");
    key(&mut lines, &palette, "1-5", "Switch to panel by number");
    key(&mut lines, &palette, "Tab / Shift+Tab", "Cycle panels forward / back");
    key(&mut lines, &palette, "a", "Analyze the current symbol");
    key(&mut lines, &palette, "t", "Toggle light / dark theme (saved)");
    key(&mut lines, &palette, "e", "Open error history");
    key(&mut lines, &palette, "q / Ctrl+C", "Quit");
    lines.push(Line::from(""));

    section(&mut lines, &palette, "Panel 1 — Analyze");
    key(&mut lines, &palette, "s or /", "Edit symbol (Enter submits)");
    key(&mut lines, &palette, "M", "Edit market");
    key(&mut lines, &palette, "m / l / →", "Next market preset");
    key(&mut lines, &palette, "h / ←", "Previous market preset");
    key(&mut lines, &palette, "Enter", "Analyze");
    lines.push(Line::from(""));

    section(&mut lines, &palette, "Overlays");
    key(&mut lines, &palette, "any key", "Dismiss an alert");
    key(&mut lines, &palette, "Esc", "Cancel edit / close error history");
    key(&mut lines, &palette, "j / k", "Scroll error history");
    lines.push(Line::from(""));

    section(&mut lines, &palette, "Panels 2-4");
    key(&mut lines, &palette, "Charts", "Revenue, margin, ROE, D/E, WC days, cash ratio");
    key(&mut lines, &palette, "Anomalies", "Red = high, orange = medium, yellow = low");
    key(&mut lines, &palette, "Notes", "Analyst commentary from the last analysis");

    f.render_widget(Paragraph::new(lines), area);
}

fn section<'a>(lines: &mut Vec<Line<'a>>, palette: &Palette, title: &str) {
    lines.push(Line::from(Span::styled(title.to_string(), palette.accent_bold())));
}

fn key<'a>(lines: &mut Vec<Line<'a>>, palette: &Palette, keys: &str, desc: &str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {:>16}  ", keys), palette.accent()),
        Span::styled(desc.to_string(), palette.muted()),
    ]));
}

//! Top-level UI layout — one panel at a time plus a status bar.

pub mod analyze_panel;
pub mod anomalies_panel;
pub mod charts_panel;
pub mod help_panel;
pub mod notes_panel;
pub mod overlays;
pub mod status_bar;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;

use crate::app::{AppState, Overlay, Panel};

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    let palette = app.palette();

    // Paint the theme background under everything.
    f.render_widget(Block::default().style(palette.base()), f.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(f.area());

    let main_area = chunks[0];
    let status_area = chunks[1];

    draw_panel(f, main_area, app);
    status_bar::render(f, status_area, app);

    match &app.overlay {
        Overlay::Alert(message) => overlays::render_alert(f, main_area, app, message),
        Overlay::Edit(field) => overlays::render_edit(f, main_area, app, *field),
        Overlay::ErrorHistory => overlays::render_error_history(f, main_area, app),
        Overlay::None => {}
    }
}

fn draw_panel(f: &mut Frame, area: Rect, app: &AppState) {
    let palette = app.palette();
    let panel = app.active_panel;

    let mut title = format!(" {} [{}] ", panel.label(), panel.index() + 1);
    if let Some(symbol) = &app.last_symbol {
        if panel != Panel::Help {
            title = format!(" {} [{}] · {} ", panel.label(), panel.index() + 1, symbol);
        }
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.panel_border(true))
        .title(title)
        .title_style(palette.panel_title(true));

    let inner = block.inner(area);
    f.render_widget(block, area);

    match panel {
        Panel::Analyze => analyze_panel::render(f, inner, app),
        Panel::Charts => charts_panel::render(f, inner, app),
        Panel::Anomalies => anomalies_panel::render(f, inner, app),
        Panel::Notes => notes_panel::render(f, inner, app),
        Panel::Help => help_panel::render(f, inner, app),
    }
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
pub(crate) mod testing {
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    use crate::app::AppState;

    /// Draw the app into an in-memory terminal and return its text, row by row.
    pub fn draw_to_string(app: &AppState, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| super::draw(f, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }
}

//! Overlay widgets — alert, field editor, error history.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::{AppState, Field};
use crate::ui::centered_rect;

/// Modal alert. Any key dismisses it.
pub fn render_alert(f: &mut Frame, area: Rect, app: &AppState, message: &str) {
    let palette = app.palette();
    let popup = centered_rect(60, 30, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.negative())
        .title(" Alert ")
        .title_style(palette.negative().add_modifier(Modifier::BOLD))
        .style(palette.base());

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(message, palette.text())),
        Line::from(""),
        Line::from(Span::styled("Press any key to dismiss...", palette.muted())),
    ];

    let para = Paragraph::new(text).block(block).wrap(Wrap { trim: true });
    f.render_widget(para, popup);
}

/// Single-line editor for a form field.
pub fn render_edit(f: &mut Frame, area: Rect, app: &AppState, field: Field) {
    let palette = app.palette();
    let popup = centered_rect(50, 40, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.accent())
        .title(format!(" Edit {} [Enter]ok [Esc]cancel ", field.label()))
        .title_style(palette.accent_bold())
        .style(palette.base());

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let prompt = match field {
        Field::Symbol => "Stock symbol (e.g. TCS, RELIANCE):",
        Field::Market => "Market (e.g. NSE, BSE):",
    };

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(prompt, palette.muted())),
        Line::from(""),
        Line::from(vec![
            Span::styled("> ", palette.accent()),
            Span::styled(app.edit_buffer.as_str(), palette.accent_bold()),
            Span::styled("_", palette.accent()),
        ]),
    ];

    f.render_widget(Paragraph::new(text), inner);
}

/// Error history overlay.
pub fn render_error_history(f: &mut Frame, area: Rect, app: &AppState) {
    let palette = app.palette();
    let popup = centered_rect(80, 70, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.negative())
        .title(format!(
            " Error History ({}) [Esc]close [j/k]scroll ",
            app.error_history.len()
        ))
        .title_style(palette.negative())
        .style(palette.base());

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    if app.error_history.is_empty() {
        let text = Paragraph::new(Span::styled("No errors recorded.", palette.muted()));
        f.render_widget(text, inner);
        return;
    }

    let visible_height = inner.height as usize;
    let start = app.error_scroll.min(app.error_history.len() - 1);

    let mut lines: Vec<Line> = Vec::new();
    for (i, err) in app.error_history.iter().enumerate().skip(start) {
        if lines.len() >= visible_height {
            break;
        }
        let style = if i == app.error_scroll {
            palette.negative().add_modifier(Modifier::BOLD)
        } else {
            palette.muted()
        };

        lines.push(Line::from(vec![
            Span::styled(format!("[{}] ", err.timestamp.format("%H:%M:%S")), palette.muted()),
            Span::styled(format!("[{}] ", err.category.label()), palette.warning()),
            Span::styled(err.message.as_str(), style),
        ]));

        if !err.context.is_empty() {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(err.context.as_str(), palette.muted()),
            ]));
        }
    }

    f.render_widget(Paragraph::new(lines), inner);
}

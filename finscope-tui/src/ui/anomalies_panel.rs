//! Panel 3 — Anomalies: one bordered card per anomaly, coloured by severity.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use finscope_core::render::AnomalyCard;

use crate::app::AppState;
use crate::theme::Palette;

const CARD_HEIGHT: u16 = 6;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let palette = app.palette();
    let cards = &app.results.anomalies;

    if cards.is_empty() {
        let msg = if app.results.visible {
            "No anomalies reported."
        } else {
            "Anomalies appear here after a successful analysis."
        };
        let lines = vec![Line::from(""), Line::from(Span::styled(msg, palette.muted()))];
        f.render_widget(Paragraph::new(lines), area);
        return;
    }

    let fit = (area.height / CARD_HEIGHT).max(1) as usize;
    let shown = cards.len().min(fit);
    let mut constraints = vec![Constraint::Length(CARD_HEIGHT); shown];
    constraints.push(Constraint::Min(0));
    let slots = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (card, slot) in cards.iter().zip(slots.iter()).take(shown) {
        render_card(f, *slot, card, &palette);
    }

    if shown < cards.len() {
        let more = Paragraph::new(Span::styled(
            format!("… {} more", cards.len() - shown),
            palette.muted(),
        ));
        f.render_widget(more, slots[shown]);
    }
}

fn render_card(f: &mut Frame, area: Rect, card: &AnomalyCard, palette: &Palette) {
    let color = palette.severity_color(card.level);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(Line::from(vec![
            Span::raw(" "),
            Span::styled(card.title.as_str(), palette.text().add_modifier(Modifier::BOLD)),
            Span::raw(" "),
        ]))
        .title(
            Line::from(Span::styled(
                format!(" {} ", card.badge),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ))
            .right_aligned(),
        );

    let lines = vec![
        Line::from(Span::styled(card.description.as_str(), palette.text())),
        Line::from(""),
        Line::from(Span::styled(card.recommendation.as_str(), palette.secondary())),
    ];

    let para = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    f.render_widget(para, area);
}

//! Keyboard input dispatch — overlays → global keys → panel-specific handlers.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{AppState, Field, Overlay, Panel};

pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Overlays consume input first.
    match &app.overlay {
        Overlay::Alert(_) => {
            app.overlay = Overlay::None;
            return;
        }
        Overlay::Edit(field) => {
            let field = *field;
            handle_edit_overlay(app, field, key);
            return;
        }
        Overlay::ErrorHistory => {
            handle_error_overlay(app, key);
            return;
        }
        Overlay::None => {}
    }

    // 2. Global keys (always available).
    match key.code {
        KeyCode::Char('q') => {
            app.running = false;
            return;
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false;
            return;
        }
        KeyCode::Char(c @ '1'..='5') => {
            if let Some(panel) = Panel::from_index(c as usize - '1' as usize) {
                app.active_panel = panel;
            }
            return;
        }
        KeyCode::Tab => {
            app.active_panel = app.active_panel.next();
            return;
        }
        KeyCode::BackTab => {
            app.active_panel = app.active_panel.prev();
            return;
        }
        KeyCode::Char('t') => {
            app.toggle_theme();
            return;
        }
        KeyCode::Char('e') => {
            app.overlay = Overlay::ErrorHistory;
            app.error_scroll = 0;
            return;
        }
        KeyCode::Char('a') => {
            app.submit_analysis();
            return;
        }
        _ => {}
    }

    // 3. Panel-specific keys.
    if app.active_panel == Panel::Analyze {
        handle_analyze_key(app, key);
    }
}

fn handle_analyze_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.submit_analysis(),
        KeyCode::Char('s') | KeyCode::Char('/') => open_editor(app, Field::Symbol),
        KeyCode::Char('M') => open_editor(app, Field::Market),
        KeyCode::Char('m') | KeyCode::Right | KeyCode::Char('l') => app.form.cycle_market(1),
        KeyCode::Left | KeyCode::Char('h') => app.form.cycle_market(-1),
        _ => {}
    }
}

fn open_editor(app: &mut AppState, field: Field) {
    app.edit_buffer = app.form.get(field).to_string();
    app.overlay = Overlay::Edit(field);
}

fn handle_edit_overlay(app: &mut AppState, field: Field, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.overlay = Overlay::None;
            app.edit_buffer.clear();
        }
        KeyCode::Enter => {
            let value = std::mem::take(&mut app.edit_buffer);
            app.form.set(field, value);
            app.overlay = Overlay::None;
            // Enter on the symbol field submits, like pressing Analyze.
            if field == Field::Symbol {
                app.submit_analysis();
            }
        }
        KeyCode::Backspace => {
            app.edit_buffer.pop();
        }
        KeyCode::Char(c) => {
            app.edit_buffer.push(c);
        }
        _ => {}
    }
}

fn handle_error_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('e') => {
            app.overlay = Overlay::None;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if app.error_scroll + 1 < app.error_history.len() {
                app.error_scroll += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.error_scroll = app.error_scroll.saturating_sub(1);
        }
        _ => {}
    }
}

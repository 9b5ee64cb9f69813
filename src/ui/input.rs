use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use crate::app::{App, AppState};

/// Handle one key event. Returns `true` when the app should quit.
pub fn handle_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    // The help overlay swallows everything except closing it
    if matches!(app.state, AppState::ShowingHelp) {
        match key.code {
            KeyCode::Char('q') => return Ok(true),
            KeyCode::Esc | KeyCode::Char('?') => app.state = AppState::Normal,
            _ => {}
        }
        return Ok(false);
    }

    match key.code {
        KeyCode::Char('q') => return Ok(true),
        KeyCode::Char('?') => app.state = AppState::ShowingHelp,

        KeyCode::Char('l') => app.login(),
        KeyCode::Char('s') => app.sign_out(),
        KeyCode::Char('f') | KeyCode::Char('r') => app.fetch_summaries(),

        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),

        _ => {}
    }

    Ok(false)
}

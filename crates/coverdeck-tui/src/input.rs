use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Input action that can be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    ScrollLeft,
    ScrollRight,
    JumpFirst,
    JumpLast,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Left | KeyCode::Char('h') => Action::ScrollLeft,
        KeyCode::Right | KeyCode::Char('l') => Action::ScrollRight,
        KeyCode::Home | KeyCode::Char('g') => Action::JumpFirst,
        KeyCode::End | KeyCode::Char('G') => Action::JumpLast,
        _ => Action::None,
    }
}

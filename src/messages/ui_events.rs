//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // Panel navigation
    NextPanel,
    PrevPanel,

    // Input editing
    CharInput(char),
    Backspace,
    Newline,
    ClearInput,

    // Request actions
    SendRequest,
    CycleMethod,
    SaveToCollection,

    // Environments
    NextEnvironment,

    // Response views
    SelectResponseTab(ResponseTab),
    NextResponseTab,
    ScrollUp,
    ScrollDown,

    // History
    HistoryUp,
    HistoryDown,
    ReplayHistory,

    // System
    Quit,
}

/// Focusable panel in the UI (needed for context-aware event mapping)
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Panel {
    #[default]
    Url,
    Headers,
    Body,
    Response,
    History,
}

impl Panel {
    pub fn next(&self) -> Panel {
        match self {
            Panel::Url => Panel::Headers,
            Panel::Headers => Panel::Body,
            Panel::Body => Panel::Response,
            Panel::Response => Panel::History,
            Panel::History => Panel::Url,
        }
    }

    pub fn prev(&self) -> Panel {
        match self {
            Panel::Url => Panel::History,
            Panel::Headers => Panel::Url,
            Panel::Body => Panel::Headers,
            Panel::Response => Panel::Body,
            Panel::History => Panel::Response,
        }
    }

    /// Panels that hold editable text
    pub fn is_editable(&self) -> bool {
        matches!(self, Panel::Url | Panel::Headers | Panel::Body)
    }
}

/// The three response views
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ResponseTab {
    #[default]
    Raw,
    Json,
    Headers,
}

impl ResponseTab {
    pub const ALL: [ResponseTab; 3] = [ResponseTab::Raw, ResponseTab::Json, ResponseTab::Headers];

    pub fn title(&self) -> &'static str {
        match self {
            ResponseTab::Raw => "Raw",
            ResponseTab::Json => "JSON",
            ResponseTab::Headers => "Headers",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            ResponseTab::Raw => 0,
            ResponseTab::Json => 1,
            ResponseTab::Headers => 2,
        }
    }

    pub fn next(&self) -> ResponseTab {
        match self {
            ResponseTab::Raw => ResponseTab::Json,
            ResponseTab::Json => ResponseTab::Headers,
            ResponseTab::Headers => ResponseTab::Raw,
        }
    }
}

/// Map a key press to a UI event given the focused panel
pub fn key_to_ui_event(key: KeyEvent, panel: Panel) -> Option<UiEvent> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => Some(UiEvent::Quit),
            KeyCode::Char('s') => Some(UiEvent::SendRequest),
            KeyCode::Char('n') => Some(UiEvent::CycleMethod),
            KeyCode::Char('e') => Some(UiEvent::NextEnvironment),
            KeyCode::Char('w') => Some(UiEvent::SaveToCollection),
            KeyCode::Char('r') => Some(UiEvent::NextResponseTab),
            KeyCode::Char('u') if panel.is_editable() => Some(UiEvent::ClearInput),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Tab => return Some(UiEvent::NextPanel),
        KeyCode::BackTab => return Some(UiEvent::PrevPanel),
        KeyCode::F(5) => return Some(UiEvent::SendRequest),
        _ => {}
    }

    match panel {
        Panel::Url => match key.code {
            KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
            KeyCode::Backspace => Some(UiEvent::Backspace),
            KeyCode::Enter => Some(UiEvent::SendRequest),
            _ => None,
        },
        Panel::Headers | Panel::Body => match key.code {
            KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
            KeyCode::Backspace => Some(UiEvent::Backspace),
            KeyCode::Enter => Some(UiEvent::Newline),
            _ => None,
        },
        Panel::Response => match key.code {
            KeyCode::Char('1') => Some(UiEvent::SelectResponseTab(ResponseTab::Raw)),
            KeyCode::Char('2') => Some(UiEvent::SelectResponseTab(ResponseTab::Json)),
            KeyCode::Char('3') => Some(UiEvent::SelectResponseTab(ResponseTab::Headers)),
            KeyCode::Right | KeyCode::Left => Some(UiEvent::NextResponseTab),
            KeyCode::Up | KeyCode::Char('k') => Some(UiEvent::ScrollUp),
            KeyCode::Down | KeyCode::Char('j') => Some(UiEvent::ScrollDown),
            KeyCode::Char('q') => Some(UiEvent::Quit),
            _ => None,
        },
        Panel::History => match key.code {
            KeyCode::Up | KeyCode::Char('k') => Some(UiEvent::HistoryUp),
            KeyCode::Down | KeyCode::Char('j') => Some(UiEvent::HistoryDown),
            KeyCode::Enter => Some(UiEvent::ReplayHistory),
            KeyCode::Char('q') => Some(UiEvent::Quit),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_typing_goes_to_editable_panels() {
        assert_eq!(key_to_ui_event(key(KeyCode::Char('q')), Panel::Url), Some(UiEvent::CharInput('q')));
        assert_eq!(key_to_ui_event(key(KeyCode::Enter), Panel::Body), Some(UiEvent::Newline));
        assert_eq!(key_to_ui_event(key(KeyCode::Enter), Panel::Url), Some(UiEvent::SendRequest));
    }

    #[test]
    fn test_control_shortcuts_work_everywhere() {
        let send = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        for panel in [Panel::Url, Panel::Body, Panel::History] {
            assert_eq!(key_to_ui_event(send, panel), Some(UiEvent::SendRequest));
        }
    }

    #[test]
    fn test_history_keys() {
        assert_eq!(key_to_ui_event(key(KeyCode::Enter), Panel::History), Some(UiEvent::ReplayHistory));
        assert_eq!(key_to_ui_event(key(KeyCode::Down), Panel::History), Some(UiEvent::HistoryDown));
    }

    #[test]
    fn test_panel_cycle_round_trips() {
        let mut panel = Panel::Url;
        for _ in 0..5 {
            panel = panel.next();
        }
        assert_eq!(panel, Panel::Url);
        assert_eq!(Panel::Url.prev().next(), Panel::Url);
    }
}

//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // Focus navigation
    NextField,
    PrevField,

    // Area editing
    CharInput(char),
    Backspace,

    // Selectors (bedrooms, bathrooms, locality)
    SelectPrev,
    SelectNext,
    SelectValue(u8),
    SelectLocality(String),

    // Actions
    Submit,
    Retry,

    // Popups
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Focusable form control (needed for context-aware event mapping)
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Field {
    #[default]
    Area,
    Bedrooms,
    Bathrooms,
    Locality,
    Submit,
}

impl Field {
    pub fn next(&self) -> Field {
        match self {
            Field::Area => Field::Bedrooms,
            Field::Bedrooms => Field::Bathrooms,
            Field::Bathrooms => Field::Locality,
            Field::Locality => Field::Submit,
            Field::Submit => Field::Area,
        }
    }

    pub fn prev(&self) -> Field {
        match self {
            Field::Area => Field::Submit,
            Field::Bedrooms => Field::Area,
            Field::Bathrooms => Field::Bedrooms,
            Field::Locality => Field::Bathrooms,
            Field::Submit => Field::Locality,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Field::Area => "Area (Square Feet)",
            Field::Bedrooms => "BHK (Bedrooms)",
            Field::Bathrooms => "Bathrooms",
            Field::Locality => "Location",
            Field::Submit => "Estimate",
        }
    }
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(key: KeyEvent, focus: Field, show_help: bool) -> Option<UiEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(UiEvent::Quit),
            _ => None,
        };
    }

    if show_help {
        return Some(UiEvent::CloseHelp);
    }

    match key.code {
        KeyCode::Tab | KeyCode::Down => Some(UiEvent::NextField),
        KeyCode::BackTab | KeyCode::Up => Some(UiEvent::PrevField),
        KeyCode::Enter => Some(UiEvent::Submit),
        KeyCode::Left => Some(UiEvent::SelectPrev),
        KeyCode::Right => Some(UiEvent::SelectNext),
        KeyCode::Backspace if focus == Field::Area => Some(UiEvent::Backspace),
        KeyCode::Char(c) if focus == Field::Area && (c.is_ascii_digit() || c == '.') => {
            Some(UiEvent::CharInput(c))
        }
        KeyCode::Char(c @ '1'..='5') if matches!(focus, Field::Bedrooms | Field::Bathrooms) => {
            c.to_digit(10).map(|d| UiEvent::SelectValue(d as u8))
        }
        KeyCode::Char('s') => Some(UiEvent::Submit),
        KeyCode::Char('r') => Some(UiEvent::Retry),
        KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
        KeyCode::Char('q') | KeyCode::Esc => Some(UiEvent::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_digits_depend_on_focus() {
        assert_eq!(
            key_to_ui_event(press(KeyCode::Char('3')), Field::Area, false),
            Some(UiEvent::CharInput('3'))
        );
        assert_eq!(
            key_to_ui_event(press(KeyCode::Char('3')), Field::Bedrooms, false),
            Some(UiEvent::SelectValue(3))
        );
        assert_eq!(key_to_ui_event(press(KeyCode::Char('7')), Field::Bathrooms, false), None);
        assert_eq!(key_to_ui_event(press(KeyCode::Char('3')), Field::Locality, false), None);
    }

    #[test]
    fn test_help_swallows_keys() {
        assert_eq!(
            key_to_ui_event(press(KeyCode::Char('s')), Field::Submit, true),
            Some(UiEvent::CloseHelp)
        );
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(key_to_ui_event(ctrl_c, Field::Area, true), Some(UiEvent::Quit));
    }

    #[test]
    fn test_field_cycle_wraps() {
        let mut field = Field::Area;
        for _ in 0..5 {
            field = field.next();
        }
        assert_eq!(field, Field::Area);
        assert_eq!(Field::Area.prev(), Field::Submit);
    }
}

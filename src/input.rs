//! Key naming.
//!
//! Key presses are re-emitted under synthesized names of the form
//! `[ctrl+][alt+][shift+]<key>`, e.g. `up`, `a`, `shift+a`, `ctrl+alt+delete`.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Synthesized event name for a key press, or `None` for keys without one.
pub fn key_name(key: &KeyEvent) -> Option<String> {
    let base = match key.code {
        KeyCode::Char(' ') => "space".to_string(),
        KeyCode::Char(c) => c.to_lowercase().to_string(),
        KeyCode::Enter => "return".to_string(),
        KeyCode::Tab | KeyCode::BackTab => "tab".to_string(),
        KeyCode::Backspace => "backspace".to_string(),
        KeyCode::Esc => "escape".to_string(),
        KeyCode::Up => "up".to_string(),
        KeyCode::Down => "down".to_string(),
        KeyCode::Left => "left".to_string(),
        KeyCode::Right => "right".to_string(),
        KeyCode::Home => "home".to_string(),
        KeyCode::End => "end".to_string(),
        KeyCode::PageUp => "pageup".to_string(),
        KeyCode::PageDown => "pagedown".to_string(),
        KeyCode::Insert => "insert".to_string(),
        KeyCode::Delete => "delete".to_string(),
        KeyCode::F(n) => format!("f{n}"),
        _ => return None,
    };

    let shift = key.modifiers.contains(KeyModifiers::SHIFT)
        || key.code == KeyCode::BackTab
        || matches!(key.code, KeyCode::Char(c) if c.is_uppercase());

    let mut name = String::new();
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        name.push_str("ctrl+");
    }
    if key.modifiers.contains(KeyModifiers::ALT) {
        name.push_str("alt+");
    }
    if shift {
        name.push_str("shift+");
    }
    name.push_str(&base);
    Some(name)
}

/// Ctrl-C with no other modifier.
pub fn is_interrupt(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
        && key.modifiers.contains(KeyModifiers::CONTROL)
        && !key.modifiers.intersects(KeyModifiers::ALT | KeyModifiers::SHIFT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(code: KeyCode, modifiers: KeyModifiers) -> Option<String> {
        key_name(&KeyEvent::new(code, modifiers))
    }

    #[test]
    fn plain_keys() {
        assert_eq!(name(KeyCode::Char('w'), KeyModifiers::NONE).as_deref(), Some("w"));
        assert_eq!(name(KeyCode::Up, KeyModifiers::NONE).as_deref(), Some("up"));
        assert_eq!(name(KeyCode::Char(' '), KeyModifiers::NONE).as_deref(), Some("space"));
        assert_eq!(name(KeyCode::Enter, KeyModifiers::NONE).as_deref(), Some("return"));
        assert_eq!(name(KeyCode::F(5), KeyModifiers::NONE).as_deref(), Some("f5"));
        assert_eq!(name(KeyCode::Null, KeyModifiers::NONE), None);
    }

    #[test]
    fn modifiers_prefix_in_fixed_order() {
        assert_eq!(name(KeyCode::Char('A'), KeyModifiers::SHIFT).as_deref(), Some("shift+a"));
        assert_eq!(name(KeyCode::Char('A'), KeyModifiers::NONE).as_deref(), Some("shift+a"));
        assert_eq!(
            name(KeyCode::Left, KeyModifiers::SHIFT | KeyModifiers::CONTROL | KeyModifiers::ALT)
                .as_deref(),
            Some("ctrl+alt+shift+left")
        );
    }

    #[test]
    fn interrupt_is_bare_ctrl_c() {
        assert!(is_interrupt(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!is_interrupt(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE)));
        assert!(!is_interrupt(&KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL | KeyModifiers::ALT
        )));
    }
}

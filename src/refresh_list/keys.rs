//! Key bindings for the refresh list.
//!
//! - **Cursor Movement**: `↑/k` (up), `↓/j` (down)
//! - **Page Movement**: `pgup/b` (page up), `pgdn/f/space` (page down)
//! - **Jump**: `g/home` (top), `G/end` (bottom)
//! - **Refresh**: `r`
//! - **Item Actions**: `enter` (select), `m` (long press)
//!
//! Every movement key counts as one scroll gesture, so reaching the end of
//! the list with `↓`, `pgdn` or `G` can start a load-more.
//!
//! ```rust
//! use bubbletea_refresh_list::refresh_list::RefreshListKeyMap;
//! use bubbletea_refresh_list::key::KeyMap;
//!
//! let keymap = RefreshListKeyMap::default();
//! assert_eq!(keymap.short_help().len(), 4);
//! ```

use crate::key;
use crossterm::event::KeyCode;

/// Key bindings for navigation, refresh and item actions.
#[derive(Debug, Clone)]
pub struct RefreshListKeyMap {
    /// Move the cursor up one row.
    pub cursor_up: key::Binding,
    /// Move the cursor down one row.
    pub cursor_down: key::Binding,
    /// Move up one page.
    pub page_up: key::Binding,
    /// Move down one page.
    pub page_down: key::Binding,
    /// Jump to the first row.
    pub go_to_start: key::Binding,
    /// Jump to the last row.
    pub go_to_end: key::Binding,
    /// Start a refresh, same as pulling down at the top.
    pub refresh: key::Binding,
    /// Tap the row under the cursor.
    pub select: key::Binding,
    /// Long-press the row under the cursor.
    pub long_press: key::Binding,
}

impl Default for RefreshListKeyMap {
    fn default() -> Self {
        Self {
            cursor_up: key::Binding::new(vec![KeyCode::Up, KeyCode::Char('k')])
                .with_help("↑/k", "up"),
            cursor_down: key::Binding::new(vec![KeyCode::Down, KeyCode::Char('j')])
                .with_help("↓/j", "down"),
            page_up: key::Binding::new(vec![KeyCode::PageUp, KeyCode::Char('b')])
                .with_help("pgup/b", "page up"),
            page_down: key::Binding::new(vec![
                KeyCode::PageDown,
                KeyCode::Char('f'),
                KeyCode::Char(' '),
            ])
            .with_help("pgdn/f", "page down"),
            go_to_start: key::Binding::new(vec![KeyCode::Home, KeyCode::Char('g')])
                .with_help("g/home", "go to start"),
            go_to_end: key::Binding::new(vec![KeyCode::End, KeyCode::Char('G')])
                .with_help("G/end", "go to end"),
            refresh: key::Binding::new(vec![KeyCode::Char('r')]).with_help("r", "refresh"),
            select: key::Binding::new(vec![KeyCode::Enter]).with_help("enter", "select"),
            long_press: key::Binding::new(vec![KeyCode::Char('m')]).with_help("m", "more"),
        }
    }
}

impl key::KeyMap for RefreshListKeyMap {
    fn short_help(&self) -> Vec<&key::Binding> {
        vec![&self.cursor_up, &self.cursor_down, &self.refresh, &self.select]
    }

    fn full_help(&self) -> Vec<Vec<&key::Binding>> {
        vec![
            vec![
                &self.cursor_up,
                &self.cursor_down,
                &self.page_up,
                &self.page_down,
                &self.go_to_start,
                &self.go_to_end,
            ],
            vec![&self.refresh, &self.select, &self.long_press],
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::KeyMap;
    use bubbletea_rs::KeyMsg;
    use crossterm::event::KeyModifiers;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyMsg {
        KeyMsg {
            key: code,
            modifiers,
        }
    }

    #[test]
    fn test_default_bindings() {
        let km = RefreshListKeyMap::default();
        assert!(km.cursor_down.matches(&press(KeyCode::Char('j'), KeyModifiers::NONE)));
        assert!(km.go_to_end.matches(&press(KeyCode::Char('G'), KeyModifiers::SHIFT)));
        assert!(km.refresh.matches(&press(KeyCode::Char('r'), KeyModifiers::NONE)));
        assert!(!km.refresh.matches(&press(KeyCode::Char('r'), KeyModifiers::CONTROL)));
        assert_eq!(km.full_help().len(), 2);
    }
}

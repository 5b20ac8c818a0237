//! Type definitions for target selection and menu state.
//!
//! This module defines the values passed between the pieces of the menu:
//! decoded keys, the navigation state, the result of a single key event and
//! the final selection handed back to the caller.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use mk_core::makefile::Target;

/// Number of target rows shown at once.
pub const MAX_VISIBLE_ROWS: usize = 15;

/// A key press, as far as the menu cares.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    /// Arrow up
    Up,
    /// Arrow down
    Down,
    Enter,
    Escape,
    /// Backspace or delete
    Backspace,
    /// Ctrl-C
    Interrupt,
    Char(char),
}

impl Key {
    /// Maps a crossterm key event, ignoring releases and keys the menu has
    /// no use for.
    #[must_use]
    pub fn from_key_event(key_event: KeyEvent) -> Option<Self> {
        if key_event.kind == KeyEventKind::Release {
            return None;
        }

        if key_event.modifiers.contains(KeyModifiers::CONTROL) {
            return match key_event.code {
                KeyCode::Char('c' | 'C') => Some(Key::Interrupt),
                _ => None,
            };
        }

        match key_event.code {
            KeyCode::Up => Some(Key::Up),
            KeyCode::Down => Some(Key::Down),
            KeyCode::Enter => Some(Key::Enter),
            KeyCode::Esc => Some(Key::Escape),
            KeyCode::Backspace | KeyCode::Delete => Some(Key::Backspace),
            KeyCode::Char(c) => Some(Key::Char(c)),
            _ => None,
        }
    }
}

/// Direction to move the selection in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CycleDirection {
    Up,
    Down,
}

/// Complete navigation state of the menu.
///
/// Invariants, for a visible list of `n` targets:
/// - `selected_index < n` when `n > 0`, else `selected_index == 0`
/// - `scroll_offset <= selected_index < scroll_offset + MAX_VISIBLE_ROWS`
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct UiState {
    /// Cursor position within the visible targets
    pub selected_index: usize,
    /// First visible row
    pub scroll_offset: usize,
    /// Whether the user is currently typing a filter
    pub is_filtering: bool,
    /// Current filter text, kept after the filter is committed
    pub filter_text: String,
}

impl UiState {
    /// Moves the cursor back to the top of the list.
    #[must_use]
    pub fn reset_position(self) -> Self {
        Self {
            selected_index: 0,
            scroll_offset: 0,
            ..self
        }
    }

    /// Re-establishes the invariants for a visible list of `visible_count` targets.
    #[must_use]
    pub fn clamp_to(mut self, visible_count: usize) -> Self {
        self.selected_index = self.selected_index.min(visible_count.saturating_sub(1));

        if self.scroll_offset > self.selected_index {
            self.scroll_offset = self.selected_index;
        } else if self.selected_index >= self.scroll_offset + MAX_VISIBLE_ROWS {
            self.scroll_offset = self.selected_index + 1 - MAX_VISIBLE_ROWS;
        }

        self
    }
}

/// How a menu session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuOutcome {
    /// Index into the visible targets
    Confirmed(usize),
    Cancelled,
}

/// Result of handling one key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Transition {
    Continue(UiState),
    Finish(MenuOutcome),
}

/// The single value produced by a menu session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectionResult {
    pub target: Option<Target>,
    pub confirmed: bool,
}

impl SelectionResult {
    #[must_use]
    pub fn confirmed(target: Target) -> Self {
        Self {
            target: Some(target),
            confirmed: true,
        }
    }

    #[must_use]
    pub fn cancelled() -> Self {
        Self {
            target: None,
            confirmed: false,
        }
    }

    /// The chosen target, if the user confirmed one.
    #[must_use]
    pub fn into_target(self) -> Option<Target> {
        self.target.filter(|_| self.confirmed)
    }
}

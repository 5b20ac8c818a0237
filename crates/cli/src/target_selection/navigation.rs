//! Key handling for the target menu.
//!
//! Every transition takes the previous [`UiState`] and one [`Key`] and
//! produces either the next state or the end of the session. The visible list
//! itself is not stored here; callers pass its length, recomputed from the
//! current filter before each key.

use mk_core::config::{KeyBindingProfile, KeyScheme};

use super::types::CycleDirection::{Down, Up};
use super::types::{CycleDirection, Key, MenuOutcome, Transition, UiState, MAX_VISIBLE_ROWS};

/// Key that switches from browsing to filtering.
pub const FILTER_KEY: char = '/';

/// Handles one key event.
#[must_use]
pub fn handle_key(
    ui_state: UiState,
    key: Key,
    visible_count: usize,
    profile: &KeyBindingProfile,
) -> Transition {
    if key == Key::Interrupt {
        return Transition::Finish(MenuOutcome::Cancelled);
    }

    if ui_state.is_filtering {
        return Transition::Continue(handle_filter_key(ui_state, key));
    }

    match key {
        Key::Char(c) if is_quit_key(c, profile) => Transition::Finish(MenuOutcome::Cancelled),
        Key::Char(FILTER_KEY) => Transition::Continue(
            UiState {
                is_filtering: true,
                filter_text: String::new(),
                ..ui_state
            }
            .reset_position(),
        ),
        Key::Enter => {
            if ui_state.selected_index < visible_count {
                Transition::Finish(MenuOutcome::Confirmed(ui_state.selected_index))
            } else {
                Transition::Continue(ui_state)
            }
        }
        Key::Up => Transition::Continue(move_selected_index(ui_state, visible_count, Up)),
        Key::Down => Transition::Continue(move_selected_index(ui_state, visible_count, Down)),
        Key::Char(c) => match bound_direction(c, profile) {
            Some(direction) => {
                Transition::Continue(move_selected_index(ui_state, visible_count, direction))
            }
            None => Transition::Continue(ui_state),
        },
        _ => Transition::Continue(ui_state),
    }
}

/// Edits the filter text. Anything that is not an edit leaves the state as is.
fn handle_filter_key(mut ui_state: UiState, key: Key) -> UiState {
    match key {
        Key::Escape => {
            ui_state.is_filtering = false;
            ui_state.filter_text.clear();
        }
        Key::Enter => ui_state.is_filtering = false,
        Key::Backspace => {
            ui_state.filter_text.pop();
        }
        Key::Char(c) if c.is_ascii() && !c.is_ascii_control() => ui_state.filter_text.push(c),
        _ => return ui_state,
    }

    ui_state.reset_position()
}

/// Moves the cursor one row, stopping at either end of the list.
#[must_use]
pub fn move_selected_index(
    mut ui_state: UiState,
    visible_count: usize,
    direction: CycleDirection,
) -> UiState {
    match direction {
        Up => {
            if ui_state.selected_index > 0 {
                ui_state.selected_index -= 1;
                if ui_state.selected_index < ui_state.scroll_offset {
                    ui_state.scroll_offset = ui_state.selected_index;
                }
            }
        }
        Down => {
            if ui_state.selected_index + 1 < visible_count {
                ui_state.selected_index += 1;
                if ui_state.selected_index >= ui_state.scroll_offset + MAX_VISIBLE_ROWS {
                    ui_state.scroll_offset = ui_state.selected_index + 1 - MAX_VISIBLE_ROWS;
                }
            }
        }
    }

    ui_state
}

/// Whether a bare `q` quits under this profile.
///
/// A custom binding on `q` takes precedence, leaving Ctrl-C as the only way out.
#[must_use]
pub fn quit_key_enabled(profile: &KeyBindingProfile) -> bool {
    !(profile.scheme == KeyScheme::Custom
        && (profile.up_key.eq_ignore_ascii_case(&b'q')
            || profile.down_key.eq_ignore_ascii_case(&b'q')))
}

fn is_quit_key(c: char, profile: &KeyBindingProfile) -> bool {
    matches!(c, 'q' | 'Q') && quit_key_enabled(profile)
}

/// Resolves a character against the scheme's single-key bindings.
fn bound_direction(c: char, profile: &KeyBindingProfile) -> Option<CycleDirection> {
    match profile.scheme {
        KeyScheme::Arrows => None,
        KeyScheme::Wasd => match c {
            'w' | 'W' => Some(Up),
            's' | 'S' => Some(Down),
            _ => None,
        },
        KeyScheme::Custom => {
            let byte = u8::try_from(c).ok()?;
            if byte.eq_ignore_ascii_case(&profile.up_key) {
                Some(Up)
            } else if byte.eq_ignore_ascii_case(&profile.down_key) {
                Some(Down)
            } else {
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target_selection::filter::filter_targets;
    use mk_core::makefile::Target;

    fn press(ui_state: UiState, key: Key, visible_count: usize, profile: &KeyBindingProfile) -> UiState {
        match handle_key(ui_state, key, visible_count, profile) {
            Transition::Continue(next) => next,
            Transition::Finish(outcome) => panic!("unexpected end of session: {outcome:?}"),
        }
    }

    fn assert_invariants(ui_state: &UiState, visible_count: usize) {
        if visible_count == 0 {
            assert_eq!(ui_state.selected_index, 0);
        } else {
            assert!(ui_state.selected_index < visible_count);
        }
        assert!(ui_state.scroll_offset <= ui_state.selected_index);
        assert!(ui_state.selected_index < ui_state.scroll_offset + MAX_VISIBLE_ROWS);
    }

    /// Mirrors the menu loop: recompute the visible list, clamp, handle the key.
    fn type_keys(targets: &[Target], keys: &[Key], profile: &KeyBindingProfile) -> UiState {
        keys.iter().fold(UiState::default(), |ui_state, key| {
            let visible_count = filter_targets(targets, &ui_state.filter_text).len();
            let ui_state = ui_state.clamp_to(visible_count);
            press(ui_state, *key, visible_count, profile)
        })
    }

    fn three_targets() -> Vec<Target> {
        vec![
            Target::new("build", "Build it"),
            Target::new("test", "Run tests"),
            Target::new("lint", ""),
        ]
    }

    #[test]
    fn test_down_stops_at_last_target() {
        let profile = KeyBindingProfile::arrows();
        let keys = vec![Key::Down; 60];
        let ui_state = type_keys(&three_targets(), &keys, &profile);
        assert_eq!(ui_state.selected_index, 2);
        assert_eq!(ui_state.scroll_offset, 0);
    }

    #[test]
    fn test_up_stops_at_first_target() {
        let profile = KeyBindingProfile::arrows();
        let ui_state = type_keys(&three_targets(), &[Key::Down, Key::Up, Key::Up], &profile);
        assert_eq!(ui_state.selected_index, 0);
    }

    #[test]
    fn test_scroll_follows_cursor_over_long_list() {
        let profile = KeyBindingProfile::arrows();
        let count = 40;
        let mut ui_state = UiState::default();

        // Deterministic walk that hits both ends of the list
        let pattern = [Key::Down; 7]
            .into_iter()
            .chain([Key::Up; 3])
            .cycle()
            .take(200)
            .chain([Key::Up; 60]);

        for key in pattern {
            ui_state = press(ui_state, key, count, &profile);
            assert_invariants(&ui_state, count);
        }
        assert_eq!(ui_state.selected_index, 0);
        assert_eq!(ui_state.scroll_offset, 0);

        for _ in 0..count * 2 {
            ui_state = press(ui_state, Key::Down, count, &profile);
            assert_invariants(&ui_state, count);
        }
        assert_eq!(ui_state.selected_index, count - 1);
        assert_eq!(ui_state.scroll_offset, count - MAX_VISIBLE_ROWS);
    }

    #[test]
    fn test_navigation_on_empty_list() {
        let profile = KeyBindingProfile::wasd();
        let mut ui_state = UiState::default();
        for key in [Key::Down, Key::Up, Key::Char('s'), Key::Char('w')] {
            ui_state = press(ui_state, key, 0, &profile);
            assert_invariants(&ui_state, 0);
        }
        assert_eq!(
            handle_key(ui_state.clone(), Key::Enter, 0, &profile),
            Transition::Continue(ui_state)
        );
    }

    #[test]
    fn test_filter_then_commit() {
        let profile = KeyBindingProfile::arrows();
        let targets = three_targets();
        let keys = [
            Key::Char('/'),
            Key::Char('b'),
            Key::Char('u'),
            Key::Char('i'),
            Key::Enter,
        ];

        let ui_state = type_keys(&targets, &keys, &profile);
        assert!(!ui_state.is_filtering);
        assert_eq!(ui_state.filter_text, "bui");
        assert_eq!(ui_state.selected_index, 0);

        let visible = filter_targets(&targets, &ui_state.filter_text);
        assert_eq!(visible, vec![&targets[0]]);
    }

    #[test]
    fn test_escape_clears_filter() {
        let profile = KeyBindingProfile::arrows();
        let keys = [Key::Char('/'), Key::Char('t'), Key::Escape];
        let ui_state = type_keys(&three_targets(), &keys, &profile);
        assert!(!ui_state.is_filtering);
        assert!(ui_state.filter_text.is_empty());
    }

    #[test]
    fn test_backspace_and_literal_characters_while_filtering() {
        let profile = KeyBindingProfile::arrows();
        let keys = [
            Key::Char('/'),
            Key::Char('a'),
            Key::Char('/'),
            Key::Char('q'),
            Key::Char(' '),
            Key::Backspace,
        ];
        let ui_state = type_keys(&three_targets(), &keys, &profile);
        assert!(ui_state.is_filtering);
        assert_eq!(ui_state.filter_text, "a/q");
    }

    #[test]
    fn test_unlisted_keys_are_no_ops_while_filtering() {
        let profile = KeyBindingProfile::arrows();
        let ui_state = UiState {
            selected_index: 1,
            is_filtering: true,
            filter_text: "t".to_string(),
            ..UiState::default()
        };

        for key in [Key::Up, Key::Down, Key::Char('\u{7}'), Key::Char('é')] {
            assert_eq!(
                handle_key(ui_state.clone(), key, 2, &profile),
                Transition::Continue(ui_state.clone())
            );
        }
    }

    #[test]
    fn test_filter_edit_resets_cursor() {
        let profile = KeyBindingProfile::arrows();
        let ui_state = UiState {
            selected_index: 2,
            is_filtering: true,
            ..UiState::default()
        };
        let next = press(ui_state, Key::Char('x'), 3, &profile);
        assert_eq!(next.selected_index, 0);
        assert_eq!(next.scroll_offset, 0);
    }

    #[test]
    fn test_entering_filter_mode_clears_previous_query() {
        let profile = KeyBindingProfile::arrows();
        let ui_state = UiState {
            selected_index: 1,
            filter_text: "old".to_string(),
            ..UiState::default()
        };
        let next = press(ui_state, Key::Char('/'), 2, &profile);
        assert!(next.is_filtering);
        assert!(next.filter_text.is_empty());
        assert_eq!(next.selected_index, 0);
    }

    #[test]
    fn test_enter_confirms_cursor_row() {
        let profile = KeyBindingProfile::arrows();
        let ui_state = press(UiState::default(), Key::Down, 3, &profile);
        assert_eq!(
            handle_key(ui_state, Key::Enter, 3, &profile),
            Transition::Finish(MenuOutcome::Confirmed(1))
        );
    }

    #[test]
    fn test_arrows_scheme_ignores_letters() {
        let profile = KeyBindingProfile::arrows();
        let ui_state = type_keys(&three_targets(), &[Key::Char('s'), Key::Char('j')], &profile);
        assert_eq!(ui_state.selected_index, 0);
    }

    #[test]
    fn test_wasd_scheme() {
        let profile = KeyBindingProfile::wasd();
        let targets = three_targets();

        let ui_state = type_keys(&targets, &[Key::Char('s'), Key::Char('S')], &profile);
        assert_eq!(ui_state.selected_index, 2);

        let ui_state = type_keys(&targets, &[Key::Char('s'), Key::Char('s'), Key::Char('w')], &profile);
        assert_eq!(ui_state.selected_index, 1);

        // Arrows still work
        let ui_state = type_keys(&targets, &[Key::Down], &profile);
        assert_eq!(ui_state.selected_index, 1);
    }

    #[test]
    fn test_custom_scheme_matches_letters_case_insensitively() {
        let profile = KeyBindingProfile::custom(b'z', b's');
        let targets = three_targets();

        let ui_state = type_keys(&targets, &[Key::Char('s'), Key::Char('S')], &profile);
        assert_eq!(ui_state.selected_index, 2);

        let ui_state = type_keys(&targets, &[Key::Char('S'), Key::Char('z')], &profile);
        assert_eq!(ui_state.selected_index, 0);

        let ui_state = type_keys(&targets, &[Key::Char('s'), Key::Char('Z')], &profile);
        assert_eq!(ui_state.selected_index, 0);
    }

    #[test]
    fn test_custom_scheme_exact_match_for_symbols() {
        let profile = KeyBindingProfile::custom(b'[', b']');
        let targets = three_targets();

        let ui_state = type_keys(&targets, &[Key::Char(']'), Key::Char(']')], &profile);
        assert_eq!(ui_state.selected_index, 2);

        let ui_state = type_keys(&targets, &[Key::Char(']'), Key::Char('{')], &profile);
        assert_eq!(ui_state.selected_index, 1);
    }

    #[test]
    fn test_q_quits_by_default() {
        for profile in [
            KeyBindingProfile::arrows(),
            KeyBindingProfile::wasd(),
            KeyBindingProfile::custom(b'z', b's'),
        ] {
            for c in ['q', 'Q'] {
                assert_eq!(
                    handle_key(UiState::default(), Key::Char(c), 3, &profile),
                    Transition::Finish(MenuOutcome::Cancelled)
                );
            }
        }
    }

    #[test]
    fn test_q_bound_to_navigation_does_not_quit() {
        let profile = KeyBindingProfile::custom(b'Q', b'a');
        assert!(!quit_key_enabled(&profile));

        let ui_state = type_keys(&three_targets(), &[Key::Char('a'), Key::Char('q')], &profile);
        assert_eq!(ui_state.selected_index, 0);

        assert_eq!(
            handle_key(UiState::default(), Key::Interrupt, 3, &profile),
            Transition::Finish(MenuOutcome::Cancelled)
        );
    }

    #[test]
    fn test_interrupt_quits_while_filtering() {
        let profile = KeyBindingProfile::arrows();
        let ui_state = UiState {
            is_filtering: true,
            ..UiState::default()
        };
        assert_eq!(
            handle_key(ui_state, Key::Interrupt, 3, &profile),
            Transition::Finish(MenuOutcome::Cancelled)
        );
    }
}

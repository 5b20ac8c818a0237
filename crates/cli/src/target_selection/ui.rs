use std::io::{self, stdin, stdout, Write};

use crossterm::terminal::size as terminal_size;
use log::{debug, warn};
use mk_core::makefile::Target;

use super::filter::filter_targets;
use super::input::prompt_numbered_choice;
use super::navigation::handle_key;
use super::render::{render_frame, RenderContext, Screen};
use super::terminal::{RawModeGuard, SignalListener, TerminalKeys};
use super::types::{Key, MenuOutcome, SelectionResult, Transition, UiState};

/// Where the menu reads its keys from.
pub trait KeySource {
    /// Blocks until the next key the menu cares about.
    ///
    /// # Errors
    ///
    /// Returns an error when input cannot be read any more.
    fn next_key(&mut self) -> io::Result<Key>;
}

/// Runs the menu loop against any key source and output.
///
/// The frame is redrawn after every key. A failing key source cancels the
/// session. The menu is erased before returning, whatever the outcome.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn run_menu<K: KeySource, W: Write>(
    targets: &[Target],
    context: &RenderContext<'_>,
    keys: &mut K,
    out: &mut W,
) -> io::Result<SelectionResult> {
    let mut screen = Screen::default();
    let mut ui_state = UiState::default();

    let chosen = loop {
        let visible = filter_targets(targets, &ui_state.filter_text);
        ui_state = ui_state.clamp_to(visible.len());
        // Re-read every frame, the terminal may have been resized
        screen.set_width(terminal_size().ok().map(|(width, _)| width));
        screen.paint(out, &render_frame(&visible, &ui_state, context))?;

        let key = match keys.next_key() {
            Ok(key) => key,
            Err(e) => {
                warn!("Could not read key: {e}");
                break None;
            }
        };

        match handle_key(ui_state, key, visible.len(), &context.profile) {
            Transition::Continue(next_state) => ui_state = next_state,
            Transition::Finish(MenuOutcome::Confirmed(index)) => {
                break visible.get(index).map(|&target| target.clone());
            }
            Transition::Finish(MenuOutcome::Cancelled) => break None,
        }
    };

    screen.erase(out)?;

    Ok(chosen.map_or_else(SelectionResult::cancelled, SelectionResult::confirmed))
}

/// Prompts the user to choose a target.
///
/// Uses the interactive menu when the terminal supports raw mode and the
/// numbered prompt otherwise. An empty list is cancelled straight away.
pub fn prompt_for_target_choice(targets: &[Target], context: &RenderContext<'_>) -> SelectionResult {
    if targets.is_empty() {
        return SelectionResult::cancelled();
    }

    let result = match RawModeGuard::enter() {
        Ok(guard) => {
            let listener = SignalListener::spawn(guard.restorer())
                .map_err(|e| warn!("Could not listen for signals: {e}"))
                .ok();

            let result = run_menu(targets, context, &mut TerminalKeys, &mut stdout());

            if let Some(listener) = listener {
                listener.stop();
            }
            drop(guard);
            result
        }
        Err(e) => {
            debug!("Falling back to the numbered prompt: {e}");
            prompt_numbered_choice(targets, context, &mut stdin().lock(), &mut stdout())
        }
    };

    result.unwrap_or_else(|e| {
        warn!("Target selection failed: {e}");
        SelectionResult::cancelled()
    })
}

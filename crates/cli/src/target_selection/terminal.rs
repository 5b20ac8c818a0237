//! Raw mode handling.
//!
//! The terminal must come back to its original mode on every way out of the
//! menu: confirmation, cancellation, read errors, panics unwinding through the
//! guard, and termination signals. [`TerminalRestorer`] is the single place
//! that undoes raw mode and is safe to call more than once, so the guard and
//! the signal thread can both hold it. After the menu, signals get their
//! default action again so `make` can still be interrupted.

use std::io::{self, stdin, stdout};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crossterm::event::{self, Event};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::tty::IsTty;
use crossterm::{cursor, execute};
use log::{debug, warn};
use mk_core::error::{Error, Result};

use super::types::Key;
use super::ui::KeySource;

/// Restores the terminal at most once.
#[derive(Debug)]
pub struct TerminalRestorer {
    active: AtomicBool,
}

impl TerminalRestorer {
    fn new() -> Self {
        Self {
            active: AtomicBool::new(true),
        }
    }

    /// Leaves raw mode and shows the cursor again. Only the first call does
    /// anything.
    pub fn restore(&self) {
        if !self.active.swap(false, Ordering::SeqCst) {
            return;
        }

        if let Err(e) = disable_raw_mode() {
            warn!("Could not leave raw mode: {e}");
        }
        let _ = execute!(stdout(), cursor::Show);
        debug!("Terminal restored");
    }
}

/// Keeps the terminal in raw mode for as long as it lives.
pub struct RawModeGuard {
    restorer: Arc<TerminalRestorer>,
}

impl RawModeGuard {
    /// Switches the terminal to raw mode and hides the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Terminal`] when stdin or stdout is not a terminal or
    /// raw mode cannot be enabled. Callers use the line based prompt instead.
    pub fn enter() -> Result<Self> {
        if !stdin().is_tty() || !stdout().is_tty() {
            return Err(Error::Terminal(io::Error::new(
                io::ErrorKind::Unsupported,
                "stdin or stdout is not a terminal",
            )));
        }

        enable_raw_mode().map_err(Error::Terminal)?;
        let guard = Self {
            restorer: Arc::new(TerminalRestorer::new()),
        };

        // From here on dropping the guard undoes raw mode
        execute!(stdout(), cursor::Hide).map_err(Error::Terminal)?;
        debug!("Entered raw mode");

        Ok(guard)
    }

    #[must_use]
    pub fn restorer(&self) -> Arc<TerminalRestorer> {
        Arc::clone(&self.restorer)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        self.restorer.restore();
    }
}

/// What the signal listener does with a termination signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalAction {
    /// Exit with this status, the menu having been torn down
    Exit(i32),
    /// Act as if mk had no handler, e.g. while `make` runs
    Default,
}

/// Decides how to handle `signal` depending on whether the menu is open.
#[must_use]
pub fn signal_action(signal: i32, menu_open: bool) -> SignalAction {
    if menu_open {
        SignalAction::Exit(128 + signal)
    } else {
        SignalAction::Default
    }
}

/// Restores the terminal and exits when the process receives SIGINT or
/// SIGTERM while the menu is open.
///
/// The handlers stay registered until the process ends: unregistering the
/// last signal-hook action does not bring back the default disposition, which
/// would leave SIGINT and SIGTERM ignored while `make` runs. Once stopped, the
/// listener hands signals to the default action instead.
#[cfg(unix)]
pub struct SignalListener {
    menu_open: Arc<AtomicBool>,
}

#[cfg(unix)]
impl SignalListener {
    /// # Errors
    ///
    /// Returns an error if the signal handlers cannot be registered.
    pub fn spawn(restorer: Arc<TerminalRestorer>) -> io::Result<Self> {
        use signal_hook::consts::signal::{SIGINT, SIGTERM};
        use signal_hook::iterator::Signals;
        use signal_hook::low_level::emulate_default_handler;

        let mut signals = Signals::new([SIGINT, SIGTERM])?;
        let menu_open = Arc::new(AtomicBool::new(true));
        let thread_menu_open = Arc::clone(&menu_open);

        // Detached, it lives as long as the handlers
        std::thread::Builder::new()
            .name("mk-signals".to_string())
            .spawn(move || {
                for signal in signals.forever() {
                    restorer.restore();
                    match signal_action(signal, thread_menu_open.load(Ordering::SeqCst)) {
                        SignalAction::Exit(status) => std::process::exit(status),
                        SignalAction::Default => {
                            debug!("Signal {signal} after the menu, using the default action");
                            if let Err(e) = emulate_default_handler(signal) {
                                warn!("Could not apply the default action for signal {signal}: {e}");
                                std::process::exit(128 + signal);
                            }
                        }
                    }
                }
            })?;

        Ok(Self { menu_open })
    }

    /// Marks the menu as closed. Later signals get their default action.
    pub fn stop(self) {
        self.menu_open.store(false, Ordering::SeqCst);
    }
}

#[cfg(not(unix))]
pub struct SignalListener;

#[cfg(not(unix))]
impl SignalListener {
    /// # Errors
    ///
    /// Never fails on this platform.
    pub fn spawn(_restorer: Arc<TerminalRestorer>) -> io::Result<Self> {
        Ok(Self)
    }

    pub fn stop(self) {}
}

/// Reads keys from the terminal, skipping events the menu does not handle.
pub struct TerminalKeys;

impl KeySource for TerminalKeys {
    fn next_key(&mut self) -> io::Result<Key> {
        loop {
            if let Event::Key(key_event) = event::read()? {
                if let Some(key) = Key::from_key_event(key_event) {
                    return Ok(key);
                }
            }
        }
    }
}

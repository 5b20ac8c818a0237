//! Interactive setup.
//!
//! Runs on first launch and with `mk --config`. Language, key scheme and
//! colors are picked from numbered lists read line by line, so the wizard
//! works with any terminal. Custom navigation keys are the exception: they are
//! captured one key press at a time in raw mode, with `z`/`s` as the fallback
//! when the terminal cannot do raw mode.

use std::fmt::Display;
use std::io::{self, BufRead, Write};

use crossterm::style::{Color, Stylize};
use log::debug;
use mk_core::config::{ColorScheme, Config, KeyScheme};
use mk_core::error::Result;
use mk_core::i18n::{Language, Messages};

use crate::target_selection::colors::{ACCENT_COLOR, MUTED_COLOR};
use crate::target_selection::terminal::{RawModeGuard, TerminalKeys};
use crate::target_selection::types::Key;
use crate::target_selection::ui::KeySource;

/// Custom keys used when they cannot be captured.
pub const FALLBACK_CUSTOM_KEYS: (char, char) = ('z', 's');

/// Asks for one of `options` by number.
///
/// An empty answer or end of input keeps `current`. Anything that is not a
/// listed number asks again.
///
/// # Errors
///
/// Returns an error if reading from `input` or writing to `out` fails.
pub fn prompt_choice<T, L, R, W>(
    title: &str,
    options: &[(T, L)],
    current: T,
    messages: &Messages,
    input: &mut R,
    out: &mut W,
) -> io::Result<T>
where
    T: Copy + PartialEq,
    L: Display,
    R: BufRead,
    W: Write,
{
    writeln!(out, "\n{}", title.with(ACCENT_COLOR).bold())?;
    for (index, (value, label)) in options.iter().enumerate() {
        let marker = if *value == current { "*" } else { " " };
        writeln!(
            out,
            "  {} {} {label}",
            format!("{:>2}.", index + 1).with(ACCENT_COLOR),
            marker.with(MUTED_COLOR)
        )?;
    }

    let current_number = options
        .iter()
        .position(|(value, _)| *value == current)
        .map_or(1, |index| index + 1);
    write!(out, "{}", messages.setup_choice(current_number).with(MUTED_COLOR))?;
    out.flush()?;

    let mut line = String::new();
    loop {
        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            return Ok(current);
        }

        let answer = line.trim();
        if answer.is_empty() {
            return Ok(current);
        }

        match answer.parse::<usize>() {
            Ok(number) if (1..=options.len()).contains(&number) => {
                return Ok(options[number - 1].0);
            }
            _ => {
                write!(
                    out,
                    "{}",
                    messages.setup_invalid(options.len()).with(Color::Red)
                )?;
                out.flush()?;
            }
        }
    }
}

/// Reads the custom up and down keys, one key press each.
///
/// Only printable ASCII keys are accepted; other keys are ignored. A down key
/// equal to the up key, ignoring case, is asked for again. Output uses `\r\n`
/// since the keys are read in raw mode.
///
/// # Errors
///
/// Returns an [`io::ErrorKind::Interrupted`] error on Ctrl-C or Escape, and
/// any error from `keys` or `out`.
pub fn capture_custom_keys<K: KeySource, W: Write>(
    keys: &mut K,
    messages: &Messages,
    out: &mut W,
) -> io::Result<(char, char)> {
    write!(out, "{}", messages.key_up_prompt)?;
    out.flush()?;
    let up = read_printable_key(keys)?;
    write!(out, "{}\r\n", up.bold())?;

    loop {
        write!(out, "{}", messages.key_down_prompt)?;
        out.flush()?;
        let down = read_printable_key(keys)?;

        if down.eq_ignore_ascii_case(&up) {
            write!(out, "{down} {}\r\n", messages.key_same_as_up.with(Color::Red))?;
            continue;
        }

        write!(out, "{}\r\n", down.bold())?;
        out.flush()?;
        return Ok((up, down));
    }
}

fn read_printable_key<K: KeySource>(keys: &mut K) -> io::Result<char> {
    loop {
        match keys.next_key()? {
            Key::Char(c) if c.is_ascii_graphic() => return Ok(c),
            Key::Interrupt | Key::Escape => {
                return Err(io::Error::new(
                    io::ErrorKind::Interrupted,
                    "key capture cancelled",
                ));
            }
            _ => {}
        }
    }
}

/// Captures custom keys from the terminal, or falls back to
/// [`FALLBACK_CUSTOM_KEYS`] when raw mode is unavailable.
///
/// # Errors
///
/// Returns an error if the capture is cancelled or writing to `out` fails.
pub fn capture_keys_from_terminal<W: Write>(
    messages: &Messages,
    out: &mut W,
) -> io::Result<(char, char)> {
    match RawModeGuard::enter() {
        Ok(guard) => {
            let keys = capture_custom_keys(&mut TerminalKeys, messages, out);
            drop(guard);
            keys
        }
        Err(e) => {
            debug!("Cannot capture keys: {e}");
            writeln!(out, "{}", messages.raw_mode_unavailable.with(MUTED_COLOR))?;
            Ok(FALLBACK_CUSTOM_KEYS)
        }
    }
}

/// Walks through every setting and updates `config` in place.
///
/// The language is asked first so the remaining prompts are shown in it.
/// `capture_keys` is only called when the custom key scheme is chosen.
/// Saving is left to the caller.
///
/// # Errors
///
/// Returns an error if reading or writing fails, or if the captured keys are
/// not a valid custom pair.
pub fn run_setup<R, W, F>(
    config: &mut Config,
    input: &mut R,
    out: &mut W,
    capture_keys: F,
) -> Result<()>
where
    R: BufRead,
    W: Write,
    F: FnOnce(&Messages, &mut W) -> io::Result<(char, char)>,
{
    writeln!(
        out,
        "{}",
        config.language.messages().setup_title.with(ACCENT_COLOR).bold()
    )?;

    let languages = Language::ALL.map(|language| (language, language.native_name()));
    config.language = prompt_choice(
        config.language.messages().setup_language,
        &languages,
        config.language,
        config.language.messages(),
        input,
        out,
    )?;
    let messages = config.language.messages();
    debug!("Setup language: {}", config.language.code());

    let key_schemes = KeyScheme::ALL.map(|scheme| (scheme, scheme));
    let key_scheme = prompt_choice(
        messages.setup_key_scheme,
        &key_schemes,
        config.key_scheme,
        messages,
        input,
        out,
    )?;

    if key_scheme == KeyScheme::Custom {
        let (up, down) = capture_keys(messages, out)?;
        config.set_key_scheme(key_scheme, Some(up), Some(down))?;
        writeln!(
            out,
            "{}",
            messages
                .keys_confirmed(&up.to_string(), &down.to_string())
                .with(MUTED_COLOR)
        )?;
    } else {
        config.set_key_scheme(key_scheme, None, None)?;
    }

    let color_schemes = ColorScheme::ALL.map(|scheme| (scheme, scheme));
    config.color_scheme = prompt_choice(
        messages.setup_color_scheme,
        &color_schemes,
        config.color_scheme,
        messages,
        input,
        out,
    )?;

    writeln!(out)?;
    out.flush()?;
    Ok(())
}

//! Drawing the menu.
//!
//! [`render_frame`] turns the menu state into styled lines without touching
//! the terminal. [`Screen`] paints those lines as a block that is redrawn in
//! place: it remembers how many terminal rows it printed last time, wrapped
//! lines included, and erases exactly those before printing the next frame.

use std::io::{self, Write};

use crossterm::cursor::MoveUp;
use crossterm::queue;
use crossterm::style::{Color, Print, Stylize};
use crossterm::terminal::{Clear, ClearType};
use mk_core::config::{KeyBindingProfile, KeyScheme};
use mk_core::i18n::Messages;
use mk_core::makefile::Target;

use super::colors::{row_color, ACCENT_COLOR, MUTED_COLOR};
use super::navigation::quit_key_enabled;
use super::types::{UiState, MAX_VISIBLE_ROWS};

const SELECTION_MARKER: &str = "▶";
const FILTER_CURSOR: &str = "█";
/// Names are padded so descriptions line up.
const NAME_WIDTH: usize = 28;

/// Everything the renderer needs besides the state itself.
pub struct RenderContext<'a> {
    pub messages: &'a Messages,
    pub profile: KeyBindingProfile,
    /// Cycled over rows to color target names. May be empty.
    pub palette: &'a [Color],
}

/// Renders one frame.
///
/// Layout: title, status line (key help, filter input or committed filter),
/// a blank line, then either the empty-state message or the visible window of
/// targets followed by a position indicator when the list scrolls.
#[must_use]
pub fn render_frame(
    visible: &[&Target],
    ui_state: &UiState,
    context: &RenderContext<'_>,
) -> Vec<String> {
    let messages = context.messages;
    let mut lines = Vec::with_capacity(MAX_VISIBLE_ROWS + 4);

    lines.push(messages.menu_title.with(ACCENT_COLOR).bold().to_string());
    lines.push(status_line(ui_state, context));
    lines.push(String::new());

    if visible.is_empty() {
        lines.push(format!(
            "  {}",
            messages.no_matching_targets.with(MUTED_COLOR)
        ));
        return lines;
    }

    let end = (ui_state.scroll_offset + MAX_VISIBLE_ROWS).min(visible.len());
    for (index, target) in visible
        .iter()
        .enumerate()
        .take(end)
        .skip(ui_state.scroll_offset)
    {
        lines.push(target_row(
            target,
            index,
            index == ui_state.selected_index,
            context.palette,
        ));
    }

    if visible.len() > MAX_VISIBLE_ROWS {
        let position = messages.target_count(ui_state.selected_index + 1, visible.len());
        lines.push(format!("  {}", position.with(MUTED_COLOR)));
    }

    lines
}

fn status_line(ui_state: &UiState, context: &RenderContext<'_>) -> String {
    let messages = context.messages;

    if ui_state.is_filtering {
        format!(
            "  {}{}{}",
            messages.filter_label.with(MUTED_COLOR),
            ui_state.filter_text,
            FILTER_CURSOR
        )
    } else if !ui_state.filter_text.is_empty() {
        format!(
            "  {}{}",
            messages.filter_active_label.with(MUTED_COLOR),
            ui_state.filter_text
        )
    } else {
        format!("  {}", help_line(messages, &context.profile).with(MUTED_COLOR))
    }
}

/// Key help for the active binding profile.
#[must_use]
pub fn help_line(messages: &Messages, profile: &KeyBindingProfile) -> String {
    match profile.scheme {
        KeyScheme::Arrows => messages.help_arrows.to_string(),
        KeyScheme::Wasd => messages.help_wasd.to_string(),
        KeyScheme::Custom => {
            let quit_hint = if quit_key_enabled(profile) {
                messages.quit_hint_q
            } else {
                messages.quit_hint_ctrl_c
            };
            messages.help_custom(
                &key_display_name(profile.up_key),
                &key_display_name(profile.down_key),
                quit_hint,
            )
        }
    }
}

/// Human readable name of a single-byte key.
#[must_use]
pub fn key_display_name(key: u8) -> String {
    match key {
        b' ' => "space".to_string(),
        key if key.is_ascii_graphic() => char::from(key.to_ascii_lowercase()).to_string(),
        key => format!("0x{key:02x}"),
    }
}

fn target_row(target: &Target, index: usize, is_selected: bool, palette: &[Color]) -> String {
    let name = format!("{:<NAME_WIDTH$}", target.name);
    let color = row_color(palette, index);

    let mut row = if is_selected {
        format!(
            "  {} {}",
            SELECTION_MARKER.with(ACCENT_COLOR).bold(),
            name.with(color.unwrap_or(ACCENT_COLOR)).bold()
        )
    } else if let Some(color) = color {
        format!("    {}", name.with(color))
    } else {
        format!("    {name}")
    };

    if !target.description.is_empty() {
        row.push_str(&format!(
            "  {}",
            target.description.as_str().with(MUTED_COLOR)
        ));
    }

    row
}

/// An in-place redrawn block of lines.
///
/// Lines wider than the terminal wrap onto several rows, so the block is
/// measured in rows of the known terminal width.
#[derive(Debug, Default)]
pub struct Screen {
    rendered_rows: usize,
    width: Option<u16>,
}

impl Screen {
    /// Number of terminal rows currently on screen.
    #[must_use]
    pub fn rendered_rows(&self) -> usize {
        self.rendered_rows
    }

    /// Sets the terminal width used to count wrapped rows. `None` counts one
    /// row per line.
    pub fn set_width(&mut self, width: Option<u16>) {
        self.width = width.filter(|width| *width > 0);
    }

    /// Replaces the previous frame with `lines`.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `out` fails.
    pub fn paint<W: Write>(&mut self, out: &mut W, lines: &[String]) -> io::Result<()> {
        self.queue_erase(out)?;

        for line in lines {
            // Raw mode does not translate `\n` into a carriage return
            queue!(out, Print(line), Print("\r\n"))?;
        }

        out.flush()?;
        self.rendered_rows = lines.iter().map(|line| row_count(line, self.width)).sum();
        Ok(())
    }

    /// Removes the block from the terminal.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `out` fails.
    pub fn erase<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        self.queue_erase(out)?;
        out.flush()?;
        self.rendered_rows = 0;
        Ok(())
    }

    fn queue_erase<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for _ in 0..self.rendered_rows {
            queue!(out, MoveUp(1), Clear(ClearType::CurrentLine))?;
        }
        Ok(())
    }
}

/// Rows taken by `line` on a terminal `width` columns wide.
fn row_count(line: &str, width: Option<u16>) -> usize {
    match width {
        Some(width) => visible_width(line).div_ceil(usize::from(width)).max(1),
        None => 1,
    }
}

/// Characters that take up a column, ANSI escape sequences excluded.
fn visible_width(line: &str) -> usize {
    let mut width = 0;
    let mut chars = line.chars();
    while let Some(c) = chars.next() {
        if c == '\u{1b}' {
            // CSI sequences end with an ASCII letter
            for next in chars.by_ref() {
                if next.is_ascii_alphabetic() {
                    break;
                }
            }
        } else {
            width += 1;
        }
    }
    width
}

#[cfg(test)]
mod tests {
    use super::*;
    use mk_core::config::ColorScheme;
    use mk_core::i18n::Language;

    use crate::target_selection::colors::AsTermPalette;

    /// Drops ANSI escape sequences so assertions can look at the text.
    fn strip_ansi(text: &str) -> String {
        let mut plain = String::new();
        let mut chars = text.chars();
        while let Some(c) = chars.next() {
            if c == '\u{1b}' {
                // CSI sequences end with an ASCII letter
                for next in chars.by_ref() {
                    if next.is_ascii_alphabetic() {
                        break;
                    }
                }
            } else {
                plain.push(c);
            }
        }
        plain
    }

    fn plain_frame(visible: &[&Target], ui_state: &UiState, context: &RenderContext<'_>) -> Vec<String> {
        render_frame(visible, ui_state, context)
            .iter()
            .map(|line| strip_ansi(line))
            .collect()
    }

    fn context(profile: KeyBindingProfile) -> RenderContext<'static> {
        RenderContext {
            messages: Language::En.messages(),
            profile,
            palette: &[],
        }
    }

    fn many_targets(count: usize) -> Vec<Target> {
        (0..count)
            .map(|i| Target::new(format!("target-{i:02}"), ""))
            .collect()
    }

    #[test]
    fn test_frame_layout() {
        let targets = [Target::new("build", "Build it"), Target::new("clean", "")];
        let visible: Vec<&Target> = targets.iter().collect();
        let lines = plain_frame(&visible, &UiState::default(), &context(KeyBindingProfile::arrows()));

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "mk - select a target");
        assert_eq!(lines[1], format!("  {}", Language::En.messages().help_arrows));
        assert_eq!(lines[2], "");
        assert!(lines[3].starts_with("  ▶ build"));
        assert!(lines[3].ends_with("  Build it"));
        assert_eq!(lines[4].trim_end(), "    clean");
    }

    #[test]
    fn test_empty_state() {
        let lines = plain_frame(&[], &UiState::default(), &context(KeyBindingProfile::arrows()));
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[3], "  No matching targets");
    }

    #[test]
    fn test_filter_lines() {
        let context = context(KeyBindingProfile::arrows());

        let typing = UiState {
            is_filtering: true,
            filter_text: "bu".to_string(),
            ..UiState::default()
        };
        assert_eq!(plain_frame(&[], &typing, &context)[1], "  Filter: bu█");

        let committed = UiState {
            filter_text: "bu".to_string(),
            ..UiState::default()
        };
        assert_eq!(
            plain_frame(&[], &committed, &context)[1],
            "  Filter (active): bu"
        );
    }

    #[test]
    fn test_window_and_position_indicator() {
        let targets = many_targets(40);
        let visible: Vec<&Target> = targets.iter().collect();
        let ui_state = UiState {
            selected_index: 22,
            scroll_offset: 10,
            ..UiState::default()
        };

        let lines = plain_frame(&visible, &ui_state, &context(KeyBindingProfile::arrows()));

        // Title, status, blank, rows, indicator
        assert_eq!(lines.len(), 3 + MAX_VISIBLE_ROWS + 1);
        assert_eq!(lines[3].trim(), "target-10");
        assert_eq!(lines[3 + MAX_VISIBLE_ROWS - 1].trim(), "target-24");
        assert!(lines[3 + 12].starts_with("  ▶ target-22"));
        assert_eq!(lines.last().unwrap(), "  23 of 40");
    }

    #[test]
    fn test_no_indicator_when_everything_fits() {
        let targets = many_targets(MAX_VISIBLE_ROWS);
        let visible: Vec<&Target> = targets.iter().collect();
        let lines = plain_frame(&visible, &UiState::default(), &context(KeyBindingProfile::arrows()));
        assert_eq!(lines.len(), 3 + MAX_VISIBLE_ROWS);
    }

    #[test]
    fn test_palette_colors_rows() {
        let targets = [Target::new("build", ""), Target::new("test", "")];
        let visible: Vec<&Target> = targets.iter().collect();
        let palette = ColorScheme::HighContrast.as_crossterm_palette();
        let context = RenderContext {
            palette: &palette,
            ..context(KeyBindingProfile::arrows())
        };

        let colored = render_frame(&visible, &UiState::default(), &context);
        let plain = plain_frame(&visible, &UiState::default(), &context);
        assert_ne!(colored[4], plain[4]);
        assert_eq!(plain[4].trim_end(), "    test");
    }

    #[test]
    fn test_help_line_per_scheme() {
        let messages = Language::En.messages();
        assert_eq!(
            help_line(messages, &KeyBindingProfile::wasd()),
            messages.help_wasd
        );
        assert_eq!(
            help_line(messages, &KeyBindingProfile::custom(b'K', b'j')),
            "↑/↓/k/j navigate   / filter   enter run   q quit"
        );
        assert_eq!(
            help_line(messages, &KeyBindingProfile::custom(b'q', b'a')),
            "↑/↓/q/a navigate   / filter   enter run   Ctrl+C quit"
        );
    }

    #[test]
    fn test_key_display_name() {
        assert_eq!(key_display_name(b'Z'), "z");
        assert_eq!(key_display_name(b']'), "]");
        assert_eq!(key_display_name(b' '), "space");
        assert_eq!(key_display_name(9), "0x09");
    }

    #[test]
    fn test_screen_erases_previous_frame() {
        let mut screen = Screen::default();
        let mut out: Vec<u8> = Vec::new();

        screen
            .paint(&mut out, &["one".to_string(), "two".to_string()])
            .unwrap();
        assert_eq!(screen.rendered_rows(), 2);
        assert_eq!(String::from_utf8_lossy(&out), "one\r\ntwo\r\n");

        let mut second: Vec<u8> = Vec::new();
        screen.paint(&mut second, &["three".to_string()]).unwrap();
        let second = String::from_utf8_lossy(&second);
        // Two lines erased before the new frame
        assert_eq!(second.matches("\u{1b}[1A").count(), 2);
        assert_eq!(second.matches("\u{1b}[2K").count(), 2);
        assert!(second.ends_with("three\r\n"));

        let mut erased: Vec<u8> = Vec::new();
        screen.erase(&mut erased).unwrap();
        assert_eq!(String::from_utf8_lossy(&erased).matches("\u{1b}[1A").count(), 1);
        assert_eq!(screen.rendered_rows(), 0);
    }

    #[test]
    fn test_screen_erases_wrapped_rows() {
        let mut screen = Screen::default();
        screen.set_width(Some(10));

        let long_row = "x".repeat(25);
        let colored_row = "exactly-10".with(Color::DarkRed).to_string();
        let mut out: Vec<u8> = Vec::new();
        screen
            .paint(&mut out, &[long_row, String::new(), colored_row])
            .unwrap();
        // 3 rows for the long line, 1 for the empty one, 1 despite the escapes
        assert_eq!(screen.rendered_rows(), 5);

        let mut erased: Vec<u8> = Vec::new();
        screen.erase(&mut erased).unwrap();
        assert_eq!(String::from_utf8_lossy(&erased).matches("\u{1b}[1A").count(), 5);
    }

    #[test]
    fn test_unknown_width_counts_lines() {
        let mut screen = Screen::default();
        screen.set_width(Some(0));

        let mut out: Vec<u8> = Vec::new();
        screen.paint(&mut out, &["y".repeat(500)]).unwrap();
        assert_eq!(screen.rendered_rows(), 1);
    }

    #[test]
    fn test_visible_width_skips_escapes() {
        let styled = "build".with(Color::DarkRed).bold().to_string();
        assert_eq!(visible_width(&styled), 5);
        assert_eq!(visible_width("▶ build"), 7);
        assert_eq!(row_count("", Some(80)), 1);
        assert_eq!(row_count(&"z".repeat(81), Some(80)), 2);
    }
}

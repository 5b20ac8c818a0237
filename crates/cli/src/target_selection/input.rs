use std::io::{self, BufRead, Write};

use crossterm::style::{Color, Stylize};
use mk_core::makefile::Target;

use super::colors::{row_color, ACCENT_COLOR, MUTED_COLOR};
use super::render::RenderContext;
use super::types::SelectionResult;

/// Line based target choice, used when the terminal cannot do raw mode.
///
/// Lists the targets numbered from 1 and reads lines until one holds a valid
/// number. `q` or end of input cancels.
///
/// # Errors
///
/// Returns an error if reading from `input` or writing to `out` fails.
pub fn prompt_numbered_choice<R: BufRead, W: Write>(
    targets: &[Target],
    context: &RenderContext<'_>,
    input: &mut R,
    out: &mut W,
) -> io::Result<SelectionResult> {
    let messages = context.messages;

    writeln!(out, "{}\n", messages.fallback_title.with(ACCENT_COLOR).bold())?;
    for (index, target) in targets.iter().enumerate() {
        writeln!(out, "{}", numbered_row(target, index, context.palette))?;
    }
    write!(out, "\n{}", messages.fallback_prompt.with(MUTED_COLOR))?;
    out.flush()?;

    let mut line = String::new();
    loop {
        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            return Ok(SelectionResult::cancelled());
        }

        let answer = line.trim();
        if answer.eq_ignore_ascii_case("q") {
            return Ok(SelectionResult::cancelled());
        }

        match answer.parse::<usize>() {
            Ok(number) if (1..=targets.len()).contains(&number) => {
                return Ok(SelectionResult::confirmed(targets[number - 1].clone()));
            }
            _ => {
                write!(
                    out,
                    "{}",
                    messages.fallback_invalid(targets.len()).with(Color::Red)
                )?;
                out.flush()?;
            }
        }
    }
}

fn numbered_row(target: &Target, index: usize, palette: &[Color]) -> String {
    let color = row_color(palette, index);
    let number = format!("{:>2}.", index + 1).with(color.unwrap_or(ACCENT_COLOR));

    if target.description.is_empty() {
        match color {
            Some(color) => format!("  {number} {}", target.name.as_str().with(color)),
            None => format!("  {number} {}", target.name),
        }
    } else {
        let name = format!("{:<30}", target.name);
        let name = match color {
            Some(color) => name.with(color).to_string(),
            None => name,
        };
        format!(
            "  {number} {name} {}",
            target.description.as_str().with(MUTED_COLOR)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mk_core::config::KeyBindingProfile;
    use mk_core::i18n::Language;
    use std::io::Cursor;

    fn targets() -> Vec<Target> {
        vec![
            Target::new("build", "Build it"),
            Target::new("test", ""),
            Target::new("lint", ""),
        ]
    }

    fn choose(answers: &str) -> (SelectionResult, String) {
        let context = RenderContext {
            messages: Language::En.messages(),
            profile: KeyBindingProfile::default(),
            palette: &[],
        };
        let mut input = Cursor::new(answers.as_bytes().to_vec());
        let mut out = Vec::new();

        let result = prompt_numbered_choice(&targets(), &context, &mut input, &mut out).unwrap();
        (result, String::from_utf8_lossy(&out).into_owned())
    }

    #[test]
    fn test_valid_number() {
        let (result, out) = choose("2\n");
        assert_eq!(result, SelectionResult::confirmed(Target::new("test", "")));
        assert!(out.contains("Available targets:"));
        assert!(out.contains(" 1."));
        assert!(out.contains("build"));
        assert!(out.contains("Build it"));
        assert!(out.contains("Target number (q to cancel): "));
    }

    #[test]
    fn test_invalid_input_asks_again() {
        let (result, out) = choose("0\nfoo\n\n4\n  3  \n");
        assert_eq!(result, SelectionResult::confirmed(Target::new("lint", "")));
        assert_eq!(
            out.matches("Invalid choice, enter a number between 1 and 3: ").count(),
            4
        );
    }

    #[test]
    fn test_q_cancels() {
        assert_eq!(choose("q\n").0, SelectionResult::cancelled());
        assert_eq!(choose("x\nQ\n").0, SelectionResult::cancelled());
    }

    #[test]
    fn test_end_of_input_cancels() {
        assert_eq!(choose("").0, SelectionResult::cancelled());
        assert_eq!(choose("9\n").0, SelectionResult::cancelled());
    }
}

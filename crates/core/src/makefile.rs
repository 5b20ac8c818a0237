//! Makefile discovery and target extraction.
//!
//! Two documentation conventions are recognised. A `##` comment on the
//! line directly above a target:
//!
//! ```makefile
//! ## Build the project
//! build:
//! 	cargo build
//! ```
//!
//! or an inline `##` comment after the colon:
//!
//! ```makefile
//! test: ## Run the tests
//! ```
//!
//! Lines that do not look like targets are never an error, they are simply
//! skipped.

use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{Error, Result};

/// Marker that introduces a target description.
const DESCRIPTION_MARKER: &str = "##";

/// File names tried, in order, when looking for a Makefile.
pub const MAKEFILE_NAMES: [&str; 3] = ["Makefile", "makefile", "GNUmakefile"];

/// A named build step extracted from a Makefile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub name: String,
    /// Empty when the target is undocumented.
    pub description: String,
}

impl Target {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

impl Display for Target {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        if self.description.is_empty() {
            formatter.write_str(&self.name)
        } else {
            write!(formatter, "{} ({})", self.name, self.description)
        }
    }
}

/// Line-by-line parser state.
///
/// The only thing carried between lines is the description collected from
/// the most recent `##` comment. It attaches to the immediately following
/// target and is dropped by any other non-comment line.
#[derive(Debug, Default)]
pub struct ParserState {
    pending_description: Option<String>,
}

impl ParserState {
    #[must_use]
    pub fn pending_description(&self) -> Option<&str> {
        self.pending_description.as_deref()
    }

    /// Processes one source line, returning a target if the line declares one.
    pub fn feed_line(&mut self, line: &str) -> Option<Target> {
        let trimmed = line.trim();

        if let Some(comment) = trimmed.strip_prefix(DESCRIPTION_MARKER) {
            self.pending_description = Some(comment.trim().to_string());
            return None;
        }

        if let Some((before_colon, after_colon)) = split_target_line(line) {
            // Consumed even when the target turns out to be hidden
            let pending = self.pending_description.take();

            let name = before_colon.trim();
            if name.is_empty() || name.starts_with('.') {
                return None;
            }

            let description = match after_colon.find(DESCRIPTION_MARKER) {
                Some(index) => after_colon[index + DESCRIPTION_MARKER.len()..]
                    .trim()
                    .to_string(),
                None => pending.unwrap_or_default(),
            };

            return Some(Target::new(name, description));
        }

        if !trimmed.starts_with('#') {
            self.pending_description = None;
        }

        None
    }
}

/// Splits a target line around its first colon.
///
/// Returns `None` for indented lines, variable assignments (`:=`, `::=`,
/// `=`, `?=`, `+=`, `!=`) and rules declaring several targets at once.
fn split_target_line(line: &str) -> Option<(&str, &str)> {
    if line.is_empty() || line.starts_with(char::is_whitespace) {
        return None;
    }

    let colon_index = line.find(':')?;
    let (before_colon, rest) = line.split_at(colon_index);

    if rest.starts_with(":=") || rest.starts_with("::=") {
        return None;
    }

    if before_colon.contains('=') {
        return None;
    }

    if before_colon.trim().contains(char::is_whitespace) {
        return None;
    }

    Some((before_colon, &rest[1..]))
}

/// Extracts the documented targets from Makefile text, in source order.
///
/// Duplicate names are kept as separate entries.
#[must_use]
pub fn parse(text: &str) -> Vec<Target> {
    let mut state = ParserState::default();
    text.lines()
        .filter_map(|line| state.feed_line(line))
        .collect()
}

/// Reads and parses the Makefile at `path`.
///
/// # Errors
///
/// Returns an error only when the file cannot be read. Bytes that are not
/// valid UTF-8 are replaced rather than rejected.
pub fn parse_makefile(path: &Path) -> Result<Vec<Target>> {
    let bytes = fs::read(path)
        .map_err(|e| Error::io_error("Makefile", &path.display().to_string(), e))?;

    let targets = parse(&String::from_utf8_lossy(&bytes));
    debug!("Parsed {} target(s) from `{}`", targets.len(), path.display());

    Ok(targets)
}

/// Looks for a Makefile in `directory`.
///
/// The exact names in [`MAKEFILE_NAMES`] win; otherwise the first file named
/// like `Makefile.<ext>` is used.
#[must_use]
pub fn find_makefile(directory: &Path) -> Option<PathBuf> {
    for name in MAKEFILE_NAMES {
        let candidate = directory.join(name);
        if candidate.is_file() {
            return Some(candidate);
        }
    }

    let mut file_names: Vec<String> = fs::read_dir(directory)
        .ok()?
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.path().is_file())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .collect();
    file_names.sort();

    MAKEFILE_NAMES.iter().find_map(|prefix| {
        file_names
            .iter()
            .find(|file_name| {
                file_name
                    .strip_prefix(prefix)
                    .and_then(|rest| rest.strip_prefix('.'))
                    .is_some_and(|extension| !extension.is_empty())
            })
            .map(|file_name| directory.join(file_name))
    })
}

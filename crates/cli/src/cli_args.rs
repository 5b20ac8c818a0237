//! Command-line argument parsing.
//!
//! This module defines the command-line interface of `mk` using the `clap`
//! crate. Scheme and language values are parsed with the `FromStr`
//! implementations from `mk_core`, so invalid values are rejected by clap.

use clap::Parser;
use mk_core::config::{ColorScheme, KeyScheme};
use mk_core::i18n::Language;

/// Command-line arguments for `mk`.
///
/// Without a target, `mk` shows the interactive menu for the Makefile found
/// in the current directory.
///
/// # Examples
///
/// ```rust
/// use clap::Parser;
/// use mk_cli::cli_args::Args;
///
/// let args = Args::parse_from(["mk", "--dry-run", "build"]);
/// assert!(args.dry_run);
/// assert_eq!(args.target.as_deref(), Some("build"));
/// ```
#[derive(Parser, Debug)]
#[command(version, about = "Interactive Makefile target runner")]
#[command(term_width = 0)] // Just to make testing across clap features easier
#[allow(clippy::struct_excessive_bools)]
pub struct Args {
    /// Documented target to run directly, skipping the menu.
    pub target: Option<String>,

    /// Makefile to use instead of looking in the current directory.
    #[arg(long, short = 'f', value_name = "PATH")]
    pub file: Option<String>,

    /// Show the most recently run targets.
    #[arg(long, action, conflicts_with_all = ["target", "list"])]
    pub history: bool,

    /// Print the documented targets and exit.
    #[arg(long, short = 'l', action, conflicts_with = "target")]
    pub list: bool,

    /// Walk through every setting interactively and save them.
    #[arg(
        long = "config",
        action,
        conflicts_with_all = ["target", "history", "list", "keys", "lang", "colors"]
    )]
    pub setup: bool,

    /// Save the navigation key scheme: arrows, wasd or custom.
    ///
    /// Without `--up` and `--down`, the custom keys are read from the keyboard.
    #[arg(long, value_name = "SCHEME")]
    pub keys: Option<KeyScheme>,

    /// Up key for the custom key scheme.
    #[arg(long, value_name = "KEY", requires = "keys")]
    pub up: Option<char>,

    /// Down key for the custom key scheme.
    #[arg(long, value_name = "KEY", requires = "keys")]
    pub down: Option<char>,

    /// Save the display language: en, fr, es or de.
    #[arg(long, value_name = "CODE")]
    pub lang: Option<Language>,

    /// Save the color scheme: rainbow, deuteranopia, tritanopia or high-contrast.
    #[arg(long, value_name = "SCHEME")]
    pub colors: Option<ColorScheme>,

    /// Print the `make` command instead of running it.
    #[arg(long, short = 'd', action)]
    pub dry_run: bool,

    /// Path to the configuration file.
    ///
    /// If not provided, defaults to `$XDG_CONFIG_HOME/mk/config.yml`.
    #[arg(long)]
    pub config_path: Option<String>,

    /// Path to the history file.
    ///
    /// If not provided, defaults to `history.yml` next to the configuration.
    #[arg(long)]
    pub history_path: Option<String>,
}

impl Args {
    /// Whether this invocation changes saved settings rather than running
    /// a target.
    #[must_use]
    pub fn updates_config(&self) -> bool {
        self.keys.is_some() || self.lang.is_some() || self.colors.is_some()
    }

    /// Whether this invocation shows the menu.
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.target.is_none() && !self.list && !self.history && !self.setup && !self.updates_config()
    }
}

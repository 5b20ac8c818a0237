//! mk CLI Library
//!
//! This crate provides the command-line interface for mk, an interactive
//! runner for documented Makefile targets. It handles argument parsing and
//! the terminal menu used to pick a target.
//!
//! # Architecture
//!
//! - [`cli_args`]: Command-line argument parsing
//! - [`setup`]: First-launch and `--config` setup wizard
//! - [`target_selection`]: Interactive menu, filtering and the fallback prompt
//!
//! # Examples
//!
//! The CLI binary (`mk`) can be used in several ways:
//!
//! ```bash
//! # Interactive menu for the Makefile in the current directory
//! mk
//!
//! # Run a documented target directly
//! mk build
//!
//! # Use another Makefile and only print the command
//! mk --file build.mk --dry-run test
//!
//! # List targets, show history
//! mk --list
//! mk --history
//!
//! # Walk through every setting
//! mk --config
//!
//! # Save settings
//! mk --keys custom --up k --down j
//! mk --lang fr --colors high-contrast
//! ```

pub mod cli_args;
pub mod setup;
pub mod target_selection;

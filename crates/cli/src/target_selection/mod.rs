//! Interactive target selection.
//!
//! This module provides the terminal menu used by `mk` to pick a Makefile
//! target. It renders a block of lines below the prompt, redraws it in place
//! on every key and hands back a single [`SelectionResult`].
//!
//! # Key Features
//!
//! - **Scrolling list**: at most fifteen targets at once, with a position indicator
//! - **Filtering**: `/` starts a case-insensitive substring filter
//! - **Key schemes**: arrows, WASD or two custom letters
//! - **Terminal safety**: raw mode is undone on every exit path, signals included
//! - **Fallback**: a numbered prompt when the terminal cannot do raw mode
//!
//! Navigation is a pure function of the previous state and one key
//! ([`navigation::handle_key`]), so the whole engine can be driven from tests
//! through the [`ui::KeySource`] trait.

pub mod colors;
pub mod filter;
pub mod input;
pub mod navigation;
pub mod render;
pub mod terminal;
pub mod types;
pub mod ui;

pub use colors::AsTermPalette;
pub use render::RenderContext;
pub use types::SelectionResult;
pub use ui::prompt_for_target_choice;

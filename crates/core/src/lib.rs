//! mk Core Library
//!
//! This crate provides the core functionality for mk, an interactive Makefile
//! target runner. It turns Makefile text into a list of documented targets and
//! holds the pieces around it: user configuration, display strings, execution
//! history and the `make` invocation itself.
//!
//! # Key Features
//!
//! - **Target Extraction**: Parse `## Description` and `target: ## Description` conventions
//! - **Configuration**: Key scheme, language and color scheme persisted as YAML
//! - **Message Catalog**: English, French, Spanish and German display strings
//! - **Execution History**: The most recent runs, capped and persisted
//! - **Error Handling**: One error type for every failure mode
//!
//! # Examples
//!
//! Extracting targets from Makefile text:
//!
//! ```
//! use mk_core::makefile::parse;
//!
//! let targets = parse("## Build everything\nbuild:\n\tcargo build\ntest: ## Run tests\n");
//! assert_eq!(targets.len(), 2);
//! assert_eq!(targets[0].name, "build");
//! assert_eq!(targets[1].description, "Run tests");
//! ```

pub mod config;
pub mod error;
pub mod execution;
pub mod file_handling;
pub mod history;
pub mod i18n;
pub mod makefile;

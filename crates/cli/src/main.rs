use std::env;
use std::io::{stdin, stdout};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::Utc;
use clap::Parser;
use crossterm::style::{Color, Stylize};
use crossterm::tty::IsTty;
use itertools::Itertools;
use log::{debug, info, warn};
use mk_cli::cli_args::Args;
use mk_cli::setup;
use mk_cli::target_selection::colors::{ACCENT_COLOR, MUTED_COLOR};
use mk_cli::target_selection::{prompt_for_target_choice, AsTermPalette, RenderContext};
use mk_core::config::{self, Config, KeyBindingProfile, KeyScheme};
use mk_core::error::{Error, Result};
use mk_core::execution::{self, MAKE_PROGRAM};
use mk_core::file_handling;
use mk_core::history::{self, History};
use mk_core::i18n::Messages;
use mk_core::makefile::{self, Target};

/// Number of entries shown by `--history`
const HISTORY_DISPLAY_COUNT: usize = 20;

const SUCCESS_COLOR: Color = Color::DarkGreen;
const ERROR_COLOR: Color = Color::Red;

/// Loads the saved configuration, falling back to defaults when it is
/// missing or unreadable.
fn load_config(config_path: &str) -> Config {
    if !file_handling::config_exists(config_path) {
        debug!("No configuration at `{config_path}`, using defaults");
        return Config::default();
    }

    file_handling::get_config(config_path).unwrap_or_else(|e| {
        warn!("{e}");
        Config::default()
    })
}

/// Applies the settings given on the command line and saves them.
///
/// `--keys custom` without `--up` and `--down` reads both keys from the
/// keyboard.
fn update_config(args: &Args, config_path: &str, mut config: Config) -> Result<()> {
    if let Some(language) = args.lang {
        config.language = language;
    }
    if let Some(scheme) = args.keys {
        let (up, down) = match (scheme, args.up, args.down) {
            (KeyScheme::Custom, None, None) => {
                let (up, down) =
                    setup::capture_keys_from_terminal(config.language.messages(), &mut stdout())?;
                (Some(up), Some(down))
            }
            _ => (args.up, args.down),
        };
        config.set_key_scheme(scheme, up, down)?;
    }
    if let Some(color_scheme) = args.colors {
        config.color_scheme = color_scheme;
    }

    save_config(config_path, &config)
}

/// Runs the setup wizard on the terminal and saves the result.
fn run_setup(config_path: &str, mut config: Config) -> Result<Config> {
    setup::run_setup(
        &mut config,
        &mut stdin().lock(),
        &mut stdout(),
        setup::capture_keys_from_terminal,
    )?;
    save_config(config_path, &config)?;
    Ok(config)
}

/// First launch: no saved configuration and someone at the keyboard.
fn needs_first_setup(args: &Args, config_path: &str) -> bool {
    args.is_interactive()
        && !file_handling::config_exists(config_path)
        && stdin().is_tty()
        && stdout().is_tty()
}

fn save_config(config_path: &str, config: &Config) -> Result<()> {
    file_handling::write_config(config_path, config)?;
    info!("Configuration written to `{config_path}`");

    println!(
        "{}",
        config
            .language
            .messages()
            .config_saved
            .with(SUCCESS_COLOR)
            .bold()
    );
    Ok(())
}

/// Finds the Makefile to use. Discovered paths are shown relative to the
/// current directory.
fn locate_makefile(args: &Args, current_dir: &Path) -> Result<PathBuf> {
    match &args.file {
        Some(file) => Ok(PathBuf::from(file)),
        None => makefile::find_makefile(current_dir)
            .map(|path| {
                path.strip_prefix(current_dir)
                    .map(Path::to_path_buf)
                    .unwrap_or(path)
            })
            .ok_or(Error::NoMakefile),
    }
}

fn execute(args: &Args, config: &Config) -> Result<()> {
    let messages = config.language.messages();
    let history_path = config::get_history_path(&args.history_path);
    debug!("History path: `{history_path}`");

    if args.history {
        return show_history(&history_path, messages);
    }

    let current_dir = env::current_dir()?;
    let makefile_path = locate_makefile(args, &current_dir)?;
    let targets = makefile::parse_makefile(&makefile_path)?;

    if targets.is_empty() {
        return Err(Error::NoTargets {
            path: makefile_path.display().to_string(),
        });
    }

    if args.list {
        println!("{}", targets.iter().map(list_line).join("\n"));
        return Ok(());
    }

    let run = |target: &str| {
        run_target(
            args,
            &makefile_path,
            target,
            &current_dir,
            &history_path,
            messages,
        )
    };

    if let Some(target_name) = &args.target {
        if !targets.iter().any(|target| target.name == *target_name) {
            eprintln!("{}", messages.available_targets.with(MUTED_COLOR));
            eprintln!("{}", targets.iter().map(bullet_line).join("\n"));
            return Err(Error::UnknownTarget(target_name.clone()));
        }
        return run(target_name);
    }

    println!(
        "{}\n",
        messages
            .makefile_found(&makefile_path.display().to_string())
            .with(MUTED_COLOR)
    );

    let profile = config.key_binding_profile().unwrap_or_else(|e| {
        warn!("{e} Using arrow keys.");
        KeyBindingProfile::arrows()
    });
    let palette = config.color_scheme.as_crossterm_palette();
    let context = RenderContext {
        messages,
        profile,
        palette: &palette,
    };

    match prompt_for_target_choice(&targets, &context).into_target() {
        Some(target) => run(&target.name),
        None => {
            println!("{}", messages.cancelled.with(MUTED_COLOR));
            Ok(())
        }
    }
}

/// Records the run in the history and hands over to `make`.
fn run_target(
    args: &Args,
    makefile_path: &Path,
    target: &str,
    current_dir: &Path,
    history_path: &str,
    messages: &Messages,
) -> Result<()> {
    let command = execution::make_command(makefile_path, target);

    if args.dry_run {
        println!("{MAKE_PROGRAM} -f {} {target}", makefile_path.display());
        info!("Dry run, not executing");
        return Ok(());
    }

    let mut history = History::load_or_empty(history_path);
    if let Err(e) = history.add(target, &current_dir.display().to_string()) {
        warn!("Could not record `{target}` in the history: {e}");
    }

    println!(
        "{}\n",
        messages
            .executing(&makefile_path.display().to_string(), target)
            .with(SUCCESS_COLOR)
            .bold()
    );

    execution::execute_command(command)?;

    println!("\n{}", messages.success.with(SUCCESS_COLOR).bold());
    Ok(())
}

fn show_history(history_path: &str, messages: &Messages) -> Result<()> {
    let history = History::load(history_path)?;
    let entries = history.recent(HISTORY_DISPLAY_COUNT);

    if entries.is_empty() {
        println!("{}", messages.history_empty.with(MUTED_COLOR));
        return Ok(());
    }

    println!("{}\n", messages.history_title.with(ACCENT_COLOR).bold());

    let now = Utc::now();
    for (index, entry) in entries.iter().enumerate() {
        let age = history::format_age(entry.executed_at, now, messages);
        println!(
            "  {}  {}  {}",
            format!("{:>2}.", index + 1).with(ACCENT_COLOR),
            format!("{:<30}", entry.target).bold(),
            format!("{age}  {}", entry.directory).with(MUTED_COLOR)
        );
    }

    Ok(())
}

/// Plain `--list` output, meant to be easy to pipe.
fn list_line(target: &Target) -> String {
    if target.description.is_empty() {
        target.name.clone()
    } else {
        format!("{:<30} {}", target.name, target.description)
    }
}

fn bullet_line(target: &Target) -> String {
    let mut line = format!("  {} {}", "•".with(ACCENT_COLOR), target.name);
    if !target.description.is_empty() {
        line.push_str(&format!("  {}", target.description.as_str().with(MUTED_COLOR)));
    }
    line
}

fn report_error(error: &Error, messages: &Messages) {
    match error {
        Error::NoTargets { path } => {
            debug!("No documented targets in `{path}`");
            eprintln!("{}", messages.no_targets.with(ERROR_COLOR));
            eprintln!("{}", messages.hint_add_doc.with(MUTED_COLOR));
        }
        Error::UnknownTarget(target) => {
            eprintln!("{}", messages.unknown_target(target).with(ERROR_COLOR));
        }
        _ => eprintln!("{}", error.to_string().with(ERROR_COLOR)),
    }
}

/// Mirrors make's exit status when there is one.
fn exit_code_for(error: &Error) -> ExitCode {
    match error {
        Error::SubProcessExit(Some(code)) => u8::try_from(*code)
            .ok()
            .filter(|code| *code != 0)
            .map_or(ExitCode::FAILURE, ExitCode::from),
        _ => ExitCode::FAILURE,
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let args = Args::parse();
    let config_path = config::get_config_path(&args.config_path);
    debug!("Config path: `{config_path}`");

    let config = load_config(&config_path);
    let messages = config.language.messages();

    let result = if args.setup {
        run_setup(&config_path, config).map(|_| ())
    } else if args.updates_config() {
        update_config(&args, &config_path, config)
    } else if needs_first_setup(&args, &config_path) {
        info!("No configuration at `{config_path}`, running setup");
        let config = run_setup(&config_path, config.clone()).unwrap_or_else(|e| {
            warn!("Setup failed, using defaults: {e}");
            config
        });
        execute(&args, &config)
    } else {
        execute(&args, &config)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_error(&e, messages);
            exit_code_for(&e)
        }
    }
}

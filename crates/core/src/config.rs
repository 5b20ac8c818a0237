//! Configuration for mk.
//!
//! This module resolves where the configuration and history files live and
//! defines the user-facing settings: navigation key scheme, display language
//! and color scheme. Reading and writing the files is handled by
//! [`crate::file_handling`].

use std::fmt::{Display, Formatter};
use std::path::Path;
use std::str::FromStr;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::i18n::Language;

/// Directory name below the XDG configuration home
const CONFIG_DIR_NAME: &str = "mk";
/// Used when `XDG_CONFIG_HOME` is unset or empty
const DEFAULT_CONFIG_HOME: &str = "~/.config";
const CONFIG_FILE_NAME: &str = "config.yml";
const HISTORY_FILE_NAME: &str = "history.yml";

/// Legacy scheme name, read as a custom `z`/`s` binding
const LEGACY_ZQSD_SCHEME: &str = "zqsd";

/// Which keys move the selection up and down.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum KeyScheme {
    /// Arrow keys only
    #[default]
    Arrows,
    /// Arrow keys plus `w`/`s`
    Wasd,
    /// Arrow keys plus two user-assigned keys
    Custom,
}

impl KeyScheme {
    pub const ALL: [KeyScheme; 3] = [KeyScheme::Arrows, KeyScheme::Wasd, KeyScheme::Custom];
}

impl FromStr for KeyScheme {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_lowercase().as_str() {
            "arrows" => Ok(Self::Arrows),
            "wasd" => Ok(Self::Wasd),
            "custom" => Ok(Self::Custom),
            _ => Err(Error::UnknownKeyScheme(value.to_string())),
        }
    }
}

impl Display for KeyScheme {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            KeyScheme::Arrows => "arrows",
            KeyScheme::Wasd => "wasd",
            KeyScheme::Custom => "custom",
        })
    }
}

/// Palette used to color target names in the menu.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ColorScheme {
    #[default]
    Rainbow,
    Deuteranopia,
    Tritanopia,
    HighContrast,
}

impl ColorScheme {
    pub const ALL: [ColorScheme; 4] = [
        ColorScheme::Rainbow,
        ColorScheme::Deuteranopia,
        ColorScheme::Tritanopia,
        ColorScheme::HighContrast,
    ];
}

impl FromStr for ColorScheme {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_lowercase().replace('-', "_").as_str() {
            "rainbow" => Ok(Self::Rainbow),
            "deuteranopia" => Ok(Self::Deuteranopia),
            "tritanopia" => Ok(Self::Tritanopia),
            "high_contrast" => Ok(Self::HighContrast),
            _ => Err(Error::UnknownColorScheme(value.to_string())),
        }
    }
}

impl Display for ColorScheme {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ColorScheme::Rainbow => "rainbow",
            ColorScheme::Deuteranopia => "deuteranopia",
            ColorScheme::Tritanopia => "tritanopia",
            ColorScheme::HighContrast => "high-contrast",
        })
    }
}

/// Key bindings active for one menu session.
///
/// `up_key` and `down_key` are only consulted for [`KeyScheme::Custom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBindingProfile {
    pub scheme: KeyScheme,
    pub up_key: u8,
    pub down_key: u8,
}

impl KeyBindingProfile {
    #[must_use]
    pub const fn arrows() -> Self {
        Self {
            scheme: KeyScheme::Arrows,
            up_key: 0,
            down_key: 0,
        }
    }

    #[must_use]
    pub const fn wasd() -> Self {
        Self {
            scheme: KeyScheme::Wasd,
            up_key: b'w',
            down_key: b's',
        }
    }

    /// Builds a custom profile. The keys are assumed to be already validated.
    #[must_use]
    pub const fn custom(up_key: u8, down_key: u8) -> Self {
        Self {
            scheme: KeyScheme::Custom,
            up_key,
            down_key,
        }
    }
}

impl Default for KeyBindingProfile {
    fn default() -> Self {
        Self::arrows()
    }
}

/// Persisted user settings.
#[derive(Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Config {
    pub key_scheme: KeyScheme,
    pub language: Language,
    pub color_scheme: ColorScheme,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_up_key: Option<char>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_down_key: Option<char>,
}

/// On-disk shape of [`Config`]. Everything is optional so that partial,
/// empty or legacy files still load.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct RawConfig {
    pub key_scheme: Option<String>,
    pub language: Option<String>,
    pub color_scheme: Option<String>,
    pub custom_up_key: Option<char>,
    pub custom_down_key: Option<char>,
}

impl From<RawConfig> for Config {
    fn from(raw: RawConfig) -> Self {
        let mut config = Config {
            custom_up_key: raw.custom_up_key,
            custom_down_key: raw.custom_down_key,
            ..Config::default()
        };

        match raw.key_scheme.as_deref().map(str::trim) {
            None | Some("") => {}
            Some(LEGACY_ZQSD_SCHEME) => {
                config.key_scheme = KeyScheme::Custom;
                config.custom_up_key = Some('z');
                config.custom_down_key = Some('s');
            }
            Some(scheme) => match scheme.parse() {
                Ok(scheme) => config.key_scheme = scheme,
                Err(e) => warn!("{e}, using `{}`", config.key_scheme),
            },
        }

        if let Some(language) = raw.language.as_deref().filter(|l| !l.trim().is_empty()) {
            config.language = Language::from_code(language);
        }

        match raw.color_scheme.as_deref().map(str::trim) {
            None | Some("") => {}
            Some(scheme) => match scheme.parse() {
                Ok(scheme) => config.color_scheme = scheme,
                Err(e) => warn!("{e}, using the default palette"),
            },
        }

        config
    }
}

impl Config {
    /// Resolves the key-binding profile for a menu session.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCustomKeys`] when the custom scheme is selected
    /// without two distinct printable ASCII keys.
    pub fn key_binding_profile(&self) -> Result<KeyBindingProfile> {
        match self.key_scheme {
            KeyScheme::Arrows => Ok(KeyBindingProfile::arrows()),
            KeyScheme::Wasd => Ok(KeyBindingProfile::wasd()),
            KeyScheme::Custom => {
                let (Some(up), Some(down)) = (self.custom_up_key, self.custom_down_key) else {
                    return Err(Error::InvalidCustomKeys);
                };
                validate_custom_keys(up, down)?;
                Ok(KeyBindingProfile::custom(up as u8, down as u8))
            }
        }
    }

    /// Switches the key scheme, keeping custom keys only for the custom scheme.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCustomKeys`] if `scheme` is custom and the keys
    /// are missing, identical or not printable ASCII.
    pub fn set_key_scheme(
        &mut self,
        scheme: KeyScheme,
        up_key: Option<char>,
        down_key: Option<char>,
    ) -> Result<()> {
        if scheme == KeyScheme::Custom {
            let (Some(up), Some(down)) = (up_key, down_key) else {
                return Err(Error::InvalidCustomKeys);
            };
            validate_custom_keys(up, down)?;
            self.custom_up_key = Some(up);
            self.custom_down_key = Some(down);
        } else {
            self.custom_up_key = None;
            self.custom_down_key = None;
        }
        self.key_scheme = scheme;
        Ok(())
    }
}

fn validate_custom_keys(up: char, down: char) -> Result<()> {
    if !up.is_ascii_graphic() || !down.is_ascii_graphic() || up.eq_ignore_ascii_case(&down) {
        return Err(Error::InvalidCustomKeys);
    }
    Ok(())
}

/// Resolves the directory holding mk's configuration and history.
///
/// Uses `$XDG_CONFIG_HOME/mk` when set, `~/.config/mk` otherwise.
pub fn get_config_dir() -> String {
    let config_home = std::env::var("XDG_CONFIG_HOME")
        .ok()
        .filter(|home| !home.is_empty())
        .unwrap_or_else(|| shellexpand::tilde(DEFAULT_CONFIG_HOME).to_string());

    Path::new(&config_home)
        .join(CONFIG_DIR_NAME)
        .display()
        .to_string()
}

/// Resolves the configuration file path.
///
/// If a custom path is provided, uses that path. Otherwise, uses
/// `config.yml` in [`get_config_dir`]. Shell expansions like `~` are resolved.
pub fn get_config_path(config_path_arg: &Option<String>) -> String {
    resolve_path(config_path_arg, CONFIG_FILE_NAME)
}

/// Resolves the execution history file path.
pub fn get_history_path(history_path_arg: &Option<String>) -> String {
    resolve_path(history_path_arg, HISTORY_FILE_NAME)
}

fn resolve_path(path_arg: &Option<String>, default_file_name: &str) -> String {
    match path_arg {
        Some(path) => shellexpand::tilde(path).to_string(),
        None => Path::new(&get_config_dir())
            .join(default_file_name)
            .display()
            .to_string(),
    }
}

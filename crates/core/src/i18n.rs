//! Display strings for every supported language.
//!
//! Strings that take values use `{}` placeholders, filled in order by the
//! helper methods on [`Messages`].

use std::fmt::Display;
use std::str::FromStr;

use serde::Serialize;

use crate::error::Error;

/// A supported display language.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Fr,
    Es,
    De,
}

impl Language {
    pub const ALL: [Language; 4] = [Language::En, Language::Fr, Language::Es, Language::De];

    /// Maps a language code to a language, falling back to English.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_lowercase().as_str() {
            "fr" => Language::Fr,
            "es" => Language::Es,
            "de" => Language::De,
            _ => Language::En,
        }
    }

    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Fr => "fr",
            Language::Es => "es",
            Language::De => "de",
        }
    }

    /// Name of the language in that language.
    #[must_use]
    pub fn native_name(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Fr => "Français",
            Language::Es => "Español",
            Language::De => "Deutsch",
        }
    }

    #[must_use]
    pub fn messages(self) -> &'static Messages {
        match self {
            Language::En => &MESSAGES_EN,
            Language::Fr => &MESSAGES_FR,
            Language::Es => &MESSAGES_ES,
            Language::De => &MESSAGES_DE,
        }
    }
}

impl FromStr for Language {
    type Err = Error;

    /// Strict parsing, for values typed by the user.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|language| language.code().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| Error::UnknownLanguage(value.to_string()))
    }
}

/// All translatable strings.
#[derive(Debug)]
pub struct Messages {
    // Menu
    pub menu_title: &'static str,
    pub filter_label: &'static str,
    pub filter_active_label: &'static str,
    pub no_matching_targets: &'static str,
    /// `{}` position, `{}` total
    pub target_count: &'static str,
    pub help_arrows: &'static str,
    pub help_wasd: &'static str,
    /// `{}` up key, `{}` down key, `{}` quit hint
    pub help_custom: &'static str,
    pub quit_hint_q: &'static str,
    pub quit_hint_ctrl_c: &'static str,

    // Fallback prompt
    pub fallback_title: &'static str,
    pub fallback_prompt: &'static str,
    /// `{}` number of targets
    pub fallback_invalid: &'static str,

    // Runner
    /// `{}` Makefile path
    pub makefile_found: &'static str,
    pub no_targets: &'static str,
    pub hint_add_doc: &'static str,
    pub cancelled: &'static str,
    /// `{}` Makefile path, `{}` target
    pub executing: &'static str,
    pub success: &'static str,
    /// `{}` target
    pub unknown_target: &'static str,
    pub available_targets: &'static str,
    pub config_saved: &'static str,

    // History
    pub history_title: &'static str,
    pub history_empty: &'static str,
    pub time_just_now: &'static str,
    /// `{}` minutes
    pub time_minutes_ago: &'static str,
    /// `{}` hours
    pub time_hours_ago: &'static str,

    // Setup
    pub setup_title: &'static str,
    pub setup_language: &'static str,
    pub setup_key_scheme: &'static str,
    pub setup_color_scheme: &'static str,
    /// `{}` number of the current choice
    pub setup_choice: &'static str,
    /// `{}` number of options
    pub setup_invalid: &'static str,
    pub key_up_prompt: &'static str,
    pub key_down_prompt: &'static str,
    pub key_same_as_up: &'static str,
    /// `{}` up key, `{}` down key
    pub keys_confirmed: &'static str,
    pub raw_mode_unavailable: &'static str,
}

impl Messages {
    #[must_use]
    pub fn target_count(&self, position: usize, total: usize) -> String {
        fill(self.target_count, &[&position, &total])
    }

    #[must_use]
    pub fn help_custom(&self, up: &str, down: &str, quit_hint: &str) -> String {
        fill(self.help_custom, &[&up, &down, &quit_hint])
    }

    #[must_use]
    pub fn fallback_invalid(&self, total: usize) -> String {
        fill(self.fallback_invalid, &[&total])
    }

    #[must_use]
    pub fn makefile_found(&self, path: &str) -> String {
        fill(self.makefile_found, &[&path])
    }

    #[must_use]
    pub fn executing(&self, path: &str, target: &str) -> String {
        fill(self.executing, &[&path, &target])
    }

    #[must_use]
    pub fn unknown_target(&self, target: &str) -> String {
        fill(self.unknown_target, &[&target])
    }

    #[must_use]
    pub fn time_minutes_ago(&self, minutes: i64) -> String {
        fill(self.time_minutes_ago, &[&minutes])
    }

    #[must_use]
    pub fn time_hours_ago(&self, hours: i64) -> String {
        fill(self.time_hours_ago, &[&hours])
    }

    #[must_use]
    pub fn setup_choice(&self, current: usize) -> String {
        fill(self.setup_choice, &[&current])
    }

    #[must_use]
    pub fn setup_invalid(&self, total: usize) -> String {
        fill(self.setup_invalid, &[&total])
    }

    #[must_use]
    pub fn keys_confirmed(&self, up: &str, down: &str) -> String {
        fill(self.keys_confirmed, &[&up, &down])
    }

    /// Every string, for completeness checks.
    #[must_use]
    pub fn all(&self) -> [&'static str; 38] {
        [
            self.menu_title,
            self.filter_label,
            self.filter_active_label,
            self.no_matching_targets,
            self.target_count,
            self.help_arrows,
            self.help_wasd,
            self.help_custom,
            self.quit_hint_q,
            self.quit_hint_ctrl_c,
            self.fallback_title,
            self.fallback_prompt,
            self.fallback_invalid,
            self.makefile_found,
            self.no_targets,
            self.hint_add_doc,
            self.cancelled,
            self.executing,
            self.success,
            self.unknown_target,
            self.available_targets,
            self.config_saved,
            self.history_title,
            self.history_empty,
            self.time_just_now,
            self.time_minutes_ago,
            self.time_hours_ago,
            self.setup_title,
            self.setup_language,
            self.setup_key_scheme,
            self.setup_color_scheme,
            self.setup_choice,
            self.setup_invalid,
            self.key_up_prompt,
            self.key_down_prompt,
            self.key_same_as_up,
            self.keys_confirmed,
            self.raw_mode_unavailable,
        ]
    }
}

/// Replaces each `{}` in `template` with the next value.
///
/// The template is scanned once, so braces inside the values are kept as is.
/// Placeholders without a value stay literal.
fn fill(template: &str, values: &[&dyn Display]) -> String {
    let mut pieces = template.split("{}");
    let mut text = pieces.next().unwrap_or_default().to_string();
    let mut values = values.iter();

    for piece in pieces {
        match values.next() {
            Some(value) => text.push_str(&value.to_string()),
            None => text.push_str("{}"),
        }
        text.push_str(piece);
    }

    text
}

static MESSAGES_EN: Messages = Messages {
    menu_title: "mk - select a target",
    filter_label: "Filter: ",
    filter_active_label: "Filter (active): ",
    no_matching_targets: "No matching targets",
    target_count: "{} of {}",
    help_arrows: "↑/↓ navigate   / filter   enter run   q quit",
    help_wasd: "↑/↓/w/s navigate   / filter   enter run   q quit",
    help_custom: "↑/↓/{}/{} navigate   / filter   enter run   {}",
    quit_hint_q: "q quit",
    quit_hint_ctrl_c: "Ctrl+C quit",
    fallback_title: "Available targets:",
    fallback_prompt: "Target number (q to cancel): ",
    fallback_invalid: "Invalid choice, enter a number between 1 and {}: ",
    makefile_found: "Using {}",
    no_targets: "No targets found.",
    hint_add_doc: "Document targets with `## Description` above them or `target: ## Description`.",
    cancelled: "Cancelled.",
    executing: "Running make -f {} {}",
    success: "Done.",
    unknown_target: "Unknown target: {}",
    available_targets: "Available targets:",
    config_saved: "Configuration saved.",
    history_title: "Recent targets",
    history_empty: "No history yet.",
    time_just_now: "just now",
    time_minutes_ago: "{} min ago",
    time_hours_ago: "{} h ago",
    setup_title: "mk setup",
    setup_language: "Language",
    setup_key_scheme: "Navigation keys",
    setup_color_scheme: "Color scheme",
    setup_choice: "Choice [{}]: ",
    setup_invalid: "Enter a number between 1 and {}: ",
    key_up_prompt: "Press the key for UP: ",
    key_down_prompt: "Press the key for DOWN: ",
    key_same_as_up: "(same as the up key, try again)",
    keys_confirmed: "Custom keys: {} up, {} down",
    raw_mode_unavailable: "(raw mode unavailable, defaulting to z/s)",
};

static MESSAGES_FR: Messages = Messages {
    menu_title: "mk - choisir une cible",
    filter_label: "Filtre : ",
    filter_active_label: "Filtre (actif) : ",
    no_matching_targets: "Aucune cible correspondante",
    target_count: "{} sur {}",
    help_arrows: "↑/↓ naviguer   / filtrer   entrée lancer   q quitter",
    help_wasd: "↑/↓/w/s naviguer   / filtrer   entrée lancer   q quitter",
    help_custom: "↑/↓/{}/{} naviguer   / filtrer   entrée lancer   {}",
    quit_hint_q: "q quitter",
    quit_hint_ctrl_c: "Ctrl+C quitter",
    fallback_title: "Cibles disponibles :",
    fallback_prompt: "Numéro de la cible (q pour annuler) : ",
    fallback_invalid: "Choix invalide, entrez un nombre entre 1 et {} : ",
    makefile_found: "Utilisation de {}",
    no_targets: "Aucune cible trouvée.",
    hint_add_doc: "Documentez les cibles avec `## Description` au-dessus ou `cible: ## Description`.",
    cancelled: "Annulé.",
    executing: "Exécution de make -f {} {}",
    success: "Terminé.",
    unknown_target: "Cible inconnue : {}",
    available_targets: "Cibles disponibles :",
    config_saved: "Configuration enregistrée.",
    history_title: "Cibles récentes",
    history_empty: "Aucun historique.",
    time_just_now: "à l'instant",
    time_minutes_ago: "il y a {} min",
    time_hours_ago: "il y a {} h",
    setup_title: "Configuration de mk",
    setup_language: "Langue",
    setup_key_scheme: "Touches de navigation",
    setup_color_scheme: "Couleurs",
    setup_choice: "Choix [{}] : ",
    setup_invalid: "Entrez un nombre entre 1 et {} : ",
    key_up_prompt: "Appuyez sur la touche HAUT : ",
    key_down_prompt: "Appuyez sur la touche BAS : ",
    key_same_as_up: "(identique à la touche haut, réessayez)",
    keys_confirmed: "Touches personnalisées : {} haut, {} bas",
    raw_mode_unavailable: "(mode brut indisponible, z/s par défaut)",
};

static MESSAGES_ES: Messages = Messages {
    menu_title: "mk - elige un objetivo",
    filter_label: "Filtro: ",
    filter_active_label: "Filtro (activo): ",
    no_matching_targets: "Ningún objetivo coincide",
    target_count: "{} de {}",
    help_arrows: "↑/↓ navegar   / filtrar   intro ejecutar   q salir",
    help_wasd: "↑/↓/w/s navegar   / filtrar   intro ejecutar   q salir",
    help_custom: "↑/↓/{}/{} navegar   / filtrar   intro ejecutar   {}",
    quit_hint_q: "q salir",
    quit_hint_ctrl_c: "Ctrl+C salir",
    fallback_title: "Objetivos disponibles:",
    fallback_prompt: "Número de objetivo (q para cancelar): ",
    fallback_invalid: "Opción no válida, introduce un número entre 1 y {}: ",
    makefile_found: "Usando {}",
    no_targets: "No se encontraron objetivos.",
    hint_add_doc: "Documenta los objetivos con `## Descripción` encima o `objetivo: ## Descripción`.",
    cancelled: "Cancelado.",
    executing: "Ejecutando make -f {} {}",
    success: "Hecho.",
    unknown_target: "Objetivo desconocido: {}",
    available_targets: "Objetivos disponibles:",
    config_saved: "Configuración guardada.",
    history_title: "Objetivos recientes",
    history_empty: "Sin historial.",
    time_just_now: "ahora mismo",
    time_minutes_ago: "hace {} min",
    time_hours_ago: "hace {} h",
    setup_title: "Configuración de mk",
    setup_language: "Idioma",
    setup_key_scheme: "Teclas de navegación",
    setup_color_scheme: "Colores",
    setup_choice: "Opción [{}]: ",
    setup_invalid: "Introduce un número entre 1 y {}: ",
    key_up_prompt: "Pulsa la tecla para ARRIBA: ",
    key_down_prompt: "Pulsa la tecla para ABAJO: ",
    key_same_as_up: "(igual que la tecla arriba, inténtalo de nuevo)",
    keys_confirmed: "Teclas personalizadas: {} arriba, {} abajo",
    raw_mode_unavailable: "(modo raw no disponible, se usa z/s)",
};

static MESSAGES_DE: Messages = Messages {
    menu_title: "mk - Ziel auswählen",
    filter_label: "Filter: ",
    filter_active_label: "Filter (aktiv): ",
    no_matching_targets: "Keine passenden Ziele",
    target_count: "{} von {}",
    help_arrows: "↑/↓ navigieren   / filtern   Enter ausführen   q beenden",
    help_wasd: "↑/↓/w/s navigieren   / filtern   Enter ausführen   q beenden",
    help_custom: "↑/↓/{}/{} navigieren   / filtern   Enter ausführen   {}",
    quit_hint_q: "q beenden",
    quit_hint_ctrl_c: "Strg+C beenden",
    fallback_title: "Verfügbare Ziele:",
    fallback_prompt: "Zielnummer (q zum Abbrechen): ",
    fallback_invalid: "Ungültige Auswahl, bitte eine Zahl zwischen 1 und {} eingeben: ",
    makefile_found: "Verwende {}",
    no_targets: "Keine Ziele gefunden.",
    hint_add_doc: "Ziele mit `## Beschreibung` darüber oder `ziel: ## Beschreibung` dokumentieren.",
    cancelled: "Abgebrochen.",
    executing: "Führe make -f {} {} aus",
    success: "Fertig.",
    unknown_target: "Unbekanntes Ziel: {}",
    available_targets: "Verfügbare Ziele:",
    config_saved: "Konfiguration gespeichert.",
    history_title: "Letzte Ziele",
    history_empty: "Noch kein Verlauf.",
    time_just_now: "gerade eben",
    time_minutes_ago: "vor {} Min.",
    time_hours_ago: "vor {} Std.",
    setup_title: "mk einrichten",
    setup_language: "Sprache",
    setup_key_scheme: "Navigationstasten",
    setup_color_scheme: "Farbschema",
    setup_choice: "Auswahl [{}]: ",
    setup_invalid: "Bitte eine Zahl zwischen 1 und {} eingeben: ",
    key_up_prompt: "Taste für HOCH drücken: ",
    key_down_prompt: "Taste für RUNTER drücken: ",
    key_same_as_up: "(gleiche Taste wie hoch, bitte erneut)",
    keys_confirmed: "Eigene Tasten: {} hoch, {} runter",
    raw_mode_unavailable: "(Raw-Modus nicht verfügbar, z/s wird verwendet)",
};

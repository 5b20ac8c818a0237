use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("`make` exited with a non-success status ({}).", exit_status_label(.0))]
    SubProcessExit(Option<i32>),

    #[error("Error starting `make`: {}", .0)]
    SubProcess(std::io::Error),

    #[error("Error {} {} file at `{}`: {}", .action, .file_description, .path, .original)]
    Yaml {
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    },

    #[error("IO error with {} file at path `{}`: {}", .file_description, .path, .original)]
    Io {
        file_description: String,
        path: String,
        original: std::io::Error,
    },

    #[error("No Makefile found in the current directory.")]
    NoMakefile,

    #[error("No documented targets were found in `{}`.", .path)]
    NoTargets { path: String },

    #[error("Unknown target: `{}`", .0)]
    UnknownTarget(String),

    #[error("Custom key scheme needs two distinct ASCII keys for up and down.")]
    InvalidCustomKeys,

    #[error("Unknown key scheme: \"{}\"", .0)]
    UnknownKeyScheme(String),

    #[error("Unknown color scheme: \"{}\"", .0)]
    UnknownColorScheme(String),

    #[error("Unknown language: \"{}\"", .0)]
    UnknownLanguage(String),

    #[error("Terminal cannot enter raw mode: {}", .0)]
    Terminal(std::io::Error),

    #[error("STDIO error: {}", .0)]
    Stdio(#[from] std::io::Error),
}

fn exit_status_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "killed by signal".to_string(),
    }
}

impl Error {
    pub fn yaml_error(
        action: &str,
        file_description: &str,
        path: &str,
        original: serde_yaml::Error,
    ) -> Self {
        Self::Yaml {
            action: action.to_string(),
            file_description: file_description.to_string(),
            path: path.to_string(),
            original,
        }
    }

    pub fn io_error(file_description: &str, path: &str, original: std::io::Error) -> Self {
        Self::Io {
            file_description: file_description.to_string(),
            path: path.to_string(),
            original,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sub_process_exit_message() {
        assert_eq!(
            Error::SubProcessExit(Some(2)).to_string(),
            "`make` exited with a non-success status (2)."
        );
        assert!(Error::SubProcessExit(None)
            .to_string()
            .contains("killed by signal"));
    }

    #[test]
    fn test_io_error_carries_path() {
        let original = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let error = Error::io_error("Makefile", "/tmp/Makefile", original);
        let message = error.to_string();
        assert!(message.contains("Makefile file at path `/tmp/Makefile`"));
        assert!(message.contains("gone"));
    }
}

//! Errors raised while loading `critpath.toml`.

use super::FieldPath;
use owo_colors::OwoColorize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read `{}`", .0.display())]
    Io(PathBuf, #[source] std::io::Error),

    #[error("malformed config file")]
    Toml(#[from] toml::de::Error),

    // No #[from]: a source() here would print the problems twice
    #[error("{0}")]
    Diagnostics(ConfigDiagnostics),
}

/// One rejected field value.
#[derive(Debug, Clone)]
pub struct Problem {
    pub field: FieldPath,
    pub message: String,
    pub hint: Option<String>,
}

/// Field problems from every section, gathered before failing, plus the
/// keys no section understood.
#[derive(Debug, Default)]
pub struct ConfigDiagnostics {
    problems: Vec<Problem>,
    unknown: Vec<String>,
}

impl ConfigDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, field: FieldPath, message: impl Into<String>) {
        self.problems.push(Problem {
            field,
            message: message.into(),
            hint: None,
        });
    }

    pub fn error_with_hint(
        &mut self,
        field: FieldPath,
        message: impl Into<String>,
        hint: impl Into<String>,
    ) {
        self.problems.push(Problem {
            field,
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn unknown_field(&mut self, path: impl Into<String>) {
        self.unknown.push(path.into());
    }

    /// Report unknown keys on stderr. They never fail loading.
    pub fn print_warnings(&self, file_name: &str) {
        if self.unknown.is_empty() {
            return;
        }
        crate::log!("warning"; "ignoring unknown keys in {}: {}", file_name, self.unknown.join(", "));
    }

    #[cfg(test)]
    pub fn errors(&self) -> &[Problem] {
        &self.problems
    }

    pub fn into_result(self) -> Result<(), Self> {
        if self.problems.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ConfigDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = if self.problems.len() == 1 { "field" } else { "fields" };
        write!(
            f,
            "{}",
            format!("{} invalid config {noun}:", self.problems.len()).red().bold()
        )?;
        for problem in &self.problems {
            write!(f, "\n  {}: {}", problem.field.as_str().cyan(), problem.message)?;
            if let Some(hint) = &problem.hint {
                write!(f, "\n    {} {hint}", "hint:".yellow())?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ConfigDiagnostics {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::strip_ansi;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_io_error_names_path() {
        let err = ConfigError::Io(
            PathBuf::from("critpath.toml"),
            Error::new(ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.to_string(), "cannot read `critpath.toml`");
    }

    #[test]
    fn test_diagnostics_display_lists_every_problem() {
        let mut diag = ConfigDiagnostics::new();
        diag.error(FieldPath::new("cache.ttl"), "must be greater than 0");
        diag.error_with_hint(FieldPath::new("site.home_url"), "invalid URL", "use https://");

        let display = strip_ansi(&diag.to_string()).into_owned();
        assert_eq!(
            display,
            "2 invalid config fields:\n  cache.ttl: must be greater than 0\n  site.home_url: invalid URL\n    hint: use https://"
        );
        assert!(diag.into_result().is_err());
    }

    #[test]
    fn test_unknown_keys_alone_are_not_errors() {
        let mut diag = ConfigDiagnostics::new();
        diag.unknown_field("site.home");
        assert!(diag.into_result().is_ok());
    }
}

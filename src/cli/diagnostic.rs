//! Miette-based error diagnostics for CLI error presentation.

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use crate::error::{ConfigError, Error};

use super::output;

/// Configuration parse error with the offending region of the file labelled.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(econe_risk::config))]
pub struct ConfigDiagnostic {
    pub message: String,

    #[source_code]
    pub src: miette::NamedSource<String>,

    #[label("here")]
    pub span: SourceSpan,

    #[help]
    pub help: Option<String>,
}

impl ConfigDiagnostic {
    /// Build a diagnostic for a TOML parse failure, if it carries a span.
    #[must_use]
    pub fn from_parse_error(error: &ConfigError) -> Option<Self> {
        let ConfigError::Parse {
            path,
            content,
            source,
        } = error
        else {
            return None;
        };
        let span = source.span()?;

        Some(Self {
            message: format!("failed to parse {}", path.display()),
            src: miette::NamedSource::new(path.display().to_string(), content.clone()),
            span: (span.start, span.end.saturating_sub(span.start)).into(),
            help: Some(source.message().to_string()),
        })
    }
}

/// Print a command error to stderr.
pub fn report(error: &Error) {
    if let Error::Config(config_error) = error {
        if let Some(diagnostic) = ConfigDiagnostic::from_parse_error(config_error) {
            eprintln!("{:?}", miette::Report::new(diagnostic));
            return;
        }
    }
    output::error(&error.to_string());
}

//! Handler for the `check` command.

use std::process::ExitCode;

use crate::adapter::model::{load_model, read_artifact};
use crate::cli::{load_config, output, CheckArgs, Cli};
use crate::domain::MODEL_VERSION;
use crate::error::Result;
use crate::port::ModelHandle;

/// Validate configuration and try loading the classifier.
///
/// Exits non-zero unless the classifier is ready to score.
pub fn execute(cli: &Cli, args: &CheckArgs) -> Result<ExitCode> {
    let mut config = load_config(cli)?;
    if let Some(ref model) = args.model {
        config.model.path = model.clone();
    }

    output::section("Configuration");
    match &cli.config {
        Some(path) => output::key_value("File", path.display()),
        None => output::key_value("File", "(defaults)"),
    }
    output::key_value("Bind", &config.server.bind);
    output::key_value(
        "Logging",
        format!("{} ({})", config.logging.level, config.logging.format),
    );
    output::ok("Configuration is valid");

    let path = &config.model.path;
    output::section("Model");
    output::key_value("Artifact", path.display());
    output::key_value("Version", MODEL_VERSION);

    match load_model(path) {
        ModelHandle::Ready(model) => {
            output::ok(&format!("Classifier ready ({})", model.name()));
            Ok(ExitCode::SUCCESS)
        }
        ModelHandle::Malformed { reason } => {
            output::error(&format!("Classifier malformed: {reason}"));
            Ok(ExitCode::FAILURE)
        }
        ModelHandle::Unavailable => {
            let reason = if path.exists() {
                read_artifact(path)
                    .err()
                    .map_or_else(|| "load failed".to_string(), |e| e.to_string())
            } else {
                "artifact not found".to_string()
            };
            output::warn(&format!("Classifier unavailable: {reason}"));
            output::warn("Requests will be answered with riskLevel UNKNOWN");
            Ok(ExitCode::FAILURE)
        }
    }
}

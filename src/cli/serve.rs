//! Handler for the `serve` command.

use std::process::ExitCode;

use tracing::info;

use crate::app::App;
use crate::cli::{load_config, Cli, ServeArgs};
use crate::error::Result;

/// Execute the serve command.
pub async fn execute(cli: &Cli, args: &ServeArgs) -> Result<ExitCode> {
    let mut config = load_config(cli)?;

    if let Some(ref bind) = args.bind {
        config.server.bind = bind.clone();
    }
    if let Some(ref model) = args.model {
        config.model.path = model.clone();
    }
    if let Some(ref level) = args.log_level {
        config.logging.level = level.clone();
    }
    if args.json_logs {
        config.logging.format = "json".to_string();
    }
    config.validate()?;

    config.init_logging();
    info!(
        bind = %config.server.bind,
        model = %config.model.path.display(),
        "econe-risk starting"
    );

    App::run(config).await?;
    Ok(ExitCode::SUCCESS)
}

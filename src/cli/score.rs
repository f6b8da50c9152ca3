//! Handler for the `score` command.

use std::io::Read;
use std::path::Path;
use std::process::ExitCode;

use serde_json::{json, Value};

use crate::adapter::http::validate_request;
use crate::app::App;
use crate::cli::{load_config, Cli, ScoreArgs};
use crate::domain::FeatureRow;
use crate::error::Result;

/// Execute the score command.
pub fn execute(cli: &Cli, args: &ScoreArgs) -> Result<ExitCode> {
    let mut config = load_config(cli)?;
    if let Some(ref model) = args.model {
        config.model.path = model.clone();
    }
    config.init_logging();

    let raw = read_input(args.input.as_deref())?;
    let mut payload: Value = serde_json::from_str(&raw)?;

    if args.validate {
        match validate_request(&payload) {
            Ok(validated) => payload = validated,
            Err(errors) => {
                println!("{}", serde_json::to_string_pretty(&errors)?);
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    let result = App::scorer(&config).predict_risk(&payload);

    let output = if args.features {
        json!({
            "features": FeatureRow::from_value(&payload),
            "result": result,
        })
    } else {
        serde_json::to_value(&result)?
    };
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(ExitCode::SUCCESS)
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => Ok(std::fs::read_to_string(path)?),
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

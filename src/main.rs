use std::process::ExitCode;

use clap::Parser;

use econe_risk::cli::{check, diagnostic, score, serve, Cli, Commands};

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Serve(args) => serve::execute(&cli, args).await,
        Commands::Score(args) => score::execute(&cli, args),
        Commands::Check(args) => check::execute(&cli, args),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            diagnostic::report(&e);
            ExitCode::FAILURE
        }
    }
}

//! sp - School portal CLI
//!
//! Signs in against the portal API and issues tenant-scoped requests.
//!
//! # Examples
//!
//! ```bash
//! # Sign in from a school's subdomain
//! sp --host escola1.dominio.com login --email maria@escola1.com
//!
//! # Call an endpoint with the stored session
//! sp get /api/v1/alunos --pretty
//!
//! # Would a page for professors render?
//! sp guard PROFESSOR
//! ```

use sp_auth::NavigationKind;
use sp_client::cli::Cli;
use sp_client::error::Result as AppErrorResult;
use sp_client::{App, logger};
use sp_config::Config;

use std::process::ExitCode;

use clap::Parser;
use serde_json::Value;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let pretty = cli.pretty;

    let app = match setup(&cli) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = app.execute(cli.command).await;
    let mut code = print_result(result, pretty);

    if let Some(navigation) = app.navigation() {
        let kind = match navigation.kind {
            NavigationKind::Push => "redirect",
            NavigationKind::Hard => "reload",
        };
        eprintln!("Navigation ({}): {}", kind, navigation.path);
        code = ExitCode::FAILURE;
    }

    code
}

fn setup(cli: &Cli) -> AppErrorResult<App> {
    let config = Config::load()?;
    config.validate()?;

    let log_file = config.log_file_path()?;
    logger::initialize(
        config.logging.level,
        log_file.as_deref(),
        config.logging.colored,
    )?;
    config.log_summary();

    App::bootstrap(&config, cli.server.as_deref(), cli.host.as_deref())
}

fn print_result(result: AppErrorResult<Value>, pretty: bool) -> ExitCode {
    match result {
        Ok(value) => {
            let output = if pretty {
                serde_json::to_string_pretty(&value)
            } else {
                serde_json::to_string(&value)
            };

            match output {
                Ok(json) => {
                    println!("{}", json);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("Error serializing response: {}", e);
                    ExitCode::FAILURE
                }
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

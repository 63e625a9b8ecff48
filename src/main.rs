//! csv-workbench binary entry point.

use std::process::ExitCode;
use std::sync::Arc;

use csv_workbench::api::{self, AppState};
use csv_workbench::config::Config;
use csv_workbench::{cli, logging, SessionStore};
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let args = match cli::parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("error: {}", e);
            eprintln!("try 'csv-workbench --help'");
            return ExitCode::from(2);
        }
    };

    if args.help {
        cli::print_help();
        return ExitCode::SUCCESS;
    }
    if args.version {
        cli::print_version();
        return ExitCode::SUCCESS;
    }

    let config = match Config::load(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    logging::init(config.log_filter());

    info!("csv-workbench v{}", env!("CARGO_PKG_VERSION"));

    let server_config = match config.to_server_config() {
        Ok(server_config) => server_config,
        Err(e) => {
            error!("invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let state = AppState {
        store: Arc::new(SessionStore::new()),
        preview_rows: config.limits.preview_rows,
    };

    info!(
        "Dashboard at http://{} (upload cap {} MiB)",
        server_config.bind_address(),
        config.limits.max_upload_mb
    );

    if let Err(e) = api::serve_with_state(server_config, state).await {
        error!("server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

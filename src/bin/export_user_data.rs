//! Operator script: writes one user's export snapshot to disk.
//!
//! ```text
//! resonance-export <USER_ID> [--out-dir exports]
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use resonance::adapters::export::DiskSink;
use resonance::application::{ExportUserDataHandler, ExportUserDataQuery};
use resonance::config::AppConfig;
use resonance::domain::export::ExportError;
use resonance::domain::foundation::UserId;
use resonance::startup::{init_tracing, user_data_reader, StartupError};

/// Export everything a Resonance user owns into a JSON file.
#[derive(Parser, Debug)]
#[command(name = "resonance-export", version, about)]
struct Args {
    /// Identity of the user to export.
    user_id: Option<String>,

    /// Directory to write the export file into.
    #[arg(short = 'o', long = "out-dir")]
    out_dir: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
enum ScriptError {
    #[error(transparent)]
    Startup(#[from] StartupError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config.server);

    match run(args, config).await {
        Ok(path) => {
            tracing::info!(path = %path.display(), "export written");
            ExitCode::SUCCESS
        }
        Err(ScriptError::Export(ExportError::MissingArgument)) => {
            tracing::error!("{}", ExportError::MissingArgument.user_message());
            ExitCode::FAILURE
        }
        Err(ScriptError::Export(e)) => {
            tracing::error!(
                error = %e,
                failed = ?e.failed_resources(),
                "{}",
                e.user_message()
            );
            ExitCode::FAILURE
        }
        Err(ScriptError::Startup(e)) => {
            tracing::error!(error = %e, "export aborted during startup");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args, config: AppConfig) -> Result<PathBuf, ScriptError> {
    let raw_id = args
        .user_id
        .filter(|id| !id.trim().is_empty())
        .ok_or(ExportError::MissingArgument)?;
    let user_id = UserId::new(raw_id).map_err(ExportError::from)?;

    config
        .validate_for_export()
        .map_err(StartupError::from)?;

    let out_dir = args.out_dir.unwrap_or(config.export.out_dir);
    let reader = user_data_reader(&config.store)?;
    let handler = ExportUserDataHandler::new(reader);

    tracing::info!(%user_id, out_dir = %out_dir.display(), "exporting user data");
    let path = handler
        .deliver(ExportUserDataQuery { user_id }, &DiskSink::new(out_dir))
        .await?;

    Ok(path)
}

use archiver_core::config::{self, AppConfig, ConflictPolicy};
use clap::Parser;
use cli::error::RunError;
use cli::run::{self, RunOptions};
use std::process::ExitCode;
use tracing::Level;

#[derive(Parser)]
#[command(name = "gcode-archiver")]
#[command(
    about = "Keep the N most recently used G-code files and archive the rest",
    long_about = "Queries Moonraker's gcode_metadata namespace, ranks files by \
                  max(modified, print_start_time) and moves everything but the newest \
                  --keep files from --gcode-dir into --archive-dir."
)]
struct Cli {
    /// Path to config TOML
    #[arg(short, long)]
    config: Option<String>,
    /// Moonraker host (default: localhost)
    #[arg(long)]
    host: Option<String>,
    /// Moonraker port (default: 7125)
    #[arg(long)]
    port: Option<u16>,
    /// Moonraker endpoint path (default: /server/database/item?namespace=gcode_metadata)
    #[arg(long)]
    endpoint: Option<String>,
    /// HTTP timeout in seconds (default: 10)
    #[arg(long)]
    timeout: Option<f64>,
    /// Number of most-recent files to keep (default: 42)
    #[arg(long)]
    keep: Option<usize>,
    /// Directory containing G-code files (default: ~/printer_data/gcode)
    #[arg(long)]
    gcode_dir: Option<String>,
    /// Directory to move archived files into (default: ~/printer_data/gcode/archive)
    #[arg(long)]
    archive_dir: Option<String>,
    /// Print mv commands without moving files
    #[arg(long, default_value_t = false)]
    dry_run: bool,
    /// What to do when the archive already has the file: overwrite (default)|skip|rename
    #[arg(long)]
    conflict: Option<ConflictPolicy>,
    /// Print keep/archive listings and per-file skips
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
    /// Output a JSON summary instead of text
    #[arg(long, default_value_t = false)]
    json: bool,
}

impl Cli {
    fn apply_overrides(&self, cfg: &mut AppConfig) {
        if let Some(host) = &self.host {
            cfg.server.host = host.clone();
        }
        if let Some(port) = self.port {
            cfg.server.port = port;
        }
        if let Some(endpoint) = &self.endpoint {
            cfg.server.endpoint = endpoint.clone();
        }
        if let Some(timeout) = self.timeout {
            cfg.server.timeout_secs = timeout;
        }
        if let Some(keep) = self.keep {
            cfg.retention.keep = keep;
        }
        if let Some(dir) = &self.gcode_dir {
            cfg.paths.gcode_dir = dir.clone();
        }
        if let Some(dir) = &self.archive_dir {
            cfg.paths.archive_dir = dir.clone();
        }
        if self.dry_run {
            cfg.safety.dry_run = true;
        }
        if let Some(conflict) = self.conflict {
            cfg.safety.conflict = conflict;
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run_cli(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.user_message());
            ExitCode::from(e.exit_code())
        }
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run_cli(cli: &Cli) -> Result<(), RunError> {
    let mut cfg = config::load(cli.config.as_deref())?;
    cli.apply_overrides(&mut cfg);
    let source = run::build_source(&cfg)?;

    let opts = RunOptions {
        verbose: cli.verbose,
        json: cli.json,
    };
    let mut out = std::io::stdout();
    let mut err = std::io::stderr();
    run::run(&cfg, &source, opts, &mut out, &mut err).await?;
    Ok(())
}

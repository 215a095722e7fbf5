mod collectors;
mod config;
mod extract;
mod privilege;
mod snapshot;
mod sources;
mod sysctl_diff;
mod writer;

use clap::{Parser, Subcommand};
use collectors::collect_snapshot;
use config::Config;
use sources::{HostSource, Source};
use std::path::{Path, PathBuf};
use std::time::{Instant, SystemTime, UNIX_EPOCH};
use sysinfo::{System, SystemExt};
use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use writer::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "hostaudit")]
#[command(version, about = "Point-in-time host diagnostic snapshot")]
struct Cli {
    #[arg(long, env = "HOSTAUDIT_CONFIG")]
    config: Option<PathBuf>,
    #[arg(long)]
    print_default_config: bool,
    #[arg(long)]
    output_dir: Option<String>,
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
    #[arg(long)]
    sequential: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Collect a snapshot of this host (default).
    Collect,
    /// Compare kernel parameters of two hosts.
    SysctlDiff { left: PathBuf, right: PathBuf },
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();
    if cli.print_default_config {
        print!("{}", Config::example_yaml());
        return;
    }

    match &cli.command {
        Some(Commands::SysctlDiff { left, right }) => run_sysctl_diff(left, right),
        Some(Commands::Collect) | None => {
            let cfg = load_config(&cli);
            run_collect(cfg).await;
        }
    }
}

fn load_config(cli: &Cli) -> Config {
    let mut cfg = match &cli.config {
        Some(path) => match Config::load_from_file(path) {
            Ok(cfg) => cfg,
            Err(err) => {
                error!(error = %err, "не удалось загрузить конфигурацию");
                std::process::exit(1);
            }
        },
        None => Config::default(),
    };
    if let Some(dir) = &cli.output_dir {
        cfg.output_dir = dir.clone();
    }
    if let Some(format) = cli.format {
        cfg.format = format;
    }
    if cli.sequential {
        cfg.parallel = false;
    }
    if let Err(err) = cfg.validate() {
        error!(error = %err, "некорректная конфигурация");
        std::process::exit(1);
    }
    cfg
}

#[derive(Debug, Error)]
enum AuditError {
    #[error("hostaudit должен запускаться от имени root")]
    NotRoot,
    #[error(transparent)]
    Write(#[from] writer::WriteError),
}

async fn run_collect(cfg: Config) {
    let (command_timeout, file_timeout) =
        match (cfg.command_timeout_duration(), cfg.file_timeout_duration()) {
            (Ok(c), Ok(f)) => (c, f),
            (Err(err), _) | (_, Err(err)) => {
                error!(error = %err, "некорректная конфигурация");
                std::process::exit(1);
            }
        };

    let started = Instant::now();
    let source = HostSource::new(&cfg.sysroot, command_timeout, file_timeout);
    match collect_to_artifact(&cfg, privilege::is_root(), &source, &host_name(), now_unix()).await
    {
        Ok(path) => {
            info!(
                path = %path.display(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                finished_at = %humantime::format_rfc3339_seconds(SystemTime::now()),
                "сбор завершён"
            );
            println!("Generated audit file: {}", path.display());
        }
        Err(err) => {
            error!(error = %err, "сбор аудита не выполнен");
            std::process::exit(1);
        }
    }
}

/// The privilege gate comes first: without root nothing is read and no
/// artifact is written.
async fn collect_to_artifact<S: Source>(
    cfg: &Config,
    is_root: bool,
    source: &S,
    host: &str,
    unix_ts: i64,
) -> Result<PathBuf, AuditError> {
    if !is_root {
        return Err(AuditError::NotRoot);
    }

    info!(
        sysroot = %cfg.sysroot,
        parallel = cfg.parallel,
        format = cfg.format.extension(),
        "запуск сбора"
    );
    let snapshot = collect_snapshot(source, cfg.parallel).await;

    let name = writer::artifact_name(host, unix_ts, cfg.format);
    let body = writer::render(&snapshot, cfg.format)?;
    Ok(writer::write_artifact(Path::new(&cfg.output_dir), &name, &body)?)
}

fn run_sysctl_diff(left: &Path, right: &Path) {
    let params = sysctl_diff::load_params(left)
        .and_then(|l| sysctl_diff::load_params(right).map(|r| (l, r)));
    let (left_params, right_params) = match params {
        Ok(pair) => pair,
        Err(err) => {
            error!(error = %err, "не удалось прочитать параметры sysctl");
            std::process::exit(1);
        }
    };

    for change in sysctl_diff::diff(&left_params, &right_params) {
        println!("{change}");
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn host_name() -> String {
    System::new()
        .host_name()
        .filter(|h| !h.trim().is_empty())
        .unwrap_or_else(|| "unknown-host".to_string())
}

fn now_unix() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use vmax_xray::config::{ArrayConfig, Config};
use vmax_xray::inventory;
use vmax_xray::report::{workbook_filename, Report, XlsxBackend};
use vmax_xray::unisphere::UnisphereClient;

/// Vmax-XRay - Tool for Inventory a VMAX
#[derive(Parser, Debug)]
#[command(name = "vmax-xray", version, about, long_about = None)]
struct Args {
    /// Configuration file listing the arrays (YAML)
    config: PathBuf,

    /// Directory to store the inventory files
    #[arg(short, long, default_value = ".")]
    path: PathBuf,

    /// Enable the debug mode (same as --log-level debug)
    #[arg(short, long)]
    debug: bool,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    log_level: LogLevel,

    /// Write logs to a file instead of stderr; without a path, use the default log location
    #[arg(long)]
    log_file: Option<Option<PathBuf>>,

    /// Add a sheet with the details of the array itself
    #[arg(long)]
    array_details: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

impl Args {
    fn effective_log_level(&self) -> LogLevel {
        if self.debug && self.log_level != LogLevel::Trace {
            LogLevel::Debug
        } else {
            self.log_level
        }
    }
}

fn setup_logging(
    level: LogLevel,
    log_file: Option<&Path>,
) -> anyhow::Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let Some(tracing_level) = level.to_tracing_level() else {
        return Ok(None);
    };

    let Some(log_path) = log_file else {
        tracing_subscriber::fmt()
            .with_max_level(tracing_level)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
        return Ok(None);
    };

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("vmax-xray started with log level: {:?}", level);
    tracing::info!("Log file: {:?}", log_path);

    Ok(Some(guard))
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("vmax-xray").join("vmax-xray.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".vmax-xray").join("vmax-xray.log");
    }
    PathBuf::from("vmax-xray.log")
}

fn main() {
    let args = Args::parse();

    let log_file = args
        .log_file
        .clone()
        .map(|path| path.unwrap_or_else(get_log_path));

    let log_guard = match setup_logging(args.effective_log_level(), log_file.as_deref()) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("Error: {err:#}");
            std::process::exit(1);
        }
    };

    let code = run(&args);

    // process::exit skips destructors; flush the log writer first
    drop(log_guard);
    std::process::exit(code);
}

/// Inventory every configured array, returning the process exit code
fn run(args: &Args) -> i32 {
    let config = match Config::load(&args.config) {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("Error while parsing configuration: {}", err);
            return err.exit_code();
        }
    };

    if config.arrays.is_empty() {
        tracing::warn!("No array configured in {}", args.config.display());
        return 0;
    }

    let mut exit_code = 0;
    for array in &config.arrays {
        let span = tracing::info_span!("array", sid = %array.sid);
        let _enter = span.enter();

        if let Err(err) = inventory_array(array, args) {
            tracing::error!("Inventory of {} failed: {}", array.sid, err);
            if exit_code == 0 {
                exit_code = err.exit_code();
            }
        }
    }

    exit_code
}

fn inventory_array(array: &ArrayConfig, args: &Args) -> vmax_xray::Result<()> {
    let collector = inventory::create(&array.sid)?.with_array_details(args.array_details);

    let filename = workbook_filename(&array.sid);
    let backend = XlsxBackend::create(&args.path, &filename, &array.sid)?;
    let path = backend.path().to_path_buf();

    let client = UnisphereClient::new(array)?;
    client.check_version()?;

    let outcomes = collector.collect(Report::new(backend), &client)?;
    for outcome in &outcomes {
        tracing::debug!("{}: {} records", outcome.resource, outcome.records);
    }
    tracing::info!("Inventory written to {}", path.display());

    Ok(())
}

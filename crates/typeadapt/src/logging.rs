//! Stderr log setup for binaries built on typeadapt.
//!
//! The chosen level applies to the framework crates (boundary rejections at
//! `debug`, acceptances at `trace`) and to the calling binary. Everything
//! else, such as the schema engine, stays at `warn` or quieter.

use clap::{Args, ValueEnum};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Log targets of the framework crates.
pub const FRAMEWORK_TARGETS: [&str; 5] = [
    "typeadapt_adapter",
    "typeadapt_schema",
    "typeadapt_method",
    "typeadapt_router",
    "typeadapt_client",
];

#[derive(Copy, Clone, Debug, Default, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Copy, Clone, Debug, Default, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_filter(self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

/// `--log-format` / `--log-level`, for `#[command(flatten)]`.
#[derive(Args, Copy, Clone, Debug, Default)]
pub struct LogArgs {
    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    pub log_format: LogFormat,

    /// Minimum level for framework and application logs (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    pub log_level: LogLevel,
}

impl LogArgs {
    /// Install the subscriber; `app` is the calling binary's target,
    /// usually `module_path!()`.
    pub fn init(&self, app: &str) {
        init_logging(self.log_format, self.log_level, app);
    }
}

/// Per-target filter: `level` for the framework and `app`, at most `warn`
/// for everything else.
pub fn targets(level: LogLevel, app: &str) -> Targets {
    let level = level.as_filter();
    FRAMEWORK_TARGETS
        .iter()
        .copied()
        .chain(std::iter::once(app))
        .fold(
            Targets::new().with_default(level.min(LevelFilter::WARN)),
            |filter, target| filter.with_target(target, level),
        )
}

/// Install a stderr subscriber. A second call is a no-op.
pub fn init_logging(format: LogFormat, level: LogLevel, app: &str) {
    let filter = targets(level, app);
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(true);

    let registry = tracing_subscriber::registry().with(filter);
    let _ = match format {
        LogFormat::Text => registry.with(layer).try_init(),
        LogFormat::Json => registry.with(layer.json()).try_init(),
    };
}

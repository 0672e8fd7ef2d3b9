use std::path::{Path, PathBuf};

use ahh::AxisConvention;
use clap::ValueHint;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, clap::ValueEnum)]
pub enum LogFormat {
    Compact,
    Full,
    Pretty,
    Json,
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Compact => f.write_str("compact"),
            LogFormat::Full => f.write_str("full"),
            LogFormat::Pretty => f.write_str("pretty"),
            LogFormat::Json => f.write_str("json"),
        }
    }
}

/// How polygons with more than 3 corners are split.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default, clap::ValueEnum)]
pub enum Triangulator {
    /// Ear clipping; handles concave polygons
    #[default]
    EarClip,
    /// Fan around each polygon's first corner; convex polygons only
    Fan,
}

impl std::fmt::Display for Triangulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Triangulator::EarClip => f.write_str("ear-clip"),
            Triangulator::Fan => f.write_str("fan"),
        }
    }
}

/// Export one object of a Wavefront OBJ scene as `.ahh` geometry.
#[derive(Debug, clap::Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Logging output filters; comma-separated
    #[arg(
        short,
        long,
        default_value = "warn,ahh=info,hedron=info,ahh_export=info",
        env = "AHH_LOG_FILTER"
    )]
    pub log_filter: String,
    /// Logging output format
    #[arg(long, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
    /// Output file; defaults to the input path with an `ahh` extension
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,
    /// Name of the object to export; defaults to the first object in the file
    #[arg(long, value_name = "NAME")]
    pub object: Option<String>,
    /// Polygon triangulation method
    #[arg(long, default_value_t = Triangulator::EarClip)]
    pub triangulator: Triangulator,
    /// Digits written after the decimal point
    #[arg(long, default_value_t = ahh::ser::DEFAULT_PRECISION, value_name = "N")]
    pub precision: usize,
    /// Write coordinates as they are in the source, instead of converting Z-up to Y-up
    #[arg(long)]
    pub preserve_axes: bool,
    /// OBJ file to export
    #[arg(required = true, value_hint = ValueHint::FilePath)]
    pub input: PathBuf,
}

impl Cli {
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_output(&self.input))
    }

    pub fn export_options(&self) -> ahh::ExportOptions {
        ahh::ExportOptions {
            precision: self.precision,
            convention: if self.preserve_axes {
                AxisConvention::Preserve
            } else {
                AxisConvention::ZUpToYUp
            },
        }
    }
}

fn default_output(input: &Path) -> PathBuf {
    input.with_extension("ahh")
}

/// Set up pretty log output
pub(crate) fn initialize_tracing(log_filter: &str, log_format: LogFormat) {
    let tsub = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::OffsetTime::new(
            time::UtcOffset::current_local_offset().unwrap_or_else(|e| {
                tracing::warn!("couldn't get local time offset: {:?}", e);
                time::UtcOffset::UTC
            }),
            time::macros::format_description!("[hour]:[minute]:[second]"),
        ))
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_env_filter(log_filter);

    match log_format {
        LogFormat::Compact => tsub.compact().init(),
        LogFormat::Full => tsub.init(),
        LogFormat::Pretty => tsub.pretty().init(),
        LogFormat::Json => tsub.json().init(),
    }
}

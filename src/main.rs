use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use zodiac_clock::{AppError, ClockConfig, SystemClock, TimeSource, ZodiacClock};

/// Animated zodiac clock with hour flames and timezone switching.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Window title
    #[arg(long, default_value = "Zodiac Clock")]
    title: String,

    /// Starting timezone (IANA name, one of the selectable zones)
    #[arg(long, default_value = "Europe/Madrid")]
    timezone: String,

    /// Start from this wall-clock time instead of the real one (HH:MM:SS)
    #[arg(long)]
    time: Option<String>,

    /// TrueType font for numerals and labels
    #[arg(long)]
    font: Option<PathBuf>,

    /// Directory holding the zodiac sign images
    #[arg(long, default_value = "assets/zodiac")]
    assets: PathBuf,

    /// Frame rate limit
    #[arg(long, default_value_t = 60.0)]
    fps: f64,
}

fn run(args: Args) -> Result<(), AppError> {
    let timezone_index = TimeSource::with_timezone_name(SystemClock, &args.timezone)?.timezone_index();

    let config = ClockConfig::builder()
        .title(args.title)
        .timezone_index(timezone_index)
        .maybe_initial_time(args.time)
        .maybe_font_path(args.font)
        .asset_dir(args.assets)
        .max_framerate(args.fps)
        .build();

    ZodiacClock::new(config).show()
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

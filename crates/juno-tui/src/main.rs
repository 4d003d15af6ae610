//! Terminal wallet home screen for Juno.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Mutex;

use clap::Parser;
use juno_core::MotionConfig;
use juno_tui::app::JunoApp;
use juno_tui::screens::ScreenId;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "juno",
    about = "Wallet home screen with rerolling balances and pull to refresh",
    version
)]
struct Args {
    /// Screen to start on (button, pull)
    #[arg(long, default_value = "button")]
    screen: String,

    /// Seed for the generated balances
    #[arg(long, default_value = "42")]
    seed: u64,

    /// TOML file overriding motion settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log file (defaults to juno.log in the temp directory)
    #[arg(long)]
    log: Option<PathBuf>,

    /// Print the effective motion config as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() {
    let args = Args::parse();

    let Some(screen) = ScreenId::from_name(&args.screen) else {
        eprintln!("error: unknown screen '{}' (expected button or pull)", args.screen);
        process::exit(1);
    };

    let config = match &args.config {
        Some(path) => match MotionConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("error: {e}");
                process::exit(1);
            }
        },
        None => MotionConfig::default(),
    };

    if args.print_config {
        match config.to_toml_string() {
            Ok(rendered) => print!("{rendered}"),
            Err(e) => {
                eprintln!("error: {e}");
                process::exit(1);
            }
        }
        return;
    }

    let log_path = args
        .log
        .unwrap_or_else(|| std::env::temp_dir().join("juno.log"));
    if let Err(e) = init_logging(&log_path) {
        eprintln!("error: {e}");
        process::exit(1);
    }
    info!(?screen, seed = args.seed, ?config, "starting");

    let app = JunoApp::new(screen, config, args.seed);
    if let Err(e) = juno_tui::terminal::run(app) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

/// Send logs to a file so they do not tear the alternate screen.
fn init_logging(path: &Path) -> Result<(), String> {
    let file = File::create(path).map_err(|e| format!("failed to open {}: {e}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

//! Image checker CLI
//!
//! Usage:
//!     image-checker [DIR] [--black 5] [--white 250] [--auto-move] [--no-prompt]

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use image_checker::analysis::ConsoleProgress;
use image_checker::prompt::{ConfigProvider, FixedConfig, InteractivePrompt};
use image_checker::{CancellationToken, ImageChecker, MoveChoice, ScanConfig};

/// Exit code used after Ctrl-C (128 + SIGINT)
const EXIT_INTERRUPTED: u8 = 130;

#[derive(Parser, Debug)]
#[command(
    name = "image-checker",
    version,
    about = "Find predominantly black or white JPEGs and move them aside"
)]
struct Args {
    /// Folder containing the JPEG files
    #[arg(default_value = ".")]
    directory: PathBuf,

    /// Max average intensity classified as black (0-255)
    #[arg(long)]
    black: Option<u8>,

    /// Min average intensity classified as white (0-255)
    #[arg(long)]
    white: Option<u8>,

    /// Move flagged images without asking
    #[arg(long)]
    auto_move: bool,

    /// Buckets to move when not auto-moving: b, w, a or n (implies --no-prompt)
    #[arg(long = "move", value_name = "CHOICE")]
    move_choice: Option<String>,

    /// Never ask questions; use flags, config file and defaults
    #[arg(long)]
    no_prompt: bool,

    /// JSON scan configuration (thresholds and limits)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where to write the black/white list files
    #[arg(long, default_value = ".")]
    report_dir: PathBuf,

    /// Log per-file diagnostics
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    /// Config file first, then explicit flags on top
    fn base_config(&self) -> anyhow::Result<ScanConfig> {
        let mut config = match &self.config {
            Some(path) => ScanConfig::load(path)?,
            None => ScanConfig::default(),
        };
        if let Some(black) = self.black {
            config.black_tolerance = black;
        }
        if let Some(white) = self.white {
            config.white_tolerance = white;
        }
        config.auto_move |= self.auto_move;
        Ok(config)
    }

    fn is_scripted(&self) -> bool {
        self.no_prompt || self.move_choice.is_some()
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "warn,image_checker=debug"
    } else {
        "warn,image_checker=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(std::io::stderr)
        .init();
}

/// Ctrl-C cancels a running scan; outside a scan it ends the process
fn install_interrupt_handler(cancel: CancellationToken, scanning: Arc<AtomicBool>) {
    let result = ctrlc::set_handler(move || {
        if scanning.load(Ordering::SeqCst) {
            cancel.cancel();
        } else {
            println!("\n🚨 Program terminated by user");
            std::process::exit(EXIT_INTERRUPTED as i32);
        }
    });

    if let Err(e) = result {
        tracing::warn!("Failed to install Ctrl-C handler: {}", e);
    }
}

fn run(args: Args) -> anyhow::Result<ExitCode> {
    let cancel = CancellationToken::new();
    let scanning = Arc::new(AtomicBool::new(false));
    install_interrupt_handler(cancel.clone(), scanning.clone());

    println!("⚡ Image Analyzer - Black & White Detection");

    let base = args.base_config()?;
    let mut provider: Box<dyn ConfigProvider> = if args.is_scripted() {
        let choice = args
            .move_choice
            .as_deref()
            .map(|c| c.parse().unwrap_or(MoveChoice::None))
            .unwrap_or(MoveChoice::None);
        Box::new(FixedConfig::new(base, choice))
    } else {
        Box::new(InteractivePrompt::stdio())
    };

    let config = provider.scan_config(base);
    if let Err(e) = config.validate() {
        // Thresholds are still usable as given, the classifier does not rely on ordering
        tracing::warn!("{}", e);
    }

    let checker = ImageChecker::new(&args.directory, config).with_report_dir(&args.report_dir);

    scanning.store(true, Ordering::SeqCst);
    let summary = checker.scan(cancel.clone(), &ConsoleProgress);
    scanning.store(false, Ordering::SeqCst);

    let outcome = checker.finish(summary?, provider.as_mut())?;

    if outcome.summary.interrupted {
        return Ok(ExitCode::from(EXIT_INTERRUPTED));
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("🚨 Fatal error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

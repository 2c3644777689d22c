/// Run configuration providers
///
/// The scan itself never talks to the terminal. Thresholds, auto-move and
/// the move choice come from a `ConfigProvider`: interactive prompts for the
/// CLI, a fixed value for scripted runs and tests.

use std::io::{self, BufRead, Write};

use crate::state::config::{DEFAULT_BLACK_TOLERANCE, DEFAULT_WHITE_TOLERANCE};
use crate::state::{RunSummary, ScanConfig};
use crate::storage::MoveChoice;

pub trait ConfigProvider {
    /// Final configuration for the run, starting from `base`
    fn scan_config(&mut self, base: ScanConfig) -> ScanConfig;

    /// Which flagged buckets to move. Only asked when auto-move is off
    /// and the run flagged something.
    fn move_choice(&mut self, summary: &RunSummary) -> MoveChoice;
}

/// Answers every question with preset values
#[derive(Debug, Clone, Copy)]
pub struct FixedConfig {
    pub config: ScanConfig,
    pub choice: MoveChoice,
}

impl FixedConfig {
    pub fn new(config: ScanConfig, choice: MoveChoice) -> Self {
        Self { config, choice }
    }
}

impl ConfigProvider for FixedConfig {
    fn scan_config(&mut self, _base: ScanConfig) -> ScanConfig {
        self.config
    }

    fn move_choice(&mut self, _summary: &RunSummary) -> MoveChoice {
        self.choice
    }
}

/// Asks on a line-based terminal
pub struct InteractivePrompt<R, W> {
    input: R,
    output: W,
}

impl InteractivePrompt<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> InteractivePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `question` and read one trimmed line. EOF or a read error reads as empty.
    fn ask(&mut self, question: &str) -> String {
        let _ = write!(self.output, "{}", question);
        let _ = self.output.flush();

        let mut line = String::new();
        if let Err(e) = self.input.read_line(&mut line) {
            tracing::warn!("Failed to read answer: {}", e);
            return String::new();
        }
        line.trim().to_string()
    }

    fn ask_yes_no(&mut self, question: &str) -> bool {
        self.ask(question).eq_ignore_ascii_case("y")
    }

    /// Empty answer keeps `default`, anything unparsable is an error
    fn ask_tolerance(&mut self, label: &str, default: u8) -> Option<u8> {
        let answer = self.ask(&format!("{} tolerance (default {}): ", label, default));
        if answer.is_empty() {
            return Some(default);
        }
        answer.parse().ok()
    }
}

impl<R: BufRead, W: Write> ConfigProvider for InteractivePrompt<R, W> {
    fn scan_config(&mut self, base: ScanConfig) -> ScanConfig {
        let mut config = base;

        let _ = writeln!(
            self.output,
            "Default thresholds: Black ≤ {}, White ≥ {}",
            config.black_tolerance, config.white_tolerance
        );

        if self.ask_yes_no("Change thresholds? (y/n): ") {
            let black = self.ask_tolerance("Black", config.black_tolerance);
            let white = black.and_then(|_| self.ask_tolerance("White", config.white_tolerance));

            match (black, white) {
                (Some(black), Some(white)) => {
                    config.black_tolerance = black;
                    config.white_tolerance = white;
                }
                _ => {
                    let _ = writeln!(self.output, "Using default thresholds");
                    config.black_tolerance = DEFAULT_BLACK_TOLERANCE;
                    config.white_tolerance = DEFAULT_WHITE_TOLERANCE;
                }
            }
        }

        if !config.auto_move {
            config.auto_move = self.ask_yes_no("Auto-move images to folders? (y/n): ");
        }

        config
    }

    fn move_choice(&mut self, _summary: &RunSummary) -> MoveChoice {
        let answer = self.ask("\nMove images to folders? (b=black only, w=white only, a=all, n=none): ");
        answer.parse().unwrap_or(MoveChoice::None)
    }
}

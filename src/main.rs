use clap::Parser;
use promptline::core::config::{self, CliOverrides};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "promptline", about = "Terminal prompt composer for research queries")]
struct Args {
    /// Append submitted prompts to this JSON Lines file
    #[arg(short, long)]
    transcript: Option<PathBuf>,

    /// Don't record prompts anywhere
    #[arg(long, conflicts_with = "transcript")]
    no_transcript: bool,

    /// Quiet period (ms) before the input box resizes
    #[arg(long)]
    debounce_ms: Option<u64>,

    /// Treat the first prompt as a follow-up question
    #[arg(long)]
    follow_up: bool,

    /// Keep the previous status and error when submitting
    #[arg(long)]
    no_reset: bool,

    /// Log file path
    #[arg(long, default_value = "promptline.log")]
    log_file: PathBuf,
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            transcript: self.transcript.clone(),
            no_transcript: self.no_transcript,
            debounce_ms: self.debounce_ms,
            follow_up: self.follow_up,
            no_reset: self.no_reset,
        }
    }
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(&args.log_file) {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    log::info!("promptline starting up");

    let file_config = config::load_config().unwrap_or_else(|e| {
        eprintln!("Warning: {e}; using defaults");
        log::warn!("{}", e);
        config::PromptlineConfig::default()
    });
    let resolved = config::resolve(&file_config, &args.overrides());
    log::debug!("Resolved config: {:?}", resolved);

    promptline::tui::run(resolved)
}

use std::process::ExitCode;

use anyhow::{bail, Result};
use clap::Parser;
use spdlog::{error, info, warn};

use postsync::config::Config;
use postsync::logger::configure_logger;
use postsync::post_processor::run_batch;
use postsync::publisher::{DryRunPublisher, HttpPublisher, PostSink, PublishSummary};

use crate::config::open_config;

mod config;

const CFG_FILE_NAME: &str = "postsync.toml";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Config path. If empty, postsync.toml is searched next to the executable,
    /// in the current directory and in the user config directory
    #[arg(short, long)]
    config_path: Option<String>,

    /// Directory containing the posts
    #[arg(short, long)]
    input_dir: Option<String>,

    /// Endpoint receiving the posts
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Use the file name without its extension as url instead of the title
    #[arg(long)]
    use_filename_as_url: bool,

    /// Validate the posts and log the payloads without sending them
    #[arg(long)]
    dry_run: bool,
}

fn run(config: &Config, dry_run: bool) -> Result<PublishSummary> {
    let sink: Box<dyn PostSink> = if dry_run {
        Box::new(DryRunPublisher::new(&config.publisher))
    } else {
        if config.publisher.endpoint.is_empty() {
            bail!("No endpoint configured. Set [publisher] endpoint or use --endpoint");
        }
        Box::new(HttpPublisher::new(&config.publisher)?)
    };

    let summary = run_batch(&config.paths.input_dir, &config.slug, sink.as_ref())?;
    Ok(summary)
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match open_config(&args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{:#}", err);
            eprintln!("Please run postsync --help");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = configure_logger(&config) {
        warn!("Error creating logger sinks. Using console instead. Desc={}", err);
    }

    match run(&config, args.dry_run) {
        Ok(summary) => {
            info!("Done. sent={}, rejected={}, failed={}", summary.sent, summary.rejected, summary.failed);
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

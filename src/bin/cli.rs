//! feedsplit CLI
//!
//! Local execution entry point. For AWS Lambda, use `feedsplit-lambda`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use feedsplit::{
    error::Result,
    models::Config,
    pipeline::{self, FeedSource},
    services::{classify, format_title},
    storage::{FeedStorage, LocalStorage},
    utils::http,
};

/// feedsplit - Dropout newsletter feed splitter
#[derive(Parser, Debug)]
#[command(
    name = "feedsplit",
    version,
    about = "Split an aggregated Dropout newsletter feed into per-show RSS feeds"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "feedsplit.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch the source feed and write one feed per show
    Split {
        /// Source feed URL (overrides config and FEED_URL)
        #[arg(long, conflicts_with = "input")]
        feed_url: Option<String>,

        /// Read the source feed from a local file instead of fetching it
        #[arg(long)]
        input: Option<PathBuf>,

        /// Output directory (overrides config and OUTPUT_DIR)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Show the slug and display title derived from episode titles
    Classify {
        /// Episode titles to classify
        #[arg(required = true)]
        titles: Vec<String>,
    },

    /// Validate configuration
    Validate,

    /// Show the feeds listed in the output manifest
    Info,
}

/// Initialize logging from the configured level, or debug when verbose.
fn init_logging(level: &str, verbose: bool) {
    let level = if verbose { "debug" } else { level };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = if cli.config.exists() {
        Config::load(&cli.config)?
    } else {
        Config::default()
    };
    config.apply_env();

    init_logging(&config.logging.level, cli.verbose);

    if cli.config.exists() {
        log::info!("Loaded configuration from {}", cli.config.display());
    } else {
        log::debug!("No config at {}, using defaults", cli.config.display());
    }

    match cli.command {
        Command::Split {
            feed_url,
            input,
            output,
        } => {
            if let Some(url) = feed_url {
                config.source.feed_url = url;
            }
            if let Some(dir) = output {
                config.output.dir = dir;
            }
            config.validate()?;

            let source = match input {
                Some(path) => FeedSource::File(path),
                None => FeedSource::from_config(&config)?,
            };
            let storage = LocalStorage::new(&config.output.dir);
            let client = http::create_client(&config.source)?;

            let stats = pipeline::run_pipeline(&config, &source, &storage, &client).await?;
            log::info!(
                "Split complete! {} feeds written to {}",
                stats.feeds_written,
                storage.location()
            );
        }

        Command::Classify { titles } => {
            for title in titles {
                let slug = classify(&title);
                println!("{}\t{}\t{}", slug, format_title(&slug), title);
            }
        }

        Command::Validate => {
            pipeline::run_validate(&config)?;
            log::info!("All validations passed!");
        }

        Command::Info => {
            let storage = LocalStorage::new(&config.output.dir);
            log::info!("Output directory: {}", storage.location());

            match storage.load_manifest(&config.output.manifest_file).await? {
                Some(manifest) => {
                    log::info!(
                        "{} feeds ({} shows)",
                        manifest.feeds.len(),
                        manifest.show_count()
                    );
                    for entry in &manifest.feeds {
                        println!(
                            "{}\t{}\t{} episodes\t{}",
                            entry.file, entry.title, entry.episode_count, entry.sha256
                        );
                    }
                }
                None => log::info!("No manifest found yet. Run 'split' first."),
            }
        }
    }

    log::debug!("Done!");

    Ok(())
}

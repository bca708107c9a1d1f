//! html2feed CLI
//!
//! Local execution entry point. For AWS Lambda, use `html2feed-lambda`.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use html2feed::{
    error::Result,
    fetch::{DocumentFetcher, FileFetcher, HttpFetcher},
    models::{Config, QueryParams},
    pipeline::FeedService,
};

/// html2feed - turn HTML pages into Atom/RSS feeds
#[derive(Parser, Debug)]
#[command(
    name = "html2feed",
    version,
    about = "Turn any HTML page into an Atom or RSS feed using CSS selectors"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "html2feed.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a feed from individual flags
    Feed {
        #[command(flatten)]
        spec: FeedArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Build a feed from a raw query string (as the Lambda receives it)
    Query {
        /// e.g. "url=https://example.com&select=article&title=h2&link=a/href"
        query: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Validate the configuration file
    Validate,
}

#[derive(Args, Debug)]
struct FeedArgs {
    /// Page to turn into a feed
    #[arg(long)]
    url: String,

    /// Comma-separated selectors for item roots
    #[arg(long)]
    select: String,

    /// Comma-separated selectors; candidates containing a match are dropped
    #[arg(long)]
    exclude: Option<String>,

    /// Selector for the item title
    #[arg(long)]
    title: String,

    /// `<selector>` or `<selector>/<attribute>` for the item link
    #[arg(long)]
    link: Option<String>,

    /// Selector for the item date
    #[arg(long)]
    date: Option<String>,

    /// strftime pattern for the date text, e.g. "%Y-%m-%d"
    #[arg(long)]
    date_format: Option<String>,

    /// Output format: atom or rss
    #[arg(long)]
    format: Option<String>,
}

impl FeedArgs {
    fn into_params(self) -> QueryParams {
        [
            ("url", Some(self.url)),
            ("select", Some(self.select)),
            ("exclude", self.exclude),
            ("title", Some(self.title)),
            ("link", self.link),
            ("date", self.date),
            ("dateFormat", self.date_format),
            ("format", self.format),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
        .collect()
    }
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Read the page from a local file instead of fetching the URL
    #[arg(long)]
    file: Option<PathBuf>,

    /// Write the feed here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the extracted items as JSON instead of a feed
    #[arg(long)]
    json: bool,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool, configured: &str) {
    let level = if verbose { "debug" } else { configured };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load_if_exists(&cli.config)?;
    init_logging(cli.verbose, &config.logging.level);

    log::debug!("Using configuration from {}", cli.config.display());

    match cli.command {
        Command::Feed { spec, output } => {
            run_feed(config, spec.into_params(), output).await?;
        }

        Command::Query { query, output } => {
            run_feed(config, QueryParams::from_query(&query), output).await?;
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!(
                "Config OK: canonical link {:?}, default format {}, timeout {}s",
                config.feed.canonical_link,
                config.feed.default_format,
                config.fetch.timeout_secs
            );
        }
    }

    Ok(())
}

async fn run_feed(config: Config, params: QueryParams, output: OutputArgs) -> Result<()> {
    config.validate()?;

    let fetcher: Arc<dyn DocumentFetcher> = match &output.file {
        Some(path) => Arc::new(FileFetcher::new(path)),
        None => Arc::new(HttpFetcher::new(&config.fetch)?),
    };
    let service = FeedService::new(Arc::new(config), fetcher);

    let body = if output.json {
        let record = service.record(&params).await?;
        serde_json::to_string_pretty(&record)?
    } else {
        let feed = service.render(&params).await?;
        log::info!("Rendered {} items as {}", feed.item_count, feed.format);
        feed.body
    };

    match &output.output {
        Some(path) => {
            tokio::fs::write(path, &body).await?;
            log::info!("Feed written to {}", path.display());
        }
        None => println!("{body}"),
    }

    Ok(())
}

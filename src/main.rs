use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use repo_pulse::config::AppConfig;
use repo_pulse::platform::github::GitHubPlatform;
use repo_pulse::platform::Platform;

#[derive(Parser)]
#[command(
    name = "repo-pulse",
    about = "Fetch a GitHub user's repositories and open issues into JSON files"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// GitHub user whose repositories are fetched
    #[arg(short, long)]
    username: Option<String>,

    /// Directory the JSON files are written to
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Maximum number of issue fetches in flight
    #[arg(long)]
    concurrency: Option<usize>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(username) = cli.username {
        config.github.username = Some(username);
    }
    if let Some(dir) = cli.output_dir {
        config.output.dir = dir;
    }
    if let Some(concurrency) = cli.concurrency {
        config.fetch.concurrency = concurrency;
    }
    config.validate()?;

    let username = config.username()?.to_string();
    let platform: Arc<dyn Platform> = Arc::new(GitHubPlatform::new(&config.github)?);

    let report = repo_pulse::workflow::run::run(platform, &config, &username).await;

    if let Some(path) = &report.aggregate_path {
        tracing::info!(path = %path.display(), "Aggregate written");
    }

    Ok(())
}

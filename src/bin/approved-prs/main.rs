mod display;

use approved_prs::{Config, GitHub, describe_failure, find_approved_pull_requests};
use clap::Parser;
use display::display_report;

#[derive(Parser)]
#[command(
    version,
    about = "List your open GitHub pull requests that are approved but not merged",
    long_about = "List your open GitHub pull requests that are approved but not merged.\n\n\
                  Configuration comes from the environment: GITHUB_TOKEN (or GH_TOKEN), \
                  ORGANIZATION to limit the search to one organization, and GITHUB_API_URL \
                  for GitHub Enterprise."
)]
struct Cli {}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

async fn run() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    let github = GitHub::from_config(&config)?;

    let entries = find_approved_pull_requests(&config, &github).await?;
    display_report(&entries, &mut std::io::stdout())?;

    Ok(())
}

#[tokio::main]
async fn main() {
    Cli::parse();
    init_tracing();

    if let Err(err) = run().await {
        for line in describe_failure(&err) {
            tracing::error!("{line}");
        }
        std::process::exit(1);
    }
}

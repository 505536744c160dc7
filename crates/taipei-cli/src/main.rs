mod browse;
mod render;

use clap::{Parser, Subcommand};
use taipei_client::AttractionClient;
use taipei_view::ViewCoordinator;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "taipei-cli")]
#[command(about = "Browse Taipei tourist attractions from the travel.taipei open data API")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch a single page and print it as JSON
    Fetch {
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,
        /// Locale tag, e.g. zh-tw or en (defaults to TAIPEI_LANGUAGE)
        #[arg(long)]
        lang: Option<String>,
    },
    /// Interactive browsing with load-more and keyword search
    Browse {
        #[arg(long)]
        lang: Option<String>,
        /// Initial search keyword
        #[arg(long)]
        keyword: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = taipei_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(?config, "configuration loaded");
    let client = AttractionClient::new(&config)?;

    match cli.command {
        Commands::Fetch { page, lang } => {
            let lang = lang.unwrap_or_else(|| config.language.clone());
            let result = client.fetch_page(&lang, page).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Browse { lang, keyword } => {
            let lang = lang.unwrap_or_else(|| config.language.clone());
            let coordinator = ViewCoordinator::new(client, lang);
            browse::run(coordinator, keyword).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests;

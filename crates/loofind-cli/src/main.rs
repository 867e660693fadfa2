mod locate;
mod render;
mod session;

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use loofind_core::{Coordinates, Locale};
use loofind_gemini::GeminiClient;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "loofind")]
#[command(about = "Find public toilets near a place or your current location")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Latitude to bias results towards (requires --lng)
    #[arg(long, global = true, requires = "lng", allow_negative_numbers = true)]
    lat: Option<f64>,

    /// Longitude to bias results towards (requires --lat)
    #[arg(long, global = true, requires = "lat", allow_negative_numbers = true)]
    lng: Option<f64>,

    /// Skip the automatic location lookup
    #[arg(long, global = true)]
    no_locate: bool,

    /// Language of prompts and messages (`de` or `en`); overrides `LOOFIND_LOCALE`
    #[arg(long, global = true, value_parser = parse_locale)]
    locale: Option<Locale>,

    /// Output format for one-shot searches
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search for toilets near a place, street or landmark
    Search {
        /// Free-text place to search near
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Search the immediate vicinity of your current location
    Nearby,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

fn parse_locale(s: &str) -> Result<Locale, String> {
    s.parse()
}

impl Cli {
    fn explicit_coordinates(&self) -> anyhow::Result<Option<Coordinates>> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Ok(Some(Coordinates::try_new(lat, lng)?)),
            _ => Ok(None),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = loofind_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    if let Some(locale) = cli.locale {
        config.locale = locale;
    }
    tracing::debug!(?config, "configuration loaded");

    let client = GeminiClient::with_base_url(
        &config.gemini_api_key,
        &config.gemini_model,
        config.request_timeout_secs,
        config.locale,
        &config.gemini_base_url,
    )?;
    let locator = session::select_locator(&config, cli.explicit_coordinates()?, cli.no_locate);
    let locate_timeout = Duration::from_secs(config.locate_timeout_secs);

    let locale = client.locale();
    let query = match cli.command {
        Some(Commands::Search { query }) => Some(query.join(" ")),
        Some(Commands::Nearby) => None,
        None => {
            let stdin = BufReader::new(tokio::io::stdin());
            let mut stdout = std::io::stdout();
            session::run_interactive(
                Arc::new(client),
                locale,
                locator,
                locate_timeout,
                stdin,
                &mut stdout,
            )
            .await?;
            return Ok(ExitCode::SUCCESS);
        }
    };
    let succeeded = session::run_once(
        &client,
        locale,
        locator,
        locate_timeout,
        query,
        cli.format,
        &mut std::io::stdout(),
    )
    .await?;

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

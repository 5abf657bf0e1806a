mod command;
mod render;

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use geolookup_core::{AppConfig, RankMode};
use geolookup_nominatim::{Geocoder, NominatimClient};
use geolookup_search::{spawn_map_binding, ControllerOptions, MapError, SearchController};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use crate::command::Command;
use crate::render::{render_candidate, spawn_renderer, TerminalMap};

#[derive(Debug, Parser)]
#[command(name = "geolookup")]
#[command(about = "Free-text address lookup against a Nominatim-compatible geocoder")]
struct Cli {
    /// Ranking policy: `global` or `locality`.
    #[arg(long)]
    mode: Option<RankMode>,

    /// Language tag sent as Accept-Language, e.g. `de` or `en-US`.
    #[arg(long)]
    lang: Option<String>,

    /// Base URL of the geocoding provider.
    #[arg(long)]
    provider_url: Option<String>,

    /// Run a single immediate search, print the ranked candidates and exit.
    #[arg(long, value_name = "QUERY")]
    once: Option<String>,
}

impl Cli {
    fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(mode) = self.mode {
            config.rank_mode = mode;
        }
        if let Some(lang) = &self.lang {
            config.language.clone_from(lang);
        }
        if let Some(url) = &self.provider_url {
            config.provider_url.clone_from(url);
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = geolookup_core::load_app_config()?;
    cli.apply_overrides(&mut config);

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!(
        env = %config.env,
        provider = %config.provider_url,
        language = %config.language,
        mode = %config.rank_mode,
        "geolookup starting"
    );

    let geocoder: Arc<dyn Geocoder> = Arc::new(NominatimClient::new(&config)?);
    let controller = SearchController::new(geocoder, ControllerOptions::from_config(&config));

    match cli.once {
        Some(query) => {
            run_once(&controller, &query).await;
            Ok(())
        }
        None => run_interactive(controller).await,
    }
}

async fn run_once(controller: &SearchController, query: &str) {
    controller.search_now(query).await;
    let state = controller.snapshot();

    if let Some(message) = &state.error {
        println!("{message}");
    }
    for (n, location) in state.candidates.iter().enumerate() {
        println!("{}", render_candidate(n + 1, location));
    }
}

async fn run_interactive(controller: SearchController) -> anyhow::Result<()> {
    let renderer = spawn_renderer(controller.subscribe());
    let map = spawn_map_binding(controller.subscribe(), || {
        Ok::<_, MapError>(TerminalMap::new(std::io::stdout()))
    });

    println!("type to search; :pick N, :clear, :focus, :dismiss, :quit");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match Command::parse(&line) {
            Command::Query(text) => controller.input(&text),
            Command::Pick(index) => {
                if controller.select_index(index).is_none() {
                    println!("no suggestion #{}", index + 1);
                }
            }
            Command::Clear => controller.clear(),
            Command::Focus => controller.focus(),
            Command::Dismiss => controller.dismiss(),
            Command::Quit => break,
            Command::Invalid(hint) => println!("{hint}"),
        }
    }

    // Dropping the controller closes the state channel once in-flight
    // searches finish; the map binding tears down on close.
    drop(controller);
    renderer.abort();
    if let Some(map) = map {
        if tokio::time::timeout(Duration::from_secs(1), map).await.is_err() {
            tracing::debug!("map binding still waiting on an in-flight search");
        }
    }
    tracing::info!("geolookup stopped");
    Ok(())
}

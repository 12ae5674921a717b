use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};

use pokesync::config::Config;
use pokesync::logging::init_tracing;
use pokesync::remote::PokeApiClient;
use pokesync::state::Subscription;
use pokesync::store::{InMemoryStore, JsonFileStore, LocalStore};
use pokesync::{Pokemon, PokemonMove, PokemonViewModel, RefreshPipeline, ResultState};

#[derive(Parser, Debug)]
#[command(name = "pokesync", version, about = "Fetch and keep a random pokemon")]
struct Cli {
    /// Path to the config file (default: platform config dir).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the data directory of the local store.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Keep the store in memory for this run only.
    #[arg(long, global = true)]
    memory: bool,

    /// Default log level when RUST_LOG is unset.
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Command {
    /// Fetch a random pokemon and replace the stored one.
    Refresh,
    /// Show the stored pokemon.
    Show,
    /// List the stored pokemon's moves.
    Moves,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("loading configuration")?;

    let store: Arc<dyn LocalStore> = if cli.memory {
        Arc::new(InMemoryStore::new())
    } else {
        let dir = cli
            .data_dir
            .clone()
            .unwrap_or_else(|| config.storage.resolved_data_dir());
        Arc::new(JsonFileStore::open(&dir).context("opening local store")?)
    };
    let remote = Arc::new(PokeApiClient::new(&config.api).context("building catalog client")?);

    let pipeline = Arc::new(RefreshPipeline::new(remote, store, config.refresh.clone()));
    let view_model = PokemonViewModel::new(pipeline);

    let succeeded = match cli.command {
        Command::Refresh => {
            let mut states = view_model.subscribe_pokemon();
            view_model.refresh();
            await_terminal(&mut states, print_pokemon).await
        }
        Command::Show => {
            let mut states = view_model.subscribe_pokemon();
            view_model.load_from_local_store();
            await_terminal(&mut states, print_pokemon).await
        }
        Command::Moves => {
            let mut states = view_model.subscribe_moves();
            view_model.load_moves_from_local_store();
            await_terminal(&mut states, |moves: &Vec<PokemonMove>| print_moves(moves)).await
        }
    };

    view_model.wait_idle().await;

    if !succeeded {
        std::process::exit(1);
    }
    Ok(())
}

/// Print states until a terminal one arrives. Returns true on success.
async fn await_terminal<T, F>(states: &mut Subscription<ResultState<T>>, print: F) -> bool
where
    T: Clone + Send + 'static,
    F: Fn(&T),
{
    while let Some(state) = states.next().await {
        match state {
            ResultState::Loading => eprintln!("Loading..."),
            ResultState::Success(data) => {
                print(&data);
                return true;
            }
            ResultState::Error { .. } => {
                eprintln!("Error: {}", state);
                return false;
            }
        }
    }
    eprintln!("Error: state stream closed before a result arrived");
    false
}

fn print_pokemon(pokemon: &Pokemon) {
    println!("Name: {}", pokemon.name);
    println!("Front sprite: {}", pokemon.sprites.front_default);
    println!("Back sprite: {}", pokemon.sprites.back_default);
    for stat in &pokemon.stats {
        println!("  {:<18} {}", stat.stat_name(), stat.base_stat);
    }
    println!("Moves: {}", pokemon.moves.len());
}

fn print_moves(moves: &[PokemonMove]) {
    for m in moves {
        println!("{}", m.move_name());
    }
}

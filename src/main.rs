use game_hub::config::{Action, HubConfig};
use game_hub::error::HubError;
use game_hub::games::Catalog;
use game_hub::games::engine::PlaceholderEngine;
use game_hub::{hub, logging};
use std::env;
use tracing::info;

fn main()
{
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), HubError>
{
    let args: Vec<String> = env::args().skip(1).collect();
    let config = HubConfig::from_args(&args)?;
    if config.action == Action::Help {
        print_help();
        return Ok(());
    }

    if config.action.writes_log() {
        logging::init(&config.log_path)?;
    }
    let catalog = match &config.catalog_path {
        Some(path) => Catalog::load(path)?,
        None => Catalog::builtin(),
    };
    info!(games = catalog.len(), "catalog loaded");

    match config.action {
        Action::List => {
            list_games(&catalog);
            Ok(())
        }
        Action::Open { path } => {
            let mut engine = PlaceholderEngine::default();
            hub::run(&catalog, &mut engine, &path, config.hub)
        }
        Action::Help => Ok(()),
    }
}

fn list_games(catalog: &Catalog)
{
    if catalog.is_empty() {
        println!("No games available.");
        return;
    }
    println!("Available games:");
    for game in catalog.list() {
        println!(
            "  {:<16} - {} ({}, {})",
            game.id, game.name, game.category, game.player_range
        );
    }
}

fn print_help()
{
    println!("game-hub");
    println!("\nUsage:");
    println!("  game-hub                 open the game selection screen");
    println!("  game-hub list            print the catalog");
    println!("  game-hub show <id>       open the rules page for a game");
    println!("  game-hub open <path>     open a route, e.g. /game/escape-lava");
    println!("\nOptions:");
    println!("  --catalog=<file>   load games from a JSON catalog");
    println!("  --select=<id>      game highlighted on the selection screen");
    println!("  --log=<file>       log file (default: game-hub.log in the temp dir)");
    println!("  --no-particles     turn off the background animation");
    println!("\nEnvironment:");
    println!("  GAME_HUB_CATALOG, GAME_HUB_SELECT, GAME_HUB_LOG mirror the options above.");
    println!("  RUST_LOG sets the log filter (default: info).");
}

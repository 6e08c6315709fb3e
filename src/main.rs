mod display;

use anyhow::Context;
use clap::{Parser, Subcommand};
use d2api::{Ability, ApiClient, Config, Hero, Item, Query, SteamAccount};
use display::output::{
    display_error, display_info, display_json, display_match_details, display_match_history,
    display_named_list, display_success, display_sync_outcome,
};
use indicatif::ProgressBar;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "d2api")]
#[command(about = "Query the Dota 2 Web API with resolved hero, item and account data", long_about = None)]
struct Args {
    /// Steam Web API key (overrides D2_API_KEY)
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Reference data directory (overrides D2API_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Synchronize local hero/item/ability data with the remote copy
    Sync {
        /// Delete local data and download everything again
        #[arg(long)]
        purge: bool,
    },

    /// Resolve a hero id
    Hero { id: String },

    /// Resolve an item id
    Item { id: String },

    /// Resolve an ability id
    Ability { id: String },

    /// Convert a Steam account id between its 32-bit and 64-bit forms
    Account { id: String },

    /// Show details of a match
    Match {
        match_id: u64,

        /// Print the decorated result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show recent matches
    History {
        #[arg(long)]
        hero_id: Option<u32>,

        /// 32-bit or 64-bit Steam account id
        #[arg(long)]
        account_id: Option<u64>,

        #[arg(short, long, default_value = "10")]
        matches_requested: u32,

        #[arg(long)]
        json: bool,
    },

    /// List heroes
    Heroes {
        #[arg(short, long)]
        language: Option<String>,
    },

    /// List game items
    Items {
        #[arg(short, long)]
        language: Option<String>,
    },
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args) {
        display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "d2api=debug" } else { "d2api=warn" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: Args) -> anyhow::Result<()> {
    let mut config = Config::from_env()?;
    if let Some(api_key) = args.api_key {
        config.api_key = Some(api_key);
    }
    if let Some(data_dir) = args.data_dir {
        config.data_dir = data_dir;
    }

    let client = ApiClient::new(&config);

    match args.command {
        Command::Sync { purge } => {
            display_info(&format!(
                "Reference data directory: {}",
                config.data_dir.display()
            ));
            let pb = ProgressBar::new_spinner();
            pb.enable_steady_tick(Duration::from_millis(100));
            pb.set_message("Synchronizing reference data");
            let outcome = client.update_local_data(purge);
            pb.finish_and_clear();
            display_sync_outcome(&outcome);
        }
        Command::Hero { id } => {
            let hero = Hero::resolve(id, &client.catalog());
            display_success(&format!("{} → {}", hero, hero.hero_name));
        }
        Command::Item { id } => {
            let item = Item::resolve(id, &client.catalog());
            display_success(&format!(
                "{} → {} (cost {}, aliases: {})",
                item,
                item.item_name,
                item.item_cost,
                item.item_aliases.join(", ")
            ));
        }
        Command::Ability { id } => {
            let ability = Ability::resolve(id, &client.catalog());
            display_success(&format!("{} → {}", ability, ability.ability_name));
        }
        Command::Account { id } => {
            let account: SteamAccount = id
                .parse()
                .with_context(|| format!("\"{}\" is not a Steam account id", id))?;
            display_success(&format!(
                "id32 = {}, id64 = {}",
                account.id32.unwrap_or_default(),
                account.id64.unwrap_or_default()
            ));
        }
        Command::Match { match_id, json } => {
            let details = client
                .get_match_details(Query::new().param("match_id", match_id))
                .with_context(|| format!("Failed to fetch match {}", match_id))?;
            if json {
                display_json(&details)?;
            } else {
                display_match_details(&details);
            }
        }
        Command::History {
            hero_id,
            account_id,
            matches_requested,
            json,
        } => {
            let mut query = Query::new().param("matches_requested", matches_requested);
            if let Some(hero_id) = hero_id {
                query = query.hero_id(hero_id);
            }
            if let Some(account_id) = account_id {
                query = query.account_id(account_id);
            }

            let history = client
                .get_match_history(query)
                .context("Failed to fetch match history")?;
            if json {
                display_json(&history)?;
            } else {
                display_match_history(&history);
            }
        }
        Command::Heroes { language } => {
            let query = language.map_or_else(Query::new, |l| Query::new().language(&l));
            let heroes = client.get_heroes(query).context("Failed to fetch heroes")?;
            display_named_list("🦸 HEROES", &heroes, "heroes");
        }
        Command::Items { language } => {
            let query = language.map_or_else(Query::new, |l| Query::new().language(&l));
            let items = client.get_game_items(query).context("Failed to fetch game items")?;
            display_named_list("🎒 ITEMS", &items, "items");
        }
    }

    Ok(())
}

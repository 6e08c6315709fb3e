use chrono::{DateTime, Utc};
use colored::*;
use d2api::{Field, Record, SyncOutcome};
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct PlayerRow {
    slot: String,
    hero: String,
    account: String,
    #[tabled(rename = "K/D/A")]
    kda: String,
    items: String,
}

#[derive(Tabled)]
struct MatchRow {
    match_id: String,
    started: String,
    heroes: String,
}

#[derive(Tabled)]
struct NamedRow {
    id: String,
    name: String,
    localized_name: String,
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_info(message: &str) {
    println!("{} {}", "ℹ️".cyan(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

pub fn display_warning(message: &str) {
    println!("{} {}", "⚠️".yellow(), message);
}

pub fn display_sync_outcome(outcome: &SyncOutcome) {
    match outcome {
        SyncOutcome::Current { metadata } => {
            display_success(&format!(
                "Reference data up to date (version {})",
                render_version(metadata.version.as_ref())
            ));
        }
        SyncOutcome::Updated {
            metadata,
            downloaded,
        } => {
            display_success(&format!(
                "Reference data updated to version {} ({} files)",
                render_version(metadata.version.as_ref()),
                downloaded.len()
            ));
        }
        SyncOutcome::Offline { local, reason } => {
            display_warning(&format!(
                "Reference source unavailable ({}), using local version {}",
                reason,
                render_version(local.version.as_ref())
            ));
        }
        SyncOutcome::Failed { reason } => {
            display_warning(&format!("Reference sync failed: {}", reason));
        }
    }
}

pub fn display_match_details(details: &Record) {
    if let Some(error) = details.error() {
        display_error(error);
        return;
    }

    let match_id = details.get("match_id").map(render).unwrap_or_default();
    let winner = match details.get("radiant_win").and_then(Field::as_bool) {
        Some(true) => "Radiant".green().to_string(),
        Some(false) => "Dire".red().to_string(),
        None => "?".to_string(),
    };

    println!("\n{}", format!("🎮 MATCH {}", match_id).bold().cyan());
    println!("{}\n", "=".repeat(80).cyan());
    println!(
        "{} {}   {} {}\n",
        "Winner:".bold(),
        winner,
        "Started:".bold(),
        details.get("start_time").map(render_timestamp).unwrap_or_default()
    );

    let players = details
        .get("players")
        .and_then(Field::as_list)
        .unwrap_or_default();

    let rows: Vec<PlayerRow> = players
        .iter()
        .filter_map(Field::as_record)
        .map(|player| PlayerRow {
            slot: player.get("player_slot").map(render).unwrap_or_default(),
            hero: player.get("hero").map(render).unwrap_or_default(),
            account: player.get("steam_account").map(render).unwrap_or_default(),
            kda: ["kills", "deaths", "assists"]
                .iter()
                .map(|key| player.get(key).map(render).unwrap_or_else(|| "-".to_string()))
                .collect::<Vec<_>>()
                .join("/"),
            items: player
                .all_items()
                .iter()
                .map(|item| item.item_name.trim_start_matches("item_").to_string())
                .collect::<Vec<_>>()
                .join(", "),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}\n", table);
}

pub fn display_match_history(history: &Record) {
    if let Some(error) = history.error() {
        display_error(error);
        return;
    }

    let matches = history
        .get("matches")
        .and_then(Field::as_list)
        .unwrap_or_default();

    println!(
        "\n{}",
        format!("📊 MATCH HISTORY ({} matches)", matches.len()).bold().cyan()
    );
    println!("{}\n", "=".repeat(80).cyan());

    let rows: Vec<MatchRow> = matches
        .iter()
        .filter_map(Field::as_record)
        .map(|m| MatchRow {
            match_id: m.get("match_id").map(render).unwrap_or_default(),
            started: m.get("start_time").map(render_timestamp).unwrap_or_default(),
            heroes: m
                .get("players")
                .and_then(Field::as_list)
                .unwrap_or_default()
                .iter()
                .filter_map(Field::as_record)
                .filter_map(|p| p.get("hero"))
                .map(render)
                .collect::<Vec<_>>()
                .join(", "),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}\n", table);
}

/// Heroes and game items share the `{id, name, localized_name}` shape.
pub fn display_named_list(title: &str, record: &Record, list_key: &str) {
    let entries = record
        .get(list_key)
        .and_then(Field::as_list)
        .unwrap_or_default();

    println!("\n{}", format!("{} ({})", title, entries.len()).bold().cyan());

    let rows: Vec<NamedRow> = entries
        .iter()
        .filter_map(Field::as_record)
        .map(|entry| NamedRow {
            id: entry.get("id").map(render).unwrap_or_default(),
            name: entry.get("name").map(render).unwrap_or_default(),
            localized_name: entry.get("localized_name").map(render).unwrap_or_default(),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}\n", table);
}

pub fn display_json<T: serde::Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn render(field: &Field) -> String {
    match field {
        Field::Null => String::new(),
        Field::Bool(b) => b.to_string(),
        Field::Number(n) => n.to_string(),
        Field::String(s) => s.clone(),
        Field::Hero(hero) => hero.hero_name.trim_start_matches("npc_dota_hero_").to_string(),
        Field::Item(item) => item.item_name.clone(),
        Field::Ability(ability) => ability.ability_name.clone(),
        Field::Account(account) => account.id32.map(|id| id.to_string()).unwrap_or_default(),
        Field::List(items) => format!("[{} entries]", items.len()),
        Field::Record(record) => format!("{{{} fields}}", record.len()),
    }
}

fn render_timestamp(field: &Field) -> String {
    field
        .as_i64()
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        .map(|time| time.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_default()
}

fn render_version(version: Option<&serde_json::Value>) -> String {
    match version {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => "none".to_string(),
    }
}

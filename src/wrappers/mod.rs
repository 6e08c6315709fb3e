//! Typed results for each endpoint.
//!
//! Every wrapper owns a decorated [`Record`] built by [`decorate`] from the
//! endpoint's [`Schema`], and dereferences to it for dictionary-style access:
//!
//! ```ignore
//! let details = api.get_match_details(4176987886)?;
//! let hero = details["players_minimal"].as_list().unwrap()[0].as_record().unwrap()["hero"].clone();
//! ```

pub mod decorate;
pub mod schema;
pub mod value;

use crate::reference::ReferenceCatalog;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::ops::Deref;

pub use decorate::decorate;
pub use schema::{Rule, Schema, Segment};
pub use value::{Field, Record, ITEM_SLOTS};

pub trait Wrapper: Sized {
    const SCHEMA: Schema;

    fn from_record(record: Record) -> Self;

    fn from_value(raw: &Value, catalog: &ReferenceCatalog) -> Self {
        Self::from_record(decorate(raw, &Self::SCHEMA, catalog))
    }
}

macro_rules! wrapper {
    ($(#[$meta:meta])* $name:ident => $schema:path) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $name(Record);

        impl $name {
            pub fn record(&self) -> &Record {
                &self.0
            }

            pub fn into_record(self) -> Record {
                self.0
            }
        }

        impl Wrapper for $name {
            const SCHEMA: Schema = $schema;

            fn from_record(record: Record) -> Self {
                $name(record)
            }
        }

        impl Deref for $name {
            type Target = Record;

            fn deref(&self) -> &Record {
                &self.0
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                self.0.serialize(serializer)
            }
        }
    };
}

wrapper!(
    /// `GetMatchHistory` and `GetMatchHistoryBySequenceNum`.
    MatchHistory => schema::MATCH_HISTORY
);
wrapper!(
    /// `GetMatchDetails`. Adds `players_minimal`, `radiant_buildings` and
    /// `dire_buildings`.
    MatchDetails => schema::MATCH_DETAILS
);
wrapper!(Heroes => schema::HEROES);
wrapper!(GameItems => schema::GAME_ITEMS);
wrapper!(TournamentPrizePool => schema::TOURNAMENT_PRIZE_POOL);
wrapper!(TopLiveGame => schema::TOP_LIVE_GAME);
wrapper!(
    /// `GetTeamInfoByTeamID`. Numbered `player_N_account_id` fields are
    /// gathered into `players`.
    TeamInfoByTeamID => schema::TEAM_INFO_BY_TEAM_ID
);
wrapper!(LiveLeagueGames => schema::LIVE_LEAGUE_GAMES);

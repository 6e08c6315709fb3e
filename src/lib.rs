//! Client for the Dota 2 Web API.
//!
//! Responses are decorated with entities resolved from a locally cached
//! reference dataset (heroes, items, abilities) that is kept in sync with a
//! versioned remote copy.

pub mod api;
pub mod config;
pub mod entities;
pub mod error;
pub mod reference;
pub mod wrappers;

pub use api::{ApiClient, Query};
pub use config::Config;
pub use entities::{Ability, EntityKind, Hero, Item, SteamAccount, STEAM64_OFFSET};
pub use error::{ApiError, SyncError};
pub use reference::{ReferenceCatalog, ReferenceMetadata, SharedCatalog, SyncOutcome, Synchronizer};
pub use wrappers::{
    Field, GameItems, Heroes, LiveLeagueGames, MatchDetails, MatchHistory, Record,
    TeamInfoByTeamID, TopLiveGame, TournamentPrizePool, Wrapper,
};

//! Declarative decoration schemas, one per endpoint.
//!
//! A schema lists which fields at which paths hold which kind of id. The
//! decoration algorithm in [`super::decorate`] is shared by every endpoint.

use crate::entities::EntityKind;

use super::value::ITEM_SLOTS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    /// Descend into a named field of a record.
    Key(&'static str),
    /// Descend into each of several named fields.
    Keys(&'static [&'static str]),
    /// Descend into every element of a list.
    Each,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Replace `key` with the resolved entity stored under `rename`. A record
    /// that already carries an entity under `rename` is resolved again from
    /// its id.
    Resolve {
        path: &'static [Segment],
        key: &'static str,
        rename: &'static str,
        kind: EntityKind,
    },
    /// Resolve each of `keys` without renaming them.
    ResolveInPlace {
        path: &'static [Segment],
        keys: &'static [&'static str],
        kind: EntityKind,
    },
    /// Move flat fields into a nested record, as `(source, target)` pairs.
    Group {
        path: &'static [Segment],
        fields: &'static [(&'static str, &'static str)],
        into: &'static str,
    },
    /// Collect numbered fields `{prefix}N{suffix}` into an ordered list of
    /// resolved entities.
    Gather {
        path: &'static [Segment],
        prefix: &'static str,
        suffix: &'static str,
        kind: EntityKind,
        into: &'static str,
    },
    /// Build list `into` from list `from`, keeping only `keys` of each element.
    Project {
        path: &'static [Segment],
        from: &'static str,
        keys: &'static [&'static str],
        into: &'static str,
    },
}

#[derive(Debug, Clone, Copy)]
pub struct Schema {
    /// Top-level field whose object replaces the whole document, when present.
    pub envelope: Option<&'static str>,
    pub rules: &'static [Rule],
}

const ROOT: &[Segment] = &[];
const PLAYERS: &[Segment] = &[Segment::Key("players"), Segment::Each];
const ABILITY_UPGRADES: &[Segment] = &[
    Segment::Key("players"),
    Segment::Each,
    Segment::Key("ability_upgrades"),
    Segment::Each,
];
const PICKS_BANS: &[Segment] = &[Segment::Key("picks_bans"), Segment::Each];
const HISTORY_PLAYERS: &[Segment] = &[
    Segment::Key("matches"),
    Segment::Each,
    Segment::Key("players"),
    Segment::Each,
];
const TOP_LIVE_PLAYERS: &[Segment] = &[
    Segment::Key("game_list"),
    Segment::Each,
    Segment::Key("players"),
    Segment::Each,
];
const TEAMS: &[Segment] = &[Segment::Key("teams"), Segment::Each];
const LIVE_PLAYERS: &[Segment] = &[
    Segment::Key("games"),
    Segment::Each,
    Segment::Key("players"),
    Segment::Each,
];
const SIDES: Segment = Segment::Keys(&["radiant", "dire"]);
const LIVE_SCOREBOARD_PLAYERS: &[Segment] = &[
    Segment::Key("games"),
    Segment::Each,
    Segment::Key("scoreboard"),
    SIDES,
    Segment::Key("players"),
    Segment::Each,
];
const LIVE_DRAFT: &[Segment] = &[
    Segment::Key("games"),
    Segment::Each,
    Segment::Key("scoreboard"),
    SIDES,
    Segment::Keys(&["picks", "bans"]),
    Segment::Each,
];
const LIVE_ABILITIES: &[Segment] = &[
    Segment::Key("games"),
    Segment::Each,
    Segment::Key("scoreboard"),
    SIDES,
    Segment::Key("abilities"),
    Segment::Each,
];

const fn hero(path: &'static [Segment]) -> Rule {
    Rule::Resolve {
        path,
        key: "hero_id",
        rename: "hero",
        kind: EntityKind::Hero,
    }
}

const fn account(path: &'static [Segment]) -> Rule {
    Rule::Resolve {
        path,
        key: "account_id",
        rename: "steam_account",
        kind: EntityKind::SteamAccount,
    }
}

const fn items(path: &'static [Segment]) -> Rule {
    Rule::ResolveInPlace {
        path,
        keys: ITEM_SLOTS,
        kind: EntityKind::Item,
    }
}

pub const MATCH_HISTORY: Schema = Schema {
    envelope: Some("result"),
    rules: &[hero(HISTORY_PLAYERS), account(HISTORY_PLAYERS)],
};

pub const MATCH_DETAILS: Schema = Schema {
    envelope: Some("result"),
    rules: &[
        hero(PLAYERS),
        account(PLAYERS),
        items(PLAYERS),
        Rule::Resolve {
            path: ABILITY_UPGRADES,
            key: "ability",
            rename: "ability",
            kind: EntityKind::Ability,
        },
        hero(PICKS_BANS),
        Rule::Group {
            path: ROOT,
            fields: &[
                ("tower_status_radiant", "tower_status"),
                ("barracks_status_radiant", "barracks_status"),
            ],
            into: "radiant_buildings",
        },
        Rule::Group {
            path: ROOT,
            fields: &[
                ("tower_status_dire", "tower_status"),
                ("barracks_status_dire", "barracks_status"),
            ],
            into: "dire_buildings",
        },
        Rule::Project {
            path: ROOT,
            from: "players",
            keys: &["steam_account", "hero"],
            into: "players_minimal",
        },
    ],
};

pub const HEROES: Schema = Schema {
    envelope: Some("result"),
    rules: &[],
};

pub const GAME_ITEMS: Schema = Schema {
    envelope: Some("result"),
    rules: &[],
};

pub const TOURNAMENT_PRIZE_POOL: Schema = Schema {
    envelope: Some("result"),
    rules: &[],
};

pub const TOP_LIVE_GAME: Schema = Schema {
    envelope: None,
    rules: &[hero(TOP_LIVE_PLAYERS), account(TOP_LIVE_PLAYERS)],
};

pub const TEAM_INFO_BY_TEAM_ID: Schema = Schema {
    envelope: Some("result"),
    rules: &[
        Rule::Gather {
            path: TEAMS,
            prefix: "player_",
            suffix: "_account_id",
            kind: EntityKind::SteamAccount,
            into: "players",
        },
        Rule::Resolve {
            path: TEAMS,
            key: "admin_account_id",
            rename: "admin_account",
            kind: EntityKind::SteamAccount,
        },
    ],
};

pub const LIVE_LEAGUE_GAMES: Schema = Schema {
    envelope: Some("result"),
    rules: &[
        hero(LIVE_PLAYERS),
        account(LIVE_PLAYERS),
        hero(LIVE_SCOREBOARD_PLAYERS),
        account(LIVE_SCOREBOARD_PLAYERS),
        items(LIVE_SCOREBOARD_PLAYERS),
        hero(LIVE_DRAFT),
        Rule::Resolve {
            path: LIVE_ABILITIES,
            key: "ability_id",
            rename: "ability",
            kind: EntityKind::Ability,
        },
    ],
};

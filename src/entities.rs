//! Id-backed entities resolved against the reference catalog.
//!
//! Resolution never fails: an id missing from the catalog yields an entity
//! carrying that id and the documented defaults (`unknown_hero`, cost 0, ...).

use crate::reference::ReferenceCatalog;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Difference between the 64-bit and 32-bit forms of a Steam account id.
pub const STEAM64_OFFSET: u64 = 76_561_197_960_265_728;

pub const UNKNOWN_HERO: &str = "unknown_hero";
pub const UNKNOWN_ITEM: &str = "unknown_item";
pub const UNKNOWN_ABILITY: &str = "unknown_ability";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Hero,
    Item,
    Ability,
    SteamAccount,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hero {
    pub hero_id: String,
    pub hero_name: String,
}

impl Hero {
    pub fn resolve(hero_id: impl fmt::Display, catalog: &ReferenceCatalog) -> Self {
        let hero_id = hero_id.to_string();
        let record = catalog.heroes.get(&hero_id);
        Hero {
            hero_name: record
                .and_then(|r| r.hero_name.clone())
                .unwrap_or_else(|| UNKNOWN_HERO.to_string()),
            hero_id,
        }
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        match key {
            "hero_id" => Some(json!(self.hero_id)),
            "hero_name" => Some(json!(self.hero_name)),
            _ => None,
        }
    }
}

impl fmt::Display for Hero {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hero(hero_id = {})", self.hero_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    pub item_id: String,
    pub item_name: String,
    pub item_cost: i64,
    pub item_aliases: Vec<String>,
}

impl Item {
    /// Id used by the API for an unused inventory slot.
    pub const EMPTY_SLOT: &'static str = "0";

    pub fn resolve(item_id: impl fmt::Display, catalog: &ReferenceCatalog) -> Self {
        let item_id = item_id.to_string();
        let record = catalog.items.get(&item_id).cloned().unwrap_or_default();
        Item {
            item_id,
            item_name: record.item_name.unwrap_or_else(|| UNKNOWN_ITEM.to_string()),
            item_cost: record.item_cost.unwrap_or(0),
            item_aliases: record.item_aliases.unwrap_or_default(),
        }
    }

    pub fn is_empty_slot(&self) -> bool {
        self.item_id == Self::EMPTY_SLOT
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        match key {
            "item_id" => Some(json!(self.item_id)),
            "item_name" => Some(json!(self.item_name)),
            "item_cost" => Some(json!(self.item_cost)),
            "item_aliases" => Some(json!(self.item_aliases)),
            _ => None,
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Item(item_id = {})", self.item_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ability {
    pub ability_id: String,
    pub ability_name: String,
}

impl Ability {
    pub fn resolve(ability_id: impl fmt::Display, catalog: &ReferenceCatalog) -> Self {
        let ability_id = ability_id.to_string();
        let record = catalog.abilities.get(&ability_id);
        Ability {
            ability_name: record
                .and_then(|r| r.ability_name.clone())
                .unwrap_or_else(|| UNKNOWN_ABILITY.to_string()),
            ability_id,
        }
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        match key {
            "ability_id" => Some(json!(self.ability_id)),
            "ability_name" => Some(json!(self.ability_name)),
            _ => None,
        }
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ability(ability_id = {})", self.ability_id)
    }
}

/// Both forms of one Steam identity. `SteamAccount::none()` is the valid
/// "no account" value, with both fields unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SteamAccount {
    pub id32: Option<u64>,
    pub id64: Option<u64>,
}

impl SteamAccount {
    /// Accepts either form; ids at or above [`STEAM64_OFFSET`] are taken as 64-bit.
    pub const fn from_id(account_id: u64) -> Self {
        if account_id < STEAM64_OFFSET {
            SteamAccount {
                id32: Some(account_id),
                id64: Some(account_id + STEAM64_OFFSET),
            }
        } else {
            SteamAccount {
                id32: Some(account_id - STEAM64_OFFSET),
                id64: Some(account_id),
            }
        }
    }

    pub const fn none() -> Self {
        SteamAccount {
            id32: None,
            id64: None,
        }
    }

    pub fn new(account_id: Option<u64>) -> Self {
        account_id.map(Self::from_id).unwrap_or_default()
    }

    pub fn is_none(&self) -> bool {
        self.id32.is_none() && self.id64.is_none()
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        match key {
            "id32" => Some(json!(self.id32)),
            "id64" => Some(json!(self.id64)),
            _ => None,
        }
    }
}

impl FromStr for SteamAccount {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_id(s.trim().parse::<u64>()?))
    }
}

impl From<u64> for SteamAccount {
    fn from(account_id: u64) -> Self {
        Self::from_id(account_id)
    }
}

impl fmt::Display for SteamAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id32 {
            Some(id32) => write!(f, "SteamAccount(account_id = {})", id32),
            None => write!(f, "SteamAccount(account_id = None)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::{AbilityRecord, HeroRecord, ItemRecord};

    fn catalog() -> ReferenceCatalog {
        let mut catalog = ReferenceCatalog::default();
        catalog.heroes.insert(1, HeroRecord { hero_name: Some("antimage".into()) });
        catalog.items.insert(
            44,
            ItemRecord {
                item_name: Some("item_tango".into()),
                item_cost: Some(90),
                item_aliases: Some(vec!["tango".into()]),
            },
        );
        catalog.abilities.insert(
            5003,
            AbilityRecord { ability_name: Some("antimage_mana_break".into()) },
        );
        catalog
    }

    #[test]
    fn test_resolve_known_hero() {
        let hero = Hero::resolve(1, &catalog());
        assert_eq!(hero.hero_id, "1");
        assert_eq!(hero.hero_name, "antimage");
        assert_eq!(hero.get("hero_name"), Some(json!("antimage")));
        assert_eq!(hero.to_string(), "Hero(hero_id = 1)");
    }

    #[test]
    fn test_numeric_and_string_ids_agree() {
        let catalog = catalog();
        assert_eq!(Hero::resolve(1u32, &catalog), Hero::resolve("1", &catalog));
        assert_eq!(Item::resolve(44i64, &catalog), Item::resolve("44", &catalog));
    }

    #[test]
    fn test_unknown_ids_use_defaults() {
        let catalog = catalog();

        let hero = Hero::resolve(9999, &catalog);
        assert_eq!(hero.hero_id, "9999");
        assert_eq!(hero.hero_name, UNKNOWN_HERO);

        let item = Item::resolve(9999, &catalog);
        assert_eq!(item.item_name, UNKNOWN_ITEM);
        assert_eq!(item.item_cost, 0);
        assert!(item.item_aliases.is_empty());

        let ability = Ability::resolve(9999, &catalog);
        assert_eq!(ability.ability_name, UNKNOWN_ABILITY);
    }

    #[test]
    fn test_defaulted_entity_differs_from_resolved() {
        let resolved = Hero::resolve(1, &catalog());
        let defaulted = Hero::resolve(1, &ReferenceCatalog::default());
        assert_eq!(resolved.hero_id, defaulted.hero_id);
        assert_ne!(resolved, defaulted);
    }

    #[test]
    fn test_partial_item_record_fills_defaults() {
        let mut catalog = ReferenceCatalog::default();
        catalog.items.insert(
            1,
            ItemRecord {
                item_name: Some("item_blink".into()),
                ..ItemRecord::default()
            },
        );

        let item = Item::resolve(1, &catalog);
        assert_eq!(item.item_name, "item_blink");
        assert_eq!(item.item_cost, 0);
        assert!(item.item_aliases.is_empty());
        assert!(!item.is_empty_slot());
        assert!(Item::resolve(0, &catalog).is_empty_slot());
    }

    #[test]
    fn test_steam_32_64() {
        let steam32 = 123456;
        let steam64 = STEAM64_OFFSET + steam32;

        let account = SteamAccount::from_id(steam32);
        assert_eq!(account.id64.unwrap() - account.id32.unwrap(), STEAM64_OFFSET);
        assert_eq!(SteamAccount::from_id(steam64), account);
        assert_eq!(SteamAccount::from_id(account.id64.unwrap()), account);
        assert_eq!("76561197960389184".parse::<SteamAccount>().unwrap(), account);
    }

    #[test]
    fn test_steam_account_round_trip_range() {
        for id32 in [0u64, 1, 28_608_556, u32::MAX as u64] {
            let account = SteamAccount::from_id(id32);
            assert_eq!(account.id64.unwrap() - account.id32.unwrap(), STEAM64_OFFSET);
            assert_eq!(SteamAccount::from_id(account.id64.unwrap()), account);
        }
    }

    #[test]
    fn test_steam_account_none() {
        let account = SteamAccount::new(None);
        assert_eq!(account.id32, None);
        assert_eq!(account.id64, None);
        assert!(account.is_none());
        assert_eq!(account, SteamAccount::none());
        assert_eq!(account.get("id32"), Some(Value::Null));
    }
}

//! Dictionary-shaped result tree. Mirrors JSON, with resolved entities as
//! first-class leaves.

use crate::entities::{Ability, Hero, Item, SteamAccount};
use crate::error::ApiError;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;
use std::ops::Index;

/// Inventory slot keys in slot order: match details slots, backpack,
/// neutral, then the live scoreboard spelling.
pub const ITEM_SLOTS: &[&str] = &[
    "item_0",
    "item_1",
    "item_2",
    "item_3",
    "item_4",
    "item_5",
    "backpack_0",
    "backpack_1",
    "backpack_2",
    "item_neutral",
    "item0",
    "item1",
    "item2",
    "item3",
    "item4",
    "item5",
];

#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    List(Vec<Field>),
    Record(Record),
    Hero(Hero),
    Item(Item),
    Ability(Ability),
    Account(SteamAccount),
}

impl Field {
    pub fn is_null(&self) -> bool {
        matches!(self, Field::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Field::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Field::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Field::Number(n) => n.as_u64(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Field::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Field]> {
        match self {
            Field::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Field::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_hero(&self) -> Option<&Hero> {
        match self {
            Field::Hero(hero) => Some(hero),
            _ => None,
        }
    }

    pub fn as_item(&self) -> Option<&Item> {
        match self {
            Field::Item(item) => Some(item),
            _ => None,
        }
    }

    pub fn as_ability(&self) -> Option<&Ability> {
        match self {
            Field::Ability(ability) => Some(ability),
            _ => None,
        }
    }

    pub fn as_account(&self) -> Option<&SteamAccount> {
        match self {
            Field::Account(account) => Some(account),
            _ => None,
        }
    }
}

impl From<Value> for Field {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Field::Null,
            Value::Bool(b) => Field::Bool(b),
            Value::Number(n) => Field::Number(n),
            Value::String(s) => Field::String(s),
            Value::Array(items) => Field::List(items.into_iter().map(Field::from).collect()),
            Value::Object(map) => Field::Record(Record::from(map)),
        }
    }
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Field::Null => serializer.serialize_unit(),
            Field::Bool(b) => serializer.serialize_bool(*b),
            Field::Number(n) => n.serialize(serializer),
            Field::String(s) => serializer.serialize_str(s),
            Field::List(items) => items.serialize(serializer),
            Field::Record(record) => record.serialize(serializer),
            Field::Hero(hero) => hero.serialize(serializer),
            Field::Item(item) => item.serialize(serializer),
            Field::Ability(ability) => ability.serialize(serializer),
            Field::Account(account) => account.serialize(serializer),
        }
    }
}

/// String-keyed record. Structural equality; indexing an absent key panics,
/// [`Record::try_get`] reports it as [`ApiError::MissingKey`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: BTreeMap<String, Field>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Field> {
        self.fields.get(key)
    }

    pub fn try_get(&self, key: &str) -> Result<&Field, ApiError> {
        self.fields
            .get(key)
            .ok_or_else(|| ApiError::MissingKey(key.to_string()))
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Field> {
        self.fields.get_mut(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, field: Field) -> Option<Field> {
        self.fields.insert(key.into(), field)
    }

    pub fn remove(&mut self, key: &str) -> Option<Field> {
        self.fields.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Field)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Application-level error reported by the endpoint, e.g. an unknown
    /// match id.
    pub fn error(&self) -> Option<&str> {
        self.get("error").and_then(Field::as_str)
    }

    /// Every populated inventory slot, in slot order. Empty slots (id 0)
    /// are skipped.
    pub fn all_items(&self) -> Vec<&Item> {
        ITEM_SLOTS
            .iter()
            .filter_map(|slot| self.get(slot).and_then(Field::as_item))
            .filter(|item| !item.is_empty_slot())
            .collect()
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Record {
            fields: map.into_iter().map(|(k, v)| (k, Field::from(v))).collect(),
        }
    }
}

impl Index<&str> for Record {
    type Output = Field;

    fn index(&self, key: &str) -> &Field {
        match self.fields.get(key) {
            Some(field) => field,
            None => panic!("no field named \"{}\"", key),
        }
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, field) in &self.fields {
            map.serialize_entry(key, field)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        match Field::from(value) {
            Field::Record(record) => record,
            other => panic!("not a record: {:?}", other),
        }
    }

    #[test]
    fn test_record_equality_and_lookup() {
        let obj1 = record(json!({"a": 1, "b": 2, "c": 3}));
        let mut obj2 = record(json!({"a": 1}));
        assert_ne!(obj1, obj2);

        obj2.insert("b", Field::from(json!(2)));
        obj2.insert("c", Field::from(json!(3)));
        assert_eq!(obj1, obj2);
        assert_eq!(obj1["b"].as_i64(), Some(2));
    }

    #[test]
    fn test_try_get_missing_key() {
        let obj = record(json!({"a": 1}));
        assert!(matches!(obj.try_get("unexpected_key"), Err(ApiError::MissingKey(k)) if k == "unexpected_key"));
    }

    #[test]
    #[should_panic(expected = "unexpected_key")]
    fn test_index_missing_key_panics() {
        let obj = record(json!({"a": 1}));
        let _ = &obj["unexpected_key"];
    }

    #[test]
    fn test_error_indicator() {
        let obj = record(json!({"error": "Match ID not found"}));
        assert_eq!(obj.error(), Some("Match ID not found"));
        assert_eq!(record(json!({"status": 1})).error(), None);
    }

    #[test]
    fn test_serialize_matches_json() {
        let raw = json!({"a": [1, "x", null, true], "b": {"c": 2.5}});
        let value = serde_json::to_value(record(raw.clone())).unwrap();
        assert_eq!(value, raw);
    }
}

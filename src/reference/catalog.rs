//! In-memory reference tables and the versioned metadata document that
//! describes them.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

pub const META_FILE: &str = "meta.json";
pub const HEROES_FILE: &str = "heroes.json";
pub const ITEMS_FILE: &str = "items.json";
pub const ABILITIES_FILE: &str = "abilities.json";

/// The `meta.json` document. `version` is opaque: it is only ever compared
/// for equality.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<Value>,
    #[serde(default)]
    pub content_files: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ReferenceMetadata {
    pub fn is_empty(&self) -> bool {
        self.version.is_none() && self.content_files.is_empty() && self.extra.is_empty()
    }

    /// Whole-document staleness check. A missing local version never matches.
    pub fn is_current_with(&self, remote: &ReferenceMetadata) -> bool {
        self.version.is_some() && self.version == remote.version
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeroRecord {
    #[serde(default, deserialize_with = "lenient")]
    pub hero_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    #[serde(default, deserialize_with = "lenient")]
    pub item_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub item_cost: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub item_aliases: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AbilityRecord {
    #[serde(default, deserialize_with = "lenient")]
    pub ability_name: Option<String>,
}

/// A field of the wrong type reads as absent instead of failing the record.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// String-keyed lookup table for one entity kind.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceTable<R> {
    records: HashMap<String, R>,
}

impl<R> Default for ReferenceTable<R> {
    fn default() -> Self {
        ReferenceTable {
            records: HashMap::new(),
        }
    }
}

impl<R: DeserializeOwned> ReferenceTable<R> {
    /// The document must be an object; entries that are not records are
    /// skipped.
    pub fn from_json(value: Value) -> Result<Self, serde_json::Error> {
        let entries: Map<String, Value> = serde_json::from_value(value)?;
        let records = entries
            .into_iter()
            .filter_map(|(id, raw)| match serde_json::from_value(raw) {
                Ok(record) => Some((id, record)),
                Err(e) => {
                    tracing::warn!("Skipping malformed reference record {}: {}", id, e);
                    None
                }
            })
            .collect();
        Ok(ReferenceTable { records })
    }
}

impl<R> ReferenceTable<R> {
    pub fn get(&self, id: &str) -> Option<&R> {
        self.records.get(id)
    }

    pub fn insert(&mut self, id: impl ToString, record: R) {
        self.records.insert(id.to_string(), record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceCatalog {
    pub heroes: ReferenceTable<HeroRecord>,
    pub items: ReferenceTable<ItemRecord>,
    pub abilities: ReferenceTable<AbilityRecord>,
}

impl ReferenceCatalog {
    pub fn is_empty(&self) -> bool {
        self.heroes.is_empty() && self.items.is_empty() && self.abilities.is_empty()
    }
}

/// Shared handle to the current catalog. Readers take a snapshot; the
/// synchronizer swaps in a fully built catalog, so a resolution never sees
/// a table mid-replacement.
#[derive(Debug, Clone, Default)]
pub struct SharedCatalog {
    inner: Arc<RwLock<Arc<ReferenceCatalog>>>,
}

impl SharedCatalog {
    pub fn new(catalog: ReferenceCatalog) -> Self {
        SharedCatalog {
            inner: Arc::new(RwLock::new(Arc::new(catalog))),
        }
    }

    pub fn snapshot(&self) -> Arc<ReferenceCatalog> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn replace(&self, catalog: ReferenceCatalog) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(catalog);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_metadata_version_equality() {
        let local: ReferenceMetadata =
            serde_json::from_value(json!({"version": 3, "content_files": ["heroes.json"]})).unwrap();
        let same: ReferenceMetadata = serde_json::from_value(json!({"version": 3})).unwrap();
        let other: ReferenceMetadata = serde_json::from_value(json!({"version": "3"})).unwrap();

        assert!(local.is_current_with(&same));
        assert!(!local.is_current_with(&other));
        assert!(!ReferenceMetadata::default().is_current_with(&ReferenceMetadata::default()));
    }

    #[test]
    fn test_metadata_keeps_unknown_fields() {
        let meta: ReferenceMetadata =
            serde_json::from_value(json!({"version": 1, "content_files": [], "source": "dota"}))
                .unwrap();
        assert_eq!(meta.extra.get("source"), Some(&json!("dota")));
        assert!(!meta.is_empty());
        assert!(ReferenceMetadata::default().is_empty());
    }

    #[test]
    fn test_table_from_json() {
        let table: ReferenceTable<ItemRecord> = ReferenceTable::from_json(json!({
            "1": {"item_name": "item_blink", "item_cost": 2250, "item_aliases": ["blink"]},
            "2": {}
        }))
        .unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.get("1").unwrap().item_cost, Some(2250));
        assert_eq!(table.get("2").unwrap(), &ItemRecord::default());
        assert!(table.get("3").is_none());
    }

    #[test]
    fn test_table_tolerates_malformed_records() {
        let table: ReferenceTable<ItemRecord> = ReferenceTable::from_json(json!({
            "44": {"item_name": "item_tango", "item_cost": "90", "item_aliases": ["tango"]},
            "29": {"item_name": "item_boots", "item_cost": 500, "item_aliases": "boots"},
            "7": "item_javelin"
        }))
        .unwrap();

        assert_eq!(table.len(), 2);
        let tango = table.get("44").unwrap();
        assert_eq!(tango.item_name.as_deref(), Some("item_tango"));
        assert_eq!(tango.item_cost, None);
        assert_eq!(table.get("29").unwrap().item_cost, Some(500));
        assert_eq!(table.get("29").unwrap().item_aliases, None);
        assert!(table.get("7").is_none());

        assert!(ReferenceTable::<ItemRecord>::from_json(json!([1, 2])).is_err());
    }

    #[test]
    fn test_shared_catalog_replace_keeps_old_snapshot() {
        let shared = SharedCatalog::default();
        let before = shared.snapshot();

        let mut catalog = ReferenceCatalog::default();
        catalog.heroes.insert(1, HeroRecord { hero_name: Some("antimage".into()) });
        shared.replace(catalog);

        assert!(before.is_empty());
        assert_eq!(shared.snapshot().heroes.len(), 1);
    }
}

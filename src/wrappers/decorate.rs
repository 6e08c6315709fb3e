use crate::entities::{Ability, EntityKind, Hero, Item, SteamAccount};
use crate::reference::ReferenceCatalog;
use serde_json::Value;

use super::schema::{Rule, Schema, Segment};
use super::value::{Field, Record};

/// Decorate a raw endpoint payload according to `schema`.
///
/// The raw document is copied, never modified. Rules whose path does not
/// exist in the payload are skipped, so error payloads such as
/// `{"result": {"error": "..."}}` come back with their fields intact.
pub fn decorate(raw: &Value, schema: &Schema, catalog: &ReferenceCatalog) -> Record {
    let body = schema
        .envelope
        .and_then(|key| raw.get(key))
        .filter(|inner| inner.is_object())
        .unwrap_or(raw);

    let mut root = Field::from(body.clone());
    for rule in schema.rules {
        apply(rule, &mut root, catalog);
    }

    match root {
        Field::Record(record) => record,
        other => {
            let mut record = Record::new();
            record.insert(schema.envelope.unwrap_or("result"), other);
            record
        }
    }
}

fn apply(rule: &Rule, root: &mut Field, catalog: &ReferenceCatalog) {
    match *rule {
        Rule::Resolve {
            path,
            key,
            rename,
            kind,
        } => visit(root, path, &mut |record: &mut Record| {
            let source = record.remove(key).or_else(|| record.remove(rename));
            if let Some(field) = source {
                let resolved = resolve(kind, &field, catalog);
                match resolved {
                    Some(entity) => record.insert(rename, entity),
                    None => record.insert(key, field),
                };
            }
        }),
        Rule::ResolveInPlace { path, keys, kind } => visit(root, path, &mut |record: &mut Record| {
            for key in keys {
                if let Some(field) = record.get_mut(key) {
                    if let Some(entity) = resolve(kind, field, catalog) {
                        *field = entity;
                    }
                }
            }
        }),
        Rule::Group { path, fields, into } => visit(root, path, &mut |record: &mut Record| {
            let mut group = Record::new();
            for (source, target) in fields {
                if let Some(field) = record.remove(source) {
                    group.insert(*target, field);
                }
            }
            if !group.is_empty() {
                record.insert(into, Field::Record(group));
            }
        }),
        Rule::Gather {
            path,
            prefix,
            suffix,
            kind,
            into,
        } => visit(root, path, &mut |record: &mut Record| {
            let mut numbered: Vec<(usize, String)> = record
                .keys()
                .filter_map(|key| {
                    let index = key.strip_prefix(prefix)?.strip_suffix(suffix)?;
                    Some((index.parse().ok()?, key.to_string()))
                })
                .collect();
            if numbered.is_empty() {
                return;
            }
            numbered.sort();

            let gathered = numbered
                .into_iter()
                .filter_map(|(_, key)| record.remove(&key))
                .map(|field| resolve(kind, &field, catalog).unwrap_or(field))
                .collect();
            record.insert(into, Field::List(gathered));
        }),
        Rule::Project {
            path,
            from,
            keys,
            into,
        } => visit(root, path, &mut |record: &mut Record| {
            let Some(Field::List(elements)) = record.get(from) else {
                return;
            };
            let projected = elements
                .iter()
                .filter_map(Field::as_record)
                .map(|element| {
                    let mut minimal = Record::new();
                    for key in keys {
                        if let Some(field) = element.get(key) {
                            minimal.insert(*key, field.clone());
                        }
                    }
                    Field::Record(minimal)
                })
                .collect();
            record.insert(into, Field::List(projected));
        }),
    }
}

/// Calls `f` on every record reached by following `path` from `field`.
fn visit(field: &mut Field, path: &[Segment], f: &mut dyn FnMut(&mut Record)) {
    match (path.split_first(), field) {
        (None, Field::Record(record)) => f(record),
        (Some((Segment::Key(key), rest)), Field::Record(record)) => {
            if let Some(child) = record.get_mut(key) {
                visit(child, rest, f);
            }
        }
        (Some((Segment::Keys(keys), rest)), Field::Record(record)) => {
            for key in keys.iter() {
                if let Some(child) = record.get_mut(key) {
                    visit(child, rest, f);
                }
            }
        }
        (Some((Segment::Each, rest)), Field::List(elements)) => {
            for element in elements.iter_mut() {
                visit(element, rest, f);
            }
        }
        _ => {}
    }
}

/// Resolve a raw id, or an already-resolved entity, into an entity field.
/// `None` when the field does not hold a usable id.
pub fn resolve(kind: EntityKind, field: &Field, catalog: &ReferenceCatalog) -> Option<Field> {
    match kind {
        EntityKind::Hero => {
            id_of(field, "hero_id").map(|id| Field::Hero(Hero::resolve(id, catalog)))
        }
        EntityKind::Item => {
            id_of(field, "item_id").map(|id| Field::Item(Item::resolve(id, catalog)))
        }
        EntityKind::Ability => {
            id_of(field, "ability_id").map(|id| Field::Ability(Ability::resolve(id, catalog)))
        }
        EntityKind::SteamAccount => account_of(field).map(Field::Account),
    }
}

fn id_of(field: &Field, id_key: &str) -> Option<String> {
    match field {
        Field::Number(n) => Some(
            n.as_u64()
                .map(|v| v.to_string())
                .or_else(|| n.as_i64().map(|v| v.to_string()))
                .unwrap_or_else(|| n.to_string()),
        ),
        Field::String(s) if !s.is_empty() => Some(s.clone()),
        Field::Record(record) => match record.get(id_key)? {
            nested @ (Field::Number(_) | Field::String(_)) => id_of(nested, id_key),
            _ => None,
        },
        Field::Hero(hero) if id_key == "hero_id" => Some(hero.hero_id.clone()),
        Field::Item(item) if id_key == "item_id" => Some(item.item_id.clone()),
        Field::Ability(ability) if id_key == "ability_id" => Some(ability.ability_id.clone()),
        _ => None,
    }
}

fn account_of(field: &Field) -> Option<SteamAccount> {
    match field {
        Field::Null => Some(SteamAccount::none()),
        Field::Number(n) => n.as_u64().map(SteamAccount::from_id),
        Field::String(s) => s.parse().ok(),
        Field::Account(account) => Some(*account),
        Field::Record(record) => match record.get("id64").or_else(|| record.get("id32"))? {
            Field::Null => Some(SteamAccount::none()),
            nested @ (Field::Number(_) | Field::String(_)) => account_of(nested),
            _ => None,
        },
        _ => None,
    }
}

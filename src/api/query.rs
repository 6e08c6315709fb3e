use crate::entities::{Hero, SteamAccount};
use std::fmt;

/// Query parameters for one call. Entity-typed setters write the same
/// parameter as their raw counterparts, so `hero(&Hero::resolve(1, ..))`
/// and `param("hero_id", 1)` produce identical requests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    params: Vec<(String, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key`, replacing any earlier value.
    pub fn param(mut self, key: &str, value: impl fmt::Display) -> Self {
        self.set(key, value.to_string());
        self
    }

    pub fn hero(self, hero: &Hero) -> Self {
        self.param("hero_id", &hero.hero_id)
    }

    pub fn hero_id(self, hero_id: impl fmt::Display) -> Self {
        self.param("hero_id", hero_id)
    }

    /// Accepts either id form; sent as the 32-bit id.
    pub fn account_id(self, account_id: u64) -> Self {
        self.steam_account(&SteamAccount::from_id(account_id))
    }

    pub fn steam_account(self, account: &SteamAccount) -> Self {
        match account.id32 {
            Some(id32) => self.param("account_id", id32),
            None => self,
        }
    }

    pub fn language(self, language: &str) -> Self {
        self.param("language", language)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.params
    }

    fn set(&mut self, key: &str, value: String) {
        match self.params.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = value,
            None => self.params.push((key.to_string(), value)),
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self
            .params
            .iter()
            .filter(|(k, _)| k != "key")
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();
        write!(f, "{{{}}}", rendered.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::STEAM64_OFFSET;
    use crate::reference::ReferenceCatalog;

    #[test]
    fn test_hero_entity_matches_hero_id() {
        let hero = Hero::resolve(1, &ReferenceCatalog::default());
        assert_eq!(Query::new().hero(&hero), Query::new().hero_id(1));
    }

    #[test]
    fn test_account_forms_match() {
        let id64 = 76561198088874284u64;
        let by_id64 = Query::new().account_id(id64);
        let by_id32 = Query::new().account_id(id64 - STEAM64_OFFSET);
        let by_account = Query::new().steam_account(&SteamAccount::from_id(id64));

        assert_eq!(by_id64, by_id32);
        assert_eq!(by_id64, by_account);
        assert_eq!(by_id64.get("account_id"), Some("128608556"));
    }

    #[test]
    fn test_param_replaces() {
        let query = Query::new().param("matches_requested", 5).param("matches_requested", 10);
        assert_eq!(query.pairs().len(), 1);
        assert_eq!(query.get("matches_requested"), Some("10"));
        assert!(Query::new().steam_account(&SteamAccount::none()).pairs().is_empty());
    }
}

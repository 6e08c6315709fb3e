use crate::config::Config;
use crate::error::ApiError;
use crate::reference::{ReferenceCatalog, SyncOutcome, Synchronizer};
use crate::wrappers::{
    GameItems, Heroes, LiveLeagueGames, MatchDetails, MatchHistory, TeamInfoByTeamID,
    TopLiveGame, TournamentPrizePool, Wrapper,
};
use serde_json::Value;
use std::sync::Arc;

use super::endpoints;
use super::query::Query;
use super::transport::{Transport, UreqTransport};

pub struct ApiClient {
    api_key: Option<String>,
    base_url: String,
    language: String,
    transport: Arc<dyn Transport>,
    synchronizer: Synchronizer,
}

impl ApiClient {
    pub fn new(config: &Config) -> Self {
        Self::with_transport(config, Arc::new(UreqTransport::new(config.timeout)))
    }

    /// Builds a client over `transport` and loads whatever reference data is
    /// already on disk. The network is not touched until a call is made.
    pub fn with_transport(config: &Config, transport: Arc<dyn Transport>) -> Self {
        let synchronizer = Synchronizer::from_config(config, transport.clone());
        if let Err(e) = synchronizer.load_local() {
            tracing::warn!("Could not load local reference data: {}", e);
        }

        ApiClient {
            api_key: config.api_key.clone(),
            base_url: endpoints::BASE_URL.to_string(),
            language: config.language.clone(),
            transport,
            synchronizer,
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Bring the local reference data up to date with the remote copy.
    pub fn update_local_data(&self, purge: bool) -> SyncOutcome {
        self.synchronizer.sync(purge)
    }

    pub fn catalog(&self) -> Arc<ReferenceCatalog> {
        self.synchronizer.catalog().snapshot()
    }

    /// Issue a call and return the payload without decoration.
    pub fn call_raw(&self, endpoint: &str, query: &Query) -> Result<Value, ApiError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let mut params = query.pairs().to_vec();
        params.push(("key".to_string(), self.api_key.clone().unwrap_or_default()));

        tracing::info!("Calling {} with {}", endpoint, query);
        let response = self.transport.get(&url, &params)?;

        match response.status {
            200 => serde_json::from_str(&response.body).map_err(|e| ApiError::Json(e.to_string())),
            400 => Err(ApiError::InsufficientArguments {
                method: endpoint.to_string(),
                params: query.to_string(),
            }),
            403 => Err(ApiError::Authentication {
                api_key: self.api_key.clone().unwrap_or_default(),
            }),
            404 => Err(ApiError::MethodUnavailable(url)),
            503 => Err(ApiError::Timeout),
            status => Err(ApiError::Status {
                status,
                reason: response.reason,
            }),
        }
    }

    fn call<W: Wrapper>(&self, endpoint: &str, query: &Query) -> Result<W, ApiError> {
        let raw = self.call_raw(endpoint, query)?;
        let catalog = self.catalog();
        Ok(W::from_value(&raw, &catalog))
    }

    fn with_language(&self, query: Query) -> Query {
        if query.contains("language") {
            query
        } else {
            query.language(&self.language)
        }
    }

    pub fn get_match_history(&self, query: Query) -> Result<MatchHistory, ApiError> {
        self.call(endpoints::GET_MATCH_HISTORY, &query)
    }

    pub fn get_match_history_by_sequence_num(&self, query: Query) -> Result<MatchHistory, ApiError> {
        self.call(endpoints::GET_MATCH_HISTORY_BY_SEQ_NUM, &query)
    }

    /// `query` must carry `match_id`; without it no request is made.
    pub fn get_match_details(&self, query: Query) -> Result<MatchDetails, ApiError> {
        if !query.contains("match_id") {
            return Err(ApiError::InsufficientArguments {
                method: endpoints::GET_MATCH_DETAILS.to_string(),
                params: query.to_string(),
            });
        }
        self.call(endpoints::GET_MATCH_DETAILS, &query)
    }

    pub fn get_heroes(&self, query: Query) -> Result<Heroes, ApiError> {
        self.call(endpoints::GET_HEROES, &self.with_language(query))
    }

    pub fn get_game_items(&self, query: Query) -> Result<GameItems, ApiError> {
        self.call(endpoints::GET_GAME_ITEMS, &self.with_language(query))
    }

    pub fn get_tournament_prize_pool(&self, query: Query) -> Result<TournamentPrizePool, ApiError> {
        self.call(endpoints::GET_TOURNAMENT_PRIZE_POOL, &query)
    }

    pub fn get_top_live_game(&self, query: Query) -> Result<TopLiveGame, ApiError> {
        let query = if query.contains("partner") {
            query
        } else {
            query.param("partner", 0)
        };
        self.call(endpoints::GET_TOP_LIVE_GAME, &query)
    }

    pub fn get_team_info_by_team_id(&self, query: Query) -> Result<TeamInfoByTeamID, ApiError> {
        self.call(endpoints::GET_TEAM_INFO_BY_TEAM_ID, &query)
    }

    pub fn get_live_league_games(&self, query: Query) -> Result<LiveLeagueGames, ApiError> {
        self.call(endpoints::GET_LIVE_LEAGUE_GAMES, &query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::transport::mock::MockTransport;
    use serde_json::json;
    use tempfile::TempDir;

    fn client(temp: &TempDir) -> (Arc<MockTransport>, ApiClient) {
        let transport = Arc::new(MockTransport::new());
        let config = Config {
            api_key: Some("abcdxyz".to_string()),
            data_dir: temp.path().to_path_buf(),
            ..Config::default()
        };
        let client = ApiClient::with_transport(&config, transport.clone());
        (transport, client)
    }

    fn url(endpoint: &str) -> String {
        format!("{}/{}", endpoints::BASE_URL, endpoint)
    }

    #[test]
    fn test_status_mapping() {
        let temp = TempDir::new().unwrap();
        let (transport, client) = client(&temp);
        let endpoint = endpoints::GET_MATCH_HISTORY;

        transport.route(&url(endpoint), 403, "");
        assert!(matches!(
            client.get_match_history(Query::new()),
            Err(ApiError::Authentication { api_key }) if api_key == "abcdxyz"
        ));

        transport.route(&url(endpoint), 503, "");
        assert!(matches!(client.get_match_history(Query::new()), Err(ApiError::Timeout)));

        transport.route(&url(endpoint), 400, "");
        assert!(matches!(
            client.get_match_history(Query::new()),
            Err(ApiError::InsufficientArguments { .. })
        ));

        transport.route(&url(endpoint), 500, "");
        assert!(matches!(
            client.get_match_history(Query::new()),
            Err(ApiError::Status { status: 500, .. })
        ));

        assert!(matches!(
            client.get_live_league_games(Query::new()),
            Err(ApiError::MethodUnavailable(_))
        ));
    }

    #[test]
    fn test_transport_failure_is_http_error() {
        let temp = TempDir::new().unwrap();
        let (transport, client) = client(&temp);
        transport.set_offline(true);

        assert!(matches!(client.get_heroes(Query::new()), Err(ApiError::Http(_))));
    }

    #[test]
    fn test_match_details_requires_match_id() {
        let temp = TempDir::new().unwrap();
        let (transport, client) = client(&temp);

        let result = client.get_match_details(Query::new());

        assert!(matches!(result, Err(ApiError::InsufficientArguments { .. })));
        assert!(transport.requested_urls().is_empty());
    }

    #[test]
    fn test_key_and_defaults_are_sent() {
        let temp = TempDir::new().unwrap();
        let (transport, client) = client(&temp);
        transport.route(&url(endpoints::GET_HEROES), 200, r#"{"result": {"heroes": []}}"#);
        transport.route(&url(endpoints::GET_TOP_LIVE_GAME), 200, r#"{"game_list": []}"#);

        client.get_heroes(Query::new()).unwrap();
        client.get_top_live_game(Query::new()).unwrap();
        client.get_heroes(Query::new().language("zh-TW")).unwrap();

        let requests = transport.requests.lock().unwrap();
        let heroes_params = &requests[0].1;
        assert!(heroes_params.contains(&("language".to_string(), "en_us".to_string())));
        assert!(heroes_params.contains(&("key".to_string(), "abcdxyz".to_string())));
        assert!(requests[1].1.contains(&("partner".to_string(), "0".to_string())));
        assert!(requests[2].1.contains(&("language".to_string(), "zh-TW".to_string())));
    }

    #[test]
    fn test_invalid_json_body() {
        let temp = TempDir::new().unwrap();
        let (transport, client) = client(&temp);
        transport.route(&url(endpoints::GET_GAME_ITEMS), 200, "<html>");

        assert!(matches!(client.get_game_items(Query::new()), Err(ApiError::Json(_))));
    }

    #[test]
    fn test_call_raw_is_undecorated() {
        let temp = TempDir::new().unwrap();
        let (transport, client) = client(&temp);
        let body = json!({"result": {"matches": [{"players": [{"hero_id": 1}]}]}});
        transport.route(&url(endpoints::GET_MATCH_HISTORY), 200, &body.to_string());

        let raw = client.call_raw(endpoints::GET_MATCH_HISTORY, &Query::new()).unwrap();
        assert_eq!(raw, body);
    }
}

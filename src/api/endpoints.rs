// Dota 2 Web API endpoint URLs

pub const BASE_URL: &str = "https://api.steampowered.com";

pub const GET_MATCH_HISTORY: &str = "IDOTA2Match_570/GetMatchHistory/v1/";
pub const GET_MATCH_HISTORY_BY_SEQ_NUM: &str = "IDOTA2Match_570/GetMatchHistoryBySequenceNum/v1/";
pub const GET_MATCH_DETAILS: &str = "IDOTA2Match_570/GetMatchDetails/v1/";
pub const GET_TOP_LIVE_GAME: &str = "IDOTA2Match_570/GetTopLiveGame/v1/";
pub const GET_TEAM_INFO_BY_TEAM_ID: &str = "IDOTA2Match_570/GetTeamInfoByTeamID/v1/";
pub const GET_LIVE_LEAGUE_GAMES: &str = "IDOTA2Match_570/GetLiveLeagueGames/v1/";
pub const GET_HEROES: &str = "IEconDOTA2_570/GetHeroes/v1/";
pub const GET_GAME_ITEMS: &str = "IEconDOTA2_570/GetGameItems/v1/";
pub const GET_TOURNAMENT_PRIZE_POOL: &str = "IEconDOTA2_570/GetTournamentPrizePool/v1/";

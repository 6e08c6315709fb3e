use crate::error::ApiError;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_REFERENCE_URL: &str =
    "https://raw.githubusercontent.com/whoophee/d2api/master/d2api/data";
pub const DEFAULT_LANGUAGE: &str = "en_us";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub data_dir: PathBuf,
    pub reference_url: String,
    pub timeout: Duration,
    pub language: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_key: None,
            data_dir: default_data_dir(),
            reference_url: DEFAULT_REFERENCE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ApiError> {
        dotenvy::dotenv().ok();

        let api_key = env::var("D2_API_KEY")
            .or_else(|_| env::var("DOTA2_API_KEY"))
            .ok()
            .filter(|key| !key.is_empty());

        let data_dir = env::var("D2API_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_data_dir());

        let reference_url = env::var("D2API_REFERENCE_URL")
            .unwrap_or_else(|_| DEFAULT_REFERENCE_URL.to_string());

        let timeout = match env::var("D2API_TIMEOUT_SECS") {
            Ok(raw) => {
                let secs = raw.parse::<u64>().map_err(|_| {
                    ApiError::Config(format!("D2API_TIMEOUT_SECS must be a number, got \"{}\"", raw))
                })?;
                Duration::from_secs(secs)
            }
            Err(_) => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let language = env::var("D2API_LANGUAGE").unwrap_or_else(|_| DEFAULT_LANGUAGE.to_string());

        Ok(Config {
            api_key,
            data_dir,
            reference_url: reference_url.trim_end_matches('/').to_string(),
            timeout,
            language,
        })
    }
}

pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("d2api"))
        .unwrap_or_else(|| PathBuf::from(".d2api"))
}

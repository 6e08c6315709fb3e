use crate::error::ApiError;
use std::time::Duration;

const USER_AGENT: &str = concat!("d2api/", env!("CARGO_PKG_VERSION"));

/// A completed HTTP exchange. Non-success statuses are carried here rather
/// than as errors; callers decide what a status means for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub reason: String,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

/// Synchronous GET with query parameters. `Err` means no response was
/// received at all (DNS, connect, timeout).
pub trait Transport: Send + Sync {
    fn get(&self, url: &str, query: &[(String, String)]) -> Result<HttpResponse, ApiError>;
}

pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build();
        UreqTransport { agent }
    }
}

impl Transport for UreqTransport {
    fn get(&self, url: &str, query: &[(String, String)]) -> Result<HttpResponse, ApiError> {
        let mut request = self.agent.get(url);
        for (key, value) in query {
            request = request.query(key, value);
        }

        tracing::debug!("GET {}", url);

        let response = match request.call() {
            Ok(resp) => resp,
            Err(ureq::Error::Status(_, resp)) => resp,
            Err(ureq::Error::Transport(e)) => {
                return Err(ApiError::Http(e.to_string()));
            }
        };

        let status = response.status();
        let reason = response.status_text().to_string();
        let body = response
            .into_string()
            .map_err(|e| ApiError::Http(e.to_string()))?;

        tracing::debug!("GET {} -> {}", url, status);

        Ok(HttpResponse {
            status,
            reason,
            body,
        })
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory transport keyed by URL. Unknown URLs answer 404; URLs
    /// registered as offline fail like an unreachable host.
    #[derive(Default)]
    pub struct MockTransport {
        routes: Mutex<HashMap<String, HttpResponse>>,
        offline: Mutex<bool>,
        pub requests: Mutex<Vec<(String, Vec<(String, String)>)>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn route(&self, url: &str, status: u16, body: &str) {
            self.routes.lock().unwrap().insert(
                url.to_string(),
                HttpResponse {
                    status,
                    reason: format!("status {}", status),
                    body: body.to_string(),
                },
            );
        }

        pub fn set_offline(&self, offline: bool) {
            *self.offline.lock().unwrap() = offline;
        }

        pub fn requested_urls(&self) -> Vec<String> {
            self.requests
                .lock()
                .unwrap()
                .iter()
                .map(|(url, _)| url.clone())
                .collect()
        }

        pub fn clear_requests(&self) {
            self.requests.lock().unwrap().clear();
        }
    }

    impl Transport for MockTransport {
        fn get(&self, url: &str, query: &[(String, String)]) -> Result<HttpResponse, ApiError> {
            self.requests
                .lock()
                .unwrap()
                .push((url.to_string(), query.to_vec()));

            if *self.offline.lock().unwrap() {
                return Err(ApiError::Http(format!("{}: connection refused", url)));
            }

            Ok(self
                .routes
                .lock()
                .unwrap()
                .get(url)
                .cloned()
                .unwrap_or(HttpResponse {
                    status: 404,
                    reason: "Not Found".to_string(),
                    body: String::new(),
                }))
        }
    }
}

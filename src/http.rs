//! HTTP transport used for go-import discovery
//!
//! The resolver only needs "GET and return status + body", so that is the
//! whole of the `Fetch` seam. `HttpClient` implements it over ureq.

use std::io::Read;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
#[error("{0}")]
pub struct FetchError(pub String);

/// Status code and unread body of a GET
///
/// Dropping the body releases the underlying connection.
pub struct FetchResponse {
    pub status: u16,
    pub body: Box<dyn Read>,
}

pub trait Fetch {
    fn get(&self, url: &str) -> Result<FetchResponse, FetchError>;
}

/// Production transport backed by a `ureq::Agent`
pub struct HttpClient {
    agent: ureq::Agent,
    user_agent: String,
}

impl HttpClient {
    /// Build a client; `timeout` of `None` waits indefinitely
    pub fn new(timeout: Option<Duration>, user_agent: &str) -> Self {
        // Non-2xx statuses are reported by the resolver, not by the transport
        let config = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build();

        Self {
            agent: config.into(),
            user_agent: user_agent.to_string(),
        }
    }
}

impl Fetch for HttpClient {
    fn get(&self, url: &str) -> Result<FetchResponse, FetchError> {
        let response = self
            .agent
            .get(url)
            .header("User-Agent", self.user_agent.as_str())
            .call()
            .map_err(|e| FetchError(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response.into_body().into_reader();

        Ok(FetchResponse {
            status,
            body: Box::new(body),
        })
    }
}

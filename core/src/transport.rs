//! Blocking HTTP round trips.
//!
//! A [`Transport`] takes a fully built [`HttpRequest`], performs it, and
//! returns the status, headers and the whole body. Status codes are returned
//! as data, never as errors: interpreting the reply is the caller's job.

use std::time::Duration;

use tracing::debug;

use crate::error::{IsbasiError, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Executes one HTTP request synchronously.
pub trait Transport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// Default transport backed by a `ureq` agent.
///
/// Every call reads the response body to the end before returning, so the
/// underlying connection is released even when the body later fails to
/// decode.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        let HttpRequest {
            method,
            url,
            headers,
            body,
            timeout,
        } = request;
        debug!(%method, %url, "sending request");

        let result = match (method, body) {
            (HttpMethod::Get, _) => prepare(self.agent.get(&url), &headers, timeout).call(),
            (HttpMethod::Delete, _) => prepare(self.agent.delete(&url), &headers, timeout).call(),
            (HttpMethod::Post, Some(body)) => {
                prepare(self.agent.post(&url), &headers, timeout).send(body.as_bytes())
            }
            (HttpMethod::Post, None) => prepare(self.agent.post(&url), &headers, timeout).send_empty(),
            (HttpMethod::Put, Some(body)) => {
                prepare(self.agent.put(&url), &headers, timeout).send(body.as_bytes())
            }
            (HttpMethod::Put, None) => prepare(self.agent.put(&url), &headers, timeout).send_empty(),
        };
        let mut response = result.map_err(wire_error)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = response.body_mut().read_to_string().map_err(wire_error)?;
        debug!(status, bytes = body.len(), "received response");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn prepare<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
    timeout: Option<Duration>,
) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    match timeout {
        Some(limit) => builder.config().timeout_global(Some(limit)).build(),
        None => builder,
    }
}

fn wire_error(err: ureq::Error) -> IsbasiError {
    match &err {
        ureq::Error::Timeout(_) => IsbasiError::Timeout(err.to_string()),
        _ => IsbasiError::Transport(err.to_string()),
    }
}

/// In-memory transport for unit tests: replays canned responses in order and
/// records every request it receives.
#[cfg(test)]
pub(crate) mod fake {
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use super::Transport;
    use crate::error::{IsbasiError, Result};
    use crate::http::{HttpRequest, HttpResponse};

    #[derive(Debug, Default)]
    pub(crate) struct ScriptedTransport {
        responses: RefCell<VecDeque<Result<HttpResponse>>>,
        pub(crate) requests: RefCell<Vec<HttpRequest>>,
    }

    impl ScriptedTransport {
        pub(crate) fn reply(self, status: u16, body: &str) -> Self {
            self.responses.borrow_mut().push_back(Ok(HttpResponse {
                status,
                headers: Vec::new(),
                body: body.to_string(),
            }));
            self
        }

        pub(crate) fn fail(self, err: IsbasiError) -> Self {
            self.responses.borrow_mut().push_back(Err(err));
            self
        }

        pub(crate) fn last_request(&self) -> HttpRequest {
            self.requests
                .borrow()
                .last()
                .cloned()
                .expect("no request was sent")
        }
    }

    impl Transport for ScriptedTransport {
        fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
            self.requests.borrow_mut().push(request);
            self.responses
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(IsbasiError::Transport("no scripted response".to_string())))
        }
    }
}

//! The HTTP collaborator boundary.
//!
//! The client never opens sockets itself; it talks through [`Transport`],
//! which does one blocking POST and reports either a status-line-plus-body
//! response or a network-level failure. [`UreqTransport`] is the default
//! implementation. Timeout policy lives here, not in the client.

use std::time::Duration;

use thiserror::Error;

/// A completed HTTP exchange, whatever the status code.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Numeric status code, e.g. 200
    pub status: u16,
    /// Reason phrase from the status line, e.g. "OK"
    pub reason: String,
    /// Response body text
    pub body: String,
}

/// A network-level failure: connection refused, timeout, DNS, broken pipe.
///
/// The detail string is for logging only; callers of the public API see the
/// generic transport message instead.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct TransportFailure(pub String);

/// Blocking HTTP POST collaborator used by the order client.
pub trait Transport {
    /// Issue one POST and block for the outcome.
    ///
    /// Non-success HTTP statuses are ordinary [`HttpResponse`] values; only
    /// failures below HTTP (the request never completed) are `Err`.
    fn post(
        &self,
        url: &str,
        body: Option<&str>,
        headers: &[(&str, &str)],
    ) -> Result<HttpResponse, TransportFailure>;
}

/// Default transport backed by a [`ureq::Agent`].
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    /// Create a transport with default connect/read timeouts.
    pub fn new() -> Self {
        Self {
            agent: ureq::AgentBuilder::new()
                .timeout_connect(Duration::from_secs(5))
                .timeout_read(Duration::from_secs(10))
                .build(),
        }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn post(
        &self,
        url: &str,
        body: Option<&str>,
        headers: &[(&str, &str)],
    ) -> Result<HttpResponse, TransportFailure> {
        let mut request = self.agent.post(url);
        for (name, value) in headers {
            request = request.set(name, value);
        }

        let outcome = match body {
            Some(text) => request.send_string(text),
            None => request.call(),
        };

        match outcome {
            Ok(response) => read_response(response),
            Err(ureq::Error::Status(_, response)) => read_response(response),
            Err(ureq::Error::Transport(transport)) => {
                Err(TransportFailure(transport.to_string()))
            }
        }
    }
}

fn read_response(response: ureq::Response) -> Result<HttpResponse, TransportFailure> {
    let status = response.status();
    let reason = response.status_text().to_owned();
    let body = response
        .into_string()
        .map_err(|e| TransportFailure(e.to_string()))?;
    Ok(HttpResponse {
        status,
        reason,
        body,
    })
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted transport for unit tests: hands back queued responses and
    //! records every call for later assertions.

    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    use super::{HttpResponse, Transport, TransportFailure};

    #[derive(Debug, Clone)]
    pub(crate) struct RecordedCall {
        pub url: String,
        pub body: Option<String>,
        pub headers: Vec<(String, String)>,
    }

    #[derive(Default)]
    struct ScriptState {
        responses: VecDeque<Result<HttpResponse, TransportFailure>>,
        calls: Vec<RecordedCall>,
    }

    #[derive(Clone, Default)]
    pub(crate) struct ScriptedTransport {
        state: Rc<RefCell<ScriptState>>,
    }

    impl ScriptedTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn push_response(&self, status: u16, reason: &str, body: &str) {
            self.state.borrow_mut().responses.push_back(Ok(HttpResponse {
                status,
                reason: reason.to_owned(),
                body: body.to_owned(),
            }));
        }

        pub fn push_failure(&self, detail: &str) {
            self.state
                .borrow_mut()
                .responses
                .push_back(Err(TransportFailure(detail.to_owned())));
        }

        pub fn calls(&self) -> Vec<RecordedCall> {
            self.state.borrow().calls.clone()
        }
    }

    impl Transport for ScriptedTransport {
        fn post(
            &self,
            url: &str,
            body: Option<&str>,
            headers: &[(&str, &str)],
        ) -> Result<HttpResponse, TransportFailure> {
            let mut state = self.state.borrow_mut();
            state.calls.push(RecordedCall {
                url: url.to_owned(),
                body: body.map(str::to_owned),
                headers: headers
                    .iter()
                    .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
                    .collect(),
            });
            state
                .responses
                .pop_front()
                .unwrap_or_else(|| Err(TransportFailure("no scripted response".to_owned())))
        }
    }
}

//! Retry coordinator: sends one logical request until it succeeds, is rejected, or runs
//! out of peers.
//!
//! Two recovery policies apply:
//!
//! - **Clock skew**: a node answering `success: false` with "Timestamp is in the future"
//!   gets the same request again with `timeOffset` raised by [`TIME_OFFSET_STEP`], up to
//!   [`MAX_TIME_OFFSET`].
//! - **Failover**: a transport error that involved the peer bans it, waits the failover
//!   delay and re-sends to a freshly selected peer, as long as
//!   [`SessionState::may_redial`] allows. Errors raised before anything reached the peer
//!   end the request at once.
//!
//! Neither path returns an error to the caller. Exhausting the peers yields the structured
//! failure object built by [`failure_response`].
//!
//! [`SessionState::may_redial`]: super::state::SessionState::may_redial

use std::time::Duration;

use log::{debug, info, warn};
use reqwest::Method;
use serde_json::{Value, json};
use tokio::time::sleep;

use super::Session;
use super::query::{Params, trim_params};
use super::request::{build_peer_request, build_request};
use crate::http::{HttpError, Transport};

pub const TIME_OFFSET_STEP: i64 = 10;
pub const MAX_TIME_OFFSET: i64 = 40;
pub const DEFAULT_FAILOVER_DELAY: Duration = Duration::from_millis(1000);
pub const EXHAUSTED_MESSAGE: &str = "could not create http request to any of the given peers";

const CLOCK_SKEW_MESSAGE: &str = "Timestamp is in the future";
const TIME_OFFSET_PARAM: &str = "timeOffset";

/// Loop state of one logical request.
#[derive(Debug, Clone)]
struct RetryContext {
    method: Method,
    resource: String,
    params: Params,
    time_offset: i64,
}

impl RetryContext {
    fn new(method: Method, resource: &str, params: Params) -> Self {
        let time_offset = params
            .get(TIME_OFFSET_PARAM)
            .and_then(|v| v.as_i64().or_else(|| v.as_str().and_then(|s| s.parse().ok())))
            .unwrap_or(0);
        Self {
            method,
            resource: resource.to_string(),
            params,
            time_offset,
        }
    }

    fn params(&self) -> Params {
        let mut params = self.params.clone();
        if self.time_offset > 0 {
            params.insert(TIME_OFFSET_PARAM.to_string(), Value::String(self.time_offset.to_string()));
        }
        params
    }

    /// Raises the offset by one step unless that would pass the cap.
    fn advance_time_offset(&mut self) -> bool {
        let next = self.time_offset + TIME_OFFSET_STEP;
        if next > MAX_TIME_OFFSET {
            return false;
        }
        self.time_offset = next;
        true
    }
}

pub fn is_clock_skew(body: &Value) -> bool {
    body.get("success").and_then(Value::as_bool) == Some(false) &&
        body.get("message")
            .and_then(Value::as_str)
            .is_some_and(|message| message.contains(CLOCK_SKEW_MESSAGE))
}

/// The value a request resolves to once no peer could be reached.
pub fn failure_response(error: &HttpError) -> Value {
    json!({
        "success": false,
        "error": error.to_string(),
        "message": EXHAUSTED_MESSAGE,
    })
}

impl<T: Transport> Session<T> {
    /// Sends a request through the retry coordinator.
    ///
    /// `params` are trimmed before use. The returned value is the node's response body,
    /// including logical failures the node reported, or the structured failure object when
    /// every candidate peer failed.
    pub async fn send_request(&self, method: Method, resource: &str, params: Option<Params>) -> Value {
        let params = params.map(|p| trim_params(&p)).unwrap_or_default();
        self.dispatch(RetryContext::new(method, resource, params)).await
    }

    /// Same as [`send_request`](Self::send_request), handing the final value to `callback`
    /// before returning it.
    pub async fn send_request_with<F>(&self, method: Method, resource: &str, params: Option<Params>, callback: F) -> Value
    where F: FnOnce(&Value) {
        let result = self.send_request(method, resource, params).await;
        callback(&result);
        result
    }

    /// Sends `body` once to the current peer's `/peer/<path>` route.
    ///
    /// Peer routes are not retried: a transport error yields the failure object directly.
    pub async fn send_peer_request(&self, method: Method, path: &str, body: Value) -> Value {
        let target = self.state.read().await.target();
        let request = build_peer_request(&method, path, body, &target);

        match self.transport.send(&request).await {
            Ok(body) => body,
            Err(e) => {
                warn!(
                    peer = &*target.host,
                    path = path,
                    error:% = e;
                    "Peer request failed"
                );
                failure_response(&e)
            },
        }
    }

    async fn dispatch(&self, mut ctx: RetryContext) -> Value {
        loop {
            let target = self.state.read().await.target();
            let request = build_request(&ctx.method, &ctx.resource, &ctx.params(), &target);

            debug!(
                method = ctx.method.as_str(),
                resource = &*ctx.resource,
                peer = &*target.host,
                time_offset = ctx.time_offset;
                "Dispatching request"
            );

            match self.transport.send(&request).await {
                Ok(body) => {
                    if is_clock_skew(&body) && ctx.advance_time_offset() {
                        warn!(
                            peer = &*target.host,
                            time_offset = ctx.time_offset;
                            "Peer reports timestamp in the future, retrying with offset"
                        );
                        continue;
                    }
                    return body;
                },
                Err(e) => {
                    warn!(
                        peer = &*target.host,
                        error:% = e;
                        "Request to peer failed"
                    );

                    if !e.is_peer_failure() {
                        warn!(
                            resource = &*ctx.resource,
                            error:% = e;
                            "Request could not be built, no peer was contacted"
                        );
                        return failure_response(&e);
                    }

                    let redial = {
                        let mut state = self.state.write().await;
                        let redial = state.may_redial();
                        if redial {
                            state.ban(&target.host);
                        }
                        redial
                    };

                    if !redial {
                        warn!(
                            resource = &*ctx.resource,
                            error:% = e;
                            "No peer left to redial"
                        );
                        return failure_response(&e);
                    }

                    sleep(self.failover_delay).await;

                    let next = self.state.write().await.set_node(None);
                    info!(
                        from = &*target.host,
                        to = &*next;
                        "Redialling request to new peer"
                    );
                },
            }
        }
    }
}

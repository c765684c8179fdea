//! Session-token negotiation layered over the transport.
//!
//! The daemon hands out a token on the first 409 and expects it on every
//! subsequent request. A call that hits a 409 stores the fresh token and is
//! re-issued once; a second consecutive 409 is fatal.

use std::sync::{Mutex, PoisonError};

use reqwest::header::HeaderValue;
use seedbridge_config::RuntimeConfigProvider;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::{RpcError, RpcResult};
use crate::transport::{Exchange, Transport};

/// Re-issues allowed per logical call after a session challenge.
pub(crate) const SESSION_RETRIES: u8 = 1;

/// Owner of the session token for one client instance.
pub(crate) struct SessionNegotiator {
    transport: Transport,
    token: Mutex<Option<HeaderValue>>,
}

impl SessionNegotiator {
    pub(crate) const fn new(transport: Transport) -> Self {
        Self {
            transport,
            token: Mutex::new(None),
        }
    }

    pub(crate) fn config(&self) -> &dyn RuntimeConfigProvider {
        self.transport.config()
    }

    /// Invoke `method` and decode its arguments, renewing the token at most once.
    pub(crate) async fn call<A, T>(&self, method: &'static str, arguments: &A) -> RpcResult<T>
    where
        A: Serialize + Sync,
        T: DeserializeOwned,
    {
        let mut retries_remaining = SESSION_RETRIES;
        loop {
            let session = self.current_token();
            match self
                .transport
                .execute(method, arguments, session.as_ref())
                .await?
            {
                Exchange::Complete(arguments) => {
                    return serde_json::from_value(arguments)
                        .map_err(|source| RpcError::UnexpectedArguments { method, source });
                }
                Exchange::SessionChallenge(fresh) => {
                    if fresh.is_none() {
                        warn!(method, "session challenge carried no token");
                    }
                    self.store_token(fresh);
                    if retries_remaining == 0 {
                        warn!(method, "daemon repeated the session challenge");
                        return Err(RpcError::SessionChallenge { method });
                    }
                    retries_remaining -= 1;
                    debug!(method, "session token renewed; re-issuing request");
                }
            }
        }
    }

    pub(crate) fn current_token(&self) -> Option<HeaderValue> {
        self.token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn store_token(&self, token: Option<HeaderValue>) {
        let token = token.map(|mut value| {
            value.set_sensitive(true);
            value
        });
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = token;
    }
}

//! `httpmock` helpers that emulate a Transmission daemon.

use httpmock::prelude::*;
use httpmock::Mock;
use serde_json::Value;

/// RPC path Transmission serves by default.
pub const RPC_PATH: &str = "/transmission/rpc";
/// Header carrying the session token.
pub const SESSION_HEADER: &str = "x-transmission-session-id";
/// Session token handed out by [`mock_session_challenge`] unless overridden.
pub const SESSION_TOKEN: &str = "session-token-1";

/// RPC URL pointing at the mock daemon.
#[must_use]
pub fn rpc_url(server: &MockServer) -> String {
    server.url(RPC_PATH)
}

/// RPC URL pointing at the mock daemon with basic-auth userinfo.
#[must_use]
pub fn rpc_url_with_credentials(server: &MockServer, username: &str, password: &str) -> String {
    format!("http://{username}:{password}@{}{RPC_PATH}", server.address())
}

/// Answer requests without a session header with a 409 carrying `token`.
pub fn mock_session_challenge<'a>(server: &'a MockServer, token: &str) -> Mock<'a> {
    let token = token.to_string();
    server.mock(move |when, then| {
        when.method(POST).path(RPC_PATH).header_missing(SESSION_HEADER);
        then.status(409)
            .header(SESSION_HEADER, token.as_str())
            .body("<h1>409: Conflict</h1>");
    })
}

/// Answer `request` sent with `session` by returning `response` with status 200.
pub fn mock_rpc<'a>(
    server: &'a MockServer,
    session: &str,
    request: Value,
    response: Value,
) -> Mock<'a> {
    let session = session.to_string();
    server.mock(move |when, then| {
        when.method(POST)
            .path(RPC_PATH)
            .header(SESSION_HEADER, session.as_str())
            .header("content-type", "application/json")
            .json_body(request);
        then.status(200)
            .header("content-type", "application/json")
            .json_body(response);
    })
}

/// Answer `request` sent with `session` with a raw body and status.
pub fn mock_rpc_raw<'a>(
    server: &'a MockServer,
    session: &str,
    request: Value,
    status: u16,
    body: &str,
) -> Mock<'a> {
    let session = session.to_string();
    let body = body.to_string();
    server.mock(move |when, then| {
        when.method(POST)
            .path(RPC_PATH)
            .header(SESSION_HEADER, session.as_str())
            .json_body(request);
        then.status(status).body(body.as_str());
    })
}

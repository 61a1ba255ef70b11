//! Request-scoped auth context.
//!
//! Handlers that require a verified user take a `Session` argument; the
//! extractor reads the bearer token (or session cookie), verifies it and
//! rejects with 401 when anything is off. `Option<Session>` is for the one
//! endpoint that serves anonymous callers too: an absent token yields
//! `None`, but a present-and-invalid token is still rejected.

use super::envelope;
use super::state::ServerState;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, StatusCode},
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use tracing::debug;

pub const COOKIE_SESSION_TOKEN_KEY: &str = "session_token";

#[derive(Debug, Clone)]
pub struct Session {
    pub uid: String,
    pub email: Option<String>,
}

pub struct Unauthorized;

impl IntoResponse for Unauthorized {
    fn into_response(self) -> Response {
        envelope::error(StatusCode::UNAUTHORIZED, "Unauthorized")
    }
}

async fn extract_token(parts: &mut Parts, ctx: &ServerState) -> Option<String> {
    if let Some(value) = parts.headers.get(header::AUTHORIZATION) {
        let value = value.to_str().ok()?;
        // "Bearer <token>"
        return value.split_whitespace().nth(1).map(str::to_string);
    }
    CookieJar::from_request_parts(parts, ctx)
        .await
        .ok()?
        .get(COOKIE_SESSION_TOKEN_KEY)
        .map(Cookie::value)
        .map(str::to_string)
}

fn verify(token: &str, ctx: &ServerState) -> Option<Session> {
    match ctx.token_verifier.verify(token) {
        Ok(claims) => Some(Session {
            uid: claims.sub,
            email: claims.email,
        }),
        Err(err) => {
            debug!("Token verification failed: {}", err);
            None
        }
    }
}

impl FromRequestParts<ServerState> for Session {
    type Rejection = Unauthorized;

    async fn from_request_parts(
        parts: &mut Parts,
        ctx: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_token(parts, ctx).await.ok_or(Unauthorized)?;
        verify(&token, ctx).ok_or(Unauthorized)
    }
}

impl FromRequestParts<ServerState> for Option<Session> {
    type Rejection = Unauthorized;

    async fn from_request_parts(
        parts: &mut Parts,
        ctx: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        match extract_token(parts, ctx).await {
            None => Ok(None),
            Some(token) => verify(&token, ctx).map(Some).ok_or(Unauthorized),
        }
    }
}

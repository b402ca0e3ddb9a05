//! Token authentication middleware.

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Request, StatusCode},
    middleware::Next,
    response::Response,
};

use crate::directory::User;
use crate::http::response::detail_response;
use crate::http::AppState;

/// The authenticated user, attached to request extensions.
#[derive(Clone, Debug)]
pub struct Actor(pub User);

/// Pull the key out of `Token <key>` or `Bearer <key>`.
fn extract_key(header: &str) -> Option<&str> {
    let (scheme, key) = header.trim().split_once(' ')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    if scheme.eq_ignore_ascii_case("token") || scheme.eq_ignore_ascii_case("bearer") {
        Some(key)
    } else {
        None
    }
}

pub async fn token_auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let Some(header) = header else {
        return detail_response(
            StatusCode::UNAUTHORIZED,
            "Authentication credentials were not provided.",
        );
    };

    let user = extract_key(header)
        .and_then(|key| state.tokens.authenticate(key))
        .and_then(|id| state.directory.get(id));

    match user {
        Some(user) => {
            request.extensions_mut().insert(Actor(user));
            next.run(request).await
        }
        None => {
            tracing::debug!("Rejected request with invalid token");
            detail_response(StatusCode::UNAUTHORIZED, "Invalid token.")
        }
    }
}

use axum::extract::State;
use axum::{body::Body, extract::Request, http, http::Response, middleware::Next};
use sha2::{Digest, Sha256};
use std::sync::Arc;

use crate::controllers::token::TokenController;
use crate::core::error::Error;
use crate::types::user::Role;

/// Unsalted SHA-256, hex encoded.
pub(crate) fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

pub(crate) fn verify_password(stored_hash: &str, password: &str) -> bool {
    stored_hash == hash_password(password)
}

/// Middleware state for a protected route: which roles may pass, if any.
#[derive(Clone, Debug)]
pub(crate) struct Guard {
    tokens: TokenController,
    roles: Option<Arc<[Role]>>,
}

impl Guard {
    pub(crate) fn any(tokens: TokenController) -> Self {
        Self {
            tokens,
            roles: None,
        }
    }

    pub(crate) fn roles(tokens: TokenController, roles: &[Role]) -> Self {
        Self {
            tokens,
            roles: Some(roles.into()),
        }
    }
}

fn request_token(request: &Request) -> Result<Option<String>, Error> {
    let token = match request.headers().get(http::header::AUTHORIZATION) {
        Some(header) => header.to_str()?,
        None => return Ok(None),
    };

    let token = token.strip_prefix("Bearer ").unwrap_or(token);

    if token.is_empty() {
        return Ok(None);
    }

    Ok(Some(token.to_string()))
}

/// Failures other than the guard's own outcomes become a 401 carrying their
/// description, so the guard never answers with a server error.
fn degrade(err: Error) -> Error {
    match err {
        Error::MissingToken
        | Error::InvalidToken
        | Error::ExpiredToken
        | Error::InsufficientPermissions
        | Error::Unauthorized(_) => err,
        other => Error::Unauthorized(other.to_string()),
    }
}

pub(crate) async fn authorize(
    State(guard): State<Guard>,
    mut request: Request,
    next: Next,
) -> Result<Response<Body>, Error> {
    let token = request_token(&request);

    let result = match token {
        Ok(token) => {
            guard
                .tokens
                .check(token.as_deref(), guard.roles.as_deref())
                .await
        }
        Err(e) => Err(e),
    };

    let record = match result {
        Ok(record) => record,
        Err(e) => {
            tracing::debug!("request rejected: {}", e);
            return Err(degrade(e));
        }
    };

    tracing::debug!(user_id = %record.user_id, role = %record.role, "request authorized");

    request.extensions_mut().insert(record);

    Ok(next.run(request).await)
}

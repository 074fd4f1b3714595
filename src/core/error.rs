use axum::BoxError;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::http::header::ToStrError;
use axum::response::{IntoResponse, Response};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Token is missing")]
    MissingToken,
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token has expired")]
    ExpiredToken,
    #[error("Insufficient permissions")]
    InsufficientPermissions,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("{0}")]
    Unauthorized(String),
    #[error("Header decode error: {0}")]
    HeaderDecode(#[from] ToStrError),
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("Invalid email format")]
    InvalidEmail,
    #[error("Email already registered")]
    UserAlreadyExists,
    #[error("User not found")]
    UserNotFound,
    #[error("Destination not found")]
    DestinationNotFound,
    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),
}

impl Error {
    pub(crate) fn status(&self) -> StatusCode {
        match self {
            Error::MissingToken
            | Error::InvalidToken
            | Error::ExpiredToken
            | Error::InvalidCredentials
            | Error::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Error::InsufficientPermissions => StatusCode::FORBIDDEN,
            Error::InvalidEmail | Error::InvalidBody(_) => StatusCode::BAD_REQUEST,
            Error::UserAlreadyExists => StatusCode::CONFLICT,
            Error::UserNotFound | Error::DestinationNotFound => StatusCode::NOT_FOUND,
            Error::HeaderDecode(_) | Error::Jwt(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!("{:?}", self);
        } else {
            tracing::debug!("{:?}", self);
        }

        let message = match self {
            Error::HeaderDecode(_) => "Header decode error".to_string(),
            Error::Jwt(_) => "JWT error".to_string(),
            other => other.to_string(),
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

pub(crate) async fn handle_middleware_errors(err: BoxError) -> (StatusCode, &'static str) {
    tracing::error!("Unhandled error: {:?}", err);
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_failures_map_to_401_and_403() {
        assert_eq!(Error::MissingToken.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(Error::InvalidToken.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(Error::ExpiredToken.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            Error::Unauthorized("bad header".into()).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            Error::InsufficientPermissions.status(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(Error::MissingToken.to_string(), "Token is missing");
        assert_eq!(Error::ExpiredToken.to_string(), "Token has expired");
        assert_eq!(
            Error::Unauthorized("boom".into()).to_string(),
            "boom".to_string()
        );
    }
}

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, State};
use tracing::instrument;

use crate::core::error::Error;
use crate::core::state::AppState;
use crate::token::store::TokenRecord;
use crate::types::request::ValidateToken;
use crate::types::response::{RoleInfo, TokenValidation};

#[instrument(skip_all)]
pub(crate) async fn validate(
    State(state): State<AppState>,
    payload: Result<Json<ValidateToken>, JsonRejection>,
) -> Result<Json<TokenValidation>, Error> {
    let Json(params) = payload?;

    let record = state.tokens.lookup(params.token.as_deref()).await?;

    Ok(Json(TokenValidation {
        message: "Token is valid",
        user_id: record.user_id,
        role: record.role,
    }))
}

pub(crate) async fn roles(Extension(record): Extension<TokenRecord>) -> Json<RoleInfo> {
    Json(RoleInfo { role: record.role })
}

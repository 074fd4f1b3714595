use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::instrument;

use crate::core::error::Error;
use crate::core::state::AppState;
use crate::types::request::{LoginData, NewUser, UpdateUser};
use crate::types::response;
use crate::types::user::User;

#[instrument(skip(state))]
pub(crate) async fn list(State(state): State<AppState>) -> Json<Vec<User>> {
    Json(state.user_controller.list().await)
}

#[instrument(skip_all)]
pub(crate) async fn register(
    State(state): State<AppState>,
    payload: Result<Json<NewUser>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), Error> {
    let Json(params) = payload?;

    let user = state.user_controller.register(params).await?;

    Ok((StatusCode::CREATED, Json(user)))
}

#[instrument(skip_all)]
pub(crate) async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginData>, JsonRejection>,
) -> Result<Json<response::Login>, Error> {
    let Json(params) = payload?;

    let (user, token) = state
        .user_controller
        .login(&params.email, &params.password)
        .await?;

    Ok(Json(response::Login::new(token, user)))
}

#[instrument(skip(state))]
pub(crate) async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<User>, Error> {
    Ok(Json(state.user_controller.get(&id).await?))
}

#[instrument(skip(state, payload))]
pub(crate) async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateUser>, JsonRejection>,
) -> Result<Json<User>, Error> {
    let Json(params) = payload?;

    Ok(Json(state.user_controller.update(&id, params).await?))
}

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::instrument;

use crate::core::error::Error;
use crate::core::state::AppState;
use crate::types::destination::Destination;
use crate::types::request::{NewDestination, UpdateDestination};
use crate::types::response::Message;

#[instrument(skip(state))]
pub(crate) async fn list(State(state): State<AppState>) -> Json<Vec<Destination>> {
    Json(state.destination_controller.list().await)
}

#[instrument(skip(state))]
pub(crate) async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Destination>, Error> {
    Ok(Json(state.destination_controller.get(&id).await?))
}

#[instrument(skip_all)]
pub(crate) async fn post(
    State(state): State<AppState>,
    payload: Result<Json<NewDestination>, JsonRejection>,
) -> Result<(StatusCode, Json<Destination>), Error> {
    let Json(params) = payload?;

    let destination = state.destination_controller.create(params).await;

    Ok((StatusCode::CREATED, Json(destination)))
}

#[instrument(skip(state, payload))]
pub(crate) async fn put(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateDestination>, JsonRejection>,
) -> Result<Json<Destination>, Error> {
    let Json(params) = payload?;

    Ok(Json(state.destination_controller.update(&id, params).await?))
}

#[instrument(skip(state))]
pub(crate) async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Message>, Error> {
    state.destination_controller.delete(&id).await?;

    Ok(Json(Message {
        message: "Destination deleted successfully",
    }))
}

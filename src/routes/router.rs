use crate::core::error;
use crate::core::state::AppState;
use crate::routes::{auth, destination, user};
use crate::types::user::Role;
use crate::utils;
use crate::utils::auth::Guard;
use axum::error_handling::HandleErrorLayer;
use axum::{
    Router,
    extract::{MatchedPath, Request},
    http::Method,
    middleware,
    routing::{get, post},
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    cors::{self, CorsLayer},
    trace::TraceLayer,
};
use tracing::info_span;

pub(crate) fn routes(state: AppState, rate_limit: u64) -> Router {
    let member = middleware::from_fn_with_state(
        Guard::any(state.tokens.clone()),
        utils::auth::authorize,
    );
    let admin = middleware::from_fn_with_state(
        Guard::roles(state.tokens.clone(), &[Role::Admin]),
        utils::auth::authorize,
    );

    // /auth/...
    let auth_router = Router::new()
        .route("/validate", post(auth::validate))
        .route("/roles", get(auth::roles).route_layer(member.clone()));

    // /users/...
    let user_router = Router::new()
        .route(
            "/",
            post(user::register).merge(get(user::list).route_layer(admin.clone())),
        )
        .route("/login", post(user::login))
        .route(
            "/{id}",
            get(user::get).put(user::update).route_layer(member),
        );

    // /destinations/...
    let destination_router = Router::new()
        .route(
            "/",
            get(destination::list).merge(post(destination::post).route_layer(admin.clone())),
        )
        .route(
            "/{id}",
            get(destination::get).merge(
                axum::routing::put(destination::put)
                    .delete(destination::delete)
                    .route_layer(admin),
            ),
        );

    Router::new()
        .route("/", get(|| async { "Hello, World!" }))
        .nest("/auth", auth_router)
        .nest("/users", user_router)
        .nest("/destinations", destination_router)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                        let matched_path = request
                            .extensions()
                            .get::<MatchedPath>()
                            .map(MatchedPath::as_str);

                        info_span!(
                            "request",
                            method = ?request.method(),
                            matched_path,
                        )
                    }),
                )
                .layer(HandleErrorLayer::new(error::handle_middleware_errors))
                .buffer(128)
                .rate_limit(rate_limit.max(1), Duration::from_secs(1))
                .layer(
                    CorsLayer::new()
                        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                        .allow_origin(cors::Any),
                ),
        )
}

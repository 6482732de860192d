//! Endpoint glue for the access-control API.
//!
//! The route table is built once at startup and never mutated. Every
//! handler is the same fixed composition: decode the request (body or
//! query, plus context), invoke exactly one access control operation,
//! encode whatever it returns. No handler branches on payload content.

pub mod groups;
pub mod strategies;
pub mod users;

use axum::routing::{get, post, put};
use axum::Router;

use crate::http::server::AppState;

/// Build the static route table for the auth API.
pub fn auth_router(state: AppState) -> Router {
    Router::new()
        .route("/auth/status", get(users::auth_status))
        //
        .route("/user/login", post(users::login))
        .route("/users", get(users::get_users).post(users::create_users))
        .route("/users/delete", post(users::delete_users))
        .route("/user", put(users::update_user))
        .route("/user/password", put(users::update_user_password))
        .route("/user/token", get(users::get_user_token))
        .route("/user/token/status", put(users::update_user_token))
        .route("/user/token/refresh", put(users::reset_user_token))
        //
        .route("/usergroup", post(groups::create_group))
        .route(
            "/usergroups",
            put(groups::update_groups).get(groups::get_groups),
        )
        .route("/usergroups/delete", post(groups::delete_groups))
        .route("/usergroup/detail", get(groups::get_group))
        .route("/usergroup/token", get(groups::get_group_token))
        .route("/usergroup/token/status", put(groups::update_group_token))
        .route("/usergroup/token/refresh", put(groups::reset_group_token))
        //
        .route("/auth/strategy", post(strategies::create_strategy))
        .route("/auth/strategy/detail", get(strategies::get_strategy))
        .route(
            "/auth/strategies",
            put(strategies::update_strategies).get(strategies::get_strategies),
        )
        .route(
            "/auth/strategies/delete",
            post(strategies::delete_strategies),
        )
        .route(
            "/auth/principal/resources",
            get(strategies::get_principal_resources),
        )
        .with_state(state)
}

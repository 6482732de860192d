//! User endpoints.

use axum::extract::State;

use crate::http::request::{Batch, Params, Single};
use crate::http::server::AppState;
use crate::model::{ApiResponse, LoginRequest, ModifyUserPassword, User};

/// `GET /auth/status`: report whether authentication is enforced.
pub async fn auth_status(State(state): State<AppState>) -> ApiResponse {
    let flags = state.access.auth_flags();
    let open = flags.console_open || flags.client_open;
    ApiResponse::ok()
        .option("auth", open.to_string())
        .option("console_open", flags.console_open.to_string())
        .option("client_open", flags.client_open.to_string())
}

/// `POST /user/login`: authenticate with name and password.
pub async fn login(
    State(state): State<AppState>,
    Single(_ctx, req): Single<LoginRequest>,
) -> ApiResponse {
    state.access.login(req)
}

/// `GET /users`: list users by filter and pagination parameters.
pub async fn get_users(State(state): State<AppState>, Params(ctx, params): Params) -> ApiResponse {
    state.access.get_users(&ctx, params)
}

/// `POST /users`: create a batch of users.
pub async fn create_users(
    State(state): State<AppState>,
    Batch(ctx, users): Batch<User>,
) -> ApiResponse {
    state.access.create_users(&ctx, users)
}

/// `POST /users/delete`: delete a batch of users.
pub async fn delete_users(
    State(state): State<AppState>,
    Batch(ctx, users): Batch<User>,
) -> ApiResponse {
    state.access.delete_users(&ctx, users)
}

/// `PUT /user`: update one user.
pub async fn update_user(
    State(state): State<AppState>,
    Single(ctx, user): Single<User>,
) -> ApiResponse {
    state.access.update_user(&ctx, user)
}

/// `PUT /user/password`: rotate one user's password.
pub async fn update_user_password(
    State(state): State<AppState>,
    Single(ctx, req): Single<ModifyUserPassword>,
) -> ApiResponse {
    state.access.update_user_password(&ctx, req)
}

/// `GET /user/token`: fetch the token of the user named by `?id=`.
pub async fn get_user_token(
    State(state): State<AppState>,
    Params(ctx, params): Params,
) -> ApiResponse {
    let user = User {
        id: params.get("id").cloned(),
        ..User::default()
    };
    state.access.get_user_token(&ctx, user)
}

/// `PUT /user/token/status`: enable or disable one user's token.
pub async fn update_user_token(
    State(state): State<AppState>,
    Single(ctx, user): Single<User>,
) -> ApiResponse {
    state.access.update_user_token(&ctx, user)
}

/// `PUT /user/token/refresh`: replace one user's token.
pub async fn reset_user_token(
    State(state): State<AppState>,
    Single(ctx, user): Single<User>,
) -> ApiResponse {
    state.access.reset_user_token(&ctx, user)
}

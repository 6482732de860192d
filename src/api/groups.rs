//! User-group endpoints.

use axum::extract::State;

use crate::http::request::{Batch, Params, Single};
use crate::http::server::AppState;
use crate::model::{ApiResponse, ModifyUserGroup, UserGroup};

/// `POST /usergroup`: create one group.
pub async fn create_group(
    State(state): State<AppState>,
    Single(ctx, group): Single<UserGroup>,
) -> ApiResponse {
    state.access.create_group(&ctx, group)
}

/// `PUT /usergroups`: apply a batch of group updates.
pub async fn update_groups(
    State(state): State<AppState>,
    Batch(ctx, groups): Batch<ModifyUserGroup>,
) -> ApiResponse {
    state.access.update_groups(&ctx, groups)
}

/// `GET /usergroups`: list groups by filter and pagination parameters.
pub async fn get_groups(State(state): State<AppState>, Params(ctx, params): Params) -> ApiResponse {
    state.access.get_groups(&ctx, params)
}

/// `POST /usergroups/delete`: delete a batch of groups.
pub async fn delete_groups(
    State(state): State<AppState>,
    Batch(ctx, groups): Batch<UserGroup>,
) -> ApiResponse {
    state.access.delete_groups(&ctx, groups)
}

/// `GET /usergroup/detail`: fetch the group named by `?id=`.
pub async fn get_group(State(state): State<AppState>, Params(ctx, params): Params) -> ApiResponse {
    let group = UserGroup {
        id: params.get("id").cloned(),
        ..UserGroup::default()
    };
    state.access.get_group(&ctx, group)
}

/// `GET /usergroup/token`: fetch the token of the group named by `?id=`.
pub async fn get_group_token(
    State(state): State<AppState>,
    Params(ctx, params): Params,
) -> ApiResponse {
    let group = UserGroup {
        id: params.get("id").cloned(),
        ..UserGroup::default()
    };
    state.access.get_group_token(&ctx, group)
}

/// `PUT /usergroup/token/status`: enable or disable one group's token.
pub async fn update_group_token(
    State(state): State<AppState>,
    Single(ctx, group): Single<UserGroup>,
) -> ApiResponse {
    state.access.update_group_token(&ctx, group)
}

/// `PUT /usergroup/token/refresh`: replace one group's token.
pub async fn reset_group_token(
    State(state): State<AppState>,
    Single(ctx, group): Single<UserGroup>,
) -> ApiResponse {
    state.access.reset_group_token(&ctx, group)
}

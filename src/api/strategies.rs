//! Authorization-strategy endpoints.

use axum::extract::State;

use crate::http::request::{Batch, Params, Single};
use crate::http::server::AppState;
use crate::model::{ApiResponse, AuthStrategy, ModifyAuthStrategy};

/// `POST /auth/strategy`: create one strategy.
pub async fn create_strategy(
    State(state): State<AppState>,
    Single(ctx, strategy): Single<AuthStrategy>,
) -> ApiResponse {
    state.access.create_strategy(&ctx, strategy)
}

/// `GET /auth/strategy/detail`: fetch the strategy named by `?id=`.
pub async fn get_strategy(
    State(state): State<AppState>,
    Params(ctx, params): Params,
) -> ApiResponse {
    let strategy = AuthStrategy {
        id: params.get("id").cloned(),
        ..AuthStrategy::default()
    };
    state.access.get_strategy(&ctx, strategy)
}

/// `PUT /auth/strategies`: apply a batch of strategy updates.
pub async fn update_strategies(
    State(state): State<AppState>,
    Batch(ctx, strategies): Batch<ModifyAuthStrategy>,
) -> ApiResponse {
    state.access.update_strategies(&ctx, strategies)
}

/// `POST /auth/strategies/delete`: delete a batch of strategies.
pub async fn delete_strategies(
    State(state): State<AppState>,
    Batch(ctx, strategies): Batch<AuthStrategy>,
) -> ApiResponse {
    state.access.delete_strategies(&ctx, strategies)
}

/// `GET /auth/strategies`: list strategies by filter and pagination parameters.
pub async fn get_strategies(
    State(state): State<AppState>,
    Params(ctx, params): Params,
) -> ApiResponse {
    state.access.get_strategies(&ctx, params)
}

/// `GET /auth/principal/resources`: list resources governed for a principal.
pub async fn get_principal_resources(
    State(state): State<AppState>,
    Params(ctx, params): Params,
) -> ApiResponse {
    state.access.get_principal_resources(&ctx, params)
}

//! Boundary to the access control service.
//!
//! The service owns authentication, authorization policy, token
//! cryptography, and persistence. This crate only marshals requests to it
//! and encodes whatever it returns; the trait below is the entire
//! contract between the two.

pub mod memory;

use crate::http::context::RequestContext;
use crate::http::request::QueryParams;
use crate::model::{
    ApiResponse, AuthStrategy, LoginRequest, ModifyAuthStrategy, ModifyUserGroup,
    ModifyUserPassword, User, UserGroup,
};

/// Whether authentication is enforced for each calling surface.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthFlags {
    pub console_open: bool,
    pub client_open: bool,
}

/// Operation set of the access control service.
///
/// Calls are synchronous from the adapter's perspective; every method
/// returns a complete response envelope, including per-item outcomes for
/// batch writes (positional, matching the input order).
pub trait AccessControlService: Send + Sync {
    fn auth_flags(&self) -> AuthFlags;

    fn login(&self, req: LoginRequest) -> ApiResponse;

    // Users
    fn get_users(&self, ctx: &RequestContext, params: QueryParams) -> ApiResponse;
    fn create_users(&self, ctx: &RequestContext, users: Vec<User>) -> ApiResponse;
    fn delete_users(&self, ctx: &RequestContext, users: Vec<User>) -> ApiResponse;
    fn update_user(&self, ctx: &RequestContext, user: User) -> ApiResponse;
    fn update_user_password(&self, ctx: &RequestContext, req: ModifyUserPassword) -> ApiResponse;
    fn get_user_token(&self, ctx: &RequestContext, user: User) -> ApiResponse;
    fn update_user_token(&self, ctx: &RequestContext, user: User) -> ApiResponse;
    fn reset_user_token(&self, ctx: &RequestContext, user: User) -> ApiResponse;

    // Groups
    fn create_group(&self, ctx: &RequestContext, group: UserGroup) -> ApiResponse;
    fn update_groups(&self, ctx: &RequestContext, groups: Vec<ModifyUserGroup>) -> ApiResponse;
    fn get_groups(&self, ctx: &RequestContext, params: QueryParams) -> ApiResponse;
    fn delete_groups(&self, ctx: &RequestContext, groups: Vec<UserGroup>) -> ApiResponse;
    fn get_group(&self, ctx: &RequestContext, group: UserGroup) -> ApiResponse;
    fn get_group_token(&self, ctx: &RequestContext, group: UserGroup) -> ApiResponse;
    fn update_group_token(&self, ctx: &RequestContext, group: UserGroup) -> ApiResponse;
    fn reset_group_token(&self, ctx: &RequestContext, group: UserGroup) -> ApiResponse;

    // Strategies
    fn create_strategy(&self, ctx: &RequestContext, strategy: AuthStrategy) -> ApiResponse;
    fn get_strategy(&self, ctx: &RequestContext, strategy: AuthStrategy) -> ApiResponse;
    fn update_strategies(
        &self,
        ctx: &RequestContext,
        strategies: Vec<ModifyAuthStrategy>,
    ) -> ApiResponse;
    fn delete_strategies(&self, ctx: &RequestContext, strategies: Vec<AuthStrategy>)
        -> ApiResponse;
    fn get_strategies(&self, ctx: &RequestContext, params: QueryParams) -> ApiResponse;
    fn get_principal_resources(&self, ctx: &RequestContext, params: QueryParams) -> ApiResponse;
}

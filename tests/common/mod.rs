//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use serde_json::Value;
use tokio::net::TcpListener;

use auth_api::access::{AccessControlService, AuthFlags};
use auth_api::config::ServerConfig;
use auth_api::http::context::RequestContext;
use auth_api::http::request::QueryParams;
use auth_api::http::HttpServer;
use auth_api::lifecycle::Shutdown;
use auth_api::model::{
    ApiResponse, AuthStrategy, LoginRequest, ModifyAuthStrategy, ModifyUserGroup,
    ModifyUserPassword, User, UserGroup,
};

/// One recorded facade invocation.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct RecordedCall {
    /// Operation name, e.g. "create_users".
    pub op: &'static str,
    /// Token presented by the caller, if any.
    pub token: Option<String>,
    /// The decoded request payload, serialized for assertions.
    pub payload: Value,
}

/// Spy implementation of the access control service.
///
/// Records every invocation in order and answers each with a canned
/// envelope, so tests can assert exactly what crossed the boundary.
#[allow(dead_code)]
pub struct SpyAccessControl {
    pub flags: AuthFlags,
    pub calls: Mutex<Vec<RecordedCall>>,
    reply: Mutex<ApiResponse>,
}

#[allow(dead_code)]
impl SpyAccessControl {
    pub fn new() -> Self {
        Self {
            flags: AuthFlags::default(),
            calls: Mutex::new(Vec::new()),
            reply: Mutex::new(ApiResponse::ok()),
        }
    }

    pub fn with_flags(flags: AuthFlags) -> Self {
        Self {
            flags,
            ..Self::new()
        }
    }

    /// Make every subsequent call answer with `reply`.
    pub fn set_reply(&self, reply: ApiResponse) {
        *self.reply.lock().unwrap() = reply;
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn push<P: serde::Serialize>(
        &self,
        op: &'static str,
        token: Option<String>,
        payload: &P,
    ) -> ApiResponse {
        self.calls.lock().unwrap().push(RecordedCall {
            op,
            token,
            payload: serde_json::to_value(payload).unwrap(),
        });
        self.reply.lock().unwrap().clone()
    }

    fn record<P: serde::Serialize>(
        &self,
        op: &'static str,
        ctx: &RequestContext,
        payload: &P,
    ) -> ApiResponse {
        self.push(op, ctx.caller.token().map(str::to_owned), payload)
    }
}

impl AccessControlService for SpyAccessControl {
    fn auth_flags(&self) -> AuthFlags {
        self.flags
    }

    fn login(&self, req: LoginRequest) -> ApiResponse {
        self.push("login", None, &req)
    }

    fn get_users(&self, ctx: &RequestContext, params: QueryParams) -> ApiResponse {
        self.record("get_users", ctx, &params)
    }

    fn create_users(&self, ctx: &RequestContext, users: Vec<User>) -> ApiResponse {
        self.record("create_users", ctx, &users)
    }

    fn delete_users(&self, ctx: &RequestContext, users: Vec<User>) -> ApiResponse {
        self.record("delete_users", ctx, &users)
    }

    fn update_user(&self, ctx: &RequestContext, user: User) -> ApiResponse {
        self.record("update_user", ctx, &user)
    }

    fn update_user_password(&self, ctx: &RequestContext, req: ModifyUserPassword) -> ApiResponse {
        self.record("update_user_password", ctx, &req)
    }

    fn get_user_token(&self, ctx: &RequestContext, user: User) -> ApiResponse {
        self.record("get_user_token", ctx, &user)
    }

    fn update_user_token(&self, ctx: &RequestContext, user: User) -> ApiResponse {
        self.record("update_user_token", ctx, &user)
    }

    fn reset_user_token(&self, ctx: &RequestContext, user: User) -> ApiResponse {
        self.record("reset_user_token", ctx, &user)
    }

    fn create_group(&self, ctx: &RequestContext, group: UserGroup) -> ApiResponse {
        self.record("create_group", ctx, &group)
    }

    fn update_groups(&self, ctx: &RequestContext, groups: Vec<ModifyUserGroup>) -> ApiResponse {
        self.record("update_groups", ctx, &groups)
    }

    fn get_groups(&self, ctx: &RequestContext, params: QueryParams) -> ApiResponse {
        self.record("get_groups", ctx, &params)
    }

    fn delete_groups(&self, ctx: &RequestContext, groups: Vec<UserGroup>) -> ApiResponse {
        self.record("delete_groups", ctx, &groups)
    }

    fn get_group(&self, ctx: &RequestContext, group: UserGroup) -> ApiResponse {
        self.record("get_group", ctx, &group)
    }

    fn get_group_token(&self, ctx: &RequestContext, group: UserGroup) -> ApiResponse {
        self.record("get_group_token", ctx, &group)
    }

    fn update_group_token(&self, ctx: &RequestContext, group: UserGroup) -> ApiResponse {
        self.record("update_group_token", ctx, &group)
    }

    fn reset_group_token(&self, ctx: &RequestContext, group: UserGroup) -> ApiResponse {
        self.record("reset_group_token", ctx, &group)
    }

    fn create_strategy(&self, ctx: &RequestContext, strategy: AuthStrategy) -> ApiResponse {
        self.record("create_strategy", ctx, &strategy)
    }

    fn get_strategy(&self, ctx: &RequestContext, strategy: AuthStrategy) -> ApiResponse {
        self.record("get_strategy", ctx, &strategy)
    }

    fn update_strategies(
        &self,
        ctx: &RequestContext,
        strategies: Vec<ModifyAuthStrategy>,
    ) -> ApiResponse {
        self.record("update_strategies", ctx, &strategies)
    }

    fn delete_strategies(
        &self,
        ctx: &RequestContext,
        strategies: Vec<AuthStrategy>,
    ) -> ApiResponse {
        self.record("delete_strategies", ctx, &strategies)
    }

    fn get_strategies(&self, ctx: &RequestContext, params: QueryParams) -> ApiResponse {
        self.record("get_strategies", ctx, &params)
    }

    fn get_principal_resources(&self, ctx: &RequestContext, params: QueryParams) -> ApiResponse {
        self.record("get_principal_resources", ctx, &params)
    }
}

/// Spawn the server over `access` on an ephemeral loopback port.
pub async fn spawn_server(access: Arc<dyn AccessControlService>) -> (SocketAddr, Shutdown) {
    let config = ServerConfig::default();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    let server = HttpServer::new(&config, access);

    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    (addr, shutdown)
}

//! In-memory access control backend.
//!
//! Development and test double for the real access control service:
//! plain `RwLock` maps, UUID tokens, and plain-text password comparison.
//! Password hashing and durable storage belong to the production engine.

use std::collections::HashMap;
use std::sync::RwLock;

use serde_json::json;
use uuid::Uuid;

use crate::access::{AccessControlService, AuthFlags};
use crate::http::context::{Caller, RequestContext};
use crate::http::request::QueryParams;
use crate::model::{
    ApiResponse, AuthStrategy, GroupRelation, LoginRequest, LoginResponse, ModifyAuthStrategy,
    ModifyUserGroup, ModifyUserPassword, ResultCode, User, UserGroup,
};

const DEFAULT_PAGE_LIMIT: usize = 100;

fn page_bounds(params: &QueryParams) -> (usize, usize) {
    let offset = params
        .get("offset")
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);
    let limit = params
        .get("limit")
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_PAGE_LIMIT);
    (offset, limit)
}

/// In-memory implementation of [`AccessControlService`].
pub struct InMemoryAccessControl {
    flags: AuthFlags,
    users: RwLock<HashMap<String, User>>,
    groups: RwLock<HashMap<String, UserGroup>>,
    strategies: RwLock<HashMap<String, AuthStrategy>>,
}

impl InMemoryAccessControl {
    pub fn new(flags: AuthFlags) -> Self {
        InMemoryAccessControl {
            flags,
            users: RwLock::new(HashMap::new()),
            groups: RwLock::new(HashMap::new()),
            strategies: RwLock::new(HashMap::new()),
        }
    }

    /// Reject anonymous callers when console auth is enforced.
    fn authorize(&self, ctx: &RequestContext) -> Result<(), ApiResponse> {
        if self.flags.console_open && matches!(ctx.caller, Caller::Anonymous) {
            return Err(ApiResponse::new(ResultCode::UNAUTHORIZED));
        }
        Ok(())
    }

    fn sanitized_user(user: &User) -> User {
        User {
            password: None,
            auth_token: None,
            ..user.clone()
        }
    }

    fn sanitized_group(group: &UserGroup) -> UserGroup {
        let user_count = group
            .relation
            .as_ref()
            .map(|r| r.users.len() as u64)
            .or(Some(0));
        UserGroup {
            auth_token: None,
            user_count,
            ..group.clone()
        }
    }
}

impl AccessControlService for InMemoryAccessControl {
    fn auth_flags(&self) -> AuthFlags {
        self.flags
    }

    fn login(&self, req: LoginRequest) -> ApiResponse {
        let users = self.users.read().unwrap();
        let found = users
            .values()
            .find(|u| u.name.as_deref() == req.name.as_deref() && req.name.is_some());
        match found {
            Some(user) if user.password == req.password => {
                let payload = LoginResponse {
                    user_id: user.id.clone().unwrap_or_default(),
                    name: user.name.clone().unwrap_or_default(),
                    token: user.auth_token.clone().unwrap_or_default(),
                };
                ApiResponse::ok().data(json!({ "login_response": payload }))
            }
            _ => ApiResponse::with_info(ResultCode::UNAUTHORIZED, "invalid name or password"),
        }
    }

    fn get_users(&self, ctx: &RequestContext, params: QueryParams) -> ApiResponse {
        if let Err(denied) = self.authorize(ctx) {
            return denied;
        }
        let users = self.users.read().unwrap();
        let mut matched: Vec<&User> = users
            .values()
            .filter(|u| match params.get("id") {
                Some(id) => u.id.as_deref() == Some(id.as_str()),
                None => true,
            })
            .filter(|u| match params.get("name") {
                Some(name) => u.name.as_deref() == Some(name.as_str()),
                None => true,
            })
            .collect();
        matched.sort_by(|a, b| a.id.cmp(&b.id));

        let amount = matched.len() as u64;
        let (offset, limit) = page_bounds(&params);
        let page: Vec<User> = matched
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(Self::sanitized_user)
            .collect();
        let size = page.len() as u64;
        ApiResponse::batch_query(amount, json!({ "users": page }), size)
    }

    fn create_users(&self, ctx: &RequestContext, users: Vec<User>) -> ApiResponse {
        if let Err(denied) = self.authorize(ctx) {
            return denied;
        }
        let mut store = self.users.write().unwrap();
        let outcomes = users
            .into_iter()
            .map(|mut user| {
                let Some(name) = user.name.clone() else {
                    return ApiResponse::with_info(
                        ResultCode::INVALID_PARAMETER,
                        "user name is required",
                    );
                };
                if store.values().any(|u| u.name.as_deref() == Some(name.as_str())) {
                    return ApiResponse::with_info(
                        ResultCode::ALREADY_EXISTS,
                        format!("user {name} already exists"),
                    );
                }
                let id = Uuid::new_v4().to_string();
                user.id = Some(id.clone());
                user.auth_token = Some(Uuid::new_v4().to_string());
                user.token_enable = Some(true);
                tracing::debug!(request_id = %ctx.request_id, user = %name, "user created");
                store.insert(id, user);
                ApiResponse::ok()
            })
            .collect();
        ApiResponse::batch_write(outcomes)
    }

    fn delete_users(&self, ctx: &RequestContext, users: Vec<User>) -> ApiResponse {
        if let Err(denied) = self.authorize(ctx) {
            return denied;
        }
        let mut store = self.users.write().unwrap();
        let outcomes = users
            .into_iter()
            .map(|user| match user.id {
                Some(id) => {
                    store.remove(&id);
                    ApiResponse::ok()
                }
                None => ApiResponse::with_info(ResultCode::INVALID_PARAMETER, "user id is required"),
            })
            .collect();
        ApiResponse::batch_write(outcomes)
    }

    fn update_user(&self, ctx: &RequestContext, user: User) -> ApiResponse {
        if let Err(denied) = self.authorize(ctx) {
            return denied;
        }
        let mut store = self.users.write().unwrap();
        let Some(id) = user.id.as_deref() else {
            return ApiResponse::with_info(ResultCode::INVALID_PARAMETER, "user id is required");
        };
        match store.get_mut(id) {
            Some(existing) => {
                if user.comment.is_some() {
                    existing.comment = user.comment;
                }
                if user.source.is_some() {
                    existing.source = user.source;
                }
                ApiResponse::ok()
            }
            None => ApiResponse::with_info(ResultCode::NOT_FOUND, format!("user {id} not found")),
        }
    }

    fn update_user_password(&self, ctx: &RequestContext, req: ModifyUserPassword) -> ApiResponse {
        if let Err(denied) = self.authorize(ctx) {
            return denied;
        }
        let mut store = self.users.write().unwrap();
        let Some(id) = req.id.as_deref() else {
            return ApiResponse::with_info(ResultCode::INVALID_PARAMETER, "user id is required");
        };
        match store.get_mut(id) {
            Some(existing) => {
                if existing.password != req.old_password {
                    return ApiResponse::with_info(
                        ResultCode::UNAUTHORIZED,
                        "old password does not match",
                    );
                }
                existing.password = req.new_password;
                ApiResponse::ok()
            }
            None => ApiResponse::with_info(ResultCode::NOT_FOUND, format!("user {id} not found")),
        }
    }

    fn get_user_token(&self, ctx: &RequestContext, user: User) -> ApiResponse {
        if let Err(denied) = self.authorize(ctx) {
            return denied;
        }
        let store = self.users.read().unwrap();
        let found = user.id.as_deref().and_then(|id| store.get(id));
        match found {
            Some(u) => ApiResponse::ok().data(json!({
                "user": {
                    "id": u.id,
                    "auth_token": u.auth_token,
                    "token_enable": u.token_enable,
                }
            })),
            None => ApiResponse::new(ResultCode::NOT_FOUND),
        }
    }

    fn update_user_token(&self, ctx: &RequestContext, user: User) -> ApiResponse {
        if let Err(denied) = self.authorize(ctx) {
            return denied;
        }
        let mut store = self.users.write().unwrap();
        let found = user.id.as_deref().and_then(|id| store.get_mut(id));
        match found {
            Some(u) => {
                u.token_enable = user.token_enable.or(u.token_enable);
                ApiResponse::ok()
            }
            None => ApiResponse::new(ResultCode::NOT_FOUND),
        }
    }

    fn reset_user_token(&self, ctx: &RequestContext, user: User) -> ApiResponse {
        if let Err(denied) = self.authorize(ctx) {
            return denied;
        }
        let mut store = self.users.write().unwrap();
        let found = user.id.as_deref().and_then(|id| store.get_mut(id));
        match found {
            Some(u) => {
                u.auth_token = Some(Uuid::new_v4().to_string());
                ApiResponse::ok()
            }
            None => ApiResponse::new(ResultCode::NOT_FOUND),
        }
    }

    fn create_group(&self, ctx: &RequestContext, mut group: UserGroup) -> ApiResponse {
        if let Err(denied) = self.authorize(ctx) {
            return denied;
        }
        let mut store = self.groups.write().unwrap();
        let Some(name) = group.name.clone() else {
            return ApiResponse::with_info(ResultCode::INVALID_PARAMETER, "group name is required");
        };
        if store.values().any(|g| g.name.as_deref() == Some(name.as_str())) {
            return ApiResponse::with_info(
                ResultCode::ALREADY_EXISTS,
                format!("group {name} already exists"),
            );
        }
        let id = Uuid::new_v4().to_string();
        group.id = Some(id.clone());
        group.auth_token = Some(Uuid::new_v4().to_string());
        group.token_enable = Some(true);
        let sanitized = Self::sanitized_group(&group);
        tracing::debug!(request_id = %ctx.request_id, group = %name, "group created");
        store.insert(id, group);
        ApiResponse::ok().data(json!({ "user_group": sanitized }))
    }

    fn update_groups(&self, ctx: &RequestContext, groups: Vec<ModifyUserGroup>) -> ApiResponse {
        if let Err(denied) = self.authorize(ctx) {
            return denied;
        }
        let mut store = self.groups.write().unwrap();
        let outcomes = groups
            .into_iter()
            .map(|change| {
                let Some(id) = change.id.as_deref() else {
                    return ApiResponse::with_info(
                        ResultCode::INVALID_PARAMETER,
                        "group id is required",
                    );
                };
                let Some(group) = store.get_mut(id) else {
                    return ApiResponse::with_info(
                        ResultCode::NOT_FOUND,
                        format!("group {id} not found"),
                    );
                };
                if change.comment.is_some() {
                    group.comment = change.comment;
                }
                if change.token_enable.is_some() {
                    group.token_enable = change.token_enable;
                }
                let relation = group.relation.get_or_insert_with(GroupRelation::default);
                if let Some(add) = change.add_relation {
                    for user in add.users {
                        if !relation.users.iter().any(|u| u.id == user.id) {
                            relation.users.push(user);
                        }
                    }
                }
                if let Some(remove) = change.remove_relation {
                    relation.users.retain(|u| {
                        !remove.users.iter().any(|r| r.id == u.id && u.id.is_some())
                    });
                }
                ApiResponse::ok()
            })
            .collect();
        ApiResponse::batch_write(outcomes)
    }

    fn get_groups(&self, ctx: &RequestContext, params: QueryParams) -> ApiResponse {
        if let Err(denied) = self.authorize(ctx) {
            return denied;
        }
        let store = self.groups.read().unwrap();
        let mut matched: Vec<&UserGroup> = store
            .values()
            .filter(|g| match params.get("id") {
                Some(id) => g.id.as_deref() == Some(id.as_str()),
                None => true,
            })
            .filter(|g| match params.get("name") {
                Some(name) => g.name.as_deref() == Some(name.as_str()),
                None => true,
            })
            .collect();
        matched.sort_by(|a, b| a.id.cmp(&b.id));

        let amount = matched.len() as u64;
        let (offset, limit) = page_bounds(&params);
        let page: Vec<UserGroup> = matched
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|g| UserGroup {
                // listing omits membership detail
                relation: None,
                ..Self::sanitized_group(g)
            })
            .collect();
        let size = page.len() as u64;
        ApiResponse::batch_query(amount, json!({ "user_groups": page }), size)
    }

    fn delete_groups(&self, ctx: &RequestContext, groups: Vec<UserGroup>) -> ApiResponse {
        if let Err(denied) = self.authorize(ctx) {
            return denied;
        }
        let mut store = self.groups.write().unwrap();
        let outcomes = groups
            .into_iter()
            .map(|group| match group.id {
                Some(id) => {
                    store.remove(&id);
                    ApiResponse::ok()
                }
                None => {
                    ApiResponse::with_info(ResultCode::INVALID_PARAMETER, "group id is required")
                }
            })
            .collect();
        ApiResponse::batch_write(outcomes)
    }

    fn get_group(&self, ctx: &RequestContext, group: UserGroup) -> ApiResponse {
        if let Err(denied) = self.authorize(ctx) {
            return denied;
        }
        let store = self.groups.read().unwrap();
        let found = group.id.as_deref().and_then(|id| store.get(id));
        match found {
            Some(g) => ApiResponse::ok().data(json!({ "user_group": Self::sanitized_group(g) })),
            None => ApiResponse::new(ResultCode::NOT_FOUND),
        }
    }

    fn get_group_token(&self, ctx: &RequestContext, group: UserGroup) -> ApiResponse {
        if let Err(denied) = self.authorize(ctx) {
            return denied;
        }
        let store = self.groups.read().unwrap();
        let found = group.id.as_deref().and_then(|id| store.get(id));
        match found {
            Some(g) => ApiResponse::ok().data(json!({
                "user_group": {
                    "id": g.id,
                    "auth_token": g.auth_token,
                    "token_enable": g.token_enable,
                }
            })),
            None => ApiResponse::new(ResultCode::NOT_FOUND),
        }
    }

    fn update_group_token(&self, ctx: &RequestContext, group: UserGroup) -> ApiResponse {
        if let Err(denied) = self.authorize(ctx) {
            return denied;
        }
        let mut store = self.groups.write().unwrap();
        let found = group.id.as_deref().and_then(|id| store.get_mut(id));
        match found {
            Some(g) => {
                g.token_enable = group.token_enable.or(g.token_enable);
                ApiResponse::ok()
            }
            None => ApiResponse::new(ResultCode::NOT_FOUND),
        }
    }

    fn reset_group_token(&self, ctx: &RequestContext, group: UserGroup) -> ApiResponse {
        if let Err(denied) = self.authorize(ctx) {
            return denied;
        }
        let mut store = self.groups.write().unwrap();
        let found = group.id.as_deref().and_then(|id| store.get_mut(id));
        match found {
            Some(g) => {
                g.auth_token = Some(Uuid::new_v4().to_string());
                ApiResponse::ok()
            }
            None => ApiResponse::new(ResultCode::NOT_FOUND),
        }
    }

    fn create_strategy(&self, ctx: &RequestContext, mut strategy: AuthStrategy) -> ApiResponse {
        if let Err(denied) = self.authorize(ctx) {
            return denied;
        }
        let principal_count = strategy
            .principals
            .as_ref()
            .map(|p| p.users.len() + p.groups.len())
            .unwrap_or(0);
        if principal_count == 0 {
            return ApiResponse::with_info(
                ResultCode::INVALID_PARAMETER,
                "strategy requires at least one principal",
            );
        }
        let resource_count = strategy
            .resources
            .as_ref()
            .map(|r| r.namespaces.len() + r.services.len() + r.config_groups.len())
            .unwrap_or(0);
        if resource_count == 0 && strategy.default_strategy != Some(true) {
            return ApiResponse::with_info(
                ResultCode::INVALID_PARAMETER,
                "non-default strategy requires at least one resource",
            );
        }
        let mut store = self.strategies.write().unwrap();
        let id = Uuid::new_v4().to_string();
        strategy.id = Some(id.clone());
        store.insert(id, strategy.clone());
        ApiResponse::ok().data(json!({ "auth_strategy": strategy }))
    }

    fn get_strategy(&self, ctx: &RequestContext, strategy: AuthStrategy) -> ApiResponse {
        if let Err(denied) = self.authorize(ctx) {
            return denied;
        }
        let store = self.strategies.read().unwrap();
        let found = strategy.id.as_deref().and_then(|id| store.get(id));
        match found {
            Some(s) => ApiResponse::ok().data(json!({ "auth_strategy": s })),
            None => ApiResponse::new(ResultCode::NOT_FOUND),
        }
    }

    fn update_strategies(
        &self,
        ctx: &RequestContext,
        strategies: Vec<ModifyAuthStrategy>,
    ) -> ApiResponse {
        if let Err(denied) = self.authorize(ctx) {
            return denied;
        }
        let mut store = self.strategies.write().unwrap();
        let outcomes = strategies
            .into_iter()
            .map(|change| {
                let Some(id) = change.id.as_deref() else {
                    return ApiResponse::with_info(
                        ResultCode::INVALID_PARAMETER,
                        "strategy id is required",
                    );
                };
                let Some(strategy) = store.get_mut(id) else {
                    return ApiResponse::with_info(
                        ResultCode::NOT_FOUND,
                        format!("strategy {id} not found"),
                    );
                };
                if change.comment.is_some() {
                    strategy.comment = change.comment;
                }
                if change.action.is_some() {
                    strategy.action = change.action;
                }
                if let Some(add) = change.add_principals {
                    let principals = strategy.principals.get_or_insert_with(Default::default);
                    principals.users.extend(add.users);
                    principals.groups.extend(add.groups);
                }
                if let Some(remove) = change.remove_principals {
                    if let Some(principals) = strategy.principals.as_mut() {
                        principals
                            .users
                            .retain(|p| !remove.users.iter().any(|r| r.id == p.id));
                        principals
                            .groups
                            .retain(|p| !remove.groups.iter().any(|r| r.id == p.id));
                    }
                }
                if let Some(add) = change.add_resources {
                    let resources = strategy.resources.get_or_insert_with(Default::default);
                    resources.namespaces.extend(add.namespaces);
                    resources.services.extend(add.services);
                    resources.config_groups.extend(add.config_groups);
                }
                if let Some(remove) = change.remove_resources {
                    if let Some(resources) = strategy.resources.as_mut() {
                        resources
                            .namespaces
                            .retain(|x| !remove.namespaces.iter().any(|r| r.id == x.id));
                        resources
                            .services
                            .retain(|x| !remove.services.iter().any(|r| r.id == x.id));
                        resources
                            .config_groups
                            .retain(|x| !remove.config_groups.iter().any(|r| r.id == x.id));
                    }
                }
                ApiResponse::ok()
            })
            .collect();
        ApiResponse::batch_write(outcomes)
    }

    fn delete_strategies(
        &self,
        ctx: &RequestContext,
        strategies: Vec<AuthStrategy>,
    ) -> ApiResponse {
        if let Err(denied) = self.authorize(ctx) {
            return denied;
        }
        let mut store = self.strategies.write().unwrap();
        let outcomes = strategies
            .into_iter()
            .map(|strategy| match strategy.id {
                Some(id) => {
                    store.remove(&id);
                    ApiResponse::ok()
                }
                None => {
                    ApiResponse::with_info(ResultCode::INVALID_PARAMETER, "strategy id is required")
                }
            })
            .collect();
        ApiResponse::batch_write(outcomes)
    }

    fn get_strategies(&self, ctx: &RequestContext, params: QueryParams) -> ApiResponse {
        if let Err(denied) = self.authorize(ctx) {
            return denied;
        }
        let store = self.strategies.read().unwrap();
        let mut matched: Vec<&AuthStrategy> = store
            .values()
            .filter(|s| match params.get("id") {
                Some(id) => s.id.as_deref() == Some(id.as_str()),
                None => true,
            })
            .filter(|s| match params.get("name") {
                Some(name) => s.name.as_deref() == Some(name.as_str()),
                None => true,
            })
            .collect();
        matched.sort_by(|a, b| a.id.cmp(&b.id));

        let amount = matched.len() as u64;
        let (offset, limit) = page_bounds(&params);
        let page: Vec<&AuthStrategy> = matched.into_iter().skip(offset).take(limit).collect();
        let size = page.len() as u64;
        ApiResponse::batch_query(amount, json!({ "auth_strategies": page }), size)
    }

    fn get_principal_resources(&self, ctx: &RequestContext, params: QueryParams) -> ApiResponse {
        if let Err(denied) = self.authorize(ctx) {
            return denied;
        }
        let Some(principal_id) = params.get("principal_id") else {
            return ApiResponse::with_info(ResultCode::INVALID_PARAMETER, "principal_id is required");
        };
        let principal_type = params.get("principal_type").map(String::as_str);

        let store = self.strategies.read().unwrap();
        let mut merged = crate::model::StrategyResources::default();
        for strategy in store.values() {
            let Some(principals) = strategy.principals.as_ref() else {
                continue;
            };
            let in_users = principal_type != Some("group")
                && principals
                    .users
                    .iter()
                    .any(|p| p.id.as_deref() == Some(principal_id.as_str()));
            let in_groups = principal_type != Some("user")
                && principals
                    .groups
                    .iter()
                    .any(|p| p.id.as_deref() == Some(principal_id.as_str()));
            if !(in_users || in_groups) {
                continue;
            }
            if let Some(resources) = strategy.resources.as_ref() {
                merged.namespaces.extend(resources.namespaces.clone());
                merged.services.extend(resources.services.clone());
                merged.config_groups.extend(resources.config_groups.clone());
            }
        }
        ApiResponse::ok().data(json!({ "resources": merged }))
    }
}

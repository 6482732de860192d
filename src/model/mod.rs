//! Wire-level data model: semantic codes, messages, and the response
//! envelope shared by every endpoint.

pub mod code;
pub mod envelope;
pub mod types;

pub use code::ResultCode;
pub use envelope::ApiResponse;
pub use types::{
    Action, AuthStrategy, GroupRelation, LoginRequest, LoginResponse, ModifyAuthStrategy,
    ModifyUserGroup, ModifyUserPassword, PrincipalRef, Principals, ResourceRef,
    StrategyResources, User, UserGroup,
};

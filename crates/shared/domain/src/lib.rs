//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies:
//! the role bit-mask codec, the status/action enumerations, the user entity
//! with its transfer shapes, and the field validation rules.

#[macro_use]
mod macros;

pub mod constants;
pub mod error;
pub mod role;
pub mod status;
pub mod user;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use role::{Role, RoleSet};
pub use status::{Action, Status};
pub use user::{
    normalize_email, NewUser, UpdateAction, UpdateRoles, UpdateStatus, User, UserId, UserInput,
    UserResponse, UserSummary,
};

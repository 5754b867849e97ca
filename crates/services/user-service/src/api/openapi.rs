//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::OpenApi;

use crate::api::handlers::{health_handler, user_handler};
use domain::{
    Action, Role, Status, UpdateAction, UpdateRoles, UpdateStatus, UserInput, UserResponse,
    UserSummary,
};

/// OpenAPI documentation for the user service
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User Service",
        version = "0.1.0",
        description = "User administration: accounts, role sets, lifecycle status and pending actions",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        health_handler::health_check,
        user_handler::list_users,
        user_handler::create_user,
        user_handler::get_summary,
        user_handler::get_user,
        user_handler::update_user,
        user_handler::delete_user,
        user_handler::update_roles,
        user_handler::update_status,
        user_handler::update_action,
    ),
    components(
        schemas(
            Role,
            Status,
            Action,
            UserInput,
            UserResponse,
            UserSummary,
            UpdateRoles,
            UpdateStatus,
            UpdateAction,
            health_handler::HealthResponse,
            health_handler::ServiceHealth,
        )
    ),
    tags(
        (name = "Health", description = "Service liveness"),
        (name = "Users", description = "User management operations")
    )
)]
pub struct ApiDoc;

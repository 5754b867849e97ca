//! User domain entity and related types.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidateEmail, ValidationError, ValidationErrors};

use crate::constants::{
    EMAIL_INVALID, EMAIL_REQUIRED, MAX_NAME_LENGTH, NAME_REQUIRED, NAME_TOO_LONG,
};
use crate::error::{DomainError, DomainResult};
use crate::role::{Role, RoleSet};
use crate::status::{Action, Status};

/// Store-assigned user identifier. Persisted users always have `id > 0`.
pub type UserId = i32;

/// User domain entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub roles: RoleSet,
    pub status: Status,
    pub action: Action,
    /// Set once on creation, never touched by updates
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Attach the id assigned by the store to a new record
    pub fn from_new(id: UserId, new: NewUser) -> Self {
        Self {
            id,
            name: new.name,
            email: new.email,
            roles: new.roles,
            status: new.status,
            action: new.action,
            created_at: new.created_at,
        }
    }

    /// Overwrite the editable profile fields from an update shape.
    ///
    /// Status, action and the creation timestamp are left alone.
    pub fn apply_input(&mut self, input: &UserInput) {
        self.name = input.normalized_name();
        self.email = input.normalized_email();
        self.roles = input.role_set();
    }
}

/// User record that has not been persisted yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub roles: RoleSet,
    pub status: Status,
    pub action: Action,
    pub created_at: DateTime<Utc>,
}

impl NewUser {
    /// Build a record from a creation shape, normalizing name and email.
    pub fn from_input(input: &UserInput, created_at: DateTime<Utc>) -> Self {
        Self {
            name: input.normalized_name(),
            email: input.normalized_email(),
            roles: input.role_set(),
            status: Status::default(),
            action: Action::default(),
            created_at,
        }
    }
}

/// Canonical stored form of an email address: trimmed and lower-cased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// User creation / update data transfer object
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(default)]
pub struct UserInput {
    /// Ignored on creation, identifies the user on update
    #[cfg_attr(feature = "openapi", schema(value_type = i32))]
    pub id: UserId,
    /// Display name (1-100 characters after trimming)
    #[validate(custom(function = "validate_name"))]
    pub name: String,
    /// Email address
    #[validate(custom(function = "validate_email_address"))]
    pub email: String,
    /// Individual roles to combine into the user's role set
    pub roles: Vec<Role>,
}

impl UserInput {
    pub fn new(name: impl Into<String>, email: impl Into<String>, roles: Vec<Role>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            email: email.into(),
            roles,
        }
    }

    pub fn with_id(mut self, id: UserId) -> Self {
        self.id = id;
        self
    }

    /// Check every field rule, reporting all violations at once.
    pub fn check(&self) -> DomainResult<()> {
        self.validate()
            .map_err(|errors| DomainError::validation(collect_messages(&errors)))
    }

    pub fn normalized_name(&self) -> String {
        self.name.trim().to_string()
    }

    pub fn normalized_email(&self) -> String {
        normalize_email(&self.email)
    }

    /// Roles folded into a single set
    pub fn role_set(&self) -> RoleSet {
        RoleSet::combine(self.roles.iter().copied())
    }
}

fn violation(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(violation(NAME_REQUIRED, "Name is required"));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(violation(
            NAME_TOO_LONG,
            format!("Name must not exceed {} characters", MAX_NAME_LENGTH),
        ));
    }
    Ok(())
}

fn validate_email_address(email: &str) -> Result<(), ValidationError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(violation(EMAIL_REQUIRED, "Email is required"));
    }
    if !email.validate_email() {
        return Err(violation(EMAIL_INVALID, "Email must be a valid email address"));
    }
    Ok(())
}

/// Flatten validation errors into one message per violation, ordered by field.
fn collect_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect()
}

/// Role replacement request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(default)]
pub struct UpdateRoles {
    #[cfg_attr(feature = "openapi", schema(value_type = i32))]
    pub id: UserId,
    /// Must not be empty
    pub roles: Vec<Role>,
}

/// Status change request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateStatus {
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(value_type = i32))]
    pub id: UserId,
    pub status: Status,
}

/// Pending action change request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateAction {
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(value_type = i32))]
    pub id: UserId,
    pub action: Action,
}

/// User response (safe to return to client)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserResponse {
    /// Unique user identifier
    #[cfg_attr(feature = "openapi", schema(value_type = i32))]
    pub id: UserId,
    /// Display name
    pub name: String,
    /// Normalized email address
    pub email: String,
    /// Held roles, in canonical order
    pub roles: Vec<Role>,
    /// Current lifecycle status
    pub status: Status,
    /// Pending administrative action
    pub action: Action,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            roles: user.roles.decompose(),
            name: user.name,
            email: user.email,
            status: user.status,
            action: user.action,
            created_at: user.created_at,
        }
    }
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            roles: user.roles.decompose(),
            status: user.status,
            action: user.action,
            created_at: user.created_at,
        }
    }
}

/// Aggregate counts over the user population
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserSummary {
    /// Users holding the clinician role
    pub clinician_count: u64,
    /// Users holding the staff role
    pub staff_count: u64,
    /// Clinicians whose status is deactivated
    pub deactivated_clinician_count: u64,
}

impl UserSummary {
    /// Count every bucket independently; one user may land in several.
    pub fn tally<'a, I>(users: I) -> Self
    where
        I: IntoIterator<Item = &'a User>,
    {
        users.into_iter().fold(Self::default(), |mut summary, user| {
            if user.roles.is_clinician() {
                summary.clinician_count += 1;
                if user.status.is_deactivated() {
                    summary.deactivated_clinician_count += 1;
                }
            }
            if user.roles.is_staff() {
                summary.staff_count += 1;
            }
            summary
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: UserId, roles: &[Role], status: Status) -> User {
        User {
            id,
            name: format!("User {}", id),
            email: format!("user{}@example.com", id),
            roles: RoleSet::combine(roles.iter().copied()),
            status,
            action: Action::None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_check_accepts_valid_input() {
        let input = UserInput::new("Alice", "alice@example.com", vec![Role::Clinician]);
        assert!(input.check().is_ok());
    }

    #[test]
    fn test_check_reports_every_violation() {
        let input = UserInput::new("", "not-an-email", vec![]);

        match input.check() {
            Err(DomainError::Validation(errors)) => {
                assert_eq!(errors.len(), 2);
                assert!(errors.contains(&"Name is required".to_string()));
                assert!(errors.contains(&"Email must be a valid email address".to_string()));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_check_rejects_whitespace_only_fields() {
        let input = UserInput::new("   ", "  ", vec![]);

        let Err(DomainError::Validation(errors)) = input.check() else {
            panic!("expected validation error");
        };
        assert_eq!(errors, vec!["Email is required", "Name is required"]);
    }

    #[test]
    fn test_name_length_counts_trimmed_characters() {
        let exactly = format!("  {}  ", "é".repeat(MAX_NAME_LENGTH));
        assert!(UserInput::new(exactly, "a@b.co", vec![]).check().is_ok());

        let too_long = "x".repeat(MAX_NAME_LENGTH + 1);
        let Err(DomainError::Validation(errors)) =
            UserInput::new(too_long, "a@b.co", vec![]).check()
        else {
            panic!("expected validation error");
        };
        assert_eq!(errors, vec!["Name must not exceed 100 characters"]);
    }

    #[test]
    fn test_new_user_is_normalized() {
        let input = UserInput::new(
            " Alice ",
            " A@Example.COM ",
            vec![Role::Staff, Role::Clinician],
        );
        let now = Utc::now();
        let new = NewUser::from_input(&input, now);

        assert_eq!(new.name, "Alice");
        assert_eq!(new.email, "a@example.com");
        assert_eq!(new.roles.decompose(), vec![Role::Clinician, Role::Staff]);
        assert_eq!(new.status, Status::None);
        assert_eq!(new.action, Action::None);
        assert_eq!(new.created_at, now);
    }

    #[test]
    fn test_apply_input_keeps_lifecycle_fields() {
        let mut existing = user(7, &[Role::Clinician], Status::Invited);
        existing.action = Action::ResendInvite;
        let created_at = existing.created_at;

        existing.apply_input(&UserInput::new("Bob", " BOB@Example.com", vec![Role::Patient]));

        assert_eq!(existing.name, "Bob");
        assert_eq!(existing.email, "bob@example.com");
        assert_eq!(existing.roles, RoleSet::from(Role::Patient));
        assert_eq!(existing.status, Status::Invited);
        assert_eq!(existing.action, Action::ResendInvite);
        assert_eq!(existing.created_at, created_at);
    }

    #[test]
    fn test_response_decomposes_roles() {
        let response = UserResponse::from(user(1, &[Role::Patient, Role::Administration], Status::Active));
        assert_eq!(response.roles, vec![Role::Administration, Role::Patient]);
        assert_eq!(response.status, Status::Active);
    }

    #[test]
    fn test_input_missing_fields_default_to_empty() {
        let input: UserInput = serde_json::from_str(r#"{"roles": ["Staff", 2]}"#).unwrap();
        assert_eq!(input.id, 0);
        assert!(input.name.is_empty());
        assert_eq!(input.role_set(), RoleSet::combine([Role::Staff, Role::Clinician]));
    }

    #[test]
    fn test_summary_of_empty_population() {
        assert_eq!(UserSummary::tally(&Vec::<User>::new()), UserSummary::default());
    }

    #[test]
    fn test_summary_counts_independent_buckets() {
        let users = vec![
            user(1, &[Role::Clinician], Status::Active),
            user(2, &[Role::Clinician, Role::Staff], Status::Deactive),
            user(3, &[Role::Staff], Status::Deactive),
            user(4, &[Role::Patient], Status::Deactive),
        ];

        let summary = UserSummary::tally(&users);

        assert_eq!(summary.clinician_count, 2);
        assert_eq!(summary.staff_count, 2);
        assert_eq!(summary.deactivated_clinician_count, 1);
    }
}

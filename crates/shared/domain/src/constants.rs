//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Validation
// =============================================================================

/// Maximum name length, counted in characters after trimming
pub const MAX_NAME_LENGTH: usize = 100;

/// Stable code reported when the name is empty or whitespace-only
pub const NAME_REQUIRED: &str = "name_required";

/// Stable code reported when the trimmed name is too long
pub const NAME_TOO_LONG: &str = "name_too_long";

/// Stable code reported when the email is empty or whitespace-only
pub const EMAIL_REQUIRED: &str = "email_required";

/// Stable code reported when the email does not parse as an address
pub const EMAIL_INVALID: &str = "email_invalid";

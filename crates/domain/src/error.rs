//! Common error types used across the workspace.
//!
//! Each failure mode has its own typed error; [`HubError`] is the umbrella
//! enum that hub use-cases return, with `#[from]` conversions so the inner
//! types compose with `?`. No `String` variants — every error carries the
//! fields callers need to react programmatically.

use crate::access::Permission;
use crate::state::DeviceState;

/// Umbrella error for hub operations.
#[derive(Debug, thiserror::Error)]
pub enum HubError {
    /// The acting user's role lacks a required permission.
    #[error("authorization failed")]
    Authorization(#[from] AuthorizationError),

    /// A device or domain object rejected invalid input.
    #[error("validation failed")]
    Validation(#[from] ValidationError),

    /// A name collided on create/register.
    #[error("name conflict")]
    Conflict(#[from] ConflictError),

    /// A device, scene, or group name did not resolve.
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// A batch operation failed mid-flight and was rolled back.
    #[error("execution failed")]
    Execution(#[from] ExecutionError),
}

/// The acting user's role lacks the permission an operation requires.
///
/// Raised before any state is touched; an operation that fails authorization
/// mutates nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("user '{user}' lacks permission {permission}")]
pub struct AuthorizationError {
    pub user: String,
    pub permission: Permission,
}

/// A device rejected a field of a state fragment.
///
/// Local to one device and one `apply_state` call. During batch execution the
/// executor always catches this and rewraps it as [`ExecutionError`]; it only
/// reaches callers directly from single-device calls.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// The field is present but not a boolean.
    #[error("{field} must be a boolean")]
    ExpectedBool { field: &'static str },

    /// The field is present but not numeric.
    #[error("{field} must be a number")]
    ExpectedNumber { field: &'static str },

    /// The field is numeric but outside the device's supported domain.
    #[error("{field} {value} is out of range {min}..{max}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// A required name was empty.
    #[error("name must not be empty")]
    EmptyName,
}

/// Duplicate name on create/register.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} '{name}' already exists")]
pub struct ConflictError {
    pub entity: &'static str,
    pub name: String,
}

/// Unknown device, scene, or group name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} '{name}' not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub name: String,
}

/// A device rejected its fragment partway through a batch.
///
/// Carries enough context to identify the failing target. By the time this
/// surfaces, every device the batch had touched has been restored to its
/// exact pre-operation snapshot.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("applying {fragment} to device '{device}' failed")]
pub struct ExecutionError {
    pub device: String,
    pub fragment: DeviceState,
    #[source]
    pub source: ValidationError,
}

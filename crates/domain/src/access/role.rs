//! Role — a named, fixed set of permissions.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::access::Permission;
use crate::error::{HubError, ValidationError};

/// A named permission set. A user holds exactly one role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub name: String,
    permissions: HashSet<Permission>,
}

impl Role {
    /// Create a builder for constructing a [`Role`].
    #[must_use]
    pub fn builder() -> RoleBuilder {
        RoleBuilder::default()
    }

    /// Whether this role holds `permission`.
    #[must_use]
    pub fn has(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} permissions)", self.name, self.permissions.len())
    }
}

/// Step-by-step builder for [`Role`].
#[derive(Debug, Default)]
pub struct RoleBuilder {
    name: Option<String>,
    permissions: HashSet<Permission>,
}

impl RoleBuilder {
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn permission(mut self, permission: Permission) -> Self {
        self.permissions.insert(permission);
        self
    }

    #[must_use]
    pub fn permissions(mut self, permissions: impl IntoIterator<Item = Permission>) -> Self {
        self.permissions.extend(permissions);
        self
    }

    /// Consume the builder, validate, and return a [`Role`].
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Validation`] if `name` is missing or empty.
    pub fn build(self) -> Result<Role, HubError> {
        let name = self.name.unwrap_or_default();
        if name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        Ok(Role {
            name,
            permissions: self.permissions,
        })
    }
}

//! Staff authentication and permission checks.
//!
//! Staff accounts are declared in the configuration file and authenticate
//! with a bearer token. Anonymous callers may query but never mutate.

pub mod staff;

pub use staff::StaffDirectory;

use serde::{Deserialize, Serialize};

use crate::error::{MutationError, MutationResult};

/// Capabilities that can be granted to a staff account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Permission {
    ManageProducts,
}

impl Permission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::ManageProducts => "product.manage_products",
        }
    }
}

/// An authenticated staff member
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub email: String,
    pub permissions: Vec<Permission>,
}

impl User {
    pub fn new(email: impl Into<String>, permissions: Vec<Permission>) -> Self {
        Self {
            email: email.into(),
            permissions,
        }
    }

    pub fn has_permission(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }
}

/// Fail with `PermissionDenied` unless `user` holds `permission`.
pub fn require_permission(user: Option<&User>, permission: Permission) -> MutationResult<&User> {
    match user {
        Some(user) if user.has_permission(permission) => Ok(user),
        Some(user) => {
            tracing::warn!(
                email = %user.email,
                permission = permission.as_str(),
                "permission denied"
            );
            Err(MutationError::PermissionDenied)
        }
        None => {
            tracing::warn!(permission = permission.as_str(), "anonymous mutation rejected");
            Err(MutationError::PermissionDenied)
        }
    }
}

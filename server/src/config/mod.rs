//! Configuration management for the catalog server
//!
//! Configuration is stored in RON format. It declares where the API listens
//! and which staff accounts may authenticate.

pub mod loader;

use serde::{Deserialize, Serialize};

use crate::auth::Permission;

const DEFAULT_BIND: &str = "0.0.0.0:8000";

/// Top-level configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub server: Server,

    /// Staff accounts allowed to authenticate against the API
    #[serde(default)]
    pub staff: Vec<StaffAccount>,
}

impl Config {
    /// Validate every staff account, reporting the first problem found
    pub fn validate(&self) -> Result<(), String> {
        for account in &self.staff {
            account.validate()?;
        }
        Ok(())
    }
}

/// HTTP listener settings
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Server {
    /// Socket address the GraphQL API binds to
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}

/// A staff identity authenticated by a bearer token
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct StaffAccount {
    pub email: String,

    /// Environment variable holding the bearer token
    pub token_env: String,

    #[serde(default)]
    pub permissions: Vec<Permission>,
}

impl StaffAccount {
    pub fn validate(&self) -> Result<(), String> {
        if self.email.trim().is_empty() {
            return Err("Staff account email cannot be empty".to_string());
        }
        if self.token_env.trim().is_empty() {
            return Err(format!(
                "Staff account '{}' must name a token environment variable",
                self.email
            ));
        }
        Ok(())
    }

    /// Read the bearer token from the environment. Empty values count as unset.
    pub fn resolve_token(&self) -> Option<String> {
        std::env::var(&self.token_env)
            .ok()
            .filter(|token| !token.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(email: &str, token_env: &str) -> StaffAccount {
        StaffAccount {
            email: email.to_string(),
            token_env: token_env.to_string(),
            permissions: vec![Permission::ManageProducts],
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.bind, "0.0.0.0:8000");
        assert!(config.staff.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_staff_account_validate() {
        assert!(account("admin@example.com", "ADMIN_TOKEN").validate().is_ok());
        assert!(account("", "ADMIN_TOKEN").validate().is_err());
        assert!(account("admin@example.com", " ").validate().is_err());
    }

    #[test]
    fn test_config_validate_reports_bad_account() {
        let config = Config {
            server: Server::default(),
            staff: vec![account("ok@example.com", "OK_TOKEN"), account("", "X")],
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_resolve_token() {
        unsafe {
            std::env::set_var("CONFIG_TEST_STAFF_TOKEN", "abc");
            std::env::set_var("CONFIG_TEST_EMPTY_TOKEN", "");
        }

        assert_eq!(
            account("a@example.com", "CONFIG_TEST_STAFF_TOKEN").resolve_token(),
            Some("abc".to_string())
        );
        assert_eq!(
            account("a@example.com", "CONFIG_TEST_EMPTY_TOKEN").resolve_token(),
            None
        );
        assert_eq!(
            account("a@example.com", "CONFIG_TEST_NONEXISTENT").resolve_token(),
            None
        );

        unsafe {
            std::env::remove_var("CONFIG_TEST_STAFF_TOKEN");
            std::env::remove_var("CONFIG_TEST_EMPTY_TOKEN");
        }
    }
}

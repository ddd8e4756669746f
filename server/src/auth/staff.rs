//! Bearer-token lookup for configured staff accounts.

use std::collections::HashMap;

use super::User;
use crate::config::StaffAccount;

/// Maps bearer tokens to the staff member they authenticate.
///
/// Built once at startup and shared read-only between requests.
#[derive(Debug, Default)]
pub struct StaffDirectory {
    tokens: HashMap<String, User>,
}

impl StaffDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the directory from configured accounts, reading each token from
    /// its environment variable. Accounts without a token are skipped.
    pub fn from_accounts(accounts: &[StaffAccount]) -> Self {
        let mut directory = Self::new();
        for account in accounts {
            match account.resolve_token() {
                Some(token) => {
                    directory.insert(token, User::new(&account.email, account.permissions.clone()));
                }
                None => tracing::warn!(
                    email = %account.email,
                    token_env = %account.token_env,
                    "staff token variable is unset or empty, account disabled"
                ),
            }
        }
        directory
    }

    pub fn insert(&mut self, token: impl Into<String>, user: User) {
        self.tokens.insert(token.into(), user);
    }

    pub fn authenticate(&self, token: &str) -> Option<&User> {
        self.tokens.get(token)
    }

    /// Resolve an `Authorization` header value of the form `Bearer <token>`.
    pub fn authenticate_header(&self, header: &str) -> Option<&User> {
        let token = header.strip_prefix("Bearer ")?.trim();
        if token.is_empty() {
            return None;
        }
        self.authenticate(token)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Permission;

    fn directory() -> StaffDirectory {
        let mut directory = StaffDirectory::new();
        directory.insert(
            "secret",
            User::new("admin@example.com", vec![Permission::ManageProducts]),
        );
        directory
    }

    #[test]
    fn authenticates_known_token() {
        let directory = directory();
        let user = directory.authenticate("secret").unwrap();
        assert_eq!(user.email, "admin@example.com");
        assert!(directory.authenticate("other").is_none());
    }

    #[test]
    fn parses_bearer_header() {
        let directory = directory();
        assert!(directory.authenticate_header("Bearer secret").is_some());
        assert!(directory.authenticate_header("Bearer  secret ").is_some());
        assert!(directory.authenticate_header("Basic secret").is_none());
        assert!(directory.authenticate_header("Bearer ").is_none());
    }

    #[test]
    fn skips_accounts_without_token() {
        unsafe {
            std::env::set_var("STAFF_DIRECTORY_TEST_TOKEN", "from-env");
            std::env::remove_var("STAFF_DIRECTORY_TEST_MISSING");
        }

        let accounts = vec![
            StaffAccount {
                email: "a@example.com".to_string(),
                token_env: "STAFF_DIRECTORY_TEST_TOKEN".to_string(),
                permissions: vec![Permission::ManageProducts],
            },
            StaffAccount {
                email: "b@example.com".to_string(),
                token_env: "STAFF_DIRECTORY_TEST_MISSING".to_string(),
                permissions: vec![],
            },
        ];

        let directory = StaffDirectory::from_accounts(&accounts);
        assert_eq!(directory.len(), 1);
        let user = directory.authenticate("from-env").unwrap();
        assert!(user.has_permission(Permission::ManageProducts));

        unsafe {
            std::env::remove_var("STAFF_DIRECTORY_TEST_TOKEN");
        }
    }
}

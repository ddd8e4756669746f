//! Configuration file loading and parsing
//!
//! Loads the catalog configuration from RON files, searching standard
//! locations when no explicit path is given.

use super::Config;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Standard config file names to search for
const CONFIG_FILENAMES: &[&str] = &["catalog.ron", ".catalog/config.ron"];

/// Load configuration from a specific file path
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config = parse_ron(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid config file {}: {}", path.display(), e))?;
    Ok(config)
}

/// Load configuration with automatic file discovery
///
/// Searches, in order:
/// 1. Path in the CATALOG_CONFIG_PATH environment variable
/// 2. catalog.ron in the current directory
/// 3. .catalog/config.ron relative to the current directory
///
/// Falls back to the default configuration when nothing is found.
pub fn load_with_discovery() -> Result<Config> {
    if let Ok(env_path) = std::env::var("CATALOG_CONFIG_PATH") {
        let path = PathBuf::from(env_path);
        if path.exists() {
            tracing::info!("Loading config from CATALOG_CONFIG_PATH: {}", path.display());
            return load_from_file(&path);
        } else {
            tracing::warn!(
                "CATALOG_CONFIG_PATH specified but file not found: {}",
                path.display()
            );
        }
    }

    for filename in CONFIG_FILENAMES {
        let path = PathBuf::from(filename);
        if path.exists() {
            tracing::info!("Loading config from: {}", path.display());
            return load_from_file(&path);
        }
    }

    tracing::info!("No config file found, using defaults");
    Ok(Config::default())
}

fn parse_ron(content: &str) -> Result<Config> {
    ron::from_str(content).context("Failed to parse RON configuration")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Permission;
    use tempfile::TempDir;

    #[test]
    fn test_parse_empty_config() {
        let config = parse_ron("Config(staff: [])").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_parse_full_config() {
        let ron = r#"
Config(
    server: Server(bind: "127.0.0.1:9000"),
    staff: [
        StaffAccount(
            email: "admin@example.com",
            token_env: "CATALOG_ADMIN_TOKEN",
            permissions: [ManageProducts],
        ),
        StaffAccount(
            email: "viewer@example.com",
            token_env: "CATALOG_VIEWER_TOKEN",
        ),
    ],
)
        "#;

        let config = parse_ron(ron).unwrap();
        assert_eq!(config.server.bind, "127.0.0.1:9000");
        assert_eq!(config.staff.len(), 2);
        assert_eq!(config.staff[0].email, "admin@example.com");
        assert_eq!(config.staff[0].permissions, vec![Permission::ManageProducts]);
        assert!(config.staff[1].permissions.is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("catalog.ron");

        std::fs::write(
            &config_path,
            r#"Config(staff: [StaffAccount(email: "a@example.com", token_env: "A_TOKEN")])"#,
        )
        .unwrap();

        let config = load_from_file(&config_path).unwrap();
        assert_eq!(config.staff.len(), 1);
        assert_eq!(config.server.bind, "0.0.0.0:8000");
    }

    #[test]
    fn test_load_rejects_invalid_account() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("catalog.ron");

        std::fs::write(
            &config_path,
            r#"Config(staff: [StaffAccount(email: "", token_env: "A_TOKEN")])"#,
        )
        .unwrap();

        assert!(load_from_file(&config_path).is_err());
    }

    #[test]
    fn test_load_from_nonexistent_file() {
        let result = load_from_file("/nonexistent/path/catalog.ron");
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_invalid_ron() {
        assert!(parse_ron("This is not valid RON").is_err());
    }
}

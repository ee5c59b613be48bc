use std::fs;
use std::path::Path;

use anyhow::Context;

use crate::app_config::AppConfig;

pub fn save_token_securely(token_path: &str, token: &str) -> anyhow::Result<()> {
    let path = Path::new(token_path);

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create token directory")?;
    }

    fs::write(path, token).context("Failed to write token")?;

    // Owner read/write only
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(path)?.permissions();
        perms.set_mode(0o600);
        fs::set_permissions(path, perms)?;
    }

    Ok(())
}

/// Token to send with requests: the override first, then the stored one
pub fn load_token(config: &AppConfig) -> anyhow::Result<Option<String>> {
    if let Some(token) = &config.token_override {
        return Ok(Some(token.clone()));
    }

    let path = Path::new(&config.token_path);
    if !path.exists() {
        return Ok(None);
    }

    let token = fs::read_to_string(path).context("Failed to read token")?;
    let token = token.trim();

    Ok((!token.is_empty()).then(|| token.to_string()))
}

/// Remove the stored token. Returns `false` when there was none.
pub fn clear_token(token_path: &str) -> anyhow::Result<bool> {
    let path = Path::new(token_path);
    if !path.exists() {
        return Ok(false);
    }

    fs::remove_file(path).context("Failed to remove token")?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use tempfile::TempDir;

    fn config(token_path: &Path, token_override: Option<&str>) -> AppConfig {
        AppConfig {
            profile_name: "test".to_string(),
            profile_path: "test.toml".to_string(),
            profile_exists: false,
            api_url: "http://localhost".to_string(),
            token_path: token_path.to_string_lossy().into_owned(),
            global_search: false,
            open_browser: false,
            token_override: token_override.map(str::to_string),
        }
    }

    #[test]
    fn test_save_load_clear() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("profiles").join("test").join("token");
        let config = config(&path, None);

        assert_eq!(load_token(&config).unwrap(), None);

        save_token_securely(&config.token_path, "secret\n").unwrap();
        assert_eq!(load_token(&config).unwrap().as_deref(), Some("secret"));

        assert!(clear_token(&config.token_path).unwrap());
        assert!(!clear_token(&config.token_path).unwrap());
        assert_eq!(load_token(&config).unwrap(), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_token_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("token");

        save_token_securely(path.to_str().unwrap(), "secret").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_override_wins() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("token");
        save_token_securely(path.to_str().unwrap(), "stored").unwrap();

        let config = config(&path, Some("override"));

        assert_eq!(load_token(&config).unwrap().as_deref(), Some("override"));
    }
}

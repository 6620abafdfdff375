//! GitHub Authentication
//!
//! Resolves the API token and the target owner (user or organization) from
//! explicit configuration or the conventional environment variables.

/// Environment variables consulted for the API token, in order.
const TOKEN_ENV_VARS: &[&str] = &["GITHUB_TOKEN", "GH_TOKEN"];

/// Environment variables consulted for the owner login, in order.
const OWNER_ENV_VARS: &[&str] = &["GITHUB_OWNER", "GITHUB_ORGANIZATION"];

/// GitHub login names are capped at 39 characters.
const MAX_LOGIN_LENGTH: usize = 39;

/// Read the API token from the environment.
/// Security: the token value itself is never logged.
pub fn get_default_token() -> Option<String> {
    for var in TOKEN_ENV_VARS {
        if let Ok(token) = std::env::var(var) {
            if !token.trim().is_empty() {
                return Some(token);
            }
        }
    }
    None
}

/// Read the owner login from the environment.
/// Security: validates login format before returning.
pub fn get_default_owner() -> Option<String> {
    for var in OWNER_ENV_VARS {
        if let Ok(owner) = std::env::var(var) {
            if validate_owner(&owner) {
                return Some(owner);
            }
            tracing::warn!("Invalid owner login format in {}", var);
        }
    }
    None
}

/// Validate a GitHub owner login.
/// Logins are 1-39 characters of alphanumerics and single hyphens, and may
/// not begin or end with a hyphen.
pub fn validate_owner(login: &str) -> bool {
    if login.is_empty() || login.len() > MAX_LOGIN_LENGTH {
        return false;
    }
    if login.starts_with('-') || login.ends_with('-') || login.contains("--") {
        return false;
    }
    login.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// Validate a GitHub repository name.
/// Repository names are ASCII alphanumerics, hyphens, underscores, and dots,
/// and may not be the reserved names `.` or `..`.
pub fn validate_repo_name(name: &str) -> bool {
    if name.is_empty() || name == "." || name == ".." {
        return false;
    }
    name.chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
}

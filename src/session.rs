//! The login session: a bearer token, its expiry and the user it belongs to, kept in
//! `$HFIN_HOME/.secrets/token.json`.

use crate::error::{ErrorType, IntoResult};
use crate::model::{Role, User};
use crate::{utils, Result};
use anyhow::{anyhow, Context};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// What is stored in the token file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct TokenFile {
    token: String,
    expires_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user: Option<User>,
}

impl TokenFile {
    fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

/// The session of the person using the CLI. An expired token is treated the same as no token.
#[derive(Debug, Clone)]
pub struct Session {
    path: PathBuf,
    data: Option<TokenFile>,
}

impl Session {
    /// Reads the token file at `path`. A missing or unreadable file gives a logged-out session.
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.is_file() {
            debug!("No token file at {}", path.display());
            return Ok(Self::empty(path));
        }
        let data = match utils::deserialize::<TokenFile>(&path).await {
            Ok(data) => Some(data),
            Err(e) => {
                warn!("Ignoring an unreadable token file: {e:#}");
                None
            }
        };
        Ok(Self { path, data })
    }

    /// A logged-out session that will save to `path`.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            data: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn active(&self) -> Option<&TokenFile> {
        self.data.as_ref().filter(|d| !d.is_expired())
    }

    /// The bearer token, if there is one and it has not expired.
    pub fn token(&self) -> Option<&str> {
        self.active().map(|d| d.token.as_str())
    }

    pub fn is_logged_in(&self) -> bool {
        self.active().is_some()
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.active().map(|d| d.expires_at)
    }

    /// The user recorded at login, if known.
    pub fn user(&self) -> Option<&User> {
        self.active().and_then(|d| d.user.as_ref())
    }

    pub fn role(&self) -> Option<Role> {
        self.user().map(|u| u.role)
    }

    /// Fails with a session error unless there is a live token.
    pub fn require_login(&self) -> Result<&str> {
        self.token()
            .ok_or_else(|| anyhow!("Not logged in, run 'hfin login' first"))
            .pub_result(ErrorType::Session)
    }

    /// Fails with a permission error unless the logged-in user is an admin.
    pub fn require_admin(&self) -> Result<()> {
        self.require_login()?;
        match self.role() {
            Some(Role::Admin) => Ok(()),
            Some(role) => Err(anyhow!("This requires the admin role, you are '{role}'"))
                .pub_result(ErrorType::Permission),
            None => Err(anyhow!("The current user's role is unknown, log in again"))
                .pub_result(ErrorType::Permission),
        }
    }

    /// Stores `token` for `days` days and writes the token file with owner-only permissions.
    pub async fn save(
        &mut self,
        token: impl Into<String>,
        user: Option<User>,
        days: u32,
    ) -> Result<()> {
        let expires_at = Utc::now() + Duration::days(i64::from(days));
        self.data = Some(TokenFile {
            token: token.into(),
            expires_at,
            user,
        });
        self.write().await
    }

    /// Replaces the stored user, keeping the token and expiry.
    pub async fn set_user(&mut self, user: User) -> Result<()> {
        match self.data.as_mut() {
            Some(data) => {
                data.user = Some(user);
                self.write().await
            }
            None => Ok(()),
        }
    }

    /// Forgets the token and removes the token file.
    pub async fn clear(&mut self) -> Result<()> {
        self.data = None;
        utils::remove_file(&self.path)
            .await
            .context("Unable to remove the token file")
    }

    async fn write(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            utils::make_dir(parent).await?;
        }
        if let Some(data) = &self.data {
            utils::serialize(&self.path, data)
                .await
                .context("Unable to save the token file")?;
            utils::restrict_permissions(&self.path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::error_type;
    use tempfile::TempDir;

    fn admin() -> User {
        User {
            id: 1,
            name: "Administrator".to_string(),
            username: "admin".to_string(),
            role: Role::Admin,
            last_login: None,
        }
    }

    #[tokio::test]
    async fn test_missing_file_is_logged_out() {
        let dir = TempDir::new().unwrap();
        let session = Session::load(dir.path().join("token.json")).await.unwrap();
        assert!(!session.is_logged_in());
        let err = session.require_login().unwrap_err();
        assert_eq!(error_type(&err), Some(ErrorType::Session));
        assert!(err.to_string().contains("Not logged in"));
    }

    #[tokio::test]
    async fn test_save_load_clear() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".secrets").join("token.json");
        let mut session = Session::empty(&path);
        session.save("abc", Some(admin()), 1).await.unwrap();

        let loaded = Session::load(&path).await.unwrap();
        assert_eq!(loaded.token(), Some("abc"));
        assert_eq!(loaded.role(), Some(Role::Admin));
        assert!(loaded.require_admin().is_ok());

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }

        session.clear().await.unwrap();
        assert!(!path.exists());
        assert!(Session::load(&path).await.unwrap().token().is_none());
    }

    #[tokio::test]
    async fn test_expired_token_is_ignored() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("token.json");
        let json = r#"{"token": "old", "expires_at": "2000-01-01T00:00:00Z"}"#;
        utils::write(&path, json).await.unwrap();

        let session = Session::load(&path).await.unwrap();
        assert!(session.token().is_none());
        assert!(session.require_login().is_err());
    }

    #[tokio::test]
    async fn test_require_admin_rejects_user_role() {
        let dir = TempDir::new().unwrap();
        let mut session = Session::empty(dir.path().join("token.json"));
        let mut user = admin();
        user.role = Role::User;
        session.save("abc", Some(user), 1).await.unwrap();

        let err = session.require_admin().unwrap_err();
        assert_eq!(error_type(&err), Some(ErrorType::Permission));
    }
}

//! Shared test utilities for creating test environments.
//!
//! This module is only compiled when running tests (`#[cfg(test)]`).

use crate::api::{self, Hospital, Mode, TestRest};
use crate::Config;
use tempfile::TempDir;

pub const ADMIN: (&str, &str) = ("admin", "Admin123!");

/// Test environment that sets up an hfin home directory with a Config, a seeded test backend
/// saved inside it, and an admin session.
/// Holds TempDir to keep the directory alive for the duration of the test.
pub struct TestEnv {
    _temp_dir: TempDir,
    config: Config,
}

impl TestEnv {
    /// Creates a test environment that is logged in as the seeded admin.
    pub async fn new() -> Self {
        let env = Self::logged_out().await;
        env.login_as(ADMIN.0, ADMIN.1).await;
        env
    }

    /// Creates a test environment without a session.
    pub async fn logged_out() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("hfin");
        let config = Config::create(&root, "http://localhost:8000")
            .await
            .unwrap();
        TestRest::load(config.test_backend_path()).await.unwrap();
        Self {
            _temp_dir: temp_dir,
            config,
        }
    }

    /// Returns a clone of the Config.
    pub fn config(&self) -> Config {
        self.config.clone()
    }

    /// A client for the test backend using whatever session is saved.
    pub async fn hospital(&self) -> Hospital {
        api::hospital(&self.config, Mode::Test).await.unwrap()
    }

    /// Logs in, replacing the saved session, and returns the logged in client.
    pub async fn login_as(&self, username: &str, password: &str) -> Hospital {
        let mut hospital = self.hospital().await;
        hospital.login(username, password).await.unwrap();
        hospital
    }

    /// Makes the backend forget every token it has issued, while the saved session still holds
    /// one.
    pub async fn expire_backend_tokens(&self) {
        let mut rest = TestRest::load(self.config.test_backend_path())
            .await
            .unwrap();
        rest.expire_tokens();
        rest.save().await.unwrap();
    }
}

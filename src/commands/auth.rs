//! Session command handlers.
//!
//! This module implements the CLI commands for:
//! - `hfin login` - Exchange a username and password for a session token
//! - `hfin logout` - Forget the session token
//! - `hfin whoami` - Ask the backend who the session belongs to
//! - `hfin register` - Create an account (admins only)

use crate::api::{self, Mode};
use crate::args::{LoginArgs, RegisterArgs};
use crate::commands::Out;
use crate::error::{ErrorType, IntoResult};
use crate::model::{RegisterForm, User};
use crate::session::Session;
use crate::{Config, Result};

/// Logs in and stores the token in the session file. Any previous session is replaced.
pub async fn login(config: Config, mode: Mode, args: LoginArgs) -> Result<Out<User>> {
    let mut hospital = api::hospital(&config, mode).await?;
    let user = hospital.login(args.username(), args.password()).await?;
    let expires = hospital
        .session()
        .expires_at()
        .map(|t| format!(", the session lasts until {}", t.format("%Y-%m-%d %H:%M UTC")))
        .unwrap_or_default();
    Ok(Out::new(
        format!("Logged in as {} ({}){expires}", user.name, user.role),
        user,
    ))
}

/// Removes the session file. This never talks to the backend.
pub async fn logout(config: Config) -> Result<Out<()>> {
    let mut session = Session::load(config.token_path()).await?;
    let was_logged_in = session.is_logged_in();
    session.clear().await.pub_result(ErrorType::Session)?;
    Ok(if was_logged_in {
        "Logged out".into()
    } else {
        "There was no active session".into()
    })
}

/// Fetches the current user from the backend, which also confirms the token still works.
pub async fn whoami(config: Config, mode: Mode) -> Result<Out<User>> {
    let mut hospital = api::hospital(&config, mode).await?;
    let user = hospital.me().await?;
    let last_login = user
        .last_login
        .as_deref()
        .map(|t| format!(", last login {t}"))
        .unwrap_or_default();
    Ok(Out::new(
        format!("{} ({}) {}{last_login}", user.username, user.role, user.name),
        user,
    ))
}

/// Creates an account. Only admins may do this.
pub async fn register(config: Config, mode: Mode, args: RegisterArgs) -> Result<Out<User>> {
    let mut hospital = api::hospital(&config, mode).await?;
    let form = RegisterForm {
        name: args.name().to_string(),
        username: args.username().to_string(),
        password: args.password().to_string(),
        role: args.role(),
    };
    let user = hospital.register(&form).await?;
    Ok(Out::new(
        format!("Registered {} as {} (id {})", user.username, user.role, user.id),
        user,
    ))
}

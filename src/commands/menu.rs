//! Menu command handler.

use crate::args::MenuArgs;
use crate::commands::Out;
use crate::error::{ErrorType, IntoResult};
use crate::menu::{self, Menu};
use crate::model::Role;
use crate::session::Session;
use crate::{Config, Result};
use anyhow::anyhow;

const MENU_FILE: &str = "menu.json";

/// Applies `--close-all`, `--toggle` and `--select`, in that order, saves the menu state and
/// prints the menu as the session's role sees it. Without a session only the entries every user
/// sees are shown.
pub async fn menu(config: Config, args: MenuArgs) -> Result<Out<Menu>> {
    let path = config.root().join(MENU_FILE);
    let role = Session::load(config.token_path())
        .await?
        .role()
        .unwrap_or(Role::User);
    let mut state = Menu::load(&path).await.pub_result(ErrorType::Config)?;

    if args.close_all() {
        state.close_all();
    }
    if let Some(key) = args.toggle() {
        state.toggle(key).pub_result(ErrorType::Validation)?;
    }
    if let Some(key) = args.select() {
        let all = menu::tree();
        if contains(&all, key) && !contains(&menu::visible(&all, role), key) {
            return Err(anyhow!("Only admins can open '{key}'")).pub_result(ErrorType::Permission);
        }
        state.select(key).pub_result(ErrorType::Validation)?;
    }
    state.save(&path).await.pub_result(ErrorType::Config)?;

    let rendered = state.render(role);
    Ok(Out::new(rendered.trim_end().to_string(), state))
}

fn contains(items: &[menu::Item], key: &str) -> bool {
    items
        .iter()
        .any(|item| item.key == key || contains(&item.children, key))
}

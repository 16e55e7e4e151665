//! The navigation menu and which of its submenus are open.
//!
//! Opening a submenu closes its open siblings, so at any time the open submenus form a single path
//! from the top level down. Selecting a page opens every submenu above it.

use crate::model::Role;
use crate::{utils, Result};
use anyhow::bail;
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::path::Path;

/// An entry of the menu. Entries with children are submenus, the rest are pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    pub key: &'static str,
    pub label: &'static str,
    pub admin_only: bool,
    pub children: Vec<Item>,
}

impl Item {
    fn page(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            admin_only: false,
            children: Vec::new(),
        }
    }

    fn submenu(key: &'static str, label: &'static str, children: Vec<Item>) -> Self {
        Self {
            key,
            label,
            admin_only: false,
            children,
        }
    }

    fn admin(mut self) -> Self {
        self.admin_only = true;
        self
    }

    pub fn is_submenu(&self) -> bool {
        !self.children.is_empty()
    }
}

/// The dashboard's menu.
pub fn tree() -> Vec<Item> {
    vec![
        Item::page("dashboard", "Dashboard"),
        Item::submenu(
            "income",
            "Income",
            vec![
                Item::page("income.data", "Data"),
                Item::page("income.categories", "Categories"),
                Item::page("income.chart", "Yearly chart"),
            ],
        ),
        Item::submenu(
            "spending",
            "Spending",
            vec![
                Item::page("spending.data", "Data"),
                Item::page("spending.categories", "Categories"),
                Item::submenu(
                    "spending.medicine",
                    "Medicine",
                    vec![
                        Item::page("spending.medicine.units", "Units"),
                        Item::page("spending.medicine.companies", "Companies"),
                    ],
                ),
                Item::page("spending.chart", "Yearly chart"),
            ],
        ),
        Item::page("mixture", "Mixture"),
        Item::page("users", "Users").admin(),
        Item::page("years", "Years"),
    ]
}

/// The keys from the top level down to `key`, including `key`. Empty if `key` is not in `items`.
fn path_to(items: &[Item], key: &str) -> Vec<&'static str> {
    for item in items {
        if item.key == key {
            return vec![item.key];
        }
        let mut below = path_to(&item.children, key);
        if !below.is_empty() {
            below.insert(0, item.key);
            return below;
        }
    }
    Vec::new()
}

fn find<'a>(items: &'a [Item], key: &str) -> Option<&'a Item> {
    items.iter().find_map(|item| {
        if item.key == key {
            Some(item)
        } else {
            find(&item.children, key)
        }
    })
}

/// `items` without the entries `role` may not see.
pub fn visible(items: &[Item], role: Role) -> Vec<Item> {
    items
        .iter()
        .filter(|item| role.is_admin() || !item.admin_only)
        .map(|item| Item {
            children: visible(&item.children, role),
            ..item.clone()
        })
        .collect()
}

/// The open submenus and the selected page.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Menu {
    /// Open submenus, outermost first.
    open: Vec<String>,
    active: Option<String>,
}

impl Menu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the saved state, starting closed if there is none.
    pub async fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Ok(Self::default());
        }
        utils::deserialize(path).await
    }

    pub async fn save(&self, path: &Path) -> Result<()> {
        utils::serialize(path, self).await
    }

    pub fn open(&self) -> &[String] {
        &self.open
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn is_open(&self, key: &str) -> bool {
        self.open.iter().any(|k| k == key)
    }

    /// Opens the submenu `key`, closing any other open submenu at its level, or closes it (and
    /// everything below it) if it is already open.
    pub fn toggle(&mut self, key: &str) -> Result<()> {
        let items = tree();
        match find(&items, key) {
            None => bail!("There is no menu entry '{key}'"),
            Some(item) if !item.is_submenu() => bail!("'{key}' is a page, not a submenu"),
            Some(_) => {}
        }
        if let Some(ix) = self.open.iter().position(|k| k == key) {
            self.open.truncate(ix);
        } else {
            self.open = path_to(&items, key).into_iter().map(String::from).collect();
        }
        Ok(())
    }

    /// Marks the page `key` as the current page and opens the submenus that contain it.
    pub fn select(&mut self, key: &str) -> Result<()> {
        let items = tree();
        match find(&items, key) {
            None => bail!("There is no menu entry '{key}'"),
            Some(item) if item.is_submenu() => bail!("'{key}' is a submenu, not a page"),
            Some(_) => {}
        }
        let mut path = path_to(&items, key);
        path.pop();
        self.open = path.into_iter().map(String::from).collect();
        self.active = Some(key.to_string());
        Ok(())
    }

    pub fn close_all(&mut self) {
        self.open.clear();
    }

    /// Draws the menu as `role` sees it. Children of closed submenus are hidden.
    pub fn render(&self, role: Role) -> String {
        let mut out = String::new();
        self.render_items(&visible(&tree(), role), 0, &mut out);
        out
    }

    fn render_items(&self, items: &[Item], depth: usize, out: &mut String) {
        for item in items {
            let marker = if item.is_submenu() {
                if self.is_open(item.key) {
                    "v"
                } else {
                    ">"
                }
            } else if self.active() == Some(item.key) {
                "*"
            } else {
                "-"
            };
            let _ = writeln!(out, "{}{marker} {}", "  ".repeat(depth), item.label);
            if item.is_submenu() && self.is_open(item.key) {
                self.render_items(&item.children, depth + 1, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_toggle_opens_and_closes() {
        let mut menu = Menu::new();
        menu.toggle("income").unwrap();
        assert_eq!(menu.open(), ["income"]);
        menu.toggle("income").unwrap();
        assert!(menu.open().is_empty());
    }

    #[test]
    fn test_opening_a_sibling_closes_the_other() {
        let mut menu = Menu::new();
        menu.toggle("income").unwrap();
        menu.toggle("spending").unwrap();
        assert!(!menu.is_open("income"));
        assert!(menu.is_open("spending"));
    }

    #[test]
    fn test_nested_submenus() {
        let mut menu = Menu::new();
        menu.toggle("spending").unwrap();
        menu.toggle("spending.medicine").unwrap();
        assert_eq!(menu.open(), ["spending", "spending.medicine"]);

        // closing the parent closes the child
        menu.toggle("spending").unwrap();
        assert!(menu.open().is_empty());

        // opening a nested submenu directly opens its parent
        menu.toggle("spending.medicine").unwrap();
        assert_eq!(menu.open(), ["spending", "spending.medicine"]);
        menu.toggle("income").unwrap();
        assert_eq!(menu.open(), ["income"]);
    }

    #[test]
    fn test_select_opens_ancestors() {
        let mut menu = Menu::new();
        menu.toggle("income").unwrap();
        menu.select("spending.medicine.units").unwrap();
        assert_eq!(menu.open(), ["spending", "spending.medicine"]);
        assert_eq!(menu.active(), Some("spending.medicine.units"));
        menu.close_all();
        assert!(menu.open().is_empty());
        assert_eq!(menu.active(), Some("spending.medicine.units"));
    }

    #[test]
    fn test_bad_keys() {
        let mut menu = Menu::new();
        assert!(menu.toggle("nope").is_err());
        assert!(menu.toggle("dashboard").is_err());
        assert!(menu.select("spending").is_err());
    }

    #[test]
    fn test_users_only_visible_to_admins() {
        let has_users = |items: &[Item]| items.iter().any(|i| i.key == "users");
        assert!(has_users(&visible(&tree(), Role::Admin)));
        assert!(!has_users(&visible(&tree(), Role::User)));
        assert!(!Menu::new().render(Role::User).contains("Users"));
    }

    #[test]
    fn test_render() {
        let mut menu = Menu::new();
        menu.select("income.chart").unwrap();
        let text = menu.render(Role::Admin);
        assert!(text.contains("v Income\n"));
        assert!(text.contains("  * Yearly chart\n"));
        assert!(text.contains("> Spending\n"));
        assert!(!text.contains("Units"));
    }

    #[tokio::test]
    async fn test_state_round_trips_through_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("menu.json");
        assert_eq!(Menu::load(&path).await.unwrap(), Menu::new());
        let mut menu = Menu::new();
        menu.select("years").unwrap();
        menu.save(&path).await.unwrap();
        assert_eq!(Menu::load(&path).await.unwrap(), menu);
    }
}

//! Types that represent the ledger's data model, mirrored from the backend's tables.
mod amount;
mod category;
pub mod date;
mod medicine;
mod transaction;
mod user;
mod year;

pub use amount::{Amount, AmountError};
pub use category::{category_name, Category, CategoryKind, CategoryScope};
pub use medicine::{Company, MedicineDetail, Unit};
pub use transaction::{medicine_total, Entry, Income, IncomeForm, Spending, SpendingForm};
pub use user::{validate_password, LoginForm, RegisterForm, Role, User, UserUpdate};
pub use year::{Page, Year};

use crate::model::date::FORMAT;

/// Ids are assigned by the backend; zero marks a record that has not been saved.
pub(crate) fn is_new(id: &i64) -> bool {
    *id == 0
}

/// A record that can be listed as a row of a table.
pub trait Record {
    fn headers() -> &'static [&'static str];
    fn cells(&self) -> Vec<String>;
    fn name(&self) -> &str;
}

impl Record for Income {
    fn headers() -> &'static [&'static str] {
        &["id", "date", "name", "category_id", "amount"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.date.format(FORMAT).to_string(),
            self.name.clone(),
            self.category_id.to_string(),
            self.amount.to_string(),
        ]
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Record for Spending {
    fn headers() -> &'static [&'static str] {
        &["id", "date", "name", "category_id", "company_id", "amount"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.date.format(FORMAT).to_string(),
            self.name.clone(),
            self.category_id.to_string(),
            self.company_id.map(|c| c.to_string()).unwrap_or_default(),
            self.amount.to_string(),
        ]
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Record for MedicineDetail {
    fn headers() -> &'static [&'static str] {
        &[
            "id",
            "spending_id",
            "name",
            "quantity",
            "unit",
            "price_per_item",
            "total",
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.spending_id.to_string(),
            self.name.clone(),
            self.quantity.to_string(),
            self.unit.clone(),
            self.price_per_item.to_string(),
            self.line_total().to_string(),
        ]
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Record for User {
    fn headers() -> &'static [&'static str] {
        &["id", "name", "username", "role", "last_login"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.username.clone(),
            self.role.to_string(),
            self.last_login.clone().unwrap_or_default(),
        ]
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Record for Year {
    fn headers() -> &'static [&'static str] {
        &["id", "year"]
    }

    fn cells(&self) -> Vec<String> {
        vec![self.id.to_string(), self.year.to_string()]
    }

    fn name(&self) -> &str {
        ""
    }
}

macro_rules! named_record {
    ($t:ty) => {
        impl Record for $t {
            fn headers() -> &'static [&'static str] {
                &["id", "name"]
            }

            fn cells(&self) -> Vec<String> {
                vec![self.id.to_string(), self.name.clone()]
            }

            fn name(&self) -> &str {
                &self.name
            }
        }
    };
}

named_record!(Category);
named_record!(Unit);
named_record!(Company);

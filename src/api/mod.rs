//! Talks to the ledger backend.
//!
//! `Rest` is the seam: one method that sends a `Request` and returns the status and JSON body.
//! `HttpRest` implements it with `reqwest`, `TestRest` with in-memory tables so that the whole
//! program can run top-to-bottom without a server. `Hospital` sits on top of either and knows the
//! endpoints, the session token and how failures are reported.

mod hospital;
mod http;
mod test_rest;

use crate::session::Session;
use crate::{Config, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use hospital::Hospital;
pub use test_rest::TestRest;

/// When this variable is set and non-empty, the in-memory backend is used instead of HTTP.
pub const TEST_MODE_ENV: &str = "HFIN_IN_TEST_MODE";

/// Which `Rest` implementation to use.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Http,
    Test,
}

impl Mode {
    pub fn from_env() -> Self {
        match std::env::var(TEST_MODE_ENV) {
            Ok(v) if !v.is_empty() => Mode::Test,
            _ => Mode::Http,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Empty,
    Json(Value),
    /// A multipart upload with a single part named `file`.
    File { name: String, bytes: Vec<u8> },
}

/// A request to a path relative to the backend's base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Body,
    pub token: Option<String>,
}

impl Request {
    fn new(method: Method, path: impl Into<String>, body: Body) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body,
            token: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path, Body::Empty)
    }

    pub fn post(path: impl Into<String>, json: Value) -> Self {
        Self::new(Method::Post, path, Body::Json(json))
    }

    pub fn put(path: impl Into<String>, json: Value) -> Self {
        Self::new(Method::Put, path, Body::Json(json))
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path, Body::Empty)
    }

    pub fn upload(path: impl Into<String>, name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let body = Body::File {
            name: name.into(),
            bytes,
        };
        Self::new(Method::Post, path, body)
    }

    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    pub fn token(mut self, token: Option<&str>) -> Self {
        self.token = token.map(String::from);
        self
    }

    /// Looks up a query parameter by name.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// The status code and parsed JSON body of a response. A body that is not JSON is carried as a
/// JSON string.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: u16,
    pub body: Value,
}

impl Reply {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends requests to the backend. Transport failures are errors; HTTP error statuses are not, they
/// come back as a `Reply` for `Hospital` to interpret.
#[async_trait::async_trait]
pub trait Rest {
    async fn send(&mut self, request: Request) -> Result<Reply>;
}

/// The things that can be listed, shown, inserted, updated and deleted.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum Entity {
    Income,
    Spending,
    IncomeCategory,
    SpendingCategory,
    /// Line items of medicine spendings.
    Medicine,
    Unit,
    Company,
    Year,
    User,
}

serde_plain::derive_display_from_serialize!(Entity);
serde_plain::derive_fromstr_from_deserialize!(Entity);

impl Entity {
    /// The collection path on the backend.
    pub fn path(&self) -> &'static str {
        match self {
            Entity::Income => "/api/income",
            Entity::Spending => "/api/spending",
            Entity::IncomeCategory => "/api/categoryIncome",
            Entity::SpendingCategory => "/api/CategorySpending",
            Entity::Medicine => "/api/spendingMedicine",
            Entity::Unit => "/api/unitMedicine",
            Entity::Company => "/api/CompanyMedicine",
            Entity::Year => "/api/year",
            Entity::User => "/users",
        }
    }

    /// The path of a single record.
    pub fn item_path(&self, id: i64) -> String {
        format!("{}/{id}", self.path())
    }

    /// Entities only admins may see or change at all.
    pub fn is_admin_only(&self) -> bool {
        matches!(self, Entity::User)
    }

    /// Entities whose list endpoint is paginated.
    pub fn is_paged(&self) -> bool {
        matches!(
            self,
            Entity::Income | Entity::Spending | Entity::Medicine | Entity::User
        )
    }

    /// Singular and plural nouns for messages.
    pub fn noun(&self, count: usize) -> String {
        let (one, many) = match self {
            Entity::Income => ("income", "incomes"),
            Entity::Spending => ("spending", "spendings"),
            Entity::IncomeCategory => ("income category", "income categories"),
            Entity::SpendingCategory => ("spending category", "spending categories"),
            Entity::Medicine => ("medicine item", "medicine items"),
            Entity::Unit => ("unit", "units"),
            Entity::Company => ("company", "companies"),
            Entity::Year => ("year", "years"),
            Entity::User => ("user", "users"),
        };
        format!("{count} {}", if count == 1 { one } else { many })
    }
}

/// Builds a `Hospital` client for `mode`, with the session loaded from the token file.
pub async fn hospital(config: &Config, mode: Mode) -> Result<Hospital> {
    let session = Session::load(config.token_path()).await?;
    let rest: Box<dyn Rest + Send> = match mode {
        Mode::Http => Box::new(http::HttpRest::new(config.base_url().clone())?),
        Mode::Test => Box::new(TestRest::load(config.test_backend_path()).await?),
    };
    Ok(Hospital::new(
        rest,
        session,
        config.page_size(),
        config.session_days(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_names() {
        assert_eq!(Entity::IncomeCategory.to_string(), "income-category");
        assert_eq!("spending-category".parse::<Entity>().unwrap(), Entity::SpendingCategory);
        assert_eq!(Entity::Company.item_path(4), "/api/CompanyMedicine/4");
        assert_eq!(Entity::Company.noun(2), "2 companies");
        assert_eq!(Entity::Medicine.noun(1), "1 medicine item");
    }

    #[test]
    fn test_request_builder() {
        let r = Request::get("/api/income")
            .query("page", 2)
            .query("limit", 10)
            .token(Some("t"));
        assert_eq!(r.method, Method::Get);
        assert_eq!(r.param("page"), Some("2"));
        assert_eq!(r.param("search"), None);
        assert_eq!(r.token.as_deref(), Some("t"));
    }
}

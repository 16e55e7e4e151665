//! Implements the `Rest` trait with in-memory tables for testing purposes.
//!
//! Note: this is compiled even in the "production" version of this app so that we can run the whole
//! app, top-to-bottom, without a backend server. When a path is given the tables are saved there
//! after every change, so that separate runs of the program see the same data.

use crate::api::{Body, Method, Reply, Request, Rest};
use crate::excel::{self, ImportKind};
use crate::model::{
    validate_password, Category, Company, Income, IncomeForm, MedicineDetail, Role, Spending,
    SpendingForm, Unit, User, Year,
};
use crate::{utils, Result};
use anyhow::Context;
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

const DEFAULT_LIMIT: usize = 10;

/// The result of a route: the error side is also a reply, e.g. a 400 with a message.
type Handled<T = Reply> = std::result::Result<T, Reply>;

/// A backend that keeps its tables in memory. By default it is seeded with a small hospital's
/// data and two accounts, `admin` / `Admin123!` and `staff` / `Staff123!`.
pub struct TestRest {
    path: Option<PathBuf>,
    tables: Tables,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Tables {
    next_token: u64,
    tokens: BTreeMap<String, i64>,
    users: Vec<Account>,
    years: Vec<Year>,
    income_categories: Vec<Category>,
    spending_categories: Vec<Category>,
    incomes: Vec<Income>,
    spendings: Vec<Spending>,
    medicine: Vec<MedicineDetail>,
    units: Vec<Unit>,
    companies: Vec<Company>,
}

/// A user with the password the backend checks at login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Account {
    id: i64,
    name: String,
    username: String,
    password: String,
    role: Role,
    #[serde(default)]
    last_login: Option<String>,
}

impl Account {
    fn user(&self) -> User {
        User {
            id: self.id,
            name: self.name.clone(),
            username: self.username.clone(),
            role: self.role,
            last_login: self.last_login.clone(),
        }
    }
}

/// A stored row with a backend-assigned id.
trait Row: Clone + Serialize {
    fn id(&self) -> i64;
    fn set_id(&mut self, id: i64);
}

macro_rules! row {
    ($($t:ty),*) => {
        $(impl Row for $t {
            fn id(&self) -> i64 {
                self.id
            }

            fn set_id(&mut self, id: i64) {
                self.id = id;
            }
        })*
    };
}

row!(Account, Year, Category, Income, Spending, MedicineDetail, Unit, Company);

fn insert<T: Row>(rows: &mut Vec<T>, mut row: T) -> T {
    let id = rows.iter().map(Row::id).max().unwrap_or(0) + 1;
    row.set_id(id);
    rows.push(row.clone());
    row
}

fn position<T: Row>(rows: &[T], id: i64, what: &str) -> Handled<usize> {
    rows.iter()
        .position(|r| r.id() == id)
        .ok_or_else(|| not_found(format!("{what} {id} not found")))
}

fn replace<T: Row>(rows: &mut [T], id: i64, mut row: T, what: &str) -> Handled<T> {
    let ix = position(rows, id, what)?;
    row.set_id(id);
    rows[ix] = row.clone();
    Ok(row)
}

fn remove<T: Row>(rows: &mut Vec<T>, id: i64, what: &str) -> Handled<T> {
    let ix = position(rows, id, what)?;
    Ok(rows.remove(ix))
}

fn find<'a, T: Row>(rows: &'a [T], id: i64, what: &str) -> Handled<&'a T> {
    let ix = position(rows, id, what)?;
    Ok(&rows[ix])
}

fn message(status: u16, message: impl Into<String>) -> Reply {
    Reply::new(status, json!({ "message": message.into() }))
}

fn bad_request(m: impl Into<String>) -> Reply {
    message(400, m)
}

fn not_found(m: impl Into<String>) -> Reply {
    message(404, m)
}

fn data<T: Serialize>(value: T) -> Handled {
    let value = serde_json::to_value(value).map_err(|e| message(500, e.to_string()))?;
    Ok(Reply::new(200, json!({ "data": value })))
}

fn created<T: Serialize>(value: T) -> Handled {
    let value = serde_json::to_value(value).map_err(|e| message(500, e.to_string()))?;
    Ok(Reply::new(
        201,
        json!({ "message": "Data created", "data": value }),
    ))
}

fn deleted(what: &str, id: i64) -> Handled {
    Ok(message(200, format!("{what} {id} deleted")))
}

fn parse_id(s: &str) -> Handled<i64> {
    s.parse()
        .map_err(|_| bad_request(format!("'{s}' is not a valid id")))
}

fn body<T: DeserializeOwned>(request: &Request) -> Handled<T> {
    match &request.body {
        Body::Json(value) => serde_json::from_value(value.clone())
            .map_err(|e| bad_request(format!("Invalid request body: {e}"))),
        _ => Err(bad_request("A JSON body is required")),
    }
}

fn validated<T>(result: Result<T>) -> Handled<T> {
    result.map_err(|e| bad_request(format!("{e:#}")))
}

/// `rows` as one page of a `{data, page, limit, total}` response.
fn page<T: Serialize>(rows: Vec<T>, request: &Request) -> Handled {
    let number = |key: &str, default: usize| {
        request
            .param(key)
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(default)
    };
    let page = number("page", 1);
    let limit = number("limit", DEFAULT_LIMIT);
    let total = rows.len();
    let slice: Vec<T> = rows
        .into_iter()
        .skip((page - 1) * limit)
        .take(limit)
        .collect();
    let value = serde_json::to_value(slice).map_err(|e| message(500, e.to_string()))?;
    Ok(Reply::new(
        200,
        json!({ "data": value, "page": page, "limit": limit, "total": total }),
    ))
}

#[derive(Deserialize)]
struct NameForm {
    name: String,
}

impl NameForm {
    fn validate(&self) -> Handled<String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(bad_request("Name is required"));
        }
        Ok(name.to_string())
    }
}

#[derive(Deserialize)]
struct LoginBody {
    username: String,
    password: String,
}

#[derive(Deserialize)]
struct RegisterBody {
    name: String,
    username: String,
    password: String,
    #[serde(default)]
    role: Role,
}

#[derive(Deserialize)]
struct UserPatch {
    name: Option<String>,
    username: Option<String>,
    password: Option<String>,
    role: Option<Role>,
}

#[derive(Deserialize)]
struct YearBody {
    year: i32,
}

impl Default for TestRest {
    fn default() -> Self {
        Self {
            path: None,
            tables: seed_tables(),
        }
    }
}

impl TestRest {
    /// A seeded backend that is not saved anywhere.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the tables saved at `path`, or seeds and saves them if there are none.
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if path.is_file() {
            let tables = utils::deserialize(&path)
                .await
                .context("Unable to read the test backend data")?;
            return Ok(Self {
                path: Some(path),
                tables,
            });
        }
        let rest = Self {
            path: Some(path),
            tables: seed_tables(),
        };
        rest.save().await?;
        Ok(rest)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub async fn save(&self) -> Result<()> {
        if let Some(path) = &self.path {
            utils::serialize(path, &self.tables).await?;
        }
        Ok(())
    }

    /// Invalidates every issued token, as a backend restart or expiry would.
    pub fn expire_tokens(&mut self) {
        self.tables.tokens.clear();
    }

    fn user_for(&self, request: &Request) -> Option<User> {
        let token = request.token.as_deref()?;
        let id = self.tables.tokens.get(token)?;
        self.tables
            .users
            .iter()
            .find(|u| u.id == *id)
            .map(Account::user)
    }

    fn route(&mut self, request: &Request) -> Handled {
        let segments: Vec<&str> = request
            .path
            .trim_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        if let (Method::Post, ["login"]) = (request.method, segments.as_slice()) {
            return self.login(request);
        }
        let user = self
            .user_for(request)
            .ok_or_else(|| message(401, "Unauthorized"))?;
        let admin = || -> Handled<()> {
            if user.role.is_admin() {
                Ok(())
            } else {
                Err(message(403, "Only admins can do this"))
            }
        };

        let t = &mut self.tables;
        use Method::{Delete, Get, Post, Put};
        match (request.method, segments.as_slice()) {
            (Get, ["me"]) => data(&user),
            (Post, ["register"]) => {
                admin()?;
                register(t, body(request)?)
            }
            (Get, ["users"]) => {
                admin()?;
                page(t.users.iter().map(Account::user).collect::<Vec<_>>(), request)
            }
            (Put, ["users", id]) => {
                admin()?;
                update_user(t, parse_id(id)?, body(request)?)
            }
            (Delete, ["users", id]) => {
                admin()?;
                let id = parse_id(id)?;
                if id == user.id {
                    return Err(bad_request("You cannot delete your own account"));
                }
                remove(&mut t.users, id, "User")?;
                t.tokens.retain(|_, user_id| *user_id != id);
                deleted("User", id)
            }

            (Get, ["api", "year"]) => {
                let mut years = t.years.clone();
                years.sort_by_key(|y| y.year);
                data(years)
            }
            (Post, ["api", "year"]) => {
                let YearBody { year } = body(request)?;
                if t.years.iter().any(|y| y.year == year) {
                    return Err(bad_request(format!("Year {year} already exists")));
                }
                created(insert(&mut t.years, Year { id: 0, year }))
            }
            (Put, ["api", "year", id]) => {
                let YearBody { year } = body(request)?;
                data(replace(&mut t.years, parse_id(id)?, Year { id: 0, year }, "Year")?)
            }
            (Delete, ["api", "year", id]) => {
                let id = parse_id(id)?;
                remove(&mut t.years, id, "Year")?;
                deleted("Year", id)
            }

            (Get, ["api", "income"]) => {
                let mut rows = t.incomes.clone();
                rows.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
                page(rows, request)
            }
            (Post, ["api", "income"]) => {
                let form: IncomeForm = body(request)?;
                created(create_income(t, form)?)
            }
            (Get, ["api", "income", year]) => {
                let year: i32 = year
                    .parse()
                    .map_err(|_| bad_request(format!("'{year}' is not a year")))?;
                data(for_year(&t.incomes, year, |r| r.date))
            }
            (Put, ["api", "income", id]) => {
                let form: IncomeForm = body(request)?;
                validated(form.validate())?;
                check_category(&t.income_categories, form.category_id)?;
                let income = income_from(form);
                data(replace(&mut t.incomes, parse_id(id)?, income, "Income")?)
            }
            (Delete, ["api", "income", id]) => {
                let id = parse_id(id)?;
                remove(&mut t.incomes, id, "Income")?;
                deleted("Income", id)
            }
            (Get, ["api", "detailIncome", id]) => data(find(&t.incomes, parse_id(id)?, "Income")?),

            (Get, ["api", "spending"]) => {
                let mut rows = t.spendings.clone();
                rows.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
                page(rows, request)
            }
            (Post, ["api", "spending"]) => {
                let form: SpendingForm = body(request)?;
                created(create_spending(t, form)?)
            }
            (Get, ["api", "spending", year]) => {
                let year: i32 = year
                    .parse()
                    .map_err(|_| bad_request(format!("'{year}' is not a year")))?;
                data(for_year(&t.spendings, year, |r| r.date))
            }
            (Put, ["api", "spending", id]) => {
                let form: SpendingForm = body(request)?;
                validated(form.validate())?;
                check_category(&t.spending_categories, form.category_id)?;
                let spending = spending_from(form);
                data(replace(&mut t.spendings, parse_id(id)?, spending, "Spending")?)
            }
            (Delete, ["api", "spending", id]) => {
                let id = parse_id(id)?;
                remove(&mut t.spendings, id, "Spending")?;
                t.medicine.retain(|m| m.spending_id != id);
                deleted("Spending", id)
            }
            (Get, ["api", "detailSpending", id]) => {
                data(find(&t.spendings, parse_id(id)?, "Spending")?)
            }

            (Get, ["api", "categoryIncome"]) => data(&t.income_categories),
            (Post, ["api", "categoryIncome"]) => {
                let name = body::<NameForm>(request)?.validate()?;
                created(insert(&mut t.income_categories, Category::new(0, name)))
            }
            (Put, ["api", "categoryIncome", id]) => {
                let name = body::<NameForm>(request)?.validate()?;
                let category = Category::new(0, name);
                data(replace(&mut t.income_categories, parse_id(id)?, category, "Category")?)
            }
            (Delete, ["api", "categoryIncome", id]) => {
                let id = parse_id(id)?;
                if t.incomes.iter().any(|r| r.category_id == id) {
                    return Err(bad_request(format!("Category {id} is still used by incomes")));
                }
                remove(&mut t.income_categories, id, "Category")?;
                deleted("Category", id)
            }

            (Get, ["api", "CategorySpending"]) => data(&t.spending_categories),
            (Post, ["api", "CategorySpending"]) => {
                let name = body::<NameForm>(request)?.validate()?;
                created(insert(&mut t.spending_categories, Category::new(0, name)))
            }
            (Put, ["api", "CategorySpending", id]) => {
                let name = body::<NameForm>(request)?.validate()?;
                let category = Category::new(0, name);
                data(replace(&mut t.spending_categories, parse_id(id)?, category, "Category")?)
            }
            (Delete, ["api", "CategorySpending", id]) => {
                let id = parse_id(id)?;
                if t.spendings.iter().any(|r| r.category_id == id) {
                    return Err(bad_request(format!("Category {id} is still used by spendings")));
                }
                remove(&mut t.spending_categories, id, "Category")?;
                deleted("Category", id)
            }

            (Get, ["api", "spendingMedicine"]) => page(t.medicine.clone(), request),
            (Post, ["api", "spendingMedicine"]) => {
                let item: MedicineDetail = body(request)?;
                created(create_medicine(t, item)?)
            }
            (Put, ["api", "spendingMedicine", id]) => {
                let item: MedicineDetail = body(request)?;
                validated(item.validate())?;
                find(&t.spendings, item.spending_id, "Spending")?;
                data(replace(&mut t.medicine, parse_id(id)?, item, "Medicine item")?)
            }
            (Delete, ["api", "spendingMedicine", id]) => {
                let id = parse_id(id)?;
                remove(&mut t.medicine, id, "Medicine item")?;
                deleted("Medicine item", id)
            }
            (Get, ["api", "spendingMedicineBySpendingId", id]) => {
                let id = parse_id(id)?;
                find(&t.spendings, id, "Spending")?;
                let items: Vec<&MedicineDetail> =
                    t.medicine.iter().filter(|m| m.spending_id == id).collect();
                data(items)
            }

            (Get, ["api", "unitMedicine"]) => data(&t.units),
            (Post, ["api", "unitMedicine"]) => {
                let name = body::<NameForm>(request)?.validate()?;
                created(insert(&mut t.units, Unit { id: 0, name }))
            }
            (Put, ["api", "unitMedicine", id]) => {
                let name = body::<NameForm>(request)?.validate()?;
                data(replace(&mut t.units, parse_id(id)?, Unit { id: 0, name }, "Unit")?)
            }
            (Delete, ["api", "unitMedicine", id]) => {
                let id = parse_id(id)?;
                remove(&mut t.units, id, "Unit")?;
                deleted("Unit", id)
            }

            (Get, ["api", "CompanyMedicine"]) => data(&t.companies),
            (Post, ["api", "CompanyMedicine"]) => {
                let name = body::<NameForm>(request)?.validate()?;
                created(insert(&mut t.companies, Company { id: 0, name }))
            }
            (Put, ["api", "CompanyMedicine", id]) => {
                let name = body::<NameForm>(request)?.validate()?;
                let company = Company { id: 0, name };
                data(replace(&mut t.companies, parse_id(id)?, company, "Company")?)
            }
            (Delete, ["api", "CompanyMedicine", id]) => {
                let id = parse_id(id)?;
                if t.spendings.iter().any(|s| s.company_id == Some(id)) {
                    return Err(bad_request(format!("Company {id} is still used by spendings")));
                }
                remove(&mut t.companies, id, "Company")?;
                deleted("Company", id)
            }

            (Post, ["api", "uploadIncomeExcel"]) => upload(t, request, ImportKind::Income),
            (Post, ["api", "uploadSpendingExcelGeneral"]) => {
                upload(t, request, ImportKind::Spending)
            }
            (Post, ["api", "uploadSpendingExcelObat"]) => upload(t, request, ImportKind::Medicine),

            (method, _) => Err(not_found(format!(
                "Cannot {method:?} {}",
                request.path
            ))),
        }
    }

    fn login(&mut self, request: &Request) -> Handled {
        let LoginBody { username, password } = body(request)?;
        let t = &mut self.tables;
        let account = t
            .users
            .iter_mut()
            .find(|u| u.username == username && u.password == password)
            .ok_or_else(|| bad_request("Invalid username or password"))?;
        account.last_login = Some(Utc::now().to_rfc3339());
        let user_id = account.id;
        t.next_token += 1;
        let token = format!("test-token-{}-{username}", t.next_token);
        t.tokens.insert(token.clone(), user_id);
        Ok(Reply::new(
            200,
            json!({ "message": "Login successful", "token": token }),
        ))
    }
}

#[async_trait::async_trait]
impl Rest for TestRest {
    async fn send(&mut self, request: Request) -> Result<Reply> {
        trace!("{:?} {}", request.method, request.path);
        let reply = match self.route(&request) {
            Ok(reply) => reply,
            Err(reply) => reply,
        };
        if request.method != Method::Get && reply.is_success() {
            self.save().await?;
        }
        debug!("{:?} {} -> {}", request.method, request.path, reply.status);
        Ok(reply)
    }
}

fn for_year<T: Clone>(rows: &[T], year: i32, date: impl Fn(&T) -> chrono::NaiveDate) -> Vec<T> {
    use chrono::Datelike;
    rows.iter()
        .filter(|r| date(r).year() == year)
        .cloned()
        .collect()
}

fn check_category(categories: &[Category], id: i64) -> Handled<()> {
    if categories.iter().any(|c| c.id == id) {
        Ok(())
    } else {
        Err(bad_request(format!("Category {id} does not exist")))
    }
}

fn income_from(form: IncomeForm) -> Income {
    Income {
        id: 0,
        name: form.name,
        amount: form.amount,
        category_id: form.category_id,
        date: form.date,
    }
}

fn spending_from(form: SpendingForm) -> Spending {
    Spending {
        id: 0,
        name: form.name,
        amount: form.amount,
        category_id: form.category_id,
        date: form.date,
        company_id: form.company_id,
    }
}

fn create_income(t: &mut Tables, form: IncomeForm) -> Handled<Income> {
    validated(form.validate())?;
    check_category(&t.income_categories, form.category_id)?;
    Ok(insert(&mut t.incomes, income_from(form)))
}

fn create_spending(t: &mut Tables, form: SpendingForm) -> Handled<Spending> {
    validated(form.validate())?;
    check_category(&t.spending_categories, form.category_id)?;
    if let Some(company_id) = form.company_id {
        find(&t.companies, company_id, "Company")?;
    }
    Ok(insert(&mut t.spendings, spending_from(form)))
}

fn create_medicine(t: &mut Tables, item: MedicineDetail) -> Handled<MedicineDetail> {
    validated(item.validate())?;
    find(&t.spendings, item.spending_id, "Spending")?;
    Ok(insert(&mut t.medicine, item))
}

fn register(t: &mut Tables, form: RegisterBody) -> Handled {
    if form.name.trim().is_empty() || form.username.trim().is_empty() {
        return Err(bad_request("Name and username are required"));
    }
    validated(validate_password(&form.password))?;
    if t.users.iter().any(|u| u.username == form.username) {
        return Err(bad_request(format!(
            "Username '{}' is already taken",
            form.username
        )));
    }
    let account = insert(
        &mut t.users,
        Account {
            id: 0,
            name: form.name,
            username: form.username,
            password: form.password,
            role: form.role,
            last_login: None,
        },
    );
    created(account.user())
}

fn update_user(t: &mut Tables, id: i64, patch: UserPatch) -> Handled {
    if let Some(username) = &patch.username {
        if t.users.iter().any(|u| &u.username == username && u.id != id) {
            return Err(bad_request(format!("Username '{username}' is already taken")));
        }
    }
    if let Some(password) = &patch.password {
        validated(validate_password(password))?;
    }
    let ix = position(&t.users, id, "User")?;
    let account = &mut t.users[ix];
    if let Some(name) = patch.name {
        account.name = name;
    }
    if let Some(username) = patch.username {
        account.username = username;
    }
    if let Some(password) = patch.password {
        account.password = password;
    }
    if let Some(role) = patch.role {
        account.role = role;
    }
    data(account.user())
}

fn upload(t: &mut Tables, request: &Request, kind: ImportKind) -> Handled {
    let Body::File { bytes, .. } = &request.body else {
        return Err(bad_request("No file was uploaded"));
    };
    let preview = excel::preview(bytes.clone(), kind, true)
        .map_err(|e| bad_request(format!("Unable to read the workbook: {e:#}")))?;
    if !preview.missing.is_empty() {
        let missing: Vec<String> = preview.missing.iter().map(|f| f.to_string()).collect();
        return Err(bad_request(format!(
            "Missing columns: {}",
            missing.join(", ")
        )));
    }
    if let Some(row) = preview.rows.iter().find(|r| !r.is_clean()) {
        return Err(bad_request(format!(
            "Row {}: {}",
            row.line,
            row.problems.join(", ")
        )));
    }

    // Validate everything before inserting anything.
    let mut staged = t.clone();
    let count = match kind {
        ImportKind::Income => {
            for row in &preview.rows {
                let form = validated(row.income_form())?;
                create_income(&mut staged, form)?;
            }
            preview.rows.len()
        }
        ImportKind::Spending => {
            for row in &preview.rows {
                let form = validated(row.spending_form())?;
                create_spending(&mut staged, form)?;
            }
            preview.rows.len()
        }
        ImportKind::Medicine => {
            let purchases = validated(preview.medicine_purchases())?;
            for (form, items) in &purchases {
                let spending = create_spending(&mut staged, form.clone())?;
                for item in items {
                    let mut item = item.clone();
                    item.spending_id = spending.id;
                    create_medicine(&mut staged, item)?;
                }
            }
            purchases.len()
        }
    };
    *t = staged;
    Ok(message(
        200,
        format!(
            "Imported {count} {}",
            match (kind, count) {
                (ImportKind::Income, 1) => "income",
                (ImportKind::Income, _) => "incomes",
                (_, 1) => "spending",
                (_, _) => "spendings",
            }
        ),
    ))
}

/// Reads rows of `T` from a CSV-formatted string.
fn load_csv<T: DeserializeOwned>(csv_data: &str) -> Result<Vec<T>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(csv_data.as_bytes());
    let mut rows = Vec::new();
    for result in rdr.deserialize() {
        rows.push(result.context("Invalid seed data")?);
    }
    Ok(rows)
}

/// Provides the seed data from this module. A failure here is a bug in the constants below, and
/// leaves that table empty.
fn seed_tables() -> Tables {
    fn seed<T: DeserializeOwned>(name: &str, csv_data: &str) -> Vec<T> {
        load_csv(csv_data).unwrap_or_else(|e| {
            tracing::error!("Unable to load the seed {name}: {e:#}");
            Vec::new()
        })
    }
    Tables {
        next_token: 0,
        tokens: BTreeMap::new(),
        users: seed("users", USER_DATA),
        years: seed("years", YEAR_DATA),
        income_categories: seed("income categories", INCOME_CATEGORY_DATA),
        spending_categories: seed("spending categories", SPENDING_CATEGORY_DATA),
        incomes: seed("incomes", INCOME_DATA),
        spendings: seed("spendings", SPENDING_DATA),
        medicine: seed("medicine", MEDICINE_DATA),
        units: seed("units", UNIT_DATA),
        companies: seed("companies", COMPANY_DATA),
    }
}

/// Seed accounts.
const USER_DATA: &str = r##"id,name,username,password,role,last_login
1,Administrator,admin,Admin123!,admin,
2,Staf Keuangan,staff,Staff123!,user,
"##;

/// Seed years.
const YEAR_DATA: &str = r##"id,year
1,2023
2,2024
"##;

/// Seed income categories.
const INCOME_CATEGORY_DATA: &str = r##"id,name
1,Klaim BPJS
2,Pasien Umum
3,Asuransi Swasta
4,Sewa Kantin
"##;

/// Seed spending categories. Category 9 holds the medicine purchases.
const SPENDING_CATEGORY_DATA: &str = r##"id,name
1,Gaji Pegawai
2,Listrik dan Air
3,Pemeliharaan Gedung
4,Alat Kesehatan
9,Obat
"##;

/// Seed income data.
const INCOME_DATA: &str = r##"id,name,amount,category_id,date
1,Klaim BPJS Januari,150000000,1,2024-01-31
2,Pasien Umum Januari,42500000,2,2024-01-31
3,Klaim BPJS Februari,138000000,1,2024-02-29
4,Asuransi Allianz,12750000,3,2024-02-15
5,Pasien Umum Maret,39800000,2,2024-03-31
6,Sewa Kantin Semester 1,6000000,4,2024-04-01
7,Klaim BPJS Juli,161250000,1,2024-07-31
8,Pasien Umum Agustus,44100000,2,2024-08-31
9,Klaim BPJS Desember,158000000,1,2024-12-31
10,Klaim BPJS Desember,149500000,1,2023-12-31
11,Pasien Umum November,40250000,2,2023-11-30
12,Sewa Kantin Semester 2,6000000,4,2024-10-01
"##;

/// Seed spending data. Spending 4 is a medicine purchase whose amount is the total of its items.
const SPENDING_DATA: &str = r##"id,name,amount,category_id,date,company_id
1,Gaji Januari,120000000,1,2024-01-25,
2,Listrik Januari,18500000,2,2024-01-10,
3,Perbaikan Atap,9750000,3,2024-02-20,
4,Obat Februari,177500,9,2024-02-10,1
5,Gaji Juli,125000000,1,2024-07-25,
6,Listrik Agustus,21000000,2,2024-08-10,
7,Gaji Desember,118000000,1,2023-12-22,
"##;

/// Seed medicine line items.
const MEDICINE_DATA: &str = r##"id,spending_id,name,quantity,unit,price_per_item
1,4,Paracetamol 500mg,10,strip,5000
2,4,Amoxicillin 500mg,3,box,42500
"##;

/// Seed medicine units.
const UNIT_DATA: &str = r##"id,name
1,box
2,strip
3,botol
4,tube
"##;

/// Seed medicine suppliers.
const COMPANY_DATA: &str = r##"id,name
1,PT Kimia Farma
2,PT Kalbe Farma
3,PT Enseval Putera Megatrading
"##;

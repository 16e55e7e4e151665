//! These structs provide the CLI interface for the hfin CLI.

use crate::api::Entity;
use crate::excel::ImportKind;
use crate::model::{Amount, MedicineDetail, Role};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// hfin: A command-line client for a hospital's income and spending ledger.
///
/// The ledger lives on a REST backend. This program logs in to it, lists and edits its records,
/// imports and exports Excel workbooks, and computes the monthly, semester and yearly totals that
/// the dashboard charts show.
///
/// Start with `hfin init --base-url <url>` and then `hfin login`.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the data directory and the configuration file.
    ///
    /// This is the first command you should run. Pass the address of the ledger backend as
    /// --base-url. The data directory is $HFIN_HOME, or ~/hfin by default.
    Init(InitArgs),
    /// Log in to the backend and store the session token.
    Login(LoginArgs),
    /// Forget the stored session token.
    Logout,
    /// Show the logged in user.
    Whoami,
    /// Create a new account (admins only).
    Register(RegisterArgs),
    /// List the records of an entity.
    List(ListArgs),
    /// Show a single record.
    Show(ShowArgs),
    /// Create a record.
    Insert(InsertArgs),
    /// Change a record. Only the fields you pass are changed.
    Update(UpdateArgs),
    /// Delete a record (admins only).
    Delete(DeleteArgs),
    /// Print monthly, semester and yearly totals.
    Report(ReportArgs),
    /// Preview an Excel workbook and upload it to the backend.
    Import(ImportArgs),
    /// Write an example workbook to fill in for import.
    Template(TemplateArgs),
    /// Write a year of income or spending to an Excel workbook.
    Export(ExportArgs),
    /// Show or change the navigation menu.
    Menu(MenuArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG. See the tracing-subscriber crate for instructions.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where hfin configuration and the session are held. Defaults to ~/hfin
    #[arg(long, env = "HFIN_HOME", default_value_t = default_hfin_home())]
    hfin_home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, hfin_home: PathBuf) -> Self {
        Self {
            log_level,
            hfin_home: hfin_home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn hfin_home(&self) -> &DisplayPath {
        &self.hfin_home
    }
}

/// (Not shown): Args for the `hfin init` command.
#[derive(Debug, Parser, Clone)]
pub struct InitArgs {
    /// The address of the ledger backend, e.g. https://keuangan.example.org
    #[arg(long)]
    base_url: String,

    /// How many days a login lasts. Defaults to 1.
    #[arg(long)]
    session_days: Option<u32>,

    /// How many rows a page of a list holds. Defaults to 10.
    #[arg(long)]
    page_size: Option<u32>,
}

impl InitArgs {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            session_days: None,
            page_size: None,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session_days(&self) -> Option<u32> {
        self.session_days
    }

    pub fn page_size(&self) -> Option<u32> {
        self.page_size
    }
}

/// (Not shown): Args for the `hfin login` command.
#[derive(Debug, Parser, Clone)]
pub struct LoginArgs {
    #[arg(long)]
    username: String,

    /// The password. Prefer HFIN_PASSWORD so it does not end up in your shell history.
    #[arg(long, env = "HFIN_PASSWORD", hide_env_values = true)]
    password: String,
}

impl LoginArgs {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

/// (Not shown): Args for the `hfin register` command.
#[derive(Debug, Parser, Clone)]
pub struct RegisterArgs {
    /// The person's full name.
    #[arg(long)]
    name: String,

    #[arg(long)]
    username: String,

    /// At least 8 characters with an uppercase letter, a lowercase letter, a digit and a symbol.
    #[arg(long, env = "HFIN_NEW_PASSWORD", hide_env_values = true)]
    password: String,

    #[arg(long, value_enum, default_value_t = Role::User)]
    role: Role,
}

impl RegisterArgs {
    pub fn new(
        name: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            name: name.into(),
            username: username.into(),
            password: password.into(),
            role,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn role(&self) -> Role {
        self.role
    }
}

/// How lists are printed.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// A markdown table.
    #[default]
    Table,
    Json,
    Csv,
}

serde_plain::derive_display_from_serialize!(OutputFormat);
serde_plain::derive_fromstr_from_deserialize!(OutputFormat);

/// (Not shown): Args for the `hfin list` command.
#[derive(Debug, Parser, Clone)]
pub struct ListArgs {
    entity: Entity,

    /// The page to show, starting at 1.
    #[arg(long, default_value_t = 1)]
    page: u32,

    /// Rows per page. Defaults to the page_size in config.json.
    #[arg(long)]
    limit: Option<u32>,

    /// Fetch every page.
    #[arg(long)]
    all: bool,

    /// Only show records whose name contains this text (case-insensitive).
    #[arg(long)]
    search: Option<String>,

    /// Only show income or spending rows dated in this year.
    #[arg(long)]
    year: Option<i32>,

    /// Only show the line items of this medicine spending.
    #[arg(long)]
    spending_id: Option<i64>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

impl ListArgs {
    pub fn new(entity: Entity) -> Self {
        Self {
            entity,
            page: 1,
            limit: None,
            all: false,
            search: None,
            year: None,
            spending_id: None,
            format: OutputFormat::Table,
        }
    }

    pub fn with_page(mut self, page: u32, limit: Option<u32>) -> Self {
        self.page = page;
        self.limit = limit;
        self
    }

    pub fn with_all(mut self) -> Self {
        self.all = true;
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_spending_id(mut self, spending_id: i64) -> Self {
        self.spending_id = Some(spending_id);
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn entity(&self) -> Entity {
        self.entity
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> Option<u32> {
        self.limit
    }

    pub fn all(&self) -> bool {
        self.all
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn year(&self) -> Option<i32> {
        self.year
    }

    pub fn spending_id(&self) -> Option<i64> {
        self.spending_id
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }
}

/// (Not shown): Args for the `hfin show` command.
#[derive(Debug, Parser, Clone)]
pub struct ShowArgs {
    entity: Entity,
    id: i64,
}

impl ShowArgs {
    pub fn new(entity: Entity, id: i64) -> Self {
        Self { entity, id }
    }

    pub fn entity(&self) -> Entity {
        self.entity
    }

    pub fn id(&self) -> i64 {
        self.id
    }
}

/// The fields of an income or spending record. On insert, name, date and category id are
/// required, and so is the amount unless the spending is a medicine purchase.
#[derive(Debug, Default, Parser, Clone)]
pub struct RecordArgs {
    #[arg(long)]
    name: Option<String>,

    /// The amount, plain or currency-formatted, e.g. 1500000 or "Rp 1.500.000".
    #[arg(long)]
    amount: Option<Amount>,

    #[arg(long)]
    category_id: Option<i64>,

    /// YYYY-MM-DD
    #[arg(long)]
    date: Option<NaiveDate>,

    /// The supplier of a medicine purchase.
    #[arg(long)]
    company_id: Option<i64>,

    /// A medicine line item as name:quantity:unit:price. Repeat for more items. The spending's
    /// amount is the total of its items.
    #[arg(long = "item")]
    items: Vec<MedicineDetail>,
}

impl RecordArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_amount(mut self, amount: Amount) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn with_category_id(mut self, category_id: i64) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_company_id(mut self, company_id: i64) -> Self {
        self.company_id = Some(company_id);
        self
    }

    pub fn with_item(mut self, item: MedicineDetail) -> Self {
        self.items.push(item);
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn amount(&self) -> Option<Amount> {
        self.amount
    }

    pub fn category_id(&self) -> Option<i64> {
        self.category_id
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn company_id(&self) -> Option<i64> {
        self.company_id
    }

    pub fn items(&self) -> &[MedicineDetail] {
        &self.items
    }
}

/// The fields of a medicine line item.
#[derive(Debug, Default, Parser, Clone)]
pub struct MedicineArgs {
    /// The medicine spending the item belongs to.
    #[arg(long)]
    spending_id: Option<i64>,

    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    quantity: Option<i64>,

    #[arg(long)]
    unit: Option<String>,

    /// The price of one unit, plain or currency-formatted.
    #[arg(long)]
    price: Option<Amount>,
}

impl MedicineArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(mut self, spending_id: i64, item: &MedicineDetail) -> Self {
        self.spending_id = Some(spending_id);
        self.name = Some(item.name.clone());
        self.quantity = Some(item.quantity);
        self.unit = Some(item.unit.clone());
        self.price = Some(item.price_per_item);
        self
    }

    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn spending_id(&self) -> Option<i64> {
        self.spending_id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn quantity(&self) -> Option<i64> {
        self.quantity
    }

    pub fn unit(&self) -> Option<&str> {
        self.unit.as_deref()
    }

    pub fn price(&self) -> Option<Amount> {
        self.price
    }
}

/// (Not shown): Args for records that are only a name: categories, units and companies.
#[derive(Debug, Parser, Clone)]
pub struct NameArgs {
    #[arg(long)]
    name: String,
}

impl NameArgs {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// (Not shown): Args for a year.
#[derive(Debug, Parser, Clone)]
pub struct YearArgs {
    #[arg(long)]
    year: i32,
}

impl YearArgs {
    pub fn new(year: i32) -> Self {
        Self { year }
    }

    pub fn year(&self) -> i32 {
        self.year
    }
}

/// (Not shown): Args for the `hfin insert` command.
#[derive(Debug, Parser, Clone)]
pub struct InsertArgs {
    #[command(subcommand)]
    entity: InsertSubcommand,
}

impl InsertArgs {
    pub fn new(entity: InsertSubcommand) -> Self {
        Self { entity }
    }

    pub fn entity(&self) -> &InsertSubcommand {
        &self.entity
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum InsertSubcommand {
    /// Record an income.
    Income(RecordArgs),
    /// Record a spending. Medicine purchases take --item instead of --amount.
    Spending(RecordArgs),
    /// Add a line item to a medicine spending.
    Medicine(MedicineArgs),
    IncomeCategory(NameArgs),
    SpendingCategory(NameArgs),
    Unit(NameArgs),
    Company(NameArgs),
    Year(YearArgs),
}

/// (Not shown): Args for the `hfin update` command.
#[derive(Debug, Parser, Clone)]
pub struct UpdateArgs {
    #[command(subcommand)]
    entity: UpdateSubcommand,
}

impl UpdateArgs {
    pub fn new(entity: UpdateSubcommand) -> Self {
        Self { entity }
    }

    pub fn entity(&self) -> &UpdateSubcommand {
        &self.entity
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum UpdateSubcommand {
    Income(UpdateRecordArgs),
    Spending(UpdateRecordArgs),
    Medicine(UpdateMedicineArgs),
    IncomeCategory(UpdateNameArgs),
    SpendingCategory(UpdateNameArgs),
    Unit(UpdateNameArgs),
    Company(UpdateNameArgs),
    Year(UpdateYearArgs),
    /// Change an account (admins only).
    User(UpdateUserArgs),
}

/// (Not shown): Args for updating an income or spending record.
#[derive(Debug, Parser, Clone)]
pub struct UpdateRecordArgs {
    id: i64,

    #[command(flatten)]
    fields: RecordArgs,
}

impl UpdateRecordArgs {
    pub fn new(id: i64, fields: RecordArgs) -> Self {
        Self { id, fields }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn fields(&self) -> &RecordArgs {
        &self.fields
    }
}

/// (Not shown): Args for updating a medicine line item.
#[derive(Debug, Parser, Clone)]
pub struct UpdateMedicineArgs {
    id: i64,

    #[command(flatten)]
    fields: MedicineArgs,
}

impl UpdateMedicineArgs {
    pub fn new(id: i64, fields: MedicineArgs) -> Self {
        Self { id, fields }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn fields(&self) -> &MedicineArgs {
        &self.fields
    }
}

/// (Not shown): Args for renaming a category, unit or company.
#[derive(Debug, Parser, Clone)]
pub struct UpdateNameArgs {
    id: i64,

    #[command(flatten)]
    fields: NameArgs,
}

impl UpdateNameArgs {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            fields: NameArgs::new(name),
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        self.fields.name()
    }
}

/// (Not shown): Args for changing a year.
#[derive(Debug, Parser, Clone)]
pub struct UpdateYearArgs {
    id: i64,

    #[command(flatten)]
    fields: YearArgs,
}

impl UpdateYearArgs {
    pub fn new(id: i64, year: i32) -> Self {
        Self {
            id,
            fields: YearArgs::new(year),
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn year(&self) -> i32 {
        self.fields.year()
    }
}

/// (Not shown): Args for changing an account.
#[derive(Debug, Default, Parser, Clone)]
pub struct UpdateUserArgs {
    id: i64,

    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    username: Option<String>,

    #[arg(long, env = "HFIN_NEW_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    #[arg(long, value_enum)]
    role: Option<Role>,
}

impl UpdateUserArgs {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }
}

/// (Not shown): Args for the `hfin delete` command.
#[derive(Debug, Parser, Clone)]
pub struct DeleteArgs {
    entity: Entity,
    id: i64,

    /// Confirm the deletion. Nothing is deleted without it.
    #[arg(long)]
    yes: bool,

    /// The spending a medicine line item belongs to. Looked up when not given.
    #[arg(long)]
    spending_id: Option<i64>,
}

impl DeleteArgs {
    pub fn new(entity: Entity, id: i64, yes: bool) -> Self {
        Self {
            entity,
            id,
            yes,
            spending_id: None,
        }
    }

    pub fn entity(&self) -> Entity {
        self.entity
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn yes(&self) -> bool {
        self.yes
    }

    pub fn spending_id(&self) -> Option<i64> {
        self.spending_id
    }
}

/// Which totals `hfin report` prints.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Income,
    Spending,
    /// Income against spending, with the surplus or deficit.
    #[default]
    Mixture,
}

serde_plain::derive_display_from_serialize!(ReportKind);
serde_plain::derive_fromstr_from_deserialize!(ReportKind);

/// (Not shown): Args for the `hfin report` command.
#[derive(Debug, Parser, Clone)]
pub struct ReportArgs {
    kind: ReportKind,

    /// The year to report on.
    #[arg(long)]
    year: i32,

    /// Break a single month (1-12) down by category.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    month: Option<u32>,
}

impl ReportArgs {
    pub fn new(kind: ReportKind, year: i32) -> Self {
        Self {
            kind,
            year,
            month: None,
        }
    }

    pub fn with_month(mut self, month: u32) -> Self {
        self.month = Some(month);
        self
    }

    pub fn kind(&self) -> ReportKind {
        self.kind
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> Option<u32> {
        self.month
    }
}

/// (Not shown): Args for the `hfin import` command.
#[derive(Debug, Parser, Clone)]
pub struct ImportArgs {
    kind: ImportKind,

    /// The .xlsx file to import.
    file: PathBuf,

    /// Only show how the workbook would be read, do not upload it.
    #[arg(long)]
    dry_run: bool,

    /// Read money columns as plain numbers instead of stripping currency formatting.
    #[arg(long)]
    no_strip_currency: bool,
}

impl ImportArgs {
    pub fn new(kind: ImportKind, file: impl Into<PathBuf>, dry_run: bool) -> Self {
        Self {
            kind,
            file: file.into(),
            dry_run,
            no_strip_currency: false,
        }
    }

    pub fn kind(&self) -> ImportKind {
        self.kind
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn strip_currency(&self) -> bool {
        !self.no_strip_currency
    }
}

/// (Not shown): Args for the `hfin template` command.
#[derive(Debug, Parser, Clone)]
pub struct TemplateArgs {
    kind: ImportKind,

    /// Where to write the workbook. Defaults to template_<kind>.xlsx in the current directory.
    #[arg(long)]
    out: Option<PathBuf>,
}

impl TemplateArgs {
    pub fn new(kind: ImportKind, out: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            out: Some(out.into()),
        }
    }

    pub fn kind(&self) -> ImportKind {
        self.kind
    }

    pub fn out(&self) -> PathBuf {
        self.out
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("template_{}.xlsx", self.kind)))
    }
}

/// The sides of the ledger that can be exported.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ExportKind {
    Income,
    Spending,
}

serde_plain::derive_display_from_serialize!(ExportKind);
serde_plain::derive_fromstr_from_deserialize!(ExportKind);

/// (Not shown): Args for the `hfin export` command.
#[derive(Debug, Parser, Clone)]
pub struct ExportArgs {
    kind: ExportKind,

    #[arg(long)]
    year: i32,

    /// Where to write the workbook. Defaults to <kind>_<year>.xlsx in the current directory.
    #[arg(long)]
    out: Option<PathBuf>,
}

impl ExportArgs {
    pub fn new(kind: ExportKind, year: i32, out: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            year,
            out: Some(out.into()),
        }
    }

    pub fn kind(&self) -> ExportKind {
        self.kind
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn out(&self) -> PathBuf {
        self.out
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("{}_{}.xlsx", self.kind, self.year)))
    }
}

/// (Not shown): Args for the `hfin menu` command. With no flags the menu is only printed.
#[derive(Debug, Default, Parser, Clone)]
pub struct MenuArgs {
    /// Open or close a submenu, e.g. "spending.medicine".
    #[arg(long)]
    toggle: Option<String>,

    /// Go to a page, e.g. "income.chart".
    #[arg(long)]
    select: Option<String>,

    /// Close every submenu.
    #[arg(long)]
    close_all: bool,
}

impl MenuArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_toggle(mut self, key: impl Into<String>) -> Self {
        self.toggle = Some(key.into());
        self
    }

    pub fn with_select(mut self, key: impl Into<String>) -> Self {
        self.select = Some(key.into());
        self
    }

    pub fn with_close_all(mut self) -> Self {
        self.close_all = true;
        self
    }

    pub fn toggle(&self) -> Option<&str> {
        self.toggle.as_deref()
    }

    pub fn select(&self) -> Option<&str> {
        self.select.as_deref()
    }

    pub fn close_all(&self) -> bool {
        self.close_all
    }
}

fn default_hfin_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("hfin"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --hfin-home or HFIN_HOME instead of relying on the default \
                hfin home directory. If you continue using the program right now, you may have \
                problems!",
            );
            PathBuf::from("hfin")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_insert_spending() {
        let args = Args::try_parse_from([
            "hfin",
            "--hfin-home",
            "/tmp/hfin",
            "insert",
            "spending",
            "--name",
            "Obat Maret",
            "--category-id",
            "9",
            "--date",
            "2024-03-04",
            "--item",
            "Paracetamol:10:strip:5000",
            "--item",
            "Amoxicillin:3:box:42500",
        ])
        .unwrap();
        assert_eq!(args.common().hfin_home().path(), Path::new("/tmp/hfin"));
        let Command::Insert(insert) = args.command() else {
            panic!("expected insert");
        };
        let InsertSubcommand::Spending(record) = insert.entity() else {
            panic!("expected spending");
        };
        assert_eq!(record.items().len(), 2);
        assert_eq!(record.amount(), None);
        assert_eq!(
            record.date(),
            NaiveDate::from_ymd_opt(2024, 3, 4)
        );
    }

    #[test]
    fn test_parse_list_and_delete() {
        let args = Args::try_parse_from([
            "hfin",
            "list",
            "spending-category",
            "--format",
            "csv",
        ])
        .unwrap();
        let Command::List(list) = args.command() else {
            panic!("expected list");
        };
        assert_eq!(list.entity(), Entity::SpendingCategory);
        assert_eq!(list.format(), OutputFormat::Csv);

        let args = Args::try_parse_from(["hfin", "delete", "income", "12", "--yes"]).unwrap();
        let Command::Delete(delete) = args.command() else {
            panic!("expected delete");
        };
        assert_eq!(delete.id(), 12);
        assert!(delete.yes());
    }

    #[test]
    fn test_report_month_range() {
        assert!(
            Args::try_parse_from(["hfin", "report", "mixture", "--year", "2024", "--month", "13"])
                .is_err()
        );
    }
}

//! Reading import workbooks, and writing import templates and year exports.
//!
//! The backend does the real import: the client only previews the first sheet and then posts the
//! untouched file. Templates and exports are built locally.

mod mapping;

pub use mapping::{Column, Field, Header, Mapping, MappingError};

use crate::model::{
    category_name, Amount, Category, CategoryKind, CategoryScope, Entry, IncomeForm,
    MedicineDetail, Record, SpendingForm,
};
use crate::report;
use crate::Result;
use anyhow::{bail, Context};
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use chrono::{Duration, NaiveDate};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Cursor;
use std::str::FromStr;
use tracing::debug;

/// Excel stores dates as days since this day (allowing for its 1900 leap-year bug).
const EXCEL_EPOCH: (i32, u32, u32) = (1899, 12, 30);
/// The largest serial Excel accepts, 9999-12-31.
const MAX_SERIAL: f64 = 2_958_465.0;

/// What a workbook is being imported as. Each kind has its own upload endpoint and columns.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum ImportKind {
    Income,
    /// Spendings entered with a single amount.
    Spending,
    /// Medicine purchases, one row per line item.
    Medicine,
}

serde_plain::derive_display_from_serialize!(ImportKind);
serde_plain::derive_fromstr_from_deserialize!(ImportKind);

impl ImportKind {
    pub fn endpoint(&self) -> &'static str {
        match self {
            ImportKind::Income => "/api/uploadIncomeExcel",
            ImportKind::Spending => "/api/uploadSpendingExcelGeneral",
            ImportKind::Medicine => "/api/uploadSpendingExcelObat",
        }
    }

    /// The template's columns, in order.
    pub fn fields(&self) -> &'static [Field] {
        match self {
            ImportKind::Income => &[Field::Date, Field::Name, Field::CategoryId, Field::Amount],
            ImportKind::Spending => &[
                Field::Date,
                Field::Name,
                Field::CategoryId,
                Field::CompanyId,
                Field::Amount,
            ],
            ImportKind::Medicine => &[
                Field::Date,
                Field::Name,
                Field::CompanyId,
                Field::Medicine,
                Field::Quantity,
                Field::Unit,
                Field::PricePerItem,
            ],
        }
    }

    pub fn required(&self) -> &'static [Field] {
        match self {
            ImportKind::Income => &[Field::Date, Field::Name, Field::CategoryId, Field::Amount],
            ImportKind::Spending => &[Field::Date, Field::Name, Field::CategoryId, Field::Amount],
            ImportKind::Medicine => &[
                Field::Date,
                Field::Name,
                Field::Medicine,
                Field::Quantity,
                Field::Unit,
                Field::PricePerItem,
            ],
        }
    }

    /// The categories listed on a template's second sheet.
    pub fn scope(&self) -> CategoryScope {
        match self {
            ImportKind::Income => CategoryScope::Income,
            ImportKind::Spending | ImportKind::Medicine => CategoryScope::Spending,
        }
    }

    fn example(&self, categories: &[Category]) -> Vec<Cell> {
        let category = categories
            .iter()
            .find(|c| !c.kind().is_medicine() || self.scope() == CategoryScope::Income)
            .map(|c| c.id)
            .unwrap_or(1);
        let date = |s: &str| Cell::Text(s.to_string());
        match self {
            ImportKind::Income => vec![
                date("2024-01-31"),
                Cell::Text("Klaim BPJS Januari".to_string()),
                Cell::Number(category as f64),
                Cell::Number(150_000_000.0),
            ],
            ImportKind::Spending => vec![
                date("2024-01-31"),
                Cell::Text("Listrik Januari".to_string()),
                Cell::Number(category as f64),
                Cell::Empty,
                Cell::Number(2_000_000.0),
            ],
            ImportKind::Medicine => vec![
                date("2024-02-10"),
                Cell::Text("Obat Februari".to_string()),
                Cell::Number(1.0),
                Cell::Text("Paracetamol 500mg".to_string()),
                Cell::Number(10.0),
                Cell::Text("strip".to_string()),
                Cell::Number(5_000.0),
            ],
        }
    }
}

/// A cell of the first sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Date(NaiveDate),
}

impl Cell {
    fn from_data(data: &Data) -> Self {
        match data {
            Data::Empty => Cell::Empty,
            Data::String(s) if s.trim().is_empty() => Cell::Empty,
            Data::String(s) => Cell::Text(s.clone()),
            Data::Float(f) => Cell::Number(*f),
            Data::Int(i) => Cell::Number(*i as f64),
            Data::Bool(b) => Cell::Text(b.to_string()),
            Data::DateTime(dt) => match serial_to_date(dt.as_f64()) {
                Some(date) => Cell::Date(date),
                None => Cell::Number(dt.as_f64()),
            },
            Data::DateTimeIso(s) => match crate::model::date::parse(s) {
                Some(date) => Cell::Date(date),
                None => Cell::Text(s.clone()),
            },
            other => Cell::Text(other.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// The cell as it would be shown.
    pub fn text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.trim().to_string(),
            Cell::Number(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
            Cell::Number(f) => f.to_string(),
            Cell::Date(d) => d.format(crate::model::date::FORMAT).to_string(),
        }
    }

    fn date(&self) -> Option<NaiveDate> {
        match self {
            Cell::Date(d) => Some(*d),
            Cell::Number(f) => serial_to_date(*f),
            Cell::Text(s) => crate::model::date::parse(s)
                .or_else(|| s.trim().parse::<f64>().ok().and_then(serial_to_date)),
            Cell::Empty => None,
        }
    }

    fn integer(&self) -> Option<i64> {
        match self {
            Cell::Number(f) if f.fract() == 0.0 => Some(*f as i64),
            Cell::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Numbers are taken as they are. Text only goes through the currency parser when
    /// `strip_currency` is set, otherwise it must be a plain decimal.
    fn money(&self, strip_currency: bool) -> Option<Amount> {
        match self {
            Cell::Number(f) => Decimal::from_f64(*f).map(Amount::from),
            Cell::Text(s) if strip_currency => Amount::from_str(s).ok(),
            Cell::Text(s) => Decimal::from_str(s.trim()).ok().map(Amount::from),
            _ => None,
        }
    }
}

fn serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !(1.0..=MAX_SERIAL).contains(&serial) {
        return None;
    }
    let (y, m, d) = EXCEL_EPOCH;
    let epoch = NaiveDate::from_ymd_opt(y, m, d)?;
    epoch.checked_add_signed(Duration::days(serial.trunc() as i64))
}

/// Reads the first sheet of an `.xlsx`, `.xls` or `.ods` workbook.
pub fn read_workbook(bytes: Vec<u8>) -> Result<Vec<Vec<Cell>>> {
    let mut workbook =
        open_workbook_auto_from_rs(Cursor::new(bytes)).context("Unable to open the workbook")?;
    let range = workbook
        .worksheet_range_at(0)
        .context("The workbook has no sheets")?
        .context("Unable to read the first sheet")?;
    let rows = range
        .rows()
        .map(|row| row.iter().map(Cell::from_data).collect())
        .collect();
    Ok(rows)
}

/// One data row of an import, as the backend would read it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImportRow {
    /// The 1-based row number in the sheet.
    pub line: usize,
    #[serde(with = "crate::model::date::option")]
    pub date: Option<NaiveDate>,
    pub name: String,
    pub category_id: Option<i64>,
    pub company_id: Option<i64>,
    pub amount: Option<Amount>,
    pub medicine: String,
    pub quantity: Option<i64>,
    pub unit: String,
    pub price_per_item: Option<Amount>,
    /// Cells that are missing or could not be read.
    pub problems: Vec<String>,
    /// Columns that are not import fields, kept for display.
    pub extra: BTreeMap<String, String>,
}

impl ImportRow {
    pub fn is_clean(&self) -> bool {
        self.problems.is_empty()
    }

    fn require<T: Clone>(&self, value: &Option<T>, field: Field) -> Result<T> {
        match value {
            Some(v) => Ok(v.clone()),
            None => bail!("Row {}: '{field}' is missing or invalid", self.line),
        }
    }

    pub fn income_form(&self) -> Result<IncomeForm> {
        let form = IncomeForm {
            name: self.name.clone(),
            amount: self.require(&self.amount, Field::Amount)?,
            category_id: self.require(&self.category_id, Field::CategoryId)?,
            date: self.require(&self.date, Field::Date)?,
        };
        form.validate()
            .with_context(|| format!("Row {}", self.line))?;
        Ok(form)
    }

    pub fn spending_form(&self) -> Result<SpendingForm> {
        let form = SpendingForm {
            name: self.name.clone(),
            amount: self.require(&self.amount, Field::Amount)?,
            category_id: self.require(&self.category_id, Field::CategoryId)?,
            date: self.require(&self.date, Field::Date)?,
            company_id: self.company_id,
        };
        form.validate()
            .with_context(|| format!("Row {}", self.line))?;
        if form.kind().is_medicine() {
            bail!(
                "Row {}: medicine spendings are imported with the medicine template",
                self.line
            );
        }
        Ok(form)
    }

    pub fn medicine_line(&self, spending_id: i64) -> Result<MedicineDetail> {
        let item = MedicineDetail::new(
            spending_id,
            self.medicine.clone(),
            self.require(&self.quantity, Field::Quantity)?,
            self.unit.clone(),
            self.require(&self.price_per_item, Field::PricePerItem)?,
        );
        item.validate()
            .with_context(|| format!("Row {}", self.line))?;
        Ok(item)
    }
}

/// The first sheet of a workbook, read as `kind`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Preview {
    pub kind: ImportKind,
    pub headers: Vec<String>,
    /// Required columns the sheet does not have.
    pub missing: Vec<Field>,
    pub rows: Vec<ImportRow>,
}

impl Preview {
    pub fn problem_count(&self) -> usize {
        self.rows.iter().map(|r| r.problems.len()).sum()
    }

    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.problem_count() == 0
    }

    /// Medicine rows grouped into purchases. Rows with the same date, name and company are one
    /// spending, and each row is a line item of it.
    pub fn medicine_purchases(&self) -> Result<Vec<(SpendingForm, Vec<MedicineDetail>)>> {
        let Some(category_id) = CategoryKind::Medicine.category_id() else {
            bail!("There is no medicine category");
        };
        let mut purchases: Vec<(SpendingForm, Vec<MedicineDetail>)> = Vec::new();
        for row in &self.rows {
            let date = row.require(&row.date, Field::Date)?;
            let item = row.medicine_line(0)?;
            let existing = purchases.iter_mut().find(|(form, _)| {
                form.date == date && form.name == row.name && form.company_id == row.company_id
            });
            match existing {
                Some((_, items)) => items.push(item),
                None => {
                    let form = SpendingForm {
                        name: row.name.clone(),
                        amount: Amount::ZERO,
                        category_id,
                        date,
                        company_id: row.company_id,
                    };
                    form.validate()
                        .with_context(|| format!("Row {}", row.line))?;
                    purchases.push((form, vec![item]));
                }
            }
        }
        for (form, items) in purchases.iter_mut() {
            form.derive_amount(items)?;
        }
        Ok(purchases)
    }
}

/// Reads the first sheet of `bytes` and maps its rows to import fields. Blank rows are skipped.
/// Nothing is rejected here: unreadable cells are recorded as problems on their row.
pub fn preview(bytes: Vec<u8>, kind: ImportKind, strip_currency: bool) -> Result<Preview> {
    let rows = read_workbook(bytes)?;
    let mut rows = rows.into_iter().enumerate();
    let Some((_, header_row)) = rows.next() else {
        bail!("The first sheet is empty");
    };
    let mapping = Mapping::new(header_row.iter().map(Cell::text))?;
    let missing = mapping.missing(kind.required());

    let mut out = Vec::new();
    for (ix, row) in rows {
        if row.iter().all(Cell::is_empty) {
            continue;
        }
        out.push(read_row(&mapping, kind, ix + 1, &row, strip_currency));
    }
    debug!("Read {} {kind} rows", out.len());

    Ok(Preview {
        kind,
        headers: mapping
            .headers()
            .iter()
            .map(|h| h.as_ref().to_string())
            .collect(),
        missing,
        rows: out,
    })
}

fn read_row(
    mapping: &Mapping,
    kind: ImportKind,
    line: usize,
    cells: &[Cell],
    strip_currency: bool,
) -> ImportRow {
    let mut row = ImportRow {
        line,
        ..ImportRow::default()
    };
    let empty = Cell::Empty;
    for ix in 0..mapping.len() {
        let cell = cells.get(ix).unwrap_or(&empty);
        let Some(field) = mapping.field_at(ix) else {
            if !cell.is_empty() {
                row.extra
                    .insert(mapping.columns()[ix].to_string(), cell.text());
            }
            continue;
        };
        if cell.is_empty() {
            continue;
        }
        let ok = match field {
            Field::Name => {
                row.name = cell.text();
                true
            }
            Field::Medicine => {
                row.medicine = cell.text();
                true
            }
            Field::Unit => {
                row.unit = cell.text();
                true
            }
            Field::Date => {
                row.date = cell.date();
                row.date.is_some()
            }
            Field::CategoryId => {
                row.category_id = cell.integer();
                row.category_id.is_some()
            }
            Field::CompanyId => {
                row.company_id = cell.integer();
                row.company_id.is_some()
            }
            Field::Quantity => {
                row.quantity = cell.integer();
                row.quantity.is_some()
            }
            Field::Amount => {
                row.amount = cell.money(strip_currency);
                row.amount.is_some()
            }
            Field::PricePerItem => {
                row.price_per_item = cell.money(strip_currency);
                row.price_per_item.is_some()
            }
        };
        if !ok {
            row.problems
                .push(format!("'{}' is not a valid {field}", cell.text()));
        }
    }

    for field in kind.required() {
        let present = match field {
            Field::Name => !row.name.is_empty(),
            Field::Medicine => !row.medicine.is_empty(),
            Field::Unit => !row.unit.is_empty(),
            Field::Date => row.date.is_some(),
            Field::CategoryId => row.category_id.is_some(),
            Field::CompanyId => row.company_id.is_some(),
            Field::Quantity => row.quantity.is_some(),
            Field::Amount => row.amount.is_some(),
            Field::PricePerItem => row.price_per_item.is_some(),
        };
        let already = row.problems.iter().any(|p| p.ends_with(&format!(" {field}")));
        if !present && !already && mapping.index_of(*field).is_some() {
            row.problems.push(format!("{field} is required"));
        }
    }
    row
}

fn write_cell(sheet: &mut Worksheet, row: u32, col: u16, cell: &Cell) -> Result<()> {
    match cell {
        Cell::Empty => {}
        Cell::Text(s) => {
            sheet.write_string(row, col, s)?;
        }
        Cell::Number(n) => {
            sheet.write_number(row, col, *n)?;
        }
        Cell::Date(d) => {
            sheet.write_string(row, col, d.format(crate::model::date::FORMAT).to_string())?;
        }
    }
    Ok(())
}

fn write_header(sheet: &mut Worksheet, headers: &[&str]) -> Result<()> {
    let bold = Format::new().set_bold();
    for (col, header) in headers.iter().enumerate() {
        let col = col as u16;
        sheet.write_string_with_format(0, col, *header, &bold)?;
        sheet.set_column_width(col, 18)?;
    }
    Ok(())
}

fn write_categories(workbook: &mut Workbook, categories: &[Category]) -> Result<()> {
    let sheet = workbook.add_worksheet();
    sheet.set_name("Categories")?;
    write_header(sheet, &["id", "name"])?;
    for (ix, category) in categories.iter().enumerate() {
        let row = ix as u32 + 1;
        sheet.write_number(row, 0, category.id as f64)?;
        sheet.write_string(row, 1, &category.name)?;
    }
    Ok(())
}

/// An import template for `kind`. The first sheet has the import headers and one example row, the
/// second lists `categories` so the ids can be looked up.
pub fn template(kind: ImportKind, categories: &[Category]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Template")?;
        let headers: Vec<&str> = kind.fields().iter().map(Field::header).collect();
        write_header(sheet, &headers)?;
        for (col, cell) in kind.example(categories).iter().enumerate() {
            write_cell(sheet, 1, col as u16, cell)?;
        }
    }
    write_categories(&mut workbook, categories)?;
    workbook
        .save_to_buffer()
        .context("Unable to write the template workbook")
}

fn money_cell(amount: Amount) -> Cell {
    match amount.value().to_f64() {
        Some(n) => Cell::Number(n),
        None => Cell::Text(amount.plain()),
    }
}

/// A workbook of `rows` from `year`: a sheet of the rows with a total, a sheet of monthly totals
/// and the category list.
pub fn export<R>(year: i32, rows: &[R], categories: &[Category]) -> Result<Vec<u8>>
where
    R: Entry + Record,
{
    let mut rows: Vec<&R> = rows.iter().filter(|r| r.year() == year).collect();
    rows.sort_by_key(|r| r.date());

    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name(year.to_string())?;
        write_header(sheet, &["date", "name", "category", "category_id", "amount"])?;
        let mut line = 0;
        for row in &rows {
            line += 1;
            let cells = [
                Cell::Date(row.date()),
                Cell::Text(row.name().to_string()),
                Cell::Text(category_name(categories, row.category_id())),
                Cell::Number(row.category_id() as f64),
                money_cell(row.amount()),
            ];
            for (col, cell) in cells.iter().enumerate() {
                write_cell(sheet, line, col as u16, cell)?;
            }
        }
        let total: Amount = rows.iter().map(|r| r.amount()).sum();
        let bold = Format::new().set_bold();
        sheet.write_string_with_format(line + 1, 1, "Total", &bold)?;
        write_cell(sheet, line + 1, 4, &money_cell(total))?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Monthly")?;
        write_header(sheet, &["month", "total"])?;
        for summary in report::monthly(&rows, year, categories) {
            let row = summary.month;
            sheet.write_string(row, 0, summary.name)?;
            write_cell(sheet, row, 1, &money_cell(summary.total))?;
        }
    }
    write_categories(&mut workbook, categories)?;
    workbook
        .save_to_buffer()
        .context("Unable to write the export workbook")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Income;

    fn sheet(rows: &[&[&str]]) -> Vec<u8> {
        let mut workbook = Workbook::new();
        let ws = workbook.add_worksheet();
        for (r, row) in rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                if !value.is_empty() {
                    ws.write_string(r as u32, c as u16, *value).unwrap();
                }
            }
        }
        workbook.save_to_buffer().unwrap()
    }

    fn categories() -> Vec<Category> {
        vec![Category::new(1, "Klaim BPJS"), Category::new(2, "Umum")]
    }

    #[test]
    fn test_template_reads_back_clean() {
        for kind in [ImportKind::Income, ImportKind::Spending, ImportKind::Medicine] {
            let bytes = template(kind, &categories()).unwrap();
            let preview = preview(bytes, kind, true).unwrap();
            assert!(preview.missing.is_empty(), "{kind}: {:?}", preview.missing);
            assert_eq!(preview.rows.len(), 1);
            assert!(preview.is_clean(), "{kind}: {:?}", preview.rows[0].problems);
        }
    }

    #[test]
    fn test_template_example_income() {
        let bytes = template(ImportKind::Income, &categories()).unwrap();
        let preview = preview(bytes, ImportKind::Income, true).unwrap();
        let form = preview.rows[0].income_form().unwrap();
        assert_eq!(form.category_id, 1);
        assert_eq!(form.amount, Amount::from(150_000_000));
        assert_eq!(form.date, NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
    }

    #[test]
    fn test_preview_strips_currency() {
        let bytes = sheet(&[
            &["Tanggal", "Nama", "Kategori ID", "Jumlah", "Catatan"],
            &["2024-03-01", "Pasien Umum", "2", "Rp 1.500.000", "shift pagi"],
            &["", "", "", "", ""],
            &["02/03/2024", "Pasien Umum", "2", "Rp250.000,50", ""],
        ]);
        let preview = preview(bytes.clone(), ImportKind::Income, true).unwrap();
        assert_eq!(preview.rows.len(), 2);
        assert_eq!(preview.rows[0].line, 2);
        assert_eq!(preview.rows[1].line, 4);
        assert_eq!(preview.rows[0].amount, Some(Amount::from(1_500_000)));
        assert_eq!(
            preview.rows[1].amount,
            Some(Amount::from_str("250000.50").unwrap())
        );
        assert_eq!(
            preview.rows[0].extra.get("catatan").map(String::as_str),
            Some("shift pagi")
        );

        let strict = super::preview(bytes, ImportKind::Income, false).unwrap();
        assert!(!strict.is_clean());
        assert!(strict.rows[0].amount.is_none());
    }

    #[test]
    fn test_preview_reports_missing_columns_and_cells() {
        let bytes = sheet(&[
            &["date", "name", "amount"],
            &["not a date", "Sewa", "100"],
        ]);
        let preview = preview(bytes, ImportKind::Spending, true).unwrap();
        assert_eq!(preview.missing, vec![Field::CategoryId]);
        assert_eq!(preview.rows[0].problems.len(), 1);
        assert!(preview.rows[0].spending_form().is_err());
    }

    #[test]
    fn test_medicine_rows_group_into_purchases() {
        let bytes = sheet(&[
            &["date", "name", "company_id", "medicine", "qty", "satuan", "harga_satuan"],
            &["2024-02-10", "Obat Februari", "1", "Paracetamol", "10", "strip", "5000"],
            &["2024-02-10", "Obat Februari", "1", "Amoxicillin", "3", "box", "42.500"],
            &["2024-02-11", "Obat Susulan", "", "Kasa", "2", "roll", "1250"],
        ]);
        let preview = preview(bytes, ImportKind::Medicine, true).unwrap();
        assert!(preview.is_clean());
        let purchases = preview.medicine_purchases().unwrap();
        assert_eq!(purchases.len(), 2);
        assert_eq!(purchases[0].1.len(), 2);
        assert_eq!(purchases[0].0.amount, Amount::from(177_500));
        assert!(purchases[0].0.kind().is_medicine());
        assert_eq!(purchases[1].0.amount, Amount::from(2_500));
    }

    #[test]
    fn test_serial_dates() {
        assert_eq!(
            serial_to_date(45322.0),
            NaiveDate::from_ymd_opt(2024, 1, 31)
        );
        assert_eq!(serial_to_date(0.0), None);
        assert_eq!(Cell::Text("45322".to_string()).date(), serial_to_date(45322.0));
    }

    #[test]
    fn test_export_reads_back() {
        let rows = vec![
            Income {
                id: 1,
                name: "Klaim".to_string(),
                amount: Amount::from(100),
                category_id: 1,
                date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            },
            Income {
                id: 2,
                name: "Lama".to_string(),
                amount: Amount::from(7),
                category_id: 1,
                date: NaiveDate::from_ymd_opt(2023, 1, 5).unwrap(),
            },
        ];
        let bytes = export(2024, &rows, &categories()).unwrap();
        let sheet = read_workbook(bytes).unwrap();
        assert_eq!(sheet[0][0].text(), "date");
        assert_eq!(sheet[1][1].text(), "Klaim");
        assert_eq!(sheet[1][2].text(), "Klaim BPJS");
        assert_eq!(sheet[2][1].text(), "Total");
        assert_eq!(sheet[2][4].text(), "100");
    }
}

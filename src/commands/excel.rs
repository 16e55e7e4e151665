//! Workbook command handlers.
//!
//! This module implements the CLI commands for:
//! - `hfin import` - Preview a workbook and upload it to the backend's import endpoint
//! - `hfin template` - Write an empty import workbook with the current categories
//! - `hfin export` - Write a year's income or spending rows to a workbook

use crate::api::{self, Mode};
use crate::args::{ExportArgs, ExportKind, ImportArgs, TemplateArgs};
use crate::commands::{counted, markdown_table, Out};
use crate::error::{ErrorType, IntoResult};
use crate::excel::{self, Field, ImportRow, Preview};
use crate::model::{date, CategoryScope};
use crate::{utils, Config, Result};
use anyhow::anyhow;
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info};

/// What `hfin import` did with a workbook.
#[derive(Debug, Clone, Serialize)]
pub struct ImportOutcome {
    pub preview: Preview,
    /// Whether the file was sent to the backend.
    pub uploaded: bool,
    /// The backend's reply, when the file was sent.
    pub response: Option<String>,
}

/// Reads the first sheet of a workbook and, unless `--dry-run` is given, uploads the file.
///
/// A workbook with missing columns or unreadable cells is not uploaded. The backend imports
/// everything or nothing, so there is no partial import to clean up.
pub async fn import(config: Config, mode: Mode, args: ImportArgs) -> Result<Out<ImportOutcome>> {
    let kind = args.kind();
    let path = args.file();
    let bytes = utils::read_bytes(path)
        .await
        .pub_result(ErrorType::Excel)?;
    let preview = excel::preview(bytes.clone(), kind, args.strip_currency())
        .pub_result(ErrorType::Excel)?;
    debug!(
        "Read {} rows from {} with {} problems",
        preview.rows.len(),
        path.display(),
        preview.problem_count()
    );
    let summary = format!(
        "{} read from {} as {kind}\n\n{}",
        counted(preview.rows.len(), "row", "rows"),
        path.display(),
        preview_table(&preview)
    );

    if args.dry_run() {
        let message = format!("{summary}\n{}", problems_summary(&preview));
        return Ok(Out::new(
            message,
            ImportOutcome {
                preview,
                uploaded: false,
                response: None,
            },
        ));
    }

    if !preview.is_clean() {
        return Err(anyhow!("{}", problems_summary(&preview))).pub_result(ErrorType::Validation);
    }
    if preview.rows.is_empty() {
        return Err(anyhow!("{} has no rows to import", path.display()))
            .pub_result(ErrorType::Validation);
    }

    let mut hospital = api::hospital(&config, mode).await?;
    let response = hospital
        .upload(kind.endpoint(), &file_name(path), bytes)
        .await?;
    info!("Uploaded {} to {}", path.display(), kind.endpoint());
    Ok(Out::new(
        format!("{summary}\n{response}"),
        ImportOutcome {
            preview,
            uploaded: true,
            response: Some(response),
        },
    ))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "import.xlsx".to_string())
}

/// The rows as read, with a column for what is wrong with each.
fn preview_table(preview: &Preview) -> String {
    let fields = preview.kind.fields();
    let mut headers: Vec<&str> = vec!["row"];
    headers.extend(fields.iter().map(Field::header));
    headers.push("problems");
    let rows = preview.rows.iter().map(|row| {
        let mut cells = vec![row.line.to_string()];
        cells.extend(fields.iter().map(|field| field_text(row, *field)));
        cells.push(row.problems.join("; "));
        cells
    });
    markdown_table(&headers, rows)
}

fn field_text(row: &ImportRow, field: Field) -> String {
    fn or_blank<T: ToString>(value: &Option<T>) -> String {
        value.as_ref().map(ToString::to_string).unwrap_or_default()
    }
    match field {
        Field::Date => row
            .date
            .map(|d| d.format(date::FORMAT).to_string())
            .unwrap_or_default(),
        Field::Name => row.name.clone(),
        Field::CategoryId => or_blank(&row.category_id),
        Field::CompanyId => or_blank(&row.company_id),
        Field::Amount => or_blank(&row.amount),
        Field::Medicine => row.medicine.clone(),
        Field::Quantity => or_blank(&row.quantity),
        Field::Unit => row.unit.clone(),
        Field::PricePerItem => or_blank(&row.price_per_item),
    }
}

fn problems_summary(preview: &Preview) -> String {
    let mut lines = Vec::new();
    if !preview.missing.is_empty() {
        let missing: Vec<String> = preview.missing.iter().map(ToString::to_string).collect();
        lines.push(format!("Missing columns: {}", missing.join(", ")));
    }
    for row in preview.rows.iter().filter(|r| !r.is_clean()) {
        lines.push(format!("Row {}: {}", row.line, row.problems.join(", ")));
    }
    if lines.is_empty() {
        "No problems found".to_string()
    } else {
        lines.join("\n")
    }
}

/// Writes an import template for `kind`, listing the current categories on its second sheet.
pub async fn template(config: Config, mode: Mode, args: TemplateArgs) -> Result<Out<()>> {
    let kind = args.kind();
    let mut hospital = api::hospital(&config, mode).await?;
    let categories = hospital.categories(kind.scope()).await?;
    let bytes = excel::template(kind, &categories).pub_result(ErrorType::Excel)?;
    let out = args.out();
    utils::write(&out, bytes)
        .await
        .pub_result(ErrorType::Excel)?;
    Ok(Out::new_message(format!(
        "Wrote the {kind} import template to {} with {}",
        out.display(),
        counted(categories.len(), "category", "categories")
    )))
}

/// Writes the income or spending rows of a year to a workbook.
pub async fn export(config: Config, mode: Mode, args: ExportArgs) -> Result<Out<()>> {
    let year = args.year();
    let mut hospital = api::hospital(&config, mode).await?;
    let (count, bytes) = match args.kind() {
        ExportKind::Income => {
            let rows = hospital.incomes_for_year(year).await?;
            let categories = hospital.categories(CategoryScope::Income).await?;
            (rows.len(), excel::export(year, &rows, &categories))
        }
        ExportKind::Spending => {
            let rows = hospital.spendings_for_year(year).await?;
            let categories = hospital.categories(CategoryScope::Spending).await?;
            (rows.len(), excel::export(year, &rows, &categories))
        }
    };
    let bytes = bytes.pub_result(ErrorType::Excel)?;
    let out = args.out();
    utils::write(&out, bytes)
        .await
        .pub_result(ErrorType::Excel)?;
    Ok(Out::new_message(format!(
        "Wrote {} {} from {year} to {}",
        count,
        match (args.kind(), count) {
            (ExportKind::Income, 1) => "income",
            (ExportKind::Income, _) => "incomes",
            (ExportKind::Spending, 1) => "spending",
            (ExportKind::Spending, _) => "spendings",
        },
        out.display()
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Entity;
    use crate::error::error_type;
    use crate::excel::{read_workbook, ImportKind};
    use crate::model::Income;
    use crate::test::TestEnv;
    use rust_xlsxwriter::Workbook;
    use tempfile::TempDir;

    fn write_sheet(path: &Path, rows: &[&[&str]]) {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        for (r, row) in rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                sheet.write_string(r as u32, c as u16, *value).unwrap();
            }
        }
        workbook.save(path).unwrap();
    }

    #[tokio::test]
    async fn test_template_then_import() {
        let env = TestEnv::new().await;
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("income.xlsx");

        let out = template(
            env.config(),
            Mode::Test,
            TemplateArgs::new(ImportKind::Income, &path),
        )
        .await
        .unwrap();
        assert!(out.message().ends_with("with 4 categories"));

        let out = import(
            env.config(),
            Mode::Test,
            ImportArgs::new(ImportKind::Income, &path, false),
        )
        .await
        .unwrap();
        assert!(out.message().ends_with("Imported 1 income"));
        assert!(out.structure().unwrap().uploaded);

        let incomes: Vec<Income> = env
            .hospital()
            .await
            .list_all(Entity::Income)
            .await
            .unwrap();
        assert_eq!(incomes.len(), 13);
    }

    #[tokio::test]
    async fn test_dry_run_shows_problems() {
        let env = TestEnv::new().await;
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("spending.xlsx");
        write_sheet(
            &path,
            &[
                &["tanggal", "nama", "kategori_id", "jumlah"],
                &["2024-05-02", "Listrik Mei", "2", "Rp 19.250.000"],
                &["2024-05-40", "Air Mei", "2", "Rp 1.100.000"],
            ],
        );

        let out = import(
            env.config(),
            Mode::Test,
            ImportArgs::new(ImportKind::Spending, &path, true),
        )
        .await
        .unwrap();
        assert!(out.message().starts_with("2 rows read from"));
        assert!(out.message().contains("| 2 | 2024-05-02 | Listrik Mei | 2 |  | Rp19.250.000 |"));
        assert!(out.message().contains("Row 3:"));
        assert!(!out.structure().unwrap().uploaded);

        let err = import(
            env.config(),
            Mode::Test,
            ImportArgs::new(ImportKind::Spending, &path, false),
        )
        .await
        .unwrap_err();
        assert_eq!(error_type(&err), Some(ErrorType::Validation));
        assert!(err.to_string().contains("Row 3:"));
    }

    #[tokio::test]
    async fn test_import_medicine() {
        let env = TestEnv::new().await;
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("obat.xlsx");
        write_sheet(
            &path,
            &[
                &["date", "name", "company_id", "medicine", "quantity", "unit", "price"],
                &["2024-06-05", "Obat Juni", "2", "Ibuprofen 400mg", "6", "strip", "7.500"],
                &["2024-06-05", "Obat Juni", "2", "Salep Luka", "4", "tube", "12.000"],
            ],
        );
        let out = import(
            env.config(),
            Mode::Test,
            ImportArgs::new(ImportKind::Medicine, &path, false),
        )
        .await
        .unwrap();
        assert!(out.message().ends_with("Imported 1 spending"));

        let mut hospital = env.hospital().await;
        let spending = hospital.spending(8).await.unwrap();
        assert_eq!(spending.amount.to_string(), "Rp93.000");
        assert_eq!(hospital.medicine_for_spending(8).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_missing_file() {
        let env = TestEnv::new().await;
        let err = import(
            env.config(),
            Mode::Test,
            ImportArgs::new(ImportKind::Income, "/nonexistent/income.xlsx", false),
        )
        .await
        .unwrap_err();
        assert_eq!(error_type(&err), Some(ErrorType::Excel));
    }

    #[tokio::test]
    async fn test_export_year() {
        let env = TestEnv::new().await;
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("income_2024.xlsx");
        let out = export(
            env.config(),
            Mode::Test,
            ExportArgs::new(ExportKind::Income, 2024, &path),
        )
        .await
        .unwrap();
        assert!(out.message().starts_with("Wrote 10 incomes from 2024"));

        let rows = read_workbook(std::fs::read(&path).unwrap()).unwrap();
        // header, ten rows and the total
        assert_eq!(rows.len(), 12);
        assert_eq!(rows[1][1].text(), "Klaim BPJS Januari");
        assert_eq!(rows[1][2].text(), "Klaim BPJS");
        assert_eq!(rows[11][1].text(), "Total");
        assert_eq!(rows[11][4].text(), "758400000");
    }
}

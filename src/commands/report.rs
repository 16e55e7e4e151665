//! Report command handler: the yearly income, spending and mixture totals.

use crate::api::{self, Hospital, Mode};
use crate::args::{ReportArgs, ReportKind};
use crate::commands::{markdown_table, Out};
use crate::error::{ErrorType, IntoResult};
use crate::model::{Category, CategoryScope, Entry};
use crate::report::{self, Line, MonthSummary, Slice};
use crate::{Config, Result};
use anyhow::anyhow;
use serde_json::{json, Value};
use tracing::debug;

/// Prints the totals of a year, computed from the year's rows.
///
/// For income or spending this is the twelve monthly totals plus the semesters, or with
/// `--month` the per-category breakdown of that month. For the mixture it is income against
/// spending per month, per semester and for the year.
pub async fn report(config: Config, mode: Mode, args: ReportArgs) -> Result<Out<Value>> {
    let mut hospital = api::hospital(&config, mode).await?;
    let year = args.year();
    match args.kind() {
        ReportKind::Income => {
            let rows = hospital.incomes_for_year(year).await?;
            let categories = hospital.categories(CategoryScope::Income).await?;
            single("Income", &rows, &categories, &args)
        }
        ReportKind::Spending => {
            let rows = hospital.spendings_for_year(year).await?;
            let categories = hospital.categories(CategoryScope::Spending).await?;
            single("Spending", &rows, &categories, &args)
        }
        ReportKind::Mixture => mixture(&mut hospital, &args).await,
    }
}

fn single<E: Entry>(
    label: &str,
    rows: &[E],
    categories: &[Category],
    args: &ReportArgs,
) -> Result<Out<Value>> {
    let year = args.year();
    let months = report::monthly(rows, year, categories);
    debug!("{label} {year}: {} rows", rows.len());

    if let Some(month) = args.month() {
        let Some(summary) = months.iter().find(|m| m.month == month) else {
            return Err(anyhow!("--month must be between 1 and 12"))
                .pub_result(ErrorType::Validation);
        };
        let message = format!(
            "{label} for {} {year}: {}\n\n{}",
            summary.name,
            summary.total,
            slices_table(&summary.breakdown)
        );
        return Ok(Out::new(message, serde_json::to_value(summary)?));
    }

    let semesters = report::semesters(&months);
    let by_category = report::by_category(rows, year, categories);
    let message = format!(
        "{label} for {year}: {}\n\n{}\n{}\n{}",
        semesters.year,
        months_table(&months),
        markdown_table(
            &["period", "total"],
            [
                vec!["Semester 1".to_string(), semesters.first.to_string()],
                vec!["Semester 2".to_string(), semesters.second.to_string()],
                vec![year.to_string(), semesters.year.to_string()],
            ]
        ),
        slices_table(&by_category),
    );
    Ok(Out::new(
        message,
        json!({
            "year": year,
            "months": months,
            "semesters": semesters,
            "by_category": by_category,
        }),
    ))
}

async fn mixture(hospital: &mut Hospital, args: &ReportArgs) -> Result<Out<Value>> {
    if args.month().is_some() {
        return Err(anyhow!("--month does not apply to the mixture report"))
            .pub_result(ErrorType::Validation);
    }
    let year = args.year();
    let incomes = hospital.incomes_for_year(year).await?;
    let spendings = hospital.spendings_for_year(year).await?;
    let mixture = report::mixture(&incomes, &spendings, year);

    let lines = mixture
        .months
        .iter()
        .chain(&mixture.semesters)
        .chain(std::iter::once(&mixture.total));
    let message = format!(
        "Income and spending for {year}: {} of {}\n\n{}",
        mixture.total.balance,
        mixture.total.surplus,
        lines_table(lines)
    );
    Ok(Out::new(message, serde_json::to_value(&mixture)?))
}

fn months_table(months: &[MonthSummary]) -> String {
    markdown_table(
        &["month", "total"],
        months
            .iter()
            .map(|m| vec![m.name.to_string(), m.total.to_string()]),
    )
}

fn slices_table(slices: &[Slice]) -> String {
    markdown_table(
        &["category", "total"],
        slices
            .iter()
            .map(|s| vec![s.name.clone(), s.value.to_string()]),
    )
}

fn lines_table<'a>(lines: impl Iterator<Item = &'a Line>) -> String {
    markdown_table(
        &["period", "income", "spending", "surplus", "balance"],
        lines.map(|l| {
            vec![
                l.label.clone(),
                l.income.to_string(),
                l.spending.to_string(),
                l.surplus.to_string(),
                l.balance.to_string(),
            ]
        }),
    )
}

//! Insert command handlers.

use crate::api::{self, Entity, Mode};
use crate::args::{InsertArgs, InsertSubcommand, MedicineArgs, RecordArgs};
use crate::commands::Out;
use crate::error::{ErrorType, IntoResult};
use crate::model::{
    Amount, Category, CategoryKind, Company, Income, IncomeForm, MedicineDetail, Spending,
    SpendingForm, Unit, Year,
};
use crate::{Config, Result};
use anyhow::anyhow;
use serde::Serialize;
use serde_json::{json, Value};

/// Creates a record. The structure is the record as the backend saved it.
///
/// A spending in the medicine category takes `--item`s instead of `--amount`, and its amount is
/// the total of its items.
pub async fn insert(config: Config, mode: Mode, args: InsertArgs) -> Result<Out<Value>> {
    let mut hospital = api::hospital(&config, mode).await?;
    match args.entity() {
        InsertSubcommand::Income(fields) => {
            no_items(fields, "an income")?;
            let form = IncomeForm {
                name: required(fields.name(), "--name")?.to_string(),
                amount: required(fields.amount(), "--amount")?,
                category_id: required(fields.category_id(), "--category-id")?,
                date: required(fields.date(), "--date")?,
            };
            form.validate().pub_result(ErrorType::Validation)?;
            let income: Income = hospital.create(Entity::Income, &form).await?;
            inserted(
                format!("Inserted income {}: {} {}", income.id, income.name, income.amount),
                &income,
            )
        }

        InsertSubcommand::Spending(fields) => {
            let form = spending_form(fields)?;
            if form.kind().is_medicine() {
                if fields.items().is_empty() {
                    return Err(anyhow!(
                        "A medicine spending needs at least one --item name:quantity:unit:price"
                    ))
                    .pub_result(ErrorType::Validation);
                }
                let (spending, items) = hospital
                    .create_medicine_spending(form, fields.items().to_vec())
                    .await?;
                let message = format!(
                    "Inserted medicine spending {}: {} {} with {}",
                    spending.id,
                    spending.name,
                    spending.amount,
                    Entity::Medicine.noun(items.len())
                );
                return Ok(Out::new(
                    message,
                    json!({ "spending": spending, "items": items }),
                ));
            }
            no_items(fields, "a spending outside the medicine category")?;
            form.validate().pub_result(ErrorType::Validation)?;
            let spending: Spending = hospital.create(Entity::Spending, &form).await?;
            inserted(
                format!(
                    "Inserted spending {}: {} {}",
                    spending.id, spending.name, spending.amount
                ),
                &spending,
            )
        }

        InsertSubcommand::Medicine(fields) => {
            let item = medicine_item(fields)?;
            let saved = hospital.add_medicine(&item).await?;
            let spending = hospital.spending(item.spending_id).await?;
            inserted(
                format!(
                    "Inserted medicine item {} into spending {}, which now totals {}",
                    saved.id, spending.id, spending.amount
                ),
                &saved,
            )
        }

        InsertSubcommand::IncomeCategory(fields) => {
            let category: Category = hospital
                .create(Entity::IncomeCategory, &json!({ "name": fields.name() }))
                .await?;
            inserted(
                format!("Inserted income category {}: {}", category.id, category.name),
                &category,
            )
        }

        InsertSubcommand::SpendingCategory(fields) => {
            let category: Category = hospital
                .create(Entity::SpendingCategory, &json!({ "name": fields.name() }))
                .await?;
            inserted(
                format!("Inserted spending category {}: {}", category.id, category.name),
                &category,
            )
        }

        InsertSubcommand::Unit(fields) => {
            let unit: Unit = hospital
                .create(Entity::Unit, &json!({ "name": fields.name() }))
                .await?;
            inserted(format!("Inserted unit {}: {}", unit.id, unit.name), &unit)
        }

        InsertSubcommand::Company(fields) => {
            let company: Company = hospital
                .create(Entity::Company, &json!({ "name": fields.name() }))
                .await?;
            inserted(
                format!("Inserted company {}: {}", company.id, company.name),
                &company,
            )
        }

        InsertSubcommand::Year(fields) => {
            let year: Year = hospital
                .create(Entity::Year, &json!({ "year": fields.year() }))
                .await?;
            inserted(format!("Inserted year {} (id {})", year.year, year.id), &year)
        }
    }
}

fn inserted<T: Serialize>(message: String, record: &T) -> Result<Out<Value>> {
    let value = serde_json::to_value(record)?;
    Ok(Out::new(message, value))
}

pub(super) fn required<T>(value: Option<T>, flag: &str) -> Result<T> {
    value
        .ok_or_else(|| anyhow!("{flag} is required"))
        .pub_result(ErrorType::Validation)
}

pub(super) fn no_items(fields: &RecordArgs, what: &str) -> Result<()> {
    if fields.items().is_empty() {
        Ok(())
    } else {
        Err(anyhow!("--item does not apply to {what}")).pub_result(ErrorType::Validation)
    }
}

/// The spending form from the command line. For a medicine spending the amount is left at zero
/// for the line items to fill in, and an explicit `--amount` is an error.
fn spending_form(fields: &RecordArgs) -> Result<SpendingForm> {
    let category_id = required(fields.category_id(), "--category-id")?;
    let amount = match (CategoryKind::of(category_id), fields.amount()) {
        (CategoryKind::Medicine, Some(_)) => {
            return Err(anyhow!(
                "The amount of a medicine spending is the total of its items, use --item \
                instead of --amount"
            ))
            .pub_result(ErrorType::Validation)
        }
        (CategoryKind::Medicine, None) => Amount::ZERO,
        (CategoryKind::General, amount) => required(amount, "--amount")?,
    };
    Ok(SpendingForm {
        name: required(fields.name(), "--name")?.to_string(),
        amount,
        category_id,
        date: required(fields.date(), "--date")?,
        company_id: fields.company_id(),
    })
}

fn medicine_item(fields: &MedicineArgs) -> Result<MedicineDetail> {
    let item = MedicineDetail::new(
        required(fields.spending_id(), "--spending-id")?,
        required(fields.name(), "--name")?,
        required(fields.quantity(), "--quantity")?,
        required(fields.unit(), "--unit")?,
        required(fields.price(), "--price")?,
    );
    item.validate().pub_result(ErrorType::Validation)?;
    Ok(item)
}

//! Update command handlers.
//!
//! Every update fetches the current record, applies the fields that were given and sends the
//! whole record back.

use crate::api::{self, Entity, Hospital, Mode};
use crate::args::{UpdateArgs, UpdateRecordArgs, UpdateSubcommand};
use crate::commands::insert::no_items;
use crate::commands::list::find_record;
use crate::commands::Out;
use crate::error::{ErrorType, IntoResult};
use crate::model::{Category, Company, Income, MedicineDetail, Spending, Unit, UserUpdate, Year};
use crate::{Config, Result};
use anyhow::anyhow;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;

/// Changes a record. Only the fields that are given change.
pub async fn update(config: Config, mode: Mode, args: UpdateArgs) -> Result<Out<Value>> {
    let mut hospital = api::hospital(&config, mode).await?;
    match args.entity() {
        UpdateSubcommand::Income(args) => {
            let fields = args.fields();
            no_items(fields, "an income")?;
            if fields.company_id().is_some() {
                return Err(anyhow!("--company-id does not apply to an income"))
                    .pub_result(ErrorType::Validation);
            }
            let mut form = hospital.income(args.id()).await?.form();
            if let Some(name) = fields.name() {
                form.name = name.to_string();
            }
            if let Some(amount) = fields.amount() {
                form.amount = amount;
            }
            if let Some(category_id) = fields.category_id() {
                form.category_id = category_id;
            }
            if let Some(date) = fields.date() {
                form.date = date;
            }
            form.validate().pub_result(ErrorType::Validation)?;
            let income: Income = hospital.update(Entity::Income, args.id(), &form).await?;
            updated(
                format!("Updated income {}: {} {}", income.id, income.name, income.amount),
                &income,
            )
        }

        UpdateSubcommand::Spending(args) => update_spending(&mut hospital, args).await,

        UpdateSubcommand::Medicine(args) => {
            let fields = args.fields();
            let current: MedicineDetail =
                find_record(&mut hospital, Entity::Medicine, args.id()).await?;
            let mut item = current.clone();
            if let Some(spending_id) = fields.spending_id() {
                item.spending_id = spending_id;
            }
            if let Some(name) = fields.name() {
                item.name = name.to_string();
            }
            if let Some(quantity) = fields.quantity() {
                item.quantity = quantity;
            }
            if let Some(unit) = fields.unit() {
                item.unit = unit.to_string();
            }
            if let Some(price) = fields.price() {
                item.price_per_item = price;
            }
            let target = hospital.spending(item.spending_id).await?;
            if !target.kind().is_medicine() {
                return Err(anyhow!(
                    "Spending {} is not in the medicine category",
                    target.id
                ))
                .pub_result(ErrorType::Validation);
            }
            let saved = hospital.update_medicine(args.id(), &item).await?;
            if current.spending_id != item.spending_id {
                debug!(
                    "Medicine item {} moved from spending {} to {}",
                    args.id(),
                    current.spending_id,
                    item.spending_id
                );
                hospital.sync_medicine_total(current.spending_id).await?;
            }
            let spending = hospital.spending(item.spending_id).await?;
            updated(
                format!(
                    "Updated medicine item {}, spending {} now totals {}",
                    saved.id, spending.id, spending.amount
                ),
                &saved,
            )
        }

        UpdateSubcommand::IncomeCategory(args) => {
            let category: Category = hospital
                .update(Entity::IncomeCategory, args.id(), &json!({ "name": args.name() }))
                .await?;
            updated(
                format!("Renamed income category {} to {}", category.id, category.name),
                &category,
            )
        }

        UpdateSubcommand::SpendingCategory(args) => {
            let category: Category = hospital
                .update(Entity::SpendingCategory, args.id(), &json!({ "name": args.name() }))
                .await?;
            updated(
                format!("Renamed spending category {} to {}", category.id, category.name),
                &category,
            )
        }

        UpdateSubcommand::Unit(args) => {
            let unit: Unit = hospital
                .update(Entity::Unit, args.id(), &json!({ "name": args.name() }))
                .await?;
            updated(format!("Renamed unit {} to {}", unit.id, unit.name), &unit)
        }

        UpdateSubcommand::Company(args) => {
            let company: Company = hospital
                .update(Entity::Company, args.id(), &json!({ "name": args.name() }))
                .await?;
            updated(
                format!("Renamed company {} to {}", company.id, company.name),
                &company,
            )
        }

        UpdateSubcommand::Year(args) => {
            let year: Year = hospital
                .update(Entity::Year, args.id(), &json!({ "year": args.year() }))
                .await?;
            updated(format!("Year {} is now {}", year.id, year.year), &year)
        }

        UpdateSubcommand::User(args) => {
            let update = UserUpdate {
                name: args.name().map(String::from),
                username: args.username().map(String::from),
                password: args.password().map(String::from),
                role: args.role(),
            };
            let user = hospital.update_user(args.id(), &update).await?;
            updated(
                format!("Updated user {}: {} ({})", user.id, user.username, user.role),
                &user,
            )
        }
    }
}

/// A medicine spending keeps the amount derived from its items: `--amount` is refused, `--item`s
/// are added, and the total is recomputed. A spending cannot move into or out of the medicine
/// category, because its items would no longer match its amount.
async fn update_spending(hospital: &mut Hospital, args: &UpdateRecordArgs) -> Result<Out<Value>> {
    let fields = args.fields();
    let current = hospital.spending(args.id()).await?;
    let mut form = current.form();
    if let Some(name) = fields.name() {
        form.name = name.to_string();
    }
    if let Some(category_id) = fields.category_id() {
        form.category_id = category_id;
    }
    if let Some(date) = fields.date() {
        form.date = date;
    }
    if let Some(company_id) = fields.company_id() {
        form.company_id = Some(company_id);
    }
    if form.kind() != current.kind() {
        return Err(anyhow!(
            "Spending {} cannot move between the medicine category and the others",
            current.id
        ))
        .pub_result(ErrorType::Validation);
    }

    if !current.kind().is_medicine() {
        no_items(fields, "a spending outside the medicine category")?;
        if let Some(amount) = fields.amount() {
            form.amount = amount;
        }
        form.validate().pub_result(ErrorType::Validation)?;
        let spending: Spending = hospital.update(Entity::Spending, current.id, &form).await?;
        return updated(
            format!(
                "Updated spending {}: {} {}",
                spending.id, spending.name, spending.amount
            ),
            &spending,
        );
    }

    if fields.amount().is_some() {
        return Err(anyhow!(
            "The amount of a medicine spending is the total of its items, change the items instead"
        ))
        .pub_result(ErrorType::Validation);
    }
    form.validate().pub_result(ErrorType::Validation)?;
    let _: Spending = hospital.update(Entity::Spending, current.id, &form).await?;
    for item in fields.items() {
        let mut item = item.clone();
        item.spending_id = current.id;
        hospital.add_medicine(&item).await?;
    }
    let spending = hospital.sync_medicine_total(current.id).await?;
    updated(
        format!(
            "Updated medicine spending {}: {} {}",
            spending.id, spending.name, spending.amount
        ),
        &spending,
    )
}

fn updated<T: Serialize>(message: String, record: &T) -> Result<Out<Value>> {
    let value = serde_json::to_value(record)?;
    Ok(Out::new(message, value))
}

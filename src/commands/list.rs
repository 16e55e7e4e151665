//! Read-only command handlers: `hfin list` and `hfin show`.

use crate::api::{self, Entity, Hospital, Mode};
use crate::args::{ListArgs, ShowArgs};
use crate::commands::{markdown_table, Out, Rows};
use crate::error::{ErrorType, IntoResult};
use crate::model::{
    Category, Company, Income, MedicineDetail, Record, Spending, Unit, User, Year,
};
use crate::{Config, Result};
use anyhow::{anyhow, Context};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};

/// Where a listing sits among the pages of its collection.
struct PageInfo {
    page: u32,
    pages: u64,
    total: u64,
}

/// Lists the records of an entity as a table, JSON or CSV.
///
/// Paginated collections show one page unless `--all` is given. `--search` matches names across
/// the whole collection, and the page is then taken from the matches.
pub async fn list(config: Config, mode: Mode, args: ListArgs) -> Result<Out<Rows>> {
    let entity = args.entity();
    if args.year().is_some() && !matches!(entity, Entity::Income | Entity::Spending) {
        return Err(anyhow!("--year only applies to income and spending"))
            .pub_result(ErrorType::Validation);
    }
    if args.spending_id().is_some() && entity != Entity::Medicine {
        return Err(anyhow!("--spending-id only applies to medicine"))
            .pub_result(ErrorType::Validation);
    }

    let mut hospital = api::hospital(&config, mode).await?;
    match entity {
        Entity::Income => match args.year() {
            Some(year) => listed(entity, hospital.incomes_for_year(year).await?, None, &args),
            None => paged::<Income>(&mut hospital, &args).await,
        },
        Entity::Spending => match args.year() {
            Some(year) => listed(entity, hospital.spendings_for_year(year).await?, None, &args),
            None => paged::<Spending>(&mut hospital, &args).await,
        },
        Entity::Medicine => match args.spending_id() {
            Some(id) => listed(entity, hospital.medicine_for_spending(id).await?, None, &args),
            None => paged::<MedicineDetail>(&mut hospital, &args).await,
        },
        Entity::IncomeCategory | Entity::SpendingCategory => {
            paged::<Category>(&mut hospital, &args).await
        }
        Entity::Unit => paged::<Unit>(&mut hospital, &args).await,
        Entity::Company => paged::<Company>(&mut hospital, &args).await,
        Entity::Year => listed(entity, hospital.years().await?, None, &args),
        Entity::User => paged::<User>(&mut hospital, &args).await,
    }
}

async fn paged<T>(hospital: &mut Hospital, args: &ListArgs) -> Result<Out<Rows>>
where
    T: DeserializeOwned + Serialize + Record,
{
    let entity = args.entity();
    if args.all() {
        let records: Vec<T> = hospital.list_all(entity).await?;
        return listed(entity, records, None, args);
    }
    if args.search().is_some() {
        let mut records: Vec<T> = hospital.list_all(entity).await?;
        search(&mut records, args);
        let limit = args.limit().unwrap_or(hospital.page_size()).max(1);
        let info = PageInfo {
            page: args.page().max(1),
            pages: (records.len() as u64).div_ceil(u64::from(limit)),
            total: records.len() as u64,
        };
        let start = (info.page as usize - 1) * limit as usize;
        let records = records.into_iter().skip(start).take(limit as usize).collect();
        return listed(entity, records, Some(info), args);
    }
    let page = hospital.list::<T>(entity, args.page(), args.limit()).await?;
    let info = PageInfo {
        page: page.page,
        pages: page.page_count(),
        total: page.total,
    };
    listed(entity, page.data, Some(info), args)
}

fn listed<T>(
    entity: Entity,
    mut records: Vec<T>,
    info: Option<PageInfo>,
    args: &ListArgs,
) -> Result<Out<Rows>>
where
    T: Serialize + Record,
{
    search(&mut records, args);
    let rows = Rows::render(&records, args.format())?;
    let mut message = entity.noun(records.len());
    if let Some(info) = info {
        message.push_str(&format!(
            " (page {} of {}, {} in total)",
            info.page,
            info.pages.max(1),
            info.total
        ));
    }
    message.push_str(&format!("\n\n{rows}"));
    Ok(Out::new(message, rows))
}

/// Keeps the records whose name contains `--search`, ignoring case.
fn search<T: Record>(records: &mut Vec<T>, args: &ListArgs) {
    if let Some(search) = args.search() {
        let needle = search.to_lowercase();
        records.retain(|r| r.name().to_lowercase().contains(&needle));
    }
}

/// Shows one record. A medicine spending is shown with its line items.
pub async fn show(config: Config, mode: Mode, args: ShowArgs) -> Result<Out<Value>> {
    let mut hospital = api::hospital(&config, mode).await?;
    let id = args.id();
    match args.entity() {
        Entity::Income => detail(hospital.income(id).await?),
        Entity::Spending => {
            let spending = hospital.spending(id).await?;
            if !spending.kind().is_medicine() {
                return detail(spending);
            }
            let items = hospital.medicine_for_spending(id).await?;
            let table = markdown_table(MedicineDetail::headers(), items.iter().map(Record::cells));
            let message = format!(
                "{}\n{}\n\n{table}",
                describe(&spending),
                Entity::Medicine.noun(items.len())
            );
            Ok(Out::new(
                message,
                json!({ "spending": spending, "items": items }),
            ))
        }
        Entity::Medicine => {
            detail(find_record::<MedicineDetail>(&mut hospital, Entity::Medicine, id).await?)
        }
        entity @ (Entity::IncomeCategory | Entity::SpendingCategory) => {
            detail(find_record::<Category>(&mut hospital, entity, id).await?)
        }
        Entity::Unit => detail(find_record::<Unit>(&mut hospital, Entity::Unit, id).await?),
        Entity::Company => {
            detail(find_record::<Company>(&mut hospital, Entity::Company, id).await?)
        }
        Entity::Year => detail(find_record::<Year>(&mut hospital, Entity::Year, id).await?),
        Entity::User => detail(find_record::<User>(&mut hospital, Entity::User, id).await?),
    }
}

fn detail<T: Serialize + Record>(record: T) -> Result<Out<Value>> {
    let value = serde_json::to_value(&record).context("Unable to serialize the record")?;
    Ok(Out::new(describe(&record), value))
}

/// One `field: value` line per column.
fn describe<T: Record>(record: &T) -> String {
    T::headers()
        .iter()
        .zip(record.cells())
        .map(|(header, cell)| format!("{header}: {cell}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Finds a record by id in a collection that has no detail endpoint.
pub(crate) async fn find_record<T: DeserializeOwned>(
    hospital: &mut Hospital,
    entity: Entity,
    id: i64,
) -> Result<T> {
    let all: Vec<Value> = hospital.list_all(entity).await?;
    let Some(found) = all
        .into_iter()
        .find(|v| v.get("id").and_then(Value::as_i64) == Some(id))
    else {
        return Err(anyhow!(
            "No {} with id {id}",
            entity.noun(1).trim_start_matches("1 ")
        ))
        .pub_result(ErrorType::Request);
    };
    serde_json::from_value(found)
        .with_context(|| format!("Unexpected {entity} record from the backend"))
        .pub_result(ErrorType::Request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::OutputFormat;
    use crate::error::error_type;
    use crate::test::TestEnv;

    #[tokio::test]
    async fn test_list_income_page() {
        let env = TestEnv::new().await;
        let args = ListArgs::new(Entity::Income).with_page(2, Some(5));
        let out = list(env.config(), Mode::Test, args).await.unwrap();
        assert!(out.message().starts_with("5 incomes (page 2 of 3, 12 in total)"));
        assert!(out.message().contains("| id | date | name | category_id | amount |"));
    }

    #[tokio::test]
    async fn test_list_year_and_search() {
        let env = TestEnv::new().await;
        let args = ListArgs::new(Entity::Income)
            .with_year(2024)
            .with_search("bpjs")
            .with_format(OutputFormat::Json);
        let out = list(env.config(), Mode::Test, args).await.unwrap();
        let Some(Rows::Json(Value::Array(rows))) = out.structure() else {
            panic!("expected JSON rows");
        };
        assert_eq!(rows.len(), 4);
        assert!(rows.iter().all(|r| r["name"].as_str().unwrap().contains("BPJS")));
    }

    #[tokio::test]
    async fn test_search_spans_every_page() {
        let env = TestEnv::new().await;
        let args = ListArgs::new(Entity::Income)
            .with_page(3, Some(2))
            .with_search("bpjs");
        let out = list(env.config(), Mode::Test, args).await.unwrap();
        assert!(out.message().starts_with("1 income (page 3 of 3, 5 in total)"));
        assert!(out.message().contains("| 10 | 2023-12-31 | Klaim BPJS Desember |"));
    }

    #[tokio::test]
    async fn test_list_medicine_for_spending() {
        let env = TestEnv::new().await;
        let args = ListArgs::new(Entity::Medicine)
            .with_spending_id(4)
            .with_format(OutputFormat::Csv);
        let out = list(env.config(), Mode::Test, args).await.unwrap();
        assert!(out.message().starts_with("2 medicine items"));
        assert!(out
            .message()
            .contains("1,4,Paracetamol 500mg,10,strip,Rp5.000,Rp50.000"));
    }

    #[tokio::test]
    async fn test_list_filters_need_matching_entity() {
        let env = TestEnv::new().await;
        let args = ListArgs::new(Entity::Unit).with_year(2024);
        let err = list(env.config(), Mode::Test, args).await.unwrap_err();
        assert_eq!(error_type(&err), Some(ErrorType::Validation));
    }

    #[tokio::test]
    async fn test_users_list_needs_admin() {
        let env = TestEnv::new().await;
        let out = list(env.config(), Mode::Test, ListArgs::new(Entity::User).with_all())
            .await
            .unwrap();
        assert!(out.message().starts_with("2 users"));

        env.login_as("staff", "Staff123!").await;
        let err = list(env.config(), Mode::Test, ListArgs::new(Entity::User))
            .await
            .unwrap_err();
        assert_eq!(error_type(&err), Some(ErrorType::Permission));
    }

    #[tokio::test]
    async fn test_show_medicine_spending() {
        let env = TestEnv::new().await;
        let out = show(env.config(), Mode::Test, ShowArgs::new(Entity::Spending, 4))
            .await
            .unwrap();
        assert!(out.message().contains("name: Obat Februari"));
        assert!(out.message().contains("Amoxicillin 500mg"));
        assert_eq!(out.structure().unwrap()["items"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_show_company() {
        let env = TestEnv::new().await;
        let out = show(env.config(), Mode::Test, ShowArgs::new(Entity::Company, 2))
            .await
            .unwrap();
        assert_eq!(out.message(), "id: 2\nname: PT Kalbe Farma");

        let err = show(env.config(), Mode::Test, ShowArgs::new(Entity::Company, 99))
            .await
            .unwrap_err();
        assert_eq!(error_type(&err), Some(ErrorType::Request));
        assert!(err.to_string().contains("No company with id 99"));
    }
}

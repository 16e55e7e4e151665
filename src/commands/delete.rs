//! Delete command handler.

use crate::api::{self, Entity, Mode};
use crate::args::DeleteArgs;
use crate::commands::list::find_record;
use crate::commands::Out;
use crate::error::{ErrorType, IntoResult};
use crate::model::MedicineDetail;
use crate::{Config, Result};
use anyhow::anyhow;
use tracing::info;

/// Deletes one record. Only admins may delete, and only with `--yes`.
///
/// Deleting a medicine line item recomputes its spending's amount. Deleting a medicine spending
/// takes its line items with it.
pub async fn delete(config: Config, mode: Mode, args: DeleteArgs) -> Result<Out<()>> {
    let entity = args.entity();
    let id = args.id();
    let what = entity.noun(1);
    let what = what.trim_start_matches("1 ");
    if !args.yes() {
        return Err(anyhow!(
            "Deleting {what} {id} needs --yes to confirm, it cannot be undone"
        ))
        .pub_result(ErrorType::Validation);
    }

    let mut hospital = api::hospital(&config, mode).await?;
    hospital.session().require_admin()?;
    if entity == Entity::Medicine {
        let spending_id = match args.spending_id() {
            Some(spending_id) => spending_id,
            None => {
                find_record::<MedicineDetail>(&mut hospital, Entity::Medicine, id)
                    .await?
                    .spending_id
            }
        };
        hospital.delete_medicine(id, spending_id).await?;
        info!("Deleted medicine item {id} of spending {spending_id}");
        return Ok(Out::new(
            format!("Deleted medicine item {id}, spending {spending_id} was updated"),
            (),
        ));
    }

    hospital.delete(entity, id).await?;
    info!("Deleted {what} {id}");
    Ok(Out::new(format!("Deleted {what} {id}"), ()))
}

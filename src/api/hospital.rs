//! The typed client for the ledger backend.

use crate::api::{Entity, Reply, Request, Rest};
use crate::error::{ErrorType, IntoResult};
use crate::model::{
    medicine_total, Category, CategoryScope, Income, LoginForm, MedicineDetail, Page,
    RegisterForm, Spending, SpendingForm, User, UserUpdate, Year,
};
use crate::session::Session;
use crate::Result;
use anyhow::{anyhow, bail, Context};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

/// Wraps a `Rest` implementation with the session and knowledge of the backend's endpoints and
/// response shapes.
///
/// Every request carries the session's bearer token. A `401` response clears the stored session
/// before the error is returned. Any other non-2xx status becomes an error built from the
/// response's `message` field. Responses may be bare or wrapped as `{"data": ...}`.
pub struct Hospital {
    rest: Box<dyn Rest + Send>,
    session: Session,
    page_size: u32,
    session_days: u32,
}

impl Hospital {
    pub fn new(
        rest: Box<dyn Rest + Send>,
        session: Session,
        page_size: u32,
        session_days: u32,
    ) -> Self {
        Self {
            rest,
            session,
            page_size,
            session_days,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    async fn send(&mut self, request: Request) -> Result<Value> {
        let request = request.token(self.session.token());
        let path = request.path.clone();
        let method = request.method;
        let reply = self
            .rest
            .send(request)
            .await
            .with_context(|| format!("{method:?} {path} failed"))
            .pub_result(ErrorType::Request)?;

        if reply.status == 401 {
            warn!("The backend rejected the session token, logging out");
            self.session.clear().await?;
            let message = reply_message(&reply)
                .unwrap_or_else(|| "Session expired, log in again".to_string());
            return Err(anyhow!(message)).pub_result(ErrorType::Session);
        }
        if reply.status == 403 {
            let message = reply_message(&reply).unwrap_or_else(|| "Forbidden".to_string());
            return Err(anyhow!(message)).pub_result(ErrorType::Permission);
        }
        if !reply.is_success() {
            let message = reply_message(&reply)
                .unwrap_or_else(|| format!("Request failed with status {}", reply.status));
            return Err(anyhow!(message)).pub_result(ErrorType::Request);
        }
        debug!("{method:?} {path} -> {}", reply.status);
        Ok(reply.body)
    }

    async fn get<T: DeserializeOwned>(&mut self, request: Request) -> Result<T> {
        let body = self.send(request).await?;
        decode(body)
    }

    // Authentication ------------------------------------------------------------------------------

    /// Logs in, stores the token and returns the user it belongs to.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<User> {
        let form = LoginForm {
            username: username.to_string(),
            password: password.to_string(),
        };
        let body = self.send(Request::post("/login", to_json(&form)?)).await?;
        let data = data_of(&body);
        let token = data
            .get("token")
            .or_else(|| body.get("token"))
            .and_then(Value::as_str)
            .context("The login response has no token")
            .pub_result(ErrorType::Request)?
            .to_string();
        let user = data
            .get("user")
            .or_else(|| body.get("user"))
            .and_then(|u| serde_json::from_value::<User>(u.clone()).ok());

        self.session
            .save(token, user, self.session_days)
            .await
            .pub_result(ErrorType::Session)?;
        let user = match self.session.user().cloned() {
            Some(user) => user,
            None => self.me().await?,
        };
        info!("Logged in as {} ({})", user.username, user.role);
        Ok(user)
    }

    /// Forgets the stored token. The backend keeps no server-side session.
    pub async fn logout(&mut self) -> Result<()> {
        self.session.clear().await.pub_result(ErrorType::Session)
    }

    /// Fetches the current user and refreshes the copy kept in the session.
    pub async fn me(&mut self) -> Result<User> {
        self.session.require_login()?;
        let user: User = self.get(Request::get("/me")).await?;
        self.session
            .set_user(user.clone())
            .await
            .pub_result(ErrorType::Session)?;
        Ok(user)
    }

    pub async fn register(&mut self, form: &RegisterForm) -> Result<User> {
        self.session.require_admin()?;
        form.validate().pub_result(ErrorType::Validation)?;
        self.get(Request::post("/register", to_json(form)?)).await
    }

    pub async fn update_user(&mut self, id: i64, update: &UserUpdate) -> Result<User> {
        self.session.require_admin()?;
        update.validate().pub_result(ErrorType::Validation)?;
        self.get(Request::put(Entity::User.item_path(id), to_json(update)?))
            .await
    }

    // Generic CRUD --------------------------------------------------------------------------------

    fn check_entity(&self, entity: Entity) -> Result<()> {
        if entity.is_admin_only() {
            self.session.require_admin()
        } else {
            self.session.require_login().map(|_| ())
        }
    }

    /// Lists one page of `entity`. Unpaginated collections come back whole as page 1.
    pub async fn list<T: DeserializeOwned>(
        &mut self,
        entity: Entity,
        page: u32,
        limit: Option<u32>,
    ) -> Result<Page<T>> {
        self.check_entity(entity)?;
        let limit = limit.unwrap_or(self.page_size).max(1);
        let page = page.max(1);
        let mut request = Request::get(entity.path());
        if entity.is_paged() {
            request = request.query("page", page).query("limit", limit);
        }
        let body = self.send(request).await?;
        decode_page(body, page, limit)
    }

    /// Fetches every page of `entity`.
    pub async fn list_all<T: DeserializeOwned>(&mut self, entity: Entity) -> Result<Vec<T>> {
        let mut page = 1;
        let mut all = Vec::new();
        loop {
            let result: Page<T> = self.list(entity, page, None).await?;
            let has_next = result.has_next() && !result.data.is_empty();
            all.extend(result.data);
            if !entity.is_paged() || !has_next {
                break;
            }
            page += 1;
        }
        Ok(all)
    }

    pub async fn create<B, T>(&mut self, entity: Entity, body: &B) -> Result<T>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        self.check_entity(entity)?;
        self.get(Request::post(entity.path(), to_json(body)?)).await
    }

    pub async fn update<B, T>(&mut self, entity: Entity, id: i64, body: &B) -> Result<T>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        self.check_entity(entity)?;
        self.get(Request::put(entity.item_path(id), to_json(body)?))
            .await
    }

    /// Deletes a record. Only admins may delete anything. Medicine line items go through
    /// `delete_medicine` so the parent spending's amount stays in step.
    pub async fn delete(&mut self, entity: Entity, id: i64) -> Result<()> {
        self.session.require_admin()?;
        if entity == Entity::Medicine {
            bail!("Medicine items are deleted with their spending id, use delete_medicine");
        }
        self.send(Request::delete(entity.item_path(id))).await?;
        Ok(())
    }

    // Income and spending -------------------------------------------------------------------------

    /// Every income row dated in `year`.
    pub async fn incomes_for_year(&mut self, year: i32) -> Result<Vec<Income>> {
        self.session.require_login()?;
        self.get(Request::get(format!("{}/{year}", Entity::Income.path())))
            .await
    }

    /// Every spending row dated in `year`.
    pub async fn spendings_for_year(&mut self, year: i32) -> Result<Vec<Spending>> {
        self.session.require_login()?;
        self.get(Request::get(format!("{}/{year}", Entity::Spending.path())))
            .await
    }

    pub async fn income(&mut self, id: i64) -> Result<Income> {
        self.session.require_login()?;
        self.get(Request::get(format!("/api/detailIncome/{id}")))
            .await
    }

    pub async fn spending(&mut self, id: i64) -> Result<Spending> {
        self.session.require_login()?;
        self.get(Request::get(format!("/api/detailSpending/{id}")))
            .await
    }

    pub async fn categories(&mut self, scope: CategoryScope) -> Result<Vec<Category>> {
        let entity = match scope {
            CategoryScope::Income => Entity::IncomeCategory,
            CategoryScope::Spending => Entity::SpendingCategory,
        };
        self.list_all(entity).await
    }

    pub async fn years(&mut self) -> Result<Vec<Year>> {
        let mut years: Vec<Year> = self.list_all(Entity::Year).await?;
        years.sort_by_key(|y| y.year);
        Ok(years)
    }

    // Medicine ------------------------------------------------------------------------------------

    pub async fn medicine_for_spending(&mut self, spending_id: i64) -> Result<Vec<MedicineDetail>> {
        self.session.require_login()?;
        self.get(Request::get(format!(
            "/api/spendingMedicineBySpendingId/{spending_id}"
        )))
        .await
    }

    /// Creates a medicine spending and its line items. The spending's amount is the total of the
    /// items, whatever the form said. If an item cannot be created, the spending's amount is
    /// brought back in step with the items that were saved before the error is returned.
    pub async fn create_medicine_spending(
        &mut self,
        mut form: SpendingForm,
        items: Vec<MedicineDetail>,
    ) -> Result<(Spending, Vec<MedicineDetail>)> {
        form.derive_amount(&items).pub_result(ErrorType::Validation)?;
        form.validate().pub_result(ErrorType::Validation)?;
        for item in &items {
            item.validate().pub_result(ErrorType::Validation)?;
        }
        let spending: Spending = self.create(Entity::Spending, &form).await?;
        let mut saved = Vec::with_capacity(items.len());
        for mut item in items {
            item.spending_id = spending.id;
            match self.create::<_, MedicineDetail>(Entity::Medicine, &item).await {
                Ok(item) => saved.push(item),
                Err(e) => {
                    warn!(
                        "Saved {} of the items of spending {}, updating its amount",
                        saved.len(),
                        spending.id
                    );
                    if let Err(sync) = self.sync_medicine_total(spending.id).await {
                        warn!("Unable to update the amount of spending {}: {sync:#}", spending.id);
                    }
                    return Err(e);
                }
            }
        }
        Ok((spending, saved))
    }

    /// Adds a line item to an existing medicine spending and updates the spending's amount.
    pub async fn add_medicine(&mut self, item: &MedicineDetail) -> Result<MedicineDetail> {
        item.validate().pub_result(ErrorType::Validation)?;
        let spending = self.spending(item.spending_id).await?;
        if !spending.kind().is_medicine() {
            return Err(anyhow!(
                "Spending {} is not in the medicine category",
                spending.id
            ))
            .pub_result(ErrorType::Validation);
        }
        let saved: MedicineDetail = self.create(Entity::Medicine, item).await?;
        self.sync_medicine_total(item.spending_id).await?;
        Ok(saved)
    }

    pub async fn update_medicine(
        &mut self,
        id: i64,
        item: &MedicineDetail,
    ) -> Result<MedicineDetail> {
        item.validate().pub_result(ErrorType::Validation)?;
        let saved: MedicineDetail = self.update(Entity::Medicine, id, item).await?;
        self.sync_medicine_total(item.spending_id).await?;
        Ok(saved)
    }

    pub async fn delete_medicine(&mut self, id: i64, spending_id: i64) -> Result<()> {
        self.session.require_admin()?;
        self.send(Request::delete(Entity::Medicine.item_path(id)))
            .await?;
        self.sync_medicine_total(spending_id).await?;
        Ok(())
    }

    /// Recomputes a medicine spending's amount from its line items and saves it if it changed.
    pub async fn sync_medicine_total(&mut self, spending_id: i64) -> Result<Spending> {
        let spending = self.spending(spending_id).await?;
        let items = self.medicine_for_spending(spending_id).await?;
        let mut form = spending.form();
        form.derive_amount(&items).pub_result(ErrorType::Validation)?;
        if form.amount == spending.amount {
            return Ok(spending);
        }
        debug!(
            "Spending {spending_id} amount {} -> {}",
            spending.amount,
            medicine_total(&items)
        );
        self.update(Entity::Spending, spending_id, &form).await
    }

    // Uploads -------------------------------------------------------------------------------------

    /// Posts a workbook to an import endpoint and returns the backend's message.
    pub async fn upload(&mut self, path: &str, file_name: &str, bytes: Vec<u8>) -> Result<String> {
        self.session.require_login()?;
        let body = self
            .send(Request::upload(path, file_name, bytes))
            .await?;
        Ok(body
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("Upload accepted")
            .to_string())
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value).context("Unable to serialize the request body")
}

/// The `message` of an error body, or the body itself when it is a plain string.
fn reply_message(reply: &Reply) -> Option<String> {
    match &reply.body {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        body => body
            .get("message")
            .and_then(Value::as_str)
            .map(String::from),
    }
}

/// The payload of a response: the `data` member when present, otherwise the whole body.
fn data_of(body: &Value) -> &Value {
    match body.get("data") {
        Some(data) if !data.is_null() => data,
        _ => body,
    }
}

fn decode<T: DeserializeOwned>(body: Value) -> Result<T> {
    let data = data_of(&body);
    serde_json::from_value(data.clone())
        .context("Unexpected response from the backend")
        .pub_result(ErrorType::Request)
}

fn decode_page<T: DeserializeOwned>(body: Value, page: u32, limit: u32) -> Result<Page<T>> {
    let data: Vec<T> = decode(body.clone())?;
    let count = data.len() as u64;
    let number = |key: &str| body.get(key).and_then(Value::as_u64);
    match body.get("data") {
        Some(_) => Ok(Page {
            data,
            page: number("page").map(|p| p as u32).unwrap_or(page),
            limit: number("limit").map(|l| l as u32).unwrap_or(limit),
            total: number("total").unwrap_or(count),
        }),
        None => Ok(Page {
            data,
            page: 1,
            limit: count.max(1) as u32,
            total: count,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::error_type;
    use crate::api::{Method, TestRest};
    use crate::test::TestEnv;
    use serde_json::json;

    #[test]
    fn test_decode_bare_and_wrapped() {
        let bare: Vec<Year> = decode(json!([{"id": 1, "year": 2024}])).unwrap();
        let wrapped: Vec<Year> = decode(json!({"data": [{"id": 1, "year": 2024}]})).unwrap();
        assert_eq!(bare, wrapped);
    }

    #[test]
    fn test_decode_page_defaults() {
        let page: Page<Year> = decode_page(
            json!({"data": [{"id": 1, "year": 2024}], "total": 21}),
            3,
            10,
        )
        .unwrap();
        assert_eq!(page.page, 3);
        assert_eq!(page.total, 21);
        assert!(!page.has_next());

        let page: Page<Year> = decode_page(json!([{"id": 1, "year": 2024}]), 3, 10).unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.total, 1);
    }

    #[test]
    fn test_reply_message() {
        let reply = Reply::new(400, json!({"message": "Nama wajib diisi"}));
        assert_eq!(reply_message(&reply).as_deref(), Some("Nama wajib diisi"));
        assert_eq!(reply_message(&Reply::new(500, Value::Null)), None);
    }

    #[tokio::test]
    async fn test_unauthorized_evicts_session() {
        let env = TestEnv::new().await;
        let mut hospital = env.hospital().await;
        assert!(hospital.session().is_logged_in());

        env.expire_backend_tokens().await;
        let mut hospital = env.hospital().await;
        let err = hospital.years().await.unwrap_err();
        assert_eq!(error_type(&err), Some(ErrorType::Session));
        assert!(!hospital.session().is_logged_in());
        assert!(!env.config().token_path().exists());
    }

    #[tokio::test]
    async fn test_backend_message_becomes_error() {
        let env = TestEnv::new().await;
        let mut hospital = env.hospital().await;
        let err = hospital.income(9999).await.unwrap_err();
        assert_eq!(error_type(&err), Some(ErrorType::Request));
        assert!(err.to_string().contains("Income 9999 not found"));
    }

    #[tokio::test]
    async fn test_user_cannot_delete() {
        let env = TestEnv::new().await;
        let mut hospital = env.login_as("staff", "Staff123!").await;
        let err = hospital.delete(Entity::Income, 1).await.unwrap_err();
        assert_eq!(error_type(&err), Some(ErrorType::Permission));
        let err = hospital
            .list::<User>(Entity::User, 1, None)
            .await
            .unwrap_err();
        assert_eq!(error_type(&err), Some(ErrorType::Permission));
    }

    #[tokio::test]
    async fn test_list_all_walks_pages() {
        let env = TestEnv::new().await;
        let mut hospital = env.hospital().await;
        let first: Page<Income> = hospital.list(Entity::Income, 1, Some(2)).await.unwrap();
        assert_eq!(first.data.len(), 2);
        assert!(first.has_next());
        let all: Vec<Income> = hospital.list_all(Entity::Income).await.unwrap();
        assert_eq!(all.len() as u64, first.total);
    }

    #[tokio::test]
    async fn test_medicine_items_drive_spending_amount() {
        let env = TestEnv::new().await;
        let mut hospital = env.hospital().await;
        let form = SpendingForm {
            name: "Obat Maret".to_string(),
            amount: crate::model::Amount::ZERO,
            category_id: 9,
            date: chrono::NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            company_id: Some(1),
        };
        let items = vec![
            MedicineDetail::new(0, "Paracetamol", 10, "strip", 5_000.into()),
            MedicineDetail::new(0, "Amoxicillin", 3, "box", 42_500.into()),
        ];
        let (spending, saved) = hospital
            .create_medicine_spending(form, items)
            .await
            .unwrap();
        assert_eq!(spending.amount, 177_500.into());
        assert_eq!(saved.len(), 2);

        let extra = MedicineDetail::new(spending.id, "Kasa", 2, "roll", 1_250.into());
        hospital.add_medicine(&extra).await.unwrap();
        assert_eq!(hospital.spending(spending.id).await.unwrap().amount, 180_000.into());

        hospital
            .delete_medicine(saved[0].id, spending.id)
            .await
            .unwrap();
        assert_eq!(hospital.spending(spending.id).await.unwrap().amount, 130_000.into());
    }

    /// Passes requests to a `TestRest` but answers the `nth` medicine item POST with a 500.
    struct FailingItems {
        inner: TestRest,
        nth: usize,
        seen: usize,
    }

    #[async_trait::async_trait]
    impl Rest for FailingItems {
        async fn send(&mut self, request: Request) -> Result<Reply> {
            if request.method == Method::Post
                && request.path == Entity::Medicine.path()
            {
                self.seen += 1;
                if self.seen == self.nth {
                    return Ok(Reply::new(500, json!({"message": "db down"})));
                }
            }
            self.inner.send(request).await
        }
    }

    #[tokio::test]
    async fn test_failed_item_keeps_medicine_total_in_step() {
        let env = TestEnv::new().await;
        let session = env.hospital().await.session().clone();
        let rest = FailingItems {
            inner: TestRest::load(env.config().test_backend_path()).await.unwrap(),
            nth: 2,
            seen: 0,
        };
        let mut hospital = Hospital::new(Box::new(rest), session, 10, 1);
        let form = SpendingForm {
            name: "Obat April".to_string(),
            amount: crate::model::Amount::ZERO,
            category_id: 9,
            date: chrono::NaiveDate::from_ymd_opt(2024, 4, 8).unwrap(),
            company_id: Some(1),
        };
        let items = vec![
            MedicineDetail::new(0, "Paracetamol", 10, "strip", 5_000.into()),
            MedicineDetail::new(0, "Amoxicillin", 3, "box", 42_500.into()),
        ];
        let err = hospital
            .create_medicine_spending(form, items)
            .await
            .unwrap_err();
        assert_eq!(error_type(&err), Some(ErrorType::Request));

        let mut hospital = env.hospital().await;
        let spending = hospital
            .spendings_for_year(2024)
            .await
            .unwrap()
            .into_iter()
            .find(|s| s.name == "Obat April")
            .unwrap();
        let stored = hospital.medicine_for_spending(spending.id).await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(spending.amount, medicine_total(&stored));
        assert_eq!(spending.amount, 50_000.into());
    }

    #[tokio::test]
    async fn test_add_medicine_to_general_spending_fails() {
        let env = TestEnv::new().await;
        let mut hospital = env.hospital().await;
        let general = hospital
            .spendings_for_year(2024)
            .await
            .unwrap()
            .into_iter()
            .find(|s| !s.kind().is_medicine())
            .unwrap();
        let item = MedicineDetail::new(general.id, "Kasa", 1, "roll", 1_000.into());
        let err = hospital.add_medicine(&item).await.unwrap_err();
        assert_eq!(error_type(&err), Some(ErrorType::Validation));
    }
}

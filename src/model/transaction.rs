//! Income and spending records, and the form bodies used to create or edit them.

use crate::model::{Amount, CategoryKind, MedicineDetail};
use crate::Result;
use anyhow::{bail, ensure};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A dated amount that belongs to a category. Both sides of the ledger implement this so the
/// report functions can treat them the same way.
pub trait Entry {
    fn date(&self) -> NaiveDate;
    fn category_id(&self) -> i64;
    fn amount(&self) -> Amount;

    fn year(&self) -> i32 {
        self.date().year()
    }

    fn month(&self) -> u32 {
        self.date().month()
    }
}

impl<T: Entry + ?Sized> Entry for &T {
    fn date(&self) -> NaiveDate {
        (**self).date()
    }

    fn category_id(&self) -> i64 {
        (**self).category_id()
    }

    fn amount(&self) -> Amount {
        (**self).amount()
    }
}

/// A row of the income table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Income {
    pub id: i64,
    pub name: String,
    pub amount: Amount,
    pub category_id: i64,
    #[serde(with = "crate::model::date")]
    pub date: NaiveDate,
}

impl Income {
    /// The edit form, pre-filled with this record.
    pub fn form(&self) -> IncomeForm {
        IncomeForm {
            name: self.name.clone(),
            amount: self.amount,
            category_id: self.category_id,
            date: self.date,
        }
    }
}

impl Entry for Income {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn category_id(&self) -> i64 {
        self.category_id
    }

    fn amount(&self) -> Amount {
        self.amount
    }
}

/// The body of a create or edit request for an income record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeForm {
    pub name: String,
    pub amount: Amount,
    pub category_id: i64,
    #[serde(with = "crate::model::date")]
    pub date: NaiveDate,
}

impl IncomeForm {
    pub fn validate(&self) -> Result<()> {
        require_name(&self.name)?;
        require_category(self.category_id)?;
        ensure!(
            !self.amount.is_negative(),
            "Amount must not be negative, got {}",
            self.amount
        );
        Ok(())
    }
}

/// A row of the spending table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spending {
    pub id: i64,
    pub name: String,
    pub amount: Amount,
    pub category_id: i64,
    #[serde(with = "crate::model::date")]
    pub date: NaiveDate,
    /// The supplier, only set for medicine purchases.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<i64>,
}

impl Spending {
    pub fn kind(&self) -> CategoryKind {
        CategoryKind::of(self.category_id)
    }

    /// The edit form, pre-filled with this record.
    pub fn form(&self) -> SpendingForm {
        SpendingForm {
            name: self.name.clone(),
            amount: self.amount,
            category_id: self.category_id,
            date: self.date,
            company_id: self.company_id,
        }
    }
}

impl Entry for Spending {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn category_id(&self) -> i64 {
        self.category_id
    }

    fn amount(&self) -> Amount {
        self.amount
    }
}

/// The body of a create or edit request for a spending record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpendingForm {
    pub name: String,
    pub amount: Amount,
    pub category_id: i64,
    #[serde(with = "crate::model::date")]
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<i64>,
}

impl SpendingForm {
    pub fn kind(&self) -> CategoryKind {
        CategoryKind::of(self.category_id)
    }

    pub fn validate(&self) -> Result<()> {
        require_name(&self.name)?;
        require_category(self.category_id)?;
        ensure!(
            !self.amount.is_negative(),
            "Amount must not be negative, got {}",
            self.amount
        );
        Ok(())
    }

    /// Replaces the amount with the total of the line items. Medicine spendings never carry a
    /// hand-entered amount.
    pub fn derive_amount(&mut self, items: &[MedicineDetail]) -> Result<()> {
        if !self.kind().is_medicine() {
            bail!(
                "Only medicine spendings have line items, category {} is not medicine",
                self.category_id
            );
        }
        self.amount = medicine_total(items);
        Ok(())
    }
}

/// The total of a medicine purchase: the sum of `quantity × price_per_item` over its lines.
pub fn medicine_total(items: &[MedicineDetail]) -> Amount {
    items.iter().map(MedicineDetail::line_total).sum()
}

pub(crate) fn require_name(name: &str) -> Result<()> {
    ensure!(!name.trim().is_empty(), "Name is required");
    Ok(())
}

pub(crate) fn require_category(category_id: i64) -> Result<()> {
    ensure!(category_id > 0, "A category is required");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_income_deserialize_backend_shape() {
        let json = r#"{
            "id": 3,
            "name": "Klaim BPJS Januari",
            "amount": "150000000",
            "category_id": 1,
            "date": "2024-01-31T00:00:00.000Z",
            "created_at": "2024-02-01T10:00:00.000Z"
        }"#;
        let income: Income = serde_json::from_str(json).unwrap();
        assert_eq!(income.id, 3);
        assert_eq!(income.amount, Amount::from(150_000_000));
        assert_eq!(income.date, date(2024, 1, 31));
        assert_eq!(income.month(), 1);
        assert_eq!(income.year(), 2024);
    }

    #[test]
    fn test_spending_form_serializes_without_company() {
        let form = SpendingForm {
            name: "Listrik".to_string(),
            amount: Amount::from(2_000_000),
            category_id: 2,
            date: date(2024, 5, 2),
            company_id: None,
        };
        let value = serde_json::to_value(&form).unwrap();
        assert_eq!(value["date"], "2024-05-02");
        assert_eq!(value["amount"], 2_000_000);
        assert!(value.get("company_id").is_none());
    }

    #[test]
    fn test_validate_income_form() {
        let mut form = IncomeForm {
            name: "Umum".to_string(),
            amount: Amount::from(10),
            category_id: 1,
            date: date(2024, 1, 1),
        };
        assert!(form.validate().is_ok());
        form.name = "  ".to_string();
        assert!(form.validate().is_err());
        form.name = "Umum".to_string();
        form.category_id = 0;
        assert!(form.validate().is_err());
        form.category_id = 1;
        form.amount = Amount::from(-1);
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_medicine_total_is_sum_of_lines() {
        let items = vec![
            MedicineDetail::new(1, "Paracetamol", 10, "strip", Amount::from(5_000)),
            MedicineDetail::new(1, "Amoxicillin", 3, "box", Amount::from(42_500)),
        ];
        assert_eq!(medicine_total(&items), Amount::from(177_500));

        let mut form = SpendingForm {
            name: "Obat Februari".to_string(),
            amount: Amount::from(1),
            category_id: 9,
            date: date(2024, 2, 10),
            company_id: Some(2),
        };
        form.derive_amount(&items).unwrap();
        assert_eq!(form.amount, Amount::from(177_500));
    }

    #[test]
    fn test_derive_amount_rejects_general_category() {
        let mut form = SpendingForm {
            name: "Gaji".to_string(),
            amount: Amount::from(1),
            category_id: 3,
            date: date(2024, 2, 10),
            company_id: None,
        };
        assert!(form.derive_amount(&[]).is_err());
    }
}

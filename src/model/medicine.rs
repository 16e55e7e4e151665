//! Medicine purchases: the line items of a medicine spending, and the units and supplier
//! companies those line items refer to.

use crate::model::transaction::require_name;
use crate::model::{is_new, Amount};
use crate::Result;
use anyhow::{ensure, Context};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One line of a medicine spending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicineDetail {
    #[serde(default, skip_serializing_if = "is_new")]
    pub id: i64,
    pub spending_id: i64,
    pub name: String,
    pub quantity: i64,
    pub unit: String,
    pub price_per_item: Amount,
}

impl MedicineDetail {
    /// A line item that has not been saved yet.
    pub fn new(
        spending_id: i64,
        name: impl Into<String>,
        quantity: i64,
        unit: impl Into<String>,
        price_per_item: Amount,
    ) -> Self {
        Self {
            id: 0,
            spending_id,
            name: name.into(),
            quantity,
            unit: unit.into(),
            price_per_item,
        }
    }

    pub fn line_total(&self) -> Amount {
        self.price_per_item * Decimal::from(self.quantity)
    }

    pub fn validate(&self) -> Result<()> {
        require_name(&self.name)?;
        ensure!(
            self.quantity > 0,
            "Quantity of '{}' must be at least 1",
            self.name
        );
        ensure!(
            !self.price_per_item.is_negative(),
            "Price of '{}' must not be negative",
            self.name
        );
        Ok(())
    }
}

/// Parses `name:quantity:unit:price`, e.g. `Paracetamol 500mg:10:strip:Rp5.000`. The name may
/// itself contain colons.
impl FromStr for MedicineDetail {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.rsplitn(4, ':');
        let price = parts.next().unwrap_or_default();
        let unit = parts.next();
        let quantity = parts.next();
        let name = parts.next();
        let (Some(name), Some(quantity), Some(unit)) = (name, quantity, unit) else {
            anyhow::bail!("Expected 'name:quantity:unit:price', got '{s}'");
        };
        let quantity = quantity
            .trim()
            .parse::<i64>()
            .with_context(|| format!("Invalid quantity in '{s}'"))?;
        let price = Amount::from_str(price).with_context(|| format!("Invalid price in '{s}'"))?;
        let item = MedicineDetail::new(0, name.trim(), quantity, unit.trim(), price);
        item.validate()?;
        Ok(item)
    }
}

/// A unit medicine is bought in, e.g. "box" or "strip".
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: i64,
    pub name: String,
}

/// A supplier that medicine is bought from.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: i64,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_total() {
        let item = MedicineDetail::new(4, "Infus RL", 12, "botol", Amount::from(15_000));
        assert_eq!(item.line_total(), Amount::from(180_000));
    }

    #[test]
    fn test_parse_item() {
        let item = MedicineDetail::from_str("Paracetamol 500mg:10:strip:Rp5.000").unwrap();
        assert_eq!(item.name, "Paracetamol 500mg");
        assert_eq!(item.quantity, 10);
        assert_eq!(item.unit, "strip");
        assert_eq!(item.price_per_item, Amount::from(5_000));
    }

    #[test]
    fn test_parse_item_name_with_colon() {
        let item = MedicineDetail::from_str("Vitamin: C:2:box:100").unwrap();
        assert_eq!(item.name, "Vitamin: C");
        assert_eq!(item.quantity, 2);
    }

    #[test]
    fn test_parse_item_errors() {
        assert!(MedicineDetail::from_str("Paracetamol:10").is_err());
        assert!(MedicineDetail::from_str("Paracetamol:ten:strip:100").is_err());
        assert!(MedicineDetail::from_str("Paracetamol:0:strip:100").is_err());
        assert!(MedicineDetail::from_str(":1:strip:100").is_err());
    }

    #[test]
    fn test_unsaved_id_is_not_sent() {
        let item = MedicineDetail::new(4, "Kasa", 1, "roll", Amount::from(1_000));
        let value = serde_json::to_value(&item).unwrap();
        assert!(value.get("id").is_none());
        assert_eq!(value["spending_id"], 4);
    }
}

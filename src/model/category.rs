use serde::{Deserialize, Serialize};

/// The id of the spending category whose spendings are itemized medicine purchases.
const MEDICINE_CATEGORY_ID: i64 = 9;

/// Whether a category belongs to the income side or the spending side of the ledger. The backend
/// keeps them in separate tables with the same shape.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum CategoryScope {
    #[default]
    Income,
    Spending,
}

serde_plain::derive_display_from_serialize!(CategoryScope);
serde_plain::derive_fromstr_from_deserialize!(CategoryScope);

/// How spendings in a category are recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKind {
    /// A single amount is entered by hand.
    #[default]
    General,
    /// The amount is the sum of medicine line items.
    Medicine,
}

serde_plain::derive_display_from_serialize!(CategoryKind);

impl CategoryKind {
    /// The kind of a spending category id.
    pub fn of(category_id: i64) -> CategoryKind {
        if category_id == MEDICINE_CATEGORY_ID {
            CategoryKind::Medicine
        } else {
            CategoryKind::General
        }
    }

    pub fn is_medicine(&self) -> bool {
        matches!(self, CategoryKind::Medicine)
    }

    /// The spending category that holds this kind, when it is a single fixed category.
    pub fn category_id(&self) -> Option<i64> {
        match self {
            CategoryKind::General => None,
            CategoryKind::Medicine => Some(MEDICINE_CATEGORY_ID),
        }
    }
}

/// A named grouping for income or spending records, e.g. "Klaim BPJS" or "Obat".
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

impl Category {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Meaningful only for spending categories.
    pub fn kind(&self) -> CategoryKind {
        CategoryKind::of(self.id)
    }
}

/// Looks up category names by id.
pub fn category_name(categories: &[Category], id: i64) -> String {
    categories
        .iter()
        .find(|c| c.id == id)
        .map(|c| c.name.clone())
        .unwrap_or_else(|| format!("Category #{id}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_medicine_kind() {
        assert_eq!(CategoryKind::of(9), CategoryKind::Medicine);
        assert_eq!(CategoryKind::of(1), CategoryKind::General);
        assert!(Category::new(9, "Obat").kind().is_medicine());
    }

    #[test]
    fn test_category_name_fallback() {
        let cats = vec![Category::new(1, "Klaim BPJS")];
        assert_eq!(category_name(&cats, 1), "Klaim BPJS");
        assert_eq!(category_name(&cats, 4), "Category #4");
    }

    #[test]
    fn test_scope_from_str() {
        use std::str::FromStr;
        assert_eq!(
            CategoryScope::from_str("spending").unwrap(),
            CategoryScope::Spending
        );
        assert_eq!(CategoryScope::Income.to_string(), "income");
    }
}

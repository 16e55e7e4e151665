//! Month, semester and year totals for the charts.
//!
//! Everything is recomputed from the rows it is given. Rows dated outside the requested year are
//! ignored.

use crate::model::{category_name, Amount, Category, Entry};
use serde::Serialize;
use std::fmt::{Display, Formatter};

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// One category's share of a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slice {
    pub name: String,
    pub value: Amount,
}

/// The rows of one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthSummary {
    /// 1 to 12.
    pub month: u32,
    pub name: &'static str,
    pub total: Amount,
    /// Per-category totals, in the order the categories first appear in the month.
    pub breakdown: Vec<Slice>,
}

/// Adds `amount` to the slice named `name`, appending it if it is new.
fn accumulate(slices: &mut Vec<Slice>, name: String, amount: Amount) {
    match slices.iter_mut().find(|s| s.name == name) {
        Some(slice) => slice.value += amount,
        None => slices.push(Slice {
            name,
            value: amount,
        }),
    }
}

/// Groups the rows of `year` by month, and within each month by category. Always returns twelve
/// entries, January first.
pub fn monthly<E: Entry>(rows: &[E], year: i32, categories: &[Category]) -> Vec<MonthSummary> {
    let mut months: Vec<MonthSummary> = MONTH_NAMES
        .into_iter()
        .zip(1..)
        .map(|(name, month)| MonthSummary {
            month,
            name,
            total: Amount::ZERO,
            breakdown: Vec::new(),
        })
        .collect();

    for row in rows.iter().filter(|r| r.year() == year) {
        let summary = &mut months[row.month() as usize - 1];
        summary.total += row.amount();
        accumulate(
            &mut summary.breakdown,
            category_name(categories, row.category_id()),
            row.amount(),
        );
    }
    months
}

/// Per-category totals for the whole of `year`, in order of first appearance.
pub fn by_category<E: Entry>(rows: &[E], year: i32, categories: &[Category]) -> Vec<Slice> {
    let mut slices = Vec::new();
    for row in rows.iter().filter(|r| r.year() == year) {
        accumulate(
            &mut slices,
            category_name(categories, row.category_id()),
            row.amount(),
        );
    }
    slices
}

/// Half-year and full-year totals.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Semesters {
    /// January to June.
    pub first: Amount,
    /// July to December.
    pub second: Amount,
    pub year: Amount,
}

pub fn semesters(months: &[MonthSummary]) -> Semesters {
    let sum = |range: std::ops::RangeInclusive<u32>| -> Amount {
        months
            .iter()
            .filter(|m| range.contains(&m.month))
            .map(|m| m.total)
            .sum()
    };
    let first = sum(1..=6);
    let second = sum(7..=12);
    Semesters {
        first,
        second,
        year: first + second,
    }
}

/// How a period ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Balance {
    Surplus,
    Deficit,
    Even,
}

impl Balance {
    pub fn of(surplus: Amount) -> Self {
        if surplus.is_positive() {
            Balance::Surplus
        } else if surplus.is_negative() {
            Balance::Deficit
        } else {
            Balance::Even
        }
    }
}

impl Display for Balance {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Balance::Surplus => "Surplus",
            Balance::Deficit => "Deficit",
            Balance::Even => "Even",
        })
    }
}

/// Income against spending for one period. `surplus` is income minus spending and is negative for
/// a deficit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Line {
    pub label: String,
    pub income: Amount,
    pub spending: Amount,
    pub surplus: Amount,
    pub balance: Balance,
}

impl Line {
    fn new(label: impl Into<String>, income: Amount, spending: Amount) -> Self {
        let surplus = income - spending;
        Self {
            label: label.into(),
            income,
            spending,
            surplus,
            balance: Balance::of(surplus),
        }
    }
}

/// The combined income and spending view of a year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mixture {
    pub year: i32,
    pub months: Vec<Line>,
    /// Semester 1 then semester 2.
    pub semesters: Vec<Line>,
    pub total: Line,
}

pub fn mixture<I, S>(incomes: &[I], spendings: &[S], year: i32) -> Mixture
where
    I: Entry,
    S: Entry,
{
    let income_months = monthly(incomes, year, &[]);
    let spending_months = monthly(spendings, year, &[]);
    let months = income_months
        .iter()
        .zip(spending_months.iter())
        .map(|(i, s)| Line::new(i.name, i.total, s.total))
        .collect();

    let income = semesters(&income_months);
    let spending = semesters(&spending_months);
    Mixture {
        year,
        months,
        semesters: vec![
            Line::new("Semester 1", income.first, spending.first),
            Line::new("Semester 2", income.second, spending.second),
        ],
        total: Line::new(year.to_string(), income.year, spending.year),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Income, Spending};
    use chrono::NaiveDate;

    fn income(id: i64, y: i32, m: u32, category_id: i64, amount: i64) -> Income {
        Income {
            id,
            name: format!("income {id}"),
            amount: Amount::from(amount),
            category_id,
            date: NaiveDate::from_ymd_opt(y, m, 15).unwrap(),
        }
    }

    fn spending(id: i64, m: u32, amount: i64) -> Spending {
        Spending {
            id,
            name: format!("spending {id}"),
            amount: Amount::from(amount),
            category_id: 2,
            date: NaiveDate::from_ymd_opt(2024, m, 1).unwrap(),
            company_id: None,
        }
    }

    fn categories() -> Vec<Category> {
        vec![Category::new(1, "A"), Category::new(2, "B")]
    }

    #[test]
    fn test_breakdown_for_one_month() {
        let rows = vec![income(1, 2024, 1, 1, 100), income(2, 2024, 1, 2, 50)];
        let months = monthly(&rows, 2024, &categories());
        assert_eq!(months.len(), 12);
        assert_eq!(months[0].total, Amount::from(150));
        assert_eq!(
            months[0].breakdown,
            vec![
                Slice {
                    name: "A".to_string(),
                    value: Amount::from(100)
                },
                Slice {
                    name: "B".to_string(),
                    value: Amount::from(50)
                },
            ]
        );
        assert!(months[1].breakdown.is_empty());
    }

    #[test]
    fn test_breakdown_keeps_first_appearance_order() {
        let rows = vec![
            income(1, 2024, 3, 2, 10),
            income(2, 2024, 3, 1, 20),
            income(3, 2024, 3, 2, 5),
        ];
        let months = monthly(&rows, 2024, &categories());
        let names: Vec<&str> = months[2].breakdown.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A"]);
        assert_eq!(months[2].breakdown[0].value, Amount::from(15));
    }

    #[test]
    fn test_month_totals_sum_to_row_total() {
        let rows: Vec<Income> = (1..=40)
            .map(|i| income(i, 2024, (i % 12 + 1) as u32, i % 3, i * 1_250))
            .collect();
        let months = monthly(&rows, 2024, &categories());
        let by_month: Amount = months.iter().map(|m| m.total).sum();
        let by_row: Amount = rows.iter().map(|r| r.amount).sum();
        assert_eq!(by_month, by_row);
    }

    #[test]
    fn test_other_years_are_ignored() {
        let rows = vec![income(1, 2023, 5, 1, 999), income(2, 2024, 5, 1, 1)];
        let months = monthly(&rows, 2024, &categories());
        assert_eq!(months[4].total, Amount::from(1));
        assert_eq!(by_category(&rows, 2023, &categories())[0].value, Amount::from(999));
    }

    #[test]
    fn test_unknown_category_name() {
        let rows = vec![income(1, 2024, 5, 7, 1)];
        assert_eq!(by_category(&rows, 2024, &categories())[0].name, "Category #7");
    }

    #[test]
    fn test_semesters() {
        let rows: Vec<Income> = (1..=12)
            .map(|m| income(m, 2024, m as u32, 1, m * 100))
            .collect();
        let months = monthly(&rows, 2024, &categories());
        let s = semesters(&months);
        assert_eq!(s.first, Amount::from(100 + 200 + 300 + 400 + 500 + 600));
        assert_eq!(s.second, Amount::from(700 + 800 + 900 + 1000 + 1100 + 1200));
        assert_eq!(s.year, s.first + s.second);
    }

    #[test]
    fn test_mixture_surplus_and_deficit() {
        let incomes = vec![income(1, 2024, 1, 1, 1_000), income(2, 2024, 8, 1, 300)];
        let spendings = vec![spending(1, 1, 400), spending(2, 8, 500)];
        let mix = mixture(&incomes, &spendings, 2024);

        assert_eq!(mix.months[0].surplus, Amount::from(600));
        assert_eq!(mix.months[0].balance, Balance::Surplus);
        assert_eq!(mix.months[7].surplus, Amount::from(-200));
        assert_eq!(mix.months[7].balance, Balance::Deficit);
        assert_eq!(mix.months[3].balance, Balance::Even);

        assert_eq!(mix.semesters[0].surplus, Amount::from(600));
        assert_eq!(mix.semesters[1].surplus, Amount::from(-200));
        assert_eq!(mix.total.income, Amount::from(1_300));
        assert_eq!(mix.total.spending, Amount::from(900));
        assert_eq!(mix.total.surplus, Amount::from(400));
        assert_eq!(mix.total.label, "2024");
    }
}

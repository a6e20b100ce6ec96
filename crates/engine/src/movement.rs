use api_types::movement::{MovementCategory, MovementView};
use chrono::NaiveDate;

use crate::Money;

/// Category tag of a movement.
///
/// Only [`Income`](Category::Income) and [`Expense`](Category::Expense) take
/// part in totals. Any other tag is kept as received in
/// [`Other`](Category::Other) and ignored by every aggregate.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Income,
    Expense,
    Other(String),
}

impl Category {
    /// Canonical tag as used on the wire (`INCOME`, `EXPENSE` or the raw tag).
    pub fn as_str(&self) -> &str {
        match self {
            Self::Income => "INCOME",
            Self::Expense => "EXPENSE",
            Self::Other(raw) => raw.as_str(),
        }
    }
}

impl From<MovementCategory> for Category {
    fn from(value: MovementCategory) -> Self {
        match value {
            MovementCategory::Income => Self::Income,
            MovementCategory::Expense => Self::Expense,
            MovementCategory::Other(raw) => Self::Other(raw),
        }
    }
}

impl From<Category> for MovementCategory {
    fn from(value: Category) -> Self {
        match value {
            Category::Income => Self::Income,
            Category::Expense => Self::Expense,
            Category::Other(raw) => Self::Other(raw),
        }
    }
}

/// A single financial movement as delivered by a movement source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Movement {
    pub id: Option<u64>,
    pub description: String,
    pub amount: Money,
    pub category: Category,
    pub tag: Option<String>,
    pub date: NaiveDate,
    pub notes: Option<String>,
}

impl Movement {
    pub fn new(
        description: impl Into<String>,
        amount: Money,
        category: Category,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: None,
            description: description.into(),
            amount,
            category,
            tag: None,
            date,
            notes: None,
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn is_income(&self) -> bool {
        self.category == Category::Income
    }

    pub fn is_expense(&self) -> bool {
        self.category == Category::Expense
    }
}

impl From<MovementView> for Movement {
    fn from(view: MovementView) -> Self {
        Self {
            id: view.id,
            description: view.description,
            amount: Money::new(view.amount_minor),
            category: view.category.into(),
            tag: view.tag,
            date: view.date,
            notes: view.notes,
        }
    }
}

impl From<&Movement> for MovementView {
    fn from(movement: &Movement) -> Self {
        Self {
            id: movement.id,
            description: movement.description.clone(),
            amount_minor: movement.amount.cents(),
            category: movement.category.clone().into(),
            tag: movement.tag.clone(),
            date: movement.date,
            notes: movement.notes.clone(),
        }
    }
}

use crate::{Money, Movement};

/// Chart-ready two-bucket distribution: income first, expense second.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Distribution {
    pub values: [Money; 2],
}

impl Distribution {
    pub const LABELS: [&'static str; 2] = ["Income", "Expense"];

    /// Pairs each label with its value, in chart order.
    pub fn entries(&self) -> [(&'static str, Money); 2] {
        [
            (Self::LABELS[0], self.values[0]),
            (Self::LABELS[1], self.values[1]),
        ]
    }
}

/// Income and expense totals for one list of movements.
///
/// Built in one go by [`summarize`]; `distribution` always mirrors the two
/// totals.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub total_income: Money,
    pub total_expense: Money,
    pub distribution: Distribution,
}

impl Summary {
    /// Income minus expense.
    pub fn balance(&self) -> Money {
        self.total_income - self.total_expense
    }
}

/// Sums income and expense amounts, left to right.
///
/// Totals saturate at the `i64` bounds, so extreme amounts never panic.
///
/// Movements whose category is neither income nor expense count toward
/// neither total.
pub fn summarize(movements: &[Movement]) -> Summary {
    let total_income: Money = movements
        .iter()
        .filter(|m| m.is_income())
        .map(|m| m.amount)
        .sum();
    let total_expense: Money = movements
        .iter()
        .filter(|m| m.is_expense())
        .map(|m| m.amount)
        .sum();

    Summary {
        total_income,
        total_expense,
        distribution: Distribution {
            values: [total_income, total_expense],
        },
    }
}

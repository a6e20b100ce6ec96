//! Read-only figures derived from a movement list, beyond the two totals:
//! period windows, expense breakdown by tag, daily evolution and a simple
//! end-of-month forecast.
use std::collections::HashMap;

use chrono::{Datelike, Days, NaiveDate};

use crate::{EngineError, Money, Movement};

pub const UNCATEGORIZED: &str = "Uncategorized";

/// Breakdown divisor when expenses do not sum to a positive amount.
const FALLBACK_DIVISOR_CENTS: i64 = 100;

/// Share of total expenses attributed to one tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagShare {
    pub tag: String,
    pub total: Money,
    pub count: usize,
    /// Whole percent, rounded half-up.
    pub percentage: i64,
}

/// Income, expense and running balance for a single day.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub income: Money,
    pub expense: Money,
    pub balance: Money,
}

/// Linear projection of the current month.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Forecast {
    pub year: i32,
    pub month: u32,
    pub projected_income: Money,
    pub projected_expense: Money,
}

impl Forecast {
    pub fn projected_balance(&self) -> Money {
        self.projected_income - self.projected_expense
    }

    /// `YYYY-MM`
    pub fn period(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

/// Keeps movements dated within `[today - days, today]`, preserving order.
pub fn within_last_days(movements: &[Movement], today: NaiveDate, days: u32) -> Vec<Movement> {
    let start = today
        .checked_sub_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MIN);
    movements
        .iter()
        .filter(|m| m.date >= start && m.date <= today)
        .cloned()
        .collect()
}

/// Groups expenses by tag, largest total first.
///
/// Percentages are taken against the sum of all expense totals; when that sum
/// is not positive one whole currency unit (100 cents) is used instead.
pub fn expense_breakdown(movements: &[Movement]) -> Vec<TagShare> {
    let mut totals: HashMap<&str, (Money, usize)> = HashMap::new();
    for movement in movements.iter().filter(|m| m.is_expense()) {
        let tag = movement.tag.as_deref().unwrap_or(UNCATEGORIZED);
        let entry = totals.entry(tag).or_insert((Money::ZERO, 0));
        entry.0 += movement.amount;
        entry.1 += 1;
    }

    let grand_total: Money = totals.values().map(|(total, _)| *total).sum();
    let divisor = if grand_total.is_positive() {
        grand_total.cents()
    } else {
        FALLBACK_DIVISOR_CENTS
    };

    let mut shares: Vec<TagShare> = totals
        .into_iter()
        .map(|(tag, (total, count))| TagShare {
            tag: tag.to_string(),
            total,
            count,
            percentage: saturate(div_round_half_up(
                i128::from(total.cents()) * 100,
                i128::from(divisor),
            )),
        })
        .collect();

    shares.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.tag.cmp(&b.tag)));
    shares
}

/// One point per day for the `days + 1` days ending at `today`, oldest first.
pub fn daily_evolution(movements: &[Movement], today: NaiveDate, days: u32) -> Vec<DailyPoint> {
    let mut per_day: HashMap<NaiveDate, (Money, Money)> = HashMap::new();
    for movement in movements {
        let entry = per_day.entry(movement.date).or_default();
        if movement.is_income() {
            entry.0 += movement.amount;
        } else if movement.is_expense() {
            entry.1 += movement.amount;
        }
    }

    let mut balance = Money::ZERO;
    (0..=days)
        .rev()
        .filter_map(|offset| today.checked_sub_days(Days::new(u64::from(offset))))
        .map(|date| {
            let (income, expense) = per_day.get(&date).copied().unwrap_or_default();
            balance += income - expense;
            DailyPoint {
                date,
                income,
                expense,
                balance,
            }
        })
        .collect()
}

/// Projects the month containing `today` from what was recorded up to now.
///
/// Each total is scaled by `days_in_month / day_of_month` and rounded half-up
/// to the cent.
pub fn month_forecast(movements: &[Movement], today: NaiveDate) -> Result<Forecast, EngineError> {
    let (year, month) = (today.year(), today.month());
    let days_in_month = i128::from(days_in_month(year, month)?);
    let elapsed = i128::from(today.day());

    let mut income = Money::ZERO;
    let mut expense = Money::ZERO;
    for movement in movements
        .iter()
        .filter(|m| m.date.year() == year && m.date.month() == month && m.date <= today)
    {
        if movement.is_income() {
            income += movement.amount;
        } else if movement.is_expense() {
            expense += movement.amount;
        }
    }

    let project = |total: Money| {
        let scaled = div_round_half_up(i128::from(total.cents()) * days_in_month, elapsed);
        Money::new(saturate(scaled))
    };

    Ok(Forecast {
        year,
        month,
        projected_income: project(income),
        projected_expense: project(expense),
    })
}

fn days_in_month(year: i32, month: u32) -> Result<u32, EngineError> {
    let invalid = || EngineError::InvalidDate(format!("{year:04}-{month:02}"));
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(invalid)?;
    u32::try_from(next.signed_duration_since(first).num_days()).map_err(|_| invalid())
}

/// Clamps a wide intermediate into `i64`.
fn saturate(value: i128) -> i64 {
    i64::try_from(value).unwrap_or(if value < 0 { i64::MIN } else { i64::MAX })
}

/// Integer division rounding halves away from zero. `den` must be positive.
fn div_round_half_up(num: i128, den: i128) -> i128 {
    let quotient = num / den;
    let remainder = num % den;
    if remainder.abs() * 2 >= den {
        quotient + num.signum()
    } else {
        quotient
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Category;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn expense(cents: i64, tag: Option<&str>, on: NaiveDate) -> Movement {
        let movement = Movement::new("expense", Money::new(cents), Category::Expense, on);
        match tag {
            Some(tag) => movement.with_tag(tag),
            None => movement,
        }
    }

    fn income(cents: i64, on: NaiveDate) -> Movement {
        Movement::new("income", Money::new(cents), Category::Income, on)
    }

    #[test]
    fn window_is_inclusive_on_both_ends() {
        let today = date(2025, 11, 30);
        let movements = vec![
            income(1, date(2025, 10, 31)),
            income(2, date(2025, 11, 1)),
            income(3, date(2025, 11, 30)),
            income(4, date(2025, 12, 1)),
        ];
        let kept = within_last_days(&movements, today, 29);
        let cents: Vec<i64> = kept.iter().map(|m| m.amount.cents()).collect();
        assert_eq!(cents, vec![2, 3]);
    }

    #[test]
    fn breakdown_groups_by_tag_and_sorts_descending() {
        let on = date(2025, 11, 10);
        let movements = vec![
            expense(2_000, Some("Food"), on),
            expense(6_000, Some("Rent"), on),
            expense(1_000, Some("Food"), on),
            expense(1_000, None, on),
            income(50_000, on),
        ];
        let shares = expense_breakdown(&movements);
        assert_eq!(
            shares,
            vec![
                TagShare {
                    tag: "Rent".to_string(),
                    total: Money::new(6_000),
                    count: 1,
                    percentage: 60,
                },
                TagShare {
                    tag: "Food".to_string(),
                    total: Money::new(3_000),
                    count: 2,
                    percentage: 30,
                },
                TagShare {
                    tag: UNCATEGORIZED.to_string(),
                    total: Money::new(1_000),
                    count: 1,
                    percentage: 10,
                },
            ]
        );
    }

    #[test]
    fn breakdown_rounds_half_up() {
        let on = date(2025, 11, 10);
        // 1/8 = 12.5% -> 13, 7/8 = 87.5% -> 88
        let movements = vec![expense(100, Some("A"), on), expense(700, Some("B"), on)];
        let shares = expense_breakdown(&movements);
        assert_eq!(shares[0].percentage, 88);
        assert_eq!(shares[1].percentage, 13);
    }

    #[test]
    fn non_positive_total_divides_by_one_unit() {
        let today = date(2025, 3, 10);
        let shares = expense_breakdown(&[
            expense(250, Some("Refund"), today),
            expense(-400, Some("Chargeback"), today),
        ]);

        let refund = shares.iter().find(|s| s.tag == "Refund").unwrap();
        let chargeback = shares.iter().find(|s| s.tag == "Chargeback").unwrap();
        assert_eq!(refund.percentage, 250);
        assert_eq!(chargeback.percentage, -400);
    }

    #[test]
    fn huge_tag_totals_saturate_the_percentage() {
        let today = date(2025, 3, 10);
        let shares = expense_breakdown(&[
            expense(i64::MAX, Some("Big"), today),
            expense(i64::MIN + 2, Some("Small"), today),
        ]);

        // the two tags net to one cent, so each share is far beyond i64
        let big = shares.iter().find(|s| s.tag == "Big").unwrap();
        let small = shares.iter().find(|s| s.tag == "Small").unwrap();
        assert_eq!(big.percentage, i64::MAX);
        assert_eq!(small.percentage, i64::MIN);
        assert_eq!(saturate(i128::from(i64::MAX) * 3), i64::MAX);
        assert_eq!(saturate(i128::from(i64::MIN) * 3), i64::MIN);
    }

    #[test]
    fn forecast_saturates_instead_of_failing() {
        let today = date(2025, 2, 1);
        let forecast = month_forecast(&[income(i64::MAX, today)], today).unwrap();
        assert_eq!(forecast.projected_income, Money::new(i64::MAX));
    }

    #[test]
    fn breakdown_of_no_expenses_is_empty() {
        assert!(expense_breakdown(&[income(100, date(2025, 1, 1))]).is_empty());
    }

    #[test]
    fn evolution_accumulates_balance_oldest_first() {
        let today = date(2025, 11, 3);
        let movements = vec![
            income(10_000, date(2025, 11, 1)),
            expense(2_500, None, date(2025, 11, 2)),
            expense(500, None, date(2025, 11, 3)),
            Movement::new(
                "ignored",
                Money::new(999),
                Category::Other("X".to_string()),
                date(2025, 11, 3),
            ),
        ];
        let points = daily_evolution(&movements, today, 3);
        assert_eq!(points.len(), 4);
        assert_eq!(points[0].date, date(2025, 10, 31));
        assert_eq!(points[0].balance, Money::ZERO);
        assert_eq!(points[1].income, Money::new(10_000));
        assert_eq!(points[2].balance, Money::new(7_500));
        assert_eq!(points[3].expense, Money::new(500));
        assert_eq!(points[3].balance, Money::new(7_000));
    }

    #[test]
    fn forecast_scales_month_to_date() {
        let today = date(2025, 11, 10);
        let movements = vec![
            income(100_000, date(2025, 11, 5)),
            expense(10_000, None, date(2025, 11, 9)),
            expense(99_999, None, date(2025, 10, 31)),
        ];
        let forecast = month_forecast(&movements, today).unwrap();
        assert_eq!(forecast.period(), "2025-11");
        assert_eq!(forecast.projected_income, Money::new(300_000));
        assert_eq!(forecast.projected_expense, Money::new(30_000));
        assert_eq!(forecast.projected_balance(), Money::new(270_000));
    }

    #[test]
    fn forecast_handles_december_and_rounding() {
        // 100 cents * 31 / 3 = 1033.33 -> 1033
        let today = date(2025, 12, 3);
        let forecast = month_forecast(&[expense(100, None, date(2025, 12, 1))], today).unwrap();
        assert_eq!(forecast.projected_expense, Money::new(1_033));
        assert_eq!(forecast.projected_income, Money::ZERO);
    }

    #[test]
    fn rounding_is_symmetric() {
        assert_eq!(div_round_half_up(5, 2), 3);
        assert_eq!(div_round_half_up(-5, 2), -3);
        assert_eq!(div_round_half_up(4, 3), 1);
        assert_eq!(div_round_half_up(-4, 3), -1);
    }
}

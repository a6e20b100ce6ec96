//! One-shot, non-interactive commands. Each performs a single fetch and
//! writes plain output.
use std::{io::Write, path::Path};

use chrono::NaiveDate;
use engine::{COLUMNS, Currency, Dashboard, MovementList, MovementSource};
use serde::Serialize;

use crate::{config::AppConfig, error::Result};

#[derive(Debug, Serialize)]
struct SummaryReport<'a> {
    currency: &'static str,
    window_days: Option<u32>,
    total_income_minor: i64,
    total_expense_minor: i64,
    balance_minor: i64,
    breakdown: Vec<TagReport<'a>>,
    forecast: Option<ForecastReport>,
}

#[derive(Debug, Serialize)]
struct TagReport<'a> {
    tag: &'a str,
    total_minor: i64,
    count: usize,
    percentage: i64,
}

#[derive(Debug, Serialize)]
struct ForecastReport {
    period: String,
    projected_income_minor: i64,
    projected_expense_minor: i64,
    projected_balance_minor: i64,
}

impl<'a> SummaryReport<'a> {
    fn new(dashboard: &'a Dashboard, currency: Currency) -> Self {
        let summary = dashboard.summary();
        Self {
            currency: currency.code(),
            window_days: dashboard.window_days(),
            total_income_minor: summary.total_income.cents(),
            total_expense_minor: summary.total_expense.cents(),
            balance_minor: summary.balance().cents(),
            breakdown: dashboard
                .breakdown()
                .iter()
                .map(|share| TagReport {
                    tag: &share.tag,
                    total_minor: share.total.cents(),
                    count: share.count,
                    percentage: share.percentage,
                })
                .collect(),
            forecast: dashboard.forecast().map(|f| ForecastReport {
                period: f.period(),
                projected_income_minor: f.projected_income.cents(),
                projected_expense_minor: f.projected_expense.cents(),
                projected_balance_minor: f.projected_balance().cents(),
            }),
        }
    }
}

pub async fn summary<S, W>(
    source: &S,
    config: &AppConfig,
    today: NaiveDate,
    json: bool,
    out: &mut W,
) -> Result<()>
where
    S: MovementSource,
    W: Write,
{
    let movements = source.list_movements().await?;
    let mut dashboard = Dashboard::new().with_window(config.window());
    dashboard.apply(&movements, today);

    if json {
        let report = SummaryReport::new(&dashboard, config.currency);
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
        return Ok(());
    }

    let currency = config.currency;
    let summary = dashboard.summary();
    writeln!(out, "Income:  {}", summary.total_income.format(currency))?;
    writeln!(out, "Expense: {}", summary.total_expense.format(currency))?;
    writeln!(out, "Balance: {}", summary.balance().format(currency))?;

    if !dashboard.breakdown().is_empty() {
        writeln!(out)?;
        writeln!(out, "Expenses by tag")?;
        for share in dashboard.breakdown() {
            writeln!(
                out,
                "  {:<16} {:>3}%  {} ({})",
                share.tag,
                share.percentage,
                share.total.format(currency),
                share.count
            )?;
        }
    }

    if let Some(forecast) = dashboard.forecast() {
        writeln!(out)?;
        writeln!(
            out,
            "Forecast {}: income {}, expense {}, balance {}",
            forecast.period(),
            forecast.projected_income.format(currency),
            forecast.projected_expense.format(currency),
            forecast.projected_balance().format(currency)
        )?;
    }

    Ok(())
}

pub async fn list<S, W>(source: &S, currency: Currency, out: &mut W) -> Result<()>
where
    S: MovementSource,
    W: Write,
{
    let mut list = MovementList::new();
    list.apply(source.list_movements().await?);
    let rows = list.rows(currency);

    let mut widths = COLUMNS.map(|c| c.header().chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let headers = COLUMNS.map(|c| c.header().to_string());
    write_row(out, &headers, &widths)?;
    for row in &rows {
        write_row(out, row, &widths)?;
    }
    Ok(())
}

fn write_row<W: Write>(out: &mut W, cells: &[String; 4], widths: &[usize; 4]) -> Result<()> {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(out, "{}", line.trim_end())?;
    Ok(())
}

pub async fn export<S: MovementSource>(source: &S, path: &Path) -> Result<usize> {
    let movements = source.list_movements().await?;
    let bytes = engine::export::to_csv(&movements)?;
    tokio::fs::write(path, bytes).await?;
    tracing::info!(count = movements.len(), path = %path.display(), "movements exported");
    Ok(movements.len())
}

#[cfg(test)]
mod tests {
    use engine::{Category, InMemorySource, Money, Movement, SourceError};

    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    fn source() -> InMemorySource {
        InMemorySource::new(vec![
            Movement::new("Salary", Money::new(100_000), Category::Income, today()),
            Movement::new("Lunch", Money::new(1_550), Category::Expense, today())
                .with_tag("Food"),
        ])
    }

    struct Offline;

    impl MovementSource for Offline {
        async fn list_movements(&self) -> std::result::Result<Vec<Movement>, SourceError> {
            Err(SourceError::Transport("connection refused".into()))
        }
    }

    #[tokio::test]
    async fn summary_prints_totals_and_breakdown() {
        let mut out = Vec::new();
        summary(&source(), &AppConfig::default(), today(), false, &mut out)
            .await
            .unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Income:  €1000.00"), "{text}");
        assert!(text.contains("Expense: €15.50"));
        assert!(text.contains("Balance: €984.50"));
        assert!(text.contains("Food"));
        assert!(text.contains("Forecast 2025-03"));
    }

    #[tokio::test]
    async fn summary_json_uses_minor_units() {
        let mut out = Vec::new();
        summary(&source(), &AppConfig::default(), today(), true, &mut out)
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(value["currency"], "EUR");
        assert_eq!(value["total_income_minor"], 100_000);
        assert_eq!(value["total_expense_minor"], 1_550);
        assert_eq!(value["balance_minor"], 98_450);
        assert_eq!(value["breakdown"][0]["tag"], "Food");
        assert_eq!(value["breakdown"][0]["percentage"], 100);
        assert_eq!(value["forecast"]["period"], "2025-03");
    }

    #[tokio::test]
    async fn list_prints_header_and_rows_in_order() {
        let mut out = Vec::new();
        list(&source(), Currency::Eur, &mut out).await.unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Description"));
        assert!(lines[1].starts_with("Salary"));
        assert!(lines[2].starts_with("Lunch"));
        assert!(lines[2].contains("EXPENSE"));
    }

    #[tokio::test]
    async fn source_errors_propagate() {
        let mut out = Vec::new();
        let err = summary(&Offline, &AppConfig::default(), today(), false, &mut out)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("connection refused"));
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn export_writes_csv_file() {
        let path = std::env::temp_dir().join(format!(
            "fincontrol_tui_export_{}.csv",
            std::process::id()
        ));
        let written = export(&source(), &path).await.unwrap();
        let body = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(written, 2);
        assert_eq!(body.lines().count(), 3);
        assert!(body.contains("Lunch"));
    }
}

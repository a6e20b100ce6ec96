use chrono::NaiveDate;

use crate::{
    Movement, MovementSource, SourceError,
    analytics::{self, DailyPoint, Forecast, TagShare},
    summary::{Distribution, Summary, summarize},
};

/// Days of daily evolution shown when no window is configured.
pub const DEFAULT_EVOLUTION_DAYS: u32 = 30;

/// Outcome of the last fetch performed by a component.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LoadStatus {
    /// Nothing fetched yet.
    #[default]
    Pending,
    Ready,
    /// The source failed; the message is meant for the user.
    Failed(String),
}

impl LoadStatus {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }
}

impl From<&SourceError> for LoadStatus {
    fn from(err: &SourceError) -> Self {
        Self::Failed(err.to_string())
    }
}

/// Dashboard state: income/expense totals plus the figures drawn around them.
///
/// Everything is rebuilt from scratch on each [`activate`](Self::activate) and
/// swapped in at once, so readers never see totals from one fetch next to a
/// breakdown from another.
#[derive(Debug, Default)]
pub struct Dashboard {
    window_days: Option<u32>,
    summary: Summary,
    breakdown: Vec<TagShare>,
    evolution: Vec<DailyPoint>,
    forecast: Option<Forecast>,
    status: LoadStatus,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts totals, breakdown and evolution to the last `days` days.
    pub fn with_window(mut self, days: Option<u32>) -> Self {
        self.window_days = days.filter(|d| *d > 0);
        self
    }

    /// Fetches movements once and applies them.
    ///
    /// On failure the previous figures are kept and the error is recorded in
    /// [`status`](Self::status).
    pub async fn activate<S: MovementSource>(&mut self, source: &S, today: NaiveDate) {
        match source.list_movements().await {
            Ok(movements) => self.apply(&movements, today),
            Err(err) => {
                tracing::warn!("dashboard refresh failed: {err}");
                self.status = LoadStatus::from(&err);
            }
        }
    }

    pub fn apply(&mut self, movements: &[Movement], today: NaiveDate) {
        let scoped = match self.window_days {
            Some(days) => analytics::within_last_days(movements, today, days),
            None => movements.to_vec(),
        };
        let evolution_days = self.window_days.unwrap_or(DEFAULT_EVOLUTION_DAYS);

        let summary = summarize(&scoped);
        let breakdown = analytics::expense_breakdown(&scoped);
        let evolution = analytics::daily_evolution(&scoped, today, evolution_days);
        let forecast = match analytics::month_forecast(movements, today) {
            Ok(forecast) => Some(forecast),
            Err(err) => {
                tracing::warn!("forecast unavailable: {err}");
                None
            }
        };

        tracing::debug!(
            movements = movements.len(),
            scoped = scoped.len(),
            "dashboard refreshed"
        );

        self.summary = summary;
        self.breakdown = breakdown;
        self.evolution = evolution;
        self.forecast = forecast;
        self.status = LoadStatus::Ready;
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    pub fn total_income(&self) -> crate::Money {
        self.summary.total_income
    }

    pub fn total_expense(&self) -> crate::Money {
        self.summary.total_expense
    }

    pub fn distribution(&self) -> &Distribution {
        &self.summary.distribution
    }

    pub fn breakdown(&self) -> &[TagShare] {
        &self.breakdown
    }

    pub fn evolution(&self) -> &[DailyPoint] {
        &self.evolution
    }

    pub fn forecast(&self) -> Option<&Forecast> {
        self.forecast.as_ref()
    }

    pub fn window_days(&self) -> Option<u32> {
        self.window_days
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }
}

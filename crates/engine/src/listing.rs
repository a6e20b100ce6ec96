use crate::{Currency, LoadStatus, Movement, MovementSource};

/// Columns of the movement table, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Column {
    Description,
    Amount,
    Category,
    Date,
}

pub const COLUMNS: [Column; 4] = [
    Column::Description,
    Column::Amount,
    Column::Category,
    Column::Date,
];

impl Column {
    /// Field name, as used by table bindings and exports.
    pub fn key(self) -> &'static str {
        match self {
            Self::Description => "description",
            Self::Amount => "amount",
            Self::Category => "category",
            Self::Date => "date",
        }
    }

    pub fn header(self) -> &'static str {
        match self {
            Self::Description => "Description",
            Self::Amount => "Amount",
            Self::Category => "Category",
            Self::Date => "Date",
        }
    }

    pub fn cell(self, movement: &Movement, currency: Currency) -> String {
        match self {
            Self::Description => movement.description.clone(),
            Self::Amount => movement.amount.format(currency),
            Self::Category => movement.category.as_str().to_string(),
            Self::Date => movement.date.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Movements exactly as the source returned them, ready for a table.
#[derive(Debug, Default)]
pub struct MovementList {
    movements: Vec<Movement>,
    status: LoadStatus,
}

impl MovementList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches movements once and replaces the list with the result.
    pub async fn activate<S: MovementSource>(&mut self, source: &S) {
        match source.list_movements().await {
            Ok(movements) => self.apply(movements),
            Err(err) => {
                tracing::warn!("movement list refresh failed: {err}");
                self.status = LoadStatus::from(&err);
            }
        }
    }

    pub fn apply(&mut self, movements: Vec<Movement>) {
        tracing::debug!(movements = movements.len(), "movement list refreshed");
        self.movements = movements;
        self.status = LoadStatus::Ready;
    }

    pub fn movements(&self) -> &[Movement] {
        &self.movements
    }

    pub fn columns(&self) -> &'static [Column] {
        &COLUMNS
    }

    pub fn len(&self) -> usize {
        self.movements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movements.is_empty()
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    /// Rendered cells, one row per movement, in column order.
    pub fn rows(&self, currency: Currency) -> Vec<[String; 4]> {
        self.movements
            .iter()
            .map(|movement| COLUMNS.map(|column| column.cell(movement, currency)))
            .collect()
    }
}

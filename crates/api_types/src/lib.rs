use serde::{Deserialize, Serialize};

/// Error body returned by the movement service on non-2xx responses.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub mod movement {
    use chrono::NaiveDate;

    use super::*;

    /// Category tag of a movement as sent on the wire.
    ///
    /// Only `INCOME` and `EXPENSE` carry meaning for the client. Anything else
    /// is kept verbatim so it can be shown and re-exported unchanged.
    #[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(from = "String", into = "String")]
    pub enum MovementCategory {
        Income,
        Expense,
        Other(String),
    }

    impl MovementCategory {
        pub fn as_str(&self) -> &str {
            match self {
                Self::Income => "INCOME",
                Self::Expense => "EXPENSE",
                Self::Other(raw) => raw.as_str(),
            }
        }
    }

    impl From<String> for MovementCategory {
        fn from(value: String) -> Self {
            match value.as_str() {
                "INCOME" => Self::Income,
                "EXPENSE" => Self::Expense,
                _ => Self::Other(value),
            }
        }
    }

    impl From<MovementCategory> for String {
        fn from(value: MovementCategory) -> Self {
            match value {
                MovementCategory::Other(raw) => raw,
                other => other.as_str().to_string(),
            }
        }
    }

    /// Query parameters for `GET /movements`.
    #[derive(Debug, Clone, Copy, Serialize, Deserialize)]
    pub struct MovementPageRequest {
        pub page: u32,
        pub size: u32,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct MovementView {
        pub id: Option<u64>,
        pub description: String,
        /// Signed amount in minor units (cents).
        pub amount_minor: i64,
        pub category: MovementCategory,
        /// Free-form spending group ("Food", "Rent", ...).
        #[serde(default)]
        pub tag: Option<String>,
        /// Calendar date, `YYYY-MM-DD`.
        pub date: NaiveDate,
        #[serde(default)]
        pub notes: Option<String>,
    }

    /// One page of movements, newest first as decided by the server.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct MovementPage {
        pub content: Vec<MovementView>,
        pub page_number: u32,
        pub page_size: u32,
        pub total_elements: u64,
        pub total_pages: u32,
        pub last: bool,
    }

    /// Documents accepted by file-based sources: either a bare list or a page.
    #[derive(Debug, Deserialize)]
    #[serde(untagged)]
    pub enum MovementDocument {
        List(Vec<MovementView>),
        Page(MovementPage),
    }

    impl MovementDocument {
        pub fn into_movements(self) -> Vec<MovementView> {
            match self {
                Self::List(items) => items,
                Self::Page(page) => page.content,
            }
        }
    }
}

//! Core of fincontrol: movements, the sources they come from and the figures
//! derived from them.
//!
//! The two components a front-end binds to are [`Dashboard`] (totals and
//! distribution) and [`MovementList`] (the raw list plus its fixed columns).
//! Both pull from any [`MovementSource`] exactly once per activation.

pub use currency::Currency;
pub use dashboard::{Dashboard, LoadStatus};
pub use error::EngineError;
pub use listing::{COLUMNS, Column, MovementList};
pub use money::Money;
pub use movement::{Category, Movement};
pub use source::{InMemorySource, JsonFileSource, MovementSource, SourceError};
pub use summary::{Distribution, Summary, summarize};

pub mod analytics;
pub mod export;

mod currency;
mod dashboard;
mod error;
mod listing;
mod money;
mod movement;
mod source;
mod summary;

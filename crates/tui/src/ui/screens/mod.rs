pub mod dashboard;
pub mod movements;

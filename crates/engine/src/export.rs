use std::io::Write;

use csv::Writer;
use serde::Serialize;

use crate::{EngineError, Movement};

#[derive(Serialize)]
struct ExportRow<'a> {
    id: Option<u64>,
    description: &'a str,
    amount: String,
    category: &'a str,
    tag: Option<&'a str>,
    date: String,
    notes: Option<&'a str>,
}

impl<'a> From<&'a Movement> for ExportRow<'a> {
    fn from(movement: &'a Movement) -> Self {
        Self {
            id: movement.id,
            description: &movement.description,
            amount: movement.amount.to_string(),
            category: movement.category.as_str(),
            tag: movement.tag.as_deref(),
            date: movement.date.format("%Y-%m-%d").to_string(),
            notes: movement.notes.as_deref(),
        }
    }
}

/// Writes movements as CSV, one row each, with a header line.
///
/// Amounts are written in major units with two decimals (`-12.50`).
pub fn write_csv<W: Write>(movements: &[Movement], writer: W) -> Result<(), EngineError> {
    let mut writer = Writer::from_writer(writer);
    if movements.is_empty() {
        writer.write_record(["id", "description", "amount", "category", "tag", "date", "notes"])?;
    }
    for movement in movements {
        writer.serialize(ExportRow::from(movement))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn to_csv(movements: &[Movement]) -> Result<Vec<u8>, EngineError> {
    let mut buffer = Vec::new();
    write_csv(movements, &mut buffer)?;
    Ok(buffer)
}

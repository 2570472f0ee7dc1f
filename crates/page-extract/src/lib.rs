pub mod cli;
pub mod extract;
pub mod record;

use record::Record;

/// Errors surfaced by the extractor.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("field '{field}' not found\navailable fields: {}", .available.join(", "))]
    FieldNotFound {
        field: String,
        available: Vec<String>,
    },

    #[error("invalid extraction pattern")]
    Pattern(#[source] regex::Error),

    #[error("render output")]
    Render(#[from] serde_json::Error),
}

/// Lines to print for `html`: the whole record as JSON, or just the selected `field`.
pub fn render(html: &str, field: Option<&str>) -> Result<Vec<String>, ExtractError> {
    let record: Record = extract::extract_record(html)?;
    match field {
        None => Ok(vec![record.to_pretty_json()?]),
        Some(path) => Ok(record.select(path)?.selection_lines()?),
    }
}

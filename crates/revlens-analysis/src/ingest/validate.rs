//! Column checks, size limits, and row-level coercion.
//!
//! Structural problems fail the run. Row-level problems (unparseable or
//! out-of-range ratings, blank facility ids) drop the row and are counted.

use revlens_core::config::IngestConfig;
use revlens_core::errors::ValidationError;
use revlens_core::types::{Review, StarRating};
use serde::{Deserialize, Serialize};

use super::table::RawTable;

pub const FACILITY_COLUMN: &str = "facility_id";
/// Legacy name accepted in place of `facility_id`.
pub const FACILITY_COLUMN_ALIAS: &str = "hospital_id";
pub const TEXT_COLUMN: &str = "review_text";
pub const RATING_COLUMN: &str = "star_rating";

/// Rows dropped during ingestion, by cause.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropCounts {
    pub invalid_rating: usize,
    pub blank_facility: usize,
}

impl DropCounts {
    pub fn total(&self) -> usize {
        self.invalid_rating + self.blank_facility
    }
}

/// Validated reviews ready for scoring.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub reviews: Vec<Review>,
    /// Row count before filtering.
    pub input_rows: usize,
    pub dropped: DropCounts,
}

struct ColumnIndices {
    facility: usize,
    text: usize,
    rating: usize,
}

/// Validate `table` and convert its surviving rows into reviews.
pub fn ingest(table: &RawTable, config: &IngestConfig) -> Result<Dataset, ValidationError> {
    let columns = resolve_columns(table)?;

    if table.rows.is_empty() {
        return Err(ValidationError::EmptyDataset);
    }
    if table.rows.len() > config.max_rows {
        return Err(ValidationError::TooManyRows {
            rows: table.rows.len(),
            max_rows: config.max_rows,
        });
    }

    let mut reviews = Vec::with_capacity(table.rows.len());
    let mut dropped = DropCounts::default();

    for (row_idx, row) in table.rows.iter().enumerate() {
        let cell = |idx: usize| row.get(idx).and_then(|c| c.as_deref());

        let Some(star_rating) = cell(columns.rating).and_then(coerce_rating) else {
            tracing::debug!(row = row_idx, value = ?cell(columns.rating), "dropping row with invalid rating");
            dropped.invalid_rating += 1;
            continue;
        };

        let facility_id = cell(columns.facility).map(str::trim).unwrap_or_default();
        if facility_id.is_empty() {
            tracing::debug!(row = row_idx, "dropping row with blank facility id");
            dropped.blank_facility += 1;
            continue;
        }

        reviews.push(Review {
            facility_id: facility_id.to_string(),
            raw_text: cell(columns.text).unwrap_or_default().to_string(),
            star_rating,
        });
    }

    if dropped.total() > 0 {
        tracing::warn!(
            invalid_rating = dropped.invalid_rating,
            blank_facility = dropped.blank_facility,
            kept = reviews.len(),
            "dropped rows during ingestion"
        );
    }

    if reviews.is_empty() {
        return Err(ValidationError::NoValidRows {
            dropped: dropped.total(),
        });
    }

    Ok(Dataset {
        reviews,
        input_rows: table.rows.len(),
        dropped,
    })
}

fn resolve_columns(table: &RawTable) -> Result<ColumnIndices, ValidationError> {
    let facility = table
        .column_index(FACILITY_COLUMN)
        .or_else(|| table.column_index(FACILITY_COLUMN_ALIAS));
    let text = table.column_index(TEXT_COLUMN);
    let rating = table.column_index(RATING_COLUMN);

    match (facility, text, rating) {
        (Some(facility), Some(text), Some(rating)) => Ok(ColumnIndices {
            facility,
            text,
            rating,
        }),
        _ => {
            let columns = [
                (FACILITY_COLUMN, facility),
                (TEXT_COLUMN, text),
                (RATING_COLUMN, rating),
            ]
            .into_iter()
            .filter(|(_, idx)| idx.is_none())
            .map(|(name, _)| name.to_string())
            .collect();
            Err(ValidationError::MissingColumns {
                columns,
                found: table.headers.clone(),
            })
        }
    }
}

/// Parse as a float, truncate toward zero, and range-check.
pub fn coerce_rating(raw: &str) -> Option<StarRating> {
    let value: f64 = raw.trim().parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    StarRating::new(value.trunc() as i64)
}

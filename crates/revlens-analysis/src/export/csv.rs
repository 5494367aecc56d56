//! UTF-8 CSV export of the scored-review and facility tables.

use revlens_core::errors::ExportError;
use revlens_core::types::BackendInfo;

use crate::pipeline::AnalysisResult;

/// One row per scored review: facility, raw text, rating, star score, and a
/// `<display name> Score` column per backend.
pub fn export_scored_reviews(result: &AnalysisResult) -> Result<Vec<u8>, ExportError> {
    let mut writer = ::csv::Writer::from_writer(Vec::new());

    let mut header = vec![
        "Facility ID".to_string(),
        "Review Text".to_string(),
        "Star Rating".to_string(),
        "Star Score".to_string(),
    ];
    header.extend(backend_columns(&result.backends, "Score"));
    writer.write_record(&header).map_err(csv_err)?;

    for scored in &result.scored_reviews {
        let mut record = vec![
            scored.review.facility_id.clone(),
            scored.review.raw_text.clone(),
            scored.review.star_rating.to_string(),
            scored.star_score.to_string(),
        ];
        record.extend(scored.backend_scores.iter().map(|s| s.to_string()));
        writer.write_record(&record).map_err(csv_err)?;
    }

    finish(writer)
}

/// One row per facility: id, review count, mean star score, and a
/// `<display name> Mean Score` column per backend.
pub fn export_facilities(result: &AnalysisResult) -> Result<Vec<u8>, ExportError> {
    let mut writer = ::csv::Writer::from_writer(Vec::new());

    let mut header = vec![
        "Facility ID".to_string(),
        "Review Count".to_string(),
        "Mean Star Score".to_string(),
    ];
    header.extend(backend_columns(&result.backends, "Mean Score"));
    writer.write_record(&header).map_err(csv_err)?;

    for facility in &result.facilities {
        let mut record = vec![
            facility.facility_id.clone(),
            facility.review_count.to_string(),
            facility.mean_star_score.to_string(),
        ];
        record.extend(facility.mean_backend_scores.iter().map(|s| s.to_string()));
        writer.write_record(&record).map_err(csv_err)?;
    }

    finish(writer)
}

fn backend_columns<'a>(
    backends: &'a [BackendInfo],
    suffix: &'a str,
) -> impl Iterator<Item = String> + 'a {
    backends
        .iter()
        .map(move |b| format!("{} {suffix}", b.display_name))
}

fn finish(writer: ::csv::Writer<Vec<u8>>) -> Result<Vec<u8>, ExportError> {
    writer.into_inner().map_err(|e| ExportError::Csv {
        message: e.error().to_string(),
    })
}

fn csv_err(e: ::csv::Error) -> ExportError {
    ExportError::Csv {
        message: e.to_string(),
    }
}

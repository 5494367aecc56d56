//! Caller-owned analysis session holding the latest result.
//!
//! A failed run leaves the previous result in place.

use revlens_core::config::RevlensConfig;
use revlens_core::errors::{AnalysisError, SessionError};

use crate::bootstrap::MaeDifferenceResult;
use crate::export::{export_facilities, export_scored_reviews};
use crate::ingest::RawTable;
use crate::pipeline::{AnalysisPipeline, AnalysisResult};

pub struct AnalysisSession {
    pipeline: AnalysisPipeline,
    latest: Option<AnalysisResult>,
}

impl AnalysisSession {
    pub fn new(pipeline: AnalysisPipeline) -> Self {
        Self {
            pipeline,
            latest: None,
        }
    }

    pub fn from_config(config: RevlensConfig) -> Result<Self, AnalysisError> {
        Ok(Self::new(AnalysisPipeline::from_config(config)?))
    }

    pub fn pipeline(&self) -> &AnalysisPipeline {
        &self.pipeline
    }

    /// Run an analysis and make it the latest result.
    pub fn run_analysis(&mut self, table: &RawTable) -> Result<&AnalysisResult, AnalysisError> {
        let result = self.pipeline.run_analysis(table)?;
        Ok(self.latest.insert(result))
    }

    pub fn latest(&self) -> Option<&AnalysisResult> {
        self.latest.as_ref()
    }

    fn require_latest(&self) -> Result<&AnalysisResult, SessionError> {
        self.latest.as_ref().ok_or(SessionError::NoAnalysis)
    }

    /// Scored-review table of the latest result as CSV bytes.
    pub fn export_csv(&self) -> Result<Vec<u8>, AnalysisError> {
        Ok(export_scored_reviews(self.require_latest()?)?)
    }

    /// Facility table of the latest result as CSV bytes.
    pub fn export_facilities_csv(&self) -> Result<Vec<u8>, AnalysisError> {
        Ok(export_facilities(self.require_latest()?)?)
    }

    /// Bootstrap the MAE difference between two backends of the latest
    /// result. Backends are named by id or display name.
    pub fn compare_backends(&self, first: &str, second: &str) -> Result<MaeDifferenceResult, AnalysisError> {
        let result = self.require_latest()?;
        let i = result
            .backend_index(first)
            .ok_or_else(|| SessionError::UnknownBackend {
                backend_id: first.to_string(),
            })?;
        let j = result
            .backend_index(second)
            .ok_or_else(|| SessionError::UnknownBackend {
                backend_id: second.to_string(),
            })?;
        if i == j {
            return Err(SessionError::IdenticalBackends {
                backend_id: result.backends[i].id.clone(),
            }
            .into());
        }

        tracing::info!(
            first = %result.backends[i].id,
            second = %result.backends[j].id,
            "comparing backends"
        );
        self.pipeline.compare(result, i, j)
    }

    /// Drop the latest result.
    pub fn clear(&mut self) {
        self.latest = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use revlens_core::config::BootstrapConfig;
    use revlens_core::errors::ErrorCode;

    fn session() -> AnalysisSession {
        let config = RevlensConfig {
            bootstrap: BootstrapConfig {
                iterations: 200,
                ..BootstrapConfig::default()
            },
            ..RevlensConfig::default()
        };
        AnalysisSession::from_config(config).unwrap()
    }

    fn table() -> RawTable {
        let csv = "facility_id,review_text,star_rating\n\
                   A,先生が親切で丁寧でした,5\n\
                   A,待ち時間が長い,2\n\
                   B,料金が高いし狭い,1\n\
                   B,普通でした,3\n\
                   C,安心できる良い病院,4\n\
                   C,説明がわかりやすい,5\n";
        RawTable::from_csv_reader(csv.as_bytes()).unwrap()
    }

    #[test]
    fn test_operations_need_a_result() {
        let s = session();
        assert!(s.latest().is_none());
        let err = s.export_csv().unwrap_err();
        assert_eq!(err.error_code(), "SESSION_NO_ANALYSIS");
        assert!(s.compare_backends("koheiduck", "mizuiro").is_err());
    }

    #[test]
    fn test_run_and_export() {
        let mut s = session();
        let result = s.run_analysis(&table()).unwrap();
        assert_eq!(result.facilities.len(), 3);

        let bytes = s.export_csv().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let header = text.lines().next().unwrap();
        assert_eq!(
            header,
            "Facility ID,Review Text,Star Rating,Star Score,\
             Model A (Koheiduck) Score,Model B (LLM-book) Score,Model C (Mizuiro) Score"
        );
        assert_eq!(text.lines().count(), 7);

        let facilities = String::from_utf8(s.export_facilities_csv().unwrap()).unwrap();
        assert!(facilities.starts_with("Facility ID,Review Count,Mean Star Score,"));
        assert_eq!(facilities.lines().count(), 4);
    }

    #[test]
    fn test_failed_run_keeps_previous_result() {
        let mut s = session();
        s.run_analysis(&table()).unwrap();
        let bad = RawTable::from_csv_reader("facility_id,review_text\nA,x\n".as_bytes()).unwrap();
        assert!(s.run_analysis(&bad).is_err());
        assert_eq!(s.latest().unwrap().facilities.len(), 3);
        s.clear();
        assert!(s.latest().is_none());
    }

    #[test]
    fn test_compare_backends() {
        let mut s = session();
        s.run_analysis(&table()).unwrap();
        let ids: Vec<String> = s.latest().unwrap().backends.iter().map(|b| b.id.clone()).collect();

        let by_id = s.compare_backends(&ids[0], &ids[2]).unwrap();
        let by_name = s
            .compare_backends("Model A (Koheiduck)", "Model C (Mizuiro)")
            .unwrap();
        assert_eq!(by_id, by_name);
        assert_eq!(by_id.iteration_count, 200);
        assert_eq!(by_id.is_significant, by_id.ci_lower > 0.0 || by_id.ci_upper < 0.0);

        let same = s.compare_backends(&ids[1], "Model B (LLM-book)").unwrap_err();
        assert_eq!(same.error_code(), "SESSION_IDENTICAL_BACKENDS");

        let unknown = s.compare_backends(&ids[0], "nope").unwrap_err();
        assert_eq!(unknown.error_code(), "SESSION_UNKNOWN_BACKEND");
    }
}

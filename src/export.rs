// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use csv::Writer;

use crate::errors::{ScannerError, ScannerResult};
use crate::types::{ProgressInfo, ResultStatus, ScanEvent, ScanResult};

/// Placeholder written when a result has no resolved address
pub const NO_ADDRESS: &str = "N/A";

/// Consumer-side fold over a scan's event stream
#[derive(Debug, Clone, Default)]
pub struct ResultCollector {
    results: Vec<ScanResult>,
    progress: ProgressInfo,
    complete: bool,
}

impl ResultCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, event: &ScanEvent) {
        match event {
            ScanEvent::Progress { progress } => self.progress = *progress,
            ScanEvent::Result { result } => self.results.push(result.clone()),
            ScanEvent::Complete => self.complete = true,
        }
    }

    pub fn results(&self) -> &[ScanResult] {
        &self.results
    }

    pub fn progress(&self) -> ProgressInfo {
        self.progress
    }

    pub fn percentage(&self) -> f64 {
        self.progress.percentage()
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn active_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| r.status == ResultStatus::Active)
            .count()
    }

    pub fn to_csv(&self) -> ScannerResult<Vec<u8>> {
        export_csv(&self.results)
    }
}

/// Serialize active results as `Subdomain,IP Address,Method` rows
pub fn export_csv(results: &[ScanResult]) -> ScannerResult<Vec<u8>> {
    let mut wtr = Writer::from_writer(vec![]);

    wtr.write_record(["Subdomain", "IP Address", "Method"])?;

    for result in results.iter().filter(|r| r.status == ResultStatus::Active) {
        let method = result.method.to_string();
        wtr.write_record([
            result.subdomain.as_str(),
            result.address.as_deref().unwrap_or(NO_ADDRESS),
            method.as_str(),
        ])?;
    }

    let data = wtr
        .into_inner()
        .map_err(|e| ScannerError::Export(e.to_string()))?;
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CandidateSource;

    #[test]
    fn test_collector_folds_events() {
        let mut collector = ResultCollector::new();
        assert_eq!(collector.percentage(), 0.0);

        collector.record(&ScanEvent::progress(1, 4));
        collector.record(&ScanEvent::result(
            "www.example.com".to_string(),
            None,
            CandidateSource::Dictionary,
        ));
        collector.record(&ScanEvent::progress(4, 4));
        assert!(!collector.is_complete());
        collector.record(&ScanEvent::Complete);

        assert!(collector.is_complete());
        assert_eq!(collector.active_count(), 1);
        assert_eq!(collector.progress(), ProgressInfo { current: 4, total: 4 });
        assert_eq!(collector.percentage(), 100.0);
    }

    #[test]
    fn test_export_csv_rows() {
        let results = vec![
            ScanResult {
                subdomain: "www.example.com".to_string(),
                address: None,
                status: ResultStatus::Active,
                method: CandidateSource::Dictionary,
            },
            ScanResult {
                subdomain: "a.example.com".to_string(),
                address: Some("93.184.216.34".to_string()),
                status: ResultStatus::Active,
                method: CandidateSource::Bruteforce,
            },
        ];

        let csv = String::from_utf8(export_csv(&results).unwrap()).unwrap();
        assert_eq!(
            csv,
            "Subdomain,IP Address,Method\n\
             www.example.com,N/A,Dictionary\n\
             a.example.com,93.184.216.34,Bruteforce\n"
        );
    }

    #[test]
    fn test_export_empty() {
        let csv = String::from_utf8(export_csv(&[]).unwrap()).unwrap();
        assert_eq!(csv, "Subdomain,IP Address,Method\n");
    }
}

// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Scan Engine
 * Validates requests, builds candidate sets and runs scans in the background
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::candidates::CandidateGenerator;
use crate::config::{AppConfig, ConfigValidator};
use crate::emitter::{EventEmitter, ScanStream};
use crate::errors::{ScannerError, ScannerResult};
use crate::prober::LivenessProber;
use crate::scheduler::{BatchScheduler, ScanSummary};
use crate::types::{Candidate, ScanMethod, ScanRequest};

/// Entry point for running subdomain scans.
///
/// Holds no per-scan state: each scan gets its own candidate set, counters
/// and event channel.
#[derive(Clone)]
pub struct ScanEngine {
    generator: CandidateGenerator,
    scheduler: BatchScheduler,
}

impl ScanEngine {
    /// Engine with the real HTTP client and configured DNS backend
    pub fn new(config: &AppConfig) -> ScannerResult<Self> {
        ConfigValidator::validate_app_config(config)
            .map_err(|e| ScannerError::Configuration(format!("{:#}", e)))?;

        let prober = LivenessProber::from_config(config)?;
        Ok(Self::with_prober(config, prober))
    }

    /// Engine with a caller-supplied prober
    pub fn with_prober(config: &AppConfig, prober: LivenessProber) -> Self {
        Self {
            generator: CandidateGenerator::from_config(&config.scanner),
            scheduler: BatchScheduler::from_config(prober, &config.scanner),
        }
    }

    /// Validate raw input into a request. Rejects before any scan work.
    pub fn prepare(&self, domain: Option<&str>, method: ScanMethod) -> ScannerResult<ScanRequest> {
        let domain = domain.ok_or(ScannerError::MissingDomain)?;
        ScanRequest::new(domain, method)
    }

    pub fn candidates(&self, request: &ScanRequest) -> Vec<Candidate> {
        self.generator.generate(request.method)
    }

    /// Run a scan to completion on the current task
    pub async fn run(
        &self,
        request: &ScanRequest,
        emitter: EventEmitter,
        cancel: &CancellationToken,
    ) -> ScanSummary {
        let candidates = self.candidates(request);
        self.scheduler
            .run(&candidates, &request.domain, request.method, emitter, cancel)
            .await
    }

    /// Start a scan in the background and return its event stream.
    ///
    /// Dropping the stream cancels the scan.
    pub fn start(&self, request: ScanRequest) -> ScanStream {
        let cancel = CancellationToken::new();
        let (emitter, stream) = EventEmitter::channel(cancel.clone());
        let candidates = self.candidates(&request);
        let scheduler = self.scheduler.clone();

        info!(
            "Starting {} scan of {} ({} candidates)",
            request.method,
            request.domain,
            candidates.len()
        );

        tokio::spawn(async move {
            scheduler
                .run(&candidates, &request.domain, request.method, emitter, &cancel)
                .await
        });

        stream
    }

    /// Convenience wrapper: validate and start in one step
    pub fn scan(&self, domain: &str, method: ScanMethod) -> ScannerResult<ScanStream> {
        let request = ScanRequest::new(domain, method)?;
        Ok(self.start(request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dns_resolver::{DnsAnswer, DnsLookup};
    use crate::http_client::ReachabilityCheck;
    use crate::types::ScanEvent;
    use anyhow::Result;
    use async_trait::async_trait;
    use std::sync::Arc;
    use std::time::Duration;

    struct Refused;

    #[async_trait]
    impl ReachabilityCheck for Refused {
        async fn head_status(&self, _host: &str) -> Result<u16> {
            Err(anyhow::anyhow!("refused"))
        }
    }

    #[async_trait]
    impl DnsLookup for Refused {
        async fn lookup_a(&self, _fqdn: &str) -> Result<Option<DnsAnswer>> {
            Ok(None)
        }
    }

    fn engine() -> ScanEngine {
        let mut config = AppConfig::default();
        config.scanner.batch_delay_ms = 0;
        let prober = LivenessProber::new(
            Arc::new(Refused),
            Arc::new(Refused),
            Duration::from_secs(1),
            Duration::from_secs(1),
        );
        ScanEngine::with_prober(&config, prober)
    }

    #[test]
    fn test_prepare_rejects_missing_domain() {
        let engine = engine();
        assert!(matches!(
            engine.prepare(None, ScanMethod::Dictionary),
            Err(ScannerError::MissingDomain)
        ));
        assert!(matches!(
            engine.prepare(Some(""), ScanMethod::Dictionary),
            Err(ScannerError::MissingDomain)
        ));

        let request = engine
            .prepare(Some("https://www.example.com/app"), ScanMethod::All)
            .unwrap();
        assert_eq!(request.domain, "example.com");
    }

    #[tokio::test]
    async fn test_scan_streams_until_complete() {
        let stream = engine().scan("example.com", ScanMethod::Bruteforce).unwrap();
        let events = stream.collect_events().await;

        let progress_count = events
            .iter()
            .filter(|e| matches!(e, ScanEvent::Progress { .. }))
            .count();
        assert_eq!(progress_count, 150);
        assert_eq!(events.last(), Some(&ScanEvent::Complete));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = AppConfig::default();
        config.scanner.batch_size = 0;
        assert!(matches!(
            ScanEngine::new(&config),
            Err(ScannerError::Configuration(_))
        ));
    }
}

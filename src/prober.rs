// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Liveness Prober
 * HTTP reachability with DNS resolution fallback
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace};

use crate::config::AppConfig;
use crate::dns_resolver::{build_resolver, DnsAnswer, DnsLookup};
use crate::errors::ScannerResult;
use crate::http_client::{HttpClient, ReachabilityCheck};
use crate::types::ProbeOutcome;

/// Whether an HTTP status proves the host exists.
///
/// Anything below 400 counts, redirects included, as do the auth-gated
/// 401 and 403.
pub fn is_live_status(status_code: u16) -> bool {
    status_code < 400 || status_code == 401 || status_code == 403
}

/// Determines liveness of one candidate from two independent signals
#[derive(Clone)]
pub struct LivenessProber {
    http: Arc<dyn ReachabilityCheck>,
    dns: Arc<dyn DnsLookup>,
    http_timeout: Duration,
    dns_timeout: Duration,
}

impl LivenessProber {
    pub fn new(
        http: Arc<dyn ReachabilityCheck>,
        dns: Arc<dyn DnsLookup>,
        http_timeout: Duration,
        dns_timeout: Duration,
    ) -> Self {
        Self {
            http,
            dns,
            http_timeout,
            dns_timeout,
        }
    }

    /// Prober backed by the real HTTP client and the configured resolver
    pub fn from_config(config: &AppConfig) -> ScannerResult<Self> {
        let http = Arc::new(HttpClient::from_config(&config.scanner)?);
        let dns = build_resolver(&config.dns)?;

        Ok(Self::new(
            http,
            dns,
            config.scanner.http_timeout(),
            config.dns.timeout(),
        ))
    }

    /// Probe `label.domain`. Never fails: every error path is inactive.
    pub async fn probe(&self, label: &str, domain: &str) -> ProbeOutcome {
        let fqdn = format!("{}.{}", label, domain);

        if self.http_signal(&fqdn).await {
            debug!("[OK] {} reachable over HTTP", fqdn);
            return ProbeOutcome::reachable();
        }

        if let Some(answer) = self.dns_signal(&fqdn).await {
            return match answer.address {
                Some(address) => {
                    debug!("[OK] {} resolves to {}", fqdn, address);
                    ProbeOutcome::resolved(address)
                }
                None => {
                    debug!("[OK] {} has a DNS answer without address data", fqdn);
                    ProbeOutcome::reachable()
                }
            };
        }

        trace!("{} inactive", fqdn);
        ProbeOutcome::inactive()
    }

    async fn http_signal(&self, fqdn: &str) -> bool {
        match tokio::time::timeout(self.http_timeout, self.http.head_status(fqdn)).await {
            Ok(Ok(status_code)) => {
                trace!("{} answered HTTP {}", fqdn, status_code);
                is_live_status(status_code)
            }
            Ok(Err(e)) => {
                trace!("HTTP check for {} gave no signal: {:#}", fqdn, e);
                false
            }
            Err(_) => {
                trace!("HTTP check for {} timed out after {:?}", fqdn, self.http_timeout);
                false
            }
        }
    }

    async fn dns_signal(&self, fqdn: &str) -> Option<DnsAnswer> {
        match tokio::time::timeout(self.dns_timeout, self.dns.lookup_a(fqdn)).await {
            Ok(Ok(answer)) => answer,
            Ok(Err(e)) => {
                trace!("DNS fallback for {} failed: {:#}", fqdn, e);
                None
            }
            Err(_) => {
                trace!("DNS fallback for {} timed out after {:?}", fqdn, self.dns_timeout);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedStatus(Option<u16>);

    #[async_trait]
    impl ReachabilityCheck for FixedStatus {
        async fn head_status(&self, _host: &str) -> Result<u16> {
            self.0.ok_or_else(|| anyhow::anyhow!("connection refused"))
        }
    }

    struct HangingHttp;

    #[async_trait]
    impl ReachabilityCheck for HangingHttp {
        async fn head_status(&self, _host: &str) -> Result<u16> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(200)
        }
    }

    struct HangingDns;

    #[async_trait]
    impl DnsLookup for HangingDns {
        async fn lookup_a(&self, _fqdn: &str) -> Result<Option<DnsAnswer>> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(Some(DnsAnswer::new("10.0.0.1")))
        }
    }

    #[derive(Default)]
    struct CountingDns {
        answer: Option<DnsAnswer>,
        fail: bool,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl DnsLookup for CountingDns {
        async fn lookup_a(&self, _fqdn: &str) -> Result<Option<DnsAnswer>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(anyhow::anyhow!("SERVFAIL"));
            }
            Ok(self.answer.clone())
        }
    }

    fn prober(http: impl ReachabilityCheck + 'static, dns: Arc<CountingDns>) -> LivenessProber {
        LivenessProber::new(
            Arc::new(http),
            dns,
            Duration::from_millis(200),
            Duration::from_millis(200),
        )
    }

    #[test]
    fn test_live_status_rule() {
        for code in [200, 204, 301, 302, 307, 308, 399, 401, 403] {
            assert!(is_live_status(code), "{} should be live", code);
        }
        for code in [400, 402, 404, 405, 410, 429, 500, 502, 503] {
            assert!(!is_live_status(code), "{} should not be live", code);
        }
    }

    #[tokio::test]
    async fn test_http_success_short_circuits_dns() {
        let dns = Arc::new(CountingDns {
            answer: Some(DnsAnswer::new("10.0.0.1")),
            ..Default::default()
        });
        let outcome = prober(FixedStatus(Some(200)), dns.clone())
            .probe("www", "example.com")
            .await;

        assert_eq!(outcome, ProbeOutcome::reachable());
        assert_eq!(dns.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_auth_gated_host_is_live() {
        let dns = Arc::new(CountingDns::default());
        let outcome = prober(FixedStatus(Some(403)), dns).probe("admin", "example.com").await;
        assert!(outcome.active);
        assert!(outcome.address.is_none());
    }

    #[tokio::test]
    async fn test_dns_fallback_after_http_failure() {
        let dns = Arc::new(CountingDns {
            answer: Some(DnsAnswer::new("93.184.216.34")),
            ..Default::default()
        });
        let outcome = prober(FixedStatus(None), dns.clone()).probe("mail", "example.com").await;

        assert_eq!(outcome, ProbeOutcome::resolved("93.184.216.34"));
        assert_eq!(dns.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_dns_fallback_after_error_status() {
        let dns = Arc::new(CountingDns {
            answer: Some(DnsAnswer::new("10.1.2.3")),
            ..Default::default()
        });
        let outcome = prober(FixedStatus(Some(404)), dns).probe("old", "example.com").await;
        assert_eq!(outcome.address.as_deref(), Some("10.1.2.3"));
    }

    #[tokio::test]
    async fn test_http_timeout_falls_back_to_dns() {
        let dns = Arc::new(CountingDns {
            answer: Some(DnsAnswer::new("10.9.9.9")),
            ..Default::default()
        });
        let outcome = prober(HangingHttp, dns).probe("slow", "example.com").await;
        assert_eq!(outcome, ProbeOutcome::resolved("10.9.9.9"));
    }

    #[tokio::test]
    async fn test_dns_fallback_is_bounded_by_deadline() {
        let prober = LivenessProber::new(
            Arc::new(FixedStatus(None)),
            Arc::new(HangingDns),
            Duration::from_millis(100),
            Duration::from_millis(200),
        );

        let started = std::time::Instant::now();
        let outcome = prober.probe("ns", "example.com").await;
        let elapsed = started.elapsed();

        assert_eq!(outcome, ProbeOutcome::inactive());
        assert!(elapsed >= Duration::from_millis(200));
        assert!(elapsed < Duration::from_secs(2), "took {:?}", elapsed);
    }

    #[tokio::test]
    async fn test_dns_answer_without_data_is_active() {
        let dns = Arc::new(CountingDns {
            answer: Some(DnsAnswer::without_data()),
            ..Default::default()
        });
        let outcome = prober(FixedStatus(None), dns).probe("mx", "example.com").await;
        assert_eq!(outcome, ProbeOutcome::reachable());
    }

    #[tokio::test]
    async fn test_every_signal_failing_is_inactive() {
        let dns = Arc::new(CountingDns {
            fail: true,
            ..Default::default()
        });
        let outcome = prober(FixedStatus(None), dns).probe("ghost", "example.com").await;
        assert_eq!(outcome, ProbeOutcome::inactive());
    }

    #[tokio::test]
    async fn test_empty_dns_answer_is_inactive() {
        let dns = Arc::new(CountingDns::default());
        let outcome = prober(FixedStatus(Some(500)), dns).probe("ghost", "example.com").await;
        assert!(!outcome.active);
    }
}

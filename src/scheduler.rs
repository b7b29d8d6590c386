// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Batch Scheduler
 * Wave-based bounded-concurrency probing with paced batches
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use futures::stream::{FuturesUnordered, StreamExt};
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::config::ScannerConfig;
use crate::emitter::EventEmitter;
use crate::prober::LivenessProber;
use crate::types::{Candidate, CandidateSource, ResultStatus, ScanMethod, ScanResult};
use crate::wordlist::is_dictionary_label;

/// Outcome counters for one finished (or cancelled) scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanSummary {
    pub total: usize,
    pub probed: usize,
    pub active: usize,
    pub elapsed: Duration,
    pub cancelled: bool,
}

/// Result label for an active candidate.
///
/// For `all` scans the dictionary decides; otherwise the requested method
/// is used directly.
pub fn result_method(requested: ScanMethod, label: &str) -> CandidateSource {
    match requested {
        ScanMethod::Dictionary => CandidateSource::Dictionary,
        ScanMethod::Bruteforce => CandidateSource::Bruteforce,
        ScanMethod::All => {
            if is_dictionary_label(label) {
                CandidateSource::Dictionary
            } else {
                CandidateSource::Bruteforce
            }
        }
    }
}

/// Drives the prober over all candidates in fixed-size concurrent waves
#[derive(Clone)]
pub struct BatchScheduler {
    prober: LivenessProber,
    batch_size: usize,
    batch_delay: Duration,
}

impl BatchScheduler {
    pub fn new(prober: LivenessProber, batch_size: usize, batch_delay: Duration) -> Self {
        Self {
            prober,
            batch_size: batch_size.max(1),
            batch_delay,
        }
    }

    pub fn from_config(prober: LivenessProber, config: &ScannerConfig) -> Self {
        Self::new(prober, config.batch_size, config.batch_delay())
    }

    /// Probe every candidate, emitting progress and results as probes finish.
    ///
    /// Returns after `Complete` has been emitted, or early without it when
    /// `cancel` fires. Progress and result events are written only from this
    /// task, so `current` rises by exactly one per event.
    pub async fn run(
        &self,
        candidates: &[Candidate],
        domain: &str,
        method: ScanMethod,
        emitter: EventEmitter,
        cancel: &CancellationToken,
    ) -> ScanSummary {
        let started = Instant::now();
        let total = candidates.len();
        let batch_count = total.div_ceil(self.batch_size);
        let mut probed = 0usize;
        let mut active = 0usize;

        info!(
            "Scanning {} candidates under {} ({} batches of {})",
            total, domain, batch_count, self.batch_size
        );

        let summary = |probed, active, cancelled| ScanSummary {
            total,
            probed,
            active,
            elapsed: started.elapsed(),
            cancelled,
        };

        for (batch_index, batch) in candidates.chunks(self.batch_size).enumerate() {
            if cancel.is_cancelled() {
                return self.finish_cancelled(summary(probed, active, true), domain);
            }

            let mut in_flight: FuturesUnordered<_> = batch
                .iter()
                .map(|candidate| async move {
                    let outcome = self.prober.probe(&candidate.label, domain).await;
                    (candidate, outcome)
                })
                .collect();

            loop {
                let next = tokio::select! {
                    biased;
                    _ = cancel.cancelled() => {
                        return self.finish_cancelled(summary(probed, active, true), domain);
                    }
                    next = in_flight.next() => next,
                };

                let Some((candidate, outcome)) = next else {
                    break;
                };

                probed += 1;
                emitter.progress(probed, total);

                if outcome.active {
                    active += 1;
                    let subdomain = candidate.fqdn(domain);
                    info!("[SUCCESS] Found active subdomain: {}", subdomain);

                    emitter.result(ScanResult {
                        subdomain,
                        address: outcome.address,
                        status: ResultStatus::Active,
                        method: result_method(method, &candidate.label),
                    });
                }
            }

            debug!("Batch {}/{} done ({} probed)", batch_index + 1, batch_count, probed);

            let is_last = batch_index + 1 == batch_count;
            if !is_last && !self.batch_delay.is_zero() {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => {
                        return self.finish_cancelled(summary(probed, active, true), domain);
                    }
                    _ = tokio::time::sleep(self.batch_delay) => {}
                }
            }
        }

        emitter.complete();

        let summary = summary(probed, active, false);
        info!(
            "[SUCCESS] Scan of {} complete: {}/{} active in {:?}",
            domain, summary.active, summary.total, summary.elapsed
        );
        summary
    }

    fn finish_cancelled(&self, summary: ScanSummary, domain: &str) -> ScanSummary {
        info!(
            "Scan of {} cancelled after {}/{} probes",
            domain, summary.probed, summary.total
        );
        summary
    }
}

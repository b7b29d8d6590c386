// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Subdomain Scanner Library
 * Candidate generation, liveness probing and streaming scan events
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

pub mod config;
pub mod errors;
pub mod types;
pub mod wordlist;

// Scan engine
pub mod candidates;
pub mod dns_resolver;
pub mod emitter;
pub mod engine;
pub mod http_client;
pub mod prober;
pub mod scheduler;

// Consumers
pub mod export;
pub mod server;

pub use engine::ScanEngine;
pub use errors::{ScannerError, ScannerResult};
pub use types::{Candidate, CandidateSource, ProbeOutcome, ScanEvent, ScanMethod, ScanRequest, ScanResult};

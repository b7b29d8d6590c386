// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

pub mod core;
pub mod validation;

pub use core::{AppConfig, DnsBackend, DnsConfig, ObservabilityConfig, ScannerConfig, ServerConfig};

pub use validation::ConfigValidator;

use anyhow::{Context, Result};
use std::path::Path;

impl AppConfig {
    /// Load configuration from environment variables with sensible defaults
    ///
    /// Supports the following environment variables:
    /// - SERVER_HOST / SERVER_PORT: HTTP listener
    /// - SCAN_BATCH_SIZE: Probes per wave
    /// - SCAN_BATCH_DELAY_MS: Pause between waves
    /// - HTTP_TIMEOUT_SECS / DNS_TIMEOUT_SECS: Per-signal deadlines
    /// - BRUTEFORCE_LIMIT / BRUTEFORCE_MAX_LENGTH: Combinatorial caps
    /// - DNS_BACKEND: `doh` or `system`
    /// - DOH_ENDPOINT: DNS-over-HTTPS JSON endpoint
    /// - LOG_LEVEL: Logging level
    pub fn from_env() -> Result<Self> {
        let mut config = AppConfig::default();
        config.apply_env_overrides()?;
        ConfigValidator::validate_app_config(&config)?;
        Ok(config)
    }

    /// Load a JSON configuration file, then apply environment overrides
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let mut config: AppConfig = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;

        config.apply_env_overrides()?;
        ConfigValidator::validate_app_config(&config)?;

        tracing::info!("Configuration loaded from {:?}", path);
        Ok(config)
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(host) = std::env::var("SERVER_HOST") {
            self.server.host = host;
        }

        if let Some(port) = parse_env("SERVER_PORT")? {
            self.server.port = port;
        }

        if let Some(batch_size) = parse_env("SCAN_BATCH_SIZE")? {
            self.scanner.batch_size = batch_size;
        }

        if let Some(delay) = parse_env("SCAN_BATCH_DELAY_MS")? {
            self.scanner.batch_delay_ms = delay;
        }

        if let Some(timeout) = parse_env("HTTP_TIMEOUT_SECS")? {
            self.scanner.http_timeout_secs = timeout;
        }

        if let Some(limit) = parse_env("BRUTEFORCE_LIMIT")? {
            self.scanner.bruteforce_limit = limit;
        }

        if let Some(max_length) = parse_env("BRUTEFORCE_MAX_LENGTH")? {
            self.scanner.bruteforce_max_length = max_length;
        }

        if let Ok(backend) = std::env::var("DNS_BACKEND") {
            self.dns.backend = backend.parse().map_err(|e: String| anyhow::anyhow!(e))?;
        }

        if let Ok(endpoint) = std::env::var("DOH_ENDPOINT") {
            self.dns.doh_endpoint = endpoint;
        }

        if let Some(timeout) = parse_env("DNS_TIMEOUT_SECS")? {
            self.dns.timeout_secs = timeout;
        }

        if let Ok(log_level) = std::env::var("LOG_LEVEL") {
            self.observability.log_level = log_level;
        }

        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Result<Option<T>> {
    match std::env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| anyhow::anyhow!("Invalid {} value: {}", key, value)),
        Err(_) => Ok(None),
    }
}

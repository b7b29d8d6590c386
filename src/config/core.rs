// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AppConfig {
    #[validate(nested)]
    #[serde(default)]
    pub server: ServerConfig,

    #[validate(nested)]
    #[serde(default)]
    pub scanner: ScannerConfig,

    #[validate(nested)]
    #[serde(default)]
    pub dns: DnsConfig,

    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ServerConfig {
    #[validate(length(min = 1))]
    #[serde(default = "default_host")]
    pub host: String,

    #[validate(range(min = 1))]
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ScannerConfig {
    /// Probes launched concurrently per wave
    #[validate(range(min = 1, max = 1000))]
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Pause between waves
    #[validate(range(min = 0, max = 60000))]
    #[serde(default = "default_batch_delay_ms")]
    pub batch_delay_ms: u64,

    #[validate(range(min = 1, max = 300))]
    #[serde(default = "default_http_timeout")]
    pub http_timeout_secs: u64,

    /// Scheme used for the reachability check
    #[validate(length(min = 1))]
    #[serde(default = "default_probe_scheme")]
    pub probe_scheme: String,

    /// Explicit port for the reachability check; scheme default when unset
    #[serde(default)]
    pub probe_port: Option<u16>,

    #[serde(default)]
    pub user_agent: Option<String>,

    #[validate(range(min = 1, max = 100000))]
    #[serde(default = "default_bruteforce_limit")]
    pub bruteforce_limit: usize,

    #[validate(range(min = 1, max = 3))]
    #[serde(default = "default_bruteforce_max_length")]
    pub bruteforce_max_length: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DnsConfig {
    #[serde(default)]
    pub backend: DnsBackend,

    #[validate(url)]
    #[serde(default = "default_doh_endpoint")]
    pub doh_endpoint: String,

    #[validate(range(min = 1, max = 300))]
    #[serde(default = "default_dns_timeout")]
    pub timeout_secs: u64,
}

/// Resolver used for the DNS fallback
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DnsBackend {
    /// DNS-over-HTTPS JSON API
    Doh,
    /// System nameservers via hickory
    System,
}

impl Default for DnsBackend {
    fn default() -> Self {
        DnsBackend::Doh
    }
}

impl std::str::FromStr for DnsBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "doh" | "https" => Ok(DnsBackend::Doh),
            "system" | "native" => Ok(DnsBackend::System),
            _ => Err(format!("Unknown DNS backend: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ScannerConfig {
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn batch_delay(&self) -> Duration {
        Duration::from_millis(self.batch_delay_ms)
    }
}

impl DnsConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            scanner: ScannerConfig::default(),
            dns: DnsConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            batch_delay_ms: default_batch_delay_ms(),
            http_timeout_secs: default_http_timeout(),
            probe_scheme: default_probe_scheme(),
            probe_port: None,
            user_agent: None,
            bruteforce_limit: default_bruteforce_limit(),
            bruteforce_max_length: default_bruteforce_max_length(),
        }
    }
}

impl Default for DnsConfig {
    fn default() -> Self {
        Self {
            backend: DnsBackend::default(),
            doh_endpoint: default_doh_endpoint(),
            timeout_secs: default_dns_timeout(),
        }
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_batch_size() -> usize {
    10
}

fn default_batch_delay_ms() -> u64 {
    100
}

fn default_http_timeout() -> u64 {
    3
}

fn default_probe_scheme() -> String {
    "https".to_string()
}

fn default_bruteforce_limit() -> usize {
    150
}

fn default_bruteforce_max_length() -> usize {
    3
}

fn default_doh_endpoint() -> String {
    "https://dns.google/resolve".to_string()
}

fn default_dns_timeout() -> u64 {
    3
}

fn default_log_level() -> String {
    "info".to_string()
}

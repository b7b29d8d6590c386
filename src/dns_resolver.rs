// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - DNS Fallback Resolvers
 * A-record lookups over DNS-over-HTTPS or the system nameservers
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use anyhow::{Context, Result};
use async_trait::async_trait;
use hickory_resolver::name_server::TokioConnectionProvider;
use hickory_resolver::TokioResolver;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::{DnsBackend, DnsConfig};
use crate::errors::{ScannerError, ScannerResult};

/// First answer record of a lookup. `address` is `None` when the record
/// carried no usable data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DnsAnswer {
    pub address: Option<String>,
}

impl DnsAnswer {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: Some(address.into()),
        }
    }

    pub fn without_data() -> Self {
        Self::default()
    }
}

/// DNS fallback signal.
///
/// `Ok(None)` means the lookup completed with no answer records.
#[async_trait]
pub trait DnsLookup: Send + Sync {
    async fn lookup_a(&self, fqdn: &str) -> Result<Option<DnsAnswer>>;
}

/// Google-style DNS JSON response, only the parts we read
#[derive(Debug, Deserialize)]
struct DohResponse {
    #[serde(rename = "Status", default)]
    status: Option<u32>,
    #[serde(rename = "Answer", default)]
    answer: Vec<DohAnswer>,
}

#[derive(Debug, Deserialize)]
struct DohAnswer {
    #[serde(default)]
    data: Option<String>,
}

/// Resolver using a DNS-over-HTTPS JSON endpoint (`?name=..&type=A`)
#[derive(Debug, Clone)]
pub struct DohResolver {
    client: Client,
    endpoint: String,
}

impl DohResolver {
    pub fn new(endpoint: &str, config: &DnsConfig) -> ScannerResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
        })
    }

    pub fn from_config(config: &DnsConfig) -> ScannerResult<Self> {
        Self::new(&config.doh_endpoint, config)
    }
}

#[async_trait]
impl DnsLookup for DohResolver {
    async fn lookup_a(&self, fqdn: &str) -> Result<Option<DnsAnswer>> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("name", fqdn), ("type", "A")])
            .header("Accept", "application/dns-json")
            .send()
            .await
            .with_context(|| format!("DoH query for {} failed", fqdn))?;

        let body: DohResponse = response
            .json()
            .await
            .with_context(|| format!("Malformed DoH response for {}", fqdn))?;

        // The first answer may be a CNAME target; it is reported as-is.
        // An answer without data still proves the name exists.
        let answer = body.answer.into_iter().next().map(|answer| DnsAnswer {
            address: answer.data.filter(|data| !data.is_empty()),
        });
        debug!(
            "DoH {} -> {:?} (status {:?})",
            fqdn, answer, body.status
        );
        Ok(answer)
    }
}

/// Resolver using the system nameservers through hickory
pub struct SystemResolver {
    resolver: TokioResolver,
}

impl SystemResolver {
    pub fn new() -> ScannerResult<Self> {
        let resolver = TokioResolver::builder(TokioConnectionProvider::default())
            .map_err(|e| ScannerError::Resolver(e.to_string()))?
            .build();

        Ok(Self { resolver })
    }
}

#[async_trait]
impl DnsLookup for SystemResolver {
    async fn lookup_a(&self, fqdn: &str) -> Result<Option<DnsAnswer>> {
        let lookup = self
            .resolver
            .ipv4_lookup(fqdn)
            .await
            .with_context(|| format!("A lookup for {} failed", fqdn))?;

        let answer = lookup.iter().next().map(|record| DnsAnswer::new(record.to_string()));
        debug!("System DNS {} -> {:?}", fqdn, answer);
        Ok(answer)
    }
}

/// Build the resolver selected by `config.backend`
pub fn build_resolver(config: &DnsConfig) -> ScannerResult<Arc<dyn DnsLookup>> {
    match config.backend {
        DnsBackend::Doh => {
            info!("DNS fallback via DoH endpoint {}", config.doh_endpoint);
            Ok(Arc::new(DohResolver::from_config(config)?))
        }
        DnsBackend::System => {
            info!("DNS fallback via system nameservers");
            Ok(Arc::new(SystemResolver::new()?))
        }
    }
}

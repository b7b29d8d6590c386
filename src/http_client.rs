// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::trace;

use crate::config::ScannerConfig;
use crate::errors::ScannerResult;

const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const DEFAULT_POOL_IDLE_PER_HOST: usize = 4;
const DEFAULT_POOL_MAX_IDLE_TIMEOUT: u64 = 30;

/// HTTP reachability signal.
///
/// Implementations return the status of a single request against `host`
/// without following redirects. Transport failures are errors, not statuses.
#[async_trait]
pub trait ReachabilityCheck: Send + Sync {
    async fn head_status(&self, host: &str) -> Result<u16>;
}

/// HEAD-request client used for the reachability signal
#[derive(Clone)]
pub struct HttpClient {
    client: Arc<Client>,
    scheme: String,
    port: Option<u16>,
    timeout: Duration,
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("scheme", &self.scheme)
            .field("port", &self.port)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl HttpClient {
    pub fn new(timeout_secs: u64) -> ScannerResult<Self> {
        HttpClientBuilder::new()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
    }

    pub fn from_config(config: &ScannerConfig) -> ScannerResult<Self> {
        Self::builder_from_config(config).build()
    }

    pub fn builder_from_config(config: &ScannerConfig) -> HttpClientBuilder {
        let mut builder = HttpClientBuilder::new()
            .timeout(config.http_timeout())
            .scheme(&config.probe_scheme);

        if let Some(port) = config.probe_port {
            builder = builder.port(port);
        }
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent);
        }

        builder
    }

    /// URL probed for `host`
    pub fn probe_url(&self, host: &str) -> String {
        match self.port {
            Some(port) => format!("{}://{}:{}/", self.scheme, host, port),
            None => format!("{}://{}/", self.scheme, host),
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Send a HEAD request and return the raw status code
    pub async fn head(&self, url: &str) -> Result<u16> {
        let response = self
            .client
            .head(url)
            .send()
            .await
            .with_context(|| format!("HEAD {} failed", url))?;

        let status_code = response.status().as_u16();
        trace!("HEAD {} -> {}", url, status_code);
        Ok(status_code)
    }
}

#[async_trait]
impl ReachabilityCheck for HttpClient {
    async fn head_status(&self, host: &str) -> Result<u16> {
        self.head(&self.probe_url(host)).await
    }
}

/// Builder for [`HttpClient`]
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    scheme: String,
    port: Option<u16>,
    user_agent: String,
    resolve_overrides: Vec<(String, SocketAddr)>,
}

impl HttpClientBuilder {
    pub fn new() -> Self {
        Self {
            timeout: Duration::from_secs(3),
            scheme: "https".to_string(),
            port: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            resolve_overrides: Vec::new(),
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn scheme(mut self, scheme: &str) -> Self {
        self.scheme = scheme.to_string();
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = user_agent.to_string();
        self
    }

    /// Pin `host` to `addr`, bypassing system resolution for it
    pub fn resolve(mut self, host: &str, addr: SocketAddr) -> Self {
        self.resolve_overrides.push((host.to_string(), addr));
        self
    }

    pub fn build(self) -> ScannerResult<HttpClient> {
        // Redirect responses are themselves a liveness signal, so never follow them
        let mut client_builder = Client::builder()
            .timeout(self.timeout)
            .connect_timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::none())
            .user_agent(self.user_agent)
            .pool_max_idle_per_host(DEFAULT_POOL_IDLE_PER_HOST)
            .pool_idle_timeout(Duration::from_secs(DEFAULT_POOL_MAX_IDLE_TIMEOUT))
            .tcp_nodelay(true);

        for (host, addr) in &self.resolve_overrides {
            client_builder = client_builder.resolve(host, *addr);
        }

        let client = client_builder.build()?;

        Ok(HttpClient {
            client: Arc::new(client),
            scheme: self.scheme,
            port: self.port,
            timeout: self.timeout,
        })
    }
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

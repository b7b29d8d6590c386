// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use anyhow::{Context, Result};
use validator::Validate;

use super::core::{AppConfig, DnsBackend};

pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate_app_config(config: &AppConfig) -> Result<()> {
        config.validate()
            .context("Configuration validation failed")?;

        Self::validate_scanner_config(config)?;
        Self::validate_dns_config(config)?;

        Ok(())
    }

    fn validate_scanner_config(config: &AppConfig) -> Result<()> {
        let scheme = config.scanner.probe_scheme.as_str();
        if scheme != "https" && scheme != "http" {
            return Err(anyhow::anyhow!(
                "Probe scheme must be http or https, got {}",
                scheme
            ));
        }

        if config.scanner.probe_port == Some(0) {
            return Err(anyhow::anyhow!("Probe port must be greater than 0"));
        }

        Ok(())
    }

    fn validate_dns_config(config: &AppConfig) -> Result<()> {
        if config.dns.backend != DnsBackend::Doh {
            return Ok(());
        }

        if !config.dns.doh_endpoint.starts_with("https://")
            && !config.dns.doh_endpoint.starts_with("http://")
        {
            return Err(anyhow::anyhow!(
                "DoH endpoint must start with http:// or https://"
            ));
        }

        Ok(())
    }
}

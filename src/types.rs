// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::{ScannerError, ScannerResult};

/// Enumeration method requested by the caller
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ScanMethod {
    Dictionary,
    Bruteforce,
    All,
}

impl Default for ScanMethod {
    fn default() -> Self {
        ScanMethod::Dictionary
    }
}

impl std::fmt::Display for ScanMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ScanMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanMethod::Dictionary => "dictionary",
            ScanMethod::Bruteforce => "bruteforce",
            ScanMethod::All => "all",
        }
    }

    pub fn includes_dictionary(&self) -> bool {
        matches!(self, ScanMethod::Dictionary | ScanMethod::All)
    }

    pub fn includes_bruteforce(&self) -> bool {
        matches!(self, ScanMethod::Bruteforce | ScanMethod::All)
    }
}

impl FromStr for ScanMethod {
    type Err = ScannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dictionary" => Ok(ScanMethod::Dictionary),
            "bruteforce" => Ok(ScanMethod::Bruteforce),
            "all" => Ok(ScanMethod::All),
            other => Err(ScannerError::InvalidMethod(other.to_string())),
        }
    }
}

/// Where a candidate label came from.
///
/// Serialized as `Dictionary` / `Bruteforce`, which is also the `method`
/// label carried by result events.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CandidateSource {
    Dictionary,
    Bruteforce,
}

impl std::fmt::Display for CandidateSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CandidateSource::Dictionary => write!(f, "Dictionary"),
            CandidateSource::Bruteforce => write!(f, "Bruteforce"),
        }
    }
}

/// A single subdomain label proposed for testing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub label: String,
    pub source: CandidateSource,
}

impl Candidate {
    pub fn new(label: impl Into<String>, source: CandidateSource) -> Self {
        Self {
            label: label.into(),
            source,
        }
    }

    /// Fully qualified name under `domain`
    pub fn fqdn(&self, domain: &str) -> String {
        format!("{}.{}", self.label, domain)
    }
}

/// A validated scan request with a normalized domain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRequest {
    pub domain: String,
    pub method: ScanMethod,
}

impl ScanRequest {
    /// Build a request, normalizing and validating the domain
    pub fn new(domain: &str, method: ScanMethod) -> ScannerResult<Self> {
        if domain.trim().is_empty() {
            return Err(ScannerError::MissingDomain);
        }

        let normalized = normalize_domain(domain);
        if normalized.is_empty() {
            return Err(ScannerError::InvalidDomain(domain.to_string()));
        }

        Ok(Self {
            domain: normalized,
            method,
        })
    }
}

/// Strip a leading scheme, a leading `www.` and any path suffix.
///
/// `https://www.Example.com/login` becomes `example.com`.
pub fn normalize_domain(raw: &str) -> String {
    let mut domain = raw.trim();

    for scheme in ["https://", "http://"] {
        if has_prefix_ignore_case(domain, scheme) {
            domain = &domain[scheme.len()..];
            break;
        }
    }

    if has_prefix_ignore_case(domain, "www.") {
        domain = &domain[4..];
    }

    let host = domain.split('/').next().unwrap_or_default();
    host.trim().to_lowercase()
}

fn has_prefix_ignore_case(value: &str, prefix: &str) -> bool {
    value
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

/// Liveness verdict for one candidate
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub active: bool,
    /// Set only when a DNS answer produced an address
    pub address: Option<String>,
}

impl ProbeOutcome {
    pub fn inactive() -> Self {
        Self::default()
    }

    pub fn reachable() -> Self {
        Self {
            active: true,
            address: None,
        }
    }

    pub fn resolved(address: impl Into<String>) -> Self {
        Self {
            active: true,
            address: Some(address.into()),
        }
    }
}

/// Progress counter carried by progress events
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProgressInfo {
    pub current: usize,
    pub total: usize,
}

impl ProgressInfo {
    /// Completion percentage; zero when there is nothing to scan
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.current as f64 / self.total as f64) * 100.0
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResultStatus {
    Active,
}

/// A discovered live subdomain
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScanResult {
    pub subdomain: String,
    #[serde(rename = "ip", default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub status: ResultStatus,
    pub method: CandidateSource,
}

/// One unit of the outbound event stream
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ScanEvent {
    Progress { progress: ProgressInfo },
    Result { result: ScanResult },
    Complete,
}

impl ScanEvent {
    pub fn progress(current: usize, total: usize) -> Self {
        ScanEvent::Progress {
            progress: ProgressInfo { current, total },
        }
    }

    pub fn result(subdomain: String, address: Option<String>, method: CandidateSource) -> Self {
        ScanEvent::Result {
            result: ScanResult {
                subdomain,
                address,
                status: ResultStatus::Active,
                method,
            },
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, ScanEvent::Complete)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_domain() {
        assert_eq!(normalize_domain("example.com"), "example.com");
        assert_eq!(normalize_domain("https://example.com"), "example.com");
        assert_eq!(normalize_domain("http://www.example.com/path/to"), "example.com");
        assert_eq!(normalize_domain("  WWW.Example.COM  "), "example.com");
        assert_eq!(normalize_domain("HTTPS://www.example.com"), "example.com");
        assert_eq!(normalize_domain("api.example.com/v1"), "api.example.com");
    }

    #[test]
    fn test_normalize_strips_single_www_only() {
        assert_eq!(normalize_domain("www.www.example.com"), "www.example.com");
    }

    #[test]
    fn test_scan_request_rejects_empty() {
        assert!(matches!(
            ScanRequest::new("", ScanMethod::All),
            Err(ScannerError::MissingDomain)
        ));
        assert!(matches!(
            ScanRequest::new("   ", ScanMethod::All),
            Err(ScannerError::MissingDomain)
        ));
        assert!(matches!(
            ScanRequest::new("https:///index.html", ScanMethod::All),
            Err(ScannerError::InvalidDomain(_))
        ));
    }

    #[test]
    fn test_scan_method_from_str() {
        assert_eq!("dictionary".parse::<ScanMethod>().unwrap(), ScanMethod::Dictionary);
        assert_eq!("BRUTEFORCE".parse::<ScanMethod>().unwrap(), ScanMethod::Bruteforce);
        assert_eq!(" all ".parse::<ScanMethod>().unwrap(), ScanMethod::All);
        assert!("zone-transfer".parse::<ScanMethod>().is_err());
    }

    #[test]
    fn test_event_wire_format() {
        let progress = serde_json::to_value(ScanEvent::progress(3, 165)).unwrap();
        assert_eq!(
            progress,
            serde_json::json!({"type": "progress", "progress": {"current": 3, "total": 165}})
        );

        let result = serde_json::to_value(ScanEvent::result(
            "mail.example.com".to_string(),
            Some("93.184.216.34".to_string()),
            CandidateSource::Dictionary,
        ))
        .unwrap();
        assert_eq!(
            result,
            serde_json::json!({
                "type": "result",
                "result": {
                    "subdomain": "mail.example.com",
                    "ip": "93.184.216.34",
                    "status": "active",
                    "method": "Dictionary"
                }
            })
        );

        let complete = serde_json::to_value(ScanEvent::Complete).unwrap();
        assert_eq!(complete, serde_json::json!({"type": "complete"}));
    }

    #[test]
    fn test_result_without_address_omits_ip() {
        let json = serde_json::to_string(&ScanEvent::result(
            "www.example.com".to_string(),
            None,
            CandidateSource::Bruteforce,
        ))
        .unwrap();
        assert!(!json.contains("\"ip\""));
        assert!(json.contains("\"method\":\"Bruteforce\""));
    }

    #[test]
    fn test_percentage_guards_zero_total() {
        assert_eq!(ProgressInfo { current: 0, total: 0 }.percentage(), 0.0);
        assert_eq!(ProgressInfo { current: 5, total: 10 }.percentage(), 50.0);
    }
}

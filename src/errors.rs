// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Scanner Error Types
 * Input, configuration and transport errors for the subdomain scanner
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use thiserror::Error;

/// Main scanner error type
///
/// Probe-level network failures never surface here: the prober maps them to
/// an inactive outcome. Only malformed input, bad configuration and setup
/// failures reach the caller.
#[derive(Error, Debug)]
pub enum ScannerError {
    /// Absent or empty target domain
    #[error("Domain is required")]
    MissingDomain,

    /// Domain that normalizes to nothing usable
    #[error("Invalid domain: {0}")]
    InvalidDomain(String),

    /// Unknown enumeration method
    #[error("Unsupported scan method: {0}")]
    InvalidMethod(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Failure building the HTTP client
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Failure building the DNS resolver
    #[error("DNS resolver error: {0}")]
    Resolver(String),

    /// Results export failure
    #[error("Export error: {0}")]
    Export(String),
}

impl ScannerError {
    /// Whether the error was caused by the request rather than the scanner
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ScannerError::MissingDomain
                | ScannerError::InvalidDomain(_)
                | ScannerError::InvalidMethod(_)
        )
    }
}

impl From<csv::Error> for ScannerError {
    fn from(err: csv::Error) -> Self {
        ScannerError::Export(err.to_string())
    }
}

/// Result type alias for scanner operations
pub type ScannerResult<T> = std::result::Result<T, ScannerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_domain_message() {
        assert_eq!(ScannerError::MissingDomain.to_string(), "Domain is required");
    }

    #[test]
    fn test_input_error_classification() {
        assert!(ScannerError::MissingDomain.is_input_error());
        assert!(ScannerError::InvalidMethod("zone".to_string()).is_input_error());
        assert!(!ScannerError::Configuration("batch".to_string()).is_input_error());
        assert!(!ScannerError::Resolver("no nameservers".to_string()).is_input_error());
        assert!(!ScannerError::Export("disk full".to_string()).is_input_error());
    }
}

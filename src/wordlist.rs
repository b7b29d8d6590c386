// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Subdomain Wordlist
 * Curated dictionary of well-known subdomain labels
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Common subdomain names to try, in probe order.
///
/// Infrastructure, mail, admin and staging conventions. Read-only for the
/// process lifetime.
pub const COMMON_SUBDOMAINS: &[&str] = &[
    "www", "mail", "ftp", "localhost", "webmail", "smtp", "pop", "ns1", "webdisk", "ns2",
    "cpanel", "whm", "autodiscover", "autoconfig", "m", "imap", "test", "ns", "blog",
    "pop3", "dev", "www2", "admin", "forum", "news", "vpn", "ns3", "mail2", "new",
    "mysql", "old", "lists", "support", "mobile", "mx", "static", "docs", "beta", "shop",
    "sql", "secure", "demo", "cp", "calendar", "wiki", "web", "media", "email", "images",
    "img", "www1", "intranet", "portal", "video", "sip", "dns2", "api", "cdn", "stats",
    "dns1", "ns4", "www3", "dns", "search", "staging", "server", "mx1", "chat", "wap",
    "my", "svn", "mail1", "sites", "proxy", "ads", "host", "crm", "cms", "backup", "mx2",
    "lyncdiscover", "info", "apps", "download", "remote", "db", "forums", "store",
    "relay", "files", "newsletter", "app", "live", "owa", "en", "start", "sms", "office",
    "exchange", "ipv4", "mail3", "help", "blogs", "helpdesk", "web1", "home", "library",
    "ftp2", "ntp", "monitor", "login", "service", "correo", "www4", "moodle", "it",
    "gateway", "gw", "i", "stat", "stage", "ldap", "tv", "ssl", "web2", "ns5", "upload",
    "nagios", "smtp2", "online", "ad", "survey", "data", "radio", "extranet", "test2",
    "mssql", "dns3", "jobs", "services", "panel", "irc", "hosting", "cloud", "de",
    "gmail", "s", "bbs", "cs", "ww", "mrtg", "git", "image", "members", "pda", "vps",
    "www5", "finance", "upload1", "mail4", "prod", "sandbox", "api2", "monitoring",
    "status",
];

static DICTIONARY_INDEX: Lazy<HashSet<&'static str>> =
    Lazy::new(|| COMMON_SUBDOMAINS.iter().copied().collect());

/// Whether `label` is one of the dictionary entries
pub fn is_dictionary_label(label: &str) -> bool {
    DICTIONARY_INDEX.contains(label)
}

/// Number of dictionary entries
pub fn dictionary_size() -> usize {
    COMMON_SUBDOMAINS.len()
}

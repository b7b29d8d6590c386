// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Candidate Generation
 * Dictionary and combinatorial subdomain label generation
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use std::collections::HashSet;
use tracing::debug;

use crate::config::ScannerConfig;
use crate::types::{Candidate, CandidateSource, ScanMethod};
use crate::wordlist::{is_dictionary_label, COMMON_SUBDOMAINS};

/// Full bruteforce alphabet. Hyphen is part of it but never placed by the
/// tiers below, so labels cannot start or end with one.
pub const BRUTEFORCE_CHARS: &str = "abcdefghijklmnopqrstuvwxyz0123456789-";

const ALNUM: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const THIRD_POSITION: &[u8] = b"abcde";

/// Per-position alphabets for each label length
const TIERS: [&[&[u8]]; 3] = [
    &[ALNUM],
    &[ALNUM, ALNUM],
    &[LETTERS, LETTERS, THIRD_POSITION],
];

pub const DEFAULT_BRUTEFORCE_LIMIT: usize = 150;
pub const DEFAULT_MAX_LABEL_LENGTH: usize = 3;

/// Lazy combinatorial label sequence.
///
/// Labels come out shortest first and, within a length, in alphabet order.
/// The sequence stops at `limit` even mid-tier. A clone continues from the
/// same position; use [`BruteforceLabels::new`] to start over.
#[derive(Debug, Clone)]
pub struct BruteforceLabels {
    tier: usize,
    index: usize,
    emitted: usize,
    max_length: usize,
    limit: usize,
}

impl BruteforceLabels {
    pub fn new(max_length: usize, limit: usize) -> Self {
        Self {
            tier: 0,
            index: 0,
            emitted: 0,
            max_length: max_length.min(TIERS.len()),
            limit,
        }
    }

    fn tier_size(tier: usize) -> usize {
        TIERS[tier].iter().map(|alphabet| alphabet.len()).product()
    }

    fn label_at(tier: usize, mut index: usize) -> String {
        let positions = TIERS[tier];
        let mut bytes = vec![0u8; positions.len()];

        for (slot, alphabet) in bytes.iter_mut().zip(positions.iter()).rev() {
            *slot = alphabet[index % alphabet.len()];
            index /= alphabet.len();
        }

        // Alphabets are ASCII
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl Default for BruteforceLabels {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LABEL_LENGTH, DEFAULT_BRUTEFORCE_LIMIT)
    }
}

impl Iterator for BruteforceLabels {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        if self.emitted >= self.limit {
            return None;
        }

        while self.tier < self.max_length {
            if self.index < Self::tier_size(self.tier) {
                let label = Self::label_at(self.tier, self.index);
                self.index += 1;
                self.emitted += 1;
                return Some(label);
            }
            self.tier += 1;
            self.index = 0;
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let mut remaining: usize = (self.tier..self.max_length).map(Self::tier_size).sum();
        if self.tier < self.max_length {
            remaining -= self.index;
        }
        let remaining = remaining.min(self.limit - self.emitted);
        (remaining, Some(remaining))
    }
}

/// Produces the ordered, deduplicated candidate set for a scan
#[derive(Debug, Clone)]
pub struct CandidateGenerator {
    bruteforce_limit: usize,
    max_label_length: usize,
}

impl CandidateGenerator {
    pub fn new(bruteforce_limit: usize, max_label_length: usize) -> Self {
        Self {
            bruteforce_limit,
            max_label_length,
        }
    }

    pub fn from_config(config: &ScannerConfig) -> Self {
        Self::new(config.bruteforce_limit, config.bruteforce_max_length)
    }

    /// Candidates for `method`, dictionary entries first.
    ///
    /// Labels are unique; the first occurrence wins, so a bruteforce label
    /// that is also a dictionary word keeps its dictionary tag.
    pub fn generate(&self, method: ScanMethod) -> Vec<Candidate> {
        let mut candidates = Vec::new();
        let mut seen = HashSet::new();

        if method.includes_dictionary() {
            for label in COMMON_SUBDOMAINS {
                if seen.insert(*label) {
                    candidates.push(Candidate::new(*label, CandidateSource::Dictionary));
                }
            }
        }

        if method.includes_bruteforce() {
            let dictionary_present = method.includes_dictionary();
            let mut skipped = 0usize;

            for label in self.bruteforce_labels() {
                if dictionary_present && is_dictionary_label(&label) {
                    skipped += 1;
                    continue;
                }
                candidates.push(Candidate::new(label, CandidateSource::Bruteforce));
            }

            if skipped > 0 {
                debug!("Dropped {} bruteforce labels already in the dictionary", skipped);
            }
        }

        debug!("Generated {} candidates for method {}", candidates.len(), method);
        candidates
    }

    pub fn bruteforce_labels(&self) -> BruteforceLabels {
        BruteforceLabels::new(self.max_label_length, self.bruteforce_limit)
    }
}

impl Default for CandidateGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_BRUTEFORCE_LIMIT, DEFAULT_MAX_LABEL_LENGTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wordlist::dictionary_size;

    #[test]
    fn test_dictionary_mode() {
        let candidates = CandidateGenerator::default().generate(ScanMethod::Dictionary);

        assert_eq!(candidates.len(), dictionary_size());
        assert!(candidates.iter().all(|c| c.source == CandidateSource::Dictionary));
        assert_eq!(candidates[0].label, "www");

        let unique: HashSet<_> = candidates.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(unique.len(), candidates.len());
    }

    #[test]
    fn test_bruteforce_default_sequence() {
        let labels: Vec<String> = BruteforceLabels::default().collect();

        assert_eq!(labels.len(), 150);
        assert_eq!(labels[0], "a");
        assert_eq!(labels[25], "z");
        assert_eq!(labels[26], "0");
        assert_eq!(labels[35], "9");
        assert_eq!(labels[36], "aa");
        assert_eq!(labels[37], "ab");
        // 36 singles + "a?" (36) + "b?" (36) + "c?" (36) + first 6 of "d?"
        assert_eq!(labels[149], "df");
    }

    #[test]
    fn test_bruteforce_charset_and_shape() {
        let allowed: HashSet<char> = BRUTEFORCE_CHARS.chars().collect();

        for label in BruteforceLabels::new(3, 5000) {
            assert!(!label.is_empty());
            assert!(label.len() <= 3);
            assert!(label.chars().all(|c| allowed.contains(&c)));
            assert!(!label.starts_with('-'));
            assert!(!label.ends_with('-'));
        }
    }

    #[test]
    fn test_bruteforce_size_order() {
        let labels: Vec<String> = BruteforceLabels::new(3, usize::MAX).collect();
        assert_eq!(labels.len(), 36 + 36 * 36 + 26 * 26 * 5);
        assert!(labels.windows(2).all(|w| w[0].len() <= w[1].len()));

        let first_three = labels.iter().position(|l| l.len() == 3).unwrap();
        assert_eq!(labels[first_three], "aaa");
        assert_eq!(labels[first_three + 1], "aab");
        assert_eq!(labels[first_three + 5], "aba");
        assert_eq!(labels.last().unwrap(), "zze");
    }

    #[test]
    fn test_bruteforce_respects_max_length() {
        let labels: Vec<String> = BruteforceLabels::new(1, 1000).collect();
        assert_eq!(labels.len(), 36);

        let labels: Vec<String> = BruteforceLabels::new(2, 10_000).collect();
        assert_eq!(labels.len(), 36 + 36 * 36);
    }

    #[test]
    fn test_bruteforce_limit_mid_tier() {
        let labels: Vec<String> = BruteforceLabels::new(3, 40).collect();
        assert_eq!(labels.len(), 40);
        assert_eq!(labels[39], "ad");
    }

    #[test]
    fn test_size_hint_tracks_remaining() {
        let mut labels = BruteforceLabels::new(2, 50);
        assert_eq!(labels.size_hint(), (50, Some(50)));
        labels.next();
        assert_eq!(labels.size_hint(), (49, Some(49)));

        let labels = BruteforceLabels::new(1, 1000);
        assert_eq!(labels.size_hint(), (36, Some(36)));
    }

    #[test]
    fn test_all_mode_deduplicates_against_dictionary() {
        let candidates = CandidateGenerator::default().generate(ScanMethod::All);

        let unique: HashSet<_> = candidates.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(unique.len(), candidates.len());

        let dictionary_count = candidates
            .iter()
            .take_while(|c| c.source == CandidateSource::Dictionary)
            .count();
        assert_eq!(dictionary_count, dictionary_size());

        // Single letters from the dictionary keep their dictionary tag
        for label in ["m", "i", "s", "mx", "db"] {
            let candidate = candidates.iter().find(|c| c.label == label).unwrap();
            assert_eq!(candidate.source, CandidateSource::Dictionary);
        }

        let bruteforce_count = candidates.len() - dictionary_count;
        assert!(bruteforce_count < DEFAULT_BRUTEFORCE_LIMIT);
        assert!(candidates[dictionary_count..]
            .iter()
            .all(|c| c.source == CandidateSource::Bruteforce && !is_dictionary_label(&c.label)));
    }

    #[test]
    fn test_bruteforce_mode_keeps_dictionary_overlaps() {
        let candidates = CandidateGenerator::default().generate(ScanMethod::Bruteforce);
        assert_eq!(candidates.len(), DEFAULT_BRUTEFORCE_LIMIT);
        assert!(candidates.iter().any(|c| c.label == "m"));
        assert!(candidates.iter().all(|c| c.source == CandidateSource::Bruteforce));
    }

    #[test]
    fn test_generation_is_deterministic() {
        let generator = CandidateGenerator::new(80, 3);
        assert_eq!(generator.generate(ScanMethod::All), generator.generate(ScanMethod::All));
    }
}

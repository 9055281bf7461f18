//! Frequency-based keyword extraction.
//!
//! No POS tagging: candidates are alphabetic tokens filtered through a
//! fixed stopword set and a short suffix-exclusion list that drops the
//! most common verb/adjective forms. Output order is deterministic.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;

/// Maximal alphabetic runs with internal hyphens.
static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-zA-Z][a-zA-Z-]*").unwrap());

/// Articles, conjunctions, prepositions, auxiliaries/modals, pronouns,
/// and demonstratives excluded from keyword candidates.
static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
        "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "do", "does",
        "did", "will", "would", "could", "should", "may", "might", "must", "can", "this", "that",
        "these", "those", "i", "you", "he", "she", "it", "we", "they", "me", "him", "her", "us",
        "them",
    ]
    .into_iter()
    .collect()
});

/// Suffixes that mark likely verb/adjective forms.
const EXCLUDED_SUFFIXES: &[&str] = &["ing", "ed", "ly", "er", "est"];

/// Extract the top `k` most frequent candidate nouns from `text`.
///
/// Deterministic and pure: ties rank in first-encountered order, and
/// fewer than `k` surviving candidates returns all of them.
pub fn extract_top_k(text: &str, k: usize) -> Vec<String> {
    let lowered = text.to_lowercase();

    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut first_seen: Vec<&str> = Vec::new();

    for m in WORD_RE.find_iter(&lowered) {
        // A trailing hyphen is not part of the word
        let word = m.as_str().trim_end_matches('-');
        if word.len() <= 2 || STOPWORDS.contains(word) {
            continue;
        }
        if EXCLUDED_SUFFIXES.iter().any(|s| word.ends_with(s)) {
            continue;
        }
        let count = counts.entry(word).or_insert(0);
        if *count == 0 {
            first_seen.push(word);
        }
        *count += 1;
    }

    // Stable sort over first-seen order keeps ties deterministic
    let mut ranked = first_seen;
    ranked.sort_by_key(|w| std::cmp::Reverse(counts[w]));
    ranked.into_iter().take(k).map(String::from).collect()
}

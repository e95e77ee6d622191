//! Approximate name matching.
//!
//! Names are compared with a token-sort ratio: both strings are reduced to a
//! key (lower-cased, punctuation replaced by spaces, whitespace-separated
//! tokens sorted and joined with single spaces), and the score is the
//! normalized Levenshtein similarity of the two keys scaled to 0-100 and
//! rounded. Identical keys score 100; an empty key scores 0 against anything.
//!
//! Sorting tokens makes word order irrelevant (`"Smith John"` scores 100
//! against `"John Smith"`), and rebuilding the key collapses doubled spaces.

use serde::{Deserialize, Serialize};

/// Default minimum score for two names to be treated as the same agent.
pub const DEFAULT_MATCH_THRESHOLD: u8 = 80;

/// A candidate name with its similarity to a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    /// The candidate name as it appears in the candidate list.
    pub name: String,
    /// Similarity score, 0-100.
    pub score: u8,
}

/// The outcome of matching one name against a candidate list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    /// The name the query resolves to: the best candidate on a match, the
    /// query itself otherwise.
    pub resolved: String,
    /// Whether the best candidate cleared the threshold.
    pub matched: bool,
    /// The best candidate regardless of threshold, if any were scored.
    pub best: Option<ScoredCandidate>,
}

fn token_sort_key(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c.to_lowercase().next().unwrap_or(c)
            } else {
                ' '
            }
        })
        .collect();
    let mut tokens: Vec<&str> = cleaned.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Scores the similarity of two names on a 0-100 scale.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::similarity;
///
/// assert_eq!(similarity("John Smith", "John  Smith"), 100);
/// assert_eq!(similarity("Smith, John", "john smith"), 100);
/// assert_eq!(similarity("Jon Smith", "John Smith"), 90);
/// assert!(similarity("John Smith", "Maria Garcia") < 50);
/// ```
pub fn similarity(a: &str, b: &str) -> u8 {
    let key_a = token_sort_key(a);
    let key_b = token_sort_key(b);
    if key_a.is_empty() || key_b.is_empty() {
        return 0;
    }
    if key_a == key_b {
        return 100;
    }
    let ratio = strsim::normalized_levenshtein(&key_a, &key_b);
    (ratio * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Finds the highest-scoring candidate for a query.
///
/// Empty candidates are skipped. Ties go to the candidate encountered first:
/// a later candidate replaces the current best only with a strictly higher
/// score. Returns `None` when the query is empty or there are no candidates.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::best_match;
///
/// let roster = ["Anna Lee".to_string(), "Anni Lee".to_string()];
/// let best = best_match("Anne Lee", &roster).unwrap();
/// // Both candidates are one edit away; the first one listed wins.
/// assert_eq!(best.name, "Anna Lee");
/// ```
pub fn best_match<S: AsRef<str>>(query: &str, candidates: &[S]) -> Option<ScoredCandidate> {
    if query.trim().is_empty() {
        return None;
    }

    let mut best: Option<ScoredCandidate> = None;
    for candidate in candidates {
        let candidate = candidate.as_ref();
        if candidate.trim().is_empty() {
            continue;
        }
        let score = similarity(query, candidate);
        if best.as_ref().is_none_or(|current| score > current.score) {
            best = Some(ScoredCandidate {
                name: candidate.to_string(),
                score,
            });
        }
    }
    best
}

/// Resolves a name against a candidate list.
///
/// The query resolves to the best candidate when its score is at least
/// `threshold`; otherwise it resolves to itself unchanged.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::match_name;
///
/// let roster = ["John Smith".to_string()];
/// let outcome = match_name("John  Smith", &roster, 80);
/// assert!(outcome.matched);
/// assert_eq!(outcome.resolved, "John Smith");
///
/// let outcome = match_name("Priya Patel", &roster, 80);
/// assert!(!outcome.matched);
/// assert_eq!(outcome.resolved, "Priya Patel");
/// ```
pub fn match_name<S: AsRef<str>>(query: &str, candidates: &[S], threshold: u8) -> MatchOutcome {
    let best = best_match(query, candidates);
    match best {
        Some(candidate) if candidate.score >= threshold => MatchOutcome {
            resolved: candidate.name.clone(),
            matched: true,
            best: Some(candidate),
        },
        best => MatchOutcome {
            resolved: query.to_string(),
            matched: false,
            best,
        },
    }
}

//! Agent identity resolution across the deal tracker and a role timesheet.
//!
//! The deal tracker and the timesheets are typed in independently, so one
//! person can appear under several spellings. [`resolve_roster`] reconciles
//! the two name lists for a role in both directions:
//!
//! 1. Forward: every timesheet name is matched against the deal tracker
//!    names. A match makes the deal tracker spelling the identity; otherwise
//!    the timesheet spelling is its own identity.
//! 2. Reverse: every deal tracker name no timesheet name resolved to is
//!    matched against the timesheet names and takes that timesheet name's
//!    identity on a match. This catches a second deal tracker spelling of an
//!    agent whose timesheet name already matched a different spelling.
//!
//! Without the reverse pass such an agent would be split into two rows, and
//! the deals under the second spelling would never reach payroll.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::models::{NameSource, Role, UnmatchedName};

use super::match_name;

/// The identity mapping for one role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterResolution {
    /// The role this roster belongs to.
    pub role: Role,
    timesheet_to_identity: HashMap<String, String>,
    deal_to_identity: HashMap<String, String>,
    /// Names that cleared the threshold in neither direction.
    pub unmatched: Vec<UnmatchedName>,
}

impl RosterResolution {
    /// Resolves a normalized timesheet name to its identity.
    ///
    /// Names that were not part of the resolved roster map to themselves.
    pub fn resolve_timesheet_name<'a>(&'a self, name: &'a str) -> &'a str {
        self.timesheet_to_identity
            .get(name)
            .map(String::as_str)
            .unwrap_or(name)
    }

    /// Resolves a normalized deal tracker name to its identity.
    ///
    /// Names that were not part of the resolved roster map to themselves.
    pub fn resolve_deal_name<'a>(&'a self, name: &'a str) -> &'a str {
        self.deal_to_identity
            .get(name)
            .map(String::as_str)
            .unwrap_or(name)
    }
}

/// Collects the distinct non-empty names in first-seen order.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::distinct_names;
///
/// let names = distinct_names(["Bo", "", "Ada", "Bo"]);
/// assert_eq!(names, vec!["Bo".to_string(), "Ada".to_string()]);
/// ```
pub fn distinct_names<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut ordered = Vec::new();
    for name in names {
        let name = name.as_ref();
        if !name.is_empty() && seen.insert(name.to_string()) {
            ordered.push(name.to_string());
        }
    }
    ordered
}

/// Reconciles a role's deal tracker names with its timesheet names.
///
/// Both lists must already be normalized and distinct; their order is the
/// iteration order used for tie-breaking (first candidate wins).
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::resolve_roster;
/// use payroll_engine::models::Role;
///
/// let deal_names = vec!["John Smith".to_string(), "Jon Smith".to_string()];
/// let timesheet_names = vec!["John  Smith".to_string()];
///
/// let roster = resolve_roster(Role::Closer, &deal_names, &timesheet_names, 80);
///
/// assert_eq!(roster.resolve_timesheet_name("John  Smith"), "John Smith");
/// assert_eq!(roster.resolve_deal_name("John Smith"), "John Smith");
/// // The second spelling is caught by the reverse pass
/// assert_eq!(roster.resolve_deal_name("Jon Smith"), "John Smith");
/// ```
pub fn resolve_roster(
    role: Role,
    deal_names: &[String],
    timesheet_names: &[String],
    threshold: u8,
) -> RosterResolution {
    let mut timesheet_to_identity = HashMap::new();
    let mut deal_to_identity = HashMap::new();
    let mut unmatched = Vec::new();

    for name in timesheet_names {
        let outcome = match_name(name, deal_names, threshold);
        if outcome.matched {
            deal_to_identity.insert(outcome.resolved.clone(), outcome.resolved.clone());
        } else {
            unmatched.push(UnmatchedName {
                role,
                source: NameSource::Timesheet,
                name: name.clone(),
                best_candidate: outcome.best.as_ref().map(|b| b.name.clone()),
                best_score: outcome.best.as_ref().map(|b| b.score).unwrap_or(0),
            });
        }
        timesheet_to_identity.insert(name.clone(), outcome.resolved);
    }

    for name in deal_names {
        if deal_to_identity.contains_key(name) {
            continue;
        }
        let outcome = match_name(name, timesheet_names, threshold);
        let identity = if outcome.matched {
            timesheet_to_identity
                .get(&outcome.resolved)
                .cloned()
                .unwrap_or(outcome.resolved)
        } else {
            unmatched.push(UnmatchedName {
                role,
                source: NameSource::DealTracker,
                name: name.clone(),
                best_candidate: outcome.best.as_ref().map(|b| b.name.clone()),
                best_score: outcome.best.as_ref().map(|b| b.score).unwrap_or(0),
            });
            name.clone()
        };
        deal_to_identity.insert(name.clone(), identity);
    }

    RosterResolution {
        role,
        timesheet_to_identity,
        deal_to_identity,
        unmatched,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_forward_match_uses_deal_tracker_spelling() {
        let roster = resolve_roster(
            Role::Closer,
            &names(&["John Smith"]),
            &names(&["John  Smith"]),
            80,
        );

        assert_eq!(roster.resolve_timesheet_name("John  Smith"), "John Smith");
        assert_eq!(roster.resolve_deal_name("John Smith"), "John Smith");
        assert!(roster.unmatched.is_empty());
    }

    #[test]
    fn test_reverse_match_merges_second_deal_spelling() {
        // The timesheet name matches the exact spelling; the misspelled deal
        // tracker entry is only reachable from the deal tracker side.
        let roster = resolve_roster(
            Role::Closer,
            &names(&["Maria Garcia", "Maria Garcai"]),
            &names(&["Maria Garcia"]),
            80,
        );

        assert_eq!(roster.resolve_deal_name("Maria Garcia"), "Maria Garcia");
        assert_eq!(roster.resolve_deal_name("Maria Garcai"), "Maria Garcia");
        assert!(roster.unmatched.is_empty());
    }

    #[test]
    fn test_threshold_applies_in_both_directions() {
        let roster = resolve_roster(
            Role::Enroller,
            &names(&["Bo Diazz"]),
            &names(&["Bo Diaz"]),
            90,
        );

        // 1 edit in 8 characters: 88, below 90 forward and reverse alike
        assert_eq!(roster.resolve_timesheet_name("Bo Diaz"), "Bo Diaz");
        assert_eq!(roster.resolve_deal_name("Bo Diazz"), "Bo Diazz");
        assert_eq!(roster.unmatched.len(), 2);
    }

    #[test]
    fn test_unmatched_names_are_reported_from_both_sources() {
        let roster = resolve_roster(
            Role::Closer,
            &names(&["Ada Jones", "Zed Quinn"]),
            &names(&["Ada Jones", "Priya Patel"]),
            80,
        );

        let timesheet_unmatched: Vec<&str> = roster
            .unmatched
            .iter()
            .filter(|u| u.source == NameSource::Timesheet)
            .map(|u| u.name.as_str())
            .collect();
        let deal_unmatched: Vec<&str> = roster
            .unmatched
            .iter()
            .filter(|u| u.source == NameSource::DealTracker)
            .map(|u| u.name.as_str())
            .collect();

        assert_eq!(timesheet_unmatched, vec!["Priya Patel"]);
        assert_eq!(deal_unmatched, vec!["Zed Quinn"]);
        assert!(roster.unmatched.iter().all(|u| u.role == Role::Closer));
    }

    #[test]
    fn test_unmatched_names_pass_through_verbatim() {
        let roster = resolve_roster(
            Role::Closer,
            &names(&["Zed Quinn"]),
            &names(&["Priya Patel"]),
            80,
        );

        assert_eq!(roster.resolve_timesheet_name("Priya Patel"), "Priya Patel");
        assert_eq!(roster.resolve_deal_name("Zed Quinn"), "Zed Quinn");
    }

    #[test]
    fn test_empty_deal_roster_keeps_timesheet_names() {
        let roster = resolve_roster(Role::Enroller, &[], &names(&["Ada Jones"]), 80);

        assert_eq!(roster.resolve_timesheet_name("Ada Jones"), "Ada Jones");
        assert_eq!(roster.unmatched.len(), 1);
        assert_eq!(roster.unmatched[0].best_candidate, None);
        assert_eq!(roster.unmatched[0].best_score, 0);
    }

    #[test]
    fn test_names_outside_the_roster_resolve_to_themselves() {
        let roster = resolve_roster(Role::Closer, &[], &[], 80);
        assert_eq!(roster.resolve_deal_name("Anyone"), "Anyone");
        assert_eq!(roster.resolve_timesheet_name(""), "");
    }

    #[test]
    fn test_distinct_names_skips_empty_and_duplicates() {
        let result = distinct_names(vec!["Ada", "", "Bo", "Ada", ""]);
        assert_eq!(result, names(&["Ada", "Bo"]));
    }
}

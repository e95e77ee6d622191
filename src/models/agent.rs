//! Agent role model.

use serde::{Deserialize, Serialize};

/// The sales role an agent is paid under.
///
/// An agent who works both roles in the same week is paid as two separate
/// payroll lines, one per role.
///
/// # Example
///
/// ```
/// use payroll_engine::models::Role;
///
/// assert_eq!(Role::Closer.to_string(), "Closer");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Paid per closed deal plus hourly and bonus components.
    Closer,
    /// Paid per submitted deal plus an hourly component.
    Enroller,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Closer => write!(f, "Closer"),
            Role::Enroller => write!(f, "Enroller"),
        }
    }
}

//! Employee model.
//!
//! Employees come from the roster sheet. Their position in the roster is
//! their slot: it selects the status column in attendance rows and the
//! totals column in [`crate::models::TotalsRow`].

use serde::{Deserialize, Serialize};

/// Represents an employee on the roster.
///
/// The credential hash is never serialized, so an `Employee` can be handed
/// to views or logged without leaking it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Login identity.
    pub email: String,
    /// Display name.
    pub full_name: String,
    /// Argon2 PHC string for the employee's secret.
    #[serde(default, skip_serializing)]
    pub credential_hash: String,
}

impl Employee {
    /// Creates an employee record.
    pub fn new(
        email: impl Into<String>,
        full_name: impl Into<String>,
        credential_hash: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            full_name: full_name.into(),
            credential_hash: credential_hash.into(),
        }
    }

    /// Returns true if this employee logs in with `email`.
    ///
    /// Comparison is exact, as the roster sheet is the source of truth for
    /// spelling and case.
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_ledger::models::Employee;
    ///
    /// let employee = Employee::new("dana@example.com", "Dana Levi", "");
    /// assert!(employee.has_email("dana@example.com"));
    /// assert!(!employee.has_email("Dana@example.com"));
    /// ```
    pub fn has_email(&self, email: &str) -> bool {
        self.email == email
    }
}

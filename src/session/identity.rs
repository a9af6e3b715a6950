//! Credential hashing and roster authentication.

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::{DateTime, Utc};
use rand_core::OsRng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{LedgerError, LedgerResult};
use crate::models::Employee;

/// The authenticated user of a session.
///
/// Carries no credential material, so it can be persisted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Email the user logged in with.
    pub email: String,
    /// Display name from the roster.
    pub full_name: String,
    /// Unique id of this login.
    pub session_id: Uuid,
    /// When the login succeeded.
    pub authenticated_at: DateTime<Utc>,
}

impl Identity {
    /// Starts a new identity for `employee`, stamped now.
    pub fn for_employee(employee: &Employee) -> Self {
        Self {
            email: employee.email.clone(),
            full_name: employee.full_name.clone(),
            session_id: Uuid::new_v4(),
            authenticated_at: Utc::now(),
        }
    }
}

/// Hashes a secret into an Argon2 PHC string with a random salt.
///
/// # Example
///
/// ```
/// use attendance_ledger::models::Employee;
/// use attendance_ledger::session::{hash_credential, verify_credential};
///
/// let hash = hash_credential("s3cret")?;
/// let employee = Employee::new("dana@example.com", "Dana Levi", hash);
/// assert!(verify_credential(&employee, "s3cret")?);
/// assert!(!verify_credential(&employee, "guess")?);
/// # Ok::<(), attendance_ledger::error::LedgerError>(())
/// ```
pub fn hash_credential(secret: &str) -> LedgerResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(secret.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| LedgerError::CredentialHashing {
            message: e.to_string(),
        })
}

/// Checks `secret` against the employee's stored hash.
///
/// A stored hash that is not a valid PHC string is an error; a mismatch is
/// `Ok(false)`.
pub fn verify_credential(employee: &Employee, secret: &str) -> LedgerResult<bool> {
    let parsed = PasswordHash::new(&employee.credential_hash).map_err(|_| {
        LedgerError::InvalidCredentialHash {
            email: employee.email.clone(),
        }
    })?;
    Ok(Argon2::default()
        .verify_password(secret.as_bytes(), &parsed)
        .is_ok())
}

/// Finds the roster entry for `email` and verifies `secret` against it.
///
/// Unknown emails and wrong secrets both give `Ok(None)`. Only the first
/// roster entry with a matching email is considered.
pub fn authenticate<'a>(
    roster: &'a [Employee],
    email: &str,
    secret: &str,
) -> LedgerResult<Option<&'a Employee>> {
    let Some(employee) = roster.iter().find(|e| e.has_email(email)) else {
        return Ok(None);
    };
    if verify_credential(employee, secret)? {
        Ok(Some(employee))
    } else {
        Ok(None)
    }
}

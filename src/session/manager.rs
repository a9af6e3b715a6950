//! The explicit session object.

use tracing::{info, warn};

use crate::error::LedgerResult;
use crate::models::{Employee, ROSTER_SLOTS};

use super::identity::{Identity, authenticate};
use super::store::SessionStore;

/// The logged-in state of one user, persisted through a [`SessionStore`].
///
/// # Example
///
/// ```
/// use attendance_ledger::models::Employee;
/// use attendance_ledger::session::{MemorySessionStore, Session, hash_credential};
///
/// let roster = vec![Employee::new("dana@example.com", "Dana Levi", hash_credential("pw")?)];
/// let mut session = Session::restore(MemorySessionStore::new());
/// assert!(!session.is_authenticated());
///
/// session.login(&roster, "dana@example.com", "pw")?;
/// assert_eq!(session.roster_slot(&roster), Some(0));
///
/// session.logout()?;
/// assert!(session.identity().is_none());
/// # Ok::<(), attendance_ledger::error::LedgerError>(())
/// ```
#[derive(Debug)]
pub struct Session<S> {
    store: S,
    identity: Option<Identity>,
}

impl<S: SessionStore> Session<S> {
    /// Resumes whatever identity `store` holds.
    ///
    /// A store that cannot be read, or holds unreadable data, yields a
    /// logged-out session.
    pub fn restore(store: S) -> Self {
        let identity = match store.load() {
            Ok(identity) => identity,
            Err(error) => {
                warn!(error = %error, "Discarding unreadable stored session");
                None
            }
        };
        Self { store, identity }
    }

    /// Verifies the credentials against `roster` and, on success, stores a
    /// fresh identity.
    ///
    /// Returns `Ok(None)` for an unknown email or wrong secret; the current
    /// identity is left untouched in that case.
    pub fn login(
        &mut self,
        roster: &[Employee],
        email: &str,
        secret: &str,
    ) -> LedgerResult<Option<&Identity>> {
        let Some(employee) = authenticate(roster, email, secret)? else {
            info!(email, "Login rejected");
            return Ok(None);
        };

        let identity = Identity::for_employee(employee);
        self.store.save(&identity)?;
        info!(
            email,
            session_id = %identity.session_id,
            "Login succeeded"
        );
        Ok(Some(self.identity.insert(identity)))
    }

    /// Ends the session and clears the store.
    pub fn logout(&mut self) -> LedgerResult<()> {
        self.store.clear()?;
        if let Some(identity) = self.identity.take() {
            info!(email = %identity.email, session_id = %identity.session_id, "Logged out");
        }
        Ok(())
    }

    /// Returns the logged-in identity.
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// Returns true when someone is logged in.
    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    /// Returns the attendance slot of the logged-in user.
    ///
    /// `None` when logged out, when the email is no longer on the roster, or
    /// when the user sits beyond the last slot.
    pub fn roster_slot(&self, roster: &[Employee]) -> Option<usize> {
        let identity = self.identity.as_ref()?;
        roster
            .iter()
            .position(|e| e.has_email(&identity.email))
            .filter(|&slot| slot < ROSTER_SLOTS)
    }

    /// Returns the backing store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{FileSessionStore, MemorySessionStore, hash_credential};

    fn create_test_roster() -> Vec<Employee> {
        let hash = hash_credential("pw").unwrap();
        (1..=6)
            .map(|n| Employee::new(format!("e{n}@example.com"), format!("Employee {n}"), hash.clone()))
            .collect()
    }

    #[test]
    fn test_login_and_slot() {
        let roster = create_test_roster();
        let mut session = Session::restore(MemorySessionStore::new());

        let identity = session.login(&roster, "e3@example.com", "pw").unwrap();
        assert_eq!(identity.map(|i| i.full_name.as_str()), Some("Employee 3"));
        assert!(session.is_authenticated());
        assert_eq!(session.roster_slot(&roster), Some(2));
        assert!(session.store().load().unwrap().is_some());
    }

    #[test]
    fn test_failed_login_keeps_current_identity() {
        let roster = create_test_roster();
        let mut session = Session::restore(MemorySessionStore::new());
        session.login(&roster, "e1@example.com", "pw").unwrap();

        assert!(session.login(&roster, "e2@example.com", "wrong").unwrap().is_none());
        assert_eq!(session.identity().unwrap().email, "e1@example.com");
    }

    #[test]
    fn test_slot_beyond_roster_capacity() {
        let roster = create_test_roster();
        let mut session = Session::restore(MemorySessionStore::new());
        session.login(&roster, "e6@example.com", "pw").unwrap();
        assert!(session.is_authenticated());
        assert_eq!(session.roster_slot(&roster), None);
    }

    #[test]
    fn test_slot_after_removal_from_roster() {
        let roster = create_test_roster();
        let mut session = Session::restore(MemorySessionStore::new());
        session.login(&roster, "e2@example.com", "pw").unwrap();
        assert_eq!(session.roster_slot(&roster[2..]), None);
    }

    #[test]
    fn test_logout_clears_store() {
        let roster = create_test_roster();
        let mut session = Session::restore(MemorySessionStore::new());
        session.login(&roster, "e1@example.com", "pw").unwrap();
        session.logout().unwrap();

        assert!(!session.is_authenticated());
        assert!(session.store().load().unwrap().is_none());
        assert_eq!(session.roster_slot(&roster), None);
    }

    #[test]
    fn test_restore_resumes_saved_identity() {
        let roster = create_test_roster();
        let store = MemorySessionStore::new();
        let saved = Identity::for_employee(&roster[0]);
        store.save(&saved).unwrap();

        let session = Session::restore(store);
        assert_eq!(session.identity(), Some(&saved));
    }

    #[test]
    fn test_restore_corrupt_file_is_logged_out() {
        let dir = std::env::temp_dir().join(format!("ledger-session-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("session.json");
        std::fs::write(&path, "garbage").unwrap();

        let session = Session::restore(FileSessionStore::new(&path));
        assert!(!session.is_authenticated());
        std::fs::remove_dir_all(dir).ok();
    }
}

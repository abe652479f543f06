use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

/// Emails with a verification request currently in flight.
#[derive(Clone, Debug, Default)]
pub struct InFlight {
    emails: Arc<Mutex<HashSet<String>>>,
}

impl InFlight {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the slot for `email`; `None` when another request holds it.
    /// The slot is released when the guard drops.
    #[must_use]
    pub fn try_acquire(&self, email: &str) -> Option<InFlightGuard> {
        let mut emails = self.emails.lock().unwrap_or_else(PoisonError::into_inner);
        if !emails.insert(email.to_string()) {
            return None;
        }

        Some(InFlightGuard {
            emails: Arc::clone(&self.emails),
            email: email.to_string(),
        })
    }

    #[cfg(test)]
    #[must_use]
    pub fn contains(&self, email: &str) -> bool {
        self.emails
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(email)
    }
}

#[derive(Debug)]
pub struct InFlightGuard {
    emails: Arc<Mutex<HashSet<String>>>,
    email: String,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.emails
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.email);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_acquire_is_refused_until_release() {
        let in_flight = InFlight::new();

        let guard = in_flight.try_acquire("user@example.com");
        assert!(guard.is_some());
        assert!(in_flight.try_acquire("user@example.com").is_none());
        assert!(in_flight.contains("user@example.com"));

        drop(guard);
        assert!(!in_flight.contains("user@example.com"));
        assert!(in_flight.try_acquire("user@example.com").is_some());
    }

    #[test]
    fn different_emails_do_not_block_each_other() {
        let in_flight = InFlight::new();
        let _first = in_flight.try_acquire("a@example.com");
        assert!(in_flight.try_acquire("b@example.com").is_some());
    }
}

//! Admission control for tournament registrations

use serde::Serialize;

/// Number of teams the tournament accepts unless configured otherwise
pub const DEFAULT_CAPACITY: usize = 6;

/// Fixed capacity limit on registered teams
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdmissionPolicy {
    capacity: usize,
}

impl Default for AdmissionPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl AdmissionPolicy {
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether one more team may be admitted given the current count
    pub fn can_admit(&self, registered: usize) -> bool {
        registered < self.capacity
    }

    pub fn remaining(&self, registered: usize) -> usize {
        self.capacity.saturating_sub(registered)
    }

    pub fn status(&self, registered: usize) -> AdmissionStatus {
        AdmissionStatus {
            registered,
            capacity: self.capacity,
            remaining: self.remaining(registered),
            open: self.can_admit(registered),
        }
    }
}

/// Snapshot of the registration window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AdmissionStatus {
    pub registered: usize,
    pub capacity: usize,
    pub remaining: usize,
    pub open: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_capacity() {
        assert_eq!(AdmissionPolicy::default().capacity(), 6);
    }

    #[test]
    fn test_can_admit_boundary() {
        let policy = AdmissionPolicy::default();

        assert!(policy.can_admit(0));
        assert!(policy.can_admit(5));
        assert!(!policy.can_admit(6));
        assert!(!policy.can_admit(7));
    }

    #[test]
    fn test_status() {
        let policy = AdmissionPolicy::new(6);

        let status = policy.status(4);
        assert_eq!(status.remaining, 2);
        assert!(status.open);

        let status = policy.status(6);
        assert_eq!(status.remaining, 0);
        assert!(!status.open);

        // Over capacity (e.g. capacity lowered after registrations) stays closed
        assert_eq!(policy.status(8).remaining, 0);
    }

    #[test]
    fn test_zero_capacity_is_closed() {
        assert!(!AdmissionPolicy::new(0).can_admit(0));
    }
}

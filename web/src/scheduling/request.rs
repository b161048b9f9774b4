use chrono::NaiveDate;

/// Identifies one request issued for a selected date. A response is only
/// applied while its ticket is still the latest one issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    generation: u64,
    date: NaiveDate,
}

impl RequestTicket {
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestTracker {
    generation: u64,
}

impl RequestTracker {
    /// Issues a ticket for `date`, invalidating every earlier one.
    pub fn issue(&mut self, date: NaiveDate) -> RequestTicket {
        self.generation += 1;
        RequestTicket {
            generation: self.generation,
            date,
        }
    }

    /// Invalidates every ticket issued so far without issuing a new one.
    pub fn invalidate(&mut self) {
        self.generation += 1;
    }

    pub fn is_current(&self, ticket: &RequestTicket) -> bool {
        ticket.generation == self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_latest_ticket_is_current() {
        let d1 = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2025, 3, 11).unwrap();
        let mut tracker = RequestTracker::default();

        let first = tracker.issue(d1);
        assert!(tracker.is_current(&first));

        let second = tracker.issue(d2);
        assert!(!tracker.is_current(&first));
        assert!(tracker.is_current(&second));
        assert_eq!(second.date(), d2);
        assert!(second.generation() > first.generation());
    }

    #[test]
    fn reissuing_the_same_date_still_invalidates() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let mut tracker = RequestTracker::default();

        let first = tracker.issue(day);
        let second = tracker.issue(day);
        assert!(!tracker.is_current(&first));
        assert!(tracker.is_current(&second));
    }

    #[test]
    fn invalidate_retires_the_outstanding_ticket() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let mut tracker = RequestTracker::default();

        let ticket = tracker.issue(day);
        tracker.invalidate();
        assert!(!tracker.is_current(&ticket));
    }
}

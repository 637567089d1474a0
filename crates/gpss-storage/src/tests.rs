//! Unit tests for gpss-storage.

use gpss_core::{Tick, Transact, TransactId};

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
enum Kind {
    Car,
}

fn transact(n: u32, time: u64) -> Transact<Kind> {
    Transact::new(TransactId(n), Kind::Car, Tick(time))
}

fn ids<'a>(set: impl IntoIterator<Item = &'a Transact<Kind>>) -> Vec<u32> {
    set.into_iter().map(|t| t.id.0).collect()
}

#[cfg(test)]
mod transitions {
    use super::*;
    use crate::Storage;

    #[test]
    fn admit_goes_to_future() {
        let mut s = Storage::new();
        assert!(s.admit(transact(0, 10)));
        assert!(s.is_future(TransactId(0)));
        assert!(!s.is_current(TransactId(0)));
        assert_eq!(s.live_count(), 1);
    }

    #[test]
    fn admit_twice_is_noop() {
        let mut s = Storage::new();
        assert!(s.admit(transact(0, 10)));
        assert!(!s.admit(transact(0, 99)));
        assert_eq!(s.future_len(), 1);
        assert_eq!(s.get(TransactId(0)).unwrap().time, Tick(10));
    }

    #[test]
    fn promote_and_demote() {
        let mut s = Storage::new();
        s.admit(transact(0, 10));
        assert!(s.promote(TransactId(0)));
        assert!(s.is_current(TransactId(0)));
        assert!(!s.is_future(TransactId(0)));

        // Second promote: not in future any more.
        assert!(!s.promote(TransactId(0)));

        assert!(s.demote(TransactId(0)));
        assert!(s.is_future(TransactId(0)));
        assert!(!s.demote(TransactId(0)), "already in future");
    }

    #[test]
    fn promote_due_only_moves_matching_time_in_order() {
        let mut s = Storage::new();
        s.admit(transact(0, 25));
        s.admit(transact(1, 20));
        s.admit(transact(2, 25));
        s.admit(transact(3, 30));
        assert_eq!(s.promote_due(Tick(25)), 2);
        assert_eq!(ids(s.current()), [0, 2]);
        assert_eq!(ids(s.future()), [1, 3]);
    }

    #[test]
    fn reschedule_stamps_time_and_demotes() {
        let mut s = Storage::new();
        s.admit(transact(0, 10));
        s.promote(TransactId(0));
        assert!(s.reschedule(TransactId(0), Tick(25)));
        assert!(s.is_future(TransactId(0)));
        assert_eq!(s.get(TransactId(0)).unwrap().time, Tick(25));
        assert!(!s.reschedule(TransactId(9), Tick(1)));
    }

    #[test]
    fn reschedule_within_future_moves_bucket() {
        let mut s = Storage::new();
        s.admit(transact(0, 10));
        s.admit(transact(1, 30));
        assert!(s.reschedule(TransactId(0), Tick(40)));
        assert_eq!(s.minimum_future_time(), Some(Tick(30)));
        assert_eq!(ids(s.future()), [1, 0]);
        assert_eq!(s.promote_due(Tick(10)), 0);
        assert_eq!(s.duplicate_live_id(), None);
    }

    #[test]
    fn demote_appends_to_its_time_bucket() {
        let mut s = Storage::new();
        s.admit(transact(0, 10));
        s.admit(transact(1, 10));
        s.promote(TransactId(0));
        s.demote(TransactId(0));
        assert_eq!(ids(s.future()), [1, 0]);
        assert_eq!(s.promote_due(Tick(10)), 2);
        assert_eq!(ids(s.current()), [1, 0]);
    }

    #[test]
    fn terminate_moves_to_history_once() {
        let mut s = Storage::new();
        s.admit(transact(0, 10));
        s.promote(TransactId(0));
        let t = s.terminate(TransactId(0)).unwrap();
        assert_eq!(t.id, TransactId(0));
        assert!(s.is_terminated(TransactId(0)));
        assert!(!s.is_live(TransactId(0)));
        assert!(s.terminate(TransactId(0)).is_none());
        assert_eq!(s.history().len(), 1);
    }

    #[test]
    fn terminated_transact_never_readmitted() {
        let mut s = Storage::new();
        s.admit(transact(0, 10));
        s.terminate(TransactId(0));
        assert!(!s.admit(transact(0, 40)));
        assert!(s.is_empty());
    }

    #[test]
    fn terminate_from_future() {
        let mut s = Storage::new();
        s.admit(transact(0, 10));
        assert!(s.terminate(TransactId(0)).is_some());
        assert_eq!(s.future_len(), 0);
        assert_eq!(s.minimum_future_time(), None);
    }
}

#[cfg(test)]
mod queries {
    use super::*;
    use crate::Storage;

    #[test]
    fn minimum_future_time() {
        let mut s: Storage<Kind> = Storage::new();
        assert_eq!(s.minimum_future_time(), None);
        s.admit(transact(0, 40));
        s.admit(transact(1, 25));
        assert_eq!(s.minimum_future_time(), Some(Tick(25)));
    }

    #[test]
    fn current_set_is_ignored_by_minimum() {
        let mut s = Storage::new();
        s.admit(transact(0, 5));
        s.admit(transact(1, 25));
        s.promote(TransactId(0));
        assert_eq!(s.minimum_future_time(), Some(Tick(25)));
    }

    #[test]
    fn all_is_sorted_by_time() {
        let mut s = Storage::new();
        s.admit(transact(0, 40));
        s.admit(transact(1, 25));
        s.admit(transact(2, 30));
        s.promote(TransactId(2));
        assert_eq!(ids(&s.all()), [1, 2, 0]);
    }

    #[test]
    fn no_duplicates_through_public_api() {
        let mut s = Storage::new();
        for n in 0..5 {
            s.admit(transact(n, 10));
        }
        s.promote_due(Tick(10));
        s.demote(TransactId(2));
        assert_eq!(s.duplicate_live_id(), None);
    }

    #[test]
    fn large_sets_stay_consistent() {
        let mut s = Storage::new();
        for n in 0..20_000 {
            s.admit(transact(n, u64::from(n % 500)));
        }
        assert_eq!(s.minimum_future_time(), Some(Tick(0)));
        assert_eq!(s.promote_due(Tick(0)), 40);
        for n in (0..20_000).step_by(500) {
            assert!(s.reschedule(TransactId(n), Tick(1_000)));
        }
        assert_eq!(s.current_len(), 0);
        assert_eq!(s.future_len(), 20_000);
        assert_eq!(s.minimum_future_time(), Some(Tick(1)));
        for n in (1..20_000).step_by(2) {
            assert!(s.terminate(TransactId(n)).is_some());
        }
        assert_eq!(s.live_count(), 10_000);
        assert_eq!(s.history().len(), 10_000);
        assert_eq!(s.duplicate_live_id(), None);
    }

    #[test]
    fn display_lists_both_sets() {
        let mut s = Storage::new();
        s.admit(transact(0, 10));
        s.admit(transact(1, 20));
        s.promote(TransactId(0));
        let text = s.to_string();
        assert!(text.contains("Current events list:\n  [0, 10]"));
        assert!(text.contains("Future events list:\n  [1, 20]"));
    }
}

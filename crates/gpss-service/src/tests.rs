//! Unit tests for gpss-service.

use gpss_core::{Fixed, GpssError, ServiceId, SimRng, Tick, Transact, TransactId};
use gpss_storage::Storage;

use crate::{Service, ServiceContext};

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
enum Kind {
    Car,
}

fn service(delay: u64, with_queue: bool) -> Service<Kind> {
    Service::new(ServiceId(0), Fixed(delay), with_queue, SimRng::new(0))
}

/// Admit transact `n` arriving at `time` and move it straight to the
/// current set, as the model's clock correction would.
fn arrive(storage: &mut Storage<Kind>, n: u32, time: u64) -> TransactId {
    let id = TransactId(n);
    storage.admit(Transact::new(id, Kind::Car, Tick(time)).with_handler(ServiceId(0)));
    storage.promote(id);
    id
}

#[cfg(test)]
mod seize {
    use super::*;
    use crate::{Handled, Seizure, ServiceState};

    #[test]
    fn free_service_is_seized() {
        let mut storage = Storage::new();
        let mut svc = service(15, true);
        let t0 = arrive(&mut storage, 0, 10);

        let out = svc.handle(t0, &mut ServiceContext::new(Tick(10), &mut storage)).unwrap();
        assert_eq!(out, Handled::Seized(Seizure { transact: t0, completes_at: Tick(25) }));
        assert_eq!(svc.state(), ServiceState::Busy(t0));
        assert!(storage.is_future(t0), "seized transact is demoted");
        assert_eq!(storage.get(t0).unwrap().time, Tick(25));
    }

    #[test]
    fn occupant_before_completion_is_noop() {
        let mut storage = Storage::new();
        let mut svc = service(15, true);
        let t0 = arrive(&mut storage, 0, 10);
        svc.handle(t0, &mut ServiceContext::new(Tick(10), &mut storage)).unwrap();

        let out = svc.handle(t0, &mut ServiceContext::new(Tick(20), &mut storage)).unwrap();
        assert_eq!(out, Handled::InService(t0));
        assert!(svc.is_processing(t0));
        assert!(svc.history().is_empty());
    }

    #[test]
    fn unknown_transact_errors() {
        let mut storage: Storage<Kind> = Storage::new();
        let mut svc = service(15, true);
        let res = svc.handle(TransactId(7), &mut ServiceContext::new(Tick(0), &mut storage));
        assert!(res.is_err());
        assert!(svc.is_free(), "failed seize must not occupy the service");
    }

    #[test]
    fn zero_delay_completes_same_instant() {
        let mut storage = Storage::new();
        let mut svc = service(0, false);
        let t0 = arrive(&mut storage, 0, 10);
        svc.handle(t0, &mut ServiceContext::new(Tick(10), &mut storage)).unwrap();
        storage.promote_due(Tick(10));

        let out = svc.handle(t0, &mut ServiceContext::new(Tick(10), &mut storage)).unwrap();
        assert!(matches!(out, Handled::Released { next: None, .. }));
        assert!(svc.is_free());
    }
}

#[cfg(test)]
mod contention {
    use super::*;
    use crate::{Handled, Seizure, ServiceState};

    #[test]
    fn contender_is_queued_once() {
        let mut storage = Storage::new();
        let mut svc = service(15, true);
        let t0 = arrive(&mut storage, 0, 10);
        svc.handle(t0, &mut ServiceContext::new(Tick(10), &mut storage)).unwrap();

        let t1 = arrive(&mut storage, 1, 20);
        let out = svc.handle(t1, &mut ServiceContext::new(Tick(20), &mut storage)).unwrap();
        assert_eq!(out, Handled::Queued { transact: t1, length: 1 });

        let again = svc.handle(t1, &mut ServiceContext::new(Tick(20), &mut storage)).unwrap();
        assert_eq!(again, Handled::StillQueued(t1));
        assert_eq!(svc.queue().unwrap().len(), 1);
        assert!(storage.is_current(t1), "queued transacts stay in the current set");
    }

    #[test]
    fn release_hands_over_to_queue_head() {
        let mut storage = Storage::new();
        let mut svc = service(15, true);
        let t0 = arrive(&mut storage, 0, 10);
        svc.handle(t0, &mut ServiceContext::new(Tick(10), &mut storage)).unwrap();
        let t1 = arrive(&mut storage, 1, 20);
        svc.handle(t1, &mut ServiceContext::new(Tick(20), &mut storage)).unwrap();

        storage.promote_due(Tick(25));
        let out = svc.handle(t0, &mut ServiceContext::new(Tick(25), &mut storage)).unwrap();
        assert_eq!(
            out,
            Handled::Released {
                transact: t0,
                next:     Some(Seizure { transact: t1, completes_at: Tick(40) }),
            }
        );
        assert_eq!(svc.state(), ServiceState::Busy(t1));
        assert!(storage.is_terminated(t0));
        assert!(storage.is_future(t1));
        assert_eq!(svc.history().len(), 1);
        assert_eq!(svc.history()[0].id, t0);
        assert_eq!(svc.history()[0].time, Tick(25));

        let stats = svc.queue_statistics().unwrap();
        assert_eq!(stats.max_length(), 1);
        assert_eq!(stats.exits()[0].time, Tick(25));
    }

    #[test]
    fn failed_handover_leaves_service_untouched() {
        let mut storage = Storage::new();
        let mut svc = service(15, true);
        let t0 = arrive(&mut storage, 0, 10);
        svc.handle(t0, &mut ServiceContext::new(Tick(10), &mut storage)).unwrap();
        let t1 = arrive(&mut storage, 1, 20);
        svc.handle(t1, &mut ServiceContext::new(Tick(20), &mut storage)).unwrap();

        // The waiting head vanishes from storage before the occupant leaves.
        storage.terminate(t1);
        storage.promote_due(Tick(25));
        let res = svc.handle(t0, &mut ServiceContext::new(Tick(25), &mut storage));
        assert!(matches!(res, Err(GpssError::TransactNotFound(id)) if id == t1));

        assert!(svc.history().is_empty(), "no release was recorded");
        assert_eq!(svc.state(), ServiceState::Busy(t0));
        assert_eq!(svc.queue().unwrap().peek_front(), Some(t1));
        assert!(svc.queue_statistics().unwrap().exits().is_empty());
        assert!(storage.is_live(t0));
    }

    #[test]
    fn release_without_waiters_frees_service() {
        let mut storage = Storage::new();
        let mut svc = service(5, true);
        let t0 = arrive(&mut storage, 0, 0);
        svc.handle(t0, &mut ServiceContext::new(Tick(0), &mut storage)).unwrap();
        storage.promote_due(Tick(5));

        let out = svc.handle(t0, &mut ServiceContext::new(Tick(5), &mut storage)).unwrap();
        assert_eq!(out, Handled::Released { transact: t0, next: None });
        assert_eq!(svc.state(), ServiceState::Free);
        assert!(storage.is_empty());
        assert_eq!(storage.history().len(), 1);
    }

    #[test]
    fn no_queue_means_blocked() {
        let mut storage = Storage::new();
        let mut svc = service(15, false);
        let t0 = arrive(&mut storage, 0, 10);
        svc.handle(t0, &mut ServiceContext::new(Tick(10), &mut storage)).unwrap();
        let t1 = arrive(&mut storage, 1, 12);

        let out = svc.handle(t1, &mut ServiceContext::new(Tick(12), &mut storage)).unwrap();
        assert_eq!(out, Handled::Blocked(t1));
        assert!(svc.queue_statistics().is_none());
        assert!(storage.is_current(t1));
    }

    #[test]
    fn reset_history_keeps_occupant() {
        let mut storage = Storage::new();
        let mut svc = service(1, true);
        let t0 = arrive(&mut storage, 0, 0);
        svc.handle(t0, &mut ServiceContext::new(Tick(0), &mut storage)).unwrap();
        storage.promote_due(Tick(1));
        svc.handle(t0, &mut ServiceContext::new(Tick(1), &mut storage)).unwrap();
        let t1 = arrive(&mut storage, 1, 1);
        svc.handle(t1, &mut ServiceContext::new(Tick(1), &mut storage)).unwrap();

        svc.reset_history();
        assert!(svc.history().is_empty());
        assert!(svc.is_processing(t1));
    }

    #[test]
    fn display_report() {
        let mut storage = Storage::new();
        let mut svc = service(15, true);
        let t0 = arrive(&mut storage, 0, 10);
        svc.handle(t0, &mut ServiceContext::new(Tick(10), &mut storage)).unwrap();
        let text = svc.to_string();
        assert!(text.starts_with("Service 0\nCurrent transact: 0\nHistory:\n"));
        assert!(text.contains("Transacts in queue:"));
    }
}

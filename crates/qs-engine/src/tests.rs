//! Integration tests for qs-engine.
//!
//! Items are plain `u32` tags so tests can track identity (who produced
//! what, and whether anything was delivered twice).

use std::cell::RefCell;
use std::rc::Rc;

use qs_core::{Hours, ProcessId, StorageId};

use crate::{
    Action, Engine, EngineError, EngineObserver, Process, ProcessState, RunOutcome, Wake, WaitKind,
};

// ── Helper processes ──────────────────────────────────────────────────────────

/// Produces `remaining` tagged items into `out`, pacing each by `takt`.
struct Producer {
    name:      String,
    takt:      Hours,
    out:       StorageId,
    remaining: u32,
    next_tag:  u32,
}

impl Producer {
    fn new(name: &str, takt: Hours, out: StorageId, units: u32, tag_base: u32) -> Self {
        Self {
            name: name.to_owned(),
            takt,
            out,
            remaining: units,
            next_tag: tag_base,
        }
    }
}

impl Process<u32> for Producer {
    fn name(&self) -> &str {
        &self.name
    }

    fn resume(&mut self, wake: Wake<u32>, _now: Hours) -> Action<u32> {
        match wake {
            Wake::Start | Wake::SpaceGranted => {
                if let Wake::SpaceGranted = wake {
                    self.remaining -= 1;
                }
                if self.remaining == 0 {
                    Action::Complete
                } else {
                    Action::Delay(self.takt)
                }
            }
            Wake::DelayElapsed => {
                let tag = self.next_tag;
                self.next_tag += 1;
                Action::Put(self.out, tag)
            }
            Wake::ItemGranted(_) => unreachable!("producer never issues Get"),
        }
    }
}

/// Consumes `remaining` items from `input`, recording `(tag, time)` pairs.
struct Consumer {
    name:      String,
    takt:      Hours,
    input:     StorageId,
    remaining: u32,
    received:  Rc<RefCell<Vec<(u32, f64)>>>,
}

impl Consumer {
    fn new(
        name: &str,
        takt: Hours,
        input: StorageId,
        units: u32,
        received: Rc<RefCell<Vec<(u32, f64)>>>,
    ) -> Self {
        Self {
            name: name.to_owned(),
            takt,
            input,
            remaining: units,
            received,
        }
    }
}

impl Process<u32> for Consumer {
    fn name(&self) -> &str {
        &self.name
    }

    fn resume(&mut self, wake: Wake<u32>, now: Hours) -> Action<u32> {
        match wake {
            Wake::Start | Wake::DelayElapsed => {
                if let Wake::DelayElapsed = wake {
                    self.remaining -= 1;
                }
                if self.remaining == 0 {
                    Action::Complete
                } else {
                    Action::Get(self.input)
                }
            }
            Wake::ItemGranted(tag) => {
                self.received.borrow_mut().push((tag, now.get()));
                Action::Delay(self.takt)
            }
            Wake::SpaceGranted => unreachable!("consumer never issues Put"),
        }
    }
}

fn received_log() -> Rc<RefCell<Vec<(u32, f64)>>> {
    Rc::new(RefCell::new(Vec::new()))
}

// ── Setup validation ──────────────────────────────────────────────────────────

mod setup_tests {
    use super::*;

    #[test]
    fn zero_capacity_storage_rejected() {
        let mut engine: Engine<u32> = Engine::new();
        assert_eq!(engine.add_storage(0), Err(EngineError::ZeroCapacityStorage));
        assert!(engine.add_storage(1).is_ok());
    }

    #[test]
    fn double_start_rejected() {
        let mut engine: Engine<u32> = Engine::new();
        let out = engine.add_storage(2).unwrap();
        let p = engine.register(Box::new(Producer::new("p", Hours(1.0), out, 1, 0)));
        engine.start(p).unwrap();
        assert_eq!(engine.start(p), Err(EngineError::AlreadyStarted(p)));
    }

    #[test]
    fn unknown_process_rejected() {
        let mut engine: Engine<u32> = Engine::new();
        assert_eq!(
            engine.start(ProcessId(3)),
            Err(EngineError::UnknownProcess(ProcessId(3)))
        );
    }

    #[test]
    fn invalid_delay_surfaces_as_error() {
        struct BadDelay;
        impl Process<u32> for BadDelay {
            fn name(&self) -> &str {
                "bad"
            }
            fn resume(&mut self, _wake: Wake<u32>, _now: Hours) -> Action<u32> {
                Action::Delay(Hours(-1.0))
            }
        }
        let mut engine: Engine<u32> = Engine::new();
        let p = engine.register(Box::new(BadDelay));
        engine.start(p).unwrap();
        assert!(matches!(
            engine.run_until_idle(None),
            Err(EngineError::InvalidDelay { .. })
        ));
    }
}

// ── Basic runs ────────────────────────────────────────────────────────────────

mod run_tests {
    use super::*;

    #[test]
    fn single_producer_completes() {
        let mut engine: Engine<u32> = Engine::new();
        let out = engine.add_storage(4).unwrap();
        let p = engine.register(Box::new(Producer::new("p", Hours(4.0), out, 3, 0)));
        engine.start(p).unwrap();

        let outcome = engine.run_until_idle(None).unwrap();
        assert_eq!(outcome, RunOutcome::Completed { elapsed: Hours(12.0) });
        assert_eq!(engine.process_state(p), Some(ProcessState::Completed));
        // One deposit per takt period.
        assert_eq!(
            engine.storage(out).unwrap().deposits(),
            &[Hours(4.0), Hours(8.0), Hours(12.0)]
        );
    }

    #[test]
    fn zero_unit_process_completes_without_touching_storage() {
        let mut engine: Engine<u32> = Engine::new();
        let out = engine.add_storage(1).unwrap();
        let p = engine.register(Box::new(Producer::new("p", Hours(4.0), out, 0, 0)));
        engine.start(p).unwrap();

        let outcome = engine.run_until_idle(None).unwrap();
        assert_eq!(outcome, RunOutcome::Completed { elapsed: Hours(0.0) });
        assert!(engine.storage(out).unwrap().deposits().is_empty());
    }

    #[test]
    fn empty_engine_completes_at_time_zero() {
        let mut engine: Engine<u32> = Engine::new();
        let outcome = engine.run_until_idle(None).unwrap();
        assert_eq!(outcome, RunOutcome::Completed { elapsed: Hours(0.0) });
    }

    #[test]
    fn unstarted_process_is_reported_incomplete() {
        let mut engine: Engine<u32> = Engine::new();
        let out = engine.add_storage(1).unwrap();
        let p = engine.register(Box::new(Producer::new("p", Hours(1.0), out, 1, 0)));
        let outcome = engine.run_until_idle(None).unwrap();
        // Never started → never resumed; the engine does not invent events.
        assert!(outcome.is_completed());
        assert_eq!(engine.incomplete(), vec![p]);
        assert_eq!(engine.process_state(p), Some(ProcessState::Idle));
    }
}

// ── Blocking get/put and pipeline gating ──────────────────────────────────────

mod blocking_tests {
    use super::*;

    #[test]
    fn consumer_blocks_until_first_item() {
        // Consumer starts first and parks on the empty buffer; producer's
        // first unit lands at t=5; consumer finishes it 6 h later.
        let received = received_log();
        let mut engine: Engine<u32> = Engine::new();
        let buf = engine.add_storage(2).unwrap();
        let sink = engine.add_storage(2).unwrap();

        let c = engine.register(Box::new(Consumer::new("c", Hours(6.0), buf, 1, received.clone())));
        let p = engine.register(Box::new(Producer::new("p", Hours(5.0), buf, 1, 0)));
        engine.start(c).unwrap();
        engine.start(p).unwrap();

        let outcome = engine.run_until_idle(None).unwrap();
        assert_eq!(outcome, RunOutcome::Completed { elapsed: Hours(11.0) });
        assert_eq!(received.borrow().as_slice(), &[(0, 5.0)]);
        assert!(engine.storage(sink).unwrap().deposits().is_empty());
    }

    #[test]
    fn producer_blocks_while_buffer_full() {
        // Capacity 1, producer takt 1 h, consumer takt 10 h: after the first
        // unit the producer is paced entirely by the consumer's withdrawals.
        let received = received_log();
        let mut engine: Engine<u32> = Engine::new();
        let buf = engine.add_storage(1).unwrap();

        let p = engine.register(Box::new(Producer::new("p", Hours(1.0), buf, 3, 0)));
        let c = engine.register(Box::new(Consumer::new("c", Hours(10.0), buf, 3, received.clone())));
        engine.start(p).unwrap();
        engine.start(c).unwrap();

        let outcome = engine.run_until_idle(None).unwrap();
        // Item 0 ready t=1, taken t=1; item 1 ready t=2, taken t=11;
        // item 2 blocked until t=21; consumer finishes at t=31.
        assert_eq!(received.borrow().as_slice(), &[(0, 1.0), (1, 11.0), (2, 21.0)]);
        assert_eq!(outcome, RunOutcome::Completed { elapsed: Hours(31.0) });
    }

    #[test]
    fn no_double_delivery_across_consumers() {
        let r1 = received_log();
        let r2 = received_log();
        let mut engine: Engine<u32> = Engine::new();
        let buf = engine.add_storage(2).unwrap();

        let p = engine.register(Box::new(Producer::new("p", Hours(1.0), buf, 8, 0)));
        let c1 = engine.register(Box::new(Consumer::new("c1", Hours(3.0), buf, 4, r1.clone())));
        let c2 = engine.register(Box::new(Consumer::new("c2", Hours(3.0), buf, 4, r2.clone())));
        for id in [p, c1, c2] {
            engine.start(id).unwrap();
        }
        assert!(engine.run_until_idle(None).unwrap().is_completed());

        let mut all: Vec<u32> = r1.borrow().iter().chain(r2.borrow().iter()).map(|&(t, _)| t).collect();
        all.sort_unstable();
        // Every produced tag delivered exactly once.
        assert_eq!(all, (0..8).collect::<Vec<u32>>());
    }

    #[test]
    fn fifo_fairness_between_contending_producers() {
        // Capacity 1; producers A and B both become ready to put at t=2 (A
        // scheduled first).  A's put lands, B parks; every withdrawal then
        // admits the earliest parked putter, so tags alternate A, B, A, B.
        let received = received_log();
        let mut engine: Engine<u32> = Engine::new();
        let buf = engine.add_storage(1).unwrap();

        let a = engine.register(Box::new(Producer::new("a", Hours(2.0), buf, 2, 100)));
        let b = engine.register(Box::new(Producer::new("b", Hours(2.0), buf, 2, 200)));
        let c = engine.register(Box::new(Consumer::new("c", Hours(1.0), buf, 4, received.clone())));
        for id in [a, b, c] {
            engine.start(id).unwrap();
        }
        assert!(engine.run_until_idle(None).unwrap().is_completed());

        let tags: Vec<u32> = received.borrow().iter().map(|&(t, _)| t).collect();
        assert_eq!(tags, vec![100, 200, 101, 201]);
    }
}

// ── Capacity invariant ────────────────────────────────────────────────────────

mod capacity_tests {
    use super::*;

    /// Tracks net occupancy of one storage from deposit/withdraw callbacks
    /// and records the maximum ever observed.
    struct OccupancyWatch {
        storage:   StorageId,
        occupancy: i64,
        max_seen:  i64,
    }

    impl EngineObserver for OccupancyWatch {
        fn on_deposit(&mut self, storage: StorageId, _now: Hours) {
            if storage == self.storage {
                self.occupancy += 1;
                self.max_seen = self.max_seen.max(self.occupancy);
            }
        }
        fn on_withdraw(&mut self, storage: StorageId, _now: Hours) {
            if storage == self.storage {
                self.occupancy -= 1;
                assert!(self.occupancy >= 0, "withdraw from empty storage");
            }
        }
    }

    #[test]
    fn occupancy_never_exceeds_capacity() {
        let received = received_log();
        let mut engine: Engine<u32> = Engine::new();
        let buf = engine.add_storage(2).unwrap();

        // Two fast producers against one slow consumer: heavy contention.
        let a = engine.register(Box::new(Producer::new("a", Hours(1.0), buf, 5, 0)));
        let b = engine.register(Box::new(Producer::new("b", Hours(1.0), buf, 5, 100)));
        let c = engine.register(Box::new(Consumer::new("c", Hours(7.0), buf, 10, received)));
        for id in [a, b, c] {
            engine.start(id).unwrap();
        }

        let mut watch = OccupancyWatch { storage: buf, occupancy: 0, max_seen: 0 };
        assert!(engine.run_observed(None, &mut watch).unwrap().is_completed());
        assert!(
            watch.max_seen <= 2,
            "storage occupancy {} exceeded capacity 2",
            watch.max_seen
        );
        // Conservation: every produced unit was deposited exactly once.
        assert_eq!(engine.storage(buf).unwrap().deposits().len(), 10);
    }
}

// ── Determinism ───────────────────────────────────────────────────────────────

mod determinism_tests {
    use super::*;

    fn run_once() -> (Vec<Hours>, Vec<(u32, f64)>) {
        let received = received_log();
        let mut engine: Engine<u32> = Engine::new();
        let buf = engine.add_storage(2).unwrap();

        let a = engine.register(Box::new(Producer::new("a", Hours(4.0), buf, 3, 0)));
        let b = engine.register(Box::new(Producer::new("b", Hours(4.0), buf, 3, 100)));
        let c = engine.register(Box::new(Consumer::new("c", Hours(2.5), buf, 6, received.clone())));
        for id in [a, b, c] {
            engine.start(id).unwrap();
        }
        engine.run_until_idle(None).unwrap();

        let deposits = engine.storage(buf).unwrap().deposits().to_vec();
        let log = received.borrow().clone();
        (deposits, log)
    }

    #[test]
    fn identical_runs_produce_identical_timestamps() {
        let (d1, r1) = run_once();
        let (d2, r2) = run_once();
        assert_eq!(d1, d2);
        assert_eq!(r1, r2);
    }

    #[test]
    fn same_time_events_run_in_schedule_order() {
        // Two zero-takt producers: every event lands at t=0, so ordering is
        // decided purely by sequence numbers.  Units must alternate in the
        // order the producers yield, and the run must terminate (each
        // zero-delay still consumes a scheduling tick — no busy loop).
        let mut engine: Engine<u32> = Engine::new();
        let buf = engine.add_storage(6).unwrap();

        let a = engine.register(Box::new(Producer::new("a", Hours::ZERO, buf, 3, 0)));
        let b = engine.register(Box::new(Producer::new("b", Hours::ZERO, buf, 3, 100)));
        engine.start(a).unwrap();
        engine.start(b).unwrap();

        let outcome = engine.run_until_idle(None).unwrap();
        assert_eq!(outcome, RunOutcome::Completed { elapsed: Hours(0.0) });

        let tags: Vec<u32> = engine.storage(buf).unwrap().items.iter().copied().collect();
        assert_eq!(tags, vec![0, 100, 1, 101, 2, 102]);
    }
}

// ── Deadlock detection ────────────────────────────────────────────────────────

mod deadlock_tests {
    use super::*;

    #[test]
    fn producer_with_no_consumer_deadlocks() {
        // Capacity 1, two units, nobody ever gets: the first unit fills the
        // buffer and the second put can never be granted.
        let mut engine: Engine<u32> = Engine::new();
        let buf = engine.add_storage(1).unwrap();
        let p = engine.register(Box::new(Producer::new("p", Hours(4.0), buf, 2, 0)));
        engine.start(p).unwrap();

        match engine.run_until_idle(None).unwrap() {
            RunOutcome::Deadlock { elapsed, stalled } => {
                // First unit at t=4, second produced at t=8 then blocks.
                assert_eq!(elapsed, Hours(8.0));
                assert_eq!(stalled.len(), 1);
                assert_eq!(stalled[0].process, p);
                assert_eq!(stalled[0].name, "p");
                assert_eq!(stalled[0].storage, buf);
                assert_eq!(stalled[0].waiting_for, WaitKind::Space);
            }
            other => panic!("expected deadlock, got {other:?}"),
        }
        assert_eq!(engine.process_state(p), Some(ProcessState::WaitingForSpace));
    }

    #[test]
    fn consumer_with_no_producer_deadlocks() {
        let received = received_log();
        let mut engine: Engine<u32> = Engine::new();
        let buf = engine.add_storage(1).unwrap();
        let c = engine.register(Box::new(Consumer::new("c", Hours(1.0), buf, 1, received)));
        engine.start(c).unwrap();

        match engine.run_until_idle(None).unwrap() {
            RunOutcome::Deadlock { elapsed, stalled } => {
                assert_eq!(elapsed, Hours(0.0));
                assert_eq!(stalled[0].waiting_for, WaitKind::Input);
                assert_eq!(stalled[0].storage, buf);
            }
            other => panic!("expected deadlock, got {other:?}"),
        }
    }
}

// ── Horizon ───────────────────────────────────────────────────────────────────

mod horizon_tests {
    use super::*;

    #[test]
    fn horizon_reports_partial_result() {
        let mut engine: Engine<u32> = Engine::new();
        let buf = engine.add_storage(8).unwrap();
        let p = engine.register(Box::new(Producer::new("p", Hours(10.0), buf, 4, 0)));
        engine.start(p).unwrap();

        match engine.run_until_idle(Some(Hours(25.0))).unwrap() {
            RunOutcome::HorizonReached { horizon, incomplete } => {
                assert_eq!(horizon, Hours(25.0));
                assert_eq!(incomplete, vec![p]);
            }
            other => panic!("expected horizon stop, got {other:?}"),
        }
        // Two units landed before the ceiling; the third event (t=30) was
        // left pending, not discarded.
        assert_eq!(engine.storage(buf).unwrap().deposits(), &[Hours(10.0), Hours(20.0)]);
        assert_eq!(engine.pending_events(), 1);
        assert_eq!(engine.now(), Hours(25.0));
    }

    #[test]
    fn events_exactly_at_horizon_still_run() {
        let mut engine: Engine<u32> = Engine::new();
        let buf = engine.add_storage(8).unwrap();
        let p = engine.register(Box::new(Producer::new("p", Hours(10.0), buf, 2, 0)));
        engine.start(p).unwrap();

        let outcome = engine.run_until_idle(Some(Hours(20.0))).unwrap();
        // Both units finish at t=10 and t=20; the run completes at the ceiling.
        assert_eq!(outcome, RunOutcome::Completed { elapsed: Hours(20.0) });
    }
}

// ── Observer callbacks ────────────────────────────────────────────────────────

mod observer_tests {
    use super::*;

    #[derive(Default)]
    struct Counting {
        events:    usize,
        deposits:  usize,
        withdraws: usize,
        completed: usize,
        run_ends:  usize,
    }

    impl EngineObserver for Counting {
        fn on_event(&mut self, _now: Hours, _target: ProcessId) {
            self.events += 1;
        }
        fn on_deposit(&mut self, _storage: StorageId, _now: Hours) {
            self.deposits += 1;
        }
        fn on_withdraw(&mut self, _storage: StorageId, _now: Hours) {
            self.withdraws += 1;
        }
        fn on_process_completed(&mut self, _process: ProcessId, _now: Hours) {
            self.completed += 1;
        }
        fn on_run_end(&mut self, _now: Hours) {
            self.run_ends += 1;
        }
    }

    #[test]
    fn callbacks_fire_for_full_pipeline() {
        let received = received_log();
        let mut engine: Engine<u32> = Engine::new();
        let buf = engine.add_storage(2).unwrap();
        let p = engine.register(Box::new(Producer::new("p", Hours(1.0), buf, 3, 0)));
        let c = engine.register(Box::new(Consumer::new("c", Hours(1.0), buf, 3, received)));
        engine.start(p).unwrap();
        engine.start(c).unwrap();

        let mut obs = Counting::default();
        assert!(engine.run_observed(None, &mut obs).unwrap().is_completed());
        assert_eq!(obs.deposits, 3);
        assert_eq!(obs.withdraws, 3);
        assert_eq!(obs.completed, 2);
        assert_eq!(obs.run_ends, 1);
        assert!(obs.events > 0);
    }
}

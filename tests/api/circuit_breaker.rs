use rand::Rng;
use sentinel_breaker::{
    base::{BlockType, CallError},
    circuitbreaker::{CircuitBreaker, Settings, State, TripStrategy},
    utils::ManualClock,
};
use std::io;
use std::sync::{
    atomic::{AtomicU32, Ordering},
    Arc, Barrier,
};
use std::thread;
use std::time::Duration;

fn demo_settings(name: &str) -> Settings {
    Settings::new(name)
        .with_max_requests(3)
        .with_interval(Duration::from_secs(10))
        .with_timeout(Duration::from_secs(5))
        .with_trip_strategy(TripStrategy::Any(vec![
            TripStrategy::ConsecutiveFailures { threshold: 5 },
            TripStrategy::FailureRatio {
                min_requests: 10,
                threshold: 0.5,
            },
        ]))
}

fn flaky(fail: bool) -> Result<&'static str, io::Error> {
    if fail {
        Err(io::Error::new(io::ErrorKind::Other, "service unavailable"))
    } else {
        Ok("ok")
    }
}

#[test]
fn consecutive_failures_scenario() {
    let clock = Arc::new(ManualClock::new(0));
    let transitions = Arc::new(std::sync::Mutex::new(Vec::new()));
    let sink = Arc::clone(&transitions);
    let breaker = CircuitBreaker::with_clock(
        demo_settings("scenario").with_state_change_listener(Arc::new(
            move |_: &str, from: State, to: State| sink.lock().unwrap().push((from, to)),
        )),
        clock.clone(),
    );

    let invoked = AtomicU32::new(0);
    let mut outcomes = Vec::new();
    for _ in 0..7 {
        let res = breaker.execute(|| {
            invoked.fetch_add(1, Ordering::SeqCst);
            flaky(true)
        });
        outcomes.push(res);
        clock.advance(Duration::from_millis(100));
    }
    assert_eq!(invoked.load(Ordering::SeqCst), 5);
    for res in &outcomes[..5] {
        assert!(matches!(res, Err(CallError::Inner(_))));
    }
    for res in &outcomes[5..] {
        let err = res.as_ref().unwrap_err();
        assert_eq!(err.block_err().unwrap().block_type(), BlockType::BreakerOpen);
        assert_eq!(err.to_string(), "[scenario] circuit breaker is open");
    }
    assert_eq!(breaker.current_state(), State::Open);

    clock.advance(Duration::from_secs(6));
    for i in 0..5 {
        assert_eq!(breaker.execute(|| flaky(false)).unwrap(), "ok", "call {}", i);
    }
    assert_eq!(breaker.current_state(), State::Closed);
    assert_eq!(breaker.counts().requests, 2);
    assert_eq!(
        *transitions.lock().unwrap(),
        vec![
            (State::Closed, State::Open),
            (State::Open, State::HalfOpen),
            (State::HalfOpen, State::Closed),
        ]
    );
}

#[test]
fn failure_ratio_trips_without_consecutive_failures() {
    let breaker = CircuitBreaker::with_clock(
        demo_settings("ratio"),
        Arc::new(ManualClock::new(0)),
    );
    for i in 0..9 {
        let _ = breaker.execute(|| flaky(i % 2 == 0));
        assert_eq!(breaker.current_state(), State::Closed);
    }
    // 10th request, 5 of 10 failed
    let _ = breaker.execute(|| flaky(false));
    assert_eq!(breaker.current_state(), State::Closed);
    let _ = breaker.execute(|| flaky(true));
    assert_eq!(breaker.current_state(), State::Open);
}

#[test]
fn concurrent_counts_stay_consistent() {
    let breaker = Arc::new(CircuitBreaker::new(
        Settings::new("concurrent").with_ready_to_trip(|_| false),
    ));
    let mut handlers = Vec::new();
    for _ in 0..8 {
        let breaker = Arc::clone(&breaker);
        handlers.push(thread::spawn(move || {
            let mut rng = rand::thread_rng();
            for _ in 0..1_000 {
                let fail = rng.gen_bool(0.3);
                let _ = breaker.execute(|| flaky(fail));
            }
        }));
    }
    for h in handlers {
        h.join().expect("Couldn't join on the associated thread");
    }
    let counts = breaker.counts();
    assert_eq!(counts.requests, 8_000);
    assert_eq!(counts.total_successes + counts.total_failures, counts.requests);
    assert_eq!(breaker.current_state(), State::Closed);
}

#[test]
fn concurrent_probes_are_capped() {
    let clock = Arc::new(ManualClock::new(0));
    let breaker = Arc::new(CircuitBreaker::with_clock(
        demo_settings("probes"),
        clock.clone(),
    ));
    for _ in 0..5 {
        let _ = breaker.execute(|| flaky(true));
    }
    assert_eq!(breaker.current_state(), State::Open);
    clock.advance(Duration::from_secs(5));

    let threads = 16;
    let admitted = Arc::new(AtomicU32::new(0));
    let rejected = Arc::new(AtomicU32::new(0));
    let arrived = Arc::new(Barrier::new(threads));
    let hold = Arc::new(Barrier::new(threads));
    let mut handlers = Vec::new();
    for _ in 0..threads {
        let (breaker, admitted, rejected) =
            (Arc::clone(&breaker), Arc::clone(&admitted), Arc::clone(&rejected));
        let (arrived, hold) = (Arc::clone(&arrived), Arc::clone(&hold));
        handlers.push(thread::spawn(move || {
            arrived.wait();
            let permit = breaker.acquire();
            // every thread decides before any probe reports
            hold.wait();
            match permit {
                Ok(permit) => {
                    admitted.fetch_add(1, Ordering::SeqCst);
                    permit.record(true);
                }
                Err(err) => {
                    assert_eq!(err.block_type(), BlockType::TooManyRequests);
                    rejected.fetch_add(1, Ordering::SeqCst);
                }
            }
        }));
    }
    for h in handlers {
        h.join().expect("Couldn't join on the associated thread");
    }
    assert_eq!(admitted.load(Ordering::SeqCst), 3);
    assert_eq!(rejected.load(Ordering::SeqCst), 13);
    assert_eq!(breaker.current_state(), State::Closed);
}

#[test]
fn slow_call_from_old_generation_is_ignored() {
    let clock = Arc::new(ManualClock::new(0));
    let breaker = CircuitBreaker::with_clock(demo_settings("stale"), clock.clone());
    let slow = breaker.acquire().unwrap();
    for _ in 0..5 {
        let _ = breaker.execute(|| flaky(true));
    }
    assert_eq!(breaker.current_state(), State::Open);
    clock.advance(Duration::from_secs(5));
    let probe = breaker.acquire().unwrap();
    assert_eq!(breaker.current_state(), State::HalfOpen);

    // the call admitted while Closed finally fails, the half-open breaker doesn't care
    slow.record(false);
    assert_eq!(breaker.current_state(), State::HalfOpen);
    assert_eq!(breaker.counts().total_failures, 0);
    probe.record(true);
    assert_eq!(breaker.counts().consecutive_successes, 1);
}

#[test]
fn protect_a_call_usage() {
    fn call_external_api() -> Result<String, io::Error> {
        Ok("pong".into())
    }

    let breaker = CircuitBreaker::new(
        Settings::new("external-api")
            .with_max_requests(3)
            .with_interval(Duration::from_secs(10))
            .with_timeout(Duration::from_secs(5))
            .with_trip_strategy(TripStrategy::ConsecutiveFailures { threshold: 5 }),
    );
    let outcome = match breaker.execute(call_external_api) {
        Ok(body) => format!("passed: {}", body),
        Err(err) if err.is_blocked() => format!("rejected: {}", err),
        Err(err) => format!("failed: {}", err),
    };
    assert_eq!(outcome, "passed: pong");
}

#[macro_use]
extern crate criterion;
use criterion::Criterion;

mod breaker {
    use super::*;
    use sentinel_breaker::circuitbreaker::{CircuitBreaker, Settings, TripStrategy};
    use std::io;
    use std::time::Duration;

    pub fn bench_closed(c: &mut Criterion) {
        let breaker = CircuitBreaker::new(
            Settings::new("bench-closed").with_interval(Duration::from_secs(10)),
        );
        c.bench_function("allow and record, closed", |b| {
            b.iter(|| {
                let g = breaker.allow().unwrap();
                breaker.record_result(g, true);
            })
        });
        c.bench_function("execute, closed", |b| {
            b.iter(|| breaker.execute(|| Ok::<_, io::Error>(1)))
        });
    }

    pub fn bench_open(c: &mut Criterion) {
        let breaker = CircuitBreaker::new(
            Settings::new("bench-open")
                .with_timeout(Duration::from_secs(3_600))
                .with_trip_strategy(TripStrategy::ConsecutiveFailures { threshold: 1 }),
        );
        let g = breaker.allow().unwrap();
        breaker.record_result(g, false);
        c.bench_function("allow, open", |b| b.iter(|| breaker.allow().is_err()));
    }
}

criterion_group!(benches, breaker::bench_closed, breaker::bench_open);
criterion_main!(benches);

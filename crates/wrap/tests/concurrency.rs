//! Several caller threads hammering one interposer.

use std::sync::{Arc, Barrier};
use std::thread;

use test_support::{MockFactory, capturing_interposer};
use wrap::{AliasCapacity, WrapConfig};

#[test]
fn test_threads_with_disjoint_descriptors() {
    const THREADS: i32 = 4;
    const ROUNDS: i32 = 200;

    let factory = MockFactory::new();
    let (wrap, _) = capturing_interposer(
        WrapConfig::default().with_alias_capacity(AliasCapacity::Unbounded),
    );
    wrap.register([factory.binding("/dev/x")]);
    let wrap = Arc::new(wrap);
    let barrier = Arc::new(Barrier::new(THREADS as usize));

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let wrap = wrap.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                let base = 1000 * (t + 1);
                for round in 0..ROUNDS {
                    let fd = base + round * 3;
                    wrap.intercept_open("/dev/x", fd).unwrap();
                    wrap.intercept_dup(fd, fd + 1);
                    wrap.intercept_dup(fd + 1, fd + 2);
                    wrap.intercept_close(fd + 1);
                    wrap.intercept_close(fd);
                    wrap.intercept_close(fd + 2);
                }
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }

    let total = (THREADS * ROUNDS) as usize;
    assert_eq!(factory.opened(), total);
    assert_eq!(factory.released(), total);
    assert_eq!(wrap.open_count(), 0);
}

#[test]
fn test_concurrent_closes_release_once() {
    const ALIASES: i32 = 32;

    let factory = MockFactory::new();
    let (wrap, _) = capturing_interposer(
        WrapConfig::default().with_alias_capacity(AliasCapacity::Unbounded),
    );
    wrap.register([factory.binding("/dev/x")]);
    wrap.intercept_open("/dev/x", 100).unwrap();
    for fd in 101..=100 + ALIASES {
        wrap.intercept_dup(100, fd);
    }

    let wrap = Arc::new(wrap);
    let handles: Vec<_> = (100..=100 + ALIASES)
        .map(|fd| {
            let wrap = wrap.clone();
            thread::spawn(move || wrap.intercept_close(fd))
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(factory.released(), 1);
    assert_eq!(wrap.open_count(), 0);
}

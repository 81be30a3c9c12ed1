//! spec.md §8 scenario 6: concurrent commit/read/release under load.

use std::sync::Arc;
use std::thread;

use mempool_core::{Pool, PoolConfig, RandomHandleSource};

#[test]
fn ten_threads_commit_read_release_1000_times() {
    let config = PoolConfig::new(64).unwrap();
    let pool = Arc::new(Pool::new(config, RandomHandleSource::new()).unwrap());

    let mut workers = Vec::new();
    for _ in 0..10 {
        let pool = Arc::clone(&pool);
        workers.push(thread::spawn(move || {
            for _ in 0..1000 {
                let handle = pool.commit(b"AAAA").expect("pool sized for one payload per thread");
                let payload = pool.read(handle).expect("handle just committed must be live");
                assert_eq!(payload, b"AAAA");
                pool.release(handle).expect("handle just read must still be live");
            }
        }));
    }
    for worker in workers {
        worker.join().expect("worker thread panicked");
    }

    assert_eq!(pool.available_space(), 64);
    let stats = pool.stats();
    assert_eq!(stats.commits, 10_000);
    assert_eq!(stats.releases, 10_000);
    assert_eq!(stats.failed_commits, 0);
}

//! First access to a category from several threads at once
//!
//! Kept alone in its own test binary so that nothing touches the cache before the threads
//! are released.

use std::sync::Barrier;

use aiven_userconfig::{representation, SchemaCategory};

const THREADS: usize = 16;

#[test]
fn concurrent_first_access_yields_one_instance() {
    let barrier = Barrier::new(THREADS);

    let addresses: Vec<usize> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                scope.spawn(|| {
                    barrier.wait();
                    representation(SchemaCategory::IntegrationEndpoint) as *const _ as usize
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(addresses.len(), THREADS);
    assert!(addresses.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(
        addresses[0],
        representation(SchemaCategory::IntegrationEndpoint) as *const _ as usize
    );
}

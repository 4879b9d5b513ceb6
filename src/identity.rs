use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

/// Allocates the per-(test case, app) user ids written into the test matrix.
///
/// Kept behind a trait so tests can substitute deterministic ids instead of
/// asserting on random output.
pub trait IdentityGenerator: Send + Sync {
    fn next_user_id(&self) -> String;
}

/// Production generator: `user_` followed by six random alphanumerics.
pub struct RandomIdentityGenerator;

impl IdentityGenerator for RandomIdentityGenerator {
    fn next_user_id(&self) -> String {
        let raw = Uuid::new_v4().simple().to_string();
        format!("user_{}", &raw[..6])
    }
}

/// Deterministic generator used by tests: `user_000001`, `user_000002`, ...
pub struct SequenceIdentityGenerator {
    counter: AtomicU64,
}

impl SequenceIdentityGenerator {
    pub fn new() -> Self {
        SequenceIdentityGenerator {
            counter: AtomicU64::new(0),
        }
    }
}

impl IdentityGenerator for SequenceIdentityGenerator {
    fn next_user_id(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("user_{:06}", n)
    }
}

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static SUBSCRIPTION_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Token identifying one handler registration.
///
/// Ids are unique for the life of the process, so an id issued by one
/// channel never matches a registration on another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    pub(crate) fn next() -> Self {
        Self(SUBSCRIPTION_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "subscription-{}", self.0)
    }
}

//! Request tracking for monitoring outstanding API requests.

use super::{EntityKind, NoProgress, Progress};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RequestCounts {
    pub issued: u64,
    pub completed: u64,
}

/// Tracks issued and completed requests per entity kind and reports them as progress.
///
/// Clones share the same counters, so a tracker handed to a fetcher keeps reporting
/// into the progress sink of whoever created it.
#[derive(Debug, Clone)]
pub struct RequestTracker {
    counters: Arc<Mutex<BTreeMap<EntityKind, RequestCounts>>>,
    progress: Arc<dyn Progress>,
}

impl RequestTracker {
    #[must_use]
    pub fn new(progress: Arc<dyn Progress>) -> Self {
        Self {
            counters: Arc::new(Mutex::new(BTreeMap::new())),
            progress,
        }
    }

    /// A tracker that counts but reports nowhere.
    #[must_use]
    pub fn detached() -> Self {
        Self::new(Arc::new(NoProgress))
    }

    /// Mark that a request for `kind` has been issued.
    pub fn add_request(&self, kind: EntityKind) {
        self.update(kind, |counts| counts.issued += 1);
    }

    /// Mark that a request for `kind` has completed, whatever its outcome.
    pub fn complete_request(&self, kind: EntityKind) {
        self.update(kind, |counts| counts.completed += 1);
    }

    /// Counts for a single kind.
    #[must_use]
    pub fn counts(&self, kind: EntityKind) -> RequestCounts {
        self.counters
            .lock()
            .expect("lock poisoned")
            .get(&kind)
            .copied()
            .unwrap_or_default()
    }

    /// Total number of requests issued across all kinds.
    #[must_use]
    pub fn total_issued(&self) -> u64 {
        self.counters.lock().expect("lock poisoned").values().map(|c| c.issued).sum()
    }

    fn update(&self, kind: EntityKind, apply: impl FnOnce(&mut RequestCounts)) {
        let (len, position, message) = {
            let mut counters = self.counters.lock().expect("lock poisoned");
            apply(counters.entry(kind).or_default());
            summarize(&counters)
        };

        self.progress.set_determinate(len, position, &message);
    }
}

/// Format as "X/Y kind1, X/Y kind2, ..." in entity order.
fn summarize(counters: &BTreeMap<EntityKind, RequestCounts>) -> (u64, u64, String) {
    let mut issued = 0;
    let mut completed = 0;
    let mut parts = Vec::with_capacity(counters.len());

    for (kind, counts) in counters.iter().filter(|(_, c)| c.issued > 0) {
        issued += counts.issued;
        completed += counts.completed;
        parts.push(format!("{}/{} {kind}", counts.completed, counts.issued));
    }

    (issued, completed, parts.join(", "))
}

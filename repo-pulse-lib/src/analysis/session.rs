use super::{AnalysisResult, LOG_TARGET, analyze_repository};
use crate::facts::{EntityFetcher, FetchError, RepoTarget, RunOutcome};
use chrono::TimeZone;
use futures::future::{AbortHandle, Abortable};
use std::sync::{Arc, Mutex, MutexGuard};

/// How a run started through a session ended.
#[derive(Debug, Clone)]
pub enum SessionOutcome {
    Completed(Arc<AnalysisResult>),
    Fatal(FetchError),

    /// A newer run started, or the session was cancelled, before this one finished.
    /// Its result was discarded.
    Superseded,
}

#[derive(Debug, Default)]
struct SessionState {
    generation: u64,
    in_flight: Option<AbortHandle>,
    latest: Option<Arc<AnalysisResult>>,
}

/// Runs analyses one target at a time, newest target wins.
///
/// Starting an analysis aborts the run still in flight and clears the published result.
/// Only the current run may publish; anything an older run produces is dropped.
#[derive(Debug)]
pub struct AnalysisSession {
    fetcher: EntityFetcher,
    state: Mutex<SessionState>,
}

impl AnalysisSession {
    #[must_use]
    pub fn new(fetcher: EntityFetcher) -> Self {
        Self {
            fetcher,
            state: Mutex::new(SessionState::default()),
        }
    }

    pub async fn analyze<Tz: TimeZone>(&self, target: &RepoTarget, tz: &Tz) -> SessionOutcome {
        let (handle, registration) = AbortHandle::new_pair();
        let generation = {
            let mut state = self.lock();
            if let Some(previous) = state.in_flight.replace(handle) {
                log::debug!(target: LOG_TARGET, "Aborting run {} in favor of '{target}'", state.generation);
                previous.abort();
            }
            state.generation += 1;
            state.latest = None;
            state.generation
        };

        let result = Abortable::new(analyze_repository(&self.fetcher, target, tz), registration).await;

        let mut state = self.lock();
        if state.generation != generation {
            log::debug!(target: LOG_TARGET, "Discarding the result of superseded run {generation}");
            return SessionOutcome::Superseded;
        }
        state.in_flight = None;

        match result {
            Err(_aborted) => SessionOutcome::Superseded,
            Ok(RunOutcome::Fatal(e)) => SessionOutcome::Fatal(e),
            Ok(RunOutcome::Completed(result)) => {
                let result = Arc::new(result);
                state.latest = Some(Arc::clone(&result));
                SessionOutcome::Completed(result)
            }
        }
    }

    /// The result of the newest completed run, if the current run completed.
    #[must_use]
    pub fn latest(&self) -> Option<Arc<AnalysisResult>> {
        self.lock().latest.clone()
    }

    /// Abort the run in flight, if any. Returns true if a run was aborted.
    pub fn cancel(&self) -> bool {
        let mut state = self.lock();
        state.generation += 1;
        state.in_flight.take().is_some_and(|handle| {
            handle.abort();
            true
        })
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().expect("lock poisoned")
    }
}

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Mutex, MutexGuard};
use tokio::task::AbortHandle;

use crate::error::FlightError;

/// In-flight lookups keyed by client session.
///
/// Starting a lookup for a session aborts whatever that session still has
/// pending, so a slow earlier answer can never overwrite a newer one.
#[derive(Default)]
pub struct LookupSessions {
    inflight: Mutex<Registry>,
}

#[derive(Default)]
struct Registry {
    entries: HashMap<String, (u64, AbortHandle)>,
    next_ticket: u64,
}

impl Registry {
    /// Record `ticket` as the session's current lookup.
    ///
    /// Returns false, leaving the entry untouched, when the session already
    /// holds a newer ticket. Otherwise any older lookup is aborted.
    fn register(&mut self, session: &str, ticket: u64, abort: AbortHandle) -> bool {
        match self.entries.get(session) {
            Some((current, _)) if *current > ticket => false,
            _ => {
                if let Some((previous, old)) =
                    self.entries.insert(session.to_string(), (ticket, abort))
                {
                    tracing::debug!(
                        "Session {} superseded lookup #{} with #{}",
                        session,
                        previous,
                        ticket
                    );
                    old.abort();
                }
                true
            }
        }
    }

    /// Drop the session's entry if `ticket` still owns it
    fn release(&mut self, session: &str, ticket: u64) -> Option<AbortHandle> {
        match self.entries.get(session) {
            Some((current, _)) if *current == ticket => {
                self.entries.remove(session).map(|(_, abort)| abort)
            }
            _ => None,
        }
    }
}

/// Releases a session entry however `run` ends, including when its
/// caller stops polling it.
struct SessionEntry<'a> {
    sessions: &'a LookupSessions,
    session: String,
    ticket: u64,
    finished: bool,
}

impl Drop for SessionEntry<'_> {
    fn drop(&mut self) {
        let released = self.sessions.registry().release(&self.session, self.ticket);
        if let Some(abort) = released {
            if !self.finished {
                tracing::debug!(
                    "Caller for session {} went away, aborting lookup #{}",
                    self.session,
                    self.ticket
                );
                abort.abort();
            }
        }
    }
}

impl LookupSessions {
    pub fn new() -> Self {
        Self::default()
    }

    fn registry(&self) -> MutexGuard<'_, Registry> {
        self.inflight.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Run `lookup` as the session's current task.
    ///
    /// Returns `Superseded` if a newer lookup for the same session aborts it.
    /// Dropping the returned future aborts the lookup and frees the session.
    pub async fn run<F, T>(&self, session: &str, lookup: F) -> Result<T, FlightError>
    where
        F: Future<Output = Result<T, FlightError>> + Send + 'static,
        T: Send + 'static,
    {
        let handle = tokio::spawn(lookup);

        let ticket = {
            let mut registry = self.registry();
            let ticket = registry.next_ticket;
            registry.next_ticket += 1;
            if !registry.register(session, ticket, handle.abort_handle()) {
                handle.abort();
                return Err(FlightError::Superseded);
            }
            ticket
        };

        let mut entry = SessionEntry {
            sessions: self,
            session: session.to_string(),
            ticket,
            finished: false,
        };

        let outcome = handle.await;
        entry.finished = true;
        drop(entry);

        match outcome {
            Ok(result) => result,
            Err(e) if e.is_cancelled() => Err(FlightError::Superseded),
            Err(e) => {
                tracing::error!("Lookup task for session {} failed: {}", session, e);
                Err(FlightError::Internal(e.to_string()))
            }
        }
    }

    /// Number of sessions with a lookup still pending
    pub fn pending(&self) -> usize {
        self.registry().entries.len()
    }
}

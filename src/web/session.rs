// ============================================================
// Layer 1 — Session Store
// ============================================================
// One FormState per browser session, keyed by the uuid carried in
// the `attrition_session` cookie. Sessions never see each other's
// state; the mutex only guards the map itself.
//
// A session is only opened when a request writes form state, so
// plain page views never add entries. Sessions idle for longer
// than the TTL are swept when a new one is opened, and at capacity
// the least recently seen session is evicted.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use uuid::Uuid;

use crate::domain::form::FormState;

pub const SESSION_COOKIE: &str = "attrition_session";
pub const SESSION_TTL: Duration = Duration::from_secs(60 * 60);
pub const MAX_SESSIONS: usize = 10_000;

struct Entry {
    form:      FormState,
    last_seen: Instant,
}

impl Entry {
    fn new(now: Instant) -> Self {
        Self { form: FormState::new(), last_seen: now }
    }
}

pub struct SessionStore {
    sessions: Mutex<HashMap<Uuid, Entry>>,
    ttl:      Duration,
    capacity: usize,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_limits(SESSION_TTL, MAX_SESSIONS)
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(ttl: Duration, capacity: usize) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            ttl,
            capacity: capacity.max(1),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, Entry>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The live session named by a cookie value, if there is one.
    pub fn lookup(&self, cookie: Option<&str>) -> Option<Uuid> {
        let id  = cookie.and_then(|c| Uuid::parse_str(c).ok())?;
        let now = Instant::now();
        let mut sessions = self.lock();

        let expired = {
            let entry = sessions.get_mut(&id)?;
            if now.duration_since(entry.last_seen) >= self.ttl {
                true
            } else {
                entry.last_seen = now;
                false
            }
        };
        if expired {
            sessions.remove(&id);
            tracing::debug!("Session {} expired", id);
            return None;
        }
        Some(id)
    }

    /// Open a new, empty session.
    pub fn open(&self) -> Uuid {
        let id = Uuid::new_v4();
        self.admit(&mut self.lock(), id);
        tracing::debug!("Opened session {}", id);
        id
    }

    /// Sweep idle sessions, make room, then insert `id`.
    fn admit(&self, sessions: &mut HashMap<Uuid, Entry>, id: Uuid) {
        let now = Instant::now();
        sessions.retain(|_, e| now.duration_since(e.last_seen) < self.ttl);

        while sessions.len() >= self.capacity {
            let oldest = sessions
                .iter()
                .min_by_key(|(_, e)| e.last_seen)
                .map(|(id, _)| *id);
            match oldest {
                Some(old) => {
                    sessions.remove(&old);
                    tracing::debug!("Evicted session {}", old);
                }
                None => break,
            }
        }
        sessions.insert(id, Entry::new(now));
    }

    /// Run `f` against the session's state.
    pub fn with_state<R>(&self, id: Uuid, f: impl FnOnce(&mut FormState) -> R) -> R {
        let mut sessions = self.lock();
        if !sessions.contains_key(&id) {
            self.admit(&mut sessions, id);
        }
        let entry = sessions.get_mut(&id).map(|e| {
            e.last_seen = Instant::now();
            &mut e.form
        });
        match entry {
            Some(form) => f(form),
            // Capacity is at least one, so `admit` always leaves `id` in the map.
            None => f(&mut FormState::new()),
        }
    }

    /// Replace the session's state with a brand new, empty one.
    pub fn reset(&self, id: Uuid) {
        self.with_state(id, FormState::reset);
        tracing::debug!("Reset session {}", id);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::form::Field;

    #[test]
    fn test_lookup_never_creates() {
        let store = SessionStore::new();
        assert_eq!(store.lookup(None), None);
        assert_eq!(store.lookup(Some("not-a-uuid")), None);
        assert_eq!(store.lookup(Some(&Uuid::new_v4().to_string())), None);
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_known_cookie_reuses_session() {
        let store = SessionStore::new();
        let id    = store.open();
        assert_eq!(store.lookup(Some(&id.to_string())), Some(id));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_sessions_are_isolated() {
        let store = SessionStore::new();
        let a     = store.open();
        let b     = store.open();

        store.with_state(a, |s| {
            s.initialize();
            s.set(Field::Gender, "Female").unwrap();
        });
        store.with_state(b, FormState::initialize);

        assert_eq!(store.with_state(a, |s| s.text(Field::Gender).map(str::to_string)), Some("Female".into()));
        assert_eq!(store.with_state(b, |s| s.text(Field::Gender).map(str::to_string)), Some(String::new()));
    }

    #[test]
    fn test_reset_replaces_state() {
        let store = SessionStore::new();
        let id    = store.open();
        store.with_state(id, |s| {
            s.initialize();
            s.set(Field::Department, "Legal").unwrap();
        });

        store.reset(id);
        assert!(store.with_state(id, |s| s.is_empty()));
    }

    #[test]
    fn test_capacity_evicts_least_recently_seen() {
        let store = SessionStore::with_limits(SESSION_TTL, 3);
        let first = store.open();
        let ids: Vec<_> = (0..4).map(|_| store.open()).collect();

        assert_eq!(store.len(), 3);
        assert_eq!(store.lookup(Some(&first.to_string())), None);
        assert_eq!(store.lookup(Some(&ids[3].to_string())), Some(ids[3]));
    }

    #[test]
    fn test_idle_sessions_expire() {
        let store = SessionStore::with_limits(Duration::ZERO, 10);
        let a     = store.open();
        assert_eq!(store.lookup(Some(&a.to_string())), None);

        store.open();
        store.open();
        assert_eq!(store.len(), 1);
    }
}

//! Session management.
//!
//! The persisted token/user pair is the source of truth; a reactive
//! mirror drives the UI and the router guard. Exactly three flows write
//! the stored session: login saves it, logout clears it, and the API
//! client's 401 handler clears it.

use leptos::prelude::*;
use starboard_shared::{LoginResponse, User};

use crate::storage::{BrowserStorage, KeyValueStore};

/// localStorage keys, fixed so a deployed session survives app updates.
pub const TOKEN_KEY: &str = "authToken";
pub const USER_KEY: &str = "user";

// =========================================================
// Persisted session
// =========================================================

/// An authenticated session. Token presence alone decides authentication;
/// the cached user is informational (shell header, profile screen).
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: User,
}

impl From<LoginResponse> for Session {
    fn from(response: LoginResponse) -> Self {
        Self {
            token: response.token,
            user: response.user,
        }
    }
}

/// Storage-backed session accessor, generic over the storage seam so the
/// API client's auth behavior is testable on the host.
#[derive(Debug, Clone, Default)]
pub struct SessionStore<S: KeyValueStore> {
    storage: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn token(&self) -> Option<String> {
        self.storage.get(TOKEN_KEY)
    }

    pub fn user(&self) -> Option<User> {
        self.storage.get(USER_KEY)
    }

    pub fn save(&self, session: &Session) {
        self.storage.set(TOKEN_KEY, &session.token);
        self.storage.set(USER_KEY, &session.user);
    }

    /// Replaces the cached user, keeping the token. Used when a profile
    /// update is accepted by the server.
    pub fn set_user(&self, user: &User) {
        self.storage.set(USER_KEY, user);
    }

    pub fn clear(&self) {
        self.storage.remove(TOKEN_KEY);
        self.storage.remove(USER_KEY);
    }
}

// =========================================================
// Reactive mirror
// =========================================================

#[derive(Clone, Default)]
pub struct SessionState {
    pub user: Option<User>,
    pub is_authenticated: bool,
}

/// Read/write signal pair shared through Context.
#[derive(Clone, Copy)]
pub struct SessionContext {
    pub state: ReadSignal<SessionState>,
    pub set_state: WriteSignal<SessionState>,
}

impl SessionContext {
    pub fn new() -> Self {
        let (state, set_state) = signal(SessionState::default());
        Self { state, set_state }
    }

    /// Authentication signal injected into the router service.
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.get().is_authenticated)
    }

    pub fn user_signal(&self) -> Signal<Option<User>> {
        let state = self.state;
        Signal::derive(move || state.get().user)
    }
}

pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().expect("SessionContext should be provided")
}

/// Restores a persisted session into the reactive state at startup, so a
/// reload keeps the user signed in.
pub fn init_session(ctx: &SessionContext) {
    let store = SessionStore::new(BrowserStorage);
    if store.token().is_some() {
        let user = store.user();
        ctx.set_state.update(|state| {
            state.user = user;
            state.is_authenticated = true;
        });
    }
}

/// Login flow writer: persist the session, then flip the reactive state.
pub fn establish_session(
    ctx: &SessionContext,
    store: &SessionStore<impl KeyValueStore>,
    response: LoginResponse,
) {
    let session = Session::from(response);
    store.save(&session);
    ctx.set_state.update(|state| {
        state.user = Some(session.user);
        state.is_authenticated = true;
    });
}

/// Logout and 401 writer: drop the persisted session and the reactive
/// state. Navigation is handled by the caller (or the router's auth
/// listener).
pub fn clear_session(ctx: &SessionContext, store: &SessionStore<impl KeyValueStore>) {
    store.clear();
    ctx.set_state.update(|state| {
        state.user = None;
        state.is_authenticated = false;
    });
}

/// Merges server-accepted profile fields into the cached user without a
/// round-trip.
pub fn update_session_user(
    ctx: &SessionContext,
    store: &SessionStore<impl KeyValueStore>,
    user: User,
) {
    store.set_user(&user);
    ctx.set_state.update(|state| {
        state.user = Some(user);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn make_user(id: u64, name: &str) -> User {
        User {
            id,
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            role: "admin".to_string(),
            active: true,
            last_login: None,
        }
    }

    #[test]
    fn save_then_read_back() {
        let store = SessionStore::new(MemoryStore::new());
        let session = Session {
            token: "tok-123".to_string(),
            user: make_user(1, "Ada"),
        };

        store.save(&session);

        assert_eq!(store.token().as_deref(), Some("tok-123"));
        assert_eq!(store.user(), Some(session.user));
    }

    #[test]
    fn empty_store_has_no_session() {
        let store = SessionStore::new(MemoryStore::new());
        assert_eq!(store.token(), None);
        assert_eq!(store.user(), None);
    }

    #[test]
    fn clear_removes_both_keys() {
        let store = SessionStore::new(MemoryStore::new());
        store.save(&Session {
            token: "tok".to_string(),
            user: make_user(2, "Grace"),
        });

        store.clear();

        assert_eq!(store.token(), None);
        assert_eq!(store.user(), None);
    }

    #[test]
    fn set_user_keeps_the_token() {
        let store = SessionStore::new(MemoryStore::new());
        store.save(&Session {
            token: "tok".to_string(),
            user: make_user(3, "Linus"),
        });

        let renamed = make_user(3, "Torvalds");
        store.set_user(&renamed);

        assert_eq!(store.token().as_deref(), Some("tok"));
        assert_eq!(store.user(), Some(renamed));
    }
}

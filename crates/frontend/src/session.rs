//! Session store: the logged-in user's token and cached profile.
//!
//! The session lives in browser-local storage under two entries and is
//! exposed to the component tree through a context handle. It is set at
//! login, cleared at logout, and read-only everywhere else. There is no
//! expiry or refresh; a stale token surfaces as failed requests.

use gloo_storage::{LocalStorage, Storage};
use lead_core::{Capability, Role, User};
use serde::{Deserialize, Serialize};
use yew::prelude::*;

const TOKEN_KEY: &str = "token";
const USER_KEY: &str = "user";

/// The client-held proof of authentication plus cached profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

/// Load the persisted session, if both entries are present.
fn load() -> Option<Session> {
    let token: String = LocalStorage::get(TOKEN_KEY).ok()?;
    let user: User = LocalStorage::get(USER_KEY).ok()?;
    Some(Session { token, user })
}

fn persist(session: &Session) {
    let _ = LocalStorage::set(TOKEN_KEY, &session.token);
    let _ = LocalStorage::set(USER_KEY, &session.user);
}

fn clear() {
    LocalStorage::delete(TOKEN_KEY);
    LocalStorage::delete(USER_KEY);
}

/// Injected session context handle.
#[derive(Clone, PartialEq)]
pub struct SessionHandle {
    state: UseStateHandle<Option<Session>>,
}

impl SessionHandle {
    /// The current session, if logged in.
    pub fn current(&self) -> Option<Session> {
        (*self.state).clone()
    }

    /// The bearer token, or an empty string when logged out (requests made
    /// without a session fail server-side like any other bad token).
    pub fn token(&self) -> String {
        self.state
            .as_ref()
            .map(|s| s.token.clone())
            .unwrap_or_default()
    }

    /// The logged-in user's role.
    pub fn role(&self) -> Option<Role> {
        self.state.as_ref().map(|s| s.user.role)
    }

    /// Whether the logged-in user may perform `capability`.
    pub fn can(&self, capability: Capability) -> bool {
        self.role().map_or(false, |role| role.can(capability))
    }

    /// Persist and install a session after a successful login.
    pub fn login(&self, session: Session) {
        persist(&session);
        self.state.set(Some(session));
    }

    /// Clear the persisted session and log out.
    pub fn logout(&self) {
        clear();
        self.state.set(None);
    }
}

/// Properties for SessionProvider.
#[derive(Properties, PartialEq)]
pub struct SessionProviderProps {
    pub children: Children,
}

/// Provides the [`SessionHandle`] context, seeded from local storage.
#[function_component(SessionProvider)]
pub fn session_provider(props: &SessionProviderProps) -> Html {
    let state = use_state(load);
    let handle = SessionHandle { state };

    html! {
        <ContextProvider<SessionHandle> context={handle}>
            { props.children.clone() }
        </ContextProvider<SessionHandle>>
    }
}

/// Access the session context from any component under [`SessionProvider`].
#[hook]
pub fn use_session() -> SessionHandle {
    use_context::<SessionHandle>().expect("SessionProvider is missing from the component tree")
}

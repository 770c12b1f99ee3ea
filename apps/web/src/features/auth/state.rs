//! Auth session state and context for the frontend. The provider hydrates
//! the session once on mount using cookie-based API calls and exposes
//! derived auth signals for guards and routes. Only non-sensitive metadata
//! is stored in memory; the session token stays in its `HttpOnly` cookie.

use crate::features::auth::{client, types::UserSession};
use leptos::{prelude::*, task::spawn_local};

#[derive(Clone, Copy)]
/// Auth session context shared through Leptos.
pub struct AuthContext {
    pub session: RwSignal<Option<UserSession>>,
    pub is_authenticated: Signal<bool>,
    /// `false` until the initial session fetch settles; guards wait for it
    /// so a slow hydrate does not bounce signed-in users to the login page.
    pub hydrated: RwSignal<bool>,
}

impl AuthContext {
    /// Builds a context around the provided session signal.
    fn new(session: RwSignal<Option<UserSession>>, hydrated: RwSignal<bool>) -> Self {
        let is_authenticated = Signal::derive(move || session.get().is_some());
        Self {
            session,
            is_authenticated,
            hydrated,
        }
    }

    /// Updates the in-memory session after login or refresh.
    pub fn set_session(&self, session: UserSession) {
        self.session.set(Some(session));
    }

    /// Clears the in-memory session, typically on logout.
    pub fn clear_session(&self) {
        self.session.set(None);
    }
}

/// Provides auth context and hydrates the session once on mount.
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let session = RwSignal::new(None);
    let hydrated = RwSignal::new(false);
    let auth = AuthContext::new(session, hydrated);
    provide_context(auth);

    spawn_local(async move {
        if let Ok(Some(session)) = client::fetch_session().await {
            auth.set_session(session);
        }
        hydrated.set(true);
    });

    view! { {children()} }
}

/// Returns the current auth context or a fallback empty context.
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().unwrap_or_else(|| {
        let session = RwSignal::new(None);
        AuthContext::new(session, RwSignal::new(true))
    })
}

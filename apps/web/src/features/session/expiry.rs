//! Session expiry notice, independent of inactivity.

use gloo_timers::callback::Interval;
use leptos::{logging, prelude::*, task::spawn_local};
use session_guard::{Clock, ExpiryConfig, ExpiryStatus, expiry_status};

use super::LOGOUT_DESTINATION;
use super::browser::BrowserClock;
use super::logout::request_logout;
use crate::components::CountdownDialog;
use crate::features::auth::{client, state::use_auth};

#[component]
pub fn SessionExpiryNotice() -> impl IntoView {
    let auth = use_auth();
    let (status, set_status) = signal::<Option<ExpiryStatus>>(None);

    let recompute = move || {
        let next = auth.session.get_untracked().map(|session| {
            expiry_status(
                &ExpiryConfig::new(),
                BrowserClock.now_ms(),
                session.snapshot().expires_at_ms(),
            )
        });
        set_status.set(next);
    };

    // Recompute when the session changes (login, refresh, logout)...
    Effect::new(move |_| {
        let _ = auth.session.get();
        recompute();
    });

    // ...and on the fixed cadence in between.
    Effect::new(move |_| {
        let interval_ms =
            u32::try_from(ExpiryConfig::new().recompute_interval_ms()).unwrap_or(60_000);
        let interval = Interval::new(interval_ms, recompute);
        interval.forget();
    });

    let extend = Callback::new(move |()| {
        spawn_local(async move {
            match client::refresh_session().await {
                Ok(session) => auth.set_session(session),
                Err(err) => logging::warn!("session refresh failed: {err}"),
            }
        });
    });
    let sign_out = Callback::new(move |()| {
        spawn_local(async {
            request_logout(LOGOUT_DESTINATION).await;
        });
    });

    view! {
        {move || match status.get() {
            Some(ExpiryStatus::Expiring { remaining_ms }) => {
                Some(
                    view! {
                        <CountdownDialog
                            title="Session expiring"
                            message="Your session is about to expire. Extend it to keep working."
                            remaining_ms=remaining_ms
                            primary_label="Extend session"
                            on_primary=extend
                            secondary_label="Sign out"
                            on_secondary=sign_out
                        />
                    }
                        .into_any(),
                )
            }
            Some(ExpiryStatus::Expired) => {
                // Display only; navigation stays with the logout coordinator.
                Some(
                    view! {
                        <CountdownDialog
                            title="Session expired"
                            message="Your session has expired. Please sign in again."
                            remaining_ms=0
                            primary_label="Sign in again"
                            on_primary=sign_out
                        />
                    }
                        .into_any(),
                )
            }
            _ => None,
        }}
    }
}

//! Browser wiring of the session guards.
//!
//! The state machines live in the `session_guard` crate; this module binds
//! them to real browser facilities: `Date.now()`, `localStorage` and
//! `sessionStorage`, `BroadcastChannel` with a storage-event fallback, and
//! hard navigation. One logout coordinator and one inactivity monitor exist
//! per tab; cross-tab logout is best-effort and idempotent.

pub(crate) mod browser;
pub(crate) mod expiry;
pub(crate) mod inactivity;
pub(crate) mod logout;

use expiry::SessionExpiryNotice;
use inactivity::InactivityGuard;
use leptos::prelude::*;

/// Where a signed-out tab lands.
pub(crate) const LOGOUT_DESTINATION: &str = "/login";

/// Mounts the session guards once and renders the app content.
#[component]
pub fn SessionGuard(children: Children) -> impl IntoView {
    logout::install_cross_tab_listener();
    view! {
        <InactivityGuard />
        <SessionExpiryNotice />
        {children()}
    }
}

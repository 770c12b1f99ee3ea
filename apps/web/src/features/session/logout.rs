//! Per-tab logout coordination wired to the browser.
//!
//! Every trigger — the sign-out button, the inactivity timeout, the expiry
//! notice, a cross-tab notice — funnels through [`request_logout`], so the
//! sequence runs once per tab no matter how many triggers fire.

use std::rc::Rc;

use async_trait::async_trait;
use leptos::logging;
use session_guard::{
    BusError, EventBus, LogoutCoordinator, LogoutEffects, LogoutNotice, LogoutOutcome,
    SignOutError,
};

use super::browser::{BroadcastBus, BrowserClock, browser_markers, clear_visible_cookies};
use crate::features::auth::client;

thread_local! {
    // Module-scoped coordinator: one logout sequence per tab.
    static COORDINATOR: Rc<LogoutCoordinator<BrowserClock>> =
        Rc::new(LogoutCoordinator::new(BrowserClock));
}

struct BrowserLogoutEffects;

#[async_trait(?Send)]
impl LogoutEffects for BrowserLogoutEffects {
    fn broadcast(&self, notice: &LogoutNotice) -> Result<(), BusError> {
        BroadcastBus::new().publish(notice)
    }

    fn clear_client_state(&self) {
        browser_markers().clear_auth_artifacts();
        clear_visible_cookies();
    }

    async fn sign_out(&self) -> Result<(), SignOutError> {
        client::logout()
            .await
            .map_err(|err| SignOutError(err.to_string()))
    }

    fn navigate(&self, destination: &str) {
        // Hard navigation so every timer and signal dies with the document.
        if let Some(window) = web_sys::window() {
            if let Err(err) = window.location().assign(destination) {
                logging::error!("logout navigation failed: {err:?}");
            }
        }
    }
}

/// Run the single-flight logout sequence; duplicate triggers attach to the
/// in-flight run and do nothing further.
pub(crate) async fn request_logout(destination: &str) {
    let coordinator = COORDINATOR.with(Rc::clone);
    match coordinator.run(&BrowserLogoutEffects, destination).await {
        LogoutOutcome::Completed => {}
        LogoutOutcome::AlreadyInFlight => {
            logging::log!("logout already in flight");
        }
    }
}

/// Route notices from sibling tabs through this tab's own coordinator,
/// preserving single-flight locally; the repeated sign-out/clear/redirect
/// steps are idempotent across tabs.
pub(crate) fn install_cross_tab_listener() {
    super::browser::subscribe_logout(|notice| {
        leptos::task::spawn_local(async move {
            request_logout(&notice.destination).await;
        });
    });
}

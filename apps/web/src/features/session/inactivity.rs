//! Inactivity watcher: activity listeners, heartbeat, and the pre-logout
//! warning dialog.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Interval;
use leptos::{logging, prelude::*, task::spawn_local};
use session_guard::{
    Clock, InactivityConfig, InactivityMonitor, ResumeDecision, Tick, evaluate_resume,
};

use super::LOGOUT_DESTINATION;
use super::browser::{BrowserClock, browser_markers, log_store_result, on_window_event};
use super::logout::request_logout;
use crate::components::CountdownDialog;
use crate::features::auth::state::use_auth;

const TICK_INTERVAL_MS: u32 = 1_000;

thread_local! {
    // Module-scoped so every listener and timer shares one monitor per tab.
    static MONITOR: RefCell<Option<Rc<InactivityMonitor>>> = const { RefCell::new(None) };
}

fn set_monitor(monitor: Option<Rc<InactivityMonitor>>) {
    MONITOR.with(|slot| *slot.borrow_mut() = monitor);
}

fn with_monitor<R>(f: impl FnOnce(&InactivityMonitor) -> R) -> Option<R> {
    MONITOR.with(|slot| slot.borrow().as_ref().map(|monitor| f(monitor)))
}

/// Reset the countdown on qualifying input; dismiss an armed warning.
fn on_activity(set_warning_remaining: WriteSignal<Option<i64>>) {
    let now = BrowserClock.now_ms();
    if with_monitor(|monitor| monitor.record_activity(now)).unwrap_or(false) {
        set_warning_remaining.set(None);
    }
}

#[component]
pub fn InactivityGuard() -> impl IntoView {
    let auth = use_auth();
    let (warning_remaining, set_warning_remaining) = signal::<Option<i64>>(None);

    // (Re)build the monitor whenever the session changes. On load this also
    // decides between resuming a counted-down session and logging out
    // immediately (stale activity, absolute cap, or closed browser).
    Effect::new(move |_| {
        let Some(session) = auth.session.get() else {
            set_monitor(None);
            set_warning_remaining.set(None);
            return;
        };

        let markers = browser_markers();
        let now = BrowserClock.now_ms();

        if session.remember_me {
            // Remember-me sessions are exempt from inactivity logout.
            if markers.session_start().is_none() {
                log_store_result(markers.begin_session(now, true));
            } else {
                log_store_result(markers.mark_tab_alive());
            }
            set_monitor(None);
            set_warning_remaining.set(None);
            return;
        }

        let config = InactivityConfig::new();
        match evaluate_resume(&config, now, &markers.resume_markers()) {
            ResumeDecision::FreshSession => {
                log_store_result(markers.begin_session(now, false));
                set_monitor(Some(Rc::new(InactivityMonitor::new(config, now))));
            }
            ResumeDecision::Resumed { last_activity_ms } => {
                log_store_result(markers.mark_tab_alive());
                set_monitor(Some(Rc::new(InactivityMonitor::with_last_activity(
                    config,
                    last_activity_ms,
                ))));
            }
            ResumeDecision::ForceLogout(reason) => {
                logging::log!("forcing logout on load: {reason:?}");
                set_monitor(None);
                spawn_local(async {
                    request_logout(LOGOUT_DESTINATION).await;
                });
            }
        }
    });

    // Activity listeners, installed once for the page lifetime. They consult
    // the shared monitor, so they are inert while signed out.
    Effect::new(move |_| {
        for event_type in ["pointermove", "keydown", "scroll", "touchstart", "click"] {
            on_window_event(event_type, move || on_activity(set_warning_remaining));
        }
    });

    // Tick driver: the countdown re-derives from elapsed time on every tick,
    // so late timer firings shorten the display, never the deadline.
    Effect::new(move |_| {
        let ticker = Interval::new(TICK_INTERVAL_MS, move || {
            let now = BrowserClock.now_ms();
            let Some(tick) = with_monitor(|monitor| monitor.tick(now)) else {
                return;
            };
            match tick {
                Tick::Idle => {
                    if warning_remaining.get_untracked().is_some() {
                        set_warning_remaining.set(None);
                    }
                }
                Tick::Warn { remaining_ms } => set_warning_remaining.set(Some(remaining_ms)),
                Tick::LogoutDue => {
                    set_warning_remaining.set(None);
                    spawn_local(async {
                        request_logout(LOGOUT_DESTINATION).await;
                    });
                }
            }
        });
        ticker.forget();

        // Heartbeat: persist liveness + last activity so a reload recomputes
        // elapsed inactivity instead of resetting it.
        let heartbeat_ms =
            u32::try_from(InactivityConfig::new().heartbeat_interval_ms()).unwrap_or(10_000);
        let heartbeat = Interval::new(heartbeat_ms, move || {
            if let Some(last_activity_ms) = with_monitor(InactivityMonitor::last_activity_ms) {
                let markers = browser_markers();
                log_store_result(markers.record_heartbeat(BrowserClock.now_ms()));
                log_store_result(markers.record_activity(last_activity_ms));
            }
        });
        heartbeat.forget();
    });

    view! {
        {move || {
            warning_remaining
                .get()
                .map(|remaining_ms| {
                    let stay = Callback::new(move |()| {
                        let now = BrowserClock.now_ms();
                        with_monitor(|monitor| monitor.stay_logged_in(now));
                        set_warning_remaining.set(None);
                    });
                    let leave = Callback::new(move |()| {
                        spawn_local(async {
                            request_logout(LOGOUT_DESTINATION).await;
                        });
                    });
                    view! {
                        <CountdownDialog
                            title="Still there?"
                            message="You are about to be signed out due to inactivity."
                            remaining_ms=remaining_ms
                            primary_label="Stay signed in"
                            on_primary=stay
                            secondary_label="Sign out now"
                            on_secondary=leave
                        />
                    }
                })
        }}
    }
}

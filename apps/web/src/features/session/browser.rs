//! `web-sys` backends for the `session_guard` abstractions.

use std::rc::Rc;

use session_guard::markers::LOGOUT_FLAG_KEY;
use session_guard::{
    BusError, Clock, EventBus, InactivityConfig, KeyValueStore, LogoutNotice, SessionMarkers,
    StoreError,
};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{BroadcastChannel, MessageEvent, Storage, StorageEvent};

use super::LOGOUT_DESTINATION;

/// Broadcast channel carrying cross-tab logout notices.
pub(crate) const LOGOUT_CHANNEL: &str = "honorarx.session";

/// Wall clock over `Date.now()`.
pub(crate) struct BrowserClock;

impl Clock for BrowserClock {
    fn now_ms(&self) -> i64 {
        js_sys::Date::now() as i64
    }
}

enum StorageArea {
    Local,
    Session,
}

/// `KeyValueStore` over one browser storage area. A blocked area (privacy
/// mode) reads as empty and rejects writes; callers log and continue.
pub(crate) struct BrowserStore {
    area: StorageArea,
}

impl BrowserStore {
    pub(crate) fn local() -> Self {
        Self {
            area: StorageArea::Local,
        }
    }

    pub(crate) fn session() -> Self {
        Self {
            area: StorageArea::Session,
        }
    }

    fn storage(&self) -> Option<Storage> {
        let window = web_sys::window()?;
        match self.area {
            StorageArea::Local => window.local_storage().ok().flatten(),
            StorageArea::Session => window.session_storage().ok().flatten(),
        }
    }
}

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let storage = self.storage().ok_or(StoreError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|err| StoreError::WriteRejected {
                key: key.to_string(),
                reason: format!("{err:?}"),
            })
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let storage = self.storage().ok_or(StoreError::Unavailable)?;
        storage
            .remove_item(key)
            .map_err(|err| StoreError::WriteRejected {
                key: key.to_string(),
                reason: format!("{err:?}"),
            })
    }

    fn keys(&self) -> Vec<String> {
        let Some(storage) = self.storage() else {
            return Vec::new();
        };
        let length = storage.length().unwrap_or(0);
        (0..length)
            .filter_map(|index| storage.key(index).ok().flatten())
            .collect()
    }
}

/// Marker pair over `localStorage` (persistent) and `sessionStorage`
/// (per-tab).
pub(crate) fn browser_markers() -> SessionMarkers {
    SessionMarkers::new(
        Rc::new(BrowserStore::local()),
        Rc::new(BrowserStore::session()),
    )
}

pub(crate) fn log_store_result(result: Result<(), StoreError>) {
    if let Err(err) = result {
        // Storage failures must never break the session guards.
        leptos::logging::warn!("session marker write failed: {err}");
    }
}

/// Publish side of the cross-tab channel: `BroadcastChannel` first, the
/// shared-storage logout flag as the fallback sibling tabs observe via
/// storage events.
pub(crate) struct BroadcastBus {
    markers: SessionMarkers,
}

impl BroadcastBus {
    pub(crate) fn new() -> Self {
        Self {
            markers: browser_markers(),
        }
    }
}

impl EventBus for BroadcastBus {
    fn publish(&self, notice: &LogoutNotice) -> Result<(), BusError> {
        log_store_result(self.markers.set_logout_flag(notice.at_ms));

        let channel =
            BroadcastChannel::new(LOGOUT_CHANNEL).map_err(|err| BusError(format!("{err:?}")))?;
        let payload = notice.to_json().map_err(|err| BusError(err.to_string()))?;
        let result = channel
            .post_message(&JsValue::from_str(&payload))
            .map_err(|err| BusError(format!("{err:?}")));
        channel.close();
        result
    }
}

/// Remove every cookie the script can see. `HttpOnly` auth cookies are the
/// server's to clear.
pub(crate) fn clear_visible_cookies() {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return;
    };
    let Ok(html_document) = document.dyn_into::<web_sys::HtmlDocument>() else {
        return;
    };
    let Ok(cookies) = html_document.cookie() else {
        return;
    };
    for pair in cookies.split(';') {
        let name = pair.split('=').next().unwrap_or("").trim();
        if name.is_empty() {
            continue;
        }
        let _ = html_document.set_cookie(&format!("{name}=; Max-Age=0; Path=/"));
    }
}

/// Attach a page-lifetime window listener; the closure is leaked on
/// purpose, mirroring the lifetime of the document.
pub(crate) fn on_window_event(event_type: &str, handler: impl Fn() + 'static) {
    if let Some(window) = web_sys::window() {
        let closure =
            Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| handler());
        let _ =
            window.add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// Listen for logout notices from sibling tabs over both transports.
/// Listeners live for the page lifetime; stale notices are dropped.
pub(crate) fn subscribe_logout(on_notice: impl Fn(LogoutNotice) + 'static) {
    let on_notice = Rc::new(on_notice);
    let ttl_ms = InactivityConfig::new().logout_flag_ttl_ms();

    if let Ok(channel) = BroadcastChannel::new(LOGOUT_CHANNEL) {
        let handler = Rc::clone(&on_notice);
        let closure = Closure::<dyn FnMut(MessageEvent)>::new(move |event: MessageEvent| {
            let Some(payload) = event.data().as_string() else {
                return;
            };
            let Some(notice) = LogoutNotice::from_json(&payload) else {
                return;
            };
            if !notice.is_stale(BrowserClock.now_ms(), ttl_ms) {
                handler(notice);
            }
        });
        channel.set_onmessage(Some(closure.as_ref().unchecked_ref()));
        closure.forget();
        // Keep the channel reachable so the subscription survives.
        std::mem::forget(channel);
    }

    if let Some(window) = web_sys::window() {
        let handler = Rc::clone(&on_notice);
        let closure = Closure::<dyn FnMut(StorageEvent)>::new(move |event: StorageEvent| {
            if event.key().as_deref() != Some(LOGOUT_FLAG_KEY) {
                return;
            }
            // The fallback carries only the flag timestamp; destination
            // defaults to the login page.
            let Some(value) = event.new_value() else {
                return;
            };
            let Ok(at_ms) = value.trim().parse::<i64>() else {
                return;
            };
            let notice = LogoutNotice::new(at_ms, LOGOUT_DESTINATION);
            if !notice.is_stale(BrowserClock.now_ms(), ttl_ms) {
                handler(notice);
            }
        });
        let _ =
            window.add_event_listener_with_callback("storage", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

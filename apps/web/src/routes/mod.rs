mod contact;
mod dashboard;
mod legal;
mod login;
mod not_found;
mod profile;
mod reset_password;
mod signup;
mod verify_email;

pub(crate) use contact::ContactPage;
pub(crate) use dashboard::DashboardPage;
pub(crate) use legal::{ImprintPage, PrivacyPage};
pub(crate) use login::LoginPage;
pub(crate) use not_found::NotFoundPage;
pub(crate) use profile::ProfilePage;
pub(crate) use reset_password::ResetPasswordPage;
pub(crate) use signup::SignUpPage;
pub(crate) use verify_email::VerifyEmailPage;

use leptos::prelude::*;
use leptos_router::components::{Route, Routes};
use leptos_router::path;

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Routes fallback=|| view! { <NotFoundPage /> }>
            <Route path=path!("/") view=DashboardPage />
            <Route path=path!("/login") view=LoginPage />
            <Route path=path!("/signup") view=SignUpPage />
            <Route path=path!("/verify-email") view=VerifyEmailPage />
            <Route path=path!("/reset-password") view=ResetPasswordPage />
            <Route path=path!("/profile") view=ProfilePage />
            <Route path=path!("/contact") view=ContactPage />
            <Route path=path!("/imprint") view=ImprintPage />
            <Route path=path!("/privacy") view=PrivacyPage />
            <Route path=path!("/*any") view=NotFoundPage />
        </Routes>
    }
}

/// Read a `#token=...` fragment. Tokens ride in the fragment so they never
/// show up in server logs; the fragment is cleared after reading.
pub(crate) fn take_fragment_token() -> Option<String> {
    let window = web_sys::window()?;
    let hash = window.location().hash().ok()?;
    let token = hash
        .trim_start_matches('#')
        .split('&')
        .find_map(|pair| pair.strip_prefix("token="))
        .map(str::to_string)
        .filter(|token| !token.is_empty())?;
    let _ = window.location().set_hash("");
    Some(token)
}

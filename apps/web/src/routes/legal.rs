//! Static legal pages.

use crate::components::AppShell;
use leptos::prelude::*;

#[component]
pub fn ImprintPage() -> impl IntoView {
    view! {
        <AppShell>
            <article class="prose dark:prose-invert max-w-screen-md mx-auto">
                <h1>"Imprint"</h1>
                <p>"HonorarX GmbH"</p>
                <p>"Musterstraße 12, 10115 Berlin, Germany"</p>
                <p>"Represented by the managing directors. Contact: team@honorarx.dev"</p>
                <p>"Commercial register: Amtsgericht Charlottenburg"</p>
            </article>
        </AppShell>
    }
}

#[component]
pub fn PrivacyPage() -> impl IntoView {
    view! {
        <AppShell>
            <article class="prose dark:prose-invert max-w-screen-md mx-auto">
                <h1>"Privacy"</h1>
                <p>
                    "We store the data you enter to run your account: email address, profile details, and the invoices you create. We do not sell data and we do not run third-party trackers."
                </p>
                <p>
                    "Session handling keeps a few timestamps in your browser's storage to sign you out after inactivity. They are removed when you sign out."
                </p>
                <p>"Questions? Write to privacy@honorarx.dev."</p>
            </article>
        </AppShell>
    }
}

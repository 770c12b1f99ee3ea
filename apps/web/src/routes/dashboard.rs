use crate::app_lib::GIT_SHA;
use crate::components::AppShell;
use crate::features::auth::state::use_auth;
use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth();
    let is_authenticated = auth.is_authenticated;
    let greeting = move || {
        auth.session
            .get()
            .and_then(|session| session.display_name)
            .unwrap_or_else(|| "there".to_string())
    };

    view! {
        <AppShell>
            <Show
                when=move || is_authenticated.get()
                fallback=move || {
                    view! {
                        <section class="max-w-screen-md mx-auto text-center py-12">
                            <h1 class="mb-4 text-4xl font-extrabold tracking-tight text-gray-900 dark:text-white">
                                "Invoicing without the busywork"
                            </h1>
                            <p class="mb-8 text-lg text-gray-500 dark:text-gray-400">
                                "HonorarX keeps your billing profile, clients, and honoraria in one place, so invoices go out in minutes instead of evenings."
                            </p>
                            <A
                                href="/signup"
                                {..}
                                class="inline-block rounded-lg bg-blue-700 px-6 py-3 text-base font-medium text-white hover:bg-blue-800 dark:bg-blue-600 dark:hover:bg-blue-700"
                            >
                                "Get started for free"
                            </A>
                        </section>
                    }
                }
            >
                <section class="max-w-screen-md mx-auto py-6">
                    <h1 class="mb-2 text-2xl font-bold text-gray-900 dark:text-white">
                        {move || format!("Welcome back, {}", greeting())}
                    </h1>
                    <p class="mb-6 text-gray-500 dark:text-gray-400">
                        "Your billing profile drives every invoice you send. Keep it current."
                    </p>
                    <A
                        href="/profile"
                        {..}
                        class="text-blue-700 hover:underline dark:text-blue-500"
                    >
                        "Review your profile"
                    </A>
                </section>
            </Show>
            <p class="mt-12 text-center text-xs text-gray-400 dark:text-gray-600">
                {format!("build {}", &GIT_SHA[..GIT_SHA.len().min(7)])}
            </p>
        </AppShell>
    }
}
